//! Manifest - 호출 가능한 연산/필드의 명시적 등록 테이블
//!
//! - `ManifestBuilder`: 플러그인 정의 시점에 연산/필드를 등록
//! - `Handler`: 타입이 있는 메서드를 연산으로 변환
//! - `describe_*`: 시그니처 문자열 목록

mod builder;
mod handler;
mod operation;
mod reflect;
mod signature;

pub use builder::{Manifest, ManifestBuilder};
pub use handler::Handler;
pub use operation::{Field, FieldFn, Operation, OperationFn, Parameter};
pub use reflect::{describe_fields, describe_operations};
pub use signature::{short_type_name, FieldSignature, OperationSignature, ParameterSignature};
