//! testable-core: Core Runtime for Testable
//!
//! Layer2 - 플러그인 레지스트리와 호출 엔진
//!
//! # 주요 모듈
//!
//! - `testable`: 플러그인 계약 (`Testable`, `TestableDefinition`, `Hosted`)
//! - `manifest`: 호출 가능한 연산/필드 allow-list와 시그니처
//! - `invoke`: 인자 변환(coerce)과 호출 엔진, `Outcome`
//! - `registry`: discovery와 식별자 기반 조회
//! - `builtin`: 기본 제공 플러그인
//!
//! # 사용 예시
//!
//! ```ignore
//! use testable_core::{wire_args, PluginRegistry};
//! use testable_foundation::TestableConfig;
//!
//! // 시작 시 한 번 discovery
//! let registry = PluginRegistry::discovered(TestableConfig::load()?);
//!
//! // 목록
//! for plugin in registry.list() {
//!     println!("{} {:?}", plugin.name, plugin.operations);
//! }
//!
//! // 호출 (조회 실패만 Err, 호출 실패는 Outcome::Failed)
//! let outcome = registry.invoke(
//!     "B510C950-F320-4F4A-8D61-588896FC1534",
//!     "AddNumbers",
//!     wire_args(vec![json!(3), json!(4)]),
//! )?;
//! assert_eq!(outcome.value(), Some(&json!(7)));
//! ```

pub mod builtin;
pub mod invoke;
pub mod manifest;
pub mod registry;
pub mod testable;

// register_testable!에서 사용
pub use inventory;

// Re-exports: Contract
pub use testable::{Hosted, Testable, TestableDefinition};

// Re-exports: Manifest
pub use manifest::{
    describe_fields, describe_operations, FieldSignature, Handler, Manifest, ManifestBuilder,
    OperationSignature, ParameterSignature,
};

// Re-exports: Invoke
pub use invoke::{wire_args, InvocationReport, InvokeError, Outcome, RawArg};

// Re-exports: Registry
pub use registry::{
    DiscoveryReport, PluginDescriptor, PluginEntry, PluginFactory, PluginRegistry, PluginSource,
    RegistryEvent,
};

// Re-exports: Builtin
pub use builtin::{MathsTest, SampleObject, SampleObjectTest, StringTest};
