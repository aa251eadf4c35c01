//! Testable - 플러그인 계약
//!
//! - `Testable`: 레지스트리/엔진이 사용하는 object-safe 인터페이스
//! - `TestableDefinition`: 플러그인 작성자가 구현하는 정의
//! - `Hosted`: 정의를 `Testable`로 감싸는 어댑터

mod contract;

pub use contract::{Hosted, Testable, TestableDefinition};
