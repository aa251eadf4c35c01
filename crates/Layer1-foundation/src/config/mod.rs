//! Config - 통합 설정 관리
//!
//! - `testable.rs` - TestableConfig (글로벌 + 프로젝트 병합)

mod testable;

pub use testable::{TestableConfig, DEFAULT_EVENT_CAPACITY, TESTABLE_CONFIG_FILE};
