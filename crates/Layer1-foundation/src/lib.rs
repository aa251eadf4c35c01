//! # testable-foundation
//!
//! Foundation layer for Testable:
//! - Error: 공통 에러 타입 (레지스트리, 설정, 저장소)
//! - Config: 통합 설정 (TestableConfig, 글로벌 + 프로젝트 병합)
//! - Storage: JsonStore (설정 파일 저장/로드)
//!
//! ## 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Layer3-cli (testable)                                  │
//! │                     │                                   │
//! │                     ▼                                   │
//! │  Layer2-core                                            │
//! │  ├── PluginRegistry (discovery, lookup)                 │
//! │  ├── Manifest (marker) / Reflector                      │
//! │  └── Invocation Engine (coerce, call, normalize)        │
//! │                     │                                   │
//! │                     ▼                                   │
//! │  Layer1-foundation (이 레이어)                           │
//! │  ├── Error / Result                                     │
//! │  ├── TestableConfig                                     │
//! │  └── JsonStore                                          │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod storage;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Config (설정)
// ============================================================================
pub use config::{TestableConfig, DEFAULT_EVENT_CAPACITY, TESTABLE_CONFIG_FILE};

// ============================================================================
// Storage (저장소)
// ============================================================================
pub use storage::JsonStore;
