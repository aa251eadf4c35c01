//! # Plugin Registry
//!
//! 플러그인 발견(discovery)과 식별자 기반 조회
//!
//! ## 개요
//!
//! 플러그인 타입은 `register_testable!`로 자기 자신을 전역 테이블에 등록하고,
//! 프로세스 시작 시 `PluginRegistry::discover()`가 각 타입의 기본 인스턴스를
//! 하나씩 만들어 보관합니다. 실행 중에는 `register::<T>()`로 특정 타입을
//! 재시작 없이 추가할 수 있습니다.
//!
//! ## 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  inventory (PluginFactory table)                            │
//! │      │  discover()                                          │
//! │      ▼                                                      │
//! │  PluginRegistry                                             │
//! │  ┌───────────────────────────────────────────────────────┐  │
//! │  │  RwLock<Inner>                                        │  │
//! │  │  ┌──────────┬──────────┬──────────┐                   │  │
//! │  │  │ key 1    │ key 2    │ key 3    │  by_identity      │  │
//! │  │  │ Maths    │ Sample   │ String   │  (Uuid -> index)  │  │
//! │  │  └──────────┴──────────┴──────────┘                   │  │
//! │  └───────────────────────────────────────────────────────┘  │
//! │      │  broadcast::Sender<RegistryEvent>                    │
//! │      ▼                                                      │
//! │  subscribers (Registered / Rejected)                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 사용 예시
//!
//! ```ignore
//! use testable_core::registry::PluginRegistry;
//!
//! let registry = PluginRegistry::discovered(TestableConfig::load()?);
//! let outcome = registry.invoke(
//!     "B510C950-F320-4F4A-8D61-588896FC1534",
//!     "AddNumbers",
//!     wire_args(vec![json!(3), json!(4)]),
//! )?;
//! ```

mod discovery;
mod entry;
mod events;
mod plugin_registry;

pub use discovery::{construct, factories, DiscoveryReport, PluginFactory};
pub use entry::{PluginDescriptor, PluginEntry, PluginSource};
pub use events::RegistryEvent;
pub use plugin_registry::PluginRegistry;
