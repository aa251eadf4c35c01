//! Discovery 통합 테스트 - 잘못된 플러그인이 섞여 있어도 나머지는 등록되는지 검증
//!
//! 이 파일의 플러그인들은 테스트 바이너리 전역 테이블에 등록되므로
//! 다른 테스트 파일과 분리되어 있습니다.

use serde_json::json;
use testable_core::{
    register_testable, wire_args, Manifest, MathsTest, Outcome, PluginRegistry, PluginSource,
    RegistryEvent, TestableDefinition,
};
use testable_foundation::{Error, Result, TestableConfig};
use uuid::Uuid;

// ============================================================================
// Broken plugins
// ============================================================================

/// 기본 생성자에서 panic
pub struct Crashing;

impl Default for Crashing {
    fn default() -> Self {
        panic!("cannot build Crashing")
    }
}

impl TestableDefinition for Crashing {
    const IDENTITY: Uuid = Uuid::from_u128(0xC4A5_0000_0000_4000_8000_0000_0000_0001);
    const NAME: &'static str = "Crashing";

    fn manifest() -> Result<Manifest<Self>> {
        Manifest::builder().build()
    }
}

/// 빈 식별자
#[derive(Default)]
pub struct Blank;

impl TestableDefinition for Blank {
    const IDENTITY: Uuid = Uuid::nil();
    const NAME: &'static str = "Blank";

    fn manifest() -> Result<Manifest<Self>> {
        Manifest::builder().build()
    }
}

/// MathsTest와 같은 식별자
#[derive(Default)]
pub struct ShadowMaths;

impl ShadowMaths {
    fn add_numbers(&self, _num1: i32, _num2: i32) -> anyhow::Result<i32> {
        Ok(0)
    }
}

impl TestableDefinition for ShadowMaths {
    const IDENTITY: Uuid = MathsTest::IDENTITY;
    const NAME: &'static str = "ShadowMaths";

    fn manifest() -> Result<Manifest<Self>> {
        Manifest::builder()
            .operation("AddNumbers", &["num1", "num2"], Self::add_numbers)
            .build()
    }
}

/// 같은 이름의 연산이 두 개
#[derive(Default)]
pub struct BadManifest;

impl BadManifest {
    fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

impl TestableDefinition for BadManifest {
    const IDENTITY: Uuid = Uuid::from_u128(0xBAD0_0000_0000_4000_8000_0000_0000_0001);
    const NAME: &'static str = "BadManifest";

    fn manifest() -> Result<Manifest<Self>> {
        Manifest::builder()
            .operation("Ping", &[], Self::ping)
            .operation("Ping", &[], Self::ping)
            .build()
    }
}

register_testable!(Crashing);
register_testable!(Blank);
register_testable!(ShadowMaths);
register_testable!(BadManifest);

// ============================================================================
// Runtime-only plugin
// ============================================================================

/// discovery 테이블에 없고 실행 중에 등록
#[derive(Default)]
pub struct LateArrival;

impl LateArrival {
    fn hello(&self, name: String) -> anyhow::Result<String> {
        Ok(format!("hello {}", name))
    }
}

impl TestableDefinition for LateArrival {
    const IDENTITY: Uuid = Uuid::from_u128(0x1A7E_0000_0000_4000_8000_0000_0000_0001);
    const NAME: &'static str = "LateArrival";
    const DESCRIPTION: &'static str = "registered after discovery";

    fn manifest() -> Result<Manifest<Self>> {
        Manifest::builder()
            .operation("Hello", &["name"], Self::hello)
            .build()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_broken_plugins_are_excluded() {
    let registry = PluginRegistry::discovered(TestableConfig::default());

    let names: Vec<String> = registry.list().into_iter().map(|d| d.name).collect();
    assert_eq!(names, vec!["MathsTest", "SampleObjectTest", "StringTest"]);

    // MathsTest가 ShadowMaths보다 먼저 등록됨
    let outcome = registry
        .invoke(
            "b510c950-f320-4f4a-8d61-588896fc1534",
            "AddNumbers",
            wire_args(vec![json!(3), json!(4)]),
        )
        .unwrap();
    assert_eq!(outcome, Outcome::Value(json!(7)));
}

#[test]
fn test_discovery_report_and_events() {
    let registry = PluginRegistry::with_config(TestableConfig::default());
    let mut events = registry.subscribe();

    let report = registry.discover();
    assert_eq!(report.registered.len(), 3);
    assert!(!report.is_clean());

    let mut rejected: Vec<&str> = report.rejected.iter().map(|(name, _)| name.as_str()).collect();
    rejected.sort();
    assert_eq!(rejected, vec!["BadManifest", "Blank", "Crashing", "ShadowMaths"]);

    let reason = |name: &str| {
        report
            .rejected
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, reason)| reason.clone())
            .unwrap_or_default()
    };
    assert!(reason("Crashing").contains("cannot build Crashing"));
    assert!(reason("Blank").contains("empty identity"));
    assert!(reason("ShadowMaths").contains("already registered"));
    assert!(reason("BadManifest").contains("duplicate operation 'Ping'"));

    let mut registered = 0;
    let mut rejected_events = 0;
    while let Ok(event) = events.try_recv() {
        match event {
            RegistryEvent::Registered { source, .. } => {
                assert_eq!(source, PluginSource::Builtin);
                registered += 1;
            }
            RegistryEvent::Rejected { .. } => rejected_events += 1,
        }
    }
    assert_eq!(registered, 3);
    assert_eq!(rejected_events, 4);
}

#[test]
fn test_register_specific_type_at_runtime() {
    let registry = PluginRegistry::discovered(TestableConfig::default());

    let entry = registry.register::<LateArrival>().unwrap();
    assert_eq!(entry.key, 4);
    assert_eq!(entry.source, PluginSource::Runtime);

    let outcome = registry
        .invoke(&LateArrival::IDENTITY.to_string(), "Hello", wire_args(vec![json!("world")]))
        .unwrap();
    assert_eq!(outcome, Outcome::Value(json!("hello world")));

    // 다시 discovery 해도 runtime 등록은 유지
    registry.discover();
    assert_eq!(registry.len(), 4);
}

#[test]
fn test_register_broken_type_at_runtime() {
    let registry = PluginRegistry::new();

    assert!(matches!(
        registry.register::<Crashing>(),
        Err(Error::Construction { .. })
    ));
    assert!(matches!(
        registry.register::<BadManifest>(),
        Err(Error::Manifest { .. })
    ));
    assert!(matches!(
        registry.register::<Blank>(),
        Err(Error::Registration(_))
    ));
    assert!(registry.is_empty());
}
