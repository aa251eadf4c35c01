//! Testable Config - 레지스트리/CLI 설정
//!
//! 글로벌(`<config_dir>/testable/config.json`)과 프로젝트(`.testable/config.json`)
//! 설정을 병합합니다. 프로젝트 설정이 우선합니다.

use crate::storage::JsonStore;
use crate::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// 설정 파일명
pub const TESTABLE_CONFIG_FILE: &str = "config.json";

/// 레지스트리 이벤트 채널 기본 크기
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

// ============================================================================
// TestableConfig
// ============================================================================

/// Testable 통합 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestableConfig {
    /// 버전 (마이그레이션용)
    #[serde(default = "default_version")]
    pub version: u32,

    /// discovery에서 제외할 플러그인 식별자
    #[serde(default)]
    pub disabled_plugins: Vec<Uuid>,

    /// 로그 레벨 (RUST_LOG가 없을 때 사용)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// 레지스트리 이벤트 채널 크기 (없으면 기본값)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_capacity: Option<usize>,
}

impl Default for TestableConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            disabled_plugins: Vec::new(),
            log_level: None,
            event_capacity: None,
        }
    }
}

impl TestableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Load / Save
    // ========================================================================

    /// 글로벌 + 프로젝트 병합 로드
    pub fn load() -> Result<Self> {
        let mut config = Self::new();

        // 1. 글로벌 설정
        if let Ok(global) = JsonStore::global() {
            if let Some(global_config) = global.load_optional::<TestableConfig>(TESTABLE_CONFIG_FILE)? {
                debug!(path = %global.file_path(TESTABLE_CONFIG_FILE).display(), "Loaded global config");
                config.merge(global_config);
            }
        }

        // 2. 프로젝트 설정
        let project = JsonStore::current_project()?;
        if let Some(project_config) = project.load_optional::<TestableConfig>(TESTABLE_CONFIG_FILE)? {
            debug!(path = %project.file_path(TESTABLE_CONFIG_FILE).display(), "Loaded project config");
            config.merge(project_config);
        }

        Ok(config)
    }

    /// 특정 저장소에서만 로드 (파일이 없으면 기본값)
    pub fn load_from(store: &JsonStore) -> Result<Self> {
        Ok(store
            .load_optional::<TestableConfig>(TESTABLE_CONFIG_FILE)?
            .unwrap_or_default())
    }

    /// 저장
    pub fn save_to(&self, store: &JsonStore) -> Result<()> {
        store.save(TESTABLE_CONFIG_FILE, self)
    }

    // ========================================================================
    // Merge
    // ========================================================================

    /// 다른 설정과 병합 (other가 우선)
    pub fn merge(&mut self, other: TestableConfig) {
        self.version = self.version.max(other.version);

        for id in other.disabled_plugins {
            if !self.disabled_plugins.contains(&id) {
                self.disabled_plugins.push(id);
            }
        }

        if other.log_level.is_some() {
            self.log_level = other.log_level;
        }
        if other.event_capacity.is_some() {
            self.event_capacity = other.event_capacity;
        }
    }

    // ========================================================================
    // Query / Builder
    // ========================================================================

    /// discovery에서 제외되는 플러그인인지 확인
    pub fn is_disabled(&self, identity: &Uuid) -> bool {
        self.disabled_plugins.contains(identity)
    }

    /// 실제 사용할 이벤트 채널 크기
    pub fn event_capacity(&self) -> usize {
        self.event_capacity.unwrap_or(DEFAULT_EVENT_CAPACITY).max(1)
    }

    pub fn disable_plugin(mut self, identity: Uuid) -> Self {
        if !self.disabled_plugins.contains(&identity) {
            self.disabled_plugins.push(identity);
        }
        self
    }

    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = Some(capacity.max(1));
        self
    }
}

fn default_version() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    const MATHS: Uuid = Uuid::from_u128(0xB510C950_F320_4F4A_8D61_588896FC1534);
    const STRING: Uuid = Uuid::from_u128(0x88C77A11_0DA3_4C1E_9A7B_1E5D7F9F31F9);

    #[test]
    fn test_defaults_from_empty_json() {
        let config: TestableConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.version, 1);
        assert!(config.disabled_plugins.is_empty());
        assert_eq!(config.event_capacity, None);
        assert_eq!(config.event_capacity(), DEFAULT_EVENT_CAPACITY);
    }

    #[test]
    fn test_camel_case_fields() {
        let json = r#"{
            "disabledPlugins": ["b510c950-f320-4f4a-8d61-588896fc1534"],
            "logLevel": "debug",
            "eventCapacity": 16
        }"#;
        let config: TestableConfig = serde_json::from_str(json).unwrap();
        assert!(config.is_disabled(&MATHS));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.event_capacity(), 16);
    }

    #[test]
    fn test_merge_project_wins() {
        let mut global = TestableConfig::new().disable_plugin(MATHS).log_level("info");
        let project = TestableConfig::new()
            .disable_plugin(STRING)
            .disable_plugin(MATHS)
            .log_level("trace");

        global.merge(project);

        assert_eq!(global.disabled_plugins, vec![MATHS, STRING]);
        assert_eq!(global.log_level.as_deref(), Some("trace"));
    }

    #[test]
    fn test_merge_project_restores_default_capacity() {
        let mut global = TestableConfig::new().with_event_capacity(16);
        let project: TestableConfig = serde_json::from_str(r#"{"eventCapacity": 256}"#).unwrap();

        global.merge(project);
        assert_eq!(global.event_capacity(), 256);

        // 프로젝트에 값이 없으면 글로벌 유지
        let mut global = TestableConfig::new().with_event_capacity(16);
        global.merge(serde_json::from_str("{}").unwrap());
        assert_eq!(global.event_capacity(), 16);
    }

    #[test]
    fn test_save_and_load_from_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());

        assert_eq!(TestableConfig::load_from(&store).unwrap().event_capacity(), 256);

        TestableConfig::new()
            .with_event_capacity(8)
            .disable_plugin(STRING)
            .save_to(&store)
            .unwrap();

        let loaded = TestableConfig::load_from(&store).unwrap();
        assert_eq!(loaded.event_capacity(), 8);
        assert!(loaded.is_disabled(&STRING));
    }
}
