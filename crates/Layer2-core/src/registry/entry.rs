//! Registry Entry - 레지스트리 항목 정의

use crate::manifest::{describe_fields, describe_operations};
use crate::testable::Testable;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

// ============================================================================
// PluginSource - 등록 경로
// ============================================================================

/// 플러그인이 어떤 경로로 등록되었는지
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginSource {
    /// discovery (`register_testable!`)
    Builtin,

    /// 실행 중 직접 등록 (`register`, `register_instance`)
    Runtime,
}

impl std::fmt::Display for PluginSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Builtin => write!(f, "builtin"),
            Self::Runtime => write!(f, "runtime"),
        }
    }
}

// ============================================================================
// PluginEntry - 레지스트리 항목
// ============================================================================

/// 레지스트리 항목 (플러그인 인스턴스 + 메타데이터)
#[derive(Clone)]
pub struct PluginEntry {
    /// 저장 키 (1부터 순차 할당)
    pub key: u32,

    /// 플러그인 인스턴스
    pub plugin: Arc<dyn Testable>,

    pub source: PluginSource,

    /// 등록 시간
    pub registered_at: DateTime<Utc>,
}

impl PluginEntry {
    pub fn new(key: u32, plugin: Arc<dyn Testable>, source: PluginSource) -> Self {
        Self {
            key,
            plugin,
            source,
            registered_at: Utc::now(),
        }
    }

    pub fn identity(&self) -> Uuid {
        self.plugin.identity()
    }

    /// 현재 시점의 설명 정보
    pub fn descriptor(&self) -> PluginDescriptor {
        let plugin = self.plugin.as_ref();
        PluginDescriptor {
            key: self.key,
            identity: plugin.identity(),
            name: plugin.name().to_string(),
            description: plugin.description().to_string(),
            author: plugin.author().to_string(),
            operations: describe_operations(plugin),
            fields: describe_fields(plugin),
            registered_at: self.registered_at,
            source: self.source,
        }
    }
}

impl std::fmt::Debug for PluginEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginEntry")
            .field("key", &self.key)
            .field("plugin", &self.plugin)
            .field("source", &self.source)
            .field("registered_at", &self.registered_at)
            .finish()
    }
}

// ============================================================================
// PluginDescriptor - 직렬화용 설명 정보
// ============================================================================

/// 플러그인 설명 정보 (목록/조회 응답)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginDescriptor {
    pub key: u32,
    pub identity: Uuid,
    pub name: String,
    pub description: String,
    pub author: String,
    pub operations: Vec<String>,
    pub fields: Vec<String>,
    pub registered_at: DateTime<Utc>,
    pub source: PluginSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_display() {
        assert_eq!(PluginSource::Builtin.to_string(), "builtin");
        assert_eq!(PluginSource::Runtime.to_string(), "runtime");
    }
}
