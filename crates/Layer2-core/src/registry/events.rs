//! Registry Events - 레지스트리 변경 이벤트

use super::entry::PluginSource;
use serde::Serialize;
use uuid::Uuid;

// ============================================================================
// RegistryEvent - 레지스트리 변경 이벤트
// ============================================================================

/// 레지스트리 변경 이벤트
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum RegistryEvent {
    /// 플러그인 등록됨
    Registered {
        identity: Uuid,
        key: u32,
        name: String,
        source: PluginSource,
    },

    /// 플러그인 제외됨 (생성 실패, 빈/중복 식별자 등)
    Rejected { plugin: String, reason: String },
}

impl RegistryEvent {
    /// 제외 이벤트 생성
    pub fn rejected(plugin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            plugin: plugin.into(),
            reason: reason.into(),
        }
    }

    /// 등록된 플러그인 식별자
    pub fn identity(&self) -> Option<Uuid> {
        match self {
            Self::Registered { identity, .. } => Some(*identity),
            Self::Rejected { .. } => None,
        }
    }
}
