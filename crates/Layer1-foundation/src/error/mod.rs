//! Error types for Testable
//!
//! 레지스트리/설정/저장소 에러를 중앙에서 관리
//!
//! 플러그인 연산 실행 중 발생하는 에러는 여기 포함되지 않습니다.
//! 그 에러들은 `testable-core`의 `InvokeError`로 Outcome 안에 담겨 반환됩니다.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Testable 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // 설정 관련
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    // ========================================================================
    // 저장소 관련
    // ========================================================================
    #[error("Storage error: {0}")]
    Storage(String),

    // ========================================================================
    // 플러그인 조회 관련
    // ========================================================================
    /// 식별자 문자열을 UUID로 해석할 수 없음
    #[error("Invalid plugin identity: {0}")]
    InvalidIdentity(String),

    /// 올바른 식별자지만 등록된 플러그인이 없음
    #[error("Plugin not found: {0}")]
    PluginNotFound(String),

    // ========================================================================
    // 플러그인 정의/등록 관련
    // ========================================================================
    #[error("Invalid manifest for {plugin}: {message}")]
    Manifest { plugin: String, message: String },

    #[error("Construction failed for {plugin}: {message}")]
    Construction { plugin: String, message: String },

    #[error("Registration rejected: {0}")]
    Registration(String),

    // ========================================================================
    // 외부 에러 변환
    // ========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Manifest 에러 생성 헬퍼
    pub fn manifest(plugin: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Manifest {
            plugin: plugin.into(),
            message: message.into(),
        }
    }

    /// 생성 실패 에러 생성 헬퍼
    pub fn construction(plugin: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Construction {
            plugin: plugin.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_messages() {
        assert_eq!(
            Error::InvalidIdentity("xyz".into()).to_string(),
            "Invalid plugin identity: xyz"
        );
        assert_eq!(
            Error::PluginNotFound("xyz".into()).to_string(),
            "Plugin not found: xyz"
        );
    }

    #[test]
    fn test_manifest_message() {
        let err = Error::manifest("MathsTest", "duplicate operation 'AddNumbers'");
        assert_eq!(
            err.to_string(),
            "Invalid manifest for MathsTest: duplicate operation 'AddNumbers'"
        );
    }
}
