//! Invocation Outcome - 호출 결과 (값 / 빈 결과 / 실패)

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// InvokeError
// ============================================================================

/// 호출 실패 종류
///
/// 이 에러는 `Err`로 전파되지 않고 항상 `Outcome::Failed` 안에 담깁니다.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvokeError {
    /// 등록되지 않은 연산
    #[error("Operation ({0}) not found")]
    NotFound(String),

    /// 등록되지 않은 필드
    #[error("Field ({0}) not found")]
    FieldNotFound(String),

    /// 인자 개수 또는 타입 불일치
    #[error(
        "Unable to convert input args for operation ({operation}): expected {expected}, \
         supplied {supplied}, converted {converted}. \
         Ensure that arguments are correctly ordered and typed"
    )]
    ArgumentMismatch {
        operation: String,
        expected: usize,
        supplied: usize,
        converted: usize,
    },

    /// 연산 내부에서 에러 또는 panic 발생
    #[error("{message}")]
    OperationFailed { operation: String, message: String },
}

impl InvokeError {
    /// 실패 종류 이름 (로그/리포트용)
    pub fn kind(&self) -> &'static str {
        match self {
            InvokeError::NotFound(_) | InvokeError::FieldNotFound(_) => "not_found",
            InvokeError::ArgumentMismatch { .. } => "argument_mismatch",
            InvokeError::OperationFailed { .. } => "operation_failed",
        }
    }
}

// ============================================================================
// Outcome
// ============================================================================

/// 호출 결과 - 정확히 하나만 채워짐
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// 값을 반환하며 성공
    Value(Value),
    /// 값 없이 성공 (반환값이 없는 연산)
    Empty,
    /// 실패 (결과는 빈 sentinel)
    Failed(InvokeError),
}

impl Outcome {
    /// 연산 반환값 정규화 - `null`은 빈 결과로 취급
    pub fn from_return(value: Value) -> Self {
        if value.is_null() {
            Outcome::Empty
        } else {
            Outcome::Value(value)
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, Outcome::Failed(_))
    }

    pub fn is_empty(&self) -> bool {
        !matches!(self, Outcome::Value(_))
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Outcome::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&InvokeError> {
        match self {
            Outcome::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// 에러 메시지 (성공 시 빈 문자열)
    pub fn error_message(&self) -> String {
        self.error().map(ToString::to_string).unwrap_or_default()
    }

    /// (결과, 에러 메시지) 쌍으로 분해
    pub fn into_parts(self) -> (Option<Value>, String) {
        match self {
            Outcome::Value(value) => (Some(value), String::new()),
            Outcome::Empty => (None, String::new()),
            Outcome::Failed(err) => (None, err.to_string()),
        }
    }

    /// 외부 호출자에게 돌려줄 직렬화 가능한 리포트
    pub fn report(&self) -> InvocationReport {
        InvocationReport {
            result: self.value().cloned().unwrap_or_else(|| Value::Object(Default::default())),
            error: self.error_message(),
            kind: self.error().map(InvokeError::kind),
        }
    }
}

impl From<InvokeError> for Outcome {
    fn from(err: InvokeError) -> Self {
        Outcome::Failed(err)
    }
}

/// 직렬화용 호출 결과
///
/// 빈 결과는 `{}`로 표현됩니다. 에러가 없으면 `error`는 빈 문자열입니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvocationReport {
    pub result: Value,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
}
