//! Signature - 연산/필드의 사람이 읽을 수 있는 시그니처
//!
//! 시그니처는 저장되지 않고 매번 Manifest에서 새로 계산됩니다.

use serde::Serialize;
use std::fmt;

// ============================================================================
// ParameterSignature / OperationSignature
// ============================================================================

/// 파라미터 하나의 (타입 이름, 파라미터 이름)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSignature {
    pub type_name: String,
    pub name: String,
}

/// 연산 시그니처 - 선언 순서 그대로의 파라미터 목록
///
/// `Display`는 `name(type1 param1, type2 param2)` 형식입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationSignature {
    pub name: String,
    pub parameters: Vec<ParameterSignature>,
}

impl OperationSignature {
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

impl fmt::Display for OperationSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, param) in self.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} {}", param.type_name, param.name)?;
        }
        write!(f, ")")
    }
}

// ============================================================================
// FieldSignature
// ============================================================================

/// 필드 시그니처 - `Display`는 `type name` 형식
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSignature {
    pub type_name: String,
    pub name: String,
}

impl fmt::Display for FieldSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.type_name, self.name)
    }
}

// ============================================================================
// Type names
// ============================================================================

/// 모듈 경로를 뺀 짧은 타입 이름
///
/// `alloc::vec::Vec<alloc::string::String>` -> `Vec<String>`
pub fn short_type_name<T: ?Sized>() -> String {
    shorten(std::any::type_name::<T>())
}

fn shorten(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut token = String::new();

    for ch in full.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == ':' {
            token.push(ch);
        } else {
            flush_token(&mut out, &mut token);
            out.push(ch);
        }
    }
    flush_token(&mut out, &mut token);

    out
}

fn flush_token(out: &mut String, token: &mut String) {
    if let Some(last) = token.rsplit("::").next() {
        out.push_str(last);
    }
    token.clear();
}
