//! StringTest - 문자열 플러그인

use crate::manifest::Manifest;
use crate::testable::TestableDefinition;
use testable_foundation::Result;
use uuid::Uuid;

pub const DEFAULT_SEPARATOR: &str = ", ";

/// 간단한 문자열 연산
#[derive(Debug, Clone)]
pub struct StringTest {
    separator: String,
}

impl Default for StringTest {
    fn default() -> Self {
        Self::with_separator(DEFAULT_SEPARATOR)
    }
}

impl StringTest {
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn concat(&self, str1: String, str2: String) -> anyhow::Result<String> {
        Ok(str1 + &str2)
    }

    pub fn join(&self, parts: Vec<String>) -> anyhow::Result<String> {
        Ok(parts.join(&self.separator))
    }

    // manifest에 없음
    pub fn reverse(&self, value: &str) -> String {
        value.chars().rev().collect()
    }
}

impl TestableDefinition for StringTest {
    const IDENTITY: Uuid = Uuid::from_u128(0x88C77A11_0DA3_4C1E_9A7B_1E5D7F9F31F9);
    const NAME: &'static str = "StringTest";
    const DESCRIPTION: &'static str = "Simple string Testable implementation";
    const AUTHOR: &'static str = "JPS";

    fn manifest() -> Result<Manifest<Self>> {
        Manifest::builder()
            .operation("Concat", &["str1", "str2"], Self::concat)
            .operation("Join", &["parts"], Self::join)
            .field("Separator", |s: &StringTest| s.separator.clone())
            .build()
    }
}
