//! Metadata Reflector - 플러그인의 호출 가능 멤버를 문자열로 나열
//!
//! 시그니처는 매번 플러그인의 현재 Manifest에서 계산됩니다.
//! 등록된 멤버가 없으면 빈 목록을 돌려줍니다.

use crate::testable::Testable;

/// `name(type1 param1, type2 param2)` 형식의 연산 목록 (선언 순서)
pub fn describe_operations(plugin: &dyn Testable) -> Vec<String> {
    plugin
        .operations()
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// `type name` 형식의 필드 목록 (선언 순서)
pub fn describe_fields(plugin: &dyn Testable) -> Vec<String> {
    plugin.fields().iter().map(ToString::to_string).collect()
}
