//! Storage module for Testable
//!
//! - `json`: JSON - 설정 파일 저장/로드
//!
//! 레지스트리 자체는 메모리에만 존재합니다. 여기서는 설정 파일만 다룹니다.

mod json;

pub use json::JsonStore;
