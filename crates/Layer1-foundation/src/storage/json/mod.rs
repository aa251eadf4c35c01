//! JSON 파일 저장소

mod store;

pub use store::JsonStore;
