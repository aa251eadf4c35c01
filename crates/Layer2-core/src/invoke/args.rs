//! Argument Coercer - 원시 인자를 선언된 파라미터 타입으로 변환
//!
//! 원시 인자는 두 가지 형태로 들어옵니다.
//! - `RawArg::Wire`: JSON 값 (HTTP/CLI 등 외부 호출자)
//! - `RawArg::Native`: 이미 Rust 타입으로 만들어진 값 (같은 프로세스 내 호출자)
//!
//! 변환은 위치 순서대로 진행되며, 실패한 위치는 결과에서 빠집니다.
//! 개수 비교로 부분 실패를 판단하는 것은 엔진의 책임입니다.

use crate::manifest::Parameter;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::any::Any;
use std::fmt;
use tracing::debug;

/// 변환이 끝난 인자 (핸들러가 선언된 타입으로 downcast)
pub type TypedArg = Box<dyn Any + Send>;

/// 파라미터 타입별 디코더
pub type Decoder = fn(RawArg) -> Option<TypedArg>;

// ============================================================================
// RawArg
// ============================================================================

/// 변환 전 인자
pub enum RawArg {
    /// JSON 형태의 값
    Wire(Value),
    /// 이미 타입이 정해진 값
    Native(TypedArg),
}

impl RawArg {
    /// Native 인자 생성
    pub fn native<T: Any + Send>(value: T) -> Self {
        RawArg::Native(Box::new(value))
    }
}

impl From<Value> for RawArg {
    fn from(value: Value) -> Self {
        RawArg::Wire(value)
    }
}

impl fmt::Debug for RawArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawArg::Wire(value) => f.debug_tuple("Wire").field(value).finish(),
            RawArg::Native(_) => f.write_str("Native(..)"),
        }
    }
}

/// JSON 값 목록을 원시 인자 목록으로 변환
pub fn wire_args<I>(values: I) -> Vec<RawArg>
where
    I: IntoIterator<Item = Value>,
{
    values.into_iter().map(RawArg::Wire).collect()
}

// ============================================================================
// Decode
// ============================================================================

/// 원시 인자 하나를 `T`로 변환
///
/// Native 값이 이미 `T`라면 그대로 통과시키고, 다른 타입이면 실패합니다.
/// Wire 값은 serde 구조적 디코딩을 시도합니다.
pub fn decode_as<T>(raw: RawArg) -> Option<TypedArg>
where
    T: DeserializeOwned + Send + 'static,
{
    match raw {
        RawArg::Native(value) => {
            if value.is::<T>() {
                Some(value)
            } else {
                None
            }
        }
        RawArg::Wire(value) => serde_json::from_value::<T>(value)
            .ok()
            .map(|typed| Box::new(typed) as TypedArg),
    }
}

// ============================================================================
// Coerce
// ============================================================================

/// 파라미터 목록에 맞춰 원시 인자들을 변환 (best-effort)
///
/// - 개수가 다르면 빈 목록
/// - 변환에 실패한 위치는 빠짐
/// - 절대 panic/에러를 내지 않음
pub fn coerce(parameters: &[Parameter], args: Vec<RawArg>) -> Vec<TypedArg> {
    if args.len() != parameters.len() {
        debug!(
            expected = parameters.len(),
            supplied = args.len(),
            "Argument count mismatch"
        );
        return Vec::new();
    }

    let mut converted = Vec::with_capacity(parameters.len());
    for (param, raw) in parameters.iter().zip(args) {
        match param.decode(raw) {
            Some(value) => converted.push(value),
            None => debug!(
                parameter = %param.name,
                expected_type = %param.type_name,
                "Argument could not be converted, dropping"
            ),
        }
    }
    converted
}
