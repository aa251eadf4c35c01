//! Operation / Field - Manifest에 등록되는 호출 가능한 멤버

use super::signature::{short_type_name, FieldSignature, OperationSignature, ParameterSignature};
use crate::invoke::{decode_as, Decoder, RawArg, TypedArg};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

/// 연산 호출 함수 (플러그인, 변환된 인자) -> 결과
pub type OperationFn<P> = Box<dyn Fn(&P, Vec<TypedArg>) -> anyhow::Result<Value> + Send + Sync>;

/// 필드 읽기 함수
pub type FieldFn<P> = Box<dyn Fn(&P) -> anyhow::Result<Value> + Send + Sync>;

// ============================================================================
// Parameter
// ============================================================================

/// 선언된 파라미터 하나 (이름 + 타입 + 디코더)
#[derive(Clone)]
pub struct Parameter {
    pub name: String,
    pub type_name: String,
    decoder: Decoder,
}

impl Parameter {
    /// `T` 타입 파라미터 생성
    pub fn of<T>(name: impl Into<String>) -> Self
    where
        T: DeserializeOwned + Send + 'static,
    {
        Self {
            name: name.into(),
            type_name: short_type_name::<T>(),
            decoder: decode_as::<T>,
        }
    }

    /// 원시 인자를 이 파라미터 타입으로 변환
    pub fn decode(&self, raw: RawArg) -> Option<TypedArg> {
        (self.decoder)(raw)
    }

    pub fn signature(&self) -> ParameterSignature {
        ParameterSignature {
            type_name: self.type_name.clone(),
            name: self.name.clone(),
        }
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .finish()
    }
}

// ============================================================================
// Operation
// ============================================================================

/// 호출 가능한 연산
pub struct Operation<P> {
    pub(crate) name: String,
    pub(crate) parameters: Vec<Parameter>,
    pub(crate) call: OperationFn<P>,
}

impl<P> Operation<P> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 선언 순서의 파라미터
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    pub fn signature(&self) -> OperationSignature {
        OperationSignature {
            name: self.name.clone(),
            parameters: self.parameters.iter().map(Parameter::signature).collect(),
        }
    }

    /// 변환된 인자로 호출 (panic 처리는 엔진 담당)
    pub fn call(&self, plugin: &P, args: Vec<TypedArg>) -> anyhow::Result<Value> {
        (self.call)(plugin, args)
    }
}

impl<P> fmt::Debug for Operation<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .finish()
    }
}

// ============================================================================
// Field
// ============================================================================

/// 읽기 가능한 필드
pub struct Field<P> {
    pub(crate) name: String,
    pub(crate) type_name: String,
    pub(crate) read: FieldFn<P>,
}

impl<P> Field<P> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn signature(&self) -> FieldSignature {
        FieldSignature {
            type_name: self.type_name.clone(),
            name: self.name.clone(),
        }
    }

    pub fn read(&self, plugin: &P) -> anyhow::Result<Value> {
        (self.read)(plugin)
    }
}

impl<P> fmt::Debug for Field<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .finish()
    }
}
