//! Manifest - 플러그인별 호출 가능 멤버 allow-list
//!
//! Manifest에 등록된 연산과 필드만 조회/호출할 수 있습니다.
//! 플러그인 타입의 다른 `pub` 메서드는 외부에서 보이지 않습니다.

use super::handler::Handler;
use super::operation::{Field, Operation};
use super::signature::{short_type_name, FieldSignature, OperationSignature};
use crate::invoke::TypedArg;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use testable_foundation::{Error, Result};

// ============================================================================
// Manifest
// ============================================================================

/// 검증이 끝난 연산/필드 테이블 (선언 순서 유지)
pub struct Manifest<P> {
    operations: Vec<Operation<P>>,
    fields: Vec<Field<P>>,
    operation_index: HashMap<String, usize>,
    field_index: HashMap<String, usize>,
}

impl<P: 'static> Manifest<P> {
    pub fn builder() -> ManifestBuilder<P> {
        ManifestBuilder::new()
    }

    /// 이름으로 연산 조회 (대소문자 구분)
    pub fn operation(&self, name: &str) -> Option<&Operation<P>> {
        self.operation_index.get(name).map(|&i| &self.operations[i])
    }

    pub fn operations(&self) -> &[Operation<P>] {
        &self.operations
    }

    pub fn field(&self, name: &str) -> Option<&Field<P>> {
        self.field_index.get(name).map(|&i| &self.fields[i])
    }

    pub fn fields(&self) -> &[Field<P>] {
        &self.fields
    }

    pub fn operation_signatures(&self) -> Vec<OperationSignature> {
        self.operations.iter().map(Operation::signature).collect()
    }

    pub fn field_signatures(&self) -> Vec<FieldSignature> {
        self.fields.iter().map(Field::signature).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty() && self.fields.is_empty()
    }
}

impl<P> std::fmt::Debug for Manifest<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Manifest")
            .field("operations", &self.operations)
            .field("fields", &self.fields)
            .finish()
    }
}

// ============================================================================
// ManifestBuilder
// ============================================================================

/// Manifest 빌더
///
/// 잘못된 선언은 즉시 실패하지 않고 모아두었다가 `build()`에서 한 번에 보고합니다.
pub struct ManifestBuilder<P> {
    operations: Vec<Operation<P>>,
    fields: Vec<Field<P>>,
    problems: Vec<String>,
}

impl<P: 'static> Default for ManifestBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: 'static> ManifestBuilder<P> {
    pub fn new() -> Self {
        Self {
            operations: Vec::new(),
            fields: Vec::new(),
            problems: Vec::new(),
        }
    }

    /// 연산 등록
    ///
    /// `parameters`는 핸들러 인자 순서대로의 파라미터 이름입니다.
    pub fn operation<Args, H>(mut self, name: &str, parameters: &[&str], handler: H) -> Self
    where
        H: Handler<P, Args>,
    {
        if name.trim().is_empty() {
            self.problems.push("operation name must not be empty".to_string());
            return self;
        }
        if self.operations.iter().any(|op| op.name == name) {
            self.problems.push(format!("duplicate operation '{}'", name));
            return self;
        }
        if parameters.len() != H::ARITY {
            self.problems.push(format!(
                "operation '{}' names {} parameter(s) but its handler takes {}",
                name,
                parameters.len(),
                H::ARITY
            ));
            return self;
        }
        let mut seen = HashSet::new();
        if let Some(dup) = parameters.iter().find(|p| !seen.insert(**p)) {
            self.problems
                .push(format!("operation '{}' repeats parameter '{}'", name, dup));
            return self;
        }

        self.operations.push(Operation {
            name: name.to_string(),
            parameters: H::parameters(parameters),
            call: Box::new(move |plugin: &P, args: Vec<TypedArg>| handler.call(plugin, args)),
        });
        self
    }

    /// 읽기 전용 필드 등록
    pub fn field<T, F>(mut self, name: &str, read: F) -> Self
    where
        T: Serialize,
        F: Fn(&P) -> T + Send + Sync + 'static,
    {
        if name.trim().is_empty() {
            self.problems.push("field name must not be empty".to_string());
            return self;
        }
        if self.fields.iter().any(|field| field.name == name) {
            self.problems.push(format!("duplicate field '{}'", name));
            return self;
        }

        self.fields.push(Field {
            name: name.to_string(),
            type_name: short_type_name::<T>(),
            read: Box::new(move |plugin: &P| {
                serde_json::to_value(read(plugin)).map_err(anyhow::Error::from)
            }),
        });
        self
    }

    /// 검증 후 Manifest 생성
    pub fn build(self) -> Result<Manifest<P>> {
        if !self.problems.is_empty() {
            return Err(Error::manifest(
                short_type_name::<P>(),
                self.problems.join("; "),
            ));
        }

        let operation_index = self
            .operations
            .iter()
            .enumerate()
            .map(|(i, op)| (op.name.clone(), i))
            .collect();
        let field_index = self
            .fields
            .iter()
            .enumerate()
            .map(|(i, field)| (field.name.clone(), i))
            .collect();

        Ok(Manifest {
            operations: self.operations,
            fields: self.fields,
            operation_index,
            field_index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Greeter {
        greeting: String,
    }

    impl Greeter {
        fn greet(&self, name: String) -> anyhow::Result<String> {
            Ok(format!("{} {}", self.greeting, name))
        }

        fn shout(&self, name: String, times: u8) -> anyhow::Result<String> {
            Ok(name.to_uppercase().repeat(times as usize))
        }
    }

    #[test]
    fn test_build_keeps_declaration_order() {
        let manifest = Manifest::<Greeter>::builder()
            .operation("Shout", &["name", "times"], Greeter::shout)
            .operation("Greet", &["name"], Greeter::greet)
            .field("Greeting", |g: &Greeter| g.greeting.clone())
            .build()
            .unwrap();

        let names: Vec<String> = manifest
            .operation_signatures()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(names, vec!["Shout(String name, u8 times)", "Greet(String name)"]);
        assert_eq!(manifest.field_signatures()[0].to_string(), "String Greeting");
        assert!(manifest.operation("Greet").is_some());
        assert!(manifest.operation("greet").is_none());
    }

    #[test]
    fn test_duplicate_operation_rejected() {
        let err = Manifest::<Greeter>::builder()
            .operation("Greet", &["name"], Greeter::greet)
            .operation("Greet", &["name", "times"], Greeter::shout)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("duplicate operation 'Greet'"));
        assert!(err.to_string().contains("Greeter"));
    }

    #[test]
    fn test_parameter_name_count_must_match() {
        let err = Manifest::<Greeter>::builder()
            .operation("Greet", &[], Greeter::greet)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Manifest { .. }));
    }

    #[test]
    fn test_problems_are_collected() {
        let err = Manifest::<Greeter>::builder()
            .operation("", &["name"], Greeter::greet)
            .operation("Shout", &["name", "name"], Greeter::shout)
            .field("Greeting", |g: &Greeter| g.greeting.len())
            .field("Greeting", |g: &Greeter| g.greeting.clone())
            .build()
            .unwrap_err()
            .to_string();
        assert!(err.contains("must not be empty"));
        assert!(err.contains("repeats parameter 'name'"));
        assert!(err.contains("duplicate field 'Greeting'"));
    }

    #[test]
    fn test_empty_manifest_is_valid() {
        let manifest = Manifest::<Greeter>::builder().build().unwrap();
        assert!(manifest.is_empty());
        assert!(manifest.operation_signatures().is_empty());
    }
}
