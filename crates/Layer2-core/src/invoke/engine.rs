//! Invocation Engine - 연산 조회, 인자 변환, 호출, 결과 정규화
//!
//! ```text
//! resolve ──▶ coerce ──▶ arity check ──▶ call ──▶ Outcome
//!    │                        │             │
//!    └─ NotFound              └─ Mismatch   └─ OperationFailed (Err / panic)
//! ```
//!
//! 어떤 입력이 들어와도 호출자에게 panic이나 `Err`가 전파되지 않습니다.
//! 재시도와 타임아웃은 없습니다. 멈춘 연산은 호출한 스레드를 계속 붙잡습니다.

use super::args::{coerce, RawArg};
use super::outcome::{InvokeError, Outcome};
use crate::manifest::Manifest;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{debug, warn};

/// Manifest의 연산 하나를 원시 인자로 호출
pub fn invoke<P: 'static>(
    manifest: &Manifest<P>,
    plugin: &P,
    operation: &str,
    args: Vec<RawArg>,
) -> Outcome {
    // 1. 연산 조회
    let Some(op) = manifest.operation(operation) else {
        debug!(operation, "Operation not found");
        return InvokeError::NotFound(operation.to_string()).into();
    };

    // 2. 인자 변환
    let supplied = args.len();
    let converted = coerce(op.parameters(), args);

    // 3. 개수 검사 (넘긴 개수와 변환된 개수 모두)
    let expected = op.arity();
    if supplied != expected || converted.len() != expected {
        debug!(operation, expected, supplied, converted = converted.len(), "Argument mismatch");
        return InvokeError::ArgumentMismatch {
            operation: operation.to_string(),
            expected,
            supplied,
            converted: converted.len(),
        }
        .into();
    }

    // 4. 호출 (Err와 panic 모두 여기서 잡음)
    debug!(operation, "Invoking operation");
    match catch_unwind(AssertUnwindSafe(|| op.call(plugin, converted))) {
        Ok(Ok(value)) => Outcome::from_return(value),
        Ok(Err(err)) => failed(operation, err.to_string()),
        Err(payload) => failed(operation, panic_message(payload.as_ref())),
    }
}

/// Manifest의 필드 하나를 읽음
pub fn read_field<P: 'static>(manifest: &Manifest<P>, plugin: &P, field: &str) -> Outcome {
    let Some(f) = manifest.field(field) else {
        debug!(field, "Field not found");
        return InvokeError::FieldNotFound(field.to_string()).into();
    };

    match catch_unwind(AssertUnwindSafe(|| f.read(plugin))) {
        Ok(Ok(value)) => Outcome::from_return(value),
        Ok(Err(err)) => failed(field, err.to_string()),
        Err(payload) => failed(field, panic_message(payload.as_ref())),
    }
}

fn failed(operation: &str, message: String) -> Outcome {
    warn!(operation, error = %message, "Operation failed");
    InvokeError::OperationFailed {
        operation: operation.to_string(),
        message,
    }
    .into()
}

/// panic payload에서 메시지 추출
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "operation panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoke::wire_args;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Calc {
        calls: AtomicUsize,
    }

    impl Calc {
        fn add(&self, a: i32, b: i32) -> anyhow::Result<i32> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(a + b)
        }

        fn div(&self, a: i32, b: i32) -> anyhow::Result<i32> {
            Ok(a / b)
        }

        fn fail(&self) -> anyhow::Result<i32> {
            anyhow::bail!("nothing to see here")
        }

        fn touch(&self) -> anyhow::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn manifest() -> Manifest<Calc> {
        Manifest::builder()
            .operation("Add", &["a", "b"], Calc::add)
            .operation("Div", &["a", "b"], Calc::div)
            .operation("Fail", &[], Calc::fail)
            .operation("Touch", &[], Calc::touch)
            .field("Calls", |c: &Calc| c.calls.load(Ordering::SeqCst))
            .build()
            .unwrap()
    }

    #[test]
    fn test_success() {
        let calc = Calc::default();
        let outcome = invoke(&manifest(), &calc, "Add", wire_args(vec![json!(3), json!(4)]));
        assert_eq!(outcome, Outcome::Value(json!(7)));
    }

    #[test]
    fn test_not_found_names_operation() {
        let outcome = invoke(&manifest(), &Calc::default(), "DoesNotExist", vec![]);
        assert!(outcome.error_message().contains("DoesNotExist"));
        assert!(outcome.value().is_none());
    }

    #[test]
    fn test_arity_mismatch_does_not_call() {
        let calc = Calc::default();
        let outcome = invoke(&manifest(), &calc, "Add", wire_args(vec![json!(3)]));
        assert!(matches!(outcome.error(), Some(InvokeError::ArgumentMismatch { .. })));
        assert_eq!(calc.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_extra_args_to_zero_arity_rejected() {
        let calc = Calc::default();
        let outcome = invoke(&manifest(), &calc, "Touch", wire_args(vec![json!(1)]));
        assert!(matches!(
            outcome.error(),
            Some(InvokeError::ArgumentMismatch { expected: 0, supplied: 1, .. })
        ));
        assert_eq!(calc.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unconvertible_arg_rejected() {
        let outcome = invoke(
            &manifest(),
            &Calc::default(),
            "Add",
            wire_args(vec![json!("three"), json!(4)]),
        );
        assert!(matches!(
            outcome.error(),
            Some(InvokeError::ArgumentMismatch { converted: 1, .. })
        ));
    }

    #[test]
    fn test_error_and_panic_are_captured() {
        let m = manifest();
        let calc = Calc::default();

        let outcome = invoke(&m, &calc, "Fail", vec![]);
        assert_eq!(outcome.error_message(), "nothing to see here");

        let outcome = invoke(&m, &calc, "Div", wire_args(vec![json!(1), json!(0)]));
        assert_eq!(outcome.error_message(), "attempt to divide by zero");

        // 실패 후에도 계속 호출 가능
        let outcome = invoke(&m, &calc, "Add", wire_args(vec![json!(1), json!(1)]));
        assert_eq!(outcome, Outcome::Value(json!(2)));
    }

    #[test]
    fn test_void_is_empty_success() {
        let outcome = invoke(&manifest(), &Calc::default(), "Touch", vec![]);
        assert_eq!(outcome, Outcome::Empty);
        assert!(outcome.is_success());
    }

    #[test]
    fn test_read_field() {
        let m = manifest();
        let calc = Calc::default();
        invoke(&m, &calc, "Touch", vec![]);

        assert_eq!(read_field(&m, &calc, "Calls"), Outcome::Value(json!(1)));
        let missing = read_field(&m, &calc, "Missing");
        assert!(matches!(missing.error(), Some(InvokeError::FieldNotFound(_))));
        assert_eq!(missing.error_message(), "Field (Missing) not found");
    }

    #[test]
    fn test_panic_message_payloads() {
        let payload: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(panic_message(payload.as_ref()), "static");
        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "owned");
        let payload: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(payload.as_ref()), "operation panicked");
    }
}
