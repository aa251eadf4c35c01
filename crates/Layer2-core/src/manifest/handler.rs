//! Handler - 타입이 있는 함수를 Manifest 연산으로 바꾸는 어댑터
//!
//! `Fn(&P, A1, .., An) -> anyhow::Result<R>` 형태의 함수/메서드라면
//! 무엇이든 연산으로 등록할 수 있습니다. 파라미터 타입은 함수 시그니처에서,
//! 파라미터 이름은 등록 시 넘긴 이름 목록에서 가져옵니다.
//!
//! ```ignore
//! ManifestBuilder::new()
//!     .operation("AddNumbers", &["num1", "num2"], MathsTest::add_numbers)
//! ```

use super::operation::Parameter;
use super::signature::short_type_name;
use crate::invoke::TypedArg;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// 연산 핸들러
///
/// `Args`는 파라미터 타입 튜플이며 arity별 구현을 구분하는 용도입니다.
pub trait Handler<P, Args>: Send + Sync + 'static {
    /// 파라미터 개수
    const ARITY: usize;

    /// 이름 목록과 시그니처의 타입을 합쳐 파라미터 목록 생성
    fn parameters(names: &[&str]) -> Vec<Parameter>;

    /// 변환된 인자로 호출하고 결과를 JSON으로 직렬화
    fn call(&self, plugin: &P, args: Vec<TypedArg>) -> anyhow::Result<Value>;
}

/// 변환된 인자 하나를 꺼내 선언 타입으로 downcast
fn take<T: 'static>(args: &mut impl Iterator<Item = TypedArg>) -> anyhow::Result<T> {
    let next = args
        .next()
        .ok_or_else(|| anyhow::anyhow!("Missing argument of type {}", short_type_name::<T>()))?;
    next.downcast::<T>()
        .map(|value| *value)
        .map_err(|_| anyhow::anyhow!("Argument is not of type {}", short_type_name::<T>()))
}

macro_rules! count {
    () => { 0usize };
    ($head:ident $($tail:ident)*) => { 1usize + count!($($tail)*) };
}

macro_rules! impl_handler {
    ($($arg:ident),*) => {
        impl<P, F, R, $($arg,)*> Handler<P, ($($arg,)*)> for F
        where
            F: Fn(&P, $($arg),*) -> anyhow::Result<R> + Send + Sync + 'static,
            R: Serialize,
            $($arg: DeserializeOwned + Send + 'static,)*
        {
            const ARITY: usize = count!($($arg)*);

            #[allow(unused_variables, unused_mut)]
            fn parameters(names: &[&str]) -> Vec<Parameter> {
                let mut names = names.iter().copied();
                vec![$(Parameter::of::<$arg>(names.next().unwrap_or_default())),*]
            }

            #[allow(non_snake_case, unused_variables, unused_mut)]
            fn call(&self, plugin: &P, args: Vec<TypedArg>) -> anyhow::Result<Value> {
                let mut args = args.into_iter();
                $(let $arg = take::<$arg>(&mut args)?;)*
                let result = (self)(plugin, $($arg),*)?;
                Ok(serde_json::to_value(result)?)
            }
        }
    };
}

impl_handler!();
impl_handler!(A1);
impl_handler!(A1, A2);
impl_handler!(A1, A2, A3);
impl_handler!(A1, A2, A3, A4);
impl_handler!(A1, A2, A3, A4, A5);
impl_handler!(A1, A2, A3, A4, A5, A6);

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        base: i64,
    }

    impl Counter {
        fn add(&self, a: i64, b: i64) -> anyhow::Result<i64> {
            Ok(self.base + a + b)
        }

        fn ping(&self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn arity<P, Args, H: Handler<P, Args>>(_: &H) -> usize {
        H::ARITY
    }

    fn parameters_of<P, Args, H: Handler<P, Args>>(_: &H, names: &[&str]) -> Vec<Parameter> {
        H::parameters(names)
    }

    fn boxed<T: Send + 'static>(value: T) -> TypedArg {
        Box::new(value)
    }

    #[test]
    fn test_arity_from_signature() {
        assert_eq!(arity::<Counter, _, _>(&Counter::add), 2);
        assert_eq!(arity::<Counter, _, _>(&Counter::ping), 0);
    }

    #[test]
    fn test_parameters_take_names_in_order() {
        let params = parameters_of::<Counter, _, _>(&Counter::add, &["a", "b"]);
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].name, "a");
        assert_eq!(params[1].name, "b");
        assert_eq!(params[1].type_name, "i64");
    }

    #[test]
    fn test_call_serializes_result() {
        let counter = Counter { base: 10 };
        let value = Handler::call(&Counter::add, &counter, vec![boxed(1i64), boxed(2i64)]).unwrap();
        assert_eq!(value, serde_json::json!(13));

        let unit = Handler::call(&Counter::ping, &counter, vec![]).unwrap();
        assert!(unit.is_null());
    }

    #[test]
    fn test_call_with_wrong_typed_arg_fails() {
        let counter = Counter { base: 0 };
        let err = Handler::call(&Counter::add, &counter, vec![boxed(1i64), boxed("x")]).unwrap_err();
        assert!(err.to_string().contains("i64"));
    }
}
