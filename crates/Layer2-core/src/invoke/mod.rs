//! Invoke - 원시 인자로 연산을 안전하게 호출
//!
//! - `args`: RawArg, Argument Coercer
//! - `engine`: 조회 → 변환 → 개수 검사 → 호출
//! - `outcome`: Outcome / InvokeError / InvocationReport

mod args;
mod engine;
mod outcome;

pub use args::{coerce, decode_as, wire_args, Decoder, RawArg, TypedArg};
pub use engine::{invoke, read_field};
pub(crate) use engine::panic_message;
pub use outcome::{InvocationReport, InvokeError, Outcome};
