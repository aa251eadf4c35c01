//! Builtin Plugins - 기본 제공 플러그인
//!
//! | Plugin             | Identity                             |
//! |--------------------|--------------------------------------|
//! | `MathsTest`        | B510C950-F320-4F4A-8D61-588896FC1534 |
//! | `StringTest`       | 88C77A11-0DA3-4C1E-9A7B-1E5D7F9F31F9 |
//! | `SampleObjectTest` | 3F2A8C61-5B7D-4E19-A0C4-9D1E6B2F7A83 |

mod maths;
mod sample;
mod string;

pub use maths::MathsTest;
pub use sample::{SampleObject, SampleObjectTest, SubSampleObject};
pub use string::{StringTest, DEFAULT_SEPARATOR};

crate::register_testable!(MathsTest);
crate::register_testable!(StringTest);
crate::register_testable!(SampleObjectTest);
