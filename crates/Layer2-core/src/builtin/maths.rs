//! MathsTest - 정수 연산 플러그인

use crate::manifest::Manifest;
use crate::testable::TestableDefinition;
use anyhow::{anyhow, bail};
use rand::Rng;
use testable_foundation::Result;
use uuid::Uuid;

/// 간단한 정수 연산
#[derive(Debug, Default)]
pub struct MathsTest;

impl MathsTest {
    pub fn add_numbers(&self, num1: i32, num2: i32) -> anyhow::Result<i32> {
        num1.checked_add(num2)
            .ok_or_else(|| anyhow!("Arithmetic operation resulted in an overflow."))
    }

    /// `[min, max)` 범위의 난수, `min == max`이면 `min`
    pub fn get_random_number(&self, min: i32, max: i32) -> anyhow::Result<i32> {
        if min > max {
            bail!("'min' ({}) cannot be greater than 'max' ({})", min, max);
        }
        if min == max {
            return Ok(min);
        }
        Ok(rand::thread_rng().gen_range(min..max))
    }

    /// 0으로 나누면 panic (엔진이 잡음)
    pub fn divide(&self, dividend: i32, divisor: i32) -> anyhow::Result<i32> {
        Ok(dividend / divisor)
    }

    /// manifest에 없음
    pub fn square(&self, value: i32) -> i32 {
        value.wrapping_mul(value)
    }
}

impl TestableDefinition for MathsTest {
    const IDENTITY: Uuid = Uuid::from_u128(0xB510C950_F320_4F4A_8D61_588896FC1534);
    const NAME: &'static str = "MathsTest";
    const DESCRIPTION: &'static str = "Simple maths Testable implementation";
    const AUTHOR: &'static str = "JPS";

    fn manifest() -> Result<Manifest<Self>> {
        Manifest::builder()
            .operation("AddNumbers", &["num1", "num2"], Self::add_numbers)
            .operation("GetRandomNumber", &["min", "max"], Self::get_random_number)
            .operation("Divide", &["dividend", "divisor"], Self::divide)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_numbers() {
        assert_eq!(MathsTest.add_numbers(3, 4).unwrap(), 7);
        assert!(MathsTest.add_numbers(i32::MAX, 1).is_err());
    }

    #[test]
    fn test_random_number_range() {
        for _ in 0..100 {
            let n = MathsTest.get_random_number(1, 5).unwrap();
            assert!((1..5).contains(&n));
        }
        assert_eq!(MathsTest.get_random_number(9, 9).unwrap(), 9);
        assert!(MathsTest.get_random_number(5, 1).is_err());
    }

    #[test]
    fn test_square_is_not_exposed() {
        assert_eq!(MathsTest.square(4), 16);
        let manifest = MathsTest::manifest().unwrap();
        assert!(manifest.operation("square").is_none());
        assert!(manifest.operation("Square").is_none());
    }

    #[test]
    fn test_signatures() {
        let sigs: Vec<String> = MathsTest::manifest()
            .unwrap()
            .operation_signatures()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            sigs,
            vec![
                "AddNumbers(i32 num1, i32 num2)",
                "GetRandomNumber(i32 min, i32 max)",
                "Divide(i32 dividend, i32 divisor)",
            ]
        );
    }
}
