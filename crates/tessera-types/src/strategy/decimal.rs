use std::cmp::Ordering;

use rust_decimal::Decimal;

use super::{TypeStrategy, cannot_convert, to_decimal};
use crate::codec;
use crate::{ScalarValue, TypeTag, ValueError, ValueResult};

/// Fixed-point decimal with checked arithmetic
#[derive(Debug, Clone, Copy, Default)]
pub struct DecimalStrategy;

impl TypeStrategy for DecimalStrategy {
    type Native = Decimal;

    const TAG: TypeTag = TypeTag::Decimal;

    fn add(&self, a: Decimal, b: Decimal) -> ValueResult<Decimal> {
        a.checked_add(b)
            .ok_or_else(|| ValueError::overflow(format!("{a} + {b}")))
    }

    fn subtract(&self, a: Decimal, b: Decimal) -> ValueResult<Decimal> {
        a.checked_sub(b)
            .ok_or_else(|| ValueError::overflow(format!("{a} - {b}")))
    }

    fn multiply(&self, a: Decimal, b: Decimal) -> ValueResult<Decimal> {
        a.checked_mul(b)
            .ok_or_else(|| ValueError::overflow(format!("{a} * {b}")))
    }

    fn divide(&self, a: Decimal, b: Decimal) -> ValueResult<Decimal> {
        if b.is_zero() {
            return Err(ValueError::DivisionByZero);
        }
        a.checked_div(b)
            .ok_or_else(|| ValueError::overflow(format!("{a} / {b}")))
    }

    fn negate(&self, a: Decimal) -> ValueResult<Decimal> {
        Ok(-a)
    }

    fn sign(&self, a: Decimal) -> ValueResult<i32> {
        Ok(if a.is_zero() {
            0
        } else if a.is_sign_negative() {
            -1
        } else {
            1
        })
    }

    fn compare(&self, a: Decimal, b: Decimal) -> Ordering {
        a.cmp(&b)
    }

    fn render(&self, value: Decimal) -> String {
        value.to_string()
    }

    fn parse(&self, text: &str) -> ValueResult<Decimal> {
        codec::parse_decimal(text)
            .ok_or_else(|| ValueError::parse(Self::TAG, text, "invalid decimal"))
    }

    fn convert(&self, value: &ScalarValue) -> ValueResult<Decimal> {
        if let ScalarValue::Char(c) = *value {
            return self.parse(c.encode_utf8(&mut [0; 4]));
        }
        to_decimal(value).ok_or_else(|| cannot_convert(Self::TAG, value.tag(), value))
    }

    fn wrap(&self, value: Decimal) -> ScalarValue {
        ScalarValue::Decimal(value)
    }

    fn extract(&self, value: &ScalarValue) -> Option<Decimal> {
        match *value {
            ScalarValue::Decimal(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_checked_arithmetic() {
        let a = Decimal::from_str("1.25").unwrap();
        let b = Decimal::from_str("0.75").unwrap();
        assert_eq!(DecimalStrategy.add(a, b).unwrap(), Decimal::from(2));
        assert!(matches!(
            DecimalStrategy.add(Decimal::MAX, Decimal::ONE),
            Err(ValueError::Overflow { .. })
        ));
        assert_eq!(
            DecimalStrategy.divide(a, Decimal::ZERO),
            Err(ValueError::DivisionByZero)
        );
    }

    #[test]
    fn test_scale_is_preserved() {
        let a = Decimal::from_str("1.50").unwrap();
        let sum = DecimalStrategy.add(a, Decimal::from_str("0.25").unwrap()).unwrap();
        assert_eq!(sum.scale(), 2);
        assert_eq!(DecimalStrategy.render(sum), "1.75");
    }

    #[test]
    fn test_convert_from_unsigned_max() {
        let converted = DecimalStrategy
            .convert(&ScalarValue::UInt64(u64::MAX))
            .unwrap();
        assert_eq!(converted.to_string(), u64::MAX.to_string());
    }
}
