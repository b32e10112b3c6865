//! Integer strategies
//!
//! Arithmetic wraps on overflow. Division by zero fails; `MIN / -1` wraps.

use std::cmp::Ordering;

use super::{TypeStrategy, cannot_convert, to_i128};
use crate::{ScalarValue, TypeTag, ValueError, ValueResult};

macro_rules! integer_strategy {
    ($name:ident, $native:ty, $variant:ident, negate: $negate:expr) => {
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl TypeStrategy for $name {
            type Native = $native;

            const TAG: TypeTag = TypeTag::$variant;

            fn add(&self, a: $native, b: $native) -> ValueResult<$native> {
                Ok(a.wrapping_add(b))
            }

            fn subtract(&self, a: $native, b: $native) -> ValueResult<$native> {
                Ok(a.wrapping_sub(b))
            }

            fn multiply(&self, a: $native, b: $native) -> ValueResult<$native> {
                Ok(a.wrapping_mul(b))
            }

            fn divide(&self, a: $native, b: $native) -> ValueResult<$native> {
                if b == 0 {
                    return Err(ValueError::DivisionByZero);
                }
                Ok(a.wrapping_div(b))
            }

            fn negate(&self, a: $native) -> ValueResult<$native> {
                let negate: fn($native) -> ValueResult<$native> = $negate;
                negate(a)
            }

            fn sign(&self, a: $native) -> ValueResult<i32> {
                Ok(match a.cmp(&0) {
                    Ordering::Less => -1,
                    Ordering::Equal => 0,
                    Ordering::Greater => 1,
                })
            }

            fn compare(&self, a: $native, b: $native) -> Ordering {
                a.cmp(&b)
            }

            fn render(&self, value: $native) -> String {
                value.to_string()
            }

            fn parse(&self, text: &str) -> ValueResult<$native> {
                text.trim()
                    .parse::<$native>()
                    .map_err(|e| ValueError::parse(Self::TAG, text, e))
            }

            fn convert(&self, value: &ScalarValue) -> ValueResult<$native> {
                if let ScalarValue::$variant(v) = *value {
                    return Ok(v);
                }
                if let ScalarValue::Char(c) = *value {
                    return self.parse(c.encode_utf8(&mut [0; 4]));
                }
                let wide = to_i128(value)
                    .ok_or_else(|| cannot_convert(Self::TAG, value.tag(), value))?;
                <$native>::try_from(wide).map_err(|_| {
                    ValueError::overflow(format!("converting {wide} to {}", Self::TAG))
                })
            }

            fn wrap(&self, value: $native) -> ScalarValue {
                ScalarValue::$variant(value)
            }

            fn extract(&self, value: &ScalarValue) -> Option<$native> {
                match *value {
                    ScalarValue::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

macro_rules! signed_strategy {
    ($name:ident, $native:ty, $variant:ident) => {
        integer_strategy!($name, $native, $variant, negate: |a| Ok(a.wrapping_neg()));
    };
}

macro_rules! unsigned_strategy {
    ($name:ident, $native:ty, $variant:ident) => {
        integer_strategy!($name, $native, $variant, negate: |_| {
            Err(ValueError::overflow(concat!("negating ", stringify!($variant))))
        });
    };
}

signed_strategy!(SByteStrategy, i8, SByte);
signed_strategy!(Int16Strategy, i16, Int16);
signed_strategy!(Int32Strategy, i32, Int32);
signed_strategy!(Int64Strategy, i64, Int64);

unsigned_strategy!(ByteStrategy, u8, Byte);
unsigned_strategy!(UInt16Strategy, u16, UInt16);
unsigned_strategy!(UInt32Strategy, u32, UInt32);
unsigned_strategy!(UInt64Strategy, u64, UInt64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapping_arithmetic() {
        assert_eq!(Int32Strategy.add(i32::MAX, 1).unwrap(), i32::MIN);
        assert_eq!(ByteStrategy.subtract(0, 1).unwrap(), u8::MAX);
        assert_eq!(Int64Strategy.divide(i64::MIN, -1).unwrap(), i64::MIN);
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(Int16Strategy.divide(5, 0), Err(ValueError::DivisionByZero));
        assert_eq!(UInt64Strategy.divide(5, 0), Err(ValueError::DivisionByZero));
    }

    #[test]
    fn test_negate_and_sign() {
        assert_eq!(SByteStrategy.negate(i8::MIN).unwrap(), i8::MIN);
        assert!(matches!(
            UInt32Strategy.negate(3),
            Err(ValueError::Overflow { .. })
        ));
        assert_eq!(Int32Strategy.sign(-7).unwrap(), -1);
        assert_eq!(UInt16Strategy.sign(0).unwrap(), 0);
    }

    #[test]
    fn test_convert_range_checks() {
        assert_eq!(ByteStrategy.convert(&ScalarValue::Int32(255)).unwrap(), 255);
        assert!(ByteStrategy.convert(&ScalarValue::Int32(256)).is_err());
        assert_eq!(Int32Strategy.convert(&ScalarValue::Boolean(true)).unwrap(), 1);
        assert_eq!(Int32Strategy.convert(&ScalarValue::Char('7')).unwrap(), 7);
        assert!(Int32Strategy.parse("1.5").is_err());
    }
}
