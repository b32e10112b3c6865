//! Floating point strategies
//!
//! IEEE arithmetic; equality within an absolute epsilon.

use std::cmp::Ordering;

use super::{TypeStrategy, cannot_convert, to_f64};
use crate::{ScalarValue, TypeTag, ValueError, ValueResult};

/// Absolute tolerance for float equality
pub const EPSILON: f64 = 1e-5;

macro_rules! float_strategy {
    ($name:ident, $native:ty, $variant:ident) => {
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl TypeStrategy for $name {
            type Native = $native;

            const TAG: TypeTag = TypeTag::$variant;

            fn add(&self, a: $native, b: $native) -> ValueResult<$native> {
                Ok(a + b)
            }

            fn subtract(&self, a: $native, b: $native) -> ValueResult<$native> {
                Ok(a - b)
            }

            fn multiply(&self, a: $native, b: $native) -> ValueResult<$native> {
                Ok(a * b)
            }

            fn divide(&self, a: $native, b: $native) -> ValueResult<$native> {
                Ok(a / b)
            }

            fn negate(&self, a: $native) -> ValueResult<$native> {
                Ok(-a)
            }

            fn sign(&self, a: $native) -> ValueResult<i32> {
                if a.is_nan() {
                    return Err(ValueError::overflow(concat!(
                        "sign of ",
                        stringify!($variant),
                        " NaN"
                    )));
                }
                Ok(if a == 0.0 {
                    0
                } else if a < 0.0 {
                    -1
                } else {
                    1
                })
            }

            fn equal(&self, a: $native, b: $native) -> bool {
                a == b
                    || a.total_cmp(&b) == Ordering::Equal
                    || f64::from((a - b).abs()) < EPSILON
            }

            fn compare(&self, a: $native, b: $native) -> Ordering {
                if self.equal(a, b) {
                    Ordering::Equal
                } else {
                    a.total_cmp(&b)
                }
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
                match *value {
                    ScalarValue::$variant(v) => Ok(v),
                    ScalarValue::Char(c) => self.parse(c.encode_utf8(&mut [0; 4])),
                    _ => to_f64(value)
                        .map(|v| v as $native)
                        .ok_or_else(|| cannot_convert(Self::TAG, value.tag(), value)),
                }
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

float_strategy!(DoubleStrategy, f64, Double);
float_strategy!(SingleStrategy, f32, Single);
