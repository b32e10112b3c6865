//! Packed decimal components

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ValueError, ValueResult};

/// Largest scale a 96-bit decimal can carry
pub const MAX_SCALE: u32 = 28;

/// A decimal split into its 96-bit unscaled magnitude, scale and sign
///
/// The split is exact: `DecimalParts::from_decimal(d).to_decimal()` returns a
/// value with the same magnitude, scale and sign as `d`, including negative
/// zero and trailing zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DecimalParts {
    pub lo: u32,
    pub mid: u32,
    pub hi: u32,
    pub scale: u32,
    pub negative: bool,
}

impl DecimalParts {
    pub fn from_decimal(value: Decimal) -> Self {
        let magnitude = value.mantissa().unsigned_abs();
        Self {
            lo: magnitude as u32,
            mid: (magnitude >> 32) as u32,
            hi: (magnitude >> 64) as u32,
            scale: value.scale(),
            negative: value.is_sign_negative(),
        }
    }

    /// Rebuild the decimal; fails when the scale is out of range
    pub fn to_decimal(&self) -> ValueResult<Decimal> {
        if self.scale > MAX_SCALE {
            return Err(ValueError::overflow(format!(
                "decimal scale {} exceeds {MAX_SCALE}",
                self.scale
            )));
        }
        Ok(Decimal::from_parts(
            self.lo,
            self.mid,
            self.hi,
            self.negative,
            self.scale,
        ))
    }

    /// Unscaled magnitude
    pub fn magnitude(&self) -> u128 {
        u128::from(self.lo) | (u128::from(self.mid) << 32) | (u128::from(self.hi) << 64)
    }

    /// Number of significant digits, never less than the scale plus one
    pub fn precision(&self) -> u32 {
        let magnitude = self.magnitude();
        let digits = if magnitude == 0 {
            1
        } else {
            magnitude.ilog10() + 1
        };
        digits.max(self.scale + 1)
    }
}

impl From<Decimal> for DecimalParts {
    fn from(value: Decimal) -> Self {
        Self::from_decimal(value)
    }
}

impl TryFrom<DecimalParts> for Decimal {
    type Error = ValueError;

    fn try_from(parts: DecimalParts) -> Result<Self, Self::Error> {
        parts.to_decimal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_scale_and_sign_survive() {
        let value = Decimal::from_str("-1234.56789").unwrap();
        let parts = DecimalParts::from_decimal(value);
        assert_eq!(parts.scale, 5);
        assert!(parts.negative);
        let back = parts.to_decimal().unwrap();
        assert_eq!(back, value);
        assert_eq!(back.scale(), 5);
        assert_eq!(back.to_string(), "-1234.56789");
    }

    #[test]
    fn test_large_magnitude_uses_high_word() {
        let parts = DecimalParts::from_decimal(Decimal::MAX);
        assert_eq!(parts.hi, u32::MAX);
        assert_eq!(parts.precision(), 29);
    }

    #[test]
    fn test_precision() {
        assert_eq!(DecimalParts::from_decimal(Decimal::from_str("12.345").unwrap()).precision(), 5);
        assert_eq!(DecimalParts::from_decimal(Decimal::from_str("0.001").unwrap()).precision(), 4);
        assert_eq!(DecimalParts::from_decimal(Decimal::ZERO).precision(), 1);
    }

    #[test]
    fn test_scale_out_of_range() {
        let parts = DecimalParts {
            lo: 1,
            scale: 29,
            ..Default::default()
        };
        assert!(matches!(parts.to_decimal(), Err(ValueError::Overflow { .. })));
    }
}
