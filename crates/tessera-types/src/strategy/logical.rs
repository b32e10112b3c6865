//! Boolean, character and enumeration strategies
//!
//! None of these kinds supports arithmetic.

use std::cmp::Ordering;

use super::{TypeStrategy, cannot_convert, to_i128};
use crate::codec;
use crate::{ScalarValue, TypeTag, ValueError, ValueResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanStrategy;

impl TypeStrategy for BooleanStrategy {
    type Native = bool;

    const TAG: TypeTag = TypeTag::Boolean;

    fn compare(&self, a: bool, b: bool) -> Ordering {
        a.cmp(&b)
    }

    fn render(&self, value: bool) -> String {
        value.to_string()
    }

    fn parse(&self, text: &str) -> ValueResult<bool> {
        codec::parse_bool(text)
            .ok_or_else(|| ValueError::parse(Self::TAG, text, "not a boolean literal"))
    }

    fn convert(&self, value: &ScalarValue) -> ValueResult<bool> {
        match *value {
            ScalarValue::Boolean(v) => Ok(v),
            ScalarValue::Char(c) => self.parse(c.encode_utf8(&mut [0; 4])),
            ScalarValue::Double(v) => Ok(v != 0.0),
            ScalarValue::Single(v) => Ok(v != 0.0),
            _ => to_i128(value)
                .map(|v| v != 0)
                .ok_or_else(|| cannot_convert(Self::TAG, value.tag(), value)),
        }
    }

    fn wrap(&self, value: bool) -> ScalarValue {
        ScalarValue::Boolean(value)
    }

    fn extract(&self, value: &ScalarValue) -> Option<bool> {
        match *value {
            ScalarValue::Boolean(v) => Some(v),
            _ => None,
        }
    }
}

/// Single Unicode scalar value, ordered by code point
#[derive(Debug, Clone, Copy, Default)]
pub struct CharStrategy;

impl TypeStrategy for CharStrategy {
    type Native = char;

    const TAG: TypeTag = TypeTag::Char;

    fn compare(&self, a: char, b: char) -> Ordering {
        a.cmp(&b)
    }

    fn render(&self, value: char) -> String {
        value.to_string()
    }

    /// Exactly one character; surrounding whitespace is significant
    fn parse(&self, text: &str) -> ValueResult<char> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(ValueError::parse(
                Self::TAG,
                text,
                format!("expected exactly one character, got {}", text.chars().count()),
            )),
        }
    }

    fn convert(&self, value: &ScalarValue) -> ValueResult<char> {
        match *value {
            ScalarValue::Char(c) => Ok(c),
            _ => Err(cannot_convert(Self::TAG, value.tag(), value)),
        }
    }

    fn wrap(&self, value: char) -> ScalarValue {
        ScalarValue::Char(value)
    }

    fn extract(&self, value: &ScalarValue) -> Option<char> {
        match *value {
            ScalarValue::Char(c) => Some(c),
            _ => None,
        }
    }
}

/// Enumeration member stored as its underlying integer
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumStrategy;

impl TypeStrategy for EnumStrategy {
    type Native = i64;

    const TAG: TypeTag = TypeTag::Enum;

    fn compare(&self, a: i64, b: i64) -> Ordering {
        a.cmp(&b)
    }

    fn render(&self, value: i64) -> String {
        value.to_string()
    }

    fn parse(&self, text: &str) -> ValueResult<i64> {
        text.trim()
            .parse()
            .map_err(|e| ValueError::parse(Self::TAG, text, e))
    }

    fn convert(&self, value: &ScalarValue) -> ValueResult<i64> {
        match *value {
            ScalarValue::Enum(v) => Ok(v),
            ScalarValue::Char(c) => self.parse(c.encode_utf8(&mut [0; 4])),
            _ if value.tag().is_integer() => to_i128(value)
                .and_then(|v| i64::try_from(v).ok())
                .ok_or_else(|| ValueError::overflow(format!("converting {value} to Enum"))),
            _ => Err(cannot_convert(Self::TAG, value.tag(), value)),
        }
    }

    fn wrap(&self, value: i64) -> ScalarValue {
        ScalarValue::Enum(value)
    }

    fn extract(&self, value: &ScalarValue) -> Option<i64> {
        match *value {
            ScalarValue::Enum(v) => Some(v),
            _ => None,
        }
    }
}
