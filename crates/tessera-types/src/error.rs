//! Value errors for the Tessera core

use crate::TypeTag;
use tessera_diagnostics::{
    ErrorCode, TSR0001, TSR0002, TSR0003, TSR0004, TSR0005, TSR0006, TSR0007, TSR0008, TSR0009,
    TSR0010, TSR0100, TSR0101, TSR0200, TSR0201, TSR0202, TSR0203,
};
use thiserror::Error;

/// Result type for value operations
pub type ValueResult<T> = Result<T, ValueError>;

/// Errors raised by accessors, operators and conversions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// Accessor invoked against a value whose active tag differs
    #[error("Invalid tag: expected {expected}, found {actual}")]
    InvalidTag { expected: TypeTag, actual: TypeTag },

    /// Equality or ordering attempted on a non-comparable kind
    #[error("Values of kind {tag} are not comparable")]
    NotComparable { tag: TypeTag },

    /// Arithmetic attempted on a non-numeric kind or on mismatched kinds
    #[error("Cannot {operation} values of kind {left} and {right}")]
    NotCombinable {
        operation: &'static str,
        left: TypeTag,
        right: TypeTag,
    },

    /// Input could not be interpreted as the target kind
    #[error("Cannot parse '{input}' as {target}: {reason}")]
    Parse {
        target: TypeTag,
        input: String,
        reason: String,
    },

    /// Unknown type name in `TypeTag::from_str`
    #[error("Unknown type name: {name}")]
    UnknownTypeName { name: String },

    /// Arithmetic or reconstruction overflow
    #[error("Overflow in {operation}")]
    Overflow { operation: String },

    /// Division by zero
    #[error("Division by zero")]
    DivisionByZero,
}

impl ValueError {
    /// Create an invalid tag error
    pub fn invalid_tag(expected: TypeTag, actual: TypeTag) -> Self {
        Self::InvalidTag { expected, actual }
    }

    /// Create a not-comparable error
    pub fn not_comparable(tag: TypeTag) -> Self {
        Self::NotComparable { tag }
    }

    /// Create a not-combinable error for a binary operation
    pub fn not_combinable(operation: &'static str, left: TypeTag, right: TypeTag) -> Self {
        Self::NotCombinable {
            operation,
            left,
            right,
        }
    }

    /// Create a parse error
    pub fn parse(target: TypeTag, input: impl Into<String>, reason: impl ToString) -> Self {
        Self::Parse {
            target,
            input: input.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an overflow error
    pub fn overflow(operation: impl Into<String>) -> Self {
        Self::Overflow {
            operation: operation.into(),
        }
    }

    /// Stable diagnostic code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidTag { .. } => TSR0100,
            Self::UnknownTypeName { .. } => TSR0101,
            Self::NotComparable { .. } => TSR0200,
            Self::NotCombinable { .. } => TSR0201,
            Self::Overflow { .. } => TSR0202,
            Self::DivisionByZero => TSR0203,
            Self::Parse { target, .. } => match target {
                TypeTag::Byte
                | TypeTag::SByte
                | TypeTag::UInt16
                | TypeTag::UInt32
                | TypeTag::UInt64
                | TypeTag::Int16
                | TypeTag::Int32
                | TypeTag::Int64
                | TypeTag::Decimal
                | TypeTag::Double
                | TypeTag::Single
                | TypeTag::Enum => TSR0001,
                TypeTag::Boolean => TSR0002,
                TypeTag::DateTime | TypeTag::Date | TypeTag::Time | TypeTag::DateTimeOffset => {
                    TSR0003
                }
                TypeTag::Char => TSR0004,
                TypeTag::Guid => TSR0005,
                TypeTag::Binary => TSR0006,
                TypeTag::Json => TSR0007,
                TypeTag::Xml => TSR0008,
                TypeTag::Geometry => TSR0009,
                TypeTag::Unknown
                | TypeTag::String
                | TypeTag::Text
                | TypeTag::CharArray
                | TypeTag::Object
                | TypeTag::Node => TSR0010,
            },
        }
    }
}
