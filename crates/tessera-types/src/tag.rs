//! Type tags
//!
//! This module defines the closed set of kinds a value can hold:
//! - `TypeTag`, the per-value discriminant
//! - `BasicKind`, the coarse grouping used for UI hints and column classes
//! - `NativeType`, a descriptor of the Rust representation behind a tag
//! - static metadata: storage class, minimum/maximum values

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::temporal::{OffsetTimestamp, TimeOfDay, Timestamp};
use crate::{ScalarValue, ValueError, Variant};

/// The kind of a value
///
/// Exactly one tag is active per value. The declaration order is the tag
/// ordinal order and is relied on by `TypeTag::ALL`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum TypeTag {
    /// Null or not yet known
    #[default]
    Unknown,
    /// Byte sequence
    Binary,
    /// 8-bit unsigned integer
    Byte,
    /// Single Unicode scalar value
    Char,
    /// 8-bit signed integer
    SByte,
    /// 16-bit unsigned integer
    UInt16,
    /// 32-bit unsigned integer
    UInt32,
    /// 64-bit unsigned integer
    UInt64,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 96-bit fixed-point decimal
    Decimal,
    /// 64-bit IEEE float
    Double,
    /// 32-bit IEEE float
    Single,
    /// Unicode string
    String,
    /// Long-form Unicode text
    Text,
    /// true/false
    Boolean,
    /// Date and time of day, tick precision
    DateTime,
    /// Calendar date (time of day ignored)
    Date,
    /// Time of day
    Time,
    /// 128-bit identifier
    Guid,
    /// JSON document
    Json,
    /// XML document
    Xml,
    /// Enumeration member, stored as its underlying integer
    Enum,
    /// Sequence of characters
    CharArray,
    /// Opaque host object
    Object,
    /// Opaque document node
    Node,
    /// Planar geometry
    Geometry,
    /// Date and time with a UTC offset
    DateTimeOffset,
}

/// Coarse grouping of type tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BasicKind {
    Unknown,
    String,
    Numeric,
    Date,
    Time,
    Boolean,
    Binary,
    Enum,
    Geometry,
}

/// How a tag's payload is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageClass {
    /// No payload (Unknown)
    Empty,
    /// Fixed-size, copied by value inside a `ScalarValue`
    Scalar,
    /// Separately owned payload inside a `Variant`
    Reference,
}

impl TypeTag {
    /// Every tag, in ordinal order
    pub const ALL: [TypeTag; 29] = [
        Self::Unknown,
        Self::Binary,
        Self::Byte,
        Self::Char,
        Self::SByte,
        Self::UInt16,
        Self::UInt32,
        Self::UInt64,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Decimal,
        Self::Double,
        Self::Single,
        Self::String,
        Self::Text,
        Self::Boolean,
        Self::DateTime,
        Self::Date,
        Self::Time,
        Self::Guid,
        Self::Json,
        Self::Xml,
        Self::Enum,
        Self::CharArray,
        Self::Object,
        Self::Node,
        Self::Geometry,
        Self::DateTimeOffset,
    ];

    /// Get the canonical name of this tag
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Binary => "Binary",
            Self::Byte => "Byte",
            Self::Char => "Char",
            Self::SByte => "SByte",
            Self::UInt16 => "UInt16",
            Self::UInt32 => "UInt32",
            Self::UInt64 => "UInt64",
            Self::Int16 => "Int16",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::Decimal => "Decimal",
            Self::Double => "Double",
            Self::Single => "Single",
            Self::String => "String",
            Self::Text => "Text",
            Self::Boolean => "Boolean",
            Self::DateTime => "DateTime",
            Self::Date => "Date",
            Self::Time => "Time",
            Self::Guid => "Guid",
            Self::Json => "Json",
            Self::Xml => "Xml",
            Self::Enum => "Enum",
            Self::CharArray => "CharArray",
            Self::Object => "Object",
            Self::Node => "Node",
            Self::Geometry => "Geometry",
            Self::DateTimeOffset => "DateTimeOffset",
        }
    }

    /// Get the basic kind of this tag
    pub const fn basic_kind(&self) -> BasicKind {
        match self {
            Self::Unknown | Self::Object | Self::Node => BasicKind::Unknown,
            Self::Byte
            | Self::SByte
            | Self::UInt16
            | Self::UInt32
            | Self::UInt64
            | Self::Int16
            | Self::Int32
            | Self::Int64
            | Self::Decimal
            | Self::Double
            | Self::Single => BasicKind::Numeric,
            Self::Char
            | Self::String
            | Self::Text
            | Self::CharArray
            | Self::Guid
            | Self::Json
            | Self::Xml => BasicKind::String,
            Self::DateTime | Self::Date | Self::DateTimeOffset => BasicKind::Date,
            Self::Time => BasicKind::Time,
            Self::Boolean => BasicKind::Boolean,
            Self::Binary => BasicKind::Binary,
            Self::Enum => BasicKind::Enum,
            Self::Geometry => BasicKind::Geometry,
        }
    }

    /// Get the storage class of this tag
    pub const fn storage_class(&self) -> StorageClass {
        match self {
            Self::Unknown => StorageClass::Empty,
            Self::Binary
            | Self::String
            | Self::Text
            | Self::CharArray
            | Self::Guid
            | Self::Json
            | Self::Xml
            | Self::Object
            | Self::Node
            | Self::Geometry => StorageClass::Reference,
            _ => StorageClass::Scalar,
        }
    }

    /// Check if values of this tag fit in a `ScalarValue`
    pub const fn is_scalar(&self) -> bool {
        matches!(self.storage_class(), StorageClass::Scalar)
    }

    /// Check if this tag is numeric
    pub const fn is_numeric(&self) -> bool {
        matches!(self.basic_kind(), BasicKind::Numeric)
    }

    /// Check if this tag is an integer
    pub const fn is_integer(&self) -> bool {
        self.integer_width().is_some()
    }

    /// Check if this tag is a floating point number
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Double | Self::Single)
    }

    /// Check if this tag is a signed integer
    pub const fn is_signed_integer(&self) -> bool {
        matches!(self, Self::SByte | Self::Int16 | Self::Int32 | Self::Int64)
    }

    /// Check if this tag is an unsigned integer
    pub const fn is_unsigned_integer(&self) -> bool {
        matches!(self, Self::Byte | Self::UInt16 | Self::UInt32 | Self::UInt64)
    }

    /// Bit width of an integer tag
    pub const fn integer_width(&self) -> Option<u8> {
        match self {
            Self::Byte | Self::SByte => Some(8),
            Self::UInt16 | Self::Int16 => Some(16),
            Self::UInt32 | Self::Int32 => Some(32),
            Self::UInt64 | Self::Int64 => Some(64),
            _ => None,
        }
    }

    /// Check if this tag holds character data
    pub const fn is_textual(&self) -> bool {
        matches!(self, Self::String | Self::Text | Self::Char | Self::CharArray)
    }

    /// Check if this tag is a date or time
    pub const fn is_temporal(&self) -> bool {
        matches!(
            self,
            Self::DateTime | Self::Date | Self::Time | Self::DateTimeOffset
        )
    }

    /// Check if values of this tag support `==`, `<` and `>`
    pub const fn is_comparable(&self) -> bool {
        !matches!(self, Self::Json | Self::Xml | Self::Object | Self::Node)
    }

    /// Check if values of this tag support arithmetic
    pub const fn is_arithmetic(&self) -> bool {
        self.is_numeric()
    }

    /// Get the native representation of this tag
    pub fn native_type(&self) -> NativeType {
        match self {
            Self::Unknown | Self::Object => NativeType::Object,
            Self::Node => NativeType::Node,
            Self::Binary => NativeType::array(NativeType::U8),
            Self::CharArray => NativeType::array(NativeType::Char),
            Self::Byte => NativeType::U8,
            Self::SByte => NativeType::I8,
            Self::Char => NativeType::Char,
            Self::UInt16 => NativeType::U16,
            Self::UInt32 => NativeType::U32,
            Self::UInt64 => NativeType::U64,
            Self::Int16 => NativeType::I16,
            Self::Int32 => NativeType::I32,
            Self::Int64 => NativeType::I64,
            Self::Decimal => NativeType::Decimal,
            Self::Double => NativeType::F64,
            Self::Single => NativeType::F32,
            Self::String | Self::Text => NativeType::String,
            Self::Boolean => NativeType::Bool,
            Self::DateTime | Self::Date => NativeType::Timestamp,
            Self::Time => NativeType::TimeOfDay,
            Self::DateTimeOffset => NativeType::OffsetTimestamp,
            Self::Guid => NativeType::Uuid,
            Self::Json => NativeType::Json,
            Self::Xml => NativeType::Xml,
            Self::Enum => NativeType::Enum,
            Self::Geometry => NativeType::Geometry,
        }
    }

    /// Smallest representable value of this tag, if the kind is bounded
    pub fn min_value(&self) -> Option<Variant> {
        let scalar = match self {
            Self::Byte => ScalarValue::Byte(u8::MIN),
            Self::SByte => ScalarValue::SByte(i8::MIN),
            Self::Char => ScalarValue::Char('\0'),
            Self::UInt16 => ScalarValue::UInt16(u16::MIN),
            Self::UInt32 => ScalarValue::UInt32(u32::MIN),
            Self::UInt64 => ScalarValue::UInt64(u64::MIN),
            Self::Int16 => ScalarValue::Int16(i16::MIN),
            Self::Int32 => ScalarValue::Int32(i32::MIN),
            Self::Int64 => ScalarValue::Int64(i64::MIN),
            Self::Decimal => ScalarValue::Decimal(rust_decimal::Decimal::MIN),
            Self::Double => ScalarValue::Double(f64::MIN),
            Self::Single => ScalarValue::Single(f32::MIN),
            Self::Boolean => ScalarValue::Boolean(false),
            Self::DateTime => ScalarValue::DateTime(Timestamp::MIN),
            Self::Date => ScalarValue::Date(Timestamp::MIN),
            Self::Time => ScalarValue::Time(TimeOfDay::MIDNIGHT),
            Self::DateTimeOffset => ScalarValue::DateTimeOffset(OffsetTimestamp::MIN),
            Self::Enum => ScalarValue::Enum(i64::MIN),
            Self::Guid => return Some(Variant::from(Uuid::nil())),
            Self::String => return Some(Variant::from(String::new())),
            Self::Text => return Some(Variant::text(String::new())),
            Self::Binary => return Some(Variant::from(Vec::<u8>::new())),
            Self::CharArray => return Some(Variant::char_array(Vec::new())),
            Self::Unknown
            | Self::Json
            | Self::Xml
            | Self::Object
            | Self::Node
            | Self::Geometry => return None,
        };
        Some(Variant::from(scalar))
    }

    /// Largest representable value of this tag, if the kind is bounded
    ///
    /// `length` sizes the maximum of variable-length kinds (strings, binary,
    /// char arrays) and defaults to 1.
    pub fn max_value(&self, length: Option<usize>) -> Option<Variant> {
        let length = length.unwrap_or(1);
        let scalar = match self {
            Self::Byte => ScalarValue::Byte(u8::MAX),
            Self::SByte => ScalarValue::SByte(i8::MAX),
            Self::Char => ScalarValue::Char(char::MAX),
            Self::UInt16 => ScalarValue::UInt16(u16::MAX),
            Self::UInt32 => ScalarValue::UInt32(u32::MAX),
            Self::UInt64 => ScalarValue::UInt64(u64::MAX),
            Self::Int16 => ScalarValue::Int16(i16::MAX),
            Self::Int32 => ScalarValue::Int32(i32::MAX),
            Self::Int64 => ScalarValue::Int64(i64::MAX),
            Self::Decimal => ScalarValue::Decimal(rust_decimal::Decimal::MAX),
            Self::Double => ScalarValue::Double(f64::MAX),
            Self::Single => ScalarValue::Single(f32::MAX),
            Self::Boolean => ScalarValue::Boolean(true),
            Self::DateTime => ScalarValue::DateTime(Timestamp::MAX),
            Self::Date => ScalarValue::Date(Timestamp::MAX),
            Self::Time => ScalarValue::Time(TimeOfDay::LAST),
            Self::DateTimeOffset => ScalarValue::DateTimeOffset(OffsetTimestamp::MAX),
            Self::Enum => ScalarValue::Enum(i64::MAX),
            Self::Guid => return Some(Variant::from(Uuid::max())),
            Self::String => {
                return Some(Variant::from(
                    std::iter::repeat_n(char::MAX, length).collect::<String>(),
                ));
            }
            Self::Text => {
                return Some(Variant::text(
                    std::iter::repeat_n(char::MAX, length).collect::<String>(),
                ));
            }
            Self::Binary => return Some(Variant::from(vec![u8::MAX; length])),
            Self::CharArray => return Some(Variant::char_array(vec![char::MAX; length])),
            Self::Unknown
            | Self::Json
            | Self::Xml
            | Self::Object
            | Self::Node
            | Self::Geometry => return None,
        };
        Some(Variant::from(scalar))
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TypeTag {
    type Err = ValueError;

    /// Parse a tag name, case-insensitively, accepting common aliases
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let tag = match lowered.as_str() {
            "unknown" | "null" => Self::Unknown,
            "binary" | "bytes" | "blob" => Self::Binary,
            "byte" | "u8" => Self::Byte,
            "char" => Self::Char,
            "sbyte" | "i8" => Self::SByte,
            "uint16" | "u16" | "ushort" => Self::UInt16,
            "uint32" | "u32" | "uint" => Self::UInt32,
            "uint64" | "u64" | "ulong" => Self::UInt64,
            "int16" | "i16" | "short" => Self::Int16,
            "int32" | "i32" | "int" | "integer" => Self::Int32,
            "int64" | "i64" | "long" => Self::Int64,
            "decimal" | "numeric" => Self::Decimal,
            "double" | "f64" | "float" => Self::Double,
            "single" | "f32" | "real" => Self::Single,
            "string" | "str" => Self::String,
            "text" => Self::Text,
            "boolean" | "bool" => Self::Boolean,
            "datetime" | "timestamp" => Self::DateTime,
            "date" => Self::Date,
            "time" => Self::Time,
            "guid" | "uuid" => Self::Guid,
            "json" => Self::Json,
            "xml" => Self::Xml,
            "enum" => Self::Enum,
            "chararray" | "chars" => Self::CharArray,
            "object" => Self::Object,
            "node" => Self::Node,
            "geometry" | "wkt" => Self::Geometry,
            "datetimeoffset" | "timestamptz" => Self::DateTimeOffset,
            _ => {
                return Err(ValueError::UnknownTypeName {
                    name: s.to_string(),
                });
            }
        };
        Ok(tag)
    }
}

impl fmt::Display for BasicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unknown => "Unknown",
            Self::String => "String",
            Self::Numeric => "Numeric",
            Self::Date => "Date",
            Self::Time => "Time",
            Self::Boolean => "Boolean",
            Self::Binary => "Binary",
            Self::Enum => "Enum",
            Self::Geometry => "Geometry",
        };
        f.write_str(name)
    }
}

/// Rust representation behind a tag
///
/// `Optional` and `Array` wrap other natives the way `Option<T>` and
/// `Vec<T>` do; `Array(U8)` is binary and `Array(Char)` a char array, both
/// scalar-like.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NativeType {
    Bool,
    U8,
    I8,
    Char,
    U16,
    U32,
    U64,
    I16,
    I32,
    I64,
    Decimal,
    F32,
    F64,
    String,
    Timestamp,
    TimeOfDay,
    OffsetTimestamp,
    Uuid,
    Json,
    Xml,
    Geometry,
    Enum,
    Object,
    Node,
    Optional(Box<NativeType>),
    Array(Box<NativeType>),
}

impl NativeType {
    /// Create an optional wrapper
    pub fn optional(inner: NativeType) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// Create an array wrapper
    pub fn array(element: NativeType) -> Self {
        Self::Array(Box::new(element))
    }

    /// Check if this is a simple (scalar-like) native type
    pub fn is_simple(&self) -> bool {
        match self {
            Self::Optional(inner) => inner.is_simple(),
            Self::Array(element) => matches!(**element, Self::U8 | Self::Char),
            Self::Json | Self::Xml | Self::Geometry | Self::Object | Self::Node => false,
            _ => true,
        }
    }

    /// Check if this is a true array (binary and char arrays excluded)
    pub fn is_array_kind(&self) -> bool {
        match self {
            Self::Optional(inner) => inner.is_array_kind(),
            Self::Array(element) => !matches!(**element, Self::U8 | Self::Char),
            _ => false,
        }
    }

    /// Resolve the tag and array rank of this native type
    pub fn tag(&self) -> (TypeTag, u8) {
        match self {
            Self::Optional(inner) => inner.tag(),
            Self::Array(element) => match **element {
                Self::U8 => (TypeTag::Binary, 0),
                Self::Char => (TypeTag::CharArray, 0),
                _ => {
                    let (tag, rank) = element.tag();
                    (tag, rank.saturating_add(1))
                }
            },
            Self::Bool => (TypeTag::Boolean, 0),
            Self::U8 => (TypeTag::Byte, 0),
            Self::I8 => (TypeTag::SByte, 0),
            Self::Char => (TypeTag::Char, 0),
            Self::U16 => (TypeTag::UInt16, 0),
            Self::U32 => (TypeTag::UInt32, 0),
            Self::U64 => (TypeTag::UInt64, 0),
            Self::I16 => (TypeTag::Int16, 0),
            Self::I32 => (TypeTag::Int32, 0),
            Self::I64 => (TypeTag::Int64, 0),
            Self::Decimal => (TypeTag::Decimal, 0),
            Self::F32 => (TypeTag::Single, 0),
            Self::F64 => (TypeTag::Double, 0),
            Self::String => (TypeTag::String, 0),
            Self::Timestamp => (TypeTag::DateTime, 0),
            Self::TimeOfDay => (TypeTag::Time, 0),
            Self::OffsetTimestamp => (TypeTag::DateTimeOffset, 0),
            Self::Uuid => (TypeTag::Guid, 0),
            Self::Json => (TypeTag::Json, 0),
            Self::Xml => (TypeTag::Xml, 0),
            Self::Geometry => (TypeTag::Geometry, 0),
            Self::Enum => (TypeTag::Enum, 0),
            Self::Object => (TypeTag::Object, 0),
            Self::Node => (TypeTag::Node, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_in_ordinal_order() {
        for pair in TypeTag::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_name_round_trips_through_from_str() {
        for tag in TypeTag::ALL {
            assert_eq!(tag.name().parse::<TypeTag>().unwrap(), tag);
        }
        assert_eq!("uuid".parse::<TypeTag>().unwrap(), TypeTag::Guid);
        assert!("varchar2".parse::<TypeTag>().is_err());
    }

    #[test]
    fn test_tag_of_unwraps_wrappers() {
        let nested = NativeType::optional(NativeType::array(NativeType::array(NativeType::I32)));
        assert_eq!(nested.tag(), (TypeTag::Int32, 2));
        assert_eq!(NativeType::array(NativeType::U8).tag(), (TypeTag::Binary, 0));
        assert_eq!(
            NativeType::array(NativeType::array(NativeType::Char)).tag(),
            (TypeTag::CharArray, 1)
        );
    }

    #[test]
    fn test_native_type_round_trip() {
        for tag in TypeTag::ALL {
            let (resolved, rank) = tag.native_type().tag();
            assert_eq!(rank, 0);
            match tag {
                TypeTag::Text => assert_eq!(resolved, TypeTag::String),
                TypeTag::Date => assert_eq!(resolved, TypeTag::DateTime),
                TypeTag::Unknown => assert_eq!(resolved, TypeTag::Object),
                _ => assert_eq!(resolved, tag),
            }
        }
    }
}
