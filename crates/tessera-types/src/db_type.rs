//! Relational parameter type mapping

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::TypeTag;

/// Parameter type of a relational database driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DbType {
    AnsiString,
    Binary,
    Byte,
    Boolean,
    Currency,
    Date,
    DateTime,
    Decimal,
    Double,
    Guid,
    Int16,
    Int32,
    Int64,
    Object,
    SByte,
    Single,
    String,
    Time,
    UInt16,
    UInt32,
    UInt64,
    VarNumeric,
    AnsiStringFixedLength,
    StringFixedLength,
    Xml,
    DateTime2,
    DateTimeOffset,
}

impl fmt::Display for DbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Parameter type used to bind a value of `tag`
pub const fn db_type_of(tag: TypeTag) -> DbType {
    match tag {
        TypeTag::Unknown | TypeTag::Object => DbType::Object,
        TypeTag::Binary | TypeTag::Geometry => DbType::Binary,
        TypeTag::Byte => DbType::Byte,
        TypeTag::Char | TypeTag::CharArray => DbType::StringFixedLength,
        TypeTag::SByte => DbType::SByte,
        TypeTag::UInt16 => DbType::UInt16,
        TypeTag::UInt32 => DbType::UInt32,
        TypeTag::UInt64 => DbType::UInt64,
        TypeTag::Int16 => DbType::Int16,
        TypeTag::Int32 => DbType::Int32,
        TypeTag::Int64 | TypeTag::Enum => DbType::Int64,
        TypeTag::Decimal => DbType::Decimal,
        TypeTag::Double => DbType::Double,
        TypeTag::Single => DbType::Single,
        TypeTag::String | TypeTag::Text | TypeTag::Json => DbType::String,
        TypeTag::Boolean => DbType::Boolean,
        TypeTag::DateTime => DbType::DateTime2,
        TypeTag::Date => DbType::Date,
        TypeTag::Time => DbType::Time,
        TypeTag::Guid => DbType::Guid,
        TypeTag::Xml | TypeTag::Node => DbType::Xml,
        TypeTag::DateTimeOffset => DbType::DateTimeOffset,
    }
}

/// Canonical tag for values bound as `db_type`
pub const fn tag_of_db_type(db_type: DbType) -> TypeTag {
    match db_type {
        DbType::AnsiString | DbType::String => TypeTag::String,
        DbType::AnsiStringFixedLength | DbType::StringFixedLength => TypeTag::CharArray,
        DbType::Binary => TypeTag::Binary,
        DbType::Byte => TypeTag::Byte,
        DbType::Boolean => TypeTag::Boolean,
        DbType::Currency | DbType::Decimal | DbType::VarNumeric => TypeTag::Decimal,
        DbType::Date => TypeTag::Date,
        DbType::DateTime | DbType::DateTime2 => TypeTag::DateTime,
        DbType::Double => TypeTag::Double,
        DbType::Guid => TypeTag::Guid,
        DbType::Int16 => TypeTag::Int16,
        DbType::Int32 => TypeTag::Int32,
        DbType::Int64 => TypeTag::Int64,
        DbType::Object => TypeTag::Object,
        DbType::SByte => TypeTag::SByte,
        DbType::Single => TypeTag::Single,
        DbType::Time => TypeTag::Time,
        DbType::UInt16 => TypeTag::UInt16,
        DbType::UInt32 => TypeTag::UInt32,
        DbType::UInt64 => TypeTag::UInt64,
        DbType::Xml => TypeTag::Xml,
        DbType::DateTimeOffset => TypeTag::DateTimeOffset,
    }
}
