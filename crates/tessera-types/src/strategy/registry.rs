//! Tag-keyed strategy table for dynamic call sites

use std::collections::HashMap;
use std::sync::LazyLock;

use log::debug;

use super::{
    BooleanStrategy, ByteStrategy, CharStrategy, DateStrategy, DateTimeOffsetStrategy,
    DateTimeStrategy, DecimalStrategy, DoubleStrategy, EnumStrategy, Int16Strategy,
    Int32Strategy, Int64Strategy, SByteStrategy, ScalarStrategy, SingleStrategy, TimeStrategy,
    UInt16Strategy, UInt32Strategy, UInt64Strategy,
};
use crate::TypeTag;

static REGISTRY: LazyLock<HashMap<TypeTag, &'static dyn ScalarStrategy>> = LazyLock::new(|| {
    let table: HashMap<_, _> = TypeTag::ALL
        .into_iter()
        .filter_map(|tag| strategy_of(tag).map(|strategy| (tag, strategy)))
        .collect();
    debug!("built strategy table with {} scalar kinds", table.len());
    table
});

/// Exhaustive over tags so a new tag fails to compile until it is mapped
fn strategy_of(tag: TypeTag) -> Option<&'static dyn ScalarStrategy> {
    let strategy: &'static dyn ScalarStrategy = match tag {
        TypeTag::Byte => &ByteStrategy,
        TypeTag::SByte => &SByteStrategy,
        TypeTag::Char => &CharStrategy,
        TypeTag::UInt16 => &UInt16Strategy,
        TypeTag::UInt32 => &UInt32Strategy,
        TypeTag::UInt64 => &UInt64Strategy,
        TypeTag::Int16 => &Int16Strategy,
        TypeTag::Int32 => &Int32Strategy,
        TypeTag::Int64 => &Int64Strategy,
        TypeTag::Decimal => &DecimalStrategy,
        TypeTag::Double => &DoubleStrategy,
        TypeTag::Single => &SingleStrategy,
        TypeTag::Boolean => &BooleanStrategy,
        TypeTag::DateTime => &DateTimeStrategy,
        TypeTag::Date => &DateStrategy,
        TypeTag::Time => &TimeStrategy,
        TypeTag::DateTimeOffset => &DateTimeOffsetStrategy,
        TypeTag::Enum => &EnumStrategy,
        TypeTag::Unknown
        | TypeTag::Binary
        | TypeTag::String
        | TypeTag::Text
        | TypeTag::Guid
        | TypeTag::Json
        | TypeTag::Xml
        | TypeTag::CharArray
        | TypeTag::Object
        | TypeTag::Node
        | TypeTag::Geometry => return None,
    };
    Some(strategy)
}

/// Strategy for a scalar tag; `None` for reference kinds and Unknown
pub fn for_tag(tag: TypeTag) -> Option<&'static dyn ScalarStrategy> {
    REGISTRY.get(&tag).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_scalar_tag_has_a_strategy() {
        for tag in TypeTag::ALL {
            let strategy = for_tag(tag);
            assert_eq!(strategy.is_some(), tag.is_scalar(), "{tag}");
            if let Some(strategy) = strategy {
                assert_eq!(strategy.tag(), tag);
            }
        }
    }
}
