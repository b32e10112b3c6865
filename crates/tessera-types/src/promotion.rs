//! Promotion table
//!
//! Resolves the single tag used to compare or combine two values whose
//! tags differ. The resolution is total and symmetric.

use log::trace;

use crate::TypeTag;

/// Resolve the tag both operands are converted to before comparison or
/// arithmetic
///
/// Rules, first match wins:
/// 1. identical tags resolve to themselves
/// 2. Unknown resolves to the other tag
/// 3. numeric vs numeric uses numeric promotion (see [`promote_numeric`])
/// 4. numeric vs Boolean resolves to the numeric tag
/// 5. a non-textual kind (numeric, Boolean, temporal, Guid, Geometry, Binary)
///    vs a textual kind resolves to the non-textual tag
/// 6. Enum vs numeric promotes as Int64 would (see [`promote_numeric`]), so
///    every enum value fits the resolved tag
/// 7. Date vs DateTime resolves to DateTime, either vs DateTimeOffset to
///    DateTimeOffset
/// 8. textual vs textual resolves to String
/// 9. everything else compares as String
pub fn best_compare_type(a: TypeTag, b: TypeTag) -> TypeTag {
    let resolved = resolve(a, b);
    if a != b {
        trace!("promoted {a} and {b} to {resolved}");
    }
    resolved
}

fn resolve(a: TypeTag, b: TypeTag) -> TypeTag {
    use TypeTag::*;

    if a == b {
        return a;
    }
    if a == Unknown {
        return b;
    }
    if b == Unknown {
        return a;
    }
    if a.is_numeric() && b.is_numeric() {
        return promote_numeric(a, b);
    }

    match (a, b) {
        (n, Boolean) | (Boolean, n) if n.is_numeric() => n,
        (x, t) | (t, x) if t.is_textual() && promotes_over_text(x) => x,
        (n, Enum) | (Enum, n) if n.is_numeric() => promote_numeric(Int64, n),
        (Date, DateTime) | (DateTime, Date) => DateTime,
        (Date | DateTime, DateTimeOffset) | (DateTimeOffset, Date | DateTime) => DateTimeOffset,
        _ => String,
    }
}

/// Kinds whose text form must parse when compared against text
fn promotes_over_text(tag: TypeTag) -> bool {
    tag.is_numeric()
        || tag.is_temporal()
        || matches!(
            tag,
            TypeTag::Boolean | TypeTag::Guid | TypeTag::Geometry | TypeTag::Binary
        )
}

/// Promote two distinct numeric tags
///
/// - same signedness: the wider integer
/// - mixed signedness: the narrowest signed integer strictly wider than the
///   unsigned operand, and at least as wide as the signed one; UInt64 goes to
///   Decimal
/// - integer vs Decimal: Decimal
/// - Single vs an integer of at most 16 bits: Single
/// - any other float vs integer: Double
/// - float vs Decimal, Single vs Double: Double
pub fn promote_numeric(a: TypeTag, b: TypeTag) -> TypeTag {
    use TypeTag::*;

    if a == b {
        return a;
    }

    match (a.integer_width(), b.integer_width()) {
        (Some(wa), Some(wb)) => {
            if a.is_signed_integer() == b.is_signed_integer() {
                return if wa >= wb { a } else { b };
            }
            let (unsigned, signed) = if a.is_unsigned_integer() { (wa, wb) } else { (wb, wa) };
            if unsigned >= 64 {
                return Decimal;
            }
            signed_of_width((unsigned * 2).max(signed))
        }
        (Some(width), None) | (None, Some(width)) => {
            let other = if a.is_integer() { b } else { a };
            match other {
                Decimal => Decimal,
                Single if width <= 16 => Single,
                _ => Double,
            }
        }
        (None, None) => Double,
    }
}

fn signed_of_width(width: u8) -> TypeTag {
    match width {
        0..=8 => TypeTag::SByte,
        9..=16 => TypeTag::Int16,
        17..=32 => TypeTag::Int32,
        _ => TypeTag::Int64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TypeTag::*;

    #[test]
    fn test_mixed_signedness() {
        assert_eq!(best_compare_type(Byte, SByte), Int16);
        assert_eq!(best_compare_type(UInt16, Int16), Int32);
        assert_eq!(best_compare_type(UInt32, SByte), Int64);
        assert_eq!(best_compare_type(UInt64, Int32), Decimal);
        assert_eq!(best_compare_type(Byte, Int64), Int64);
    }

    #[test]
    fn test_float_rules() {
        assert_eq!(best_compare_type(Single, Int16), Single);
        assert_eq!(best_compare_type(Single, Int32), Double);
        assert_eq!(best_compare_type(Double, Decimal), Double);
        assert_eq!(best_compare_type(Single, Double), Double);
        assert_eq!(best_compare_type(Int64, Decimal), Decimal);
    }

    #[test]
    fn test_non_numeric_rules() {
        assert_eq!(best_compare_type(Boolean, Byte), Byte);
        assert_eq!(best_compare_type(String, Int32), Int32);
        assert_eq!(best_compare_type(Text, Guid), Guid);
        assert_eq!(best_compare_type(Enum, UInt16), Int64);
        assert_eq!(best_compare_type(Enum, UInt64), Decimal);
        assert_eq!(best_compare_type(Single, Enum), Double);
        assert_eq!(best_compare_type(Date, DateTime), DateTime);
        assert_eq!(best_compare_type(Date, DateTimeOffset), DateTimeOffset);
        assert_eq!(best_compare_type(Char, CharArray), String);
        assert_eq!(best_compare_type(Json, Int32), String);
        assert_eq!(best_compare_type(Unknown, Xml), Xml);
    }
}
