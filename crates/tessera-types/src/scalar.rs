//! Scalar value record
//!
//! `ScalarValue` is a fixed-size `Copy` enum pairing a scalar type tag with
//! its native payload. It never allocates. Operations between two records
//! of the same tag run through a closed match over the per-kind strategies;
//! records of different tags are first promoted with
//! [`best_compare_type`](crate::best_compare_type).

use std::cmp::Ordering;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::DecimalParts;
use crate::promotion::best_compare_type;
use crate::strategy::{
    BooleanStrategy, ByteStrategy, CharStrategy, DateStrategy, DateTimeOffsetStrategy,
    DateTimeStrategy, DecimalStrategy, DoubleStrategy, EnumStrategy, Int16Strategy,
    Int32Strategy, Int64Strategy, NativeScalar, SByteStrategy, ScalarStrategy, SingleStrategy,
    TimeStrategy, TypeStrategy, UInt16Strategy, UInt32Strategy, UInt64Strategy, for_tag,
};
use crate::temporal::{OffsetTimestamp, TimeOfDay, Timestamp};
use crate::{TypeTag, ValueError, ValueResult, Variant};

/// A scalar value: tag and native payload in one `Copy` record
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum ScalarValue {
    Byte(u8),
    SByte(i8),
    Char(char),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Decimal(Decimal),
    Double(f64),
    Single(f32),
    Boolean(bool),
    DateTime(Timestamp),
    /// Stored as given; the time of day is dropped when read
    Date(Timestamp),
    Time(TimeOfDay),
    DateTimeOffset(OffsetTimestamp),
    Enum(i64),
}

/// Run `$body` with the strategy and payload of a single record
macro_rules! with_strategy {
    ($value:expr, |$s:ident, $a:ident| $body:expr) => {
        match $value {
            ScalarValue::Byte($a) => { let $s = ByteStrategy; $body }
            ScalarValue::SByte($a) => { let $s = SByteStrategy; $body }
            ScalarValue::Char($a) => { let $s = CharStrategy; $body }
            ScalarValue::UInt16($a) => { let $s = UInt16Strategy; $body }
            ScalarValue::UInt32($a) => { let $s = UInt32Strategy; $body }
            ScalarValue::UInt64($a) => { let $s = UInt64Strategy; $body }
            ScalarValue::Int16($a) => { let $s = Int16Strategy; $body }
            ScalarValue::Int32($a) => { let $s = Int32Strategy; $body }
            ScalarValue::Int64($a) => { let $s = Int64Strategy; $body }
            ScalarValue::Decimal($a) => { let $s = DecimalStrategy; $body }
            ScalarValue::Double($a) => { let $s = DoubleStrategy; $body }
            ScalarValue::Single($a) => { let $s = SingleStrategy; $body }
            ScalarValue::Boolean($a) => { let $s = BooleanStrategy; $body }
            ScalarValue::DateTime($a) => { let $s = DateTimeStrategy; $body }
            ScalarValue::Date($a) => { let $s = DateStrategy; $body }
            ScalarValue::Time($a) => { let $s = TimeStrategy; $body }
            ScalarValue::DateTimeOffset($a) => { let $s = DateTimeOffsetStrategy; $body }
            ScalarValue::Enum($a) => { let $s = EnumStrategy; $body }
        }
    };
}

/// Run `$body` when both records carry the same tag; `None` otherwise
macro_rules! same_tag {
    ($left:expr, $right:expr, |$s:ident, $a:ident, $b:ident| $body:expr) => {
        match ($left, $right) {
            (ScalarValue::Byte($a), ScalarValue::Byte($b)) => { let $s = ByteStrategy; Some($body) }
            (ScalarValue::SByte($a), ScalarValue::SByte($b)) => { let $s = SByteStrategy; Some($body) }
            (ScalarValue::Char($a), ScalarValue::Char($b)) => { let $s = CharStrategy; Some($body) }
            (ScalarValue::UInt16($a), ScalarValue::UInt16($b)) => { let $s = UInt16Strategy; Some($body) }
            (ScalarValue::UInt32($a), ScalarValue::UInt32($b)) => { let $s = UInt32Strategy; Some($body) }
            (ScalarValue::UInt64($a), ScalarValue::UInt64($b)) => { let $s = UInt64Strategy; Some($body) }
            (ScalarValue::Int16($a), ScalarValue::Int16($b)) => { let $s = Int16Strategy; Some($body) }
            (ScalarValue::Int32($a), ScalarValue::Int32($b)) => { let $s = Int32Strategy; Some($body) }
            (ScalarValue::Int64($a), ScalarValue::Int64($b)) => { let $s = Int64Strategy; Some($body) }
            (ScalarValue::Decimal($a), ScalarValue::Decimal($b)) => { let $s = DecimalStrategy; Some($body) }
            (ScalarValue::Double($a), ScalarValue::Double($b)) => { let $s = DoubleStrategy; Some($body) }
            (ScalarValue::Single($a), ScalarValue::Single($b)) => { let $s = SingleStrategy; Some($body) }
            (ScalarValue::Boolean($a), ScalarValue::Boolean($b)) => { let $s = BooleanStrategy; Some($body) }
            (ScalarValue::DateTime($a), ScalarValue::DateTime($b)) => { let $s = DateTimeStrategy; Some($body) }
            (ScalarValue::Date($a), ScalarValue::Date($b)) => { let $s = DateStrategy; Some($body) }
            (ScalarValue::Time($a), ScalarValue::Time($b)) => { let $s = TimeStrategy; Some($body) }
            (ScalarValue::DateTimeOffset($a), ScalarValue::DateTimeOffset($b)) => {
                let $s = DateTimeOffsetStrategy;
                Some($body)
            }
            (ScalarValue::Enum($a), ScalarValue::Enum($b)) => { let $s = EnumStrategy; Some($body) }
            _ => None,
        }
    };
}

/// Binary arithmetic: same-tag fast path, otherwise promote
macro_rules! arithmetic {
    ($name:ident, $op:ident, $dynamic:ident, $label:literal) => {
        #[doc = concat!("`self ", $label, " other`, promoting differing tags")]
        pub fn $name(&self, other: &ScalarValue) -> ValueResult<ScalarValue> {
            if let Some(result) = same_tag!(*self, *other, |s, a, b| s.$op(a, b).map(|v| s.wrap(v))) {
                return result;
            }
            self.promoted_arithmetic(other, stringify!($op))?
                .$dynamic(self, other)
        }
    };
}

impl ScalarValue {
    /// Active type tag
    pub const fn tag(&self) -> TypeTag {
        match self {
            Self::Byte(_) => TypeTag::Byte,
            Self::SByte(_) => TypeTag::SByte,
            Self::Char(_) => TypeTag::Char,
            Self::UInt16(_) => TypeTag::UInt16,
            Self::UInt32(_) => TypeTag::UInt32,
            Self::UInt64(_) => TypeTag::UInt64,
            Self::Int16(_) => TypeTag::Int16,
            Self::Int32(_) => TypeTag::Int32,
            Self::Int64(_) => TypeTag::Int64,
            Self::Decimal(_) => TypeTag::Decimal,
            Self::Double(_) => TypeTag::Double,
            Self::Single(_) => TypeTag::Single,
            Self::Boolean(_) => TypeTag::Boolean,
            Self::DateTime(_) => TypeTag::DateTime,
            Self::Date(_) => TypeTag::Date,
            Self::Time(_) => TypeTag::Time,
            Self::DateTimeOffset(_) => TypeTag::DateTimeOffset,
            Self::Enum(_) => TypeTag::Enum,
        }
    }

    /// A Date-tagged record
    pub const fn date(value: Timestamp) -> Self {
        Self::Date(value)
    }

    /// An Enum-tagged record
    pub const fn enumeration(value: i64) -> Self {
        Self::Enum(value)
    }

    /// Build a record of `tag` from any value, converting (or parsing text)
    /// into the tag's payload
    ///
    /// Fails with `InvalidTag` when `tag` is not a scalar kind.
    pub fn from_dynamic(tag: TypeTag, value: impl Into<Variant>) -> ValueResult<Self> {
        let value = value.into();
        let strategy = for_tag(tag).ok_or_else(|| ValueError::invalid_tag(tag, value.tag()))?;
        strategy.from_variant(&value)
    }

    /// Convert this record to another scalar tag
    pub fn convert_to(&self, tag: TypeTag) -> ValueResult<Self> {
        if tag == self.tag() {
            return Ok(*self);
        }
        for_tag(tag)
            .ok_or_else(|| ValueError::invalid_tag(tag, self.tag()))?
            .coerce(self)
    }

    /// Typed payload access selected by the native type
    ///
    /// `Timestamp` reads DateTime and `i64` reads Int64; use [`as_date`] and
    /// [`as_enum`] for the tags sharing those payloads.
    ///
    /// [`as_date`]: Self::as_date
    /// [`as_enum`]: Self::as_enum
    pub fn get<T: NativeScalar>(&self) -> ValueResult<T> {
        let strategy = T::Strategy::default();
        strategy
            .extract(self)
            .ok_or_else(|| ValueError::invalid_tag(T::Strategy::TAG, self.tag()))
    }

    pub fn as_byte(&self) -> ValueResult<u8> {
        self.get()
    }

    pub fn as_sbyte(&self) -> ValueResult<i8> {
        self.get()
    }

    pub fn as_char(&self) -> ValueResult<char> {
        self.get()
    }

    pub fn as_u16(&self) -> ValueResult<u16> {
        self.get()
    }

    pub fn as_u32(&self) -> ValueResult<u32> {
        self.get()
    }

    pub fn as_u64(&self) -> ValueResult<u64> {
        self.get()
    }

    pub fn as_i16(&self) -> ValueResult<i16> {
        self.get()
    }

    pub fn as_i32(&self) -> ValueResult<i32> {
        self.get()
    }

    pub fn as_i64(&self) -> ValueResult<i64> {
        self.get()
    }

    pub fn as_decimal(&self) -> ValueResult<Decimal> {
        self.get()
    }

    pub fn as_f64(&self) -> ValueResult<f64> {
        self.get()
    }

    pub fn as_f32(&self) -> ValueResult<f32> {
        self.get()
    }

    pub fn as_bool(&self) -> ValueResult<bool> {
        self.get()
    }

    pub fn as_datetime(&self) -> ValueResult<Timestamp> {
        self.get()
    }

    /// Date payload with the time of day truncated
    pub fn as_date(&self) -> ValueResult<Timestamp> {
        DateStrategy
            .extract(self)
            .ok_or_else(|| ValueError::invalid_tag(TypeTag::Date, self.tag()))
    }

    pub fn as_time(&self) -> ValueResult<TimeOfDay> {
        self.get()
    }

    pub fn as_datetime_offset(&self) -> ValueResult<OffsetTimestamp> {
        self.get()
    }

    pub fn as_enum(&self) -> ValueResult<i64> {
        EnumStrategy
            .extract(self)
            .ok_or_else(|| ValueError::invalid_tag(TypeTag::Enum, self.tag()))
    }

    /// Packed parts of a Decimal payload
    pub fn decimal_parts(&self) -> ValueResult<DecimalParts> {
        self.as_decimal().map(DecimalParts::from_decimal)
    }

    /// Total comparison; differing tags are promoted first
    ///
    /// When promotion falls back to String the canonical text forms are
    /// compared exactly.
    pub fn compare(&self, other: &ScalarValue) -> ValueResult<Ordering> {
        if let Some(ordering) = same_tag!(*self, *other, |s, a, b| s.compare(a, b)) {
            return Ok(ordering);
        }
        match self.promoted(other) {
            Some(strategy) => strategy.compare_scalars(self, other),
            None => Ok(self.to_string().cmp(&other.to_string())),
        }
    }

    /// Equality under the same promotion rules as [`compare`](Self::compare)
    pub fn equals(&self, other: &ScalarValue) -> ValueResult<bool> {
        self.compare(other).map(|ordering| ordering == Ordering::Equal)
    }

    arithmetic!(add, add, add_scalars, "+");
    arithmetic!(subtract, subtract, subtract_scalars, "-");
    arithmetic!(multiply, multiply, multiply_scalars, "*");
    arithmetic!(divide, divide, divide_scalars, "/");

    pub fn negate(&self) -> ValueResult<ScalarValue> {
        with_strategy!(*self, |s, a| s.negate(a).map(|v| s.wrap(v)))
    }

    /// -1, 0 or 1
    pub fn sign(&self) -> ValueResult<i32> {
        with_strategy!(*self, |s, a| s.sign(a))
    }

    fn promoted(&self, other: &ScalarValue) -> Option<&'static dyn ScalarStrategy> {
        for_tag(best_compare_type(self.tag(), other.tag()))
    }

    fn promoted_arithmetic(
        &self,
        other: &ScalarValue,
        operation: &'static str,
    ) -> ValueResult<&'static dyn ScalarStrategy> {
        let target = best_compare_type(self.tag(), other.tag());
        if !target.is_arithmetic() {
            return Err(ValueError::not_combinable(operation, self.tag(), other.tag()));
        }
        for_tag(target).ok_or_else(|| ValueError::not_combinable(operation, self.tag(), other.tag()))
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&with_strategy!(*self, |s, a| s.render(a)))
    }
}

impl PartialEq for ScalarValue {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other).unwrap_or(false)
    }
}

impl PartialOrd for ScalarValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other).ok()
    }
}

macro_rules! from_native {
    ($($native:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$native> for ScalarValue {
                fn from(value: $native) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

from_native! {
    u8 => Byte,
    i8 => SByte,
    char => Char,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    Decimal => Decimal,
    f64 => Double,
    f32 => Single,
    bool => Boolean,
    Timestamp => DateTime,
    TimeOfDay => Time,
    OffsetTimestamp => DateTimeOffset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_is_small_and_copy() {
        fn assert_copy<T: Copy + Send + Sync>() {}
        assert_copy::<ScalarValue>();
        assert!(std::mem::size_of::<ScalarValue>() <= 24);
    }

    #[test]
    fn test_display_uses_canonical_forms() {
        let ts = Timestamp::from_ymd_hms(2024, 3, 15, 10, 30, 0).unwrap();
        assert_eq!(ScalarValue::date(ts).to_string(), "2024-03-15");
        assert_eq!(ScalarValue::from(ts).to_string(), "2024-03-15T10:30:00");
        assert_eq!(ScalarValue::from(2.5f64).to_string(), "2.5");
        assert_eq!(ScalarValue::enumeration(3).to_string(), "3");
    }

    #[test]
    fn test_convert_to() {
        let value = ScalarValue::from(42i32);
        assert_eq!(value.convert_to(TypeTag::Int64).unwrap().as_i64().unwrap(), 42);
        assert!(value.convert_to(TypeTag::Json).is_err());
    }
}
