//! Per-kind operation strategies
//!
//! Every scalar kind has a zero-sized strategy implementing [`TypeStrategy`]
//! over its native payload. Typed call sites pick the strategy at compile
//! time through [`NativeScalar`] and [`resolve`]; dynamic call sites go
//! through the object-safe [`ScalarStrategy`] view and the tag-keyed table
//! in [`registry`].

mod decimal;
mod float;
mod integer;
mod logical;
pub mod registry;
mod temporal;

use std::cmp::Ordering;
use std::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use crate::temporal::{OffsetTimestamp, TimeOfDay, Timestamp};
use crate::{ScalarValue, TypeTag, ValueError, ValueResult, Variant};

pub use decimal::DecimalStrategy;
pub use float::{DoubleStrategy, SingleStrategy};
pub use integer::{
    ByteStrategy, Int16Strategy, Int32Strategy, Int64Strategy, SByteStrategy, UInt16Strategy,
    UInt32Strategy, UInt64Strategy,
};
pub use logical::{BooleanStrategy, CharStrategy, EnumStrategy};
pub use registry::for_tag;
pub use temporal::{DateStrategy, DateTimeOffsetStrategy, DateTimeStrategy, TimeStrategy};

/// Operations over one native payload type
///
/// Arithmetic defaults to `NotCombinable`; kinds that support it override
/// the relevant methods. `compare` is total: exactly one of `<`, `==`, `>`
/// holds for any pair.
pub trait TypeStrategy: Default + Send + Sync + 'static {
    type Native: Copy + fmt::Debug + Send + Sync + 'static;

    const TAG: TypeTag;

    fn add(&self, _a: Self::Native, _b: Self::Native) -> ValueResult<Self::Native> {
        Err(ValueError::not_combinable("add", Self::TAG, Self::TAG))
    }

    fn subtract(&self, _a: Self::Native, _b: Self::Native) -> ValueResult<Self::Native> {
        Err(ValueError::not_combinable("subtract", Self::TAG, Self::TAG))
    }

    fn multiply(&self, _a: Self::Native, _b: Self::Native) -> ValueResult<Self::Native> {
        Err(ValueError::not_combinable("multiply", Self::TAG, Self::TAG))
    }

    fn divide(&self, _a: Self::Native, _b: Self::Native) -> ValueResult<Self::Native> {
        Err(ValueError::not_combinable("divide", Self::TAG, Self::TAG))
    }

    fn negate(&self, _a: Self::Native) -> ValueResult<Self::Native> {
        Err(ValueError::not_combinable("negate", Self::TAG, Self::TAG))
    }

    /// -1, 0 or 1
    fn sign(&self, _a: Self::Native) -> ValueResult<i32> {
        Err(ValueError::not_combinable("sign", Self::TAG, Self::TAG))
    }

    fn compare(&self, a: Self::Native, b: Self::Native) -> Ordering;

    fn equal(&self, a: Self::Native, b: Self::Native) -> bool {
        self.compare(a, b) == Ordering::Equal
    }

    fn greater_than(&self, a: Self::Native, b: Self::Native) -> bool {
        self.compare(a, b) == Ordering::Greater
    }

    fn less_than(&self, a: Self::Native, b: Self::Native) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    fn greater_than_or_equal(&self, a: Self::Native, b: Self::Native) -> bool {
        self.compare(a, b) != Ordering::Less
    }

    fn less_than_or_equal(&self, a: Self::Native, b: Self::Native) -> bool {
        self.compare(a, b) != Ordering::Greater
    }

    /// Canonical text form
    fn render(&self, value: Self::Native) -> String;

    /// Parse the canonical text form
    fn parse(&self, text: &str) -> ValueResult<Self::Native>;

    /// Convert a scalar of any tag into this kind
    fn convert(&self, value: &ScalarValue) -> ValueResult<Self::Native>;

    /// Box the native value into a scalar record carrying `TAG`
    fn wrap(&self, value: Self::Native) -> ScalarValue;

    /// Read the payload of a scalar carrying `TAG`
    fn extract(&self, value: &ScalarValue) -> Option<Self::Native>;

    /// Convert a variant into this kind; text payloads are parsed
    fn try_parse(&self, value: &Variant) -> ValueResult<Self::Native> {
        if let Some(scalar) = value.as_scalar() {
            return self.convert(scalar);
        }
        match value.textual() {
            Some(text) => self.parse(&text),
            None => Err(cannot_convert(Self::TAG, value.tag(), value)),
        }
    }
}

/// Native payload types with a canonical strategy
pub trait NativeScalar: Copy + fmt::Debug + Send + Sync + 'static {
    type Strategy: TypeStrategy<Native = Self>;
}

/// Compile-time strategy selection
pub fn resolve<T: NativeScalar>() -> T::Strategy {
    T::Strategy::default()
}

macro_rules! native_scalar {
    ($($native:ty => $strategy:ty),* $(,)?) => {
        $(
            impl NativeScalar for $native {
                type Strategy = $strategy;
            }
        )*
    };
}

native_scalar! {
    u8 => ByteStrategy,
    i8 => SByteStrategy,
    char => CharStrategy,
    u16 => UInt16Strategy,
    u32 => UInt32Strategy,
    u64 => UInt64Strategy,
    i16 => Int16Strategy,
    i32 => Int32Strategy,
    i64 => Int64Strategy,
    Decimal => DecimalStrategy,
    f64 => DoubleStrategy,
    f32 => SingleStrategy,
    bool => BooleanStrategy,
    Timestamp => DateTimeStrategy,
    TimeOfDay => TimeStrategy,
    OffsetTimestamp => DateTimeOffsetStrategy,
}

/// Object-safe view of a strategy over whole scalar records
///
/// Operands of any tag are first converted into the strategy's kind.
pub trait ScalarStrategy: Send + Sync {
    fn tag(&self) -> TypeTag;
    fn coerce(&self, value: &ScalarValue) -> ValueResult<ScalarValue>;
    fn parse_scalar(&self, text: &str) -> ValueResult<ScalarValue>;
    fn from_variant(&self, value: &Variant) -> ValueResult<ScalarValue>;
    fn compare_scalars(&self, a: &ScalarValue, b: &ScalarValue) -> ValueResult<Ordering>;
    fn equal_scalars(&self, a: &ScalarValue, b: &ScalarValue) -> ValueResult<bool>;
    fn add_scalars(&self, a: &ScalarValue, b: &ScalarValue) -> ValueResult<ScalarValue>;
    fn subtract_scalars(&self, a: &ScalarValue, b: &ScalarValue) -> ValueResult<ScalarValue>;
    fn multiply_scalars(&self, a: &ScalarValue, b: &ScalarValue) -> ValueResult<ScalarValue>;
    fn divide_scalars(&self, a: &ScalarValue, b: &ScalarValue) -> ValueResult<ScalarValue>;
    fn negate_scalar(&self, a: &ScalarValue) -> ValueResult<ScalarValue>;
    fn sign_scalar(&self, a: &ScalarValue) -> ValueResult<i32>;
    fn render_scalar(&self, a: &ScalarValue) -> ValueResult<String>;
}

impl<S: TypeStrategy> ScalarStrategy for S {
    fn tag(&self) -> TypeTag {
        S::TAG
    }

    fn coerce(&self, value: &ScalarValue) -> ValueResult<ScalarValue> {
        self.convert(value).map(|v| self.wrap(v))
    }

    fn parse_scalar(&self, text: &str) -> ValueResult<ScalarValue> {
        self.parse(text).map(|v| self.wrap(v))
    }

    fn from_variant(&self, value: &Variant) -> ValueResult<ScalarValue> {
        self.try_parse(value).map(|v| self.wrap(v))
    }

    fn compare_scalars(&self, a: &ScalarValue, b: &ScalarValue) -> ValueResult<Ordering> {
        Ok(self.compare(self.convert(a)?, self.convert(b)?))
    }

    fn equal_scalars(&self, a: &ScalarValue, b: &ScalarValue) -> ValueResult<bool> {
        Ok(self.equal(self.convert(a)?, self.convert(b)?))
    }

    fn add_scalars(&self, a: &ScalarValue, b: &ScalarValue) -> ValueResult<ScalarValue> {
        let (a, b) = self.operands("add", a, b)?;
        self.add(a, b).map(|v| self.wrap(v))
    }

    fn subtract_scalars(&self, a: &ScalarValue, b: &ScalarValue) -> ValueResult<ScalarValue> {
        let (a, b) = self.operands("subtract", a, b)?;
        self.subtract(a, b).map(|v| self.wrap(v))
    }

    fn multiply_scalars(&self, a: &ScalarValue, b: &ScalarValue) -> ValueResult<ScalarValue> {
        let (a, b) = self.operands("multiply", a, b)?;
        self.multiply(a, b).map(|v| self.wrap(v))
    }

    fn divide_scalars(&self, a: &ScalarValue, b: &ScalarValue) -> ValueResult<ScalarValue> {
        let (a, b) = self.operands("divide", a, b)?;
        self.divide(a, b).map(|v| self.wrap(v))
    }

    fn negate_scalar(&self, a: &ScalarValue) -> ValueResult<ScalarValue> {
        self.negate(self.convert(a)?).map(|v| self.wrap(v))
    }

    fn sign_scalar(&self, a: &ScalarValue) -> ValueResult<i32> {
        self.sign(self.convert(a)?)
    }

    fn render_scalar(&self, a: &ScalarValue) -> ValueResult<String> {
        Ok(self.render(self.convert(a)?))
    }
}

/// Operand conversion shared by the binary operators
trait Operands: TypeStrategy {
    fn operands(
        &self,
        operation: &'static str,
        a: &ScalarValue,
        b: &ScalarValue,
    ) -> ValueResult<(Self::Native, Self::Native)> {
        if !Self::TAG.is_arithmetic() {
            return Err(ValueError::not_combinable(operation, a.tag(), b.tag()));
        }
        Ok((self.convert(a)?, self.convert(b)?))
    }
}

impl<S: TypeStrategy> Operands for S {}

/// Error for a conversion between kinds that have no mapping
pub(crate) fn cannot_convert(
    target: TypeTag,
    source: TypeTag,
    value: &impl fmt::Display,
) -> ValueError {
    ValueError::parse(
        target,
        value.to_string(),
        format!("cannot convert {source} to {target}"),
    )
}

/// Widen any integral scalar (and Boolean) to `i128`; floats and decimals
/// truncate toward zero
pub(crate) fn to_i128(value: &ScalarValue) -> Option<i128> {
    match *value {
        ScalarValue::Byte(v) => Some(v.into()),
        ScalarValue::SByte(v) => Some(v.into()),
        ScalarValue::UInt16(v) => Some(v.into()),
        ScalarValue::UInt32(v) => Some(v.into()),
        ScalarValue::UInt64(v) => Some(v.into()),
        ScalarValue::Int16(v) => Some(v.into()),
        ScalarValue::Int32(v) => Some(v.into()),
        ScalarValue::Int64(v) | ScalarValue::Enum(v) => Some(v.into()),
        ScalarValue::Boolean(v) => Some(v.into()),
        ScalarValue::Decimal(v) => v.trunc().to_i128(),
        ScalarValue::Double(v) if v.is_finite() => v.trunc().to_i128(),
        ScalarValue::Single(v) if v.is_finite() => v.trunc().to_i128(),
        _ => None,
    }
}

pub(crate) fn to_f64(value: &ScalarValue) -> Option<f64> {
    match *value {
        ScalarValue::Double(v) => Some(v),
        ScalarValue::Single(v) => Some(v.into()),
        ScalarValue::Decimal(v) => v.to_f64(),
        _ => to_i128(value).map(|v| v as f64),
    }
}

pub(crate) fn to_decimal(value: &ScalarValue) -> Option<Decimal> {
    match *value {
        ScalarValue::Decimal(v) => Some(v),
        ScalarValue::Double(v) => Decimal::from_f64(v),
        ScalarValue::Single(v) => Decimal::from_f32(v),
        _ => to_i128(value).and_then(|v| Decimal::try_from_i128_with_scale(v, 0).ok()),
    }
}
