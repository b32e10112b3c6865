//! Variant value
//!
//! `Variant` extends [`ScalarValue`] with reference payloads (text, binary,
//! char arrays, GUIDs, JSON, XML, geometry, opaque objects and nodes) and
//! arrays of any rank, keeping the same comparison and arithmetic contract
//! across the full kind set.

use std::any::Any;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::codec;
use crate::db_type::{DbType, db_type_of};
use crate::decimal::DecimalParts;
use crate::geometry::Geometry;
use crate::promotion::best_compare_type;
use crate::strategy::cannot_convert;
use crate::temporal::{OffsetTimestamp, TimeOfDay, Timestamp};
use crate::{ScalarValue, TypeTag, ValueError, ValueResult};

/// Precision and scale carried alongside a value for relational mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct NumericFacets {
    pub precision: u8,
    pub scale: u8,
}

/// A well-formed XML document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct XmlDocument(String);

impl XmlDocument {
    pub fn parse(text: impl Into<String>) -> ValueResult<Self> {
        let text = text.into();
        codec::check_xml(&text)?;
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for XmlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shared handle to a host object the value core does not interpret
#[derive(Clone)]
pub struct Opaque {
    type_name: &'static str,
    value: Arc<dyn Any + Send + Sync>,
}

impl Opaque {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            value: Arc::new(value),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref()
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Opaque")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Storage behind a variant
#[derive(Debug, Clone, Default)]
pub enum Payload {
    #[default]
    Unknown,
    Scalar(ScalarValue),
    String(String),
    Text(String),
    Binary(Vec<u8>),
    CharArray(Vec<char>),
    Guid(Uuid),
    Json(serde_json::Value),
    Xml(XmlDocument),
    Geometry(Geometry),
    Object(Opaque),
    Node(Opaque),
    /// Items of an array of rank >= 1; every non-null item carries `element`
    Array {
        element: TypeTag,
        items: Vec<Variant>,
    },
}

/// A value of any kind
#[derive(Debug, Clone, Default)]
pub struct Variant {
    payload: Payload,
    rank: u8,
    facets: Option<NumericFacets>,
}

macro_rules! scalar_accessors {
    ($($name:ident -> $native:ty : $tag:ident),* $(,)?) => {
        $(
            pub fn $name(&self) -> ValueResult<$native> {
                self.scalar_of(TypeTag::$tag)?.$name()
            }
        )*
    };
}

macro_rules! reference_accessor {
    ($name:ident -> $ret:ty : $variant:ident) => {
        pub fn $name(&self) -> ValueResult<$ret> {
            match &self.payload {
                Payload::$variant(value) => Ok(value),
                _ => Err(ValueError::invalid_tag(TypeTag::$variant, self.tag())),
            }
        }
    };
}

impl Variant {
    /// The null/unknown value
    pub fn null() -> Self {
        Self::default()
    }

    fn from_payload(payload: Payload) -> Self {
        Self {
            payload,
            rank: 0,
            facets: None,
        }
    }

    /// Long-form text
    pub fn text(value: impl Into<String>) -> Self {
        Self::from_payload(Payload::Text(value.into()))
    }

    pub fn char_array(value: Vec<char>) -> Self {
        Self::from_payload(Payload::CharArray(value))
    }

    pub fn date(value: Timestamp) -> Self {
        ScalarValue::date(value).into()
    }

    pub fn enumeration(value: i64) -> Self {
        ScalarValue::enumeration(value).into()
    }

    /// Parse and wrap an XML document
    pub fn xml(text: impl Into<String>) -> ValueResult<Self> {
        XmlDocument::parse(text).map(|doc| Self::from_payload(Payload::Xml(doc)))
    }

    pub fn object<T: Any + Send + Sync>(value: T) -> Self {
        Self::from_payload(Payload::Object(Opaque::new(value)))
    }

    pub fn node<T: Any + Send + Sync>(value: T) -> Self {
        Self::from_payload(Payload::Node(Opaque::new(value)))
    }

    /// Build an array of `element` values
    ///
    /// Items must all carry `element` and share one rank; null items are
    /// allowed anywhere. The array's rank is one more than its items'.
    pub fn array(element: TypeTag, items: Vec<Variant>) -> ValueResult<Self> {
        let item_rank = items
            .iter()
            .find(|item| !item.is_null())
            .map_or(0, |item| item.rank);
        if let Some(bad) = items
            .iter()
            .find(|item| !item.is_null() && (item.tag() != element || item.rank != item_rank))
        {
            return Err(ValueError::invalid_tag(element, bad.tag()));
        }
        let rank = item_rank
            .checked_add(1)
            .ok_or_else(|| ValueError::overflow("array rank"))?;
        Ok(Self {
            payload: Payload::Array { element, items },
            rank,
            facets: None,
        })
    }

    /// Build a value of `tag` from any value, converting or parsing as needed
    pub fn from_dynamic(tag: TypeTag, value: impl Into<Variant>) -> ValueResult<Self> {
        value.into().convert_to(tag)
    }

    /// Attach precision and scale
    pub fn with_facets(mut self, precision: u8, scale: u8) -> Self {
        self.facets = Some(NumericFacets { precision, scale });
        self
    }

    /// Active type tag; the element tag for arrays
    pub fn tag(&self) -> TypeTag {
        match &self.payload {
            Payload::Unknown => TypeTag::Unknown,
            Payload::Scalar(value) => value.tag(),
            Payload::String(_) => TypeTag::String,
            Payload::Text(_) => TypeTag::Text,
            Payload::Binary(_) => TypeTag::Binary,
            Payload::CharArray(_) => TypeTag::CharArray,
            Payload::Guid(_) => TypeTag::Guid,
            Payload::Json(_) => TypeTag::Json,
            Payload::Xml(_) => TypeTag::Xml,
            Payload::Geometry(_) => TypeTag::Geometry,
            Payload::Object(_) => TypeTag::Object,
            Payload::Node(_) => TypeTag::Node,
            Payload::Array { element, .. } => *element,
        }
    }

    /// Array dimensionality, 0 for non-arrays
    pub fn rank(&self) -> u8 {
        self.rank
    }

    pub fn facets(&self) -> Option<NumericFacets> {
        self.facets
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn is_null(&self) -> bool {
        matches!(self.payload, Payload::Unknown)
    }

    pub fn is_array(&self) -> bool {
        self.rank > 0
    }

    /// The scalar record, if this is a non-array scalar value
    pub fn as_scalar(&self) -> Option<&ScalarValue> {
        match &self.payload {
            Payload::Scalar(value) if self.rank == 0 => Some(value),
            _ => None,
        }
    }

    /// Text of a String, Text or CharArray value
    pub fn textual(&self) -> Option<Cow<'_, str>> {
        match &self.payload {
            Payload::String(s) | Payload::Text(s) => Some(Cow::Borrowed(s.as_str())),
            Payload::CharArray(chars) => Some(Cow::Owned(chars.iter().collect())),
            _ => None,
        }
    }

    fn scalar_of(&self, expected: TypeTag) -> ValueResult<&ScalarValue> {
        self.as_scalar()
            .ok_or_else(|| ValueError::invalid_tag(expected, self.tag()))
    }

    scalar_accessors! {
        as_byte -> u8 : Byte,
        as_sbyte -> i8 : SByte,
        as_char -> char : Char,
        as_u16 -> u16 : UInt16,
        as_u32 -> u32 : UInt32,
        as_u64 -> u64 : UInt64,
        as_i16 -> i16 : Int16,
        as_i32 -> i32 : Int32,
        as_i64 -> i64 : Int64,
        as_decimal -> rust_decimal::Decimal : Decimal,
        as_f64 -> f64 : Double,
        as_f32 -> f32 : Single,
        as_bool -> bool : Boolean,
        as_datetime -> Timestamp : DateTime,
        as_date -> Timestamp : Date,
        as_time -> TimeOfDay : Time,
        as_datetime_offset -> OffsetTimestamp : DateTimeOffset,
        as_enum -> i64 : Enum,
        decimal_parts -> DecimalParts : Decimal,
    }

    reference_accessor!(as_json -> &serde_json::Value : Json);
    reference_accessor!(as_xml -> &XmlDocument : Xml);
    reference_accessor!(as_geometry -> &Geometry : Geometry);
    reference_accessor!(as_object -> &Opaque : Object);
    reference_accessor!(as_node -> &Opaque : Node);

    pub fn as_string(&self) -> ValueResult<&str> {
        match &self.payload {
            Payload::String(s) => Ok(s.as_str()),
            _ => Err(ValueError::invalid_tag(TypeTag::String, self.tag())),
        }
    }

    pub fn as_text(&self) -> ValueResult<&str> {
        match &self.payload {
            Payload::Text(s) => Ok(s.as_str()),
            _ => Err(ValueError::invalid_tag(TypeTag::Text, self.tag())),
        }
    }

    pub fn as_binary(&self) -> ValueResult<&[u8]> {
        match &self.payload {
            Payload::Binary(bytes) => Ok(bytes.as_slice()),
            _ => Err(ValueError::invalid_tag(TypeTag::Binary, self.tag())),
        }
    }

    pub fn as_char_array(&self) -> ValueResult<&[char]> {
        match &self.payload {
            Payload::CharArray(chars) => Ok(chars.as_slice()),
            _ => Err(ValueError::invalid_tag(TypeTag::CharArray, self.tag())),
        }
    }

    pub fn as_guid(&self) -> ValueResult<Uuid> {
        match &self.payload {
            Payload::Guid(id) => Ok(*id),
            _ => Err(ValueError::invalid_tag(TypeTag::Guid, self.tag())),
        }
    }

    /// Items of an array value
    pub fn as_array(&self) -> ValueResult<&[Variant]> {
        match &self.payload {
            Payload::Array { items, .. } => Ok(items.as_slice()),
            _ => Err(ValueError::invalid_tag(self.tag(), self.tag())),
        }
    }

    /// Convert to another tag, keeping the rank
    ///
    /// Null stays null. Text payloads are parsed with the target kind's
    /// canonical parser; any value converts to String, Text or CharArray
    /// through its canonical text form.
    pub fn convert_to(&self, tag: TypeTag) -> ValueResult<Variant> {
        if self.is_null() || tag == TypeTag::Unknown {
            return Ok(Self::null());
        }
        if let Payload::Array { items, .. } = &self.payload {
            let items = items
                .iter()
                .map(|item| item.convert_to(tag))
                .collect::<ValueResult<Vec<_>>>()?;
            return Self::array(tag, items);
        }
        if tag == self.tag() {
            return Ok(self.clone());
        }
        if tag.is_scalar() {
            return ScalarValue::from_dynamic(tag, self.clone()).map(Self::from);
        }

        let payload = match tag {
            TypeTag::String => Payload::String(self.to_string()),
            TypeTag::Text => Payload::Text(self.to_string()),
            TypeTag::CharArray => Payload::CharArray(self.to_string().chars().collect()),
            TypeTag::Binary => match (&self.payload, self.textual()) {
                (Payload::Guid(id), _) => Payload::Binary(id.as_bytes().to_vec()),
                (_, Some(text)) => Payload::Binary(codec::parse_hex(&text)?),
                _ => return Err(cannot_convert(tag, self.tag(), self)),
            },
            TypeTag::Guid => match (&self.payload, self.textual()) {
                (Payload::Binary(bytes), _) => Payload::Guid(
                    Uuid::from_slice(bytes).map_err(|e| ValueError::parse(tag, self.to_string(), e))?,
                ),
                (_, Some(text)) => Payload::Guid(
                    Uuid::parse_str(text.trim()).map_err(|e| ValueError::parse(tag, &*text, e))?,
                ),
                _ => return Err(cannot_convert(tag, self.tag(), self)),
            },
            TypeTag::Json => match self.textual() {
                Some(text) => Payload::Json(codec::parse_json(&text)?),
                None => return Err(cannot_convert(tag, self.tag(), self)),
            },
            TypeTag::Xml => match self.textual() {
                Some(text) => Payload::Xml(XmlDocument::parse(text.into_owned())?),
                None => return Err(cannot_convert(tag, self.tag(), self)),
            },
            TypeTag::Geometry => match self.textual() {
                Some(text) => Payload::Geometry(Geometry::parse_wkt(&text)?),
                None => return Err(cannot_convert(tag, self.tag(), self)),
            },
            _ => return Err(cannot_convert(tag, self.tag(), self)),
        };
        Ok(Self::from_payload(payload))
    }

    /// Total comparison
    ///
    /// Unknown equals Unknown and sorts first. Json, Xml, Object and Node
    /// are never comparable. Differing tags are promoted with
    /// [`best_compare_type`] and both sides converted before comparing.
    pub fn compare(&self, other: &Variant) -> ValueResult<Ordering> {
        for tag in [self.tag(), other.tag()] {
            if !tag.is_comparable() {
                return Err(ValueError::not_comparable(tag));
            }
        }
        match (self.is_null(), other.is_null()) {
            (true, true) => return Ok(Ordering::Equal),
            (true, false) => return Ok(Ordering::Less),
            (false, true) => return Ok(Ordering::Greater),
            (false, false) => {}
        }
        if self.rank != other.rank {
            return Err(ValueError::not_comparable(if self.is_array() {
                self.tag()
            } else {
                other.tag()
            }));
        }

        if let (Some(a), Some(b)) = (self.as_scalar(), other.as_scalar()) {
            return a.compare(b);
        }
        if self.tag() == other.tag() {
            return self.compare_same_tag(other);
        }

        let target = best_compare_type(self.tag(), other.tag());
        let left = self.convert_to(target)?;
        let right = other.convert_to(target)?;
        left.compare_same_tag(&right)
    }

    fn compare_same_tag(&self, other: &Variant) -> ValueResult<Ordering> {
        let ordering = match (&self.payload, &other.payload) {
            (Payload::Scalar(a), Payload::Scalar(b)) => return a.compare(b),
            (Payload::String(a), Payload::String(b))
            | (Payload::Text(a), Payload::Text(b))
            | (Payload::String(a), Payload::Text(b))
            | (Payload::Text(a), Payload::String(b)) => a.cmp(b),
            (Payload::Binary(a), Payload::Binary(b)) => a.cmp(b),
            (Payload::CharArray(a), Payload::CharArray(b)) => a.cmp(b),
            (Payload::Guid(a), Payload::Guid(b)) => a.cmp(b),
            (Payload::Geometry(a), Payload::Geometry(b)) => a.cmp(b),
            (Payload::Array { items: a, .. }, Payload::Array { items: b, .. }) => {
                return compare_items(a, b);
            }
            _ => return Err(ValueError::not_comparable(self.tag())),
        };
        Ok(ordering)
    }

    /// Equality under the rules of [`compare`](Self::compare)
    pub fn equals(&self, other: &Variant) -> ValueResult<bool> {
        self.compare(other).map(|ordering| ordering == Ordering::Equal)
    }

    pub fn add(&self, other: &Variant) -> ValueResult<Variant> {
        self.combine(other, "add", ScalarValue::add)
    }

    pub fn subtract(&self, other: &Variant) -> ValueResult<Variant> {
        self.combine(other, "subtract", ScalarValue::subtract)
    }

    pub fn multiply(&self, other: &Variant) -> ValueResult<Variant> {
        self.combine(other, "multiply", ScalarValue::multiply)
    }

    pub fn divide(&self, other: &Variant) -> ValueResult<Variant> {
        self.combine(other, "divide", ScalarValue::divide)
    }

    pub fn negate(&self) -> ValueResult<Variant> {
        self.scalar_operand("negate")?.negate().map(Self::from)
    }

    /// -1, 0 or 1
    pub fn sign(&self) -> ValueResult<i32> {
        self.scalar_operand("sign")?.sign()
    }

    /// Binary operators require the same numeric tag on both sides
    fn combine(
        &self,
        other: &Variant,
        operation: &'static str,
        op: fn(&ScalarValue, &ScalarValue) -> ValueResult<ScalarValue>,
    ) -> ValueResult<Variant> {
        match (self.as_scalar(), other.as_scalar()) {
            (Some(a), Some(b)) if a.tag() == b.tag() && a.tag().is_numeric() => {
                op(a, b).map(Self::from)
            }
            _ => Err(ValueError::not_combinable(operation, self.tag(), other.tag())),
        }
    }

    fn scalar_operand(&self, operation: &'static str) -> ValueResult<&ScalarValue> {
        match self.as_scalar() {
            Some(value) if value.tag().is_numeric() => Ok(value),
            _ => Err(ValueError::not_combinable(operation, self.tag(), self.tag())),
        }
    }

    /// Relational parameter type and facets
    ///
    /// Decimals without explicit facets report the precision and scale of
    /// their own value.
    pub fn db_type(&self) -> (DbType, Option<NumericFacets>) {
        let facets = self.facets.or_else(|| {
            let parts = self.decimal_parts().ok()?;
            Some(NumericFacets {
                precision: u8::try_from(parts.precision()).ok()?,
                scale: u8::try_from(parts.scale).ok()?,
            })
        });
        (db_type_of(self.tag()), facets)
    }
}

fn compare_items(a: &[Variant], b: &[Variant]) -> ValueResult<Ordering> {
    for (x, y) in a.iter().zip(b) {
        let ordering = x.compare(y)?;
        if ordering != Ordering::Equal {
            return Ok(ordering);
        }
    }
    Ok(a.len().cmp(&b.len()))
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            Payload::Unknown => f.write_str("null"),
            Payload::Scalar(value) => write!(f, "{value}"),
            Payload::String(s) | Payload::Text(s) => f.write_str(s),
            Payload::Binary(bytes) => f.write_str(&codec::to_hex(bytes)),
            Payload::CharArray(chars) => chars.iter().try_for_each(|c| write!(f, "{c}")),
            Payload::Guid(id) => write!(f, "{id}"),
            Payload::Json(value) => write!(f, "{value}"),
            Payload::Xml(doc) => write!(f, "{doc}"),
            Payload::Geometry(geometry) => write!(f, "{geometry}"),
            Payload::Object(opaque) | Payload::Node(opaque) => {
                write!(f, "<{}>", opaque.type_name())
            }
            Payload::Array { items, .. } => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl PartialEq for Variant {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other).unwrap_or(false)
    }
}

impl PartialOrd for Variant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other).ok()
    }
}

impl From<ScalarValue> for Variant {
    fn from(value: ScalarValue) -> Self {
        Self::from_payload(Payload::Scalar(value))
    }
}

macro_rules! from_scalar_native {
    ($($native:ty),* $(,)?) => {
        $(
            impl From<$native> for Variant {
                fn from(value: $native) -> Self {
                    ScalarValue::from(value).into()
                }
            }
        )*
    };
}

from_scalar_native!(
    u8,
    i8,
    char,
    u16,
    u32,
    u64,
    i16,
    i32,
    i64,
    rust_decimal::Decimal,
    f64,
    f32,
    bool,
    Timestamp,
    TimeOfDay,
    OffsetTimestamp,
);

impl From<String> for Variant {
    fn from(value: String) -> Self {
        Self::from_payload(Payload::String(value))
    }
}

impl From<&str> for Variant {
    fn from(value: &str) -> Self {
        Self::from_payload(Payload::String(value.to_string()))
    }
}

impl From<Vec<u8>> for Variant {
    fn from(value: Vec<u8>) -> Self {
        Self::from_payload(Payload::Binary(value))
    }
}

impl From<&[u8]> for Variant {
    fn from(value: &[u8]) -> Self {
        Self::from_payload(Payload::Binary(value.to_vec()))
    }
}

impl From<Vec<char>> for Variant {
    fn from(value: Vec<char>) -> Self {
        Self::char_array(value)
    }
}

impl From<Uuid> for Variant {
    fn from(value: Uuid) -> Self {
        Self::from_payload(Payload::Guid(value))
    }
}

impl From<serde_json::Value> for Variant {
    fn from(value: serde_json::Value) -> Self {
        Self::from_payload(Payload::Json(value))
    }
}

impl From<XmlDocument> for Variant {
    fn from(value: XmlDocument) -> Self {
        Self::from_payload(Payload::Xml(value))
    }
}

impl From<Geometry> for Variant {
    fn from(value: Geometry) -> Self {
        Self::from_payload(Payload::Geometry(value))
    }
}

impl<T: Into<Variant>> From<Option<T>> for Variant {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Self::null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Variant>();
    }

    #[test]
    fn test_null_sorts_first() {
        assert_eq!(Variant::null().compare(&Variant::null()).unwrap(), Ordering::Equal);
        assert_eq!(Variant::null().compare(&Variant::from(i32::MIN)).unwrap(), Ordering::Less);
        assert_eq!(Variant::from("").compare(&Variant::null()).unwrap(), Ordering::Greater);
    }

    #[test]
    fn test_opaque_round_trip() {
        let value = Variant::object(vec![1, 2, 3]);
        assert_eq!(value.tag(), TypeTag::Object);
        let inner = value.as_object().unwrap().downcast_ref::<Vec<i32>>().unwrap();
        assert_eq!(inner, &vec![1, 2, 3]);
        assert!(matches!(
            value.compare(&value),
            Err(ValueError::NotComparable { tag: TypeTag::Object })
        ));
    }

    #[test]
    fn test_text_conversions() {
        let guid = Variant::from_dynamic(TypeTag::Guid, "67e55044-10b1-426f-9247-bb680e5fe0c8")
            .unwrap();
        assert_eq!(guid.tag(), TypeTag::Guid);
        let binary = guid.convert_to(TypeTag::Binary).unwrap();
        assert_eq!(binary.as_binary().unwrap().len(), 16);
        assert_eq!(binary.convert_to(TypeTag::Guid).unwrap(), guid);

        let text = Variant::from(42i32).convert_to(TypeTag::Text).unwrap();
        assert_eq!(text.as_text().unwrap(), "42");
    }

    #[test]
    fn test_decimal_facets_are_derived() {
        let value = Variant::from(rust_decimal::Decimal::new(12345, 2));
        let (db_type, facets) = value.db_type();
        assert_eq!(db_type, DbType::Decimal);
        assert_eq!(facets, Some(NumericFacets { precision: 5, scale: 2 }));
        let explicit = value.with_facets(18, 4);
        assert_eq!(explicit.facets(), Some(NumericFacets { precision: 18, scale: 4 }));
    }
}
