//! Variant value tests
//!
//! Tests reference kinds, arrays, cross-kind comparison and conversion.

use std::cmp::Ordering;

use pretty_assertions::assert_eq;
use rstest::rstest;
use rust_decimal::Decimal;
use serde_json::json;
use tessera_types::{DbType, Geometry, NumericFacets, TypeTag, ValueError, Variant};
use uuid::Uuid;

// === Ordering of sequences ===

#[rstest]
#[case(vec![1u8, 2], vec![1u8, 2, 3], Ordering::Less)]
#[case(vec![1u8, 2, 3], vec![1u8, 2, 2], Ordering::Greater)]
#[case(vec![], vec![0u8], Ordering::Less)]
#[case(vec![9u8], vec![9u8], Ordering::Equal)]
fn test_binary_ordering(#[case] a: Vec<u8>, #[case] b: Vec<u8>, #[case] expected: Ordering) {
    let a = Variant::from(a);
    let b = Variant::from(b);
    assert_eq!(a.tag(), TypeTag::Binary);
    assert_eq!(a.compare(&b).unwrap(), expected);
}

#[rstest]
#[case("ab", "abc", Ordering::Less)]
#[case("abc", "abb", Ordering::Greater)]
#[case("xyz", "xyz", Ordering::Equal)]
fn test_char_array_ordering(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
    let a = Variant::char_array(a.chars().collect());
    let b = Variant::char_array(b.chars().collect());
    assert_eq!(a.tag(), TypeTag::CharArray);
    assert_eq!(a.compare(&b).unwrap(), expected);
}

// === Non-comparable kinds ===

#[test]
fn test_json_is_not_comparable() {
    let a = Variant::from(json!({"a": 1}));
    let b = Variant::from(json!({"a": 1}));
    let err = a.equals(&b).unwrap_err();
    assert!(matches!(err, ValueError::NotComparable { tag: TypeTag::Json }));
}

#[test]
fn test_xml_and_objects_are_not_comparable() {
    let xml = Variant::xml("<root><a/></root>").unwrap();
    assert!(xml.compare(&xml.clone()).is_err());

    let object = Variant::object(vec![1, 2, 3]);
    assert_eq!(object.tag(), TypeTag::Object);
    assert!(matches!(
        object.compare(&Variant::object(0u8)),
        Err(ValueError::NotComparable { tag: TypeTag::Object })
    ));
    assert!(object.add(&object.clone()).is_err());
}

#[test]
fn test_malformed_xml_is_rejected() {
    assert!(Variant::xml("<a><b></a>").is_err());
    assert!(Variant::xml("<a/><b/>").is_err());
}

// === Cross-kind comparison ===

#[test]
fn test_numeric_equals_text() {
    assert!(Variant::from(2i32).equals(&Variant::from("2")).unwrap());
    assert!(Variant::from(2i32).equals(&Variant::from(2.0f64)).unwrap());
    assert_eq!(
        Variant::from(10i32).compare(&Variant::from("9")).unwrap(),
        Ordering::Greater
    );
}

#[test]
fn test_numeric_vs_unparsable_text_fails() {
    let err = Variant::from(2i32).compare(&Variant::from("two")).unwrap_err();
    assert!(matches!(err, ValueError::Parse { target: TypeTag::Int32, .. }));
}

#[test]
fn test_guid_compares_with_text() {
    let id = Uuid::parse_str("6f9619ff-8b86-d011-b42d-00c04fc964ff").unwrap();
    let text = Variant::from("6F9619FF-8B86-D011-B42D-00C04FC964FF");
    assert!(Variant::from(id).equals(&text).unwrap());
}

#[test]
fn test_geometry_equality_is_coordinate_equality() {
    let a: Geometry = "POINT (1 2)".parse().unwrap();
    let b: Geometry = "SRID=4326;POINT (1 2)".parse().unwrap();
    assert!(Variant::from(a).equals(&Variant::from(b)).unwrap());
}

#[test]
fn test_nan_equality_agrees_with_scalars() {
    let nan = Variant::from(f64::NAN);
    assert!(nan.equals(&nan).unwrap());
    assert_eq!(
        nan.as_scalar().unwrap().equals(nan.as_scalar().unwrap()).unwrap(),
        nan.equals(&nan).unwrap()
    );
}

#[test]
fn test_null_sorts_first() {
    assert_eq!(
        Variant::null().compare(&Variant::from(0i32)).unwrap(),
        Ordering::Less
    );
    assert!(Variant::null().equals(&Variant::null()).unwrap());
}

// === Arithmetic ===

#[test]
fn test_binary_operators_require_same_numeric_tag() {
    let sum = Variant::from(2i32).add(&Variant::from(3i32)).unwrap();
    assert_eq!(sum.as_i32().unwrap(), 5);

    let err = Variant::from(2i32).add(&Variant::from(3i64)).unwrap_err();
    assert!(matches!(err, ValueError::NotCombinable { .. }));
    assert!(Variant::from("a").add(&Variant::from("b")).is_err());
}

// === Arrays ===

#[test]
fn test_array_rank_and_ordering() {
    let short = Variant::array(TypeTag::Int32, vec![1i32.into(), 2i32.into()]).unwrap();
    let long = Variant::array(TypeTag::Int32, vec![1i32.into(), 2i32.into(), 3i32.into()]).unwrap();
    assert_eq!(short.rank(), 1);
    assert!(short.is_array());
    assert_eq!(short.compare(&long).unwrap(), Ordering::Less);
    assert!(short.compare(&Variant::from(1i32)).is_err());
}

#[test]
fn test_array_rejects_mixed_elements() {
    let err = Variant::array(TypeTag::Int32, vec![1i32.into(), "x".into()]).unwrap_err();
    assert!(matches!(err, ValueError::InvalidTag { .. }));
}

// === Conversion ===

#[rstest]
#[case(Variant::from("42"), TypeTag::Int64, "42")]
#[case(Variant::from(42i64), TypeTag::String, "42")]
#[case(Variant::from("0x0A0B"), TypeTag::Binary, "0x0A0B")]
#[case(Variant::from("yes"), TypeTag::Boolean, "true")]
#[case(Variant::from("POINT (3 4)"), TypeTag::Geometry, "POINT (3 4)")]
fn test_convert_to(#[case] value: Variant, #[case] tag: TypeTag, #[case] rendered: &str) {
    let converted = value.convert_to(tag).unwrap();
    assert_eq!(converted.tag(), tag);
    assert_eq!(converted.to_string(), rendered);
}

#[test]
fn test_dynamic_construction() {
    let value = Variant::from_dynamic(TypeTag::Decimal, "12.50").unwrap();
    assert_eq!(value.as_decimal().unwrap(), Decimal::new(1250, 2));
    assert!(Variant::from_dynamic(TypeTag::Int16, "70000").is_err());
}

#[test]
fn test_accessor_mismatch_never_defaults() {
    let value = Variant::from("text");
    assert!(matches!(
        value.as_binary(),
        Err(ValueError::InvalidTag { expected: TypeTag::Binary, actual: TypeTag::String })
    ));
    assert!(value.as_i32().is_err());
}

// === Relational mapping ===

#[test]
fn test_db_type_reports_decimal_facets() {
    let (db, facets) = Variant::from(Decimal::new(-12345, 3)).db_type();
    assert_eq!(db, DbType::Decimal);
    assert_eq!(facets, Some(NumericFacets { precision: 5, scale: 3 }));

    let (db, facets) = Variant::from(1.5f64).with_facets(10, 2).db_type();
    assert_eq!(db, DbType::Double);
    assert_eq!(facets, Some(NumericFacets { precision: 10, scale: 2 }));
}
