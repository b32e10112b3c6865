//! Strategy table tests
//!
//! Tests compile-time resolution and the tag-keyed dynamic table.

use std::cmp::Ordering;

use pretty_assertions::assert_eq;
use rstest::rstest;
use tessera_types::strategy::{for_tag, resolve};
use tessera_types::{ScalarValue, TimeOfDay, TypeStrategy, TypeTag, ValueError};

#[test]
fn test_typed_resolution() {
    let bytes = resolve::<u8>();
    assert_eq!(bytes.add(250, 10).unwrap(), 4);

    let doubles = resolve::<f64>();
    assert!(doubles.equal(0.1 + 0.2, 0.3));
    assert_eq!(doubles.compare(1.0, 1.000_000_1), Ordering::Equal);

    let times = resolve::<TimeOfDay>();
    let one = TimeOfDay::from_hms(1, 0, 0).unwrap();
    assert!(times.add(one, one).is_err());
}

#[rstest]
#[case(TypeTag::Int32, "41", "41")]
#[case(TypeTag::UInt64, "18446744073709551615", "18446744073709551615")]
#[case(TypeTag::Decimal, "1e3", "1000")]
#[case(TypeTag::Boolean, "off", "false")]
#[case(TypeTag::Char, "z", "z")]
#[case(TypeTag::Date, "2024-06-01", "2024-06-01")]
fn test_dynamic_parse_and_render(#[case] tag: TypeTag, #[case] text: &str, #[case] rendered: &str) {
    let strategy = for_tag(tag).unwrap();
    let value = strategy.parse_scalar(text).unwrap();
    assert_eq!(value.tag(), tag);
    assert_eq!(strategy.render_scalar(&value).unwrap(), rendered);
}

#[test]
fn test_reference_kinds_have_no_strategy() {
    for tag in [TypeTag::String, TypeTag::Binary, TypeTag::Json, TypeTag::Unknown] {
        assert!(for_tag(tag).is_none(), "{tag}");
    }
}

#[test]
fn test_dynamic_operands_are_converted() {
    let doubles = for_tag(TypeTag::Double).unwrap();
    let sum = doubles
        .add_scalars(&ScalarValue::from(1i32), &ScalarValue::from(0.5f64))
        .unwrap();
    assert_eq!(sum, ScalarValue::from(1.5f64));

    let booleans = for_tag(TypeTag::Boolean).unwrap();
    let err = booleans
        .add_scalars(&ScalarValue::from(true), &ScalarValue::from(false))
        .unwrap_err();
    assert!(matches!(err, ValueError::NotCombinable { .. }));
}

#[test]
fn test_failed_parse_names_target() {
    let err = for_tag(TypeTag::Int16).unwrap().parse_scalar("abc").unwrap_err();
    assert!(matches!(err, ValueError::Parse { target: TypeTag::Int16, .. }));
}
