//! Scalar record tests
//!
//! Tests tag-checked accessors, same-tag and promoted comparison, and
//! arithmetic semantics per kind.

use std::cmp::Ordering;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;
use tessera_types::{OffsetTimestamp, ScalarValue, TimeOfDay, Timestamp, TypeTag, ValueError};

// === Accessors ===

#[test]
fn test_accessor_on_wrong_tag_is_invalid_tag() {
    let value = ScalarValue::from(7i32);
    let err = value.as_bool().unwrap_err();
    assert!(matches!(
        err,
        ValueError::InvalidTag {
            expected: TypeTag::Boolean,
            actual: TypeTag::Int32,
        }
    ));
    assert_eq!(value.as_i32().unwrap(), 7);
}

#[test]
fn test_date_truncates_on_read() {
    let stamp = Timestamp::from_ymd_hms(2024, 3, 9, 17, 45, 0).unwrap();
    let value = ScalarValue::date(stamp);
    assert_eq!(value.tag(), TypeTag::Date);
    assert_eq!(
        value.as_date().unwrap(),
        Timestamp::from_ymd_hms(2024, 3, 9, 0, 0, 0).unwrap()
    );
    assert!(value.as_datetime().is_err());
}

#[test]
fn test_decimal_scale_and_sign_round_trip() {
    let decimal: Decimal = "-1234.56789".parse().unwrap();
    let value = ScalarValue::from(decimal);
    let parts = value.decimal_parts().unwrap();
    assert_eq!(parts.scale, 5);
    assert!(parts.negative);
    assert_eq!(parts.to_decimal().unwrap(), decimal);
    assert_eq!(parts.to_decimal().unwrap().scale(), 5);
}

#[test]
fn test_records_are_small_and_copy() {
    fn assert_copy<T: Copy + Send + Sync>() {}
    assert_copy::<ScalarValue>();
    assert!(std::mem::size_of::<ScalarValue>() <= 24);
}

// === Comparison ===

#[rstest]
#[case(ScalarValue::from(2i32), ScalarValue::from(2.0f64))]
#[case(ScalarValue::from(5u8), ScalarValue::from(5i64))]
#[case(ScalarValue::from(1.000001f64), ScalarValue::from(1.000002f64))]
#[case(ScalarValue::from(3i16), ScalarValue::from(Decimal::new(300, 2)))]
fn test_equal_across_tags(#[case] a: ScalarValue, #[case] b: ScalarValue) {
    assert!(a.equals(&b).unwrap());
    assert_eq!(a.compare(&b).unwrap(), Ordering::Equal);
}

#[test]
fn test_float_epsilon_is_absolute() {
    let a = ScalarValue::from(1.0f64);
    assert!(!a.equals(&ScalarValue::from(1.0001f64)).unwrap());
    assert_eq!(a.compare(&ScalarValue::from(1.0001f64)).unwrap(), Ordering::Less);
}

#[test]
fn test_date_compares_by_calendar_day() {
    let morning = ScalarValue::date(Timestamp::from_ymd_hms(2024, 1, 15, 8, 0, 0).unwrap());
    let evening = ScalarValue::date(Timestamp::from_ymd_hms(2024, 1, 15, 20, 0, 0).unwrap());
    assert!(morning.equals(&evening).unwrap());
}

fn stamp(year: i32, month: u32, day: u32, hour: u32) -> Timestamp {
    Timestamp::from_ymd_hms(year, month, day, hour, 0, 0).unwrap()
}

/// Exactly one of `<`, `==`, `>` holds and the two directions mirror each other
fn assert_total(a: &ScalarValue, b: &ScalarValue) {
    let forward = a.compare(b).unwrap();
    let backward = b.compare(a).unwrap();
    assert_eq!(forward, backward.reverse(), "{a:?} vs {b:?}");
    assert_eq!(a.equals(b).unwrap(), forward == Ordering::Equal, "{a:?} vs {b:?}");
    let holding = [a < b, a == b, a > b].iter().filter(|&&h| h).count();
    assert_eq!(holding, 1, "{a:?} vs {b:?}");
}

#[test]
fn test_exactly_one_ordering_holds() {
    let values = [
        ScalarValue::from(-3i32),
        ScalarValue::from(0u16),
        ScalarValue::from(5u8),
        ScalarValue::from(u32::MAX),
        ScalarValue::from(u64::MAX),
        ScalarValue::from(2.5f64),
        ScalarValue::from(f64::NAN),
        ScalarValue::from(f32::NAN),
        ScalarValue::from(Decimal::new(25, 1)),
        ScalarValue::from(i64::MAX),
        ScalarValue::from(true),
        ScalarValue::enumeration(1000),
        ScalarValue::enumeration(-1),
        ScalarValue::date(stamp(2024, 1, 15, 8)),
        ScalarValue::from(stamp(2024, 1, 15, 20)),
        ScalarValue::from(TimeOfDay::from_hms(12, 30, 0).unwrap()),
        ScalarValue::from(OffsetTimestamp::new(stamp(2024, 1, 15, 22), 120).unwrap()),
    ];
    for a in &values {
        for b in &values {
            assert_total(a, b);
        }
    }
}

#[test]
fn test_nan_equals_itself() {
    let nan = ScalarValue::from(f64::NAN);
    assert!(nan.equals(&nan).unwrap());
    assert_eq!(nan.compare(&nan).unwrap(), Ordering::Equal);
    assert!(!nan.equals(&ScalarValue::from(1i32)).unwrap());
}

#[rstest]
#[case(ScalarValue::enumeration(1000), ScalarValue::from(5u8), Ordering::Greater)]
#[case(ScalarValue::enumeration(-1), ScalarValue::from(0u32), Ordering::Less)]
#[case(ScalarValue::enumeration(i64::MAX), ScalarValue::from(u64::MAX), Ordering::Less)]
#[case(ScalarValue::enumeration(3), ScalarValue::from(3.0f32), Ordering::Equal)]
fn test_enum_compares_against_any_numeric(
    #[case] a: ScalarValue,
    #[case] b: ScalarValue,
    #[case] expected: Ordering,
) {
    assert_eq!(a.compare(&b).unwrap(), expected);
    assert_eq!(b.compare(&a).unwrap(), expected.reverse());
}

// === Arithmetic ===

#[test]
fn test_boolean_is_not_combinable() {
    let err = ScalarValue::from(true).add(&ScalarValue::from(true)).unwrap_err();
    assert!(matches!(err, ValueError::NotCombinable { .. }));
    assert!(ScalarValue::from(true).negate().is_err());
}

#[test]
fn test_integer_arithmetic_wraps() {
    let max = ScalarValue::from(i32::MAX);
    let one = ScalarValue::from(1i32);
    assert_eq!(max.add(&one).unwrap().as_i32().unwrap(), i32::MIN);
    assert_eq!(
        ScalarValue::from(i32::MIN).negate().unwrap().as_i32().unwrap(),
        i32::MIN
    );
}

#[test]
fn test_unsigned_negate_overflows() {
    let err = ScalarValue::from(5u32).negate().unwrap_err();
    assert!(matches!(err, ValueError::Overflow { .. }));
}

#[test]
fn test_integer_division_by_zero() {
    let err = ScalarValue::from(1i64).divide(&ScalarValue::from(0i64)).unwrap_err();
    assert!(matches!(err, ValueError::DivisionByZero));
}

#[test]
fn test_mixed_tags_promote_before_arithmetic() {
    let sum = ScalarValue::from(2i32).add(&ScalarValue::from(0.5f64)).unwrap();
    assert_eq!(sum.tag(), TypeTag::Double);
    assert_eq!(sum.as_f64().unwrap(), 2.5);
}

#[test]
fn test_decimal_keeps_scale() {
    let a = ScalarValue::from(Decimal::new(150, 2));
    let b = ScalarValue::from(Decimal::new(25, 2));
    let sum = a.add(&b).unwrap();
    assert_eq!(sum.as_decimal().unwrap(), Decimal::new(175, 2));
    assert_eq!(sum.as_decimal().unwrap().scale(), 2);
}

#[test]
fn test_sign() {
    assert_eq!(ScalarValue::from(-4i16).sign().unwrap(), -1);
    assert_eq!(ScalarValue::from(0u8).sign().unwrap(), 0);
    assert_eq!(ScalarValue::from(Decimal::new(1, 3)).sign().unwrap(), 1);
}

proptest! {
    #[test]
    fn prop_wrapping_add_then_subtract(a in any::<i32>(), b in any::<i32>()) {
        let a = ScalarValue::from(a);
        let b = ScalarValue::from(b);
        let back = a.add(&b).unwrap().subtract(&b).unwrap();
        prop_assert_eq!(back.as_i32().unwrap(), a.as_i32().unwrap());
    }

    #[test]
    fn prop_wrapping_near_max(delta in 0u64..1024) {
        let a = ScalarValue::from(u64::MAX - delta);
        let b = ScalarValue::from(delta + 7);
        let back = a.add(&b).unwrap().subtract(&b).unwrap();
        prop_assert_eq!(back.as_u64().unwrap(), u64::MAX - delta);
    }

    #[test]
    fn prop_comparison_is_antisymmetric(a in scalar_value(), b in scalar_value()) {
        let forward = a.compare(&b);
        let backward = b.compare(&a);
        match (&forward, &backward) {
            (Ok(f), Ok(r)) => prop_assert_eq!(*f, r.reverse(), "{:?} vs {:?}", a, b),
            (Err(_), Err(_)) => {
                // a lone Char must parse as the other kind
                prop_assert!((a.tag() == TypeTag::Char) != (b.tag() == TypeTag::Char));
            }
            _ => prop_assert!(false, "{:?} vs {:?}: {:?} / {:?}", a, b, forward, backward),
        }
        prop_assert_eq!(
            a.equals(&b).ok(),
            forward.ok().map(|ordering| ordering == Ordering::Equal)
        );
    }
}

fn scalar_value() -> impl Strategy<Value = ScalarValue> {
    let stamps = (1900i32..2100, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60)
        .prop_map(|(y, mo, d, h, mi)| Timestamp::from_ymd_hms(y, mo, d, h, mi, 0).unwrap());
    prop_oneof![
        any::<u8>().prop_map(ScalarValue::from),
        any::<i8>().prop_map(ScalarValue::from),
        any::<u16>().prop_map(ScalarValue::from),
        any::<u32>().prop_map(ScalarValue::from),
        any::<u64>().prop_map(ScalarValue::from),
        any::<i16>().prop_map(ScalarValue::from),
        any::<i32>().prop_map(ScalarValue::from),
        any::<i64>().prop_map(ScalarValue::from),
        (any::<i64>(), 0u32..=10).prop_map(|(m, scale)| ScalarValue::from(Decimal::new(m, scale))),
        any::<f64>().prop_map(ScalarValue::from),
        any::<f32>().prop_map(ScalarValue::from),
        Just(ScalarValue::from(f64::NAN)),
        any::<bool>().prop_map(ScalarValue::from),
        proptest::char::range('0', 'z').prop_map(ScalarValue::from),
        any::<i64>().prop_map(ScalarValue::enumeration),
        stamps.clone().prop_map(ScalarValue::from),
        stamps.clone().prop_map(ScalarValue::date),
        (0u32..24, 0u32..60, 0u32..60)
            .prop_map(|(h, m, s)| ScalarValue::from(TimeOfDay::from_hms(h, m, s).unwrap())),
        (stamps, -600i16..=600).prop_map(|(local, offset)| {
            ScalarValue::from(OffsetTimestamp::new(local, offset).unwrap())
        }),
    ]
}
