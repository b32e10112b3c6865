//! Date and time strategies
//!
//! Temporal kinds are comparable but not combinable. Date-tagged values
//! keep their stored ticks; the time of day is dropped whenever a Date is
//! read, compared or rendered.

use std::cmp::Ordering;

use super::{TypeStrategy, cannot_convert};
use crate::temporal::{OffsetTimestamp, TimeOfDay, Timestamp};
use crate::{ScalarValue, TypeTag, ValueResult};

fn parse_char<T>(
    strategy: &impl TypeStrategy<Native = T>,
    value: &ScalarValue,
) -> Option<ValueResult<T>> {
    match *value {
        ScalarValue::Char(c) => Some(strategy.parse(c.encode_utf8(&mut [0; 4]))),
        _ => None,
    }
}

/// Date and time of day
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeStrategy;

impl TypeStrategy for DateTimeStrategy {
    type Native = Timestamp;

    const TAG: TypeTag = TypeTag::DateTime;

    fn compare(&self, a: Timestamp, b: Timestamp) -> Ordering {
        a.cmp(&b)
    }

    fn render(&self, value: Timestamp) -> String {
        value.to_string()
    }

    fn parse(&self, text: &str) -> ValueResult<Timestamp> {
        Timestamp::parse(text)
    }

    fn convert(&self, value: &ScalarValue) -> ValueResult<Timestamp> {
        match *value {
            ScalarValue::DateTime(v) => Ok(v),
            ScalarValue::Date(v) => Ok(v.date()),
            ScalarValue::DateTimeOffset(v) => v.to_utc(),
            _ => parse_char(self, value)
                .unwrap_or_else(|| Err(cannot_convert(Self::TAG, value.tag(), value))),
        }
    }

    fn wrap(&self, value: Timestamp) -> ScalarValue {
        ScalarValue::DateTime(value)
    }

    fn extract(&self, value: &ScalarValue) -> Option<Timestamp> {
        match *value {
            ScalarValue::DateTime(v) => Some(v),
            _ => None,
        }
    }
}

/// Calendar date
///
/// Shares the `Timestamp` payload with DateTime; comparisons and rendering
/// ignore the time of day.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateStrategy;

impl TypeStrategy for DateStrategy {
    type Native = Timestamp;

    const TAG: TypeTag = TypeTag::Date;

    fn compare(&self, a: Timestamp, b: Timestamp) -> Ordering {
        a.date().cmp(&b.date())
    }

    fn render(&self, value: Timestamp) -> String {
        value.date_string()
    }

    fn parse(&self, text: &str) -> ValueResult<Timestamp> {
        Timestamp::parse_date(text)
    }

    fn convert(&self, value: &ScalarValue) -> ValueResult<Timestamp> {
        match *value {
            ScalarValue::DateTime(v) | ScalarValue::Date(v) => Ok(v.date()),
            ScalarValue::DateTimeOffset(v) => Ok(v.local().date()),
            _ => parse_char(self, value)
                .unwrap_or_else(|| Err(cannot_convert(Self::TAG, value.tag(), value))),
        }
    }

    fn wrap(&self, value: Timestamp) -> ScalarValue {
        ScalarValue::Date(value)
    }

    fn extract(&self, value: &ScalarValue) -> Option<Timestamp> {
        match *value {
            ScalarValue::Date(v) => Some(v.date()),
            _ => None,
        }
    }
}

/// Time of day
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeStrategy;

impl TypeStrategy for TimeStrategy {
    type Native = TimeOfDay;

    const TAG: TypeTag = TypeTag::Time;

    fn compare(&self, a: TimeOfDay, b: TimeOfDay) -> Ordering {
        a.cmp(&b)
    }

    fn render(&self, value: TimeOfDay) -> String {
        value.to_string()
    }

    fn parse(&self, text: &str) -> ValueResult<TimeOfDay> {
        TimeOfDay::parse(text)
    }

    fn convert(&self, value: &ScalarValue) -> ValueResult<TimeOfDay> {
        match *value {
            ScalarValue::Time(v) => Ok(v),
            ScalarValue::DateTime(v) => Ok(v.time_of_day()),
            ScalarValue::DateTimeOffset(v) => Ok(v.local().time_of_day()),
            _ => parse_char(self, value)
                .unwrap_or_else(|| Err(cannot_convert(Self::TAG, value.tag(), value))),
        }
    }

    fn wrap(&self, value: TimeOfDay) -> ScalarValue {
        ScalarValue::Time(value)
    }

    fn extract(&self, value: &ScalarValue) -> Option<TimeOfDay> {
        match *value {
            ScalarValue::Time(v) => Some(v),
            _ => None,
        }
    }
}

/// Date and time with a UTC offset, ordered by instant
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeOffsetStrategy;

impl TypeStrategy for DateTimeOffsetStrategy {
    type Native = OffsetTimestamp;

    const TAG: TypeTag = TypeTag::DateTimeOffset;

    fn compare(&self, a: OffsetTimestamp, b: OffsetTimestamp) -> Ordering {
        a.cmp(&b)
    }

    fn render(&self, value: OffsetTimestamp) -> String {
        value.to_string()
    }

    fn parse(&self, text: &str) -> ValueResult<OffsetTimestamp> {
        OffsetTimestamp::parse(text)
    }

    fn convert(&self, value: &ScalarValue) -> ValueResult<OffsetTimestamp> {
        match *value {
            ScalarValue::DateTimeOffset(v) => Ok(v),
            ScalarValue::DateTime(v) => Ok(OffsetTimestamp::utc(v)),
            ScalarValue::Date(v) => Ok(OffsetTimestamp::utc(v.date())),
            _ => parse_char(self, value)
                .unwrap_or_else(|| Err(cannot_convert(Self::TAG, value.tag(), value))),
        }
    }

    fn wrap(&self, value: OffsetTimestamp) -> ScalarValue {
        ScalarValue::DateTimeOffset(value)
    }

    fn extract(&self, value: &ScalarValue) -> Option<OffsetTimestamp> {
        match *value {
            ScalarValue::DateTimeOffset(v) => Some(v),
            _ => None,
        }
    }
}
