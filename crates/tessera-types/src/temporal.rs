//! Tick-based date/time payloads
//!
//! All temporal kinds are stored as tick counts: 100-nanosecond units since
//! 0001-01-01T00:00:00. This keeps every temporal payload a single `i64`
//! (plus an offset for `OffsetTimestamp`) so it fits the scalar record.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::codec;
use crate::{TypeTag, ValueError, ValueResult};

pub const TICKS_PER_SECOND: i64 = 10_000_000;
pub const TICKS_PER_MINUTE: i64 = 60 * TICKS_PER_SECOND;
pub const TICKS_PER_DAY: i64 = 86_400 * TICKS_PER_SECOND;

/// Ticks of 9999-12-31T23:59:59.9999999
const MAX_TICKS: i64 = 3_155_378_975_999_999_999;

/// Offsets are limited to ±14 hours
const MAX_OFFSET_MINUTES: i16 = 14 * 60;

fn epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .unwrap_or_default()
        .and_time(NaiveTime::MIN)
}

/// Write `.fffffff` with trailing zeros removed, or nothing for whole seconds
fn write_fraction(f: &mut fmt::Formatter<'_>, sub_second_ticks: i64) -> fmt::Result {
    if sub_second_ticks == 0 {
        return Ok(());
    }
    let digits = format!("{:07}", sub_second_ticks);
    write!(f, ".{}", digits.trim_end_matches('0'))
}

/// A date and time of day without offset
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Timestamp {
    ticks: i64,
}

impl Timestamp {
    pub const MIN: Self = Self { ticks: 0 };
    pub const MAX: Self = Self { ticks: MAX_TICKS };

    /// Create from a raw tick count
    pub fn from_ticks(ticks: i64) -> ValueResult<Self> {
        if !(0..=MAX_TICKS).contains(&ticks) {
            return Err(ValueError::overflow(format!("DateTime ticks {ticks}")));
        }
        Ok(Self { ticks })
    }

    /// Get the raw tick count
    pub const fn ticks(&self) -> i64 {
        self.ticks
    }

    /// Convert from a chrono date/time
    pub fn from_naive(value: NaiveDateTime) -> ValueResult<Self> {
        let delta = value.signed_duration_since(epoch());
        let ticks = delta
            .num_seconds()
            .checked_mul(TICKS_PER_SECOND)
            .and_then(|t| t.checked_add(i64::from(delta.subsec_nanos()) / 100))
            .ok_or_else(|| ValueError::overflow(format!("DateTime {value}")))?;
        Self::from_ticks(ticks)
    }

    /// Convert from a chrono date at midnight
    pub fn from_date(value: NaiveDate) -> ValueResult<Self> {
        Self::from_naive(value.and_time(NaiveTime::MIN))
    }

    /// Create from calendar components
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> ValueResult<Self> {
        let naive = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, second))
            .ok_or_else(|| {
                ValueError::parse(
                    TypeTag::DateTime,
                    format!("{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}"),
                    "component out of range",
                )
            })?;
        Self::from_naive(naive)
    }

    /// Convert to a chrono date/time
    pub fn to_naive(&self) -> NaiveDateTime {
        let delta = TimeDelta::seconds(self.ticks / TICKS_PER_SECOND)
            + TimeDelta::nanoseconds((self.ticks % TICKS_PER_SECOND) * 100);
        epoch()
            .checked_add_signed(delta)
            .unwrap_or(NaiveDateTime::MAX)
    }

    /// Truncate the time of day
    pub const fn date(&self) -> Self {
        Self {
            ticks: self.ticks - self.ticks % TICKS_PER_DAY,
        }
    }

    /// Extract the time of day
    pub const fn time_of_day(&self) -> TimeOfDay {
        TimeOfDay {
            ticks: self.ticks % TICKS_PER_DAY,
        }
    }

    /// Parse a date/time (date-only input yields midnight)
    pub fn parse(s: &str) -> ValueResult<Self> {
        let naive = codec::parse_datetime(s)
            .ok_or_else(|| ValueError::parse(TypeTag::DateTime, s, "unrecognized date/time"))?;
        Self::from_naive(naive)
    }

    /// Parse a date, rejecting input with a time component
    pub fn parse_date(s: &str) -> ValueResult<Self> {
        let date = codec::parse_date(s)
            .ok_or_else(|| ValueError::parse(TypeTag::Date, s, "unrecognized date"))?;
        Self::from_date(date)
    }

    /// Format only the date part
    pub fn date_string(&self) -> String {
        self.to_naive().format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_naive().format("%Y-%m-%dT%H:%M:%S"))?;
        write_fraction(f, self.ticks % TICKS_PER_SECOND)
    }
}

/// A time of day
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct TimeOfDay {
    ticks: i64,
}

impl TimeOfDay {
    pub const MIDNIGHT: Self = Self { ticks: 0 };
    pub const LAST: Self = Self {
        ticks: TICKS_PER_DAY - 1,
    };

    /// Create from a raw tick count within one day
    pub fn from_ticks(ticks: i64) -> ValueResult<Self> {
        if !(0..TICKS_PER_DAY).contains(&ticks) {
            return Err(ValueError::overflow(format!("Time ticks {ticks}")));
        }
        Ok(Self { ticks })
    }

    /// Create from hour, minute and second
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> ValueResult<Self> {
        let time = NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(|| {
            ValueError::parse(
                TypeTag::Time,
                format!("{hour:02}:{minute:02}:{second:02}"),
                "component out of range",
            )
        })?;
        Ok(Self::from_naive(time))
    }

    /// Get the raw tick count
    pub const fn ticks(&self) -> i64 {
        self.ticks
    }

    /// Convert from a chrono time
    pub fn from_naive(value: NaiveTime) -> Self {
        let seconds = i64::from(value.num_seconds_from_midnight());
        // Leap-second nanos (>= 1e9) are clamped into the last tick of the second
        let nanos = i64::from(value.nanosecond().min(999_999_999));
        Self {
            ticks: seconds * TICKS_PER_SECOND + nanos / 100,
        }
    }

    /// Convert to a chrono time
    pub fn to_naive(&self) -> NaiveTime {
        let seconds = (self.ticks / TICKS_PER_SECOND) as u32;
        let nanos = ((self.ticks % TICKS_PER_SECOND) * 100) as u32;
        NaiveTime::from_num_seconds_from_midnight_opt(seconds, nanos).unwrap_or(NaiveTime::MIN)
    }

    /// Parse a time of day
    pub fn parse(s: &str) -> ValueResult<Self> {
        codec::parse_time(s)
            .map(Self::from_naive)
            .ok_or_else(|| ValueError::parse(TypeTag::Time, s, "unrecognized time"))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_naive().format("%H:%M:%S"))?;
        write_fraction(f, self.ticks % TICKS_PER_SECOND)
    }
}

/// A date and time of day with a UTC offset
///
/// `ticks` is the local clock reading; equality, ordering and hashing use
/// the UTC instant, so the same instant at different offsets is equal.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct OffsetTimestamp {
    ticks: i64,
    offset_minutes: i16,
}

impl OffsetTimestamp {
    pub const MIN: Self = Self {
        ticks: 0,
        offset_minutes: 0,
    };
    pub const MAX: Self = Self {
        ticks: MAX_TICKS,
        offset_minutes: 0,
    };

    /// Create from a local timestamp and an offset in minutes
    pub fn new(local: Timestamp, offset_minutes: i16) -> ValueResult<Self> {
        if offset_minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(ValueError::overflow(format!(
                "DateTimeOffset offset {offset_minutes} minutes"
            )));
        }
        let value = Self {
            ticks: local.ticks(),
            offset_minutes,
        };
        Timestamp::from_ticks(value.utc_ticks())?;
        Ok(value)
    }

    /// A UTC timestamp (offset zero)
    pub fn utc(value: Timestamp) -> Self {
        Self {
            ticks: value.ticks(),
            offset_minutes: 0,
        }
    }

    /// Convert from a chrono date/time with a fixed offset
    pub fn from_chrono(value: DateTime<FixedOffset>) -> ValueResult<Self> {
        let offset_minutes = i16::try_from(value.offset().local_minus_utc() / 60)
            .map_err(|_| ValueError::overflow("DateTimeOffset offset"))?;
        Self::new(Timestamp::from_naive(value.naive_local())?, offset_minutes)
    }

    /// Convert to a chrono date/time with a fixed offset
    pub fn to_chrono(&self) -> Option<DateTime<FixedOffset>> {
        let offset = FixedOffset::east_opt(i32::from(self.offset_minutes) * 60)?;
        self.local().to_naive().and_local_timezone(offset).single()
    }

    /// Local clock reading
    pub const fn local(&self) -> Timestamp {
        Timestamp { ticks: self.ticks }
    }

    /// Offset from UTC in minutes
    pub const fn offset_minutes(&self) -> i16 {
        self.offset_minutes
    }

    /// Ticks of the UTC instant
    pub const fn utc_ticks(&self) -> i64 {
        self.ticks - self.offset_minutes as i64 * TICKS_PER_MINUTE
    }

    /// The UTC instant as a timestamp
    pub fn to_utc(&self) -> ValueResult<Timestamp> {
        Timestamp::from_ticks(self.utc_ticks())
    }

    /// Parse an offset date/time; input without an offset is taken as UTC
    pub fn parse(s: &str) -> ValueResult<Self> {
        if let Some(value) = codec::parse_offset_datetime(s) {
            return Self::from_chrono(value);
        }
        Timestamp::parse(s)
            .map(Self::utc)
            .map_err(|_| ValueError::parse(TypeTag::DateTimeOffset, s, "unrecognized date/time"))
    }
}

impl PartialEq for OffsetTimestamp {
    fn eq(&self, other: &Self) -> bool {
        self.utc_ticks() == other.utc_ticks()
    }
}

impl Eq for OffsetTimestamp {}

impl PartialOrd for OffsetTimestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OffsetTimestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.utc_ticks().cmp(&other.utc_ticks())
    }
}

impl Hash for OffsetTimestamp {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.utc_ticks().hash(state);
    }
}

impl fmt::Display for OffsetTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.local())?;
        let sign = if self.offset_minutes < 0 { '-' } else { '+' };
        let minutes = self.offset_minutes.unsigned_abs();
        write!(f, "{}{:02}:{:02}", sign, minutes / 60, minutes % 60)
    }
}
