//! Text conversion services
//!
//! Canonical parsers used by strategies, variant conversion and the type
//! sniffer. Each returns the native value or a failure; none of them panic.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use quick_xml::Reader;
use quick_xml::events::Event;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::{TypeTag, ValueError, ValueResult};

/// Date-only formats, most specific first
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", // ISO
    "%Y/%m/%d", // Alternative with slashes
    "%m/%d/%Y", // US format
    "%d.%m.%Y", // European format
    "%d-%b-%Y", // 15-Jan-2024
];

/// Date/time formats without offset
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date/time formats carrying an offset
const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M", "%I:%M:%S %p", "%I:%M %p"];

/// Parse a boolean literal
///
/// Accepts true/false, on/off, 1/0, yes/no and y/n, case-insensitively.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "1" | "yes" | "y" => Some(true),
        "false" | "off" | "0" | "no" | "n" => Some(false),
        _ => None,
    }
}

/// Parse a decimal in plain or scientific notation
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    let s = s.trim();
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Parse a date without a time component
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Some(date) = parse_compact_date(s) {
        return Some(date);
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
}

/// `yyyymmdd`, e.g. 20240115
fn parse_compact_date(s: &str) -> Option<NaiveDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = s[0..4].parse().ok()?;
    let month = s[4..6].parse().ok()?;
    let day = s[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse a date/time; offsets are normalized to UTC and date-only input
/// yields midnight
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Some(value) = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
    {
        return Some(value);
    }
    if let Some(value) = parse_offset_datetime(s) {
        return Some(value.naive_utc());
    }
    parse_date(s).map(|date| date.and_time(NaiveTime::MIN))
}

/// Parse a date/time that carries an explicit offset (or `Z`)
pub fn parse_offset_datetime(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    if let Ok(value) = DateTime::parse_from_rfc3339(s) {
        return Some(value);
    }
    OFFSET_DATETIME_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(s, format).ok())
}

/// Parse a time of day
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(s, format).ok())
}

/// Decode hex text (optionally `0x`-prefixed) into bytes
pub fn parse_hex(s: &str) -> ValueResult<Vec<u8>> {
    let trimmed = s.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.len() % 2 != 0 {
        return Err(ValueError::parse(
            TypeTag::Binary,
            s,
            format!("hex string must have even length, got {}", digits.len()),
        ));
    }

    digits
        .as_bytes()
        .chunks(2)
        .map(|pair| {
            std::str::from_utf8(pair)
                .ok()
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| ValueError::parse(TypeTag::Binary, s, "invalid hex digit"))
        })
        .collect()
}

/// Encode bytes as upper-case hex with a `0x` prefix
pub fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 + bytes.len() * 2);
    out.push_str("0x");
    for byte in bytes {
        out.push_str(&format!("{byte:02X}"));
    }
    out
}

/// Parse a JSON document
pub fn parse_json(s: &str) -> ValueResult<serde_json::Value> {
    serde_json::from_str(s).map_err(|e| ValueError::parse(TypeTag::Json, s, e))
}

/// Check that `s` is a well-formed XML document with a single root element
pub fn check_xml(s: &str) -> ValueResult<()> {
    let mut reader = Reader::from_str(s);
    reader.config_mut().trim_text(true);

    let mut depth = 0usize;
    let mut roots = 0usize;
    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => {
                if depth == 0 {
                    roots += 1;
                }
                depth += 1;
            }
            Ok(Event::End(_)) => depth = depth.saturating_sub(1),
            Ok(Event::Empty(_)) => {
                if depth == 0 {
                    roots += 1;
                }
            }
            Ok(Event::Text(_)) | Ok(Event::CData(_)) if depth == 0 => {
                return Err(ValueError::parse(TypeTag::Xml, s, "text outside the root element"));
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(ValueError::parse(TypeTag::Xml, s, e)),
        }
    }

    match (roots, depth) {
        (1, 0) => Ok(()),
        (0, _) => Err(ValueError::parse(TypeTag::Xml, s, "missing root element")),
        (_, 0) => Err(ValueError::parse(TypeTag::Xml, s, "multiple root elements")),
        _ => Err(ValueError::parse(TypeTag::Xml, s, "unclosed element")),
    }
}
