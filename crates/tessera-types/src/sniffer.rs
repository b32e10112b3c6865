//! Online type inference over text samples
//!
//! A [`TypeSniffer`] starts with every candidate kind possible and clears a
//! candidate the first time a sample fails that kind's parser. Flags never
//! come back without an explicit [`TypeSniffer::reset`].

use log::trace;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::TypeTag;
use crate::codec;
use crate::strategy::{
    BooleanStrategy, DateStrategy, DateTimeStrategy, DoubleStrategy, Int32Strategy,
    Int64Strategy, TimeStrategy, TypeStrategy,
};

/// Samples needed before a shared length counts as a fixed-width column
const FIXED_WIDTH_MIN_SAMPLES: usize = 3;

/// How raw samples are cleaned before they are parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnifferOptions {
    /// Strip leading and trailing whitespace
    pub trim: bool,
    /// Treat empty samples like nulls
    pub empty_as_null: bool,
}

impl Default for SnifferOptions {
    fn default() -> Self {
        Self {
            trim: true,
            empty_as_null: true,
        }
    }
}

/// Candidate kinds still consistent with every observed sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Candidates {
    pub boolean: bool,
    pub date: bool,
    pub date_time: bool,
    pub time: bool,
    pub int32: bool,
    pub int64: bool,
    pub double: bool,
    pub single_char: bool,
    pub fixed_width: bool,
    pub json: bool,
    pub xml: bool,
    pub guid: bool,
}

impl Candidates {
    const ALL: Self = Self {
        boolean: true,
        date: true,
        date_time: true,
        time: true,
        int32: true,
        int64: true,
        double: true,
        single_char: true,
        fixed_width: true,
        json: true,
        xml: true,
        guid: true,
    };

    /// Flags paired with the tag they stand for, in priority order
    fn ranked(&self) -> [(bool, TypeTag); 12] {
        [
            (self.boolean, TypeTag::Boolean),
            (self.date, TypeTag::Date),
            (self.date_time, TypeTag::DateTime),
            (self.time, TypeTag::Time),
            (self.int32, TypeTag::Int32),
            (self.int64, TypeTag::Int64),
            (self.double, TypeTag::Double),
            (self.single_char, TypeTag::Char),
            (self.fixed_width, TypeTag::CharArray),
            (self.json, TypeTag::Json),
            (self.xml, TypeTag::Xml),
            (self.guid, TypeTag::Guid),
        ]
    }

    fn intersect(&mut self, other: &Self) {
        self.boolean &= other.boolean;
        self.date &= other.date;
        self.date_time &= other.date_time;
        self.time &= other.time;
        self.int32 &= other.int32;
        self.int64 &= other.int64;
        self.double &= other.double;
        self.single_char &= other.single_char;
        self.fixed_width &= other.fixed_width;
        self.json &= other.json;
        self.xml &= other.xml;
        self.guid &= other.guid;
    }
}

impl Default for Candidates {
    fn default() -> Self {
        Self::ALL
    }
}

/// Float text with at least one digit, so `inf` and `NaN` stay text
fn is_decimal_number(text: &str) -> bool {
    text.bytes().any(|b| b.is_ascii_digit()) && DoubleStrategy.parse(text).is_ok()
}

/// Clear `flag` unless `accepts` holds for the sample
fn narrow(flag: &mut bool, kind: &str, sample: &str, accepts: impl FnOnce() -> bool) {
    if *flag && !accepts() {
        trace!("sample {sample:?} rules out {kind}");
        *flag = false;
    }
}

/// Caller-owned accumulator narrowing candidate kinds over a stream of samples
///
/// Not meant for concurrent `observe` calls; parallel callers keep one
/// sniffer per worker and combine them with [`TypeSniffer::merge`].
#[derive(Debug, Clone, Default)]
pub struct TypeSniffer {
    options: SnifferOptions,
    candidates: Candidates,
    min_length: Option<usize>,
    max_length: Option<usize>,
    samples: usize,
}

impl TypeSniffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: SnifferOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> SnifferOptions {
        self.options
    }

    /// Make every kind possible again and forget all samples
    pub fn reset(&mut self) {
        self.candidates = Candidates::ALL;
        self.min_length = None;
        self.max_length = None;
        self.samples = 0;
    }

    /// Narrow the candidates with one sample; nulls are ignored
    pub fn observe(&mut self, sample: Option<&str>) {
        let Some(raw) = sample else {
            return;
        };
        let text = if self.options.trim { raw.trim() } else { raw };
        if self.options.empty_as_null && text.is_empty() {
            return;
        }

        let length = text.chars().count();
        if self.samples == 0 {
            self.candidates = Candidates::ALL;
        } else if self.min_length != Some(length) || self.max_length != Some(length) {
            narrow(&mut self.candidates.fixed_width, "fixed width", text, || false);
        }
        self.min_length = Some(self.min_length.map_or(length, |min| min.min(length)));
        self.max_length = Some(self.max_length.map_or(length, |max| max.max(length)));
        self.samples += 1;

        let c = &mut self.candidates;
        narrow(&mut c.boolean, "Boolean", text, || BooleanStrategy.parse(text).is_ok());
        narrow(&mut c.int32, "Int32", text, || Int32Strategy.parse(text).is_ok());
        narrow(&mut c.int64, "Int64", text, || Int64Strategy.parse(text).is_ok());
        let decimal = is_decimal_number(text);
        narrow(&mut c.double, "Double", text, || decimal);

        let numeric = decimal || Int64Strategy.parse(text).is_ok();
        narrow(&mut c.date, "Date", text, || {
            !numeric && DateStrategy.parse(text).is_ok()
        });
        narrow(&mut c.date_time, "DateTime", text, || {
            !numeric && DateTimeStrategy.parse(text).is_ok()
        });
        narrow(&mut c.time, "Time", text, || {
            !numeric && TimeStrategy.parse(text).is_ok()
        });

        narrow(&mut c.single_char, "Char", text, || length == 1);
        narrow(&mut c.json, "Json", text, || {
            text.starts_with(['{', '[']) && codec::parse_json(text).is_ok()
        });
        narrow(&mut c.xml, "Xml", text, || {
            text.starts_with('<') && codec::check_xml(text).is_ok()
        });
        narrow(&mut c.guid, "Guid", text, || Uuid::parse_str(text).is_ok());
    }

    pub fn observe_all<'a, I>(&mut self, samples: I)
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        for sample in samples {
            self.observe(sample);
        }
    }

    /// Fold another sniffer's observations into this one
    pub fn merge(&mut self, other: &TypeSniffer) {
        if other.samples == 0 {
            return;
        }
        if self.samples == 0 {
            self.candidates = other.candidates;
            self.min_length = other.min_length;
            self.max_length = other.max_length;
            self.samples = other.samples;
            return;
        }

        self.candidates.intersect(&other.candidates);
        if self.min_length != other.min_length || self.max_length != other.max_length {
            self.candidates.fixed_width = false;
        }
        self.min_length = self.min_length.min(other.min_length);
        self.max_length = self.max_length.max(other.max_length);
        self.samples += other.samples;
    }

    fn reportable(&self) -> impl Iterator<Item = TypeTag> + '_ {
        let enough_for_width = self.samples >= FIXED_WIDTH_MIN_SAMPLES;
        self.candidates
            .ranked()
            .into_iter()
            .filter(move |&(possible, tag)| {
                possible && (tag != TypeTag::CharArray || enough_for_width)
            })
            .map(|(_, tag)| tag)
    }

    /// Narrowest kind consistent with every sample; String when none were seen
    pub fn best_type(&self) -> TypeTag {
        if self.samples == 0 {
            return TypeTag::String;
        }
        self.reportable().next().unwrap_or(TypeTag::String)
    }

    /// Every still-possible kind in priority order, ending with String
    pub fn possible_types(&self) -> Vec<TypeTag> {
        let mut tags: Vec<TypeTag> = if self.samples == 0 {
            Vec::new()
        } else {
            self.reportable().collect()
        };
        tags.push(TypeTag::String);
        tags
    }

    pub fn is_possible(&self, tag: TypeTag) -> bool {
        tag == TypeTag::String || (self.samples > 0 && self.reportable().any(|t| t == tag))
    }

    pub fn candidates(&self) -> &Candidates {
        &self.candidates
    }

    pub fn min_length(&self) -> Option<usize> {
        self.min_length
    }

    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    pub fn sample_count(&self) -> usize {
        self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nulls_and_empty_samples_do_not_narrow() {
        let mut sniffer = TypeSniffer::new();
        sniffer.observe_all([None, Some(""), Some("   ")]);
        assert_eq!(sniffer.sample_count(), 0);
        assert_eq!(sniffer.best_type(), TypeTag::String);
        assert_eq!(sniffer.min_length(), None);
    }

    #[test]
    fn test_empty_sample_counts_when_configured() {
        let mut sniffer = TypeSniffer::with_options(SnifferOptions {
            trim: false,
            empty_as_null: false,
        });
        sniffer.observe(Some(""));
        assert_eq!(sniffer.sample_count(), 1);
        assert!(!sniffer.candidates().int32);
        assert_eq!(sniffer.best_type(), TypeTag::String);
    }

    #[test]
    fn test_compact_date_is_numeric() {
        let mut sniffer = TypeSniffer::new();
        sniffer.observe(Some("20240115"));
        assert!(!sniffer.candidates().date);
        assert!(!sniffer.candidates().date_time);
        assert_eq!(sniffer.best_type(), TypeTag::Int32);
    }

    #[test]
    fn test_reset_restores_candidates() {
        let mut sniffer = TypeSniffer::new();
        sniffer.observe(Some("hello"));
        assert!(!sniffer.candidates().boolean);
        sniffer.reset();
        assert_eq!(*sniffer.candidates(), Candidates::ALL);
        assert_eq!(sniffer.sample_count(), 0);
        assert_eq!(sniffer.max_length(), None);
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: SnifferOptions = serde_json::from_str(r#"{"trim": false}"#).unwrap();
        assert!(!options.trim);
        assert!(options.empty_as_null);
    }
}
