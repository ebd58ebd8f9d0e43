//! Field cleaning for raw attendee rows.
//!
//! Zipcodes and phone numbers never fail to clean: anomalies are carried as
//! values. Registration timestamps are the one field that can fail, with a
//! [`TimestampError`].

use chrono::{NaiveDateTime, Timelike};
use std::fmt;
use thiserror::Error;

/// Length of a cleaned zipcode.
const ZIPCODE_LEN: usize = 5;

/// Length of a valid cleaned phone number.
const PHONE_LEN: usize = 10;

/// Text rendered in place of a phone number that failed to clean.
pub const BAD_NUMBER: &str = "Bad Number";

/// Registration timestamps are written as `month/day/yy hour:minute`.
pub const REGISTRATION_FORMAT: &str = "%m/%d/%y %H:%M";

/// A zipcode padded or truncated to exactly five characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CleanZipcode(String);

impl CleanZipcode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CleanZipcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Left-pads `raw` with `'0'` to five characters and keeps the first five.
///
/// Non-digit input is passed through rather than rejected.
pub fn clean_zipcode(raw: &str) -> CleanZipcode {
    let len = raw.chars().count();
    let padded: String = std::iter::repeat_n('0', ZIPCODE_LEN.saturating_sub(len))
        .chain(raw.chars())
        .take(ZIPCODE_LEN)
        .collect();
    CleanZipcode(padded)
}

/// Result of cleaning a phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanPhone {
    /// Exactly ten digits, country code removed.
    Valid(String),
    Invalid,
}

impl CleanPhone {
    pub fn is_valid(&self) -> bool {
        matches!(self, CleanPhone::Valid(_))
    }
}

impl fmt::Display for CleanPhone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CleanPhone::Valid(digits) => f.write_str(digits),
            CleanPhone::Invalid => f.write_str(BAD_NUMBER),
        }
    }
}

/// Strips whitespace, periods, parentheses and hyphens, then drops a leading
/// `1` from an 11-character result.
///
/// Anything other than ten remaining characters is [`CleanPhone::Invalid`].
pub fn clean_phone(raw: &str) -> CleanPhone {
    let stripped: String = raw
        .chars()
        .filter(|c| !(c.is_whitespace() || matches!(c, '.' | '(' | ')' | '-')))
        .collect();

    let number = match stripped.strip_prefix('1') {
        Some(rest) if stripped.chars().count() == PHONE_LEN + 1 => rest,
        _ => stripped.as_str(),
    };

    if number.chars().count() == PHONE_LEN {
        CleanPhone::Valid(number.to_string())
    } else {
        CleanPhone::Invalid
    }
}

/// A registration timestamp that failed to parse.
#[derive(Debug, Error)]
#[error("invalid registration timestamp {input:?}: {source}")]
pub struct TimestampError {
    pub input: String,
    #[source]
    pub source: chrono::ParseError,
}

/// A parsed registration date and time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationTimestamp(NaiveDateTime);

impl RegistrationTimestamp {
    /// Hour of day, 0 to 23.
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Full English weekday name, e.g. `"Friday"`.
    pub fn weekday_name(&self) -> String {
        self.0.format("%A").to_string()
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.0
    }
}

/// Parses a timestamp in [`REGISTRATION_FORMAT`]. Surrounding whitespace is
/// ignored.
pub fn parse_registration_datetime(raw: &str) -> Result<RegistrationTimestamp, TimestampError> {
    NaiveDateTime::parse_from_str(raw.trim(), REGISTRATION_FORMAT)
        .map(RegistrationTimestamp)
        .map_err(|source| TimestampError {
            input: raw.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_zipcode_pads_short_input() {
        assert_eq!(clean_zipcode("123").as_str(), "00123");
        assert_eq!(clean_zipcode("2703").as_str(), "02703");
    }

    #[test]
    fn test_clean_zipcode_truncates_long_input() {
        assert_eq!(clean_zipcode("123456789").as_str(), "12345");
        assert_eq!(clean_zipcode("98122-1234").as_str(), "98122");
    }

    #[test]
    fn test_clean_zipcode_empty_is_all_zeros() {
        assert_eq!(clean_zipcode("").as_str(), "00000");
    }

    #[test]
    fn test_clean_zipcode_passes_non_digits_through() {
        assert_eq!(clean_zipcode("ab").as_str(), "000ab");
        assert_eq!(clean_zipcode("ABCDEFG").as_str(), "ABCDE");
    }

    #[test]
    fn test_clean_phone_strips_punctuation() {
        assert_eq!(
            clean_phone("(555) 123-4567"),
            CleanPhone::Valid("5551234567".to_string())
        );
        assert_eq!(
            clean_phone("555.123.4567"),
            CleanPhone::Valid("5551234567".to_string())
        );
    }

    #[test]
    fn test_clean_phone_drops_country_code() {
        assert_eq!(
            clean_phone("1-555-123-4567"),
            CleanPhone::Valid("5551234567".to_string())
        );
    }

    #[test]
    fn test_clean_phone_eleven_digits_without_leading_one_is_invalid() {
        assert_eq!(clean_phone("25551234567"), CleanPhone::Invalid);
    }

    #[test]
    fn test_clean_phone_short_number_is_invalid() {
        let phone = clean_phone("555-1234");
        assert_eq!(phone, CleanPhone::Invalid);
        assert_eq!(phone.to_string(), "Bad Number");
    }

    #[test]
    fn test_clean_phone_keeps_unlisted_symbols() {
        // '+' is not stripped, so the length check fails
        assert_eq!(clean_phone("+1 555 123 4567"), CleanPhone::Invalid);
        assert_eq!(clean_phone(""), CleanPhone::Invalid);
    }

    #[test]
    fn test_parse_registration_datetime() {
        let ts = parse_registration_datetime("3/1/24 14:30").unwrap();
        assert_eq!(ts.hour(), 14);
        assert_eq!(ts.weekday_name(), "Friday");
    }

    #[test]
    fn test_parse_registration_datetime_zero_padded() {
        let ts = parse_registration_datetime("11/12/08 10:47").unwrap();
        assert_eq!(ts.hour(), 10);
        assert_eq!(ts.weekday_name(), "Wednesday");
    }

    #[test]
    fn test_parse_registration_datetime_rejects_other_formats() {
        assert!(parse_registration_datetime("2024-03-01 14:30").is_err());
        assert!(parse_registration_datetime("3/1/24").is_err());
        assert!(parse_registration_datetime("").is_err());
    }

    #[test]
    fn test_timestamp_error_names_input() {
        let err = parse_registration_datetime("yesterday").unwrap_err();
        assert_eq!(err.input, "yesterday");
        assert!(err.to_string().contains("yesterday"));
    }
}
