//! Date-time parsing and storage conversions.
//!
//! # Responsibility
//! - Accept the ISO-8601 shapes clients send for appointment times and
//!   list filter bounds.
//! - Convert between UTC date-times and the epoch-millisecond storage form.
//!
//! # Invariants
//! - Values carrying an offset are normalized to UTC.
//! - Values without an offset are interpreted as UTC.
//! - A bare `YYYY-MM-DD` date means midnight UTC.
//! - Stored precision is milliseconds.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// UTC instant used for appointment boundaries.
pub type Timestamp = DateTime<Utc>;

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M%:z"];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses one client-supplied date-time.
///
/// Returns `None` when no accepted shape matches; callers decide whether that
/// is a validation failure or an omitted filter.
pub fn parse_datetime(value: &str) -> Option<Timestamp> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(trimmed, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed.and_utc());
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

/// Storage form of a timestamp.
pub fn to_epoch_ms(value: &Timestamp) -> i64 {
    value.timestamp_millis()
}

/// Inverse of [`to_epoch_ms`]; `None` for out-of-range values.
pub fn from_epoch_ms(value: i64) -> Option<Timestamp> {
    DateTime::from_timestamp_millis(value)
}

/// Wire form of a timestamp: RFC 3339, UTC, millisecond precision.
pub fn format_datetime(value: &Timestamp) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `#[serde(with = "...")]` adapter using [`parse_datetime`] and
/// [`format_datetime`].
pub mod serde_timestamp {
    use super::{format_datetime, parse_datetime, Timestamp};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_datetime(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_datetime(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid datetime `{raw}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::{format_datetime, from_epoch_ms, parse_datetime, to_epoch_ms};
    use chrono::{TimeZone, Utc};

    #[test]
    fn parses_offset_values_into_utc() {
        let parsed = parse_datetime("2025-03-10T09:00:00+02:00").expect("offset value");
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 3, 10, 7, 0, 0).unwrap());
    }

    #[test]
    fn naive_values_are_treated_as_utc() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 10, 9, 15, 0).unwrap();
        assert_eq!(parse_datetime("2025-03-10T09:15:00"), Some(expected));
        assert_eq!(parse_datetime("2025-03-10 09:15:00"), Some(expected));
        assert_eq!(parse_datetime("2025-03-10T09:15"), Some(expected));
    }

    #[test]
    fn fractional_seconds_are_accepted() {
        let parsed = parse_datetime("2025-03-10T09:15:00.250").expect("fractional value");
        assert_eq!(parsed.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn bare_date_means_midnight() {
        let parsed = parse_datetime("2025-03-10").expect("date value");
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_datetime("").is_none());
        assert!(parse_datetime("tomorrow").is_none());
        assert!(parse_datetime("2025-13-40").is_none());
    }

    #[test]
    fn epoch_conversion_keeps_milliseconds() {
        let value = parse_datetime("2025-03-10T09:15:00.125Z").unwrap();
        let restored = from_epoch_ms(to_epoch_ms(&value)).unwrap();
        assert_eq!(restored, value);
        assert_eq!(format_datetime(&restored), "2025-03-10T09:15:00.125Z");
    }
}
