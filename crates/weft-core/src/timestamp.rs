//! Fixed-format record timestamps.
//!
//! Every record carries a `timestamp` field in exactly `YYYY-MM-DD HH:MM:SS`
//! form (no sub-second precision, no timezone). [`Timestamp`] parses that
//! form once per record and exists purely for ordering comparisons; the
//! original string in the record is never rewritten.

use std::fmt;

use chrono::NaiveDateTime;

/// The only accepted `timestamp` layout: `YYYY-MM-DD HH:MM:SS`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A parsed record timestamp, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

/// The raw string did not match [`TIMESTAMP_FORMAT`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("timestamp '{raw}' does not match 'YYYY-MM-DD HH:MM:SS'")]
pub struct TimestampParseError {
    /// The offending raw value.
    pub raw: String,
}

impl Timestamp {
    /// Parse a raw `timestamp` field value.
    ///
    /// The match is exact: trailing characters, fractional seconds, or a
    /// timezone suffix are all rejected.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampParseError`] if `raw` is not exactly
    /// `YYYY-MM-DD HH:MM:SS`.
    pub fn parse(raw: &str) -> Result<Self, TimestampParseError> {
        NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
            .map(Self)
            .map_err(|_| TimestampParseError { raw: raw.to_owned() })
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use super::Timestamp;

    #[test]
    fn parses_exact_format() {
        let ts = Timestamp::parse("2024-02-15 16:30:00").expect("valid timestamp");
        assert_eq!(ts.to_string(), "2024-02-15 16:30:00");
    }

    #[test]
    fn orders_chronologically() {
        let earlier = Timestamp::parse("2000-01-01 00:00:01").expect("valid");
        let later = Timestamp::parse("2000-01-01 00:00:02").expect("valid");
        assert!(earlier < later);
        assert_eq!(earlier, Timestamp::parse("2000-01-01 00:00:01").expect("valid"));
    }

    #[test]
    fn rejects_wrong_shapes() {
        for raw in [
            "",
            "2024-02-15",
            "2024-02-15T16:30:00",
            "2024-02-15 16:30:00.500",
            "2024-02-15 16:30:00Z",
            "2024-02-15 16:30:00 extra",
            "15-02-2024 16:30:00",
            "not a timestamp",
        ] {
            assert!(Timestamp::parse(raw).is_err(), "should reject {raw:?}");
        }
    }

    #[test]
    fn rejects_out_of_range_fields() {
        assert!(Timestamp::parse("2024-13-01 00:00:00").is_err());
        assert!(Timestamp::parse("2024-02-30 00:00:00").is_err());
        assert!(Timestamp::parse("2024-02-15 25:00:00").is_err());
    }
}
