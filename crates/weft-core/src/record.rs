//! JSONL record validation and timestamp extraction.
//!
//! A record is one line of a JSONL stream: a JSON object with at least a
//! `timestamp` string field. Parsing here is validation only — the merge
//! writes the original line bytes to the output, so field order and content
//! survive untouched. Anything that fails these checks is fatal input.

use serde_json::Value;

use crate::timestamp::{Timestamp, TimestampParseError};

/// The required field naming each record's sort key.
pub const TIMESTAMP_FIELD: &str = "timestamp";

/// Ways a single line can fail record validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// The line is not parseable JSON.
    #[error("line is not valid JSON: {0}")]
    InvalidJson(String),

    /// The line parsed, but the top-level value is not an object.
    #[error("record is not a JSON object")]
    NotAnObject,

    /// The object has no `timestamp` key.
    #[error("record has no '{TIMESTAMP_FIELD}' field")]
    MissingTimestamp,

    /// The `timestamp` value is present but not a JSON string.
    #[error("'{TIMESTAMP_FIELD}' field is not a string")]
    TimestampNotAString,

    /// The `timestamp` string does not match the fixed format.
    #[error(transparent)]
    BadTimestamp(#[from] TimestampParseError),
}

/// Validate one JSONL line and extract its parsed timestamp.
///
/// The caller keeps the raw line; only the [`Timestamp`] comes back, since
/// that is all the merge needs for ordering.
///
/// # Errors
///
/// Returns [`RecordError`] when the line is not a JSON object carrying a
/// `timestamp` string in `YYYY-MM-DD HH:MM:SS` form.
pub fn parse_record(line: &str) -> Result<Timestamp, RecordError> {
    let value: Value =
        serde_json::from_str(line).map_err(|e| RecordError::InvalidJson(e.to_string()))?;

    let Value::Object(fields) = value else {
        return Err(RecordError::NotAnObject);
    };

    let raw = fields
        .get(TIMESTAMP_FIELD)
        .ok_or(RecordError::MissingTimestamp)?;

    let Value::String(raw) = raw else {
        return Err(RecordError::TimestampNotAString);
    };

    Ok(Timestamp::parse(raw)?)
}
