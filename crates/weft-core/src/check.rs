//! Sortedness diagnostic for a single JSONL file.
//!
//! The merge assumes each input is already sorted ascending by timestamp and
//! deliberately does not verify it. `check` is the standalone verifier: it
//! walks one stream with the same [`Cursor`] the merge uses, confirms every
//! record parses, and reports the first place the timestamps go backwards.

use std::io::BufRead;

use serde::Serialize;
use tracing::debug;

use crate::cursor::{Cursor, CursorError};
use crate::timestamp::Timestamp;

/// The first point where a stream's timestamps decrease.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderViolation {
    /// 1-based line number of the out-of-order record.
    pub line: usize,
    /// The out-of-order record's timestamp.
    #[serde(serialize_with = "ts_string")]
    pub timestamp: Timestamp,
    /// The (larger) timestamp of the preceding record.
    #[serde(serialize_with = "ts_string")]
    pub previous: Timestamp,
}

fn ts_string<S: serde::Serializer>(ts: &Timestamp, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(ts)
}

/// Result of checking one stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// Number of records scanned before stopping.
    pub records: u64,
    /// The first order violation, or `None` if the stream is sorted.
    pub violation: Option<OrderViolation>,
}

impl CheckReport {
    /// `true` when every record parsed and timestamps never decreased.
    #[must_use]
    pub const fn is_sorted(&self) -> bool {
        self.violation.is_none()
    }
}

/// Scan a stream and report whether it satisfies the merge precondition.
///
/// Stops at the first order violation (later records are not scanned) or at
/// end-of-stream. Malformed records abort with an error, same as they would
/// during a merge.
///
/// # Errors
///
/// Returns [`CursorError`] for a malformed record or read failure.
pub fn check<R: BufRead>(cursor: &mut Cursor<R>) -> Result<CheckReport, CursorError> {
    let mut records = 0u64;
    let mut previous: Option<Timestamp> = None;

    while let Some(entry) = cursor.current() {
        records += 1;
        let line = cursor.line_number();
        let timestamp = entry.timestamp;

        if let Some(prev) = previous {
            if timestamp < prev {
                debug!(input = cursor.label(), line, "order violation");
                return Ok(CheckReport {
                    records,
                    violation: Some(OrderViolation {
                        line,
                        timestamp,
                        previous: prev,
                    }),
                });
            }
        }

        previous = Some(timestamp);
        cursor.advance()?;
    }

    Ok(CheckReport {
        records,
        violation: None,
    })
}
