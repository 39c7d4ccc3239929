//! Two-way merge of sorted cursors.
//!
//! The merge loop is the merge step of a standard merge sort, generalized to
//! lazy producers: repeatedly pick the non-exhausted cursor with the
//! smallest current timestamp, write its raw record, and advance only that
//! cursor. Equal timestamps always go to cursor A (the first-named input),
//! which makes the output deterministic across runs with the same argument
//! order.
//!
//! Each input stream must already be sorted ascending by timestamp; the
//! merge interleaves, it never re-sorts. No validation of that precondition
//! happens here — `check` exists for that.

use std::io::{BufRead, Write};

use serde::Serialize;
use tracing::debug;

use crate::cursor::{Cursor, CursorError};

/// Errors surfaced while running a merge.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// Reading or validating a record from either input failed.
    #[error(transparent)]
    Cursor(#[from] CursorError),

    /// Writing a merged record to the sink failed.
    #[error("failed to write merged record: {0}")]
    Io(#[from] std::io::Error),
}

/// Counts describing a completed merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    /// Total records written to the sink.
    pub records_written: u64,
    /// Records that came from the first-named input.
    pub records_from_a: u64,
    /// Records that came from the second-named input.
    pub records_from_b: u64,
}

/// Merge two sorted cursors into `sink`, one record per line.
///
/// Records are written verbatim (original bytes plus a trailing `\n`), in
/// globally non-decreasing timestamp order. Ties go to `cursor_a`. Two empty
/// inputs produce an empty output; one empty input reproduces the other
/// stream unchanged.
///
/// Flushing the sink is the caller's responsibility. On error, whatever was
/// already written stays written — there is no rollback.
///
/// # Errors
///
/// Returns [`MergeError`] on the first malformed record, read failure, or
/// write failure. The merge stops immediately.
pub fn merge<RA, RB, W>(
    cursor_a: &mut Cursor<RA>,
    cursor_b: &mut Cursor<RB>,
    sink: &mut W,
) -> Result<MergeReport, MergeError>
where
    RA: BufRead,
    RB: BufRead,
    W: Write,
{
    debug!(
        input_a = cursor_a.label(),
        input_b = cursor_b.label(),
        "starting merge"
    );

    let mut report = MergeReport::default();

    loop {
        let from_a = match (cursor_a.current(), cursor_b.current()) {
            (None, None) => break,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            // Tie-break: equal timestamps go to the first-named input.
            (Some(a), Some(b)) => a.timestamp <= b.timestamp,
        };

        // Write the selected record before advancing, so a failure while
        // reading its successor cannot lose an already-valid record.
        {
            let entry = if from_a {
                cursor_a.current()
            } else {
                cursor_b.current()
            };
            if let Some(entry) = entry {
                sink.write_all(entry.raw.as_bytes())?;
                sink.write_all(b"\n")?;
                report.records_written += 1;
                if from_a {
                    report.records_from_a += 1;
                } else {
                    report.records_from_b += 1;
                }
            }
        }

        if from_a {
            cursor_a.advance()?;
        } else {
            cursor_b.advance()?;
        }
    }

    debug!(
        records = report.records_written,
        from_a = report.records_from_a,
        from_b = report.records_from_b,
        "merge complete"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::merge;
    use crate::cursor::Cursor;

    fn run(a: &str, b: &str) -> (String, super::MergeReport) {
        let mut cursor_a = Cursor::open("a.jsonl", a.as_bytes()).expect("open a");
        let mut cursor_b = Cursor::open("b.jsonl", b.as_bytes()).expect("open b");
        let mut out = Vec::new();
        let report = merge(&mut cursor_a, &mut cursor_b, &mut out).expect("merge");
        (String::from_utf8(out).expect("utf8 output"), report)
    }

    #[test]
    fn both_empty_yields_empty_output() {
        let (out, report) = run("", "");
        assert_eq!(out, "");
        assert_eq!(report.records_written, 0);
    }

    #[test]
    fn one_empty_reproduces_the_other_verbatim() {
        let a = "{\"timestamp\": \"2000-01-01 00:00:01\"}\n";
        let (out, report) = run(a, "");
        assert_eq!(out, a);
        assert_eq!(report.records_from_a, 1);
        assert_eq!(report.records_from_b, 0);

        let (out, report) = run("", a);
        assert_eq!(out, a);
        assert_eq!(report.records_from_b, 1);
    }

    #[test]
    fn interleaves_alternating_timestamps() {
        let a = concat!(
            "{\"timestamp\": \"2000-01-01 00:00:01\", \"src\": \"a\"}\n",
            "{\"timestamp\": \"2000-01-01 00:00:03\", \"src\": \"a\"}\n",
        );
        let b = concat!(
            "{\"timestamp\": \"2000-01-01 00:00:02\", \"src\": \"b\"}\n",
            "{\"timestamp\": \"2000-01-01 00:00:04\", \"src\": \"b\"}\n",
        );
        let (out, _) = run(a, b);
        let sources: Vec<&str> = out
            .lines()
            .map(|l| if l.contains("\"a\"") { "a" } else { "b" })
            .collect();
        assert_eq!(sources, ["a", "b", "a", "b"]);
    }

    #[test]
    fn non_overlapping_ranges_concatenate() {
        let a = concat!(
            "{\"timestamp\": \"2000-01-01 00:00:01\"}\n",
            "{\"timestamp\": \"2000-01-01 00:00:02\"}\n",
        );
        let b = "{\"timestamp\": \"2000-01-01 00:00:03\"}\n";
        let (out, _) = run(a, b);
        assert_eq!(out, format!("{a}{b}"));
    }

    #[test]
    fn duplicate_timestamps_within_one_stream_survive() {
        let a = concat!(
            "{\"timestamp\": \"2000-01-01 00:00:01\", \"n\": 1}\n",
            "{\"timestamp\": \"2000-01-01 00:00:01\", \"n\": 2}\n",
        );
        let b = concat!(
            "{\"timestamp\": \"2000-01-01 00:00:02\"}\n",
            "{\"timestamp\": \"2000-01-01 00:00:03\"}\n",
        );
        let (out, report) = run(a, b);
        assert_eq!(report.records_written, 4);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].contains("\"n\": 1"));
        assert!(lines[1].contains("\"n\": 2"));
    }

    #[test]
    fn equal_timestamps_favour_first_argument() {
        let a = concat!(
            "{\"timestamp\": \"2000-01-01 00:00:01\"}\n",
            "{\"timestamp\": \"2000-01-01 00:00:02\", \"src\": \"a\"}\n",
        );
        let b = "{\"timestamp\": \"2000-01-01 00:00:02\", \"src\": \"b\"}\n";

        let (out, _) = run(a, b);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[1].contains("\"a\""));
        assert!(lines[2].contains("\"b\""));

        // Swapped argument order flips the tie.
        let (out, _) = run(b, a);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[1].contains("\"b\""));
        assert!(lines[2].contains("\"a\""));
    }

    #[test]
    fn field_order_and_content_pass_through_untouched() {
        let a = "{\"z\": 1, \"timestamp\": \"2000-01-01 00:00:01\", \"a\": {\"k\": [1, 2]}}\n";
        let (out, _) = run(a, "");
        assert_eq!(out, a);
    }

    #[test]
    fn malformed_record_aborts_the_merge() {
        let a = concat!(
            "{\"timestamp\": \"2000-01-01 00:00:01\"}\n",
            "{\"timestamp\": \"garbage\"}\n",
        );
        let mut cursor_a = Cursor::open("a.jsonl", a.as_bytes()).expect("open a");
        let mut cursor_b = Cursor::open("b.jsonl", "".as_bytes()).expect("open b");
        let mut out = Vec::new();
        let err = merge(&mut cursor_a, &mut cursor_b, &mut out).expect_err("bad second record");
        assert!(err.to_string().contains("a.jsonl:2"));
        // The first record was already emitted before the failure surfaced.
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "{\"timestamp\": \"2000-01-01 00:00:01\"}\n"
        );
    }
}
