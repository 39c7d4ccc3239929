//! Pull-based cursor over one sorted JSONL stream.
//!
//! A [`Cursor`] wraps a `BufRead` and exposes the stream one record at a
//! time: [`Cursor::current`] is the buffered (timestamp, raw line) pair,
//! [`Cursor::advance`] pulls the next one. Exactly one record is held in
//! memory per cursor, which is what keeps the merge O(1) in file size.
//!
//! The first record is read eagerly on [`Cursor::open`], so a freshly opened
//! cursor is either holding a record or already exhausted — never in an
//! undecided state.

use std::io::BufRead;

use crate::record::{RecordError, parse_record};
use crate::timestamp::Timestamp;

/// One buffered record: its parsed timestamp and the original line.
///
/// `raw` has the trailing newline (and any `\r`) stripped; the merge adds
/// its own `\n` when writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Sort key parsed from the record's `timestamp` field.
    pub timestamp: Timestamp,
    /// The record's original bytes, written verbatim to the output.
    pub raw: String,
}

/// Errors surfaced while reading the next record from a stream.
///
/// Both variants are fatal: the merge aborts on the first one and names the
/// offending input and 1-based line number.
#[derive(Debug, thiserror::Error)]
pub enum CursorError {
    /// A line failed record validation (bad JSON, missing or malformed
    /// `timestamp`).
    #[error("{input}:{line}: {source}")]
    Malformed {
        /// Label of the input stream (typically its path).
        input: String,
        /// 1-based line number of the offending line.
        line: usize,
        #[source]
        source: RecordError,
    },

    /// The underlying reader failed.
    #[error("{input}:{line}: read failed: {source}")]
    Io {
        /// Label of the input stream (typically its path).
        input: String,
        /// 1-based line number being read when the failure occurred.
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

/// Lazy reader over one time-ordered JSONL stream.
#[derive(Debug)]
pub struct Cursor<R> {
    label: String,
    reader: R,
    line_no: usize,
    current: Option<Entry>,
}

impl<R: BufRead> Cursor<R> {
    /// Bind a cursor to an already-open stream positioned at its start.
    ///
    /// Reads the first record immediately, so the returned cursor is valid
    /// (or exhausted, for an empty stream) before any merge decision is
    /// made. `label` names the stream in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError`] if the first record is malformed or the read
    /// fails.
    pub fn open(label: impl Into<String>, reader: R) -> Result<Self, CursorError> {
        let mut cursor = Self {
            label: label.into(),
            reader,
            line_no: 0,
            current: None,
        };
        cursor.advance()?;
        Ok(cursor)
    }

    /// The currently held record, or `None` once the stream is exhausted.
    #[must_use]
    pub fn current(&self) -> Option<&Entry> {
        self.current.as_ref()
    }

    /// `true` once the underlying stream has yielded its last record.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.current.is_none()
    }

    /// Label given at [`open`](Self::open) time.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// 1-based number of the last line read from the stream.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_no
    }

    /// Read and validate the next record from the stream.
    ///
    /// Blank and whitespace-only lines are skipped (they still advance the
    /// line counter). On end-of-stream the cursor transitions to exhausted
    /// and stays there.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::Malformed`] for an invalid record and
    /// [`CursorError::Io`] for a read failure. Both leave the cursor with no
    /// current record.
    pub fn advance(&mut self) -> Result<(), CursorError> {
        self.current = None;
        let mut line = String::new();

        loop {
            line.clear();
            self.line_no += 1;
            let bytes = self.reader.read_line(&mut line).map_err(|source| CursorError::Io {
                input: self.label.clone(),
                line: self.line_no,
                source,
            })?;

            if bytes == 0 {
                return Ok(());
            }

            let raw = line
                .strip_suffix('\n')
                .map_or(line.as_str(), |rest| rest.strip_suffix('\r').unwrap_or(rest));

            if raw.trim().is_empty() {
                continue;
            }

            let timestamp = parse_record(raw).map_err(|source| CursorError::Malformed {
                input: self.label.clone(),
                line: self.line_no,
                source,
            })?;

            self.current = Some(Entry {
                timestamp,
                raw: raw.to_owned(),
            });
            return Ok(());
        }
    }

}
