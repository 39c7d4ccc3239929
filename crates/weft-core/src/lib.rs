//! weft-core: streaming two-way merge of time-ordered JSONL logs.
//!
//! The crate is built around two pieces:
//!
//! - [`cursor::Cursor`] — a pull-based reader over one sorted JSONL stream,
//!   holding exactly one buffered record at a time.
//! - [`merge::merge`] — the selection loop that interleaves two cursors into
//!   a single sorted output, breaking timestamp ties in favour of the
//!   first-named input.
//!
//! Records pass through verbatim: parsing only validates the line and
//! extracts the `timestamp` field, and the original bytes are what reach the
//! sink. Memory stays O(1) in input size regardless of how large the logs
//! are.
//!
//! # Conventions
//!
//! - **Errors**: per-module `thiserror` enums, propagated with `?`. Malformed
//!   input is fatal, never skipped or retried.
//! - **Logging**: `tracing` macros (`debug!`, `info!`, `warn!`).

pub mod check;
pub mod cursor;
pub mod merge;
pub mod record;
pub mod timestamp;

pub use cursor::{Cursor, CursorError};
pub use merge::{MergeError, MergeReport, merge};
pub use timestamp::Timestamp;
