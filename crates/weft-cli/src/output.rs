//! Shared output layer for human/JSON parity across CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its result
//! accordingly: a short human summary, or stable JSON for scripts. Summaries
//! go to stderr so the merged record stream can own stdout.

use serde::Serialize;
use std::io::{self, Write};

/// The two output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable summary lines.
    Human,
    /// Machine-readable JSON (one pretty-printed object per result).
    Json,
}

impl OutputMode {
    /// Returns `true` if JSON output was requested.
    pub fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Render a result value: stable JSON in JSON mode, otherwise whatever the
/// closure writes.
pub fn render<T, F>(mode: OutputMode, w: &mut dyn Write, value: &T, human: F) -> io::Result<()>
where
    T: Serialize,
    F: FnOnce(&T, &mut dyn Write) -> io::Result<()>,
{
    if mode.is_json() {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        writeln!(w, "{json}")
    } else {
        human(value, w)
    }
}
