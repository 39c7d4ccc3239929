use anyhow::{Context as _, Result, bail};
use clap::Args;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use weft_core::check::check;
use weft_core::cursor::Cursor;

use crate::output::{OutputMode, render};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// JSONL file to verify.
    pub input: PathBuf,
}

/// Execute `weft check`. Verifies that every record in the file parses and
/// that timestamps never decrease — the precondition `weft merge` assumes
/// but does not enforce.
///
/// Exits non-zero on the first malformed record or order violation.
pub fn run_check(args: &CheckArgs, output: OutputMode) -> Result<()> {
    let file = File::open(&args.input)
        .with_context(|| format!("failed to open input {}", args.input.display()))?;
    let mut cursor = Cursor::open(args.input.display().to_string(), BufReader::new(file))?;

    let report = check(&mut cursor)?;

    let stderr = io::stderr();
    let mut w = stderr.lock();
    render(output, &mut w, &report, |r, w| {
        if let Some(v) = &r.violation {
            writeln!(
                w,
                "{}:{}: record timestamp {} precedes previous record's {}",
                args.input.display(),
                v.line,
                v.timestamp,
                v.previous
            )
        } else {
            writeln!(w, "{}: sorted ({} records)", args.input.display(), r.records)
        }
    })
    .context("failed to write check report")?;

    if !report.is_sorted() {
        bail!("{} is not sorted by timestamp", args.input.display());
    }
    Ok(())
}
