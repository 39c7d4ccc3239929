use anyhow::{Context as _, Result};
use clap::Args;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use weft_core::cursor::Cursor;
use weft_core::merge::{MergeReport, merge};

use crate::output::{OutputMode, render};

#[derive(Args, Debug)]
pub struct MergeArgs {
    /// First sorted JSONL input. Wins timestamp ties against the second.
    pub input_a: PathBuf,

    /// Second sorted JSONL input.
    pub input_b: PathBuf,

    /// Merged output path (defaults to stdout).
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Execute `weft merge`. Opens both inputs, runs the merge, flushes the
/// sink, and writes a summary to stderr.
///
/// Output already written stays in place when the merge fails partway; the
/// error names the offending input and line.
pub fn run_merge(args: &MergeArgs, output: OutputMode) -> Result<()> {
    let mut cursor_a = open_cursor(&args.input_a)?;
    let mut cursor_b = open_cursor(&args.input_b)?;

    let report = match args.output.as_ref() {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create output file {}", path.display()))?;
            let mut sink = BufWriter::new(file);
            let report = merge(&mut cursor_a, &mut cursor_b, &mut sink)?;
            sink.flush()
                .with_context(|| format!("failed to flush output file {}", path.display()))?;
            report
        }
        None => {
            let stdout = io::stdout();
            let mut sink = BufWriter::new(stdout.lock());
            let report = merge(&mut cursor_a, &mut cursor_b, &mut sink)?;
            sink.flush().context("failed to flush stdout")?;
            report
        }
    };

    debug!(records = report.records_written, "merge finished");
    summarize(&report, output)?;
    Ok(())
}

fn open_cursor(path: &Path) -> Result<Cursor<BufReader<File>>> {
    let file =
        File::open(path).with_context(|| format!("failed to open input {}", path.display()))?;
    let cursor = Cursor::open(path.display().to_string(), BufReader::new(file))?;
    Ok(cursor)
}

/// Write the merge summary to stderr, leaving stdout to the record stream.
fn summarize(report: &MergeReport, output: OutputMode) -> Result<()> {
    let stderr = io::stderr();
    let mut w = stderr.lock();
    render(output, &mut w, report, |r, w| {
        writeln!(
            w,
            "merged {} records ({} from first input, {} from second)",
            r.records_written, r.records_from_a, r.records_from_b
        )
    })
    .context("failed to write merge summary")
}
