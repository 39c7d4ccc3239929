#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{Parser, Subcommand};
use output::OutputMode;
use std::env;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "weft: merge time-ordered JSONL logs",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON summaries instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags.
    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Merge two sorted JSONL logs into one",
        long_about = "Merge two JSONL logs, each already sorted ascending by its 'timestamp' \
                      field, into a single sorted stream. Records pass through verbatim; equal \
                      timestamps keep the first-named input's record first.",
        after_help = "EXAMPLES:\n    # Merge to a file\n    weft merge app.jsonl worker.jsonl -o combined.jsonl\n\n    # Merge to stdout, JSON summary on stderr\n    weft --json merge app.jsonl worker.jsonl > combined.jsonl"
    )]
    Merge(cmd::merge::MergeArgs),

    #[command(
        about = "Verify a JSONL log is sorted by timestamp",
        long_about = "Scan one JSONL file and verify every record parses and timestamps never \
                      decrease. This is the precondition 'weft merge' assumes but does not check.",
        after_help = "EXAMPLES:\n    # Check a log before merging\n    weft check app.jsonl"
    )]
    Check(cmd::check::CheckArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("WEFT_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "weft=debug,info"
        } else {
            "weft=warn"
        })
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = cli.output_mode();

    match cli.command {
        Commands::Merge(ref args) => cmd::merge::run_merge(args, output),
        Commands::Check(ref args) => cmd::check::run_check(args, output),
    }
}
