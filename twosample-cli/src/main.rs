//! twosample - guided comparison of two independent samples
//!
//! Checks both samples for normality (Shapiro-Wilk), checks equality of
//! variances when both look normal (Levene), then runs the matching test:
//! Student's t, Welch's t or Mann-Whitney U.
//!
//! Usage:
//!   twosample                                        # Interactive prompts
//!   twosample manual --first "1 2 3" --second "4,5,6"
//!   twosample file data.csv --first-column a --second-column b
//!   twosample --json file data.xlsx --first-column a --second-column b

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use twosample_core::{Result, SamplePair};
use twosample_io::{FileSource, ManualSource, SampleSource};

mod prompt;

/// Compare two independent samples with an automatically chosen test.
///
/// Without a subcommand the samples are requested interactively.
#[derive(Parser)]
#[command(name = "twosample")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output the analysis as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse two samples given on the command line
    Manual {
        /// Values of the first sample, separated by spaces or commas
        #[arg(long, value_name = "VALUES", allow_hyphen_values = true)]
        first: String,

        /// Values of the second sample, separated by spaces or commas
        #[arg(long, value_name = "VALUES", allow_hyphen_values = true)]
        second: String,
    },

    /// Analyse two columns of a CSV or Excel file
    File {
        /// Path to a .csv, .xls or .xlsx file with a header row
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Column holding the first sample
        #[arg(long, value_name = "NAME")]
        first_column: String,

        /// Column holding the second sample
        #[arg(long, value_name = "NAME")]
        second_column: String,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load(cli: &Cli, out: &mut dyn Write) -> Result<SamplePair> {
    match &cli.command {
        Some(Commands::Manual { first, second }) => {
            ManualSource::new(first.as_str(), second.as_str()).load()
        }
        Some(Commands::File {
            file,
            first_column,
            second_column,
        }) => FileSource::open(file, first_column.as_str(), second_column.as_str())?.load(),
        None => {
            let stdin = io::stdin();
            prompt::load_interactive(&mut stdin.lock(), out)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let pair = if cli.json {
        // Keep stdout a single JSON document; prompts go to stderr.
        load(cli, &mut io::stderr())?
    } else {
        writeln!(out, "Two independent samples analysis")?;
        writeln!(out, "{}", "-".repeat(32))?;
        load(cli, &mut out)?
    };
    tracing::debug!(
        first = pair.first.len(),
        second = pair.second.len(),
        "samples loaded"
    );

    let report = twosample_stats::analyze(&pair.first, &pair.second)?;

    if cli.json {
        serde_json::to_writer_pretty(&mut out, &report).map_err(io::Error::from)?;
        writeln!(out)?;
    } else {
        writeln!(out)?;
        writeln!(out, "{report}")?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
