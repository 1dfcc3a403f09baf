use anyhow::{bail, Context, Result};
use clap::Parser;
use scour::{search, SearchConfig};
use std::io;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Recursive, concurrent content search
#[derive(Parser)]
#[command(name = "scour", version, about)]
struct Cli {
    /// Case-insensitive search
    #[arg(short = 'i', long)]
    ignore_case: bool,

    /// Invert the match: report lines that do not match
    #[arg(short = 'v', long)]
    invert_match: bool,

    /// Number of worker threads
    #[arg(short = 'j', long)]
    workers: Option<NonZeroUsize>,

    /// Path to a YAML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pattern to search for
    pattern: Option<String>,

    /// Root directories to search (default: current directory)
    roots: Vec<PathBuf>,
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Some(pattern) = cli.pattern else {
        bail!("no search term");
    };

    let mut config = SearchConfig::load_from(cli.config.as_deref())
        .context("failed to load configuration")?;
    config.pattern = pattern;
    config.roots = if cli.roots.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        cli.roots
    };
    config.case_insensitive = cli.ignore_case;
    config.invert_match = cli.invert_match;
    if let Some(workers) = cli.workers {
        config.workers = workers;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let stats = search(&config, &mut out)?;
    debug!(
        "{} matching lines in {} files",
        stats.matched_lines, stats.files_scanned
    );
    Ok(())
}
