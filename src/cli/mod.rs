//! Command-line interface for deletion-probe.
//!
//! With no flags, reads `targets.csv` from the working directory and
//! appends to `results/deletion_results.csv` and `logs/`.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::adapters::{HttpProbe, Transport, WaybackArchive};
use crate::config::{self, ResolvedConfig};
use crate::core::{select_platforms, BatchRunner, InferenceEngine, RunSummary};
use crate::domain::DeletionStatus;
use crate::ingest::{read_targets, INPUT_HEADER};
use crate::output::{ProbeLog, ResultsCsv};

/// deletion-probe - infer whether dating accounts were deleted
#[derive(Parser, Debug, Default)]
#[command(name = "deletion-probe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Targets CSV (default: targets.csv)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory for deletion_results.csv (default: results)
    #[arg(long)]
    pub results_dir: Option<PathBuf>,

    /// Directory for raw probe logs (default: logs)
    #[arg(long)]
    pub logs_dir: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Restrict to a platform (repeatable): bumble, tinder, pof, ashleymadison, match
    #[arg(short, long = "platform")]
    pub platforms: Vec<String>,
}

impl Cli {
    /// Layer CLI flags over the resolved configuration
    pub fn apply(&self, config: &mut ResolvedConfig) {
        if let Some(ref input) = self.input {
            config.input = input.clone();
        }
        if let Some(ref dir) = self.results_dir {
            config.results_dir = dir.clone();
        }
        if let Some(ref dir) = self.logs_dir {
            config.logs_dir = dir.clone();
        }
        if let Some(secs) = self.timeout {
            config.timeout = Duration::from_secs(secs);
        }
        if !self.platforms.is_empty() {
            config.platforms = self.platforms.clone();
        }
    }

    /// Execute the batch
    pub async fn execute(self) -> Result<()> {
        let mut cfg = match config::load() {
            Ok(cfg) => cfg,
            Err(e) => {
                // A missing input still gets the usage text, not the config error
                let mut fallback = ResolvedConfig::default();
                self.apply(&mut fallback);
                if !fallback.input.is_file() {
                    exit_with_usage(&fallback.input);
                }
                return Err(e);
            }
        };
        self.apply(&mut cfg);

        if !cfg.input.is_file() {
            exit_with_usage(&cfg.input);
        }

        let summary = run_batch(&cfg).await?;
        print_completion(&cfg, &summary);

        Ok(())
    }
}

fn exit_with_usage(input: &Path) -> ! {
    eprintln!("Input file not found: {}", input.display());
    eprintln!();
    eprintln!("{}", usage());
    std::process::exit(1);
}

fn usage() -> String {
    format!(
        "Usage: deletion-probe [--input <file>] [--results-dir <dir>] [--logs-dir <dir>] \
         [--timeout <secs>] [--platform <name>]...\n\n\
         Place a targets.csv in the working directory with the header:\n  {}",
        INPUT_HEADER.join(",")
    )
}

/// Load targets, wire up the engine and process every pair
pub async fn run_batch(cfg: &ResolvedConfig) -> Result<RunSummary> {
    let targets = read_targets(&cfg.input)?;
    let platforms = select_platforms(&cfg.platforms)?;

    let transport: Arc<dyn Transport> = Arc::new(
        HttpProbe::with_user_agent(cfg.timeout, &cfg.user_agent)
            .context("Failed to initialise HTTP transport")?,
    );
    let archive = Arc::new(WaybackArchive::with_endpoint(
        transport.clone(),
        cfg.archive_endpoint.clone(),
    ));
    let engine = InferenceEngine::new(transport, archive);

    let results = ResultsCsv::open_in(&cfg.results_dir)?;
    let probe_log = ProbeLog::new(&cfg.logs_dir);

    info!(
        input = %cfg.input.display(),
        timeout = ?cfg.timeout,
        config_file = ?cfg.config_file,
        "Configuration loaded"
    );

    let mut runner = BatchRunner::new(engine, platforms, results, probe_log);
    Ok(runner.run(&targets).await)
}

fn print_completion(cfg: &ResolvedConfig, summary: &RunSummary) {
    println!(
        "Done. Checked {} target(s), {} platform check(s).",
        summary.targets, summary.pairs
    );
    for status in DeletionStatus::ALL {
        let count = summary.count(status);
        if count > 0 {
            println!("  {:<32} {}", status.label(), count);
        }
    }
    if summary.write_failures > 0 {
        println!(
            "  Warning: {} result row(s) could not be written",
            summary.write_failures
        );
    }
    if summary.log_failures > 0 {
        println!(
            "  Warning: {} response log(s) could not be written",
            summary.log_failures
        );
    }
    println!(
        "Results: {}",
        cfg.results_dir
            .join(crate::output::RESULTS_FILE_NAME)
            .display()
    );
    println!("Logs:    {}", cfg.logs_dir.display());
}
