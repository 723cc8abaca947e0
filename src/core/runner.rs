//! Batch runner: every target against every platform, in input order.
//!
//! Each (platform, target) pair is isolated. The engine cannot fail, and
//! output write failures are logged and counted, never propagated.

use std::collections::HashMap;

use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::domain::{DeletionStatus, Target};
use crate::output::{ProbeLog, ResultsCsv};

use super::engine::InferenceEngine;
use super::platform::PlatformConfig;

/// Totals for one batch
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Tags every log line of the batch
    pub run_id: Uuid,

    pub targets: usize,

    /// (platform, target) pairs processed
    pub pairs: usize,

    /// Rows successfully appended to the results file
    pub rows_written: usize,

    /// Result rows that could not be written
    pub write_failures: usize,

    /// Pairs whose raw response log could not be written
    pub log_failures: usize,

    pub by_status: HashMap<DeletionStatus, usize>,
}

impl RunSummary {
    fn new(run_id: Uuid, targets: usize) -> Self {
        Self {
            run_id,
            targets,
            pairs: 0,
            rows_written: 0,
            write_failures: 0,
            log_failures: 0,
            by_status: HashMap::new(),
        }
    }

    /// Pairs that ended with the given status
    pub fn count(&self, status: DeletionStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}

/// Sequential batch runner
pub struct BatchRunner {
    engine: InferenceEngine,
    platforms: Vec<PlatformConfig>,
    results: ResultsCsv,
    probe_log: ProbeLog,
}

impl BatchRunner {
    pub fn new(
        engine: InferenceEngine,
        platforms: Vec<PlatformConfig>,
        results: ResultsCsv,
        probe_log: ProbeLog,
    ) -> Self {
        Self {
            engine,
            platforms,
            results,
            probe_log,
        }
    }

    /// Process every target against every platform
    #[instrument(skip(self, targets), fields(run_id = tracing::field::Empty))]
    pub async fn run(&mut self, targets: &[Target]) -> RunSummary {
        let run_id = Uuid::new_v4();
        tracing::Span::current().record("run_id", tracing::field::display(run_id));
        info!(
            targets = targets.len(),
            platforms = self.platforms.len(),
            "Starting batch"
        );

        let mut summary = RunSummary::new(run_id, targets.len());

        for target in targets {
            for platform in &self.platforms {
                let inference = self.engine.infer(platform, target).await;
                summary.pairs += 1;
                *summary
                    .by_status
                    .entry(inference.row.verdict.status)
                    .or_insert(0) += 1;

                match self.results.append(&inference.row) {
                    Ok(()) => summary.rows_written += 1,
                    Err(e) => {
                        error!(platform = %platform.name, error = %e, "Failed to write result row");
                        summary.write_failures += 1;
                    }
                }

                if let Err(e) = self
                    .probe_log
                    .append(&platform.key, &target.value, &inference.reset, &inference.signup)
                    .await
                {
                    warn!(platform = %platform.name, error = %e, "Failed to write probe log");
                    summary.log_failures += 1;
                }
            }
        }

        info!(
            pairs = summary.pairs,
            rows_written = summary.rows_written,
            write_failures = summary.write_failures,
            log_failures = summary.log_failures,
            "Batch complete"
        );

        summary
    }
}
