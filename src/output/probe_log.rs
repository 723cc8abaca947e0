//! Raw probe body logs, one file per (platform, target).
//!
//! Best-effort: empty bodies are skipped; callers count failures and carry on.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::adapters::ProbeResult;

/// Replace every character outside `[A-Za-z0-9._-]` with `_`
pub fn sanitize(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Directory of `<platform>_<sanitized-value>.log` files
pub struct ProbeLog {
    dir: PathBuf,
}

impl ProbeLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Log file for a platform key and target value
    pub fn path_for(&self, platform_key: &str, value: &str) -> PathBuf {
        self.dir
            .join(format!("{}_{}.log", platform_key, sanitize(value)))
    }

    /// Append the reset and signup bodies under separator banners.
    ///
    /// Returns the path written, or `None` if both bodies were empty.
    pub async fn append(
        &self,
        platform_key: &str,
        value: &str,
        reset: &ProbeResult,
        signup: &ProbeResult,
    ) -> Result<Option<PathBuf>> {
        let mut entry = String::new();
        for (label, probe) in [("RESET", reset), ("SIGNUP", signup)] {
            if probe.body.is_empty() {
                continue;
            }
            let status = probe
                .http_status
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string());
            entry.push_str(&format!(
                "===== {} | HTTP {} | {} =====\n{}\n",
                label,
                status,
                Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
                probe.body.trim_end()
            ));
        }

        if entry.is_empty() {
            return Ok(None);
        }

        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create logs directory: {}", self.dir.display()))?;

        let path = self.path_for(platform_key, value);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .with_context(|| format!("Failed to open probe log: {}", path.display()))?;

        file.write_all(entry.as_bytes())
            .await
            .with_context(|| format!("Failed to write probe log: {}", path.display()))?;
        file.flush().await.context("Failed to flush probe log")?;

        Ok(Some(path))
    }
}
