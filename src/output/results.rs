//! Append-only results CSV.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::{ResultRow, RESULT_HEADER};

/// File name of the results CSV inside the results directory
pub const RESULTS_FILE_NAME: &str = "deletion_results.csv";

/// Writer for `deletion_results.csv`. Rows are only ever appended.
pub struct ResultsCsv {
    path: PathBuf,
    writer: csv::Writer<File>,
}

impl ResultsCsv {
    /// Open (or create) the results file, writing the header if it is new
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create results directory: {}", parent.display())
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open results file: {}", path.display()))?;

        let is_new = file
            .metadata()
            .with_context(|| format!("Failed to stat results file: {}", path.display()))?
            .len()
            == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if is_new {
            writer
                .write_record(RESULT_HEADER)
                .context("Failed to write results header")?;
            writer.flush().context("Failed to flush results header")?;
        }

        Ok(Self { path, writer })
    }

    /// Open `<dir>/deletion_results.csv`
    pub fn open_in(dir: impl AsRef<Path>) -> Result<Self> {
        Self::open(dir.as_ref().join(RESULTS_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row and flush it to disk
    pub fn append(&mut self, row: &ResultRow) -> Result<()> {
        self.writer
            .write_record(row.to_record())
            .with_context(|| format!("Failed to write result row to {}", self.path.display()))?;
        self.writer
            .flush()
            .with_context(|| format!("Failed to flush {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Target, TargetKind, Verdict};
    use tempfile::TempDir;

    fn row(value: &str) -> ResultRow {
        ResultRow::new(
            "Bumble",
            &Target::new(TargetKind::Email, value),
            Verdict::unknown("no signal, really"),
        )
    }

    #[test]
    fn test_header_written_once_across_opens() {
        let temp = TempDir::new().unwrap();

        {
            let mut out = ResultsCsv::open_in(temp.path().join("results")).unwrap();
            out.append(&row("a@b.com")).unwrap();
        }
        {
            let mut out = ResultsCsv::open_in(temp.path().join("results")).unwrap();
            out.append(&row("c@d.com")).unwrap();
        }

        let content =
            std::fs::read_to_string(temp.path().join("results").join(RESULTS_FILE_NAME)).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], RESULT_HEADER.join(","));
        assert!(lines[1].starts_with("Bumble,email,a@b.com,Unknown,Low,"));
        assert!(lines[2].contains("c@d.com"));
    }

    #[test]
    fn test_reason_with_comma_is_quoted() {
        let temp = TempDir::new().unwrap();
        let mut out = ResultsCsv::open(temp.path().join("out.csv")).unwrap();
        out.append(&row("a@b.com")).unwrap();

        let content = std::fs::read_to_string(out.path()).unwrap();
        assert!(content.contains("\"no signal, really\""));
    }
}
