//! `targets.csv` parsing.
//!
//! Format: `type,value,username,profile_url`. Fields are trimmed, rows with
//! a blank type or value are skipped, and repeated header rows are ignored.
//! Rows with an unknown type are skipped with a warning.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{info, warn};

use crate::domain::{Target, TargetKind, TargetParseError};

/// Expected input columns
pub const INPUT_HEADER: [&str; 4] = ["type", "value", "username", "profile_url"];

fn optional_field(record: &StringRecord, index: usize) -> Option<String> {
    record
        .get(index)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn is_header(record: &StringRecord) -> bool {
    matches!(
        (record.get(0), record.get(1)),
        (Some(t), Some(v)) if t.trim().eq_ignore_ascii_case("type") && v.trim().eq_ignore_ascii_case("value")
    )
}

/// Turn one record into a target.
///
/// `Ok(None)` means the row is blank or a header and should be skipped
/// silently.
pub fn parse_record(record: &StringRecord) -> Result<Option<Target>, TargetParseError> {
    if is_header(record) {
        return Ok(None);
    }

    let (kind, value) = match (optional_field(record, 0), optional_field(record, 1)) {
        (Some(kind), Some(value)) => (kind, value),
        _ => return Ok(None),
    };

    let kind: TargetKind = kind.parse()?;

    Ok(Some(Target {
        kind,
        value,
        username: optional_field(record, 2),
        profile_url: optional_field(record, 3),
    }))
}

/// Parse targets from any CSV reader
pub fn parse_targets<R: Read>(reader: R) -> Result<Vec<Target>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut targets = Vec::new();
    let mut skipped = 0usize;

    for (line, record) in csv_reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) if e.is_io_error() => {
                return Err(e).context("Failed to read targets");
            }
            Err(e) => {
                warn!(line = line + 1, error = %e, "Skipping malformed row");
                skipped += 1;
                continue;
            }
        };

        match parse_record(&record) {
            Ok(Some(target)) => targets.push(target),
            Ok(None) => {}
            Err(e) => {
                warn!(line = line + 1, error = %e, "Skipping row");
                skipped += 1;
            }
        }
    }

    info!(targets = targets.len(), skipped, "Loaded targets");
    Ok(targets)
}

/// Read targets from a file
pub fn read_targets(path: &Path) -> Result<Vec<Target>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open targets file: {}", path.display()))?;
    parse_targets(file)
}
