//! One output record per (platform, target) pair.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::target::{Target, TargetKind};
use super::verdict::Verdict;

/// Column names of the results file, in order
pub const RESULT_HEADER: [&str; 10] = [
    "Platform",
    "Type",
    "Value",
    "Deletion_Status",
    "Confidence",
    "Reason",
    "Evidence_URL",
    "Wayback_LastSeen",
    "HTTP_Code",
    "Timestamp",
];

/// A single result row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    /// Platform display name
    pub platform: String,

    pub kind: TargetKind,

    pub value: String,

    pub verdict: Verdict,

    /// Profile URL, when the liveness probe ran
    pub evidence_url: Option<String>,

    /// Normalized archive timestamp of the last snapshot
    pub archive_last_seen: Option<String>,

    /// Status of the reset probe, absent on transport failure
    pub reset_http_status: Option<u16>,

    /// When the verdict was produced
    pub timestamp: DateTime<Utc>,
}

impl ResultRow {
    /// Start a row for a target with the given verdict, stamped now
    pub fn new(platform: &str, target: &Target, verdict: Verdict) -> Self {
        Self {
            platform: platform.to_string(),
            kind: target.kind,
            value: target.value.clone(),
            verdict,
            evidence_url: None,
            archive_last_seen: None,
            reset_http_status: None,
            timestamp: Utc::now(),
        }
    }

    /// Render the row as CSV fields in `RESULT_HEADER` order
    pub fn to_record(&self) -> [String; 10] {
        [
            self.platform.clone(),
            self.kind.to_string(),
            self.value.clone(),
            self.verdict.status.to_string(),
            self.verdict.confidence.to_string(),
            self.verdict.reason.clone(),
            self.evidence_url.clone().unwrap_or_default(),
            self.archive_last_seen.clone().unwrap_or_default(),
            self.reset_http_status
                .map(|code| code.to_string())
                .unwrap_or_default(),
            self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::verdict::{Confidence, DeletionStatus};

    #[test]
    fn test_record_blanks_missing_fields() {
        let target = Target::new(TargetKind::Phone, "+15550100");
        let row = ResultRow::new("Tinder", &target, Verdict::unknown("no signal"));

        let record = row.to_record();
        assert_eq!(record[0], "Tinder");
        assert_eq!(record[1], "phone");
        assert_eq!(record[2], "+15550100");
        assert_eq!(record[3], "Unknown");
        assert_eq!(record[4], "Low");
        assert_eq!(record[6], "");
        assert_eq!(record[7], "");
        assert_eq!(record[8], "");
        assert!(record[9].ends_with('Z'));
    }

    #[test]
    fn test_record_populated_fields() {
        let target = Target::new(TargetKind::Email, "a@b.com");
        let mut row = ResultRow::new(
            "Match",
            &target,
            Verdict::new(DeletionStatus::LikelyDeleted, Confidence::High, "gone"),
        );
        row.evidence_url = Some("https://match.com/profile/1".to_string());
        row.archive_last_seen = Some("2021-03-04T05:06:07Z".to_string());
        row.reset_http_status = Some(200);

        let record = row.to_record();
        assert_eq!(record[3], "Likely Deleted");
        assert_eq!(record[4], "High");
        assert_eq!(record[6], "https://match.com/profile/1");
        assert_eq!(record[7], "2021-03-04T05:06:07Z");
        assert_eq!(record[8], "200");
        assert_eq!(record.len(), RESULT_HEADER.len());
    }
}
