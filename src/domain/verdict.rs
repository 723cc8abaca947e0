//! Deletion verdicts produced per (platform, target) pair.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Inferred account state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletionStatus {
    /// Signals missing or contradictory
    Unknown,

    /// Reset accepted but signup did not flag the identifier
    PossiblyDeleted,

    /// Reset rejected and no in-use hint
    NotFoundOrLongAgoDeleted,

    /// Reset accepted and signup says the identifier is taken
    ActiveOrNotDeleted,

    /// Known profile URL is gone
    LikelyDeleted,
}

impl DeletionStatus {
    /// Every status, in output order
    pub const ALL: [DeletionStatus; 5] = [
        DeletionStatus::Unknown,
        DeletionStatus::PossiblyDeleted,
        DeletionStatus::NotFoundOrLongAgoDeleted,
        DeletionStatus::ActiveOrNotDeleted,
        DeletionStatus::LikelyDeleted,
    ];

    /// Label written to the results file
    pub fn label(&self) -> &'static str {
        match self {
            DeletionStatus::Unknown => "Unknown",
            DeletionStatus::PossiblyDeleted => "Possibly Deleted",
            DeletionStatus::NotFoundOrLongAgoDeleted => "Not Found or Long Ago Deleted",
            DeletionStatus::ActiveOrNotDeleted => "Active or Not Deleted",
            DeletionStatus::LikelyDeleted => "Likely Deleted",
        }
    }
}

impl fmt::Display for DeletionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Confidence attached to a verdict. Ordered: `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Confidence::Low => "Low",
            Confidence::Medium => "Medium",
            Confidence::High => "High",
        })
    }
}

/// Status, confidence and a human-readable reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub status: DeletionStatus,
    pub confidence: Confidence,
    pub reason: String,
}

impl Verdict {
    pub fn new(status: DeletionStatus, confidence: Confidence, reason: impl Into<String>) -> Self {
        Self {
            status,
            confidence,
            reason: reason.into(),
        }
    }

    /// The fallback verdict for missing or contradictory signals
    pub fn unknown(reason: impl Into<String>) -> Self {
        Self::new(DeletionStatus::Unknown, Confidence::Low, reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_ordering() {
        assert!(Confidence::Low < Confidence::Medium);
        assert!(Confidence::Medium < Confidence::High);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(DeletionStatus::LikelyDeleted.to_string(), "Likely Deleted");
        assert_eq!(
            DeletionStatus::NotFoundOrLongAgoDeleted.to_string(),
            "Not Found or Long Ago Deleted"
        );
        assert_eq!(Confidence::Medium.to_string(), "Medium");
    }
}
