//! Domain types for deletion-probe.
//!
//! This module contains the core data structures:
//! - Target: an identifier to check
//! - Verdict: deletion status + confidence + reason
//! - ResultRow: one output record per (platform, target)

pub mod result_row;
pub mod target;
pub mod verdict;

// Re-export commonly used types
pub use result_row::{ResultRow, RESULT_HEADER};
pub use target::{Target, TargetKind, TargetParseError};
pub use verdict::{Confidence, DeletionStatus, Verdict};
