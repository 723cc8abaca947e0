//! deletion-probe - best-effort dating-account deletion inference
//!
//! For each identifier (email, phone or username) and each supported
//! platform, the tool probes the password-reset and signup endpoints and,
//! when a profile URL is known, checks it for 404/410 and looks up its
//! last web-archive snapshot. The signals are reduced to a deletion status
//! with a confidence level. Results are hints, not facts.
//!
//! # Modules
//!
//! - `adapters`: HTTP transport and web-archive lookup
//! - `core`: Signal extraction, platform configs, inference engine, batch runner
//! - `domain`: Data structures (Target, Verdict, ResultRow)
//! - `ingest`: targets.csv parsing
//! - `output`: results CSV and probe logs
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # targets.csv: type,value,username,profile_url
//! deletion-probe
//!
//! # Only two platforms, shorter timeout
//! deletion-probe --platform tinder --platform match --timeout 5
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod ingest;
pub mod output;

// Re-export main types at crate root for convenience
pub use crate::adapters::{ArchiveLookup, HttpProbe, ProbeRequest, ProbeResult, Transport, WaybackArchive};
pub use crate::core::{BatchRunner, InferenceEngine, PlatformConfig, RunSummary};
pub use crate::domain::{Confidence, DeletionStatus, ResultRow, Target, TargetKind, Verdict};
