//! Core inference logic.
//!
//! This module contains:
//! - Signals: interpreting probe responses
//! - Platform: per-platform endpoints and payloads
//! - Engine: the shared decision procedure
//! - Runner: batch processing over targets × platforms

pub mod engine;
pub mod platform;
pub mod runner;
pub mod signals;

// Re-export commonly used types
pub use engine::{base_verdict, decide, Inference, InferenceEngine};
pub use platform::{builtin_platforms, select_platforms, PlatformConfig, PlatformError};
pub use runner::{BatchRunner, RunSummary};
pub use signals::{profile_state, signup_blocked, ProfileState, Signals};
