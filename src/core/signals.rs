//! Signal extraction from probe results.
//!
//! The only place where raw response text or status codes are interpreted.
//! Everything downstream works on `Signals`.

use std::sync::OnceLock;

use regex::Regex;

use crate::adapters::ProbeResult;

/// Phrases meaning "this identifier is already registered"
const IN_USE_PATTERN: &str = r"(?i)\b(already\s+(in\s+use|registered|exists|taken)|in\s+use|exists|registered|already\s+have\s+an\s+account)\b";

fn in_use_regex() -> &'static Regex {
    static IN_USE: OnceLock<Regex> = OnceLock::new();
    IN_USE.get_or_init(|| Regex::new(IN_USE_PATTERN).expect("in-use pattern is valid"))
}

/// Does a signup response body say the identifier is already registered?
///
/// A weak signal: most generic signup endpoints never say so.
pub fn signup_blocked(body: &str) -> bool {
    in_use_regex().is_match(body)
}

/// Liveness of a known profile URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileState {
    /// 200
    Alive,
    /// 404 or 410, carrying the status
    Gone(u16),
    /// Redirects, blocks, errors, transport failure
    Unknown,
}

/// Classify a profile fetch's status code
pub fn profile_state(http_status: Option<u16>) -> ProfileState {
    match http_status {
        Some(200) => ProfileState::Alive,
        Some(status @ (404 | 410)) => ProfileState::Gone(status),
        _ => ProfileState::Unknown,
    }
}

/// Typed facts the decision table consumes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signals {
    /// Reset answered 200; `None` when the reset probe failed in transport
    pub reset_accepted: Option<bool>,

    /// Signup flagged the identifier as in use; `None` on transport failure
    pub signup_blocked: Option<bool>,

    /// Profile liveness; `None` when no profile URL was supplied
    pub profile: Option<ProfileState>,

    /// Archive last-seen, only looked up for gone profiles
    pub archive_last_seen: Option<String>,
}

impl Signals {
    /// Derive the reset and signup signals
    pub fn from_probes(reset: &ProbeResult, signup: &ProbeResult) -> Self {
        Self {
            reset_accepted: reset.http_status.map(|status| status == 200),
            signup_blocked: signup
                .http_status
                .map(|_| signup_blocked(&signup.body)),
            profile: None,
            archive_last_seen: None,
        }
    }
}
