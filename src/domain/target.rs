//! Input targets: one identifier to check across every platform.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of identifier a target carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Email,
    Phone,
    Username,
}

impl TargetKind {
    /// Lowercase name used in the input and output files
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::Email => "email",
            TargetKind::Phone => "phone",
            TargetKind::Username => "username",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while turning raw input fields into a target
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetParseError {
    #[error("Unknown target type: {0:?} (expected email, phone or username)")]
    UnknownKind(String),
}

impl FromStr for TargetKind {
    type Err = TargetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "email" => Ok(TargetKind::Email),
            "phone" => Ok(TargetKind::Phone),
            "username" => Ok(TargetKind::Username),
            other => Err(TargetParseError::UnknownKind(other.to_string())),
        }
    }
}

/// One input row. Never mutated after parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Identifier kind
    pub kind: TargetKind,

    /// The identifier itself (email address, phone number or username)
    pub value: String,

    /// Optional username associated with the identifier
    pub username: Option<String>,

    /// Optional known profile URL, enables the liveness probe
    pub profile_url: Option<String>,
}

impl Target {
    /// Create a target with no username or profile URL
    pub fn new(kind: TargetKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            username: None,
            profile_url: None,
        }
    }

    /// Attach a username
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Attach a known profile URL
    pub fn with_profile_url(mut self, url: impl Into<String>) -> Self {
        self.profile_url = Some(url.into());
        self
    }

    /// Username to send in payloads: the explicit one, or the value itself
    /// for username targets
    pub fn effective_username(&self) -> Option<&str> {
        match (&self.username, self.kind) {
            (Some(name), _) => Some(name.as_str()),
            (None, TargetKind::Username) => Some(self.value.as_str()),
            (None, _) => None,
        }
    }
}
