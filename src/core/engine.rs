//! Platform inference engine.
//!
//! One routine shared by every platform: probe reset and signup, optionally
//! probe a known profile URL, then reduce the signals to a `Verdict`.
//!
//! Precedence:
//! 1. A gone profile (404/410) always yields `LikelyDeleted`
//!    (High with an archive snapshot, Medium without).
//! 2. Otherwise the reset/signup table decides, always at Low confidence.
//! 3. A transport failure on reset or signup leaves `Unknown`/Low.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::adapters::{ArchiveLookup, ProbeRequest, ProbeResult, Transport};
use crate::domain::{Confidence, DeletionStatus, ResultRow, Target, Verdict};

use super::platform::PlatformConfig;
use super::signals::{profile_state, ProfileState, Signals};

/// Reset/signup decision table
pub fn base_verdict(reset_accepted: bool, used_hint: bool) -> Verdict {
    match (reset_accepted, used_hint) {
        (true, false) => Verdict::new(
            DeletionStatus::PossiblyDeleted,
            Confidence::Low,
            "Reset accepted; signup did not flag identifier as in use",
        ),
        (false, false) => Verdict::new(
            DeletionStatus::NotFoundOrLongAgoDeleted,
            Confidence::Low,
            "Reset rejected; signup gave no in-use hint",
        ),
        (true, true) => Verdict::new(
            DeletionStatus::ActiveOrNotDeleted,
            Confidence::Low,
            "Reset accepted; signup suggests identifier in use",
        ),
        (false, true) => Verdict::unknown(
            "Contradictory signals: reset rejected but signup suggests identifier in use (anomalous)",
        ),
    }
}

/// Verdict for a profile URL that answered 404/410
fn profile_gone_verdict(status: u16, archive_last_seen: Option<&str>) -> Verdict {
    match archive_last_seen {
        Some(seen) => Verdict::new(
            DeletionStatus::LikelyDeleted,
            Confidence::High,
            format!(
                "Profile URL returned HTTP {}; archived snapshot last seen {}",
                status, seen
            ),
        ),
        None => Verdict::new(
            DeletionStatus::LikelyDeleted,
            Confidence::Medium,
            format!("Profile URL returned HTTP {}; no archived snapshot found", status),
        ),
    }
}

/// Reduce signals to the final verdict
pub fn decide(signals: &Signals) -> Verdict {
    if let Some(ProfileState::Gone(status)) = signals.profile {
        return profile_gone_verdict(status, signals.archive_last_seen.as_deref());
    }

    match (signals.reset_accepted, signals.signup_blocked) {
        (Some(reset_accepted), Some(used_hint)) => base_verdict(reset_accepted, used_hint),
        (None, None) => Verdict::unknown("Reset and signup probes failed; no signal"),
        (None, Some(_)) => Verdict::unknown("Reset probe failed; no signal"),
        (Some(_), None) => Verdict::unknown("Signup probe failed; no signal"),
    }
}

/// Everything one inference produced
#[derive(Debug, Clone)]
pub struct Inference {
    /// The output row
    pub row: ResultRow,

    pub signals: Signals,

    /// Raw reset probe
    pub reset: ProbeResult,

    /// Raw signup probe
    pub signup: ProbeResult,
}

/// Shared inference engine, parameterized per call by a `PlatformConfig`
pub struct InferenceEngine {
    transport: Arc<dyn Transport>,
    archive: Arc<dyn ArchiveLookup>,
}

impl InferenceEngine {
    pub fn new(transport: Arc<dyn Transport>, archive: Arc<dyn ArchiveLookup>) -> Self {
        Self { transport, archive }
    }

    /// Run all probes for one (platform, target) pair. Never fails.
    #[instrument(skip(self, platform, target), fields(platform = %platform.name, kind = %target.kind))]
    pub async fn infer(&self, platform: &PlatformConfig, target: &Target) -> Inference {
        let reset = self.transport.probe(&platform.reset_request(target)).await;
        let signup = self.transport.probe(&platform.signup_request(target)).await;

        let mut signals = Signals::from_probes(&reset, &signup);
        if signals.reset_accepted == Some(false) && signals.signup_blocked == Some(true) {
            warn!("Anomalous combination: reset rejected but signup flagged identifier in use");
        }

        let profile_url = target
            .profile_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty());

        if let Some(url) = profile_url {
            let state = profile_state(self.probe_profile(url).await.http_status);
            signals.profile = Some(state);

            if let ProfileState::Gone(_) = state {
                signals.archive_last_seen = self.archive.last_snapshot(url).await;
            }
        }

        let verdict = decide(&signals);
        info!(
            status = %verdict.status,
            confidence = %verdict.confidence,
            "Verdict reached"
        );

        let mut row = ResultRow::new(&platform.name, target, verdict);
        row.evidence_url = profile_url.map(str::to_string);
        row.archive_last_seen = signals.archive_last_seen.clone();
        row.reset_http_status = reset.http_status;

        Inference {
            row,
            signals,
            reset,
            signup,
        }
    }

    /// HEAD the profile, switching to GET when HEAD is not allowed
    /// Redirects are not followed: a 3xx stays a 3xx and reads as Unknown
    async fn probe_profile(&self, url: &str) -> ProbeResult {
        let head = self
            .transport
            .probe(&ProbeRequest::head(url).without_redirects())
            .await;
        match head.http_status {
            Some(405) | Some(501) => {
                self.transport
                    .probe(&ProbeRequest::get(url).without_redirects())
                    .await
            }
            _ => head,
        }
    }
}
