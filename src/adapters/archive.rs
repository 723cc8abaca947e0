//! Web-archive lookup: when was a URL last captured?
//!
//! Uses the Wayback Machine availability API. Every failure (transport,
//! status, malformed JSON, no snapshot) collapses to `None`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{ProbeRequest, Transport};

/// Default availability endpoint
pub const WAYBACK_AVAILABLE_ENDPOINT: &str = "https://archive.org/wayback/available";

/// Trait for archive "last snapshot" lookups
#[async_trait]
pub trait ArchiveLookup: Send + Sync {
    /// Normalized timestamp (`YYYY-MM-DDThh:mm:ssZ`) of the latest snapshot
    async fn last_snapshot(&self, url: &str) -> Option<String>;
}

/// Response from the availability API
#[derive(Debug, Deserialize)]
struct AvailabilityResponse {
    #[serde(default)]
    archived_snapshots: ArchivedSnapshots,
}

#[derive(Debug, Default, Deserialize)]
struct ArchivedSnapshots {
    closest: Option<Snapshot>,
}

#[derive(Debug, Deserialize)]
struct Snapshot {
    timestamp: Option<String>,
    available: Option<bool>,
}

/// Wayback Machine client, issuing its GET through a `Transport`
pub struct WaybackArchive {
    transport: Arc<dyn Transport>,
    endpoint: String,
}

impl WaybackArchive {
    /// Create a client against an availability endpoint
    pub fn with_endpoint(transport: Arc<dyn Transport>, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
        }
    }

    /// Build the query URL, percent-encoding the target
    fn query_url(&self, target: &str) -> Option<String> {
        match url::Url::parse_with_params(&self.endpoint, &[("url", target)]) {
            Ok(url) => Some(url.into()),
            Err(e) => {
                warn!(endpoint = %self.endpoint, error = %e, "Invalid archive endpoint");
                None
            }
        }
    }
}

#[async_trait]
impl ArchiveLookup for WaybackArchive {
    async fn last_snapshot(&self, url: &str) -> Option<String> {
        let url = url.trim();
        if url.is_empty() {
            return None;
        }

        let query = self.query_url(url)?;
        let result = self.transport.probe(&ProbeRequest::get(query)).await;

        match result.http_status {
            Some(200) => {}
            Some(status) => {
                warn!(url, status, "Archive lookup returned non-200 status");
                return None;
            }
            None => {
                warn!(url, error = ?result.failure, "Archive lookup failed");
                return None;
            }
        }

        let snapshot = parse_availability(&result.body);
        debug!(url, snapshot = ?snapshot, "Archive lookup completed");
        snapshot
    }
}

/// Extract and normalize the closest snapshot's timestamp from an API body
pub fn parse_availability(body: &str) -> Option<String> {
    let response: AvailabilityResponse = match serde_json::from_str(body) {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "Malformed archive availability response");
            return None;
        }
    };

    let closest = response.archived_snapshots.closest?;
    if closest.available == Some(false) {
        return None;
    }

    normalize_timestamp(closest.timestamp.as_deref()?)
}

/// Convert a compact `YYYYMMDDhhmmss` timestamp to `YYYY-MM-DDThh:mm:ssZ`
pub fn normalize_timestamp(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.len() != 14 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    NaiveDateTime::parse_from_str(raw, "%Y%m%d%H%M%S")
        .ok()
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_timestamp() {
        assert_eq!(
            normalize_timestamp("20190412093015"),
            Some("2019-04-12T09:30:15Z".to_string())
        );
        assert_eq!(normalize_timestamp("2019041209301"), None);
        assert_eq!(normalize_timestamp("2019-04-12 09:3"), None);
        // month 13 does not exist
        assert_eq!(normalize_timestamp("20191312093015"), None);
    }

    #[test]
    fn test_parse_availability_with_snapshot() {
        let body = r#"{
            "url": "example.com/u/1",
            "archived_snapshots": {
                "closest": {
                    "status": "200",
                    "available": true,
                    "url": "http://web.archive.org/web/20200101120000/https://example.com/u/1",
                    "timestamp": "20200101120000"
                }
            }
        }"#;
        assert_eq!(
            parse_availability(body),
            Some("2020-01-01T12:00:00Z".to_string())
        );
    }

    #[test]
    fn test_parse_availability_without_snapshot() {
        assert_eq!(
            parse_availability(r#"{"url": "x", "archived_snapshots": {}}"#),
            None
        );
        assert_eq!(parse_availability(r#"{"url": "x"}"#), None);
        assert_eq!(parse_availability("<html>rate limited</html>"), None);
        assert_eq!(
            parse_availability(
                r#"{"archived_snapshots": {"closest": {"available": false, "timestamp": "20200101120000"}}}"#
            ),
            None
        );
    }
}
