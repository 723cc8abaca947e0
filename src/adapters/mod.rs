//! Adapter interfaces for external systems.
//!
//! Adapters provide a unified interface for the network calls the engine
//! depends on: single HTTP probes and web-archive lookups.

pub mod archive;
pub mod http;

use async_trait::async_trait;
use serde_json::Value;

// Re-export the concrete adapters
pub use archive::{ArchiveLookup, WaybackArchive};
pub use http::HttpProbe;

/// HTTP methods the probes use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Head,
    Post,
}

/// One request to issue
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeRequest {
    pub method: HttpMethod,
    pub url: String,
    /// Extra headers, sent on top of the transport's browser header set
    pub headers: Vec<(String, String)>,
    /// JSON body, if any
    pub body: Option<Value>,
    /// Follow 3xx responses to their final destination
    pub follow_redirects: bool,
}

impl ProbeRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            follow_redirects: true,
        }
    }

    pub fn head(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Head,
            ..Self::get(url)
        }
    }

    /// JSON POST
    pub fn post_json(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: Some(body),
            follow_redirects: true,
        }
    }

    /// Report a 3xx as-is instead of chasing its `Location`
    pub fn without_redirects(mut self) -> Self {
        self.follow_redirects = false;
        self
    }
}

/// Outcome of one HTTP call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeResult {
    /// Response status; `None` means the request never completed
    pub http_status: Option<u16>,

    /// Response body (empty for HEAD or on failure)
    pub body: String,

    /// Transport error description, when `http_status` is `None`
    pub failure: Option<String>,
}

impl ProbeResult {
    /// A completed HTTP exchange, whatever its status
    pub fn response(status: u16, body: impl Into<String>) -> Self {
        Self {
            http_status: Some(status),
            body: body.into(),
            failure: None,
        }
    }

    /// A transport-level failure (DNS, connect, timeout)
    pub fn transport_failure(reason: impl Into<String>) -> Self {
        Self {
            http_status: None,
            body: String::new(),
            failure: Some(reason.into()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.http_status.is_none()
    }
}

/// Trait for issuing single HTTP probes.
///
/// Implementations must not fail on 4xx/5xx statuses; only transport
/// failures produce a `ProbeResult` without a status. No retries.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Human-readable transport name
    fn name(&self) -> &str;

    /// Issue exactly one request
    async fn probe(&self, request: &ProbeRequest) -> ProbeResult;
}
