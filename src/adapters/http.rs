//! HTTP probe adapter backed by reqwest.
//!
//! Every request carries a fixed browser-like header set and a bounded
//! timeout. Non-2xx statuses are ordinary results; only transport errors
//! are reported as failures. Requests that opt out of redirects go through
//! a second client that reports 3xx responses unchanged.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::redirect::Policy;
use reqwest::Method;
use tracing::{debug, warn};

use super::{HttpMethod, ProbeRequest, ProbeResult, Transport};

/// Desktop Chrome User-Agent sent when none is configured
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,application/json;q=0.8,*/*;q=0.7";
const BROWSER_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// reqwest-based transport
pub struct HttpProbe {
    client: reqwest::Client,
    no_redirect_client: reqwest::Client,
    timeout: Duration,
}

impl HttpProbe {
    /// Create a probe with the default User-Agent
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_user_agent(timeout, DEFAULT_USER_AGENT)
    }

    /// Create a probe with a custom User-Agent
    pub fn with_user_agent(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = build_client(timeout, user_agent, Policy::default())?;
        let no_redirect_client = build_client(timeout, user_agent, Policy::none())?;

        Ok(Self {
            client,
            no_redirect_client,
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn describe_error(&self, err: &reqwest::Error) -> String {
        if err.is_timeout() {
            format!("timed out after {:?}", self.timeout)
        } else if err.is_connect() {
            format!("connection failed: {}", err)
        } else {
            err.to_string()
        }
    }
}

fn build_client(timeout: Duration, user_agent: &str, redirects: Policy) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .default_headers(browser_headers())
        .user_agent(user_agent)
        .timeout(timeout)
        .redirect(redirects)
        .build()
        .context("Failed to build HTTP client")
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE),
    );
    headers
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Head => Method::HEAD,
        HttpMethod::Post => Method::POST,
    }
}

#[async_trait]
impl Transport for HttpProbe {
    fn name(&self) -> &str {
        "http"
    }

    async fn probe(&self, request: &ProbeRequest) -> ProbeResult {
        let client = if request.follow_redirects {
            &self.client
        } else {
            &self.no_redirect_client
        };
        let mut builder = client.request(to_reqwest_method(request.method), &request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                let reason = self.describe_error(&e);
                warn!(url = %request.url, error = %reason, "Probe failed");
                return ProbeResult::transport_failure(reason);
            }
        };

        let status = response.status().as_u16();
        debug!(url = %request.url, method = ?request.method, status, "Probe completed");

        // A body that cannot be read still leaves a valid status
        let body = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                warn!(url = %request.url, error = %e, "Failed to read response body");
                String::new()
            }
        };

        ProbeResult::response(status, body)
    }
}
