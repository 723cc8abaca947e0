//! Scripted transport and archive for integration tests. No network.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use deletion_probe::adapters::HttpMethod;
use deletion_probe::{ArchiveLookup, ProbeRequest, ProbeResult, Transport};

/// Answers requests by (method, URL prefix); first rule wins.
/// Unscripted requests fail at the transport level.
#[derive(Default)]
pub struct ScriptedTransport {
    rules: Vec<(HttpMethod, String, ProbeResult)>,
    calls: Mutex<Vec<ProbeRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, method: HttpMethod, url_prefix: &str, result: ProbeResult) -> Self {
        self.rules.push((method, url_prefix.to_string(), result));
        self
    }

    pub fn on_post(self, url: &str, status: u16, body: &str) -> Self {
        self.on(HttpMethod::Post, url, ProbeResult::response(status, body))
    }

    pub fn on_head(self, url: &str, status: u16) -> Self {
        self.on(HttpMethod::Head, url, ProbeResult::response(status, ""))
    }

    pub fn calls(&self) -> Vec<ProbeRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn probe(&self, request: &ProbeRequest) -> ProbeResult {
        self.calls.lock().unwrap().push(request.clone());
        self.rules
            .iter()
            .find(|(method, prefix, _)| *method == request.method && request.url.starts_with(prefix))
            .map(|(_, _, result)| result.clone())
            .unwrap_or_else(|| ProbeResult::transport_failure("unscripted request"))
    }
}

/// Archive with fixed snapshots per URL
#[derive(Default)]
pub struct StaticArchive {
    snapshots: HashMap<String, String>,
    lookups: Mutex<Vec<String>>,
}

impl StaticArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(mut self, url: &str, last_seen: &str) -> Self {
        self.snapshots.insert(url.to_string(), last_seen.to_string());
        self
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArchiveLookup for StaticArchive {
    async fn last_snapshot(&self, url: &str) -> Option<String> {
        self.lookups.lock().unwrap().push(url.to_string());
        self.snapshots.get(url).cloned()
    }
}
