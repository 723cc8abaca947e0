//! Archive Lookup Tests
//!
//! Wayback availability lookups over a scripted transport.

mod common;

use std::sync::Arc;

use common::ScriptedTransport;
use deletion_probe::adapters::HttpMethod;
use deletion_probe::{ArchiveLookup, ProbeResult, WaybackArchive};

const ENDPOINT: &str = "http://archive.test/wayback/available";

fn archive_answering(result: ProbeResult) -> (Arc<ScriptedTransport>, WaybackArchive) {
    let transport = Arc::new(ScriptedTransport::new().on(HttpMethod::Get, ENDPOINT, result));
    let archive = WaybackArchive::with_endpoint(transport.clone(), ENDPOINT);
    (transport, archive)
}

#[tokio::test]
async fn test_snapshot_found() {
    let body = r#"{"archived_snapshots":{"closest":{"available":true,"status":"200","timestamp":"20180715223344","url":"http://web.archive.org/web/20180715223344/https://bumble.com/u/1"}}}"#;
    let (transport, archive) = archive_answering(ProbeResult::response(200, body));

    let seen = archive.last_snapshot("https://bumble.com/u/1").await;
    assert_eq!(seen.as_deref(), Some("2018-07-15T22:33:44Z"));

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, HttpMethod::Get);
    assert!(calls[0].url.starts_with(ENDPOINT));
    // the target URL travels percent-encoded in the query
    assert!(calls[0].url.contains("url=https%3A%2F%2Fbumble.com%2Fu%2F1"));
}

#[tokio::test]
async fn test_no_snapshot() {
    let (_, archive) = archive_answering(ProbeResult::response(
        200,
        r#"{"url":"https://bumble.com/u/2","archived_snapshots":{}}"#,
    ));
    assert_eq!(archive.last_snapshot("https://bumble.com/u/2").await, None);
}

#[tokio::test]
async fn test_failures_collapse_to_none() {
    let (_, archive) = archive_answering(ProbeResult::response(503, "Service Unavailable"));
    assert_eq!(archive.last_snapshot("https://bumble.com/u/3").await, None);

    let (_, archive) = archive_answering(ProbeResult::transport_failure("timed out"));
    assert_eq!(archive.last_snapshot("https://bumble.com/u/3").await, None);

    let (_, archive) = archive_answering(ProbeResult::response(
        200,
        r#"{"archived_snapshots":{"closest":{"timestamp":"2018"}}}"#,
    ));
    assert_eq!(archive.last_snapshot("https://bumble.com/u/3").await, None);
}

#[tokio::test]
async fn test_empty_url_skips_request() {
    let (transport, archive) = archive_answering(ProbeResult::response(200, "{}"));
    assert_eq!(archive.last_snapshot("   ").await, None);
    assert!(transport.calls().is_empty());
}
