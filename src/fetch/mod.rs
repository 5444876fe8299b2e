mod basic;
mod client;
mod headers;

pub use basic::BasicClient;
pub use client::HttpClient;
pub use headers::DefaultHeaders;

use serde_json::Value;
use tracing::{debug, error};

use crate::error::FeedError;
use crate::parser::parse_payload;

/// GETs `url` and returns the body, treating any non-2xx status as a failure.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>, FeedError> {
    let url = reqwest::Url::parse(url).map_err(|e| FeedError::InvalidUrl {
        url: url.to_string(),
        message: e.to_string(),
    })?;
    let req = reqwest::Request::new(reqwest::Method::GET, url);

    let resp = client.execute(req).await?.error_for_status()?;
    Ok(resp.bytes().await?.to_vec())
}

/// Reads feed bytes from an `http(s)` URL or, for anything else, a local file.
pub async fn load_source<C: HttpClient>(client: &C, source: &str) -> Result<Vec<u8>, FeedError> {
    if is_url(source) {
        fetch_bytes(client, source).await
    } else {
        Ok(tokio::fs::read(source).await?)
    }
}

fn is_url(source: &str) -> bool {
    let lower = source.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Loads and parses one feed, keeping the typed error.
///
/// [`FeedError::step`] tells a failed fetch from a body that did not parse.
#[tracing::instrument(skip(client))]
pub async fn try_load_feed<C: HttpClient>(client: &C, source: &str) -> Result<Value, FeedError> {
    let bytes = load_source(client, source).await.inspect_err(|e| {
        error!(error = %e, "Feed fetch failed");
    })?;
    debug!(bytes = bytes.len(), "Feed bytes received, parsing");

    parse_payload(&bytes).inspect_err(|e| {
        error!(error = %e, "Feed parse failed");
    })
}

/// Loads and parses one feed.
///
/// Fetch and parse failures are logged and come back as `None`; the caller
/// decides whether a missing feed aborts the run.
pub async fn load_feed<C: HttpClient>(client: &C, source: &str) -> Option<Value> {
    try_load_feed(client, source).await.ok()
}
