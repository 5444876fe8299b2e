use super::client::HttpClient;
use async_trait::async_trait;

/// Plain `reqwest` client that sends feed requests as given.
///
/// The FIDS endpoints reject requests without browser-like headers, so the
/// binary always wraps this in [`DefaultHeaders`](super::DefaultHeaders).
pub struct BasicClient(reqwest::Client);

impl BasicClient {
    pub fn new() -> Self {
        Self(reqwest::Client::new())
    }
}

impl Default for BasicClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.0.execute(req).await
    }
}
