use async_trait::async_trait;
use reqwest::{Request, Response};

/// Anything that can execute a prepared FIDS feed request.
///
/// The airport endpoints are plain GETs; wrappers such as
/// [`DefaultHeaders`](super::DefaultHeaders) rewrite the request before it
/// reaches the underlying client, and tests swap in a canned one.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
