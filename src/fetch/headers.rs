use crate::fetch::client::HttpClient;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderValue, USER_AGENT};

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/64.0.3282.186 Safari/537.36";
const DEFAULT_ACCEPT: &str = "application/json, text/javascript, */*; q=0.01";

/// An [`HttpClient`] wrapper that fills in the `User-Agent` and `Accept`
/// headers the FIDS endpoints expect.
///
/// Headers already present on the request are left untouched.
pub struct DefaultHeaders<C> {
    pub inner: C,
    user_agent: HeaderValue,
    accept: HeaderValue,
}

impl<C> DefaultHeaders<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            user_agent: HeaderValue::from_static(DEFAULT_USER_AGENT),
            accept: HeaderValue::from_static(DEFAULT_ACCEPT),
        }
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for DefaultHeaders<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        let headers = req.headers_mut();
        headers
            .entry(USER_AGENT)
            .or_insert_with(|| self.user_agent.clone());
        headers.entry(ACCEPT).or_insert_with(|| self.accept.clone());
        self.inner.execute(req).await
    }
}
