//! Blocking HTTP fetcher.

use std::time::Duration;

use exn::ResultExt;
use reqwest::blocking::Client;

use crate::error::{ErrorKind, Result};
use crate::fetch::Fetcher;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches assets over HTTP(S), one request at a time.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}
impl HttpFetcher {
    /// Build a fetcher with a fixed user agent and request timeout.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(HTTP_TIMEOUT)
            .build()
            .or_raise(|| ErrorKind::Client)?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    #[tracing::instrument(level = "debug", skip(self), fields(bytes))]
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().or_raise(|| ErrorKind::Fetch(url.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            exn::bail!(ErrorKind::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.bytes().or_raise(|| ErrorKind::Fetch(url.to_string()))?;
        tracing::Span::current().record("bytes", body.len());
        Ok(body.to_vec())
    }
}
