//! Retrieval of remote assets.

mod http;
#[cfg(any(test, feature = "mock"))]
mod mock;

pub use self::http::HttpFetcher;
#[cfg(any(test, feature = "mock"))]
pub use self::mock::MockFetcher;
use crate::error::Result;

/// Something that can turn a URL into the bytes it points at.
pub trait Fetcher: Send + Sync {
    /// Download the body of `url`.
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}
