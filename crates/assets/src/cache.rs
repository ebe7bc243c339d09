//! The asset cache: content-addressed names on top of a store and a fetcher.

use crate::error::Result;
use crate::hash::filename;
use crate::{FetcherHandle, StoreHandle};

/// Default public prefix for cached asset references.
pub const DEFAULT_PREFIX: &str = "images";

/// Outcome of [`AssetCache::materialize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// Path to write into markup, `<prefix>/<filename>`.
    pub reference: String,
    /// `true` when the asset was downloaded during this call, `false` when
    /// the store already had it.
    pub fetched: bool,
}

/// Downloads each distinct remote asset at most once, and hands out the
/// stable reference it is published under.
pub struct AssetCache {
    store: StoreHandle,
    fetcher: FetcherHandle,
    prefix: String,
}
impl AssetCache {
    pub fn new(store: StoreHandle, fetcher: FetcherHandle) -> Self {
        Self::with_prefix(store, fetcher, DEFAULT_PREFIX)
    }

    /// Use `prefix` instead of `images` in front of generated references.
    /// Surrounding slashes are dropped.
    pub fn with_prefix(store: StoreHandle, fetcher: FetcherHandle, prefix: impl AsRef<str>) -> Self {
        Self {
            store,
            fetcher,
            prefix: prefix.as_ref().trim_matches('/').to_string(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Public reference for `url`; pure, nothing is fetched.
    pub fn reference(&self, url: &str) -> String {
        format!("{}/{}", self.prefix, filename(url))
    }

    /// Make sure the asset named after `url` is in the store, downloading it
    /// from `download_from` if it is not.
    ///
    /// The name is always derived from `url`, so a different download
    /// location (for example a larger rendition) does not change the cache
    /// key.
    #[tracing::instrument(level = "debug", skip(self), fields(key, fetched))]
    pub fn materialize(&self, url: &str, download_from: &str) -> Result<Asset> {
        let key = filename(url);
        tracing::Span::current().record("key", key.as_str());
        let fetched = if self.store.has(&key)? {
            false
        } else {
            let data = self.fetcher.fetch(download_from)?;
            self.store.put(&key, &data)?;
            tracing::info!(url = download_from, key = %key, store = self.store.name(), "Cached remote asset");
            true
        };
        tracing::Span::current().record("fetched", fetched);
        Ok(Asset {
            reference: format!("{}/{}", self.prefix, key),
            fetched,
        })
    }

    /// Shorthand for [`materialize`](Self::materialize) when the asset is
    /// downloaded from the URL it is named after.
    pub fn resolve(&self, url: &str) -> Result<Asset> {
        self.materialize(url, url)
    }
}
