//! Content-addressed cache for remote images.
//!
//! Every remote asset is stored under a name derived from its URL alone, so
//! re-running over the same export finds everything already in place and
//! downloads nothing.

mod cache;
pub mod error;
pub mod fetch;
mod hash;
mod key;
pub mod store;

use std::sync::Arc;

pub use crate::cache::{Asset, AssetCache, DEFAULT_PREFIX};
pub use crate::fetch::Fetcher;
pub use crate::hash::{FALLBACK_EXTENSION, content_hash, extension, filename, fnv64};
pub use crate::key::validate as validate_key;
pub use crate::store::AssetStore;

pub type StoreHandle = Arc<dyn AssetStore>;
pub type FetcherHandle = Arc<dyn Fetcher>;
