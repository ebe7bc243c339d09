//! Content-addressed asset stores.
//!
//! A store only needs to answer two questions: "do you already have this
//! key?" and "keep these bytes under this key". Keys are content-addressed
//! (see [`filename`](crate::filename)), so a key that exists never needs to
//! be written again and nothing is ever evicted.

mod local;
#[cfg(any(test, feature = "mock"))]
mod mock;

pub use self::local::LocalStore;
#[cfg(any(test, feature = "mock"))]
pub use self::mock::MockStore;
use crate::error::Result;

/// Unified interface for asset stores.
///
/// # Examples
///
/// ```
/// use blogmill_assets::{error::Result, store::AssetStore};
///
/// fn store_once(store: &dyn AssetStore, key: &str, data: &[u8]) -> Result<bool> {
///     if store.has(key)? {
///         return Ok(false);
///     }
///     store.put(key, data)?;
///     Ok(true)
/// }
/// ```
pub trait AssetStore: Send + Sync {
    /// Name of the store, for logging.
    fn name(&self) -> &str;

    /// Check whether an asset is already stored under `key`.
    fn has(&self, key: &str) -> Result<bool>;

    /// Store `data` under `key`, replacing anything already there.
    fn put(&self, key: &str, data: &[u8]) -> Result<()>;
}
