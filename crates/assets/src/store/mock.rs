//! In-memory asset store for testing.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::Result;
use crate::key::validate as validate_key;
use crate::store::AssetStore;

/// In-memory asset store for testing.
///
/// Counts writes, so tests can assert that a warm cache is never written to.
#[derive(Default)]
pub struct MockStore {
    assets: Mutex<HashMap<String, Vec<u8>>>,
    puts: Mutex<usize>,
}
impl MockStore {
    /// Create a mock store pre-populated with assets.
    ///
    /// Panics if any key fails validation; test setup that is wrong should
    /// not be allowed to pass.
    pub fn with_assets(assets: impl IntoIterator<Item = (impl Into<String>, impl Into<Vec<u8>>)>) -> Self {
        let mut map = HashMap::new();
        for (key, data) in assets {
            let key = key.into();
            if validate_key(&key).is_err() {
                panic!("MockStore::with_assets: invalid key {key:?}");
            }
            map.insert(key, data.into());
        }
        Self {
            assets: Mutex::new(map),
            puts: Mutex::new(0),
        }
    }

    /// Contents stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.assets().get(key).cloned()
    }

    /// Number of stored assets.
    pub fn len(&self) -> usize {
        self.assets().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of times [`put`](AssetStore::put) was called.
    pub fn puts(&self) -> usize {
        *self.puts.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn assets(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.assets.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl AssetStore for MockStore {
    fn name(&self) -> &str {
        "mock"
    }

    fn has(&self, key: &str) -> Result<bool> {
        let key = validate_key(key)?;
        Ok(self.assets().contains_key(key))
    }

    fn put(&self, key: &str, data: &[u8]) -> Result<()> {
        let key = validate_key(key)?;
        self.assets().insert(key.to_string(), data.to_vec());
        *self.puts.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) += 1;
        Ok(())
    }
}
