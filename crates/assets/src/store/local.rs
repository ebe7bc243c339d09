//! Local filesystem asset store.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ErrorKind, Result};
use crate::key::validate as validate_key;
use crate::store::AssetStore;

/// Stores assets as flat files inside a single directory.
///
/// # Examples
///
/// ```no_run
/// use blogmill_assets::store::LocalStore;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = LocalStore::new("images", "/srv/blog/images")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct LocalStore {
    name: String,
    root: PathBuf,
}
impl LocalStore {
    /// Create a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not absolute, or exists but is not a
    /// directory.
    pub fn new(name: impl Into<String>, root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_absolute() {
            exn::bail!(ErrorKind::InvalidRoot(root));
        }
        if root.exists() {
            if !root.is_dir() {
                exn::bail!(ErrorKind::InvalidRoot(root));
            }
        } else {
            fs::create_dir_all(&root).map_err(|e| Self::map_io_error(e, &root))?;
        }
        Ok(Self { name: name.into(), root })
    }

    fn absolute_path(&self, key: &str) -> Result<PathBuf> {
        Ok(self.root.join(validate_key(key)?))
    }

    fn map_io_error(e: std::io::Error, path: &Path) -> ErrorKind {
        match e.kind() {
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied(path.to_path_buf()),
            _ => ErrorKind::Io(e),
        }
    }
}

impl AssetStore for LocalStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn has(&self, key: &str) -> Result<bool> {
        let path = self.absolute_path(key)?;
        Ok(fs::exists(&path).map_err(|e| Self::map_io_error(e, &path))?)
    }

    fn put(&self, key: &str, data: &[u8]) -> Result<()> {
        let path = self.absolute_path(key)?;
        // A truncated file must never appear under the final key.
        let partial = path.with_extension("partial");
        fs::write(&partial, data).map_err(|e| Self::map_io_error(e, &partial))?;
        fs::rename(&partial, &path).map_err(|e| Self::map_io_error(e, &path))?;
        tracing::debug!(store = %self.name, path = %path.display(), bytes = data.len(), "Stored asset");
        Ok(())
    }
}
