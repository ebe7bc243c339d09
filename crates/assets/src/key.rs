//! Cache key validation.
//!
//! Keys are flat file names inside the store root. Anything that could
//! address a different directory is rejected before it reaches a backend.

use std::path::{Component, Path};

use crate::error::{ErrorKind, Result};

/// Validates a cache key, returning it unchanged when it is a single,
/// normal path component.
///
/// # Examples
///
/// ```
/// use blogmill_assets::validate_key;
/// assert!(validate_key("y_Kc5IQiIyU.png").is_ok());
/// assert!(validate_key("images/y_Kc5IQiIyU.png").is_err());
/// assert!(validate_key("..").is_err());
/// assert!(validate_key("a\0b").is_err());
/// ```
pub fn validate(key: &str) -> Result<&str> {
    // Null bytes pass through Path::components() on Unix but cause
    // truncation in C-based syscalls; reject them explicitly.
    if key.contains(['\0', '\\']) {
        exn::bail!(ErrorKind::InvalidKey(key.to_string()));
    }
    let mut components = Path::new(key).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) if name == key => Ok(key),
        _ => exn::bail!(ErrorKind::InvalidKey(key.to_string())),
    }
}
