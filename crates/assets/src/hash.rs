//! Deterministic, content-addressed file naming for remote assets.
//!
//! The name of a cached asset is a pure function of its source URL: the same
//! URL always maps to the same file, so the presence of that file *is* the
//! cache index.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

/// Extension used when the URL's final segment has none.
pub const FALLBACK_EXTENSION: &str = "bin";

/// 64-bit FNV hash of the URL's characters.
///
/// Each Unicode scalar value is mixed in by multiplying by the prime first,
/// then xor-ing in the scalar value.
pub fn fnv64(input: &str) -> u64 {
    input.chars().fold(FNV_OFFSET_BASIS, |hash, c| hash.wrapping_mul(FNV_PRIME) ^ u64::from(c))
}

/// URL-safe base64 of the big-endian hash, without padding (11 characters).
///
/// ```rust
/// use blogmill_assets::content_hash;
/// assert_eq!(content_hash(""), "y_Kc5IQiIyU");
/// assert_eq!(content_hash("a"), "r2O9TIYBt74");
/// ```
pub fn content_hash(url: &str) -> String {
    URL_SAFE_NO_PAD.encode(fnv64(url).to_be_bytes())
}

/// Lowercase extension of the URL's last path segment, ignoring any query
/// string or fragment.
pub fn extension(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let segment = path.rsplit('/').next().unwrap_or_default();
    let (stem, ext) = segment.rsplit_once('.')?;
    match stem.is_empty() || ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        true => None,
        false => Some(ext.to_ascii_lowercase()),
    }
}

/// Cache file name for a URL: `<hash>.<extension>`.
///
/// ```rust
/// use blogmill_assets::filename;
/// assert_eq!(
///     filename("https://blogger.googleusercontent.com/img/b/abc/s220/photo.JPG"),
///     "foJ1ic68ScQ.jpg",
/// );
/// ```
pub fn filename(url: &str) -> String {
    let ext = extension(url).unwrap_or_else(|| FALLBACK_EXTENSION.to_string());
    format!("{}.{}", content_hash(url), ext)
}
