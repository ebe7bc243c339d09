//! Asset Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::io::Error as IoError;
use std::path::PathBuf;

/// An asset cache error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for asset cache operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Store root is not a usable directory.
    #[display("invalid store root: {}", _0.display())]
    InvalidRoot(#[error(not(source))] PathBuf),
    /// Cache key is not a plain file name.
    #[display("invalid cache key: {_0:?}")]
    InvalidKey(#[error(not(source))] String),
    /// Access denied while reading or writing the store.
    #[display("permission denied: {}", _0.display())]
    PermissionDenied(#[error(not(source))] PathBuf),
    /// Underlying I/O error
    #[display("I/O error: {_0}")]
    Io(IoError),
    /// The remote asset could not be retrieved.
    #[display("failed to fetch {_0}")]
    Fetch(#[error(not(source))] String),
    /// The remote server answered, but not with the asset.
    #[display("fetching {url} returned HTTP {status}")]
    HttpStatus {
        /// The URL that was requested.
        url: String,
        /// The HTTP status code returned.
        status: u16,
    },
    /// The HTTP client could not be constructed.
    #[display("HTTP client error")]
    Client,
}
impl From<IoError> for ErrorKind {
    fn from(err: IoError) -> Self {
        Self::Io(err)
    }
}

impl ErrorKind {
    /// Returns `true` if the remote asset could not be downloaded, as
    /// opposed to the store failing.
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch(_) | Self::HttpStatus { .. })
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Io(_) | Self::Fetch(_) => true,
            Self::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}
