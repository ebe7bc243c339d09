//! Rewrite Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A rewrite error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for rewrite operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// Markup itself never fails to rewrite: anything a pass cannot make sense of
/// is left as it was. Only the external side effects can fail.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced image could not be stored in the asset cache.
    #[display("could not cache image {_0}")]
    Asset(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Asset(_) => true,
        }
    }
}
