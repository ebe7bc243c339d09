//! Library Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A library error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Classifies the origin of a pipeline failure.
///
/// ### Operational Errors
/// - [`ErrorKind::DuplicateId`]
/// - [`ErrorKind::Uncommitted`]
///
/// ### Dependency Errors
/// - [`ErrorKind::Read`]
/// - [`ErrorKind::Export`]
/// - [`ErrorKind::Rewrite`]
/// - [`ErrorKind::Write`]
/// - [`ErrorKind::Serialize`]
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The export document could not be read from disk.
    #[display("could not read export {}", _0.display())]
    Read(#[error(not(source))] PathBuf),
    /// The export document is not a valid Blogger export.
    #[display("invalid Blogger export")]
    Export,
    /// Two published posts would be written to the same file.
    #[display("duplicate post id: {_0:?}")]
    DuplicateId(#[error(not(source))] String),
    /// A post could not be rewritten.
    #[display("could not rewrite post {_0}")]
    Rewrite(#[error(not(source))] String),
    /// A post was handed to the writer while its markup had pending edits.
    #[display("post {_0} has uncommitted markup")]
    Uncommitted(#[error(not(source))] String),
    /// A timestamp or document could not be serialized.
    #[display("could not serialize output")]
    Serialize,
    /// An output file or directory could not be written.
    #[display("could not write {}", _0.display())]
    Write(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Rewrite(_) | Self::Write(_))
    }
}
