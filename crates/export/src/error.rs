//! Export Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// An export parsing error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for export parsing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
/// The export vocabulary is a closed contract, so every variant is fatal.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The export document is not well-formed XML.
    #[display("malformed export XML")]
    MalformedXml,
    /// The document root is not an Atom feed.
    #[display("export root element is <{_0}>, expected <feed>")]
    NotAFeed(#[error(not(source))] String),
    /// A required attribute is missing from an element.
    #[display("missing attribute '{attribute}' on <{element}>")]
    MissingAttribute {
        /// The element that was missing the attribute.
        element: &'static str,
        /// The attribute that was expected.
        attribute: &'static str,
    },
    /// A category element uses a scheme outside the known vocabulary.
    #[display("unrecognised category scheme: {_0:?}")]
    UnknownScheme(#[error(not(source))] String),
    /// The entry-kind term is not one of the five known kinds.
    #[display("unrecognised entry kind: {_0:?}")]
    UnknownKind(#[error(not(source))] String),
    /// The entry carries no entry-kind category at all.
    #[display("entry has no kind category")]
    MissingKind,
    /// An entry could not be parsed; identified by its id (or position).
    #[display("invalid export entry: {_0}")]
    InvalidEntry(#[error(not(source))] String),
    /// The entry carries more than one entry-kind category.
    #[display("entry has {} kind categories: {}", _0.len(), _0.join(", "))]
    AmbiguousKind(#[error(not(source))] Vec<String>),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // The export is either valid or it isn't; parsing it again won't help.
        false
    }
}
