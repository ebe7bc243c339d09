//! Command-line Error Types

use derive_more::{Display, Error};

/// A command-line error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for the command-line entry point.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The configuration could not be loaded.
    #[display("invalid configuration")]
    Config,
    /// The image store or HTTP client could not be set up.
    #[display("could not prepare the image cache")]
    Setup,
    /// The conversion itself failed.
    #[display("conversion failed")]
    Run,
}
