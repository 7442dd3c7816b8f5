use std::io;
use thiserror::Error;

/// Error type for inventory sessions and the command-line tool.
///
/// Tracker operations themselves never fail; errors only arise when
/// requests are read from or responses written to a byte stream.
#[derive(Error, Debug)]
pub enum InventoryError {
    /// IO error from reading a request script or writing responses.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Malformed request or response encoding failure.
    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Error with a string message.
    #[error("{0}")]
    StringError(String),
}

/// Result type alias for inventory operations.
pub type Result<T> = std::result::Result<T, InventoryError>;
