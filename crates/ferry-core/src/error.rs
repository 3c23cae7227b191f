//! Error types for ferry-core

use thiserror::Error;

/// Core error types for the ferry library
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Listing local files or remote keys failed. Fatal: the remote
    /// index is a precondition for skip logic, so no items are
    /// processed after this.
    #[error("Enumeration error: {0}")]
    Enumeration(String),

    /// Uploading one specific item failed. Recovered at item
    /// granularity: counted and reported, the run continues.
    #[error("Upload failed for '{name}': {reason}")]
    Upload {
        /// Local file name of the offending item
        name: String,
        /// Underlying cause, as reported by the filesystem or store
        reason: String,
    },

    /// Remote storage rejected or failed an operation
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid file or directory path
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Configuration-related error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Some items failed during a sync run
    #[error("Partial failure: {count} items failed to upload")]
    PartialFailure {
        /// Number of items that failed
        count: u64,
    },

    /// Generic error for other cases
    #[error("Other error: {0}")]
    Other(String),
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::Io(err.into())
    }
}

/// Result alias used throughout ferry-core
pub type Result<T> = std::result::Result<T, Error>;
