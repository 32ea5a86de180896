//! Error types for the translit library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`TranslitError`] enum. Query-time corruption of dictionary artifacts is
//! deliberately *not* reported through this type: a malformed node or pattern
//! line degrades to an empty element instead of failing the whole search.
//!
//! # Examples
//!
//! ```
//! use translit::error::{Result, TranslitError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(TranslitError::invalid_pattern("pattern must not be empty"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for translit operations.
#[derive(Error, Debug)]
pub enum TranslitError {
    /// I/O errors (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Storage-related errors (missing artifacts, failed renames, ...)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Artifact encoding/decoding errors
    #[error("Format error: {0}")]
    Format(String),

    /// A pattern or replacement that cannot be stored in a dictionary
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with TranslitError.
pub type Result<T> = std::result::Result<T, TranslitError>;

impl TranslitError {
    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        TranslitError::Storage(msg.into())
    }

    /// Create a new format error.
    pub fn format<S: Into<String>>(msg: S) -> Self {
        TranslitError::Format(msg.into())
    }

    /// Create a new invalid pattern error.
    pub fn invalid_pattern<S: Into<String>>(msg: S) -> Self {
        TranslitError::InvalidPattern(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        TranslitError::Config(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        TranslitError::Other(msg.into())
    }
}
