//! Error types and handling for chat-outline-core operations.
//!
//! Errors are categorized for easier handling and include context about
//! recoverability. Most of them only surface at the edges (configuration
//! loading, the filesystem host, the CLI): the update orchestrator absorbs
//! read failures locally and reports them as an
//! [`UpdateOutcome`](crate::UpdateOutcome) instead.
//!
//! ## Error Categories
//!
//! - **I/O Errors**: File system operations
//! - **Read Errors**: Document text unavailable to the orchestrator
//! - **Parse Errors**: Tree-sitter setup or parsing failures
//! - **Configuration Errors**: Invalid settings or config files
//! - **Serialization Errors**: TOML/JSON conversion
//!
//! ```rust
//! use chat_outline_core::{DocumentId, Error};
//!
//! let err = Error::read(&DocumentId::new("notes/missing.md"), "file not found");
//! assert!(err.is_recoverable());
//! assert_eq!(err.category(), "read");
//! ```

use crate::DocumentId;
use thiserror::Error;

/// The main error type for chat-outline-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Covers file system operations outside of document reads, such as
    /// reading configuration files or creating config directories.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Document text could not be read.
    ///
    /// The document may have been deleted, moved, or be unreadable due to
    /// permissions. The orchestrator recovers from this locally by keeping
    /// the previous cache entry.
    #[error("Failed to read document '{document}': {reason}")]
    Read {
        /// Identifier of the document that could not be read.
        document: String,
        /// Underlying failure description.
        reason: String,
    },

    /// Parsing operation failed.
    ///
    /// Occurs when the tree-sitter grammar cannot be loaded or the parser
    /// gives up on the input.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic error for uncategorized failures.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl Error {
    /// Build a read failure for `document`.
    pub fn read(document: &DocumentId, reason: impl std::fmt::Display) -> Self {
        Self::Read {
            document: document.as_str().to_string(),
            reason: reason.to_string(),
        }
    }

    /// Check if the error might go away on a later attempt.
    ///
    /// Read failures are recoverable: the next content-changed signal for the
    /// document triggers a fresh read. Interrupted or timed-out I/O is also
    /// considered recoverable. Everything else is permanent.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Read { .. } => true,
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }

    /// Get the error category as a string identifier.
    ///
    /// Useful as a structured field when logging:
    ///
    /// ```rust
    /// use chat_outline_core::Error;
    ///
    /// let error = Error::Config("bad guard scope".into());
    /// tracing::warn!(category = error.category(), "{error}");
    /// ```
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Read { .. } => "read",
            Self::Parse(_) => "parse",
            Self::Config(_) => "config",
            Self::NotFound(_) => "not_found",
            Self::Serialization(_) => "serialization",
            Self::Other(_) => "other",
        }
    }
}

/// Convenience type alias for results in chat-outline-core.
pub type Result<T> = std::result::Result<T, Error>;
