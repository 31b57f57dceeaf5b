//! Unified error types for chatchart.
//!
//! This module provides a single [`ChatchartError`] enum that covers all error
//! cases in the library. This design follows the pattern used by popular crates
//! like `reqwest`, `serde_json`, and `csv`.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - **Developers** get source error chains for debugging
//!
//! Most imperfections in an export are absorbed, not raised: lines that do not
//! fit the message shape are dropped, and contacts missing from the registry
//! simply keep their raw name. The one hard parse failure is an export that
//! yields zero messages — see [`ChatchartError::NoMessages`].

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatchart operations.
///
/// # Example
///
/// ```rust
/// use chatchart::error::Result;
/// use chatchart::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     // ... operations that may fail
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatchartError>;

/// The error type for all chatchart operations.
///
/// Each variant contains context about what went wrong and, where applicable,
/// the underlying source error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatchartError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No messages could be extracted from the input.
    ///
    /// This is the only fatal parse condition. It means not a single block of
    /// the input matched the `[DD/MM/YYYY, HH:MM:SS] Author: Body` shape, so
    /// the file is not a recognizable chat export and chart data over it
    /// would be meaningless.
    #[error("no messages could be extracted{}", path.as_ref().map(|p| format!(" from {}", p.display())).unwrap_or_default())]
    NoMessages {
        /// The input file path, if parsing started from one
        path: Option<PathBuf>,
    },

    /// The contact registry file could not be read as a name mapping.
    ///
    /// The registry is a flat JSON object of `"raw name": "Canonical Name"`
    /// entries. A missing file is fine (empty registry); a file that exists
    /// but is not such an object is reported here.
    #[error("invalid contact registry {}: {source}", path.display())]
    Registry {
        /// Path of the offending registry file
        path: PathBuf,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// JSON serialization error.
    ///
    /// This can occur when writing chart data or the registry file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writing error.
    ///
    /// This can occur when writing chart data to CSV format.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatchartError {
    /// Creates the fatal empty-result error with no file context.
    pub fn no_messages() -> Self {
        ChatchartError::NoMessages { path: None }
    }

    /// Creates the fatal empty-result error for a specific input file.
    pub fn no_messages_in(path: impl Into<PathBuf>) -> Self {
        ChatchartError::NoMessages {
            path: Some(path.into()),
        }
    }

    /// Creates a registry error from a path and JSON source.
    pub fn registry(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        ChatchartError::Registry {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatchartError::Io(_))
    }

    /// Returns `true` if this is the fatal empty-result error.
    pub fn is_no_messages(&self) -> bool {
        matches!(self, ChatchartError::NoMessages { .. })
    }

    /// Returns `true` if this is a registry error.
    pub fn is_registry(&self) -> bool {
        matches!(self, ChatchartError::Registry { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
