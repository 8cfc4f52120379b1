//! Error types for the prefstack library.
//!
//! This module provides the error hierarchy for loading and resolving
//! preference layers, using `thiserror` for ergonomic error handling.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a prefstack error.
///
/// # Examples
///
/// ```
/// use prefstack::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the prefstack library.
#[derive(Debug, Error)]
pub enum Error {
    /// An entry has an invalid key or an unsupported value.
    ///
    /// Resolution never recovers from this: the whole layer set is rejected.
    #[error("malformed entry '{key}' in layer '{layer}': {reason}")]
    MalformedEntry {
        /// The layer containing the entry.
        layer: String,
        /// The offending key (may be empty).
        key: String,
        /// Why the entry was rejected.
        reason: String,
    },

    /// No layers were supplied but at least one is required.
    #[error("no preference layers supplied (at least one is required)")]
    EmptyInput,

    /// Conflicting overrides were found while strict mode was enabled.
    #[error("{count} conflicting override(s) detected in strict mode")]
    ConflictDetected {
        /// Number of conflicts that caused the failure.
        count: usize,
    },

    /// A layer file could not be parsed.
    #[error("parse error in layer '{layer}' at line {line}: {message}")]
    Parse {
        /// The layer being parsed.
        layer: String,
        /// 1-based line number of the problem.
        line: usize,
        /// A description of the syntax problem.
        message: String,
    },

    /// A layer file could not be read.
    #[error("cannot read layer {}: {source}", path.display())]
    LayerUnreadable {
        /// The file that failed to load.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A JSON encoding or decoding error occurred.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },
}

impl From<crate::preference::ValidationError> for Error {
    fn from(err: crate::preference::ValidationError) -> Self {
        Self::MalformedEntry {
            layer: err.layer,
            key: err.key,
            reason: err.reason,
        }
    }
}

impl Error {
    /// Check if the error was caused by bad input layers.
    ///
    /// Covers parse errors, malformed entries and missing layers.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefstack::Error;
    ///
    /// assert!(Error::EmptyInput.is_malformed_input());
    /// assert!(!Error::ConflictDetected { count: 1 }.is_malformed_input());
    /// ```
    #[must_use]
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Self::MalformedEntry { .. } | Self::Parse { .. } | Self::EmptyInput
        )
    }

    /// Check if the error is a strict-mode conflict failure.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ConflictDetected { .. })
    }
}
