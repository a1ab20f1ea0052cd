//! Error types for classifier configuration and lookups.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for aspect-ratio operations.
pub type AspectResult<T> = Result<T, AspectError>;

/// Errors that can occur around the classifier.
///
/// Classification itself never fails: unmatched ratios fall back to a
/// default breakpoint and negative debounce values are clamped.
#[derive(Debug, Error)]
pub enum AspectError {
    /// Breakpoint name not present in the table.
    #[error("Breakpoint not found: {0}")]
    BreakpointNotFound(String),

    /// The same breakpoint name appears twice in a loaded table.
    #[error("Duplicate breakpoint name: {0}")]
    DuplicateBreakpoint(String),

    /// Configuration serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration file could not be read.
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
