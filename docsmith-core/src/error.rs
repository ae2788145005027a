//! Error types for docsmith-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from parsing a connection descriptor.
#[derive(Debug, Error)]
pub enum DsnError {
    /// Input had no `scheme://` separator.
    #[error("invalid DSN '{input}': missing '://' separator")]
    MissingSeparator { input: String },

    /// Scheme was empty or contained characters outside `[a-z0-9+.-]`.
    #[error("invalid DSN '{input}': malformed scheme")]
    MalformedScheme { input: String },
}

/// Errors from mounting or using a filesystem handle.
#[derive(Debug, Error)]
pub enum FilesystemError {
    /// The DSN scheme has no mount strategy.
    #[error("unsupported scheme '{scheme}' in DSN '{dsn}'")]
    UnsupportedScheme { scheme: String, dsn: String },

    /// Underlying I/O failure, with the path that produced it.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure reported by an action construction entry point.
///
/// Returned by a [`ConstructFn`](crate::types::ConstructFn) when the type
/// cannot produce an instance. Signals a defect in the action type itself,
/// not in the caller's configuration.
#[derive(Debug, Error)]
#[error("{reason}")]
pub struct ConstructionError {
    reason: String,
}

impl ConstructionError {
    /// Create a failure with a human-readable reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}
