//! Error types for docsmith-renderer.

use docsmith_core::ConstructionError;
use thiserror::Error;

/// All errors that can arise from template assembly.
///
/// Every variant aborts the whole `create` call; no partial template is ever
/// returned. Messages carry the originating configuration context (which
/// action entry, which field).
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Malformed configuration shape at any validation point.
    #[error("invalid template configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// Action name did not resolve to any known type.
    #[error("action entry {entry}: unknown action type '{name}'")]
    UnknownAction { entry: usize, name: String },

    /// Action name resolved to a type without the action capability.
    #[error("action entry {entry}: type '{name}' is not usable as an action")]
    UnsupportedAction { entry: usize, name: String },

    /// The resolved constructor reported failure: a defect in the action
    /// type itself, not in the configuration.
    #[error("action entry {entry}: constructing '{name}' failed: {source}")]
    ActionConstructionFailed {
        entry: usize,
        name: String,
        #[source]
        source: ConstructionError,
    },
}

impl TemplateError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration { reason: reason.into() }
    }

    /// Prefix the reason of an `InvalidConfiguration` with `context`; other
    /// variants already carry their own context.
    pub(crate) fn in_context(self, context: &str) -> Self {
        match self {
            Self::InvalidConfiguration { reason } => {
                Self::InvalidConfiguration { reason: format!("{context}: {reason}") }
            }
            other => other,
        }
    }
}
