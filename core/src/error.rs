//! Error types for schema construction.
//!
//! Construction is append-only, so every error is raised at the point of
//! misuse and nothing needs to be rolled back.

use thiserror::Error;

/// Errors that can occur while composing or parsing schema fragments.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// An `array` fragment was requested without `items`.
    #[error("array fragment requires `items`")]
    MissingItems,

    /// A property name was declared twice under [`MergeStrategy::Strict`](crate::MergeStrategy::Strict).
    #[error("duplicated declaration for object property: {0}")]
    DuplicateProperty(String),

    /// A type tag is not one of the six JSON Schema kinds this crate builds.
    #[error("unknown schema type: {0}")]
    UnknownKind(String),

    /// A JSON document could not be read back as a schema fragment.
    #[error("invalid schema fragment at {path}: {reason}")]
    InvalidFragment {
        /// Location of the offending node, e.g. `#/properties/tags/items`.
        path: String,
        /// What was wrong with it.
        reason: String,
    },

    /// JSON serialization or parsing failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SchemaError {
    pub(crate) fn invalid(path: &str, reason: impl Into<String>) -> Self {
        Self::InvalidFragment {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

/// Convenience alias for results with [`SchemaError`].
pub type Result<T> = std::result::Result<T, SchemaError>;
