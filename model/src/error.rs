//! Error types for model-to-schema translation.
//!
//! Covers filter misuse, schema construction failures bubbling up from the
//! core builder, and loading model or config files.

use jsonschema_serializer_core::SchemaError;
use thiserror::Error;

/// Errors that can occur while deriving a schema from a model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Both an `only` allow-list and an `except` deny-list were supplied.
    #[error("only and except options both provided")]
    FilterConflict,

    /// Fragment construction failed.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Convenience alias for results with [`ModelError`].
pub type Result<T> = std::result::Result<T, ModelError>;
