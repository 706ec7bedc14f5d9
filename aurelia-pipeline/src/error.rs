//! Cockpit error types.
//!
//! Every failure mode has a named variant. No stringly-typed errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CockpitError {
    #[error("Invalid parameter for {op}: {reason}")]
    InvalidParameter { op: String, reason: String },

    #[error("Invalid item '{id}': {reason}")]
    InvalidItem { id: String, reason: String },

    #[error("Duplicate item id: {0}")]
    DuplicateItem(String),

    #[error("Missing prerequisite: {0}")]
    MissingPrerequisite(String),

    #[error("CSV parse error at line {line}: {reason}")]
    Csv { line: usize, reason: String },

    #[error("Failed to read '{path}': {reason}")]
    Io { path: String, reason: String },

    #[error("Catalog parse error: {0}")]
    CatalogParse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CockpitError {
    pub(crate) fn invalid_parameter(op: &str, reason: impl Into<String>) -> Self {
        CockpitError::InvalidParameter {
            op: op.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for cockpit operations.
pub type CockpitResult<T> = Result<T, CockpitError>;
