//! Error types for the cleaning pipeline.

use marine_ingest::IngestError;
use thiserror::Error;

/// Errors that abort a cleaning run.
///
/// Per-value coercion problems are not errors; they become
/// [`Coerced::Missing`](crate::Coerced::Missing) and the row is dropped.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The source could not be loaded.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// A column the pipeline needs is absent after normalization.
    #[error("required column '{column}' not found (available: {available})")]
    MissingColumn { column: String, available: String },

    /// Two source columns normalize to the same identifier.
    #[error("columns '{first}' and '{second}' both normalize to '{normalized}'")]
    DuplicateColumn {
        first: String,
        second: String,
        normalized: String,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl TransformError {
    /// True when the error means the source is unusable as input.
    pub fn is_source_unavailable(&self) -> bool {
        matches!(
            self,
            Self::Ingest(_) | Self::MissingColumn { .. } | Self::DuplicateColumn { .. }
        )
    }
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for cleaning operations.
pub type Result<T> = std::result::Result<T, TransformError>;
