//! Error types for reporting.

use std::path::PathBuf;

use marine_transform::TransformError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// Reading the cleaned table failed.
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// Failed to create an output directory or file.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize the summary.
    #[error("failed to serialize summary: {0}")]
    Json(#[from] serde_json::Error),

    /// A chart backend reported an error.
    #[error("failed to draw {chart}: {message}")]
    Chart { chart: &'static str, message: String },
}

impl From<polars::prelude::PolarsError> for ReportError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::Transform(err.into())
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
