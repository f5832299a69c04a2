//! Data ingestion for the marine economy explorer.
//!
//! Reads a delimited file fully into memory as a Polars `DataFrame`. Every
//! failure here means the source is unavailable and the run cannot continue.

pub mod csv;
pub mod error;

pub use csv::{IngestOptions, normalize_column_name, read_csv_table, validate_encoding};
pub use error::{IngestError, Result};
