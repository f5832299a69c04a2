//! Cleaning and normalization for marine economy statistics.
//!
//! This crate turns a raw source table into the cleaned table:
//!
//! - **columns**: column identifier normalization and required-column checks
//! - **coerce**: lenient numeric coercion of `year` and `data_value`
//! - **cleaning**: incomplete/duplicate removal, text normalization, magnitude filter
//! - **frame**: the [`CleanedTable`] wrapper and typed record access
//! - **pipeline**: the one-pass [`clean`] pipeline

pub mod cleaning;
pub mod coerce;
pub mod columns;
pub mod data_utils;
pub mod error;
pub mod frame;
pub mod pipeline;

pub use cleaning::{drop_duplicates, drop_incomplete, filter_magnitude, normalize_text_columns};
pub use coerce::{
    CoercionStats, Coerced, MissingReason, coerce_float, coerce_integral, coerce_numeric_columns,
};
pub use columns::{
    CATEGORY, DATA_VALUE, MAGNITUDE, MAGNITUDE_ACTUAL, MISSING_TEXT, REQUIRED_COLUMNS, TEXT_COLUMNS,
    YEAR,
    normalize_columns, require_columns,
};
pub use error::{Result, TransformError};
pub use frame::{CleanedRecord, CleanedTable};
pub use pipeline::{CleanOutcome, CleaningReport, clean, clean_file};
