//! CSV reading utilities.

mod header;
mod reader;

pub use header::normalize_column_name;
pub use reader::{IngestOptions, read_csv_table, validate_encoding};
