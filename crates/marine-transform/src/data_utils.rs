//! DataFrame value extraction helpers.

use polars::prelude::{DataFrame, DataType};

use crate::error::{Result, TransformError};

/// Extract all values of a column as text, keeping nulls as `None`.
pub fn column_text_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df
        .column(name)
        .map_err(|_| missing_column(df, name))?;
    let text = column.cast(&DataType::String)?;
    Ok(text
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect())
}

/// Build a `MissingColumn` error listing the columns that do exist.
pub fn missing_column(df: &DataFrame, name: &str) -> TransformError {
    let available = df
        .get_column_names()
        .iter()
        .map(|n| n.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    TransformError::MissingColumn {
        column: name.to_string(),
        available,
    }
}
