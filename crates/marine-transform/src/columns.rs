//! Column identifiers and their normalization.

use std::collections::HashMap;

use marine_ingest::normalize_column_name;
use polars::prelude::DataFrame;
use tracing::debug;

use crate::data_utils::missing_column;
use crate::error::{Result, TransformError};

pub const YEAR: &str = "year";
pub const DATA_VALUE: &str = "data_value";
pub const CATEGORY: &str = "category";
pub const VARIABLE: &str = "variable";
pub const UNITS: &str = "units";
pub const MAGNITUDE: &str = "magnitude";
pub const SOURCE: &str = "source";
pub const FLAG: &str = "flag";

/// The only magnitude kept in the cleaned table.
pub const MAGNITUDE_ACTUAL: &str = "actual";

/// Text a missing categorical cell is rendered as.
pub const MISSING_TEXT: &str = "nan";

/// Categorical columns that are trimmed and lowercased.
pub const TEXT_COLUMNS: [&str; 6] = [CATEGORY, VARIABLE, UNITS, MAGNITUDE, SOURCE, FLAG];

/// Every column the pipeline reads.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    YEAR, DATA_VALUE, CATEGORY, VARIABLE, UNITS, MAGNITUDE, SOURCE, FLAG,
];

/// Rename every column to its normalized identifier, keeping order and count.
///
/// Returns the number of columns whose name changed.
pub fn normalize_columns(df: &mut DataFrame) -> Result<usize> {
    let original: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let mut seen: HashMap<String, &str> = HashMap::with_capacity(original.len());
    let mut normalized = Vec::with_capacity(original.len());
    for name in &original {
        let target = normalize_column_name(name);
        if let Some(first) = seen.get(&target) {
            return Err(TransformError::DuplicateColumn {
                first: (*first).to_string(),
                second: name.clone(),
                normalized: target,
            });
        }
        seen.insert(target.clone(), name.as_str());
        normalized.push(target);
    }
    let renamed = original
        .iter()
        .zip(&normalized)
        .filter(|(before, after)| before != after)
        .count();
    if renamed > 0 {
        df.set_column_names(normalized.iter().map(String::as_str))?;
    }
    debug!(renamed, columns = original.len(), "normalized column identifiers");
    Ok(renamed)
}

/// Fail unless every column in `columns` exists.
pub fn require_columns(df: &DataFrame, columns: &[&str]) -> Result<()> {
    for column in columns {
        if df.column(column).is_err() {
            return Err(missing_column(df, column));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use polars::prelude::{NamedFrom, Series};

    use super::*;

    fn frame(names: &[&str]) -> DataFrame {
        DataFrame::new(
            names
                .iter()
                .map(|name| Series::new((*name).into(), vec!["x"]).into())
                .collect(),
        )
        .unwrap()
    }

    fn names(df: &DataFrame) -> Vec<String> {
        df.get_column_names().iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_normalize_columns_renames_in_order() {
        let mut df = frame(&[" Year", "Data Value ", "CATEGORY", "flag"]);

        let renamed = normalize_columns(&mut df).unwrap();

        assert_eq!(renamed, 3);
        assert_eq!(names(&df), vec!["year", "data_value", "category", "flag"]);
    }

    #[test]
    fn test_normalize_columns_is_idempotent() {
        let mut df = frame(&["Series Reference", " Period "]);
        normalize_columns(&mut df).unwrap();
        let first = names(&df);

        let renamed = normalize_columns(&mut df).unwrap();

        assert_eq!(renamed, 0);
        assert_eq!(names(&df), first);
    }

    #[test]
    fn test_normalize_columns_rejects_collisions() {
        let mut df = frame(&["Year", "year "]);

        let err = normalize_columns(&mut df).unwrap_err();

        assert!(matches!(
            err,
            TransformError::DuplicateColumn { ref normalized, .. } if normalized == "year"
        ));
    }

    #[test]
    fn test_require_columns() {
        let df = frame(&["year", "data_value"]);

        assert!(require_columns(&df, &[YEAR, DATA_VALUE]).is_ok());
        let err = require_columns(&df, &REQUIRED_COLUMNS).unwrap_err();
        assert!(matches!(err, TransformError::MissingColumn { ref column, .. } if column == "category"));
    }
}
