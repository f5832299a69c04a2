//! Row-level cleaning steps.

use std::collections::HashSet;

use polars::prelude::{
    BooleanChunked, DataFrame, DataType, Expr, IntoLazy, NewChunkedArray, Null, col, lit,
};

use crate::columns::{DATA_VALUE, MAGNITUDE, MAGNITUDE_ACTUAL, MISSING_TEXT, TEXT_COLUMNS, YEAR};
use crate::data_utils::{column_text_values, missing_column};
use crate::error::Result;

fn apply_mask(df: &mut DataFrame, name: &str, keep: &[bool]) -> Result<usize> {
    let removed = keep.iter().filter(|kept| !**kept).count();
    if removed == 0 {
        return Ok(0);
    }
    let mask = BooleanChunked::from_slice(name.into(), keep);
    *df = df.filter(&mask)?;
    Ok(removed)
}

/// Remove rows whose `year` or `data_value` is null.
///
/// Nulls in any other column are ignored. Returns the number of rows removed.
pub fn drop_incomplete(df: &mut DataFrame) -> Result<usize> {
    let year = df.column(YEAR).map_err(|_| missing_column(df, YEAR))?;
    let value = df
        .column(DATA_VALUE)
        .map_err(|_| missing_column(df, DATA_VALUE))?;
    let year_present = year.is_not_null();
    let value_present = value.is_not_null();
    let keep: Vec<bool> = year_present
        .into_iter()
        .zip(&value_present)
        .map(|(y, v)| y.unwrap_or(false) && v.unwrap_or(false))
        .collect();
    apply_mask(df, "complete", &keep)
}

/// Remove rows identical to an earlier row across every column.
///
/// The first occurrence is kept and relative order is preserved. Two nulls in
/// the same column compare equal. Returns the number of rows removed.
pub fn drop_duplicates(df: &mut DataFrame) -> Result<usize> {
    if df.height() < 2 {
        return Ok(0);
    }
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect();
    let mut columns = Vec::with_capacity(names.len());
    for name in &names {
        columns.push(column_text_values(df, name)?);
    }
    let mut seen: HashSet<Vec<Option<&str>>> = HashSet::with_capacity(df.height());
    let mut keep = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let key: Vec<Option<&str>> = columns
            .iter()
            .map(|values| values[idx].as_deref())
            .collect();
        keep.push(seen.insert(key));
    }
    apply_mask(df, "dedupe", &keep)
}

/// Render a text column to its trimmed, lowercased string form.
///
/// Nulls become [`MISSING_TEXT`].
fn normalized_text(name: &str) -> Expr {
    col(name)
        .cast(DataType::String)
        .str()
        .strip_chars(lit(Null {}))
        .str()
        .to_lowercase()
        .fill_null(lit(MISSING_TEXT))
        .alias(name)
}

/// Trim and lowercase every categorical text column.
///
/// Non-string cells are rendered to text first and missing cells become
/// `"nan"`, so every text cell holds a string afterwards. Returns the number
/// of cells whose value changed.
pub fn normalize_text_columns(df: &mut DataFrame) -> Result<usize> {
    let mut before = Vec::with_capacity(TEXT_COLUMNS.len());
    for name in TEXT_COLUMNS {
        before.push(column_text_values(df, name)?);
    }

    let exprs: Vec<Expr> = TEXT_COLUMNS.iter().map(|name| normalized_text(name)).collect();
    let new_df = df.clone().lazy().with_columns(exprs).collect()?;

    let mut changed = 0usize;
    for (name, old) in TEXT_COLUMNS.iter().zip(&before) {
        let normalized = new_df.column(name)?.str()?;
        changed += old
            .iter()
            .zip(normalized)
            .filter(|(old, new)| old.as_deref() != *new)
            .count();
    }
    *df = new_df;
    Ok(changed)
}

/// Keep only rows whose magnitude is exactly `"actual"`.
///
/// The result is contiguous from row zero with relative order preserved.
/// Returns the number of rows removed.
pub fn filter_magnitude(df: &mut DataFrame) -> Result<usize> {
    let keep: Vec<bool> = column_text_values(df, MAGNITUDE)?
        .iter()
        .map(|value| value.as_deref() == Some(MAGNITUDE_ACTUAL))
        .collect();
    apply_mask(df, "magnitude", &keep)
}
