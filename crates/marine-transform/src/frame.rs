//! The cleaned table and its typed records.
//!
//! [`CleanedTable`] wraps the Polars DataFrame produced by the pipeline. It is
//! only constructed by [`clean`](crate::clean), so holders can rely on the
//! cleaned-table invariants: `year` and `data_value` are present on every
//! row, `magnitude` is `"actual"`, every text column holds a string, rows
//! are distinct, and column names are normalized.

use polars::prelude::DataFrame;
use serde::Serialize;

use crate::columns::{
    CATEGORY, DATA_VALUE, FLAG, MAGNITUDE, SOURCE, UNITS, VARIABLE, YEAR,
};
use crate::data_utils::column_text_values;
use crate::error::Result;

fn text_column(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    Ok(column_text_values(df, name)?
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

/// One cleaned observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanedRecord {
    pub year: i64,
    pub data_value: f64,
    pub category: String,
    pub variable: String,
    pub units: String,
    pub magnitude: String,
    pub source: String,
    pub flag: String,
}

/// The cleaned dataset, immutable once built.
#[derive(Debug, Clone)]
pub struct CleanedTable {
    data: DataFrame,
}

impl CleanedTable {
    pub(crate) fn new(data: DataFrame) -> Self {
        Self { data }
    }

    /// The underlying DataFrame, including any extra source columns.
    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Number of records.
    pub fn height(&self) -> usize {
        self.data.height()
    }

    pub fn is_empty(&self) -> bool {
        self.data.height() == 0
    }

    /// The `year` column as plain integers.
    pub fn years(&self) -> Result<Vec<i64>> {
        let years = self.data.column(YEAR)?.i64()?;
        Ok(years.into_iter().flatten().collect())
    }

    /// The `data_value` column as plain floats.
    pub fn data_values(&self) -> Result<Vec<f64>> {
        let values = self.data.column(DATA_VALUE)?.f64()?;
        Ok(values.into_iter().flatten().collect())
    }

    /// The `category` column.
    pub fn categories(&self) -> Result<Vec<String>> {
        text_column(&self.data, CATEGORY)
    }

    /// Materialize every row as a [`CleanedRecord`].
    pub fn records(&self) -> Result<Vec<CleanedRecord>> {
        let years = self.years()?;
        let values = self.data_values()?;
        let mut category = text_column(&self.data, CATEGORY)?.into_iter();
        let mut variable = text_column(&self.data, VARIABLE)?.into_iter();
        let mut units = text_column(&self.data, UNITS)?.into_iter();
        let mut magnitude = text_column(&self.data, MAGNITUDE)?.into_iter();
        let mut source = text_column(&self.data, SOURCE)?.into_iter();
        let mut flag = text_column(&self.data, FLAG)?.into_iter();

        let mut records = Vec::with_capacity(self.height());
        for (year, data_value) in years.into_iter().zip(values) {
            records.push(CleanedRecord {
                year,
                data_value,
                category: category.next().unwrap_or_default(),
                variable: variable.next().unwrap_or_default(),
                units: units.next().unwrap_or_default(),
                magnitude: magnitude.next().unwrap_or_default(),
                source: source.next().unwrap_or_default(),
                flag: flag.next().unwrap_or_default(),
            });
        }
        Ok(records)
    }

    pub fn into_inner(self) -> DataFrame {
        self.data
    }
}
