//! Lenient numeric coercion.
//!
//! A value that cannot be read as a number is not an error: it becomes
//! [`Coerced::Missing`] and the owning row is removed later by
//! [`drop_incomplete`](crate::drop_incomplete).

use marine_common::{any_to_f64, any_to_integral};
use polars::prelude::{AnyValue, DataFrame, NamedFrom, Series};
use serde::Serialize;
use tracing::debug;

use crate::columns::{DATA_VALUE, YEAR};
use crate::data_utils::missing_column;
use crate::error::Result;

/// Why a value has no numeric reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingReason {
    /// Null or blank cell.
    Empty,
    /// Text that is not a number of the required kind.
    Unparseable,
}

/// Outcome of coercing a single value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coerced<T> {
    Present(T),
    Missing(MissingReason),
}

impl<T> Coerced<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Missing(_) => None,
        }
    }
}

/// Per-column tally of coercion failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CoercionStats {
    pub present: usize,
    pub empty: usize,
    pub unparseable: usize,
}

impl CoercionStats {
    fn record<T>(&mut self, value: &Coerced<T>) {
        match value {
            Coerced::Present(_) => self.present += 1,
            Coerced::Missing(MissingReason::Empty) => self.empty += 1,
            Coerced::Missing(MissingReason::Unparseable) => self.unparseable += 1,
        }
    }

    pub fn missing(&self) -> usize {
        self.empty + self.unparseable
    }
}

fn is_blank(value: &AnyValue<'_>) -> bool {
    match value {
        AnyValue::Null => true,
        AnyValue::String(s) => s.trim().is_empty(),
        AnyValue::StringOwned(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Coerce a value to a whole number (used for `year`).
pub fn coerce_integral(value: AnyValue<'_>) -> Coerced<i64> {
    if is_blank(&value) {
        return Coerced::Missing(MissingReason::Empty);
    }
    match any_to_integral(value) {
        Some(v) => Coerced::Present(v),
        None => Coerced::Missing(MissingReason::Unparseable),
    }
}

/// Coerce a value to a float (used for `data_value`).
pub fn coerce_float(value: AnyValue<'_>) -> Coerced<f64> {
    if is_blank(&value) {
        return Coerced::Missing(MissingReason::Empty);
    }
    match any_to_f64(value) {
        Some(v) => Coerced::Present(v),
        None => Coerced::Missing(MissingReason::Unparseable),
    }
}

fn coerce_column<T, F>(df: &DataFrame, name: &str, coerce: F) -> Result<(Vec<Option<T>>, CoercionStats)>
where
    F: Fn(AnyValue<'_>) -> Coerced<T>,
{
    let column = df.column(name).map_err(|_| missing_column(df, name))?;
    let mut stats = CoercionStats::default();
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let coerced = coerce(column.get(idx).unwrap_or(AnyValue::Null));
        stats.record(&coerced);
        values.push(coerced.into_option());
    }
    Ok((values, stats))
}

/// Replace `year` with an `Int64` column and `data_value` with a `Float64`
/// column. Unreadable values become nulls.
///
/// Returns the failure tallies for `year` and `data_value`.
pub fn coerce_numeric_columns(df: &mut DataFrame) -> Result<(CoercionStats, CoercionStats)> {
    let (years, year_stats) = coerce_column(df, YEAR, coerce_integral)?;
    let (values, value_stats) = coerce_column(df, DATA_VALUE, coerce_float)?;
    df.with_column(Series::new(YEAR.into(), years))?;
    df.with_column(Series::new(DATA_VALUE.into(), values))?;
    debug!(
        year_empty = year_stats.empty,
        year_unparseable = year_stats.unparseable,
        data_value_empty = value_stats.empty,
        data_value_unparseable = value_stats.unparseable,
        "coerced numeric columns"
    );
    Ok((year_stats, value_stats))
}
