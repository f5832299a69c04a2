//! Descriptive statistics.

use marine_common::{any_to_f64, any_to_integral};
use polars::prelude::{DataFrame, DataType, Expr, IntoLazy, QuantileMethod, col, lit};
use serde::Serialize;

use crate::error::Result;

/// Count, mean, sample standard deviation, min, quartiles and max of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStatistics {
    pub column: String,
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation; `None` with fewer than two values.
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// Linear-interpolated quantile of already sorted values.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let weight = pos - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

fn describe_exprs(name: &str) -> Vec<Expr> {
    let values = || col(name).cast(DataType::Float64);
    vec![
        values().count().alias("count"),
        values().mean().alias("mean"),
        values().std(1).alias("std"),
        values().min().alias("min"),
        values().quantile(lit(0.25), QuantileMethod::Linear).alias("q25"),
        values().median().alias("median"),
        values().quantile(lit(0.75), QuantileMethod::Linear).alias("q75"),
        values().max().alias("max"),
    ]
}

/// Describe one numeric column of the frame.
pub fn describe_column(df: &DataFrame, name: &str) -> Result<ColumnStatistics> {
    let row = df.clone().lazy().select(describe_exprs(name)).collect()?;
    let stat = |field: &str| -> Result<Option<f64>> {
        Ok(any_to_f64(row.column(field)?.get(0)?))
    };
    let count = any_to_integral(row.column("count")?.get(0)?).unwrap_or(0);
    let std = if count > 1 { stat("std")? } else { None };
    Ok(ColumnStatistics {
        column: name.to_string(),
        count: usize::try_from(count).unwrap_or(0),
        mean: stat("mean")?,
        std,
        min: stat("min")?,
        q25: stat("q25")?,
        median: stat("median")?,
        q75: stat("q75")?,
        max: stat("max")?,
    })
}

/// Describe every integer or float column of the frame, in column order.
pub fn describe(df: &DataFrame) -> Result<Vec<ColumnStatistics>> {
    df.get_columns()
        .iter()
        .filter(|column| column.dtype().is_integer() || column.dtype().is_float())
        .map(|column| describe_column(df, column.name().as_str()))
        .collect()
}
