//! The one-pass cleaning pipeline.
//!
//! Load → normalize columns → coerce → drop incomplete → drop duplicates →
//! normalize text → drop duplicates → filter magnitude.
//!
//! Duplicates are removed a second time after text normalization because
//! rows that differed only in casing or padding become identical there.

use std::path::Path;
use std::time::Instant;

use marine_ingest::{IngestOptions, read_csv_table};
use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::{info, info_span};

use crate::cleaning::{drop_duplicates, drop_incomplete, filter_magnitude, normalize_text_columns};
use crate::coerce::{CoercionStats, coerce_numeric_columns};
use crate::columns::{REQUIRED_COLUMNS, normalize_columns, require_columns};
use crate::error::Result;
use crate::frame::CleanedTable;

/// Row counts for each pipeline stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleaningReport {
    pub loaded: usize,
    pub columns_renamed: usize,
    pub year_coercion: CoercionStats,
    pub data_value_coercion: CoercionStats,
    pub dropped_incomplete: usize,
    pub dropped_duplicates: usize,
    pub text_values_normalized: usize,
    pub dropped_magnitude: usize,
    pub retained: usize,
}

/// Result of a successful cleaning run.
#[derive(Debug, Clone)]
pub struct CleanOutcome {
    pub table: CleanedTable,
    pub report: CleaningReport,
}

/// Load `path` and clean it.
pub fn clean_file(path: &Path, options: &IngestOptions) -> Result<CleanOutcome> {
    let span = info_span!("clean", path = %path.display());
    let _guard = span.enter();
    let df = read_csv_table(path, options)?;
    clean(df)
}

/// Clean an already loaded raw table.
pub fn clean(mut df: DataFrame) -> Result<CleanOutcome> {
    let start = Instant::now();
    let mut report = CleaningReport {
        loaded: df.height(),
        ..CleaningReport::default()
    };

    report.columns_renamed = normalize_columns(&mut df)?;
    require_columns(&df, &REQUIRED_COLUMNS)?;

    let (year_stats, value_stats) = coerce_numeric_columns(&mut df)?;
    report.year_coercion = year_stats;
    report.data_value_coercion = value_stats;

    report.dropped_incomplete = drop_incomplete(&mut df)?;
    report.dropped_duplicates = drop_duplicates(&mut df)?;
    report.text_values_normalized = normalize_text_columns(&mut df)?;
    report.dropped_duplicates += drop_duplicates(&mut df)?;
    report.dropped_magnitude = filter_magnitude(&mut df)?;
    report.retained = df.height();

    info!(
        loaded = report.loaded,
        dropped_incomplete = report.dropped_incomplete,
        dropped_duplicates = report.dropped_duplicates,
        dropped_magnitude = report.dropped_magnitude,
        retained = report.retained,
        duration_ms = start.elapsed().as_millis(),
        "cleaning complete"
    );

    Ok(CleanOutcome {
        table: CleanedTable::new(df),
        report,
    })
}
