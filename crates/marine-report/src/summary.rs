//! The combined dataset summary.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use marine_transform::{CleanOutcome, CleaningReport};
use serde::Serialize;
use tracing::info;

use crate::error::{ReportError, Result};
use crate::pivot::{PivotTable, mean_pivot};
use crate::preview::{ColumnInfo, HeadRows, column_info, head_rows};
use crate::stats::{ColumnStatistics, describe};

/// Everything the reporting layer shows about a cleaned table.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub record_count: usize,
    pub head: HeadRows,
    pub schema: Vec<ColumnInfo>,
    pub statistics: Vec<ColumnStatistics>,
    pub pivot: PivotTable,
    pub cleaning: CleaningReport,
}

/// Summarize a cleaning outcome. Does not modify the table.
pub fn summarize(outcome: &CleanOutcome, head_limit: usize) -> Result<DatasetSummary> {
    let df = outcome.table.data();
    let summary = DatasetSummary {
        record_count: df.height(),
        head: head_rows(df, head_limit),
        schema: column_info(df),
        statistics: describe(df)?,
        pivot: mean_pivot(&outcome.table)?,
        cleaning: outcome.report.clone(),
    };
    info!(
        records = summary.record_count,
        categories = summary.pivot.categories.len(),
        years = summary.pivot.years.len(),
        "summary computed"
    );
    Ok(summary)
}

/// Write the summary as pretty-printed JSON, creating parent directories.
pub fn write_summary_json(summary: &DatasetSummary, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ReportError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let file = File::create(path).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::to_writer_pretty(BufWriter::new(file), summary)?;
    info!(path = %path.display(), "wrote summary json");
    Ok(())
}
