//! One analysis run: clean, summarize, export, chart.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use marine_ingest::IngestOptions;
use marine_report::{ChartPaths, DatasetSummary, render_charts, summarize, write_summary_json};
use marine_transform::clean_file;
use tracing::{info, info_span, warn};

/// What to analyze and where to put the outputs.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub input: PathBuf,
    pub ingest: IngestOptions,
    /// Rows in the preview.
    pub head: usize,
    /// Chart output directory; `None` skips charts.
    pub chart_dir: Option<PathBuf>,
    pub summary_json: Option<PathBuf>,
}

#[derive(Debug)]
pub struct AnalysisResult {
    pub input: PathBuf,
    pub summary: DatasetSummary,
    pub charts: ChartPaths,
    /// Set when chart rendering failed; the summary is still valid.
    pub chart_error: Option<String>,
    pub summary_json: Option<PathBuf>,
}

/// Run the full analysis.
///
/// Load, cleaning and JSON export failures are returned as errors. A chart
/// failure is logged and recorded in the result instead.
pub fn run_analysis(options: &AnalysisOptions) -> Result<AnalysisResult> {
    let span = info_span!("analysis", input = %options.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let outcome = clean_file(&options.input, &options.ingest)
        .with_context(|| format!("clean {}", options.input.display()))?;
    let summary = summarize(&outcome, options.head).context("summarize cleaned table")?;

    if let Some(path) = &options.summary_json {
        write_summary_json(&summary, path)
            .with_context(|| format!("write summary to {}", path.display()))?;
    }

    let mut charts = ChartPaths::default();
    let mut chart_error = None;
    if let Some(dir) = &options.chart_dir {
        match render_charts(&outcome.table, &summary.pivot, dir) {
            Ok(paths) => charts = paths,
            Err(error) => {
                warn!(%error, dir = %dir.display(), "chart rendering failed");
                chart_error = Some(error.to_string());
            }
        }
    }

    info!(
        records = summary.record_count,
        duration_ms = start.elapsed().as_millis(),
        "analysis complete"
    );
    Ok(AnalysisResult {
        input: options.input.clone(),
        summary,
        charts,
        chart_error,
        summary_json: options.summary_json.clone(),
    })
}
