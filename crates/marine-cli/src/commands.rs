use anyhow::{Result, anyhow};
use marine_cli::analysis::{AnalysisOptions, AnalysisResult, run_analysis};
use marine_ingest::IngestOptions;

use crate::cli::Cli;

pub fn run_analyze(cli: &Cli) -> Result<AnalysisResult> {
    let options = analysis_options(cli)?;
    run_analysis(&options)
}

fn analysis_options(cli: &Cli) -> Result<AnalysisOptions> {
    let delimiter = u8::try_from(cli.delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| anyhow!("delimiter must be a single ASCII character, got {:?}", cli.delimiter))?;
    let ingest = IngestOptions::default()
        .with_delimiter(delimiter)
        .with_infer_schema_length(Some(cli.infer_schema_rows));
    Ok(AnalysisOptions {
        input: cli.input.clone(),
        ingest,
        head: cli.head,
        chart_dir: (!cli.no_charts).then(|| cli.chart_dir.clone()),
        summary_json: cli.summary_json.clone(),
    })
}
