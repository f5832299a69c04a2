//! Integration tests for a full analysis run.

use std::io::Write;
use std::path::{Path, PathBuf};

use marine_cli::analysis::{AnalysisOptions, run_analysis};
use marine_ingest::IngestOptions;
use marine_transform::TransformError;
use tempfile::{NamedTempFile, TempDir};

const CSV: &str = "\
year,data_value,category,variable,units,magnitude,source,flag
2010,5,Fishing ,GDP,Dollars,Actual,Stats NZ,
2010,5,fishing,GDP,Dollars,Actual,Stats NZ,
2011,9,Fishing,GDP,Dollars,Actual,Stats NZ,
2011,6,Tourism,GDP,Dollars,Forecast,Stats NZ,
not_a_number,8,Tourism,GDP,Dollars,Actual,Stats NZ,
";

fn write_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

fn options(input: &Path) -> AnalysisOptions {
    AnalysisOptions {
        input: input.to_path_buf(),
        ingest: IngestOptions::default(),
        head: 5,
        chart_dir: None,
        summary_json: None,
    }
}

#[test]
fn test_run_without_charts() {
    let file = write_csv(CSV);
    let result = run_analysis(&options(file.path())).unwrap();

    assert_eq!(result.summary.record_count, 2);
    assert_eq!(result.summary.pivot.categories, vec!["fishing"]);
    assert_eq!(result.summary.pivot.get("fishing", 2010), Some(5.0));
    assert_eq!(result.summary.cleaning.dropped_incomplete, 1);
    assert_eq!(result.summary.cleaning.dropped_duplicates, 1);
    assert_eq!(result.summary.cleaning.dropped_magnitude, 1);
    assert!(result.charts.trend.is_none());
    assert!(result.chart_error.is_none());
}

#[test]
fn test_run_writes_summary_json() {
    let file = write_csv(CSV);
    let dir = TempDir::new().unwrap();
    let json_path = dir.path().join("summary.json");
    let mut options = options(file.path());
    options.summary_json = Some(json_path.clone());

    let result = run_analysis(&options).unwrap();

    assert_eq!(result.summary_json, Some(json_path.clone()));
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json["record_count"], 2);
    assert_eq!(json["cleaning"]["loaded"], 5);
}

#[test]
fn test_header_only_file_has_no_charts() {
    let file = write_csv("year,data_value,category,variable,units,magnitude,source,flag\n");
    let dir = TempDir::new().unwrap();
    let mut options = options(file.path());
    options.chart_dir = Some(dir.path().join("charts"));

    let result = run_analysis(&options).unwrap();

    assert_eq!(result.summary.record_count, 0);
    assert!(result.summary.pivot.is_empty());
    assert!(result.charts.heatmap.is_none());
    assert!(result.chart_error.is_none());
}

#[test]
fn test_missing_input_is_source_unavailable() {
    let path = PathBuf::from("/nonexistent/marine-economy.csv");

    let error = run_analysis(&options(&path)).unwrap_err();

    let cause = error.downcast_ref::<TransformError>().unwrap();
    assert!(cause.is_source_unavailable());
    assert!(format!("{error:#}").contains("marine-economy.csv"));
}
