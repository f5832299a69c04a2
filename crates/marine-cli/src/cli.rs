//! CLI argument definitions for the marine economy explorer.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "marine-eda",
    version,
    about = "Marine economy explorer - clean the dataset and summarize it",
    long_about = "Load the marine economy CSV, clean it and print a summary.\n\n\
                  Cleaning normalizes column names, coerces year and data_value,\n\
                  drops incomplete and duplicate records, normalizes text and keeps\n\
                  only records whose magnitude is \"actual\". Trend, distribution and\n\
                  heatmap charts are written as SVG files."
)]
pub struct Cli {
    /// Path to the marine economy CSV file.
    #[arg(value_name = "INPUT", default_value = "marine-economy.csv")]
    pub input: PathBuf,

    /// Field delimiter of the input file.
    #[arg(long = "delimiter", value_name = "CHAR", default_value_t = ',')]
    pub delimiter: char,

    /// Rows used to infer column types (0 reads every column as text).
    #[arg(long = "infer-schema-rows", value_name = "N", default_value_t = 0)]
    pub infer_schema_rows: usize,

    /// Directory for the SVG charts.
    #[arg(long = "chart-dir", value_name = "DIR", default_value = "charts")]
    pub chart_dir: PathBuf,

    /// Skip chart rendering.
    #[arg(long = "no-charts")]
    pub no_charts: bool,

    /// Also write the summary as JSON to this path.
    #[arg(long = "summary-json", value_name = "PATH")]
    pub summary_json: Option<PathBuf>,

    /// Number of records shown in the preview table.
    #[arg(long = "head", value_name = "N", default_value_t = 5)]
    pub head: usize,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["marine-eda"]).unwrap();

        assert_eq!(cli.input, PathBuf::from("marine-economy.csv"));
        assert_eq!(cli.delimiter, ',');
        assert_eq!(cli.infer_schema_rows, 0);
        assert_eq!(cli.chart_dir, PathBuf::from("charts"));
        assert!(!cli.no_charts);
        assert!(cli.summary_json.is_none());
        assert_eq!(cli.head, 5);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "marine-eda",
            "data.tsv",
            "--delimiter",
            "\t",
            "--no-charts",
            "--summary-json",
            "out/summary.json",
            "--head",
            "10",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.input, PathBuf::from("data.tsv"));
        assert_eq!(cli.delimiter, '\t');
        assert!(cli.no_charts);
        assert_eq!(cli.summary_json, Some(PathBuf::from("out/summary.json")));
        assert_eq!(cli.head, 10);
        assert!(matches!(cli.log_format, LogFormatArg::Json));
    }
}
