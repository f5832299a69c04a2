//! Reporting for cleaned marine economy data.
//!
//! - **stats**: descriptive statistics per numeric column
//! - **pivot**: mean `data_value` by category and year
//! - **preview**: head rows and schema overview of the cleaned table
//! - **summary**: the combined, serializable report
//! - **charts**: SVG trend, distribution and heatmap charts

pub mod charts;
pub mod error;
pub mod pivot;
pub mod preview;
pub mod stats;
pub mod summary;

pub use charts::{
    BoxStats, ChartPaths, TrendSeries, category_distributions, heat_color, render_charts,
    trend_series,
};
pub use error::{ReportError, Result};
pub use pivot::{PivotTable, mean_pivot};
pub use preview::{ColumnInfo, HeadRows, column_info, head_rows};
pub use stats::{ColumnStatistics, describe, describe_column, quantile};
pub use summary::{DatasetSummary, summarize, write_summary_json};
