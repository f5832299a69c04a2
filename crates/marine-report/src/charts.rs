//! SVG charts for the cleaned table.
//!
//! Three charts are drawn with `plotters`:
//!
//! - `trend.svg`: mean `data_value` per year, one line per category
//! - `distribution.svg`: box-and-whisker of `data_value` per category
//! - `heatmap.svg`: the category × year pivot, each cell annotated
//!
//! Data preparation is kept separate from drawing so it can be tested
//! without a font stack.

use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use marine_transform::CleanedTable;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{ReportError, Result};
use crate::pivot::PivotTable;
use crate::stats::quantile;

const CHART_SIZE: (u32, u32) = (1200, 600);
const FONT: &str = "sans-serif";

/// Yellow-green-blue color stops, light to dark.
const HEAT_STOPS: [(u8, u8, u8); 9] = [
    (255, 255, 217),
    (237, 248, 177),
    (199, 233, 180),
    (127, 205, 187),
    (65, 182, 196),
    (29, 145, 192),
    (34, 94, 168),
    (37, 52, 148),
    (8, 29, 88),
];

type DrawResult = std::result::Result<(), Box<dyn Error>>;

/// Files written by [`render_charts`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartPaths {
    pub trend: Option<PathBuf>,
    pub distribution: Option<PathBuf>,
    pub heatmap: Option<PathBuf>,
}

/// One line of the trend chart.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    pub category: String,
    pub points: Vec<(i64, f64)>,
}

/// Box-and-whisker figures for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub category: String,
    pub values: Vec<f64>,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
}

impl BoxStats {
    /// Compute quartiles and 1.5×IQR fences. `None` for an empty set.
    pub fn from_values(category: &str, values: &[f64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let q1 = quantile(&sorted, 0.25)?;
        let median = quantile(&sorted, 0.5)?;
        let q3 = quantile(&sorted, 0.75)?;
        let iqr = q3 - q1;
        Some(Self {
            category: category.to_string(),
            values: sorted,
            q1,
            median,
            q3,
            lower_fence: q1 - 1.5 * iqr,
            upper_fence: q3 + 1.5 * iqr,
        })
    }

    /// Values outside the fences.
    pub fn outliers(&self) -> impl Iterator<Item = f64> + '_ {
        self.values
            .iter()
            .copied()
            .filter(|v| *v < self.lower_fence || *v > self.upper_fence)
    }
}

/// Lines for the trend chart: each pivot row, skipping empty cells.
pub fn trend_series(pivot: &PivotTable) -> Vec<TrendSeries> {
    pivot
        .categories
        .iter()
        .zip(&pivot.cells)
        .map(|(category, row)| TrendSeries {
            category: category.clone(),
            points: pivot
                .years
                .iter()
                .zip(row)
                .filter_map(|(year, cell)| cell.map(|mean| (*year, mean)))
                .collect(),
        })
        .collect()
}

/// `data_value` grouped by category, categories sorted.
pub fn category_distributions(table: &CleanedTable) -> Result<Vec<BoxStats>> {
    let categories = table.categories()?;
    let values = table.data_values()?;
    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for (category, value) in categories.into_iter().zip(values) {
        groups.entry(category).or_default().push(value);
    }
    Ok(groups
        .iter()
        .filter_map(|(category, values)| BoxStats::from_values(category, values))
        .collect())
}

/// Color for `value` on the yellow-green-blue scale spanning `[min, max]`.
pub fn heat_color(value: f64, min: f64, max: f64) -> RGBColor {
    let span = max - min;
    let t = if span > 0.0 {
        ((value - min) / span).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let scaled = t * (HEAT_STOPS.len() - 1) as f64;
    let lower = scaled.floor() as usize;
    let upper = (lower + 1).min(HEAT_STOPS.len() - 1);
    let weight = scaled - lower as f64;
    let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * weight).round() as u8;
    let (r0, g0, b0) = HEAT_STOPS[lower];
    let (r1, g1, b1) = HEAT_STOPS[upper];
    RGBColor(mix(r0, r1), mix(g0, g1), mix(b0, b1))
}

fn is_dark(color: RGBColor) -> bool {
    let RGBColor(r, g, b) = color;
    let luminance = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
    luminance < 128.0
}

fn padded(min: f64, max: f64) -> (f64, f64) {
    if (max - min).abs() < f64::EPSILON {
        let pad = if min == 0.0 { 1.0 } else { min.abs() * 0.1 };
        (min - pad, max + pad)
    } else {
        let pad = (max - min) * 0.05;
        (min - pad, max + pad)
    }
}

/// Year axis bounds, widened when every point shares one year.
fn year_range(min: i64, max: i64) -> (f64, f64) {
    let (min, max) = (min as f64, max as f64);
    if max > min {
        (min, max)
    } else {
        let pad = max.abs().mul_add(1e-6, 1.0);
        (min - pad, max + pad)
    }
}

fn year_label(year: &f64) -> String {
    if year.fract() == 0.0 {
        format!("{year:.0}")
    } else {
        String::new()
    }
}

fn draw_trend(path: &Path, series: &[TrendSeries]) -> DrawResult {
    let points = series.iter().flat_map(|s| s.points.iter());
    let (mut x_min, mut x_max) = (i64::MAX, i64::MIN);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(year, value) in points {
        x_min = x_min.min(year);
        x_max = x_max.max(year);
        y_min = y_min.min(value);
        y_max = y_max.max(value);
    }
    let (x_min, x_max) = year_range(x_min, x_max);
    let (y_min, y_max) = padded(y_min, y_max);

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Trend of Data Value Over Years by Category", (FONT, 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;
    chart
        .configure_mesh()
        .x_label_formatter(&year_label)
        .x_desc("Year")
        .y_desc("Data Value")
        .draw()?;

    for (idx, line) in series.iter().enumerate() {
        let color = Palette99::pick(idx).mix(0.9);
        let points: Vec<(f64, f64)> = line
            .points
            .iter()
            .map(|&(year, value)| (year as f64, value))
            .collect();
        chart
            .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?
            .label(line.category.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        chart.draw_series(
            points
                .iter()
                .map(|&point| Circle::new(point, 4, color.filled())),
        )?;
    }
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

fn draw_distribution(path: &Path, boxes: &[BoxStats]) -> DrawResult {
    let categories: Vec<String> = boxes.iter().map(|b| b.category.clone()).collect();
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for stats in boxes {
        for value in [stats.lower_fence, stats.upper_fence]
            .into_iter()
            .chain(stats.values.iter().copied())
        {
            y_min = y_min.min(value);
            y_max = y_max.max(value);
        }
    }
    let (y_min, y_max) = padded(y_min, y_max);

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Distribution of Data Value by Category", (FONT, 24))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d(categories[..].into_segmented(), y_min as f32..y_max as f32)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Category")
        .y_desc("Data Value")
        .draw()?;

    for (idx, stats) in boxes.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        let quartiles = Quartiles::new(&stats.values);
        let key = &categories[idx];
        chart.draw_series(std::iter::once(
            Boxplot::new_vertical(SegmentValue::CenterOf(key), &quartiles)
                .width(30)
                .whisker_width(0.5)
                .style(color),
        ))?;
        chart.draw_series(stats.outliers().map(|value| {
            Circle::new(
                (SegmentValue::CenterOf(key), value as f32),
                3,
                color.stroke_width(1),
            )
        }))?;
    }
    root.present()?;
    Ok(())
}

fn segment_end(idx: i32, len: i32) -> SegmentValue<i32> {
    if idx + 1 >= len {
        SegmentValue::Last
    } else {
        SegmentValue::Exact(idx + 1)
    }
}

fn segment_label<T: ToString>(labels: &[T], value: &SegmentValue<i32>) -> String {
    match value {
        SegmentValue::CenterOf(idx) => usize::try_from(*idx)
            .ok()
            .and_then(|i| labels.get(i))
            .map(ToString::to_string)
            .unwrap_or_default(),
        _ => String::new(),
    }
}

fn draw_heatmap(path: &Path, pivot: &PivotTable) -> DrawResult {
    let columns = i32::try_from(pivot.years.len())?;
    let rows = i32::try_from(pivot.categories.len())?;
    let (min, max) = pivot.value_range().unwrap_or((0.0, 0.0));

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Average Data Value Heatmap (Category vs Year)", (FONT, 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(120)
        .build_cartesian_2d((0..columns).into_segmented(), (0..rows).into_segmented())?;
    let year_label = |value: &SegmentValue<i32>| segment_label(&pivot.years, value);
    let category_label = |value: &SegmentValue<i32>| segment_label(&pivot.categories, value);
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(pivot.years.len())
        .y_labels(pivot.categories.len())
        .x_label_formatter(&year_label)
        .y_label_formatter(&category_label)
        .x_desc("Year")
        .y_desc("Category")
        .draw()?;

    let mut cells = Vec::new();
    for (row, values) in (0..rows).zip(&pivot.cells) {
        for (col, cell) in (0..columns).zip(values) {
            if let Some(value) = cell {
                cells.push((col, row, *value));
            }
        }
    }

    chart.draw_series(cells.iter().map(|&(col, row, value)| {
        Rectangle::new(
            [
                (SegmentValue::Exact(col), SegmentValue::Exact(row)),
                (segment_end(col, columns), segment_end(row, rows)),
            ],
            heat_color(value, min, max).filled(),
        )
    }))?;
    chart.draw_series(cells.iter().map(|&(col, row, value)| {
        let fill = heat_color(value, min, max);
        let text_color = if is_dark(fill) { WHITE } else { BLACK };
        let style = (FONT, 14)
            .into_font()
            .color(&text_color)
            .pos(Pos::new(HPos::Center, VPos::Center));
        Text::new(
            format!("{value:.1}"),
            (SegmentValue::CenterOf(col), SegmentValue::CenterOf(row)),
            style,
        )
    }))?;
    root.present()?;
    Ok(())
}

fn render(chart: &'static str, path: PathBuf, draw: impl FnOnce(&Path) -> DrawResult) -> Result<PathBuf> {
    draw(&path).map_err(|err| ReportError::Chart {
        chart,
        message: err.to_string(),
    })?;
    debug!(chart, path = %path.display(), "rendered chart");
    Ok(path)
}

/// Draw the three charts into `dir`, creating it when needed.
///
/// An empty table produces no files.
pub fn render_charts(table: &CleanedTable, pivot: &PivotTable, dir: &Path) -> Result<ChartPaths> {
    if table.is_empty() || pivot.is_empty() {
        info!("no cleaned records; skipping charts");
        return Ok(ChartPaths::default());
    }
    fs::create_dir_all(dir).map_err(|source| ReportError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    let series = trend_series(pivot);
    let boxes = category_distributions(table)?;
    let paths = ChartPaths {
        trend: Some(render("trend chart", dir.join("trend.svg"), |path| {
            draw_trend(path, &series)
        })?),
        distribution: Some(render(
            "distribution chart",
            dir.join("distribution.svg"),
            |path| draw_distribution(path, &boxes),
        )?),
        heatmap: Some(render("heatmap", dir.join("heatmap.svg"), |path| {
            draw_heatmap(path, pivot)
        })?),
    };
    info!(dir = %dir.display(), "charts written");
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_series_skips_gaps() {
        let pivot = PivotTable::from_cells(vec![
            ("fishing".to_string(), 2010, 1.0),
            ("fishing".to_string(), 2011, 2.0),
            ("tourism".to_string(), 2011, 5.0),
        ]);

        let series = trend_series(&pivot);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].points, vec![(2010, 1.0), (2011, 2.0)]);
        assert_eq!(series[1].category, "tourism");
        assert_eq!(series[1].points, vec![(2011, 5.0)]);
    }

    #[test]
    fn test_box_stats_fences_and_outliers() {
        let stats = BoxStats::from_values("fishing", &[1.0, 2.0, 3.0, 4.0, 100.0]).unwrap();

        assert_eq!(stats.q1, 2.0);
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.q3, 4.0);
        assert_eq!(stats.lower_fence, -1.0);
        assert_eq!(stats.upper_fence, 7.0);
        assert_eq!(stats.outliers().collect::<Vec<_>>(), vec![100.0]);
    }

    #[test]
    fn test_box_stats_empty() {
        assert!(BoxStats::from_values("fishing", &[]).is_none());
    }

    #[test]
    fn test_heat_color_endpoints() {
        assert_eq!(heat_color(0.0, 0.0, 10.0), RGBColor(255, 255, 217));
        assert_eq!(heat_color(10.0, 0.0, 10.0), RGBColor(8, 29, 88));
        assert_eq!(heat_color(50.0, 0.0, 10.0), RGBColor(8, 29, 88));
        assert_eq!(heat_color(3.0, 3.0, 3.0), RGBColor(255, 255, 217));
    }

    #[test]
    fn test_heat_color_midpoint() {
        // Halfway lands exactly on the fifth stop.
        assert_eq!(heat_color(5.0, 0.0, 10.0), RGBColor(65, 182, 196));
    }

    #[test]
    fn test_text_contrast() {
        assert!(is_dark(RGBColor(8, 29, 88)));
        assert!(!is_dark(RGBColor(255, 255, 217)));
    }

    #[test]
    fn test_segment_label() {
        let years = vec![2010i64, 2011];
        assert_eq!(segment_label(&years[..], &SegmentValue::CenterOf(1)), "2011");
        assert_eq!(segment_label(&years[..], &SegmentValue::CenterOf(5)), "");
        assert_eq!(segment_label(&years[..], &SegmentValue::Last), "");
    }

    #[test]
    fn test_year_range() {
        assert_eq!(year_range(2010, 2012), (2010.0, 2012.0));
        let (lo, hi) = year_range(2010, 2010);
        assert!((lo - 2008.99799).abs() < 1e-9);
        assert!((hi - 2011.00201).abs() < 1e-9);

        let (lo, hi) = year_range(i64::MAX, i64::MAX);
        assert!(lo.is_finite() && hi.is_finite());
        assert!(lo < hi);
    }

    #[test]
    fn test_year_label_whole_years_only() {
        assert_eq!(year_label(&2010.0), "2010");
        assert_eq!(year_label(&2010.5), "");
    }

    #[test]
    fn test_padded_range() {
        assert_eq!(padded(0.0, 0.0), (-1.0, 1.0));
        assert_eq!(padded(0.0, 10.0), (-0.5, 10.5));
    }
}
