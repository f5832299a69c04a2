//! Category × year mean pivot.

use std::collections::{BTreeMap, BTreeSet};

use marine_transform::{CATEGORY, CleanedTable, DATA_VALUE, YEAR};
use polars::prelude::{IntoLazy, col};
use serde::Serialize;
use tracing::debug;

use crate::error::Result;

/// Mean `data_value` indexed by category (rows) and year (columns).
///
/// A (category, year) pair with no observations has no cell value; it is
/// never filled with zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PivotTable {
    pub categories: Vec<String>,
    pub years: Vec<i64>,
    /// `cells[row][col]` for `categories[row]` and `years[col]`.
    pub cells: Vec<Vec<Option<f64>>>,
}

impl PivotTable {
    /// Lay out already aggregated `(category, year, mean)` cells.
    ///
    /// Categories and years are sorted ascending. A repeated pair keeps the
    /// last value.
    pub fn from_cells<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = (String, i64, f64)>,
    {
        let mut values: BTreeMap<(String, i64), f64> = BTreeMap::new();
        let mut years = BTreeSet::new();
        for (category, year, value) in cells {
            years.insert(year);
            values.insert((category, year), value);
        }
        let categories: BTreeSet<&str> = values.keys().map(|(c, _)| c.as_str()).collect();
        let years: Vec<i64> = years.into_iter().collect();
        let cells = categories
            .iter()
            .map(|category| {
                years
                    .iter()
                    .map(|year| values.get(&(category.to_string(), *year)).copied())
                    .collect()
            })
            .collect();
        Self {
            categories: categories.into_iter().map(str::to_string).collect(),
            years,
            cells,
        }
    }

    /// Mean for one (category, year) pair, if observed.
    pub fn get(&self, category: &str, year: i64) -> Option<f64> {
        let row = self.categories.iter().position(|c| c == category)?;
        let col = self.years.binary_search(&year).ok()?;
        self.cells[row][col]
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Smallest and largest cell value.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.cells
            .iter()
            .flatten()
            .flatten()
            .fold(None, |range, &v| match range {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Mean `data_value` grouped by (`category`, `year`).
pub fn mean_pivot(table: &CleanedTable) -> Result<PivotTable> {
    let grouped = table
        .data()
        .clone()
        .lazy()
        .group_by([col(CATEGORY), col(YEAR)])
        .agg([col(DATA_VALUE).mean()])
        .collect()?;
    debug!(groups = grouped.height(), "grouped category and year");

    let categories = grouped.column(CATEGORY)?.str()?;
    let years = grouped.column(YEAR)?.i64()?;
    let means = grouped.column(DATA_VALUE)?.f64()?;
    let cells = categories
        .into_iter()
        .zip(years)
        .zip(means)
        .filter_map(|((category, year), mean)| Some((category?.to_string(), year?, mean?)));
    Ok(PivotTable::from_cells(cells))
}

#[cfg(test)]
mod tests {
    use marine_transform::clean;
    use polars::prelude::{Column, DataFrame, NamedFrom, Series};

    use super::*;

    fn table(rows: &[(&str, &str, Option<&str>)]) -> CleanedTable {
        let column = |name: &str, values: Vec<Option<&str>>| -> Column {
            Series::new(name.into(), values).into()
        };
        let n = rows.len();
        let df = DataFrame::new(vec![
            column("year", rows.iter().map(|r| Some(r.0)).collect()),
            column("data_value", rows.iter().map(|r| Some(r.1)).collect()),
            column("category", rows.iter().map(|r| r.2).collect()),
            column("variable", vec![Some("GDP"); n]),
            column("units", vec![Some("Dollars"); n]),
            column("magnitude", vec![Some("Actual"); n]),
            column("source", vec![Some("Stats"); n]),
            column("flag", vec![None; n]),
        ])
        .unwrap();
        clean(df).unwrap().table
    }

    #[test]
    fn test_pivot_means_and_gaps() {
        let pivot = mean_pivot(&table(&[
            ("2010", "4", Some("Fishing")),
            ("2010", "6", Some("fishing")),
            ("2011", "7", Some("Fishing")),
            ("2010", "2", Some("Tourism")),
        ]))
        .unwrap();

        assert_eq!(pivot.categories, vec!["fishing", "tourism"]);
        assert_eq!(pivot.years, vec![2010, 2011]);
        assert_eq!(pivot.get("fishing", 2010), Some(5.0));
        assert_eq!(pivot.get("fishing", 2011), Some(7.0));
        assert_eq!(pivot.get("tourism", 2010), Some(2.0));
        assert_eq!(pivot.get("tourism", 2011), None);
        assert_eq!(pivot.cells[1][1], None);
        assert_eq!(pivot.get("shipping", 2010), None);
        assert_eq!(pivot.value_range(), Some((2.0, 7.0)));
    }

    #[test]
    fn test_blank_category_is_pivoted_as_nan() {
        let rows = [("2010", "3", None), ("2010", "5", Some("Fishing"))];
        let pivot = mean_pivot(&table(&rows)).unwrap();

        assert_eq!(pivot.categories, vec!["fishing", "nan"]);
        assert_eq!(pivot.get("nan", 2010), Some(3.0));
    }

    #[test]
    fn test_from_cells_sorts_axes() {
        let pivot = PivotTable::from_cells(vec![
            ("tourism".to_string(), 2011, 1.0),
            ("fishing".to_string(), 2010, 2.0),
        ]);

        assert_eq!(pivot.categories, vec!["fishing", "tourism"]);
        assert_eq!(pivot.years, vec![2010, 2011]);
        assert_eq!(pivot.cells, vec![vec![Some(2.0), None], vec![None, Some(1.0)]]);
    }

    #[test]
    fn test_empty_pivot() {
        let pivot = mean_pivot(&table(&[])).unwrap();
        assert!(pivot.is_empty());
        assert_eq!(pivot.value_range(), None);
    }
}
