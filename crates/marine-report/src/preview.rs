//! Head rows and schema overview.

use marine_common::any_to_text;
use polars::prelude::{AnyValue, DataFrame};
use serde::Serialize;

/// The first rows of a table rendered as text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadRows {
    pub columns: Vec<String>,
    /// Cell text per row; `None` marks a null.
    pub rows: Vec<Vec<Option<String>>>,
}

/// Name, dtype and non-null count of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub dtype: String,
    pub non_null: usize,
}

pub fn head_rows(df: &DataFrame, limit: usize) -> HeadRows {
    let columns = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let height = df.height().min(limit);
    let rows = (0..height)
        .map(|idx| {
            df.get_columns()
                .iter()
                .map(|column| any_to_text(column.get(idx).unwrap_or(AnyValue::Null)))
                .collect()
        })
        .collect();
    HeadRows { columns, rows }
}

pub fn column_info(df: &DataFrame) -> Vec<ColumnInfo> {
    df.get_columns()
        .iter()
        .map(|column| ColumnInfo {
            name: column.name().to_string(),
            dtype: column.dtype().to_string(),
            non_null: column.len() - column.null_count(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use polars::prelude::{NamedFrom, Series};

    use super::*;

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new("year".into(), vec![2010i64, 2011, 2012]).into(),
            Series::new("flag".into(), vec![None, Some("p"), None]).into(),
        ])
        .unwrap()
    }

    #[test]
    fn test_head_rows_limits_rows() {
        let head = head_rows(&frame(), 2);

        assert_eq!(head.columns, vec!["year", "flag"]);
        assert_eq!(
            head.rows,
            vec![
                vec![Some("2010".to_string()), None],
                vec![Some("2011".to_string()), Some("p".to_string())],
            ]
        );
    }

    #[test]
    fn test_head_rows_shorter_table() {
        assert_eq!(head_rows(&frame(), 5).rows.len(), 3);
    }

    #[test]
    fn test_column_info_counts_non_null() {
        let info = column_info(&frame());

        assert_eq!(info[0].name, "year");
        assert_eq!(info[0].dtype, "i64");
        assert_eq!(info[0].non_null, 3);
        assert_eq!(info[1].dtype, "str");
        assert_eq!(info[1].non_null, 1);
    }
}
