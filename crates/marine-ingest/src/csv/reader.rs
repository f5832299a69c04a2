//! Delimited file reading into a Polars DataFrame.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use polars::prelude::{CsvParseOptions, CsvReadOptions, DataFrame, SerReader};
use tracing::{debug, info};

use crate::error::{IngestError, Result};

/// Options controlling how the source file is read.
#[derive(Debug, Clone, Copy)]
pub struct IngestOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Rows used for dtype inference. `Some(0)` reads every column as text.
    pub infer_schema_length: Option<usize>,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            infer_schema_length: Some(0),
        }
    }
}

impl IngestOptions {
    /// Set the field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set how many rows Polars inspects to infer column types.
    #[must_use]
    pub fn with_infer_schema_length(mut self, rows: Option<usize>) -> Self {
        self.infer_schema_length = rows;
        self
    }
}

fn open_source(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Detect encoding and validate it's supported (UTF-8 only).
///
/// Checks for UTF-16 BOM markers which are not supported.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = open_source(path)?;

    let mut buffer = [0u8; 4];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read >= 2 {
        if buffer[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    Ok(())
}

/// Reads a delimited file fully into a Polars DataFrame.
///
/// Column names in the DataFrame are exactly as written in the file.
pub fn read_csv_table(path: &Path, options: &IngestOptions) -> Result<DataFrame> {
    let start = Instant::now();
    validate_encoding(path)?;
    let metadata = fs::metadata(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    if metadata.is_file() && metadata.len() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let parse_options = CsvParseOptions::default().with_separator(options.delimiter);
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(options.infer_schema_length)
        .with_parse_options(parse_options)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    debug!(
        path = %path.display(),
        columns = ?df.get_column_names(),
        "read header row"
    );

    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        duration_ms = start.elapsed().as_millis(),
        "loaded source table"
    );
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_csv_table_empty_file() {
        let file = create_temp_csv("");
        let result = read_csv_table(file.path(), &IngestOptions::default());

        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_read_csv_table_keeps_raw_names() {
        let file = create_temp_csv("Year, Data Value ,Category\n2010,5,Fishing\n");
        let df = read_csv_table(file.path(), &IngestOptions::default()).unwrap();

        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["Year", " Data Value ", "Category"]);
    }

    #[test]
    fn test_validate_encoding_rejects_utf16() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xFF, 0xFE, b'y', 0x00]).unwrap();

        let result = validate_encoding(file.path());
        assert!(matches!(
            result,
            Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            })
        ));
    }

    #[test]
    fn test_read_csv_table_reads_text_by_default() {
        let file = create_temp_csv("year,data_value\n2010,5\n2011,6.5\n");
        let df = read_csv_table(file.path(), &IngestOptions::default()).unwrap();

        assert_eq!(df.width(), 2);
        assert_eq!(df.height(), 2);
        let year = df.column("year").unwrap().str().unwrap();
        assert_eq!(year.get(0), Some("2010"));
    }

    #[test]
    fn test_read_csv_table_custom_delimiter() {
        let file = create_temp_csv("year;data_value\n2010;5\n");
        let options = IngestOptions::default().with_delimiter(b';');
        let df = read_csv_table(file.path(), &options).unwrap();

        assert_eq!(df.width(), 2);
        assert_eq!(df.height(), 1);
    }

    #[test]
    fn test_read_csv_table_missing_file() {
        let result = read_csv_table(
            Path::new("/nonexistent/marine-economy.csv"),
            &IngestOptions::default(),
        );
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
