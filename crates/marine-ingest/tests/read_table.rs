//! Integration tests for loading source tables.

use std::io::Write;

use marine_ingest::{IngestError, IngestOptions, read_csv_table};
use tempfile::NamedTempFile;

fn write_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

#[test]
fn test_loads_all_rows_and_columns() {
    let file = write_csv(
        " Year ,Data Value,Category,Variable,Units,Magnitude,Source,Flag\n\
         2010,5,Fishing ,GDP,Dollars,Actual,Stats,\n\
         2011,abc,Tourism,GDP,Dollars,Actual,Stats,P\n",
    );

    let df = read_csv_table(file.path(), &IngestOptions::default()).unwrap();

    assert_eq!(df.height(), 2);
    assert_eq!(df.width(), 8);
    assert!(df.column(" Year ").is_ok());
    assert!(df.column("Data Value").is_ok());
}

#[test]
fn test_empty_fields_are_null() {
    let file = write_csv("year,flag\n2010,\n");

    let df = read_csv_table(file.path(), &IngestOptions::default()).unwrap();

    assert_eq!(df.column("flag").unwrap().null_count(), 1);
}

#[test]
fn test_header_only_file_has_no_rows() {
    let file = write_csv("year,data_value\n");

    let df = read_csv_table(file.path(), &IngestOptions::default()).unwrap();

    assert_eq!(df.height(), 0);
    assert_eq!(df.width(), 2);
}

#[test]
fn test_inferred_schema_yields_numeric_columns() {
    let file = write_csv("year,data_value\n2010,5.5\n2011,6\n");
    let options = IngestOptions::default().with_infer_schema_length(Some(100));

    let df = read_csv_table(file.path(), &options).unwrap();

    assert!(df.column("year").unwrap().dtype().is_integer());
    assert!(df.column("data_value").unwrap().dtype().is_float());
}

#[test]
fn test_directory_is_not_a_source() {
    let dir = tempfile::tempdir().unwrap();

    let result = read_csv_table(dir.path(), &IngestOptions::default());

    assert!(matches!(
        result,
        Err(IngestError::FileRead { .. } | IngestError::CsvParse { .. })
    ));
}
