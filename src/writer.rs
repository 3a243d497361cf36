//! CSV output for record tables
//!
//! Serializes a [`RecordTable`] through a polars DataFrame, and reads a
//! converted CSV back into typed records for downstream consumers.

use crate::error::{ConversionError, Result};
use crate::layout::Layout;
use crate::models::{ParsedRecord, ParticleState, RecordTable};

use polars::prelude::{CsvReadOptions, CsvWriter, DataType, SerReader, SerWriter, Series};
use std::fs::{self, File};
use std::path::Path;
use tracing::{debug, info};

/// Write `table` as comma-separated values with a header row and no index
/// column. Missing parent directories are created and an existing file is
/// replaced.
pub fn export(table: &RecordTable, path: &Path) -> Result<usize> {
    let mut df = table.to_dataframe()?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ConversionError::OutputNotWritable {
            path: path.to_path_buf(),
            source,
        })?;
    }

    let mut file = File::create(path).map_err(|source| ConversionError::OutputNotWritable {
        path: path.to_path_buf(),
        source,
    })?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .finish(&mut df)?;

    info!(
        "Wrote {} rows ({} layout) to {}",
        df.height(),
        table.layout(),
        path.display()
    );
    Ok(df.height())
}

/// Read a CSV written by [`export`] back into a record table
///
/// The layout is taken from the header; any other header is rejected.
pub fn read_records(path: &Path) -> Result<RecordTable> {
    if !path.exists() {
        return Err(ConversionError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let layout = Layout::from_columns(&names[..]).ok_or_else(|| ConversionError::SchemaMismatch {
        path: path.to_path_buf(),
        columns: names.clone(),
    })?;
    debug!("Reading {} rows with {} layout", df.height(), layout);

    let mut columns = Vec::with_capacity(names.len());
    for name in &names {
        let raw = df.column(name)?.as_materialized_series();
        columns.push(float_values(raw, name)?);
    }

    let mut table = RecordTable::with_capacity(layout, df.height());
    for row in 0..df.height() {
        let values: Vec<f64> = columns.iter().map(|column| column[row]).collect();
        table.push(record_from_values(&values, layout))?;
    }

    Ok(table)
}

/// Cast a column to `f64`, rejecting cells that are null or not numeric
fn float_values(raw: &Series, name: &str) -> Result<Vec<f64>> {
    let cast = raw.cast(&DataType::Float64)?;
    let values = cast.f64()?;

    values
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.ok_or_else(|| ConversionError::InvalidNumber {
                // header is line 1
                line: row + 2,
                column: name.to_string(),
                token: raw
                    .str_value(row)
                    .map(|cell| cell.into_owned())
                    .unwrap_or_default(),
            })
        })
        .collect()
}

fn record_from_values(values: &[f64], layout: Layout) -> ParsedRecord {
    match layout {
        Layout::Basic => ParsedRecord::basic(values[0], values[1], values[2]),
        Layout::Extended => ParsedRecord::extended(
            values[0],
            values[1],
            values[2],
            particle(&values[3..10]),
            particle(&values[10..17]),
        ),
    }
}

fn particle(values: &[f64]) -> ParticleState {
    let mut state = [0.0; 7];
    state.copy_from_slice(values);
    ParticleState::from_values(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn basic_table() -> RecordTable {
        let mut table = RecordTable::new(Layout::Basic);
        table.push(ParsedRecord::basic(1.0, 2.0, 3.0)).unwrap();
        table.push(ParsedRecord::basic(4.0, 5.0, 6.0)).unwrap();
        table
    }

    #[test]
    fn test_export_basic_table() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.csv");

        let rows = export(&basic_table(), &path).unwrap();
        assert_eq!(rows, 2);

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "p1,p2,time\n1.0,2.0,3.0\n4.0,5.0,6.0\n");
    }

    #[test]
    fn test_export_empty_table_writes_header() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.csv");

        let rows = export(&RecordTable::new(Layout::Basic), &path).unwrap();
        assert_eq!(rows, 0);

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().collect::<Vec<_>>(), vec!["p1,p2,time"]);
    }

    #[test]
    fn test_export_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("out.csv");

        export(&basic_table(), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_export_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.csv");
        fs::write(&path, "stale content that is longer than the new file\n".repeat(10)).unwrap();

        export(&basic_table(), &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("p1,p2,time\n"));
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn test_export_unwritable_path() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("not_a_dir");
        fs::write(&blocker, "file").unwrap();

        let result = export(&basic_table(), &blocker.join("out.csv"));
        assert!(matches!(
            result,
            Err(ConversionError::OutputNotWritable { .. })
        ));
    }

    #[test]
    fn test_read_records_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.csv");

        let mut table = RecordTable::new(Layout::Extended);
        let first = ParticleState::from_values([0.125, -1.5, 2.0, 1e-3, 0.0, -7.25, 0.5]);
        let second = ParticleState::from_values([3.0, 4.0, 5.0, 0.1, 0.2, 0.3, 0.75]);
        table
            .push(ParsedRecord::extended(3.0, 9.0, 0.333, first, second))
            .unwrap();
        export(&table, &path).unwrap();

        let read = read_records(&path).unwrap();
        assert_eq!(read.layout(), Layout::Extended);
        assert_eq!(read.len(), 1);

        let expected = table.records()[0].values();
        let actual = read.records()[0].values();
        for (a, b) in expected.iter().zip(&actual) {
            assert!((a - b).abs() < 1e-12, "{} != {}", a, b);
        }
    }

    #[test]
    fn test_read_records_rejects_foreign_header() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("other.csv");
        fs::write(&path, "a,b,c\n1,2,3\n").unwrap();

        let result = read_records(&path);
        assert!(matches!(
            result,
            Err(ConversionError::SchemaMismatch { ref columns, .. }) if columns.len() == 3
        ));
    }

    #[test]
    fn test_read_records_rejects_non_numeric_cell() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.csv");
        fs::write(&path, "p1,p2,time\n1.0,2.0,3.0\n4.0,oops,6.0\n").unwrap();

        let result = read_records(&path);
        assert!(matches!(
            result,
            Err(ConversionError::InvalidNumber { line: 3, ref column, .. }) if column == "p2"
        ));
    }

    #[test]
    fn test_read_records_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = read_records(&temp_dir.path().join("absent.csv"));
        assert!(matches!(result, Err(ConversionError::InputNotFound { .. })));
    }
}
