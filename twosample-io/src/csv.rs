//! CSV table reading.

use std::fs::File;
use std::path::Path;

use ::csv::{ReaderBuilder, StringRecord};
use twosample_core::{Result, TwoSampleError};

use crate::table::{Cell, Table};

/// Read a comma-separated file with a header row into a [`Table`].
///
/// Rows may be ragged; short rows are padded with missing cells when columns
/// are extracted.
pub fn read_csv(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        TwoSampleError::InputFormat(format!("cannot read {}: {}", path.display(), e))
    })?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let parse_err = |e: ::csv::Error| {
        TwoSampleError::InputFormat(format!("{}: {}", path.display(), e))
    };

    let columns: Vec<String> = reader
        .headers()
        .map_err(parse_err)?
        .iter()
        .map(|s| s.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    while reader.read_record(&mut record).map_err(parse_err)? {
        rows.push(record.iter().map(Cell::from_text).collect());
    }

    tracing::debug!(
        path = %path.display(),
        rows = rows.len(),
        columns = columns.len(),
        "csv table loaded"
    );
    Ok(Table::new(columns, rows))
}
