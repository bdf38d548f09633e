//! Excel workbook reading (`.xlsx` and legacy `.xls`).

use std::fs::File;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use twosample_core::{Result, TwoSampleError};

use crate::table::{Cell, Table};

/// Read the first worksheet of a workbook into a [`Table`]; its first row is
/// the header.
pub fn read_excel(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    // calamine reports a missing file as a format error.
    File::open(path).map_err(|e| {
        TwoSampleError::InputFormat(format!("cannot read {}: {}", path.display(), e))
    })?;
    let workbook_err =
        |e: calamine::Error| TwoSampleError::InputFormat(format!("{}: {}", path.display(), e));

    let mut workbook = open_workbook_auto(path).map_err(workbook_err)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| {
            TwoSampleError::InputFormat(format!("{}: workbook has no worksheets", path.display()))
        })?
        .map_err(workbook_err)?;

    let mut rows = range.rows();
    let columns: Vec<String> = rows
        .next()
        .map(|header| header.iter().map(|c| c.to_string().trim().to_string()).collect())
        .unwrap_or_default();
    let rows: Vec<Vec<Cell>> = rows.map(|row| row.iter().map(to_cell).collect()).collect();

    tracing::debug!(
        path = %path.display(),
        rows = rows.len(),
        columns = columns.len(),
        "worksheet loaded"
    );
    Ok(Table::new(columns, rows))
}

/// Error cells such as `#N/A` count as missing values; booleans read as 1/0.
fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::Float(v) => Cell::Number(*v),
        Data::Int(v) => Cell::Number(*v as f64),
        Data::Bool(b) => Cell::Number(if *b { 1.0 } else { 0.0 }),
        Data::String(s) => Cell::from_text(s),
        other => Cell::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;
    use rust_xlsxwriter::Workbook;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Header a, b, group; blank and "NA" cells scattered per column, and a
    /// second sheet that must be ignored.
    fn write_workbook(path: &Path) {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, name) in ["a", "b", "group"].into_iter().enumerate() {
            sheet.write_string(0, col as u16, name).unwrap();
        }
        sheet.write_number(1, 0, 1.0).unwrap();
        sheet.write_number(1, 1, 10.0).unwrap();
        sheet.write_string(1, 2, "ctl").unwrap();
        sheet.write_number(2, 0, 2.0).unwrap();
        sheet.write_string(2, 2, "ctl").unwrap();
        sheet.write_number(3, 0, 3.0).unwrap();
        sheet.write_number(3, 1, 30.0).unwrap();
        sheet.write_string(3, 2, "trt").unwrap();
        sheet.write_number(4, 0, 4.0).unwrap();
        sheet.write_string(4, 1, "NA").unwrap();
        sheet.write_string(4, 2, "trt").unwrap();
        sheet.write_number(5, 1, 50.0).unwrap();
        sheet.write_boolean(5, 2, true).unwrap();

        let other = workbook.add_worksheet();
        other.write_string(0, 0, "ignored").unwrap();
        other.write_number(1, 0, 99.0).unwrap();

        workbook.save(path).unwrap();
    }

    #[test]
    fn reads_first_worksheet() {
        let file = NamedTempFile::with_suffix(".xlsx").unwrap();
        write_workbook(file.path());

        let table = read_excel(file.path()).unwrap();
        assert_eq!(table.columns(), &["a", "b", "group"]);
        assert_eq!(
            table.numeric_column("a").unwrap().values(),
            &[1.0, 2.0, 3.0, 4.0]
        );
        assert_eq!(
            table.numeric_column("b").unwrap().values(),
            &[10.0, 30.0, 50.0]
        );
        let err = table.numeric_column("group").unwrap_err();
        assert!(matches!(err, TwoSampleError::InputFormat(_)));
        assert!(matches!(
            table.numeric_column("ignored").unwrap_err(),
            TwoSampleError::Schema(_)
        ));
    }

    #[test]
    fn cell_conversion() {
        assert_eq!(to_cell(&Data::Float(1.5)), Cell::Number(1.5));
        assert_eq!(to_cell(&Data::Int(-3)), Cell::Number(-3.0));
        assert_eq!(to_cell(&Data::Empty), Cell::Empty);
        assert_eq!(to_cell(&Data::Error(CellErrorType::NA)), Cell::Empty);
        assert_eq!(to_cell(&Data::String("N/A".into())), Cell::Empty);
        assert_eq!(
            to_cell(&Data::String(" 2.5".into())),
            Cell::Text(" 2.5".into())
        );
        assert_eq!(to_cell(&Data::Bool(true)), Cell::Number(1.0));
    }

    #[test]
    fn corrupt_workbook_is_input_format_error() {
        let mut file = NamedTempFile::with_suffix(".xlsx").unwrap();
        file.write_all(b"this is not a zip archive").unwrap();
        file.flush().unwrap();

        let err = read_excel(file.path()).unwrap_err();
        assert!(matches!(err, TwoSampleError::InputFormat(_)), "{err}");
    }

    #[test]
    fn missing_workbook_is_input_format_error() {
        let err = read_excel("/nonexistent/book.xlsx").unwrap_err();
        assert!(matches!(err, TwoSampleError::InputFormat(_)), "{err}");
    }
}
