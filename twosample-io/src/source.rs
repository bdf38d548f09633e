//! Where the two samples come from.
//!
//! A [`SampleSource`] produces a validated [`SamplePair`]; the analysis does
//! not care whether the numbers were typed in or read from a table.

use std::fmt;
use std::path::Path;

use twosample_core::{Result, SamplePair, TwoSampleError};

use crate::manual;
use crate::table::Table;

/// Anything that can produce the two samples to compare.
pub trait SampleSource {
    fn load(&self) -> Result<SamplePair>;
}

/// Two lines of manually entered values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualSource {
    pub first: String,
    pub second: String,
}

impl ManualSource {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }
}

impl SampleSource for ManualSource {
    /// Both lines are parsed before either is checked for emptiness, so a
    /// bad token anywhere is reported ahead of an empty line.
    fn load(&self) -> Result<SamplePair> {
        let first = manual::parse_values("first sample", &self.first)?;
        let second = manual::parse_values("second sample", &self.second)?;
        SamplePair::from_values(first, second)
    }
}

/// Supported table formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Excel,
}

impl TableFormat {
    /// Detect the format from the extension, ignoring case.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(TableFormat::Csv),
            Some("xls") | Some("xlsx") => Ok(TableFormat::Excel),
            _ => Err(TwoSampleError::InputFormat(format!(
                "unsupported file format for {}: use a .csv, .xls or .xlsx file",
                path.display()
            ))),
        }
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableFormat::Csv => f.write_str("CSV"),
            TableFormat::Excel => f.write_str("Excel"),
        }
    }
}

/// Read a CSV or Excel file into a [`Table`], dispatching on its extension.
pub fn read_table(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    match TableFormat::from_path(path)? {
        #[cfg(feature = "csv")]
        TableFormat::Csv => crate::csv::read_csv(path),
        #[cfg(feature = "excel")]
        TableFormat::Excel => crate::excel::read_excel(path),
        #[allow(unreachable_patterns)]
        other => Err(TwoSampleError::InputFormat(format!(
            "{other} support is not enabled in this build"
        ))),
    }
}

/// Two named columns of a loaded table.
#[derive(Debug, Clone)]
pub struct FileSource {
    table: Table,
    first_column: String,
    second_column: String,
}

impl FileSource {
    /// Pair an already loaded table with the columns to compare.
    pub fn new(
        table: Table,
        first_column: impl Into<String>,
        second_column: impl Into<String>,
    ) -> Self {
        Self {
            table,
            first_column: first_column.into(),
            second_column: second_column.into(),
        }
    }

    /// Read `path` and select the two columns.
    pub fn open(
        path: impl AsRef<Path>,
        first_column: impl Into<String>,
        second_column: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self::new(read_table(path)?, first_column, second_column))
    }

    pub fn table(&self) -> &Table {
        &self.table
    }
}

impl SampleSource for FileSource {
    fn load(&self) -> Result<SamplePair> {
        self.table.sample_pair(&self.first_column, &self.second_column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn manual_source_loads_both_lines() {
        let pair = ManualSource::new("1 2 3", "4, 5, 6, 7").load().unwrap();
        assert_eq!(pair.first.values(), &[1.0, 2.0, 3.0]);
        assert_eq!(pair.second.len(), 4);
    }

    #[test]
    fn manual_source_reports_bad_token_before_empty_line() {
        let err = ManualSource::new("", "1 x").load().unwrap_err();
        assert!(matches!(err, TwoSampleError::InputFormat(_)));

        let err = ManualSource::new("1 2", "").load().unwrap_err();
        assert!(matches!(err, TwoSampleError::EmptySample(_)));
    }

    #[test]
    fn format_detection() {
        let detect = |p: &str| TableFormat::from_path(Path::new(p)).unwrap();
        assert_eq!(detect("a.csv"), TableFormat::Csv);
        assert_eq!(detect("a.XLSX"), TableFormat::Excel);
        assert_eq!(detect("dir/a.xls"), TableFormat::Excel);
        for bad in ["a.txt", "a", "a.csv.gz"] {
            let err = TableFormat::from_path(Path::new(bad)).unwrap_err();
            assert!(matches!(err, TwoSampleError::InputFormat(_)), "{bad}");
        }
    }

    #[test]
    fn unsupported_extension_is_rejected_before_reading() {
        let err = read_table("/nonexistent/data.json").unwrap_err();
        assert!(matches!(err, TwoSampleError::InputFormat(_)));
    }

    #[test]
    fn file_source_from_csv() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(file, "control,treated").unwrap();
        writeln!(file, "1,2").unwrap();
        writeln!(file, "2,NA").unwrap();
        writeln!(file, "3,5").unwrap();
        file.flush().unwrap();

        let source = FileSource::open(file.path(), "treated", "control").unwrap();
        assert_eq!(source.table().columns(), &["control", "treated"]);
        let pair = source.load().unwrap();
        assert_eq!(pair.first.values(), &[2.0, 5.0]);
        assert_eq!(pair.second.values(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn file_source_missing_column() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(file, "a,b").unwrap();
        writeln!(file, "1,2").unwrap();
        file.flush().unwrap();

        let source = FileSource::open(file.path(), "a", "c").unwrap();
        let err = source.load().unwrap_err();
        assert!(matches!(err, TwoSampleError::Schema(_)));
    }

    #[test]
    fn file_source_column_empty_after_cleaning() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(file, "a,b").unwrap();
        writeln!(file, "1,").unwrap();
        writeln!(file, "2,NaN").unwrap();
        file.flush().unwrap();

        let source = FileSource::open(file.path(), "a", "b").unwrap();
        let err = source.load().unwrap_err();
        assert!(matches!(err, TwoSampleError::EmptySample(_)));
    }
}
