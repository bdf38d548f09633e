//! In-memory tabular data and numeric column extraction.

use twosample_core::{Result, Sample, SamplePair, TwoSampleError};

/// Cell contents after reading a CSV or spreadsheet.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Absent or NA-marked value.
    Empty,
    /// A native numeric cell.
    Number(f64),
    /// Anything else, coerced later.
    Text(String),
}

/// Tokens read as missing values, compared after trimming.
const NA_MARKERS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-nan", "-NaN", "null", "NULL", "None", "#N/A", "<NA>",
];

impl Cell {
    /// Classify a raw text field.
    pub fn from_text(raw: &str) -> Self {
        if NA_MARKERS.contains(&raw.trim()) {
            Cell::Empty
        } else {
            Cell::Text(raw.to_string())
        }
    }
}

/// A table with a header row, stored row-major. Rows may be shorter than the
/// header; absent trailing cells count as missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Build a table. Blank header names become `Unnamed: <index>`.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let columns = columns
            .into_iter()
            .enumerate()
            .map(|(i, c)| {
                if c.trim().is_empty() {
                    format!("Unnamed: {i}")
                } else {
                    c
                }
            })
            .collect();
        Self { columns, rows }
    }

    /// Header names in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Extract `name` as a sample: missing cells are dropped, the rest must
    /// all be numeric.
    pub fn numeric_column(&self, name: &str) -> Result<Sample> {
        let idx = self.column_index(name).ok_or_else(|| {
            TwoSampleError::Schema(format!(
                "column `{name}` is not present in the file (available: {})",
                self.columns.join(", ")
            ))
        })?;

        let mut values = Vec::with_capacity(self.rows.len());
        let mut dropped = 0usize;
        for (row_no, row) in self.rows.iter().enumerate() {
            let value = match row.get(idx) {
                Some(Cell::Number(v)) if !v.is_nan() => *v,
                Some(Cell::Text(s)) => s.trim().parse::<f64>().map_err(|_| {
                    TwoSampleError::InputFormat(format!(
                        "values in column `{name}` must be numeric: `{s}` at data row {}",
                        row_no + 1
                    ))
                })?,
                _ => {
                    dropped += 1;
                    continue;
                }
            };
            values.push(value);
        }
        tracing::debug!(column = name, kept = values.len(), dropped, "column extracted");

        if values.is_empty() {
            return Err(TwoSampleError::EmptySample(format!(
                "column `{name}` has no values after dropping missing entries"
            )));
        }
        Sample::new(name, values)
    }

    /// Extract two columns as the pair to analyse. Both names are checked
    /// before any values are read.
    pub fn sample_pair(&self, first: &str, second: &str) -> Result<SamplePair> {
        let missing: Vec<&str> = [first, second]
            .into_iter()
            .filter(|name| self.column_index(name).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(TwoSampleError::Schema(format!(
                "column(s) not present in the file: {} (available: {})",
                missing.join(", "),
                self.columns.join(", ")
            )));
        }
        Ok(SamplePair::new(
            self.numeric_column(first)?,
            self.numeric_column(second)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::from_text(s)
    }

    fn table() -> Table {
        Table::new(
            vec!["a".into(), "b".into(), "label".into()],
            vec![
                vec![text("1"), text("10"), text("x")],
                vec![text(""), text(" 11 "), text("y")],
                vec![text("3"), text("NA"), text("z")],
                vec![Cell::Number(4.0)],
            ],
        )
    }

    #[test]
    fn drops_missing_per_column() {
        let t = table();
        assert_eq!(t.numeric_column("a").unwrap().values(), &[1.0, 3.0, 4.0]);
        assert_eq!(t.numeric_column("b").unwrap().values(), &[10.0, 11.0]);
    }

    #[test]
    fn non_numeric_column() {
        let err = table().numeric_column("label").unwrap_err();
        assert!(matches!(err, TwoSampleError::InputFormat(_)));
        assert!(err.to_string().contains("`x`"));
    }

    #[test]
    fn missing_column_is_schema_error() {
        let err = table().sample_pair("a", "nope").unwrap_err();
        assert!(matches!(err, TwoSampleError::Schema(_)));
        assert!(err.to_string().contains("nope"));
        assert!(err.to_string().contains("available: a, b, label"));
    }

    #[test]
    fn all_missing_is_empty_sample() {
        let t = Table::new(
            vec!["a".into()],
            vec![vec![text("NaN")], vec![Cell::Number(f64::NAN)], vec![]],
        );
        let err = t.numeric_column("a").unwrap_err();
        assert!(matches!(err, TwoSampleError::EmptySample(_)));
    }

    #[test]
    fn blank_headers_are_named_by_position() {
        let t = Table::new(vec!["a".into(), " ".into()], vec![]);
        assert_eq!(t.columns(), &["a".to_string(), "Unnamed: 1".to_string()]);
    }

    #[test]
    fn sample_pair_in_order() {
        let pair = table().sample_pair("b", "a").unwrap();
        assert_eq!(pair.first.len(), 2);
        assert_eq!(pair.second.len(), 3);
    }
}
