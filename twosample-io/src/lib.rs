//! Loading the two samples to compare.
//!
//! Sources:
//! - **Manual entry**: whitespace- or comma-separated numbers
//! - **CSV**: via the `csv` feature (enabled by default)
//! - **Excel** (`.xls`, `.xlsx`): via the `excel` feature (enabled by default)
//!
//! File-based sources read a whole [`Table`] first so that callers can list
//! its columns before choosing the two to compare.

pub mod manual;
pub mod source;
pub mod table;

#[cfg(feature = "csv")]
pub mod csv;

#[cfg(feature = "excel")]
pub mod excel;

pub use manual::parse_values;
pub use source::{read_table, FileSource, ManualSource, SampleSource, TableFormat};
pub use table::{Cell, Table};

#[cfg(feature = "csv")]
pub use csv::read_csv;

#[cfg(feature = "excel")]
pub use excel::read_excel;
