//! Structured error types for the twosample workspace.

use thiserror::Error;

/// Unified error type for loading and analysing a pair of samples.
#[derive(Debug, Error)]
pub enum TwoSampleError {
    /// Terminal I/O failure (stdin closed, stdout broken).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed input: non-numeric token, unsupported or unreadable file.
    #[error("input format error: {0}")]
    InputFormat(String),

    /// A requested column is not present in the table.
    #[error("schema error: {0}")]
    Schema(String),

    /// A sample is empty, before or after dropping missing values.
    #[error("empty sample: {0}")]
    EmptySample(String),

    /// Invalid top-level menu selection.
    #[error("invalid choice: {0}")]
    Choice(String),

    /// A statistical routine could not produce a result for this input.
    #[error("statistical computation failed: {0}")]
    Computation(String),
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, TwoSampleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_message() {
        let err = TwoSampleError::Schema("column `b` not found".into());
        assert_eq!(err.to_string(), "schema error: column `b` not found");
    }

    #[test]
    fn io_error_converts() {
        fn fails() -> Result<()> {
            let read: std::io::Result<()> = Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "stdin closed",
            ));
            read?;
            Ok(())
        }
        assert!(matches!(fails(), Err(TwoSampleError::Io(_))));
    }
}
