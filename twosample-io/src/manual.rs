//! Parsing of manually entered samples.
//!
//! Values are separated by whitespace and/or commas: `"1, 2.5 3,4"` is four
//! values.

use twosample_core::{Result, TwoSampleError};

/// Split `input` into numeric tokens.
///
/// Fails with [`TwoSampleError::InputFormat`] on the first token that is not a
/// number. An empty or blank line yields an empty vector.
pub fn parse_values(label: &str, input: &str) -> Result<Vec<f64>> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<f64>().map_err(|_| {
                TwoSampleError::InputFormat(format!(
                    "values must be numeric: `{token}` in {label} is not a number"
                ))
            })
        })
        .collect()
}
