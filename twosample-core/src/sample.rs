//! Validated numeric samples.
//!
//! A [`Sample`] can only be built through [`Sample::new`], which rejects empty
//! input and non-finite values. Downstream code can therefore rely on every
//! sample holding at least one finite observation.

use serde::Serialize;

use crate::{Result, TwoSampleError};

/// An ordered, immutable sequence of finite real numbers (length >= 1).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Sample {
    values: Vec<f64>,
}

impl Sample {
    /// Validate `values` and wrap them.
    ///
    /// `label` names the sample in error messages ("first sample", a column
    /// name, ...).
    pub fn new(label: &str, values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(TwoSampleError::EmptySample(format!(
                "{label} contains no values"
            )));
        }
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(TwoSampleError::InputFormat(format!(
                "{label}: value at position {} is not a finite number ({})",
                pos + 1,
                values[pos],
            )));
        }
        Ok(Self { values })
    }

    /// The observations, in input order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the sample has no observations; `false` for any constructed sample.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl AsRef<[f64]> for Sample {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

/// The two independent samples of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplePair {
    pub first: Sample,
    pub second: Sample,
}

impl SamplePair {
    pub fn new(first: Sample, second: Sample) -> Self {
        Self { first, second }
    }

    /// Validate two raw sequences at once.
    pub fn from_values(first: Vec<f64>, second: Vec<f64>) -> Result<Self> {
        Ok(Self {
            first: Sample::new("first sample", first)?,
            second: Sample::new("second sample", second)?,
        })
    }
}
