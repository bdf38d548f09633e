//! Descriptive statistics for numeric data.
//!
//! Provides individual functions ([`mean`], [`median`], [`variance`]) and the
//! aggregate [`describe`] used for the per-sample lines of a report.

use serde::Serialize;
use twosample_core::{Result, Summarizable, TwoSampleError};

/// Aggregate descriptive statistics for a numeric sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStats {
    /// Number of observations.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Median (50th percentile).
    pub median: f64,
    /// Sample standard deviation (ddof=1); NaN for a single observation.
    pub std_dev: f64,
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
}

impl Summarizable for DescriptiveStats {
    fn summary(&self) -> String {
        format!(
            "n={}, mean={:.3}, sd={:.3}, median={:.3}, range=[{:.3}, {:.3}]",
            self.count, self.mean, self.std_dev, self.median, self.min, self.max,
        )
    }
}

/// Compute the descriptive statistics for `data`. Requires at least 1 element.
pub fn describe(data: &[f64]) -> Result<DescriptiveStats> {
    if data.is_empty() {
        return Err(TwoSampleError::EmptySample(
            "describe: data must not be empty".into(),
        ));
    }

    let n = data.len();
    let mean_val = mean(data)?;
    let std_dev = if n > 1 {
        variance(data, 1)?.sqrt()
    } else {
        f64::NAN
    };

    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    Ok(DescriptiveStats {
        count: n,
        mean: mean_val,
        median: median_sorted(&sorted),
        std_dev,
        min: sorted[0],
        max: sorted[n - 1],
    })
}

/// Arithmetic mean.
pub fn mean(data: &[f64]) -> Result<f64> {
    if data.is_empty() {
        return Err(TwoSampleError::EmptySample(
            "mean: data must not be empty".into(),
        ));
    }
    Ok(data.iter().sum::<f64>() / data.len() as f64)
}

/// Median (50th percentile).
pub fn median(data: &[f64]) -> Result<f64> {
    if data.is_empty() {
        return Err(TwoSampleError::EmptySample(
            "median: data must not be empty".into(),
        ));
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Ok(median_sorted(&sorted))
}

/// Variance with given degrees-of-freedom correction.
///
/// - `ddof = 0` → population variance
/// - `ddof = 1` → sample variance (Bessel's correction)
pub fn variance(data: &[f64], ddof: usize) -> Result<f64> {
    let n = data.len();
    if n <= ddof {
        return Err(TwoSampleError::Computation(format!(
            "variance: need more than {ddof} observations (got {n})"
        )));
    }
    let m = mean(data)?;
    let ss: f64 = data.iter().map(|&x| (x - m).powi(2)).sum();
    Ok(ss / (n - ddof) as f64)
}

fn median_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        0.5 * (sorted[n / 2 - 1] + sorted[n / 2])
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
