//! Shapiro–Wilk test for normality.
//!
//! Implements Royston's approximation (Algorithm AS R94): the coefficients
//! come from Blom's approximation of the expected normal order statistics
//! with polynomial corrections for the extreme ones, and W is mapped to a
//! normal deviate for the p-value. n = 3 uses the exact distribution.
//!
//! References:
//! - Royston (1992). "Approximating the Shapiro-Wilk W-test for
//!   non-normality". Statistics and Computing, 2, 117–119.
//! - Royston (1995). "Remark AS R94". Applied Statistics, 44(4), 547–551.

use core::f64::consts::{FRAC_1_SQRT_2, PI};

use twosample_core::{Result, TwoSampleError};

use crate::distribution::{Distribution, Normal};
use crate::testing::TestResult;

/// Above this size the p-value approximation is no longer validated.
const SW_MAX_VALIDATED_N: usize = 5000;

const SW_C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.07119, 4.434685, -2.706056];
const SW_C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const SW_C3: [f64; 4] = [0.544, -0.39978, 0.025054, -6.714e-4];
const SW_C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const SW_C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const SW_C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];
const SW_G: [f64; 2] = [-2.273, 0.459];

/// Shapiro–Wilk test; H₀: the data come from a normal distribution.
///
/// Returns W as the statistic. Requires at least 3 observations and a
/// non-zero range. Samples larger than 5000 are still tested, with a warning
/// that the p-value may be inaccurate.
pub fn shapiro_wilk(data: &[f64]) -> Result<TestResult> {
    let n = data.len();
    if n < 3 {
        return Err(TwoSampleError::Computation(format!(
            "shapiro_wilk: need at least 3 observations (got {n})"
        )));
    }

    let mut x = data.to_vec();
    x.sort_by(|a, b| a.total_cmp(b));

    let range = x[n - 1] - x[0];
    if range.is_nan() || range <= 0.0 {
        return Err(TwoSampleError::Computation(
            "shapiro_wilk: input data has range zero".into(),
        ));
    }

    let (w, p) = if n == 3 {
        shapiro_wilk_n3(&x)
    } else {
        let a = coefficients(n);
        let w = w_statistic(&x, &a).min(1.0);
        (w, p_value(w, n))
    };

    let mut result = TestResult {
        statistic: w,
        p_value: p.clamp(0.0, 1.0),
        degrees_of_freedom: None,
        method: "Shapiro-Wilk test".into(),
        warnings: Vec::new(),
    };
    if n > SW_MAX_VALIDATED_N {
        result
            .warnings
            .push(format!("p-value may not be accurate for n > {SW_MAX_VALIDATED_N}"));
    }
    Ok(result)
}

/// n = 3: a = (-1/√2, 0, 1/√2) and p = 1 - (6/π)·acos(√W).
fn shapiro_wilk_n3(x: &[f64]) -> (f64, f64) {
    let mean = (x[0] + x[1] + x[2]) / 3.0;
    let ss: f64 = x.iter().map(|&v| (v - mean).powi(2)).sum();
    let num = FRAC_1_SQRT_2 * (x[2] - x[0]);
    let w = (num * num / ss).clamp(0.75, 1.0);
    let p = 1.0 - (6.0 / PI) * w.sqrt().acos();
    (w, p)
}

/// Horner evaluation of c[0] + c[1]·x + c[2]·x² + ...
fn poly(c: &[f64], x: f64) -> f64 {
    c.iter().rev().fold(0.0, |acc, &ci| acc * x + ci)
}

/// The lower half of the antisymmetric coefficient vector, as positive
/// weights for `x[n-1-i] - x[i]`.
fn coefficients(n: usize) -> Vec<f64> {
    let nn2 = n / 2;
    let normal = Normal::standard();

    // Blom scores for the lower order statistics (negative values).
    let m: Vec<f64> = (0..nn2)
        .map(|i| normal.quantile((i as f64 + 1.0 - 0.375) / (n as f64 + 0.25)))
        .collect();
    let summ2 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / (n as f64).sqrt();

    let mut a = vec![0.0; nn2];
    a[0] = poly(&SW_C1, rsn) - m[0] / ssumm2;

    let (corrected, fac) = if n > 5 {
        a[1] = poly(&SW_C2, rsn) - m[1] / ssumm2;
        let fac = ((summ2 - 2.0 * m[0] * m[0] - 2.0 * m[1] * m[1])
            / (1.0 - 2.0 * a[0] * a[0] - 2.0 * a[1] * a[1]))
            .sqrt();
        (2, fac)
    } else {
        let fac = ((summ2 - 2.0 * m[0] * m[0]) / (1.0 - 2.0 * a[0] * a[0])).sqrt();
        (1, fac)
    };
    for (ai, mi) in a.iter_mut().zip(&m).skip(corrected) {
        *ai = -mi / fac;
    }
    a
}

fn w_statistic(sorted: &[f64], a: &[f64]) -> f64 {
    let n = sorted.len();
    let sa: f64 = a
        .iter()
        .enumerate()
        .map(|(i, &ai)| ai * (sorted[n - 1 - i] - sorted[i]))
        .sum();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let ss: f64 = sorted.iter().map(|&v| (v - mean).powi(2)).sum();
    sa * sa / ss
}

/// Royston's normalising transformation of W, upper-tail p-value.
fn p_value(w: f64, n: usize) -> f64 {
    let w1 = (1.0 - w).ln();
    if !w1.is_finite() {
        return 1.0;
    }
    let nf = n as f64;
    let normal = Normal::standard();

    if n <= 11 {
        let gamma = poly(&SW_G, nf);
        if w1 >= gamma {
            return 0.0;
        }
        let y = -(gamma - w1).ln();
        let m = poly(&SW_C3, nf);
        let s = poly(&SW_C4, nf).exp();
        normal.sf((y - m) / s)
    } else {
        let ln_n = nf.ln();
        let m = poly(&SW_C5, ln_n);
        let s = poly(&SW_C6, ln_n).exp();
        normal.sf((w1 - m) / s)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
