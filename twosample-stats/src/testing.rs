//! Two-sample hypothesis tests.
//!
//! Provides the parametric [`t_test_two_sample`] (Student or Welch), the
//! non-parametric [`mann_whitney_u`], and [`anova_oneway`], which the Levene
//! test builds on. All p-values are two-sided.

use serde::Serialize;
use twosample_core::{Result, Scored, Summarizable, TwoSampleError};

use crate::descriptive;
use crate::distribution::{Distribution, FDistribution, Normal, StudentT};
use crate::rank::rank_average;

/// Result of a hypothesis test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    /// The test statistic (t, U, W, F, ...).
    pub statistic: f64,
    /// p-value.
    pub p_value: f64,
    /// Degrees of freedom, if applicable.
    pub degrees_of_freedom: Option<f64>,
    /// Name of the test method.
    pub method: String,
    /// Non-fatal numerical diagnostics raised while computing the result.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl TestResult {
    fn new(method: &str, statistic: f64, p_value: f64, degrees_of_freedom: Option<f64>) -> Self {
        Self {
            statistic,
            p_value,
            degrees_of_freedom,
            method: method.into(),
            warnings: Vec::new(),
        }
    }

    fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}

impl Scored for TestResult {
    fn score(&self) -> f64 {
        self.p_value
    }
}

impl Summarizable for TestResult {
    fn summary(&self) -> String {
        match self.degrees_of_freedom {
            Some(df) => format!(
                "{}: statistic={:.4}, df={:.2}, p={:.6}",
                self.method, self.statistic, df, self.p_value,
            ),
            None => format!(
                "{}: statistic={:.4}, p={:.6}",
                self.method, self.statistic, self.p_value,
            ),
        }
    }
}

// ── Two-sample t-test ──────────────────────────────────────────────────────

/// Two-sample t-test: test whether two populations have the same mean.
///
/// When `equal_var` is `true`, uses pooled variance (Student's t-test).
/// When `false`, uses Welch's t-test with Welch–Satterthwaite degrees of
/// freedom.
///
/// Each group needs at least 2 observations. Fails when both groups are
/// constant, since the standard error is then zero.
pub fn t_test_two_sample(x: &[f64], y: &[f64], equal_var: bool) -> Result<TestResult> {
    if x.len() < 2 || y.len() < 2 {
        return Err(TwoSampleError::Computation(
            "t_test_two_sample: each group needs at least 2 observations".into(),
        ));
    }

    let nx = x.len() as f64;
    let ny = y.len() as f64;
    let mean_x = descriptive::mean(x)?;
    let mean_y = descriptive::mean(y)?;
    let var_x = descriptive::variance(x, 1)?;
    let var_y = descriptive::variance(y, 1)?;

    let (se, df) = if equal_var {
        let sp2 = ((nx - 1.0) * var_x + (ny - 1.0) * var_y) / (nx + ny - 2.0);
        ((sp2 * (1.0 / nx + 1.0 / ny)).sqrt(), nx + ny - 2.0)
    } else {
        let vn_x = var_x / nx;
        let vn_y = var_y / ny;
        let num = (vn_x + vn_y).powi(2);
        let denom = vn_x.powi(2) / (nx - 1.0) + vn_y.powi(2) / (ny - 1.0);
        ((vn_x + vn_y).sqrt(), num / denom)
    };

    if se <= 0.0 || !se.is_finite() {
        return Err(TwoSampleError::Computation(
            "t_test_two_sample: both groups have zero variance".into(),
        ));
    }

    let t = (mean_x - mean_y) / se;
    let p = StudentT::new(df)?.two_tailed(t);
    let method = if equal_var {
        "Two-sample t-test (pooled)"
    } else {
        "Welch's t-test"
    };

    Ok(TestResult::new(method, t, p, Some(df)))
}

// ── Mann-Whitney U test ────────────────────────────────────────────────────

/// Largest smaller-group size for which the exact null distribution is used.
const MWU_EXACT_MAX: usize = 8;

/// Mann-Whitney U test (Wilcoxon rank-sum test), two-sided.
///
/// The reported statistic is U of the first sample,
/// `R1 - n1 (n1 + 1) / 2`. The p-value comes from the exact null
/// distribution when the smaller group has at most 8 observations and there
/// are no ties; otherwise from the normal approximation with tie and
/// continuity corrections. Falling back to the approximation because of
/// ties is reported as a warning.
///
/// Each group must be non-empty. Fails when every observation is identical.
pub fn mann_whitney_u(x: &[f64], y: &[f64]) -> Result<TestResult> {
    if x.is_empty() || y.is_empty() {
        return Err(TwoSampleError::Computation(
            "mann_whitney_u: each group must be non-empty".into(),
        ));
    }
    let nx = x.len();
    let ny = y.len();
    let n = nx + ny;

    let mut combined: Vec<f64> = Vec::with_capacity(n);
    combined.extend_from_slice(x);
    combined.extend_from_slice(y);
    let ranking = rank_average(&combined);

    let r1: f64 = ranking.ranks[..nx].iter().sum();
    let u1 = r1 - (nx * (nx + 1)) as f64 / 2.0;
    let u2 = (nx * ny) as f64 - u1;
    let u_max = u1.max(u2);

    let small_groups = nx.min(ny) <= MWU_EXACT_MAX;
    if small_groups && !ranking.has_ties() {
        let p = mwu_exact_sf(u_max.round() as usize, nx.min(ny), nx.max(ny));
        return Ok(TestResult::new(
            "Mann-Whitney U test",
            u1,
            (2.0 * p).min(1.0),
            None,
        ));
    }

    let mu_u = (nx * ny) as f64 / 2.0;
    let nf = n as f64;
    let sigma2 = (nx * ny) as f64 / 12.0 * ((nf + 1.0) - ranking.tie_term() / (nf * (nf - 1.0)));
    if sigma2 <= 0.0 {
        return Err(TwoSampleError::Computation(
            "mann_whitney_u: all observations are identical".into(),
        ));
    }

    let z = (u_max - mu_u - 0.5) / sigma2.sqrt();
    let p = (2.0 * Normal::standard().sf(z)).clamp(0.0, 1.0);

    let result = TestResult::new("Mann-Whitney U test", u1, p, None);
    if small_groups {
        Ok(result.with_warning(
            "ties present: exact p-value unavailable, using tie-corrected normal approximation",
        ))
    } else {
        Ok(result)
    }
}

/// `P(U >= u)` under the null for group sizes `m <= n`, no ties.
///
/// The counts of arrangements per U value are the coefficients of the
/// Gaussian binomial `[m+n choose m]_q = Π_{i=1..m} (1 - q^{n+i}) / (1 - q^i)`.
/// Each factor is applied to a probability vector that is renormalised
/// afterwards, so large `n` cannot overflow.
fn mwu_exact_sf(u: usize, m: usize, n: usize) -> f64 {
    let mut pmf: Vec<f64> = vec![1.0];
    for i in 1..=m {
        let len = i * n + 1;
        // Divide by (1 - q^i): running sums with stride i.
        let mut sums = vec![0.0; len];
        for k in 0..len {
            let carry = if k >= i { sums[k - i] } else { 0.0 };
            sums[k] = pmf.get(k).copied().unwrap_or(0.0) + carry;
        }
        // Multiply by (1 - q^{n+i}).
        let shift = n + i;
        let mut next: Vec<f64> = (0..len)
            .map(|k| {
                if k >= shift {
                    (sums[k] - sums[k - shift]).max(0.0)
                } else {
                    sums[k]
                }
            })
            .collect();
        let total: f64 = next.iter().sum();
        next.iter_mut().for_each(|v| *v /= total);
        pmf = next;
    }

    pmf.iter().skip(u).sum::<f64>().min(1.0)
}

// ── One-way ANOVA ─────────────────────────────────────────────────────────

/// One-way analysis of variance (ANOVA).
///
/// Tests whether the means of k groups are equal. Each group must have at
/// least 1 observation, there must be at least 2 groups, and the total must
/// exceed the number of groups.
pub fn anova_oneway(groups: &[&[f64]]) -> Result<TestResult> {
    let k = groups.len();
    if k < 2 {
        return Err(TwoSampleError::Computation(
            "anova_oneway: need at least 2 groups".into(),
        ));
    }
    if let Some(i) = groups.iter().position(|g| g.is_empty()) {
        return Err(TwoSampleError::Computation(format!(
            "anova_oneway: group {i} is empty"
        )));
    }

    let n_total: usize = groups.iter().map(|g| g.len()).sum();
    if n_total <= k {
        return Err(TwoSampleError::Computation(
            "anova_oneway: total observations must exceed number of groups".into(),
        ));
    }

    let grand_mean = groups.iter().flat_map(|g| g.iter()).sum::<f64>() / n_total as f64;

    let mut ss_between = 0.0;
    let mut ss_within = 0.0;
    for g in groups {
        let group_mean = g.iter().sum::<f64>() / g.len() as f64;
        ss_between += g.len() as f64 * (group_mean - grand_mean).powi(2);
        ss_within += g.iter().map(|&x| (x - group_mean).powi(2)).sum::<f64>();
    }

    let df_between = (k - 1) as f64;
    let df_within = (n_total - k) as f64;
    let ms_between = ss_between / df_between;
    let ms_within = ss_within / df_within;

    if ms_within <= 0.0 {
        if ms_between <= 0.0 {
            return Err(TwoSampleError::Computation(
                "anova_oneway: no variability within or between groups".into(),
            ));
        }
        return Ok(TestResult::new("One-way ANOVA", f64::INFINITY, 0.0, Some(df_between)));
    }

    let f_stat = ms_between / ms_within;
    let p_value = FDistribution::new(df_between, df_within)?.sf(f_stat);

    Ok(TestResult::new("One-way ANOVA", f_stat, p_value, Some(df_between)))
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_test_two_sample_same_distribution() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [1.5, 2.5, 3.5, 4.5, 5.5];
        let result = t_test_two_sample(&x, &y, true).unwrap();
        // t = -0.5, df = 8 → p ≈ 0.6305
        assert!((result.statistic + 0.5).abs() < 1e-12);
        assert!((result.p_value - 0.6305).abs() < 1e-3, "p={}", result.p_value);
        assert_eq!(result.degrees_of_freedom, Some(8.0));
    }

    #[test]
    fn t_test_two_sample_different_means() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [100.0, 101.0, 102.0, 103.0, 104.0];
        let result = t_test_two_sample(&x, &y, true).unwrap();
        assert!(result.p_value < 0.001, "p={}", result.p_value);
    }

    #[test]
    fn t_test_welch_reference_value() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 6.0, 8.0, 10.0, 12.0];
        let result = t_test_two_sample(&x, &y, false).unwrap();
        // scipy.stats.ttest_ind(x, y, equal_var=False):
        // statistic = -2.3764, df ≈ 6.9723, p ≈ 0.0493
        assert!((result.statistic + 2.3764).abs() < 1e-3, "t={}", result.statistic);
        assert!((result.degrees_of_freedom.unwrap() - 6.9723).abs() < 1e-3);
        assert!((result.p_value - 0.0493).abs() < 1e-3, "p={}", result.p_value);
        assert!(result.method.contains("Welch"));
    }

    #[test]
    fn t_test_two_sample_too_few() {
        assert!(t_test_two_sample(&[1.0], &[2.0, 3.0], true).is_err());
    }

    #[test]
    fn t_test_constant_groups_fail() {
        let err = t_test_two_sample(&[2.0, 2.0, 2.0], &[2.0, 2.0], true).unwrap_err();
        assert!(matches!(err, TwoSampleError::Computation(_)));
    }

    #[test]
    fn mann_whitney_exact_small_samples() {
        // U1 = 0 for complete separation; exact p = 2 / C(10, 5) = 2/252.
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [10.0, 11.0, 12.0, 13.0, 14.0];
        let result = mann_whitney_u(&x, &y).unwrap();
        assert_eq!(result.statistic, 0.0);
        assert!((result.p_value - 2.0 / 252.0).abs() < 1e-12, "p={}", result.p_value);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn mann_whitney_exact_is_symmetric_in_p() {
        let x = [1.0, 4.0, 6.0];
        let y = [2.0, 3.0, 5.0, 7.0];
        let a = mann_whitney_u(&x, &y).unwrap();
        let b = mann_whitney_u(&y, &x).unwrap();
        assert!((a.p_value - b.p_value).abs() < 1e-12);
        assert_eq!(a.statistic + b.statistic, 12.0);
    }

    #[test]
    fn mann_whitney_ties_fall_back_with_warning() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [1.0, 2.0, 3.0, 4.0, 100.0];
        let result = mann_whitney_u(&x, &y).unwrap();
        assert_eq!(result.statistic, 12.0);
        // max(U1, U2) = 13 sits exactly half a unit above the mean, so the
        // continuity-corrected z is 0 and p = 1.
        assert!((result.p_value - 1.0).abs() < 1e-12, "p={}", result.p_value);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn mann_whitney_large_samples_use_normal_approximation() {
        let x: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let y: Vec<f64> = (0..20).map(|i| i as f64 + 10.5).collect();
        let result = mann_whitney_u(&x, &y).unwrap();
        assert!(result.p_value < 0.01, "p={}", result.p_value);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn mann_whitney_degenerate() {
        assert!(mann_whitney_u(&[], &[1.0]).is_err());
        let err = mann_whitney_u(&[3.0, 3.0], &[3.0, 3.0]).unwrap_err();
        assert!(err.to_string().contains("identical"));
    }

    #[test]
    fn exact_distribution_sums_to_one() {
        assert!((mwu_exact_sf(0, 3, 4) - 1.0).abs() < 1e-12);
        // m = 1: U uniform on 0..=n
        assert!((mwu_exact_sf(3, 1, 4) - 2.0 / 5.0).abs() < 1e-12);
        // m = 2, n = 3: U in 0..=6 with counts 1,1,2,2,2,1,1 over C(5, 2).
        assert!((mwu_exact_sf(4, 2, 3) - 4.0 / 10.0).abs() < 1e-12);
    }

    #[test]
    fn mann_whitney_exact_with_very_large_second_group() {
        let x: Vec<f64> = (1..=8).map(|k| k as f64 * 30_000.0 + 0.5).collect();
        let y: Vec<f64> = (0..250_000).map(|i| i as f64).collect();
        let result = mann_whitney_u(&x, &y).unwrap();
        assert!(result.warnings.is_empty());
        assert_eq!(result.statistic, 1_080_008.0);

        let (m, n): (f64, f64) = (8.0, 250_000.0);
        let mu = m * n / 2.0;
        let sigma = (m * n * (m + n + 1.0) / 12.0).sqrt();
        let approx = 2.0 * Normal::standard().sf((result.statistic - mu - 0.5) / sigma);
        assert!(result.p_value.is_finite());
        assert!(
            (result.p_value - approx).abs() < 0.02,
            "exact p={}, normal p={approx}",
            result.p_value
        );
    }

    #[test]
    fn test_result_summary() {
        let result = t_test_two_sample(&[1.0, 2.0, 3.0], &[2.0, 3.0, 4.0], true).unwrap();
        let s = result.summary();
        assert!(s.contains("pooled"));
        assert!(s.contains("p="));
        assert!((result.score() - result.p_value).abs() < 1e-15);
    }

    #[test]
    fn anova_two_groups_matches_t() {
        let g1 = [1.0, 2.0, 3.0, 4.0, 5.0];
        let g2 = [3.0, 4.0, 5.0, 6.0, 7.0];
        let anova = anova_oneway(&[&g1, &g2]).unwrap();
        let t = t_test_two_sample(&g1, &g2, true).unwrap();
        assert!((anova.statistic - t.statistic.powi(2)).abs() < 1e-9);
        assert!((anova.p_value - t.p_value).abs() < 1e-6);
    }

    #[test]
    fn anova_invalid_input() {
        assert!(anova_oneway(&[&[1.0, 2.0]]).is_err());
        let empty: [f64; 0] = [];
        assert!(anova_oneway(&[&empty, &[1.0, 2.0]]).is_err());
        assert!(anova_oneway(&[&[1.0, 1.0], &[1.0, 1.0]]).is_err());
    }
}
