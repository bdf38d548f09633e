//! Test selection and reporting for two independent samples.
//!
//! [`analyze`] runs the fixed decision procedure:
//!
//! 1. Shapiro–Wilk on each sample; the pair is *normal* only if both
//!    p-values exceed [`ALPHA`].
//! 2. If normal, Levene's test; variances are *equal* if its p-value exceeds
//!    [`ALPHA`]. Skipped otherwise.
//! 3. [`TestChoice::select`] picks Student's t, Welch's t or Mann–Whitney U.
//! 4. The chosen test runs; numerical warnings it raises are dropped.
//! 5. The result is significant if its p-value is below [`ALPHA`].
//!
//! Every comparison is strict, so a p-value of exactly 0.05 neither passes a
//! pre-test nor counts as significant. No correction is applied for the up to
//! four tests performed in one run.
//!
//! The sub-computations sit behind [`StatisticsBackend`], so the decision
//! logic can be exercised with stubbed p-values.

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};
use twosample_core::{Result, Sample, Summarizable};

use crate::descriptive::{describe, DescriptiveStats};
use crate::normality::shapiro_wilk;
use crate::testing::{mann_whitney_u, t_test_two_sample, TestResult};
use crate::variance::{levene, LeveneCenter};

/// Significance level shared by every decision in the workflow.
pub const ALPHA: f64 = 0.05;

/// A pre-test passes (normality, equal variances) when `p > ALPHA`.
pub fn passes(p_value: f64) -> bool {
    p_value > ALPHA
}

/// The main test is significant when `p < ALPHA`.
pub fn is_significant(p_value: f64) -> bool {
    p_value < ALPHA
}

// ── Test choice ────────────────────────────────────────────────────────────

/// The three mean/rank comparison tests the workflow can recommend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TestChoice {
    /// Student's two-sample t-test, pooled variance.
    StudentT,
    /// Welch's two-sample t-test, unequal variances.
    WelchT,
    /// Mann–Whitney U rank-sum test.
    MannWhitneyU,
}

impl TestChoice {
    /// Pick the test for the pre-test classifications.
    ///
    /// `equal_variance` is only consulted when `normal` is true.
    pub fn select(normal: bool, equal_variance: bool) -> Self {
        match (normal, equal_variance) {
            (true, true) => TestChoice::StudentT,
            (true, false) => TestChoice::WelchT,
            (false, _) => TestChoice::MannWhitneyU,
        }
    }

    /// Human-readable name used in reports.
    pub fn name(self) -> &'static str {
        match self {
            TestChoice::StudentT => "Student's t-test (two-sample, equal variances)",
            TestChoice::WelchT => "Welch's t-test (two-sample, unequal variances)",
            TestChoice::MannWhitneyU => "Mann-Whitney U test",
        }
    }

    /// Execute the test on `(first, second)`.
    pub fn run(self, first: &[f64], second: &[f64]) -> Result<TestResult> {
        match self {
            TestChoice::StudentT => t_test_two_sample(first, second, true),
            TestChoice::WelchT => t_test_two_sample(first, second, false),
            TestChoice::MannWhitneyU => mann_whitney_u(first, second),
        }
    }
}

impl fmt::Display for TestChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Backend ────────────────────────────────────────────────────────────────

/// The statistical routines the workflow depends on.
pub trait StatisticsBackend {
    /// Normality test for one sample.
    fn normality(&self, sample: &[f64]) -> Result<TestResult>;

    /// Variance-homogeneity test for the pair.
    fn variance_equality(&self, first: &[f64], second: &[f64]) -> Result<TestResult>;

    /// Execute the selected comparison test.
    fn execute(&self, choice: TestChoice, first: &[f64], second: &[f64]) -> Result<TestResult> {
        choice.run(first, second)
    }
}

/// Shapiro–Wilk, Levene and the tests in [`crate::testing`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicBackend {
    pub levene_center: LeveneCenter,
}

impl StatisticsBackend for ClassicBackend {
    fn normality(&self, sample: &[f64]) -> Result<TestResult> {
        shapiro_wilk(sample)
    }

    fn variance_equality(&self, first: &[f64], second: &[f64]) -> Result<TestResult> {
        levene(&[first, second], self.levene_center)
    }
}

// ── Report ─────────────────────────────────────────────────────────────────

/// Per-sample normality p-values and the joint classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalityAssessment {
    pub method: String,
    pub p_values: [f64; 2],
    pub normal: bool,
}

/// Variance-homogeneity p-value and classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarianceAssessment {
    pub method: String,
    pub p_value: f64,
    pub equal: bool,
}

/// Result of the selected comparison test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestOutcome {
    pub statistic: f64,
    pub p_value: f64,
    pub significant: bool,
}

/// Everything one run of [`analyze`] determined, in report order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub sample_sizes: [usize; 2],
    pub descriptives: [DescriptiveStats; 2],
    pub normality: NormalityAssessment,
    /// Present only when both samples were classified normal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variance: Option<VarianceAssessment>,
    pub test: TestChoice,
    pub test_name: &'static str,
    pub outcome: TestOutcome,
    pub alpha: f64,
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [n1, n2] = self.sample_sizes;
        writeln!(f, "Sample sizes: {n1} and {n2}")?;
        for (i, d) in self.descriptives.iter().enumerate() {
            writeln!(f, "Sample {}: {}", i + 1, d.summary())?;
        }

        let [p1, p2] = self.normality.p_values;
        writeln!(
            f,
            "{} for normality: p-values = {p1:.3}, {p2:.3}",
            self.normality.method
        )?;
        if self.normality.normal {
            writeln!(f, "Both samples are normally distributed.")?;
        } else {
            writeln!(f, "The samples are NOT normally distributed.")?;
        }

        if let Some(var) = &self.variance {
            writeln!(
                f,
                "{} for equality of variances: p-value = {:.3}",
                var.method, var.p_value
            )?;
            if var.equal {
                writeln!(f, "Variances are equal.")?;
            } else {
                writeln!(f, "Variances are NOT equal.")?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Recommended test: {}", self.test_name)?;
        writeln!(f)?;
        writeln!(f, "Test results:")?;
        writeln!(
            f,
            "Statistic = {:.3}, p-value = {:.3}",
            self.outcome.statistic, self.outcome.p_value
        )?;
        if self.outcome.significant {
            write!(
                f,
                "There is a statistically significant difference between the samples (p < {}).",
                self.alpha
            )
        } else {
            write!(
                f,
                "There is no statistically significant difference between the samples (p >= {}).",
                self.alpha
            )
        }
    }
}

// ── Workflow ───────────────────────────────────────────────────────────────

/// Run the decision procedure with the [`ClassicBackend`].
pub fn analyze(first: &Sample, second: &Sample) -> Result<AnalysisReport> {
    analyze_with(&ClassicBackend::default(), first, second)
}

/// Run the decision procedure with a caller-supplied backend.
///
/// Errors from any sub-computation propagate unchanged; nothing is reported
/// for a run that fails part-way.
pub fn analyze_with<B>(backend: &B, first: &Sample, second: &Sample) -> Result<AnalysisReport>
where
    B: StatisticsBackend + ?Sized,
{
    let (x, y) = (first.values(), second.values());
    let descriptives = [describe(x)?, describe(y)?];

    let sw1 = backend.normality(x)?;
    let sw2 = backend.normality(y)?;
    for w in sw1.warnings.iter().chain(&sw2.warnings) {
        warn!(method = %sw1.method, "{w}");
    }
    let normal = passes(sw1.p_value) && passes(sw2.p_value);
    debug!(p1 = sw1.p_value, p2 = sw2.p_value, normal, "normality assessed");
    let normality = NormalityAssessment {
        method: sw1.method,
        p_values: [sw1.p_value, sw2.p_value],
        normal,
    };

    let variance = if normal {
        let lev = backend.variance_equality(x, y)?;
        for w in &lev.warnings {
            warn!(method = %lev.method, "{w}");
        }
        let equal = passes(lev.p_value);
        debug!(p = lev.p_value, equal, "variance equality assessed");
        Some(VarianceAssessment {
            method: lev.method,
            p_value: lev.p_value,
            equal,
        })
    } else {
        debug!("samples not normal, variance equality skipped");
        None
    };

    let test = TestChoice::select(normal, variance.as_ref().is_some_and(|v| v.equal));
    debug!(test = test.name(), "test selected");

    let result = backend.execute(test, x, y)?;
    for w in &result.warnings {
        debug!(method = %result.method, "suppressed warning: {w}");
    }

    Ok(AnalysisReport {
        sample_sizes: [first.len(), second.len()],
        descriptives,
        normality,
        variance,
        test,
        test_name: test.name(),
        outcome: TestOutcome {
            statistic: result.statistic,
            p_value: result.p_value,
            significant: is_significant(result.p_value),
        },
        alpha: ALPHA,
    })
}

// ── Tests ──────────────────────────────────────────────────────────────────
