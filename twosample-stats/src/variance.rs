//! Levene's test for equality of variances.

use serde::Serialize;
use twosample_core::{Result, TwoSampleError};

use crate::descriptive;
use crate::testing::{anova_oneway, TestResult};

/// Location each group is centred on before taking absolute deviations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LeveneCenter {
    /// Brown–Forsythe variant, robust to skewed data.
    #[default]
    Median,
    /// Levene's original formulation.
    Mean,
}

/// Levene's test; H₀: all groups have equal population variance.
///
/// Runs a one-way ANOVA on `|x - center(group)|`. The statistic is W (an F
/// value with `k - 1` and `N - k` degrees of freedom). Needs at least two
/// non-empty groups and more observations than groups.
pub fn levene(groups: &[&[f64]], center: LeveneCenter) -> Result<TestResult> {
    if groups.len() < 2 {
        return Err(TwoSampleError::Computation(
            "levene: need at least 2 groups".into(),
        ));
    }

    let deviations = groups
        .iter()
        .map(|g| -> Result<Vec<f64>> {
            let c = match center {
                LeveneCenter::Median => descriptive::median(g),
                LeveneCenter::Mean => descriptive::mean(g),
            }
            .map_err(|_| {
                TwoSampleError::Computation("levene: every group must be non-empty".into())
            })?;
            Ok(g.iter().map(|&x| (x - c).abs()).collect())
        })
        .collect::<Result<Vec<_>>>()?;

    let refs: Vec<&[f64]> = deviations.iter().map(Vec::as_slice).collect();
    let anova = anova_oneway(&refs).map_err(|e| match e {
        TwoSampleError::Computation(msg) => {
            TwoSampleError::Computation(msg.replacen("anova_oneway", "levene", 1))
        }
        other => other,
    })?;

    Ok(TestResult {
        method: "Levene's test".into(),
        ..anova
    })
}

// ── Tests ──────────────────────────────────────────────────────────────────
