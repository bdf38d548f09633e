//! Statistical routines for comparing two independent samples.
//!
//! - **Descriptive statistics**: mean, median, variance, [`describe`](descriptive::describe)
//! - **Distributions**: normal, Student's t and F, with the special functions behind them
//! - **Normality**: Shapiro–Wilk
//! - **Variance homogeneity**: Levene (median or mean centred)
//! - **Two-sample tests**: Student's t, Welch's t, Mann–Whitney U
//! - **Advisor**: picks and runs the right test for a pair of samples

pub mod advisor;
pub mod descriptive;
pub mod distribution;
pub mod normality;
pub mod rank;
pub mod testing;
pub mod variance;

pub use advisor::{analyze, analyze_with, AnalysisReport, StatisticsBackend, TestChoice, ALPHA};
pub use testing::TestResult;
