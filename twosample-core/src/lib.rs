//! Shared primitives for the twosample workspace.
//!
//! - **Error types**: [`TwoSampleError`] and [`Result`] for structured error handling
//! - **Samples**: [`Sample`] and [`SamplePair`], the validated input of every analysis
//! - **Traits**: [`Scored`] and [`Summarizable`]

pub mod error;
pub mod sample;
pub mod traits;

pub use error::{Result, TwoSampleError};
pub use sample::{Sample, SamplePair};
pub use traits::*;
