//! Error types for solver internals.
//!
//! These never escape a synthesis request: per-sample failures are absorbed
//! into [`crate::SampleOutcome`] by the caller.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Convergence failed: {what}")]
    ConvergenceFailed { what: String },

    #[error("Singular system: {what}")]
    Singular { what: String },

    #[error("Numeric error: {what}")]
    Numeric { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;
