//! Parameter scan over the auxiliary electrical length.
//!
//! Sweeps the scanned length across its domain, invoking the solver once per
//! sample. Samples are independent, so the sweep is executed in parallel;
//! the candidate sequence is collected in grid order and is identical for
//! identical inputs regardless of thread scheduling.

pub mod executor;
pub mod sweep;

pub use executor::{scan, ScanDiagnostics, ScanResult, NON_CONVERGENCE_WARN_FRACTION};
pub use sweep::{ScanRange, SweepError};
