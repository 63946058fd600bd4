//! Two-frequency conjugate-match solver.
//!
//! Given a problem instance and one trial electrical length for the scanned
//! auxiliary line, solves the remaining network unknowns so the conjugate
//! match holds at both design frequencies. Closed-form algebra is used
//! wherever the equations reduce; the two degenerate sub-cases fall back to
//! a bounded damped-Newton root-finder.

pub mod config;
pub mod error;
pub mod jacobian;
pub mod newton;
pub mod solve;
mod stages;

pub use config::{NewtonConfig, SolverConfig};
pub use error::{SolverError, SolverResult};
pub use newton::{newton_solve, NewtonResult};
pub use solve::{solve, CandidateSolution, SampleOutcome};
pub use stages::SmithRegion;
