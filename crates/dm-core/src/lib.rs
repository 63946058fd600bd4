//! dm-core: stable foundation for dualmatch.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - model (impedance / frequency-pair / problem value types)
//! - error (shared error types)

pub mod error;
pub mod model;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{DmError, DmResult};
pub use model::*;
pub use numeric::*;
pub use units::*;
