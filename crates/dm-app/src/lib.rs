//! Shared application service layer for dualmatch.
//!
//! This crate is the single entry point a presentation shell talks to: it
//! validates a `MatchRequest`, runs exactly one synthesis (scan, filter,
//! report) per request, and returns an immutable `MatchResponse`. It also
//! provides the content-addressed report cache that lives outside the
//! engine crates.

pub mod cache;
pub mod error;
pub mod query;
pub mod request;
pub mod service;

// Re-export key types for convenience
pub use cache::ReportCache;
pub use error::{AppError, AppResult};
pub use query::{report_summary, ReportSummary};
pub use request::{ImpedanceSpec, MatchRequest, OptionsSpec, ScanSpec};
pub use service::{execute, MatchOutcome, MatchResponse};
