//! Feasibility filtering and report building.
//!
//! Takes the raw candidate set from a scan, prunes it against
//! manufacturability bounds, and derives the final ranked design reports.

pub mod builder;
pub mod filter;
pub mod types;

pub use builder::build_report;
pub use filter::{filter, Constraints};
pub use types::{DesignReport, SegmentReport};
