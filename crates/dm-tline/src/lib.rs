//! Lossless transmission-line primitives for dualmatch.
//!
//! Segments store their electrical length at the synthesis reference
//! frequency f0 = f1 + f2; evaluation at an operating frequency scales the
//! length by f/f0. All impedance math is scalar complex arithmetic on
//! [`num_complex::Complex64`].

pub mod network;
pub mod segment;
pub mod transform;

pub use network::MatchingNetwork;
pub use segment::{Segment, SegmentKind, StubTermination};
pub use transform::{line_input_impedance, reflection_coefficient, stub_admittance, vswr};
