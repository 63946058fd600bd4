//! Ordered cascade of segments bound to a frequency pair.

use num_complex::Complex64;

use dm_core::FrequencyPair;

use crate::segment::{Segment, SegmentKind};
use crate::transform::{line_input_impedance, stub_admittance};

/// A realized matching network: segments ordered from source to load, bound to the
/// frequency pair they were synthesized for. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchingNetwork {
    segments: Vec<Segment>,
    p1: f64,
    p2: f64,
}

impl MatchingNetwork {
    pub fn new(segments: Vec<Segment>, freqs: &FrequencyPair) -> Self {
        Self {
            segments,
            p1: freqs.p1(),
            p2: freqs.p2(),
        }
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    pub fn p1(&self) -> f64 {
        self.p1
    }

    #[inline]
    pub fn p2(&self) -> f64 {
        self.p2
    }

    /// Impedance seen from the source terminal with `load` hung on the far
    /// end, evaluated at `scale` = f/f0.
    pub fn input_impedance(&self, load: Complex64, scale: f64) -> Complex64 {
        let mut z = load;
        for seg in self.segments.iter().rev() {
            match seg.kind() {
                SegmentKind::Series => {
                    z = line_input_impedance(z, seg.z0_ohm(), seg.theta_rad_at(scale));
                }
                SegmentKind::Shunt(term) => {
                    let y_stub =
                        stub_admittance(1.0 / seg.z0_ohm(), seg.theta_rad_at(scale), term);
                    let y = Complex64::new(1.0, 0.0) / z + y_stub;
                    z = Complex64::new(1.0, 0.0) / y;
                }
            }
        }
        z
    }

    pub fn input_impedance_f1(&self, load: Complex64) -> Complex64 {
        self.input_impedance(load, self.p1)
    }

    pub fn input_impedance_f2(&self, load: Complex64) -> Complex64 {
        self.input_impedance(load, self.p2)
    }

    /// Largest characteristic impedance across the cascade; the primary
    /// ranking metric. Zero for an empty cascade.
    pub fn max_z0_ohm(&self) -> f64 {
        self.segments
            .iter()
            .map(Segment::z0_ohm)
            .fold(0.0, f64::max)
    }
}
