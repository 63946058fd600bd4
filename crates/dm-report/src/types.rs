//! Report data types.

use serde::{Deserialize, Serialize};

/// One segment of a reported design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentReport {
    pub name: String,
    /// "series", "shunt-open" or "shunt-short".
    pub kind: String,
    pub z0_ohm: f64,
    /// Electrical length in degrees at f1; always in [0, 180).
    pub theta_f1_deg: f64,
    /// Electrical length in degrees at f2.
    pub theta_f2_deg: f64,
}

/// One ranked design: the realized segments plus the achieved match quality
/// at both design frequencies. Entries are immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignReport {
    pub segments: Vec<SegmentReport>,
    /// The scanned auxiliary length in degrees at the f0 reference.
    pub scanned_theta_deg: f64,
    /// Closed-form branch the design came from (0 = principal, 1 = extended).
    pub branch: u8,
    /// Smith-chart region of the conjugate-transformed load.
    pub region: String,
    /// Match-equation residual, normalized by the source resistance.
    pub residual: f64,
    pub input_r_f1_ohm: f64,
    pub input_x_f1_ohm: f64,
    pub input_r_f2_ohm: f64,
    pub input_x_f2_ohm: f64,
    pub vswr_f1: f64,
    pub vswr_f2: f64,
    /// Primary rank key: largest characteristic impedance in the cascade.
    pub max_z0_ohm: f64,
}

impl DesignReport {
    /// Worse of the two per-frequency VSWR figures.
    pub fn worst_vswr(&self) -> f64 {
        self.vswr_f1.max(self.vswr_f2)
    }
}
