//! Scan grid definition for the auxiliary electrical length.

use dm_core::{angle_rad, Angle};
use thiserror::Error;

/// Samples closer than this (degrees) to a multiple of 180° correspond to
/// degenerate open/short auxiliary segments and are skipped by the executor.
const DEGENERATE_EPS_DEG: f64 = 1e-9;

/// Hard ceiling on grid size; a finer step is a configuration mistake, not
/// a workload.
const MAX_SAMPLES: usize = 1_000_000;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SweepError {
    #[error("Invalid scan range: {what}")]
    InvalidRange { what: String },

    #[error("Scan grid too fine: {samples} samples exceeds the {max} cap")]
    TooManySamples { samples: usize, max: usize },
}

/// Half-open scan interval [start, end) in degrees at the f0 reference,
/// traversed in fixed steps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScanRange {
    start_deg: f64,
    end_deg: f64,
    step_deg: f64,
}

impl ScanRange {
    pub fn new(start_deg: f64, end_deg: f64, step_deg: f64) -> Result<Self, SweepError> {
        for (v, name) in [
            (start_deg, "start"),
            (end_deg, "end"),
            (step_deg, "step"),
        ] {
            if !v.is_finite() {
                return Err(SweepError::InvalidRange {
                    what: format!("{name} is not finite"),
                });
            }
        }
        if step_deg <= 0.0 {
            return Err(SweepError::InvalidRange {
                what: format!("step must be positive, got {step_deg}"),
            });
        }
        if !(0.0..360.0).contains(&start_deg) || end_deg > 360.0 || start_deg >= end_deg {
            return Err(SweepError::InvalidRange {
                what: format!("[{start_deg}, {end_deg}) must lie within [0, 360) in order"),
            });
        }
        let samples = ((end_deg - start_deg) / step_deg).ceil() as usize;
        if samples > MAX_SAMPLES {
            return Err(SweepError::TooManySamples {
                samples,
                max: MAX_SAMPLES,
            });
        }
        Ok(Self {
            start_deg,
            end_deg,
            step_deg,
        })
    }

    /// Construct from unit-carrying angles.
    pub fn from_angles(start: Angle, end: Angle, step: Angle) -> Result<Self, SweepError> {
        Self::new(
            angle_rad(start).to_degrees(),
            angle_rad(end).to_degrees(),
            angle_rad(step).to_degrees(),
        )
    }

    #[inline]
    pub fn start_deg(&self) -> f64 {
        self.start_deg
    }

    #[inline]
    pub fn end_deg(&self) -> f64 {
        self.end_deg
    }

    #[inline]
    pub fn step_deg(&self) -> f64 {
        self.step_deg
    }

    /// The full sample grid, including degenerate points.
    pub fn samples_deg(&self) -> Vec<f64> {
        let count = ((self.end_deg - self.start_deg) / self.step_deg).ceil() as usize;
        let mut points = Vec::with_capacity(count);
        for i in 0..count {
            let value = self.start_deg + i as f64 * self.step_deg;
            if value < self.end_deg - DEGENERATE_EPS_DEG {
                points.push(value);
            }
        }
        points
    }

    /// A degenerate sample sits on a multiple of 180°, where the auxiliary
    /// line collapses to an open/short resonance.
    pub fn is_degenerate(theta_deg: f64) -> bool {
        let rem = theta_deg.rem_euclid(180.0);
        rem < DEGENERATE_EPS_DEG || (180.0 - rem) < DEGENERATE_EPS_DEG
    }
}

impl Default for ScanRange {
    /// Full domain [0°, 180°) at 0.5° resolution.
    fn default() -> Self {
        Self {
            start_deg: 0.0,
            end_deg: 180.0,
            step_deg: 0.5,
        }
    }
}
