//! Feasibility filter over the candidate set.

use serde::{Deserialize, Serialize};

use dm_solver::CandidateSolution;

/// Manufacturability bounds. All bounds optional; an absent bound never
/// rejects. Impedance bounds are in ohms, length bounds in degrees at f1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    #[serde(default)]
    pub min_z_ohm: Option<f64>,
    #[serde(default)]
    pub max_z_ohm: Option<f64>,
    #[serde(default)]
    pub min_theta_deg: Option<f64>,
    #[serde(default)]
    pub max_theta_deg: Option<f64>,
}

impl Constraints {
    /// True when every segment of the candidate satisfies every bound.
    pub fn admits(&self, candidate: &CandidateSolution) -> bool {
        let p1 = candidate.network.p1();
        candidate.network.segments().iter().all(|segment| {
            let z0 = segment.z0_ohm();
            let theta_deg = segment.theta_deg_at(p1);
            self.min_z_ohm.map_or(true, |min| z0 >= min)
                && self.max_z_ohm.map_or(true, |max| z0 <= max)
                && self.min_theta_deg.map_or(true, |min| theta_deg >= min)
                && self.max_theta_deg.map_or(true, |max| theta_deg <= max)
        })
    }
}

/// Prune candidates violating the bounds. Pure and order-preserving.
pub fn filter(candidates: Vec<CandidateSolution>, constraints: &Constraints) -> Vec<CandidateSolution> {
    candidates
        .into_iter()
        .filter(|c| constraints.admits(c))
        .collect()
}
