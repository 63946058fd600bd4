//! Parallel execution of a scan over the sample grid.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use dm_core::MatchProblem;
use dm_solver::{solve, CandidateSolution, SampleOutcome, SolverConfig};

use crate::sweep::{ScanRange, SweepError};

/// Above this fraction of non-converging samples a single aggregated warning
/// accompanies the (still valid) result.
pub const NON_CONVERGENCE_WARN_FRACTION: f64 = 0.5;

/// Per-outcome sample counts for one scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanDiagnostics {
    /// Grid points generated from the range.
    pub samples: usize,
    /// Excluded as degenerate (multiples of 180°).
    pub skipped_degenerate: usize,
    /// Samples yielding at least one candidate.
    pub solved: usize,
    /// Samples with no physical root.
    pub no_solution: usize,
    /// Samples where the iterative fallback ran out of budget.
    pub diverged: usize,
}

impl ScanDiagnostics {
    /// Samples actually handed to the solver.
    pub fn evaluated(&self) -> usize {
        self.samples - self.skipped_degenerate
    }

    /// Fraction of evaluated samples that produced nothing.
    pub fn non_convergence_fraction(&self) -> f64 {
        let evaluated = self.evaluated();
        if evaluated == 0 {
            return 0.0;
        }
        (self.no_solution + self.diverged) as f64 / evaluated as f64
    }
}

/// All candidates found across a scan, in grid order, plus the sample
/// bookkeeping.
#[derive(Clone, Debug)]
pub struct ScanResult {
    pub candidates: Vec<CandidateSolution>,
    pub diagnostics: ScanDiagnostics,
}

/// Sweep the auxiliary length across `range`, solving every non-degenerate
/// sample.
///
/// Samples are solved in parallel; candidates are flattened in grid order so
/// two scans with identical inputs produce identical sequences.
pub fn scan(
    problem: &MatchProblem,
    range: &ScanRange,
    config: &SolverConfig,
) -> Result<ScanResult, SweepError> {
    let grid = range.samples_deg();
    let samples = grid.len();

    let (degenerate, evaluable): (Vec<f64>, Vec<f64>) =
        grid.into_iter().partition(|&deg| ScanRange::is_degenerate(deg));

    let outcomes: Vec<SampleOutcome> = evaluable
        .par_iter()
        .map(|&theta_deg| solve(problem, theta_deg.to_radians(), config))
        .collect();

    let mut diagnostics = ScanDiagnostics {
        samples,
        skipped_degenerate: degenerate.len(),
        ..ScanDiagnostics::default()
    };
    let mut candidates = Vec::new();
    for outcome in outcomes {
        match outcome {
            SampleOutcome::Solved(found) => {
                diagnostics.solved += 1;
                candidates.extend(found);
            }
            SampleOutcome::NoSolution => diagnostics.no_solution += 1,
            SampleOutcome::Diverged => diagnostics.diverged += 1,
        }
    }

    if diagnostics.evaluated() > 0
        && diagnostics.non_convergence_fraction() > NON_CONVERGENCE_WARN_FRACTION
    {
        tracing::warn!(
            no_solution = diagnostics.no_solution,
            diverged = diagnostics.diverged,
            evaluated = diagnostics.evaluated(),
            "most scan samples did not converge"
        );
    }

    Ok(ScanResult {
        candidates,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dm_core::{FrequencyPair, Impedance};

    fn problem() -> MatchProblem {
        let source = Impedance::new(50.0, 0.0).unwrap();
        let load = Impedance::new(75.0, 25.0).unwrap();
        let freqs = FrequencyPair::from_hz(900.0e6, 1800.0e6).unwrap();
        MatchProblem::new(source, load, freqs).unwrap()
    }

    #[test]
    fn scan_counts_add_up() {
        let range = ScanRange::new(0.0, 90.0, 5.0).unwrap();
        let result = scan(&problem(), &range, &SolverConfig::default()).unwrap();

        let d = &result.diagnostics;
        assert_eq!(d.samples, 18);
        assert_eq!(d.skipped_degenerate, 1); // the 0 degree sample
        assert_eq!(d.solved + d.no_solution + d.diverged, d.evaluated());
        assert!(d.solved > 0);
        assert!(!result.candidates.is_empty());
    }

    #[test]
    fn scan_is_deterministic_under_parallelism() {
        let range = ScanRange::new(0.0, 180.0, 2.5).unwrap();
        let config = SolverConfig::default();
        let first = scan(&problem(), &range, &config).unwrap();
        let second = scan(&problem(), &range, &config).unwrap();

        assert_eq!(first.diagnostics, second.diagnostics);
        assert_eq!(first.candidates.len(), second.candidates.len());
        for (a, b) in first.candidates.iter().zip(&second.candidates) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn candidates_come_out_in_grid_order() {
        let range = ScanRange::new(0.0, 180.0, 10.0).unwrap();
        let result = scan(&problem(), &range, &SolverConfig::default()).unwrap();
        let thetas: Vec<f64> = result
            .candidates
            .iter()
            .map(|c| c.theta_scan_rad)
            .collect();
        let mut sorted = thetas.clone();
        sorted.sort_by(f64::total_cmp);
        assert_eq!(thetas, sorted);
    }

    #[test]
    fn empty_after_degenerate_exclusion() {
        // A window that contains only the degenerate 0 degree point.
        let range = ScanRange::new(0.0, 0.5, 1.0).unwrap();
        let result = scan(&problem(), &range, &SolverConfig::default()).unwrap();
        assert_eq!(result.diagnostics.samples, 1);
        assert_eq!(result.diagnostics.skipped_degenerate, 1);
        assert_eq!(result.diagnostics.evaluated(), 0);
        assert!(result.candidates.is_empty());
    }
}
