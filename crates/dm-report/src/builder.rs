//! Derivation of the final ranked reports.

use dm_core::MatchProblem;
use dm_solver::CandidateSolution;
use dm_tline::vswr;

use crate::types::{DesignReport, SegmentReport};

/// Build ranked design reports from surviving candidates.
///
/// Recomputes the source-side input impedance at both frequencies by
/// cascading the realized network, derives the VSWR figures against the full
/// (possibly complex) source, and sorts by ascending maximum segment
/// impedance with ascending scanned length as the tiebreaker.
pub fn build_report(
    problem: &MatchProblem,
    candidates: Vec<CandidateSolution>,
) -> Vec<DesignReport> {
    let zs = problem.source().as_complex();
    let zl1 = problem.load_f1().as_complex();
    let zl2 = problem.load_f2().as_complex();

    let mut reports: Vec<DesignReport> = candidates
        .into_iter()
        .map(|candidate| {
            let network = &candidate.network;
            let (p1, p2) = (network.p1(), network.p2());

            let zin_f1 = network.input_impedance_f1(zl1);
            let zin_f2 = network.input_impedance_f2(zl2);

            let segments = network
                .segments()
                .iter()
                .map(|segment| SegmentReport {
                    name: segment.label().to_string(),
                    kind: segment.kind().to_string(),
                    z0_ohm: segment.z0_ohm(),
                    theta_f1_deg: segment.theta_deg_at(p1),
                    theta_f2_deg: segment.theta_deg_at(p2),
                })
                .collect();

            DesignReport {
                segments,
                scanned_theta_deg: candidate.theta_scan_deg(),
                branch: candidate.branch,
                region: candidate.region.to_string(),
                residual: candidate.residual,
                input_r_f1_ohm: zin_f1.re,
                input_x_f1_ohm: zin_f1.im,
                input_r_f2_ohm: zin_f2.re,
                input_x_f2_ohm: zin_f2.im,
                vswr_f1: vswr(zin_f1, zs),
                vswr_f2: vswr(zin_f2, zs),
                max_z0_ohm: network.max_z0_ohm(),
            }
        })
        .collect();

    reports.sort_by(|a, b| {
        a.max_z0_ohm
            .total_cmp(&b.max_z0_ohm)
            .then(a.scanned_theta_deg.total_cmp(&b.scanned_theta_deg))
    });

    reports
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use dm_core::{FrequencyPair, Impedance};
    use dm_solver::{solve, SampleOutcome, SolverConfig};

    fn reference_problem() -> MatchProblem {
        let source = Impedance::new(50.0, 0.0).unwrap();
        let load = Impedance::new(75.0, 25.0).unwrap();
        let freqs = FrequencyPair::from_hz(900.0e6, 1800.0e6).unwrap();
        MatchProblem::new(source, load, freqs).unwrap()
    }

    fn some_candidates(problem: &MatchProblem) -> Vec<CandidateSolution> {
        let config = SolverConfig::default();
        let mut out = Vec::new();
        for theta_deg in [20.0_f64, 45.0, 60.0] {
            if let SampleOutcome::Solved(found) = solve(problem, theta_deg.to_radians(), &config) {
                out.extend(found);
            }
        }
        out
    }

    #[test]
    fn reports_carry_unity_vswr_for_converged_candidates() {
        let problem = reference_problem();
        let reports = build_report(&problem, some_candidates(&problem));
        assert!(!reports.is_empty());
        for report in &reports {
            assert_relative_eq!(report.vswr_f1, 1.0, epsilon = 1e-6);
            assert_relative_eq!(report.vswr_f2, 1.0, epsilon = 1e-6);
            assert_relative_eq!(report.input_r_f1_ohm, 50.0, epsilon = 1e-4);
            assert_relative_eq!(report.input_x_f1_ohm, 0.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn reports_sorted_by_max_impedance_then_theta() {
        let problem = reference_problem();
        let reports = build_report(&problem, some_candidates(&problem));
        for pair in reports.windows(2) {
            let ordered = pair[0].max_z0_ohm < pair[1].max_z0_ohm
                || (pair[0].max_z0_ohm == pair[1].max_z0_ohm
                    && pair[0].scanned_theta_deg <= pair[1].scanned_theta_deg);
            assert!(ordered, "rank order violated");
        }
    }

    #[test]
    fn segment_lengths_reported_in_half_open_range() {
        let problem = reference_problem();
        let reports = build_report(&problem, some_candidates(&problem));
        for report in &reports {
            for segment in &report.segments {
                assert!((0.0..180.0).contains(&segment.theta_f1_deg));
                assert!(segment.theta_f1_deg + segment.theta_f2_deg < 540.0);
            }
        }
    }

    #[test]
    fn empty_candidate_set_builds_empty_report() {
        let problem = reference_problem();
        let reports = build_report(&problem, Vec::new());
        assert!(reports.is_empty());
    }

    #[test]
    fn reports_serialize_round_trip() {
        let problem = reference_problem();
        let reports = build_report(&problem, some_candidates(&problem));
        let json = serde_json::to_string(&reports).unwrap();
        let back: Vec<DesignReport> = serde_json::from_str(&json).unwrap();
        assert_eq!(reports, back);
    }
}
