//! Per-sample synthesis: one trial scanned length in, candidates out.

use core::f64::consts::{FRAC_PI_2, PI, TAU};

use nalgebra::DVector;
use num_complex::Complex64;

use dm_core::MatchProblem;
use dm_tline::{line_input_impedance, MatchingNetwork, Segment};

use crate::config::{NewtonConfig, SolverConfig};
use crate::error::{SolverError, SolverResult};
use crate::newton::newton_solve;
use crate::stages::{
    cancel_susceptance_stub, classify_region, conjugate_transform, equivalent_transformer,
    pi_synthesis, ClosedForm, SmithRegion, StubOutcome,
};

/// One realizable design found at a scan sample.
#[derive(Clone, Debug, PartialEq)]
pub struct CandidateSolution {
    /// The realized network, ordered from source to load.
    pub network: MatchingNetwork,
    /// The scanned auxiliary length this candidate was solved at (radians
    /// at the f0 reference).
    pub theta_scan_rad: f64,
    /// Closed-form branch (0 = principal, 1 = extended).
    pub branch: u8,
    /// Smith-chart region of the conjugate-transformed load.
    pub region: SmithRegion,
    /// Match-equation residual, normalized by the source resistance.
    pub residual: f64,
}

impl CandidateSolution {
    /// Scanned length in degrees at the f0 reference.
    pub fn theta_scan_deg(&self) -> f64 {
        self.theta_scan_rad.to_degrees()
    }
}

/// Result of solving one scan sample. Per-sample numeric trouble is data,
/// not an error: the scan absorbs it and moves on.
#[derive(Clone, Debug, PartialEq)]
pub enum SampleOutcome {
    /// One or more candidates converged at this sample.
    Solved(Vec<CandidateSolution>),
    /// The equations have no physical root here.
    NoSolution,
    /// The iterative fallback ran out of budget here.
    Diverged,
}

/// Solve the two-frequency conjugate-match equations with the scanned
/// auxiliary length fixed at `theta_scan_rad` (radians at f0).
///
/// Pure function of its inputs. Both closed-form branches are attempted, so
/// a single sample may yield several candidates; each retained candidate has
/// its realized network's residual below `config.residual_tol`.
pub fn solve(
    problem: &MatchProblem,
    theta_scan_rad: f64,
    config: &SolverConfig,
) -> SampleOutcome {
    if !theta_scan_rad.is_finite() || !(0.0..TAU).contains(&theta_scan_rad) {
        return SampleOutcome::NoSolution;
    }

    let freqs = problem.freqs();
    let (p1, p2) = (freqs.p1(), freqs.p2());
    let rs = problem.source().resistance_ohm();
    let z_aux = config.aux_line_z0_ohm.unwrap_or(rs);

    let zl1 = problem.load_f1().as_complex();
    let zl2 = problem.load_f2().as_complex();

    // Transform the loads through the scanned auxiliary line.
    let (zl1t, zl2t) = if theta_scan_rad > 0.0 {
        (
            line_input_impedance(zl1, z_aux, theta_scan_rad * p1),
            line_input_impedance(zl2, z_aux, theta_scan_rad * p2),
        )
    } else {
        (zl1, zl2)
    };

    let mut candidates = Vec::new();
    let mut diverged = false;

    // Already conjugate-symmetric: the transform line is unnecessary and the
    // extended branch would only duplicate the pass-through.
    let symmetric = (zl1t - zl2t.conj()).norm() < config.degenerate_tol;
    let branches: &[u8] = if symmetric { &[0] } else { &[0, 1] };

    for &branch in branches {
        let transform = if symmetric {
            None
        } else {
            match conjugate_transform(zl1t, zl2t, branch, config.degenerate_tol) {
                ClosedForm::Solution(z1, theta1) => Some((z1, theta1)),
                ClosedForm::NoRoot => continue,
                ClosedForm::Degenerate => {
                    match fallback_conjugate_transform(zl1t, zl2t, p1, p2, branch, &config.newton)
                    {
                        Ok(root) => Some(root),
                        Err(SolverError::ConvergenceFailed { .. }) => {
                            diverged = true;
                            continue;
                        }
                        Err(_) => continue,
                    }
                }
            }
        };

        let (zin1, transform_seg) = match transform {
            Some((z1, theta1)) => {
                let seg = match Segment::series("conjugate-line", z1, theta1) {
                    Ok(seg) => seg,
                    Err(_) => continue,
                };
                (line_input_impedance(zl1t, z1, theta1 * p1), Some(seg))
            }
            None => (zl1t, None),
        };

        let region = classify_region(zin1, rs);

        let (zin_m, aux_stub_seg) = match region {
            SmithRegion::Central if config.allow_balance_stub => {
                match cancel_susceptance_stub(zin1, p1) {
                    StubOutcome::NotNeeded => (zin1, None),
                    StubOutcome::Stub {
                        y0,
                        termination,
                        zin_after,
                    } => match Segment::shunt("balance-stub", termination, 1.0 / y0, PI) {
                        Ok(seg) => (zin_after, Some(seg)),
                        Err(_) => continue,
                    },
                    StubOutcome::Unrealizable => continue,
                }
            }
            _ => (zin1, None),
        };

        // Equivalent single-line transformer toward the source resistance,
        // then its half-wave pi realization.
        let pi = if (zin_m - Complex64::new(rs, 0.0)).norm() < config.degenerate_tol {
            // Already at the source resistance: pass-through section.
            pi_synthesis(rs, p1 * PI, p1)
        } else {
            let equivalent = match equivalent_transformer(zin_m, rs, config.degenerate_tol) {
                ClosedForm::Solution(zt, theta_t) => Some((zt, theta_t)),
                ClosedForm::NoRoot => None,
                ClosedForm::Degenerate => {
                    match fallback_equivalent_transformer(zin_m, rs, &config.newton) {
                        Ok(root) => Some(root),
                        Err(SolverError::ConvergenceFailed { .. }) => {
                            diverged = true;
                            None
                        }
                        Err(_) => None,
                    }
                }
            };
            equivalent.and_then(|(zt, theta_t)| pi_synthesis(zt, theta_t, p1))
        };
        let Some(pi) = pi else { continue };

        let mut parts: Vec<Result<Segment, dm_core::DmError>> = Vec::with_capacity(6);
        if let Some((yn, termination)) = pi.stub {
            parts.push(Segment::shunt("input-stub", termination, 1.0 / yn, PI));
        }
        parts.push(Segment::series("main-line", pi.zm_ohm, PI));
        if let Some((yn, termination)) = pi.stub {
            parts.push(Segment::shunt("output-stub", termination, 1.0 / yn, PI));
        }
        if let Some(seg) = aux_stub_seg {
            parts.push(Ok(seg));
        }
        if let Some(seg) = transform_seg {
            parts.push(Ok(seg));
        }
        if theta_scan_rad > 0.0 {
            parts.push(Segment::series("load-line", z_aux, theta_scan_rad));
        }
        let Ok(segments) = parts.into_iter().collect::<Result<Vec<_>, _>>() else {
            continue;
        };

        // Substitute the realized network back into the match equations.
        let network = MatchingNetwork::new(segments, &freqs);
        let zin_f1 = network.input_impedance_f1(zl1);
        let zin_f2 = network.input_impedance_f2(zl2);
        let target = Complex64::new(rs, 0.0);
        let residual = (zin_f1 - target).norm().max((zin_f2 - target).norm()) / rs;

        if residual.is_finite() && residual < config.residual_tol {
            candidates.push(CandidateSolution {
                network,
                theta_scan_rad,
                branch,
                region,
                residual,
            });
        }
    }

    tracing::trace!(
        theta_deg = theta_scan_rad.to_degrees(),
        found = candidates.len(),
        "sample solved"
    );

    if !candidates.is_empty() {
        SampleOutcome::Solved(candidates)
    } else if diverged {
        SampleOutcome::Diverged
    } else {
        SampleOutcome::NoSolution
    }
}

/// Newton fallback for the equal-resistance conjugate-transform sub-case:
/// solve Zin(f1; Z1, θ1) = conj(Zin(f2; Z1, θ1)) over (Z1, θ1).
fn fallback_conjugate_transform(
    zl1: Complex64,
    zl2: Complex64,
    p1: f64,
    p2: f64,
    branch: u8,
    config: &NewtonConfig,
) -> SolverResult<(f64, f64)> {
    let residual = move |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
        let (z1, theta1) = (x[0], x[1]);
        let mismatch = line_input_impedance(zl1, z1, theta1 * p1)
            - line_input_impedance(zl2, z1, theta1 * p2).conj();
        Ok(DVector::from_vec(vec![mismatch.re, mismatch.im]))
    };

    let (min_z, max_z) = (config.min_z_ohm, config.max_z_ohm);
    let project = move |x: &mut DVector<f64>| {
        x[0] = x[0].clamp(min_z, max_z);
        x[1] = x[1].clamp(1e-6, TAU - 1e-6);
    };

    let z_guess = (zl1.norm() * zl2.norm()).sqrt().max(config.min_z_ohm);
    let theta_guess = FRAC_PI_2 + f64::from(branch) * PI;
    let x0 = DVector::from_vec(vec![z_guess, theta_guess]);

    let result = newton_solve(x0, residual, project, config)?;
    Ok((result.x[0], result.x[1]))
}

/// Newton fallback for the R ≈ Rs equivalent-transformer sub-case:
/// solve Zin(f1; Z_T, θ_T) = Rs over (Z_T, θ_T).
fn fallback_equivalent_transformer(
    zin: Complex64,
    rs: f64,
    config: &NewtonConfig,
) -> SolverResult<(f64, f64)> {
    let residual = move |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
        let (zt, theta_t) = (x[0], x[1]);
        let mismatch = line_input_impedance(zin, zt, theta_t) - Complex64::new(rs, 0.0);
        Ok(DVector::from_vec(vec![mismatch.re, mismatch.im]))
    };

    let (min_z, max_z) = (config.min_z_ohm, config.max_z_ohm);
    let project = move |x: &mut DVector<f64>| {
        x[0] = x[0].clamp(min_z, max_z);
        x[1] = x[1].clamp(1e-6, PI - 1e-6);
    };

    let z_guess = (zin.re.max(config.min_z_ohm) * rs).sqrt();
    let x0 = DVector::from_vec(vec![z_guess, FRAC_PI_2]);

    let result = newton_solve(x0, residual, project, config)?;
    Ok((result.x[0], result.x[1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use dm_core::{FrequencyPair, Impedance};
    use dm_tline::vswr;

    fn problem(load_r: f64, load_x: f64) -> MatchProblem {
        let source = Impedance::new(50.0, 0.0).unwrap();
        let load = Impedance::new(load_r, load_x).unwrap();
        let freqs = FrequencyPair::from_hz(900.0e6, 1800.0e6).unwrap();
        MatchProblem::new(source, load, freqs).unwrap()
    }

    fn assert_matched(problem: &MatchProblem, candidate: &CandidateSolution) {
        let zin1 = candidate
            .network
            .input_impedance_f1(problem.load_f1().as_complex());
        let zin2 = candidate
            .network
            .input_impedance_f2(problem.load_f2().as_complex());
        let zs = problem.source().as_complex();
        assert_relative_eq!(vswr(zin1, zs), 1.0, epsilon = 1e-6);
        assert_relative_eq!(vswr(zin2, zs), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn both_branches_converge_on_reference_sample() {
        let problem = problem(75.0, 25.0);
        let config = SolverConfig::default();
        let outcome = solve(&problem, 30.0_f64.to_radians(), &config);

        let SampleOutcome::Solved(candidates) = outcome else {
            panic!("expected candidates");
        };
        assert_eq!(candidates.len(), 2);
        for candidate in &candidates {
            assert!(candidate.residual < config.residual_tol);
            assert_matched(&problem, candidate);
        }
        // Principal branch: values pinned against the stage algebra.
        let principal = &candidates[0];
        assert_eq!(principal.branch, 0);
        let z0s: Vec<f64> = principal
            .network
            .segments()
            .iter()
            .map(|s| s.z0_ohm())
            .collect();
        // input-stub, main-line, output-stub, conjugate-line, load-line
        assert_eq!(z0s.len(), 5);
        assert_relative_eq!(z0s[0], 161.395_811_286_945_27, epsilon = 1e-6);
        assert_relative_eq!(z0s[1], 75.608_611_053_085_88, epsilon = 1e-6);
        assert_relative_eq!(z0s[3], 50.0, epsilon = 1e-6);
        assert_relative_eq!(z0s[4], 50.0, epsilon = 1e-12);
    }

    #[test]
    fn central_region_gets_balance_stub() {
        let problem = problem(8.0, 2.0);
        let outcome = solve(&problem, 30.0_f64.to_radians(), &SolverConfig::default());

        let SampleOutcome::Solved(candidates) = outcome else {
            panic!("expected candidates");
        };
        let with_stub: Vec<_> = candidates
            .iter()
            .filter(|c| {
                c.network
                    .segments()
                    .iter()
                    .any(|s| s.label() == "balance-stub")
            })
            .collect();
        assert!(!with_stub.is_empty());
        for candidate in &candidates {
            assert_matched(&problem, candidate);
        }
        // Pinned against the stage algebra for the principal branch.
        let principal = candidates.iter().find(|c| c.branch == 0).unwrap();
        let balance = principal
            .network
            .segments()
            .iter()
            .find(|s| s.label() == "balance-stub")
            .unwrap();
        assert_relative_eq!(balance.z0_ohm(), 160.175_413_384_932_45, epsilon = 1e-6);
    }

    #[test]
    fn matched_problem_degenerates_to_pass_through() {
        let problem = problem(50.0, 0.0);
        let outcome = solve(&problem, 40.0_f64.to_radians(), &SolverConfig::default());

        let SampleOutcome::Solved(candidates) = outcome else {
            panic!("expected candidates");
        };
        assert_eq!(candidates.len(), 1);
        let candidate = &candidates[0];
        for segment in candidate.network.segments() {
            assert_relative_eq!(segment.z0_ohm(), 50.0, epsilon = 1e-9);
        }
        assert_matched(&problem, candidate);
    }

    #[test]
    fn degenerate_resistances_recovered_by_fallback() {
        // No auxiliary line: the load resistances coincide at both
        // frequencies and the closed form cannot apply.
        let problem = problem(75.0, 25.0);
        let outcome = solve(&problem, 0.0, &SolverConfig::default());

        let SampleOutcome::Solved(candidates) = outcome else {
            panic!("expected fallback candidates");
        };
        assert_eq!(candidates.len(), 2);
        for candidate in &candidates {
            assert_matched(&problem, candidate);
        }
        // Known analytic root: Z1 = |ZL|, θ1 = 90 degrees at f0.
        let principal = candidates.iter().find(|c| c.branch == 0).unwrap();
        let line = principal
            .network
            .segments()
            .iter()
            .find(|s| s.label() == "conjugate-line")
            .unwrap();
        assert_relative_eq!(line.z0_ohm(), (75.0f64 * 75.0 + 25.0 * 25.0).sqrt(), epsilon = 1e-6);
        assert_relative_eq!(line.theta_f0_rad(), FRAC_PI_2, epsilon = 1e-6);
    }

    #[test]
    fn out_of_domain_trial_length_is_no_solution() {
        let problem = problem(75.0, 25.0);
        let config = SolverConfig::default();
        assert_eq!(solve(&problem, -0.5, &config), SampleOutcome::NoSolution);
        assert_eq!(solve(&problem, f64::NAN, &config), SampleOutcome::NoSolution);
        assert_eq!(solve(&problem, TAU, &config), SampleOutcome::NoSolution);
    }

    #[test]
    fn reported_lengths_stay_under_half_turn_at_f1() {
        let problem = problem(75.0, 25.0);
        let outcome = solve(&problem, 150.0_f64.to_radians(), &SolverConfig::default());
        let SampleOutcome::Solved(candidates) = outcome else {
            panic!("expected candidates");
        };
        for candidate in &candidates {
            let p1 = candidate.network.p1();
            for segment in candidate.network.segments() {
                let deg = segment.theta_deg_at(p1);
                assert!((0.0..180.0).contains(&deg), "length out of range: {deg}");
            }
        }
    }
}
