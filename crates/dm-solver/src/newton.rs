//! Damped Newton iteration with a caller-supplied feasibility projection.

use crate::config::NewtonConfig;
use crate::error::{SolverError, SolverResult};
use crate::jacobian::finite_difference_jacobian;
use nalgebra::DVector;

/// Newton iteration result.
#[derive(Debug)]
pub struct NewtonResult {
    /// Solution vector
    pub x: DVector<f64>,
    /// Final residual norm
    pub residual_norm: f64,
    /// Number of iterations
    pub iterations: usize,
    /// Converged flag
    pub converged: bool,
}

/// Newton solver with backtracking line search.
///
/// `project` clamps a trial point back into the physically valid bracket
/// after every step, so the iteration can never leave it. The iteration
/// budget in `config` bounds the loop unconditionally.
pub fn newton_solve<F, P>(
    x0: DVector<f64>,
    residual_fn: F,
    project: P,
    config: &NewtonConfig,
) -> SolverResult<NewtonResult>
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
    P: Fn(&mut DVector<f64>),
{
    let mut x = x0;
    project(&mut x);
    let mut r = residual_fn(&x)?;
    let mut r_norm = r.norm();

    for iter in 0..config.max_iterations {
        if r_norm < config.abs_tol {
            return Ok(NewtonResult {
                x,
                residual_norm: r_norm,
                iterations: iter,
                converged: true,
            });
        }

        let jac = finite_difference_jacobian(&x, &residual_fn, config.fd_epsilon)?;

        // Solve J * dx = -r
        let dx = jac
            .lu()
            .solve(&(-r.clone()))
            .ok_or_else(|| SolverError::Singular {
                what: format!("Jacobian solve failed at iteration {iter}"),
            })?;

        // Backtracking line search inside the bracket
        let mut alpha = 1.0;
        let mut x_new = &x + alpha * &dx;
        project(&mut x_new);
        let mut r_new = residual_fn(&x_new)?;
        let mut r_new_norm = r_new.norm();

        for _ in 0..config.max_line_search_iters {
            if r_new_norm < r_norm {
                break;
            }
            alpha *= config.line_search_beta;
            x_new = &x + alpha * &dx;
            project(&mut x_new);
            r_new = residual_fn(&x_new)?;
            r_new_norm = r_new.norm();
        }

        if alpha < 1e-10 || !r_new_norm.is_finite() {
            return Err(SolverError::ConvergenceFailed {
                what: format!("Line search stagnated at iteration {iter}"),
            });
        }

        x = x_new;
        r = r_new;
        r_norm = r_new_norm;
    }

    if r_norm < config.abs_tol {
        return Ok(NewtonResult {
            x,
            residual_norm: r_norm,
            iterations: config.max_iterations,
            converged: true,
        });
    }

    Err(SolverError::ConvergenceFailed {
        what: format!(
            "Maximum iterations {} reached, residual = {}",
            config.max_iterations, r_norm
        ),
    })
}
