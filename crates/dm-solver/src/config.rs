//! Solver configuration.

/// Configuration of the damped-Newton fallback.
#[derive(Clone, Copy, Debug)]
pub struct NewtonConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Absolute tolerance for residual norm (ohms)
    pub abs_tol: f64,
    /// Forward-difference Jacobian step scale
    pub fd_epsilon: f64,
    /// Line search backtracking factor
    pub line_search_beta: f64,
    /// Maximum line search iterations
    pub max_line_search_iters: usize,
    /// Lower edge of the characteristic-impedance bracket (ohms)
    pub min_z_ohm: f64,
    /// Upper edge of the characteristic-impedance bracket (ohms)
    pub max_z_ohm: f64,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            max_iterations: 40,
            abs_tol: 1e-9,
            fd_epsilon: 1e-7,
            line_search_beta: 0.5,
            max_line_search_iters: 20,
            min_z_ohm: 1e-3,
            max_z_ohm: 1e4,
        }
    }
}

/// Configuration of one synthesis solve.
#[derive(Clone, Copy, Debug)]
pub struct SolverConfig {
    /// Acceptance gate: match-equation residual normalized by the source
    /// resistance must fall below this for a candidate to be retained.
    pub residual_tol: f64,
    /// Below this (ohms), the closed forms are treated as degenerate and
    /// the iterative fallback takes over.
    pub degenerate_tol: f64,
    /// Permit the susceptance-canceling auxiliary stub for loads landing in
    /// the central Smith region.
    pub allow_balance_stub: bool,
    /// Characteristic impedance of the scanned auxiliary line; defaults to
    /// the source resistance.
    pub aux_line_z0_ohm: Option<f64>,
    /// Fallback root-finder settings.
    pub newton: NewtonConfig,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            residual_tol: 1e-6,
            degenerate_tol: 1e-6,
            allow_balance_stub: true,
            aux_line_z0_ohm: None,
            newton: NewtonConfig::default(),
        }
    }
}
