//! Closed-form stages of the two-frequency synthesis.
//!
//! Electrical lengths are radians at the f0 = f1 + f2 reference unless a
//! function says otherwise. Loads enter these functions already transformed
//! through the scanned auxiliary line.

use core::f64::consts::{FRAC_PI_2, PI};
use core::fmt;

use num_complex::Complex64;

use dm_tline::StubTermination;

/// Guard for tangent denominators, matching the transformation math.
const TRIG_EPS: f64 = 1e-9;

/// Susceptance below this (siemens) needs no canceling stub.
const SUSCEPTANCE_EPS: f64 = 1e-12;

/// Where the transformed load lands on the Smith chart relative to the
/// source resistance. `Central` is the region that needs the auxiliary
/// susceptance-canceling stub.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SmithRegion {
    HighResistance,
    HighConductance,
    Central,
}

impl SmithRegion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighResistance => "high-resistance",
            Self::HighConductance => "high-conductance",
            Self::Central => "central",
        }
    }
}

impl fmt::Display for SmithRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a closed-form stage.
pub(crate) enum ClosedForm {
    /// (characteristic impedance, electrical length)
    Solution(f64, f64),
    /// The equations have no physical root at this sample.
    NoRoot,
    /// The closed form does not apply; the iterative fallback decides.
    Degenerate,
}

/// Stage 1 closed form: the line (Z1, θ1) whose input impedances at the two
/// frequencies are complex conjugates of each other.
///
///   Z1² = R1·R2 + X1·X2 + (X1+X2)(R1·X2 − R2·X1)/(R2 − R1)
///   tan θ1 = Z1 (R2 − R1) / (R2·X1 − R1·X2)
///
/// θ1 is normalized into (0, π]; `branch` = 1 selects the extended root
/// θ1 + π. Requires R1 ≠ R2; the equal-resistance sub-case is degenerate.
pub(crate) fn conjugate_transform(
    zl1: Complex64,
    zl2: Complex64,
    branch: u8,
    degenerate_tol: f64,
) -> ClosedForm {
    let (r1, x1) = (zl1.re, zl1.im);
    let (r2, x2) = (zl2.re, zl2.im);

    let dr = r2 - r1;
    if dr.abs() < degenerate_tol {
        return ClosedForm::Degenerate;
    }

    let inside = r1 * r2 + x1 * x2 + (x1 + x2) / dr * (r1 * x2 - r2 * x1);
    if !inside.is_finite() || inside <= 0.0 {
        return ClosedForm::NoRoot;
    }
    let z1 = inside.sqrt();

    let num = z1 * dr;
    let den = r2 * x1 - r1 * x2;
    let mut theta1 = if den.abs() < TRIG_EPS {
        FRAC_PI_2
    } else {
        (num / den).atan()
    };
    if theta1 < 0.0 {
        theta1 += PI;
    }
    theta1 += f64::from(branch) * PI;

    ClosedForm::Solution(z1, theta1)
}

/// Classify the conjugate-transformed impedance against the source
/// resistance: r > 1, g > 1, or central.
pub(crate) fn classify_region(zin: Complex64, rs: f64) -> SmithRegion {
    let zn = zin / rs;
    let r = zn.re;
    let g = (Complex64::new(1.0, 0.0) / zn).re;
    if r > 1.0 {
        SmithRegion::HighResistance
    } else if g > 1.0 {
        SmithRegion::HighConductance
    } else {
        SmithRegion::Central
    }
}

/// Auxiliary half-wave shunt stub canceling the input susceptance at f1
/// (and, by the half-wave symmetry, at f2).
pub(crate) enum StubOutcome {
    /// Susceptance already negligible; no stub.
    NotNeeded,
    Stub {
        y0: f64,
        termination: StubTermination,
        zin_after: Complex64,
    },
    /// Neither termination yields a positive characteristic admittance.
    Unrealizable,
}

pub(crate) fn cancel_susceptance_stub(zin: Complex64, p1: f64) -> StubOutcome {
    let y = Complex64::new(1.0, 0.0) / zin;
    let b = y.im;
    if !b.is_finite() {
        return StubOutcome::Unrealizable;
    }
    if b.abs() < SUSCEPTANCE_EPS {
        return StubOutcome::NotNeeded;
    }

    let target_b = -b;
    let tan_t = (p1 * PI).tan();

    let y_open = if tan_t.abs() > TRIG_EPS {
        target_b / tan_t
    } else {
        0.0
    };
    let y_short = -target_b * tan_t;

    let (y0, termination, y_stub) = if y_open > 0.0 {
        (
            y_open,
            StubTermination::Open,
            Complex64::new(0.0, y_open * tan_t),
        )
    } else if y_short > 0.0 {
        (
            y_short,
            StubTermination::Short,
            Complex64::new(0.0, -y_short / tan_t),
        )
    } else {
        return StubOutcome::Unrealizable;
    };

    let zin_after = Complex64::new(1.0, 0.0) / (y + y_stub);
    StubOutcome::Stub {
        y0,
        termination,
        zin_after,
    }
}

/// Stage 3 closed form: the single-line equivalent transformer (Z_T, θ_T)
/// taking the stub-corrected impedance to the source resistance at f1.
///
///   Z_T² = X²·Rs/(R − Rs) + R·Rs
///   tan θ_T = Z_T (Rs − R) / (X·Rs)
///
/// θ_T is an abstract angle in (0, π], consumed only by the pi synthesis.
/// R ≈ Rs is degenerate (already matched when X ≈ 0, fallback otherwise).
pub(crate) fn equivalent_transformer(
    zin: Complex64,
    rs: f64,
    degenerate_tol: f64,
) -> ClosedForm {
    let (r, x) = (zin.re, zin.im);

    if (r - rs).abs() < degenerate_tol {
        return ClosedForm::Degenerate;
    }

    let term = x * x * rs / (r - rs) + r * rs;
    if !term.is_finite() || term <= 0.0 {
        return ClosedForm::NoRoot;
    }
    let zt = term.sqrt();

    let num = zt * (rs - r);
    let den = x * rs;
    let mut theta_t = if den.abs() < TRIG_EPS {
        FRAC_PI_2
    } else {
        (num / den).atan()
    };
    if theta_t <= 0.0 {
        theta_t += PI;
    }

    ClosedForm::Solution(zt, theta_t)
}

/// Stage 4: realize (Z_T, θ_T) as the half-wave pi section.
///
///   Zm = Z_T sin θ_T / sin(π p1)
///   Bn = (cos(π p1) − cos θ_T) / (Zm sin(π p1))
///
/// The two shunt stubs are identical; a vanishing Bn drops them entirely.
pub(crate) struct PiSection {
    pub zm_ohm: f64,
    pub stub: Option<(f64, StubTermination)>,
}

pub(crate) fn pi_synthesis(zt: f64, theta_t: f64, p1: f64) -> Option<PiSection> {
    let tm = p1 * PI;
    let sin_tm = tm.sin();

    let zm = zt * theta_t.sin() / sin_tm;
    if !zm.is_finite() || zm <= 0.0 {
        return None;
    }

    let bn = (tm.cos() - theta_t.cos()) / (zm * sin_tm);
    if !bn.is_finite() {
        return None;
    }
    if bn.abs() < SUSCEPTANCE_EPS {
        return Some(PiSection { zm_ohm: zm, stub: None });
    }

    let tan_tm = tm.tan();
    let y_open = if tan_tm.abs() > TRIG_EPS {
        bn / tan_tm
    } else {
        0.0
    };
    let y_short = -bn * tan_tm;

    let stub = if y_open > 0.0 {
        (y_open, StubTermination::Open)
    } else if y_short > 0.0 {
        (y_short, StubTermination::Short)
    } else {
        return None;
    };

    Some(PiSection {
        zm_ohm: zm,
        stub: Some(stub),
    })
}
