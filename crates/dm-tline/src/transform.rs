//! Impedance transformation along lossless lines and stubs.

use num_complex::Complex64;

use crate::segment::StubTermination;

/// cos/sin below this magnitude is treated as an exact quarter/half-wave
/// resonance to keep the tangent out of the arithmetic.
const TRIG_EPS: f64 = 1e-9;

/// Stand-in magnitude for an ideally open/short resonant termination.
const RESONANT_LIMIT: f64 = 1e9;

/// Input impedance of a lossless line of characteristic impedance `z0`
/// and electrical length `theta_rad`, terminated in `z_load`.
///
/// Zin = Z0 (ZL + j Z0 tan θ) / (Z0 + j ZL tan θ), with the quarter-wave
/// resonance handled as the impedance inversion Z0²/ZL.
pub fn line_input_impedance(z_load: Complex64, z0: f64, theta_rad: f64) -> Complex64 {
    if theta_rad.cos().abs() < TRIG_EPS {
        if z_load.norm() < TRIG_EPS {
            return Complex64::new(RESONANT_LIMIT, 0.0);
        }
        return Complex64::new(z0 * z0, 0.0) / z_load;
    }
    let t = Complex64::new(0.0, theta_rad.tan());
    z0 * (z_load + z0 * t) / (z0 + z_load * t)
}

/// Input admittance of an open- or short-terminated stub of characteristic
/// admittance `y0` and electrical length `theta_rad`.
///
/// Open: Y = j Y0 tan θ. Short: Y = -j Y0 / tan θ. Resonant lengths collapse
/// to the ideal short/open limits.
pub fn stub_admittance(y0: f64, theta_rad: f64, termination: StubTermination) -> Complex64 {
    let is_open = matches!(termination, StubTermination::Open);
    if theta_rad.cos().abs() < TRIG_EPS {
        // quarter-wave: open stub looks short, short stub looks open
        return if is_open {
            Complex64::new(0.0, RESONANT_LIMIT)
        } else {
            Complex64::new(0.0, 0.0)
        };
    }
    if theta_rad.sin().abs() < TRIG_EPS {
        // half-wave: the termination reappears at the input
        return if is_open {
            Complex64::new(0.0, 0.0)
        } else {
            Complex64::new(0.0, -RESONANT_LIMIT)
        };
    }
    if is_open {
        Complex64::new(0.0, y0 * theta_rad.tan())
    } else {
        Complex64::new(0.0, -y0 / theta_rad.tan())
    }
}

/// Power-wave reflection coefficient of `z_in` against the source `z_s`:
/// Γ = (Zin - Zs*) / (Zin + Zs). Reduces to the ordinary voltage reflection
/// coefficient for a real source.
pub fn reflection_coefficient(z_in: Complex64, z_s: Complex64) -> Complex64 {
    (z_in - z_s.conj()) / (z_in + z_s)
}

/// Voltage standing-wave ratio of `z_in` against the source `z_s`.
/// Total mismatch maps to infinity.
pub fn vswr(z_in: Complex64, z_s: Complex64) -> f64 {
    let gamma = reflection_coefficient(z_in, z_s).norm();
    if !gamma.is_finite() || gamma >= 1.0 - 1e-12 {
        return f64::INFINITY;
    }
    (1.0 + gamma) / (1.0 - gamma)
}
