//! Immutable value types describing a matching problem instance.

use core::fmt;

use num_complex::Complex64;

use crate::error::{DmError, DmResult};
use crate::units::{freq_hz, resistance_ohm, Freq, Resistance};

/// A complex terminal impedance in ohms.
///
/// Physically realizable terminations have non-negative resistance; the
/// constructor rejects anything else, so a held value is always usable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Impedance(Complex64);

impl Impedance {
    pub fn new(resistance_ohm: f64, reactance_ohm: f64) -> DmResult<Self> {
        if !resistance_ohm.is_finite() {
            return Err(DmError::NonFinite {
                what: "impedance resistance",
                value: resistance_ohm,
            });
        }
        if !reactance_ohm.is_finite() {
            return Err(DmError::NonFinite {
                what: "impedance reactance",
                value: reactance_ohm,
            });
        }
        if resistance_ohm < 0.0 {
            return Err(DmError::InvalidInput {
                what: format!("negative impedance resistance: {resistance_ohm} ohm"),
            });
        }
        Ok(Self(Complex64::new(resistance_ohm, reactance_ohm)))
    }

    /// Construct from unit-carrying quantities.
    pub fn from_parts(resistance: Resistance, reactance: Resistance) -> DmResult<Self> {
        Self::new(resistance_ohm(resistance), resistance_ohm(reactance))
    }

    #[inline]
    pub fn resistance_ohm(&self) -> f64 {
        self.0.re
    }

    #[inline]
    pub fn reactance_ohm(&self) -> f64 {
        self.0.im
    }

    #[inline]
    pub fn as_complex(&self) -> Complex64 {
        self.0
    }
}

impl fmt::Display for Impedance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.im < 0.0 {
            write!(f, "{:.3} - j{:.3} ohm", self.0.re, -self.0.im)
        } else {
            write!(f, "{:.3} + j{:.3} ohm", self.0.re, self.0.im)
        }
    }
}

/// The two design frequencies, canonically ordered f1 < f2.
///
/// Also carries the synthesis reference frequency f0 = f1 + f2 used to state
/// commensurate electrical lengths, and the ratios p1 = f1/f0, p2 = f2/f0
/// that scale a reference length to each operating frequency.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrequencyPair {
    f1_hz: f64,
    f2_hz: f64,
}

impl FrequencyPair {
    pub fn new(fa: Freq, fb: Freq) -> DmResult<Self> {
        Self::from_hz(freq_hz(fa), freq_hz(fb))
    }

    pub fn from_hz(fa_hz: f64, fb_hz: f64) -> DmResult<Self> {
        for (v, what) in [(fa_hz, "frequency f1"), (fb_hz, "frequency f2")] {
            if !v.is_finite() {
                return Err(DmError::NonFinite { what, value: v });
            }
            if v <= 0.0 {
                return Err(DmError::InvalidInput {
                    what: format!("non-positive {what}: {v} Hz"),
                });
            }
        }
        if fa_hz == fb_hz {
            return Err(DmError::InvalidInput {
                what: format!("design frequencies must differ, both are {fa_hz} Hz"),
            });
        }
        let (f1_hz, f2_hz) = if fa_hz < fb_hz {
            (fa_hz, fb_hz)
        } else {
            (fb_hz, fa_hz)
        };
        Ok(Self { f1_hz, f2_hz })
    }

    #[inline]
    pub fn f1_hz(&self) -> f64 {
        self.f1_hz
    }

    #[inline]
    pub fn f2_hz(&self) -> f64 {
        self.f2_hz
    }

    /// Synthesis reference frequency f0 = f1 + f2.
    #[inline]
    pub fn f0_hz(&self) -> f64 {
        self.f1_hz + self.f2_hz
    }

    /// f1 / f0; strictly below 1/2 because f1 < f2.
    #[inline]
    pub fn p1(&self) -> f64 {
        self.f1_hz / self.f0_hz()
    }

    /// f2 / f0 = 1 - p1.
    #[inline]
    pub fn p2(&self) -> f64 {
        self.f2_hz / self.f0_hz()
    }
}

/// One immutable synthesis problem: source, load at each frequency, and the
/// frequency pair. The common case of a frequency-independent load uses
/// [`MatchProblem::new`]; a load measured separately at the two frequencies
/// goes through [`MatchProblem::with_split_load`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchProblem {
    source: Impedance,
    load_f1: Impedance,
    load_f2: Impedance,
    freqs: FrequencyPair,
}

impl MatchProblem {
    pub fn new(source: Impedance, load: Impedance, freqs: FrequencyPair) -> DmResult<Self> {
        Self::with_split_load(source, load, load, freqs)
    }

    pub fn with_split_load(
        source: Impedance,
        load_f1: Impedance,
        load_f2: Impedance,
        freqs: FrequencyPair,
    ) -> DmResult<Self> {
        // The match target is the source resistance; a pure-reactance source
        // has no power match at all.
        if source.resistance_ohm() <= 0.0 {
            return Err(DmError::InvalidInput {
                what: format!(
                    "source resistance must be positive, got {} ohm",
                    source.resistance_ohm()
                ),
            });
        }
        Ok(Self {
            source,
            load_f1,
            load_f2,
            freqs,
        })
    }

    #[inline]
    pub fn source(&self) -> Impedance {
        self.source
    }

    #[inline]
    pub fn load_f1(&self) -> Impedance {
        self.load_f1
    }

    #[inline]
    pub fn load_f2(&self) -> Impedance {
        self.load_f2
    }

    #[inline]
    pub fn freqs(&self) -> FrequencyPair {
        self.freqs
    }
}
