//! A single transmission-line segment of the matching network.

use core::f64::consts::TAU;
use core::fmt;

use dm_core::{DmError, DmResult};

/// How a shunt stub is terminated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StubTermination {
    Open,
    Short,
}

impl fmt::Display for StubTermination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Short => write!(f, "short"),
        }
    }
}

/// Series line in the cascade, or shunt stub hanging off it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentKind {
    Series,
    Shunt(StubTermination),
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Series => write!(f, "series"),
            Self::Shunt(t) => write!(f, "shunt-{t}"),
        }
    }
}

/// One physical line segment: characteristic impedance plus electrical
/// length stated at the synthesis reference frequency f0 = f1 + f2.
///
/// The f0-referenced length may reach up to 360 degrees (the extended
/// conjugate-transform branch); at the operating frequencies it is scaled by
/// f/f0 < 1/2, which keeps every reported length inside [0, 180) degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    label: &'static str,
    kind: SegmentKind,
    z0_ohm: f64,
    theta_f0_rad: f64,
}

impl Segment {
    pub fn series(label: &'static str, z0_ohm: f64, theta_f0_rad: f64) -> DmResult<Self> {
        Self::new(label, SegmentKind::Series, z0_ohm, theta_f0_rad)
    }

    pub fn shunt(
        label: &'static str,
        termination: StubTermination,
        z0_ohm: f64,
        theta_f0_rad: f64,
    ) -> DmResult<Self> {
        Self::new(label, SegmentKind::Shunt(termination), z0_ohm, theta_f0_rad)
    }

    fn new(
        label: &'static str,
        kind: SegmentKind,
        z0_ohm: f64,
        theta_f0_rad: f64,
    ) -> DmResult<Self> {
        if !z0_ohm.is_finite() {
            return Err(DmError::NonFinite {
                what: "segment characteristic impedance",
                value: z0_ohm,
            });
        }
        if z0_ohm <= 0.0 {
            return Err(DmError::Invariant {
                what: "segment characteristic impedance must be positive",
            });
        }
        if !theta_f0_rad.is_finite() {
            return Err(DmError::NonFinite {
                what: "segment electrical length",
                value: theta_f0_rad,
            });
        }
        if !(0.0..TAU).contains(&theta_f0_rad) {
            return Err(DmError::Invariant {
                what: "segment electrical length must lie in [0, 2pi) at f0",
            });
        }
        Ok(Self {
            label,
            kind,
            z0_ohm,
            theta_f0_rad,
        })
    }

    #[inline]
    pub fn label(&self) -> &'static str {
        self.label
    }

    #[inline]
    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    #[inline]
    pub fn z0_ohm(&self) -> f64 {
        self.z0_ohm
    }

    /// Electrical length in radians at the f0 reference.
    #[inline]
    pub fn theta_f0_rad(&self) -> f64 {
        self.theta_f0_rad
    }

    /// Electrical length in radians at `scale` = f/f0.
    #[inline]
    pub fn theta_rad_at(&self, scale: f64) -> f64 {
        self.theta_f0_rad * scale
    }

    /// Electrical length in degrees at `scale` = f/f0.
    #[inline]
    pub fn theta_deg_at(&self, scale: f64) -> f64 {
        self.theta_rad_at(scale).to_degrees()
    }
}
