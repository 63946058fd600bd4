// dm-core/src/units.rs

use uom::si::f64::{
    Angle as UomAngle, ElectricalResistance as UomElectricalResistance,
    Frequency as UomFrequency,
};

// Public canonical unit types (SI, f64)
pub type Angle = UomAngle;
pub type Freq = UomFrequency;
pub type Resistance = UomElectricalResistance;

#[inline]
pub fn hz(v: f64) -> Freq {
    use uom::si::frequency::hertz;
    Freq::new::<hertz>(v)
}

#[inline]
pub fn mhz(v: f64) -> Freq {
    use uom::si::frequency::megahertz;
    Freq::new::<megahertz>(v)
}

#[inline]
pub fn ghz(v: f64) -> Freq {
    use uom::si::frequency::gigahertz;
    Freq::new::<gigahertz>(v)
}

#[inline]
pub fn deg(v: f64) -> Angle {
    use uom::si::angle::degree;
    Angle::new::<degree>(v)
}

#[inline]
pub fn rad(v: f64) -> Angle {
    use uom::si::angle::radian;
    Angle::new::<radian>(v)
}

#[inline]
pub fn ohm(v: f64) -> Resistance {
    use uom::si::electrical_resistance::ohm;
    Resistance::new::<ohm>(v)
}

#[inline]
pub fn freq_hz(f: Freq) -> f64 {
    use uom::si::frequency::hertz;
    f.get::<hertz>()
}

#[inline]
pub fn angle_rad(a: Angle) -> f64 {
    use uom::si::angle::radian;
    a.get::<radian>()
}

#[inline]
pub fn resistance_ohm(r: Resistance) -> f64 {
    use uom::si::electrical_resistance::ohm;
    r.get::<ohm>()
}
