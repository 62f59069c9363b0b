//! Sun-direction source for shadow/eclipse rendering (§6).
//!
//! The renderer normally supplies the sun direction from its own skybox
//! transform; `EphemerisSunProvider` is the fallback named in spec.md's
//! open question, a low-precision solar position good to about a degree.

use tacsim_core::types::Vec3;

/// Abstraction over "wherever the sun direction comes from".
pub trait SunProvider {
    /// Unit vector from Earth's center toward the sun, in sim-ECI coordinates.
    fn sun_direction_eci(&self, julian_date: f64) -> Vec3;
}

/// Low-precision geocentric solar ephemeris (Astronomical Almanac
/// approximation, good to ~0.01 degrees through 2099).
pub struct EphemerisSunProvider;

impl SunProvider for EphemerisSunProvider {
    fn sun_direction_eci(&self, julian_date: f64) -> Vec3 {
        let d = julian_date - 2_451_545.0;
        let g = (357.529_f64 + 0.985_600_28 * d).to_radians();
        let q = (280.459_f64 + 0.985_647_36 * d).to_radians();
        let l = q + (1.915_f64 * g.sin() + 0.020_f64 * (2.0 * g).sin()).to_radians();
        let e = (23.439_f64 - 0.000_000_36 * d).to_radians();

        let x = l.cos();
        let y = e.cos() * l.sin();
        let z = e.sin() * l.sin();
        Vec3::new(x, y, z).normalize()
    }
}
