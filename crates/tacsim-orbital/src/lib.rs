//! Orbital mechanics library: the "orbital library" external interface of
//! spec §6, genuinely implemented rather than stubbed. Frame conversions,
//! classical orbital elements, a two-body propagator, and a sun-direction
//! fallback ephemeris.

pub mod elements;
pub mod frame;
pub mod propagate;
pub mod sun;

pub use elements::{elements_from_eci, OrbitalError};
pub use frame::compute_orbital_frame;
pub use propagate::step_two_body;
pub use sun::{EphemerisSunProvider, SunProvider};

use tacsim_core::constants::EARTH_RADIUS_M;
use tacsim_core::types::{EciState, GeodeticPosition, Vec3};

/// Earth's mean sidereal rotation rate, rad/s. Used to derive the sim's
/// GMST(t) = rate * t convention (GMST = 0 at t = 0), not a full IAU
/// precession/nutation model.
pub const EARTH_ROTATION_RATE_RAD_S: f64 = 7.292_115e-5;

/// Sim-GMST at a given simulated time, radians, wrapped to [0, TAU).
pub fn gmst(sim_time_secs: f64) -> f64 {
    (EARTH_ROTATION_RATE_RAD_S * sim_time_secs).rem_euclid(std::f64::consts::TAU)
}

fn rotate_z(v: Vec3, theta: f64) -> Vec3 {
    let (s, c) = theta.sin_cos();
    Vec3::new(c * v.x - s * v.y, s * v.x + c * v.y, v.z)
}

/// East/North/Up basis vectors (in ECEF) at a geodetic position.
fn enu_basis(pos: &GeodeticPosition) -> (Vec3, Vec3, Vec3) {
    let (sin_lat, cos_lat) = pos.lat.sin_cos();
    let (sin_lon, cos_lon) = pos.lon.sin_cos();
    let east = Vec3::new(-sin_lon, cos_lon, 0.0);
    let north = Vec3::new(-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat);
    let up = Vec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat);
    (east, north, up)
}

/// `geodeticToECI(state, simTime)`: converts a geodetic position plus local
/// horizontal speed/heading/flight-path-angle into sim-ECI position and
/// velocity, rotating ECEF into ECI by the time-dependent sim-GMST.
pub fn geodetic_to_eci(
    pos: &GeodeticPosition,
    speed_mps: f64,
    heading_rad: f64,
    gamma_rad: f64,
    sim_time_secs: f64,
) -> EciState {
    let (east, north, up) = enu_basis(pos);
    let horiz = speed_mps * gamma_rad.cos();
    let v_e = horiz * heading_rad.sin();
    let v_n = horiz * heading_rad.cos();
    let v_u = speed_mps * gamma_rad.sin();
    let vel_ecef = east * v_e + north * v_n + up * v_u;

    let pos_ecef = pos.to_ecef();
    let omega = Vec3::new(0.0, 0.0, EARTH_ROTATION_RATE_RAD_S);
    let vel_inertial_ecef = vel_ecef + omega.cross(pos_ecef);

    let theta = gmst(sim_time_secs);
    EciState {
        pos: rotate_z(pos_ecef, theta),
        vel: rotate_z(vel_inertial_ecef, theta),
    }
}

/// Converts an ECI position back to geodetic lat/lon/alt using the GMST=0
/// approximation: the caller is expected to use this only where spec.md's
/// `deriveFlightStateFromECI` open question mandates it (the
/// assume-control path in `tacsim-engine`'s hijack manager). It is wrong
/// for any `sim_time_secs` other than (approximately) zero, by design —
/// do not "fix" this by threading in the real GMST.
pub fn eci_to_geodetic_gmst0(eci_pos: Vec3) -> GeodeticPosition {
    let r = eci_pos.length();
    let lat = (eci_pos.z / r).asin();
    let lon = eci_pos.y.atan2(eci_pos.x);
    GeodeticPosition::new(lat, lon, r - EARTH_RADIUS_M)
}

/// Derives heading and flight-path angle from an ECI velocity, projected
/// into the local ENU frame at the (GMST=0-derived) geodetic position.
/// Returns `(heading_rad, gamma_rad, speed_mps)`.
pub fn flight_state_from_eci_gmst0(eci: &EciState) -> (f64, f64, f64) {
    let pos = eci_to_geodetic_gmst0(eci.pos);
    let (east, north, up) = enu_basis(&pos);
    let v_e = eci.vel.dot(east);
    let v_n = eci.vel.dot(north);
    let v_u = eci.vel.dot(up);
    let heading = v_e.atan2(v_n).rem_euclid(std::f64::consts::TAU);
    let horiz = (v_e * v_e + v_n * v_n).sqrt();
    let gamma = v_u.atan2(horiz);
    (heading, gamma, eci.vel.length())
}

/// Vis-viva speed at radius `r` for an orbit of semi-major axis `sma`.
pub fn vis_viva_speed(r: f64, sma: f64, mu: f64) -> f64 {
    (mu * (2.0 / r - 1.0 / sma)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gmst_zero_at_epoch() {
        assert_eq!(gmst(0.0), 0.0);
    }

    #[test]
    fn test_geodetic_to_eci_round_trips_at_t0() {
        let pos = GeodeticPosition::new(0.3, 1.1, 400_000.0);
        let eci = geodetic_to_eci(&pos, 0.0, 0.0, 0.0, 0.0);
        let back = eci_to_geodetic_gmst0(eci.pos);
        assert!((pos.lat - back.lat).abs() < 1e-9);
        assert!((pos.lon - back.lon).abs() < 1e-9);
        assert!((pos.alt - back.alt).abs() < 1e-3);
    }

    #[test]
    fn test_vis_viva_circular_orbit_speed() {
        let mu = tacsim_core::constants::MU_EARTH;
        let r = EARTH_RADIUS_M + 400_000.0;
        let v = vis_viva_speed(r, r, mu);
        // LEO circular speed at 400km should be close to 7668 m/s (scenario 1).
        assert!((v - 7668.0).abs() < 5.0, "got {v}");
    }
}
