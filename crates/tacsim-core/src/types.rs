//! Fundamental geometric and simulation types.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::EARTH_RADIUS_M;

/// A position or direction vector. ECI/ECEF components, meters, unless noted.
pub type Vec3 = DVec3;

/// Geodetic position: latitude and longitude in radians, altitude in meters MSL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeodeticPosition {
    pub lat: f64,
    pub lon: f64,
    pub alt: f64,
}

impl GeodeticPosition {
    pub fn new(lat: f64, lon: f64, alt: f64) -> Self {
        Self { lat, lon, alt }
    }

    /// Spherical-Earth ECEF position. Good enough for tactical geometry and
    /// the ECI derivation in `tacsim-orbital`; this is not a WGS-84 ellipsoid.
    pub fn to_ecef(&self) -> Vec3 {
        let r = EARTH_RADIUS_M + self.alt;
        let (sin_lat, cos_lat) = self.lat.sin_cos();
        let (sin_lon, cos_lon) = self.lon.sin_cos();
        Vec3::new(r * cos_lat * cos_lon, r * cos_lat * sin_lon, r * sin_lat)
    }

    /// 3D slant range to another geodetic position, meters.
    pub fn range_to(&self, other: &GeodeticPosition) -> f64 {
        self.to_ecef().distance(other.to_ecef())
    }

    /// Great-circle surface range (altitude ignored), meters.
    pub fn horizontal_range_to(&self, other: &GeodeticPosition) -> f64 {
        let d_lat = other.lat - self.lat;
        let d_lon = other.lon - self.lon;
        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.cos() * other.lat.cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();
        EARTH_RADIUS_M * c
    }

    /// Initial great-circle bearing to another position, radians, 0 = North clockwise.
    pub fn bearing_to(&self, other: &GeodeticPosition) -> f64 {
        let d_lon = other.lon - self.lon;
        let y = d_lon.sin() * other.lat.cos();
        let x = self.lat.cos() * other.lat.sin() - self.lat.sin() * other.lat.cos() * d_lon.cos();
        y.atan2(x).rem_euclid(std::f64::consts::TAU)
    }

    /// Great-circle destination point `distance_m` along `bearing_rad` from
    /// this position, at the same altitude.
    pub fn destination_point(&self, bearing_rad: f64, distance_m: f64) -> GeodeticPosition {
        let delta = distance_m / EARTH_RADIUS_M;
        let (sin_lat1, cos_lat1) = self.lat.sin_cos();
        let (sin_delta, cos_delta) = delta.sin_cos();
        let lat2 = (sin_lat1 * cos_delta + cos_lat1 * sin_delta * bearing_rad.cos()).asin();
        let lon2 = self.lon
            + (bearing_rad.sin() * sin_delta * cos_lat1).atan2(cos_delta - sin_lat1 * lat2.sin());
        GeodeticPosition::new(lat2, lon2, self.alt)
    }
}

/// ECI position/velocity pair, sim-GMST=0 convention (see `tacsim-orbital`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EciState {
    pub pos: Vec3,
    pub vel: Vec3,
}

/// Orbital elements as produced by the orbital library's `update`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    pub sma: f64,
    pub ecc: f64,
    pub inc: f64,
    pub raan: f64,
    pub arg_pe: f64,
    pub true_anomaly: f64,
    pub apoapsis_alt: f64,
    pub periapsis_alt: f64,
    pub period: f64,
    pub time_to_apoapsis: f64,
    pub time_to_periapsis: f64,
    pub time_to_ascending_node: f64,
    pub time_to_descending_node: f64,
    pub time_to_ta90: f64,
    pub time_to_ta270: f64,
}

/// Orbital frame unit vectors: prograde (v̂), normal, radial.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrbitalFrame {
    pub prograde: Vec3,
    pub normal: Vec3,
    pub radial: Vec3,
}

/// Simulation time tracking: ticks elapsed and total simulated seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick that actually advances).
    pub tick: u64,
    /// Elapsed simulation time in seconds since `epoch_jd`.
    pub elapsed_secs: f64,
    /// Julian date of the simulation epoch (t=0).
    pub epoch_jd: f64,
}

impl Default for SimTime {
    fn default() -> Self {
        Self {
            tick: 0,
            elapsed_secs: 0.0,
            epoch_jd: crate::constants::J2000_EPOCH_JD,
        }
    }
}

impl SimTime {
    /// Advance the clock by a simulated delta (may be zero while paused).
    pub fn advance(&mut self, sdt: f64) {
        if sdt > 0.0 {
            self.tick += 1;
            self.elapsed_secs += sdt;
        }
    }

    /// Current Julian date.
    pub fn julian_date(&self) -> f64 {
        self.epoch_jd + self.elapsed_secs / 86_400.0
    }
}

/// Engine parameters snapshot attached to a maneuver node at creation time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineParams {
    pub thrust_n: f64,
    pub mass_kg: f64,
    pub label: String,
}

/// A planned impulsive burn, per §3's "Maneuver Node". Owned by the external
/// planner; the core only holds a non-owning selection (see `tacsim-engine`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManeuverNode {
    pub target_sim_time: f64,
    /// Delta-V components in the orbital frame at node creation.
    pub dv_prograde: f64,
    pub dv_normal: f64,
    pub dv_radial: f64,
    pub eci_pos_at_node: Vec3,
    pub engine: EngineParams,
    pub predicted_apoapsis_alt: f64,
    pub predicted_periapsis_alt: f64,
    pub burn_time_estimate_secs: f64,
}

impl ManeuverNode {
    /// Total delta-V magnitude of this node.
    pub fn dv_total(&self) -> f64 {
        (self.dv_prograde.powi(2) + self.dv_normal.powi(2) + self.dv_radial.powi(2)).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geodetic_range_equator() {
        let a = GeodeticPosition::new(0.0, 0.0, 0.0);
        let b = GeodeticPosition::new(0.0, 0.0, 1000.0);
        assert!((a.range_to(&b) - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn test_geodetic_bearing_north() {
        let a = GeodeticPosition::new(0.0, 0.0, 0.0);
        let north = GeodeticPosition::new(0.01, 0.0, 0.0);
        assert!(a.bearing_to(&north).abs() < 1e-9);
    }

    #[test]
    fn test_geodetic_bearing_east() {
        let a = GeodeticPosition::new(0.0, 0.0, 0.0);
        let east = GeodeticPosition::new(0.0, 0.01, 0.0);
        let expected = std::f64::consts::FRAC_PI_2;
        assert!((a.bearing_to(&east) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_sim_time_advance_paused() {
        let mut time = SimTime::default();
        time.advance(0.0);
        assert_eq!(time.tick, 0);
        assert_eq!(time.elapsed_secs, 0.0);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        time.advance(0.033);
        assert_eq!(time.tick, 1);
        assert!((time.elapsed_secs - 0.033).abs() < 1e-12);
    }
}
