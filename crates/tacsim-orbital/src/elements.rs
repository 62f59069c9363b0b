//! Classical orbital element extraction from an ECI state vector.

use std::f64::consts::{PI, TAU};

use thiserror::Error;

use tacsim_core::types::{EciState, OrbitalElements, Vec3};

const EPS: f64 = 1e-9;

/// Failure modes of element extraction, distinct from `tacsim_core::ErrorKind`
/// because callers decide how to fold this into the host-facing taxonomy
/// (spec.md's `OrbitalUpdateFailed` recovery: clear polylines, continue).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrbitalError {
    #[error("degenerate orbit: zero radius or angular momentum")]
    Degenerate,
    #[error("hyperbolic trajectory, orbit elements undefined: {0}")]
    Hyperbolic(f64),
}

fn mean_anomaly_from_true_anomaly(ta: f64, ecc: f64) -> f64 {
    let e = (((1.0 - ecc) / (1.0 + ecc)).sqrt() * (ta / 2.0).tan()).atan() * 2.0;
    (e - ecc * e.sin()).rem_euclid(TAU)
}

/// Extracts classical orbital elements from an ECI state, plus the
/// time-to-event fields (§3's `OrbitalElements`) computed from Kepler's
/// equation in mean-anomaly space.
pub fn elements_from_eci(state: &EciState, mu: f64) -> Result<OrbitalElements, OrbitalError> {
    let r = state.pos;
    let v = state.vel;
    let r_mag = r.length();
    let v_mag = v.length();
    if r_mag < EPS {
        return Err(OrbitalError::Degenerate);
    }

    let h = r.cross(v);
    let h_mag = h.length();
    if h_mag < EPS {
        return Err(OrbitalError::Degenerate);
    }

    let node = Vec3::new(0.0, 0.0, 1.0).cross(h);
    let node_mag = node.length();

    let e_vec = (r * (v_mag * v_mag - mu / r_mag) - v * r.dot(v)) / mu;
    let ecc = e_vec.length();

    let energy = v_mag * v_mag / 2.0 - mu / r_mag;
    if energy >= 0.0 {
        return Err(OrbitalError::Hyperbolic(energy));
    }
    let sma = -mu / (2.0 * energy);

    let inc = (h.z / h_mag).clamp(-1.0, 1.0).acos();

    let raan = if node_mag > EPS {
        let raw = (node.x / node_mag).clamp(-1.0, 1.0).acos();
        if node.y < 0.0 {
            TAU - raw
        } else {
            raw
        }
    } else {
        0.0
    };

    let arg_pe = if node_mag > EPS && ecc > EPS {
        let raw = (node.dot(e_vec) / (node_mag * ecc)).clamp(-1.0, 1.0).acos();
        if e_vec.z < 0.0 {
            TAU - raw
        } else {
            raw
        }
    } else {
        0.0
    };

    let true_anomaly = if ecc > EPS {
        let raw = (e_vec.dot(r) / (ecc * r_mag)).clamp(-1.0, 1.0).acos();
        if r.dot(v) < 0.0 {
            TAU - raw
        } else {
            raw
        }
    } else if node_mag > EPS {
        let raw = (node.dot(r) / (node_mag * r_mag)).clamp(-1.0, 1.0).acos();
        if r.z < 0.0 {
            TAU - raw
        } else {
            raw
        }
    } else {
        r.y.atan2(r.x).rem_euclid(TAU)
    };

    let apoapsis_alt = sma * (1.0 + ecc) - tacsim_core::constants::EARTH_RADIUS_M;
    let periapsis_alt = sma * (1.0 - ecc) - tacsim_core::constants::EARTH_RADIUS_M;
    let period = TAU * (sma.powi(3) / mu).sqrt();
    let mean_motion = TAU / period;

    let m_current = mean_anomaly_from_true_anomaly(true_anomaly, ecc);
    let time_to_ta = |target_ta: f64| {
        let m_target = mean_anomaly_from_true_anomaly(target_ta, ecc);
        (m_target - m_current).rem_euclid(TAU) / mean_motion
    };

    Ok(OrbitalElements {
        sma,
        ecc,
        inc,
        raan,
        arg_pe,
        true_anomaly,
        apoapsis_alt,
        periapsis_alt,
        period,
        time_to_apoapsis: time_to_ta(PI),
        time_to_periapsis: time_to_ta(0.0),
        time_to_ascending_node: time_to_ta((-arg_pe).rem_euclid(TAU)),
        time_to_descending_node: time_to_ta((PI - arg_pe).rem_euclid(TAU)),
        time_to_ta90: time_to_ta(PI / 2.0),
        time_to_ta270: time_to_ta(3.0 * PI / 2.0),
    })
}
