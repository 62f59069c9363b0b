//! Maneuver solvers. Each returns a `SolverResult` carrying delta-V in the
//! orbital frame plus named diagnostics, matching spec.md's
//! `{valid, dvPro, dvNrm, dvRad, dvTotal, diagnostics}` contract.
//!
//! Lambert, Lagrange-point, and planetary-transfer solvers use standard
//! textbook closed-form/iterative approximations rather than full
//! perturbed-orbit boundary-value solutions — adequate for planning
//! dialogs, not for precision trajectory design.

use std::collections::HashMap;
use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use tacsim_core::types::{OrbitalElements, Vec3};
use tacsim_orbital::vis_viva_speed;

/// Result of a maneuver solver: delta-V resolved into the orbital frame at
/// the burn point, plus named diagnostics (time of flight, resulting
/// elements, etc.) for display in the planning dialog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolverResult {
    pub valid: bool,
    pub dv_pro: f64,
    pub dv_nrm: f64,
    pub dv_rad: f64,
    pub dv_total: f64,
    pub diagnostics: HashMap<String, f64>,
}

impl SolverResult {
    fn invalid() -> Self {
        Self::default()
    }

    fn from_components(dv_pro: f64, dv_nrm: f64, dv_rad: f64, diagnostics: HashMap<String, f64>) -> Self {
        Self {
            valid: true,
            dv_pro,
            dv_nrm,
            dv_rad,
            dv_total: (dv_pro * dv_pro + dv_nrm * dv_nrm + dv_rad * dv_rad).sqrt(),
            diagnostics,
        }
    }
}

/// Hohmann transfer burn 1: raises/lowers the apsis opposite the current
/// position to `target_r`, given current radius and speed at the burn point.
pub fn hohmann(r_current: f64, v_current: f64, target_r: f64, mu: f64) -> SolverResult {
    if r_current <= 0.0 || target_r <= 0.0 || mu <= 0.0 {
        return SolverResult::invalid();
    }
    let transfer_sma = (r_current + target_r) / 2.0;
    let v_transfer = vis_viva_speed(r_current, transfer_sma, mu);
    let dv_pro = v_transfer - v_current;
    let tof = PI * (transfer_sma.powi(3) / mu).sqrt();

    let mut diagnostics = HashMap::new();
    diagnostics.insert("transfer_sma_m".into(), transfer_sma);
    diagnostics.insert("time_of_flight_secs".into(), tof);
    diagnostics.insert("target_r_m".into(), target_r);
    SolverResult::from_components(dv_pro, 0.0, 0.0, diagnostics)
}

/// Inclination-change burn at a node where the current orbital speed is
/// `v_at_node`: a pure-normal burn of magnitude `2 v sin(Δi/2)`.
pub fn inclination_change(elements: &OrbitalElements, v_at_node: f64, target_inc: f64) -> SolverResult {
    let delta_inc = target_inc - elements.inc;
    if v_at_node <= 0.0 {
        return SolverResult::invalid();
    }
    let dv_nrm = 2.0 * v_at_node * (delta_inc / 2.0).sin();

    let mut diagnostics = HashMap::new();
    diagnostics.insert("delta_inc_rad".into(), delta_inc);
    diagnostics.insert("time_to_node_secs".into(), elements.time_to_ascending_node);
    SolverResult::from_components(0.0, dv_nrm, 0.0, diagnostics)
}

/// Combined plane change (inclination + RAAN) at the mutual node between
/// current and target planes, using the spherical-triangle formula for the
/// total plane-change angle between the two orbital normals.
pub fn plane_change(current_normal: Vec3, target_normal: Vec3, v_at_node: f64) -> SolverResult {
    if v_at_node <= 0.0 {
        return SolverResult::invalid();
    }
    let cos_theta = current_normal.normalize().dot(target_normal.normalize()).clamp(-1.0, 1.0);
    let theta = cos_theta.acos();
    let dv_nrm = 2.0 * v_at_node * (theta / 2.0).sin();

    let mut diagnostics = HashMap::new();
    diagnostics.insert("plane_angle_rad".into(), theta);
    SolverResult::from_components(0.0, dv_nrm, 0.0, diagnostics)
}

/// NMC ("node match/closure"): the single burn at the current state that
/// matches a target's velocity vector, expressed in the orbital frame at
/// the burn point. Used for rendezvous/co-orbital closure planning.
pub fn nmc(own_vel: Vec3, target_vel: Vec3, frame: &tacsim_core::types::OrbitalFrame) -> SolverResult {
    let dv = target_vel - own_vel;
    let dv_pro = dv.dot(frame.prograde);
    let dv_nrm = dv.dot(frame.normal);
    let dv_rad = dv.dot(frame.radial);

    let mut diagnostics = HashMap::new();
    diagnostics.insert("closing_speed_before_mps".into(), (target_vel - own_vel).length());
    SolverResult::from_components(dv_pro, dv_nrm, dv_rad, diagnostics)
}

/// Collinear Lagrange-point radius from the primary, via the standard
/// small-mass-ratio approximation `r_L ≈ R (m2 / 3 m1)^(1/3)` (valid for
/// L1/L2; same formula used for both, differing only in sign of offset).
/// Returns the burn to raise/lower apoapsis to that radius, reusing the
/// Hohmann formula, since pure collinear-point insertion is itself a
/// radius-matching transfer in the restricted two-body approximation used
/// throughout this crate.
pub fn lagrange_point_transfer(
    r_current: f64,
    v_current: f64,
    primary_separation_m: f64,
    mass_ratio_secondary_to_primary: f64,
    mu_primary: f64,
) -> SolverResult {
    if mass_ratio_secondary_to_primary <= 0.0 {
        return SolverResult::invalid();
    }
    let r_l = primary_separation_m * (mass_ratio_secondary_to_primary / 3.0).cbrt();
    let mut result = hohmann(r_current, v_current, r_l, mu_primary);
    result.diagnostics.insert("lagrange_radius_m".into(), r_l);
    result
}

/// Interplanetary (heliocentric) transfer: a Hohmann transfer in heliocentric
/// radii, patched-conic departure/arrival burns are left to the caller's
/// local two-body solver (this returns only the heliocentric delta-V).
pub fn planetary_transfer(r1_helio: f64, v1_helio: f64, r2_helio: f64, mu_sun: f64) -> SolverResult {
    let mut result = hohmann(r1_helio, v1_helio, r2_helio, mu_sun);
    result.diagnostics.insert("heliocentric".into(), 1.0);
    result
}

/// Lambert intercept: solves for the transfer orbit connecting `r1` to `r2`
/// in time `tof`, via the universal-variable formulation (Vallado's
/// algorithm, prograde short-way only; no multi-revolution search).
pub fn lambert_intercept(r1: Vec3, r2: Vec3, tof: f64, mu: f64) -> SolverResult {
    let r1_mag = r1.length();
    let r2_mag = r2.length();
    if r1_mag < 1.0 || r2_mag < 1.0 || tof <= 0.0 {
        return SolverResult::invalid();
    }

    let cos_dnu = (r1.dot(r2) / (r1_mag * r2_mag)).clamp(-1.0, 1.0);
    let cross_z = r1.cross(r2).z;
    let dnu = if cross_z >= 0.0 { cos_dnu.acos() } else { std::f64::consts::TAU - cos_dnu.acos() };

    let sin_dnu = dnu.sin();
    if sin_dnu.abs() < 1e-9 {
        return SolverResult::invalid();
    }
    // Curtis's universal-variable "A" parameter.
    let a_param = sin_dnu * (r1_mag * r2_mag / (1.0 - cos_dnu)).sqrt();

    let stumpff_c = |z: f64| -> f64 {
        if z > 1e-6 {
            (1.0 - z.sqrt().cos()) / z
        } else if z < -1e-6 {
            ((-z).sqrt().cosh() - 1.0) / (-z)
        } else {
            0.5
        }
    };
    let stumpff_s = |z: f64| -> f64 {
        if z > 1e-6 {
            let sz = z.sqrt();
            (sz - sz.sin()) / sz.powi(3)
        } else if z < -1e-6 {
            let sz = (-z).sqrt();
            (sz.sinh() - sz) / sz.powi(3)
        } else {
            1.0 / 6.0
        }
    };

    let y = |z: f64| -> f64 { r1_mag + r2_mag + a_param * (z * stumpff_s(z) - 1.0) / stumpff_c(z).sqrt() };

    let mut z = 0.0_f64;
    let mut converged = false;
    for _ in 0..100 {
        let yz = y(z);
        if yz < 0.0 {
            z += 0.1;
            continue;
        }
        let c = stumpff_c(z);
        let s = stumpff_s(z);
        let chi = (yz / c).sqrt();
        let t = (chi.powi(3) * s + a_param * yz.sqrt()) / mu.sqrt();
        let f = t - tof;
        if f.abs() < 1e-3 {
            converged = true;
            break;
        }
        // Numerical derivative for a Newton step; robust enough for the
        // single-shot planning use case here (no repeated re-solves).
        let dz = 1e-6;
        let yz2 = y(z + dz);
        let c2 = stumpff_c(z + dz);
        let s2 = stumpff_s(z + dz);
        let chi2 = (yz2 / c2).sqrt();
        let t2 = (chi2.powi(3) * s2 + a_param * yz2.sqrt()) / mu.sqrt();
        let dt_dz = (t2 - t) / dz;
        if dt_dz.abs() < 1e-12 {
            break;
        }
        z -= f / dt_dz;
    }

    if !converged {
        return SolverResult::invalid();
    }

    let yz = y(z);
    let f_coeff = 1.0 - yz / r1_mag;
    let g_coeff = a_param * (yz / mu).sqrt();
    let gdot_coeff = 1.0 - yz / r2_mag;

    let v1 = (r2 - r1 * f_coeff) / g_coeff;
    let v2 = (r2 * gdot_coeff - r1) / g_coeff;

    let mut diagnostics = HashMap::new();
    diagnostics.insert("transfer_angle_rad".into(), dnu);
    diagnostics.insert("arrival_speed_mps".into(), v2.length());
    SolverResult::from_components(v1.length(), 0.0, 0.0, {
        diagnostics.insert("departure_speed_mps".into(), v1.length());
        diagnostics
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tacsim_core::constants::{EARTH_RADIUS_M, MU_EARTH};

    #[test]
    fn test_hohmann_leo_to_higher_circular() {
        let r1 = EARTH_RADIUS_M + 400_000.0;
        let r2 = EARTH_RADIUS_M + 600_000.0;
        let v1 = (MU_EARTH / r1).sqrt();
        let result = hohmann(r1, v1, r2, MU_EARTH);
        assert!(result.valid);
        assert!(result.dv_pro > 0.0 && result.dv_pro < 200.0);
    }

    #[test]
    fn test_inclination_change_sign_matches_direction() {
        let elements = OrbitalElements {
            inc: 45.0_f64.to_radians(),
            ..Default::default()
        };
        let result = inclination_change(&elements, 7_500.0, 30.0_f64.to_radians());
        assert!(result.dv_nrm < 0.0);
    }

    #[test]
    fn test_nmc_zero_when_velocities_match() {
        use tacsim_core::types::OrbitalFrame;
        let frame = OrbitalFrame {
            prograde: Vec3::new(0.0, 1.0, 0.0),
            normal: Vec3::new(0.0, 0.0, 1.0),
            radial: Vec3::new(1.0, 0.0, 0.0),
        };
        let v = Vec3::new(0.0, 7_500.0, 0.0);
        let result = nmc(v, v, &frame);
        assert!((result.dv_total).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_inputs_report_invalid() {
        let result = hohmann(0.0, 0.0, 0.0, MU_EARTH);
        assert!(!result.valid);
    }
}
