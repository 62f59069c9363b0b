//! Auto-Pointing Controller, per §4.6.
//!
//! Pure functions: pick a unit reference direction in ECI for the selected
//! mode, then project it into the velocity-aligned physics frame to get
//! commanded alpha/yaw-offset. The engine gates when this runs (altitude,
//! lock, burn-in-progress); this module only computes the numbers.

use tacsim_core::enums::PointingMode;
use tacsim_core::types::Vec3;

/// Resolves `mode` to a unit reference direction in ECI. `target_eci` and
/// `sun_dir` are `None` when the mode doesn't need them (e.g. a `Target`
/// lock with no resolvable target falls back to prograde).
pub fn reference_direction(
    mode: PointingMode,
    r: Vec3,
    v: Vec3,
    sun_dir_eci: Option<Vec3>,
    target_eci_pos: Option<Vec3>,
) -> Vec3 {
    let prograde = v.normalize();
    let r_hat = r.normalize();
    let h = r.cross(v);
    let normal = if h.length_squared() > 0.0 {
        h.normalize()
    } else {
        Vec3::Z
    };

    match mode {
        PointingMode::Manual => prograde,
        PointingMode::Prograde => prograde,
        PointingMode::Retrograde => -prograde,
        PointingMode::Normal => normal,
        PointingMode::AntiNormal => -normal,
        PointingMode::RadialOut => prograde.cross(normal).normalize(),
        PointingMode::RadialIn => -(prograde.cross(normal).normalize()),
        PointingMode::Nadir => -r_hat,
        PointingMode::Sun => sun_dir_eci.unwrap_or(prograde),
        PointingMode::Target => target_eci_pos
            .map(|target| (target - r).normalize())
            .unwrap_or(prograde),
    }
}

/// Projects `direction` into the velocity-aligned physics frame `(v̂, û, ŵ)`
/// where `û` is the component of `r̂` orthogonal to `v̂` (re-normalized) and
/// `ŵ = v̂ × û`. Returns `(alpha_rad, yaw_offset_rad)`.
pub fn project_to_attitude(direction: Vec3, r: Vec3, v: Vec3) -> (f64, f64) {
    let v_hat = v.normalize();
    let r_hat = r.normalize();
    let u_raw = r_hat - v_hat * r_hat.dot(v_hat);
    let u_hat = if u_raw.length_squared() > 1e-12 {
        u_raw.normalize()
    } else {
        // r nearly parallel to v (degenerate): pick any vector orthogonal to v.
        v_hat.cross(Vec3::Z).normalize()
    };
    let w_hat = v_hat.cross(u_hat);

    let b_v = direction.dot(v_hat);
    let b_u = direction.dot(u_hat);
    let b_w = direction.dot(w_hat);

    let alpha = b_u.atan2(b_v.hypot(b_w));
    let yaw_offset = b_w.atan2(b_v);
    (alpha, yaw_offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prograde_direction_is_velocity_unit_vector() {
        let r = Vec3::new(7_000_000.0, 0.0, 0.0);
        let v = Vec3::new(0.0, 7_500.0, 0.0);
        let dir = reference_direction(PointingMode::Prograde, r, v, None, None);
        assert!((dir - v.normalize()).length() < 1e-9);
    }

    #[test]
    fn test_nadir_points_toward_center() {
        let r = Vec3::new(7_000_000.0, 0.0, 0.0);
        let v = Vec3::new(0.0, 7_500.0, 0.0);
        let dir = reference_direction(PointingMode::Nadir, r, v, None, None);
        assert!((dir - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn test_prograde_projects_to_zero_alpha_zero_yaw() {
        let r = Vec3::new(7_000_000.0, 1_000.0, 0.0);
        let v = Vec3::new(0.0, 7_500.0, 0.0);
        let dir = reference_direction(PointingMode::Prograde, r, v, None, None);
        let (alpha, yaw) = project_to_attitude(dir, r, v);
        assert!(alpha.abs() < 1e-9);
        assert!(yaw.abs() < 1e-9);
    }

    #[test]
    fn test_retrograde_projects_to_pi_yaw() {
        let r = Vec3::new(7_000_000.0, 1_000.0, 0.0);
        let v = Vec3::new(0.0, 7_500.0, 0.0);
        let dir = reference_direction(PointingMode::Retrograde, r, v, None, None);
        let (_alpha, yaw) = project_to_attitude(dir, r, v);
        assert!((yaw.abs() - std::f64::consts::PI).abs() < 1e-9);
    }

    #[test]
    fn test_target_falls_back_to_prograde_when_unresolved() {
        let r = Vec3::new(7_000_000.0, 0.0, 0.0);
        let v = Vec3::new(0.0, 7_500.0, 0.0);
        let dir = reference_direction(PointingMode::Target, r, v, None, None);
        assert!((dir - v.normalize()).length() < 1e-9);
    }
}
