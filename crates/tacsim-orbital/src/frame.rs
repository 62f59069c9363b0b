//! Orbital (prograde/normal/radial) frame construction, per the glossary.

use tacsim_core::types::{OrbitalFrame, Vec3};

/// Builds the orbital frame from an ECI state: prograde along velocity,
/// normal along the angular momentum vector, radial completing the
/// right-handed triad (prograde × normal).
pub fn compute_orbital_frame(r: Vec3, v: Vec3) -> OrbitalFrame {
    let prograde = v.normalize();
    let normal = r.cross(v).normalize();
    let radial = prograde.cross(normal);
    OrbitalFrame {
        prograde,
        normal,
        radial,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_is_orthonormal() {
        let r = Vec3::new(7_000_000.0, 0.0, 0.0);
        let v = Vec3::new(0.0, 7_500.0, 0.0);
        let frame = compute_orbital_frame(r, v);
        assert!((frame.prograde.length() - 1.0).abs() < 1e-9);
        assert!((frame.normal.length() - 1.0).abs() < 1e-9);
        assert!((frame.radial.length() - 1.0).abs() < 1e-9);
        assert!(frame.prograde.dot(frame.normal).abs() < 1e-9);
        assert!(frame.prograde.dot(frame.radial).abs() < 1e-9);
    }

    #[test]
    fn test_normal_matches_angular_momentum_direction() {
        let r = Vec3::new(7_000_000.0, 0.0, 0.0);
        let v = Vec3::new(0.0, 7_500.0, 0.0);
        let frame = compute_orbital_frame(r, v);
        // Prograde equatorial orbit: angular momentum points +Z.
        assert!((frame.normal.z - 1.0).abs() < 1e-9);
    }
}
