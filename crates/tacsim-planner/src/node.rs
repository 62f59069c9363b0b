//! Maneuver node lifecycle: creation, edits, and prediction refresh.

use tacsim_core::types::{EciState, EngineParams, ManeuverNode, Vec3};
use tacsim_orbital::{compute_orbital_frame, elements_from_eci};

/// Creates a node at the given ECI state and simulated time, zero delta-V.
pub fn create_node(state: &EciState, sim_time: f64) -> ManeuverNode {
    ManeuverNode {
        target_sim_time: sim_time,
        dv_prograde: 0.0,
        dv_normal: 0.0,
        dv_radial: 0.0,
        eci_pos_at_node: state.pos,
        engine: EngineParams::default(),
        predicted_apoapsis_alt: 0.0,
        predicted_periapsis_alt: 0.0,
        burn_time_estimate_secs: 0.0,
    }
}

/// Creates a node `dt` seconds after `sim_time`, propagated along a
/// straight-line coast of the current velocity (the caller is expected to
/// refine `eci_pos_at_node` once a real coast propagation is available;
/// this seeds the node so the dialog has a starting marker immediately).
pub fn create_node_at_time(state: &EciState, sim_time: f64, dt: f64) -> ManeuverNode {
    let mut node = create_node(state, sim_time + dt);
    node.eci_pos_at_node = state.pos + state.vel * dt;
    node
}

/// Sets the node's prograde/normal/radial delta-V components.
pub fn set_node_dv(node: &mut ManeuverNode, dv_pro: f64, dv_nrm: f64, dv_rad: f64) {
    node.dv_prograde = dv_pro;
    node.dv_normal = dv_nrm;
    node.dv_radial = dv_rad;
}

/// Attaches the engine parameters snapshot and recomputes the burn-time
/// estimate from the constant-mass rocket approximation `t = dv * m / F`.
pub fn set_engine_params(node: &mut ManeuverNode, engine: EngineParams) {
    let dv = node.dv_total();
    node.burn_time_estimate_secs = if engine.thrust_n > 0.0 {
        dv * engine.mass_kg / engine.thrust_n
    } else {
        0.0
    };
    node.engine = engine;
}

/// Recomputes predicted post-burn apoapsis/periapsis by applying the node's
/// delta-V (in the orbital frame at the node's ECI position) to `vel_at_node`
/// and re-deriving orbital elements. Leaves predictions at zero if the
/// post-burn state is degenerate or hyperbolic.
pub fn update_node_prediction(node: &mut ManeuverNode, vel_at_node: Vec3, mu: f64) {
    let frame = compute_orbital_frame(node.eci_pos_at_node, vel_at_node);
    let new_vel = vel_at_node
        + frame.prograde * node.dv_prograde
        + frame.normal * node.dv_normal
        + frame.radial * node.dv_radial;
    let new_state = EciState {
        pos: node.eci_pos_at_node,
        vel: new_vel,
    };
    match elements_from_eci(&new_state, mu) {
        Ok(elems) => {
            node.predicted_apoapsis_alt = elems.apoapsis_alt;
            node.predicted_periapsis_alt = elems.periapsis_alt;
        }
        Err(_) => {
            node.predicted_apoapsis_alt = 0.0;
            node.predicted_periapsis_alt = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tacsim_core::constants::{EARTH_RADIUS_M, MU_EARTH};
    use tacsim_core::types::Vec3;

    #[test]
    fn test_create_node_at_time_coasts_position() {
        let state = EciState {
            pos: Vec3::new(7_000_000.0, 0.0, 0.0),
            vel: Vec3::new(0.0, 7_500.0, 0.0),
        };
        let node = create_node_at_time(&state, 0.0, 10.0);
        assert!((node.eci_pos_at_node.y - 75_000.0).abs() < 1e-6);
        assert_eq!(node.target_sim_time, 10.0);
    }

    #[test]
    fn test_prograde_burn_raises_apoapsis() {
        let r = EARTH_RADIUS_M + 400_000.0;
        let v = (MU_EARTH / r).sqrt();
        let mut node = create_node(
            &EciState {
                pos: Vec3::new(r, 0.0, 0.0),
                vel: Vec3::new(0.0, v, 0.0),
            },
            0.0,
        );
        set_node_dv(&mut node, 200.0, 0.0, 0.0);
        update_node_prediction(&mut node, Vec3::new(0.0, v, 0.0), MU_EARTH);
        assert!(node.predicted_apoapsis_alt > 400_000.0);
    }

    #[test]
    fn test_engine_params_sets_burn_time() {
        let mut node = ManeuverNode::default();
        set_node_dv(&mut node, 100.0, 0.0, 0.0);
        set_engine_params(
            &mut node,
            EngineParams {
                thrust_n: 1000.0,
                mass_kg: 500.0,
                label: "oms".into(),
            },
        );
        assert!((node.burn_time_estimate_secs - 50.0).abs() < 1e-9);
    }
}
