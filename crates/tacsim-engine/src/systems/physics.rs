//! Non-player physics system — advances every enabled, non-hijacked entity's
//! `EntityState` by one substep. Dispatches on `PhysicsKind`: a simple
//! constant-heading/speed kinematic integrator for `Flight3Dof`, two-body
//! propagation for `Orbital2Body`, and a no-op for `StaticGround`.

use hecs::World;

use tacsim_core::components::{EntityState, PhysicsComponent};
use tacsim_core::constants::{EARTH_RADIUS_M, MU_EARTH};
use tacsim_core::enums::PhysicsKind;
use tacsim_core::types::{EciState, GeodeticPosition};

use tacsim_orbital::{eci_to_geodetic_gmst0, elements_from_eci, geodetic_to_eci, step_two_body};

/// Advances every non-hijacked entity's state by `dt` simulated seconds.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, (physics, state)) in world.query_mut::<(&PhysicsComponent, &mut EntityState)>() {
        if !physics.enabled {
            continue;
        }
        match physics.kind {
            PhysicsKind::Flight3Dof => step_flight3dof(state, dt),
            PhysicsKind::Orbital2Body => step_orbital(state, dt),
            PhysicsKind::StaticGround => {}
        }
    }
}

pub(crate) fn step_flight3dof(state: &mut EntityState, dt: f64) {
    let ground_speed = state.speed_mps * state.gamma_rad.cos();
    let climb_rate = state.speed_mps * state.gamma_rad.sin();
    let distance = ground_speed * dt;
    let delta_lat = distance * state.heading_rad.cos() / EARTH_RADIUS_M;
    let delta_lon = distance * state.heading_rad.sin()
        / (EARTH_RADIUS_M * state.position.lat.cos()).max(1.0);

    state.position.lat += delta_lat;
    state.position.lon += delta_lon;
    state.position.alt += climb_rate * dt;
}

pub(crate) fn step_orbital(state: &mut EntityState, dt: f64) {
    let eci = state.eci.unwrap_or_else(|| {
        geodetic_to_eci(&state.position, state.speed_mps, state.heading_rad, state.gamma_rad, 0.0)
    });
    let next: EciState = step_two_body(&eci, dt, MU_EARTH);
    state.eci = Some(next);
    state.position = eci_to_geodetic_gmst0(next.pos);
    if let Ok(elements) = elements_from_eci(&next, MU_EARTH) {
        state.speed_mps = next.vel.length();
        state.orbital = Some(elements);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tacsim_core::enums::PhysicsKind;

    #[test]
    fn test_static_ground_entity_does_not_move() {
        let mut world = World::new();
        let start = GeodeticPosition::new(0.1, 0.2, 0.0);
        let entity = world.spawn((
            PhysicsComponent {
                kind: PhysicsKind::StaticGround,
                ..Default::default()
            },
            EntityState {
                position: start,
                ..Default::default()
            },
        ));
        run(&mut world, 1.0);
        assert_eq!(world.get::<&EntityState>(entity).unwrap().position, start);
    }

    #[test]
    fn test_flight3dof_moves_along_heading() {
        let mut world = World::new();
        let entity = world.spawn((
            PhysicsComponent {
                kind: PhysicsKind::Flight3Dof,
                ..Default::default()
            },
            EntityState {
                position: GeodeticPosition::new(0.0, 0.0, 1000.0),
                speed_mps: 250.0,
                heading_rad: 0.0,
                ..Default::default()
            },
        ));
        run(&mut world, 1.0);
        let state = world.get::<&EntityState>(entity).unwrap();
        assert!(state.position.lat > 0.0);
        assert!((state.position.lon).abs() < 1e-9);
    }

    #[test]
    fn test_disabled_physics_is_skipped() {
        let mut world = World::new();
        let start = GeodeticPosition::new(0.0, 0.0, 1000.0);
        let entity = world.spawn((
            PhysicsComponent {
                enabled: false,
                kind: PhysicsKind::Flight3Dof,
                ..Default::default()
            },
            EntityState {
                position: start,
                speed_mps: 250.0,
                ..Default::default()
            },
        ));
        run(&mut world, 1.0);
        assert_eq!(world.get::<&EntityState>(entity).unwrap().position, start);
    }
}
