//! Two-body propagator backing `PhysicsKind::Orbital2Body`.
//!
//! A fixed-step RK4 integrator of Newtonian two-body gravity. Good enough
//! for the simulation's own substep cadence (`PHYSICS_SUBSTEP_SECS`); no
//! perturbation terms (J2, drag, third-body) are modeled.

use tacsim_core::types::{EciState, Vec3};

fn acceleration(pos: Vec3, mu: f64) -> Vec3 {
    let r = pos.length();
    pos * (-mu / (r * r * r))
}

fn derivative(state: EciState, mu: f64) -> EciState {
    EciState {
        pos: state.vel,
        vel: acceleration(state.pos, mu),
    }
}

fn add(a: EciState, b: EciState, scale: f64) -> EciState {
    EciState {
        pos: a.pos + b.pos * scale,
        vel: a.vel + b.vel * scale,
    }
}

/// Advances an ECI state by `dt` seconds under pure two-body gravity.
pub fn step_two_body(state: &EciState, dt: f64, mu: f64) -> EciState {
    let k1 = derivative(*state, mu);
    let k2 = derivative(add(*state, k1, dt / 2.0), mu);
    let k3 = derivative(add(*state, k2, dt / 2.0), mu);
    let k4 = derivative(add(*state, k3, dt), mu);

    EciState {
        pos: state.pos + (k1.pos + k2.pos * 2.0 + k3.pos * 2.0 + k4.pos) * (dt / 6.0),
        vel: state.vel + (k1.vel + k2.vel * 2.0 + k3.vel * 2.0 + k4.vel) * (dt / 6.0),
    }
}
