//! Maneuver Auto-Executor, per §4.5 — the hardest sub-module.
//!
//! State machine `Idle -> {WarpOnly, Warping} -> Burning -> Idle`, driven
//! per tick by `tick()`. Delta-V itself always comes from `tacsim-planner`;
//! this module only decides when to start/stop thrusting and how fast to
//! warp while doing it.

use tacsim_core::components::EntityState;
use tacsim_core::constants::{
    AUTOEXEC_BURN_END_FACTOR, AUTOEXEC_FINITE_BURN_LOSS_WARP, AUTOEXEC_NEGLIGIBLE_DV,
    AUTOEXEC_SAFETY_DV_FACTOR, CIRCULARIZE_PROXIMITY_M, CIRCULARIZE_PROXIMITY_STEP_M,
    EARTH_RADIUS_M, MU_EARTH, NOMINAL_TICK_RATE,
};
use tacsim_core::enums::{AutoExecMode, AutoExecState};
use tacsim_core::types::{EciState, ManeuverNode, ManeuverTarget};

use crate::clock::WarpClock;

/// Result of a tick that the engine surfaces to the host as a `SimEvent`.
pub enum AutoExecOutcome {
    None,
    BurnComplete { node_label: String },
    BurnCancelled { reason: String },
}

#[derive(Default)]
pub struct AutoExecutor {
    state: AutoExecState,
    node: Option<ManeuverNode>,
    mode: Option<AutoExecMode>,
    target: Option<ManeuverTarget>,
    cum_dv: f64,
    burn_end_time: f64,
    dv_sign: f64,
    pending_hohmann_target_alt_km: Option<f64>,
}

impl AutoExecutor {
    pub fn state(&self) -> AutoExecState {
        self.state
    }

    pub fn is_burning(&self) -> bool {
        self.state == AutoExecState::Burning
    }

    /// `start(node, mode, target?)`, per §4.5. Zeroes commanded outputs,
    /// unpauses, and sets warp to the altitude-aware ceiling.
    pub fn start(
        &mut self,
        node: ManeuverNode,
        mode: AutoExecMode,
        target: Option<ManeuverTarget>,
        hohmann_target_alt_km: Option<f64>,
        clock: &mut WarpClock,
        altitude_m: f64,
        entity_state: &mut EntityState,
    ) {
        entity_state.throttle = 0.0;
        entity_state.alpha_rad = 0.0;
        entity_state.yaw_offset_rad = 0.0;
        clock.resume();
        clock.set_warp(WarpClock::warp_ceiling(altitude_m), altitude_m);
        self.node = Some(node);
        self.mode = Some(mode);
        self.target = target;
        self.cum_dv = 0.0;
        self.pending_hohmann_target_alt_km = hohmann_target_alt_km;
        self.state = match mode {
            AutoExecMode::WarpOnly => AutoExecState::WarpOnly,
            AutoExecMode::Warping => AutoExecState::Warping,
        };
    }

    /// Cancel key: zero throttle/attitude, clear state, reset warp to 1.
    pub fn cancel(&mut self, clock: &mut WarpClock, entity_state: &mut EntityState) {
        entity_state.throttle = 0.0;
        entity_state.alpha_rad = 0.0;
        entity_state.yaw_offset_rad = 0.0;
        entity_state.engine_on = false;
        clock.warp = 1.0;
        self.state = AutoExecState::Idle;
        self.node = None;
        self.pending_hohmann_target_alt_km = None;
    }

    /// Advances the state machine by one tick.
    pub fn tick(
        &mut self,
        frame_sdt: f64,
        sim_time: f64,
        clock: &mut WarpClock,
        altitude_m: f64,
        eci: Option<EciState>,
        entity_state: &mut EntityState,
    ) -> AutoExecOutcome {
        match self.state {
            AutoExecState::Idle => AutoExecOutcome::None,
            AutoExecState::WarpOnly | AutoExecState::Warping => {
                self.tick_warping(sim_time, clock, altitude_m, entity_state)
            }
            AutoExecState::Burning => {
                let Some(eci) = eci else {
                    return AutoExecOutcome::None;
                };
                self.tick_burning(frame_sdt, sim_time, clock, altitude_m, eci, entity_state)
            }
        }
    }

    fn tick_warping(
        &mut self,
        sim_time: f64,
        clock: &mut WarpClock,
        altitude_m: f64,
        entity_state: &mut EntityState,
    ) -> AutoExecOutcome {
        clock.set_warp(WarpClock::warp_ceiling(altitude_m), altitude_m);
        let node = self.node.as_ref().expect("warping state always holds a node");
        let burn_start = node.target_sim_time - node.burn_time_estimate_secs / 2.0;
        if sim_time < burn_start {
            return AutoExecOutcome::None;
        }

        if self.state == AutoExecState::WarpOnly {
            clock.warp = 1.0;
            self.state = AutoExecState::Idle;
            self.node = None;
            return AutoExecOutcome::None;
        }

        if node.dv_total() < AUTOEXEC_NEGLIGIBLE_DV {
            clock.warp = 1.0;
            let label = node.engine.label.clone();
            self.state = AutoExecState::Idle;
            self.node = None;
            return AutoExecOutcome::BurnComplete { node_label: label };
        }

        self.dv_sign = if node.dv_prograde >= 0.0 { 1.0 } else { -1.0 };
        self.cum_dv = 0.0;
        self.burn_end_time = sim_time + AUTOEXEC_BURN_END_FACTOR * node.burn_time_estimate_secs;
        entity_state.throttle = 1.0;
        entity_state.engine_on = true;
        clock.warp = 1.0;
        self.state = AutoExecState::Burning;
        AutoExecOutcome::None
    }

    fn tick_burning(
        &mut self,
        frame_sdt: f64,
        sim_time: f64,
        clock: &mut WarpClock,
        altitude_m: f64,
        eci: EciState,
        entity_state: &mut EntityState,
    ) -> AutoExecOutcome {
        let node = self.node.clone().expect("burning state always holds a node");

        let frame = tacsim_orbital::compute_orbital_frame(eci.pos, eci.vel);
        let direction = (frame.prograde * node.dv_prograde
            + frame.normal * node.dv_normal
            + frame.radial * node.dv_radial)
            .normalize_or_zero();
        let (alpha, yaw) = crate::pointing::project_to_attitude(direction, eci.pos, eci.vel);
        entity_state.alpha_rad = alpha;
        entity_state.yaw_offset_rad = yaw;

        let accel = if node.engine.mass_kg > 0.0 {
            node.engine.thrust_n / node.engine.mass_kg
        } else {
            0.0
        };

        let remaining = (node.dv_total() - self.cum_dv).max(0.0);
        let nominal_rdt = 1.0 / NOMINAL_TICK_RATE as f64;
        let mut desired_warp = if remaining > 0.0 && accel > 0.0 {
            (remaining / (accel * nominal_rdt)).max(1.0)
        } else {
            AUTOEXEC_FINITE_BURN_LOSS_WARP
        };

        let elements_result = tacsim_orbital::elements_from_eci(&eci, MU_EARTH);
        let mut target_done = false;
        match (&self.target, &elements_result) {
            (Some(ManeuverTarget::Circularize { target_r_m }), Ok(elements)) => {
                let diff = (elements.sma - *target_r_m).abs();
                if diff < CIRCULARIZE_PROXIMITY_M {
                    desired_warp = desired_warp.min((diff / CIRCULARIZE_PROXIMITY_STEP_M).floor().max(1.0));
                }
                target_done = if self.dv_sign >= 0.0 {
                    elements.sma >= *target_r_m
                } else {
                    elements.sma <= *target_r_m
                };
            }
            (Some(ManeuverTarget::RaiseApo { alt_m }), Ok(elements)) => {
                target_done = elements.apoapsis_alt >= *alt_m;
            }
            (Some(ManeuverTarget::LowerPe { alt_m }), Ok(elements)) => {
                target_done = elements.periapsis_alt <= *alt_m;
            }
            (Some(_), Err(_)) => {
                // OrbitalUpdateFailed recovery (§7): clear polylines, keep burning.
                entity_state.current_orbit_positions.clear();
                entity_state.eci_orbit_positions.clear();
            }
            (None, _) => {}
        }
        clock.warp = desired_warp.clamp(1.0, WarpClock::warp_ceiling(altitude_m));

        self.cum_dv += accel * frame_sdt;

        let safety_done = self.cum_dv >= AUTOEXEC_SAFETY_DV_FACTOR * node.dv_total();
        let time_done = sim_time >= self.burn_end_time;
        let absent_target_done = self.target.is_none() && self.cum_dv >= node.dv_total();

        if !(target_done || safety_done || time_done || absent_target_done) {
            return AutoExecOutcome::None;
        }

        entity_state.throttle = 0.0;
        entity_state.alpha_rad = 0.0;
        entity_state.yaw_offset_rad = 0.0;
        entity_state.engine_on = false;
        self.state = AutoExecState::Idle;
        self.node = None;
        let node_label = node.engine.label.clone();

        if let Some(alt_km) = self.pending_hohmann_target_alt_km.take() {
            match self.start_hohmann_chain(alt_km, &eci, &node, sim_time, clock, altitude_m, entity_state) {
                Ok(()) => AutoExecOutcome::None,
                Err(reason) => {
                    clock.warp = 1.0;
                    AutoExecOutcome::BurnCancelled { reason }
                }
            }
        } else {
            AutoExecOutcome::BurnComplete { node_label }
        }
    }

    /// Two-burn Hohmann chaining (§4.5). Re-reads post-burn elements,
    /// targets whichever apsis is closer to the requested altitude, and
    /// issues a circularize burn there.
    #[allow(clippy::too_many_arguments)]
    fn start_hohmann_chain(
        &mut self,
        target_alt_km: f64,
        eci: &EciState,
        burn1_node: &ManeuverNode,
        sim_time: f64,
        clock: &mut WarpClock,
        altitude_m: f64,
        entity_state: &mut EntityState,
    ) -> Result<(), String> {
        let elements =
            tacsim_orbital::elements_from_eci(eci, MU_EARTH).map_err(|e| e.to_string())?;
        if elements.ecc >= 1.0 {
            return Err("post-burn orbit unbound".to_string());
        }

        let target_r = EARTH_RADIUS_M + target_alt_km * 1000.0;
        let apo_r = EARTH_RADIUS_M + elements.apoapsis_alt;
        let peri_r = EARTH_RADIUS_M + elements.periapsis_alt;
        let (apsis_r, time_to_apsis) = if (apo_r - target_r).abs() <= (peri_r - target_r).abs() {
            (apo_r, elements.time_to_apoapsis)
        } else {
            (peri_r, elements.time_to_periapsis)
        };
        let time_to_apsis = if time_to_apsis.is_finite() {
            time_to_apsis
        } else {
            elements.period / 2.0
        };

        let v_current = tacsim_orbital::vis_viva_speed(apsis_r, elements.sma, MU_EARTH);
        let v_target = tacsim_orbital::vis_viva_speed(apsis_r, target_r, MU_EARTH);
        let dv = v_target - v_current;

        let mut node2 = tacsim_planner::create_node_at_time(eci, sim_time, time_to_apsis);
        tacsim_planner::set_node_dv(&mut node2, dv, 0.0, 0.0);
        tacsim_planner::set_engine_params(&mut node2, burn1_node.engine.clone());

        self.start(
            node2,
            AutoExecMode::Warping,
            Some(ManeuverTarget::Circularize { target_r_m: target_r }),
            None,
            clock,
            altitude_m,
            entity_state,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tacsim_core::types::EngineParams;

    fn flat_node(dv_pro: f64) -> ManeuverNode {
        ManeuverNode {
            target_sim_time: 100.0,
            dv_prograde: dv_pro,
            dv_normal: 0.0,
            dv_radial: 0.0,
            eci_pos_at_node: tacsim_core::types::Vec3::new(7_000_000.0, 0.0, 0.0),
            engine: EngineParams {
                thrust_n: 1000.0,
                mass_kg: 100.0,
                label: "test burn".to_string(),
            },
            predicted_apoapsis_alt: 0.0,
            predicted_periapsis_alt: 0.0,
            burn_time_estimate_secs: 10.0,
        }
    }

    #[test]
    fn test_start_sets_warping_state_and_zeros_outputs() {
        let mut exec = AutoExecutor::default();
        let mut clock = WarpClock::default();
        let mut state = EntityState {
            throttle: 0.7,
            ..Default::default()
        };
        exec.start(flat_node(100.0), AutoExecMode::Warping, None, None, &mut clock, 400_000.0, &mut state);
        assert_eq!(exec.state(), AutoExecState::Warping);
        assert_eq!(state.throttle, 0.0);
        assert!(clock.warp > 1.0);
    }

    #[test]
    fn test_cancel_resets_warp_and_clears_node() {
        let mut exec = AutoExecutor::default();
        let mut clock = WarpClock::default();
        let mut state = EntityState::default();
        exec.start(flat_node(100.0), AutoExecMode::Warping, None, None, &mut clock, 400_000.0, &mut state);
        exec.cancel(&mut clock, &mut state);
        assert_eq!(exec.state(), AutoExecState::Idle);
        assert_eq!(clock.warp, 1.0);
    }

    #[test]
    fn test_warping_enters_burning_at_burn_start() {
        let mut exec = AutoExecutor::default();
        let mut clock = WarpClock::default();
        let mut state = EntityState::default();
        exec.start(flat_node(100.0), AutoExecMode::Warping, None, None, &mut clock, 400_000.0, &mut state);
        // burn_start = 100 - 10/2 = 95
        exec.tick(0.0, 95.0, &mut clock, 400_000.0, None, &mut state);
        assert_eq!(exec.state(), AutoExecState::Burning);
        assert_eq!(state.throttle, 1.0);
        assert_eq!(clock.warp, 1.0);
    }

    #[test]
    fn test_absent_target_terminates_on_cumulative_dv() {
        let mut exec = AutoExecutor::default();
        let mut clock = WarpClock::default();
        let mut state = EntityState::default();
        exec.start(flat_node(10.0), AutoExecMode::Warping, None, None, &mut clock, 400_000.0, &mut state);
        exec.tick(0.0, 95.0, &mut clock, 400_000.0, None, &mut state);
        assert!(exec.is_burning());

        let eci = EciState {
            pos: tacsim_core::types::Vec3::new(7_000_000.0, 0.0, 0.0),
            vel: tacsim_core::types::Vec3::new(0.0, 7_500.0, 0.0),
        };
        // accel = 1000/100 = 10 m/s^2; need cum_dv >= 10 -> sdt >= 1.0s
        let outcome = exec.tick(1.5, 96.0, &mut clock, 400_000.0, Some(eci), &mut state);
        assert!(matches!(outcome, AutoExecOutcome::BurnComplete { .. }));
        assert_eq!(exec.state(), AutoExecState::Idle);
        assert_eq!(state.throttle, 0.0);
    }
}
