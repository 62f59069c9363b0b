//! Simulation engine — the core of the simulator.
//!
//! `SimulationEngine` owns the world registry, processes player commands,
//! runs all systems in declared order, and produces `WorldSnapshot`s.
//! Completely headless (no Tauri dependency), enabling deterministic
//! testing.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use tacsim_core::commands::PlayerCommand;
use tacsim_core::components::EntityState;
use tacsim_core::constants::AUTO_POINT_MIN_ALT_M;
use tacsim_core::enums::{PhysicsKind, PointingMode, SimPhase, VizGlobalFlag, VizGroupKey};
use tacsim_core::error::ErrorKind;
use tacsim_core::events::{Alert, SimEvent};
use tacsim_core::preferences::Preferences;
use tacsim_core::state::{EngagementCyberScore, WorldSnapshot};
use tacsim_core::types::{GeodeticPosition, SimTime};
use tacsim_orbital::{EphemerisSunProvider, SunProvider};
use tacsim_terrain::{ElevationProvider, TerrainGrid};

use crate::autoexec::{AutoExecOutcome, AutoExecutor};
use crate::clock::WarpClock;
use crate::player::{self, PlayerContext};
use crate::pointing;
use crate::systems;
use crate::systems::comm::CommRouter;
use crate::terrain_follow::TerrainFollowAutopilot;
use crate::viz::{AnalyticsRing, EngagementCyberScanner, VizPlane};
use crate::world::WorldRegistry;

/// Proportional gain applied to the terrain-following altitude-hold error
/// to produce a commanded flight-path angle. Not part of any external
/// physics integrator — this engine owns the player's substep loop.
const ALTITUDE_HOLD_GAIN_PER_M: f64 = 0.0005;
const MAX_HOLD_GAMMA_RAD: f64 = 0.3;

const MAX_PITCH_RAD: f64 = 0.5;
const MAX_ROLL_RAD: f64 = 1.0;
const YAW_RATE_RAD_S: f64 = 0.5;
const THROTTLE_RATE_PER_S: f64 = 0.5;

/// A stand-in elevation provider for when no terrain grid has been loaded;
/// `TerrainFollowAutopilot::tick` always wants a `&dyn ElevationProvider`.
struct NoTerrainProvider;

impl ElevationProvider for NoTerrainProvider {
    fn elevation_at(&self, _pos: &GeodeticPosition) -> Option<f64> {
        None
    }
}

/// Raw control-axis state held between commands, per §4.4's "Input & Control
/// Mux" — keyboard/gamepad state persists until the host sends a new value.
#[derive(Debug, Clone, Default)]
struct ControlInputs {
    pitch: f64,
    roll: f64,
    yaw: f64,
    throttle_up: bool,
    throttle_down: bool,
    throttle_set: Option<f64>,
}

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// The simulation engine. Owns the world registry and all sim state.
pub struct SimulationEngine {
    registry: WorldRegistry,
    clock: WarpClock,
    time: SimTime,
    phase: SimPhase,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,

    player: Option<PlayerContext>,
    controls: ControlInputs,
    auto_exec: AutoExecutor,
    terrain_follow: TerrainFollowAutopilot,
    terrain: Option<TerrainGrid>,
    sun_provider: Box<dyn SunProvider>,

    viz: VizPlane,
    scanner: EngagementCyberScanner,
    analytics: AnalyticsRing,
    comm_router: CommRouter,
    score: EngagementCyberScore,
    preferences: Preferences,

    pending_alerts: Vec<Alert>,
    pending_events: Vec<SimEvent>,
}

impl SimulationEngine {
    pub fn new(config: SimConfig) -> Self {
        Self {
            registry: WorldRegistry::new(),
            clock: WarpClock::default(),
            time: SimTime::default(),
            phase: SimPhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            player: None,
            controls: ControlInputs::default(),
            auto_exec: AutoExecutor::default(),
            terrain_follow: TerrainFollowAutopilot::default(),
            terrain: None,
            sun_provider: Box::new(EphemerisSunProvider),
            viz: VizPlane::default(),
            scanner: EngagementCyberScanner::default(),
            analytics: AnalyticsRing::default(),
            comm_router: CommRouter::default(),
            score: EngagementCyberScore::default(),
            preferences: Preferences::default(),
            pending_alerts: Vec::new(),
            pending_events: Vec::new(),
        }
    }

    /// Installs a terrain provider (e.g. a loaded `TerrainGrid`); without
    /// one, terrain-following and line-of-sight queries fall back to sea
    /// level, per §4.7's "Failure mode" clause.
    pub fn set_terrain(&mut self, terrain: Option<TerrainGrid>) {
        self.terrain = terrain;
    }

    /// Overrides the default heliocentric-ephemeris sun provider, per
    /// §6's "if available from the renderer" clause.
    pub fn set_sun_provider(&mut self, provider: Box<dyn SunProvider>) {
        self.sun_provider = provider;
    }

    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// `init(scenarioUrl, playerId | "__observer__", rendererHandle)`, per
    /// §6's CLI/launch surface. Scenario-file parsing is an external
    /// collaborator (§1 non-goals); this always builds the default mission
    /// roster via `world_setup::setup_mission`.
    pub fn init(&mut self, preferred_player_id: Option<&str>) -> Result<(), ErrorKind> {
        self.registry = WorldRegistry::new();
        self.time = SimTime::default();
        self.score = EngagementCyberScore::default();
        self.analytics = AnalyticsRing::default();
        self.scanner = EngagementCyberScanner::default();
        self.comm_router = CommRouter::default();
        self.player = None;
        self.auto_exec = AutoExecutor::default();
        self.terrain_follow = TerrainFollowAutopilot::default();

        crate::world_setup::setup_mission(&mut self.registry, &mut self.rng)
            .map_err(|e| ErrorKind::ScenarioLoadFailed(e.to_string()))?;

        if preferred_player_id != Some("__observer__") {
            match player::select_player(&self.registry, preferred_player_id) {
                Some(entity) => {
                    let ctx = player::assume_control(&mut self.registry, None, entity)?;
                    self.player = Some(ctx);
                }
                None => return Err(ErrorKind::NoControllableEntity),
            }
        }

        self.phase = SimPhase::Active;
        Ok(())
    }

    fn push_alert(&mut self, message: impl Into<String>) {
        self.pending_alerts.push(Alert {
            level: tacsim_core::enums::AlertLevel::Warning,
            message: message.into(),
            tick: self.time.tick,
        });
    }

    /// Advance the simulation by `rdt` real-elapsed seconds and return the
    /// resulting snapshot.
    pub fn tick(&mut self, rdt: f64) -> WorldSnapshot {
        self.process_commands();

        if self.phase == SimPhase::Active {
            self.run_active_tick(rdt);
        }

        let alerts = std::mem::take(&mut self.pending_alerts);
        let events = std::mem::take(&mut self.pending_events);
        systems::snapshot::build_snapshot(
            &self.registry,
            self.time,
            self.phase,
            self.player.as_ref(),
            &self.analytics,
            &self.score,
            alerts,
            events,
        )
    }

    fn run_active_tick(&mut self, rdt: f64) {
        let sdt = self.clock.tick(rdt);
        self.time.advance(sdt);
        if sdt <= 0.0 {
            return;
        }

        let altitude_m = self
            .player
            .as_ref()
            .and_then(|p| self.registry.ecs.get::<&EntityState>(p.entity).ok())
            .map(|s| s.position.alt)
            .unwrap_or(0.0);

        self.tick_auto_exec(sdt, altitude_m);
        self.tick_auto_pointing(altitude_m);
        self.tick_player_physics(sdt);

        systems::ai::run(&mut self.registry.ecs, self.time.tick, sdt);
        systems::physics::run(&mut self.registry.ecs, sdt);
        systems::cyber::run(&mut self.registry.ecs, &mut self.rng);
        let comm_active_links = self.comm_router.tick(&self.registry.ecs, &mut self.rng);
        systems::cleanup::run(
            &mut self.registry,
            self.player.as_ref().map(|p| p.entity),
            &mut self.despawn_buffer,
        );

        let player_id = self.player.as_ref().map(|p| p.entity_id.as_str());
        self.scanner.tick(sdt, self.time.tick, &self.registry, player_id, &mut self.score);
        self.viz.apply(&mut self.registry, self.player.as_ref().map(|p| p.entity));
        self.analytics.tick(
            sdt,
            self.time.elapsed_secs,
            &self.registry,
            comm_active_links,
            self.comm_router.delivery_rate(),
            self.comm_router.latency_secs(),
        );
    }

    fn tick_auto_exec(&mut self, sdt: f64, altitude_m: f64) {
        let Some(player) = self.player.as_ref() else { return };
        let entity = player.entity;
        let Ok(mut state) = self.registry.ecs.get::<&mut EntityState>(entity) else { return };
        let eci = state.eci;
        let outcome = self.auto_exec.tick(sdt, self.time.elapsed_secs, &mut self.clock, altitude_m, eci, &mut state);
        drop(state);

        if let Some(player) = self.player.as_mut() {
            player.auto_exec_state = self.auto_exec.state();
        }

        match outcome {
            AutoExecOutcome::None => {}
            AutoExecOutcome::BurnComplete { node_label } => {
                self.push_alert(format!("burn complete: {node_label}"));
                self.pending_events.push(SimEvent::BurnComplete { node_label });
            }
            AutoExecOutcome::BurnCancelled { reason } => {
                self.push_alert(format!("burn cancelled: {reason}"));
                self.pending_events.push(SimEvent::BurnCancelled { reason });
            }
        }
    }

    /// Auto-Pointing Controller, per §4.6: gates on mode/lock/altitude/burn
    /// state, then projects a reference direction into commanded attitude.
    fn tick_auto_pointing(&mut self, altitude_m: f64) {
        let Some(player) = self.player.as_ref() else { return };
        if player.pointing_mode == PointingMode::Manual
            || !player.pointing_locked
            || altitude_m <= AUTO_POINT_MIN_ALT_M
            || self.auto_exec.is_burning()
        {
            return;
        }

        let entity = player.entity;
        let Ok(state) = self.registry.ecs.get::<&EntityState>(entity) else { return };
        let Some(eci) = state.eci else { return };
        drop(state);

        let sun_dir = if player.pointing_mode == PointingMode::Sun {
            Some(self.sun_provider.sun_direction_eci(self.time.julian_date()))
        } else {
            None
        };
        let target_eci = player.pointing_target_id.as_ref().and_then(|id| {
            let target_entity = self.registry.get_entity(id)?;
            self.registry.ecs.get::<&EntityState>(target_entity).ok()?.eci.map(|e| e.pos)
        });

        let direction = pointing::reference_direction(player.pointing_mode, eci.pos, eci.vel, sun_dir, target_eci);
        let (alpha, yaw) = pointing::project_to_attitude(direction, eci.pos, eci.vel);

        if let Ok(mut state) = self.registry.ecs.get::<&mut EntityState>(entity) {
            state.alpha_rad = alpha;
            state.yaw_offset_rad = yaw;
        }
    }

    /// Applies the player's raw control inputs, the terrain-following
    /// altitude-hold setpoint, and substeps the player's own physics
    /// integrator (§4.1's substepping rule, applied here since the player
    /// is excluded from `systems::physics::run` once hijacked).
    fn tick_player_physics(&mut self, sdt: f64) {
        let Some(player) = self.player.as_ref() else { return };
        let entity = player.entity;
        let physics_kind = self
            .registry
            .ecs
            .get::<&tacsim_core::components::PhysicsComponent>(entity)
            .map(|p| p.kind)
            .unwrap_or_default();
        let burning = self.auto_exec.is_burning();

        if player.terrain_following_enabled && !burning {
            let (position, heading) = {
                let Ok(state) = self.registry.ecs.get::<&EntityState>(entity) else { return };
                (state.position, state.heading_rad)
            };
            let fallback = NoTerrainProvider;
            let provider: &dyn ElevationProvider =
                self.terrain.as_ref().map(|g| g as &dyn ElevationProvider).unwrap_or(&fallback);
            if let Some(reason) = self.terrain_follow.tick(sdt, &position, heading, provider) {
                self.pending_events.push(SimEvent::TerrainFollowingDisabled { reason: reason.clone() });
                self.push_alert(reason);
                if let Some(player) = self.player.as_mut() {
                    player.terrain_following_enabled = false;
                }
            } else if let Some(setpoint) = self.terrain_follow.altitude_hold_setpoint_m() {
                if let Ok(mut state) = self.registry.ecs.get::<&mut EntityState>(entity) {
                    let error = setpoint - state.position.alt;
                    state.gamma_rad = (error * ALTITUDE_HOLD_GAIN_PER_M).clamp(-MAX_HOLD_GAMMA_RAD, MAX_HOLD_GAMMA_RAD);
                }
            }
        }

        if let Ok(mut state) = self.registry.ecs.get::<&mut EntityState>(entity) {
            apply_flight_controls(&mut state, &self.controls, sdt, burning);
        }

        let (num_steps, sub_dt) = WarpClock::substeps(sdt);
        for _ in 0..num_steps {
            if let Ok(mut state) = self.registry.ecs.get::<&mut EntityState>(entity) {
                match physics_kind {
                    PhysicsKind::Flight3Dof => systems::physics::step_flight3dof(&mut state, sub_dt),
                    PhysicsKind::Orbital2Body => systems::physics::step_orbital(&mut state, sub_dt),
                    PhysicsKind::StaticGround => {}
                }
            }
        }
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartMission { scenario_url } => {
                tracing::info!(scenario_url, "starting mission");
                if matches!(self.phase, SimPhase::MainMenu | SimPhase::Briefing | SimPhase::Complete) {
                    if let Err(e) = self.init(None) {
                        self.pending_events.push(SimEvent::InitFailed { reason: e.to_string() });
                    }
                }
            }
            PlayerCommand::Pause => {
                if self.phase == SimPhase::Active {
                    self.phase = SimPhase::Paused;
                    self.clock.pause();
                }
            }
            PlayerCommand::Resume => {
                if self.phase == SimPhase::Paused {
                    self.phase = SimPhase::Active;
                    self.clock.resume();
                }
            }
            PlayerCommand::SetTimeScale { scale } => {
                let altitude_m = self.player_altitude_m();
                self.clock.set_warp(scale, altitude_m);
            }
            PlayerCommand::AssumeControl { entity_id } => {
                self.handle_assume_control(&entity_id);
            }
            PlayerCommand::EnterObserverMode => {
                if let Some(ctx) = self.player.take() {
                    player::release_player(&mut self.registry, &ctx);
                }
            }
            PlayerCommand::FlightControls { pitch, roll, yaw, throttle_up, throttle_down, throttle_set } => {
                self.controls = ControlInputs { pitch, roll, yaw, throttle_up, throttle_down, throttle_set };
            }
            PlayerCommand::ToggleEngine => {
                if let Some(player) = &self.player {
                    if let Ok(mut state) = self.registry.ecs.get::<&mut EntityState>(player.entity) {
                        state.engine_on = !state.engine_on;
                    }
                }
            }
            PlayerCommand::SetGearDown { down } => {
                if let Some(player) = &self.player {
                    if let Ok(mut state) = self.registry.ecs.get::<&mut EntityState>(player.entity) {
                        state.gear_down = down;
                    }
                }
            }
            PlayerCommand::SetPropulsionMode { index } => {
                if let Some(player) = self.player.as_mut() {
                    player.propulsion_selected = index;
                    if let Ok(mut propulsion) =
                        self.registry.ecs.get::<&mut tacsim_core::components::PropulsionComponent>(player.entity)
                    {
                        propulsion.selected = index;
                        if let Some(tacsim_core::enums::PropulsionMode::Rocket { thrust_n, .. }) =
                            propulsion.modes.get(index)
                        {
                            player.engine_thrust_n = *thrust_n;
                        }
                    }
                }
            }
            PlayerCommand::SetGlobeControlsEnabled { enabled } => {
                if let Some(player) = self.player.as_mut() {
                    player.globe_controls_enabled = enabled;
                }
            }
            PlayerCommand::SetPointingMode { mode, lock, target_id } => {
                if let Some(player) = self.player.as_mut() {
                    player.pointing_mode = mode;
                    player.pointing_locked = lock;
                    player.pointing_target_id = target_id;
                }
            }
            PlayerCommand::StartAutoExec { node, mode, target, hohmann_target_alt_km } => {
                let altitude_m = self.player_altitude_m();
                if let Some(player) = &self.player {
                    if let Ok(mut state) = self.registry.ecs.get::<&mut EntityState>(player.entity) {
                        self.auto_exec.start(node, mode, target, hohmann_target_alt_km, &mut self.clock, altitude_m, &mut state);
                    }
                }
                if let Some(player) = self.player.as_mut() {
                    player.auto_exec_state = self.auto_exec.state();
                }
            }
            PlayerCommand::CancelAutoExec => {
                if let Some(player) = &self.player {
                    if let Ok(mut state) = self.registry.ecs.get::<&mut EntityState>(player.entity) {
                        self.auto_exec.cancel(&mut self.clock, &mut state);
                    }
                }
                if let Some(player) = self.player.as_mut() {
                    player.auto_exec_state = self.auto_exec.state();
                }
            }
            PlayerCommand::SetTerrainFollowing { enabled, agl_target_m } => {
                self.handle_set_terrain_following(enabled, agl_target_m);
            }
            PlayerCommand::SetCameraMode { mode } => {
                if let Some(player) = self.player.as_mut() {
                    player.camera_mode = mode;
                }
            }
            PlayerCommand::SetCameraParams { range_m, pitch_rad, heading_offset_rad } => {
                if let Some(player) = self.player.as_mut() {
                    if let Some(range_m) = range_m {
                        player.camera_range_m = range_m;
                    }
                    if let Some(pitch_rad) = pitch_rad {
                        player.camera_pitch_rad = pitch_rad;
                    }
                    if let Some(heading_offset_rad) = heading_offset_rad {
                        player.camera_heading_offset_rad = heading_offset_rad;
                    }
                }
            }
            PlayerCommand::SetVizGroupVisible { key, show } => {
                self.viz.set_group_visible(key, show);
            }
            PlayerCommand::SetVizGlobalFlag { flag, value } => {
                self.apply_viz_global_flag(flag, value);
            }
            PlayerCommand::SetPreference { key, value } => {
                self.apply_preference(&key, value);
            }
        }
    }

    fn player_altitude_m(&self) -> f64 {
        self.player
            .as_ref()
            .and_then(|p| self.registry.ecs.get::<&EntityState>(p.entity).ok())
            .map(|s| s.position.alt)
            .unwrap_or(0.0)
    }

    fn handle_assume_control(&mut self, entity_id: &str) {
        let Some(entity) = self.registry.get_entity(entity_id) else {
            self.pending_events.push(SimEvent::AssumeControlFailed { reason: format!("unknown entity: {entity_id}") });
            return;
        };
        match player::assume_control(&mut self.registry, self.player.as_ref(), entity) {
            Ok(ctx) => self.player = Some(ctx),
            Err(e) => self.pending_events.push(SimEvent::AssumeControlFailed { reason: e.to_string() }),
        }
    }

    fn handle_set_terrain_following(&mut self, enabled: bool, agl_target_m: Option<f64>) {
        let Some(player) = self.player.as_ref() else { return };
        if !enabled {
            self.terrain_follow.disable();
            if let Some(player) = self.player.as_mut() {
                player.terrain_following_enabled = false;
            }
            return;
        }
        let agl_target = agl_target_m.unwrap_or(player.terrain_following_agl_target_m);
        let altitude_m = self.player_altitude_m();
        let enabled = self.terrain_follow.enable(agl_target, altitude_m);
        if let Some(player) = self.player.as_mut() {
            player.terrain_following_enabled = enabled;
            if enabled {
                player.terrain_following_agl_target_m = agl_target;
            }
        }
    }

    fn apply_viz_global_flag(&mut self, flag: VizGlobalFlag, value: bool) {
        match flag {
            VizGlobalFlag::Orbits => self.viz.global_flags.orbits = value,
            VizGlobalFlag::Trails => self.viz.global_flags.trails = value,
            VizGlobalFlag::Labels => self.viz.global_flags.labels = value,
            VizGlobalFlag::Sensors => self.viz.global_flags.sensors = value,
            VizGlobalFlag::Comms => self.viz.global_flags.comms = value,
        }
    }

    /// Applies a preference update by key. Unrecognized keys fall through
    /// to the free-form panel-visibility map, matching the "unknown keys
    /// are ignored" tolerance the preferences blob itself documents.
    fn apply_preference(&mut self, key: &str, value: serde_json::Value) {
        match key {
            "trail_duration_secs" => {
                if let Some(v) = value.as_f64() {
                    self.preferences.trail_duration_secs = v;
                }
            }
            "orbit_revolution_count" => {
                if let Some(v) = value.as_u64() {
                    self.preferences.orbit_revolution_count = v as u32;
                }
            }
            "audio_enabled" => {
                if let Some(v) = value.as_bool() {
                    self.preferences.audio_enabled = v;
                }
            }
            "visual_effects_enabled" => {
                if let Some(v) = value.as_bool() {
                    self.preferences.visual_effects_enabled = v;
                }
            }
            "globe_controls_enabled" => {
                if let Some(v) = value.as_bool() {
                    self.preferences.globe_controls_enabled = v;
                }
            }
            _ => {
                if let Some(v) = value.as_bool() {
                    if let Some(panel) = key.strip_prefix("panel:") {
                        self.preferences.panel_visibility.insert(panel.to_string(), v);
                    } else if let Some(hud) = key.strip_prefix("hud:") {
                        self.preferences.hud_elements.insert(hud.to_string(), v);
                    }
                }
            }
        }
    }

    #[cfg(test)]
    pub fn registry(&self) -> &WorldRegistry {
        &self.registry
    }

    #[cfg(test)]
    pub fn player_entity_id(&self) -> Option<&str> {
        self.player.as_ref().map(|p| p.entity_id.as_str())
    }
}

/// Input & Control Mux (§4.4), cockpit/chase axes. Pitch/roll are applied as
/// direct setpoints; yaw is a rate applied to heading; throttle integrates
/// toward `throttle_set` or ramps per `throttle_up`/`throttle_down`. Skipped
/// entirely while the auto-executor owns throttle/attitude during a burn.
fn apply_flight_controls(state: &mut EntityState, controls: &ControlInputs, dt: f64, burning: bool) {
    if burning {
        return;
    }
    state.pitch_rad = (controls.pitch * MAX_PITCH_RAD).clamp(-MAX_PITCH_RAD, MAX_PITCH_RAD);
    state.roll_rad = (controls.roll * MAX_ROLL_RAD).clamp(-MAX_ROLL_RAD, MAX_ROLL_RAD);
    state.heading_rad = (state.heading_rad + controls.yaw * YAW_RATE_RAD_S * dt).rem_euclid(std::f64::consts::TAU);

    if let Some(set) = controls.throttle_set {
        state.throttle = set.clamp(0.0, 1.0);
    } else if controls.throttle_up {
        state.throttle = (state.throttle + THROTTLE_RATE_PER_S * dt).clamp(0.0, 1.0);
    } else if controls.throttle_down {
        state.throttle = (state.throttle - THROTTLE_RATE_PER_S * dt).clamp(0.0, 1.0);
    }
}
