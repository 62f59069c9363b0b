//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods beyond trivial
//! constructors. System logic lives in `tacsim-engine`, not here.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{EciState, GeodeticPosition, OrbitalElements};

/// Identity and membership, set at spawn time and rarely mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityInfo {
    pub id: String,
    pub name: String,
    pub kind: EntityKind,
    pub team: Team,
    pub active: bool,
    pub viz_category: Option<String>,
}

/// The single mutable state record for an entity, per §3's "Entity" data model.
/// Every system reads and/or writes a slice of this struct; it is the one
/// source of truth for a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityState {
    pub position: GeodeticPosition,
    pub speed_mps: f64,
    pub gamma_rad: f64,
    pub heading_rad: f64,
    pub pitch_rad: f64,
    pub roll_rad: f64,
    pub alpha_rad: f64,
    pub yaw_offset_rad: f64,
    pub throttle: f64,
    pub engine_on: bool,
    pub gear_down: bool,
    pub flaps: f64,
    pub brakes: bool,
    pub mach: f64,
    pub g_load: f64,
    pub dynamic_pressure_pa: f64,
    pub phase: EntityPhase,

    pub eci: Option<EciState>,
    pub orbital: Option<OrbitalElements>,
    /// ECEF polyline of the current orbit, for renderer consumption.
    pub current_orbit_positions: Vec<crate::types::Vec3>,
    /// ECI polyline of the current orbit, for renderer consumption.
    pub eci_orbit_positions: Vec<crate::types::Vec3>,

    // --- per-sub-system scratch, per Design Notes §9 ---
    pub rwr: Vec<ThreatTrack>,
    pub mws: Vec<MissileTrack>,
    pub engagements: Vec<EngagementRecord>,
    pub a2a_engagements: Vec<EngagementRecord>,
    pub kk_engagements: Vec<EngagementRecord>,
    pub cyber: CyberFlags,
    pub viz: VizFlags,
}

/// RWR (radar-warning-receiver-style) contact reported by the sensors component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThreatTrack {
    pub source_id: String,
    pub bearing_rad: f64,
    pub classification: Classification,
}

/// Inbound-missile warning reported by the sensors component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MissileTrack {
    pub source_id: String,
    pub time_to_impact_secs: f64,
}

/// A single engagement record as exposed by the weapons component, consumed
/// by the engagement scanner (§4.8) for dedupe and scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngagementRecord {
    pub source_id: String,
    pub target_id: String,
    pub class: WeaponClass,
    pub result: EngagementResult,
    /// Simulated time (seconds) the engagement was resolved, used as a
    /// dedupe key component alongside (source, target, result).
    pub engagement_time: f64,
}

/// Cyber posture flags exposed by the cyber component, compared snapshot to
/// snapshot by the cyber event scanner (§4.8).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CyberFlags {
    pub scanned: bool,
    pub exploited: bool,
    pub controlled: bool,
    pub subsystems_disabled: u32,
    pub data_exfil: bool,
    pub patched: bool,
    pub isolated: bool,
    pub restored: bool,
}

/// Per-entity visualization flags written by the viz plane each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VizFlags {
    pub show: bool,
    pub orbits: bool,
    pub trails: bool,
    pub labels: bool,
    pub sensors: bool,
    pub comms: bool,
}

/// Physics component: which integrator drives this entity and its engine
/// parameters (thrust/mass/label), per §4.3's "engine config (from physics
/// component, falling back to named config)".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsComponent {
    pub enabled: bool,
    pub kind: PhysicsKind,
    pub thrust_n: f64,
    pub mass_kg: f64,
    pub label: String,
}

impl Default for PhysicsComponent {
    fn default() -> Self {
        Self {
            enabled: true,
            kind: PhysicsKind::default(),
            thrust_n: 0.0,
            mass_kg: 1.0,
            label: String::new(),
        }
    }
}

/// Control component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ControlComponent {
    pub enabled: bool,
    pub kind: ControlKind,
}

/// AI component. `profile_key` selects archetype tuning parameters
/// (cruise speed/altitude, popup/terminal ranges, evasion) from the
/// engine's AI profile table; an unrecognized or empty key falls back to
/// a generic patrol profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiComponent {
    pub enabled: bool,
    pub behavior: AiBehavior,
    pub phase_start_tick: u64,
    pub target_id: Option<String>,
    pub profile_key: String,
}

/// Visual component (model selection only; rendering is external).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisualComponent {
    pub enabled: bool,
    pub model_key: String,
}

/// Sensors component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorsComponent {
    pub enabled: bool,
    pub max_range_m: f64,
}

impl Default for SensorsComponent {
    fn default() -> Self {
        Self {
            enabled: true,
            max_range_m: 0.0,
        }
    }
}

/// A single weapon loadout slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponSlot {
    pub name: String,
    pub class: WeaponClass,
    pub count: u32,
    pub max: u32,
    pub active: bool,
}

/// Weapons component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeaponsComponent {
    pub enabled: bool,
    pub inventory: Vec<WeaponSlot>,
}

/// Propulsion component: the mode catalog and currently-selected mode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropulsionComponent {
    pub enabled: bool,
    pub modes: Vec<PropulsionMode>,
    pub selected: usize,
}

impl PropulsionComponent {
    pub fn selected_mode(&self) -> Option<&PropulsionMode> {
        self.modes.get(self.selected)
    }
}

/// Cyber component: enabled flag only, state lives in `EntityState::cyber`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CyberComponent {
    pub enabled: bool,
}

/// Communications component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommComponent {
    pub enabled: bool,
    pub membership: Vec<String>,
}

/// History of positions for trail rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PositionHistory {
    /// Recent positions (newest first), up to `MAX_HISTORY_DOTS`.
    pub positions: Vec<GeodeticPosition>,
}
