//! World snapshot — the complete visible state sent to the host each tick,
//! plus the analytics/scoring aggregates described in §3.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{Alert, SimEvent};
use crate::types::{GeodeticPosition, OrbitalElements, SimTime};

/// Complete world state broadcast to the host after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub time: SimTime,
    pub phase: SimPhase,
    pub entities: Vec<EntityView>,
    pub player: Option<PlayerView>,
    pub analytics: AnalyticsSnapshot,
    pub score: EngagementCyberScore,
    pub alerts: Vec<Alert>,
    pub events: Vec<SimEvent>,
}

/// A single entity as exposed to the host/renderer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityView {
    pub id: String,
    pub name: String,
    pub kind: EntityKind,
    pub team: Team,
    pub active: bool,
    pub position: GeodeticPosition,
    pub speed_mps: f64,
    pub heading_rad: f64,
    pub phase: EntityPhase,
    pub orbital: Option<OrbitalElements>,
    pub viz_show: bool,
    pub viz_orbits: bool,
    pub viz_trails: bool,
    pub viz_labels: bool,
    pub viz_sensors: bool,
    pub viz_comms: bool,
}

/// Player-context summary for the host (§3 "Player Context").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub entity_id: String,
    pub pointing_mode: PointingMode,
    pub pointing_locked: bool,
    pub auto_exec_state: AutoExecState,
    pub camera_mode: CameraMode,
    pub camera_range_m: f64,
    pub camera_pitch_rad: f64,
    pub camera_heading_offset_rad: f64,
    pub terrain_following_enabled: bool,
}

/// One entry in the capped ring buffer of §3 "Analytics Snapshot".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    pub sim_time: f64,
    pub alive_count: u32,
    pub dead_count: u32,
    pub has_fuel_count: u32,
    pub regime_histogram: HashMap<Regime, u32>,
    pub team_histogram: HashMap<Team, u32>,
    pub type_histogram: HashMap<EntityKind, u32>,
    pub avg_altitude_m: f64,
    pub avg_speed_mps: f64,
    pub comm_delivery_rate: f64,
    pub comm_latency_secs: f64,
    pub comm_active_links: u32,
    pub jammer_count: u32,
    pub cyber_attack_count: u32,
}

/// Attack-side cyber tally for one team.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CyberAttackTally {
    pub scans: u32,
    pub exploits: u32,
    pub controlled: u32,
    pub subsystems_disabled: u32,
    pub data_exfil: u32,
    pub total_points: u32,
}

/// Defense-side cyber tally for one team.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CyberDefenseTally {
    pub patches: u32,
    pub isolated: u32,
    pub counter_attacks: u32,
    pub restored: u32,
    pub total_points: u32,
}

/// Launch/kill/miss counts for one weapon class.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WeaponClassTally {
    pub launches: u32,
    pub kills: u32,
    pub misses: u32,
}

/// One entry in the capped engagement/cyber event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreLogEntry {
    pub tick: u64,
    pub team: Team,
    pub message: String,
}

/// §3's "Engagement & Cyber Score": per-team attack/defense tallies plus
/// weapon-class engagement statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngagementCyberScore {
    pub attack: HashMap<Team, CyberAttackTally>,
    pub defense: HashMap<Team, CyberDefenseTally>,
    pub weapon_classes: HashMap<WeaponClass, WeaponClassTally>,
    pub player_kills: u32,
    pub player_deaths: u32,
    pub event_log: Vec<ScoreLogEntry>,
}

impl EngagementCyberScore {
    /// Push a log entry, dropping the oldest once the cap is exceeded.
    pub fn push_log(&mut self, entry: ScoreLogEntry) {
        self.event_log.push(entry);
        if self.event_log.len() > crate::constants::ENGAGEMENT_LOG_CAPACITY {
            self.event_log.remove(0);
        }
    }
}
