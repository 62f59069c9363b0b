//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Entity type tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Aircraft,
    Satellite,
    GroundStation,
    Naval,
    Sam,
    #[default]
    Unspecified,
}

/// Team / allegiance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Blue,
    Red,
    #[default]
    Neutral,
}

/// Entity lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityPhase {
    #[default]
    Parked,
    Flight,
    Landed,
    Crashed,
    Static,
}

/// Which physics integrator a physics component requests from the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhysicsKind {
    #[default]
    Flight3Dof,
    Orbital2Body,
    StaticGround,
}

/// Control component category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlKind {
    PlayerInput,
    Scripted,
    #[default]
    None,
}

/// Non-player entity behavior phase, generalized across archetypes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiBehavior {
    /// Loitering / racetrack patrol, no active engagement.
    #[default]
    Patrol,
    /// Holding geodetic position (satellites, ground stations).
    StationKeep,
    /// Inbound at cruise altitude/speed (threat archetypes).
    Cruise,
    /// Climbing for acquisition before terminal dive.
    PopUp,
    /// Final attack run.
    Terminal,
    /// Evasive maneuvers (weave, jink).
    Evasive,
    /// Destroyed.
    Destroyed,
    /// Reached target (impact).
    Impact,
}

/// Rocket engine preset used by `PropulsionMode::Rocket`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RocketPreset {
    Rcs,
    #[default]
    Oms,
    MainEngine,
}

/// Propulsion mode catalog entry. Tagged enum per the Design Notes'
/// replacement for dynamic string-keyed propulsion lookups.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum PropulsionMode {
    Taxi,
    Air,
    Hypersonic,
    Rocket { thrust_n: f64, preset: RocketPreset },
}

impl Default for PropulsionMode {
    fn default() -> Self {
        PropulsionMode::Taxi
    }
}

/// Auto-pointing reference direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointingMode {
    #[default]
    Manual,
    Prograde,
    Retrograde,
    Normal,
    AntiNormal,
    RadialOut,
    RadialIn,
    Nadir,
    Sun,
    Target,
}

/// Maneuver auto-executor state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutoExecState {
    #[default]
    Idle,
    WarpOnly,
    Warping,
    Burning,
}

/// Mode requested by `start(node, mode, target?)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutoExecMode {
    WarpOnly,
    Warping,
}

/// Orbital-element termination descriptor for a burn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ManeuverTarget {
    RaiseApo { alt_m: f64 },
    LowerPe { alt_m: f64 },
    Circularize { target_r_m: f64 },
}

/// Camera operating mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraMode {
    #[default]
    Chase,
    Free,
    Globe,
}

/// Top-level simulation phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    #[default]
    MainMenu,
    Briefing,
    Active,
    Paused,
    Complete,
}

/// Orbital regime classification by SMA/eccentricity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Regime {
    Leo,
    Meo,
    Geo,
    Heo,
    #[default]
    Other,
}

/// Track classification following NATO identification doctrine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    #[default]
    Unknown,
    Pending,
    AssumedFriend,
    Friend,
    Neutral,
    Suspect,
    Hostile,
}

/// Weapon class used for engagement statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponClass {
    #[default]
    A2a,
    Sam,
    Kkv,
}

/// Terminal outcome of a weapon engagement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngagementResult {
    Kill,
    #[default]
    Miss,
}

/// Cyber event kind, scored per §4.8's table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CyberEventKind {
    #[default]
    Scan,
    Exploit,
    Control,
    Disabled,
    Exfil,
    Patch,
    Isolate,
    Restored,
}

/// Alert severity level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertLevel {
    #[default]
    Info,
    Warning,
    Critical,
}

/// Blink-pattern state for HUD warnings, replacing a `setTimeout`-driven
/// pattern with an explicit sum type advanced by the tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WarningPhase {
    OnFor(f64),
    OffFor(f64),
    Steady,
}

impl Default for WarningPhase {
    fn default() -> Self {
        WarningPhase::Steady
    }
}

/// A visualization grouping key: type, team, or a free-form category string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum VizGroupKey {
    Type(EntityKind),
    Team(Team),
    Category(String),
}

/// Global visibility flag bank (§3 "Visualization Group").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VizGlobalFlag {
    Orbits,
    Trails,
    Labels,
    Sensors,
    Comms,
}
