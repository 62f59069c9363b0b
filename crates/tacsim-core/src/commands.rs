//! Player commands sent from the host to the simulation.
//!
//! Commands are validated and queued for processing at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::ManeuverNode;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Mission lifecycle ---
    StartMission { scenario_url: String },
    Pause,
    Resume,
    SetTimeScale { scale: f64 },

    // --- Player hijack manager (§4.3) ---
    AssumeControl { entity_id: String },
    EnterObserverMode,

    // --- Input & control mux (§4.4) ---
    FlightControls {
        pitch: f64,
        roll: f64,
        yaw: f64,
        throttle_up: bool,
        throttle_down: bool,
        throttle_set: Option<f64>,
    },
    ToggleEngine,
    SetGearDown { down: bool },
    SetPropulsionMode { index: usize },
    SetGlobeControlsEnabled { enabled: bool },

    // --- Auto-pointing controller (§4.6) ---
    SetPointingMode {
        mode: PointingMode,
        lock: bool,
        target_id: Option<String>,
    },

    // --- Maneuver auto-executor (§4.5) ---
    StartAutoExec {
        node: ManeuverNode,
        mode: AutoExecMode,
        target: Option<ManeuverTarget>,
        /// Pending two-burn Hohmann chain target altitude, if this is burn 1 of 2.
        hohmann_target_alt_km: Option<f64>,
    },
    CancelAutoExec,

    // --- Terrain-following autopilot (§4.7) ---
    SetTerrainFollowing {
        enabled: bool,
        agl_target_m: Option<f64>,
    },

    // --- Camera ---
    SetCameraMode { mode: CameraMode },
    SetCameraParams {
        range_m: Option<f64>,
        pitch_rad: Option<f64>,
        heading_offset_rad: Option<f64>,
    },

    // --- Visualization & analytics plane (§4.8) ---
    SetVizGroupVisible { key: VizGroupKey, show: bool },
    SetVizGlobalFlag { flag: VizGlobalFlag, value: bool },

    // --- Preferences (§6) ---
    SetPreference { key: String, value: serde_json::Value },
}
