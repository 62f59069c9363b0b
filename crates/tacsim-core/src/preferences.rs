//! Small persisted preferences blob (§6). Unknown keys are ignored by
//! serde's default deserialization behavior; missing keys revert to
//! `Default::default()` for their field.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Global visualization flag bank mirrored from `EntityState::viz` defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VizGlobalFlags {
    #[serde(default = "default_true")]
    pub orbits: bool,
    #[serde(default = "default_true")]
    pub trails: bool,
    #[serde(default = "default_true")]
    pub labels: bool,
    #[serde(default = "default_true")]
    pub sensors: bool,
    #[serde(default = "default_true")]
    pub comms: bool,
}

fn default_true() -> bool {
    true
}

impl Default for VizGlobalFlags {
    fn default() -> Self {
        Self {
            orbits: true,
            trails: true,
            labels: true,
            sensors: true,
            comms: true,
        }
    }
}

/// Persisted preferences blob. Every field has a default so a partially
/// populated or stale blob deserializes cleanly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub panel_visibility: HashMap<String, bool>,
    #[serde(default)]
    pub hud_elements: HashMap<String, bool>,
    #[serde(default)]
    pub viz_global_flags: VizGlobalFlags,
    #[serde(default = "default_trail_duration")]
    pub trail_duration_secs: f64,
    #[serde(default = "default_orbit_revolutions")]
    pub orbit_revolution_count: u32,
    #[serde(default = "default_true")]
    pub audio_enabled: bool,
    #[serde(default = "default_true")]
    pub visual_effects_enabled: bool,
    #[serde(default)]
    pub globe_controls_enabled: bool,
}

fn default_trail_duration() -> f64 {
    30.0
}

fn default_orbit_revolutions() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_keys_ignored_missing_keys_default() {
        let json = r#"{"panel_visibility": {"hud": true}, "somethingFuture": 42}"#;
        let prefs: Preferences = serde_json::from_str(json).unwrap();
        assert_eq!(prefs.panel_visibility.get("hud"), Some(&true));
        assert_eq!(prefs.trail_duration_secs, 30.0);
        assert!(prefs.viz_global_flags.orbits);
    }

    #[test]
    fn test_empty_blob_is_all_defaults() {
        let prefs: Preferences = serde_json::from_str("{}").unwrap();
        assert_eq!(prefs, Preferences::default());
    }
}
