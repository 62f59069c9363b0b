//! Terrain-Following Autopilot, per §4.7.
//!
//! Throttled to 2 Hz. Samples elevation at the current position and three
//! look-ahead points along heading, and drives an altitude-hold setpoint.

use tacsim_core::constants::{
    TERRAIN_FOLLOW_BAILOUT_AGL_M, TERRAIN_FOLLOW_ENABLE_MAX_ALT_M, TERRAIN_FOLLOW_LOOKAHEAD_M,
    TERRAIN_FOLLOW_MAX_AGL_M, TERRAIN_FOLLOW_MIN_AGL_M, TERRAIN_FOLLOW_SAMPLE_HZ,
};
use tacsim_core::types::GeodeticPosition;
use tacsim_terrain::{sample_or_sea_level, ElevationProvider};

#[derive(Debug, Clone, Default)]
pub struct TerrainFollowAutopilot {
    pub enabled: bool,
    pub agl_target_m: f64,
    elapsed_since_sample_secs: f64,
    altitude_hold_setpoint_m: Option<f64>,
}

impl TerrainFollowAutopilot {
    /// Attempts to enable terrain-following. Fails silently (no-op) if the
    /// current altitude exceeds the enable ceiling, per §4.7.
    pub fn enable(&mut self, agl_target_m: f64, current_altitude_m: f64) -> bool {
        if current_altitude_m > TERRAIN_FOLLOW_ENABLE_MAX_ALT_M {
            return false;
        }
        self.enabled = true;
        self.agl_target_m = agl_target_m.clamp(TERRAIN_FOLLOW_MIN_AGL_M, TERRAIN_FOLLOW_MAX_AGL_M);
        self.elapsed_since_sample_secs = 0.0;
        true
    }

    pub fn disable(&mut self) {
        self.enabled = false;
        self.altitude_hold_setpoint_m = None;
    }

    pub fn altitude_hold_setpoint_m(&self) -> Option<f64> {
        self.altitude_hold_setpoint_m
    }

    /// Advances the autopilot by `dt` seconds. Returns `Some(reason)` if
    /// terrain-following auto-disabled this tick (bail-out), so the caller
    /// can surface a `SimEvent::TerrainFollowingDisabled`.
    pub fn tick(
        &mut self,
        dt: f64,
        position: &GeodeticPosition,
        heading_rad: f64,
        terrain: &dyn ElevationProvider,
    ) -> Option<String> {
        if !self.enabled {
            return None;
        }

        let current_ground_elev = sample_or_sea_level(terrain, position);
        let agl = position.alt - current_ground_elev;
        if agl > TERRAIN_FOLLOW_BAILOUT_AGL_M {
            self.disable();
            return Some(format!("terrain-following auto-disabled: AGL {agl:.0}m exceeds bail-out threshold"));
        }

        self.elapsed_since_sample_secs += dt;
        let sample_interval = 1.0 / TERRAIN_FOLLOW_SAMPLE_HZ;
        if self.elapsed_since_sample_secs < sample_interval {
            return None;
        }
        self.elapsed_since_sample_secs = 0.0;

        let mut max_elev = current_ground_elev;
        for &lookahead_m in &TERRAIN_FOLLOW_LOOKAHEAD_M {
            let point = position.destination_point(heading_rad, lookahead_m);
            max_elev = max_elev.max(sample_or_sea_level(terrain, &point));
        }

        self.altitude_hold_setpoint_m = Some(max_elev + self.agl_target_m);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tacsim_terrain::{TerrainGrid, TerrainHeader};

    fn flat_world() -> TerrainGrid {
        TerrainGrid::new(
            TerrainHeader {
                origin_lat: -90.0,
                origin_lon: -180.0,
                cell_size: 3600.0,
                width: 360,
                height: 180,
                min_elevation: 0,
                max_elevation: 0,
            },
            vec![0i16; 360 * 180],
            None,
        )
    }

    #[test]
    fn test_enable_fails_above_ceiling() {
        let mut tf = TerrainFollowAutopilot::default();
        assert!(!tf.enable(150.0, 4000.0));
        assert!(!tf.enabled);
    }

    #[test]
    fn test_enable_succeeds_and_clamps_agl_target() {
        let mut tf = TerrainFollowAutopilot::default();
        assert!(tf.enable(10.0, 200.0));
        assert_eq!(tf.agl_target_m, TERRAIN_FOLLOW_MIN_AGL_M);
    }

    #[test]
    fn test_bailout_disables_above_threshold() {
        let mut tf = TerrainFollowAutopilot::default();
        tf.enable(150.0, 200.0);
        let grid = flat_world();
        let pos = GeodeticPosition::new(0.0, 0.0, 3100.0);
        let reason = tf.tick(1.0, &pos, 0.0, &grid);
        assert!(reason.is_some());
        assert!(!tf.enabled);
    }

    #[test]
    fn test_setpoint_tracks_flat_terrain_plus_agl() {
        let mut tf = TerrainFollowAutopilot::default();
        tf.enable(150.0, 200.0);
        let grid = flat_world();
        let pos = GeodeticPosition::new(0.0, 0.0, 200.0);
        tf.tick(1.0, &pos, 0.0, &grid);
        assert!((tf.altitude_hold_setpoint_m().unwrap() - 150.0).abs() < 1e-6);
    }
}
