//! Clock & Warp Controller, per §4.1.
//!
//! Converts wall-clock frame deltas to a simulated delta, clamping,
//! sub-stepping, and applying the altitude-aware warp ceiling.

use tacsim_core::constants::{
    EARTH_RADIUS_M, MAX_FRAME_RDT, SUBSTEP_DT, WARP_BASE_CEILING, WARP_CEILING_REF_ALT_M,
    WARP_MAX_CEILING,
};

/// Runs the clock, holding the time-warp setting and pause baseline.
#[derive(Debug, Clone)]
pub struct WarpClock {
    pub warp: f64,
    pub paused: bool,
    /// Set when paused (or on first tick) so the next tick starts clean;
    /// not modeled as wall-clock time here since the host supplies `rdt`
    /// directly rather than a raw timestamp.
    just_resumed: bool,
}

impl Default for WarpClock {
    fn default() -> Self {
        Self {
            warp: 1.0,
            paused: false,
            just_resumed: true,
        }
    }
}

impl WarpClock {
    /// Altitude-aware warp ceiling for a player at altitude `h` meters.
    pub fn warp_ceiling(altitude_m: f64) -> f64 {
        let sma = EARTH_RADIUS_M + altitude_m;
        let ref_sma = EARTH_RADIUS_M + WARP_CEILING_REF_ALT_M;
        if sma <= ref_sma {
            WARP_BASE_CEILING
        } else {
            (WARP_BASE_CEILING * (sma / ref_sma).powf(1.5))
                .round()
                .min(WARP_MAX_CEILING)
        }
    }

    /// Clamps a requested warp to the current altitude-aware ceiling.
    pub fn set_warp(&mut self, requested: f64, altitude_m: f64) {
        self.warp = requested.clamp(0.0, Self::warp_ceiling(altitude_m));
    }

    pub fn pause(&mut self) {
        self.paused = true;
        self.just_resumed = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
        self.just_resumed = true;
    }

    /// Produces the simulated delta for this tick from a real-elapsed `rdt`.
    /// Returns zero while paused or on the tick right after pause/resume.
    pub fn tick(&mut self, rdt: f64) -> f64 {
        if self.paused {
            return 0.0;
        }
        if self.just_resumed {
            self.just_resumed = false;
            return 0.0;
        }
        rdt.clamp(0.0, MAX_FRAME_RDT) * self.warp
    }

    /// Substep count and per-substep dt for the player physics step, per
    /// §4.1: steps of at most `SUBSTEP_DT`, `numSteps = ceil(sdt/0.05)`.
    pub fn substeps(sdt: f64) -> (u32, f64) {
        if sdt <= 0.0 {
            return (0, 0.0);
        }
        let num_steps = (sdt / SUBSTEP_DT).ceil() as u32;
        (num_steps, sdt / num_steps as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warp_ceiling_leo_is_base() {
        assert_eq!(WarpClock::warp_ceiling(400_000.0), WARP_BASE_CEILING);
    }

    #[test]
    fn test_warp_ceiling_geo_scales_and_clamps() {
        let ceiling = WarpClock::warp_ceiling(35_786_000.0);
        let expected = (WARP_BASE_CEILING
            * (((EARTH_RADIUS_M + 35_786_000.0) / (EARTH_RADIUS_M + WARP_CEILING_REF_ALT_M))
                .powf(1.5)))
        .round()
        .min(WARP_MAX_CEILING);
        assert_eq!(ceiling, expected);
        assert!(ceiling <= WARP_MAX_CEILING);
    }

    #[test]
    fn test_tick_zero_rdt_gives_zero_sdt() {
        let mut clock = WarpClock {
            warp: 1.0,
            paused: false,
            just_resumed: false,
        };
        assert_eq!(clock.tick(0.0), 0.0);
    }

    #[test]
    fn test_tick_clamps_rdt_and_applies_warp() {
        let mut clock = WarpClock {
            warp: 4.0,
            paused: false,
            just_resumed: false,
        };
        assert!((clock.tick(10.0) - (MAX_FRAME_RDT * 4.0)).abs() < 1e-12);
    }

    #[test]
    fn test_tick_zero_while_paused() {
        let mut clock = WarpClock::default();
        clock.pause();
        assert_eq!(clock.tick(0.05), 0.0);
    }

    #[test]
    fn test_substeps_match_spec_example() {
        assert_eq!(WarpClock::substeps(0.1).0, 2);
        let (n, sub) = WarpClock::substeps(0.1);
        assert!((n as f64 * sub - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_substeps_do_not_hard_cap_at_high_warp() {
        // sdt = 0.1 * 1024 at warp ceiling
        let sdt = 0.1 * 1024.0;
        let (n, _) = WarpClock::substeps(sdt);
        assert_eq!(n, 2048);
    }
}
