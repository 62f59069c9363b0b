//! Simulation constants and tuning parameters.

// --- Clock & warp ---

/// Maximum real-elapsed seconds accepted per tick; longer stalls are clamped.
pub const MAX_FRAME_RDT: f64 = 0.1;

/// Maximum simulated-seconds per physics substep.
pub const SUBSTEP_DT: f64 = 0.05;

/// Base warp ceiling below the reference altitude.
pub const WARP_BASE_CEILING: f64 = 1024.0;

/// Absolute warp ceiling regardless of altitude.
pub const WARP_MAX_CEILING: f64 = 10_000.0;

/// Altitude above which the warp ceiling starts scaling with SMA^1.5 (meters).
pub const WARP_CEILING_REF_ALT_M: f64 = 400_000.0;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Effective Earth radius for radar/LOS propagation (4/3 model for atmospheric refraction).
pub const EFFECTIVE_EARTH_RADIUS_M: f64 = EARTH_RADIUS_M * 4.0 / 3.0;

/// Earth gravitational parameter, m^3/s^2.
pub const MU_EARTH: f64 = 3.986_004_418e14;

/// Julian date of the J2000 epoch, used as the default simulation epoch.
pub const J2000_EPOCH_JD: f64 = 2_451_545.0;

// --- Maneuver auto-executor ---

/// Dynamic-warp fallback once the ΔV estimate is exhausted but the target isn't reached.
pub const AUTOEXEC_FINITE_BURN_LOSS_WARP: f64 = 8.0;

/// Safety multiplier on target ΔV before a burn is force-terminated.
pub const AUTOEXEC_SAFETY_DV_FACTOR: f64 = 2.0;

/// Burn-end safety window: `burnEnd = simTime + this * expectedBurnTime`.
pub const AUTOEXEC_BURN_END_FACTOR: f64 = 2.0;

/// ΔV magnitude below which a `Warping`-mode node is declared complete without burning.
pub const AUTOEXEC_NEGLIGIBLE_DV: f64 = 0.01;

/// Proximity window (meters) in which circularize warp is scaled down near the target SMA.
pub const CIRCULARIZE_PROXIMITY_M: f64 = 500_000.0;

/// Divisor (meters) used to scale circularize warp within the proximity window.
pub const CIRCULARIZE_PROXIMITY_STEP_M: f64 = 10_000.0;

// --- Auto-pointing ---

/// Minimum altitude (meters) above which auto-pointing is permitted to engage.
pub const AUTO_POINT_MIN_ALT_M: f64 = 80_000.0;

// --- Terrain-following autopilot ---

/// Terrain-following elevation sampling rate (Hz).
pub const TERRAIN_FOLLOW_SAMPLE_HZ: f64 = 2.0;

/// Look-ahead distances along heading for terrain sampling (meters).
pub const TERRAIN_FOLLOW_LOOKAHEAD_M: [f64; 3] = [2_000.0, 5_000.0, 10_000.0];

/// Default altitude-hold-above-ground target (meters).
pub const TERRAIN_FOLLOW_DEFAULT_AGL_M: f64 = 150.0;

/// Minimum configurable AGL target (meters).
pub const TERRAIN_FOLLOW_MIN_AGL_M: f64 = 30.0;

/// Maximum configurable AGL target (meters).
pub const TERRAIN_FOLLOW_MAX_AGL_M: f64 = 2_000.0;

/// AGL above which terrain-following auto-disables (meters).
pub const TERRAIN_FOLLOW_BAILOUT_AGL_M: f64 = 3_000.0;

/// Maximum current altitude at which terrain-following may be enabled (meters).
pub const TERRAIN_FOLLOW_ENABLE_MAX_ALT_M: f64 = 3_500.0;

// --- Visualization & analytics ---

/// Scanner throttle rate (engagement + cyber scanners), Hz.
pub const SCANNER_HZ: f64 = 2.0;

/// Analytics ring buffer capacity.
pub const ANALYTICS_RING_CAPACITY: usize = 3_600;

/// Engagement-log event cap.
pub const ENGAGEMENT_LOG_CAPACITY: usize = 500;

// --- Orbital regime classification ---

/// Upper altitude bound for LEO (meters).
pub const REGIME_LEO_MAX_ALT_M: f64 = 2_000_000.0;

/// Upper altitude bound for MEO (meters).
pub const REGIME_MEO_MAX_ALT_M: f64 = 35_000_000.0;

/// Nominal GEO altitude (meters).
pub const REGIME_GEO_ALT_M: f64 = 35_786_000.0;

/// Tolerance band around GEO altitude (meters).
pub const REGIME_GEO_TOLERANCE_M: f64 = 1_000_000.0;

/// Eccentricity above which an orbit is classified HEO regardless of SMA.
pub const REGIME_HEO_ECC_THRESHOLD: f64 = 0.25;

// --- Cyber / engagement scoring (per §4.8) ---

pub const CYBER_SCORE_SCAN: u32 = 1;
pub const CYBER_SCORE_EXPLOIT: u32 = 5;
pub const CYBER_SCORE_CONTROL: u32 = 10;
pub const CYBER_SCORE_DISABLED: u32 = 3;
pub const CYBER_SCORE_EXFIL: u32 = 8;
pub const CYBER_SCORE_PATCH: u32 = 4;
pub const CYBER_SCORE_ISOLATE: u32 = 2;
pub const CYBER_SCORE_RESTORED: u32 = 3;

// --- Terrain ---

/// Line-of-sight sampling interval in meters.
pub const TERRAIN_LOS_SAMPLE_INTERVAL: f64 = 100.0;

// --- Display ---

/// Maximum number of position history dots per track.
pub const MAX_HISTORY_DOTS: usize = 12;

/// History dot interval in ticks (one dot every N ticks, at the nominal 30Hz app rate).
pub const HISTORY_DOT_INTERVAL: u32 = 15;

// --- Host app loop ---

/// Nominal host render/tick rate (Hz) used to size the app-layer sleep loop.
/// The simulated clock itself is driven by measured `rdt`, not this constant.
pub const NOMINAL_TICK_RATE: u32 = 30;
