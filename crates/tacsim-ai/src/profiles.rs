//! Archetype-specific behavioral profiles for entities on the engaged
//! Cruise→PopUp→Terminal→Evasive chain, plus the loiter parameters used by
//! `Patrol`.

/// Selects which tuning numbers the FSM uses; orthogonal to `EntityKind` —
/// several entity kinds can share a profile (e.g. `Patroller` covers both
/// aircraft and naval combat air patrols).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiProfileKey {
    SeaSkimmerMk1,
    SeaSkimmerMk2,
    SupersonicCruiser,
    SubsonicDrone,
    TacticalBallistic,
    Patroller,
}

/// Behavioral profile for an engaged-threat archetype.
pub struct EngagementProfile {
    pub cruise_speed_mps: f64,
    pub cruise_altitude_m: f64,
    pub terminal_range_m: f64,
    pub terminal_speed_factor: f64,
    pub popup_range_m: Option<f64>,
    pub popup_altitude_m: f64,
    pub popup_duration_secs: f64,
    pub can_evade: bool,
    pub terminal_dive: bool,
}

/// Loiter parameters for `Patrol` behavior (racetrack pattern).
pub struct PatrolProfile {
    pub loiter_speed_mps: f64,
    pub racetrack_period_secs: f64,
    pub heading_swing_rad: f64,
}

const THREAT_IMPACT_RANGE_M: f64 = 50.0;

pub fn get_engagement_profile(key: AiProfileKey) -> EngagementProfile {
    match key {
        AiProfileKey::SeaSkimmerMk1 => EngagementProfile {
            cruise_speed_mps: 260.0,
            cruise_altitude_m: 5.0,
            terminal_range_m: 8_000.0,
            terminal_speed_factor: 1.2,
            popup_range_m: Some(12_000.0),
            popup_altitude_m: 300.0,
            popup_duration_secs: 6.0,
            can_evade: false,
            terminal_dive: false,
        },
        AiProfileKey::SeaSkimmerMk2 => EngagementProfile {
            cruise_speed_mps: 286.0,
            cruise_altitude_m: 4.0,
            terminal_range_m: 8_000.0,
            terminal_speed_factor: 1.2,
            popup_range_m: Some(12_000.0),
            popup_altitude_m: 300.0,
            popup_duration_secs: 6.0,
            can_evade: true,
            terminal_dive: false,
        },
        AiProfileKey::SupersonicCruiser => EngagementProfile {
            cruise_speed_mps: 680.0,
            cruise_altitude_m: 5_000.0,
            terminal_range_m: 8_000.0,
            terminal_speed_factor: 1.2,
            popup_range_m: None,
            popup_altitude_m: 0.0,
            popup_duration_secs: 0.0,
            can_evade: false,
            terminal_dive: false,
        },
        AiProfileKey::SubsonicDrone => EngagementProfile {
            cruise_speed_mps: 100.0,
            cruise_altitude_m: 3_000.0,
            terminal_range_m: 0.0,
            terminal_speed_factor: 1.0,
            popup_range_m: None,
            popup_altitude_m: 0.0,
            popup_duration_secs: 0.0,
            can_evade: false,
            terminal_dive: false,
        },
        AiProfileKey::TacticalBallistic => EngagementProfile {
            cruise_speed_mps: 1_500.0,
            cruise_altitude_m: 30_000.0,
            terminal_range_m: 8_000.0,
            terminal_speed_factor: 1.5,
            popup_range_m: None,
            popup_altitude_m: 0.0,
            popup_duration_secs: 0.0,
            can_evade: false,
            terminal_dive: true,
        },
        AiProfileKey::Patroller => EngagementProfile {
            cruise_speed_mps: 220.0,
            cruise_altitude_m: 6_000.0,
            terminal_range_m: 0.0,
            terminal_speed_factor: 1.0,
            popup_range_m: None,
            popup_altitude_m: 0.0,
            popup_duration_secs: 0.0,
            can_evade: false,
            terminal_dive: false,
        },
    }
}

pub fn get_patrol_profile(_key: AiProfileKey) -> PatrolProfile {
    PatrolProfile {
        loiter_speed_mps: 180.0,
        racetrack_period_secs: 120.0,
        heading_swing_rad: std::f64::consts::FRAC_PI_4,
    }
}

pub fn impact_range_m() -> f64 {
    THREAT_IMPACT_RANGE_M
}
