#[cfg(test)]
mod tests {
    use crate::profiles::{get_engagement_profile, get_patrol_profile, AiProfileKey};

    const ALL_PROFILES: [AiProfileKey; 6] = [
        AiProfileKey::SeaSkimmerMk1,
        AiProfileKey::SeaSkimmerMk2,
        AiProfileKey::SupersonicCruiser,
        AiProfileKey::SubsonicDrone,
        AiProfileKey::TacticalBallistic,
        AiProfileKey::Patroller,
    ];

    #[test]
    fn test_all_profiles_have_positive_cruise_speed() {
        for key in ALL_PROFILES {
            let profile = get_engagement_profile(key);
            assert!(profile.cruise_speed_mps > 0.0, "{key:?} cruise speed");
        }
    }

    #[test]
    fn test_only_sea_skimmers_popup() {
        assert!(get_engagement_profile(AiProfileKey::SeaSkimmerMk1).popup_range_m.is_some());
        assert!(get_engagement_profile(AiProfileKey::SeaSkimmerMk2).popup_range_m.is_some());
        assert!(get_engagement_profile(AiProfileKey::SupersonicCruiser).popup_range_m.is_none());
        assert!(get_engagement_profile(AiProfileKey::TacticalBallistic).popup_range_m.is_none());
    }

    #[test]
    fn test_only_mk2_can_evade() {
        assert!(!get_engagement_profile(AiProfileKey::SeaSkimmerMk1).can_evade);
        assert!(get_engagement_profile(AiProfileKey::SeaSkimmerMk2).can_evade);
    }

    #[test]
    fn test_patrol_profile_is_sane() {
        let profile = get_patrol_profile(AiProfileKey::Patroller);
        assert!(profile.loiter_speed_mps > 0.0);
        assert!(profile.racetrack_period_secs > 0.0);
    }
}
