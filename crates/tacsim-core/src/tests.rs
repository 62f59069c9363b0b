#[cfg(test)]
mod tests {
    use crate::commands::PlayerCommand;
    use crate::enums::*;
    use crate::error::ErrorKind;
    use crate::events::{Alert, SimEvent};
    use crate::state::WorldSnapshot;
    use crate::types::{GeodeticPosition, ManeuverNode, SimTime};

    /// Verify all enums round-trip through serde_json.
    #[test]
    fn test_classification_serde() {
        let variants = vec![
            Classification::Unknown,
            Classification::Pending,
            Classification::AssumedFriend,
            Classification::Friend,
            Classification::Neutral,
            Classification::Suspect,
            Classification::Hostile,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: Classification = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_propulsion_mode_serde_rocket_variant() {
        let mode = PropulsionMode::Rocket {
            thrust_n: 26_700.0,
            preset: RocketPreset::Oms,
        };
        let json = serde_json::to_string(&mode).unwrap();
        let back: PropulsionMode = serde_json::from_str(&json).unwrap();
        assert_eq!(mode, back);
    }

    #[test]
    fn test_maneuver_target_serde() {
        let variants = vec![
            ManeuverTarget::RaiseApo { alt_m: 600_000.0 },
            ManeuverTarget::LowerPe { alt_m: 400_000.0 },
            ManeuverTarget::Circularize {
                target_r_m: 6_971_000.0,
            },
        ];
        for v in &variants {
            let json = serde_json::to_string(v).unwrap();
            let back: ManeuverTarget = serde_json::from_str(&json).unwrap();
            assert_eq!(*v, back);
        }
    }

    /// Verify PlayerCommand round-trips through serde (tagged union).
    #[test]
    fn test_player_command_serde() {
        let commands = vec![
            PlayerCommand::Pause,
            PlayerCommand::Resume,
            PlayerCommand::StartMission {
                scenario_url: "scenario.json".into(),
            },
            PlayerCommand::SetTimeScale { scale: 2.0 },
            PlayerCommand::AssumeControl {
                entity_id: "aircraft-1".into(),
            },
            PlayerCommand::CancelAutoExec,
            PlayerCommand::StartAutoExec {
                node: ManeuverNode::default(),
                mode: AutoExecMode::Warping,
                target: Some(ManeuverTarget::Circularize { target_r_m: 6_971_000.0 }),
                hohmann_target_alt_km: Some(600.0),
            },
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: PlayerCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }
    }

    /// Verify SimEvent round-trips through serde.
    #[test]
    fn test_sim_event_serde() {
        let events = vec![
            SimEvent::BurnComplete {
                node_label: "circularize".into(),
            },
            SimEvent::AssumeControlFailed {
                reason: "no physics".into(),
            },
            SimEvent::TerrainFollowingDisabled {
                reason: "bail-out".into(),
            },
        ];
        for event in &events {
            let json = serde_json::to_string(event).unwrap();
            let _back: SimEvent = serde_json::from_str(&json).unwrap();
        }
    }

    /// Verify Alert round-trips through serde.
    #[test]
    fn test_alert_serde() {
        let alert = Alert {
            level: AlertLevel::Critical,
            message: "TERRAIN FOLLOWING DISABLED".to_string(),
            tick: 1000,
        };
        let json = serde_json::to_string(&alert).unwrap();
        let back: Alert = serde_json::from_str(&json).unwrap();
        assert_eq!(alert.message, back.message);
        assert_eq!(alert.tick, back.tick);
    }

    /// Verify WorldSnapshot can be serialized to JSON.
    #[test]
    fn test_snapshot_serde() {
        let snapshot = WorldSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: WorldSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.time.tick, back.time.tick);
        assert_eq!(snapshot.phase, back.phase);
    }

    /// Verify GeodeticPosition geometry calculations.
    #[test]
    fn test_geodetic_range() {
        let a = GeodeticPosition::new(0.0, 0.0, 0.0);
        let b = GeodeticPosition::new(0.0, 0.0, 1000.0);
        assert!((a.range_to(&b) - 1000.0).abs() < 1e-6);
    }

    /// Verify SimTime advancement.
    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        assert_eq!(time.tick, 0);
        assert_eq!(time.elapsed_secs, 0.0);

        for _ in 0..30 {
            time.advance(0.033);
        }
        assert_eq!(time.tick, 30);
        assert!((time.elapsed_secs - 0.99).abs() < 1e-9);
    }

    #[test]
    fn test_error_kind_display() {
        let err = ErrorKind::DuplicateEntity("aircraft-1".into());
        assert!(err.to_string().contains("aircraft-1"));
    }
}
