//! Snapshot system: queries the world registry and builds a complete
//! `WorldSnapshot` for the host. Read-only — never modifies the world.

use tacsim_core::components::{EntityInfo, EntityState};
use tacsim_core::events::{Alert, SimEvent};
use tacsim_core::state::{EngagementCyberScore, PlayerView, WorldSnapshot};
use tacsim_core::types::SimTime;

use crate::player::PlayerContext;
use crate::viz::AnalyticsRing;
use crate::world::WorldRegistry;

#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    registry: &WorldRegistry,
    time: SimTime,
    phase: tacsim_core::enums::SimPhase,
    player: Option<&PlayerContext>,
    analytics: &AnalyticsRing,
    score: &EngagementCyberScore,
    alerts: Vec<Alert>,
    events: Vec<SimEvent>,
) -> WorldSnapshot {
    let mut entities: Vec<tacsim_core::state::EntityView> = registry
        .ecs
        .query::<(&EntityInfo, &EntityState)>()
        .iter()
        .map(|(_entity, (info, state))| tacsim_core::state::EntityView {
            id: info.id.clone(),
            name: info.name.clone(),
            kind: info.kind,
            team: info.team,
            active: info.active,
            position: state.position,
            speed_mps: state.speed_mps,
            heading_rad: state.heading_rad,
            phase: state.phase,
            orbital: state.orbital,
            viz_show: state.viz.show,
            viz_orbits: state.viz.orbits,
            viz_trails: state.viz.trails,
            viz_labels: state.viz.labels,
            viz_sensors: state.viz.sensors,
            viz_comms: state.viz.comms,
        })
        .collect();
    entities.sort_by(|a, b| a.id.cmp(&b.id));

    let player_view = player.map(|ctx| PlayerView {
        entity_id: ctx.entity_id.clone(),
        pointing_mode: ctx.pointing_mode,
        pointing_locked: ctx.pointing_locked,
        auto_exec_state: ctx.auto_exec_state,
        camera_mode: ctx.camera_mode,
        camera_range_m: ctx.camera_range_m,
        camera_pitch_rad: ctx.camera_pitch_rad,
        camera_heading_offset_rad: ctx.camera_heading_offset_rad,
        terrain_following_enabled: ctx.terrain_following_enabled,
    });

    let latest_analytics = analytics.snapshots().last().cloned().unwrap_or_default();

    WorldSnapshot {
        time,
        phase,
        entities,
        player: player_view,
        analytics: latest_analytics,
        score: score.clone(),
        alerts,
        events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tacsim_core::enums::{EntityKind, SimPhase, Team};

    fn info(id: &str) -> EntityInfo {
        EntityInfo {
            id: id.to_string(),
            name: id.to_string(),
            kind: EntityKind::Aircraft,
            team: Team::Blue,
            active: true,
            viz_category: None,
        }
    }

    #[test]
    fn test_snapshot_lists_entities_sorted_by_id() {
        let mut registry = WorldRegistry::new();
        registry.add_entity(info("b"), (EntityState::default(),)).unwrap();
        registry.add_entity(info("a"), (EntityState::default(),)).unwrap();

        let ring = AnalyticsRing::default();
        let score = EngagementCyberScore::default();
        let snapshot = build_snapshot(
            &registry,
            SimTime::default(),
            SimPhase::Active,
            None,
            &ring,
            &score,
            Vec::new(),
            Vec::new(),
        );

        assert_eq!(snapshot.entities.len(), 2);
        assert_eq!(snapshot.entities[0].id, "a");
        assert_eq!(snapshot.entities[1].id, "b");
    }

    #[test]
    fn test_snapshot_player_is_none_without_context() {
        let registry = WorldRegistry::new();
        let ring = AnalyticsRing::default();
        let score = EngagementCyberScore::default();
        let snapshot = build_snapshot(
            &registry,
            SimTime::default(),
            SimPhase::MainMenu,
            None,
            &ring,
            &score,
            Vec::new(),
            Vec::new(),
        );
        assert!(snapshot.player.is_none());
    }
}
