//! Cleanup system: removes entities in a terminal lifecycle state.
//!
//! Generalized from the teacher's out-of-bounds/destroyed despawn-buffer
//! pattern: a non-player entity is despawned once its `AiComponent`
//! reaches `Destroyed`/`Impact` or its `EntityState` reaches
//! `EntityPhase::Crashed`. The hijacked player entity is never despawned
//! by this system — loss of a player asset is a host-level concern.

use hecs::Entity;

use tacsim_core::components::{AiComponent, EntityState};
use tacsim_core::enums::{AiBehavior, EntityPhase};

use crate::world::WorldRegistry;

/// Despawns terminal non-player entities, reusing `despawn_buffer` to
/// avoid per-tick allocation.
pub fn run(registry: &mut WorldRegistry, player_entity: Option<Entity>, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, state) in registry.ecs.query::<&EntityState>().iter() {
        if Some(entity) == player_entity {
            continue;
        }
        if state.phase == EntityPhase::Crashed {
            despawn_buffer.push(entity);
        }
    }

    for (entity, ai) in registry.ecs.query::<&AiComponent>().iter() {
        if Some(entity) == player_entity {
            continue;
        }
        if matches!(ai.behavior, AiBehavior::Destroyed | AiBehavior::Impact) && !despawn_buffer.contains(&entity) {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        if let Some(id) = registry.id_of(entity).map(str::to_string) {
            registry.remove_entity(&id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tacsim_core::components::EntityInfo;
    use tacsim_core::enums::{EntityKind, Team};

    fn info(id: &str) -> EntityInfo {
        EntityInfo {
            id: id.to_string(),
            name: id.to_string(),
            kind: EntityKind::Aircraft,
            team: Team::Red,
            active: true,
            viz_category: None,
        }
    }

    #[test]
    fn test_destroyed_ai_entity_is_despawned() {
        let mut registry = WorldRegistry::new();
        registry
            .add_entity(
                info("a"),
                (
                    EntityState::default(),
                    AiComponent { behavior: AiBehavior::Destroyed, ..Default::default() },
                ),
            )
            .unwrap();

        let mut buf = Vec::new();
        run(&mut registry, None, &mut buf);
        assert!(registry.get_entity("a").is_none());
    }

    #[test]
    fn test_crashed_entity_is_despawned() {
        let mut registry = WorldRegistry::new();
        registry
            .add_entity(info("a"), (EntityState { phase: EntityPhase::Crashed, ..Default::default() },))
            .unwrap();

        let mut buf = Vec::new();
        run(&mut registry, None, &mut buf);
        assert!(registry.get_entity("a").is_none());
    }

    #[test]
    fn test_player_entity_is_never_despawned() {
        let mut registry = WorldRegistry::new();
        let player = registry
            .add_entity(
                info("p"),
                (
                    EntityState { phase: EntityPhase::Crashed, ..Default::default() },
                    AiComponent { behavior: AiBehavior::Destroyed, ..Default::default() },
                ),
            )
            .unwrap();

        let mut buf = Vec::new();
        run(&mut registry, Some(player), &mut buf);
        assert!(registry.get_entity("p").is_some());
    }

    #[test]
    fn test_healthy_entity_survives() {
        let mut registry = WorldRegistry::new();
        registry.add_entity(info("a"), (EntityState::default(),)).unwrap();
        let mut buf = Vec::new();
        run(&mut registry, None, &mut buf);
        assert!(registry.get_entity("a").is_some());
    }
}
