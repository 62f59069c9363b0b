//! World registry: entity storage and ordered system list, per §4.2.
//!
//! Wraps `hecs::World` with the id-keyed lookup semantics spec.md names:
//! `getEntity` on an unknown id returns a null sentinel rather than an
//! exception, while `addEntity` on a duplicate id is a hard error.

use std::collections::HashMap;

use hecs::{Entity, World as HecsWorld};

use tacsim_core::components::EntityInfo;
use tacsim_core::error::ErrorKind;

/// Entity registry atop `hecs`: id-keyed lookup in insertion order plus the
/// raw ECS world for component queries.
pub struct WorldRegistry {
    pub ecs: HecsWorld,
    /// Stable-id -> hecs entity, insertion order preserved by iteration
    /// over `order` rather than the map itself.
    by_id: HashMap<String, Entity>,
    order: Vec<String>,
}

impl Default for WorldRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldRegistry {
    pub fn new() -> Self {
        Self {
            ecs: HecsWorld::new(),
            by_id: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Spawns `components` tagged with `info`, failing if `info.id` is
    /// already registered.
    pub fn add_entity(
        &mut self,
        info: EntityInfo,
        components: impl hecs::DynamicBundle,
    ) -> Result<Entity, ErrorKind> {
        if self.by_id.contains_key(&info.id) {
            return Err(ErrorKind::DuplicateEntity(info.id));
        }
        let id = info.id.clone();
        let entity = self.ecs.spawn(components);
        self.ecs.insert_one(entity, info).ok();
        self.by_id.insert(id.clone(), entity);
        self.order.push(id);
        Ok(entity)
    }

    /// Removes an entity by id. No-op (not an error) if the id is unknown,
    /// matching the "no exception" tone of the registry's other lookups.
    pub fn remove_entity(&mut self, id: &str) {
        if let Some(entity) = self.by_id.remove(id) {
            self.order.retain(|existing| existing != id);
            let _ = self.ecs.despawn(entity);
        }
    }

    /// Null-sentinel lookup: `None` for an unknown id, never an error.
    pub fn get_entity(&self, id: &str) -> Option<Entity> {
        self.by_id.get(id).copied()
    }

    pub fn id_of(&self, entity: Entity) -> Option<&str> {
        self.by_id
            .iter()
            .find(|(_, e)| **e == entity)
            .map(|(id, _)| id.as_str())
    }

    /// Ids in insertion order.
    pub fn iter_ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tacsim_core::enums::{EntityKind, Team};
    use tacsim_core::components::EntityState;

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
    fn test_add_and_get_entity() {
        let mut reg = WorldRegistry::new();
        reg.add_entity(info("alpha"), (EntityState::default(),)).unwrap();
        assert!(reg.get_entity("alpha").is_some());
        assert!(reg.get_entity("missing").is_none());
    }

    #[test]
    fn test_duplicate_id_fails() {
        let mut reg = WorldRegistry::new();
        reg.add_entity(info("alpha"), (EntityState::default(),)).unwrap();
        let err = reg.add_entity(info("alpha"), (EntityState::default(),)).unwrap_err();
        assert_eq!(err, ErrorKind::DuplicateEntity("alpha".to_string()));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut reg = WorldRegistry::new();
        reg.add_entity(info("c"), (EntityState::default(),)).unwrap();
        reg.add_entity(info("a"), (EntityState::default(),)).unwrap();
        reg.add_entity(info("b"), (EntityState::default(),)).unwrap();
        let ids: Vec<&str> = reg.iter_ids().collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut reg = WorldRegistry::new();
        reg.remove_entity("nobody");
        assert_eq!(reg.len(), 0);
    }
}
