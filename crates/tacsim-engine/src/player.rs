//! Player Hijack Manager and Player Context, per §3 "Player Context" and §4.3.

use hecs::Entity;

use tacsim_core::components::{
    AiComponent, ControlComponent, EntityInfo, EntityState, PhysicsComponent, PropulsionComponent,
    SensorsComponent, WeaponsComponent,
};
use tacsim_core::enums::{
    AutoExecState, CameraMode, ControlKind, EntityPhase, PhysicsKind, PointingMode,
};
use tacsim_core::error::ErrorKind;

use crate::world::WorldRegistry;

/// Default chase-camera range (meters), per §3 scenario 4.
const DEFAULT_CHASE_CAM_RANGE_M: f64 = 200.0;
const DEFAULT_CHASE_CAM_PITCH_RAD: f64 = 0.2;
/// Thrust threshold (N) an orbital entity's default propulsion mode must
/// clear to be picked automatically, per §4.3's "OMS-class >=25 kN".
const OMS_CLASS_MIN_THRUST_N: f64 = 25_000.0;

/// Everything the core tracks about the currently hijacked entity, per §3's
/// "Player Context". Exists iff a player entity is selected.
pub struct PlayerContext {
    pub entity: Entity,
    pub entity_id: String,
    pub engine_thrust_n: f64,
    pub engine_mass_kg: f64,
    pub engine_label: String,
    pub propulsion_selected: usize,
    pub pointing_mode: PointingMode,
    pub pointing_locked: bool,
    pub pointing_target_id: Option<String>,
    pub auto_exec_state: AutoExecState,
    pub camera_mode: CameraMode,
    pub camera_range_m: f64,
    pub camera_pitch_rad: f64,
    pub camera_heading_offset_rad: f64,
    pub terrain_following_enabled: bool,
    pub terrain_following_agl_target_m: f64,
    pub globe_controls_enabled: bool,
}

impl PlayerContext {
    fn new(entity: Entity, entity_id: String, physics: &PhysicsComponent) -> Self {
        Self {
            entity,
            entity_id,
            engine_thrust_n: physics.thrust_n,
            engine_mass_kg: physics.mass_kg,
            engine_label: physics.label.clone(),
            propulsion_selected: 0,
            pointing_mode: PointingMode::Manual,
            pointing_locked: false,
            pointing_target_id: None,
            auto_exec_state: AutoExecState::Idle,
            camera_mode: CameraMode::Chase,
            camera_range_m: DEFAULT_CHASE_CAM_RANGE_M,
            camera_pitch_rad: DEFAULT_CHASE_CAM_PITCH_RAD,
            camera_heading_offset_rad: 0.0,
            terrain_following_enabled: false,
            terrain_following_agl_target_m: tacsim_core::constants::TERRAIN_FOLLOW_DEFAULT_AGL_M,
            globe_controls_enabled: false,
        }
    }
}

/// `selectPlayer(preferredId)` policy from §4.3: exact match with physics,
/// else first player-input control, else first flight-3DOF physics, else
/// first non-static physics, else first physics at all, else observer.
pub fn select_player(registry: &WorldRegistry, preferred_id: Option<&str>) -> Option<Entity> {
    if let Some(id) = preferred_id {
        if let Some(entity) = registry.get_entity(id) {
            if registry.ecs.get::<&PhysicsComponent>(entity).is_ok() {
                return Some(entity);
            }
        }
    }

    for id in registry.iter_ids() {
        let entity = registry.get_entity(id)?;
        if let Ok(control) = registry.ecs.get::<&ControlComponent>(entity) {
            if control.kind == ControlKind::PlayerInput {
                return Some(entity);
            }
        }
    }

    for id in registry.iter_ids() {
        let entity = registry.get_entity(id)?;
        if let Ok(physics) = registry.ecs.get::<&PhysicsComponent>(entity) {
            if physics.kind == PhysicsKind::Flight3Dof {
                return Some(entity);
            }
        }
    }

    for id in registry.iter_ids() {
        let entity = registry.get_entity(id)?;
        if let Ok(physics) = registry.ecs.get::<&PhysicsComponent>(entity) {
            if physics.kind != PhysicsKind::StaticGround {
                return Some(entity);
            }
        }
    }

    for id in registry.iter_ids() {
        let entity = registry.get_entity(id)?;
        if registry.ecs.get::<&PhysicsComponent>(entity).is_ok() {
            return Some(entity);
        }
    }

    None
}

/// Disables physics/control/ai on `entity`; the visual component is left
/// enabled. Double-applying to the same entity is a no-op (already false).
fn hijack(registry: &mut WorldRegistry, entity: Entity) {
    if let Ok(mut physics) = registry.ecs.get::<&mut PhysicsComponent>(entity) {
        physics.enabled = false;
    }
    if let Ok(mut control) = registry.ecs.get::<&mut ControlComponent>(entity) {
        control.enabled = false;
    }
    if let Ok(mut ai) = registry.ecs.get::<&mut AiComponent>(entity) {
        ai.enabled = false;
    }
}

/// Re-enables physics/control/ai on a former player entity, releasing hijack.
/// Public wrapper for the engine's `EnterObserverMode` command, which drops
/// the player context without handing control to a replacement entity.
pub fn release_player(registry: &mut WorldRegistry, ctx: &PlayerContext) {
    release(registry, ctx.entity);
}

fn release(registry: &mut WorldRegistry, entity: Entity) {
    if let Ok(mut physics) = registry.ecs.get::<&mut PhysicsComponent>(entity) {
        physics.enabled = true;
    }
    if let Ok(mut control) = registry.ecs.get::<&mut ControlComponent>(entity) {
        control.enabled = true;
    }
    if let Ok(mut ai) = registry.ecs.get::<&mut AiComponent>(entity) {
        ai.enabled = true;
    }
}

/// `assumeControl(newEntity)`, per §4.3. Releases the prior player (if any),
/// hijacks the new entity, and rebuilds the player context from its
/// components. Fails with `IneligibleEntity` and makes no state change if
/// the entity is inactive or has no physics component.
pub fn assume_control(
    registry: &mut WorldRegistry,
    current: Option<&PlayerContext>,
    new_entity: Entity,
) -> Result<PlayerContext, ErrorKind> {
    let info = registry
        .ecs
        .get::<&EntityInfo>(new_entity)
        .map_err(|_| ErrorKind::IneligibleEntity("entity not found".to_string()))?;
    if !info.active {
        return Err(ErrorKind::IneligibleEntity(info.id.clone()));
    }
    let entity_id = info.id.clone();
    drop(info);

    let physics_snapshot = {
        let physics = registry
            .ecs
            .get::<&PhysicsComponent>(new_entity)
            .map_err(|_| ErrorKind::IneligibleEntity(entity_id.clone()))?;
        physics.clone()
    };

    if let Some(ctx) = current {
        if ctx.entity != new_entity {
            release(registry, ctx.entity);
        }
    }
    hijack(registry, new_entity);

    let mut ctx = PlayerContext::new(new_entity, entity_id, &physics_snapshot);

    if let Ok(propulsion) = registry.ecs.get::<&PropulsionComponent>(new_entity) {
        ctx.propulsion_selected = default_propulsion_index(&propulsion);
    }

    if physics_snapshot.kind == PhysicsKind::Orbital2Body {
        if let Ok(mut state) = registry.ecs.get::<&mut EntityState>(new_entity) {
            if let Some(eci) = state.eci {
                let (heading, gamma, speed) = tacsim_orbital::flight_state_from_eci_gmst0(&eci);
                state.heading_rad = heading;
                state.gamma_rad = gamma;
                state.speed_mps = speed;
            }
            state.current_orbit_positions.clear();
            state.eci_orbit_positions.clear();
        }
    }

    Ok(ctx)
}

fn default_propulsion_index(propulsion: &PropulsionComponent) -> usize {
    propulsion
        .modes
        .iter()
        .position(|mode| matches!(mode, tacsim_core::enums::PropulsionMode::Rocket { thrust_n, .. } if *thrust_n >= OMS_CLASS_MIN_THRUST_N))
        .unwrap_or(propulsion.selected)
}

/// Weapons inventory, sensor list, and entity phase for a freshly-hijacked
/// entity — convenience accessors so the auto-executor/autopilot code
/// doesn't need to re-query components.
pub fn weapons_inventory(registry: &WorldRegistry, entity: Entity) -> Vec<String> {
    registry
        .ecs
        .get::<&WeaponsComponent>(entity)
        .map(|w| w.inventory.iter().map(|slot| slot.name.clone()).collect())
        .unwrap_or_default()
}

pub fn sensors_available(registry: &WorldRegistry, entity: Entity) -> bool {
    registry
        .ecs
        .get::<&SensorsComponent>(entity)
        .map(|s| s.enabled)
        .unwrap_or(false)
}

pub fn is_in_flight_phase(registry: &WorldRegistry, entity: Entity) -> bool {
    registry
        .ecs
        .get::<&EntityState>(entity)
        .map(|s| s.phase == EntityPhase::Flight)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tacsim_core::components::EntityState;
    use tacsim_core::enums::{EntityKind, Team};

    fn spawn_with_physics(
        registry: &mut WorldRegistry,
        id: &str,
        kind: PhysicsKind,
        active: bool,
    ) -> Entity {
        let info = EntityInfo {
            id: id.to_string(),
            name: id.to_string(),
            kind: EntityKind::Aircraft,
            team: Team::Blue,
            active,
            viz_category: None,
        };
        registry
            .add_entity(
                info,
                (
                    EntityState::default(),
                    PhysicsComponent {
                        kind,
                        ..Default::default()
                    },
                    ControlComponent::default(),
                    AiComponent::default(),
                ),
            )
            .unwrap()
    }

    #[test]
    fn test_select_player_exact_id_match() {
        let mut registry = WorldRegistry::new();
        spawn_with_physics(&mut registry, "other", PhysicsKind::StaticGround, true);
        let target = spawn_with_physics(&mut registry, "target", PhysicsKind::Flight3Dof, true);
        assert_eq!(select_player(&registry, Some("target")), Some(target));
    }

    #[test]
    fn test_select_player_prefers_flight3dof_fallback() {
        let mut registry = WorldRegistry::new();
        spawn_with_physics(&mut registry, "ground", PhysicsKind::StaticGround, true);
        let flight = spawn_with_physics(&mut registry, "flight", PhysicsKind::Flight3Dof, true);
        assert_eq!(select_player(&registry, None), Some(flight));
    }

    #[test]
    fn test_select_player_none_when_no_physics() {
        let registry = WorldRegistry::new();
        assert_eq!(select_player(&registry, None), None);
    }

    #[test]
    fn test_assume_control_hijacks_target() {
        let mut registry = WorldRegistry::new();
        let entity = spawn_with_physics(&mut registry, "a", PhysicsKind::Flight3Dof, true);
        let ctx = assume_control(&mut registry, None, entity).unwrap();
        assert_eq!(ctx.entity, entity);
        assert!(!registry.ecs.get::<&PhysicsComponent>(entity).unwrap().enabled);
    }

    #[test]
    fn test_assume_control_releases_prior_player() {
        let mut registry = WorldRegistry::new();
        let a = spawn_with_physics(&mut registry, "a", PhysicsKind::Flight3Dof, true);
        let b = spawn_with_physics(&mut registry, "b", PhysicsKind::Flight3Dof, true);
        let ctx_a = assume_control(&mut registry, None, a).unwrap();
        let ctx_b = assume_control(&mut registry, Some(&ctx_a), b).unwrap();
        assert!(registry.ecs.get::<&PhysicsComponent>(a).unwrap().enabled);
        assert!(!registry.ecs.get::<&PhysicsComponent>(b).unwrap().enabled);
        assert_eq!(ctx_b.entity, b);
    }

    #[test]
    fn test_assume_control_fails_on_inactive_entity() {
        let mut registry = WorldRegistry::new();
        let entity = spawn_with_physics(&mut registry, "a", PhysicsKind::Flight3Dof, false);
        assert!(assume_control(&mut registry, None, entity).is_err());
    }

    #[test]
    fn test_double_hijack_is_noop() {
        let mut registry = WorldRegistry::new();
        let entity = spawn_with_physics(&mut registry, "a", PhysicsKind::Flight3Dof, true);
        hijack(&mut registry, entity);
        hijack(&mut registry, entity);
        assert!(!registry.ecs.get::<&PhysicsComponent>(entity).unwrap().enabled);
    }
}
