//! Entity spawn factories for setting up the simulation world.
//!
//! Generalized across domains (air/space/ground) rather than tied to one
//! archetype family: a handful of factories build the component bundle for
//! a kind of entity, and a thin `setup_mission` wires up a default scene.

use hecs::Entity;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use tacsim_core::components::{
    AiComponent, CommComponent, ControlComponent, CyberComponent, EntityInfo, EntityState,
    PhysicsComponent, PositionHistory, PropulsionComponent, SensorsComponent, VisualComponent,
    WeaponSlot, WeaponsComponent,
};
use tacsim_core::constants::{EARTH_RADIUS_M, MU_EARTH};
use tacsim_core::enums::{
    AiBehavior, ControlKind, EntityKind, EntityPhase, PhysicsKind, PropulsionMode, RocketPreset,
    Team, WeaponClass,
};
use tacsim_core::error::ErrorKind;
use tacsim_core::types::{GeodeticPosition, Vec3};
use tacsim_orbital::{eci_to_geodetic_gmst0, elements_from_eci, vis_viva_speed};

use crate::world::WorldRegistry;

/// Sets up a default scene: a player-controlled aircraft, a ground station
/// it's escorting, and an inbound cruise-missile threat wave.
pub fn setup_mission(registry: &mut WorldRegistry, rng: &mut ChaCha8Rng) -> Result<(), ErrorKind> {
    let home = GeodeticPosition::new(0.0, 0.0, 0.0);
    spawn_ground_station("station1", Team::Blue, home, registry)?;
    spawn_player_aircraft(
        "player1",
        Team::Blue,
        GeodeticPosition::new(0.0, 0.0, 6_000.0),
        0.0,
        220.0,
        registry,
    )?;
    spawn_threat_wave(registry, rng, 4, "sea_skimmer_mk1", home, Team::Red)?;
    Ok(())
}

/// Kinematic tuning for an AI archetype: (cruise speed m/s, cruise altitude m).
fn archetype_params(profile_key: &str) -> (f64, f64) {
    match profile_key {
        "sea_skimmer_mk1" => (260.0, 5.0),
        "sea_skimmer_mk2" => (286.0, 4.0),
        "supersonic_cruiser" => (680.0, 5_000.0),
        "subsonic_drone" => (100.0, 3_000.0),
        "tactical_ballistic" => (1_500.0, 30_000.0),
        _ => (220.0, 6_000.0),
    }
}

/// Spawns a player-eligible aircraft: `Flight3Dof` physics, player-input
/// control, a default air-to-air loadout, and sensors enabled.
pub fn spawn_player_aircraft(
    id: &str,
    team: Team,
    position: GeodeticPosition,
    heading_rad: f64,
    speed_mps: f64,
    registry: &mut WorldRegistry,
) -> Result<Entity, ErrorKind> {
    let info = EntityInfo {
        id: id.to_string(),
        name: id.to_string(),
        kind: EntityKind::Aircraft,
        team,
        active: true,
        viz_category: Some("aircraft".to_string()),
    };

    registry.add_entity(
        info,
        (
            EntityState {
                position,
                heading_rad,
                speed_mps,
                phase: EntityPhase::Flight,
                ..Default::default()
            },
            PhysicsComponent {
                enabled: true,
                kind: PhysicsKind::Flight3Dof,
                thrust_n: 120_000.0,
                mass_kg: 14_000.0,
                label: "turbofan".to_string(),
            },
            ControlComponent {
                enabled: true,
                kind: ControlKind::PlayerInput,
            },
            AiComponent::default(),
            VisualComponent {
                enabled: true,
                model_key: "aircraft_generic".to_string(),
            },
            SensorsComponent {
                enabled: true,
                max_range_m: 180_000.0,
            },
            WeaponsComponent {
                enabled: true,
                inventory: vec![WeaponSlot {
                    name: "a2a_missile".to_string(),
                    class: WeaponClass::A2a,
                    count: 4,
                    max: 4,
                    active: true,
                }],
            },
            PropulsionComponent {
                enabled: true,
                modes: vec![
                    PropulsionMode::Taxi,
                    PropulsionMode::Air,
                    PropulsionMode::Hypersonic,
                ],
                selected: 1,
            },
            CyberComponent::default(),
            CommComponent {
                enabled: true,
                membership: vec!["blue_net".to_string()],
            },
            PositionHistory::default(),
        ),
    )
}

/// Spawns a satellite on a circular orbit of the given altitude/inclination,
/// deriving its ECI state vector directly (no geodetic->ECI round-trip,
/// since a circular inclined orbit isn't expressible as a single heading).
pub fn spawn_orbital_asset(
    id: &str,
    team: Team,
    altitude_m: f64,
    inclination_rad: f64,
    registry: &mut WorldRegistry,
) -> Result<Entity, ErrorKind> {
    let r = EARTH_RADIUS_M + altitude_m;
    let speed = vis_viva_speed(r, r, MU_EARTH);
    let eci = tacsim_core::types::EciState {
        pos: Vec3::new(r, 0.0, 0.0),
        vel: Vec3::new(0.0, speed * inclination_rad.cos(), speed * inclination_rad.sin()),
    };
    let elements = elements_from_eci(&eci, MU_EARTH).ok();
    let position = eci_to_geodetic_gmst0(eci.pos);

    let info = EntityInfo {
        id: id.to_string(),
        name: id.to_string(),
        kind: EntityKind::Satellite,
        team,
        active: true,
        viz_category: Some("satellite".to_string()),
    };

    registry.add_entity(
        info,
        (
            EntityState {
                position,
                speed_mps: speed,
                eci: Some(eci),
                orbital: elements,
                phase: EntityPhase::Flight,
                ..Default::default()
            },
            PhysicsComponent {
                enabled: true,
                kind: PhysicsKind::Orbital2Body,
                thrust_n: 400.0,
                mass_kg: 2_500.0,
                label: "oms".to_string(),
            },
            ControlComponent {
                enabled: true,
                kind: ControlKind::PlayerInput,
            },
            AiComponent {
                enabled: true,
                behavior: AiBehavior::StationKeep,
                ..Default::default()
            },
            VisualComponent {
                enabled: true,
                model_key: "satellite_generic".to_string(),
            },
            SensorsComponent {
                enabled: true,
                max_range_m: 2_000_000.0,
            },
            WeaponsComponent::default(),
            PropulsionComponent {
                enabled: true,
                modes: vec![
                    PropulsionMode::Rocket { thrust_n: 400.0, preset: RocketPreset::Rcs },
                    PropulsionMode::Rocket { thrust_n: 25_000.0, preset: RocketPreset::Oms },
                ],
                selected: 1,
            },
            CyberComponent::default(),
            CommComponent::default(),
            PositionHistory::default(),
        ),
    )
}

/// Spawns a stationary ground entity (station/SAM site): `StaticGround`
/// physics, no control, and a surface-to-air loadout if `is_sam`.
fn spawn_ground_entity(
    id: &str,
    team: Team,
    position: GeodeticPosition,
    is_sam: bool,
    registry: &mut WorldRegistry,
) -> Result<Entity, ErrorKind> {
    let info = EntityInfo {
        id: id.to_string(),
        name: id.to_string(),
        kind: if is_sam { EntityKind::Sam } else { EntityKind::GroundStation },
        team,
        active: true,
        viz_category: Some("ground".to_string()),
    };

    let inventory = if is_sam {
        vec![WeaponSlot {
            name: "sam_battery".to_string(),
            class: WeaponClass::Sam,
            count: 8,
            max: 8,
            active: true,
        }]
    } else {
        Vec::new()
    };

    registry.add_entity(
        info,
        (
            EntityState {
                position,
                phase: EntityPhase::Static,
                ..Default::default()
            },
            PhysicsComponent {
                enabled: true,
                kind: PhysicsKind::StaticGround,
                thrust_n: 0.0,
                mass_kg: 1.0,
                label: String::new(),
            },
            ControlComponent::default(),
            AiComponent::default(),
            VisualComponent {
                enabled: true,
                model_key: if is_sam { "sam_site".to_string() } else { "ground_station".to_string() },
            },
            SensorsComponent {
                enabled: true,
                max_range_m: 120_000.0,
            },
            WeaponsComponent {
                enabled: is_sam,
                inventory,
            },
            PropulsionComponent::default(),
            CyberComponent::default(),
            CommComponent {
                enabled: true,
                membership: vec![format!("{:?}_net", team).to_lowercase()],
            },
            PositionHistory::default(),
        ),
    )
}

pub fn spawn_ground_station(
    id: &str,
    team: Team,
    position: GeodeticPosition,
    registry: &mut WorldRegistry,
) -> Result<Entity, ErrorKind> {
    spawn_ground_entity(id, team, position, false, registry)
}

pub fn spawn_sam_site(
    id: &str,
    team: Team,
    position: GeodeticPosition,
    registry: &mut WorldRegistry,
) -> Result<Entity, ErrorKind> {
    spawn_ground_entity(id, team, position, true, registry)
}

/// Spawns `count` cruise-phase threat aircraft at random bearing/range
/// around `target`, heading toward it.
pub fn spawn_threat_wave(
    registry: &mut WorldRegistry,
    rng: &mut ChaCha8Rng,
    count: usize,
    profile_key: &str,
    target: GeodeticPosition,
    team: Team,
) -> Result<(), ErrorKind> {
    for i in 0..count {
        let id = format!("threat_{profile_key}_{i}");
        spawn_threat(registry, rng, &id, profile_key, target, team)?;
    }
    Ok(())
}

/// Spawns a single inbound threat entity on the Cruise behavior, heading
/// toward `target`. Starting bearing/range are randomized.
pub fn spawn_threat(
    registry: &mut WorldRegistry,
    rng: &mut ChaCha8Rng,
    id: &str,
    profile_key: &str,
    target: GeodeticPosition,
    team: Team,
) -> Result<Entity, ErrorKind> {
    let (speed, altitude) = archetype_params(profile_key);

    let bearing: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
    let range: f64 = rng.gen_range(150_000.0..180_000.0);
    let start = target.destination_point(bearing, range);
    let heading_to_target = start.bearing_to(&target);

    let info = EntityInfo {
        id: id.to_string(),
        name: id.to_string(),
        kind: EntityKind::Aircraft,
        team,
        active: true,
        viz_category: Some("threat".to_string()),
    };

    registry.add_entity(
        info,
        (
            EntityState {
                position: GeodeticPosition::new(start.lat, start.lon, altitude),
                heading_rad: heading_to_target,
                speed_mps: speed,
                phase: EntityPhase::Flight,
                ..Default::default()
            },
            PhysicsComponent {
                enabled: true,
                kind: PhysicsKind::Flight3Dof,
                thrust_n: 0.0,
                mass_kg: 600.0,
                label: String::new(),
            },
            ControlComponent {
                enabled: true,
                kind: ControlKind::Scripted,
            },
            AiComponent {
                enabled: true,
                behavior: AiBehavior::Cruise,
                phase_start_tick: 0,
                target_id: None,
                profile_key: profile_key.to_string(),
            },
            VisualComponent {
                enabled: true,
                model_key: "threat_generic".to_string(),
            },
            SensorsComponent {
                enabled: false,
                max_range_m: 0.0,
            },
            WeaponsComponent::default(),
            PropulsionComponent::default(),
            CyberComponent::default(),
            CommComponent::default(),
            PositionHistory::default(),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_setup_mission_spawns_expected_roster() {
        let mut registry = WorldRegistry::new();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        setup_mission(&mut registry, &mut rng).unwrap();
        assert!(registry.get_entity("player1").is_some());
        assert!(registry.get_entity("station1").is_some());
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn test_spawn_orbital_asset_has_orbital_elements() {
        let mut registry = WorldRegistry::new();
        let entity = spawn_orbital_asset("sat1", Team::Blue, 400_000.0, 0.9, &mut registry).unwrap();
        let state = registry.ecs.get::<&EntityState>(entity).unwrap();
        assert!(state.orbital.is_some());
        assert!(state.eci.is_some());
    }

    #[test]
    fn test_spawn_threat_wave_heads_toward_target() {
        let mut registry = WorldRegistry::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let target = GeodeticPosition::new(0.0, 0.0, 0.0);
        spawn_threat_wave(&mut registry, &mut rng, 2, "sea_skimmer_mk1", target, Team::Red).unwrap();
        assert_eq!(registry.len(), 2);
        for id in registry.iter_ids().map(str::to_string).collect::<Vec<_>>() {
            let entity = registry.get_entity(&id).unwrap();
            let ai = registry.ecs.get::<&AiComponent>(entity).unwrap();
            assert_eq!(ai.behavior, AiBehavior::Cruise);
        }
    }

    #[test]
    fn test_duplicate_spawn_id_fails() {
        let mut registry = WorldRegistry::new();
        spawn_ground_station("s1", Team::Blue, GeodeticPosition::default(), &mut registry).unwrap();
        assert!(spawn_ground_station("s1", Team::Blue, GeodeticPosition::default(), &mut registry).is_err());
    }
}
