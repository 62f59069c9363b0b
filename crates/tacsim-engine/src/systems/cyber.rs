//! Cyber attack/defense system — drives `EntityState::cyber` flags each
//! tick, per §12's supplemented cyber system. Generalizes the teacher's
//! engagement-phase progression (`fire_control.rs`'s phase-advance
//! pattern) from missile engagements to cyber engagements: every enabled,
//! non-neutral `CyberComponent` entity creeps through
//! scan -> exploit -> control/disable/exfil, countered by a parallel
//! patch/isolate/restore progression once a stage is reached.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use tacsim_core::components::{CyberComponent, EntityInfo, EntityState};
use tacsim_core::enums::Team;

/// Per-tick probability an eligible target advances one attack stage.
const ATTACK_ADVANCE_PROB: f64 = 0.02;
/// Per-tick probability a compromised target advances one defense stage.
const DEFENSE_ADVANCE_PROB: f64 = 0.03;

/// Advances the cyber attack/defense state machine for every enabled
/// `CyberComponent` entity. Neutral-team entities are never targeted.
pub fn run(world: &mut World, rng: &mut ChaCha8Rng) {
    for (_entity, (cyber, info, state)) in
        world.query_mut::<(&CyberComponent, &EntityInfo, &mut EntityState)>()
    {
        if !cyber.enabled || info.team == Team::Neutral {
            continue;
        }
        let flags = &mut state.cyber;

        if !flags.scanned {
            if rng.gen_bool(ATTACK_ADVANCE_PROB) {
                flags.scanned = true;
            }
        } else if !flags.exploited {
            if rng.gen_bool(ATTACK_ADVANCE_PROB) {
                flags.exploited = true;
            }
        } else if !flags.controlled && !flags.data_exfil {
            match rng.gen_range(0..3) {
                0 => {
                    if rng.gen_bool(ATTACK_ADVANCE_PROB) {
                        flags.controlled = true;
                    }
                }
                1 => {
                    if rng.gen_bool(ATTACK_ADVANCE_PROB) {
                        flags.subsystems_disabled += 1;
                    }
                }
                _ => {
                    if rng.gen_bool(ATTACK_ADVANCE_PROB) {
                        flags.data_exfil = true;
                    }
                }
            }
        }

        if flags.scanned && !flags.patched && rng.gen_bool(DEFENSE_ADVANCE_PROB) {
            flags.patched = true;
        }
        if (flags.controlled || flags.subsystems_disabled > 0)
            && !flags.isolated
            && rng.gen_bool(DEFENSE_ADVANCE_PROB)
        {
            flags.isolated = true;
        }
        if flags.isolated && !flags.restored && rng.gen_bool(DEFENSE_ADVANCE_PROB) {
            flags.restored = true;
            flags.controlled = false;
            flags.subsystems_disabled = 0;
            flags.data_exfil = false;
            flags.isolated = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use tacsim_core::components::PhysicsComponent;
    use tacsim_core::enums::EntityKind;

    fn spawn(world: &mut World, team: Team) -> hecs::Entity {
        world.spawn((
            EntityInfo {
                id: "a".to_string(),
                name: "a".to_string(),
                kind: EntityKind::Aircraft,
                team,
                active: true,
                viz_category: None,
            },
            EntityState::default(),
            CyberComponent { enabled: true },
            PhysicsComponent::default(),
        ))
    }

    #[test]
    fn test_neutral_team_is_never_scanned() {
        let mut world = World::new();
        let entity = spawn(&mut world, Team::Neutral);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..1000 {
            run(&mut world, &mut rng);
        }
        assert!(!world.get::<&EntityState>(entity).unwrap().cyber.scanned);
    }

    #[test]
    fn test_repeated_ticks_eventually_progress_attack() {
        let mut world = World::new();
        let entity = spawn(&mut world, Team::Blue);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..2000 {
            run(&mut world, &mut rng);
        }
        assert!(world.get::<&EntityState>(entity).unwrap().cyber.scanned);
    }
}
