//! AI system — evaluates the behavior FSM for every enabled non-player
//! entity each tick and applies the resulting heading/speed/gamma/behavior.

use hecs::{Entity, World};

use tacsim_core::components::{AiComponent, EntityState};
use tacsim_core::enums::AiBehavior;

use tacsim_ai::fsm::{evaluate, AiContext, AiUpdate};
use tacsim_ai::profiles::AiProfileKey;

fn profile_key_for(key: &str) -> AiProfileKey {
    match key {
        "sea_skimmer_mk1" => AiProfileKey::SeaSkimmerMk1,
        "sea_skimmer_mk2" => AiProfileKey::SeaSkimmerMk2,
        "supersonic_cruiser" => AiProfileKey::SupersonicCruiser,
        "subsonic_drone" => AiProfileKey::SubsonicDrone,
        "tactical_ballistic" => AiProfileKey::TacticalBallistic,
        _ => AiProfileKey::Patroller,
    }
}

/// Runs the AI system over every enabled `AiComponent` entity, using
/// `current_tick` (scaled by `dt`) to derive time-in-phase.
pub fn run(world: &mut World, current_tick: u64, dt: f64) {
    let mut updates: Vec<(Entity, AiUpdate)> = Vec::new();

    {
        let mut query = world.query::<(&AiComponent, &EntityState)>();
        for (entity, (ai, state)) in query.iter() {
            if !ai.enabled || matches!(ai.behavior, AiBehavior::Destroyed | AiBehavior::Impact) {
                continue;
            }

            let target = ai
                .target_id
                .as_ref()
                .and_then(|id| find_target_position(world, id));
            let range_to_target = target
                .map(|t| state.position.horizontal_range_to(&t))
                .unwrap_or(f64::MAX);
            let elapsed_in_phase =
                current_tick.saturating_sub(ai.phase_start_tick) as f64 * dt;

            let ctx = AiContext {
                profile: profile_key_for(&ai.profile_key),
                behavior: ai.behavior,
                position: state.position,
                heading_rad: state.heading_rad,
                speed_mps: state.speed_mps,
                gamma_rad: state.gamma_rad,
                target,
                range_to_target_m: range_to_target,
                is_engaged: !state.mws.is_empty(),
                elapsed_in_phase_secs: elapsed_in_phase,
            };

            let update = evaluate(&ctx);
            updates.push((entity, update));
        }
    }

    for (entity, update) in updates {
        if let Ok(mut ai) = world.get::<&mut AiComponent>(entity) {
            if update.behavior_changed {
                ai.behavior = update.new_behavior;
                ai.phase_start_tick = current_tick;
            }
        }
        if let Ok(mut state) = world.get::<&mut EntityState>(entity) {
            state.heading_rad = update.new_heading_rad;
            state.speed_mps = update.new_speed_mps;
            state.gamma_rad = update.new_gamma_rad;
        }
    }
}

fn find_target_position(world: &World, target_id: &str) -> Option<tacsim_core::types::GeodeticPosition> {
    let mut query = world.query::<(&tacsim_core::components::EntityInfo, &EntityState)>();
    query
        .iter()
        .find(|(_, (info, _))| info.id == target_id)
        .map(|(_, (_, state))| state.position)
}
