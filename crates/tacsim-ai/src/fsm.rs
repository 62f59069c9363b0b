//! Non-player entity behavior finite state machine.
//!
//! Pure functions computing behavior transitions and flight-state updates
//! from archetype, current behavior, and situation. No ECS dependency —
//! operates on plain data so it stays testable without a `hecs::World`.

use tacsim_core::enums::AiBehavior;
use tacsim_core::types::GeodeticPosition;

use crate::profiles::{get_engagement_profile, get_patrol_profile, impact_range_m, AiProfileKey, EngagementProfile};

/// Input to the AI FSM for a single entity.
pub struct AiContext {
    pub profile: AiProfileKey,
    pub behavior: AiBehavior,
    pub position: GeodeticPosition,
    pub heading_rad: f64,
    pub speed_mps: f64,
    pub gamma_rad: f64,
    pub target: Option<GeodeticPosition>,
    pub range_to_target_m: f64,
    pub is_engaged: bool,
    pub elapsed_in_phase_secs: f64,
}

/// Output from the AI FSM.
pub struct AiUpdate {
    pub new_behavior: AiBehavior,
    pub new_heading_rad: f64,
    pub new_speed_mps: f64,
    pub new_gamma_rad: f64,
    pub behavior_changed: bool,
}

fn unchanged(ctx: &AiContext) -> AiUpdate {
    AiUpdate {
        new_behavior: ctx.behavior,
        new_heading_rad: ctx.heading_rad,
        new_speed_mps: ctx.speed_mps,
        new_gamma_rad: ctx.gamma_rad,
        behavior_changed: false,
    }
}

/// Evaluates the FSM for one entity, returning its updated behavior and
/// flight state for the caller to apply to `EntityState`.
pub fn evaluate(ctx: &AiContext) -> AiUpdate {
    match ctx.behavior {
        AiBehavior::Destroyed | AiBehavior::Impact => unchanged(ctx),
        AiBehavior::StationKeep => unchanged(ctx),
        AiBehavior::Patrol => evaluate_patrol(ctx),
        AiBehavior::Cruise => evaluate_cruise(ctx),
        AiBehavior::PopUp => evaluate_popup(ctx),
        AiBehavior::Terminal => evaluate_terminal(ctx),
        AiBehavior::Evasive => evaluate_evasive(ctx),
    }
}

fn evaluate_patrol(ctx: &AiContext) -> AiUpdate {
    let profile = get_patrol_profile(ctx.profile);
    let phase = (ctx.elapsed_in_phase_secs / profile.racetrack_period_secs) * std::f64::consts::TAU;
    let swing = phase.sin() * profile.heading_swing_rad;
    AiUpdate {
        new_behavior: AiBehavior::Patrol,
        new_heading_rad: (ctx.heading_rad + swing).rem_euclid(std::f64::consts::TAU),
        new_speed_mps: profile.loiter_speed_mps,
        new_gamma_rad: 0.0,
        behavior_changed: false,
    }
}

fn evaluate_cruise(ctx: &AiContext) -> AiUpdate {
    let profile = get_engagement_profile(ctx.profile);

    if let Some(popup_range) = profile.popup_range_m {
        if ctx.range_to_target_m <= popup_range {
            return AiUpdate {
                new_behavior: AiBehavior::PopUp,
                new_heading_rad: ctx.heading_rad,
                new_speed_mps: ctx.speed_mps,
                new_gamma_rad: (profile.popup_altitude_m / profile.popup_duration_secs / ctx.speed_mps.max(1.0))
                    .clamp(-1.0, 1.0)
                    .asin(),
                behavior_changed: true,
            };
        }
    }

    if profile.terminal_range_m > 0.0 && ctx.range_to_target_m <= profile.terminal_range_m {
        return compute_terminal_transition(ctx, &profile);
    }

    if ctx.range_to_target_m <= impact_range_m() {
        return impact(ctx);
    }

    unchanged(ctx)
}

fn evaluate_popup(ctx: &AiContext) -> AiUpdate {
    let profile = get_engagement_profile(ctx.profile);
    if ctx.elapsed_in_phase_secs >= profile.popup_duration_secs {
        return compute_terminal_transition(ctx, &profile);
    }
    unchanged(ctx)
}

fn evaluate_terminal(ctx: &AiContext) -> AiUpdate {
    if ctx.range_to_target_m <= impact_range_m() {
        return impact(ctx);
    }

    let profile = get_engagement_profile(ctx.profile);
    if profile.can_evade && ctx.is_engaged {
        return AiUpdate {
            new_behavior: AiBehavior::Evasive,
            new_heading_rad: ctx.heading_rad,
            new_speed_mps: ctx.speed_mps,
            new_gamma_rad: ctx.gamma_rad,
            behavior_changed: true,
        };
    }

    unchanged(ctx)
}

fn evaluate_evasive(ctx: &AiContext) -> AiUpdate {
    if ctx.range_to_target_m <= impact_range_m() {
        return impact(ctx);
    }

    let Some(target) = ctx.target else {
        return unchanged(ctx);
    };
    let heading_to_target = ctx.position.bearing_to(&target);
    let jink = (ctx.elapsed_in_phase_secs * std::f64::consts::TAU * 0.5).sin() * 0.3;

    AiUpdate {
        new_behavior: AiBehavior::Evasive,
        new_heading_rad: (heading_to_target + jink).rem_euclid(std::f64::consts::TAU),
        new_speed_mps: ctx.speed_mps,
        new_gamma_rad: ctx.gamma_rad,
        behavior_changed: false,
    }
}

fn impact(ctx: &AiContext) -> AiUpdate {
    AiUpdate {
        new_behavior: AiBehavior::Impact,
        new_heading_rad: ctx.heading_rad,
        new_speed_mps: 0.0,
        new_gamma_rad: 0.0,
        behavior_changed: true,
    }
}

fn compute_terminal_transition(ctx: &AiContext, profile: &EngagementProfile) -> AiUpdate {
    let new_speed = profile.cruise_speed_mps * profile.terminal_speed_factor;

    let Some(target) = ctx.target else {
        return AiUpdate {
            new_behavior: AiBehavior::Terminal,
            new_heading_rad: ctx.heading_rad,
            new_speed_mps: new_speed,
            new_gamma_rad: ctx.gamma_rad,
            behavior_changed: true,
        };
    };

    let heading_to_target = ctx.position.bearing_to(&target);
    let horiz_dist = ctx.position.horizontal_range_to(&target).max(1.0);

    let gamma = if profile.terminal_dive {
        -(ctx.position.alt / horiz_dist).atan()
    } else if ctx.position.alt > profile.cruise_altitude_m + 10.0 {
        -(ctx.position.alt / (new_speed * 3.0)).atan()
    } else {
        0.0
    };

    AiUpdate {
        new_behavior: AiBehavior::Terminal,
        new_heading_rad: heading_to_target,
        new_speed_mps: new_speed,
        new_gamma_rad: gamma,
        behavior_changed: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_ctx() -> AiContext {
        AiContext {
            profile: AiProfileKey::SeaSkimmerMk1,
            behavior: AiBehavior::Cruise,
            position: GeodeticPosition::new(0.0, 0.0, 5.0),
            heading_rad: 0.0,
            speed_mps: 260.0,
            gamma_rad: 0.0,
            target: Some(GeodeticPosition::new(0.001, 0.0, 0.0)),
            range_to_target_m: 50_000.0,
            is_engaged: false,
            elapsed_in_phase_secs: 0.0,
        }
    }

    #[test]
    fn test_cruise_transitions_to_popup_within_range() {
        let mut ctx = base_ctx();
        ctx.range_to_target_m = 10_000.0;
        let update = evaluate(&ctx);
        assert_eq!(update.new_behavior, AiBehavior::PopUp);
        assert!(update.behavior_changed);
    }

    #[test]
    fn test_supersonic_cruiser_skips_popup() {
        let mut ctx = base_ctx();
        ctx.profile = AiProfileKey::SupersonicCruiser;
        ctx.range_to_target_m = 5_000.0;
        let update = evaluate(&ctx);
        assert_eq!(update.new_behavior, AiBehavior::Terminal);
    }

    #[test]
    fn test_popup_transitions_to_terminal_after_duration() {
        let mut ctx = base_ctx();
        ctx.behavior = AiBehavior::PopUp;
        ctx.elapsed_in_phase_secs = 10.0;
        let update = evaluate(&ctx);
        assert_eq!(update.new_behavior, AiBehavior::Terminal);
    }

    #[test]
    fn test_terminal_evades_when_engaged_and_capable() {
        let mut ctx = base_ctx();
        ctx.profile = AiProfileKey::SeaSkimmerMk2;
        ctx.behavior = AiBehavior::Terminal;
        ctx.is_engaged = true;
        let update = evaluate(&ctx);
        assert_eq!(update.new_behavior, AiBehavior::Evasive);
    }

    #[test]
    fn test_impact_within_impact_range() {
        let mut ctx = base_ctx();
        ctx.range_to_target_m = 10.0;
        let update = evaluate(&ctx);
        assert_eq!(update.new_behavior, AiBehavior::Impact);
        assert_eq!(update.new_speed_mps, 0.0);
    }

    #[test]
    fn test_station_keep_never_changes() {
        let mut ctx = base_ctx();
        ctx.behavior = AiBehavior::StationKeep;
        let update = evaluate(&ctx);
        assert_eq!(update.new_behavior, AiBehavior::StationKeep);
        assert!(!update.behavior_changed);
    }
}
