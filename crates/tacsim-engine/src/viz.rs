//! Visualization & Analytics Plane, per §4.8.
//!
//! Three cooperating pieces: per-tick viz-flag application, the throttled
//! engagement/cyber scanners, and the analytics ring buffer.

use std::collections::{HashMap, HashSet, VecDeque};

use hecs::Entity;

use tacsim_core::components::{CyberFlags, EntityInfo, EntityState};
use tacsim_core::constants::{
    ANALYTICS_RING_CAPACITY, CYBER_SCORE_CONTROL, CYBER_SCORE_DISABLED, CYBER_SCORE_EXFIL,
    CYBER_SCORE_EXPLOIT, CYBER_SCORE_ISOLATE, CYBER_SCORE_PATCH, CYBER_SCORE_RESTORED,
    CYBER_SCORE_SCAN, EARTH_RADIUS_M, REGIME_GEO_ALT_M, REGIME_GEO_TOLERANCE_M,
    REGIME_HEO_ECC_THRESHOLD, REGIME_LEO_MAX_ALT_M, REGIME_MEO_MAX_ALT_M, SCANNER_HZ,
};
use tacsim_core::enums::{EntityKind, EngagementResult, Regime, Team, VizGroupKey};
use tacsim_core::preferences::VizGlobalFlags;
use tacsim_core::state::{AnalyticsSnapshot, CyberAttackTally, CyberDefenseTally, EngagementCyberScore, ScoreLogEntry, WeaponClassTally};
use tacsim_core::types::OrbitalElements;

use crate::world::WorldRegistry;

// --- Viz group application ---

#[derive(Debug, Clone, Default)]
pub struct VizPlane {
    pub group_visibility: HashMap<VizGroupKey, bool>,
    pub global_flags: VizGlobalFlags,
}

impl VizPlane {
    pub fn set_group_visible(&mut self, key: VizGroupKey, show: bool) {
        self.group_visibility.insert(key, show);
    }

    fn group_show(&self, info: &EntityInfo) -> bool {
        let type_show = self
            .group_visibility
            .get(&VizGroupKey::Type(info.kind))
            .copied()
            .unwrap_or(true);
        let team_show = self
            .group_visibility
            .get(&VizGroupKey::Team(info.team))
            .copied()
            .unwrap_or(true);
        let cat_show = info
            .viz_category
            .as_ref()
            .map(|cat| {
                self.group_visibility
                    .get(&VizGroupKey::Category(cat.clone()))
                    .copied()
                    .unwrap_or(true)
            })
            .unwrap_or(true);
        type_show && team_show && cat_show
    }

    /// Writes `_viz*` scratch fields on every entity's state. The player
    /// entity is exempt from group suppression.
    pub fn apply(&self, registry: &mut WorldRegistry, player_entity: Option<Entity>) {
        for (entity, (info, state)) in registry.ecs.query_mut::<(&EntityInfo, &mut EntityState)>() {
            let show = player_entity == Some(entity) || self.group_show(info);
            state.viz.show = show;
            state.viz.orbits = show && self.global_flags.orbits;
            state.viz.trails = show && self.global_flags.trails;
            state.viz.labels = show && self.global_flags.labels;
            state.viz.sensors = show && self.global_flags.sensors;
            state.viz.comms = show && self.global_flags.comms;
        }
    }
}

// --- Engagement & cyber scanners ---

type EngagementDedupeKey = (String, String, EngagementResult, u64);

#[derive(Default)]
pub struct EngagementCyberScanner {
    seen_engagements: HashSet<EngagementDedupeKey>,
    prev_cyber: HashMap<String, CyberFlags>,
    elapsed_since_scan_secs: f64,
}

impl EngagementCyberScanner {
    /// Runs both scanners if the 2 Hz throttle interval has elapsed.
    pub fn tick(
        &mut self,
        dt: f64,
        tick_number: u64,
        registry: &WorldRegistry,
        player_entity_id: Option<&str>,
        score: &mut EngagementCyberScore,
    ) {
        self.elapsed_since_scan_secs += dt;
        let interval = 1.0 / SCANNER_HZ;
        if self.elapsed_since_scan_secs < interval {
            return;
        }
        self.elapsed_since_scan_secs = 0.0;

        self.scan_engagements(tick_number, registry, player_entity_id, score);
        self.scan_cyber(tick_number, registry, score);
    }

    fn scan_engagements(
        &mut self,
        tick_number: u64,
        registry: &WorldRegistry,
        player_entity_id: Option<&str>,
        score: &mut EngagementCyberScore,
    ) {
        for id in registry.iter_ids() {
            let Some(entity) = registry.get_entity(id) else {
                continue;
            };
            let Ok(state) = registry.ecs.get::<&EntityState>(entity) else {
                continue;
            };
            let records = state
                .engagements
                .iter()
                .chain(state.a2a_engagements.iter())
                .chain(state.kk_engagements.iter());

            for record in records {
                let key = (
                    record.source_id.clone(),
                    record.target_id.clone(),
                    record.result,
                    record.engagement_time.to_bits(),
                );
                if !self.seen_engagements.insert(key) {
                    continue;
                }

                let tally = score.weapon_classes.entry(record.class).or_insert_with(WeaponClassTally::default);
                match record.result {
                    EngagementResult::Kill => tally.kills += 1,
                    EngagementResult::Miss => tally.misses += 1,
                }

                if record.result == EngagementResult::Kill {
                    if Some(record.source_id.as_str()) == player_entity_id {
                        score.player_kills += 1;
                    }
                    if Some(record.target_id.as_str()) == player_entity_id {
                        score.player_deaths += 1;
                    }
                }

                score.push_log(ScoreLogEntry {
                    tick: tick_number,
                    team: Team::Neutral,
                    message: format!(
                        "{:?} {:?}->{} : {:?}",
                        record.class, record.source_id, record.target_id, record.result
                    ),
                });
            }
        }
    }

    fn scan_cyber(&mut self, tick_number: u64, registry: &WorldRegistry, score: &mut EngagementCyberScore) {
        for id in registry.iter_ids() {
            let Some(entity) = registry.get_entity(id) else {
                continue;
            };
            let (Ok(info), Ok(state)) = (
                registry.ecs.get::<&EntityInfo>(entity),
                registry.ecs.get::<&EntityState>(entity),
            ) else {
                continue;
            };
            let previous = self.prev_cyber.get(id).copied().unwrap_or_default();
            let current = state.cyber;
            let victim_team = info.team;
            let attacker_team = opposite_team(victim_team);

            let attack = score.attack.entry(attacker_team).or_insert_with(CyberAttackTally::default);
            if current.scanned && !previous.scanned {
                attack.scans += 1;
                attack.total_points += CYBER_SCORE_SCAN;
            }
            if current.exploited && !previous.exploited {
                attack.exploits += 1;
                attack.total_points += CYBER_SCORE_EXPLOIT;
            }
            if current.controlled && !previous.controlled {
                attack.controlled += 1;
                attack.total_points += CYBER_SCORE_CONTROL;
            }
            if current.subsystems_disabled > previous.subsystems_disabled {
                let delta = current.subsystems_disabled - previous.subsystems_disabled;
                attack.subsystems_disabled += delta;
                attack.total_points += CYBER_SCORE_DISABLED * delta;
            }
            if current.data_exfil && !previous.data_exfil {
                attack.data_exfil += 1;
                attack.total_points += CYBER_SCORE_EXFIL;
            }

            let defense = score.defense.entry(victim_team).or_insert_with(CyberDefenseTally::default);
            if current.patched && !previous.patched {
                defense.patches += 1;
                defense.total_points += CYBER_SCORE_PATCH;
            }
            if current.isolated && !previous.isolated {
                defense.isolated += 1;
                defense.total_points += CYBER_SCORE_ISOLATE;
            }
            if current.restored && !previous.restored {
                defense.restored += 1;
                defense.total_points += CYBER_SCORE_RESTORED;
            }

            if current != previous {
                score.push_log(ScoreLogEntry {
                    tick: tick_number,
                    team: victim_team,
                    message: format!("cyber posture changed on {id}"),
                });
            }

            self.prev_cyber.insert(id.to_string(), current);
        }
    }
}

fn opposite_team(team: Team) -> Team {
    match team {
        Team::Blue => Team::Red,
        Team::Red => Team::Blue,
        Team::Neutral => Team::Neutral,
    }
}

fn regime_of(elements: &OrbitalElements) -> Regime {
    if elements.ecc > REGIME_HEO_ECC_THRESHOLD {
        return Regime::Heo;
    }
    let alt = elements.sma - EARTH_RADIUS_M;
    if (alt - REGIME_GEO_ALT_M).abs() < REGIME_GEO_TOLERANCE_M {
        Regime::Geo
    } else if alt < REGIME_LEO_MAX_ALT_M {
        Regime::Leo
    } else if alt < REGIME_MEO_MAX_ALT_M {
        Regime::Meo
    } else {
        Regime::Other
    }
}

// --- Analytics ring buffer ---

#[derive(Default)]
pub struct AnalyticsRing {
    buffer: VecDeque<AnalyticsSnapshot>,
    elapsed_since_sample_secs: f64,
}

impl AnalyticsRing {
    pub fn snapshots(&self) -> impl Iterator<Item = &AnalyticsSnapshot> {
        self.buffer.iter()
    }

    #[allow(clippy::too_many_arguments)]
    pub fn tick(
        &mut self,
        dt: f64,
        sim_time: f64,
        registry: &WorldRegistry,
        comm_active_links: u32,
        comm_delivery_rate: f64,
        comm_latency_secs: f64,
    ) {
        self.elapsed_since_sample_secs += dt;
        if self.elapsed_since_sample_secs < 1.0 {
            return;
        }
        self.elapsed_since_sample_secs = 0.0;

        let mut alive_count = 0u32;
        let mut dead_count = 0u32;
        let mut has_fuel_count = 0u32;
        let mut regime_histogram: HashMap<Regime, u32> = HashMap::new();
        let mut team_histogram: HashMap<Team, u32> = HashMap::new();
        let mut type_histogram: HashMap<EntityKind, u32> = HashMap::new();
        let mut alt_sum = 0.0;
        let mut speed_sum = 0.0;
        let mut cyber_attack_count = 0u32;

        for (_entity, (info, state)) in registry.ecs.query::<(&EntityInfo, &EntityState)>().iter() {
            if info.active {
                alive_count += 1;
            } else {
                dead_count += 1;
            }
            if state.engine_on {
                has_fuel_count += 1;
            }
            *team_histogram.entry(info.team).or_insert(0) += 1;
            *type_histogram.entry(info.kind).or_insert(0) += 1;
            if let Some(elements) = &state.orbital {
                *regime_histogram.entry(regime_of(elements)).or_insert(0) += 1;
            }
            alt_sum += state.position.alt;
            speed_sum += state.speed_mps;
            if state.cyber.scanned || state.cyber.exploited || state.cyber.controlled || state.cyber.data_exfil {
                cyber_attack_count += 1;
            }
        }

        let total = (alive_count + dead_count).max(1) as f64;
        self.buffer.push_back(AnalyticsSnapshot {
            sim_time,
            alive_count,
            dead_count,
            has_fuel_count,
            regime_histogram,
            team_histogram,
            type_histogram,
            avg_altitude_m: alt_sum / total,
            avg_speed_mps: speed_sum / total,
            comm_delivery_rate,
            comm_latency_secs,
            comm_active_links,
            jammer_count: 0,
            cyber_attack_count,
        });
        if self.buffer.len() > ANALYTICS_RING_CAPACITY {
            self.buffer.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tacsim_core::components::{EngagementRecord, PhysicsComponent};
    use tacsim_core::enums::WeaponClass;

    fn spawn_entity(registry: &mut WorldRegistry, id: &str, kind: EntityKind, team: Team) -> Entity {
        let info = EntityInfo {
            id: id.to_string(),
            name: id.to_string(),
            kind,
            team,
            active: true,
            viz_category: None,
        };
        registry
            .add_entity(info, (EntityState::default(), PhysicsComponent::default()))
            .unwrap()
    }

    #[test]
    fn test_viz_group_suppression_and_player_exemption() {
        let mut registry = WorldRegistry::new();
        let suppressed = spawn_entity(&mut registry, "red1", EntityKind::Aircraft, Team::Red);
        let player = spawn_entity(&mut registry, "blue1", EntityKind::Aircraft, Team::Blue);

        let mut plane = VizPlane::default();
        plane.set_group_visible(VizGroupKey::Team(Team::Red), false);
        plane.apply(&mut registry, Some(player));

        assert!(!registry.ecs.get::<&EntityState>(suppressed).unwrap().viz.show);
        assert!(registry.ecs.get::<&EntityState>(player).unwrap().viz.show);
    }

    #[test]
    fn test_viz_toggle_twice_restores_prior_visibility() {
        let mut registry = WorldRegistry::new();
        let entity = spawn_entity(&mut registry, "a", EntityKind::Aircraft, Team::Blue);
        let mut plane = VizPlane::default();

        plane.apply(&mut registry, None);
        let before = registry.ecs.get::<&EntityState>(entity).unwrap().viz.show;

        plane.set_group_visible(VizGroupKey::Team(Team::Blue), false);
        plane.apply(&mut registry, None);
        plane.set_group_visible(VizGroupKey::Team(Team::Blue), true);
        plane.apply(&mut registry, None);
        let after = registry.ecs.get::<&EntityState>(entity).unwrap().viz.show;

        assert_eq!(before, after);
    }

    #[test]
    fn test_engagement_scanner_dedupes_repeat_scans() {
        let mut registry = WorldRegistry::new();
        let shooter = spawn_entity(&mut registry, "blue1", EntityKind::Aircraft, Team::Blue);
        {
            let mut state = registry.ecs.get::<&mut EntityState>(shooter).unwrap();
            state.a2a_engagements.push(EngagementRecord {
                source_id: "blue1".to_string(),
                target_id: "red1".to_string(),
                class: WeaponClass::A2a,
                result: EngagementResult::Kill,
                engagement_time: 12.5,
            });
        }

        let mut scanner = EngagementCyberScanner::default();
        let mut score = EngagementCyberScore::default();
        scanner.tick(1.0, 1, &registry, Some("blue1"), &mut score);
        scanner.tick(1.0, 2, &registry, Some("blue1"), &mut score);

        assert_eq!(score.player_kills, 1);
        assert_eq!(score.weapon_classes.get(&WeaponClass::A2a).unwrap().kills, 1);
    }

    #[test]
    fn test_analytics_ring_caps_and_samples_per_second() {
        let mut registry = WorldRegistry::new();
        spawn_entity(&mut registry, "a", EntityKind::Aircraft, Team::Blue);
        let mut ring = AnalyticsRing::default();
        ring.tick(0.5, 1.0, &registry, 0, 1.0, 0.0);
        assert_eq!(ring.snapshots().count(), 0);
        ring.tick(0.6, 1.5, &registry, 0, 1.0, 0.0);
        assert_eq!(ring.snapshots().count(), 1);
    }
}
