//! Minimal communications router, standing in for the external "comm
//! routing engine" collaborator named in §6 — the same way the teacher's
//! own radar/fire-control systems stand in for a hypothetical real sensor
//! vendor model (§12). Delivers a message between every pair of enabled
//! `CommComponent` entities that share at least one network membership,
//! with a simulated delivery probability and fixed latency.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use tacsim_core::components::CommComponent;

const DELIVERY_PROBABILITY: f64 = 0.95;
const LATENCY_SECS: f64 = 0.2;

/// Tracks lifetime delivery statistics across ticks.
#[derive(Default)]
pub struct CommRouter {
    sent: u32,
    delivered: u32,
}

impl CommRouter {
    pub fn delivery_rate(&self) -> f64 {
        if self.sent == 0 {
            1.0
        } else {
            self.delivered as f64 / self.sent as f64
        }
    }

    pub fn latency_secs(&self) -> f64 {
        LATENCY_SECS
    }

    /// Simulates one delivery attempt per active link this tick and
    /// returns the active-link count.
    pub fn tick(&mut self, world: &World, rng: &mut ChaCha8Rng) -> u32 {
        let memberships: Vec<Vec<String>> = world
            .query::<&CommComponent>()
            .iter()
            .filter(|(_, comm)| comm.enabled)
            .map(|(_, comm)| comm.membership.clone())
            .collect();

        let mut active_links = 0u32;
        for i in 0..memberships.len() {
            for j in (i + 1)..memberships.len() {
                if memberships[i].iter().any(|m| memberships[j].contains(m)) {
                    active_links += 1;
                    self.sent += 1;
                    if rng.gen_bool(DELIVERY_PROBABILITY) {
                        self.delivered += 1;
                    }
                }
            }
        }
        active_links
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn spawn(world: &mut World, membership: &[&str]) {
        world.spawn((CommComponent {
            enabled: true,
            membership: membership.iter().map(|m| m.to_string()).collect(),
        },));
    }

    #[test]
    fn test_shared_membership_counts_as_active_link() {
        let mut world = World::new();
        spawn(&mut world, &["blue_net"]);
        spawn(&mut world, &["blue_net"]);
        let mut router = CommRouter::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(router.tick(&world, &mut rng), 1);
    }

    #[test]
    fn test_disjoint_membership_has_no_link() {
        let mut world = World::new();
        spawn(&mut world, &["blue_net"]);
        spawn(&mut world, &["red_net"]);
        let mut router = CommRouter::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(router.tick(&world, &mut rng), 0);
        assert_eq!(router.delivery_rate(), 1.0);
    }
}
