//! Combat session - target HP tracking and a rolling result log

use super::attack::{simulate_attack_with_rng, AttackMode, AttackSetup};
use super::injury::is_past_auto_death;
use super::result::AttackOutcome;
use crate::config::SimulatorConstants;
use crate::types::HitLocation;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, info};

/// Bounded log that keeps the most recent entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatLog<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> CombatLog<T> {
    /// A log holding at most `capacity` entries (at least 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        CombatLog {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an entry, returning the oldest one if it was pushed out
    pub fn push(&mut self, entry: T) -> Option<T> {
        let mut evicted = None;
        // A deserialized log may carry capacity 0 or too many entries
        while self.entries.len() >= self.capacity.max(1) {
            evicted = self.entries.pop_front();
        }
        self.entries.push_back(entry);
        evicted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Oldest first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&T> {
        self.entries.back()
    }
}

impl<T> Extend<T> for CombatLog<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for entry in iter {
            self.push(entry);
        }
    }
}

impl<T> Default for CombatLog<T> {
    fn default() -> Self {
        CombatLog::new(SimulatorConstants::default().log.capacity)
    }
}

/// Totals for one batch of attacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub attacks: usize,
    pub hits: usize,
    pub criticals: usize,
    pub total_damage: i32,
    pub hp_before: i32,
    pub hp_after: i32,
}

/// Mutable state of a combat session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatState {
    pub setup: AttackSetup,
    pub target_location: HitLocation,
    /// Roll a location for each attack instead of using `target_location`
    pub random_location: bool,
    pub current_hp: i32,
    pub results: CombatLog<AttackOutcome>,
}

impl Default for CombatState {
    fn default() -> Self {
        Self::from_constants(&SimulatorConstants::default())
    }
}

impl CombatState {
    pub fn from_constants(constants: &SimulatorConstants) -> Self {
        let combat = &constants.combat;
        CombatState {
            setup: AttackSetup {
                attacker_skill: combat.attacker_skill,
                attacker_strength: combat.attacker_strength,
                base_damage: combat.base_damage.clone(),
                damage_type: combat.damage_type,
                armor_value: combat.armor_value,
                target_max_hp: combat.target_max_hp,
            },
            target_location: combat.target_location,
            random_location: combat.random_location,
            current_hp: combat.target_max_hp,
            results: CombatLog::new(constants.log.capacity),
        }
    }

    pub fn max_hp(&self) -> i32 {
        self.setup.target_max_hp
    }

    /// Change max HP, keeping current HP no higher than the new maximum
    pub fn set_max_hp(&mut self, max_hp: i32) {
        self.setup.target_max_hp = max_hp.max(1);
        self.current_hp = self.current_hp.min(self.setup.target_max_hp);
    }

    /// Run `count` attacks in sequence.
    ///
    /// Each injury's new HP carries into the next attack; every outcome is
    /// appended to the log.
    pub fn run_simulation(
        &mut self,
        count: usize,
        mode: &AttackMode,
        rng: &mut impl Rng,
    ) -> RunSummary {
        let mut summary = RunSummary {
            hp_before: self.current_hp,
            ..Default::default()
        };

        for _ in 0..count {
            let location = if self.random_location {
                HitLocation::random(rng)
            } else {
                self.target_location
            };

            let outcome = simulate_attack_with_rng(&self.setup, mode, location, self.current_hp, rng);

            summary.attacks += 1;
            if outcome.is_hit() {
                summary.hits += 1;
            }
            if outcome.hit.is_critical {
                summary.criticals += 1;
            }
            summary.total_damage = summary.total_damage.saturating_add(outcome.final_damage());
            if let Some(new_hp) = outcome.new_hp() {
                self.current_hp = new_hp;
            }

            debug!(summary = %outcome.summary(), hp = self.current_hp, "attack logged");
            self.results.push(outcome);
        }

        summary.hp_after = self.current_hp;
        info!(
            attacks = summary.attacks,
            hits = summary.hits,
            damage = summary.total_damage,
            hp = self.current_hp,
            "simulation run"
        );
        summary
    }

    pub fn clear_results(&mut self) {
        self.results.clear();
    }

    pub fn full_heal(&mut self) {
        self.current_hp = self.setup.target_max_hp;
    }

    /// Target has reached -5xHP, or failed an HT roll on the last hit
    pub fn is_target_dead(&self) -> bool {
        is_past_auto_death(self.current_hp, self.max_hp())
            || self
                .results
                .latest()
                .and_then(|o| o.injury.as_ref())
                .is_some_and(|i| i.is_dead)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_log_trims_oldest() {
        let mut log = CombatLog::new(3);
        assert_eq!(log.push(1), None);
        log.push(2);
        log.push(3);
        assert_eq!(log.push(4), Some(1));
        assert_eq!(log.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(log.latest(), Some(&4));
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_log_extend_and_zero_capacity() {
        let mut log = CombatLog::new(0);
        assert_eq!(log.capacity(), 1);
        log.extend([1, 2, 3]);
        assert_eq!(log.iter().copied().collect::<Vec<_>>(), vec![3]);
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_deserialized_log_stays_bounded() {
        let mut log: CombatLog<i32> =
            serde_json::from_str(r#"{"entries":[1,2,3],"capacity":0}"#).unwrap();
        assert_eq!(log.push(4), Some(3));
        log.extend([5, 6]);
        assert_eq!(log.iter().copied().collect::<Vec<_>>(), vec![6]);

        let mut over: CombatLog<i32> =
            serde_json::from_str(r#"{"entries":[1,2,3,4],"capacity":2}"#).unwrap();
        over.push(5);
        assert_eq!(over.iter().copied().collect::<Vec<_>>(), vec![4, 5]);
    }

    #[test]
    fn test_from_constants() {
        let state = CombatState::default();
        assert_eq!(state.setup.attacker_skill, 12);
        assert_eq!(state.setup.base_damage, "2d+1");
        assert_eq!(state.setup.armor_value, 4);
        assert_eq!(state.current_hp, 10);
        assert_eq!(state.target_location, HitLocation::Torso);
        assert_eq!(state.results.capacity(), 20);
    }

    #[test]
    fn test_run_simulation_tracks_hp_and_log() {
        let mut state = CombatState::default();
        state.setup.attacker_skill = 30;
        state.setup.armor_value = 0;
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);

        let summary = state.run_simulation(5, &AttackMode::default(), &mut rng);
        assert_eq!(summary.attacks, 5);
        assert_eq!(summary.hp_before, 10);
        assert_eq!(summary.hp_after, state.current_hp);
        assert_eq!(state.results.len(), 5);
        // Only 17-18 can miss at skill 30
        assert!(summary.hits >= 1);
        assert_eq!(state.current_hp, 10 - summary.total_damage);
    }

    #[test]
    fn test_log_capacity_respected() {
        let mut state = CombatState::default();
        let mut rng = rand::rngs::StdRng::seed_from_u64(2);
        state.run_simulation(50, &AttackMode::default(), &mut rng);
        assert_eq!(state.results.len(), 20);
    }

    #[test]
    fn test_heal_and_clear() {
        let mut state = CombatState::default();
        state.current_hp = -3;
        state.full_heal();
        assert_eq!(state.current_hp, 10);

        state.set_max_hp(6);
        assert_eq!(state.current_hp, 6);

        let mut rng = rand::rngs::StdRng::seed_from_u64(2);
        state.run_simulation(2, &AttackMode::default(), &mut rng);
        state.clear_results();
        assert!(state.results.is_empty());
    }

    #[test]
    fn test_dead_target_stays_dead_after_a_miss() {
        let mut state = CombatState::default();
        state.setup.attacker_skill = 30;
        state.setup.armor_value = 0;
        state.setup.base_damage = "100".to_string();
        let mut rng = rand::rngs::StdRng::seed_from_u64(4);

        for _ in 0..10 {
            if state.is_target_dead() {
                break;
            }
            state.run_simulation(1, &AttackMode::default(), &mut rng);
        }
        assert!(state.is_target_dead());
        let hp = state.current_hp;

        // Only 3-4 can hit now
        state.setup.attacker_skill = -20;
        for _ in 0..50 {
            state.run_simulation(1, &AttackMode::default(), &mut rng);
            if state.results.latest().is_some_and(|o| !o.is_hit()) {
                break;
            }
        }
        assert!(state.results.latest().is_some_and(|o| !o.is_hit()));
        assert!(state.current_hp <= hp);
        assert!(state.is_target_dead());
    }

    #[test]
    fn test_random_location_varies() {
        let mut state = CombatState::default();
        state.random_location = true;
        state.setup.attacker_skill = 40;
        let mut rng = rand::rngs::StdRng::seed_from_u64(8);
        state.run_simulation(20, &AttackMode::default(), &mut rng);
        let first = state.results.iter().next().map(|o| o.location);
        assert!(state.results.iter().any(|o| Some(o.location) != first));
    }
}
