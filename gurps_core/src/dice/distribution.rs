//! Exact damage distributions by convolution of uniform dice

use super::formula::ParsedDamage;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::debug;

/// Probability mass over dice sums
pub type SumDistribution = BTreeMap<u32, f64>;

/// One damage value and its probability
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamagePoint {
    pub value: u32,
    pub probability: f64,
}

/// Damage values sorted ascending, probabilities summing to 1
pub type DamageDistribution = Vec<DamagePoint>;

/// Memoized dice-sum distributions keyed by (dice, sides).
///
/// Owned by whoever runs the analysis; sessions that must not share state
/// hold separate caches. The modifier is applied after lookup, so it is not
/// part of the key.
#[derive(Debug, Clone, Default)]
pub struct DistributionCache {
    entries: HashMap<(u32, u32), Arc<SumDistribution>>,
}

impl DistributionCache {
    pub fn new() -> Self {
        DistributionCache {
            entries: HashMap::new(),
        }
    }

    /// Number of (dice, sides) shapes computed so far
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, dice: u32, sides: u32) -> bool {
        self.entries.contains_key(&(dice, sides))
    }

    /// Drop every cached distribution
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Distribution of the sum of `dice` dice with `sides` faces.
    ///
    /// Zero dice (or faceless dice) always sum to 0. Each intermediate
    /// dice count is cached on the way up.
    pub fn dice_sum(&mut self, dice: u32, sides: u32) -> Arc<SumDistribution> {
        if let Some(hit) = self.entries.get(&(dice, sides)) {
            return Arc::clone(hit);
        }

        if dice == 0 || sides == 0 {
            let point = Arc::new(SumDistribution::from([(0, 1.0)]));
            self.entries.insert((dice, sides), Arc::clone(&point));
            return point;
        }

        // Nearest smaller dice count already known
        let mut known = dice - 1;
        while known > 0 && !self.contains(known, sides) {
            known -= 1;
        }

        let mut current = if known == 0 {
            uniform(sides)
        } else {
            self.entries[&(known, sides)].as_ref().clone()
        };
        let start = if known == 0 { 1 } else { known };

        if known == 0 {
            self.entries.insert((1, sides), Arc::new(current.clone()));
        }
        for n in (start + 1)..=dice {
            current = add_die(&current, sides);
            self.entries.insert((n, sides), Arc::new(current.clone()));
        }

        debug!(dice, sides, from = start, "computed dice sum distribution");
        Arc::clone(&self.entries[&(dice, sides)])
    }

    /// Damage distribution of a parsed formula.
    ///
    /// Dice sums are shifted by the modifier and clamped at 0; sums that
    /// clamp to the same value have their probability merged.
    pub fn damage_distribution(&mut self, parsed: &ParsedDamage) -> DamageDistribution {
        if parsed.is_flat() {
            return vec![DamagePoint {
                value: parsed.modifier.max(0) as u32,
                probability: 1.0,
            }];
        }

        let sums = self.dice_sum(parsed.dice, parsed.sides);
        let mut merged: BTreeMap<u32, f64> = BTreeMap::new();
        for (&sum, &probability) in sums.iter() {
            let value = (sum as i64 + parsed.modifier as i64).max(0) as u32;
            *merged.entry(value).or_insert(0.0) += probability;
        }

        merged
            .into_iter()
            .map(|(value, probability)| DamagePoint { value, probability })
            .collect()
    }
}

fn uniform(sides: u32) -> SumDistribution {
    let p = 1.0 / sides as f64;
    (1..=sides).map(|face| (face, p)).collect()
}

fn add_die(prev: &SumDistribution, sides: u32) -> SumDistribution {
    let p = 1.0 / sides as f64;
    let mut next = SumDistribution::new();
    for (&sum, &prob) in prev {
        for face in 1..=sides {
            *next.entry(sum + face).or_insert(0.0) += prob * p;
        }
    }
    next
}

/// Damage distribution of a formula using a throwaway cache
pub fn damage_distribution(parsed: &ParsedDamage) -> DamageDistribution {
    DistributionCache::new().damage_distribution(parsed)
}

/// Exact mean and standard deviation of a distribution
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DamageStats {
    pub mean: f64,
    pub std_dev: f64,
}

impl DamageStats {
    pub fn from_distribution(distribution: &[DamagePoint]) -> Self {
        let mean: f64 = distribution
            .iter()
            .map(|p| p.value as f64 * p.probability)
            .sum();
        let variance: f64 = distribution
            .iter()
            .map(|p| p.probability * (p.value as f64 - mean).powi(2))
            .sum();

        DamageStats {
            mean,
            std_dev: variance.sqrt(),
        }
    }
}

/// Probability of a single value, 0 when absent
pub fn probability_of(distribution: &[DamagePoint], value: u32) -> f64 {
    distribution
        .iter()
        .find(|p| p.value == value)
        .map_or(0.0, |p| p.probability)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(dist: &SumDistribution) -> f64 {
        dist.values().sum()
    }

    #[test]
    fn test_zero_dice() {
        let mut cache = DistributionCache::new();
        let dist = cache.dice_sum(0, 6);
        assert_eq!(dist.len(), 1);
        assert!((dist[&0] - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_single_die_is_uniform() {
        let mut cache = DistributionCache::new();
        let dist = cache.dice_sum(1, 6);
        assert_eq!(dist.len(), 6);
        for face in 1..=6 {
            assert!((dist[&face] - 1.0 / 6.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_3d6_known_values() {
        let mut cache = DistributionCache::new();
        let dist = cache.dice_sum(3, 6);
        assert!((dist[&3] - 1.0 / 216.0).abs() < 1e-12);
        assert!((dist[&10] - 27.0 / 216.0).abs() < 1e-12);
        assert!((dist[&11] - 0.125).abs() < 1e-12);
        assert!((dist[&18] - 1.0 / 216.0).abs() < 1e-12);
        assert!((total(&dist) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_intermediate_counts_are_cached() {
        let mut cache = DistributionCache::new();
        cache.dice_sum(4, 6);
        assert!(cache.contains(1, 6));
        assert!(cache.contains(2, 6));
        assert!(cache.contains(3, 6));
        assert!(cache.contains(4, 6));
        assert_eq!(cache.len(), 4);

        // Building on top of a cached count
        let five = cache.dice_sum(5, 6);
        assert_eq!(cache.len(), 5);
        assert!((total(&five) - 1.0).abs() < 1e-9);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_hit_returns_same_allocation() {
        let mut cache = DistributionCache::new();
        let a = cache.dice_sum(2, 6);
        let b = cache.dice_sum(2, 6);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_flat_distribution() {
        let dist = damage_distribution(&ParsedDamage::flat(7));
        assert_eq!(dist, vec![DamagePoint { value: 7, probability: 1.0 }]);

        let negative = damage_distribution(&ParsedDamage::flat(-3));
        assert_eq!(negative[0].value, 0);
    }

    #[test]
    fn test_modifier_shift() {
        let dist = damage_distribution(&ParsedDamage::d6(2, 1));
        assert_eq!(dist.first().map(|p| p.value), Some(3));
        assert_eq!(dist.last().map(|p| p.value), Some(13));
        assert!((probability_of(&dist, 8) - 6.0 / 36.0).abs() < 1e-12);
    }

    #[test]
    fn test_clamped_values_merge() {
        // 1d-3: faces 1..=3 all clamp to 0
        let dist = damage_distribution(&ParsedDamage::d6(1, -3));
        assert_eq!(dist.len(), 4);
        assert_eq!(dist[0].value, 0);
        assert!((dist[0].probability - 0.5).abs() < 1e-12);
        let sum: f64 = dist.iter().map(|p| p.probability).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_stats() {
        let dist = damage_distribution(&ParsedDamage::d6(1, 0));
        let stats = DamageStats::from_distribution(&dist);
        assert!((stats.mean - 3.5).abs() < 1e-9);
        // Variance of a d6 is 35/12
        assert!((stats.std_dev - (35.0f64 / 12.0).sqrt()).abs() < 1e-9);

        let flat = DamageStats::from_distribution(&damage_distribution(&ParsedDamage::flat(5)));
        assert!((flat.mean - 5.0).abs() < 1e-12);
        assert!(flat.std_dev.abs() < 1e-12);
    }
}
