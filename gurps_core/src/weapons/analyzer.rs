//! Weapon analysis - exact damage distributions at a given strength

use super::catalog::Weapon;
use crate::dice::{
    average_damage, parse_damage, DamageDistribution, DamageStats, DistributionCache, ParsedDamage,
};
use crate::types::DamageType;
use serde::{Deserialize, Serialize};

/// Damage profile of one weapon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponAnalysisData {
    pub name: String,
    pub damage: String,
    pub damage_type: DamageType,
    pub category: String,
    pub strength: i32,
    pub parsed: ParsedDamage,
    pub distribution: DamageDistribution,
    pub stats: DamageStats,
}

impl WeaponAnalysisData {
    pub fn min_damage(&self) -> u32 {
        self.distribution.first().map_or(0, |p| p.value)
    }

    pub fn max_damage(&self) -> u32 {
        self.distribution.last().map_or(0, |p| p.value)
    }

    /// Most likely damage value (lowest on ties)
    pub fn mode(&self) -> u32 {
        self.distribution
            .iter()
            .fold(None, |best: Option<(u32, f64)>, p| match best {
                Some((_, prob)) if prob >= p.probability => best,
                _ => Some((p.value, p.probability)),
            })
            .map_or(0, |(value, _)| value)
    }

    /// Expected damage times the wounding multiplier, before armor
    pub fn expected_injury(&self) -> f64 {
        self.stats.mean * self.damage_type.wound_multiplier()
    }

    /// Probability that damage exceeds the given DR
    pub fn penetration_chance(&self, armor: u32) -> f64 {
        self.distribution
            .iter()
            .filter(|p| p.value > armor)
            .map(|p| p.probability)
            .sum()
    }
}

/// Analyzes weapons against a memoized distribution cache
#[derive(Debug, Clone, Default)]
pub struct WeaponAnalyzer {
    cache: DistributionCache,
}

impl WeaponAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cache(cache: DistributionCache) -> Self {
        WeaponAnalyzer { cache }
    }

    pub fn cache(&self) -> &DistributionCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut DistributionCache {
        &mut self.cache
    }

    /// Drop all memoized distributions
    pub fn reset(&mut self) {
        self.cache.clear();
    }

    /// Profile a single weapon at the attacker's strength
    pub fn analyze_weapon(&mut self, weapon: &Weapon, strength: i32) -> WeaponAnalysisData {
        let parsed = parse_damage(&weapon.damage, strength);
        let distribution = self.cache.damage_distribution(&parsed);
        let stats = DamageStats::from_distribution(&distribution);

        WeaponAnalysisData {
            name: weapon.name.clone(),
            damage: weapon.damage.clone(),
            damage_type: weapon.damage_type,
            category: weapon.category.clone(),
            strength,
            parsed,
            distribution,
            stats,
        }
    }

    /// Profile every weapon, in order
    pub fn analyze<'a>(
        &mut self,
        weapons: impl IntoIterator<Item = &'a Weapon>,
        strength: i32,
    ) -> Vec<WeaponAnalysisData> {
        weapons
            .into_iter()
            .map(|w| self.analyze_weapon(w, strength))
            .collect()
    }
}

/// Profile one weapon with a throwaway cache
pub fn analyze_weapon(weapon: &Weapon, strength: i32) -> WeaponAnalysisData {
    WeaponAnalyzer::new().analyze_weapon(weapon, strength)
}

/// Weapons sorted by expected damage, highest first
pub fn rank_by_mean(analysis: &mut [WeaponAnalysisData]) {
    analysis.sort_by(|a, b| b.stats.mean.total_cmp(&a.stats.mean));
}

/// Closed-form average, for cross-checking the exact mean
pub fn formula_average(data: &WeaponAnalysisData) -> f64 {
    average_damage(&data.parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weapons::{default_weapons, WeaponClass, WeaponKind};

    fn weapon(damage: &str) -> Weapon {
        Weapon {
            name: "Test".to_string(),
            damage: damage.to_string(),
            damage_type: DamageType::Cutting,
            category: "Test".to_string(),
            description: String::new(),
            kind: WeaponKind::Melee { reach: 1 },
        }
    }

    #[test]
    fn test_analyze_single() {
        let data = analyze_weapon(&weapon("2d+1"), 10);
        assert_eq!(data.parsed, ParsedDamage::d6(2, 1));
        assert_eq!(data.min_damage(), 3);
        assert_eq!(data.max_damage(), 13);
        assert_eq!(data.mode(), 8);
        assert!((data.stats.mean - 8.0).abs() < 1e-9);
        assert!((data.expected_injury() - 12.0).abs() < 1e-9);
        assert!((data.penetration_chance(0) - 1.0).abs() < 1e-9);
        assert!(data.penetration_chance(13).abs() < 1e-12);
    }

    #[test]
    fn test_strength_changes_profile() {
        let mut analyzer = WeaponAnalyzer::new();
        let weak = analyzer.analyze_weapon(&weapon("sw"), 10);
        let strong = analyzer.analyze_weapon(&weapon("sw"), 16);
        assert!(strong.stats.mean > weak.stats.mean);
        assert_eq!(weak.strength, 10);
    }

    #[test]
    fn test_cache_shared_across_catalog() {
        let catalog = default_weapons();
        let mut analyzer = WeaponAnalyzer::new();
        let ranged = analyzer.analyze(catalog.of_class(WeaponClass::Ranged), 12);
        assert_eq!(ranged.len(), 17);
        // Only d6 shapes up to 9 dice
        assert!(analyzer.cache().len() <= 9);

        for data in &ranged {
            let total: f64 = data.distribution.iter().map(|p| p.probability).sum();
            assert!((total - 1.0).abs() < 1e-9, "{}", data.name);
        }

        analyzer.reset();
        assert!(analyzer.cache().is_empty());
    }

    #[test]
    fn test_with_prewarmed_cache() {
        let mut cache = DistributionCache::new();
        cache.damage_distribution(&ParsedDamage::d6(2, 0));
        let mut analyzer = WeaponAnalyzer::with_cache(cache);
        assert!(analyzer.cache().contains(2, 6));
        let cached = analyzer.cache().len();
        analyzer.analyze_weapon(&weapon("2d-1"), 10);
        assert_eq!(analyzer.cache().len(), cached);
    }

    #[test]
    fn test_exact_mean_matches_formula_without_clamping() {
        let data = analyze_weapon(&weapon("4d+2"), 10);
        assert!((data.stats.mean - formula_average(&data)).abs() < 1e-9);
    }

    #[test]
    fn test_rank_by_mean() {
        let mut analysis = vec![
            analyze_weapon(&weapon("1d"), 10),
            analyze_weapon(&weapon("3d"), 10),
            analyze_weapon(&weapon("2d"), 10),
        ];
        rank_by_mean(&mut analysis);
        let order: Vec<&str> = analysis.iter().map(|a| a.damage.as_str()).collect();
        assert_eq!(order, vec!["3d", "2d", "1d"]);
    }
}
