//! Armor model comparison and efficiency analysis

use super::model::ArmorModel;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// HP pool used for the hits-to-kill figure
pub const SURVIVABILITY_HP: f64 = 100.0;

/// Marginal effectiveness gain below which extra armor is not worth it
pub const DIMINISHING_GAIN: f64 = 0.05;

/// Armor points required before the diminishing point can be found
pub const DIMINISHING_MIN_ARMOR_STEPS: usize = 5;

/// Damage taken across an armor range for one model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub label: String,
    pub model: ArmorModel,
    /// (armor, damage taken)
    pub points: Vec<(f64, f64)>,
}

impl ChartSeries {
    pub fn max_damage(&self) -> f64 {
        self.points.iter().map(|(_, d)| *d).fold(0.0, f64::max)
    }
}

/// Damage curves for each model over the armor range
pub fn comparison_series(
    models: &[ArmorModel],
    damage: f64,
    armor_range: RangeInclusive<u32>,
) -> Vec<ChartSeries> {
    models
        .iter()
        .map(|model| ChartSeries {
            label: model.name().to_string(),
            model: *model,
            points: armor_range
                .clone()
                .map(|armor| {
                    let armor = armor as f64;
                    (armor, model.apply(damage, armor))
                })
                .collect(),
        })
        .collect()
}

/// One armor value's performance against a fixed hit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyPoint {
    pub armor: u32,
    pub damage: f64,
    /// Share of the hit blocked
    pub effectiveness: f64,
    /// Effectiveness per armor point (0 at zero armor)
    pub efficiency: f64,
    /// Hits to take down a 100 HP target, None when the base hit is 0
    pub hits_to_kill: Option<u32>,
}

pub fn efficiency_metrics(
    model: &ArmorModel,
    armor_range: RangeInclusive<u32>,
    base_damage: f64,
) -> Vec<EfficiencyPoint> {
    armor_range
        .map(|armor| {
            let damage = model.apply(base_damage, armor as f64);
            let effectiveness = if base_damage > 0.0 {
                1.0 - damage / base_damage
            } else {
                0.0
            };
            let efficiency = if armor > 0 {
                effectiveness / armor as f64
            } else {
                0.0
            };
            let hits_to_kill = (base_damage > 0.0)
                .then(|| (SURVIVABILITY_HP / damage.max(1.0)).ceil() as u32);

            EfficiencyPoint {
                armor,
                damage,
                effectiveness,
                efficiency,
                hits_to_kill,
            }
        })
        .collect()
}

/// Best value-per-point armor and where returns flatten out
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimalArmor {
    pub optimal: u32,
    pub max_efficiency: f64,
    pub diminishing_point: u32,
}

pub fn find_optimal_armor(data: &[EfficiencyPoint]) -> OptimalArmor {
    let mut optimal = 0;
    let mut max_efficiency = 0.0;
    for point in data {
        if point.efficiency > max_efficiency {
            max_efficiency = point.efficiency;
            optimal = point.armor;
        }
    }

    let diminishing_point = data
        .windows(2)
        .enumerate()
        .map(|(i, pair)| (i + 1, pair))
        .find(|(i, pair)| {
            *i > DIMINISHING_MIN_ARMOR_STEPS
                && pair[1].effectiveness - pair[0].effectiveness < DIMINISHING_GAIN
        })
        .map(|(_, pair)| pair[1].armor)
        .or_else(|| data.last().map(|p| p.armor))
        .unwrap_or(0);

    OptimalArmor {
        optimal,
        max_efficiency,
        diminishing_point,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison_series_shape() {
        let series = comparison_series(&ArmorModel::all(), 30.0, 0..=10);
        assert_eq!(series.len(), 6);
        for s in &series {
            assert_eq!(s.points.len(), 11);
            assert_eq!(s.points[0].0, 0.0);
        }
        let flat = &series[0];
        assert_eq!(flat.label, "Flat DR");
        assert!((flat.points[10].1 - 20.0).abs() < 1e-9);
        assert!((flat.max_damage() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_efficiency_flat_dr() {
        let data = efficiency_metrics(&ArmorModel::FlatDr { min_one: false }, 0..=50, 30.0);
        assert_eq!(data.len(), 51);
        assert!(data[0].efficiency.abs() < 1e-12);
        assert_eq!(data[0].hits_to_kill, Some(4));
        // 10 armor blocks a third
        assert!((data[10].effectiveness - 1.0 / 3.0).abs() < 1e-9);
        // Fully blocked hits still count as 1 damage for hits-to-kill
        assert_eq!(data[40].hits_to_kill, Some(100));
    }

    #[test]
    fn test_zero_base_damage() {
        let data = efficiency_metrics(&ArmorModel::FlatDr { min_one: false }, 0..=3, 0.0);
        assert!(data.iter().all(|p| p.hits_to_kill.is_none()));
        assert!(data.iter().all(|p| p.effectiveness == 0.0));
    }

    #[test]
    fn test_optimal_flat_dr() {
        // Flat DR: every point blocks 1/30, efficiency constant until the hit is gone
        let data = efficiency_metrics(&ArmorModel::FlatDr { min_one: false }, 0..=50, 30.0);
        let optimal = find_optimal_armor(&data);
        assert!((optimal.max_efficiency - 1.0 / 30.0).abs() < 1e-9);
        // Each step gains 1/30 < 0.05, so the first step past 5 armor
        assert_eq!(optimal.diminishing_point, 6);
    }

    #[test]
    fn test_diminishing_point_falls_back_to_last() {
        // Percent DR gains 0.01 per point but the range is too short
        let data = efficiency_metrics(&ArmorModel::PercentDr, 0..=4, 30.0);
        assert_eq!(find_optimal_armor(&data).diminishing_point, 4);
        assert_eq!(find_optimal_armor(&[]).diminishing_point, 0);
    }
}
