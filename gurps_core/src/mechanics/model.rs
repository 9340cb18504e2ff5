//! Armor models from tabletop and video games

use serde::{Deserialize, Serialize};

/// AC and attack bonus the comparison charts use for the d20 model
pub const COMPARISON_BASE_AC: f64 = 10.0;
pub const COMPARISON_ATTACK_BONUS: f64 = 10.0;

fn clamp_ratio(percent: f64) -> f64 {
    (percent / 100.0).clamp(0.0, 1.0)
}

/// How armor turns incoming damage into damage taken
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum ArmorModel {
    /// Armor subtracted from damage
    FlatDr {
        /// A hit that does any damage deals at least 1
        #[serde(default)]
        min_one: bool,
    },
    /// Armor is a percentage of damage removed
    PercentDr,
    /// `damage * k / (k + armor)`
    Diminishing { k: f64 },
    /// Damage threshold first, then armor as a percentage
    ThresholdPercent {
        threshold: f64,
        #[serde(default)]
        min_one: bool,
    },
    /// d20 to-hit: armor adds to AC, hits deal full damage
    ArmorClass { base_ac: f64, attack_bonus: f64 },
    /// Armor is a barrier that soaks a whole hit or lets the excess through
    Shield,
}

impl ArmorModel {
    /// Every model with the parameters the comparison charts use
    pub fn all() -> Vec<ArmorModel> {
        vec![
            ArmorModel::FlatDr { min_one: false },
            ArmorModel::PercentDr,
            ArmorModel::Diminishing { k: 100.0 },
            ArmorModel::ThresholdPercent {
                threshold: 8.0,
                min_one: false,
            },
            ArmorModel::ArmorClass {
                base_ac: COMPARISON_BASE_AC,
                attack_bonus: COMPARISON_ATTACK_BONUS,
            },
            ArmorModel::Shield,
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            ArmorModel::FlatDr { .. } => "flatdr",
            ArmorModel::PercentDr => "percentdr",
            ArmorModel::Diminishing { .. } => "diminish",
            ArmorModel::ThresholdPercent { .. } => "dt_dr",
            ArmorModel::ArmorClass { .. } => "ac",
            ArmorModel::Shield => "shield",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ArmorModel::FlatDr { .. } => "Flat DR",
            ArmorModel::PercentDr => "Percent DR",
            ArmorModel::Diminishing { .. } => "Diminishing returns",
            ArmorModel::ThresholdPercent { .. } => "Threshold + percent",
            ArmorModel::ArmorClass { .. } => "Armor Class (d20)",
            ArmorModel::Shield => "Shield barrier",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ArmorModel::FlatDr { .. } => "A fixed amount is subtracted from every hit.",
            ArmorModel::PercentDr => "A share of every hit is removed.",
            ArmorModel::Diminishing { .. } => {
                "Each point of armor is worth less than the one before."
            }
            ArmorModel::ThresholdPercent { .. } => {
                "Hits below the threshold do nothing, the rest is reduced by percent."
            }
            ArmorModel::ArmorClass { .. } => {
                "Armor makes the attacker miss more often. Hits are not reduced."
            }
            ArmorModel::Shield => "Hits up to the shield's capacity are absorbed entirely.",
        }
    }

    /// Damage taken (expected damage for the AC model)
    pub fn apply(&self, damage: f64, armor: f64) -> f64 {
        match *self {
            ArmorModel::FlatDr { min_one } => {
                let out = (damage - armor).max(0.0);
                if min_one && damage > 0.0 && out == 0.0 {
                    1.0
                } else {
                    out
                }
            }
            ArmorModel::PercentDr => damage * (1.0 - clamp_ratio(armor)),
            ArmorModel::Diminishing { k } => {
                let denominator = k + armor;
                if denominator <= 0.0 {
                    damage
                } else {
                    damage * (k / denominator)
                }
            }
            ArmorModel::ThresholdPercent { threshold, min_one } => {
                let out = (damage - threshold).max(0.0) * (1.0 - clamp_ratio(armor));
                if min_one && damage > 0.0 {
                    out.max(1.0)
                } else {
                    out
                }
            }
            ArmorModel::ArmorClass {
                base_ac,
                attack_bonus,
            } => damage * d20_hit_chance(base_ac + armor, attack_bonus),
            ArmorModel::Shield => {
                if damage > armor {
                    damage - armor
                } else {
                    0.0
                }
            }
        }
    }
}

/// Roll needed on a d20, clamped to 1..=20
pub fn d20_needed(ac: f64, attack_bonus: f64) -> f64 {
    (ac - attack_bonus).clamp(1.0, 20.0)
}

/// Chance a d20 + attack bonus meets AC
pub fn d20_hit_chance(ac: f64, attack_bonus: f64) -> f64 {
    (21.0 - d20_needed(ac, attack_bonus)) / 20.0
}

/// How an attack defeats armor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ArmorPenetration {
    /// AP points subtracted from DR
    Flat { ap: f64 },
    /// AP percent subtracted from DR percent
    Percent { ap: f64 },
    /// DR divided by the divisor (at least 1)
    Divisor { divisor: f64 },
}

/// Armor left after penetration and the damage that gets through
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenetrationResult {
    /// DR points, or DR percent for the percent mode
    pub effective_armor: f64,
    pub damage: f64,
}

impl ArmorPenetration {
    pub fn name(&self) -> &'static str {
        match self {
            ArmorPenetration::Flat { .. } => "Flat (DR - AP)",
            ArmorPenetration::Percent { .. } => "Percent (DR% - AP%)",
            ArmorPenetration::Divisor { .. } => "Armor divisor",
        }
    }

    pub fn effective_armor(&self, armor: f64) -> f64 {
        match *self {
            ArmorPenetration::Flat { ap } => (armor - ap).max(0.0),
            ArmorPenetration::Percent { ap } => {
                (clamp_ratio(armor) - clamp_ratio(ap)).max(0.0) * 100.0
            }
            ArmorPenetration::Divisor { divisor } => armor.max(0.0) / divisor.max(1.0),
        }
    }

    pub fn apply(&self, damage: f64, armor: f64) -> PenetrationResult {
        let effective_armor = self.effective_armor(armor);
        let damage = match self {
            ArmorPenetration::Percent { .. } => damage * (1.0 - effective_armor / 100.0),
            _ => (damage - effective_armor).max(0.0),
        };
        PenetrationResult {
            effective_armor,
            damage,
        }
    }
}
