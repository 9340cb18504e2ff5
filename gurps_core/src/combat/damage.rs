//! Damage resolution - armor, wounding and location multipliers

use crate::dice::{max_damage, parse_damage, roll_damage_with_rng, ParsedDamage};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Inputs for one damage calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageCalculationParams {
    /// Damage formula ("2d+1", "sw+2", "8")
    pub base_damage: String,
    /// Critical roll of 3: dice deal maximum and extra damage is skipped
    #[serde(default)]
    pub is_auto_max_damage: bool,
    /// Target DR, already divided by any armor divisor
    #[serde(default)]
    pub armor_value: i32,
    #[serde(default = "default_multiplier")]
    pub damage_type_multiplier: f64,
    #[serde(default = "default_multiplier")]
    pub location_vitality_multiplier: f64,
    /// > 0 adds, (-1, 0) scales down by that fraction, <= -1 subtracts
    #[serde(default)]
    pub extra_damage: f64,
    #[serde(default = "default_attacker_strength")]
    pub attacker_strength: i32,
}

fn default_multiplier() -> f64 {
    1.0
}

fn default_attacker_strength() -> i32 {
    12
}

impl Default for DamageCalculationParams {
    fn default() -> Self {
        DamageCalculationParams {
            base_damage: "0".to_string(),
            is_auto_max_damage: false,
            armor_value: 0,
            damage_type_multiplier: 1.0,
            location_vitality_multiplier: 1.0,
            extra_damage: 0.0,
            attacker_strength: default_attacker_strength(),
        }
    }
}

/// Every stage of the damage pipeline
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DamageResult {
    /// Formula as parsed at the attacker's ST
    pub parsed: Option<ParsedDamage>,
    /// Dice (or constant) result before extra damage
    pub rolled_damage: i32,
    /// Basic damage after extra damage
    pub basic_damage: i32,
    pub effective_armor: i32,
    pub damage_after_armor: i32,
    pub multiplied_damage: i32,
    pub final_damage: i32,
}

impl DamageResult {
    /// Damage stopped by armor
    pub fn blocked_by_armor(&self) -> i32 {
        self.basic_damage.max(0) - self.damage_after_armor
    }
}

/// Resolve damage using the thread RNG
pub fn resolve_damage(params: &DamageCalculationParams) -> DamageResult {
    let mut rng = rand::thread_rng();
    resolve_damage_with_rng(params, &mut rng)
}

/// Resolve damage with a provided RNG (for deterministic testing)
///
/// 1. Parse the formula at the attacker's ST and roll it (max on auto-max)
/// 2. Apply extra damage unless auto-max
/// 3. Subtract armor, floor at 0
/// 4. Multiply by damage type, then by location, flooring each step
pub fn resolve_damage_with_rng(
    params: &DamageCalculationParams,
    rng: &mut impl Rng,
) -> DamageResult {
    let parsed = parse_damage(&params.base_damage, params.attacker_strength);

    let rolled = if params.is_auto_max_damage {
        max_damage(&parsed)
    } else {
        roll_damage_with_rng(&parsed, rng)
    };

    let basic = if params.is_auto_max_damage {
        rolled
    } else {
        apply_extra_damage(rolled, params.extra_damage)
    };

    let mut result = apply_damage_pipeline(
        basic,
        params.armor_value,
        params.damage_type_multiplier,
        params.location_vitality_multiplier,
    );
    result.parsed = Some(parsed);
    result.rolled_damage = rolled;

    debug!(
        formula = %params.base_damage,
        rolled,
        basic,
        after_armor = result.damage_after_armor,
        final_damage = result.final_damage,
        "resolved damage"
    );
    result
}

/// Fold an extra damage modifier into rolled damage.
///
/// Positive values add, values in (-1, 0) reduce by that fraction and floor,
/// values at or below -1 subtract. Flat amounts are whole points: the
/// fractional part of `+2.5` or `-1.5` is dropped before it is applied.
pub fn apply_extra_damage(damage: i32, extra: f64) -> i32 {
    if extra > 0.0 {
        damage.saturating_add(extra.trunc() as i32)
    } else if extra < 0.0 && extra > -1.0 {
        (damage as f64 * (1.0 + extra)).floor() as i32
    } else if extra <= -1.0 {
        damage.saturating_add(extra.trunc() as i32)
    } else {
        damage
    }
}

/// Armor, then wounding multiplier, then location multiplier
pub fn apply_damage_pipeline(
    damage: i32,
    armor_value: i32,
    damage_type_multiplier: f64,
    location_vitality_multiplier: f64,
) -> DamageResult {
    let effective_armor = armor_value.max(0);
    let damage_after_armor = damage.saturating_sub(effective_armor).max(0);
    let multiplied_damage = (damage_after_armor as f64 * damage_type_multiplier).floor() as i32;
    let final_damage = (multiplied_damage as f64 * location_vitality_multiplier).floor() as i32;

    DamageResult {
        parsed: None,
        rolled_damage: damage,
        basic_damage: damage,
        effective_armor,
        damage_after_armor,
        multiplied_damage,
        final_damage,
    }
}
