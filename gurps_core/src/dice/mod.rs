//! Dice - formula parsing, rolling and exact distributions

mod distribution;
mod formula;
mod roller;
mod strength;

pub use distribution::{
    damage_distribution, probability_of, DamageDistribution, DamagePoint, DamageStats,
    DistributionCache, SumDistribution,
};
pub use formula::{
    parse_damage, parse_damage_strict, FormulaError, ParsedDamage, DAMAGE_DIE_SIDES,
    MAX_FORMULA_DICE,
};
pub use roller::{
    average_damage, max_damage, roll_3d6, roll_3d6_with_rng, roll_damage, roll_damage_with_rng,
};
pub use strength::{strength_damage, StrengthDamageEntry, STRENGTH_TABLE};
