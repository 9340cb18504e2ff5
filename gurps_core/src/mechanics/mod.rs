//! Armor mechanics - comparison models for damage reduction systems

mod analysis;
mod model;
mod scenario;

pub use analysis::{
    comparison_series, efficiency_metrics, find_optimal_armor, ChartSeries, EfficiencyPoint,
    OptimalArmor, DIMINISHING_GAIN, SURVIVABILITY_HP,
};
pub use model::{
    d20_hit_chance, d20_needed, ArmorModel, ArmorPenetration, PenetrationResult,
    COMPARISON_ATTACK_BONUS, COMPARISON_BASE_AC,
};
pub use scenario::{
    ablative, poise, reactive_armor, shield_barrier, zone_expected_damage, ChargeAbsorb, PoiseHit,
    ScenarioHit, ScenarioReport, SoakPool, ZoneArmor,
};
