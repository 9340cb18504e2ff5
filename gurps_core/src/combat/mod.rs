//! Combat resolution - hit rolls, damage pipeline, injuries and sessions

mod attack;
mod damage;
mod hit;
mod injury;
mod result;
mod session;

pub use attack::{
    range_modifier, reach_modifier, resolve_attack_with_rng, simulate_attack,
    simulate_attack_with_rng, special_injuries, speed_modifier, AttackMode, AttackSetup,
    MeleeManeuver, Posture, RANGE_TABLE,
};
pub use damage::{
    apply_damage_pipeline, apply_extra_damage, resolve_damage, resolve_damage_with_rng,
    DamageCalculationParams, DamageResult,
};
pub use hit::{hit_description, miss_description, resolve_hit, CriticalHitResult};
pub use injury::{
    is_past_auto_death, resolve_injury, resolve_injury_by_name, shock_penalty, InjuryResult,
    AUTO_DEATH_MULTIPLIER,
};
pub use result::{AttackOutcome, SkillModifier};
pub use session::{CombatLog, CombatState, RunSummary};
