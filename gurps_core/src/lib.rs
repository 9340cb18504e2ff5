//! gurps_core - GURPS 4e combat resolution and armor mechanics library
//!
//! This library provides:
//! - Dice: damage formula parsing, rolling and exact distributions
//! - Combat: hit rolls, the damage pipeline, injury effects and attack sessions
//! - Weapons: the default catalog and per-weapon damage analysis
//! - Mechanics: armor model comparisons from other game systems
//! - Analysis: Monte-Carlo sampling of roll shapes and damage spread

pub mod analysis;
pub mod combat;
pub mod config;
pub mod dice;
pub mod mechanics;
pub mod prelude;
pub mod types;
pub mod weapons;

// Re-export core types for convenience
pub use combat::{
    resolve_damage, resolve_hit, resolve_injury, simulate_attack, AttackMode, AttackOutcome,
    AttackSetup, CombatState, CriticalHitResult, DamageCalculationParams, DamageResult,
    InjuryResult,
};
pub use config::{load_constants, SimulatorConstants};
pub use dice::{
    average_damage, damage_distribution, parse_damage, roll_damage, strength_damage,
    DamageDistribution, DistributionCache, ParsedDamage,
};
pub use types::{DamageType, HitLocation};
pub use weapons::{default_weapons, Weapon, WeaponAnalysisData, WeaponAnalyzer, WeaponCatalog};
