//! Prelude module for convenient imports
//!
//! ```rust
//! use gurps_core::prelude::*;
//! ```

// Core types
pub use crate::types::{DamageType, HitLocation};

// Dice
pub use crate::dice::{
    average_damage, damage_distribution, max_damage, parse_damage, roll_3d6, roll_damage,
    DistributionCache, ParsedDamage,
};

// Combat
pub use crate::combat::{
    resolve_damage, resolve_hit, resolve_injury, simulate_attack, AttackMode, AttackOutcome,
    AttackSetup, CombatLog, CombatState, CriticalHitResult, DamageCalculationParams, DamageResult,
    InjuryResult, MeleeManeuver, Posture,
};

// Weapons
pub use crate::weapons::{default_weapons, Weapon, WeaponAnalyzer, WeaponCatalog};

// Mechanics
pub use crate::mechanics::{ArmorModel, ArmorPenetration};

// Config
pub use crate::config::SimulatorConstants;
