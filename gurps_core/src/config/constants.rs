//! Simulator constants configuration

use crate::types::{DamageType, HitLocation};
use serde::{Deserialize, Serialize};

/// Tunable simulator constants
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulatorConstants {
    #[serde(default)]
    pub combat: CombatDefaults,
    #[serde(default)]
    pub log: LogConstants,
    #[serde(default)]
    pub sampling: SamplingConstants,
}

/// Initial combat setup for a new session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatDefaults {
    #[serde(default = "default_attacker_skill")]
    pub attacker_skill: i32,
    #[serde(default = "default_attacker_strength")]
    pub attacker_strength: i32,
    #[serde(default = "default_base_damage")]
    pub base_damage: String,
    #[serde(default = "default_damage_type")]
    pub damage_type: DamageType,
    #[serde(default = "default_armor_value")]
    pub armor_value: i32,
    #[serde(default = "default_target_hp")]
    pub target_max_hp: i32,
    #[serde(default)]
    pub target_location: HitLocation,
    #[serde(default)]
    pub random_location: bool,
}

impl Default for CombatDefaults {
    fn default() -> Self {
        CombatDefaults {
            attacker_skill: default_attacker_skill(),
            attacker_strength: default_attacker_strength(),
            base_damage: default_base_damage(),
            damage_type: default_damage_type(),
            armor_value: default_armor_value(),
            target_max_hp: default_target_hp(),
            target_location: HitLocation::Torso,
            random_location: false,
        }
    }
}

fn default_attacker_skill() -> i32 {
    12
}
fn default_attacker_strength() -> i32 {
    12
}
fn default_base_damage() -> String {
    "2d+1".to_string()
}
fn default_damage_type() -> DamageType {
    DamageType::Crushing
}
fn default_armor_value() -> i32 {
    4
}
fn default_target_hp() -> i32 {
    10
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConstants {
    /// Combat results kept in the rolling log
    #[serde(default = "default_log_capacity")]
    pub capacity: usize,
}

impl Default for LogConstants {
    fn default() -> Self {
        LogConstants {
            capacity: default_log_capacity(),
        }
    }
}

fn default_log_capacity() -> usize {
    20
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingConstants {
    /// Samples between progress callbacks
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Samples drawn when none are requested
    #[serde(default = "default_samples")]
    pub default_samples: usize,
}

impl Default for SamplingConstants {
    fn default() -> Self {
        SamplingConstants {
            chunk_size: default_chunk_size(),
            default_samples: default_samples(),
        }
    }
}

fn default_chunk_size() -> usize {
    1000
}
fn default_samples() -> usize {
    10_000
}
