//! Core types shared across the combat pipeline

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unknown hit location name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown hit location: {0}")]
pub struct ParseLocationError(pub String);

/// Unknown damage type tag
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown damage type: {0}")]
pub struct ParseDamageTypeError(pub String);

/// Body part targeted by an attack
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitLocation {
    Skull,
    Face,
    Neck,
    #[default]
    Torso,
    Groin,
    Arm,
    Leg,
    Hand,
    Foot,
}

impl HitLocation {
    /// Get all hit locations
    pub fn all() -> &'static [HitLocation] {
        &[
            HitLocation::Skull,
            HitLocation::Face,
            HitLocation::Neck,
            HitLocation::Torso,
            HitLocation::Groin,
            HitLocation::Arm,
            HitLocation::Leg,
            HitLocation::Hand,
            HitLocation::Foot,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            HitLocation::Skull => "Skull",
            HitLocation::Face => "Face",
            HitLocation::Neck => "Neck",
            HitLocation::Torso => "Torso",
            HitLocation::Groin => "Groin",
            HitLocation::Arm => "Arm",
            HitLocation::Leg => "Leg",
            HitLocation::Hand => "Hand",
            HitLocation::Foot => "Foot",
        }
    }

    /// Penalty to effective skill when targeting this location
    pub fn hit_penalty(&self) -> i32 {
        match self {
            HitLocation::Skull => -7,
            HitLocation::Face | HitLocation::Neck => -5,
            HitLocation::Torso => 0,
            HitLocation::Groin => -3,
            HitLocation::Arm | HitLocation::Leg => -2,
            HitLocation::Hand | HitLocation::Foot => -4,
        }
    }

    /// Injury multiplier applied after the wounding multiplier
    pub fn vitality_multiplier(&self) -> f64 {
        match self {
            HitLocation::Skull => 4.0,
            HitLocation::Neck => 2.0,
            HitLocation::Face | HitLocation::Torso | HitLocation::Groin => 1.0,
            HitLocation::Arm | HitLocation::Leg => 0.5,
            HitLocation::Hand | HitLocation::Foot => 0.25,
        }
    }

    /// Pick a location uniformly at random
    pub fn random(rng: &mut impl Rng) -> HitLocation {
        let all = Self::all();
        all[rng.gen_range(0..all.len())]
    }
}

impl fmt::Display for HitLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HitLocation {
    type Err = ParseLocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|loc| loc.name().to_lowercase() == needle)
            .ok_or_else(|| ParseLocationError(s.to_string()))
    }
}

/// GURPS damage type, determines wounding multiplier and armor divisor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    Cutting,
    Impaling,
    Crushing,
    SmallPiercing,
    Piercing,
    LargePiercing,
    HugePiercing,
}

impl DamageType {
    pub fn all() -> &'static [DamageType] {
        &[
            DamageType::Cutting,
            DamageType::Impaling,
            DamageType::Crushing,
            DamageType::SmallPiercing,
            DamageType::Piercing,
            DamageType::LargePiercing,
            DamageType::HugePiercing,
        ]
    }

    /// Short GURPS tag (cut, imp, cr, pi-, pi, pi+, pi++)
    pub fn abbreviation(&self) -> &'static str {
        match self {
            DamageType::Cutting => "cut",
            DamageType::Impaling => "imp",
            DamageType::Crushing => "cr",
            DamageType::SmallPiercing => "pi-",
            DamageType::Piercing => "pi",
            DamageType::LargePiercing => "pi+",
            DamageType::HugePiercing => "pi++",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DamageType::Cutting => "Cutting",
            DamageType::Impaling => "Impaling",
            DamageType::Crushing => "Crushing",
            DamageType::SmallPiercing => "Small Piercing",
            DamageType::Piercing => "Piercing",
            DamageType::LargePiercing => "Large Piercing",
            DamageType::HugePiercing => "Huge Piercing",
        }
    }

    /// Wounding multiplier applied to penetrating damage
    pub fn wound_multiplier(&self) -> f64 {
        match self {
            DamageType::SmallPiercing => 0.5,
            DamageType::Crushing | DamageType::Piercing => 1.0,
            DamageType::Cutting | DamageType::LargePiercing => 1.5,
            DamageType::Impaling | DamageType::HugePiercing => 2.0,
        }
    }

    /// Divisor applied to the target's armor before the damage pipeline
    pub fn armor_divisor(&self) -> f64 {
        match self {
            DamageType::LargePiercing => 1.5,
            DamageType::HugePiercing => 2.0,
            _ => 1.0,
        }
    }

    /// Armor value after this type's divisor, floored
    pub fn adjusted_armor(&self, armor: i32) -> i32 {
        (armor as f64 / self.armor_divisor()).floor() as i32
    }
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.abbreviation())
    }
}

impl FromStr for DamageType {
    type Err = ParseDamageTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|dt| dt.abbreviation() == needle || dt.name().to_lowercase() == needle)
            .ok_or_else(|| ParseDamageTypeError(s.to_string()))
    }
}
