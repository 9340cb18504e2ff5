//! AttackOutcome - everything one simulated attack produced

use super::damage::DamageResult;
use super::hit::CriticalHitResult;
use super::injury::InjuryResult;
use crate::types::{DamageType, HitLocation};
use serde::{Deserialize, Serialize};

/// A labelled contribution to effective skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillModifier {
    pub label: String,
    pub value: i32,
}

impl SkillModifier {
    pub fn new(label: impl Into<String>, value: i32) -> Self {
        SkillModifier {
            label: label.into(),
            value,
        }
    }
}

/// Result of one attack, from the roll to the injury
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackOutcome {
    // === Setup ===
    pub base_damage: String,
    pub damage_type: DamageType,
    pub location: HitLocation,
    pub armor_value: i32,

    // === Roll ===
    pub base_skill: i32,
    pub modifiers: Vec<SkillModifier>,
    pub effective_skill: i32,
    /// None when the target was out of range and nothing was rolled
    pub hit_roll: Option<u32>,
    pub hit: CriticalHitResult,
    pub out_of_range: bool,

    // === Damage ===
    /// Extra damage passed to the damage pipeline
    pub extra_damage: f64,
    /// Beyond half-damage range
    pub damage_halved: bool,
    pub damage: Option<DamageResult>,
    pub injury: Option<InjuryResult>,
    /// Location and damage-type specific notes (decapitation, skull wounds)
    pub special_injuries: Vec<String>,

    pub description: String,
}

impl AttackOutcome {
    pub fn is_hit(&self) -> bool {
        self.hit.hit_success
    }

    pub fn is_critical_miss(&self) -> bool {
        matches!(self.hit_roll, Some(roll) if roll >= 17)
    }

    /// Final damage, 0 on a miss
    pub fn final_damage(&self) -> i32 {
        self.damage.map_or(0, |d| d.final_damage)
    }

    /// Target HP after this attack, if it was injured
    pub fn new_hp(&self) -> Option<i32> {
        self.injury.as_ref().map(|i| i.new_hp)
    }

    /// Sum of all modifiers applied to base skill
    pub fn total_modifier(&self) -> i32 {
        self.modifiers.iter().map(|m| m.value).sum()
    }

    /// One-line summary for logs
    pub fn summary(&self) -> String {
        if self.out_of_range {
            return "Out of range".to_string();
        }

        let roll = self.hit_roll.unwrap_or_default();
        if !self.is_hit() {
            let label = if self.is_critical_miss() {
                "Critical miss"
            } else {
                "Miss"
            };
            return format!("{} ({} vs {})", label, roll, self.effective_skill);
        }

        let mut parts = vec![format!(
            "{} {} ({} vs {})",
            if self.hit.is_critical { "Critical hit" } else { "Hit" },
            self.location,
            roll,
            self.effective_skill
        )];

        parts.push(format!("{} damage", self.final_damage()));

        if let Some(injury) = &self.injury {
            if injury.is_dead {
                parts.push("FATAL".to_string());
            } else if injury.is_major_wound {
                parts.push("major wound".to_string());
            }
        }

        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome() -> AttackOutcome {
        AttackOutcome {
            base_damage: "2d+1".to_string(),
            damage_type: DamageType::Crushing,
            location: HitLocation::Torso,
            armor_value: 0,
            base_skill: 12,
            modifiers: vec![
                SkillModifier::new("posture", -2),
                SkillModifier::new("location", 0),
            ],
            effective_skill: 10,
            hit_roll: Some(8),
            hit: CriticalHitResult {
                hit_success: true,
                ..Default::default()
            },
            out_of_range: false,
            extra_damage: 0.0,
            damage_halved: false,
            damage: None,
            injury: None,
            special_injuries: Vec::new(),
            description: String::new(),
        }
    }

    #[test]
    fn test_total_modifier() {
        assert_eq!(outcome().total_modifier(), -2);
    }

    #[test]
    fn test_summary_hit() {
        let summary = outcome().summary();
        assert!(summary.starts_with("Hit Torso"));
        assert!(summary.contains("0 damage"));
    }

    #[test]
    fn test_summary_critical_miss() {
        let mut o = outcome();
        o.hit = CriticalHitResult::default();
        o.hit_roll = Some(18);
        assert!(o.is_critical_miss());
        assert_eq!(o.summary(), "Critical miss (18 vs 10)");
    }

    #[test]
    fn test_summary_out_of_range() {
        let mut o = outcome();
        o.out_of_range = true;
        o.hit_roll = None;
        assert_eq!(o.summary(), "Out of range");
        assert_eq!(o.new_hp(), None);
    }
}
