//! Injury resolution - wounds, shock and HP thresholds

use crate::types::{HitLocation, ParseLocationError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Highest shock penalty a single hit can inflict
pub const MAX_SHOCK_PENALTY: i32 = 4;

/// Negative HP multiple at which a character dies without a roll
pub const AUTO_DEATH_MULTIPLIER: u32 = 5;

/// Character status after one hit, derived from damage, HP and location
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InjuryResult {
    pub hp_loss: i32,
    pub new_hp: i32,
    pub max_hp: i32,
    pub is_major_wound: bool,
    /// 0-4, applied to DX and IQ next turn
    pub shock_penalty: i32,
    pub is_stunned: bool,
    pub is_unconscious: bool,
    pub is_dead: bool,
    pub death_check_required: bool,
    pub unconscious_check_required: bool,
    pub move_reduced: bool,
    pub dodge_reduced: bool,
    /// Deepest -N x HP threshold reached (1-4) below zero
    pub death_threshold: Option<u32>,
    pub conditions: Vec<String>,
    pub description: String,
}

impl InjuryResult {
    /// Fold a 3d6 HT roll into the pending checks.
    ///
    /// A failed roll (`roll > ht`) makes the character unconscious when an
    /// unconsciousness check is pending and dead when a death check is.
    pub fn apply_ht_roll(&mut self, ht: i32, roll: u32) {
        if self.is_dead {
            return;
        }

        let failed = roll as i64 > ht as i64;
        if !failed {
            if self.unconscious_check_required || self.death_check_required {
                self.conditions
                    .push(format!("HT roll {} vs {}: holds on", roll, ht));
            }
            return;
        }

        if self.death_check_required {
            self.is_dead = true;
            self.conditions
                .push(format!("HT roll {} vs {} failed: dies", roll, ht));
        } else if self.unconscious_check_required {
            self.is_unconscious = true;
            self.conditions
                .push(format!("HT roll {} vs {} failed: falls unconscious", roll, ht));
        }

        self.description = describe(self);
        debug!(ht, roll, dead = self.is_dead, unconscious = self.is_unconscious, "applied HT roll");
    }

    /// Character can no longer act
    pub fn is_incapacitated(&self) -> bool {
        self.is_dead || self.is_unconscious
    }
}

/// Shock from one hit: -1 per HP lost, or per HP/10 lost at 20+ HP, capped at 4
pub fn shock_penalty(hp_loss: i32, max_hp: i32) -> i32 {
    if hp_loss <= 0 {
        return 0;
    }
    if max_hp >= 20 {
        (hp_loss / (max_hp / 10)).min(MAX_SHOCK_PENALTY)
    } else {
        hp_loss.min(MAX_SHOCK_PENALTY)
    }
}

/// HP at `-multiplier x max_hp`, wide enough for any i32 inputs
fn hp_threshold(multiplier: u32, max_hp: i32) -> i64 {
    -i64::from(multiplier) * i64::from(max_hp)
}

/// HP at or below -5xHP
pub fn is_past_auto_death(hp: i32, max_hp: i32) -> bool {
    i64::from(hp) <= hp_threshold(AUTO_DEATH_MULTIPLIER, max_hp)
}

/// Resolve the injury caused by penetrating damage at a location
pub fn resolve_injury(
    penetrating_damage: i32,
    current_hp: i32,
    max_hp: i32,
    location: HitLocation,
) -> InjuryResult {
    let hp_loss = penetrating_damage;
    let new_hp = current_hp.saturating_sub(hp_loss);

    let is_major_wound = hp_loss > max_hp.div_euclid(2);
    let shock_penalty = shock_penalty(hp_loss, max_hp);

    let mut result = InjuryResult {
        hp_loss,
        new_hp,
        max_hp,
        is_major_wound,
        shock_penalty,
        ..Default::default()
    };

    if is_major_wound && location == HitLocation::Torso {
        result.is_stunned = true;
        result
            .conditions
            .push("Stunned by a major wound to the torso (HT roll required)".to_string());
    }

    if new_hp <= 0 {
        result.unconscious_check_required = true;
        result
            .conditions
            .push("HT roll every turn to stay conscious".to_string());

        for multiplier in 1..=AUTO_DEATH_MULTIPLIER {
            if i64::from(new_hp) > hp_threshold(multiplier, max_hp) {
                continue;
            }
            if multiplier == AUTO_DEATH_MULTIPLIER {
                result.is_dead = true;
                result
                    .conditions
                    .push(format!("Automatic death at -{}xHP", AUTO_DEATH_MULTIPLIER));
                break;
            }
            result.death_check_required = true;
            result.death_threshold = Some(multiplier);
        }

        if let (Some(deepest), false) = (result.death_threshold, result.is_dead) {
            result.conditions.push(format!(
                "HT roll against death (threshold reached: -{}xHP)",
                deepest
            ));
        }
    } else if new_hp < ceil_div(max_hp, 3) {
        result.move_reduced = true;
        result.dodge_reduced = true;
        result
            .conditions
            .push("Below 1/3 HP: Move and Dodge halved (round up)".to_string());
    }

    if shock_penalty > 0 {
        result.conditions.push(format!(
            "Shock: -{} to DX, IQ and skills based on them next turn",
            shock_penalty
        ));
    }

    result.description = describe(&result);

    debug!(
        hp_loss,
        new_hp,
        max_hp,
        %location,
        major = is_major_wound,
        dead = result.is_dead,
        "resolved injury"
    );
    result
}

/// Resolve an injury with the location given by name.
///
/// Unknown names are an error rather than a silent default.
pub fn resolve_injury_by_name(
    penetrating_damage: i32,
    current_hp: i32,
    max_hp: i32,
    location: &str,
) -> Result<InjuryResult, ParseLocationError> {
    let location: HitLocation = location.parse()?;
    Ok(resolve_injury(penetrating_damage, current_hp, max_hp, location))
}

fn ceil_div(value: i32, divisor: i32) -> i32 {
    (value as f64 / divisor as f64).ceil() as i32
}

// Dead > unconscious > stunned > dying > badly hurt > wounded
fn describe(result: &InjuryResult) -> String {
    if result.is_dead {
        "DEAD".to_string()
    } else if result.is_unconscious {
        "Unconscious".to_string()
    } else if result.is_stunned {
        "Stunned (-4 to defenses, does nothing next turn)".to_string()
    } else if result.new_hp <= 0 {
        format!("Critically wounded ({} HP), staying up on willpower", result.new_hp)
    } else if result.move_reduced {
        format!(
            "Seriously wounded ({}/{} HP), movement hampered",
            result.new_hp, result.max_hp
        )
    } else {
        format!("Wounded ({}/{} HP)", result.new_hp, result.max_hp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_wound() {
        let r = resolve_injury(3, 10, 10, HitLocation::Torso);
        assert_eq!(r.hp_loss, 3);
        assert_eq!(r.new_hp, 7);
        assert!(!r.is_major_wound);
        assert_eq!(r.shock_penalty, 3);
        assert!(!r.move_reduced);
        assert_eq!(r.description, "Wounded (7/10 HP)");
    }

    #[test]
    fn test_major_wound_stuns_only_torso() {
        let torso = resolve_injury(6, 10, 10, HitLocation::Torso);
        assert!(torso.is_major_wound);
        assert!(torso.is_stunned);
        assert!(torso.description.starts_with("Stunned"));

        let arm = resolve_injury(6, 10, 10, HitLocation::Arm);
        assert!(arm.is_major_wound);
        assert!(!arm.is_stunned);
    }

    #[test]
    fn test_half_hp_exactly_is_not_major() {
        let r = resolve_injury(5, 10, 10, HitLocation::Torso);
        assert!(!r.is_major_wound);
        // 11 HP: floor(11/2) = 5, so 6 is major
        assert!(resolve_injury(6, 11, 11, HitLocation::Leg).is_major_wound);
    }

    #[test]
    fn test_shock_penalty() {
        assert_eq!(shock_penalty(0, 10), 0);
        assert_eq!(shock_penalty(2, 10), 2);
        assert_eq!(shock_penalty(9, 10), 4);
        // 25 HP: -1 per 2 HP lost
        assert_eq!(shock_penalty(5, 25), 2);
        assert_eq!(shock_penalty(30, 25), 4);
        assert_eq!(shock_penalty(1, 20), 0);
    }

    #[test]
    fn test_reduced_move_below_third() {
        // ceil(10/3) = 4
        let r = resolve_injury(7, 10, 10, HitLocation::Leg);
        assert_eq!(r.new_hp, 3);
        assert!(r.move_reduced && r.dodge_reduced);
        assert!(r.description.starts_with("Seriously wounded"));

        let r = resolve_injury(6, 10, 10, HitLocation::Leg);
        assert!(!r.move_reduced);
    }

    #[test]
    fn test_zero_hp_needs_consciousness_roll() {
        let r = resolve_injury(3, 3, 10, HitLocation::Arm);
        assert_eq!(r.new_hp, 0);
        assert!(r.unconscious_check_required);
        assert!(!r.death_check_required);
        assert_eq!(r.death_threshold, None);
        assert!(r.description.starts_with("Critically wounded"));
    }

    #[test]
    fn test_death_thresholds() {
        let r = resolve_injury(25, 0, 10, HitLocation::Leg);
        assert_eq!(r.new_hp, -25);
        assert!(r.death_check_required);
        assert_eq!(r.death_threshold, Some(2));
        assert!(!r.is_dead);

        let r = resolve_injury(40, 0, 10, HitLocation::Leg);
        assert_eq!(r.death_threshold, Some(4));
        assert!(!r.is_dead);
    }

    #[test]
    fn test_auto_death_at_minus_five_hp() {
        let r = resolve_injury(60, 10, 10, HitLocation::Torso);
        assert_eq!(r.new_hp, -50);
        assert!(r.is_dead);
        assert_eq!(r.description, "DEAD");
        assert!(r.is_incapacitated());
    }

    #[test]
    fn test_huge_hp_thresholds_do_not_overflow() {
        let r = resolve_injury(2_000_000_000, 0, 500_000_000, HitLocation::Torso);
        assert_eq!(r.new_hp, -2_000_000_000);
        assert!(!r.is_dead);
        assert!(r.death_check_required);
        assert_eq!(r.death_threshold, Some(4));

        let floored = resolve_injury(i32::MAX, i32::MIN, 10, HitLocation::Torso);
        assert_eq!(floored.new_hp, i32::MIN);
        assert!(floored.is_dead);

        assert!(is_past_auto_death(-50, 10));
        assert!(!is_past_auto_death(-49, 10));
        assert!(!is_past_auto_death(i32::MIN, i32::MAX));
    }

    #[test]
    fn test_by_name() {
        let r = resolve_injury_by_name(6, 10, 10, "TORSO").unwrap();
        assert!(r.is_stunned);

        let err = resolve_injury_by_name(6, 10, 10, "tail").unwrap_err();
        assert_eq!(err, ParseLocationError("tail".to_string()));
    }

    #[test]
    fn test_ht_roll_failure_knocks_out() {
        let mut r = resolve_injury(12, 10, 10, HitLocation::Arm);
        assert!(r.unconscious_check_required);
        r.apply_ht_roll(10, 11);
        // -2 HP has not reached -1xHP, so no death check
        assert!(r.is_unconscious);
        assert!(!r.is_dead);
        assert_eq!(r.description, "Unconscious");
    }

    #[test]
    fn test_ht_roll_failure_with_death_check_kills() {
        let mut r = resolve_injury(25, 10, 10, HitLocation::Arm);
        assert!(r.death_check_required);
        r.apply_ht_roll(10, 14);
        assert!(r.is_dead);
        assert_eq!(r.description, "DEAD");
    }

    #[test]
    fn test_ht_roll_success_changes_nothing() {
        let mut r = resolve_injury(12, 10, 10, HitLocation::Arm);
        let before = r.description.clone();
        r.apply_ht_roll(10, 10);
        assert!(!r.is_unconscious);
        assert_eq!(r.description, before);
    }
}
