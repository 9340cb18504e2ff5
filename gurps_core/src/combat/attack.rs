//! Attack simulation - modifiers, hit roll, damage and injury in one pass

use super::damage::{resolve_damage_with_rng, DamageCalculationParams};
use super::hit::{hit_description, miss_description, resolve_hit};
use super::injury::resolve_injury;
use super::result::{AttackOutcome, SkillModifier};
use crate::dice::roll_3d6_with_rng;
use crate::types::{DamageType, HitLocation};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// GURPS speed/range table: (max distance in yards, modifier)
pub const RANGE_TABLE: [(u32, i32); 21] = [
    (1, 10),
    (2, 9),
    (3, 8),
    (5, 7),
    (7, 6),
    (10, 5),
    (15, 4),
    (20, 3),
    (30, 2),
    (50, 1),
    (70, 0),
    (100, -1),
    (150, -2),
    (200, -3),
    (300, -4),
    (500, -5),
    (700, -6),
    (1000, -7),
    (1500, -8),
    (2000, -9),
    (3000, -10),
];

/// Target speed beyond this adds no further penalty
pub const MAX_SPEED_PENALTY: u32 = 6;

/// Extra damage for an All-Out Attack (Strong)
pub const ALL_OUT_STRONG_BONUS: f64 = 2.0;

/// Extra damage beyond half-damage range: halves the roll
pub const HALF_DAMAGE_EXTRA: f64 = -0.5;

/// Melee attack option
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeleeManeuver {
    #[default]
    Normal,
    AllOutDetermined,
    AllOutStrong,
    Committed,
    Deceptive,
    RapidStrike,
}

impl MeleeManeuver {
    pub fn all() -> &'static [MeleeManeuver] {
        &[
            MeleeManeuver::Normal,
            MeleeManeuver::AllOutDetermined,
            MeleeManeuver::AllOutStrong,
            MeleeManeuver::Committed,
            MeleeManeuver::Deceptive,
            MeleeManeuver::RapidStrike,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            MeleeManeuver::Normal => "Attack",
            MeleeManeuver::AllOutDetermined => "All-Out Attack (Determined)",
            MeleeManeuver::AllOutStrong => "All-Out Attack (Strong)",
            MeleeManeuver::Committed => "Committed Attack",
            MeleeManeuver::Deceptive => "Deceptive Attack",
            MeleeManeuver::RapidStrike => "Rapid Strike",
        }
    }

    pub fn skill_modifier(&self) -> i32 {
        match self {
            MeleeManeuver::Normal | MeleeManeuver::AllOutStrong => 0,
            MeleeManeuver::AllOutDetermined => 4,
            MeleeManeuver::Committed | MeleeManeuver::Deceptive => -2,
            MeleeManeuver::RapidStrike => -6,
        }
    }

    pub fn extra_damage(&self) -> f64 {
        match self {
            MeleeManeuver::AllOutStrong => ALL_OUT_STRONG_BONUS,
            _ => 0.0,
        }
    }
}

/// Attacker posture
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Posture {
    #[default]
    Standing,
    Sitting,
    Kneeling,
    Lying,
    Crawling,
}

impl Posture {
    pub fn all() -> &'static [Posture] {
        &[
            Posture::Standing,
            Posture::Sitting,
            Posture::Kneeling,
            Posture::Lying,
            Posture::Crawling,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Posture::Standing => "Standing",
            Posture::Sitting => "Sitting",
            Posture::Kneeling => "Kneeling",
            Posture::Lying => "Lying",
            Posture::Crawling => "Crawling",
        }
    }

    pub fn attack_modifier(&self) -> i32 {
        match self {
            Posture::Standing => 0,
            Posture::Sitting | Posture::Kneeling => -2,
            Posture::Lying | Posture::Crawling => -4,
        }
    }

    pub fn defense_modifier(&self) -> i32 {
        match self {
            Posture::Standing => 0,
            Posture::Sitting | Posture::Kneeling => -2,
            Posture::Lying | Posture::Crawling => -3,
        }
    }
}

/// How the attack is made, with the parameters each kind needs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttackMode {
    Melee {
        maneuver: MeleeManeuver,
        posture: Posture,
        /// Situational bonus or penalty (flanking, cramped quarters...)
        situational: i32,
        weapon_reach: u32,
        target_reach: u32,
    },
    Ranged {
        range_yards: u32,
        accuracy: i32,
        aiming: bool,
        half_damage_range: u32,
        max_range: u32,
        size_modifier: i32,
        target_speed: u32,
    },
}

impl Default for AttackMode {
    fn default() -> Self {
        AttackMode::Melee {
            maneuver: MeleeManeuver::Normal,
            posture: Posture::Standing,
            situational: 0,
            weapon_reach: 1,
            target_reach: 1,
        }
    }
}

impl AttackMode {
    pub fn is_ranged(&self) -> bool {
        matches!(self, AttackMode::Ranged { .. })
    }

    /// Skill modifiers contributed by the mode, location excluded
    pub fn skill_modifiers(&self) -> Vec<SkillModifier> {
        match *self {
            AttackMode::Melee {
                maneuver,
                posture,
                situational,
                weapon_reach,
                target_reach,
            } => {
                let mut modifiers = vec![
                    SkillModifier::new("situation", situational),
                    SkillModifier::new(maneuver.name(), maneuver.skill_modifier()),
                    SkillModifier::new(posture.name(), posture.attack_modifier()),
                ];
                let reach = reach_modifier(weapon_reach, target_reach);
                if reach != 0 {
                    modifiers.push(SkillModifier::new("reach", reach));
                }
                modifiers
            }
            AttackMode::Ranged {
                range_yards,
                accuracy,
                aiming,
                size_modifier,
                target_speed,
                ..
            } => {
                let mut modifiers = Vec::new();
                if aiming {
                    modifiers.push(SkillModifier::new("aim", accuracy));
                }
                modifiers.push(SkillModifier::new("size", size_modifier));
                modifiers.push(SkillModifier::new("range", range_modifier(range_yards)));
                modifiers.push(SkillModifier::new("speed", speed_modifier(target_speed)));
                modifiers
            }
        }
    }

    /// Target is beyond the weapon's maximum range
    pub fn is_out_of_range(&self) -> bool {
        match *self {
            AttackMode::Ranged {
                range_yards,
                max_range,
                ..
            } => range_yards > max_range,
            AttackMode::Melee { .. } => false,
        }
    }

    pub fn is_beyond_half_damage_range(&self) -> bool {
        match *self {
            AttackMode::Ranged {
                range_yards,
                half_damage_range,
                ..
            } => range_yards > half_damage_range,
            AttackMode::Melee { .. } => false,
        }
    }

    /// Extra damage fed into the damage pipeline on a hit
    pub fn extra_damage(&self, is_auto_max_damage: bool) -> f64 {
        if is_auto_max_damage {
            return 0.0;
        }
        match *self {
            AttackMode::Melee { maneuver, .. } => maneuver.extra_damage(),
            AttackMode::Ranged { .. } if self.is_beyond_half_damage_range() => HALF_DAMAGE_EXTRA,
            AttackMode::Ranged { .. } => 0.0,
        }
    }
}

/// Range penalty: first band whose distance covers the range
pub fn range_modifier(range_yards: u32) -> i32 {
    RANGE_TABLE
        .iter()
        .find(|(distance, _)| range_yards <= *distance)
        .or(RANGE_TABLE.last())
        .map_or(0, |(_, modifier)| *modifier)
}

/// Speed penalty of a moving target
pub fn speed_modifier(speed: u32) -> i32 {
    -(speed.min(MAX_SPEED_PENALTY) as i32)
}

/// Longer weapon +1, shorter -2
pub fn reach_modifier(weapon_reach: u32, target_reach: u32) -> i32 {
    use std::cmp::Ordering;
    match weapon_reach.cmp(&target_reach) {
        Ordering::Greater => 1,
        Ordering::Less => -2,
        Ordering::Equal => 0,
    }
}

/// Attacker, weapon and target values shared by every attack in a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackSetup {
    pub attacker_skill: i32,
    pub attacker_strength: i32,
    pub base_damage: String,
    pub damage_type: DamageType,
    pub armor_value: i32,
    pub target_max_hp: i32,
}

impl Default for AttackSetup {
    fn default() -> Self {
        AttackSetup {
            attacker_skill: 12,
            attacker_strength: 12,
            base_damage: "2d+1".to_string(),
            damage_type: DamageType::Crushing,
            armor_value: 4,
            target_max_hp: 10,
        }
    }
}

/// Simulate one attack using the thread RNG
pub fn simulate_attack(
    setup: &AttackSetup,
    mode: &AttackMode,
    location: HitLocation,
    current_hp: i32,
) -> AttackOutcome {
    let mut rng = rand::thread_rng();
    simulate_attack_with_rng(setup, mode, location, current_hp, &mut rng)
}

/// Simulate one attack with a provided RNG (for deterministic testing)
pub fn simulate_attack_with_rng(
    setup: &AttackSetup,
    mode: &AttackMode,
    location: HitLocation,
    current_hp: i32,
    rng: &mut impl Rng,
) -> AttackOutcome {
    if mode.is_out_of_range() {
        return out_of_range(setup, mode, location);
    }
    let roll = roll_3d6_with_rng(rng);
    resolve_attack_with_rng(setup, mode, location, current_hp, roll, rng)
}

/// Resolve an attack with a known hit roll.
///
/// 1. Sum base skill, mode modifiers and location penalty
/// 2. Resolve the roll against effective skill
/// 3. On a hit, divide armor by the damage type's divisor and run the damage pipeline
/// 4. If damage got through, resolve the injury and any special wound notes
pub fn resolve_attack_with_rng(
    setup: &AttackSetup,
    mode: &AttackMode,
    location: HitLocation,
    current_hp: i32,
    hit_roll: u32,
    rng: &mut impl Rng,
) -> AttackOutcome {
    let mut outcome = base_outcome(setup, mode, location);
    outcome.hit_roll = Some(hit_roll);

    let hit = resolve_hit(hit_roll, outcome.effective_skill);
    outcome.hit = hit;

    if !hit.hit_success {
        outcome.description = describe_miss(&outcome, hit_roll);
        debug!(hit_roll, effective_skill = outcome.effective_skill, "attack missed");
        return outcome;
    }

    outcome.extra_damage = mode.extra_damage(hit.is_auto_max_damage);
    outcome.damage_halved = mode.is_beyond_half_damage_range() && !hit.is_auto_max_damage;

    let params = DamageCalculationParams {
        base_damage: setup.base_damage.clone(),
        is_auto_max_damage: hit.is_auto_max_damage,
        armor_value: setup.damage_type.adjusted_armor(setup.armor_value),
        damage_type_multiplier: setup.damage_type.wound_multiplier(),
        location_vitality_multiplier: location.vitality_multiplier(),
        extra_damage: outcome.extra_damage,
        attacker_strength: setup.attacker_strength,
    };
    let damage = resolve_damage_with_rng(&params, rng);
    outcome.damage = Some(damage);

    if damage.final_damage > 0 {
        outcome.injury = Some(resolve_injury(
            damage.final_damage,
            current_hp,
            setup.target_max_hp,
            location,
        ));
        if !mode.is_ranged() {
            outcome.special_injuries =
                special_injuries(setup.damage_type, location, damage.final_damage);
        }
    }

    outcome.description = describe_hit(&outcome, setup, mode, hit_roll);
    debug!(
        hit_roll,
        effective_skill = outcome.effective_skill,
        final_damage = damage.final_damage,
        "attack hit"
    );
    outcome
}

/// Wound notes for cutting blows to the neck and impaling blows to the skull
pub fn special_injuries(
    damage_type: DamageType,
    location: HitLocation,
    final_damage: i32,
) -> Vec<String> {
    let mut notes = Vec::new();
    if damage_type == DamageType::Cutting && location == HitLocation::Neck && final_damage >= 8 {
        notes.push("Possible decapitation".to_string());
    }
    if damage_type == DamageType::Impaling && location == HitLocation::Skull && final_damage >= 10 {
        notes.push("Penetrating skull wound".to_string());
    }
    notes
}

fn base_outcome(setup: &AttackSetup, mode: &AttackMode, location: HitLocation) -> AttackOutcome {
    let mut modifiers = mode.skill_modifiers();
    modifiers.push(SkillModifier::new("location", location.hit_penalty()));
    let effective_skill = setup.attacker_skill + modifiers.iter().map(|m| m.value).sum::<i32>();

    AttackOutcome {
        base_damage: setup.base_damage.clone(),
        damage_type: setup.damage_type,
        location,
        armor_value: setup.armor_value,
        base_skill: setup.attacker_skill,
        modifiers,
        effective_skill,
        hit_roll: None,
        hit: Default::default(),
        out_of_range: false,
        extra_damage: 0.0,
        damage_halved: false,
        damage: None,
        injury: None,
        special_injuries: Vec::new(),
        description: String::new(),
    }
}

fn out_of_range(setup: &AttackSetup, mode: &AttackMode, location: HitLocation) -> AttackOutcome {
    let mut outcome = base_outcome(setup, mode, location);
    outcome.out_of_range = true;
    if let AttackMode::Ranged {
        range_yards,
        max_range,
        ..
    } = *mode
    {
        outcome.description = format!(
            "Target out of range! {} yd exceeds maximum range of {} yd.",
            range_yards, max_range
        );
    }
    debug!(?mode, "target out of range");
    outcome
}

fn skill_breakdown(outcome: &AttackOutcome) -> String {
    let mut text = format!("base {}", outcome.base_skill);
    for m in &outcome.modifiers {
        text.push_str(&format!(" {:+} {}", m.value, m.label));
    }
    text
}

fn describe_miss(outcome: &AttackOutcome, roll: u32) -> String {
    format!(
        "{} Rolled {} against skill {} ({})",
        miss_description(roll),
        roll,
        outcome.effective_skill,
        skill_breakdown(outcome)
    )
}

fn describe_hit(outcome: &AttackOutcome, setup: &AttackSetup, mode: &AttackMode, roll: u32) -> String {
    let mut lines = Vec::new();

    let headline = hit_description(outcome.hit.is_critical, outcome.hit.is_auto_max_damage);
    match *mode {
        AttackMode::Ranged { range_yards, .. } => {
            lines.push(format!("{} {} at {} yd! (rolled {})", headline, outcome.location, range_yards, roll))
        }
        AttackMode::Melee { .. } => {
            lines.push(format!("{} {}! (rolled {})", headline, outcome.location, roll))
        }
    }
    lines.push(format!(
        "Skill: {} ({})",
        outcome.effective_skill,
        skill_breakdown(outcome)
    ));

    if let Some(damage) = &outcome.damage {
        let mut damage_line = format!("Damage: {}", setup.base_damage);
        if outcome.hit.is_auto_max_damage {
            damage_line.push_str(" (MAXIMUM)");
        }
        if outcome.damage_halved {
            damage_line.push_str(" halved");
        } else if outcome.extra_damage > 0.0 {
            damage_line.push_str(&format!(" {:+}", outcome.extra_damage));
        }
        damage_line.push_str(&format!(
            " = {} -> after DR {}: {}",
            damage.basic_damage, damage.effective_armor, damage.damage_after_armor
        ));
        lines.push(damage_line);
        lines.push(format!(
            "{} (x{}): {} -> {} (x{}): {}",
            setup.damage_type,
            setup.damage_type.wound_multiplier(),
            damage.multiplied_damage,
            outcome.location,
            outcome.location.vitality_multiplier(),
            damage.final_damage
        ));
    }

    if let AttackMode::Melee { maneuver, posture, .. } = *mode {
        match posture.defense_modifier() {
            0 => lines.push(format!("{}, {}", maneuver.name(), posture.name())),
            defense => lines.push(format!(
                "{}, {} ({:+} to defend)",
                maneuver.name(),
                posture.name(),
                defense
            )),
        }
    }

    for note in &outcome.special_injuries {
        lines.push(note.clone());
    }
    if let Some(injury) = &outcome.injury {
        lines.push(injury.description.clone());
    }

    lines.join("\n")
}
