//! Dice rolling for parsed damage formulas and 3d6 success rolls

use super::formula::ParsedDamage;
use rand::Rng;

/// Roll a parsed formula using the thread RNG
pub fn roll_damage(parsed: &ParsedDamage) -> i32 {
    let mut rng = rand::thread_rng();
    roll_damage_with_rng(parsed, &mut rng)
}

/// Roll a parsed formula with a provided RNG (for deterministic testing)
///
/// Flat formulas return their value unchanged. Thrown dice never total
/// less than 1.
pub fn roll_damage_with_rng(parsed: &ParsedDamage, rng: &mut impl Rng) -> i32 {
    if parsed.is_flat() {
        return parsed.modifier;
    }

    let total: i32 = (0..parsed.dice)
        .map(|_| rng.gen_range(1..=parsed.sides.max(1)) as i32)
        .sum();

    total.saturating_add(parsed.modifier).max(1)
}

/// Expected value of a formula, unfloored
pub fn average_damage(parsed: &ParsedDamage) -> f64 {
    if parsed.is_flat() {
        return parsed.modifier as f64;
    }
    parsed.dice as f64 * (parsed.sides as f64 + 1.0) / 2.0 + parsed.modifier as f64
}

/// Highest value the formula can roll
pub fn max_damage(parsed: &ParsedDamage) -> i32 {
    if parsed.is_flat() {
        return parsed.modifier;
    }
    ((parsed.dice * parsed.sides) as i32)
        .saturating_add(parsed.modifier)
        .max(1)
}

/// Roll 3d6 using the thread RNG
pub fn roll_3d6() -> u32 {
    let mut rng = rand::thread_rng();
    roll_3d6_with_rng(&mut rng)
}

/// Roll 3d6 with a provided RNG
pub fn roll_3d6_with_rng(rng: &mut impl Rng) -> u32 {
    (0..3).map(|_| rng.gen_range(1..=6u32)).sum()
}
