//! Damage formula parsing - "2d+1", "sw+2", "thr-1", "8"

use super::strength::strength_damage;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::warn;

/// Faces on every die a damage formula can name
pub const DAMAGE_DIE_SIDES: u32 = 6;

/// Largest dice count a formula may request
pub const MAX_FORMULA_DICE: u32 = 100;

static DICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)d([+-]\d+)?").expect("valid regex"));
static TRAILING_MODIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([+-]\d+)$").expect("valid regex"));
static LEADING_INT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+").expect("valid regex"));

/// Damage formula parse error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormulaError {
    #[error("Empty damage formula")]
    Empty,
    #[error("Not a dice expression or number: {0}")]
    Unrecognized(String),
    #[error("Dice count must be at most {max}, got {got}")]
    TooManyDice { max: u32, got: String },
    #[error("Modifier out of range: {0}")]
    ModifierOutOfRange(String),
}

/// A parsed damage formula: roll `dice` dice of `sides` faces and add `modifier`.
///
/// When `dice == 0` the formula was a flat number held in `modifier`
/// and `sides` is 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParsedDamage {
    pub dice: u32,
    pub sides: u32,
    pub modifier: i32,
}

impl ParsedDamage {
    /// A constant damage value
    pub fn flat(value: i32) -> Self {
        ParsedDamage {
            dice: 0,
            sides: 0,
            modifier: value,
        }
    }

    /// `dice` six-sided dice plus `modifier`
    pub fn d6(dice: u32, modifier: i32) -> Self {
        if dice == 0 {
            return Self::flat(modifier);
        }
        ParsedDamage {
            dice,
            sides: DAMAGE_DIE_SIDES,
            modifier,
        }
    }

    /// Arbitrary die size, used for non-damage comparisons (e.g. 1d16+2)
    pub fn with_sides(dice: u32, sides: u32, modifier: i32) -> Self {
        if dice == 0 {
            return Self::flat(modifier);
        }
        ParsedDamage {
            dice,
            sides,
            modifier,
        }
    }

    pub fn is_flat(&self) -> bool {
        self.dice == 0
    }
}

impl fmt::Display for ParsedDamage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_flat() {
            return write!(f, "{}", self.modifier);
        }
        write!(f, "{}d", self.dice)?;
        if self.sides != DAMAGE_DIE_SIDES {
            write!(f, "{}", self.sides)?;
        }
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{}", m),
            m => write!(f, "{}", m),
        }
    }
}

/// Parse a damage formula, falling back to a flat 0 when it cannot be read.
///
/// `sw`/`thr` formulas resolve through the strength table at `strength`.
pub fn parse_damage(formula: &str, strength: i32) -> ParsedDamage {
    parse_damage_strict(formula, strength).unwrap_or_else(|err| {
        warn!(formula, %err, "unreadable damage formula, using flat 0");
        ParsedDamage::flat(0)
    })
}

/// Parse a damage formula, reporting malformed input as an error
pub fn parse_damage_strict(formula: &str, strength: i32) -> Result<ParsedDamage, FormulaError> {
    let formula = formula.trim().to_lowercase();
    if formula.is_empty() {
        return Err(FormulaError::Empty);
    }

    let (base, extra_modifier) = if formula.starts_with("sw") || formula.starts_with("thr") {
        let entry = strength_damage(strength);
        let base = if formula.starts_with("sw") {
            entry.swing
        } else {
            entry.thrust
        };
        let extra = match TRAILING_MODIFIER_RE.captures(&formula) {
            Some(caps) => parse_modifier(&caps[1])?,
            None => 0,
        };
        (base.to_string(), extra)
    } else {
        (formula.clone(), 0)
    };

    let Some(caps) = DICE_RE.captures(&base) else {
        let value = parse_flat(&base)?;
        return combine_modifiers(value, extra_modifier, &formula).map(ParsedDamage::flat);
    };

    let dice: u32 = caps[1]
        .parse()
        .ok()
        .filter(|n| *n <= MAX_FORMULA_DICE)
        .ok_or_else(|| FormulaError::TooManyDice {
            max: MAX_FORMULA_DICE,
            got: caps[1].to_string(),
        })?;
    let base_modifier = match caps.get(2) {
        Some(m) => parse_modifier(m.as_str())?,
        None => 0,
    };

    let modifier = combine_modifiers(base_modifier, extra_modifier, &formula)?;
    Ok(ParsedDamage::d6(dice, modifier))
}

fn combine_modifiers(base: i32, extra: i32, formula: &str) -> Result<i32, FormulaError> {
    base.checked_add(extra)
        .ok_or_else(|| FormulaError::ModifierOutOfRange(formula.to_string()))
}

fn parse_modifier(text: &str) -> Result<i32, FormulaError> {
    text.parse()
        .map_err(|_| FormulaError::ModifierOutOfRange(text.to_string()))
}

/// Leading integer of the string, the way a lenient number reader would take it
fn parse_flat(text: &str) -> Result<i32, FormulaError> {
    let m = LEADING_INT_RE
        .find(text)
        .ok_or_else(|| FormulaError::Unrecognized(text.to_string()))?;
    parse_modifier(m.as_str())
}
