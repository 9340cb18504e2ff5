//! Hit resolution - 3d6 against effective skill

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome of one attack roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CriticalHitResult {
    pub hit_success: bool,
    pub is_critical: bool,
    pub is_auto_max_damage: bool,
}

impl CriticalHitResult {
    fn miss() -> Self {
        CriticalHitResult::default()
    }

    fn critical(auto_max: bool) -> Self {
        CriticalHitResult {
            hit_success: true,
            is_critical: true,
            is_auto_max_damage: auto_max,
        }
    }
}

/// Resolve a 3d6 attack roll.
///
/// Checked in order:
/// 1. 3 or 4 always hits critically; a 3 also deals maximum damage
/// 2. 5 is critical at skill 15+
/// 3. 6 is critical at skill 16+
/// 4. 17 or 18 always misses
/// 5. otherwise hit when roll <= skill
pub fn resolve_hit(roll: u32, effective_skill: i32) -> CriticalHitResult {
    let result = if roll <= 4 {
        CriticalHitResult::critical(roll == 3)
    } else if roll == 5 && effective_skill >= 15 {
        CriticalHitResult::critical(false)
    } else if roll == 6 && effective_skill >= 16 {
        CriticalHitResult::critical(false)
    } else if roll >= 17 {
        CriticalHitResult::miss()
    } else {
        CriticalHitResult {
            hit_success: roll as i64 <= effective_skill as i64,
            ..CriticalHitResult::miss()
        }
    };

    debug!(roll, effective_skill, ?result, "resolved hit");
    result
}

/// Headline for a successful hit
pub fn hit_description(is_critical: bool, is_auto_max_damage: bool) -> &'static str {
    match (is_critical, is_auto_max_damage) {
        (true, true) => "CRITICAL HIT (3)! MAXIMUM DAMAGE!",
        (true, false) => "CRITICAL HIT!",
        _ => "Hit",
    }
}

/// Headline for a miss
pub fn miss_description(roll: u32) -> &'static str {
    if roll >= 17 {
        "CRITICAL MISS!"
    } else {
        "Miss!"
    }
}
