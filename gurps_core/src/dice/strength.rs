//! Basic melee damage by ST (thrust / swing)

use tracing::warn;

/// Thrust and swing dice for one ST score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrengthDamageEntry {
    pub strength: i32,
    pub thrust: &'static str,
    pub swing: &'static str,
}

const fn entry(strength: i32, thrust: &'static str, swing: &'static str) -> StrengthDamageEntry {
    StrengthDamageEntry {
        strength,
        thrust,
        swing,
    }
}

/// Every score from 1 to 40, then steps of 5 up to 100
pub static STRENGTH_TABLE: &[StrengthDamageEntry] = &[
    entry(1, "1d-6", "1d-5"),
    entry(2, "1d-6", "1d-5"),
    entry(3, "1d-5", "1d-4"),
    entry(4, "1d-5", "1d-4"),
    entry(5, "1d-4", "1d-3"),
    entry(6, "1d-4", "1d-3"),
    entry(7, "1d-3", "1d-2"),
    entry(8, "1d-3", "1d-2"),
    entry(9, "1d-2", "1d-1"),
    entry(10, "1d-2", "1d"),
    entry(11, "1d-1", "1d+1"),
    entry(12, "1d-1", "1d+2"),
    entry(13, "1d", "2d-1"),
    entry(14, "1d", "2d"),
    entry(15, "1d+1", "2d+1"),
    entry(16, "1d+1", "2d+2"),
    entry(17, "1d+2", "3d-1"),
    entry(18, "1d+2", "3d"),
    entry(19, "2d-1", "3d+1"),
    entry(20, "2d-1", "3d+2"),
    entry(21, "2d", "4d-1"),
    entry(22, "2d", "4d"),
    entry(23, "2d+1", "4d+1"),
    entry(24, "2d+1", "4d+2"),
    entry(25, "2d+2", "5d-1"),
    entry(26, "2d+2", "5d"),
    entry(27, "3d-1", "5d+1"),
    entry(28, "3d-1", "5d+1"),
    entry(29, "3d", "5d+2"),
    entry(30, "3d", "5d+2"),
    entry(31, "3d+1", "6d-1"),
    entry(32, "3d+1", "6d-1"),
    entry(33, "3d+2", "6d"),
    entry(34, "3d+2", "6d"),
    entry(35, "4d-1", "6d+1"),
    entry(36, "4d-1", "6d+1"),
    entry(37, "4d", "6d+2"),
    entry(38, "4d", "6d+2"),
    entry(39, "4d+1", "7d-1"),
    entry(40, "4d+1", "7d-1"),
    entry(45, "5d", "7d+1"),
    entry(50, "5d+2", "8d-1"),
    entry(55, "6d", "8d+1"),
    entry(60, "7d-1", "9d"),
    entry(65, "7d+1", "9d+2"),
    entry(70, "8d", "10d"),
    entry(75, "8d+2", "10d+2"),
    entry(80, "9d", "11d"),
    entry(85, "9d+2", "11d+2"),
    entry(90, "10d", "12d"),
    entry(95, "10d+2", "12d+2"),
    entry(100, "11d", "13d"),
];

/// Look up thrust/swing for a ST score.
///
/// Scores between tabulated rows use the nearest row below. Scores outside
/// 1..=100 are clamped to the table ends.
pub fn strength_damage(strength: i32) -> &'static StrengthDamageEntry {
    let first = &STRENGTH_TABLE[0];
    let last = &STRENGTH_TABLE[STRENGTH_TABLE.len() - 1];

    if strength < first.strength {
        warn!(strength, "ST below damage table, clamping to {}", first.strength);
        return first;
    }
    if strength > last.strength {
        warn!(strength, "ST above damage table, clamping to {}", last.strength);
        return last;
    }

    let idx = STRENGTH_TABLE.partition_point(|e| e.strength <= strength);
    &STRENGTH_TABLE[idx - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_rows() {
        let st10 = strength_damage(10);
        assert_eq!(st10.thrust, "1d-2");
        assert_eq!(st10.swing, "1d");

        let st12 = strength_damage(12);
        assert_eq!(st12.thrust, "1d-1");
        assert_eq!(st12.swing, "1d+2");
    }

    #[test]
    fn test_gap_uses_row_below() {
        assert_eq!(strength_damage(47).strength, 45);
        assert_eq!(strength_damage(99).strength, 95);
    }

    #[test]
    fn test_out_of_range_clamps() {
        assert_eq!(strength_damage(0).strength, 1);
        assert_eq!(strength_damage(-5).strength, 1);
        assert_eq!(strength_damage(250).strength, 100);
    }

    #[test]
    fn test_table_is_sorted() {
        assert!(STRENGTH_TABLE.windows(2).all(|w| w[0].strength < w[1].strength));
    }
}
