//! Multi-hit armor scenarios: degrading, regenerating and charged defenses

use rand::Rng;
use serde::{Deserialize, Serialize};

/// One hit in a scenario
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioHit {
    /// Defense value in effect for this hit (armor, shield, charge...)
    pub defense: f64,
    pub absorbed: f64,
    pub damage: f64,
}

/// Hits in order plus running totals
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub hits: Vec<ScenarioHit>,
    pub total_damage: f64,
    /// Remaining HP for scenarios that track it
    pub hp_left: Option<f64>,
    /// Scenario stopped early because the target went down
    pub target_down: bool,
}

/// Ablative armor: DR drops by `degrade` after every hit, never below `min_armor`
pub fn ablative(shots: u32, damage: f64, armor: f64, degrade: f64, min_armor: f64) -> ScenarioReport {
    let mut report = ScenarioReport::default();
    let mut current = armor;
    for _ in 0..shots {
        let effective = current.max(min_armor);
        let dealt = (damage - effective).max(0.0);
        report.hits.push(ScenarioHit {
            defense: effective,
            absorbed: damage - dealt,
            damage: dealt,
        });
        report.total_damage += dealt;
        current = (current - degrade).max(min_armor);
    }
    report
}

/// Shield in front of HP, regenerating between hits
pub fn shield_barrier(shield: f64, hp: f64, hits: u32, damage: f64, regen: f64) -> ScenarioReport {
    let mut report = ScenarioReport::default();
    let mut s = shield;
    let mut h = hp;
    for _ in 0..hits {
        let before = s;
        let absorbed = s.min(damage);
        s -= absorbed;
        let dealt = damage - absorbed;
        h -= dealt;
        report.hits.push(ScenarioHit {
            defense: before,
            absorbed,
            damage: dealt,
        });
        report.total_damage += dealt;
        s = (s + regen).min(shield);
        if h <= 0.0 {
            report.target_down = true;
            break;
        }
    }
    report.hp_left = Some(h);
    report
}

/// How a reactive charge absorbs damage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ChargeAbsorb {
    Flat { amount: f64 },
    Percent { percent: f64 },
}

/// Reactive armor: each of the first `charges` hits is partly absorbed
pub fn reactive_armor(hits: u32, damage: f64, charges: u32, absorb: ChargeAbsorb) -> ScenarioReport {
    let mut report = ScenarioReport::default();
    let mut left = charges;
    for _ in 0..hits {
        let absorbed = if left > 0 {
            left -= 1;
            match absorb {
                ChargeAbsorb::Flat { amount } => damage.min(amount.max(0.0)),
                ChargeAbsorb::Percent { percent } => damage * (percent / 100.0).clamp(0.0, 1.0),
            }
        } else {
            0.0
        };
        let dealt = damage - absorbed;
        report.hits.push(ScenarioHit {
            defense: f64::from(left),
            absorbed,
            damage: dealt,
        });
        report.total_damage += dealt;
    }
    report
}

/// Poise meter per hit: value before the hit and whether it broke
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoiseHit {
    pub before: f64,
    pub after: f64,
    pub staggered: bool,
}

/// Poise: each hit drains the meter, a stagger resets it, otherwise it recovers
pub fn poise(max_poise: f64, poise_damage: f64, recover: f64, hits: u32) -> Vec<PoiseHit> {
    let mut meter = max_poise;
    (0..hits)
        .map(|_| {
            let before = meter;
            let after = meter - poise_damage;
            let staggered = after <= 0.0;
            meter = if staggered {
                max_poise
            } else {
                (after + recover).min(max_poise)
            };
            PoiseHit {
                before,
                after,
                staggered,
            }
        })
        .collect()
}

/// Armor and hit weight of one body zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneArmor {
    pub armor: f64,
    /// Relative hit weight, normalized against the other zones
    pub weight: f64,
}

/// Expected damage of a hit landing on a weighted zone
pub fn zone_expected_damage(damage: f64, zones: &[ZoneArmor]) -> f64 {
    let total_weight: f64 = zones.iter().map(|z| z.weight.max(0.0)).sum::<f64>().max(1.0);
    zones
        .iter()
        .map(|z| (damage - z.armor).max(0.0) * z.weight.max(0.0) / total_weight)
        .sum()
}

/// Soak dice pool: each success removes one point of damage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoakPool {
    pub damage_value: u32,
    pub dice: u32,
    /// Chance of a success per die, 0..=1
    pub success_chance: f64,
}

impl SoakPool {
    /// Pool of body + armor + modifier dice, success on 5+ of a d6
    pub fn new(damage_value: u32, body: i32, armor: i32, modifier: i32) -> Self {
        SoakPool {
            damage_value,
            dice: (body + armor + modifier).max(0) as u32,
            success_chance: 1.0 / 3.0,
        }
    }

    pub fn expected_soak(&self) -> f64 {
        self.dice as f64 * self.success_chance.clamp(0.0, 1.0)
    }

    pub fn expected_damage(&self) -> f64 {
        (self.damage_value as f64 - self.expected_soak()).max(0.0)
    }

    /// Roll the pool once
    pub fn roll_with_rng(&self, rng: &mut impl Rng) -> u32 {
        let p = self.success_chance.clamp(0.0, 1.0);
        let successes = (0..self.dice).filter(|_| rng.gen::<f64>() < p).count() as u32;
        self.damage_value.saturating_sub(successes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_ablative_degrades() {
        let report = ablative(5, 20.0, 10.0, 1.0, 0.0);
        let defenses: Vec<f64> = report.hits.iter().map(|h| h.defense).collect();
        assert_eq!(defenses, vec![10.0, 9.0, 8.0, 7.0, 6.0]);
        assert!((report.total_damage - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_ablative_floor() {
        let report = ablative(4, 20.0, 3.0, 2.0, 2.0);
        assert!(report.hits.iter().all(|h| h.defense >= 2.0));
        assert_eq!(report.hits.last().map(|h| h.defense), Some(2.0));
    }

    #[test]
    fn test_shield_then_hp() {
        let report = shield_barrier(50.0, 100.0, 5, 30.0, 0.0);
        // 30 absorbed, then 20 absorbed + 10 through, then 30 through each
        assert!((report.hits[0].damage - 0.0).abs() < 1e-9);
        assert!((report.hits[1].damage - 10.0).abs() < 1e-9);
        assert!((report.hits[2].damage - 30.0).abs() < 1e-9);
        assert_eq!(report.hp_left, Some(100.0 - 100.0));
        assert!(report.target_down);
        assert_eq!(report.hits.len(), 5);
    }

    #[test]
    fn test_shield_regen_caps() {
        let report = shield_barrier(50.0, 100.0, 3, 10.0, 100.0);
        assert!(report.hits.iter().all(|h| h.defense == 50.0));
        assert!((report.total_damage).abs() < 1e-9);
        assert!(!report.target_down);
    }

    #[test]
    fn test_reactive_charges() {
        let report = reactive_armor(5, 30.0, 2, ChargeAbsorb::Flat { amount: 25.0 });
        assert!((report.total_damage - (5.0 + 5.0 + 30.0 * 3.0)).abs() < 1e-9);

        let report = reactive_armor(2, 40.0, 1, ChargeAbsorb::Percent { percent: 50.0 });
        assert!((report.hits[0].damage - 20.0).abs() < 1e-9);
        assert!((report.hits[1].damage - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_poise_stagger_and_recover() {
        let hits = poise(60.0, 30.0, 10.0, 4);
        assert!(!hits[0].staggered);
        assert!((hits[1].before - 40.0).abs() < 1e-9);
        assert!(!hits[1].staggered);
        assert!((hits[2].before - 20.0).abs() < 1e-9);
        assert!(hits[2].staggered);
        assert!((hits[3].before - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_zone_expected_damage() {
        let zones = [
            ZoneArmor { armor: 5.0, weight: 10.0 },
            ZoneArmor { armor: 10.0, weight: 60.0 },
            ZoneArmor { armor: 7.0, weight: 30.0 },
        ];
        let expected = 25.0 * 0.1 + 20.0 * 0.6 + 23.0 * 0.3;
        assert!((zone_expected_damage(30.0, &zones) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_soak_pool() {
        let pool = SoakPool::new(8, 3, 4, 0);
        assert_eq!(pool.dice, 7);
        assert!((pool.expected_soak() - 7.0 / 3.0).abs() < 1e-9);

        let mut rng = rand::rngs::StdRng::seed_from_u64(4);
        for _ in 0..100 {
            let dealt = pool.roll_with_rng(&mut rng);
            assert!((1..=8).contains(&dealt));
        }

        let empty = SoakPool::new(8, -3, 0, 0);
        assert_eq!(empty.dice, 0);
        assert_eq!(empty.roll_with_rng(&mut rng), 8);
    }
}
