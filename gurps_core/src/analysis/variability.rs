//! Spread statistics for repeated trials of a damage mechanic

use crate::mechanics::{d20_hit_chance, SoakPool};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Descriptive statistics of a sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VariabilityStats {
    pub mean: f64,
    /// Upper median (`sorted[n / 2]`)
    pub median: f64,
    pub std_dev: f64,
    /// Population variance
    pub variance: f64,
    pub min: f64,
    pub max: f64,
    pub q25: f64,
    pub q75: f64,
    pub iqr: f64,
    /// `std_dev / mean`, 0 when the mean is not positive
    pub cv: f64,
}

impl VariabilityStats {
    /// None for an empty sample. NaN values sort last.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let n = sorted.len();
        let nf = n as f64;
        let mean = sorted.iter().sum::<f64>() / nf;
        let variance = sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / nf;
        let std_dev = variance.sqrt();
        let at = |q: f64| sorted[((nf * q).floor() as usize).min(n - 1)];
        let q25 = at(0.25);
        let q75 = at(0.75);

        Some(VariabilityStats {
            mean,
            median: sorted[n / 2],
            std_dev,
            variance,
            min: sorted[0],
            max: sorted[n - 1],
            q25,
            q75,
            iqr: q75 - q25,
            cv: if mean > 0.0 { std_dev / mean } else { 0.0 },
        })
    }
}

/// A mechanic whose damage varies from trial to trial
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VariableMechanic {
    /// Soak dice remove damage one success at a time
    Soak(SoakPool),
    /// d20 against AC, full damage on a hit
    ArmorClass {
        damage: f64,
        ac: f64,
        attack_bonus: f64,
    },
    /// Deterministic damage
    Fixed { damage: f64 },
}

impl VariableMechanic {
    pub fn trial_with_rng(&self, rng: &mut impl Rng) -> f64 {
        match *self {
            VariableMechanic::Soak(pool) => pool.roll_with_rng(rng) as f64,
            VariableMechanic::ArmorClass {
                damage,
                ac,
                attack_bonus,
            } => {
                if rng.gen::<f64>() < d20_hit_chance(ac, attack_bonus) {
                    damage
                } else {
                    0.0
                }
            }
            VariableMechanic::Fixed { damage } => damage,
        }
    }
}

/// Run `trials` trials and summarize them
pub fn analyze_variability(
    mechanic: &VariableMechanic,
    trials: usize,
    rng: &mut impl Rng,
) -> Option<VariabilityStats> {
    let samples: Vec<f64> = (0..trials).map(|_| mechanic.trial_with_rng(rng)).collect();
    VariabilityStats::from_samples(&samples)
}
