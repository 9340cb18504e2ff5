//! Monte-Carlo sampling of 3d6 against a flat 3-18 roll

use crate::dice::{probability_of, roll_3d6_with_rng, DistributionCache, ParsedDamage};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const MIN_ROLL: u32 = 3;
pub const MAX_ROLL: u32 = 18;

/// How a 3-18 result is generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollScheme {
    /// Three six-sided dice, bell curve
    ThreeD6,
    /// One 16-sided die plus 2, uniform
    Flat,
}

impl RollScheme {
    pub fn name(&self) -> &'static str {
        match self {
            RollScheme::ThreeD6 => "3d6",
            RollScheme::Flat => "Flat 3-18",
        }
    }

    /// The equivalent dice formula
    pub fn formula(&self) -> ParsedDamage {
        match self {
            RollScheme::ThreeD6 => ParsedDamage::d6(3, 0),
            RollScheme::Flat => ParsedDamage::with_sides(1, 16, 2),
        }
    }

    pub fn roll_with_rng(&self, rng: &mut impl Rng) -> u32 {
        match self {
            RollScheme::ThreeD6 => roll_3d6_with_rng(rng),
            RollScheme::Flat => rng.gen_range(MIN_ROLL..=MAX_ROLL),
        }
    }
}

/// Counts per result for one scheme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampledHistogram {
    pub scheme: RollScheme,
    counts: Vec<u64>,
    samples: u64,
}

/// One histogram row with its exact expectation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramRow {
    pub value: u32,
    pub count: u64,
    /// Observed share, percent
    pub percentage: f64,
    /// Exact share, percent
    pub theoretical: f64,
}

impl HistogramRow {
    pub fn deviation(&self) -> f64 {
        (self.percentage - self.theoretical).abs()
    }
}

impl SampledHistogram {
    pub fn new(scheme: RollScheme) -> Self {
        SampledHistogram {
            scheme,
            counts: vec![0; (MAX_ROLL - MIN_ROLL + 1) as usize],
            samples: 0,
        }
    }

    pub fn record(&mut self, value: u32) {
        if let Some(slot) = value
            .checked_sub(MIN_ROLL)
            .and_then(|i| self.counts.get_mut(i as usize))
        {
            *slot += 1;
            self.samples += 1;
        }
    }

    pub fn samples(&self) -> u64 {
        self.samples
    }

    pub fn count(&self, value: u32) -> u64 {
        value
            .checked_sub(MIN_ROLL)
            .and_then(|i| self.counts.get(i as usize))
            .copied()
            .unwrap_or(0)
    }

    /// Observed share of a value, percent
    pub fn percentage(&self, value: u32) -> f64 {
        if self.samples == 0 {
            return 0.0;
        }
        self.count(value) as f64 / self.samples as f64 * 100.0
    }

    /// Observed share of an inclusive range of values, percent
    pub fn range_percentage(&self, low: u32, high: u32) -> f64 {
        (low..=high).map(|v| self.percentage(v)).sum()
    }

    /// Rows for every value 3-18 with exact percentages from the distribution engine
    pub fn rows(&self, cache: &mut DistributionCache) -> Vec<HistogramRow> {
        let exact = cache.damage_distribution(&self.scheme.formula());
        (MIN_ROLL..=MAX_ROLL)
            .map(|value| HistogramRow {
                value,
                count: self.count(value),
                percentage: self.percentage(value),
                theoretical: probability_of(&exact, value) * 100.0,
            })
            .collect()
    }
}

/// Progress report passed to the sampling callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingProgress {
    pub done: usize,
    pub total: usize,
}

impl SamplingProgress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.done as f64 / self.total as f64
        }
    }
}

/// Both schemes sampled side by side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingComparison {
    pub bell: SampledHistogram,
    pub flat: SampledHistogram,
}

impl SamplingComparison {
    /// Share of extreme results (3-4 and 17-18) for each scheme, percent
    pub fn extremes(&self) -> (f64, f64) {
        let extreme = |h: &SampledHistogram| h.range_percentage(3, 4) + h.range_percentage(17, 18);
        (extreme(&self.bell), extreme(&self.flat))
    }

    /// Share of middle results (10-11) for each scheme, percent
    pub fn middle(&self) -> (f64, f64) {
        (
            self.bell.range_percentage(10, 11),
            self.flat.range_percentage(10, 11),
        )
    }
}

/// Sample both schemes `samples` times.
///
/// `on_progress` is called after every `chunk_size` samples and once at the
/// end, so a host UI can redraw between chunks.
pub fn compare_rolls(
    samples: usize,
    chunk_size: usize,
    rng: &mut impl Rng,
    mut on_progress: impl FnMut(SamplingProgress),
) -> SamplingComparison {
    let chunk_size = chunk_size.max(1);
    let mut bell = SampledHistogram::new(RollScheme::ThreeD6);
    let mut flat = SampledHistogram::new(RollScheme::Flat);

    for i in 1..=samples {
        bell.record(RollScheme::ThreeD6.roll_with_rng(rng));
        flat.record(RollScheme::Flat.roll_with_rng(rng));

        if i % chunk_size == 0 && i != samples {
            on_progress(SamplingProgress {
                done: i,
                total: samples,
            });
        }
    }
    on_progress(SamplingProgress {
        done: samples,
        total: samples,
    });

    debug!(samples, chunk_size, "sampled 3d6 against flat");
    SamplingComparison { bell, flat }
}
