//! Monte-Carlo analysis - sampled roll shapes and damage spread

mod sampling;
mod variability;

pub use sampling::{
    compare_rolls, HistogramRow, RollScheme, SampledHistogram, SamplingComparison,
    SamplingProgress, MAX_ROLL, MIN_ROLL,
};
pub use variability::{analyze_variability, VariabilityStats, VariableMechanic};
