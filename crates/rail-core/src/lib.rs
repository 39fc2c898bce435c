pub mod condition;
pub mod error;
pub mod integrate;
pub mod profile;
pub mod synth;

#[cfg(test)]
mod tests;

pub use condition::{classify, Condition, ConditionLabel, ConditionScale, DEFAULT_THRESHOLDS};
pub use error::RailError;
pub use integrate::{integrate_unit, quantify, quantify_with, OddIntervalRule, Quantification};
pub use profile::Profile;
pub use synth::{
    entropy_rng, seeded_rng, synthesize_defect_profile, synthesize_noise, HARMONICS,
    HARMONIC_SCALE,
};
