use crate::error::RailError;
use serde::{Deserialize, Serialize};

/// Height samples at unit spacing along the rail, index 0..len-1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profile {
    samples: Vec<f64>,
}

impl Profile {
    pub fn from_samples(samples: Vec<f64>) -> Self {
        Self { samples }
    }

    /// Constant reference profile. An offset of 0.0 is the ideal top edge;
    /// a bottom edge sits at `-rail_height`.
    pub fn baseline(length: usize, offset: f64) -> Self {
        Self {
            samples: vec![offset; length],
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    pub fn shifted(&self, delta: f64) -> Self {
        Self {
            samples: self.samples.iter().map(|v| v + delta).collect(),
        }
    }

    /// Pointwise sum. Profiles are never resampled, so lengths must agree.
    pub fn try_add(&self, other: &Profile) -> Result<Self, RailError> {
        self.ensure_same_len(other)?;
        Ok(Self {
            samples: self
                .samples
                .iter()
                .zip(&other.samples)
                .map(|(a, b)| a + b)
                .collect(),
        })
    }

    pub fn min(&self) -> Option<f64> {
        self.samples.iter().copied().reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.samples.iter().copied().reduce(f64::max)
    }

    pub(crate) fn ensure_same_len(&self, other: &Profile) -> Result<(), RailError> {
        if self.len() != other.len() {
            return Err(RailError::LengthMismatch {
                baseline: self.len(),
                observed: other.len(),
            });
        }
        Ok(())
    }
}

impl From<Vec<f64>> for Profile {
    fn from(samples: Vec<f64>) -> Self {
        Self::from_samples(samples)
    }
}
