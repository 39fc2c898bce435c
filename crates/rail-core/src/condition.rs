use crate::error::RailError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bounds (exclusive) of the Excellent, Good and Needs-attention tiers.
pub const DEFAULT_THRESHOLDS: [f64; 3] = [20.0, 50.0, 100.0];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ConditionLabel {
    Excellent,
    Good,
    NeedsAttention,
    NeedsReplacement,
}

impl ConditionLabel {
    pub const ALL: [ConditionLabel; 4] = [
        ConditionLabel::Excellent,
        ConditionLabel::Good,
        ConditionLabel::NeedsAttention,
        ConditionLabel::NeedsReplacement,
    ];

    pub fn rank(self) -> u8 {
        match self {
            ConditionLabel::Excellent => 0,
            ConditionLabel::Good => 1,
            ConditionLabel::NeedsAttention => 2,
            ConditionLabel::NeedsReplacement => 3,
        }
    }

    pub fn color_hint(self) -> &'static str {
        match self {
            ConditionLabel::Excellent => "green",
            ConditionLabel::Good => "blue",
            ConditionLabel::NeedsAttention => "orange",
            ConditionLabel::NeedsReplacement => "red",
        }
    }
}

impl fmt::Display for ConditionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ConditionLabel::Excellent => "Excellent",
            ConditionLabel::Good => "Good",
            ConditionLabel::NeedsAttention => "Needs attention",
            ConditionLabel::NeedsReplacement => "Needs replacement",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Condition {
    pub label: ConditionLabel,
    pub severity_rank: u8,
}

impl From<ConditionLabel> for Condition {
    fn from(label: ConditionLabel) -> Self {
        Self {
            label,
            severity_rank: label.rank(),
        }
    }
}

/// Ordered `(exclusive upper bound, label)` tiers; anything at or past the
/// last bound is `NeedsReplacement`. Serialized as its three thresholds;
/// deserializing goes through [`ConditionScale::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 3]", into = "[f64; 3]")]
pub struct ConditionScale {
    tiers: Vec<(f64, ConditionLabel)>,
    worst: ConditionLabel,
}

impl ConditionScale {
    pub fn new(thresholds: [f64; 3]) -> Result<Self, RailError> {
        if thresholds.iter().any(|t| !t.is_finite()) {
            return Err(RailError::InvalidThresholds(format!(
                "thresholds must be finite, got {thresholds:?}"
            )));
        }
        if thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(RailError::InvalidThresholds(format!(
                "thresholds must be strictly increasing, got {thresholds:?}"
            )));
        }

        let tiers = thresholds
            .iter()
            .copied()
            .zip(ConditionLabel::ALL)
            .collect();
        Ok(Self {
            tiers,
            worst: ConditionLabel::NeedsReplacement,
        })
    }

    pub fn thresholds(&self) -> Vec<f64> {
        self.tiers.iter().map(|(bound, _)| *bound).collect()
    }

    /// Total over finite non-negative input. NaN lands in the worst tier.
    pub fn classify(&self, total_integral: f64) -> Condition {
        debug_assert!(
            total_integral >= 0.0 || total_integral.is_nan(),
            "defect integral must be non-negative, got {total_integral}"
        );

        let label = self
            .tiers
            .iter()
            .find(|(bound, _)| total_integral < *bound)
            .map(|(_, label)| *label)
            .unwrap_or(self.worst);

        debug!("defect integral {total_integral:.2} classified as {label}");
        Condition::from(label)
    }
}

impl TryFrom<[f64; 3]> for ConditionScale {
    type Error = RailError;

    fn try_from(thresholds: [f64; 3]) -> Result<Self, Self::Error> {
        Self::new(thresholds)
    }
}

impl From<ConditionScale> for [f64; 3] {
    fn from(scale: ConditionScale) -> Self {
        let mut thresholds = [0.0; 3];
        for (slot, (bound, _)) in thresholds.iter_mut().zip(&scale.tiers) {
            *slot = *bound;
        }
        thresholds
    }
}

impl Default for ConditionScale {
    fn default() -> Self {
        Self {
            tiers: DEFAULT_THRESHOLDS
                .iter()
                .copied()
                .zip(ConditionLabel::ALL)
                .collect(),
            worst: ConditionLabel::NeedsReplacement,
        }
    }
}

/// Classifies against [`DEFAULT_THRESHOLDS`].
pub fn classify(total_integral: f64) -> Condition {
    ConditionScale::default().classify(total_integral)
}
