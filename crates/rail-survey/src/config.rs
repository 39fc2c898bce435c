use crate::error::SurveyError;
use rail_core::{ConditionScale, OddIntervalRule, DEFAULT_THRESHOLDS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Roughness parameters for one rail edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeParams {
    pub amplitude: f64,
    pub frequency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RailParams {
    pub name: String,
    pub top: EdgeParams,
    pub bottom: EdgeParams,
}

/// Survey settings. Lengths are in samples (1 cm each); heights in mm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyConfig {
    pub length: usize,
    pub rail_height: f64,
    /// Vertical offset between consecutive rails in the overview.
    pub rail_spacing: f64,
    pub seed: Option<u64>,
    pub odd_interval_rule: OddIntervalRule,
    pub thresholds: [f64; 3],
    pub rails: Vec<RailParams>,
}

impl SurveyConfig {
    pub fn default_for_track() -> Self {
        Self {
            length: 500,
            rail_height: 3.0,
            rail_spacing: 10.0,
            seed: None,
            odd_interval_rule: OddIntervalRule::default(),
            thresholds: DEFAULT_THRESHOLDS,
            rails: vec![
                RailParams {
                    name: "rail 1".into(),
                    top: EdgeParams {
                        amplitude: 0.3,
                        frequency: 0.02,
                    },
                    bottom: EdgeParams {
                        amplitude: 0.2,
                        frequency: 0.03,
                    },
                },
                RailParams {
                    name: "rail 2".into(),
                    top: EdgeParams {
                        amplitude: 0.4,
                        frequency: 0.015,
                    },
                    bottom: EdgeParams {
                        amplitude: 0.25,
                        frequency: 0.025,
                    },
                },
            ],
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, SurveyError> {
        let config: SurveyConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, SurveyError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Structural checks. Edge amplitudes and frequencies are checked by the
    /// synthesizer when the survey runs.
    pub fn validate(&self) -> Result<(), SurveyError> {
        if self.length == 0 {
            return Err(SurveyError::InvalidConfig("length must be positive".into()));
        }
        if !self.rail_height.is_finite() || self.rail_height < 0.0 {
            return Err(SurveyError::InvalidConfig(format!(
                "rail_height must be finite and non-negative, got {}",
                self.rail_height
            )));
        }
        if !self.rail_spacing.is_finite() {
            return Err(SurveyError::InvalidConfig(format!(
                "rail_spacing must be finite, got {}",
                self.rail_spacing
            )));
        }
        if self.rails.is_empty() {
            return Err(SurveyError::InvalidConfig("at least one rail is required".into()));
        }
        self.condition_scale()?;
        Ok(())
    }

    pub fn condition_scale(&self) -> Result<ConditionScale, SurveyError> {
        Ok(ConditionScale::new(self.thresholds)?)
    }
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self::default_for_track()
    }
}
