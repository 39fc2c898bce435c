use chrono::{DateTime, Utc};
use rail_core::{Condition, ConditionLabel, Profile};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Top,
    Bottom,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edge::Top => f.write_str("top"),
            Edge::Bottom => f.write_str("bottom"),
        }
    }
}

/// One quantified edge: the profile pair and what was measured between them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeReport {
    pub edge: Edge,
    pub ideal: Profile,
    pub observed: Profile,
    pub difference: Profile,
    pub integral: f64,
}

/// Shared axis limits so a rail's top and bottom charts are drawn at the same scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ChartBounds {
    pub y_min: f64,
    pub y_max: f64,
    pub diff_max: f64,
}

pub const PROFILE_MARGIN: f64 = 0.05;
pub const DIFFERENCE_MARGIN: f64 = 0.02;

impl ChartBounds {
    pub fn for_edges(top: &EdgeReport, bottom: &EdgeReport) -> Self {
        let profiles = [&top.ideal, &top.observed, &bottom.ideal, &bottom.observed];
        let y_min = profiles
            .iter()
            .filter_map(|p| p.min())
            .fold(f64::INFINITY, f64::min);
        let y_max = profiles
            .iter()
            .filter_map(|p| p.max())
            .fold(f64::NEG_INFINITY, f64::max);
        let diff_max = [&top.difference, &bottom.difference]
            .iter()
            .filter_map(|p| p.max())
            .fold(0.0, f64::max);

        Self {
            y_min: y_min - PROFILE_MARGIN,
            y_max: y_max + PROFILE_MARGIN,
            diff_max: diff_max + DIFFERENCE_MARGIN,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RailReport {
    pub name: String,
    /// Vertical shift applied to this rail in the overview chart.
    pub overview_offset: f64,
    pub top: EdgeReport,
    pub bottom: EdgeReport,
    pub total_integral: f64,
    pub condition: Condition,
    /// Copy of `condition.label.color_hint()` carried in the serialized
    /// report for renderers; set only from the label by the survey.
    pub color_hint: String,
    pub bounds: ChartBounds,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyReport {
    pub generated_at: DateTime<Utc>,
    pub length: usize,
    pub rail_height: f64,
    pub thresholds: Vec<f64>,
    pub rails: Vec<RailReport>,
}

impl SurveyReport {
    pub fn worst_condition(&self) -> Option<ConditionLabel> {
        self.rails.iter().map(|r| r.condition.label).max()
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
