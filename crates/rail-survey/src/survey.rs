use crate::config::{RailParams, SurveyConfig};
use crate::error::SurveyError;
use crate::report::{ChartBounds, Edge, EdgeReport, RailReport, SurveyReport};
use chrono::Utc;
use log::{info, warn};
use rail_core::{
    entropy_rng, quantify_with, seeded_rng, synthesize_defect_profile, ConditionLabel,
    ConditionScale, OddIntervalRule, Profile,
};
use rand::Rng;

/// Runs one survey, drawing all randomness from `rng`. Rails are synthesized
/// in order, top edge before bottom.
pub fn run_survey<R: Rng + ?Sized>(
    config: &SurveyConfig,
    rng: &mut R,
) -> Result<SurveyReport, SurveyError> {
    config.validate()?;
    let scale = config.condition_scale()?;

    let rails = config
        .rails
        .iter()
        .enumerate()
        .map(|(index, params)| {
            let offset = index as f64 * config.rail_spacing;
            survey_rail(config, &scale, params, offset, rng)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SurveyReport {
        generated_at: Utc::now(),
        length: config.length,
        rail_height: config.rail_height,
        thresholds: scale.thresholds(),
        rails,
    })
}

/// Seeds from `config.seed` when present, otherwise from OS entropy.
pub fn run_configured_survey(config: &SurveyConfig) -> Result<SurveyReport, SurveyError> {
    match config.seed {
        Some(seed) => run_survey(config, &mut seeded_rng(seed)),
        None => run_survey(config, &mut entropy_rng()),
    }
}

fn survey_rail<R: Rng + ?Sized>(
    config: &SurveyConfig,
    scale: &ConditionScale,
    params: &RailParams,
    overview_offset: f64,
    rng: &mut R,
) -> Result<RailReport, SurveyError> {
    let length = config.length;

    let ideal_top = Profile::baseline(length, 0.0);
    let ideal_bottom = Profile::baseline(length, -config.rail_height);

    let observed_top =
        synthesize_defect_profile(length, params.top.amplitude, params.top.frequency, rng)?;
    // The bottom edge follows the top one and gets its own roughness on top.
    let bottom_roughness =
        synthesize_defect_profile(length, params.bottom.amplitude, params.bottom.frequency, rng)?;
    let observed_bottom = observed_top
        .shifted(-config.rail_height)
        .try_add(&bottom_roughness)?;

    let top = measure_edge(Edge::Top, ideal_top, observed_top, config.odd_interval_rule)?;
    let bottom = measure_edge(
        Edge::Bottom,
        ideal_bottom,
        observed_bottom,
        config.odd_interval_rule,
    )?;

    let total_integral = top.integral + bottom.integral;
    let condition = scale.classify(total_integral);
    if condition.label == ConditionLabel::NeedsReplacement {
        warn!(
            "{}: top {:.2} mm², bottom {:.2} mm², total {:.2} mm² -> {}",
            params.name, top.integral, bottom.integral, total_integral, condition.label
        );
    } else {
        info!(
            "{}: top {:.2} mm², bottom {:.2} mm², total {:.2} mm² -> {}",
            params.name, top.integral, bottom.integral, total_integral, condition.label
        );
    }

    let bounds = ChartBounds::for_edges(&top, &bottom);
    Ok(RailReport {
        name: params.name.clone(),
        overview_offset,
        top,
        bottom,
        total_integral,
        condition,
        color_hint: condition.label.color_hint().to_string(),
        bounds,
    })
}

fn measure_edge(
    edge: Edge,
    ideal: Profile,
    observed: Profile,
    rule: OddIntervalRule,
) -> Result<EdgeReport, SurveyError> {
    let quantification = quantify_with(&ideal, &observed, rule)?;
    Ok(EdgeReport {
        edge,
        ideal,
        observed,
        difference: quantification.difference,
        integral: quantification.integral,
    })
}
