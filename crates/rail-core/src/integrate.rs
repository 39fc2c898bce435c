//! Defect quantification: pointwise absolute deviation and its integral over
//! the sample index domain (unit spacing).

use crate::error::RailError;
use crate::profile::Profile;
use log::debug;
use serde::{Deserialize, Serialize};

/// How the final interval is handled when the sample count leaves an odd
/// number of intervals, which plain Simpson cannot cover.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OddIntervalRule {
    /// Quadratic through the last three samples: `(5*y[n-1] + 8*y[n-2] - y[n-3]) / 12`.
    #[default]
    EndCorrection,
    /// `(y[n-2] + y[n-1]) / 2`.
    Trapezoid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantification {
    pub integral: f64,
    pub difference: Profile,
}

pub fn quantify(baseline: &Profile, observed: &Profile) -> Result<Quantification, RailError> {
    quantify_with(baseline, observed, OddIntervalRule::default())
}

pub fn quantify_with(
    baseline: &Profile,
    observed: &Profile,
    rule: OddIntervalRule,
) -> Result<Quantification, RailError> {
    baseline.ensure_same_len(observed)?;

    let difference: Vec<f64> = observed
        .samples()
        .iter()
        .zip(baseline.samples())
        .map(|(o, b)| (o - b).abs())
        .collect();
    let integral = integrate_unit(&difference, rule);

    Ok(Quantification {
        integral,
        difference: Profile::from_samples(difference),
    })
}

/// Composite Simpson over `samples` at x = 0, 1, 2, ...
///
/// Fewer than two samples integrate to zero and exactly two use a single
/// trapezoid. The result is clamped at zero, since the end correction may dip
/// slightly negative on a non-negative integrand.
pub fn integrate_unit(samples: &[f64], rule: OddIntervalRule) -> f64 {
    let n = samples.len();
    let total = match n {
        0 | 1 => {
            debug!("integrating {n} sample(s): empty domain, result is 0");
            0.0
        }
        2 => {
            debug!("integrating 2 samples: falling back to trapezoid");
            0.5 * (samples[0] + samples[1])
        }
        _ if n % 2 == 1 => simpson_even_intervals(samples),
        _ => {
            let head = simpson_even_intervals(&samples[..n - 1]);
            let tail = match rule {
                OddIntervalRule::EndCorrection => {
                    (5.0 * samples[n - 1] + 8.0 * samples[n - 2] - samples[n - 3]) / 12.0
                }
                OddIntervalRule::Trapezoid => 0.5 * (samples[n - 2] + samples[n - 1]),
            };
            head + tail
        }
    };
    total.max(0.0)
}

// Requires an odd sample count of at least three.
fn simpson_even_intervals(samples: &[f64]) -> f64 {
    let last = samples.len() - 1;
    let inner: f64 = samples[1..last]
        .iter()
        .enumerate()
        .map(|(k, y)| if k % 2 == 0 { 4.0 * y } else { 2.0 * y })
        .sum();
    (samples[0] + inner + samples[last]) / 3.0
}
