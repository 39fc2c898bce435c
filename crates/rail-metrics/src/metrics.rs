use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};
use rail_survey::SurveyReport;
use std::string::FromUtf8Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
    #[error("exposition is not UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

/// Gauges for one survey, held in a private registry so several instances
/// can coexist in a process.
pub struct RailMetrics {
    registry: Registry,
    pub rail_defect_integral: GaugeVec,
    pub rail_total_integral: GaugeVec,
    pub rail_condition_rank: GaugeVec,
}

impl RailMetrics {
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let rail_defect_integral = GaugeVec::new(
            Opts::new(
                "rail_defect_integral",
                "Integrated absolute deviation per rail edge (mm²)",
            ),
            &["rail", "edge"],
        )?;
        registry.register(Box::new(rail_defect_integral.clone()))?;

        let rail_total_integral = GaugeVec::new(
            Opts::new(
                "rail_total_integral",
                "Sum of top and bottom edge integrals per rail (mm²)",
            ),
            &["rail"],
        )?;
        registry.register(Box::new(rail_total_integral.clone()))?;

        let rail_condition_rank = GaugeVec::new(
            Opts::new(
                "rail_condition_rank",
                "Condition severity rank per rail, 0 = excellent, 3 = needs replacement",
            ),
            &["rail"],
        )?;
        registry.register(Box::new(rail_condition_rank.clone()))?;

        Ok(Self {
            registry,
            rail_defect_integral,
            rail_total_integral,
            rail_condition_rank,
        })
    }

    pub fn observe_report(&self, report: &SurveyReport) {
        for rail in &report.rails {
            for edge in [&rail.top, &rail.bottom] {
                let edge_label = edge.edge.to_string();
                self.rail_defect_integral
                    .with_label_values(&[rail.name.as_str(), edge_label.as_str()])
                    .set(edge.integral);
            }
            self.rail_total_integral
                .with_label_values(&[rail.name.as_str()])
                .set(rail.total_integral);
            self.rail_condition_rank
                .with_label_values(&[rail.name.as_str()])
                .set(f64::from(rail.condition.severity_rank));
        }
    }

    /// Prometheus text exposition of every gauge.
    pub fn render(&self) -> Result<String, MetricsError> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}
