use rail_survey::SurveyReport;
use std::fmt::Write;

/// Plain-text survey summary, one block per rail.
pub fn render_summary(report: &SurveyReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "rail survey at {} ({} samples, rail height {} mm)",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        report.length,
        report.rail_height
    );
    for rail in &report.rails {
        let _ = writeln!(out, "{}", rail.name);
        let _ = writeln!(out, "  top integral:    {:.2} mm²", rail.top.integral);
        let _ = writeln!(out, "  bottom integral: {:.2} mm²", rail.bottom.integral);
        let _ = writeln!(out, "  total integral:  {:.2} mm²", rail.total_integral);
        let _ = writeln!(
            out,
            "  condition:       {} ({})",
            rail.condition.label, rail.color_hint
        );
    }
    out
}
