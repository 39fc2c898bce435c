//! One-shot rail defect survey.
//! - Synthesizes ideal and defective profiles for every configured rail edge
//! - Integrates the deviation and classifies each rail
//! - Prints a summary or the full JSON report on stdout

mod summary;


use std::path::Path;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, Command};
use rail_metrics::RailMetrics;
use rail_survey::{run_configured_survey, SurveyConfig};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("rail-survey")
        .about("Synthetic rail profile survey: defect integrals and condition labels")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Survey config JSON; built-in track defaults when omitted"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("N")
                .value_parser(value_parser!(u64))
                .help("Seed for reproducible profiles (overrides config)"),
        )
        .arg(
            Arg::new("length")
                .long("length")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Samples per profile (overrides config)"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_parser(["summary", "json"])
                .default_value("summary")
                .help("Output format"),
        )
        .arg(
            Arg::new("metrics")
                .long("metrics")
                .action(ArgAction::SetTrue)
                .help("Append Prometheus exposition of the survey gauges"),
        )
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(matches: &clap::ArgMatches) -> Result<SurveyConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => SurveyConfig::load(Path::new(path))
            .with_context(|| format!("loading survey config {path}"))?,
        None => SurveyConfig::default_for_track(),
    };
    if let Some(seed) = matches.get_one::<u64>("seed") {
        config.seed = Some(*seed);
    }
    if let Some(length) = matches.get_one::<usize>("length") {
        config.length = *length;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    init_logging();
    let matches = cli().get_matches();

    let config = load_config(&matches)?;
    let report = run_configured_survey(&config).context("running survey")?;

    match matches.get_one::<String>("format").map(String::as_str) {
        Some("json") => println!("{}", report.to_json_pretty()?),
        _ => print!("{}", summary::render_summary(&report)),
    }

    if matches.get_flag("metrics") {
        let metrics = RailMetrics::new()?;
        metrics.observe_report(&report);
        print!("{}", metrics.render()?);
    }

    Ok(())
}
