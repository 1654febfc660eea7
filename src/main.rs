//! petro-calc CLI
//!
//! Thin command-line surface over the library. Survey data come in as JSON
//! on stdin; results go out as JSON on stdout. Logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Integrate a survey (stations as [md, inclination, azimuth] in radians)
//! echo '[[0,0,0],[1000,1.5708,0]]' | petro-calc survey --tvd 25
//!
//! # Vogel curve from one test point
//! petro-calc ipr vogel --p-r 2500 --q1 500 --p-wf1 1500
//!
//! # Effective configuration
//! petro-calc config
//! ```
//!
//! # Environment Variables
//!
//! - `PETRO_CALC_CONFIG`: Path to a config TOML
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

use petro_calc::config::{self, CalcConfig};
use petro_calc::ipr::{self, InflowModel};
use petro_calc::trajectory::{self, Position, SurveyStation};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "petro-calc")]
#[command(about = "Wellbore trajectory and inflow performance calculations")]
#[command(version)]
struct CliArgs {
    /// Config TOML to use instead of $PETRO_CALC_CONFIG / ./petro_calc.toml
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: SubCommand,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Integrate a survey read from stdin with the Minimum Curvature Method
    Survey {
        /// Easting of the first station
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        easting: f64,
        /// Northing of the first station
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        northing: f64,
        /// TVD of the first station (datum)
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        tvd: f64,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Fit and evaluate an inflow performance relationship
    Ipr {
        #[command(subcommand)]
        model: IprCommand,
    },

    /// Print the effective configuration as TOML
    Config,
}

#[derive(clap::Subcommand, Debug)]
enum IprCommand {
    /// Linear productivity index from one test point
    Pi {
        /// Average reservoir pressure
        #[arg(long)]
        p_r: f64,
        /// Test rate
        #[arg(long)]
        q1: f64,
        /// Flowing pressure during the test
        #[arg(long)]
        p_wf1: f64,
        #[command(flatten)]
        eval: EvalArgs,
    },

    /// Vogel curve from one test point
    Vogel {
        /// Average reservoir pressure
        #[arg(long)]
        p_r: f64,
        /// Test rate
        #[arg(long)]
        q1: f64,
        /// Flowing pressure during the test
        #[arg(long)]
        p_wf1: f64,
        #[command(flatten)]
        eval: EvalArgs,
    },

    /// C-n back-pressure curve from two test points
    Cn {
        /// Average reservoir pressure
        #[arg(long)]
        p_bar: f64,
        /// First test rate
        #[arg(long)]
        q1: f64,
        /// Flowing pressure during the first test
        #[arg(long)]
        p_wf1: f64,
        /// Second test rate
        #[arg(long)]
        q2: f64,
        /// Flowing pressure during the second test
        #[arg(long)]
        p_wf2: f64,
        #[command(flatten)]
        eval: EvalArgs,
    },
}

#[derive(clap::Args, Debug)]
struct EvalArgs {
    /// Report the rate at this flowing pressure instead of the whole curve
    #[arg(long)]
    p_wf: Option<f64>,
    /// Curve points (defaults to ipr.curve_points)
    #[arg(long)]
    points: Option<usize>,
    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

// ============================================================================
// Commands
// ============================================================================

fn run_survey(seed: Position, pretty: bool) -> Result<()> {
    let stations: Vec<SurveyStation> = serde_json::from_reader(std::io::stdin().lock())
        .context("Failed to parse survey JSON from stdin")?;
    info!(stations = stations.len(), "Survey received");

    let trajectory = trajectory::integrate(&stations, seed)?;
    let course_length = config::get().survey.dls_course_length;

    let report = json!({
        "stations": trajectory.len(),
        "easting": trajectory.easting(),
        "northing": trajectory.northing(),
        "tvd": trajectory.tvd(),
        "dogleg_severity": trajectory.dogleg_severity_per_course(course_length),
        "dls_course_length": course_length,
    });
    emit(&report, pretty)
}

fn run_ipr(command: IprCommand) -> Result<()> {
    match command {
        IprCommand::Pi {
            p_r,
            q1,
            p_wf1,
            eval,
        } => {
            let model = ipr::ProductivityIndex::from_test_point(q1, p_r, p_wf1)?;
            let params = json!({
                "model": "productivity_index",
                "p_r": model.p_r,
                "productivity_index": model.productivity_index,
            });
            evaluate(&model, params, &eval)
        }
        IprCommand::Vogel {
            p_r,
            q1,
            p_wf1,
            eval,
        } => {
            let model = ipr::Vogel::from_test_point(q1, p_wf1, p_r)?;
            let params = json!({
                "model": "vogel",
                "p_r": model.p_r,
                "q_max": model.q_max,
            });
            evaluate(&model, params, &eval)
        }
        IprCommand::Cn {
            p_bar,
            q1,
            p_wf1,
            q2,
            p_wf2,
            eval,
        } => {
            let model = ipr::BackPressure::from_test_points(q1, p_wf1, q2, p_wf2, p_bar)?;
            let params = json!({
                "model": "back_pressure",
                "p_bar": model.p_bar,
                "c": model.c,
                "n": model.n,
            });
            evaluate(&model, params, &eval)
        }
    }
}

/// Attach either a single rate or the full curve to the fitted parameters.
fn evaluate(model: &impl InflowModel, mut report: serde_json::Value, eval: &EvalArgs) -> Result<()> {
    if let Some(p_wf) = eval.p_wf {
        report["p_wf"] = json!(p_wf);
        report["q"] = json!(model.flow_rate_at(p_wf)?);
    } else {
        let curve = match eval.points {
            Some(points) => model.curve(points)?,
            None => model.default_curve()?,
        };
        report["absolute_open_flow"] = json!(model.absolute_open_flow()?);
        report["curve"] = serde_json::to_value(curve)?;
    }
    emit(&report, eval.pretty)
}

fn emit(value: &serde_json::Value, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    // Initialize logging (stderr keeps stdout parseable)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    let calc_config = match &args.config {
        Some(path) => CalcConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => CalcConfig::load(),
    };
    config::init(calc_config);

    match args.command {
        SubCommand::Survey {
            easting,
            northing,
            tvd,
            pretty,
        } => run_survey(Position::new(easting, northing, tvd), pretty),
        SubCommand::Ipr { model } => run_ipr(model),
        SubCommand::Config => {
            print!("{}", config::get().to_toml()?);
            Ok(())
        }
    }
}
