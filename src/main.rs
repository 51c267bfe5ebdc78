//! Command-line entry point: load an instance, plan, and write the outputs.

use clap::Parser;
use log::info;
use std::path::PathBuf;

use sleigh_planner::config::Config;
use sleigh_planner::error::{PlanError, Result};
use sleigh_planner::export::{
    save_route_csv, save_route_json, save_statistics, save_targets_json, PlanStatistics,
};
use sleigh_planner::problem::Problem;
use sleigh_planner::Planner;

/// Plan capacity-bounded delivery trips from a single depot.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// JSON instance with targets, catalog and optional config
    #[arg(conflicts_with_all = ["targets", "catalog"])]
    instance: Option<PathBuf>,

    /// Targets CSV (child,latitude,longitude,wish,naughty)
    #[arg(long, requires = "catalog")]
    targets: Option<PathBuf>,

    /// Articles CSV (article,weight,volume)
    #[arg(long, requires = "targets")]
    catalog: Option<PathBuf>,

    /// Maximum weight per trip
    #[arg(long)]
    max_weight: Option<f64>,

    /// Maximum volume per trip
    #[arg(long)]
    max_volume: Option<f64>,

    /// Travel speed in distance units per hour
    #[arg(long)]
    speed: Option<f64>,

    /// Minutes spent at each delivery stop
    #[arg(long)]
    dwell_minutes: Option<f64>,

    /// Fail on unknown catalog items and unroutable targets
    #[arg(long)]
    strict: bool,

    #[arg(long, default_value = "route.csv")]
    route_csv: PathBuf,

    #[arg(long, default_value = "route_plan.json")]
    route_json: PathBuf,

    #[arg(long, default_value = "statistics.json")]
    statistics: PathBuf,

    /// Dump of every loaded target, eligible or not
    #[arg(long, default_value = "targets_data.json")]
    targets_json: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run(Args::parse()) {
        eprintln!("sleigh-planner: {err}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let problem = match (&args.instance, &args.targets, &args.catalog) {
        (Some(instance), _, _) => Problem::from_json_file(instance)?,
        (None, Some(targets), Some(catalog)) => Problem::from_csv_files(targets, catalog)?,
        _ => {
            return Err(PlanError::InvalidConfig(
                "provide an instance file or --targets with --catalog".to_string(),
            ))
        }
    };

    info!(
        "loaded {} targets ({} eligible, {} ineligible), {} catalog items",
        problem.targets.len(),
        problem.eligible_count(),
        problem.ineligible_count(),
        problem.catalog.len()
    );

    let config = apply_overrides(problem.config.clone().unwrap_or_default(), &args);
    info!(
        "capacity: {} weight, {} volume",
        config.limits.max_weight, config.limits.max_volume
    );

    let planner = Planner::new(problem.catalog.clone(), config)?;
    let (plan, cost) = planner.solve(&problem.eligible_targets())?;

    save_route_csv(&plan, &args.route_csv)?;
    info!("route plan saved to {}", args.route_csv.display());
    save_route_json(&plan, &args.route_json)?;
    info!("route plan JSON saved to {}", args.route_json.display());

    let stats = PlanStatistics::new(&problem, &plan, &cost, &planner.config)?;
    save_statistics(&stats, &args.statistics)?;
    info!("statistics saved to {}", args.statistics.display());
    save_targets_json(&problem, &args.targets_json)?;
    info!("target data saved to {}", args.targets_json.display());

    println!("{}", stats.format());
    Ok(())
}

fn apply_overrides(mut config: Config, args: &Args) -> Config {
    if let Some(w) = args.max_weight {
        config.limits.max_weight = w;
    }
    if let Some(v) = args.max_volume {
        config.limits.max_volume = v;
    }
    if let Some(speed) = args.speed {
        config = config.with_speed(speed);
    }
    if let Some(dwell) = args.dwell_minutes {
        config = config.with_dwell_minutes(dwell);
    }
    if args.strict {
        config = config.with_strict_catalog(true).with_reject_unroutable(true);
    }
    config
}
