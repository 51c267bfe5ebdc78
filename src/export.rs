//! Route plan, target and statistics export.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::config::Config;
use crate::cost::PlanCost;
use crate::error::{PlanError, Result};
use crate::problem::{Problem, TargetId};
use crate::solution::{Plan, PlanStop};

/// One row of the exported route plan.
///
/// Refills use stop `0` with an article and piece count; deliveries carry
/// the target id and leave both empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRow {
    pub stop: TargetId,
    pub article: Option<f64>,
    pub pieces: Option<f64>,
}

/// Expand a plan into export rows, one per refilled item and one per delivery.
pub fn route_rows(plan: &Plan) -> Vec<RouteRow> {
    plan.stops()
        .into_iter()
        .flat_map(|stop| match stop {
            PlanStop::Refill { items } => items
                .into_iter()
                .map(|i| RouteRow {
                    stop: 0,
                    article: Some(i.item as f64),
                    pieces: Some(i.pieces as f64),
                })
                .collect::<Vec<_>>(),
            PlanStop::Delivery { target, .. } => vec![RouteRow {
                stop: target,
                article: None,
                pieces: None,
            }],
        })
        .collect()
}

/// Write the route plan as semicolon-separated values with decimal commas.
pub fn write_route_csv<W: Write>(plan: &Plan, writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(writer);

    wtr.write_record(["stop", "article", "pieces"])?;
    for row in route_rows(plan) {
        wtr.write_record([
            row.stop.to_string(),
            decimal_comma(row.article),
            decimal_comma(row.pieces),
        ])?;
    }
    wtr.flush()?;

    Ok(())
}

/// Save the route plan CSV to a file.
pub fn save_route_csv<P: AsRef<Path>>(plan: &Plan, path: P) -> Result<()> {
    write_route_csv(plan, File::create(path)?)
}

/// Save the route plan rows as a JSON array.
pub fn save_route_json<P: AsRef<Path>>(plan: &Plan, path: P) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &route_rows(plan))?;
    writer.flush()?;
    Ok(())
}

/// Save every loaded target, eligible or not, as a JSON array.
pub fn save_targets_json<P: AsRef<Path>>(problem: &Problem, path: P) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &problem.targets)?;
    writer.flush()?;
    Ok(())
}

fn decimal_comma(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1}", v).replace('.', ","))
        .unwrap_or_default()
}

/// Format a number of hours as hours and minutes.
pub fn format_hours(hours: f64) -> String {
    let total_minutes = (hours * 60.0).round().max(0.0) as u64;
    format!("{}h {:02}m", total_minutes / 60, total_minutes % 60)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Summary figures of a planning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanStatistics {
    pub total_targets: usize,
    pub eligible_targets: usize,
    pub ineligible_targets: usize,
    pub unroutable_targets: usize,
    pub total_stops: usize,
    pub total_refills: usize,
    pub total_distance: f64,
    pub total_time_hours: f64,
    pub max_weight: f64,
    pub max_volume: f64,
    pub speed: f64,
    pub generated_at: String,
}

impl PlanStatistics {
    /// Collect statistics, stamping them with the current UTC time.
    pub fn new(problem: &Problem, plan: &Plan, cost: &PlanCost, config: &Config) -> Result<Self> {
        let generated_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(|e| PlanError::Format(e.to_string()))?;

        Ok(PlanStatistics {
            total_targets: problem.targets.len(),
            eligible_targets: problem.eligible_count(),
            ineligible_targets: problem.ineligible_count(),
            unroutable_targets: plan.unroutable.len(),
            total_stops: cost.deliveries,
            total_refills: cost.refills,
            total_distance: round2(cost.distance),
            total_time_hours: round2(cost.time),
            max_weight: config.limits.max_weight,
            max_volume: config.limits.max_volume,
            speed: config.cost.speed,
            generated_at,
        })
    }

    /// Format the statistics as a console summary.
    pub fn format(&self) -> String {
        let rule = "=".repeat(60);
        format!(
            "{rule}
ROUTE STATISTICS
{rule}
Total targets: {}
Eligible targets: {}
Ineligible targets (no delivery): {}
Unroutable targets: {}
Total delivery stops: {}
Total refill stops: {}
Total distance: {:.2}
Total time: {:.2} hours ({})
{rule}",
            self.total_targets,
            self.eligible_targets,
            self.ineligible_targets,
            self.unroutable_targets,
            self.total_stops,
            self.total_refills,
            self.total_distance,
            self.total_time_hours,
            format_hours(self.total_time_hours),
        )
    }
}

/// Save statistics as pretty-printed JSON.
pub fn save_statistics<P: AsRef<Path>>(stats: &PlanStatistics, path: P) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, stats)?;
    writer.flush()?;
    Ok(())
}
