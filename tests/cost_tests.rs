//! Unit tests for plan distance and time evaluation.

use sleigh_planner::config::CostParameters;
use sleigh_planner::cost::CostModel;
use sleigh_planner::distance::{Location, EARTH_RADIUS};
use sleigh_planner::problem::Target;
use sleigh_planner::solution::{Plan, PlanStop, Trip};
use std::f64::consts::PI;

/// Length of one degree of arc.
const DEGREE: f64 = EARTH_RADIUS * PI / 180.0;

fn equator_model(speed: f64, dwell_minutes: f64) -> CostModel {
    CostModel::new(Location::new(0.0, 0.0), CostParameters::new(speed, dwell_minutes))
}

fn delivery(target: u64, longitude: f64) -> PlanStop {
    PlanStop::Delivery {
        target,
        location: Location::new(0.0, longitude),
    }
}

fn refill() -> PlanStop {
    PlanStop::Refill { items: vec![] }
}

#[test]
fn test_empty_plan_costs_nothing() {
    let model = equator_model(10.0, 5.0);
    let plan = Plan::default();

    assert_eq!(model.total_distance(&plan.stops()), 0.0);
    assert_eq!(model.total_time(&plan.stops()), 0.0);

    let cost = model.evaluate(&plan);
    assert_eq!(cost.deliveries, 0);
    assert_eq!(cost.refills, 0);
}

#[test]
fn test_stops_at_the_depot() {
    let depot = Location::north_pole();
    let model = CostModel::new(depot, CostParameters::new(100.0, 6.0));
    let plan = Plan::new(vec![Trip::new(vec![
        Target::new(1, 90.0, 0.0, 1),
        Target::new(2, 90.0, 0.0, 1),
    ])]);

    let cost = model.evaluate(&plan);
    assert!(cost.distance.abs() < 1e-9);
    assert!((cost.time - 2.0 * 6.0 / 60.0).abs() < 1e-9);
    assert_eq!(cost.deliveries, 2);
    assert_eq!(cost.refills, 1);
}

#[test]
fn test_single_trip_returns_to_depot() {
    let model = equator_model(1.0, 0.0);
    let stops = vec![refill(), delivery(1, 1.0), delivery(2, 3.0)];

    let d = model.total_distance(&stops);
    assert!((d - 6.0 * DEGREE).abs() < 1e-6);
}

#[test]
fn test_refill_adds_return_leg() {
    let model = equator_model(1.0, 0.0);
    let stops = vec![refill(), delivery(1, 1.0), refill(), delivery(2, 2.0)];

    let d = model.total_distance(&stops);
    assert!((d - 6.0 * DEGREE).abs() < 1e-6);
}

#[test]
fn test_leading_refill_adds_nothing() {
    let model = equator_model(1.0, 0.0);
    let with = model.total_distance(&[refill(), refill(), delivery(1, 2.0)]);
    let without = model.total_distance(&[delivery(1, 2.0)]);

    assert_eq!(with, without);
}

#[test]
fn test_time_adds_travel_and_dwell() {
    let model = equator_model(50.0, 12.0);
    let stops = vec![refill(), delivery(1, 1.0), refill(), delivery(2, 2.0)];

    let distance = model.total_distance(&stops);
    let time = model.total_time(&stops);
    assert!((time - (distance / 50.0 + 2.0 * 12.0 / 60.0)).abs() < 1e-9);
    assert!(time >= distance / 50.0);
}

#[test]
fn test_evaluate_matches_flat_plan() {
    let model = equator_model(20.0, 3.0);
    let plan = Plan::new(vec![
        Trip::new(vec![Target::new(1, 0.0, 1.0, 1), Target::new(2, 0.0, 2.0, 2)]),
        Trip::new(vec![Target::new(3, 0.0, -1.0, 1)]),
    ]);

    let cost = model.evaluate(&plan);
    assert!((cost.distance - model.total_distance(&plan.stops())).abs() < 1e-12);
    assert!((cost.time - model.total_time(&plan.stops())).abs() < 1e-12);
    assert!((cost.distance - 6.0 * DEGREE).abs() < 1e-6);
    assert_eq!(cost.deliveries, 3);
    assert_eq!(cost.refills, 2);
}
