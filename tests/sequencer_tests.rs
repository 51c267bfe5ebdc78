//! Unit tests for nearest-neighbor route sequencing.

use sleigh_planner::distance::Location;
use sleigh_planner::problem::Target;
use sleigh_planner::sequencer::RouteSequencer;
use sleigh_planner::solution::Trip;

fn depot() -> Location {
    Location::new(0.0, 0.0)
}

#[test]
fn test_sequence_empty_trip() {
    let trip = Trip::new(vec![]);
    assert!(RouteSequencer::sequence(&trip, &depot()).is_empty());
}

#[test]
fn test_sequence_follows_distance_not_input_order() {
    // Input order is farthest first.
    let trip = Trip::new(vec![
        Target::new(1, 0.0, 3.0, 1),
        Target::new(2, 0.0, 2.0, 1),
        Target::new(3, 0.0, 1.0, 1),
    ]);

    let ordered = RouteSequencer::sequence(&trip, &depot());
    let ids: Vec<u64> = ordered.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[test]
fn test_sequence_moves_cursor() {
    // From the depot the nearest is at lon 1; from there lon -1.5 (2.5 away)
    // beats lon 5 (4 away).
    let trip = Trip::new(vec![
        Target::new(10, 0.0, 5.0, 1),
        Target::new(11, 0.0, 1.0, 1),
        Target::new(12, 0.0, -1.5, 1),
    ]);

    let ids: Vec<u64> = RouteSequencer::sequence(&trip, &depot())
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec![11, 12, 10]);
}

#[test]
fn test_sequence_breaks_ties_by_id() {
    let trip = Trip::new(vec![
        Target::new(8, 0.0, 1.0, 1),
        Target::new(5, 0.0, -1.0, 1),
    ]);

    let ids: Vec<u64> = RouteSequencer::sequence(&trip, &depot())
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec![5, 8]);
}

#[test]
fn test_sequence_trip_keeps_membership_and_demand() {
    let mut trip = Trip::new(vec![
        Target::new(1, 0.0, 4.0, 2),
        Target::new(2, 0.0, 1.0, 1),
        Target::new(3, 0.0, 2.0, 2),
    ]);
    let demand = trip.demand.clone();

    RouteSequencer::sequence_trip(&mut trip, &depot());

    assert_eq!(trip.target_ids(), vec![2, 3, 1]);
    assert_eq!(trip.demand, demand);
}
