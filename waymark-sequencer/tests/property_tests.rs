//! Property-based tests for the nearest-neighbour sequencer.
//!
//! # Invariants tested
//!
//! - **Permutation:** the output holds exactly the input waypoints.
//! - **Determinism:** the same input always yields the same order.
//! - **Greedy choice:** each step picks a waypoint no farther than any other
//!   remaining one.

mod proptest_support;

use proptest::prelude::*;
use waymark_core::{Coordinate, Waypoint, haversine_km};
use waymark_sequencer::optimize;

use proptest_support::{coordinate_strategy, sorted_ids, waypoint_set_strategy};

/// Whether every step of `ordered` picked a nearest remaining waypoint.
fn is_greedy(start: Coordinate, ordered: &[Waypoint]) -> bool {
    let mut current = start;
    for (step, chosen) in ordered.iter().enumerate() {
        let chosen_distance = haversine_km(current, chosen.coordinate);
        let beaten = ordered
            .iter()
            .skip(step)
            .any(|other| haversine_km(current, other.coordinate) < chosen_distance);
        if beaten {
            return false;
        }
        current = chosen.coordinate;
    }
    true
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: no waypoint is dropped or duplicated.
    #[test]
    fn output_is_a_permutation(
        start in coordinate_strategy(),
        waypoints in waypoint_set_strategy(24),
    ) {
        let ordered = optimize(start, &waypoints);
        prop_assert_eq!(ordered.len(), waypoints.len());
        prop_assert_eq!(sorted_ids(&ordered), sorted_ids(&waypoints));
    }

    /// Property: sequencing is a pure function of its input.
    #[test]
    fn output_is_deterministic(
        start in coordinate_strategy(),
        waypoints in waypoint_set_strategy(24),
    ) {
        prop_assert_eq!(optimize(start, &waypoints), optimize(start, &waypoints));
    }

    /// Property: each step takes a nearest remaining waypoint.
    #[test]
    fn each_step_is_greedy(
        start in coordinate_strategy(),
        waypoints in waypoint_set_strategy(16),
    ) {
        let ordered = optimize(start, &waypoints);
        prop_assert!(is_greedy(start, &ordered));
    }
}
