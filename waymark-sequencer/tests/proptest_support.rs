//! Shared strategies for sequencer property tests.

use proptest::prelude::*;
use waymark_core::{Coordinate, Waypoint};

/// Coordinates away from the poles and the antimeridian.
pub fn coordinate_strategy() -> impl Strategy<Value = Coordinate> {
    (-80.0_f64..80.0, -170.0_f64..170.0).prop_map(|(lat, lon)| Coordinate::new(lat, lon))
}

/// Up to `max` waypoints with unique, ascending ids.
pub fn waypoint_set_strategy(max: usize) -> impl Strategy<Value = Vec<Waypoint>> {
    prop::collection::vec(coordinate_strategy(), 0..=max).prop_map(|coordinates| {
        coordinates
            .into_iter()
            .zip(1_i64..)
            .map(|(coordinate, id)| Waypoint::at(id, coordinate))
            .collect()
    })
}

/// Sorted ids, for comparing multisets.
pub fn sorted_ids(waypoints: &[Waypoint]) -> Vec<i64> {
    let mut ids: Vec<i64> = waypoints.iter().map(|waypoint| waypoint.id).collect();
    ids.sort_unstable();
    ids
}
