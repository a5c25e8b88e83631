//! `NearestNeighbourSequencer` implementation.

use log::debug;
use waymark_core::{Coordinate, Sequencer, TripProgress, Waypoint, haversine_km};

/// Greedy nearest-neighbour sequencer.
///
/// Runs in O(n²) time. Waypoints are tracked by index against the borrowed
/// input with a consumed flag per entry, so the input is never copied or
/// shuffled while scanning.
///
/// # Examples
/// ```rust
/// use waymark_core::{Coordinate, Sequencer, Waypoint};
/// use waymark_sequencer::NearestNeighbourSequencer;
///
/// let stops = [
///     Waypoint::at(1, Coordinate::new(0.0, 1.0)),
///     Waypoint::at(2, Coordinate::new(0.0, 2.0)),
///     Waypoint::at(3, Coordinate::new(0.0, 0.5)),
/// ];
/// let ordered = NearestNeighbourSequencer.sequence(Coordinate::new(0.0, 0.0), &stops);
/// let ids: Vec<i64> = ordered.iter().map(|w| w.id).collect();
/// assert_eq!(ids, [3, 1, 2]);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NearestNeighbourSequencer;

impl Sequencer for NearestNeighbourSequencer {
    fn sequence(&self, start: Coordinate, waypoints: &[Waypoint]) -> Vec<Waypoint> {
        let mut consumed = vec![false; waypoints.len()];
        let mut ordered = Vec::with_capacity(waypoints.len());
        let mut current = start;

        while let Some(index) = nearest_unconsumed(current, waypoints, &consumed) {
            let (Some(flag), Some(waypoint)) = (consumed.get_mut(index), waypoints.get(index))
            else {
                break;
            };
            *flag = true;
            current = waypoint.coordinate;
            ordered.push(waypoint.clone());
        }

        debug!("sequenced {} waypoints from {start}", ordered.len());
        ordered
    }
}

/// Index of the unconsumed waypoint closest to `from`.
///
/// The scan keeps the first strictly smaller distance it sees, so ties go to
/// the earlier waypoint. The first unconsumed waypoint seeds the scan, which
/// keeps NaN distances from hiding a waypoint.
fn nearest_unconsumed(from: Coordinate, waypoints: &[Waypoint], consumed: &[bool]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    let candidates = waypoints
        .iter()
        .zip(consumed)
        .enumerate()
        .filter(|(_, (_, taken))| !**taken);
    for (index, (waypoint, _)) in candidates {
        let distance = haversine_km(from, waypoint.coordinate);
        match best {
            Some((_, best_distance)) if distance >= best_distance || distance.is_nan() => {}
            _ => best = Some((index, distance)),
        }
    }
    best.map(|(index, _)| index)
}

/// Sequence `waypoints` from `start` with [`NearestNeighbourSequencer`].
///
/// # Examples
/// ```rust
/// use waymark_core::Coordinate;
/// use waymark_sequencer::optimize;
///
/// assert!(optimize(Coordinate::new(41.7, 44.8), &[]).is_empty());
/// ```
#[must_use]
pub fn optimize(start: Coordinate, waypoints: &[Waypoint]) -> Vec<Waypoint> {
    NearestNeighbourSequencer.sequence(start, waypoints)
}

/// Sequence from the trip base, or from `default_origin` when no base is set.
#[must_use]
pub fn optimize_from_base(
    progress: &TripProgress,
    waypoints: &[Waypoint],
    default_origin: Coordinate,
) -> Vec<Waypoint> {
    waymark_core::optimize_from_base(&NearestNeighbourSequencer, progress, waypoints, default_origin)
}
