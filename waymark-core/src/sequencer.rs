use log::debug;

use crate::{Coordinate, TripProgress, Waypoint};

/// Order waypoints into a visiting sequence.
///
/// Implementations must return a permutation of `waypoints`: nothing dropped,
/// nothing duplicated. An empty input yields an empty output.
/// Sequencers must be `Send + Sync` to operate safely across threads.
///
/// # Examples
/// ```rust
/// use waymark_core::{Coordinate, Sequencer, Waypoint};
///
/// struct KeepOrder;
///
/// impl Sequencer for KeepOrder {
///     fn sequence(&self, _start: Coordinate, waypoints: &[Waypoint]) -> Vec<Waypoint> {
///         waypoints.to_vec()
///     }
/// }
///
/// let stops = [Waypoint::at(1, Coordinate::new(0.0, 1.0))];
/// assert_eq!(KeepOrder.sequence(Coordinate::UNSET, &stops), stops);
/// ```
pub trait Sequencer: Send + Sync {
    /// Sequence `waypoints` starting from `start`.
    fn sequence(&self, start: Coordinate, waypoints: &[Waypoint]) -> Vec<Waypoint>;
}

/// Sequence from the trip base, or from `default_origin` when no base is set.
///
/// # Examples
/// ```rust
/// use waymark_core::{Coordinate, Sequencer, TripProgress, Waypoint, optimize_from_base};
///
/// struct Reverse;
///
/// impl Sequencer for Reverse {
///     fn sequence(&self, _start: Coordinate, waypoints: &[Waypoint]) -> Vec<Waypoint> {
///         waypoints.iter().rev().cloned().collect()
///     }
/// }
///
/// let stops = [
///     Waypoint::at(1, Coordinate::new(0.0, 1.0)),
///     Waypoint::at(2, Coordinate::new(0.0, 2.0)),
/// ];
/// let ordered = optimize_from_base(&Reverse, &TripProgress::new(), &stops, Coordinate::new(41.7, 44.8));
/// assert_eq!(ordered.first().map(|w| w.id), Some(2));
/// ```
#[must_use]
pub fn optimize_from_base<S>(
    sequencer: &S,
    progress: &TripProgress,
    waypoints: &[Waypoint],
    default_origin: Coordinate,
) -> Vec<Waypoint>
where
    S: Sequencer + ?Sized,
{
    let start = progress.base_location().unwrap_or(default_origin);
    debug!("sequencing {} waypoints from {start}", waypoints.len());
    sequencer.sequence(start, waypoints)
}
