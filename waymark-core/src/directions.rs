//! Handing the remainder of a trip to an external maps application.

use crate::{Coordinate, ExtractionMode, ItineraryConfig, TripProgress, Waypoint};

/// Origin, destination and intermediate stops for the unvisited part of a
/// trip. Building a URL or intent from it is left to the caller.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectionsPlan {
    /// Where directions start; `None` lets the maps application use the
    /// device location.
    pub origin: Option<Coordinate>,
    /// Where directions end.
    pub destination: Option<Coordinate>,
    /// Stops in between, in visiting order.
    pub via: Vec<Coordinate>,
}

impl DirectionsPlan {
    /// Plan directions through every waypoint not yet completed.
    ///
    /// The origin is the base while nothing is completed, otherwise the first
    /// unvisited waypoint, otherwise the `current` location. Once every
    /// waypoint is visited the destination is the extraction point.
    ///
    /// # Examples
    /// ```
    /// use waymark_core::{Coordinate, DirectionsPlan, ItineraryConfig, TripProgress, Waypoint};
    ///
    /// let stops = [
    ///     Waypoint::at(1, Coordinate::new(41.69, 44.80)),
    ///     Waypoint::at(2, Coordinate::new(41.70, 44.81)),
    ///     Waypoint::at(3, Coordinate::new(41.71, 44.82)),
    /// ];
    /// let plan = DirectionsPlan::for_remaining(
    ///     &stops,
    ///     &TripProgress::new(),
    ///     None,
    ///     &ItineraryConfig::default(),
    /// );
    /// assert_eq!(plan.origin, Some(stops[0].coordinate));
    /// assert_eq!(plan.destination, Some(stops[2].coordinate));
    /// assert_eq!(plan.via, [stops[1].coordinate]);
    /// ```
    #[must_use]
    pub fn for_remaining(
        waypoints: &[Waypoint],
        progress: &TripProgress,
        current: Option<Coordinate>,
        config: &ItineraryConfig,
    ) -> Self {
        let unvisited: Vec<Coordinate> = waypoints
            .iter()
            .enumerate()
            .filter(|(index, _)| !progress.is_completed(*index))
            .map(|(_, waypoint)| waypoint.coordinate)
            .collect();
        let base = progress.base_location();

        let origin = match (base, unvisited.first()) {
            (Some(base), _) if progress.completed_indices().is_empty() => Some(base),
            (_, Some(first)) => Some(*first),
            _ => current.and_then(Coordinate::known),
        };

        let extraction = match progress.extraction_mode() {
            ExtractionMode::ReturnToBase => base,
            ExtractionMode::ExitViaTerminal => Some(config.terminal),
        };

        let destination = match unvisited.as_slice() {
            [] => extraction.or(origin),
            [.., last] if unvisited.len() > 1 => Some(*last),
            [only] if origin != Some(*only) => Some(*only),
            _ => origin,
        };

        let via = unvisited
            .into_iter()
            .filter(|stop| Some(*stop) != origin && Some(*stop) != destination)
            .collect();

        Self {
            origin,
            destination,
            via,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn stops() -> [Waypoint; 3] {
        [
            Waypoint::at(1, Coordinate::new(41.69, 44.80)),
            Waypoint::at(2, Coordinate::new(41.70, 44.81)),
            Waypoint::at(3, Coordinate::new(41.71, 44.82)),
        ]
    }

    #[fixture]
    fn base() -> Coordinate {
        Coordinate::new(41.7151, 44.8271)
    }

    fn plan(stops: &[Waypoint], progress: &TripProgress) -> DirectionsPlan {
        DirectionsPlan::for_remaining(stops, progress, None, &ItineraryConfig::default())
    }

    #[rstest]
    fn fresh_trip_starts_at_base(stops: [Waypoint; 3], base: Coordinate) {
        let [first, second, third] = &stops;
        let mut progress = TripProgress::new();
        progress.set_base(base);

        let directions = plan(&stops, &progress);
        assert_eq!(directions.origin, Some(base));
        assert_eq!(directions.destination, Some(third.coordinate));
        assert_eq!(directions.via, [first.coordinate, second.coordinate]);
    }

    #[rstest]
    fn underway_trip_starts_at_first_unvisited(stops: [Waypoint; 3], base: Coordinate) {
        let [_, second, third] = &stops;
        let mut progress = TripProgress::new();
        progress.set_base(base);
        progress.engage(0);
        progress.complete_and_advance(0, 3);

        let directions = plan(&stops, &progress);
        assert_eq!(directions.origin, Some(second.coordinate));
        assert_eq!(directions.destination, Some(third.coordinate));
        assert!(directions.via.is_empty());
    }

    #[rstest]
    fn single_remaining_stop_from_base(base: Coordinate) {
        let stop = Waypoint::at(9, Coordinate::new(41.69, 44.80));
        let mut progress = TripProgress::new();
        progress.set_base(base);

        let directions = plan(std::slice::from_ref(&stop), &progress);
        assert_eq!(directions.origin, Some(base));
        assert_eq!(directions.destination, Some(stop.coordinate));
    }

    #[rstest]
    fn single_remaining_stop_that_is_the_origin(stops: [Waypoint; 3], base: Coordinate) {
        let [_, _, third] = &stops;
        let mut progress = TripProgress::new();
        progress.set_base(base);
        for index in 0..2 {
            progress.engage(index);
            progress.complete(index);
        }

        let directions = plan(&stops, &progress);
        assert_eq!(directions.origin, Some(third.coordinate));
        assert_eq!(directions.destination, Some(third.coordinate));
        assert!(directions.via.is_empty());
    }

    #[rstest]
    fn finished_trip_heads_for_extraction(stops: [Waypoint; 3], base: Coordinate) {
        let mut progress = TripProgress::new();
        progress.set_base(base);
        for index in 0..3 {
            progress.engage(index);
            progress.complete(index);
        }
        let current = Coordinate::new(41.72, 44.83);

        let home = DirectionsPlan::for_remaining(
            &stops,
            &progress,
            Some(current),
            &ItineraryConfig::default(),
        );
        assert_eq!(home.origin, Some(current));
        assert_eq!(home.destination, Some(base));

        progress.toggle_extraction();
        let airport = plan(&stops, &progress);
        assert_eq!(airport.origin, None);
        assert_eq!(airport.destination, Some(ItineraryConfig::default().terminal));
    }

    #[rstest]
    fn empty_route_without_base_has_no_endpoints() {
        let directions = plan(&[], &TripProgress::new());
        assert_eq!(directions, DirectionsPlan::default());
    }
}
