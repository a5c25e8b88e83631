//! Presenting a trip as an ordered list of stages.
//!
//! The caller's waypoints are bracketed by the base (when one is set) and an
//! extraction leg, then annotated with each stage's status and the estimated
//! road distance from the stage before it.

use crate::geodesic::road_estimate_km;
use crate::{ActiveTarget, Coordinate, ExtractionMode, TripProgress, Waypoint, WaypointStatus};

/// Fixed locations used when assembling an itinerary.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItineraryConfig {
    /// Transit terminal for [`ExtractionMode::ExitViaTerminal`].
    pub terminal: Coordinate,
    /// Where to start when no base is set.
    pub default_origin: Coordinate,
}

impl Default for ItineraryConfig {
    fn default() -> Self {
        Self {
            terminal: Coordinate::new(41.6693, 44.9547),
            default_origin: Coordinate::new(41.7, 44.8),
        }
    }
}

/// One step of an assembled itinerary.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "stage", rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum Stage {
    /// Arriving at the trip base.
    Arrival {
        /// The base location.
        base: Coordinate,
        /// Neutralised once the trip is underway.
        status: WaypointStatus,
        /// Road estimate from the previous stage; `None` for the first.
        leg_km: Option<f64>,
    },
    /// Visiting one of the caller's waypoints.
    Activity {
        /// Position in the caller's waypoint list.
        index: usize,
        /// The waypoint itself.
        waypoint: Waypoint,
        /// As classified by [`TripProgress::status_of`].
        status: WaypointStatus,
        /// Road estimate from the previous stage; `None` for the first.
        leg_km: Option<f64>,
    },
    /// Leaving, either back to base or through the terminal.
    Extraction {
        /// How the trip ends.
        mode: ExtractionMode,
        /// Where the trip ends.
        destination: Coordinate,
        /// Engaged when the active index sits on the extraction sentinel.
        status: WaypointStatus,
        /// Road estimate from the previous stage; `None` for the first.
        leg_km: Option<f64>,
    },
}

impl Stage {
    /// Where the stage takes place.
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        match self {
            Self::Arrival { base, .. } => *base,
            Self::Activity { waypoint, .. } => waypoint.coordinate,
            Self::Extraction { destination, .. } => *destination,
        }
    }

    /// The stage's status.
    #[must_use]
    pub const fn status(&self) -> WaypointStatus {
        match self {
            Self::Arrival { status, .. }
            | Self::Activity { status, .. }
            | Self::Extraction { status, .. } => *status,
        }
    }

    /// Estimated road distance from the previous stage.
    #[must_use]
    pub const fn leg_km(&self) -> Option<f64> {
        match self {
            Self::Arrival { leg_km, .. }
            | Self::Activity { leg_km, .. }
            | Self::Extraction { leg_km, .. } => *leg_km,
        }
    }

    const fn set_leg_km(&mut self, km: f64) {
        match self {
            Self::Arrival { leg_km, .. }
            | Self::Activity { leg_km, .. }
            | Self::Extraction { leg_km, .. } => *leg_km = Some(km),
        }
    }
}

/// A trip laid out stage by stage.
///
/// # Examples
/// ```
/// use waymark_core::{Coordinate, Itinerary, ItineraryConfig, Stage, TripProgress, Waypoint};
///
/// let stops = [Waypoint::at(1, Coordinate::new(41.69, 44.80))];
/// let mut progress = TripProgress::new();
/// progress.set_base(Coordinate::new(41.71, 44.82));
///
/// let itinerary = Itinerary::assemble(&stops, &progress, &ItineraryConfig::default());
/// assert!(matches!(itinerary.stages().first(), Some(Stage::Arrival { .. })));
/// assert!(matches!(itinerary.stages().last(), Some(Stage::Extraction { .. })));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Itinerary {
    stages: Vec<Stage>,
    default_origin: Coordinate,
}

impl Itinerary {
    /// Lay out `waypoints` for `progress`.
    ///
    /// The arrival stage appears only when a base is set. Returning to base
    /// without one has nowhere to go, so that extraction stage is omitted;
    /// exiting via the terminal is always present.
    #[must_use]
    pub fn assemble(
        waypoints: &[Waypoint],
        progress: &TripProgress,
        config: &ItineraryConfig,
    ) -> Self {
        let base = progress.base_location();
        let mut stages = Vec::with_capacity(waypoints.len().saturating_add(2));

        if let Some(base) = base {
            let status = if progress.active_index().is_some() {
                WaypointStatus::Neutralized
            } else {
                WaypointStatus::Engaged
            };
            stages.push(Stage::Arrival {
                base,
                status,
                leg_km: None,
            });
        }

        stages.extend(
            waypoints
                .iter()
                .enumerate()
                .map(|(index, waypoint)| Stage::Activity {
                    index,
                    waypoint: waypoint.clone(),
                    status: progress.status_of(index),
                    leg_km: None,
                }),
        );

        let mode = progress.extraction_mode();
        let destination = match mode {
            ExtractionMode::ReturnToBase => base,
            ExtractionMode::ExitViaTerminal => Some(config.terminal),
        };
        if let Some(destination) = destination {
            let status = if progress.active_target(waypoints.len()) == Some(ActiveTarget::Extraction)
            {
                WaypointStatus::Engaged
            } else {
                WaypointStatus::Available
            };
            stages.push(Stage::Extraction {
                mode,
                destination,
                status,
                leg_km: None,
            });
        }

        let mut previous: Option<Coordinate> = None;
        for stage in &mut stages {
            let here = stage.coordinate();
            if let Some(from) = previous {
                stage.set_leg_km(road_estimate_km(from, here));
            }
            previous = Some(here);
        }

        Self {
            stages,
            default_origin: config.default_origin,
        }
    }

    /// The stages in visiting order.
    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Total estimated road distance across every leg.
    #[must_use]
    pub fn total_km(&self) -> f64 {
        self.stages.iter().filter_map(Stage::leg_km).sum()
    }

    /// Where a map of the itinerary should open: the first stage, or the
    /// default origin for an empty itinerary.
    #[must_use]
    pub fn initial_map_center(&self) -> Coordinate {
        self.stages
            .first()
            .map_or(self.default_origin, Stage::coordinate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn stops() -> [Waypoint; 2] {
        [
            Waypoint::new(1, "Narikala", Coordinate::new(41.6880, 44.8086), "HISTORICAL"),
            Waypoint::new(2, "Sameba", Coordinate::new(41.6972, 44.8166), "RELIGIOUS"),
        ]
    }

    #[fixture]
    fn base() -> Coordinate {
        Coordinate::new(41.7151, 44.8271)
    }

    #[rstest]
    fn without_base_only_terminal_extraction_is_added(stops: [Waypoint; 2]) {
        let mut progress = TripProgress::new();
        let itinerary = Itinerary::assemble(&stops, &progress, &ItineraryConfig::default());
        assert_eq!(itinerary.stages().len(), 2);

        progress.toggle_extraction();
        let itinerary = Itinerary::assemble(&stops, &progress, &ItineraryConfig::default());
        assert_eq!(itinerary.stages().len(), 3);
        assert_eq!(
            itinerary.stages().last().map(Stage::coordinate),
            Some(ItineraryConfig::default().terminal)
        );
    }

    #[rstest]
    fn base_brackets_the_waypoints(stops: [Waypoint; 2], base: Coordinate) {
        let mut progress = TripProgress::new();
        progress.set_base(base);
        let itinerary = Itinerary::assemble(&stops, &progress, &ItineraryConfig::default());

        let [first, second] = &stops;
        let coordinates: Vec<Coordinate> =
            itinerary.stages().iter().map(Stage::coordinate).collect();
        assert_eq!(coordinates, [base, first.coordinate, second.coordinate, base]);
        assert!(matches!(
            itinerary.stages().last(),
            Some(Stage::Extraction {
                mode: ExtractionMode::ReturnToBase,
                ..
            })
        ));
    }

    #[rstest]
    fn statuses_follow_progress(stops: [Waypoint; 2], base: Coordinate) {
        let mut progress = TripProgress::new();
        progress.set_base(base);
        let fresh = Itinerary::assemble(&stops, &progress, &ItineraryConfig::default());
        let statuses: Vec<WaypointStatus> = fresh.stages().iter().map(Stage::status).collect();
        assert_eq!(
            statuses,
            [
                WaypointStatus::Engaged,
                WaypointStatus::Available,
                WaypointStatus::Available,
                WaypointStatus::Available
            ]
        );

        progress.engage(0);
        progress.complete_and_advance(0, 2);
        progress.complete_and_advance(1, 2);
        let done = Itinerary::assemble(&stops, &progress, &ItineraryConfig::default());
        let statuses: Vec<WaypointStatus> = done.stages().iter().map(Stage::status).collect();
        assert_eq!(
            statuses,
            [
                WaypointStatus::Neutralized,
                WaypointStatus::Neutralized,
                WaypointStatus::Neutralized,
                WaypointStatus::Engaged
            ]
        );
    }

    #[rstest]
    fn legs_use_road_estimates(stops: [Waypoint; 2], base: Coordinate) {
        let mut progress = TripProgress::new();
        progress.set_base(base);
        let itinerary = Itinerary::assemble(&stops, &progress, &ItineraryConfig::default());
        let legs: Vec<Option<f64>> = itinerary.stages().iter().map(Stage::leg_km).collect();

        let [first, _] = &stops;
        assert_eq!(legs.first(), Some(&None));
        assert_eq!(
            legs.get(1).copied().flatten(),
            Some(road_estimate_km(base, first.coordinate))
        );
        assert!(itinerary.total_km() > 0.0);
    }

    #[rstest]
    fn map_center_prefers_first_stage(stops: [Waypoint; 2]) {
        let config = ItineraryConfig::default();
        let progress = TripProgress::new();
        let itinerary = Itinerary::assemble(&stops, &progress, &config);
        let [first, _] = &stops;
        assert_eq!(itinerary.initial_map_center(), first.coordinate);

        let empty = Itinerary::assemble(&[], &progress, &config);
        assert!(empty.stages().is_empty());
        assert_eq!(empty.initial_map_center(), config.default_origin);
    }
}
