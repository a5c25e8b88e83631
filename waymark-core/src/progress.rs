//! Trip progress and its legal transitions.
//!
//! [`TripProgress`] is the single aggregate describing how far a traveller
//! has got through a chosen sequence: where the trip is based, which waypoint
//! is engaged, which are neutralised, and how the trip ends. Every mutation
//! goes through one method (or one [`ProgressEvent`]) so readers never observe
//! a half-applied change.
//!
//! Indices are opaque to this module. Range checks belong to whoever holds
//! the waypoint list; only [`TripProgress::complete_and_advance`] and
//! [`TripProgress::active_target`] take the waypoint count as an argument.

use std::collections::BTreeSet;

use log::{debug, warn};

use crate::Coordinate;

/// Where a single waypoint stands within the trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum WaypointStatus {
    /// Not yet selected.
    Available,
    /// The current objective.
    Engaged,
    /// Visited. Terminal for the waypoint.
    Neutralized,
}

/// How the trip concludes once every waypoint is visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ExtractionMode {
    /// Head back to the base location.
    #[default]
    ReturnToBase,
    /// Leave through a transit terminal such as an airport.
    ExitViaTerminal,
}

impl ExtractionMode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::ReturnToBase => Self::ExitViaTerminal,
            Self::ExitViaTerminal => Self::ReturnToBase,
        }
    }
}

/// What the active index points at, given the length of the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveTarget {
    /// An ordinary waypoint index.
    Waypoint(usize),
    /// The sentinel one past the last waypoint: the extraction leg.
    Extraction,
    /// Beyond the sentinel; the caller's route no longer matches the progress.
    OutOfRange(usize),
}

/// A single state change, expressed as data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressEvent {
    /// Set the base location if none is set yet.
    SetBase(Coordinate),
    /// Replace the base location unconditionally.
    ForceBase(Coordinate),
    /// Make an index the active one.
    Engage(usize),
    /// Neutralise the engaged index.
    Complete(usize),
    /// Neutralise the engaged index and engage the next one.
    CompleteAndAdvance {
        /// Index being completed.
        index: usize,
        /// Number of waypoints in the route, bounding the advance.
        waypoint_count: usize,
    },
    /// Flip between the two extraction modes.
    ToggleExtraction,
    /// Abort the trip and return to the initial empty state.
    Reset,
}

/// Why a transition left the progress untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Unchanged {
    /// A base location is already set; use [`ProgressEvent::ForceBase`].
    BaseAlreadySet,
    /// The `(0, 0)` sentinel cannot serve as a base.
    UnsetCoordinate,
    /// The index is not the engaged one, so it cannot be completed.
    NotEngaged,
    /// The index was already completed.
    AlreadyCompleted,
    /// The requested state was already in place.
    NoChange,
}

/// Outcome of applying a transition. Transitions never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Transition {
    /// The progress changed.
    Applied,
    /// The progress was left as it was.
    Unchanged(Unchanged),
}

impl Transition {
    /// Whether the progress changed.
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Mutable progress through one trip.
///
/// # Examples
/// ```
/// use waymark_core::{Coordinate, ExtractionMode, TripProgress, WaypointStatus};
///
/// let mut progress = TripProgress::new();
/// progress.set_base(Coordinate::new(41.7, 44.8));
/// progress.engage(0);
/// progress.complete_and_advance(0, 2);
///
/// assert_eq!(progress.status_of(0), WaypointStatus::Neutralized);
/// assert_eq!(progress.status_of(1), WaypointStatus::Engaged);
/// assert_eq!(progress.extraction_mode(), ExtractionMode::ReturnToBase);
///
/// progress.reset();
/// assert_eq!(progress, TripProgress::default());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TripProgress {
    base_location: Option<Coordinate>,
    active_index: Option<usize>,
    completed_indices: BTreeSet<usize>,
    extraction_mode: ExtractionMode,
}

impl TripProgress {
    /// The initial empty progress.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            base_location: None,
            active_index: None,
            completed_indices: BTreeSet::new(),
            extraction_mode: ExtractionMode::ReturnToBase,
        }
    }

    /// The trip's base, if one has been set.
    #[must_use]
    pub const fn base_location(&self) -> Option<Coordinate> {
        self.base_location
    }

    /// The engaged index, which may be the extraction sentinel.
    #[must_use]
    pub const fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    /// Indices marked complete, in ascending order.
    #[must_use]
    pub const fn completed_indices(&self) -> &BTreeSet<usize> {
        &self.completed_indices
    }

    /// How the trip will conclude.
    #[must_use]
    pub const fn extraction_mode(&self) -> ExtractionMode {
        self.extraction_mode
    }

    /// Whether `index` has been completed.
    #[must_use]
    pub fn is_completed(&self, index: usize) -> bool {
        self.completed_indices.contains(&index)
    }

    /// Whether nothing has happened since the trip was selected.
    #[must_use]
    pub fn is_pristine(&self) -> bool {
        *self == Self::new()
    }

    /// Classify `index`. Completion takes precedence over engagement.
    #[must_use]
    pub fn status_of(&self, index: usize) -> WaypointStatus {
        if self.is_completed(index) {
            WaypointStatus::Neutralized
        } else if self.active_index == Some(index) {
            WaypointStatus::Engaged
        } else {
            WaypointStatus::Available
        }
    }

    /// Interpret the active index against a route of `waypoint_count` stops.
    ///
    /// # Examples
    /// ```
    /// use waymark_core::{ActiveTarget, TripProgress};
    ///
    /// let mut progress = TripProgress::new();
    /// assert_eq!(progress.active_target(3), None);
    /// progress.engage(3);
    /// assert_eq!(progress.active_target(3), Some(ActiveTarget::Extraction));
    /// ```
    #[must_use]
    pub fn active_target(&self, waypoint_count: usize) -> Option<ActiveTarget> {
        self.active_index.map(|index| match index.cmp(&waypoint_count) {
            std::cmp::Ordering::Less => ActiveTarget::Waypoint(index),
            std::cmp::Ordering::Equal => ActiveTarget::Extraction,
            std::cmp::Ordering::Greater => ActiveTarget::OutOfRange(index),
        })
    }

    /// Set the base location unless one is already set.
    ///
    /// The `(0, 0)` sentinel is refused, as is any non-finite coordinate.
    pub fn set_base(&mut self, coordinate: Coordinate) -> Transition {
        if self.base_location.is_some() {
            return Transition::Unchanged(Unchanged::BaseAlreadySet);
        }
        self.force_base(coordinate)
    }

    /// Replace the base location, whether or not one is set.
    pub fn force_base(&mut self, coordinate: Coordinate) -> Transition {
        if coordinate.is_unset()
            || !coordinate.latitude.is_finite()
            || !coordinate.longitude.is_finite()
        {
            return Transition::Unchanged(Unchanged::UnsetCoordinate);
        }
        if self.base_location == Some(coordinate) {
            return Transition::Unchanged(Unchanged::NoChange);
        }
        self.base_location = Some(coordinate);
        Transition::Applied
    }

    /// Make `index` the active one.
    ///
    /// Re-engaging a completed index is allowed; it stays completed.
    pub fn engage(&mut self, index: usize) -> Transition {
        if self.active_index == Some(index) {
            return Transition::Unchanged(Unchanged::NoChange);
        }
        self.active_index = Some(index);
        Transition::Applied
    }

    /// Mark `index` complete without moving the active index.
    ///
    /// Only the engaged index can be completed.
    pub fn complete(&mut self, index: usize) -> Transition {
        if self.active_index != Some(index) {
            return Transition::Unchanged(Unchanged::NotEngaged);
        }
        if self.completed_indices.insert(index) {
            Transition::Applied
        } else {
            Transition::Unchanged(Unchanged::AlreadyCompleted)
        }
    }

    /// Complete `index` and engage the one after it.
    ///
    /// The advance is clamped to the extraction sentinel, `waypoint_count`.
    /// Nothing happens unless the completion itself applies.
    pub fn complete_and_advance(&mut self, index: usize, waypoint_count: usize) -> Transition {
        let outcome = self.complete(index);
        if outcome.is_applied() {
            self.active_index = Some(index.saturating_add(1).min(waypoint_count));
        }
        outcome
    }

    /// Flip the extraction mode.
    pub fn toggle_extraction(&mut self) -> Transition {
        self.extraction_mode = self.extraction_mode.toggled();
        Transition::Applied
    }

    /// Abort the trip, restoring the initial empty state.
    pub fn reset(&mut self) -> Transition {
        if self.is_pristine() {
            return Transition::Unchanged(Unchanged::NoChange);
        }
        *self = Self::new();
        Transition::Applied
    }

    /// Apply one event.
    pub fn apply(&mut self, event: ProgressEvent) -> Transition {
        let outcome = match event {
            ProgressEvent::SetBase(coordinate) => self.set_base(coordinate),
            ProgressEvent::ForceBase(coordinate) => self.force_base(coordinate),
            ProgressEvent::Engage(index) => self.engage(index),
            ProgressEvent::Complete(index) => self.complete(index),
            ProgressEvent::CompleteAndAdvance {
                index,
                waypoint_count,
            } => self.complete_and_advance(index, waypoint_count),
            ProgressEvent::ToggleExtraction => self.toggle_extraction(),
            ProgressEvent::Reset => self.reset(),
        };
        match outcome {
            Transition::Applied | Transition::Unchanged(Unchanged::NoChange) => {
                debug!("progress event {event:?}: {outcome:?}");
            }
            Transition::Unchanged(reason) => warn!("progress event {event:?} rejected: {reason:?}"),
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn base() -> Coordinate {
        Coordinate::new(41.7151, 44.8271)
    }

    #[fixture]
    fn underway(base: Coordinate) -> TripProgress {
        let mut progress = TripProgress::new();
        progress.set_base(base);
        progress.engage(0);
        progress.complete_and_advance(0, 3);
        progress
    }

    #[rstest]
    fn new_progress_is_empty() {
        let progress = TripProgress::new();
        assert_eq!(progress.base_location(), None);
        assert_eq!(progress.active_index(), None);
        assert!(progress.completed_indices().is_empty());
        assert_eq!(progress.extraction_mode(), ExtractionMode::ReturnToBase);
        assert_eq!(progress, TripProgress::default());
    }

    #[rstest]
    fn base_is_set_once(base: Coordinate) {
        let mut progress = TripProgress::new();
        assert_eq!(progress.set_base(base), Transition::Applied);
        let elsewhere = Coordinate::new(42.0, 43.0);
        assert_eq!(
            progress.set_base(elsewhere),
            Transition::Unchanged(Unchanged::BaseAlreadySet)
        );
        assert_eq!(progress.base_location(), Some(base));
    }

    #[rstest]
    fn force_base_replaces_existing(base: Coordinate) {
        let mut progress = TripProgress::new();
        progress.set_base(base);
        let elsewhere = Coordinate::new(42.0, 43.0);
        assert!(progress.force_base(elsewhere).is_applied());
        assert_eq!(progress.base_location(), Some(elsewhere));
    }

    #[rstest]
    #[case(Coordinate::UNSET)]
    #[case(Coordinate::new(f64::NAN, 1.0))]
    fn sentinel_and_non_finite_bases_are_refused(#[case] coordinate: Coordinate) {
        let mut progress = TripProgress::new();
        assert_eq!(
            progress.set_base(coordinate),
            Transition::Unchanged(Unchanged::UnsetCoordinate)
        );
        assert_eq!(progress.base_location(), None);
    }

    #[rstest]
    fn completion_requires_engagement() {
        let mut progress = TripProgress::new();
        assert_eq!(
            progress.complete(5),
            Transition::Unchanged(Unchanged::NotEngaged)
        );
        assert!(!progress.is_completed(5));

        progress.engage(5);
        assert!(progress.complete(5).is_applied());
        assert!(progress.is_completed(5));
        assert_eq!(progress.active_index(), Some(5));
    }

    #[rstest]
    fn completing_twice_is_reported() {
        let mut progress = TripProgress::new();
        progress.engage(1);
        progress.complete(1);
        assert_eq!(
            progress.complete(1),
            Transition::Unchanged(Unchanged::AlreadyCompleted)
        );
    }

    #[rstest]
    fn advance_moves_to_next_index(underway: TripProgress) {
        assert!(underway.is_completed(0));
        assert_eq!(underway.active_index(), Some(1));
        assert_eq!(underway.active_target(3), Some(ActiveTarget::Waypoint(1)));
    }

    #[rstest]
    fn advance_from_last_waypoint_lands_on_extraction(mut underway: TripProgress) {
        underway.engage(2);
        underway.complete_and_advance(2, 3);
        assert_eq!(underway.active_index(), Some(3));
        assert_eq!(underway.active_target(3), Some(ActiveTarget::Extraction));
    }

    #[rstest]
    fn advance_is_clamped_to_sentinel() {
        let mut progress = TripProgress::new();
        progress.engage(7);
        progress.complete_and_advance(7, 3);
        assert_eq!(progress.active_index(), Some(3));
    }

    #[rstest]
    fn advance_without_engagement_does_nothing() {
        let mut progress = TripProgress::new();
        progress.engage(1);
        assert_eq!(
            progress.complete_and_advance(0, 3),
            Transition::Unchanged(Unchanged::NotEngaged)
        );
        assert_eq!(progress.active_index(), Some(1));
        assert!(progress.completed_indices().is_empty());
    }

    #[rstest]
    fn re_engaging_completed_index_keeps_it_completed(mut underway: TripProgress) {
        assert!(underway.engage(0).is_applied());
        assert!(underway.is_completed(0));
        assert_eq!(underway.status_of(0), WaypointStatus::Neutralized);
    }

    #[rstest]
    fn advancing_a_completed_index_again_stays_put(mut underway: TripProgress) {
        underway.engage(0);
        assert_eq!(
            underway.complete_and_advance(0, 3),
            Transition::Unchanged(Unchanged::AlreadyCompleted)
        );
        assert_eq!(underway.active_index(), Some(0));
    }

    #[rstest]
    fn status_classification(underway: TripProgress) {
        assert_eq!(underway.status_of(0), WaypointStatus::Neutralized);
        assert_eq!(underway.status_of(1), WaypointStatus::Engaged);
        assert_eq!(underway.status_of(2), WaypointStatus::Available);
    }

    #[rstest]
    fn out_of_range_indices_are_opaque() {
        let mut progress = TripProgress::new();
        assert!(progress.engage(99).is_applied());
        assert_eq!(progress.active_target(3), Some(ActiveTarget::OutOfRange(99)));
    }

    #[rstest]
    fn toggle_extraction_flips_mode() {
        let mut progress = TripProgress::new();
        progress.toggle_extraction();
        assert_eq!(progress.extraction_mode(), ExtractionMode::ExitViaTerminal);
        progress.toggle_extraction();
        assert_eq!(progress.extraction_mode(), ExtractionMode::ReturnToBase);
    }

    #[rstest]
    fn reset_restores_initial_state(mut underway: TripProgress) {
        underway.toggle_extraction();
        assert!(underway.reset().is_applied());
        assert_eq!(underway, TripProgress::new());
        assert_eq!(
            underway.reset(),
            Transition::Unchanged(Unchanged::NoChange)
        );
    }

    fn coordinate() -> impl Strategy<Value = Coordinate> {
        (-89.0_f64..89.0, -179.0_f64..179.0).prop_map(|(lat, lon)| Coordinate::new(lat, lon))
    }

    fn event() -> impl Strategy<Value = ProgressEvent> {
        prop_oneof![
            coordinate().prop_map(ProgressEvent::SetBase),
            coordinate().prop_map(ProgressEvent::ForceBase),
            (0_usize..6).prop_map(ProgressEvent::Engage),
            (0_usize..6).prop_map(ProgressEvent::Complete),
            (0_usize..6, 0_usize..6).prop_map(|(index, waypoint_count)| {
                ProgressEvent::CompleteAndAdvance {
                    index,
                    waypoint_count,
                }
            }),
            Just(ProgressEvent::ToggleExtraction),
            Just(ProgressEvent::Reset),
        ]
    }

    proptest! {
        #[test]
        fn reset_after_any_events_restores_initial_state(
            events in prop::collection::vec(event(), 0..24),
        ) {
            let mut progress = TripProgress::new();
            for event in events {
                progress.apply(event);
            }
            progress.apply(ProgressEvent::Reset);
            prop_assert_eq!(progress, TripProgress::new());
        }
    }

    #[rstest]
    fn base_can_be_set_again_after_reset(mut underway: TripProgress) {
        underway.reset();
        let elsewhere = Coordinate::new(42.0, 43.0);
        assert!(underway.set_base(elsewhere).is_applied());
        assert_eq!(underway.base_location(), Some(elsewhere));
    }

    #[rstest]
    fn apply_dispatches_events(base: Coordinate) {
        let mut progress = TripProgress::new();
        let events = [
            ProgressEvent::SetBase(base),
            ProgressEvent::Engage(0),
            ProgressEvent::CompleteAndAdvance {
                index: 0,
                waypoint_count: 1,
            },
            ProgressEvent::ToggleExtraction,
        ];
        for event in events {
            assert!(progress.apply(event).is_applied(), "{event:?} should apply");
        }
        assert_eq!(progress.active_target(1), Some(ActiveTarget::Extraction));
        assert_eq!(progress.extraction_mode(), ExtractionMode::ExitViaTerminal);

        assert!(progress.apply(ProgressEvent::Reset).is_applied());
        assert!(progress.is_pristine());
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn serialises_as_four_fields(underway: TripProgress) {
        let value = serde_json::to_value(&underway).expect("serialise progress");
        let object = value.as_object().expect("progress is an object");
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            [
                "active_index",
                "base_location",
                "completed_indices",
                "extraction_mode"
            ]
        );
        assert_eq!(
            object.get("extraction_mode"),
            Some(&serde_json::json!("RETURN_TO_BASE"))
        );

        let restored: TripProgress = serde_json::from_value(value).expect("deserialise progress");
        assert_eq!(restored, underway);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    #[case(Transition::Applied, serde_json::json!("APPLIED"))]
    #[case(
        Transition::Unchanged(Unchanged::NotEngaged),
        serde_json::json!({"UNCHANGED": "NOT_ENGAGED"})
    )]
    fn transitions_serialise_with_their_reason(
        #[case] transition: Transition,
        #[case] expected: serde_json::Value,
    ) {
        assert_eq!(
            serde_json::to_value(transition).expect("serialise transition"),
            expected
        );
    }
}
