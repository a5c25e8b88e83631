//! Choosing the next action to offer for a waypoint.
//!
//! Resolution is a first-match scan over an ordered rule table. Each rule
//! names a status, optionally a transport family, a distance band and whether
//! it needs ride-hailing to be available. Adding a transport family or a
//! threshold means adding rows, not branches.

use std::fmt;
use std::ops::{Bound, RangeBounds};

use log::debug;

use crate::{TransportFamily, TransportMode, WaypointStatus};

/// Directions profile handed to an external maps application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NavigationMode {
    /// On foot.
    Walking,
    /// Public transit.
    Transit,
    /// By car.
    Driving,
}

impl NavigationMode {
    /// The lower-case profile name used by maps applications.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Walking => "walking",
            Self::Transit => "transit",
            Self::Driving => "driving",
        }
    }
}

impl fmt::Display for NavigationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to present for a waypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "action", content = "mode", rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum Action {
    /// Nothing left to do here.
    NoAction,
    /// Offer to engage the waypoint.
    PromptSelect,
    /// Open directions with the given profile.
    Navigate(NavigationMode),
    /// Offer a ride-hailing service.
    HailRide,
}

/// Distance thresholds shaping passenger actions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionThresholds {
    /// Passenger legs shorter than this walk.
    pub walking_cutoff_km: f64,
    /// Passenger legs must be longer than this to offer ride-hailing.
    pub ride_hail_min_km: f64,
}

impl Default for ActionThresholds {
    fn default() -> Self {
        Self {
            walking_cutoff_km: 2.0,
            ride_hail_min_km: 1.5,
        }
    }
}

impl ActionThresholds {
    /// Lower bound of the ride-hailing band: at or past the walking cutoff and
    /// strictly past the ride-hailing minimum.
    const fn ride_hail_floor(&self) -> Bound<f64> {
        if self.walking_cutoff_km > self.ride_hail_min_km {
            Bound::Included(self.walking_cutoff_km)
        } else {
            Bound::Excluded(self.ride_hail_min_km)
        }
    }
}

/// One row of the decision table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionRule {
    /// Status the row applies to.
    pub status: WaypointStatus,
    /// Transport family the row applies to; `None` matches any.
    pub family: Option<TransportFamily>,
    /// Distance band, in kilometres.
    pub band: (Bound<f64>, Bound<f64>),
    /// Whether the row only applies when ride-hailing is available.
    pub needs_ride_hailing: bool,
    /// Result when the row matches.
    pub action: Action,
}

impl ActionRule {
    const ANY_DISTANCE: (Bound<f64>, Bound<f64>) = (Bound::Unbounded, Bound::Unbounded);

    /// A row matching every distance and family for `status`.
    #[must_use]
    pub const fn for_status(status: WaypointStatus, action: Action) -> Self {
        Self {
            status,
            family: None,
            band: Self::ANY_DISTANCE,
            needs_ride_hailing: false,
            action,
        }
    }

    fn matches(
        &self,
        status: WaypointStatus,
        distance_km: f64,
        family: TransportFamily,
        ride_hailing_available: bool,
    ) -> bool {
        self.status == status
            && self.family.is_none_or(|wanted| wanted == family)
            && self.band.contains(&distance_km)
            && (!self.needs_ride_hailing || ride_hailing_available)
    }
}

/// Table-driven action resolution.
///
/// # Examples
/// ```
/// use waymark_core::{Action, ActionResolver, NavigationMode, TransportMode, WaypointStatus};
///
/// let resolver = ActionResolver::default();
/// assert_eq!(
///     resolver.resolve(WaypointStatus::Engaged, 1.0, TransportMode::Taxi),
///     Action::Navigate(NavigationMode::Walking)
/// );
/// assert_eq!(
///     resolver.resolve(WaypointStatus::Engaged, 5.0, TransportMode::Taxi),
///     Action::HailRide
/// );
///
/// let no_hailing = ActionResolver::default().with_ride_hailing(false);
/// assert_eq!(
///     no_hailing.resolve(WaypointStatus::Engaged, 5.0, TransportMode::Taxi),
///     Action::Navigate(NavigationMode::Transit)
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ActionResolver {
    rules: Vec<ActionRule>,
    ride_hailing_available: bool,
}

impl Default for ActionResolver {
    fn default() -> Self {
        Self::new(ActionThresholds::default())
    }
}

impl ActionResolver {
    /// Build the standard table for `thresholds`.
    #[must_use]
    pub fn new(thresholds: ActionThresholds) -> Self {
        let passenger = Some(TransportFamily::Passenger);
        let rules = vec![
            ActionRule::for_status(WaypointStatus::Neutralized, Action::NoAction),
            ActionRule::for_status(WaypointStatus::Available, Action::PromptSelect),
            ActionRule {
                family: Some(TransportFamily::SelfDriven),
                ..ActionRule::for_status(
                    WaypointStatus::Engaged,
                    Action::Navigate(NavigationMode::Driving),
                )
            },
            ActionRule {
                family: passenger,
                band: (
                    Bound::Unbounded,
                    Bound::Excluded(thresholds.walking_cutoff_km),
                ),
                ..ActionRule::for_status(
                    WaypointStatus::Engaged,
                    Action::Navigate(NavigationMode::Walking),
                )
            },
            ActionRule {
                family: passenger,
                band: (thresholds.ride_hail_floor(), Bound::Unbounded),
                needs_ride_hailing: true,
                ..ActionRule::for_status(WaypointStatus::Engaged, Action::HailRide)
            },
            ActionRule {
                family: passenger,
                ..ActionRule::for_status(
                    WaypointStatus::Engaged,
                    Action::Navigate(NavigationMode::Transit),
                )
            },
        ];
        Self::from_rules(rules)
    }

    /// Use a custom table. Rows are tried in order; the first match wins.
    #[must_use]
    pub const fn from_rules(rules: Vec<ActionRule>) -> Self {
        Self {
            rules,
            ride_hailing_available: true,
        }
    }

    /// Set whether a ride-hailing service can be offered.
    #[must_use]
    pub const fn with_ride_hailing(mut self, available: bool) -> Self {
        self.ride_hailing_available = available;
        self
    }

    /// The decision table, in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[ActionRule] {
        &self.rules
    }

    /// Decide what to present. Falls back to [`Action::NoAction`] when no
    /// row matches, which the standard table never allows.
    #[must_use]
    pub fn resolve(
        &self,
        status: WaypointStatus,
        distance_km: f64,
        transport: TransportMode,
    ) -> Action {
        let family = transport.family();
        let action = self
            .rules
            .iter()
            .find(|rule| rule.matches(status, distance_km, family, self.ride_hailing_available))
            .map_or(Action::NoAction, |rule| rule.action);
        debug!("{status:?} at {distance_km} km by {transport}: {action:?}");
        action
    }
}

/// Resolve with the default thresholds and ride-hailing available.
#[must_use]
pub fn resolve_action(status: WaypointStatus, distance_km: f64, transport: TransportMode) -> Action {
    ActionResolver::default().resolve(status, distance_km, transport)
}
