//! Great-circle distances between coordinates.
//!
//! All functions here are total: they never fail and never panic. Display
//! distances treat the `(0, 0)` sentinel as unknown and short-circuit to zero;
//! [`haversine_km`] and [`path_length_km`] take coordinates at face value.

use crate::{Coordinate, Waypoint};

/// Mean Earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Multiplier applied to straight-line distances to approximate road travel.
pub const ROAD_WINDING_FACTOR: f64 = 1.27;

/// Straight-line distances below this many kilometres are not inflated by
/// [`road_estimate_km`].
pub const ROAD_ESTIMATE_MIN_KM: f64 = 0.1;

/// Haversine distance between `a` and `b` in kilometres, with no special
/// cases.
///
/// Sequencing uses this directly so that a start at the origin still orders
/// waypoints by their true distance from it.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the haversine formula is floating-point by nature"
)]
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    // Rounding can push near-antipodal pairs just past 1.0.
    let h = h.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Great-circle distance between `a` and `b` in kilometres, for display.
///
/// Returns `0.0` when either endpoint is [`Coordinate::UNSET`], so an unknown
/// location never produces a misleading figure.
///
/// # Examples
/// ```
/// use waymark_core::{Coordinate, distance_km};
///
/// let a = Coordinate::new(0.0, 1.0);
/// let b = Coordinate::new(0.0, 2.0);
/// let d = distance_km(a, b);
/// assert!((d - 111.19).abs() < 0.01);
/// assert_eq!(distance_km(Coordinate::UNSET, b), 0.0);
/// ```
#[must_use]
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    if a.is_unset() || b.is_unset() {
        return 0.0;
    }
    haversine_km(a, b)
}

/// Approximate road distance between `a` and `b` in kilometres.
///
/// Applies [`ROAD_WINDING_FACTOR`] to the great-circle distance, except for
/// hops shorter than [`ROAD_ESTIMATE_MIN_KM`], which are returned as-is.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "scales a floating-point distance")]
pub fn road_estimate_km(a: Coordinate, b: Coordinate) -> f64 {
    let direct = distance_km(a, b);
    if direct < ROAD_ESTIMATE_MIN_KM {
        direct
    } else {
        direct * ROAD_WINDING_FACTOR
    }
}

/// Total haversine length of visiting `waypoints` in order from `start`.
///
/// # Examples
/// ```
/// use waymark_core::{Coordinate, Waypoint, path_length_km};
///
/// let stops = [Waypoint::at(1, Coordinate::new(0.0, 1.0))];
/// assert!(path_length_km(Coordinate::new(0.0, 1.0), &stops).abs() < f64::EPSILON);
/// ```
#[must_use]
pub fn path_length_km(start: Coordinate, waypoints: &[Waypoint]) -> f64 {
    waypoints
        .iter()
        .scan(start, |current, waypoint| {
            let leg = haversine_km(*current, waypoint.coordinate);
            *current = waypoint.coordinate;
            Some(leg)
        })
        .sum()
}
