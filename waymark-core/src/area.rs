//! Bounding areas for deciding which location to measure from.

use geo::{Coord, Intersects, Rect};

use crate::Coordinate;

/// A latitude/longitude rectangle the itinerary operates in.
///
/// Locations outside the area are treated as stale or foreign fixes when
/// choosing a reference point for distances.
///
/// # Examples
/// ```
/// use waymark_core::{Coordinate, OperationalArea};
///
/// let area = OperationalArea::default();
/// assert!(area.contains(Some(Coordinate::new(41.7, 44.8))));
/// assert!(!area.contains(Some(Coordinate::new(51.5, -0.1))));
/// assert!(!area.contains(None));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperationalArea {
    bounds: Rect<f64>,
}

impl OperationalArea {
    /// Build an area from two opposite corners.
    #[must_use]
    pub fn new(corner: Coordinate, opposite: Coordinate) -> Self {
        Self {
            bounds: Rect::new(Coord::from(corner), Coord::from(opposite)),
        }
    }

    /// Whether `location` is known and falls inside the area.
    ///
    /// Boundary points count as inside.
    #[must_use]
    pub fn contains(&self, location: Option<Coordinate>) -> bool {
        location.is_some_and(|coord| self.bounds.intersects(&Coord::from(coord)))
    }
}

impl Default for OperationalArea {
    fn default() -> Self {
        Self::new(Coordinate::new(41.0, 40.0), Coordinate::new(44.0, 47.0))
    }
}

/// Pick the point distances to waypoints are measured from.
///
/// Prefers the live `current` location, falling back to the trip `base`.
/// The `(0, 0)` sentinel counts as unknown for both.
///
/// # Examples
/// ```
/// use waymark_core::{Coordinate, distance_origin};
///
/// let base = Coordinate::new(41.7, 44.8);
/// assert_eq!(distance_origin(Some(Coordinate::UNSET), Some(base)), Some(base));
/// assert_eq!(distance_origin(None, None), None);
/// ```
#[must_use]
pub fn distance_origin(
    current: Option<Coordinate>,
    base: Option<Coordinate>,
) -> Option<Coordinate> {
    current
        .and_then(Coordinate::known)
        .or_else(|| base.and_then(Coordinate::known))
}
