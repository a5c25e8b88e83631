use crate::Coordinate;

/// A single point of interest in an itinerary.
///
/// Waypoints are caller-owned value data. The engine reorders and selects
/// them but never mutates one.
///
/// # Examples
/// ```
/// use waymark_core::{Coordinate, Waypoint};
///
/// let fortress = Waypoint::new(7, "Narikala", Coordinate::new(41.6880, 44.8086), "HISTORICAL");
/// assert_eq!(fortress.id, 7);
/// assert_eq!(fortress.category, "HISTORICAL");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    /// Identifier, unique within a route.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Geographic position.
    pub coordinate: Coordinate,
    /// Free-form category label.
    pub category: String,
}

impl Waypoint {
    /// Construct a waypoint.
    #[must_use]
    pub fn new(
        id: i64,
        name: impl Into<String>,
        coordinate: Coordinate,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            coordinate,
            category: category.into(),
        }
    }

    /// Construct a waypoint with no name or category, mostly for tests.
    #[must_use]
    pub fn at(id: i64, coordinate: Coordinate) -> Self {
        Self::new(id, String::new(), coordinate, String::new())
    }
}
