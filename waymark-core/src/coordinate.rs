//! Geographic coordinates in WGS84 degrees.
//!
//! The origin `(0, 0)` doubles as the "unknown location" sentinel. Location
//! providers report it before a fix is available, so distance helpers treat it
//! as carrying no information rather than as a point in the Gulf of Guinea.

use std::fmt;
use std::str::FromStr;

use geo::Coord;
use thiserror::Error;

/// A latitude/longitude pair in decimal degrees.
///
/// # Examples
/// ```
/// use waymark_core::Coordinate;
///
/// let tbilisi = Coordinate::new(41.7151, 44.8271);
/// assert!(!tbilisi.is_unset());
/// assert!(Coordinate::UNSET.is_unset());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    /// Degrees north of the equator.
    pub latitude: f64,
    /// Degrees east of the prime meridian.
    pub longitude: f64,
}

/// Errors returned by [`Coordinate::try_new`] and [`Coordinate::from_str`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    /// Latitude or longitude was NaN or infinite.
    #[error("coordinate components must be finite")]
    NonFinite,
    /// Latitude fell outside `-90.0..=90.0`.
    #[error("latitude {0} is outside -90..=90")]
    LatitudeOutOfRange(f64),
    /// Longitude fell outside `-180.0..=180.0`.
    #[error("longitude {0} is outside -180..=180")]
    LongitudeOutOfRange(f64),
    /// The text was not of the form `lat,lon`.
    #[error("expected `lat,lon`, found {0:?}")]
    Malformed(String),
}

impl Coordinate {
    /// The `(0, 0)` sentinel meaning "location unknown".
    pub const UNSET: Self = Self {
        latitude: 0.0,
        longitude: 0.0,
    };

    /// Construct a coordinate without validation.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Construct a coordinate, rejecting non-finite or out-of-range values.
    ///
    /// # Examples
    /// ```
    /// use waymark_core::{Coordinate, CoordinateError};
    ///
    /// assert!(Coordinate::try_new(41.7, 44.8).is_ok());
    /// assert_eq!(
    ///     Coordinate::try_new(91.0, 0.0),
    ///     Err(CoordinateError::LatitudeOutOfRange(91.0))
    /// );
    /// ```
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(CoordinateError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(longitude));
        }
        Ok(Self::new(latitude, longitude))
    }

    /// Whether this is the `(0, 0)` sentinel.
    #[must_use]
    #[expect(clippy::float_cmp, reason = "the sentinel is an exact bit pattern")]
    pub const fn is_unset(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }

    /// Return `Some(self)` unless this is the sentinel.
    #[must_use]
    pub const fn known(self) -> Option<Self> {
        if self.is_unset() { None } else { Some(self) }
    }
}

impl From<Coordinate> for Coord<f64> {
    fn from(value: Coordinate) -> Self {
        Self {
            x: value.longitude,
            y: value.latitude,
        }
    }
}

impl From<Coord<f64>> for Coordinate {
    fn from(value: Coord<f64>) -> Self {
        Self::new(value.y, value.x)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CoordinateError::Malformed(s.to_owned());
        let (lat, lon) = s.split_once(',').ok_or_else(malformed)?;
        let latitude: f64 = lat.trim().parse().map_err(|_| malformed())?;
        let longitude: f64 = lon.trim().parse().map_err(|_| malformed())?;
        Self::try_new(latitude, longitude)
    }
}
