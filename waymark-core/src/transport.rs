//! Traveller transport preferences.
//!
//! The four user-facing modes collapse into two families when deciding what
//! to do next: travellers who drive themselves, and passengers who may need a
//! ride-hailing service.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// How the traveller gets around.
///
/// # Examples
/// ```
/// use waymark_core::{TransportFamily, TransportMode};
///
/// let mode: TransportMode = "TAXI".parse().unwrap();
/// assert_eq!(mode.family(), TransportFamily::Passenger);
/// assert_eq!(TransportMode::Rental4x4.to_string(), "RENTAL_4X4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransportMode {
    /// Self-driven rental off-roader.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "RENTAL_4X4"))]
    Rental4x4,
    /// Taxi or private driver.
    #[cfg_attr(feature = "serde", serde(rename = "TAXI"))]
    Taxi,
    /// Buses and minibuses.
    #[cfg_attr(feature = "serde", serde(rename = "PUBLIC_TRANSPORT"))]
    PublicTransport,
    /// The traveller's own vehicle.
    #[cfg_attr(feature = "serde", serde(rename = "OWN_CAR"))]
    OwnCar,
}

/// Transport modes grouped by who is at the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportFamily {
    /// The traveller drives; ride-hailing is never needed.
    SelfDriven,
    /// Someone else drives; ride-hailing may be needed.
    Passenger,
}

/// Error returned when parsing an unknown [`TransportMode`] name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown transport mode {0:?}; expected one of RENTAL_4X4, TAXI, PUBLIC_TRANSPORT, OWN_CAR")]
pub struct TransportModeParseError(pub String);

impl TransportMode {
    /// Every mode, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Rental4x4,
        Self::Taxi,
        Self::PublicTransport,
        Self::OwnCar,
    ];

    /// The family this mode belongs to.
    #[must_use]
    pub const fn family(self) -> TransportFamily {
        match self {
            Self::Rental4x4 | Self::OwnCar => TransportFamily::SelfDriven,
            Self::Taxi | Self::PublicTransport => TransportFamily::Passenger,
        }
    }

    /// The canonical upper-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rental4x4 => "RENTAL_4X4",
            Self::Taxi => "TAXI",
            Self::PublicTransport => "PUBLIC_TRANSPORT",
            Self::OwnCar => "OWN_CAR",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = TransportModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_uppercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalised)
            .ok_or_else(|| TransportModeParseError(s.to_owned()))
    }
}
