//! Core domain types for the Waymark itinerary engine.
//!
//! The crate covers everything except route sequencing itself: geographic
//! coordinates and great-circle distances, the trip progress state machine,
//! the table-driven action resolver, itinerary and directions assembly, and
//! the persistence seam for progress. Sequencers plug in through the
//! [`Sequencer`] trait.
//!
//! Engine operations are total. Only the persistence and parsing seams return
//! errors.
#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod action;
mod area;
mod coordinate;
mod directions;
pub mod geodesic;
mod itinerary;
mod progress;
mod sequencer;
mod store;
mod transport;
mod waypoint;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use action::{Action, ActionResolver, ActionRule, ActionThresholds, NavigationMode, resolve_action};
pub use area::{OperationalArea, distance_origin};
pub use coordinate::{Coordinate, CoordinateError};
pub use directions::DirectionsPlan;
pub use geodesic::{distance_km, haversine_km, path_length_km, road_estimate_km};
pub use itinerary::{Itinerary, ItineraryConfig, Stage};
pub use progress::{
    ActiveTarget, ExtractionMode, ProgressEvent, Transition, TripProgress, Unchanged,
    WaypointStatus,
};
pub use sequencer::{Sequencer, optimize_from_base};
#[cfg(feature = "store-json")]
#[cfg_attr(docsrs, doc(cfg(feature = "store-json")))]
pub use store::JsonProgressStore;
pub use store::{
    MemoryProgressStore, ProgressSession, ProgressStore, ProgressStoreError, SessionUpdate,
};
pub use transport::{TransportFamily, TransportMode, TransportModeParseError};
pub use waypoint::Waypoint;
