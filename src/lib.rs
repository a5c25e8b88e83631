//! Facade crate for the Waymark itinerary engine.
//!
//! This crate re-exports the core domain types and exposes the
//! nearest-neighbour sequencer and the JSON progress store behind feature
//! flags.

#![forbid(unsafe_code)]

pub use waymark_core::{
    Action, ActionResolver, ActionRule, ActionThresholds, ActiveTarget, Coordinate,
    CoordinateError, DirectionsPlan, ExtractionMode, Itinerary, ItineraryConfig,
    MemoryProgressStore, NavigationMode, OperationalArea, ProgressEvent, ProgressSession,
    ProgressStore, ProgressStoreError, Sequencer, SessionUpdate, Stage, TransportFamily,
    TransportMode, TransportModeParseError, Transition, TripProgress, Unchanged, Waypoint,
    WaypointStatus, distance_km, distance_origin, haversine_km, path_length_km, resolve_action,
    road_estimate_km,
};

#[cfg(feature = "store-json")]
pub use waymark_core::JsonProgressStore;

#[cfg(feature = "sequencer")]
pub use waymark_sequencer::{NearestNeighbourSequencer, optimize, optimize_from_base};
