//! Deterministic fixtures shared by unit and behaviour tests.

use std::sync::Mutex;

use crate::{Coordinate, MemoryProgressStore, ProgressStore, ProgressStoreError, TripProgress, Waypoint};

/// A handful of Tbilisi landmarks, listed west to east.
#[must_use]
pub fn sample_waypoints() -> Vec<Waypoint> {
    vec![
        Waypoint::new(1, "Narikala Fortress", Coordinate::new(41.6880, 44.8086), "HISTORICAL"),
        Waypoint::new(2, "Dry Bridge Market", Coordinate::new(41.7003, 44.8028), "MARKET"),
        Waypoint::new(3, "Sameba Cathedral", Coordinate::new(41.6972, 44.8166), "RELIGIOUS"),
        Waypoint::new(4, "Chronicle of Georgia", Coordinate::new(41.7724, 44.8108), "MONUMENT"),
    ]
}

/// Memory-backed store that remembers every save.
#[derive(Debug, Default)]
pub struct RecordingProgressStore {
    inner: MemoryProgressStore,
    saves: Mutex<Vec<TripProgress>>,
}

impl RecordingProgressStore {
    /// Every progress value saved so far, oldest first.
    ///
    /// A poisoned log reads as empty.
    #[must_use]
    pub fn saves(&self) -> Vec<TripProgress> {
        self.saves
            .lock()
            .map(|saves| saves.clone())
            .unwrap_or_default()
    }
}

impl ProgressStore for RecordingProgressStore {
    fn load(&self) -> Result<TripProgress, ProgressStoreError> {
        self.inner.load()
    }

    fn save(&self, progress: &TripProgress) -> Result<(), ProgressStoreError> {
        self.saves
            .lock()
            .map_err(|_| ProgressStoreError::Poisoned)?
            .push(progress.clone());
        self.inner.save(progress)
    }
}
