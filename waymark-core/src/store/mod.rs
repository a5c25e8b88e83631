//! Persistence seam for trip progress.
//!
//! The engine needs only "read the current state" and "write the new state".
//! [`ProgressStore`] captures that contract; [`ProgressSession`] wraps a store
//! as the single writer that loads, applies one event and saves.

use std::sync::Mutex;

use camino::Utf8PathBuf;
use log::debug;
use thiserror::Error;

use crate::{ProgressEvent, Transition, TripProgress};

#[cfg(feature = "store-json")]
mod json;

#[cfg(feature = "store-json")]
pub use json::JsonProgressStore;

/// Errors raised while loading or saving progress.
#[derive(Debug, Error)]
pub enum ProgressStoreError {
    /// Reading or writing the backing file failed.
    #[error("failed to access progress file {path}: {source}")]
    Io {
        /// Location of the progress file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The stored progress could not be decoded.
    #[error("progress file {path} is malformed: {source}")]
    Malformed {
        /// Location of the progress file.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The progress could not be encoded for storage.
    #[error("failed to encode progress: {0}")]
    Encode(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// Another writer panicked while holding the store.
    #[error("progress store lock was poisoned")]
    Poisoned,
}

/// Read and write access to persisted [`TripProgress`].
///
/// A store holding nothing yet must load as [`TripProgress::new`].
///
/// # Examples
/// ```rust
/// use waymark_core::{MemoryProgressStore, ProgressStore, TripProgress};
///
/// # fn main() -> Result<(), waymark_core::ProgressStoreError> {
/// let store = MemoryProgressStore::default();
/// let mut progress = store.load()?;
/// progress.engage(0);
/// store.save(&progress)?;
/// assert_eq!(store.load()?.active_index(), Some(0));
/// # Ok(())
/// # }
/// ```
pub trait ProgressStore {
    /// Return the stored progress.
    fn load(&self) -> Result<TripProgress, ProgressStoreError>;

    /// Replace the stored progress.
    fn save(&self, progress: &TripProgress) -> Result<(), ProgressStoreError>;
}

/// In-process store, mostly useful for tests and short-lived sessions.
#[derive(Debug, Default)]
pub struct MemoryProgressStore {
    progress: Mutex<TripProgress>,
}

impl MemoryProgressStore {
    /// Create a store holding `progress`.
    #[must_use]
    pub const fn with_progress(progress: TripProgress) -> Self {
        Self {
            progress: Mutex::new(progress),
        }
    }
}

impl ProgressStore for MemoryProgressStore {
    fn load(&self) -> Result<TripProgress, ProgressStoreError> {
        self.progress
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| ProgressStoreError::Poisoned)
    }

    fn save(&self, progress: &TripProgress) -> Result<(), ProgressStoreError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|_| ProgressStoreError::Poisoned)?;
        guard.clone_from(progress);
        Ok(())
    }
}

/// Result of applying one event through a [`ProgressSession`].
#[derive(Debug, Clone, PartialEq)]
pub struct SessionUpdate {
    /// What the event did.
    pub transition: Transition,
    /// Progress after the event.
    pub progress: TripProgress,
}

/// Single writer over a [`ProgressStore`].
///
/// Each call to [`ProgressSession::apply`] loads the stored progress, applies
/// one event and saves the result when it changed. Taking `&mut self` keeps
/// writes serialised.
///
/// # Examples
/// ```rust
/// use waymark_core::{MemoryProgressStore, ProgressEvent, ProgressSession};
///
/// # fn main() -> Result<(), waymark_core::ProgressStoreError> {
/// let mut session = ProgressSession::new(MemoryProgressStore::default());
/// session.apply(ProgressEvent::Engage(2))?;
/// let update = session.apply(ProgressEvent::Complete(2))?;
/// assert!(update.transition.is_applied());
/// assert!(session.current()?.is_completed(2));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ProgressSession<S> {
    store: S,
}

impl<S: ProgressStore> ProgressSession<S> {
    /// Wrap `store`.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The stored progress.
    pub fn current(&self) -> Result<TripProgress, ProgressStoreError> {
        self.store.load()
    }

    /// Load, apply `event`, and save when the progress changed.
    pub fn apply(&mut self, event: ProgressEvent) -> Result<SessionUpdate, ProgressStoreError> {
        let mut progress = self.store.load()?;
        let transition = progress.apply(event);
        if transition.is_applied() {
            self.store.save(&progress)?;
        } else {
            debug!("skipping save; progress unchanged");
        }
        Ok(SessionUpdate {
            transition,
            progress,
        })
    }

    /// Borrow the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Release the underlying store.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.store
    }
}
