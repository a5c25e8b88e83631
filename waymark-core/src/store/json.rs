//! JSON-file backed progress store.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use log::{debug, warn};

use super::{ProgressStore, ProgressStoreError};
use crate::TripProgress;

/// Persist progress as a pretty-printed JSON document.
///
/// A missing file loads as the initial empty progress. Saving creates the
/// parent directory when needed.
///
/// # Examples
/// ```rust
/// use waymark_core::{JsonProgressStore, ProgressStore, TripProgress};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dir = tempfile::tempdir()?;
/// let path = camino::Utf8PathBuf::try_from(dir.path().join("progress.json"))?;
/// let store = JsonProgressStore::new(path);
/// assert_eq!(store.load()?, TripProgress::new());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonProgressStore {
    path: Utf8PathBuf,
}

impl JsonProgressStore {
    /// Store progress at `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the progress file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> ProgressStoreError {
        ProgressStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn parent(&self) -> &Utf8Path {
        self.path
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."))
    }

    fn file_name(&self) -> Result<&str, ProgressStoreError> {
        self.path.file_name().ok_or_else(|| {
            self.io_error(io::Error::new(
                io::ErrorKind::InvalidInput,
                "progress path should include a file name",
            ))
        })
    }
}

impl ProgressStore for JsonProgressStore {
    fn load(&self) -> Result<TripProgress, ProgressStoreError> {
        let file_name = self.file_name()?;
        let contents = match fs_utf8::Dir::open_ambient_dir(self.parent(), ambient_authority())
            .and_then(|dir| dir.read_to_string(file_name))
        {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("no progress at {}; starting fresh", self.path);
                return Ok(TripProgress::new());
            }
            Err(err) => return Err(self.io_error(err)),
        };
        serde_json::from_str(&contents).map_err(|source| {
            warn!("progress file {} is malformed", self.path);
            ProgressStoreError::Malformed {
                path: self.path.clone(),
                source: Box::new(source),
            }
        })
    }

    fn save(&self, progress: &TripProgress) -> Result<(), ProgressStoreError> {
        let file_name = self.file_name()?;
        let contents = serde_json::to_string_pretty(progress)
            .map_err(|source| ProgressStoreError::Encode(Box::new(source)))?;
        let parent = self.parent();
        fs_utf8::Dir::create_ambient_dir_all(parent, ambient_authority())
            .and_then(|()| fs_utf8::Dir::open_ambient_dir(parent, ambient_authority()))
            .and_then(|dir| dir.write(file_name, contents))
            .map_err(|err| self.io_error(err))?;
        debug!("saved progress to {}", self.path);
        Ok(())
    }
}
