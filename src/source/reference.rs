//! Reference data cache.
//!
//! Reads the game-data file and keeps it until the file changes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::info;

use super::ReferenceData;
use crate::error::ForwardError;

/// Holds the most recently loaded [`ReferenceData`].
///
/// The file's modification time is checked on every call, and the file is
/// only re-read when that time is newer than the one recorded at the last
/// load.
#[derive(Debug)]
pub struct ReferenceDataCache {
    path: PathBuf,
    data: Option<ReferenceData>,
    last_modified: Option<SystemTime>,
}

impl ReferenceDataCache {
    /// Create an empty cache for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            data: None,
            last_modified: None,
        }
    }

    /// Returns the path being monitored.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the cached data without touching the filesystem.
    pub fn cached(&self) -> Option<&ReferenceData> {
        self.data.as_ref()
    }

    /// Make sure the cache reflects the file on disk.
    ///
    /// Returns `Ok(None)` while the file does not exist yet. A parse failure
    /// leaves the previous cache (and its modification time) untouched so the
    /// next call tries again.
    pub fn ensure_loaded(&mut self) -> Result<Option<&ReferenceData>, ForwardError> {
        let modified = match fs::metadata(&self.path) {
            Ok(meta) => meta.modified().map_err(|source| self.read_error(source))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(self.read_error(source)),
        };

        let stale = match (&self.data, self.last_modified) {
            (None, _) | (_, None) => true,
            (Some(_), Some(last)) => modified > last,
        };

        if stale {
            let content = match fs::read_to_string(&self.path) {
                Ok(content) => content,
                // Removed between the metadata check and the read.
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
                Err(source) => return Err(self.read_error(source)),
            };
            let data: ReferenceData =
                serde_json::from_str(&content).map_err(|source| ForwardError::Parse {
                    path: self.path.clone(),
                    source,
                })?;

            info!(
                path = %self.path.display(),
                virtual_signals = data.virtual_signal_names.len(),
                items = data.item_names.len(),
                fluids = data.fluid_names.len(),
                "loaded reference data"
            );
            self.data = Some(data);
            self.last_modified = Some(modified);
        }

        Ok(self.data.as_ref())
    }

    fn read_error(&self, source: io::Error) -> ForwardError {
        ForwardError::Read {
            path: self.path.clone(),
            source,
        }
    }
}
