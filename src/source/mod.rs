//! Inputs dropped by the game into its script-output directory.
//!
//! Two files are polled:
//!
//! - the reference data (`factorystatsd-game-data.json`), cached by
//!   [`ReferenceDataCache`] and re-read only when its modification time
//!   advances
//! - the samples (`factorystatsd-samples.json`), taken and deleted by
//!   [`SampleIngester`] each time one appears

mod reference;
mod samples;
mod snapshot;

pub use reference::ReferenceDataCache;
pub use samples::SampleIngester;
pub use snapshot::{
    AbsentSignals, EntitySample, EntitySettings, ReferenceData, SamplesSnapshot, SignalCount,
    SignalId,
};

use std::path::{Path, PathBuf};

/// File name of the reference data inside the script-output directory.
pub const REFERENCE_FILE_NAME: &str = "factorystatsd-game-data.json";

/// File name of the samples inside the script-output directory.
pub const SAMPLES_FILE_NAME: &str = "factorystatsd-samples.json";

/// Locations of the two input files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePaths {
    pub reference: PathBuf,
    pub samples: PathBuf,
}

impl SourcePaths {
    /// Paths of the standard file names within a script-output directory.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            reference: dir.join(REFERENCE_FILE_NAME),
            samples: dir.join(SAMPLES_FILE_NAME),
        }
    }
}
