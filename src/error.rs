//! Error types for the forwarding pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can abort a single forwarding cycle.
///
/// None of these are fatal: the forward loop logs them, cools down and
/// starts the next cycle.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// Reading a file (or its metadata) failed.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A file was readable but not valid JSON for its expected shape.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The samples file was parsed but could not be deleted afterwards.
    #[error("failed to remove consumed samples file {}: {source}", .path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Handing a packet to the transport failed.
    #[error("failed to send packet {index} of {total} to {target}: {source}")]
    Send {
        index: usize,
        total: usize,
        target: String,
        #[source]
        source: io::Error,
    },
}
