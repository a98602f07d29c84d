//! Forwarder settings.
//!
//! Settings are layered, later sources winning:
//!
//! 1. built-in defaults
//! 2. an optional config file (format picked from its extension)
//! 3. `FACTORYSTATSD_*` environment variables, `__` between sections
//! 4. command-line flags, applied by the binary
//!
//! ```toml
//! script_output = "/opt/factorio/script-output"
//!
//! [statsd]
//! host = "127.0.0.1"
//! port = 8125
//! flavor = "dogstatsd"
//! max_packet_size = 1432
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::source::SourcePaths;
use crate::statsd::{Flavor, DEFAULT_MAX_PACKET_SIZE};

/// Prefix for environment overrides, e.g. `FACTORYSTATSD_STATSD__PORT`.
pub const ENV_PREFIX: &str = "FACTORYSTATSD";

/// Complete forwarder configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Factorio's `script-output` directory.
    pub script_output: PathBuf,
    pub statsd: StatsdSettings,
}

/// Where and how to send metrics.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatsdSettings {
    pub host: String,
    pub port: u16,
    pub flavor: Flavor,
    pub max_packet_size: usize,
}

impl Settings {
    /// Load settings from defaults, an optional file and the environment.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("script_output", "script-output")?
            .set_default("statsd.host", "127.0.0.1")?
            .set_default("statsd.port", 8125)?
            .set_default("statsd.flavor", Flavor::default().as_str())?
            .set_default("statsd.max_packet_size", DEFAULT_MAX_PACKET_SIZE as u64)?;

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("building settings")?;

        config
            .try_deserialize()
            .context("invalid forwarder settings")
    }

    /// Input file locations inside the script-output directory.
    pub fn source_paths(&self) -> SourcePaths {
        SourcePaths::in_dir(&self.script_output)
    }
}
