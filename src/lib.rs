//! # factorystatsd
//!
//! Forwards Factorio circuit network samples to a statsd-compatible
//! collector as gauges over UDP.
//!
//! The factorystatsd mod periodically drops two JSON files into the game's
//! `script-output` directory: the reference data (every known signal
//! name) and a samples file (the signals seen by each monitored
//! combinator). This crate polls for them, turns the samples into gauges,
//! and sends them as statsd lines.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                         Forwarder                         │
//! │                                                           │
//! │  ┌────────────────────┐    ┌────────────────┐             │
//! │  │ ReferenceDataCache │    │ SampleIngester │    source   │
//! │  └─────────┬──────────┘    └───────┬────────┘             │
//! │            └───────────┬───────────┘                      │
//! │                        ▼                                  │
//! │             aggregate() ──▶ Vec<Gauge>           data     │
//! │                        │                                  │
//! │                        ▼                                  │
//! │  Flavor::format() ──▶ pack() ──▶ PacketSink      statsd   │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: the input files and their polling semantics
//! - **[`data`]**: gauges, tags, name normalization and aggregation
//! - **[`statsd`]**: wire formats ([`Flavor`]), packet batching and transport
//! - **[`forward`]**: the polling state machine ([`Forwarder`])
//! - **[`config`]**: layered [`Settings`]
//!
//! ## Usage
//!
//! ```bash
//! factorystatsd-forwarder --factorio-script-output ~/.factorio/script-output \
//!     --statsd-host 127.0.0.1 --statsd-port 8125 --statsd-flavor dogstatsd
//! ```
//!
//! ### As a library
//!
//! ```
//! use factorystatsd::{aggregate, pack, Flavor, ReferenceData, SamplesSnapshot};
//!
//! let reference = ReferenceData::default();
//! let samples: SamplesSnapshot = serde_json::from_str(r#"{
//!     "entities": [{
//!         "settings": { "name": "my_metric", "tags": "base=alpha", "absent_signals": "ignore" },
//!         "red_signals": [{ "signal": { "type": "item", "name": "coal" }, "count": 2 }]
//!     }]
//! }"#).unwrap();
//!
//! let gauges = aggregate(&reference, &samples);
//! let lines = gauges.iter().map(|g| Flavor::Vanilla.format(g));
//! let packets = pack(lines, 1432);
//! assert_eq!(packets, vec![b"my_metric;base=alpha;signal_type=item;signal_name=coal:2|g".to_vec()]);
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod forward;
pub mod source;
pub mod statsd;

// Re-export main types for convenience
pub use config::{Settings, StatsdSettings};
pub use data::{aggregate, normalize, parse_tags, Gauge, Tag};
pub use error::ForwardError;
pub use forward::{CycleOutcome, Forwarder, PollIntervals};
pub use source::{
    AbsentSignals, EntitySample, EntitySettings, ReferenceData, ReferenceDataCache,
    SampleIngester, SamplesSnapshot, SignalCount, SignalId, SourcePaths,
};
pub use statsd::{pack, Flavor, PacketSink, UdpSink, DEFAULT_MAX_PACKET_SIZE};
