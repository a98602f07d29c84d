//! Signal aggregation.
//!
//! This module turns a samples file, together with the cached reference
//! data, into the list of gauges to forward.
//!
//! ## Submodules
//!
//! - [`gauge`]: The [`Gauge`] and [`Tag`] models and tag-string parsing
//! - [`normalize`]: Metric name normalization
//! - [`aggregate`]: Merging red/green signals and synthesizing zero gauges
//!
//! ## Data Flow
//!
//! ```text
//! SamplesSnapshot (raw JSON)  +  ReferenceData (cached)
//!        │
//!        ▼
//! aggregate()
//!        │
//!        ├──▶ normalize(entity name)
//!        ├──▶ parse_tags(entity tags)
//!        │
//!        └──▶ Vec<Gauge>
//! ```

pub mod aggregate;
pub mod gauge;
pub mod normalize;

pub use aggregate::aggregate;
pub use gauge::{parse_tags, Gauge, Tag};
pub use normalize::{normalize, MAX_NAME_LEN};
