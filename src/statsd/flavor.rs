//! Statsd line formats.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::{Gauge, Tag};

/// Which statsd dialect to speak.
///
/// Chosen once at startup and fixed for the life of the forwarder.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    /// Graphite-style tags appended to the name: `name;k=v;bare:1|g`.
    #[default]
    Vanilla,
    /// Datadog tag block: `name:1|g|#k:v,bare`.
    Dogstatsd,
}

impl Flavor {
    /// Render one gauge as one wire line.
    pub fn format(&self, gauge: &Gauge) -> String {
        match self {
            Flavor::Vanilla => format_vanilla(gauge),
            Flavor::Dogstatsd => format_dogstatsd(gauge),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Flavor::Vanilla => "vanilla",
            Flavor::Dogstatsd => "dogstatsd",
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn render_tag(tag: &Tag, separator: char) -> String {
    match &tag.value {
        Some(value) => format!("{}{}{}", tag.name, separator, value),
        None => tag.name.clone(),
    }
}

fn format_vanilla(gauge: &Gauge) -> String {
    let mut line = gauge.name.clone();
    for tag in &gauge.tags {
        line.push(';');
        line.push_str(&render_tag(tag, '='));
    }
    format!("{}:{}|g", line, gauge.count)
}

fn format_dogstatsd(gauge: &Gauge) -> String {
    let mut line = format!("{}:{}|g", gauge.name, gauge.count);
    if !gauge.tags.is_empty() {
        let tags: Vec<String> = gauge.tags.iter().map(|t| render_tag(t, ':')).collect();
        line.push_str("|#");
        line.push_str(&tags.join(","));
    }
    line
}
