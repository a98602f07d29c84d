//! Wire types for the files dropped by the game.
//!
//! These match the JSON written by the factorystatsd mod into Factorio's
//! `script-output` directory. They are the common format between that
//! producer and this forwarder.

use serde::{Deserialize, Serialize};

/// Every signal name the game knows about, by category.
///
/// Written once per game load (and again whenever mods change), so it is
/// cached and only re-read when the file's modification time advances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceData {
    #[serde(default)]
    pub virtual_signal_names: Vec<String>,
    #[serde(default)]
    pub item_names: Vec<String>,
    #[serde(default)]
    pub fluid_names: Vec<String>,
}

impl ReferenceData {
    /// Signal categories in the order zero-valued gauges are synthesized.
    pub fn categories(&self) -> [(&'static str, &[String]); 3] {
        [
            ("virtual", self.virtual_signal_names.as_slice()),
            ("item", self.item_names.as_slice()),
            ("fluid", self.fluid_names.as_slice()),
        ]
    }
}

/// One samples file: the state of every monitored combinator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplesSnapshot {
    #[serde(default)]
    pub entities: Vec<EntitySample>,
}

/// Raw input for one monitored entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySample {
    pub settings: EntitySettings,
    /// Signals on the red circuit network. Absent means none.
    #[serde(default)]
    pub red_signals: Vec<SignalCount>,
    /// Signals on the green circuit network. Absent means none.
    #[serde(default)]
    pub green_signals: Vec<SignalCount>,
}

impl EntitySample {
    /// Red then green signals. The two networks are not distinguished in
    /// the output.
    pub fn signals(&self) -> impl Iterator<Item = &SignalCount> {
        self.red_signals.iter().chain(self.green_signals.iter())
    }
}

/// Per-entity settings entered in the game UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySettings {
    /// Metric name. Entities with an empty name are skipped.
    pub name: String,
    /// Comma-separated `key=value` or bare tags.
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub absent_signals: AbsentSignals,
}

/// What to do with known signals that are not present on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbsentSignals {
    #[default]
    #[serde(rename = "ignore")]
    Ignore,
    #[serde(rename = "treat-as-0")]
    TreatAsZero,
}

/// A signal and its value on one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalCount {
    pub signal: SignalId,
    pub count: i64,
}

/// Identifies a signal: its category (`virtual`, `item`, `fluid`) and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignalId {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
}
