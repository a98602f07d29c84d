//! The polling loop that drives the pipeline.
//!
//! Each cycle walks the same states:
//!
//! ```text
//! WaitForReferenceData ──(file absent)──▶ sleep reference_wait
//!        │
//!        ▼
//! LoadReferenceData (cache, reload on newer mtime)
//!        │
//!        ▼
//! WaitForSamples ──(file absent)──▶ sleep sample_wait
//!        │
//!        ▼
//! IngestAndProcess: take → aggregate → format → pack → send
//!
//! any error ──▶ log, sleep error_cooldown, start over
//! ```

use std::time::Duration;

use tracing::{error, info, trace};

use crate::data::aggregate;
use crate::error::ForwardError;
use crate::source::{ReferenceDataCache, SampleIngester, SourcePaths};
use crate::statsd::{pack, Flavor, PacketSink};

/// Sleep durations for the wait and error states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollIntervals {
    /// Wait while the reference data file does not exist.
    pub reference_wait: Duration,
    /// Wait while no samples file is present.
    pub sample_wait: Duration,
    /// Cooldown after a failed cycle.
    pub error_cooldown: Duration,
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            reference_wait: Duration::from_secs(1),
            sample_wait: Duration::from_millis(100),
            error_cooldown: Duration::from_secs(1),
        }
    }
}

/// What a single successful cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The reference data file does not exist yet.
    WaitingForReferenceData,
    /// Reference data is loaded but no samples file is waiting.
    WaitingForSamples,
    /// A samples file was consumed and its gauges sent.
    Forwarded { gauges: usize, packets: usize },
}

impl CycleOutcome {
    /// How long to sleep before the next cycle, if at all.
    pub fn delay(&self, intervals: &PollIntervals) -> Option<Duration> {
        match self {
            CycleOutcome::WaitingForReferenceData => Some(intervals.reference_wait),
            CycleOutcome::WaitingForSamples => Some(intervals.sample_wait),
            CycleOutcome::Forwarded { .. } => None,
        }
    }
}

/// Moves samples from the script-output directory to statsd.
///
/// Owns the reference data cache and the transport for its whole life.
#[derive(Debug)]
pub struct Forwarder<S: PacketSink> {
    reference: ReferenceDataCache,
    samples: SampleIngester,
    flavor: Flavor,
    max_packet_size: usize,
    sink: S,
    intervals: PollIntervals,
}

impl<S: PacketSink> Forwarder<S> {
    pub fn new(paths: SourcePaths, flavor: Flavor, max_packet_size: usize, sink: S) -> Self {
        Self {
            reference: ReferenceDataCache::new(paths.reference),
            samples: SampleIngester::new(paths.samples),
            flavor,
            max_packet_size,
            sink,
            intervals: PollIntervals::default(),
        }
    }

    /// Override the wait and cooldown durations.
    pub fn with_intervals(mut self, intervals: PollIntervals) -> Self {
        self.intervals = intervals;
        self
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    pub fn intervals(&self) -> &PollIntervals {
        &self.intervals
    }

    /// Returns the transport.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Run one pass through the state machine.
    ///
    /// Packets are sent in the order they were packed. If a send fails the
    /// earlier packets of this cycle have already gone out.
    pub async fn cycle(&mut self) -> Result<CycleOutcome, ForwardError> {
        let Some(reference) = self.reference.ensure_loaded()? else {
            trace!("waiting for reference data");
            return Ok(CycleOutcome::WaitingForReferenceData);
        };

        let Some(samples) = self.samples.take_if_available()? else {
            trace!(path = %self.samples.path().display(), "waiting for samples");
            return Ok(CycleOutcome::WaitingForSamples);
        };

        let gauges = aggregate(reference, &samples);
        let lines = gauges.iter().map(|g| self.flavor.format(g));
        let packets = pack(lines, self.max_packet_size);

        let total = packets.len();
        for (i, packet) in packets.iter().enumerate() {
            if let Err(source) = self.sink.send(packet).await {
                return Err(ForwardError::Send {
                    index: i + 1,
                    total,
                    target: self.sink.description().to_string(),
                    source,
                });
            }
        }

        if total > 0 {
            info!(
                packets = total,
                gauges = gauges.len(),
                sink = self.sink.description(),
                "sent {} packets to statsd",
                total
            );
        }

        Ok(CycleOutcome::Forwarded {
            gauges: gauges.len(),
            packets: total,
        })
    }

    /// Poll forever.
    ///
    /// Errors never escape: each one is logged, followed by the error
    /// cooldown, and the next cycle starts from the reference data check.
    pub async fn run(&mut self) {
        loop {
            let delay = match self.cycle().await {
                Ok(outcome) => outcome.delay(&self.intervals),
                Err(err) => {
                    error!(error = %err, "forwarder cycle failed");
                    Some(self.intervals.error_cooldown)
                }
            };

            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
        }
    }
}
