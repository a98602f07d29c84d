//! Statsd output: line formats, packet batching and transport.

mod flavor;
mod packet;
mod sink;

pub use flavor::Flavor;
pub use packet::{pack, DEFAULT_MAX_PACKET_SIZE};
pub use sink::{PacketSink, UdpSink};
