//! Transport for finished packets.

use std::fmt::Debug;
use std::io;

use async_trait::async_trait;
use tokio::net::UdpSocket;

/// Destination for statsd packets.
///
/// Implementations deliver one datagram per call. Delivery is fire and
/// forget: an `Ok` only means the packet was handed off.
#[async_trait]
pub trait PacketSink: Send + Debug {
    /// Send one packet.
    async fn send(&mut self, packet: &[u8]) -> io::Result<()>;

    /// Returns a human-readable description of the destination.
    ///
    /// Used in log lines and errors.
    fn description(&self) -> &str;
}

/// Sends packets to a statsd server over UDP.
///
/// The socket is bound once to an ephemeral local port. The host is
/// resolved on every send, so a name that stops resolving fails that send
/// rather than the whole forwarder.
#[derive(Debug)]
pub struct UdpSink {
    socket: UdpSocket,
    host: String,
    port: u16,
    description: String,
}

impl UdpSink {
    /// Bind a local socket for sending to `host:port`.
    pub async fn bind(host: impl Into<String>, port: u16) -> io::Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0").await?;
        let host = host.into();
        let description = format!("udp: {}:{}", host, port);
        Ok(Self {
            socket,
            host,
            port,
            description,
        })
    }

    /// Get the local address.
    pub fn local_addr(&self) -> io::Result<std::net::SocketAddr> {
        self.socket.local_addr()
    }
}

#[async_trait]
impl PacketSink for UdpSink {
    async fn send(&mut self, packet: &[u8]) -> io::Result<()> {
        self.socket
            .send_to(packet, (self.host.as_str(), self.port))
            .await?;
        Ok(())
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_udp_sink_delivers_packet() {
        let receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = receiver.local_addr().unwrap().port();

        let mut sink = UdpSink::bind("127.0.0.1", port).await.unwrap();
        assert_eq!(sink.description(), format!("udp: 127.0.0.1:{}", port));

        sink.send(b"my_metric:2|g").await.unwrap();

        let mut buf = [0u8; 64];
        let (len, _) = tokio::time::timeout(Duration::from_secs(5), receiver.recv_from(&mut buf))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(&buf[..len], b"my_metric:2|g");
    }
}
