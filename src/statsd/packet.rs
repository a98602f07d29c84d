//! Packs wire lines into datagrams.

/// Default datagram size limit: fits a 1500 byte MTU after IP/UDP headers
/// with room to spare.
pub const DEFAULT_MAX_PACKET_SIZE: usize = 1432;

/// Greedily pack lines into newline-joined packets of at most `max_size`.
///
/// Lines are never split. A line that is longer than `max_size` on its own
/// becomes a single oversized packet. Sizes are counted in characters, not
/// encoded bytes, so packets holding non-ASCII text can exceed `max_size`
/// bytes on the wire.
pub fn pack<I, S>(lines: I, max_size: usize) -> Vec<Vec<u8>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut packets = Vec::new();
    let mut buf = String::new();
    let mut buf_chars = 0usize;

    for line in lines {
        let line = line.as_ref();
        let line_chars = line.chars().count();

        if !buf.is_empty() && buf_chars + 1 + line_chars > max_size {
            packets.push(std::mem::take(&mut buf).into_bytes());
            buf_chars = 0;
        }
        if !buf.is_empty() {
            buf.push('\n');
            buf_chars += 1;
        }
        buf.push_str(line);
        buf_chars += line_chars;
    }

    if !buf.is_empty() {
        packets.push(buf.into_bytes());
    }
    packets
}
