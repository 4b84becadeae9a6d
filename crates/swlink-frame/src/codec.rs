use bytes::{BufMut, BytesMut};

use crate::crc::{crc16, Crc16};
use crate::error::{FrameError, Result};
use crate::protocol::PROTOCOL_PACKET;

/// Frame header: target address (1) + protocol id (1) = 2 bytes.
pub const HEADER_SIZE: usize = 2;

/// CRC trailer size.
pub const CRC_SIZE: usize = 2;

/// Smallest valid frame: header + CRC with an empty payload.
pub const MIN_FRAME_SIZE: usize = HEADER_SIZE + CRC_SIZE;

/// Largest payload a frame can carry.
pub const MAX_PAYLOAD: usize = u16::MAX as usize;

/// A link frame.
///
/// The payload is borrowed. A decoded frame points into the buffer it was
/// decoded from and cannot outlive it or observe later writes to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    /// Logical address of the destination node.
    pub target_addr: u8,
    /// Protocol identifier, see [`crate::protocol`].
    pub protocol_id: u8,
    /// The frame payload.
    pub payload: &'a [u8],
}

impl<'a> Frame<'a> {
    /// Create a new frame.
    pub fn new(target_addr: u8, protocol_id: u8, payload: &'a [u8]) -> Self {
        Self {
            target_addr,
            protocol_id,
            payload,
        }
    }

    /// The total wire size of this frame (header + payload + CRC).
    pub fn size(&self) -> usize {
        frame_size(self.payload.len())
    }
}

impl Default for Frame<'_> {
    fn default() -> Self {
        Self {
            target_addr: 0,
            protocol_id: PROTOCOL_PACKET,
            payload: &[],
        }
    }
}

/// Wire size of a frame carrying `payload_len` bytes.
pub const fn frame_size(payload_len: usize) -> usize {
    HEADER_SIZE + payload_len + CRC_SIZE
}

fn check_payload(len: usize) -> Result<()> {
    if len > MAX_PAYLOAD {
        return Err(FrameError::PayloadTooLarge {
            size: len,
            max: MAX_PAYLOAD,
        });
    }
    Ok(())
}

/// Encode a frame into `buf`, returning the number of bytes written.
///
/// Wire format:
/// ```text
/// ┌──────────┬─────────────┬─────────────────┬──────────────┐
/// │ Target   │ Protocol id │ Payload         │ CRC-16 (BE)  │
/// │ (1B)     │ (1B)        │ (0..=65535 B)   │ (2B)         │
/// └──────────┴─────────────┴─────────────────┴──────────────┘
/// ```
/// The CRC covers every byte before it. Nothing is written on failure.
pub fn encode_frame(frame: &Frame<'_>, buf: &mut [u8]) -> Result<usize> {
    check_payload(frame.payload.len())?;

    let needed = frame.size();
    if buf.len() < needed {
        return Err(FrameError::InsufficientBuffer {
            needed,
            available: buf.len(),
        });
    }

    let body = HEADER_SIZE + frame.payload.len();
    buf[0] = frame.target_addr;
    buf[1] = frame.protocol_id;
    buf[HEADER_SIZE..body].copy_from_slice(frame.payload);

    let crc = crc16(&buf[..body]);
    buf[body..needed].copy_from_slice(&crc.to_be_bytes());

    tracing::trace!(
        target_addr = frame.target_addr,
        protocol_id = frame.protocol_id,
        len = needed,
        crc,
        "frame encoded"
    );
    Ok(needed)
}

/// Append an encoded frame to a growable buffer.
pub fn encode_frame_to(frame: &Frame<'_>, dst: &mut BytesMut) -> Result<usize> {
    check_payload(frame.payload.len())?;

    let header = [frame.target_addr, frame.protocol_id];
    let mut crc = Crc16::new();
    crc.update(&header).update(frame.payload);

    dst.reserve(frame.size());
    dst.put_slice(&header);
    dst.put_slice(frame.payload);
    dst.put_u16(crc.finish());
    Ok(frame.size())
}

/// Decode and verify a frame.
///
/// The whole of `buf` is taken as one frame. On success the payload is a view
/// of `buf[2..len - 2]`.
pub fn decode_frame(buf: &[u8]) -> Result<Frame<'_>> {
    if buf.len() < MIN_FRAME_SIZE {
        return Err(FrameError::MalformedFrame { len: buf.len() });
    }

    let body = buf.len() - CRC_SIZE;
    check_payload(body - HEADER_SIZE)?;

    let received = u16::from_be_bytes([buf[body], buf[body + 1]]);
    let computed = crc16(&buf[..body]);
    if received != computed {
        tracing::debug!(
            len = buf.len(),
            received,
            computed,
            "frame checksum mismatch"
        );
        return Err(FrameError::ChecksumMismatch { received, computed });
    }

    Ok(Frame {
        target_addr: buf[0],
        protocol_id: buf[1],
        payload: &buf[HEADER_SIZE..body],
    })
}
