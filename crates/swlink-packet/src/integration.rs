use bytes::BytesMut;
use swlink_frame::{decode_frame, encode_frame, encode_frame_to, Frame, FrameError, MAX_PAYLOAD};
use swlink_spacepacket::SpacePacket;

use crate::config::PacketConfig;
use crate::error::{PacketError, Result};
use crate::stats::Statistics;

/// A space packet addressed for transport in one frame.
///
/// A decoded `PacketFrame` borrows the packet's secondary header and user
/// data from the received buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketFrame<'a> {
    pub target_addr: u8,
    pub protocol_id: u8,
    pub packet: SpacePacket<'a>,
}

impl<'a> PacketFrame<'a> {
    /// Addressing from `config` and a default telemetry packet with APID 0.
    pub fn new(config: &PacketConfig) -> Self {
        Self {
            target_addr: config.target_addr,
            protocol_id: config.protocol_id,
            packet: SpacePacket::new(),
        }
    }

    /// Serialize the packet into a frame payload.
    fn packet_bytes(&self) -> Result<BytesMut> {
        let size = self.packet.serialized_size();
        if size == 0 || size > MAX_PAYLOAD {
            return Err(PacketError::EncodingOverflow {
                size,
                max: MAX_PAYLOAD,
            });
        }
        let mut scratch = BytesMut::with_capacity(size);
        self.packet.serialize_to(&mut scratch)?;
        Ok(scratch)
    }

    /// Encode into `buf`, returning the frame length.
    pub fn encode(&self, buf: &mut [u8], stats: &Statistics) -> Result<usize> {
        let payload = self.packet_bytes()?;
        let frame = Frame::new(self.target_addr, self.protocol_id, &payload);
        let written = encode_frame(&frame, buf)?;

        stats.record_sent(written);
        tracing::trace!(
            target_addr = self.target_addr,
            apid = self.packet.header.apid,
            len = written,
            "packet encoded"
        );
        Ok(written)
    }

    /// Append the encoded frame to `dst`, returning the frame length.
    pub fn encode_to(&self, dst: &mut BytesMut, stats: &Statistics) -> Result<usize> {
        let payload = self.packet_bytes()?;
        let frame = Frame::new(self.target_addr, self.protocol_id, &payload);
        let written = encode_frame_to(&frame, dst)?;

        stats.record_sent(written);
        Ok(written)
    }

    /// Decode a frame and parse its payload as a space packet. The whole
    /// data field is returned as user data.
    pub fn decode(buf: &'a [u8], stats: &Statistics) -> Result<Self> {
        Self::decode_with_secondary_header(buf, 0, stats)
    }

    /// Like [`PacketFrame::decode`], splitting off a secondary header of
    /// `secondary_header_len` bytes when the packet flags one.
    pub fn decode_with_secondary_header(
        buf: &'a [u8],
        secondary_header_len: usize,
        stats: &Statistics,
    ) -> Result<Self> {
        let frame = decode_frame(buf).inspect_err(|err| match err {
            FrameError::ChecksumMismatch { .. } => stats.record_crc_error(),
            _ => stats.record_frame_error(),
        })?;

        let packet = SpacePacket::parse_with_secondary_header(frame.payload, secondary_header_len)
            .inspect_err(|err| {
                stats.record_frame_error();
                tracing::debug!(
                    target_addr = frame.target_addr,
                    len = frame.payload.len(),
                    error = %err,
                    "frame payload is not a space packet"
                );
            })?;

        stats.record_received(buf.len());
        Ok(Self {
            target_addr: frame.target_addr,
            protocol_id: frame.protocol_id,
            packet,
        })
    }
}

/// Build and encode a telemetry packet for `apid` in one call.
pub fn create_packet(
    device_addr: u8,
    target_addr: u8,
    apid: u16,
    payload: &[u8],
    buf: &mut [u8],
    stats: &Statistics,
) -> Result<usize> {
    let config = PacketConfig::new(device_addr, target_addr);
    let mut pf = PacketFrame::new(&config);
    pf.packet.header.apid = apid;
    pf.packet.user_data = payload;

    tracing::trace!(device_addr, target_addr, apid, "creating packet");
    pf.encode(buf, stats)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use swlink_frame::{MIN_FRAME_SIZE, PROTOCOL_PACKET};
    use swlink_spacepacket::{PacketType, SpacePacketError, PRIMARY_HEADER_SIZE};

    use super::*;
    use crate::stats::StatisticsSnapshot;

    #[test]
    fn init_uses_config_and_packet_defaults() {
        let cfg = PacketConfig {
            device_addr: 1,
            target_addr: 9,
            protocol_id: 2,
            enable_crc: true,
        };
        let pf = PacketFrame::new(&cfg);
        assert_eq!(pf.target_addr, 9);
        assert_eq!(pf.protocol_id, 2);
        assert_eq!(pf.packet.header.version, 0);
        assert_eq!(pf.packet.header.packet_type, PacketType::Telemetry);
        assert!(!pf.packet.header.secondary_header);
        assert_eq!(pf.packet.header.apid, 0);
    }

    #[test]
    fn encode_then_decode_updates_statistics() {
        let stats = Statistics::new();
        let mut buf = [0u8; 128];
        let written = create_packet(0x01, 0x02, 0x0100, b"Test payload", &mut buf, &stats).unwrap();
        assert_eq!(written, MIN_FRAME_SIZE + PRIMARY_HEADER_SIZE + 12);

        let decoded = PacketFrame::decode(&buf[..written], &stats).unwrap();
        assert_eq!(decoded.target_addr, 0x02);
        assert_eq!(decoded.protocol_id, PROTOCOL_PACKET);
        assert_eq!(decoded.packet.header.apid, 0x0100);
        assert_eq!(decoded.packet.user_data, b"Test payload");

        let snap = stats.snapshot();
        assert_eq!(snap.packets_sent, 1);
        assert_eq!(snap.packets_received, 1);
        assert_eq!(snap.bytes_sent, written as u64);
        assert_eq!(snap.bytes_received, written as u64);
        assert_eq!(snap.crc_errors, 0);

        stats.reset();
        assert_eq!(stats.snapshot(), StatisticsSnapshot::default());
    }

    #[test]
    fn bytes_received_counts_whole_buffer() {
        let stats = Statistics::new();
        let mut buf = [0u8; 64];
        let written = create_packet(0, 3, 7, b"abc", &mut buf, &stats).unwrap();

        PacketFrame::decode(&buf[..written], &stats).unwrap();
        assert!(stats.snapshot().bytes_received > (PRIMARY_HEADER_SIZE + 3) as u64);
    }

    #[test]
    fn encode_to_matches_encode() {
        let stats = Statistics::new();
        let mut pf = PacketFrame::new(&PacketConfig::new(0, 4));
        pf.packet.header.apid = 0x33;
        pf.packet.user_data = &[1, 2, 3];

        let mut buf = [0u8; 64];
        let written = pf.encode(&mut buf, &stats).unwrap();
        let mut dst = BytesMut::new();
        pf.encode_to(&mut dst, &stats).unwrap();

        assert_eq!(dst.as_ref(), &buf[..written]);
        assert_eq!(stats.snapshot().packets_sent, 2);
    }

    #[test]
    fn overflow_is_rejected_before_framing() {
        let stats = Statistics::new();
        let payload = vec![0u8; MAX_PAYLOAD - PRIMARY_HEADER_SIZE + 1];
        let mut buf = vec![0u8; MAX_PAYLOAD + 16];

        let err = create_packet(0, 1, 1, &payload, &mut buf, &stats).unwrap_err();
        assert_eq!(
            err,
            PacketError::EncodingOverflow {
                size: MAX_PAYLOAD + 1,
                max: MAX_PAYLOAD
            }
        );
        assert_eq!(stats.snapshot(), StatisticsSnapshot::default());
    }

    #[test]
    fn codec_failures_are_forwarded() {
        let stats = Statistics::new();
        let mut buf = [0u8; 64];

        let err = create_packet(0, 1, 1, b"", &mut buf, &stats).unwrap_err();
        assert_eq!(err, PacketError::Packet(SpacePacketError::EmptyDataField));

        let err = create_packet(0, 1, 0x0800, b"x", &mut buf, &stats).unwrap_err();
        assert_eq!(
            err,
            PacketError::Packet(SpacePacketError::ApidOutOfRange(0x0800))
        );

        let mut small = [0u8; 8];
        let err = create_packet(0, 1, 1, b"hello", &mut small, &stats).unwrap_err();
        assert!(matches!(
            err,
            PacketError::Frame(FrameError::InsufficientBuffer { .. })
        ));
        assert_eq!(stats.snapshot().packets_sent, 0);
    }

    #[test]
    fn corrupted_frame_counts_crc_error() {
        let stats = Statistics::new();
        let mut buf = [0u8; 64];
        let written = create_packet(0, 2, 5, b"data", &mut buf, &stats).unwrap();
        buf[5] ^= 0x10;

        let err = PacketFrame::decode(&buf[..written], &stats).unwrap_err();
        assert!(err.is_line_error());
        let snap = stats.snapshot();
        assert_eq!(snap.crc_errors, 1);
        assert_eq!(snap.packets_received, 0);
        assert_eq!(snap.bytes_received, 0);
    }

    #[test]
    fn short_frame_counts_frame_error() {
        let stats = Statistics::new();
        let err = PacketFrame::decode(&[0x01, 0x02, 0x03], &stats).unwrap_err();
        assert_eq!(err, PacketError::Frame(FrameError::MalformedFrame { len: 3 }));
        assert_eq!(stats.snapshot().frame_errors, 1);
    }

    #[test]
    fn bad_packet_in_good_frame_counts_frame_error() {
        let stats = Statistics::new();
        let frame = Frame::new(2, PROTOCOL_PACKET, &[0xAA, 0xBB, 0xCC]);
        let mut buf = [0u8; 16];
        let written = encode_frame(&frame, &mut buf).unwrap();

        let err = PacketFrame::decode(&buf[..written], &stats).unwrap_err();
        assert!(matches!(
            err,
            PacketError::Packet(SpacePacketError::Truncated { .. })
        ));
        assert!(!err.is_line_error());
        let snap = stats.snapshot();
        assert_eq!(snap.frame_errors, 1);
        assert_eq!(snap.packets_received, 0);
    }

    #[test]
    fn secondary_header_is_split_on_request() {
        let stats = Statistics::new();
        let mut pf = PacketFrame::new(&PacketConfig::new(0, 6));
        pf.packet.header.secondary_header = true;
        pf.packet.secondary_header = &[0x10, 0x20];
        pf.packet.user_data = b"obs";

        let mut buf = [0u8; 64];
        let written = pf.encode(&mut buf, &stats).unwrap();

        let decoded = PacketFrame::decode_with_secondary_header(&buf[..written], 2, &stats).unwrap();
        assert_eq!(decoded, pf);
    }

    proptest! {
        #[test]
        fn roundtrip_through_frame(
            target in any::<u8>(),
            apid in 0u16..=0x07FF,
            payload in proptest::collection::vec(any::<u8>(), 1..1024),
        ) {
            let stats = Statistics::new();
            let mut buf = vec![0u8; payload.len() + 16];
            let written = create_packet(0, target, apid, &payload, &mut buf, &stats).unwrap();

            let decoded = PacketFrame::decode(&buf[..written], &stats).unwrap();
            prop_assert_eq!(decoded.target_addr, target);
            prop_assert_eq!(decoded.packet.header.apid, apid);
            prop_assert_eq!(decoded.packet.user_data, &payload[..]);

            let snap = stats.snapshot();
            prop_assert_eq!(snap.packets_sent, 1);
            prop_assert_eq!(snap.packets_received, 1);
        }
    }
}
