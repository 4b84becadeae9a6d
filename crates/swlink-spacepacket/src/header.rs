use crate::error::{Result, SpacePacketError};

/// Primary header: 3 big-endian 16-bit words.
pub const PRIMARY_HEADER_SIZE: usize = 6;

pub const MAX_VERSION: u8 = 0x07;
pub const MAX_APID: u16 = 0x07FF;
pub const MAX_SEQUENCE_COUNT: u16 = 0x3FFF;

/// Packet type bit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PacketType {
    #[default]
    Telemetry,
    Telecommand,
}

impl PacketType {
    pub fn as_str(self) -> &'static str {
        match self {
            PacketType::Telemetry => "telemetry",
            PacketType::Telecommand => "telecommand",
        }
    }

    fn bit(self) -> u16 {
        match self {
            PacketType::Telemetry => 0,
            PacketType::Telecommand => 1,
        }
    }
}

/// Segmentation of user data across packets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SequenceFlags {
    Continuation,
    First,
    Last,
    #[default]
    Unsegmented,
}

impl SequenceFlags {
    pub fn as_str(self) -> &'static str {
        match self {
            SequenceFlags::Continuation => "continuation",
            SequenceFlags::First => "first",
            SequenceFlags::Last => "last",
            SequenceFlags::Unsegmented => "unsegmented",
        }
    }

    fn bits(self) -> u16 {
        match self {
            SequenceFlags::Continuation => 0b00,
            SequenceFlags::First => 0b01,
            SequenceFlags::Last => 0b10,
            SequenceFlags::Unsegmented => 0b11,
        }
    }

    fn from_bits(bits: u16) -> Self {
        match bits & 0b11 {
            0b00 => SequenceFlags::Continuation,
            0b01 => SequenceFlags::First,
            0b10 => SequenceFlags::Last,
            _ => SequenceFlags::Unsegmented,
        }
    }
}

/// Decoded primary header, without the length field.
///
/// The data length is derived from the data field when serializing and
/// returned separately when parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PrimaryHeader {
    pub version: u8,
    pub packet_type: PacketType,
    pub secondary_header: bool,
    pub apid: u16,
    pub sequence_flags: SequenceFlags,
    pub sequence_count: u16,
}

impl PrimaryHeader {
    /// Check every field against its bit width.
    pub fn validate(&self) -> Result<()> {
        if self.version > MAX_VERSION {
            return Err(SpacePacketError::VersionOutOfRange(self.version));
        }
        if self.apid > MAX_APID {
            return Err(SpacePacketError::ApidOutOfRange(self.apid));
        }
        if self.sequence_count > MAX_SEQUENCE_COUNT {
            return Err(SpacePacketError::SequenceCountOutOfRange(
                self.sequence_count,
            ));
        }
        Ok(())
    }

    /// Pack the header for a data field of `data_field_len` bytes (1..=65536).
    pub fn to_bytes(&self, data_field_len: usize) -> Result<[u8; PRIMARY_HEADER_SIZE]> {
        self.validate()?;
        let length_field = data_field_len
            .checked_sub(1)
            .ok_or(SpacePacketError::EmptyDataField)?;
        let length_field =
            u16::try_from(length_field).map_err(|_| SpacePacketError::DataFieldTooLarge {
                size: data_field_len,
                max: usize::from(u16::MAX) + 1,
            })?;

        let word0 = (u16::from(self.version) << 13)
            | (self.packet_type.bit() << 12)
            | (u16::from(self.secondary_header) << 11)
            | self.apid;
        let word1 = (self.sequence_flags.bits() << 14) | self.sequence_count;

        let mut out = [0u8; PRIMARY_HEADER_SIZE];
        out[0..2].copy_from_slice(&word0.to_be_bytes());
        out[2..4].copy_from_slice(&word1.to_be_bytes());
        out[4..6].copy_from_slice(&length_field.to_be_bytes());
        Ok(out)
    }

    /// Unpack a header, returning it with the declared data field length.
    pub fn from_bytes(bytes: &[u8; PRIMARY_HEADER_SIZE]) -> (Self, usize) {
        let word0 = u16::from_be_bytes([bytes[0], bytes[1]]);
        let word1 = u16::from_be_bytes([bytes[2], bytes[3]]);
        let length_field = u16::from_be_bytes([bytes[4], bytes[5]]);

        let header = Self {
            version: (word0 >> 13) as u8,
            packet_type: if word0 & 0x1000 != 0 {
                PacketType::Telecommand
            } else {
                PacketType::Telemetry
            },
            secondary_header: word0 & 0x0800 != 0,
            apid: word0 & MAX_APID,
            sequence_flags: SequenceFlags::from_bits(word1 >> 14),
            sequence_count: word1 & MAX_SEQUENCE_COUNT,
        };
        (header, usize::from(length_field) + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Primary header captured from a spacecraft instrument stream.
    const CAPTURED: [u8; 6] = [0x0d, 0x59, 0xd2, 0xab, 0x0a, 0x8f];

    #[test]
    fn decode_captured_header() {
        let (header, data_len) = PrimaryHeader::from_bytes(&CAPTURED);
        assert_eq!(header.version, 0);
        assert_eq!(header.packet_type, PacketType::Telemetry);
        assert!(header.secondary_header);
        assert_eq!(header.apid, 1369);
        assert_eq!(header.sequence_flags, SequenceFlags::Unsegmented);
        assert_eq!(header.sequence_count, 4779);
        assert_eq!(data_len, 2704);
    }

    #[test]
    fn encode_captured_header() {
        let (header, data_len) = PrimaryHeader::from_bytes(&CAPTURED);
        assert_eq!(header.to_bytes(data_len).unwrap(), CAPTURED);
    }

    #[test]
    fn telecommand_bit() {
        let header = PrimaryHeader {
            packet_type: PacketType::Telecommand,
            apid: 0x42,
            ..PrimaryHeader::default()
        };
        let bytes = header.to_bytes(1).unwrap();
        assert_eq!(bytes, [0x10, 0x42, 0xC0, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn field_ranges_are_checked() {
        let header = PrimaryHeader {
            apid: 0x0800,
            ..PrimaryHeader::default()
        };
        assert_eq!(
            header.to_bytes(1),
            Err(SpacePacketError::ApidOutOfRange(0x0800))
        );

        let header = PrimaryHeader {
            sequence_count: 0x4000,
            ..PrimaryHeader::default()
        };
        assert_eq!(
            header.validate(),
            Err(SpacePacketError::SequenceCountOutOfRange(0x4000))
        );

        let header = PrimaryHeader {
            version: 8,
            ..PrimaryHeader::default()
        };
        assert_eq!(header.validate(), Err(SpacePacketError::VersionOutOfRange(8)));
    }

    #[test]
    fn data_field_length_bounds() {
        let header = PrimaryHeader::default();
        assert_eq!(header.to_bytes(0), Err(SpacePacketError::EmptyDataField));
        assert!(header.to_bytes(65_536).is_ok());
        assert!(matches!(
            header.to_bytes(65_537),
            Err(SpacePacketError::DataFieldTooLarge { .. })
        ));
    }
}
