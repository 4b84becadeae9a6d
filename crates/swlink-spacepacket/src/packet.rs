use bytes::BufMut;

use crate::error::{Result, SpacePacketError};
use crate::header::{PrimaryHeader, PRIMARY_HEADER_SIZE};

/// Largest data field the 16-bit length field can describe.
pub const MAX_DATA_FIELD: usize = u16::MAX as usize + 1;

/// A space packet with borrowed secondary header and user data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpacePacket<'a> {
    pub header: PrimaryHeader,
    /// Mission-defined secondary header. Must be non-empty exactly when
    /// `header.secondary_header` is set.
    pub secondary_header: &'a [u8],
    pub user_data: &'a [u8],
}

impl<'a> SpacePacket<'a> {
    /// Default fields: version 0, telemetry, no secondary header, APID 0,
    /// unsegmented, sequence count 0, no data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Telemetry packet for `apid` carrying `user_data`.
    pub fn telemetry(apid: u16, user_data: &'a [u8]) -> Self {
        Self {
            header: PrimaryHeader {
                apid,
                ..PrimaryHeader::default()
            },
            secondary_header: &[],
            user_data,
        }
    }

    /// Length of the data field (secondary header + user data).
    pub fn data_field_len(&self) -> usize {
        self.secondary_header.len() + self.user_data.len()
    }

    /// Total serialized size, valid or not.
    pub fn serialized_size(&self) -> usize {
        PRIMARY_HEADER_SIZE + self.data_field_len()
    }

    fn header_bytes(&self) -> Result<[u8; PRIMARY_HEADER_SIZE]> {
        match (self.header.secondary_header, self.secondary_header.is_empty()) {
            (true, true) => return Err(SpacePacketError::MissingSecondaryHeader),
            (false, false) => return Err(SpacePacketError::UnexpectedSecondaryHeader),
            _ => {}
        }
        let data_field_len = self.data_field_len();
        if data_field_len > MAX_DATA_FIELD {
            return Err(SpacePacketError::DataFieldTooLarge {
                size: data_field_len,
                max: MAX_DATA_FIELD,
            });
        }
        self.header.to_bytes(data_field_len)
    }

    /// Serialize into `buf`, returning the number of bytes written.
    /// Nothing is written on failure.
    pub fn serialize(&self, buf: &mut [u8]) -> Result<usize> {
        let header = self.header_bytes()?;
        let needed = self.serialized_size();
        if buf.len() < needed {
            return Err(SpacePacketError::BufferTooSmall {
                needed,
                available: buf.len(),
            });
        }

        let sec_end = PRIMARY_HEADER_SIZE + self.secondary_header.len();
        buf[..PRIMARY_HEADER_SIZE].copy_from_slice(&header);
        buf[PRIMARY_HEADER_SIZE..sec_end].copy_from_slice(self.secondary_header);
        buf[sec_end..needed].copy_from_slice(self.user_data);
        Ok(needed)
    }

    /// Append the serialized packet to a growable buffer.
    pub fn serialize_to<B: BufMut>(&self, dst: &mut B) -> Result<usize> {
        let header = self.header_bytes()?;
        let needed = self.serialized_size();
        if dst.remaining_mut() < needed {
            return Err(SpacePacketError::BufferTooSmall {
                needed,
                available: dst.remaining_mut(),
            });
        }
        dst.put_slice(&header);
        dst.put_slice(self.secondary_header);
        dst.put_slice(self.user_data);
        Ok(needed)
    }

    /// Parse a packet that fills `buf` exactly. The whole data field is
    /// returned as user data.
    pub fn parse(buf: &'a [u8]) -> Result<Self> {
        Self::parse_with_secondary_header(buf, 0)
    }

    /// Parse a packet whose secondary header, when flagged, is
    /// `secondary_header_len` bytes long.
    pub fn parse_with_secondary_header(buf: &'a [u8], secondary_header_len: usize) -> Result<Self> {
        let Some(header_bytes) = buf.first_chunk::<PRIMARY_HEADER_SIZE>() else {
            return Err(SpacePacketError::Truncated {
                len: buf.len(),
                needed: PRIMARY_HEADER_SIZE,
            });
        };
        let (header, data_field_len) = PrimaryHeader::from_bytes(header_bytes);

        let declared = PRIMARY_HEADER_SIZE + data_field_len;
        if buf.len() < declared {
            return Err(SpacePacketError::Truncated {
                len: buf.len(),
                needed: declared,
            });
        }
        if buf.len() > declared {
            return Err(SpacePacketError::LengthMismatch {
                declared,
                actual: buf.len(),
            });
        }

        let data_field = &buf[PRIMARY_HEADER_SIZE..];
        let sec_len = if header.secondary_header {
            secondary_header_len
        } else {
            0
        };
        if sec_len > data_field.len() {
            return Err(SpacePacketError::SecondaryHeaderTooLong {
                len: sec_len,
                data_field: data_field.len(),
            });
        }
        let (secondary_header, user_data) = data_field.split_at(sec_len);

        Ok(Self {
            header,
            secondary_header,
            user_data,
        })
    }
}
