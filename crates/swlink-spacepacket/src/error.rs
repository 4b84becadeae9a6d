/// Errors that can occur while serializing or parsing a space packet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpacePacketError {
    /// The version number does not fit in 3 bits.
    #[error("packet version {0} out of range (max 7)")]
    VersionOutOfRange(u8),

    /// The APID does not fit in 11 bits.
    #[error("APID {0:#06x} out of range (max 0x07ff)")]
    ApidOutOfRange(u16),

    /// The sequence count does not fit in 14 bits.
    #[error("sequence count {0} out of range (max 16383)")]
    SequenceCountOutOfRange(u16),

    /// A packet data field must hold at least one byte.
    #[error("packet data field is empty")]
    EmptyDataField,

    /// The data field exceeds what the 16-bit length field can describe.
    #[error("packet data field too large ({size} bytes, max {max})")]
    DataFieldTooLarge { size: usize, max: usize },

    /// The secondary header flag is set but no secondary header is present.
    #[error("secondary header flag set without a secondary header")]
    MissingSecondaryHeader,

    /// Secondary header bytes are present but the flag is clear.
    #[error("secondary header present but flag is clear")]
    UnexpectedSecondaryHeader,

    /// The requested secondary header is longer than the data field.
    #[error("secondary header of {len} bytes exceeds data field of {data_field} bytes")]
    SecondaryHeaderTooLong { len: usize, data_field: usize },

    /// The input ends before the packet does.
    #[error("truncated packet ({len} bytes, need {needed})")]
    Truncated { len: usize, needed: usize },

    /// The input carries bytes beyond the declared packet length.
    #[error("packet length mismatch (header declares {declared} bytes, input has {actual})")]
    LengthMismatch { declared: usize, actual: usize },

    /// The destination buffer cannot hold the serialized packet.
    #[error("buffer too small for packet ({needed} bytes needed, {available} available)")]
    BufferTooSmall { needed: usize, available: usize },
}

pub type Result<T> = std::result::Result<T, SpacePacketError>;
