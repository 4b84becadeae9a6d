//! CCSDS Space Packet codec (CCSDS 133.0-B).
//!
//! This is the application-packet format carried inside swlink frames with
//! protocol id 1. A packet is a 6-byte big-endian primary header followed by
//! a data field made of an optional secondary header and the user data.
//!
//! Parsed packets borrow their secondary header and user data from the input.

pub mod error;
pub mod header;
pub mod packet;

pub use error::{Result, SpacePacketError};
pub use header::{
    PacketType, PrimaryHeader, SequenceFlags, MAX_APID, MAX_SEQUENCE_COUNT, MAX_VERSION,
    PRIMARY_HEADER_SIZE,
};
pub use packet::{SpacePacket, MAX_DATA_FIELD};
