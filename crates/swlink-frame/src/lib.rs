//! Character and frame layer of the swlink stack.
//!
//! This is the lowest layer of swlink. It covers:
//! - 9-bit characters (8 data bits + even parity) and the four reserved control markers
//! - CRC-16-CCITT (polynomial 0x1021, initial value 0xFFFF), table driven
//! - Link frames: target address, protocol id, payload and a big-endian CRC trailer
//!
//! Everything is synchronous and allocation free unless a growable
//! [`bytes::BytesMut`] destination is used explicitly.

pub mod character;
pub mod codec;
pub mod crc;
pub mod error;
pub mod protocol;

pub use character::{
    decode_char, encode_char, even_parity, Character, ControlCode, EncodedChar, EEP, EOP, ESC, FCT,
};
pub use codec::{
    decode_frame, encode_frame, encode_frame_to, frame_size, Frame, CRC_SIZE, HEADER_SIZE,
    MAX_PAYLOAD, MIN_FRAME_SIZE,
};
pub use crc::{crc16, crc16_with_init, Crc16, CRC16_INIT, CRC16_POLY, CRC16_TABLE};
pub use error::{CharError, FrameError, Result};
pub use protocol::{is_assigned, protocol_name, PROTOCOL_PACKET, PROTOCOL_RAW};
