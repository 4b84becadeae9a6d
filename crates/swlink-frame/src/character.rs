//! 9-bit character codec.
//!
//! A character is one data byte plus one parity bit. The parity bit is chosen
//! so that the nine bits together carry an even number of ones. Byte values
//! 0-3 are reserved for control markers and never decode as data.

use std::fmt;

use crate::error::CharError;

/// Escape marker.
pub const ESC: u8 = 0x00;
/// Flow control token.
pub const FCT: u8 = 0x01;
/// End of packet.
pub const EOP: u8 = 0x02;
/// End of error packet.
pub const EEP: u8 = 0x03;

/// Reserved control markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlCode {
    Escape,
    FlowControlToken,
    EndOfPacket,
    EndOfErrorPacket,
}

impl ControlCode {
    /// Classify a raw byte, returning `None` for ordinary data values.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            ESC => Some(Self::Escape),
            FCT => Some(Self::FlowControlToken),
            EOP => Some(Self::EndOfPacket),
            EEP => Some(Self::EndOfErrorPacket),
            _ => None,
        }
    }

    /// The reserved byte value of this marker.
    pub fn as_byte(self) -> u8 {
        match self {
            Self::Escape => ESC,
            Self::FlowControlToken => FCT,
            Self::EndOfPacket => EOP,
            Self::EndOfErrorPacket => EEP,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Escape => "ESC",
            Self::FlowControlToken => "FCT",
            Self::EndOfPacket => "EOP",
            Self::EndOfErrorPacket => "EEP",
        }
    }
}

impl fmt::Display for ControlCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A successfully decoded character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Character {
    /// Ordinary data byte (value 4..=255).
    Data(u8),
    /// One of the reserved markers (value 0..=3).
    Control(ControlCode),
}

impl Character {
    pub fn is_data(&self) -> bool {
        matches!(self, Character::Data(_))
    }

    /// The data byte, if this is a data character.
    pub fn data(&self) -> Option<u8> {
        match self {
            Character::Data(value) => Some(*value),
            Character::Control(_) => None,
        }
    }
}

/// A character ready for transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncodedChar {
    pub byte: u8,
    pub parity: u8,
}

/// Even parity bit for `byte`: 1 when the byte has an odd number of ones.
pub const fn even_parity(byte: u8) -> u8 {
    (byte.count_ones() & 1) as u8
}

/// Encode one data byte. The byte passes through unchanged.
pub fn encode_char(data: u8) -> EncodedChar {
    EncodedChar {
        byte: data,
        parity: even_parity(data),
    }
}

/// Decode one received character.
///
/// Parity is checked first; a marker with bad parity is still a parity error.
pub fn decode_char(byte: u8, parity: u8) -> Result<Character, CharError> {
    if parity > 1 {
        return Err(CharError::InvalidParityBit(parity));
    }
    if parity != even_parity(byte) {
        return Err(CharError::Parity { byte, parity });
    }

    Ok(match ControlCode::from_byte(byte) {
        Some(code) => Character::Control(code),
        None => Character::Data(byte),
    })
}
