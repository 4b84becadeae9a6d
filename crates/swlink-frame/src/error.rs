/// Errors that can occur while decoding a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CharError {
    /// The received parity bit does not match the even parity of the byte.
    #[error("parity error on byte {byte:#04x} (received parity {parity})")]
    Parity { byte: u8, parity: u8 },

    /// The parity argument is not a single bit.
    #[error("invalid parity bit value {0} (expected 0 or 1)")]
    InvalidParityBit(u8),
}

/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// The destination buffer cannot hold the serialized frame.
    #[error("buffer too small for frame ({needed} bytes needed, {available} available)")]
    InsufficientBuffer { needed: usize, available: usize },

    /// The input is shorter than header + CRC.
    #[error("malformed frame ({len} bytes, minimum 4)")]
    MalformedFrame { len: usize },

    /// The CRC trailer does not match the frame contents.
    #[error("checksum mismatch (frame carries {received:#06x}, computed {computed:#06x})")]
    ChecksumMismatch { received: u16, computed: u16 },

    /// The payload exceeds what a 16-bit payload length can describe.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },
}

impl FrameError {
    /// True for failures caused by what arrived on the wire (noise, truncation)
    /// rather than by how the caller used the API.
    pub fn is_line_error(&self) -> bool {
        matches!(
            self,
            FrameError::ChecksumMismatch { .. } | FrameError::MalformedFrame { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_errors_are_distinguishable() {
        assert!(FrameError::ChecksumMismatch {
            received: 1,
            computed: 2
        }
        .is_line_error());
        assert!(FrameError::MalformedFrame { len: 3 }.is_line_error());
        assert!(!FrameError::InsufficientBuffer {
            needed: 8,
            available: 4
        }
        .is_line_error());
        assert!(!FrameError::PayloadTooLarge {
            size: 70_000,
            max: 65_535
        }
        .is_line_error());
    }

    #[test]
    fn display_includes_values() {
        let err = FrameError::ChecksumMismatch {
            received: 0x1234,
            computed: 0xABCD,
        };
        assert_eq!(
            err.to_string(),
            "checksum mismatch (frame carries 0x1234, computed 0xabcd)"
        );
    }
}
