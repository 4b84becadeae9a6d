use swlink_frame::FrameError;
use swlink_spacepacket::SpacePacketError;

/// Errors that can occur while moving space packets through frames.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PacketError {
    /// Frame-level error, forwarded unchanged.
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// Space packet error, forwarded unchanged.
    #[error(transparent)]
    Packet(#[from] SpacePacketError),

    /// The serialized packet does not fit in a frame payload.
    #[error("serialized packet of {size} bytes does not fit a frame payload (max {max})")]
    EncodingOverflow { size: usize, max: usize },
}

impl PacketError {
    /// True for failures caused by line noise or truncation.
    pub fn is_line_error(&self) -> bool {
        match self {
            PacketError::Frame(err) => err.is_line_error(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, PacketError>;
