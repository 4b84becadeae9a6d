use std::fmt;

use swlink_frame::{CharError, FrameError};
use swlink_packet::PacketError;
use swlink_router::RouterError;
use swlink_spacepacket::SpacePacketError;

// Exit codes follow sysexits-style numbering where one exists.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const NO_ROUTE: i32 = 66;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn char_error(context: &str, err: CharError) -> CliError {
    match err {
        CharError::Parity { .. } => CliError::new(DATA_INVALID, format!("{context}: {err}")),
        CharError::InvalidParityBit(_) => CliError::new(USAGE, format!("{context}: {err}")),
    }
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::ChecksumMismatch { .. }
        | FrameError::MalformedFrame { .. }
        | FrameError::PayloadTooLarge { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        FrameError::InsufficientBuffer { .. } => {
            CliError::new(INTERNAL, format!("{context}: {err}"))
        }
    }
}

pub fn spacepacket_error(context: &str, err: SpacePacketError) -> CliError {
    match err {
        SpacePacketError::Truncated { .. }
        | SpacePacketError::LengthMismatch { .. }
        | SpacePacketError::SecondaryHeaderTooLong { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        SpacePacketError::BufferTooSmall { .. } => {
            CliError::new(INTERNAL, format!("{context}: {err}"))
        }
        other => CliError::new(USAGE, format!("{context}: {other}")),
    }
}

pub fn packet_error(context: &str, err: PacketError) -> CliError {
    match err {
        PacketError::Frame(err) => frame_error(context, err),
        PacketError::Packet(err) => spacepacket_error(context, err),
        PacketError::EncodingOverflow { .. } => {
            CliError::new(USAGE, format!("{context}: {err}"))
        }
    }
}

pub fn router_error(context: &str, err: RouterError) -> CliError {
    match err {
        RouterError::RoutingMiss { .. } => CliError::new(NO_ROUTE, format!("{context}: {err}")),
        RouterError::ConfigLoad { .. } => CliError::new(FAILURE, format!("{context}: {err}")),
        RouterError::InvalidConfig(_) => CliError::new(DATA_INVALID, format!("{context}: {err}")),
        RouterError::PortOutOfRange { .. } | RouterError::ChannelOutOfRange(_) => {
            CliError::new(USAGE, format!("{context}: {err}"))
        }
    }
}
