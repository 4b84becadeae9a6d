use std::fmt;
use std::path::PathBuf;

use crate::link::LinkState;

/// Why a frame could not be given an egress port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissReason {
    /// The target address is beyond the routing table.
    AddressOutOfRange,
    /// No route has been installed for the target address.
    NoRoute,
    /// The installed route points past the active port count.
    PortOutOfRange(u8),
    /// The egress link exists but is not connected.
    LinkDown { port: u8, state: LinkState },
}

impl fmt::Display for MissReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissReason::AddressOutOfRange => f.write_str("address outside routing table"),
            MissReason::NoRoute => f.write_str("no route installed"),
            MissReason::PortOutOfRange(port) => write!(f, "route points to inactive port {port}"),
            MissReason::LinkDown { port, state } => write!(f, "link on port {port} is {state}"),
        }
    }
}

/// Errors that can occur in router operations.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    /// No connected egress port exists for the destination.
    #[error("no route to {target:#04x}: {reason}")]
    RoutingMiss { target: u8, reason: MissReason },

    /// A port index beyond the active port count was supplied.
    #[error("port {port} out of range ({num_ports} active ports)")]
    PortOutOfRange { port: u8, num_ports: u8 },

    /// A virtual channel id beyond the channel table was supplied.
    #[error("virtual channel {0} out of range")]
    ChannelOutOfRange(u8),

    /// The router configuration file could not be read.
    #[error("failed to load router config from {path}: {source}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The router configuration is not valid JSON for [`crate::RouterConfig`].
    #[error("invalid router config: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

impl RouterError {
    /// True for the expected steady-state outcome of an unconfigured or
    /// disconnected destination.
    pub fn is_routing_miss(&self) -> bool {
        matches!(self, RouterError::RoutingMiss { .. })
    }
}

pub type Result<T> = std::result::Result<T, RouterError>;
