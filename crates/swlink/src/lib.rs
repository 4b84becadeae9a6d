//! Link-layer transport for serial spacecraft buses.
//!
//! swlink moves CCSDS space packets across point-to-point or switched links
//! as checksummed frames, and routes decoded frames to egress ports.
//!
//! # Crate Structure
//!
//! - [`frame`]: parity-protected characters, CRC-16-CCITT and the link frame codec
//! - [`router`]: routing table, virtual channels and per-port link state
//! - [`spacepacket`]: CCSDS space packet serializer and parser
//! - [`packet`]: space packets carried in frames, with transfer statistics

/// Re-export frame types.
pub mod frame {
    pub use swlink_frame::*;
}

/// Re-export router types.
pub mod router {
    pub use swlink_router::*;
}

/// Re-export space packet types.
pub mod spacepacket {
    pub use swlink_spacepacket::*;
}

/// Re-export packet integration types.
pub mod packet {
    pub use swlink_packet::*;
}
