//! Space packets over swlink frames.
//!
//! This layer ties the frame codec to the CCSDS space packet codec: a
//! [`PacketFrame`] serializes its packet into a frame payload on encode and
//! parses it back on decode. Every operation takes a [`Statistics`] reference
//! and records what it moved, so callers choose whether counters are shared
//! across contexts or kept per link.

pub mod config;
pub mod error;
pub mod integration;
pub mod stats;

pub use config::PacketConfig;
pub use error::{PacketError, Result};
pub use integration::{create_packet, PacketFrame};
pub use stats::{Statistics, StatisticsSnapshot};
