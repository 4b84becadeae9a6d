//! Single-hop routing with virtual channels and per-port link state.
//!
//! A [`Router`] owns fixed-capacity tables sized at compile time: up to
//! [`MAX_PORTS`] links, [`MAX_CHANNELS`] virtual channels and one routing
//! entry per port. It decides the egress port for an already decoded frame.
//!
//! Nothing here is synchronized. Share a router between threads only behind
//! external locking, or give each actor its own instance.

pub mod channel;
pub mod config;
pub mod error;
pub mod link;
pub mod router;

pub use channel::{VirtualChannel, DEFAULT_CHANNEL_CREDITS, MAX_CHANNELS};
pub use config::{RouteEntry, RouterConfig};
pub use error::{MissReason, Result, RouterError};
pub use link::{Link, LinkConfig, LinkLayer, LinkState};
pub use router::{RouteDecision, Router, MAX_PORTS};
