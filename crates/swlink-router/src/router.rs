use swlink_frame::Frame;

use crate::channel::{VirtualChannel, MAX_CHANNELS};
use crate::config::RouterConfig;
use crate::error::{MissReason, Result, RouterError};
use crate::link::{Link, LinkState};

/// Number of ports per router. Also the routing table size: only
/// destination addresses below this value can be routed.
pub const MAX_PORTS: usize = 8;

/// Outcome of a routing decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// The frame is addressed to this node and is not forwarded.
    Local,
    /// Forward the frame out of this port.
    Forward(u8),
}

/// Routing table, virtual channel table and link registry of one node.
#[derive(Debug, Clone)]
pub struct Router {
    links: [Link; MAX_PORTS],
    channels: [VirtualChannel; MAX_CHANNELS],
    routes: [Option<u8>; MAX_PORTS],
    device_addr: u8,
    num_ports: u8,
}

impl Router {
    /// Create a router for `device_addr` with `num_ports` active ports,
    /// clamped to [`MAX_PORTS`]. Links start Uninitialized, channels inactive.
    pub fn new(device_addr: u8, num_ports: u8) -> Self {
        let num_ports = num_ports.min(MAX_PORTS as u8);
        let links = std::array::from_fn(|i| Link::new(i as u8));
        let channels = std::array::from_fn(|i| VirtualChannel::new(i as u8));

        tracing::debug!(device_addr, num_ports, "router initialized");
        Self {
            links,
            channels,
            routes: [None; MAX_PORTS],
            device_addr,
            num_ports,
        }
    }

    /// Build a router from configuration.
    ///
    /// Routes are installed with [`Router::add_route`] semantics, so invalid
    /// entries are skipped. Out-of-range channels or connected ports fail.
    pub fn from_config(config: &RouterConfig) -> Result<Self> {
        let mut router = Self::new(config.device_addr, config.num_ports);
        for entry in &config.routes {
            router.add_route(entry.dest_addr, entry.output_port);
        }
        for &channel in &config.channels {
            router.open_channel(channel)?;
        }
        for &port in &config.connected_ports {
            router.set_link_state(port, LinkState::Connected)?;
        }
        Ok(router)
    }

    pub fn device_addr(&self) -> u8 {
        self.device_addr
    }

    pub fn num_ports(&self) -> u8 {
        self.num_ports
    }

    /// Install or overwrite the route for `dest_addr`.
    ///
    /// Ignored when `dest_addr` is outside the table or `output_port` is not
    /// an active port. Returns whether the route was installed.
    pub fn add_route(&mut self, dest_addr: u8, output_port: u8) -> bool {
        if usize::from(dest_addr) >= MAX_PORTS || output_port >= self.num_ports {
            tracing::debug!(dest_addr, output_port, "route rejected");
            return false;
        }
        self.routes[usize::from(dest_addr)] = Some(output_port);
        tracing::debug!(dest_addr, output_port, "route installed");
        true
    }

    /// Installed egress port for `dest_addr`, if any.
    pub fn route(&self, dest_addr: u8) -> Option<u8> {
        self.routes.get(usize::from(dest_addr)).copied().flatten()
    }

    /// Activate a virtual channel.
    pub fn open_channel(&mut self, channel_id: u8) -> Result<()> {
        let channel = self
            .channels
            .get_mut(usize::from(channel_id))
            .ok_or(RouterError::ChannelOutOfRange(channel_id))?;
        channel.active = true;
        tracing::debug!(channel_id, "virtual channel opened");
        Ok(())
    }

    /// Deactivate a virtual channel. Its credit is kept.
    pub fn close_channel(&mut self, channel_id: u8) -> Result<()> {
        let channel = self
            .channels
            .get_mut(usize::from(channel_id))
            .ok_or(RouterError::ChannelOutOfRange(channel_id))?;
        channel.active = false;
        tracing::debug!(channel_id, "virtual channel closed");
        Ok(())
    }

    pub fn channel(&self, channel_id: u8) -> Option<&VirtualChannel> {
        self.channels.get(usize::from(channel_id))
    }

    pub fn channel_mut(&mut self, channel_id: u8) -> Option<&mut VirtualChannel> {
        self.channels.get_mut(usize::from(channel_id))
    }

    pub fn channels(&self) -> &[VirtualChannel] {
        &self.channels
    }

    /// Link of an active port.
    pub fn link(&self, port: u8) -> Option<&Link> {
        self.links[..usize::from(self.num_ports)].get(usize::from(port))
    }

    /// Links of all active ports.
    pub fn links(&self) -> &[Link] {
        &self.links[..usize::from(self.num_ports)]
    }

    pub fn set_link_state(&mut self, port: u8, state: LinkState) -> Result<()> {
        let link = self.active_link_mut(port)?;
        if link.state != state {
            tracing::debug!(port, from = %link.state, to = %state, "port link state change");
        }
        link.state = state;
        Ok(())
    }

    /// Count a frame received on `port`.
    pub fn record_rx(&mut self, port: u8) -> Result<()> {
        let link = self.active_link_mut(port)?;
        link.rx_packets = link.rx_packets.wrapping_add(1);
        Ok(())
    }

    /// Choose the egress port for `frame`.
    ///
    /// Frames addressed to this device are [`RouteDecision::Local`]. Otherwise
    /// the target must have a route to an active, connected port; the chosen
    /// link's transmit counter is incremented.
    pub fn route_frame(&mut self, frame: &Frame<'_>) -> Result<RouteDecision> {
        let target = frame.target_addr;
        if target == self.device_addr {
            return Ok(RouteDecision::Local);
        }

        let port = match self.lookup(target) {
            Ok(port) => port,
            Err(reason) => {
                tracing::debug!(target_addr = target, %reason, "routing miss");
                return Err(RouterError::RoutingMiss { target, reason });
            }
        };

        let link = &mut self.links[usize::from(port)];
        link.tx_packets = link.tx_packets.wrapping_add(1);
        tracing::trace!(target_addr = target, port, "frame routed");
        Ok(RouteDecision::Forward(port))
    }

    fn lookup(&mut self, target: u8) -> std::result::Result<u8, MissReason> {
        let entry = self
            .routes
            .get(usize::from(target))
            .copied()
            .ok_or(MissReason::AddressOutOfRange)?;
        let port = entry.ok_or(MissReason::NoRoute)?;
        if port >= self.num_ports {
            return Err(MissReason::PortOutOfRange(port));
        }

        let link = &mut self.links[usize::from(port)];
        if !link.is_connected() {
            link.errors = link.errors.wrapping_add(1);
            return Err(MissReason::LinkDown {
                port,
                state: link.state,
            });
        }
        Ok(port)
    }

    fn active_link_mut(&mut self, port: u8) -> Result<&mut Link> {
        let num_ports = self.num_ports;
        self.links[..usize::from(num_ports)]
            .get_mut(usize::from(port))
            .ok_or(RouterError::PortOutOfRange { port, num_ports })
    }
}
