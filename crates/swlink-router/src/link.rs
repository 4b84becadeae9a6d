use std::fmt;

use serde::{Deserialize, Serialize};

/// Link state of a port.
///
/// This is a stored value, not an enforced state machine: any state may be
/// set from any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkState {
    #[default]
    Uninitialized,
    Ready,
    Started,
    Connected,
    Error,
}

impl LinkState {
    pub fn as_str(self) -> &'static str {
        match self {
            LinkState::Uninitialized => "uninitialized",
            LinkState::Ready => "ready",
            LinkState::Started => "started",
            LinkState::Connected => "connected",
            LinkState::Error => "error",
        }
    }
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-port bookkeeping held by a router.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Link {
    pub port_id: u8,
    pub state: LinkState,
    /// Frames routed out of this port.
    pub tx_packets: u32,
    /// Frames received on this port.
    pub rx_packets: u32,
    /// Routing attempts onto this port while it was not connected.
    pub errors: u32,
}

impl Link {
    pub(crate) fn new(port_id: u8) -> Self {
        Self {
            port_id,
            ..Self::default()
        }
    }

    pub fn is_connected(&self) -> bool {
        self.state == LinkState::Connected
    }
}

/// Link configuration, applied once when a [`LinkLayer`] is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Line rate in bits per second.
    pub bit_rate: u32,
    /// Disconnect timeout in microseconds. Stored only; no timer acts on it.
    pub disconnect_timeout_us: u32,
    /// Receive buffer credits granted to the peer after init.
    pub rx_credit_max: u8,
    /// Whether frames on this link carry and check the CRC trailer.
    pub enable_crc: bool,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            bit_rate: 10_000_000,
            disconnect_timeout_us: 850,
            rx_credit_max: 7,
            enable_crc: true,
        }
    }
}

/// Configuration and state of a single link endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkLayer {
    config: LinkConfig,
    state: LinkState,
    rx_credits: u8,
    tx_credits: u8,
}

impl LinkLayer {
    /// Bind `config`, start Uninitialized with a full receive window and no
    /// transmit credit.
    pub fn new(config: LinkConfig) -> Self {
        Self {
            config,
            state: LinkState::Uninitialized,
            rx_credits: config.rx_credit_max,
            tx_credits: 0,
        }
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    pub fn set_state(&mut self, state: LinkState) {
        if state != self.state {
            tracing::debug!(from = %self.state, to = %state, "link state change");
        }
        self.state = state;
    }

    pub fn is_connected(&self) -> bool {
        self.state == LinkState::Connected
    }

    pub fn rx_credits(&self) -> u8 {
        self.rx_credits
    }

    pub fn tx_credits(&self) -> u8 {
        self.tx_credits
    }

    /// Add transmit credit received from the peer (saturating).
    pub fn grant_tx_credits(&mut self, credits: u8) {
        self.tx_credits = self.tx_credits.saturating_add(credits);
    }

    /// Spend one transmit credit. Returns false when none is left.
    pub fn consume_tx_credit(&mut self) -> bool {
        match self.tx_credits.checked_sub(1) {
            Some(left) => {
                self.tx_credits = left;
                true
            }
            None => false,
        }
    }
}

impl Default for LinkLayer {
    fn default() -> Self {
        Self::new(LinkConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> LinkConfig {
        LinkConfig {
            bit_rate: 1_000_000,
            disconnect_timeout_us: 2_500,
            rx_credit_max: 12,
            enable_crc: true,
        }
    }

    #[test]
    fn init_binds_config_and_resets_credits() {
        let link = LinkLayer::new(test_config());
        assert_eq!(link.config(), &test_config());
        assert_eq!(link.config().disconnect_timeout_us, 2_500);
        assert_eq!(link.state(), LinkState::Uninitialized);
        assert_eq!(link.rx_credits(), 12);
        assert_eq!(link.tx_credits(), 0);
    }

    #[test]
    fn any_state_can_be_set() {
        let mut link = LinkLayer::new(test_config());
        link.set_state(LinkState::Connected);
        assert!(link.is_connected());
        link.set_state(LinkState::Uninitialized);
        assert_eq!(link.state(), LinkState::Uninitialized);
        link.set_state(LinkState::Error);
        link.set_state(LinkState::Started);
        assert_eq!(link.state(), LinkState::Started);
    }

    #[test]
    fn tx_credit_accounting() {
        let mut link = LinkLayer::default();
        assert!(!link.consume_tx_credit());

        link.grant_tx_credits(2);
        assert!(link.consume_tx_credit());
        assert!(link.consume_tx_credit());
        assert!(!link.consume_tx_credit());

        link.grant_tx_credits(250);
        link.grant_tx_credits(250);
        assert_eq!(link.tx_credits(), u8::MAX);
    }

    #[test]
    fn state_names() {
        assert_eq!(LinkState::Connected.to_string(), "connected");
        assert_eq!(LinkState::default(), LinkState::Uninitialized);
        assert_eq!(
            serde_json::to_string(&LinkState::Started).unwrap(),
            "\"started\""
        );
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let cfg: LinkConfig = serde_json::from_str(r#"{"bit_rate": 200000000}"#).unwrap();
        assert_eq!(cfg.bit_rate, 200_000_000);
        assert_eq!(cfg.rx_credit_max, LinkConfig::default().rx_credit_max);
        assert!(cfg.enable_crc);
    }
}
