use serde::{Deserialize, Serialize};
use swlink_frame::PROTOCOL_PACKET;

/// Addressing for a packet context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacketConfig {
    /// Logical address of this node.
    pub device_addr: u8,
    /// Logical address frames are sent to.
    pub target_addr: u8,
    /// Frame protocol identifier.
    pub protocol_id: u8,
    /// Carried for link setup. Frames always include a CRC trailer.
    pub enable_crc: bool,
}

impl PacketConfig {
    pub fn new(device_addr: u8, target_addr: u8) -> Self {
        Self {
            device_addr,
            target_addr,
            ..Self::default()
        }
    }
}

impl Default for PacketConfig {
    fn default() -> Self {
        Self {
            device_addr: 0,
            target_addr: 0,
            protocol_id: PROTOCOL_PACKET,
            enable_crc: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = PacketConfig::default();
        assert_eq!(cfg.device_addr, 0);
        assert_eq!(cfg.target_addr, 0);
        assert_eq!(cfg.protocol_id, 1);
        assert!(cfg.enable_crc);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: PacketConfig = serde_json::from_str(r#"{ "target_addr": 5 }"#).unwrap();
        assert_eq!(cfg, PacketConfig::new(0, 5));
    }
}
