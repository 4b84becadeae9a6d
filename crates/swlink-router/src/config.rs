use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RouterError};

/// One static route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub dest_addr: u8,
    pub output_port: u8,
}

/// Static router setup, typically loaded from a JSON file.
///
/// ```json
/// {
///   "device_addr": 1,
///   "num_ports": 3,
///   "routes": [{ "dest_addr": 2, "output_port": 0 }],
///   "connected_ports": [0],
///   "channels": [0]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Logical address of this node.
    pub device_addr: u8,
    /// Active port count (clamped to [`crate::MAX_PORTS`]).
    pub num_ports: u8,
    /// Static routes; invalid entries are skipped.
    pub routes: Vec<RouteEntry>,
    /// Ports whose links start out Connected.
    pub connected_ports: Vec<u8>,
    /// Virtual channels opened at startup.
    pub channels: Vec<u8>,
}

impl RouterConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| RouterError::ConfigLoad {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loading router config");
        Self::from_json_str(&text)
    }
}
