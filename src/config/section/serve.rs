//! `[serve]` section configuration.
//!
//! ```toml
//! [serve]
//! interface = "0.0.0.0"   # reachable from the LAN, e.g. for phone testing
//! port = 8080
//! watch = false           # ignore on-disk edits, push only on Run/Reset
//! ```
//!
//! Everything here can also be set per-invocation with `sandpad serve`
//! flags, which win over the file.

use std::net::{IpAddr, Ipv4Addr};

use serde::{Deserialize, Serialize};

/// The `[serve]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// Interface to bind. The default `127.0.0.1` keeps the pad private
    /// to this machine; `0.0.0.0` opens it to the LAN.
    pub interface: IpAddr,

    /// HTTP port. The WebSocket push port is chosen separately.
    pub port: u16,

    /// Watch the pad files and push changes to connected shells.
    pub watch: bool,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 5173,
            watch: true,
        }
    }
}

impl ServeConfig {
    /// Origin of the configured server address, for share links.
    pub fn origin(&self) -> String {
        format!("http://{}:{}", self.interface, self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};

    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.serve.interface, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(config.serve.port, 5173);
        assert!(config.serve.watch);
    }

    #[test]
    fn test_full_section() {
        let config =
            test_parse_config("[serve]\nport = 8888\ninterface = \"0.0.0.0\"\nwatch = false");
        assert_eq!(config.serve.interface, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert_eq!(config.serve.port, 8888);
        assert!(!config.serve.watch);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = test_parse_config("[serve]\nport = 3000");
        assert_eq!(config.serve.port, 3000);
        assert_eq!(config.serve.interface, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert!(config.serve.watch);
    }

    #[test]
    fn test_ipv6_interface() {
        let config = test_parse_config("[serve]\ninterface = \"::1\"");
        assert_eq!(config.serve.interface, "::1".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_origin() {
        let config = test_parse_config("[serve]\nport = 3000");
        assert_eq!(config.serve.origin(), "http://127.0.0.1:3000");
    }
}
