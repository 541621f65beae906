//! Controller connection paths

use rseip::precludes::EPath;
use std::fmt;
use std::str::FromStr;

/// Registered EtherNet/IP TCP port
pub const DEFAULT_PORT: u16 = 44818;

/// Backplane port of the Ethernet module
const BACKPLANE_PORT: u16 = 1;

/// Where the controller lives: host, TCP port and backplane slot
///
/// Accepted forms: `host`, `host:port`, `host/slot`, `host:port/slot`,
/// `host/bp/slot` and `host/backplane/slot`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionPath {
    pub host: String,
    pub port: u16,
    pub slot: u8,
}

impl ConnectionPath {
    /// `host:port` for the host lookup
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Route from the Ethernet module to the CPU
    pub fn route(&self) -> EPath {
        EPath::default().with_port_slot(BACKPLANE_PORT, self.slot)
    }
}

impl FromStr for ConnectionPath {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split('/');
        let endpoint = parts.next().unwrap_or_default();
        let rest: Vec<&str> = parts.collect();

        let (host, port) = match endpoint.rsplit_once(':') {
            Some((host, port)) => {
                let port = port
                    .parse::<u16>()
                    .map_err(|_| format!("Invalid port '{port}' in '{s}'"))?;
                (host, port)
            }
            None => (endpoint, DEFAULT_PORT),
        };
        if host.is_empty() {
            return Err(format!("Missing host in '{s}'"));
        }

        let slot = match rest.as_slice() {
            [] => "0",
            [slot] => *slot,
            [bp, slot] if bp.eq_ignore_ascii_case("bp") || bp.eq_ignore_ascii_case("backplane") => {
                *slot
            }
            _ => return Err(format!("Unsupported route in '{s}'")),
        };
        let slot = slot
            .parse::<u8>()
            .map_err(|_| format!("Invalid slot '{slot}' in '{s}'"))?;

        Ok(Self {
            host: host.to_string(),
            port,
            slot,
        })
    }
}

impl fmt::Display for ConnectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.host, self.port, self.slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("10.0.0.5", "10.0.0.5", 44818, 0; "host only")]
    #[test_case("10.0.0.5/2", "10.0.0.5", 44818, 2; "slot")]
    #[test_case("10.0.0.5:2222/3", "10.0.0.5", 2222, 3; "port and slot")]
    #[test_case("plc01/bp/1", "plc01", 44818, 1; "bp route")]
    #[test_case("plc01/backplane/4", "plc01", 44818, 4; "backplane route")]
    fn test_parse_connection_path(input: &str, host: &str, port: u16, slot: u8) {
        let path: ConnectionPath = input.parse().unwrap();
        assert_eq!(path.host, host);
        assert_eq!(path.port, port);
        assert_eq!(path.slot, slot);
    }

    #[test_case(""; "empty")]
    #[test_case(":44818"; "no host")]
    #[test_case("10.0.0.5:port"; "bad port")]
    #[test_case("10.0.0.5/300"; "slot too large")]
    #[test_case("10.0.0.5/enet/1/2"; "deep route")]
    fn test_parse_connection_path_rejects(input: &str) {
        assert!(input.parse::<ConnectionPath>().is_err());
    }

    #[test]
    fn test_route_targets_backplane_slot() {
        let path: ConnectionPath = "10.0.0.5/3".parse().unwrap();
        assert_eq!(path.route(), EPath::default().with_port_slot(1, 3));
        assert_eq!(path.socket_addr(), "10.0.0.5:44818");
        assert_eq!(path.to_string(), "10.0.0.5:44818/3");
    }
}
