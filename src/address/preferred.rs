//! Server-advertised preferred address (RFC 9000 Section 9.6).

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use tracing::debug;

use super::Family;
use crate::connection::ConnectionId;

/// Whether a client follows a server's preferred address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PreferredAddressPolicy {
    /// Stay on the original path.
    Ignore,
    /// Attempt migration to the preferred address.
    #[default]
    Accept,
}

/// Preferred-address transport parameter as delivered by the handshake layer.
///
/// An all-zero address field means the server did not offer that family.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferredAddress {
    /// IPv4 address, or all zeros.
    pub ipv4_addr: [u8; 4],
    /// IPv4 port.
    pub ipv4_port: u16,
    /// IPv6 address, or all zeros.
    pub ipv6_addr: [u8; 16],
    /// IPv6 port.
    pub ipv6_port: u16,
    /// Connection ID to use on the preferred path.
    pub cid: ConnectionId,
    /// Stateless reset token bound to `cid`.
    pub stateless_reset_token: [u8; 16],
}

impl PreferredAddress {
    /// Whether an IPv4 address is offered.
    pub fn offers_ipv4(&self) -> bool {
        self.ipv4_addr != [0u8; 4]
    }

    /// Whether an IPv6 address is offered.
    pub fn offers_ipv6(&self) -> bool {
        self.ipv6_addr != [0u8; 16]
    }

    /// Pick the offered address matching `local_family`.
    ///
    /// Returns `None` when the server offered nothing for that family; the
    /// other family is never used as a fallback.
    pub fn select(&self, local_family: Family) -> Option<SocketAddr> {
        let selected = match local_family {
            Family::Ipv4 if self.offers_ipv4() => Some(SocketAddr::new(
                IpAddr::V4(Ipv4Addr::from(self.ipv4_addr)),
                self.ipv4_port,
            )),
            Family::Ipv6 if self.offers_ipv6() => Some(SocketAddr::new(
                IpAddr::V6(Ipv6Addr::from(self.ipv6_addr)),
                self.ipv6_port,
            )),
            _ => None,
        };
        debug!(%local_family, ?selected, "preferred address selection");
        selected
    }
}
