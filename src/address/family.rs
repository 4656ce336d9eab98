//! Address families.

use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::core::{AddressError, MAX_DATAGRAM_SIZE_IPV4, MAX_DATAGRAM_SIZE_IPV6};

/// Size of an IPv4 socket address image.
pub const SOCKADDR_IN_LEN: usize = 16;

/// Size of an IPv6 socket address image.
pub const SOCKADDR_IN6_LEN: usize = 28;

/// The two address families a QUIC endpoint can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// IPv4.
    Ipv4,
    /// IPv6.
    Ipv6,
}

impl Family {
    /// Family tag stored in IPv4 images.
    pub const AF_INET: u16 = 2;

    /// Family tag stored in IPv6 images.
    pub const AF_INET6: u16 = 10;

    /// Parse a raw family tag.
    pub fn from_raw(tag: u16) -> Result<Self, AddressError> {
        match tag {
            Self::AF_INET => Ok(Family::Ipv4),
            Self::AF_INET6 => Ok(Family::Ipv6),
            other => Err(AddressError::UnsupportedFamily(other)),
        }
    }

    /// Raw family tag.
    pub fn raw(self) -> u16 {
        match self {
            Family::Ipv4 => Self::AF_INET,
            Family::Ipv6 => Self::AF_INET6,
        }
    }

    /// Length of this family's native address image.
    pub fn wire_len(self) -> usize {
        match self {
            Family::Ipv4 => SOCKADDR_IN_LEN,
            Family::Ipv6 => SOCKADDR_IN6_LEN,
        }
    }

    /// Largest datagram we send on a path of this family.
    pub fn max_datagram_size(self) -> usize {
        match self {
            Family::Ipv4 => MAX_DATAGRAM_SIZE_IPV4,
            Family::Ipv6 => MAX_DATAGRAM_SIZE_IPV6,
        }
    }

    /// Family of an IP address.
    pub fn of_ip(ip: &IpAddr) -> Self {
        match ip {
            IpAddr::V4(_) => Family::Ipv4,
            IpAddr::V6(_) => Family::Ipv6,
        }
    }

    /// Family of a socket address.
    pub fn of(addr: &SocketAddr) -> Self {
        Self::of_ip(&addr.ip())
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::Ipv4 => f.write_str("IPv4"),
            Family::Ipv6 => f.write_str("IPv6"),
        }
    }
}
