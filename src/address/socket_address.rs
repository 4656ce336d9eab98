//! Family-aware socket address stored as its native byte image.
//!
//! Image layout (Linux socket address structures):
//!
//! ```text
//! IPv4 (16 bytes): family(2, native) | port(2, BE) | addr(4) | zero(8)
//! IPv6 (28 bytes): family(2, native) | port(2, BE) | flowinfo(4, BE) | addr(16) | scope_id(4, native)
//! ```
//!
//! Equality compares the whole image, so two IPv6 addresses that differ only
//! in flow label or scope are distinct. Hashing covers port and address words
//! only, which keeps `a == b => hash(a) == hash(b)`.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6};

use super::family::{Family, SOCKADDR_IN_LEN, SOCKADDR_IN6_LEN};
use crate::core::{AddressError, hash_combine};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Image {
    V4([u8; SOCKADDR_IN_LEN]),
    V6([u8; SOCKADDR_IN6_LEN]),
}

/// One endpoint's network address.
///
/// Usable directly as a map key for per-host bookkeeping.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SocketAddress {
    image: Image,
}

impl SocketAddress {
    /// Build from a native address image of the given family.
    pub fn from_wire(bytes: &[u8], family: Family) -> Result<Self, AddressError> {
        let expected = family.wire_len();
        if bytes.len() != expected {
            return Err(AddressError::InvalidLength {
                family,
                expected,
                actual: bytes.len(),
            });
        }

        let tag = u16::from_ne_bytes([bytes[0], bytes[1]]);
        if tag != family.raw() {
            return Err(AddressError::FamilyMismatch {
                expected: family,
                actual: tag,
            });
        }

        let image = match family {
            Family::Ipv4 => {
                let mut image = [0u8; SOCKADDR_IN_LEN];
                image.copy_from_slice(bytes);
                Image::V4(image)
            }
            Family::Ipv6 => {
                let mut image = [0u8; SOCKADDR_IN6_LEN];
                image.copy_from_slice(bytes);
                Image::V6(image)
            }
        };
        Ok(Self { image })
    }

    /// Build from a raw image whose family tag is read from the first two bytes.
    pub fn from_wire_any(bytes: &[u8]) -> Result<Self, AddressError> {
        if bytes.len() < 2 {
            return Err(AddressError::MissingFamilyTag(bytes.len()));
        }
        let family = Family::from_raw(u16::from_ne_bytes([bytes[0], bytes[1]]))?;
        Self::from_wire(bytes, family)
    }

    /// Build an address from an IP and port.
    pub fn new(ip: IpAddr, port: u16) -> Self {
        Self::from(SocketAddr::new(ip, port))
    }

    /// The native image.
    pub fn to_wire(&self) -> &[u8] {
        match &self.image {
            Image::V4(image) => &image[..],
            Image::V6(image) => &image[..],
        }
    }

    /// Address family.
    pub fn family(&self) -> Family {
        match self.image {
            Image::V4(_) => Family::Ipv4,
            Image::V6(_) => Family::Ipv6,
        }
    }

    /// Port in host byte order.
    pub fn port(&self) -> u16 {
        let image = self.to_wire();
        u16::from_be_bytes([image[2], image[3]])
    }

    /// IP address.
    pub fn ip(&self) -> IpAddr {
        match &self.image {
            Image::V4(image) => IpAddr::V4(Ipv4Addr::new(image[4], image[5], image[6], image[7])),
            Image::V6(image) => IpAddr::V6(Ipv6Addr::from(v6_octets(image))),
        }
    }

    /// Convert to a standard socket address, keeping flow info and scope.
    pub fn to_socket_addr(&self) -> SocketAddr {
        match &self.image {
            Image::V4(_) => SocketAddr::new(self.ip(), self.port()),
            Image::V6(image) => {
                let flowinfo = u32::from_be_bytes([image[4], image[5], image[6], image[7]]);
                let scope_id = u32::from_ne_bytes([image[24], image[25], image[26], image[27]]);
                SocketAddr::V6(SocketAddrV6::new(
                    Ipv6Addr::from(v6_octets(image)),
                    self.port(),
                    flowinfo,
                    scope_id,
                ))
            }
        }
    }

    /// Write the numeric host form (no port) into `out`.
    pub fn write_host<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        write!(out, "{}", self.ip())
    }

    /// Numeric host form, e.g. `203.0.113.7` or `2001:db8::1`.
    pub fn host_text(&self) -> String {
        self.ip().to_string()
    }

    /// Largest datagram to send to this address.
    pub fn max_datagram_size(&self) -> usize {
        self.family().max_datagram_size()
    }

    /// Overwrite this address with a copy of `other`.
    pub fn update_from(&mut self, other: &SocketAddress) {
        self.image = other.image;
    }

    /// Combined hash of port and every address word.
    pub fn hash_value(&self) -> u64 {
        let port = u64::from(self.port());
        match &self.image {
            Image::V4(image) => {
                let addr = u32::from_be_bytes([image[4], image[5], image[6], image[7]]);
                hash_combine(&[port, u64::from(addr)])
            }
            Image::V6(image) => {
                let octets = v6_octets(image);
                let mut high = [0u8; 8];
                let mut low = [0u8; 8];
                high.copy_from_slice(&octets[..8]);
                low.copy_from_slice(&octets[8..]);
                hash_combine(&[port, u64::from_be_bytes(high), u64::from_be_bytes(low)])
            }
        }
    }

    /// Whether `text` is a literal IPv4 or IPv6 address.
    ///
    /// IPv4 is tried first. Hostnames, ports and bracketed forms are rejected.
    pub fn is_numeric_host(text: &str) -> bool {
        text.parse::<Ipv4Addr>().is_ok() || text.parse::<Ipv6Addr>().is_ok()
    }
}

fn v6_octets(image: &[u8; SOCKADDR_IN6_LEN]) -> [u8; 16] {
    let mut octets = [0u8; 16];
    octets.copy_from_slice(&image[8..24]);
    octets
}

impl From<SocketAddr> for SocketAddress {
    fn from(addr: SocketAddr) -> Self {
        match addr {
            SocketAddr::V4(v4) => Self::from(v4),
            SocketAddr::V6(v6) => Self::from(v6),
        }
    }
}

impl From<SocketAddrV4> for SocketAddress {
    fn from(addr: SocketAddrV4) -> Self {
        let mut image = [0u8; SOCKADDR_IN_LEN];
        image[0..2].copy_from_slice(&Family::AF_INET.to_ne_bytes());
        image[2..4].copy_from_slice(&addr.port().to_be_bytes());
        image[4..8].copy_from_slice(&addr.ip().octets());
        Self {
            image: Image::V4(image),
        }
    }
}

impl From<SocketAddrV6> for SocketAddress {
    fn from(addr: SocketAddrV6) -> Self {
        let mut image = [0u8; SOCKADDR_IN6_LEN];
        image[0..2].copy_from_slice(&Family::AF_INET6.to_ne_bytes());
        image[2..4].copy_from_slice(&addr.port().to_be_bytes());
        image[4..8].copy_from_slice(&addr.flowinfo().to_be_bytes());
        image[8..24].copy_from_slice(&addr.ip().octets());
        image[24..28].copy_from_slice(&addr.scope_id().to_ne_bytes());
        Self {
            image: Image::V6(image),
        }
    }
}

impl From<SocketAddress> for SocketAddr {
    fn from(addr: SocketAddress) -> Self {
        addr.to_socket_addr()
    }
}

impl Hash for SocketAddress {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_value());
    }
}

impl fmt::Display for SocketAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.family() {
            Family::Ipv4 => write!(f, "{}:{}", self.ip(), self.port()),
            Family::Ipv6 => write!(f, "[{}]:{}", self.ip(), self.port()),
        }
    }
}

impl fmt::Debug for SocketAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SocketAddress({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, RngCore, SeedableRng};
    use std::collections::HashMap;
    use std::hash::DefaultHasher;

    fn std_hash(addr: &SocketAddress) -> u64 {
        let mut hasher = DefaultHasher::new();
        addr.hash(&mut hasher);
        hasher.finish()
    }

    fn addr(text: &str) -> SocketAddress {
        SocketAddress::from(text.parse::<SocketAddr>().unwrap())
    }

    fn random_address(rng: &mut StdRng) -> SocketAddress {
        let port = rng.gen_range(0..=u16::MAX);
        if rng.gen_bool(0.5) {
            SocketAddress::new(IpAddr::V4(Ipv4Addr::from(rng.next_u32())), port)
        } else {
            let mut octets = [0u8; 16];
            rng.fill(&mut octets);
            SocketAddress::new(IpAddr::V6(Ipv6Addr::from(octets)), port)
        }
    }

    #[test]
    fn test_loopback_v6_hash_and_port() {
        let a = addr("[::1]:443");
        let b = SocketAddress::new("::1".parse().unwrap(), 443);
        let other_port = addr("[::1]:444");

        assert_eq!(a, b);
        assert_eq!(a.hash_value(), b.hash_value());
        assert_eq!(std_hash(&a), std_hash(&b));
        assert_ne!(a, other_port);
    }

    #[test]
    fn test_equality_properties() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..500 {
            let a = random_address(&mut rng);
            let b = random_address(&mut rng);
            let a_copy = SocketAddress::from_wire(a.to_wire(), a.family()).unwrap();

            assert_eq!(a, a);
            assert_eq!(a, a_copy);
            assert_eq!(a_copy, a);
            assert_eq!(a.hash_value(), a_copy.hash_value());
            assert_eq!(a == b, b == a);
            if a == b {
                assert_eq!(a.hash_value(), b.hash_value());
            }
        }
    }

    fn hand_encoded_image(addr: SocketAddr) -> Vec<u8> {
        let mut image = Vec::new();
        match addr {
            SocketAddr::V4(v4) => {
                image.extend_from_slice(&Family::AF_INET.to_ne_bytes());
                image.extend_from_slice(&v4.port().to_be_bytes());
                image.extend_from_slice(&v4.ip().octets());
                image.extend_from_slice(&[0u8; 8]);
            }
            SocketAddr::V6(v6) => {
                image.extend_from_slice(&Family::AF_INET6.to_ne_bytes());
                image.extend_from_slice(&v6.port().to_be_bytes());
                image.extend_from_slice(&v6.flowinfo().to_be_bytes());
                image.extend_from_slice(&v6.ip().octets());
                image.extend_from_slice(&v6.scope_id().to_ne_bytes());
            }
        }
        image
    }

    #[test]
    fn test_independent_construction_agrees() {
        let mut rng = StdRng::seed_from_u64(0xadd7);
        for round in 0..500 {
            let port = rng.gen_range(0..=u16::MAX);
            let ip = if round % 2 == 0 {
                IpAddr::V4(Ipv4Addr::from(rng.next_u32()))
            } else {
                let mut octets = [0u8; 16];
                rng.fill(&mut octets);
                IpAddr::V6(Ipv6Addr::from(octets))
            };
            let std_addr = SocketAddr::new(ip, port);

            let from_std = SocketAddress::from(std_addr);
            let from_parts = SocketAddress::new(ip, port);
            let from_image =
                SocketAddress::from_wire(&hand_encoded_image(std_addr), Family::of(&std_addr))
                    .unwrap();

            for (a, b) in [
                (from_std, from_parts),
                (from_std, from_image),
                (from_parts, from_image),
            ] {
                assert_eq!(a, b);
                assert_eq!(b, a);
                assert_eq!(a.hash_value(), b.hash_value());
                assert_eq!(std_hash(&a), std_hash(&b));
            }
        }
    }

    #[test]
    fn test_wire_roundtrip() {
        for text in ["203.0.113.7:4433", "[2001:db8::1]:443", "0.0.0.0:0"] {
            let original = addr(text);
            let wire = original.to_wire().to_vec();
            assert_eq!(wire.len(), original.family().wire_len());

            let copy = SocketAddress::from_wire(&wire, original.family()).unwrap();
            assert_eq!(copy, original);
            assert_eq!(copy.to_wire(), wire.as_slice());
        }
    }

    #[test]
    fn test_from_wire_any() {
        let original = addr("[2001:db8::7]:8443");
        let copy = SocketAddress::from_wire_any(original.to_wire()).unwrap();
        assert_eq!(copy, original);

        let mut bogus = original.to_wire().to_vec();
        bogus[0..2].copy_from_slice(&99u16.to_ne_bytes());
        assert_eq!(
            SocketAddress::from_wire_any(&bogus),
            Err(AddressError::UnsupportedFamily(99))
        );
    }

    #[test]
    fn test_from_wire_any_without_tag() {
        assert_eq!(
            SocketAddress::from_wire_any(&[]),
            Err(AddressError::MissingFamilyTag(0))
        );
        assert_eq!(
            SocketAddress::from_wire_any(&[2]),
            Err(AddressError::MissingFamilyTag(1))
        );
    }

    #[test]
    fn test_from_wire_length_mismatch() {
        let v4 = addr("10.0.0.1:80");
        let err = SocketAddress::from_wire(v4.to_wire(), Family::Ipv6).unwrap_err();
        assert_eq!(
            err,
            AddressError::InvalidLength {
                family: Family::Ipv6,
                expected: 28,
                actual: 16,
            }
        );
    }

    #[test]
    fn test_from_wire_family_mismatch() {
        let mut image = [0u8; SOCKADDR_IN_LEN];
        image[0..2].copy_from_slice(&Family::AF_INET6.to_ne_bytes());
        let err = SocketAddress::from_wire(&image, Family::Ipv4).unwrap_err();
        assert_eq!(
            err,
            AddressError::FamilyMismatch {
                expected: Family::Ipv4,
                actual: Family::AF_INET6,
            }
        );
    }

    #[test]
    fn test_full_image_equality() {
        let plain = SocketAddress::from(SocketAddrV6::new(Ipv6Addr::LOCALHOST, 443, 0, 0));
        let scoped = SocketAddress::from(SocketAddrV6::new(Ipv6Addr::LOCALHOST, 443, 0, 3));
        let labeled = SocketAddress::from(SocketAddrV6::new(Ipv6Addr::LOCALHOST, 443, 7, 0));

        assert_ne!(plain, scoped);
        assert_ne!(plain, labeled);
        // Different images may share a hash bucket.
        assert_eq!(plain.hash_value(), scoped.hash_value());
    }

    #[test]
    fn test_families_never_equal() {
        let v4 = addr("0.0.0.0:443");
        let v6 = addr("[::]:443");
        assert_ne!(v4, v6);
    }

    #[test]
    fn test_accessors() {
        let v4 = addr("203.0.113.7:4433");
        assert_eq!(v4.family(), Family::Ipv4);
        assert_eq!(v4.port(), 4433);
        assert_eq!(v4.host_text(), "203.0.113.7");
        assert_eq!(v4.max_datagram_size(), 1252);
        assert_eq!(v4.to_string(), "203.0.113.7:4433");

        let v6 = addr("[2001:db8:0:0:0:0:0:1]:443");
        assert_eq!(v6.family(), Family::Ipv6);
        assert_eq!(v6.host_text(), "2001:db8::1");
        assert_eq!(v6.max_datagram_size(), 1232);
        assert_eq!(v6.to_string(), "[2001:db8::1]:443");
    }

    #[test]
    fn test_write_host() {
        let mut buffer = String::new();
        addr("[::ffff:192.0.2.1]:1").write_host(&mut buffer).unwrap();
        assert_eq!(buffer, "::ffff:192.0.2.1");
    }

    #[test]
    fn test_socket_addr_roundtrip() {
        let original: SocketAddr = SocketAddr::V6(SocketAddrV6::new(
            "fe80::1".parse().unwrap(),
            9000,
            0x12345,
            4,
        ));
        let converted = SocketAddress::from(original);
        assert_eq!(SocketAddr::from(converted), original);
    }

    #[test]
    fn test_update_from() {
        let mut current = addr("192.0.2.1:443");
        let migrated = addr("[2001:db8::2]:8443");
        current.update_from(&migrated);
        assert_eq!(current, migrated);
        assert_eq!(current.family(), Family::Ipv6);
    }

    #[test]
    fn test_is_numeric_host() {
        assert!(SocketAddress::is_numeric_host("203.0.113.7"));
        assert!(SocketAddress::is_numeric_host("::1"));
        assert!(SocketAddress::is_numeric_host("2001:db8::1"));

        assert!(!SocketAddress::is_numeric_host("example.com"));
        assert!(!SocketAddress::is_numeric_host("localhost"));
        assert!(!SocketAddress::is_numeric_host("1.2.3"));
        assert!(!SocketAddress::is_numeric_host("[::1]"));
        assert!(!SocketAddress::is_numeric_host("127.0.0.1:80"));
        assert!(!SocketAddress::is_numeric_host(""));
    }

    #[test]
    fn test_map_key() {
        let mut counts: HashMap<SocketAddress, usize> = HashMap::new();
        *counts.entry(addr("[::1]:443")).or_default() += 1;
        *counts.entry(addr("[::1]:443")).or_default() += 1;
        *counts.entry(addr("[::1]:444")).or_default() += 1;

        assert_eq!(counts.len(), 2);
        assert_eq!(counts[&addr("[::1]:443")], 2);
    }
}
