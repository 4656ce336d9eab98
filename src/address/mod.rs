//! Peer addressing.
//!
//! - [`SocketAddress`]: family-aware address with byte-exact equality, usable
//!   as a map key
//! - [`PreferredAddress`]: server-advertised alternate address and selection
//! - [`AdmissionControl`]: per-host connection limits and validated-address LRU

mod admission;
mod family;
mod preferred;
mod socket_address;

pub use admission::{AdmissionControl, HostConnectionTable, ValidatedAddressCache};
pub use family::{Family, SOCKADDR_IN_LEN, SOCKADDR_IN6_LEN};
pub use preferred::{PreferredAddress, PreferredAddressPolicy};
pub use socket_address::SocketAddress;
