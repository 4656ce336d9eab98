//! # quic-identity
//!
//! Addressing, identity and timer utilities for a QUIC endpoint.
//!
//! The crate covers the plumbing a QUIC transport needs around its packet
//! engine:
//!
//! - **Addresses**: family-aware socket addresses with byte-exact equality,
//!   stable hashing and per-family datagram limits
//! - **Identity**: fixed-capacity connection IDs and classified error codes
//! - **Admission**: per-host connection limits and a validated-address cache
//! - **Migration**: selection and numeric resolution of a server's preferred
//!   address
//! - **Timers**: cancellable repeating timers for idle and retransmission
//!   timeouts
//!
//! ## Feature Flags
//!
//! - `transport` (default): timers and preferred-address resolution on tokio
//!
//! ## Modules
//!
//! - [`core`]: constants, configuration, error types, hashing, statistics
//! - [`address`]: socket addresses, preferred addresses, admission control
//! - [`connection`]: connection IDs and error codes
//! - [`transport`]: timers and resolution (requires `transport` feature)
//!
//! ## Example Usage
//!
//! ```rust
//! use quic_identity::prelude::*;
//!
//! let peer = SocketAddress::new("192.0.2.1".parse().unwrap(), 4433);
//! assert_eq!(peer.family(), Family::Ipv4);
//! assert_eq!(peer.max_datagram_size(), 1252);
//!
//! let cid = ConnectionId::from_hex("0102030405060708").unwrap();
//! assert_eq!(cid.len(), 8);
//!
//! // A TLS alert lands in the crypto error range.
//! assert_eq!(QuicError::crypto(40).code(), 0x128);
//!
//! let config = EndpointConfig::builder()
//!     .max_connections_per_host(2)
//!     .build()
//!     .unwrap();
//! let mut admission = AdmissionControl::from_config(&config);
//! assert!(admission.try_admit(&peer));
//! assert!(admission.try_admit(&peer));
//! assert!(!admission.try_admit(&peer));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Core module (always included)
pub mod core;

pub mod address;
pub mod connection;

// Transport layer (feature-gated)
#[cfg(feature = "transport")]
#[cfg_attr(docsrs, doc(cfg(feature = "transport")))]
pub mod transport;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::*;

    pub use crate::address::{
        AdmissionControl, Family, PreferredAddress, PreferredAddressPolicy, SocketAddress,
    };
    pub use crate::connection::{ConnectionId, ErrorCodeValue, ErrorFamily, QuicError};

    #[cfg(feature = "transport")]
    pub use crate::transport::{
        ConnectionTimers, ResolveError, Timer, TransportError, TransportResult,
        resolve_preferred_address,
    };
}

// Re-export commonly used items at crate root
pub use address::{Family, SocketAddress};
pub use connection::{ConnectionId, QuicError};
pub use core::{EndpointConfig, Error};

#[cfg(feature = "transport")]
pub use transport::{ConnectionTimers, Timer};
