//! Error types for connection identity primitives.

use std::time::Duration;

use thiserror::Error;

use crate::address::Family;

/// Errors raised when building a [`SocketAddress`](crate::address::SocketAddress)
/// from a wire image.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// The image length does not match the family's native size.
    #[error("invalid {family} address image: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Family the caller asked for.
        family: Family,
        /// Native size of that family.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },

    /// The family tag inside the image disagrees with the requested family.
    #[error("address family mismatch: expected {expected}, image carries tag {actual}")]
    FamilyMismatch {
        /// Family the caller asked for.
        expected: Family,
        /// Raw family tag found in the image.
        actual: u16,
    },

    /// The buffer is too short to hold a family tag.
    #[error("address image too short to carry a family tag: {0} bytes")]
    MissingFamilyTag(usize),

    /// Raw family tag is neither IPv4 nor IPv6.
    #[error("unsupported address family tag: {0}")]
    UnsupportedFamily(u16),
}

/// Errors raised when building a [`ConnectionId`](crate::connection::ConnectionId).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CidError {
    /// More bytes than a connection ID can hold.
    #[error("connection ID too long: {0} bytes")]
    TooLong(usize),

    /// Hex text could not be decoded.
    #[error("invalid connection ID hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// Errors raised by [`EndpointConfigBuilder::build`](super::EndpointConfigBuilder::build).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A per-host limit of zero would refuse every connection.
    #[error("max_connections_per_host must be at least 1")]
    ZeroConnectionsPerHost,

    /// The validated-address LRU is enabled but cannot hold anything.
    #[error("validated address capacity must be at least 1 when the LRU is enabled")]
    ZeroValidatedAddressCapacity,

    /// Idle timeout above the supported maximum.
    #[error("idle timeout {0:?} exceeds the supported maximum")]
    IdleTimeoutTooLarge(Duration),
}

/// Top-level errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Address error.
    #[error("address error: {0}")]
    Address(#[from] AddressError),

    /// Connection ID error.
    #[error("connection ID error: {0}")]
    Cid(#[from] CidError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Transport error.
    #[cfg(feature = "transport")]
    #[error("transport error: {0}")]
    Transport(#[from] crate::transport::TransportError),
}
