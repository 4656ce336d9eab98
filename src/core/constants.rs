//! Protocol constants for QUIC connection identity and timing.
//!
//! Values taken from RFC 9000 / RFC 9001 are fixed by the protocol and MUST
//! NOT be changed. Defaults are tunable through [`EndpointConfig`].
//!
//! [`EndpointConfig`]: super::EndpointConfig

use std::time::Duration;

// =============================================================================
// CONNECTION IDS (RFC 9000 Section 5.1)
// =============================================================================

/// Maximum length of a connection ID in bytes.
pub const MAX_CID_LENGTH: usize = 20;

// =============================================================================
// DATAGRAM SIZES
// =============================================================================

/// Maximum UDP payload assumed safe on an IPv4 path.
pub const MAX_DATAGRAM_SIZE_IPV4: usize = 1252;

/// Maximum UDP payload assumed safe on an IPv6 path.
pub const MAX_DATAGRAM_SIZE_IPV6: usize = 1232;

/// Client Initial packets must be padded to at least this size.
pub const MIN_INITIAL_PACKET_SIZE: usize = 1200;

// =============================================================================
// ADMISSION CONTROL
// =============================================================================

/// Default limit of concurrent connections from one remote address.
pub const DEFAULT_MAX_CONNECTIONS_PER_HOST: usize = 100;

/// Default number of entries kept in the validated-address LRU.
pub const DEFAULT_VALIDATED_ADDRESS_LRU_SIZE: usize = 10;

// =============================================================================
// TIMING
// =============================================================================

/// Default idle timeout.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Largest idle timeout accepted by configuration.
pub const MAX_IDLE_TIMEOUT: Duration = Duration::from_secs(600);

/// Interval used when a retransmission deadline has already passed.
pub const MIN_RETRANSMIT_INTERVAL_MS: u64 = 1;

// =============================================================================
// ERROR CODES (RFC 9000 Section 20, RFC 9001 Section 4.8)
// =============================================================================

/// Base of the transport error range that carries TLS alerts.
pub const CRYPTO_ERROR_BASE: u64 = 0x0100;

/// Mask selecting the TLS alert inside a crypto error code.
pub const CRYPTO_ALERT_MASK: u64 = 0x00ff;

/// Application code used when no application error was supplied.
pub const APP_NO_ERROR: u64 = 0xff00;

/// Transport error codes.
pub mod transport_error {
    /// Graceful close.
    pub const NO_ERROR: u64 = 0x00;
    /// Implementation error; also the fallback for unknown codes.
    pub const INTERNAL_ERROR: u64 = 0x01;
    /// Server refuses the connection.
    pub const CONNECTION_REFUSED: u64 = 0x02;
    /// Flow control limits exceeded.
    pub const FLOW_CONTROL_ERROR: u64 = 0x03;
    /// Stream limit exceeded.
    pub const STREAM_LIMIT_ERROR: u64 = 0x04;
    /// Frame received in an invalid stream state.
    pub const STREAM_STATE_ERROR: u64 = 0x05;
    /// Final size changed.
    pub const FINAL_SIZE_ERROR: u64 = 0x06;
    /// Badly formatted frame.
    pub const FRAME_ENCODING_ERROR: u64 = 0x07;
    /// Invalid transport parameters.
    pub const TRANSPORT_PARAMETER_ERROR: u64 = 0x08;
    /// Too many connection IDs issued.
    pub const CONNECTION_ID_LIMIT_ERROR: u64 = 0x09;
    /// Generic protocol violation.
    pub const PROTOCOL_VIOLATION: u64 = 0x0a;
    /// Invalid Retry or NEW_TOKEN token.
    pub const INVALID_TOKEN: u64 = 0x0b;
    /// Application closed the connection.
    pub const APPLICATION_ERROR: u64 = 0x0c;
    /// CRYPTO frame data buffer overflowed.
    pub const CRYPTO_BUFFER_EXCEEDED: u64 = 0x0d;
    /// Invalid key update.
    pub const KEY_UPDATE_ERROR: u64 = 0x0e;
    /// AEAD confidentiality or integrity limit reached.
    pub const AEAD_LIMIT_REACHED: u64 = 0x0f;
    /// No viable network path.
    pub const NO_VIABLE_PATH: u64 = 0x10;

    /// Highest code in the contiguous transport error range.
    pub const MAX_DEFINED: u64 = NO_VIABLE_PATH;
}
