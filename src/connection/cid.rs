//! Connection identifiers (RFC 9000 Section 5.1).

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::core::{CidError, MAX_CID_LENGTH};

/// Opaque connection ID of 0 to 20 bytes.
///
/// Stored inline; copying is cheap. Equality, ordering and hashing consider
/// only the used bytes.
#[derive(Clone, Copy)]
pub struct ConnectionId {
    bytes: [u8; MAX_CID_LENGTH],
    len: u8,
}

impl ConnectionId {
    /// Copy a connection ID out of `bytes`.
    pub fn new(bytes: &[u8]) -> Result<Self, CidError> {
        if bytes.len() > MAX_CID_LENGTH {
            return Err(CidError::TooLong(bytes.len()));
        }
        let mut buf = [0u8; MAX_CID_LENGTH];
        buf[..bytes.len()].copy_from_slice(bytes);
        Ok(Self {
            bytes: buf,
            len: bytes.len() as u8,
        })
    }

    /// Zero-length connection ID.
    pub const fn empty() -> Self {
        Self {
            bytes: [0u8; MAX_CID_LENGTH],
            len: 0,
        }
    }

    /// Parse a hex string, upper or lower case.
    pub fn from_hex(text: &str) -> Result<Self, CidError> {
        let bytes = hex::decode(text)?;
        Self::new(&bytes)
    }

    /// Raw bytes for wire encoding.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Whether this is a zero-length connection ID.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Lowercase hex, exactly `2 * len()` characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }

    /// Owned copy of the raw bytes, for use as an opaque key.
    pub fn to_raw_string(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<&[u8]> for ConnectionId {
    type Error = CidError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::new(bytes)
    }
}

impl AsRef<[u8]> for ConnectionId {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl PartialEq for ConnectionId {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for ConnectionId {}

impl Hash for ConnectionId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl PartialOrd for ConnectionId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ConnectionId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConnectionId({})", self.to_hex())
    }
}
