//! Transport layer error types.
//!
//! Resolution failures are never fatal: the connection simply stays on its
//! current path.

use std::io;

use thiserror::Error;

/// Why a preferred address could not be resolved.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Local policy ignores preferred addresses.
    #[error("preferred address ignored by policy")]
    Ignored,

    /// The server offered no address for the local family.
    #[error("no preferred address offered for the local address family")]
    NotOffered,

    /// Host text is not a literal address; name lookups are not performed.
    #[error("not a numeric host: {0}")]
    NotNumeric(String),

    /// The resolver reported an error.
    #[error("address lookup failed: {0}")]
    Lookup(#[from] io::Error),

    /// The resolver returned nothing usable for the requested family.
    #[error("lookup returned no address of the requested family")]
    NoMatchingAddress,
}

impl ResolveError {
    /// Resolution failures only forgo migration.
    pub fn is_fatal(&self) -> bool {
        false
    }
}

/// Transport layer errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Timers need a tokio runtime to run on.
    #[error("no tokio runtime available")]
    NoRuntime,

    /// Preferred-address resolution error.
    #[error("preferred address resolution failed: {0}")]
    Resolve(#[from] ResolveError),
}

impl TransportError {
    /// Check if this error prevents the connection from continuing.
    pub fn is_fatal(&self) -> bool {
        match self {
            TransportError::NoRuntime => true,
            TransportError::Resolve(err) => err.is_fatal(),
        }
    }
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_errors_not_fatal() {
        assert!(!ResolveError::Ignored.is_fatal());
        assert!(!ResolveError::NotOffered.is_fatal());
        assert!(!ResolveError::NotNumeric("example.com".into()).is_fatal());
        assert!(!ResolveError::Lookup(io::Error::other("test")).is_fatal());
        assert!(!ResolveError::NoMatchingAddress.is_fatal());
    }

    #[test]
    fn test_transport_error_fatal() {
        assert!(TransportError::NoRuntime.is_fatal());
        assert!(!TransportError::from(ResolveError::NotOffered).is_fatal());
    }

    #[test]
    fn test_display() {
        let err = TransportError::from(ResolveError::NotNumeric("localhost".into()));
        assert_eq!(
            err.to_string(),
            "preferred address resolution failed: not a numeric host: localhost"
        );
    }
}
