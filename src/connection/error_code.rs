//! QUIC error code classification.
//!
//! QUIC error codes live in two namespaces. Transport errors (including the
//! crypto subrange that carries TLS alerts) mean the same thing on every
//! connection. Application errors are defined by the negotiated ALPN, so
//! `Application` code 123 can only be interpreted together with that ALPN.

use std::fmt;

use thiserror::Error;

use crate::core::{APP_NO_ERROR, CRYPTO_ALERT_MASK, CRYPTO_ERROR_BASE, transport_error};

/// Namespace of a QUIC error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorFamily {
    /// Transport error.
    Session = 0,
    /// TLS alert carried as a transport error.
    Crypto = 1,
    /// Application-protocol error.
    Application = 2,
}

impl ErrorFamily {
    /// Parse a raw family value.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(ErrorFamily::Session),
            1 => Some(ErrorFamily::Crypto),
            2 => Some(ErrorFamily::Application),
            _ => None,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            ErrorFamily::Session => "Session",
            ErrorFamily::Application => "Application",
            ErrorFamily::Crypto => "Crypto",
        }
    }
}

impl fmt::Display for ErrorFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Display name for a raw family value; `"<unknown>"` if unrecognized.
pub fn family_name(raw: i32) -> &'static str {
    ErrorFamily::from_raw(raw).map_or("<unknown>", ErrorFamily::name)
}

/// Map a raw reason code to a canonical transport error code.
///
/// - Defined transport codes (`0x00..=0x10`) map to themselves.
/// - Any code with the crypto bit set becomes `CRYPTO_ERROR_BASE | alert`,
///   keeping only the alert byte.
/// - Everything else becomes `INTERNAL_ERROR`.
pub fn infer_transport_error_code(raw: u64) -> u64 {
    if raw <= transport_error::MAX_DEFINED {
        raw
    } else if raw & CRYPTO_ERROR_BASE != 0 {
        CRYPTO_ERROR_BASE | (raw & CRYPTO_ALERT_MASK)
    } else {
        transport_error::INTERNAL_ERROR
    }
}

/// An error code tagged with its namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("{family} error {code:#x}")]
pub struct QuicError {
    family: ErrorFamily,
    code: u64,
}

impl QuicError {
    /// Classify `raw` within `family`.
    ///
    /// Session and crypto codes pass through [`infer_transport_error_code`];
    /// crypto codes are first combined with [`CRYPTO_ERROR_BASE`].
    /// Application codes are stored unchanged.
    pub fn new(family: ErrorFamily, raw: u64) -> Self {
        let code = match family {
            ErrorFamily::Session => infer_transport_error_code(raw),
            ErrorFamily::Crypto => infer_transport_error_code(raw | CRYPTO_ERROR_BASE),
            ErrorFamily::Application => raw,
        };
        Self { family, code }
    }

    /// Transport error.
    pub fn session(raw: u64) -> Self {
        Self::new(ErrorFamily::Session, raw)
    }

    /// Crypto error from a TLS alert.
    pub fn crypto(alert: u64) -> Self {
        Self::new(ErrorFamily::Crypto, alert)
    }

    /// Application error.
    pub fn application(code: u64) -> Self {
        Self::new(ErrorFamily::Application, code)
    }

    /// Error namespace.
    pub fn family(&self) -> ErrorFamily {
        self.family
    }

    /// Classified code.
    pub fn code(&self) -> u64 {
        self.code
    }

    /// Whether this is a graceful close with no error.
    pub fn is_no_error(&self) -> bool {
        match self.family {
            ErrorFamily::Application => self.code == APP_NO_ERROR,
            _ => self.code == transport_error::NO_ERROR,
        }
    }
}

impl Default for QuicError {
    fn default() -> Self {
        Self::session(transport_error::NO_ERROR)
    }
}

/// A dynamically typed error code handed over by an embedding layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ErrorCodeValue {
    /// Arbitrary-precision integer.
    BigInt(u64),
    /// Floating-point number.
    Number(f64),
    /// Anything else, including no value.
    Missing,
}

/// Pull a numeric error code out of `value`.
///
/// Integers are taken verbatim. Floats are truncated toward zero and
/// saturate to the `u64` range (NaN becomes 0). Anything else yields
/// [`APP_NO_ERROR`].
pub fn extract_error_code(value: ErrorCodeValue) -> u64 {
    match value {
        ErrorCodeValue::BigInt(code) => code,
        ErrorCodeValue::Number(num) => num as u64,
        ErrorCodeValue::Missing => APP_NO_ERROR,
    }
}

impl From<u64> for ErrorCodeValue {
    fn from(code: u64) -> Self {
        ErrorCodeValue::BigInt(code)
    }
}

impl From<f64> for ErrorCodeValue {
    fn from(num: f64) -> Self {
        ErrorCodeValue::Number(num)
    }
}

impl<T: Into<ErrorCodeValue>> From<Option<T>> for ErrorCodeValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ErrorCodeValue::Missing, Into::into)
    }
}
