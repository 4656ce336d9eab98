//! Per-connection identity: connection IDs and classified error codes.

mod cid;
mod error_code;

pub use cid::ConnectionId;
pub use error_code::{
    ErrorCodeValue, ErrorFamily, QuicError, extract_error_code, family_name,
    infer_transport_error_code,
};
