//! Core constants, configuration, error types and shared utilities.

pub mod constants;
mod config;
mod error;
mod hash;
mod stats;

pub use config::{EndpointConfig, EndpointConfigBuilder};
pub use constants::*;
pub use error::*;
pub use hash::hash_combine;
pub use stats::{SessionStat, SessionStats, SocketStat, SocketStats, StatTable};
