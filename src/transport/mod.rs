//! Transport layer: timers and preferred-address resolution.
//!
//! Everything here runs on a tokio runtime, which stands in for the endpoint's
//! event loop:
//!
//! - [`Timer`]: cancellable, re-armable repeating timer
//! - [`ConnectionTimers`]: idle and retransmission timeouts for one connection
//! - [`resolve_preferred_address`]: numeric-only resolution of a server's
//!   preferred address
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │      Connection management              │
//! ├─────────────────────────────────────────┤
//! │   Timers, resolution                    │  ← This module
//! ├─────────────────────────────────────────┤
//! │   tokio runtime (timers, lookup_host)   │
//! └─────────────────────────────────────────┘
//! ```

mod error;
mod resolver;
mod timeouts;
mod timer;

pub use error::*;
pub use resolver::{resolve_numeric, resolve_preferred_address};
pub use timeouts::{ConnectionTimers, retransmit_interval};
pub use timer::Timer;
