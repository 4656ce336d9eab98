//! Idle and retransmission timers for one connection.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::time::Instant;
use tracing::trace;

use super::timer::Timer;
use crate::core::{EndpointConfig, MIN_RETRANSMIT_INTERVAL_MS};

/// Interval until `expiry`, in whole milliseconds.
///
/// A deadline already in the past yields the minimum retransmit interval.
pub fn retransmit_interval(expiry: Instant, now: Instant) -> Duration {
    if expiry < now {
        Duration::from_millis(MIN_RETRANSMIT_INTERVAL_MS)
    } else {
        let remaining = expiry.duration_since(now);
        Duration::from_millis(remaining.as_millis() as u64)
    }
}

/// The two timers that drive a connection's liveness policy.
///
/// Both timers are stopped when this value is dropped.
#[derive(Debug)]
pub struct ConnectionTimers {
    idle: Timer,
    retransmit: Timer,
    idle_timeout: Duration,
}

impl ConnectionTimers {
    /// Create unarmed timers.
    ///
    /// `on_idle` runs when the connection has been idle for `idle_timeout`;
    /// `on_retransmit` runs when the retransmission deadline passes.
    pub fn new<I, R>(runtime: Handle, idle_timeout: Duration, on_idle: I, on_retransmit: R) -> Self
    where
        I: FnMut() + Send + 'static,
        R: FnMut() + Send + 'static,
    {
        Self {
            idle: Timer::new(runtime.clone(), on_idle),
            retransmit: Timer::new(runtime, on_retransmit),
            idle_timeout,
        }
    }

    /// Create unarmed timers using the configured idle timeout.
    pub fn from_config<I, R>(
        runtime: Handle,
        config: &EndpointConfig,
        on_idle: I,
        on_retransmit: R,
    ) -> Self
    where
        I: FnMut() + Send + 'static,
        R: FnMut() + Send + 'static,
    {
        Self::new(runtime, config.idle_timeout(), on_idle, on_retransmit)
    }

    /// Current idle timeout.
    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Change the idle timeout used by later calls to [`touch`](Self::touch).
    pub fn set_idle_timeout(&mut self, timeout: Duration) {
        self.idle_timeout = timeout;
    }

    /// Replace the idle timeout and restart the idle countdown with it.
    pub fn update_idle(&mut self, timeout: Duration) {
        self.idle_timeout = timeout;
        self.touch();
    }

    /// Record activity: restart the idle countdown.
    pub fn touch(&mut self) {
        trace!(timeout_ms = self.idle_timeout.as_millis() as u64, "idle timer updated");
        self.idle.update(self.idle_timeout);
    }

    /// Arm the retransmission timer for `expiry`. Returns the interval used.
    pub fn schedule_retransmit(&mut self, expiry: Instant, now: Instant) -> Duration {
        let interval = retransmit_interval(expiry, now);
        trace!(interval_ms = interval.as_millis() as u64, "retransmit timer scheduled");
        self.retransmit.update(interval);
        interval
    }

    /// Stop the idle timer for good.
    pub fn stop_idle(&mut self) {
        self.idle.stop();
    }

    /// Stop the retransmission timer for good.
    pub fn stop_retransmit(&mut self) {
        self.retransmit.stop();
    }

    /// Stop both timers.
    pub fn stop_all(&mut self) {
        self.stop_idle();
        self.stop_retransmit();
    }

    /// The idle timer.
    pub fn idle(&self) -> &Timer {
        &self.idle
    }

    /// The retransmission timer.
    pub fn retransmit(&self) -> &Timer {
        &self.retransmit
    }
}
