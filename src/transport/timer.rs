//! Cancellable, re-armable repeating timer.
//!
//! A [`Timer`] owns a callback and a tokio task that invokes it. State moves
//! `Created -> Armed -> Stopped`; `Stopped` is terminal.
//!
//! - [`Timer::update`] restarts the countdown immediately. The interval is
//!   both the initial delay and the repeat period. An interval of zero fires
//!   once on the next scheduler pass and does not repeat.
//! - [`Timer::stop`] clears the callback and cancels the task. A tick that is
//!   already queued re-checks the stopped flag under the callback lock. A
//!   callback already running on another worker thread is waited for, so
//!   nothing runs once `stop` has returned. The one exception is `stop`
//!   called from inside a timer callback: it never blocks, and a callback of
//!   another timer running concurrently on a different thread may finish
//!   after it returns.
//! - The task is detached; it never keeps a runtime from shutting down.
//!
//! The callback state is shared with the task through an `Arc`, so it is
//! freed only after both the `Timer` and any in-flight tick have let go.

use std::cell::Cell;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, trace};

use super::error::TransportError;

type Callback = Box<dyn FnMut() + Send + 'static>;

/// Longer intervals are clamped so deadline arithmetic cannot overflow.
const MAX_INTERVAL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

thread_local! {
    static IN_CALLBACK: Cell<bool> = const { Cell::new(false) };
}

/// Marks the current thread as running a timer callback until dropped.
struct CallbackScope {
    outer: bool,
}

impl CallbackScope {
    fn enter() -> Self {
        Self {
            outer: IN_CALLBACK.with(|flag| flag.replace(true)),
        }
    }

    fn active() -> bool {
        IN_CALLBACK.with(Cell::get)
    }
}

impl Drop for CallbackScope {
    fn drop(&mut self) {
        IN_CALLBACK.with(|flag| flag.set(self.outer));
    }
}

/// State shared between a [`Timer`] and its task.
struct TimerState {
    stopped: AtomicBool,
    callback: Mutex<Option<Callback>>,
}

impl TimerState {
    fn new(callback: Callback) -> Self {
        Self {
            stopped: AtomicBool::new(false),
            callback: Mutex::new(Some(callback)),
        }
    }

    fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    fn slot(&self) -> MutexGuard<'_, Option<Callback>> {
        self.callback.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Invoke the callback unless stopped. Returns whether it ran.
    fn fire(&self) -> bool {
        let mut slot = self.slot();
        if self.is_stopped() {
            slot.take();
            debug!("timer tick after stop suppressed");
            return false;
        }
        let Some(callback) = slot.as_mut() else {
            return false;
        };
        {
            let _scope = CallbackScope::enter();
            callback();
        }
        // The callback may have stopped its own timer.
        if self.is_stopped() {
            slot.take();
        }
        true
    }
}

/// Repeating timer bound to a tokio runtime.
pub struct Timer {
    state: Arc<TimerState>,
    runtime: Handle,
    task: Option<JoinHandle<()>>,
    interval: Option<Duration>,
}

impl Timer {
    /// Create an unarmed timer whose ticks run on `runtime`.
    pub fn new<F>(runtime: Handle, callback: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        Self {
            state: Arc::new(TimerState::new(Box::new(callback))),
            runtime,
            task: None,
            interval: None,
        }
    }

    /// Create an unarmed timer on the runtime of the calling context.
    pub fn try_current<F>(callback: F) -> Result<Self, TransportError>
    where
        F: FnMut() + Send + 'static,
    {
        let runtime = Handle::try_current().map_err(|_| TransportError::NoRuntime)?;
        Ok(Self::new(runtime, callback))
    }

    /// Arm or re-arm the timer. No-op once stopped.
    pub fn update(&mut self, interval: Duration) {
        if self.state.is_stopped() {
            return;
        }
        let interval = interval.min(MAX_INTERVAL);
        if let Some(task) = self.task.take() {
            task.abort();
        }
        trace!(interval_ms = interval.as_millis() as u64, "timer armed");

        let state = Arc::clone(&self.state);
        let start = Instant::now() + interval;
        self.task = Some(self.runtime.spawn(run(state, start, interval)));
        self.interval = Some(interval);
    }

    /// [`update`](Self::update) with an interval in milliseconds.
    pub fn update_ms(&mut self, interval_ms: u64) {
        self.update(Duration::from_millis(interval_ms));
    }

    /// Permanently disarm the timer and drop its callback. Idempotent.
    pub fn stop(&mut self) {
        if self.state.stopped.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
        let slot = match self.state.callback.try_lock() {
            Ok(slot) => Some(slot),
            // A panicking callback leaves no tick behind to clear the slot.
            Err(TryLockError::Poisoned(poisoned)) => Some(poisoned.into_inner()),
            // A tick on another thread is mid-callback; wait for it.
            Err(TryLockError::WouldBlock) if !CallbackScope::active() => Some(self.state.slot()),
            // Called from a callback: the running tick drops the callback itself.
            Err(TryLockError::WouldBlock) => None,
        };
        if let Some(mut slot) = slot {
            slot.take();
        }
        self.interval = None;
        trace!("timer stopped");
    }

    /// Whether [`stop`](Self::stop) has been called.
    pub fn is_stopped(&self) -> bool {
        self.state.is_stopped()
    }

    /// Whether a countdown is running.
    pub fn is_armed(&self) -> bool {
        !self.is_stopped() && self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Interval of the current countdown.
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }
}

async fn run(state: Arc<TimerState>, start: Instant, interval: Duration) {
    if interval.is_zero() {
        state.fire();
        return;
    }

    let mut ticker = time::interval_at(start, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        if !state.fire() || state.is_stopped() {
            break;
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.stop();
    }
}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer")
            .field("interval", &self.interval)
            .field("stopped", &self.is_stopped())
            .field("armed", &self.is_armed())
            .finish()
    }
}
