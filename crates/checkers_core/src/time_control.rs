//! Clocks and cancellation for engine searches.
//!
//! Every clone of a [`TimeControl`] points at the same stop flag. A caller
//! that resets or abandons a game keeps a clone and calls [`TimeControl::stop`];
//! the search notices at its next poll and falls back to the last depth it
//! finished.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Nodes searched between two looks at the clock.
const POLL_INTERVAL: u64 = 1024;

/// What an engine may spend on one move.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Deepest iteration to attempt, in plies
    pub depth: u8,
    /// Wall-clock allowance (None = think until `depth` is done)
    pub move_time: Option<Duration>,
    pub time_control: TimeControl,
}

impl SearchLimits {
    pub fn depth(depth: u8) -> Self {
        Self::build(depth, None)
    }

    pub fn depth_and_time(depth: u8, move_time: Duration) -> Self {
        Self::build(depth, Some(move_time))
    }

    /// Time only; the depth is left open.
    pub fn time(move_time: Duration) -> Self {
        Self::build(u8::MAX, Some(move_time))
    }

    fn build(depth: u8, move_time: Option<Duration>) -> Self {
        Self {
            depth,
            move_time,
            time_control: TimeControl::new(move_time),
        }
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.time_control.is_stopped()
    }

    /// Starts the clock. Engines call this on entry to `search`.
    pub fn start(&self) {
        self.time_control.start();
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(6)
    }
}

/// Shared stop flag plus the clock of the running search.
#[derive(Debug, Clone)]
pub struct TimeControl {
    stop: Arc<AtomicBool>,
    started: Arc<Mutex<Option<Instant>>>,
    limit: Option<Duration>,
}

impl TimeControl {
    pub fn new(limit: Option<Duration>) -> Self {
        Self {
            stop: Arc::new(AtomicBool::new(false)),
            started: Arc::new(Mutex::new(None)),
            limit,
        }
    }

    /// Resets the clock to now.
    ///
    /// A stop requested before the search started stays in force; every
    /// `SearchLimits` builder hands out a fresh flag.
    pub fn start(&self) {
        if let Ok(mut started) = self.started.lock() {
            *started = Some(Instant::now());
        }
    }

    /// Asks the search to stop. Safe from any thread.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// Raises the stop flag once the limit has passed. Returns the flag.
    pub fn check_time(&self) -> bool {
        self.expire_after(self.limit)
    }

    /// Like [`check_time`](Self::check_time), against a tighter `budget`
    /// as well as the limit.
    pub fn check_budget(&self, budget: Option<Duration>) -> bool {
        let allowance = match (self.limit, budget) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self.expire_after(allowance)
    }

    fn expire_after(&self, allowance: Option<Duration>) -> bool {
        if !self.is_stopped() && allowance.is_some_and(|a| self.elapsed() >= a) {
            self.stop();
        }
        self.is_stopped()
    }

    /// True on the nodes where a search should look at the clock.
    #[inline]
    pub fn should_check_time(&self, nodes: u64) -> bool {
        nodes % POLL_INTERVAL == 0
    }

    /// Time since [`start`](Self::start); zero before the first start.
    pub fn elapsed(&self) -> Duration {
        match self.started.lock() {
            Ok(started) => started.map_or(Duration::ZERO, |t| t.elapsed()),
            Err(_) => Duration::ZERO,
        }
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.limit.map(|limit| limit.saturating_sub(self.elapsed()))
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.limit
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
