//! Injectable time source for timers and animation frames.
//!
//! Components never read a wall clock or register host callbacks directly.
//! They ask a [`Scheduler`] for interval, timeout and frame handles and are
//! told which handle fired through their `handle_timer` entry points. The
//! browser backs this with `setInterval`/`setTimeout`/`requestAnimationFrame`;
//! tests use [`ManualScheduler`] and step time deterministically.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Handle to a pending timer or frame request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(u64);

impl TimerId {
    /// Wrap a raw handle value
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw handle value
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// What kind of callback a handle stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerKind {
    /// Fires repeatedly until cleared
    Interval,
    /// Fires once after a delay
    Timeout,
    /// Fires once on the next display frame
    Frame,
}

/// Host timer facilities
///
/// `clear` must accept ids that already fired or were never issued.
pub trait Scheduler {
    /// Current time in milliseconds
    fn now_ms(&self) -> f64;

    /// Register a repeating timer
    fn set_interval(&mut self, period_ms: u32) -> TimerId;

    /// Register a one-shot timer
    fn set_timeout(&mut self, delay_ms: u32) -> TimerId;

    /// Request a callback on the next display frame
    fn request_frame(&mut self) -> TimerId;

    /// Cancel a timer or frame request
    fn clear(&mut self, id: TimerId);
}

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    kind: TimerKind,
    due_ms: u64,
    period_ms: u64,
}

/// Deterministic scheduler for tests and offline simulation
#[derive(Debug, Clone)]
pub struct ManualScheduler {
    now_ms: u64,
    next_id: u64,
    frame_period_ms: u64,
    timers: BTreeMap<TimerId, PendingTimer>,
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualScheduler {
    /// Frame period used by [`ManualScheduler::new`] (~60 Hz)
    pub const DEFAULT_FRAME_PERIOD_MS: u64 = 16;

    /// Create a scheduler at time zero
    #[must_use]
    pub fn new() -> Self {
        Self::with_frame_period(Self::DEFAULT_FRAME_PERIOD_MS)
    }

    /// Create a scheduler with a custom frame period
    #[must_use]
    pub fn with_frame_period(frame_period_ms: u64) -> Self {
        Self {
            now_ms: 0,
            next_id: 1,
            frame_period_ms: frame_period_ms.max(1),
            timers: BTreeMap::new(),
        }
    }

    /// Current time in whole milliseconds
    #[must_use]
    pub const fn now(&self) -> u64 {
        self.now_ms
    }

    /// Number of registered, not yet fired (or re-arming) timers
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    /// Number of registered timers of one kind
    #[must_use]
    pub fn active_of_kind(&self, kind: TimerKind) -> usize {
        self.timers.values().filter(|t| t.kind == kind).count()
    }

    /// Whether a handle is still pending
    #[must_use]
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    /// Kind of a pending handle
    #[must_use]
    pub fn kind(&self, id: TimerId) -> Option<TimerKind> {
        self.timers.get(&id).map(|t| t.kind)
    }

    /// Fire the earliest timer due at or before `until_ms`.
    ///
    /// Moves the clock to the timer's due time. Intervals re-arm, timeouts
    /// and frames are removed. Ties fire in registration order.
    pub fn fire_next(&mut self, until_ms: u64) -> Option<TimerId> {
        let (id, timer) = self
            .timers
            .iter()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(id, t)| (t.due_ms, **id))
            .map(|(id, t)| (*id, *t))?;

        self.now_ms = self.now_ms.max(timer.due_ms);
        match timer.kind {
            TimerKind::Interval => {
                if let Some(pending) = self.timers.get_mut(&id) {
                    pending.due_ms += pending.period_ms;
                }
            }
            TimerKind::Timeout | TimerKind::Frame => {
                self.timers.remove(&id);
            }
        }
        Some(id)
    }

    /// Advance time by `ms`, handing every fired id to `on_fire`.
    ///
    /// Timers registered from inside `on_fire` fire within the same window
    /// when they fall due before its end.
    pub fn run_for<F>(&mut self, ms: u64, mut on_fire: F)
    where
        F: FnMut(&mut Self, TimerId),
    {
        let end = self.now_ms + ms;
        while let Some(id) = self.fire_next(end) {
            on_fire(self, id);
        }
        self.now_ms = end;
    }

    /// Advance time by `ms` and return the fired ids in order.
    pub fn advance(&mut self, ms: u64) -> Vec<TimerId> {
        let mut fired = Vec::new();
        self.run_for(ms, |_, id| fired.push(id));
        fired
    }

    fn register(&mut self, kind: TimerKind, delay_ms: u64) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let period_ms = delay_ms.max(1);
        self.timers.insert(
            id,
            PendingTimer {
                kind,
                due_ms: self.now_ms + period_ms,
                period_ms,
            },
        );
        id
    }
}

impl Scheduler for ManualScheduler {
    fn now_ms(&self) -> f64 {
        self.now_ms as f64
    }

    fn set_interval(&mut self, period_ms: u32) -> TimerId {
        self.register(TimerKind::Interval, u64::from(period_ms))
    }

    fn set_timeout(&mut self, delay_ms: u32) -> TimerId {
        self.register(TimerKind::Timeout, u64::from(delay_ms))
    }

    fn request_frame(&mut self) -> TimerId {
        self.register(TimerKind::Frame, self.frame_period_ms)
    }

    fn clear(&mut self, id: TimerId) {
        self.timers.remove(&id);
    }
}
