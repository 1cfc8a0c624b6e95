//! Autoplay timer ownership.

use super::scheduler::{Scheduler, TimerId};

/// A component's single autoplay interval
///
/// `start` always clears the previous handle first, so a component never
/// holds more than one live autoplay timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Autoplay {
    handle: Option<TimerId>,
    period_ms: u32,
    enabled: bool,
}

impl Autoplay {
    /// Create a stopped autoplay with the given period
    #[must_use]
    pub const fn new(period_ms: u32) -> Self {
        Self {
            handle: None,
            period_ms,
            enabled: true,
        }
    }

    /// Create an autoplay that never arms
    #[must_use]
    pub const fn disabled(period_ms: u32) -> Self {
        Self {
            handle: None,
            period_ms,
            enabled: false,
        }
    }

    /// Arm the interval unless disabled or `blocked` (e.g. mid-drag)
    pub fn start(&mut self, scheduler: &mut impl Scheduler, blocked: bool) {
        self.stop(scheduler);
        if !self.enabled || blocked {
            return;
        }
        self.handle = Some(scheduler.set_interval(self.period_ms));
    }

    /// Clear the interval; safe to call when already stopped
    pub fn stop(&mut self, scheduler: &mut impl Scheduler) {
        if let Some(handle) = self.handle.take() {
            scheduler.clear(handle);
        }
    }

    /// Stop then start, so the next tick is a full period away
    pub fn restart(&mut self, scheduler: &mut impl Scheduler, blocked: bool) {
        self.stop(scheduler);
        self.start(scheduler, blocked);
    }

    /// Whether a fired timer is this autoplay's tick
    #[must_use]
    pub fn owns(&self, id: TimerId) -> bool {
        self.handle == Some(id)
    }

    /// Whether an interval is currently armed
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Whether autoplay is allowed at all
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Autoplay period
    #[must_use]
    pub const fn period_ms(&self) -> u32 {
        self.period_ms
    }
}
