//! Wheel and trackpad gating.
//!
//! Trackpads emit long bursts of wheel events for one gesture. Both carousels
//! take at most one step per burst: the slider with a lock cleared by a
//! one-shot timer, the rail by comparing timestamps.

use super::scheduler::{Scheduler, TimerId};
use serde::{Deserialize, Serialize};

/// Raw wheel deltas of one event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelDelta {
    /// Horizontal delta
    pub dx: f64,
    /// Vertical delta
    pub dy: f64,
}

impl WheelDelta {
    /// Create a delta
    #[must_use]
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Delta along the axis with the larger magnitude (vertical on ties)
    #[must_use]
    pub fn dominant(&self) -> f64 {
        if self.dx.abs() > self.dy.abs() {
            self.dx
        } else {
            self.dy
        }
    }

    /// `+1`/`-1` step, or `None` when the dominant magnitude is below
    /// `threshold`
    #[must_use]
    pub fn step(&self, threshold: f64) -> Option<i64> {
        let delta = self.dominant();
        if delta.abs() < threshold {
            return None;
        }
        Some(if delta > 0.0 { 1 } else { -1 })
    }
}

/// Boolean wheel lock released by a one-shot timer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelLock {
    handle: Option<TimerId>,
    window_ms: u32,
}

impl WheelLock {
    /// Create an unlocked gate
    #[must_use]
    pub const fn new(window_ms: u32) -> Self {
        Self {
            handle: None,
            window_ms,
        }
    }

    /// Whether wheel input is currently ignored
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.handle.is_some()
    }

    /// Accept a wheel event; on success the lock engages
    pub fn accept(
        &mut self,
        delta: WheelDelta,
        threshold: f64,
        scheduler: &mut impl Scheduler,
    ) -> Option<i64> {
        if self.is_locked() {
            return None;
        }
        let step = delta.step(threshold)?;
        self.handle = Some(scheduler.set_timeout(self.window_ms));
        Some(step)
    }

    /// Release the lock if `id` is its unlock timer
    pub fn on_timer(&mut self, id: TimerId) -> bool {
        if self.handle == Some(id) {
            self.handle = None;
            true
        } else {
            false
        }
    }

    /// Drop the lock and its pending timer
    pub fn reset(&mut self, scheduler: &mut impl Scheduler) {
        if let Some(handle) = self.handle.take() {
            scheduler.clear(handle);
        }
    }
}

/// Timestamp-based wheel debounce
#[derive(Debug, Clone, PartialEq)]
pub struct WheelDebounce {
    last_accepted_ms: Option<f64>,
    window_ms: u32,
}

impl WheelDebounce {
    /// Create a debounce that accepts the first event
    #[must_use]
    pub const fn new(window_ms: u32) -> Self {
        Self {
            last_accepted_ms: None,
            window_ms,
        }
    }

    /// Accept a wheel event at `now_ms`
    pub fn accept(&mut self, delta: WheelDelta, threshold: f64, now_ms: f64) -> Option<i64> {
        if let Some(last) = self.last_accepted_ms {
            if now_ms - last < f64::from(self.window_ms) {
                return None;
            }
        }
        let step = delta.step(threshold)?;
        self.last_accepted_ms = Some(now_ms);
        Some(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scheduler::ManualScheduler;

    // ===== WheelDelta =====

    #[test]
    fn test_dominant_axis() {
        assert_eq!(WheelDelta::new(30.0, -5.0).dominant(), 30.0);
        assert_eq!(WheelDelta::new(3.0, -25.0).dominant(), -25.0);
        assert_eq!(WheelDelta::new(10.0, -10.0).dominant(), -10.0);
    }

    #[test]
    fn test_step_threshold() {
        assert_eq!(WheelDelta::new(0.0, 17.9).step(18.0), None);
        assert_eq!(WheelDelta::new(0.0, 18.0).step(18.0), Some(1));
        assert_eq!(WheelDelta::new(-25.0, 0.0).step(18.0), Some(-1));
    }

    // ===== WheelLock =====

    #[test]
    fn test_lock_engages_and_releases() {
        let mut sched = ManualScheduler::new();
        let mut lock = WheelLock::new(360);
        assert_eq!(lock.accept(WheelDelta::new(0.0, 25.0), 18.0, &mut sched), Some(1));
        assert!(lock.is_locked());
        assert_eq!(lock.accept(WheelDelta::new(0.0, 90.0), 18.0, &mut sched), None);

        let fired = sched.advance(360);
        assert_eq!(fired.len(), 1);
        assert!(lock.on_timer(fired[0]));
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_sub_threshold_does_not_lock() {
        let mut sched = ManualScheduler::new();
        let mut lock = WheelLock::new(360);
        assert_eq!(lock.accept(WheelDelta::new(0.0, 4.0), 18.0, &mut sched), None);
        assert!(!lock.is_locked());
        assert_eq!(sched.active_count(), 0);
    }

    #[test]
    fn test_foreign_timer_ignored() {
        let mut lock = WheelLock::new(360);
        assert!(!lock.on_timer(TimerId::new(42)));
    }

    #[test]
    fn test_reset_clears_pending_timer() {
        let mut sched = ManualScheduler::new();
        let mut lock = WheelLock::new(360);
        lock.accept(WheelDelta::new(0.0, 40.0), 18.0, &mut sched);
        lock.reset(&mut sched);
        assert!(!lock.is_locked());
        assert_eq!(sched.active_count(), 0);
    }

    // ===== WheelDebounce =====

    #[test]
    fn test_debounce_window() {
        let mut debounce = WheelDebounce::new(380);
        let d = WheelDelta::new(0.0, -30.0);
        assert_eq!(debounce.accept(d, 20.0, 1000.0), Some(-1));
        assert_eq!(debounce.accept(d, 20.0, 1379.0), None);
        assert_eq!(debounce.accept(d, 20.0, 1380.0), Some(-1));
    }

    #[test]
    fn test_debounce_ignores_small_without_resetting() {
        let mut debounce = WheelDebounce::new(380);
        assert_eq!(debounce.accept(WheelDelta::new(5.0, 0.0), 20.0, 0.0), None);
        assert_eq!(debounce.accept(WheelDelta::new(25.0, 0.0), 20.0, 10.0), Some(1));
    }
}
