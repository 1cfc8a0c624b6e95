//! Pointer drag sessions and pointer capture.

use serde::{Deserialize, Serialize};

/// Pointer capture work the host must perform for a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerCapture {
    /// Capture the pointer on the drag surface
    Capture(i32),
    /// Release the pointer if still captured
    Release(i32),
}

/// An in-progress pointer drag
///
/// Created on pointer-down, fed every pointer-move and consumed on
/// pointer-up or pointer-cancel.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pointer_id: i32,
    start_x: f64,
    start_position: f64,
    delta_x: f64,
    moved: bool,
    click_threshold: f64,
}

impl DragSession {
    /// Start a drag at pointer x `x`, snapshotting the carousel position
    #[must_use]
    pub const fn begin(pointer_id: i32, x: f64, start_position: f64, click_threshold: f64) -> Self {
        Self {
            pointer_id,
            start_x: x,
            start_position,
            delta_x: 0.0,
            moved: false,
            click_threshold,
        }
    }

    /// Track a pointer move; latches `moved` past the click threshold
    pub fn update(&mut self, x: f64) {
        self.delta_x = x - self.start_x;
        if self.delta_x.abs() > self.click_threshold {
            self.moved = true;
        }
    }

    /// Pointer being tracked
    #[must_use]
    pub const fn pointer_id(&self) -> i32 {
        self.pointer_id
    }

    /// Cumulative horizontal travel since pointer-down
    #[must_use]
    pub const fn delta_x(&self) -> f64 {
        self.delta_x
    }

    /// Whether the pointer travelled far enough to no longer be a click
    #[must_use]
    pub const fn moved(&self) -> bool {
        self.moved
    }

    /// Carousel position when the drag began
    #[must_use]
    pub const fn start_position(&self) -> f64 {
        self.start_position
    }

    /// Step implied by the drag: `+1` for a leftward swipe past
    /// `threshold`, `-1` for a rightward one, `0` otherwise.
    #[must_use]
    pub fn swipe_direction(&self, threshold: f64) -> i64 {
        if self.delta_x.abs() <= threshold {
            0
        } else if self.delta_x < 0.0 {
            1
        } else {
            -1
        }
    }

    /// End the session
    #[must_use]
    pub fn finish(self) -> DragRelease {
        DragRelease {
            pointer_id: self.pointer_id,
            delta_x: self.delta_x,
            moved: self.moved,
            start_position: self.start_position,
        }
    }
}

/// What remains of a drag once the pointer is released
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRelease {
    /// Pointer that was dragging
    pub pointer_id: i32,
    /// Final horizontal travel
    pub delta_x: f64,
    /// Whether the click threshold was crossed
    pub moved: bool,
    /// Carousel position when the drag began
    pub start_position: f64,
}

impl DragRelease {
    /// Capture release the host must perform
    #[must_use]
    pub const fn release_capture(&self) -> PointerCapture {
        PointerCapture::Release(self.pointer_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_is_still() {
        let drag = DragSession::begin(1, 200.0, 3.0, 6.0);
        assert_eq!(drag.delta_x(), 0.0);
        assert!(!drag.moved());
        assert_eq!(drag.start_position(), 3.0);
        assert_eq!(drag.pointer_id(), 1);
    }

    #[test]
    fn test_small_move_stays_click() {
        let mut drag = DragSession::begin(1, 200.0, 0.0, 6.0);
        drag.update(203.0);
        assert_eq!(drag.delta_x(), 3.0);
        assert!(!drag.moved());
    }

    #[test]
    fn test_moved_latches() {
        let mut drag = DragSession::begin(1, 200.0, 0.0, 6.0);
        drag.update(190.0);
        drag.update(199.0);
        assert!(drag.moved());
        assert_eq!(drag.delta_x(), -1.0);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut drag = DragSession::begin(1, 0.0, 0.0, 6.0);
        drag.update(6.0);
        assert!(!drag.moved());
        drag.update(6.5);
        assert!(drag.moved());
    }

    #[test]
    fn test_swipe_direction() {
        let mut drag = DragSession::begin(1, 100.0, 0.0, 6.0);
        drag.update(50.0);
        assert_eq!(drag.swipe_direction(45.0), 1);
        drag.update(150.0);
        assert_eq!(drag.swipe_direction(45.0), -1);
        drag.update(140.0);
        assert_eq!(drag.swipe_direction(45.0), 0);
    }

    #[test]
    fn test_finish_carries_state() {
        let mut drag = DragSession::begin(7, 100.0, 2.5, 4.0);
        drag.update(40.0);
        let release = drag.finish();
        assert_eq!(release.pointer_id, 7);
        assert_eq!(release.delta_x, -60.0);
        assert!(release.moved);
        assert_eq!(release.start_position, 2.5);
        assert_eq!(release.release_capture(), PointerCapture::Release(7));
    }
}
