//! Host-independent carousel logic
//!
//! Everything here is plain data and pure functions plus two event-driven
//! components ([`slider::NewsSlider`] and [`rail::FocusRail`]). Time enters
//! only through the [`scheduler::Scheduler`] trait, so every behaviour can be
//! exercised deterministically without a browser.

pub mod autoplay;
pub mod cyclic;
pub mod drag;
pub mod layout;
pub mod rail;
pub mod scheduler;
pub mod slider;
pub mod wheel;

use serde::{Deserialize, Serialize};

/// Keyboard input the carousels react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavKey {
    /// Previous item
    ArrowLeft,
    /// Next item
    ArrowRight,
    /// Anything else
    Other,
}

impl NavKey {
    /// Classify a DOM `KeyboardEvent.key` value
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key {
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            _ => Self::Other,
        }
    }

    /// Navigation step for this key
    #[must_use]
    pub const fn step(self) -> Option<i64> {
        match self {
            Self::ArrowLeft => Some(-1),
            Self::ArrowRight => Some(1),
            Self::Other => None,
        }
    }
}
