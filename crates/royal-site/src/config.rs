//! Component configuration
//!
//! Defaults reproduce the tuned constants of the live site. Every field can be
//! overridden from a (partial) JSON document handed to the browser entry point.

use crate::error::{SiteError, SiteResult};
use serde::{Deserialize, Serialize};

/// News slider settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderSettings {
    /// Autoplay period in milliseconds
    pub autoplay_delay_ms: u32,
    /// Wheel lock window after an accepted wheel step
    pub wheel_lock_ms: u32,
    /// Minimum dominant-axis wheel magnitude
    pub wheel_threshold: f64,
    /// Horizontal travel after which a press no longer counts as a click
    pub click_threshold_px: f64,
    /// Horizontal travel after which a release commits a step
    pub swipe_threshold_px: f64,
    /// Slides further than this from the active one are hidden
    pub hide_distance: f64,
    /// Viewport width below which the compact spacing applies
    pub compact_breakpoint: f64,
    /// Viewport width below which the medium spacing applies
    pub medium_breakpoint: f64,
}

impl Default for SliderSettings {
    fn default() -> Self {
        Self {
            autoplay_delay_ms: 4200,
            wheel_lock_ms: 360,
            wheel_threshold: 18.0,
            click_threshold_px: 6.0,
            swipe_threshold_px: 45.0,
            hide_distance: 2.45,
            compact_breakpoint: 700.0,
            medium_breakpoint: 992.0,
        }
    }
}

impl SliderSettings {
    /// Set the autoplay period
    #[must_use]
    pub const fn with_autoplay_delay(mut self, ms: u32) -> Self {
        self.autoplay_delay_ms = ms;
        self
    }

    /// Set the wheel lock window
    #[must_use]
    pub const fn with_wheel_lock(mut self, ms: u32) -> Self {
        self.wheel_lock_ms = ms;
        self
    }

    fn validate(&self) -> SiteResult<()> {
        positive("slider.autoplay_delay_ms", f64::from(self.autoplay_delay_ms))?;
        non_negative("slider.wheel_threshold", self.wheel_threshold)?;
        non_negative("slider.click_threshold_px", self.click_threshold_px)?;
        non_negative("slider.swipe_threshold_px", self.swipe_threshold_px)?;
        positive("slider.hide_distance", self.hide_distance)?;
        if self.compact_breakpoint > self.medium_breakpoint {
            return Err(SiteError::invalid_config(
                "slider.compact_breakpoint must not exceed slider.medium_breakpoint",
            ));
        }
        Ok(())
    }
}

/// Focus rail settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RailSettings {
    /// Whether the rail advances on its own
    pub autoplay: bool,
    /// Autoplay period in milliseconds
    pub autoplay_delay_ms: u32,
    /// Minimum time between two accepted wheel steps
    pub wheel_lock_ms: u32,
    /// Minimum dominant-axis wheel magnitude
    pub wheel_threshold: f64,
    /// Horizontal travel after which a press no longer counts as a click
    pub click_threshold_px: f64,
    /// Horizontal travel after which a release forces a whole step
    pub swipe_threshold_px: f64,
    /// Drag pixels per index unit
    pub pixels_per_step: f64,
    /// Spring stiffness (fraction of displacement added to velocity per frame)
    pub spring: f64,
    /// Velocity retained per frame
    pub damping: f64,
    /// Velocity clamp in index units per frame
    pub max_velocity: f64,
    /// Displacement and velocity below this snap to rest
    pub settle_epsilon: f64,
    /// Magnitude of `current`/`target` that triggers re-basing
    pub rebase_limit: f64,
    /// Velocity kept when a drag is released
    pub release_velocity_factor: f64,
    /// Cards closer than this to the position are emphasized
    pub active_distance: f64,
    /// Cards below this opacity ignore the pointer
    pub interactive_opacity: f64,
}

impl Default for RailSettings {
    fn default() -> Self {
        Self {
            autoplay: true,
            autoplay_delay_ms: 4000,
            wheel_lock_ms: 380,
            wheel_threshold: 20.0,
            click_threshold_px: 4.0,
            swipe_threshold_px: 48.0,
            pixels_per_step: 150.0,
            spring: 0.1,
            damping: 0.78,
            max_velocity: 2.2,
            settle_epsilon: 0.0009,
            rebase_limit: 10_000.0,
            release_velocity_factor: 0.45,
            active_distance: 0.33,
            interactive_opacity: 0.16,
        }
    }
}

impl RailSettings {
    /// Enable or disable autoplay
    #[must_use]
    pub const fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    /// Set the spring constants
    #[must_use]
    pub const fn with_spring(mut self, spring: f64, damping: f64) -> Self {
        self.spring = spring;
        self.damping = damping;
        self
    }

    /// Set the re-base trigger magnitude
    #[must_use]
    pub const fn with_rebase_limit(mut self, limit: f64) -> Self {
        self.rebase_limit = limit;
        self
    }

    fn validate(&self) -> SiteResult<()> {
        if !(self.spring > 0.0 && self.spring <= 1.0) {
            return Err(SiteError::invalid_config("rail.spring must be in (0, 1]"));
        }
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(SiteError::invalid_config("rail.damping must be in (0, 1)"));
        }
        positive("rail.autoplay_delay_ms", f64::from(self.autoplay_delay_ms))?;
        positive("rail.max_velocity", self.max_velocity)?;
        positive("rail.settle_epsilon", self.settle_epsilon)?;
        positive("rail.pixels_per_step", self.pixels_per_step)?;
        non_negative("rail.wheel_threshold", self.wheel_threshold)?;
        non_negative("rail.click_threshold_px", self.click_threshold_px)?;
        non_negative("rail.swipe_threshold_px", self.swipe_threshold_px)?;
        if self.rebase_limit < 1.0 {
            return Err(SiteError::invalid_config("rail.rebase_limit must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.release_velocity_factor) {
            return Err(SiteError::invalid_config(
                "rail.release_velocity_factor must be in [0, 1]",
            ));
        }
        Ok(())
    }
}

/// Settings for every component on the page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// News slider
    pub slider: SliderSettings,
    /// Focus rail
    pub rail: RailSettings,
}

impl SiteConfig {
    /// Create the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json(json: &str) -> SiteResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value is inside its legal range
    pub fn validate(&self) -> SiteResult<()> {
        self.slider.validate()?;
        self.rail.validate()
    }
}

fn positive(name: &str, value: f64) -> SiteResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SiteError::invalid_config(format!("{name} must be positive")))
    }
}

fn non_negative(name: &str, value: f64) -> SiteResult<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SiteError::invalid_config(format!(
            "{name} must not be negative"
        )))
    }
}
