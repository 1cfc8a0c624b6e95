//! Discrete news slider
//!
//! A single active index over a fixed, cyclic list of slides. Every input
//! snaps the index immediately; the renderer derives each slide's 3D placement
//! from its signed cyclic distance to the active slide.
//!
//! ```text
//! SliderEvent ──→ NewsSlider::handle ──→ SliderEffects ──→ host
//!                        │                  (repaint, preventDefault,
//!                        ▼                   pointer capture)
//!                  SliderState ──→ SliderLayout::compute ──→ painter
//! ```

use super::autoplay::Autoplay;
use super::cyclic::{signed_distance, wrap};
use super::drag::{DragSession, PointerCapture};
use super::layout::{css_number, Viewport};
use super::scheduler::{Scheduler, TimerId};
use super::wheel::{WheelDelta, WheelLock};
use super::NavKey;
use crate::config::SliderSettings;
use crate::error::{SiteError, SiteResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const MIN_SCALE: f64 = 0.78;
const SCALE_FALLOFF: f64 = 0.14;
const MIN_OPACITY: f64 = 0.1;
const OPACITY_FALLOFF: f64 = 0.42;
const MAX_BLUR_PX: f64 = 2.6;
const BLUR_PER_STEP: f64 = 1.2;
const BASE_Z_INDEX: i32 = 30;
const Z_INDEX_PER_STEP: f64 = 8.0;

/// Active index over `len` slides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderState {
    active: usize,
    len: usize,
}

impl SliderState {
    /// Start on the first slide
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self { active: 0, len }
    }

    /// Active slide
    #[must_use]
    pub const fn active(&self) -> usize {
        self.active
    }

    /// Number of slides
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no slides
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Jump to any index; out-of-range values wrap
    pub fn go_to(&mut self, index: i64) {
        self.active = wrap(index, self.len);
    }

    /// Step right
    pub fn next(&mut self) {
        self.go_to(self.active as i64 + 1);
    }

    /// Step left
    pub fn prev(&mut self) {
        self.go_to(self.active as i64 - 1);
    }

    /// Signed cyclic distance of `index` from the active slide
    #[must_use]
    pub fn signed_distance(&self, index: usize) -> i64 {
        signed_distance(index as i64, self.active as i64, self.len)
    }
}

/// Responsive spacing constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderSpacing {
    /// Horizontal offset per step (px)
    pub spacing: f64,
    /// Depth offset per step (px)
    pub depth: f64,
    /// Rotation per step (deg)
    pub rotation: f64,
}

impl SliderSpacing {
    /// Pick the spacing for a viewport width
    #[must_use]
    pub fn for_width(width: f64, settings: &SliderSettings) -> Self {
        if width < settings.compact_breakpoint {
            Self {
                spacing: 238.0,
                depth: 110.0,
                rotation: 12.0,
            }
        } else if width < settings.medium_breakpoint {
            Self {
                spacing: 292.0,
                depth: 145.0,
                rotation: 16.0,
            }
        } else {
            Self {
                spacing: 360.0,
                depth: 175.0,
                rotation: 16.0,
            }
        }
    }
}

/// Computed placement of one slide
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlideLayout {
    /// Slide index
    pub index: usize,
    /// Signed cyclic distance from the active slide
    pub distance: i64,
    /// Horizontal offset (px)
    pub x: f64,
    /// Depth offset (px)
    pub z: f64,
    /// Y rotation (deg)
    pub rotate_y: f64,
    /// Scale factor
    pub scale: f64,
    /// Opacity
    pub opacity: f64,
    /// Blur radius (px)
    pub blur: f64,
    /// Stacking order
    pub z_index: i32,
    /// Too far away to show or interact with
    pub hidden: bool,
    /// The active slide
    pub active: bool,
    /// Immediately left of the active slide
    pub prev: bool,
    /// Immediately right of the active slide
    pub next: bool,
}

impl SlideLayout {
    fn compute(
        index: usize,
        state: &SliderState,
        spacing: SliderSpacing,
        hide_distance: f64,
    ) -> Self {
        let distance = state.signed_distance(index);
        let d = distance as f64;
        let abs = d.abs();
        let hidden = abs > hide_distance;

        Self {
            index,
            distance,
            x: d * spacing.spacing,
            z: -abs * spacing.depth,
            rotate_y: -d * spacing.rotation,
            scale: if distance == 0 {
                1.0
            } else {
                (1.0 - abs * SCALE_FALLOFF).max(MIN_SCALE)
            },
            opacity: if hidden {
                0.0
            } else {
                (1.0 - abs * OPACITY_FALLOFF).max(MIN_OPACITY)
            },
            blur: if distance == 0 {
                0.0
            } else {
                (abs * BLUR_PER_STEP).min(MAX_BLUR_PX)
            },
            z_index: BASE_Z_INDEX - (abs * Z_INDEX_PER_STEP).round() as i32,
            hidden,
            active: index == state.active(),
            prev: distance == -1,
            next: distance == 1,
        }
    }

    /// Inline `transform` value
    #[must_use]
    pub fn transform_css(&self) -> String {
        format!(
            "translate3d(calc(-50% + {}px), 0, {}px) rotateY({}deg) scale({})",
            css_number(self.x),
            css_number(self.z),
            css_number(self.rotate_y),
            css_number(self.scale)
        )
    }

    /// Inline `filter` value
    #[must_use]
    pub fn filter_css(&self) -> String {
        format!("blur({}px)", css_number(self.blur))
    }
}

/// Pure render of the whole slider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderLayout {
    /// Active slide
    pub active: usize,
    /// One entry per slide, in slide order
    pub slides: Vec<SlideLayout>,
}

impl SliderLayout {
    /// Lay out every slide for the current state
    #[must_use]
    pub fn compute(state: &SliderState, viewport: Viewport, settings: &SliderSettings) -> Self {
        let spacing = SliderSpacing::for_width(viewport.width, settings);
        let slides = (0..state.len())
            .map(|index| SlideLayout::compute(index, state, spacing, settings.hide_distance))
            .collect();
        Self {
            active: state.active(),
            slides,
        }
    }

    /// Whether pagination bullet `index` is the active one
    #[must_use]
    pub fn bullet_active(&self, index: usize) -> bool {
        index == self.active
    }
}

/// Accessible label of pagination bullet `index`
#[must_use]
pub fn bullet_label(index: usize) -> String {
    format!("Go to news {}", index + 1)
}

/// Input delivered to the slider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SliderEvent {
    /// Wheel or trackpad scroll over the slider
    Wheel(WheelDelta),
    /// Key pressed while the slider has focus
    Key(NavKey),
    /// Pointer pressed on the track
    PointerDown {
        /// Pointer id
        pointer_id: i32,
        /// Client x
        x: f64,
    },
    /// Pointer moved over the track
    PointerMove {
        /// Client x
        x: f64,
    },
    /// Pointer released
    PointerUp,
    /// Pointer interaction cancelled by the browser
    PointerCancel,
    /// Click landed on a slide
    CardClick(usize),
    /// Pagination bullet clicked
    BulletClick(usize),
    /// "Previous" button clicked
    PrevButton,
    /// "Next" button clicked
    NextButton,
    /// Window resized
    Resize,
}

/// Work the host must do after an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SliderEffects {
    /// Layout must be recomputed and painted
    pub repaint: bool,
    /// The DOM event's default action must be cancelled
    pub prevent_default: bool,
    /// Pointer capture to take or release
    pub capture: Option<PointerCapture>,
}

impl SliderEffects {
    const fn repaint() -> Self {
        Self {
            repaint: true,
            prevent_default: false,
            capture: None,
        }
    }
}

/// The news slider component
#[derive(Debug, Clone)]
pub struct NewsSlider {
    state: SliderState,
    settings: SliderSettings,
    drag: Option<DragSession>,
    last_drag_moved: bool,
    wheel: WheelLock,
    autoplay: Autoplay,
    resize_frame: Option<TimerId>,
}

impl NewsSlider {
    /// Create a slider over `len` slides
    pub fn new(len: usize, settings: SliderSettings) -> SiteResult<Self> {
        if len == 0 {
            return Err(SiteError::EmptyCarousel {
                component: "news-slider",
            });
        }
        Ok(Self {
            state: SliderState::new(len),
            wheel: WheelLock::new(settings.wheel_lock_ms),
            autoplay: Autoplay::new(settings.autoplay_delay_ms),
            settings,
            drag: None,
            last_drag_moved: false,
            resize_frame: None,
        })
    }

    /// First paint and autoplay start
    pub fn mount(&mut self, scheduler: &mut impl Scheduler) -> SliderEffects {
        info!(slides = self.state.len(), "news slider mounted");
        self.autoplay.start(scheduler, false);
        SliderEffects::repaint()
    }

    /// Stop every timer the slider owns
    pub fn teardown(&mut self, scheduler: &mut impl Scheduler) {
        self.autoplay.stop(scheduler);
        self.wheel.reset(scheduler);
        if let Some(frame) = self.resize_frame.take() {
            scheduler.clear(frame);
        }
        self.drag = None;
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> &SliderState {
        &self.state
    }

    /// Active slide
    #[must_use]
    pub const fn active(&self) -> usize {
        self.state.active()
    }

    /// Settings in use
    #[must_use]
    pub const fn settings(&self) -> &SliderSettings {
        &self.settings
    }

    /// Whether a pointer drag is in progress
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Whether wheel input is locked
    #[must_use]
    pub const fn is_wheel_locked(&self) -> bool {
        self.wheel.is_locked()
    }

    /// Autoplay state
    #[must_use]
    pub const fn autoplay(&self) -> &Autoplay {
        &self.autoplay
    }

    /// Render the current state
    #[must_use]
    pub fn layout(&self, viewport: Viewport) -> SliderLayout {
        SliderLayout::compute(&self.state, viewport, &self.settings)
    }

    /// Dispatch an input event
    pub fn handle(&mut self, event: SliderEvent, scheduler: &mut impl Scheduler) -> SliderEffects {
        match event {
            SliderEvent::Wheel(delta) => {
                let Some(step) = self
                    .wheel
                    .accept(delta, self.settings.wheel_threshold, scheduler)
                else {
                    return SliderEffects::default();
                };
                self.step(step);
                self.restart_autoplay(scheduler);
                SliderEffects {
                    prevent_default: true,
                    ..SliderEffects::repaint()
                }
            }
            SliderEvent::Key(key) => match key.step() {
                Some(step) => {
                    self.step(step);
                    self.restart_autoplay(scheduler);
                    SliderEffects::repaint()
                }
                None => SliderEffects::default(),
            },
            SliderEvent::PointerDown { pointer_id, x } => {
                self.drag = Some(DragSession::begin(
                    pointer_id,
                    x,
                    self.state.active() as f64,
                    self.settings.click_threshold_px,
                ));
                self.last_drag_moved = false;
                self.autoplay.stop(scheduler);
                SliderEffects {
                    capture: Some(PointerCapture::Capture(pointer_id)),
                    ..SliderEffects::default()
                }
            }
            SliderEvent::PointerMove { x } => {
                if let Some(drag) = self.drag.as_mut() {
                    drag.update(x);
                    self.last_drag_moved = drag.moved();
                }
                SliderEffects::default()
            }
            SliderEvent::PointerUp | SliderEvent::PointerCancel => self.finish_drag(scheduler),
            SliderEvent::CardClick(index) => {
                if self.last_drag_moved || index >= self.state.len() {
                    return SliderEffects::default();
                }
                self.go_to(index as i64);
                self.restart_autoplay(scheduler);
                SliderEffects::repaint()
            }
            SliderEvent::BulletClick(index) => {
                if index >= self.state.len() {
                    return SliderEffects::default();
                }
                self.go_to(index as i64);
                self.restart_autoplay(scheduler);
                SliderEffects::repaint()
            }
            SliderEvent::PrevButton => {
                self.step(-1);
                self.restart_autoplay(scheduler);
                SliderEffects::repaint()
            }
            SliderEvent::NextButton => {
                self.step(1);
                self.restart_autoplay(scheduler);
                SliderEffects::repaint()
            }
            SliderEvent::Resize => {
                if self.resize_frame.is_none() {
                    self.resize_frame = Some(scheduler.request_frame());
                }
                SliderEffects::default()
            }
        }
    }

    /// Dispatch a fired timer
    pub fn handle_timer(&mut self, id: TimerId, _scheduler: &mut impl Scheduler) -> SliderEffects {
        if self.autoplay.owns(id) {
            self.step(1);
            return SliderEffects::repaint();
        }
        if self.wheel.on_timer(id) {
            return SliderEffects::default();
        }
        if self.resize_frame == Some(id) {
            self.resize_frame = None;
            return SliderEffects::repaint();
        }
        SliderEffects::default()
    }

    fn finish_drag(&mut self, scheduler: &mut impl Scheduler) -> SliderEffects {
        let Some(drag) = self.drag.take() else {
            return SliderEffects::default();
        };
        let step = drag.swipe_direction(self.settings.swipe_threshold_px);
        let release = drag.finish();
        self.last_drag_moved = release.moved;
        if step != 0 {
            self.step(step);
        }
        self.autoplay.start(scheduler, false);
        SliderEffects {
            repaint: step != 0,
            prevent_default: false,
            capture: Some(release.release_capture()),
        }
    }

    fn step(&mut self, step: i64) {
        self.go_to(self.state.active() as i64 + step);
    }

    fn go_to(&mut self, index: i64) {
        self.state.go_to(index);
        debug!(active = self.state.active(), "news slider moved");
    }

    fn restart_autoplay(&mut self, scheduler: &mut impl Scheduler) {
        let blocked = self.is_dragging();
        self.autoplay.restart(scheduler, blocked);
    }
}
