//! Continuous focus rail
//!
//! Unlike the slider, the rail's position is a real number that chases an
//! integer target through a spring-damper integrated once per display frame.
//! Cards are placed by their fractional cyclic distance from the position, so
//! motion between cards is smooth. The position is unbounded (it counts whole
//! laps) and is periodically re-based by a multiple of the card count so it
//! never grows without limit.
//!
//! Frame pipeline, run by the host on every animation frame:
//!
//! ```text
//! RailMotion::step ──→ RailLayout::compute ──→ content sync ──→ normalize
//!   (physics/drag)       (per-card styles)     (on index change)  (re-base)
//! ```

use super::autoplay::Autoplay;
use super::cyclic::{nearest_index, round_half_up, shortest_delta, wrap, wrapped_distance};
use super::drag::{DragRelease, DragSession, PointerCapture};
use super::layout::{css_number, Viewport};
use super::scheduler::{Scheduler, TimerId};
use super::wheel::{WheelDebounce, WheelDelta};
use super::NavKey;
use crate::config::RailSettings;
use crate::error::{SiteError, SiteResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const SPACING_RATIO: f64 = 0.28;
const MIN_SPACING: f64 = 116.0;
const MAX_SPACING: f64 = 300.0;
const Z_STEP_RATIO: f64 = 0.75;
const MIN_Z_STEP: f64 = 88.0;
const MAX_Z_STEP: f64 = 220.0;
const DEPTH_EXPONENT: f64 = 1.16;
const NARROW_BREAKPOINT: f64 = 768.0;
const NARROW_ROTATION: f64 = 13.0;
const WIDE_ROTATION: f64 = 17.0;
const HIDE_DISTANCE: f64 = 2.55;
const FOCUS_DISTANCE: f64 = 0.18;
const BASE_Z_INDEX: i32 = 400;

/// One card of the rail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RailItem {
    /// Stable identifier
    pub id: u32,
    /// Headline, also the card's accessible label
    pub title: &'static str,
    /// Body copy
    pub description: &'static str,
    /// Category line above the title
    pub meta: &'static str,
    /// Card image
    pub image_src: &'static str,
    /// "Learn more" target; the link is hidden when absent
    pub href: Option<&'static str>,
}

/// The rail's built-in cards
pub const RAIL_ITEMS: [RailItem; 5] = [
    RailItem {
        id: 1,
        title: "Royal Leadership",
        description: "Vision-driven leadership balancing character, excellence, and measurable growth.",
        meta: "Leadership",
        image_src: "https://images.unsplash.com/photo-1523050854058-8df90110c9f1?q=80&w=1400&auto=format&fit=crop",
        href: Some("#about"),
    },
    RailItem {
        id: 2,
        title: "Academic Supervision",
        description: "Curriculum quality, assessment precision, and teacher development across all grades.",
        meta: "Academics",
        image_src: "https://images.unsplash.com/photo-1513258496099-48168024aec0?q=80&w=1400&auto=format&fit=crop",
        href: Some("#news"),
    },
    RailItem {
        id: 3,
        title: "Student Affairs",
        description: "A structured support system that keeps students and families continuously connected.",
        meta: "Community",
        image_src: "https://images.unsplash.com/photo-1522202176988-66273c2fd55f?q=80&w=1400&auto=format&fit=crop",
        href: Some("#contact"),
    },
    RailItem {
        id: 4,
        title: "Activities & Events",
        description: "Competitions, clubs, and experiences that turn confidence into leadership.",
        meta: "Culture",
        image_src: "https://images.unsplash.com/photo-1511988617509-a57c8a288659?q=80&w=1400&auto=format&fit=crop",
        href: Some("#news"),
    },
    RailItem {
        id: 5,
        title: "Digital Learning",
        description: "Modern digital infrastructure supporting deep learning and future-ready skills.",
        meta: "Technology",
        image_src: "https://images.unsplash.com/photo-1519389950473-47ba0277781c?q=80&w=1400&auto=format&fit=crop",
        href: Some("#contact"),
    },
];

// =============================================================================
// Physics
// =============================================================================

/// Continuous rail position and the spring chasing its target
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RailMotion {
    /// Rendered position
    pub current: f64,
    /// Integer position being approached
    pub target: f64,
    /// Index units per frame
    pub velocity: f64,
}

impl RailMotion {
    /// Motion resting at `position`
    #[must_use]
    pub const fn at_rest(position: f64) -> Self {
        Self {
            current: position,
            target: position,
            velocity: 0.0,
        }
    }

    /// Integrate one frame
    ///
    /// While a drag is active the position follows the pointer directly and
    /// velocity is zeroed.
    pub fn step(&mut self, settings: &RailSettings, drag: Option<&DragSession>) {
        if let Some(drag) = drag {
            self.current = drag.start_position() - drag.delta_x() / settings.pixels_per_step;
            self.velocity = 0.0;
            return;
        }

        let displacement = self.target - self.current;
        self.velocity += displacement * settings.spring;
        self.velocity *= settings.damping;
        if self.velocity.abs() > settings.max_velocity {
            self.velocity = settings.max_velocity.copysign(self.velocity);
        }
        self.current += self.velocity;

        if displacement.abs() < settings.settle_epsilon
            && self.velocity.abs() < settings.settle_epsilon
        {
            self.current = self.target;
            self.velocity = 0.0;
        }
    }

    /// Whether the spring is at rest on its target
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.current == self.target && self.velocity == 0.0
    }

    /// Shift both positions by whole laps once either reaches `limit`;
    /// returns whether anything moved
    pub fn normalize(&mut self, len: usize, limit: f64) -> bool {
        if len == 0 || (self.current.abs() < limit && self.target.abs() < limit) {
            return false;
        }
        let n = len as f64;
        let base = (self.current / n).trunc() * n;
        if base == 0.0 {
            return false;
        }
        self.current -= base;
        self.target -= base;
        true
    }

    /// Move the target by `step` cards
    pub fn navigate(&mut self, step: i64) {
        self.target = round_half_up(self.target + step as f64);
    }

    /// Aim at card `index` along the shorter way round
    pub fn go_to_card(&mut self, index: usize, len: usize) {
        let from = wrap(round_half_up(self.target) as i64, len);
        let to = wrap(index as i64, len);
        let delta = shortest_delta(from as f64, to as f64, len);
        self.target = round_half_up(self.target + delta);
    }

    /// Snap the target after a drag ends
    pub fn release(&mut self, release: &DragRelease, settings: &RailSettings) {
        let snapped = if release.delta_x.abs() > settings.swipe_threshold_px {
            release.start_position + if release.delta_x < 0.0 { 1.0 } else { -1.0 }
        } else {
            release.start_position - release.delta_x / settings.pixels_per_step
        };
        self.target = round_half_up(snapped);
        self.velocity *= settings.release_velocity_factor;
    }

    /// Card nearest the rendered position
    #[must_use]
    pub fn nearest_index(&self, len: usize) -> usize {
        nearest_index(self.current, len)
    }
}

// =============================================================================
// Layout
// =============================================================================

/// Responsive rail constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RailSpacing {
    /// Horizontal offset per card (px)
    pub spacing: f64,
    /// Depth scale (px)
    pub z_step: f64,
    /// Rotation per card (deg)
    pub rotation: f64,
}

impl RailSpacing {
    /// Derive spacing from the stage and window widths
    #[must_use]
    pub fn for_viewport(viewport: Viewport) -> Self {
        let spacing = (viewport.stage_width * SPACING_RATIO).clamp(MIN_SPACING, MAX_SPACING);
        Self {
            spacing,
            z_step: (spacing * Z_STEP_RATIO).clamp(MIN_Z_STEP, MAX_Z_STEP),
            rotation: if viewport.width < NARROW_BREAKPOINT {
                NARROW_ROTATION
            } else {
                WIDE_ROTATION
            },
        }
    }
}

/// Computed placement of one card
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardLayout {
    /// Card index
    pub index: usize,
    /// Signed fractional distance from the position
    pub distance: f64,
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
    /// Brightness filter
    pub brightness: f64,
    /// Saturation filter
    pub saturate: f64,
    /// Stacking order
    pub z_index: i32,
    /// Card is the focused one
    pub active: bool,
    /// Card receives pointer events
    pub interactive: bool,
}

impl CardLayout {
    fn compute(
        index: usize,
        position: f64,
        len: usize,
        spacing: RailSpacing,
        settings: &RailSettings,
    ) -> Self {
        let d = wrapped_distance(index, position, len);
        let abs = d.abs();
        let focused = abs < FOCUS_DISTANCE;
        let opacity = if abs > HIDE_DISTANCE {
            0.0
        } else {
            (1.0 - abs * 0.35).max(0.08)
        };

        Self {
            index,
            distance: d,
            x: d * spacing.spacing,
            z: -abs.powf(DEPTH_EXPONENT) * spacing.z_step,
            rotate_y: -d * spacing.rotation,
            scale: (1.0 - abs * 0.13).max(0.72),
            opacity,
            blur: if focused { 0.0 } else { (abs * 2.8).min(8.0) },
            brightness: if focused { 1.0 } else { (1.0 - abs * 0.26).max(0.42) },
            saturate: if focused { 1.12 } else { (1.0 - abs * 0.15).max(0.72) },
            z_index: BASE_Z_INDEX - (abs * 100.0).round() as i32,
            active: abs < settings.active_distance,
            interactive: opacity >= settings.interactive_opacity,
        }
    }

    /// Inline `transform` value
    #[must_use]
    pub fn transform_css(&self) -> String {
        format!(
            "translate3d(calc(-50% + {}px), -50%, {}px) rotateY({}deg) scale({})",
            css_number(self.x),
            css_number(self.z),
            css_number(self.rotate_y),
            css_number(self.scale)
        )
    }

    /// Inline `filter` value
    #[must_use]
    pub fn filter_css(&self) -> String {
        format!(
            "blur({}px) brightness({}) saturate({})",
            css_number(self.blur),
            css_number(self.brightness),
            css_number(self.saturate)
        )
    }

    /// Inline `pointer-events` value
    #[must_use]
    pub const fn pointer_events_css(&self) -> &'static str {
        if self.interactive {
            "auto"
        } else {
            "none"
        }
    }
}

/// Pure render of every card at one position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RailLayout {
    /// Position the layout was computed for
    pub position: f64,
    /// One entry per card, in card order
    pub cards: Vec<CardLayout>,
}

impl RailLayout {
    /// Lay out `len` cards around `position`
    #[must_use]
    pub fn compute(position: f64, len: usize, viewport: Viewport, settings: &RailSettings) -> Self {
        let spacing = RailSpacing::for_viewport(viewport);
        let cards = (0..len)
            .map(|index| CardLayout::compute(index, position, len, spacing, settings))
            .collect();
        Self { position, cards }
    }
}

/// Copy shown beside the rail for its focused card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveContent {
    /// Focused card
    pub index: usize,
    /// Category line
    pub meta: &'static str,
    /// Headline
    pub title: &'static str,
    /// Body copy
    pub description: &'static str,
    /// "i / N" counter
    pub counter: String,
    /// Link target, if any
    pub href: Option<&'static str>,
}

impl ActiveContent {
    fn for_item(items: &[RailItem], index: usize) -> Option<Self> {
        let item = items.get(index)?;
        Some(Self {
            index,
            meta: item.meta,
            title: item.title,
            description: item.description,
            counter: format!("{} / {}", index + 1, items.len()),
            href: item.href,
        })
    }
}

/// Output of one rendered frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RailFrame {
    /// Card styles
    pub layout: RailLayout,
    /// New copy, only when the focused card changed (or on mount)
    pub content: Option<ActiveContent>,
}

// =============================================================================
// Component
// =============================================================================

/// Input delivered to the rail
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RailEvent {
    /// Wheel or trackpad scroll over the rail
    Wheel(WheelDelta),
    /// Key pressed while the rail has focus
    Key(NavKey),
    /// Pointer pressed on the stage
    PointerDown {
        /// Pointer id
        pointer_id: i32,
        /// Client x
        x: f64,
    },
    /// Pointer moved over the stage
    PointerMove {
        /// Client x
        x: f64,
    },
    /// Pointer released
    PointerUp,
    /// Pointer interaction cancelled by the browser
    PointerCancel,
    /// Click landed on a card
    CardClick(usize),
    /// "Previous" button clicked
    PrevButton,
    /// "Next" button clicked
    NextButton,
    /// Window resized
    Resize,
}

/// Work the host must do after an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RailEffects {
    /// Render immediately instead of waiting for the next frame
    pub repaint: bool,
    /// The DOM event's default action must be cancelled
    pub prevent_default: bool,
    /// Pointer capture to take or release
    pub capture: Option<PointerCapture>,
}

/// The focus rail component
#[derive(Debug, Clone)]
pub struct FocusRail {
    items: &'static [RailItem],
    settings: RailSettings,
    motion: RailMotion,
    drag: Option<DragSession>,
    last_drag_moved: bool,
    wheel: WheelDebounce,
    autoplay: Autoplay,
    frame: Option<TimerId>,
    active_index: Option<usize>,
    settled: bool,
}

impl FocusRail {
    /// Create a rail over `items`
    pub fn new(items: &'static [RailItem], settings: RailSettings) -> SiteResult<Self> {
        if items.is_empty() {
            return Err(SiteError::EmptyCarousel {
                component: "focus-rail",
            });
        }
        let autoplay = if settings.autoplay {
            Autoplay::new(settings.autoplay_delay_ms)
        } else {
            Autoplay::disabled(settings.autoplay_delay_ms)
        };
        Ok(Self {
            items,
            wheel: WheelDebounce::new(settings.wheel_lock_ms),
            autoplay,
            settings,
            motion: RailMotion::default(),
            drag: None,
            last_drag_moved: false,
            frame: None,
            active_index: None,
            settled: true,
        })
    }

    /// Rail over the built-in cards
    pub fn builtin(settings: RailSettings) -> SiteResult<Self> {
        Self::new(&RAIL_ITEMS, settings)
    }

    /// First render, frame loop and autoplay start
    pub fn start(&mut self, viewport: Viewport, scheduler: &mut impl Scheduler) -> RailFrame {
        info!(cards = self.items.len(), "focus rail mounted");
        let content = self.sync_content(true);
        let layout = self.layout(viewport);
        if self.frame.is_none() {
            self.frame = Some(scheduler.request_frame());
        }
        self.autoplay.start(scheduler, false);
        RailFrame { layout, content }
    }

    /// Stop the frame loop and autoplay
    pub fn teardown(&mut self, scheduler: &mut impl Scheduler) {
        if let Some(frame) = self.frame.take() {
            scheduler.clear(frame);
        }
        self.autoplay.stop(scheduler);
        self.drag = None;
    }

    /// Cards being shown
    #[must_use]
    pub const fn items(&self) -> &'static [RailItem] {
        self.items
    }

    /// Number of cards
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the rail has no cards
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Settings in use
    #[must_use]
    pub const fn settings(&self) -> &RailSettings {
        &self.settings
    }

    /// Position and spring state
    #[must_use]
    pub const fn motion(&self) -> &RailMotion {
        &self.motion
    }

    /// Card whose copy is currently shown
    #[must_use]
    pub const fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    /// Whether a pointer drag is in progress
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Whether the frame loop is running
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.frame.is_some()
    }

    /// Autoplay state
    #[must_use]
    pub const fn autoplay(&self) -> &Autoplay {
        &self.autoplay
    }

    /// Card layout at the current position
    #[must_use]
    pub fn layout(&self, viewport: Viewport) -> RailLayout {
        RailLayout::compute(self.motion.current, self.items.len(), viewport, &self.settings)
    }

    /// Render without advancing the physics
    pub fn render(&mut self, viewport: Viewport) -> RailFrame {
        let layout = self.layout(viewport);
        let content = self.sync_content(false);
        RailFrame { layout, content }
    }

    /// Advance one animation frame
    pub fn frame(&mut self, viewport: Viewport) -> RailFrame {
        self.motion.step(&self.settings, self.drag.as_ref());

        let settled = self.motion.is_settled();
        if settled && !self.settled {
            debug!(position = self.motion.current, "focus rail settled");
        }
        self.settled = settled;

        let frame = self.render(viewport);
        if self.motion.normalize(self.items.len(), self.settings.rebase_limit) {
            debug!(
                current = self.motion.current,
                target = self.motion.target,
                "focus rail re-based"
            );
        }
        frame
    }

    /// Dispatch a fired timer; returns the frame when it was the animation tick
    pub fn handle_timer(
        &mut self,
        id: TimerId,
        viewport: Viewport,
        scheduler: &mut impl Scheduler,
    ) -> Option<RailFrame> {
        if self.autoplay.owns(id) {
            self.motion.navigate(1);
            return None;
        }
        if self.frame == Some(id) {
            let frame = self.frame(viewport);
            self.frame = Some(scheduler.request_frame());
            return Some(frame);
        }
        None
    }

    /// Dispatch an input event
    pub fn handle(&mut self, event: RailEvent, scheduler: &mut impl Scheduler) -> RailEffects {
        match event {
            RailEvent::Wheel(delta) => {
                let now = scheduler.now_ms();
                let Some(step) = self.wheel.accept(delta, self.settings.wheel_threshold, now) else {
                    return RailEffects::default();
                };
                self.navigate(step, scheduler);
                RailEffects {
                    prevent_default: true,
                    ..RailEffects::default()
                }
            }
            RailEvent::Key(key) => {
                if let Some(step) = key.step() {
                    self.navigate(step, scheduler);
                }
                RailEffects::default()
            }
            RailEvent::PointerDown { pointer_id, x } => {
                self.drag = Some(DragSession::begin(
                    pointer_id,
                    x,
                    self.motion.current,
                    self.settings.click_threshold_px,
                ));
                self.last_drag_moved = false;
                self.autoplay.stop(scheduler);
                RailEffects {
                    capture: Some(PointerCapture::Capture(pointer_id)),
                    ..RailEffects::default()
                }
            }
            RailEvent::PointerMove { x } => {
                if let Some(drag) = self.drag.as_mut() {
                    drag.update(x);
                    self.last_drag_moved = drag.moved();
                }
                RailEffects::default()
            }
            RailEvent::PointerUp | RailEvent::PointerCancel => {
                let Some(drag) = self.drag.take() else {
                    return RailEffects::default();
                };
                let release = drag.finish();
                self.last_drag_moved = release.moved;
                self.motion.release(&release, &self.settings);
                debug!(target = self.motion.target, "focus rail released");
                self.autoplay.start(scheduler, false);
                RailEffects {
                    capture: Some(release.release_capture()),
                    ..RailEffects::default()
                }
            }
            RailEvent::CardClick(index) => {
                if self.last_drag_moved || index >= self.items.len() {
                    return RailEffects::default();
                }
                self.motion.go_to_card(index, self.items.len());
                debug!(card = index, target = self.motion.target, "focus rail card chosen");
                self.restart_autoplay(scheduler);
                RailEffects::default()
            }
            RailEvent::PrevButton => {
                self.navigate(-1, scheduler);
                RailEffects::default()
            }
            RailEvent::NextButton => {
                self.navigate(1, scheduler);
                RailEffects::default()
            }
            RailEvent::Resize => RailEffects {
                repaint: true,
                ..RailEffects::default()
            },
        }
    }

    fn navigate(&mut self, step: i64, scheduler: &mut impl Scheduler) {
        self.motion.navigate(step);
        debug!(target = self.motion.target, "focus rail navigated");
        self.restart_autoplay(scheduler);
    }

    fn restart_autoplay(&mut self, scheduler: &mut impl Scheduler) {
        let blocked = self.is_dragging();
        self.autoplay.restart(scheduler, blocked);
    }

    fn sync_content(&mut self, force: bool) -> Option<ActiveContent> {
        let nearest = self.motion.nearest_index(self.items.len());
        if !force && self.active_index == Some(nearest) {
            return None;
        }
        self.active_index = Some(nearest);
        ActiveContent::for_item(self.items, nearest)
    }
}
