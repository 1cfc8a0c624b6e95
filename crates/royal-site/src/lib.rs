//! Royal Site - interactive behaviour for the Royal School website
//!
//! The page carries four pieces of interactivity:
//!
//! - a **news slider** with coverflow-style slides, pagination bullets,
//!   autoplay, wheel, keyboard and swipe navigation and a highlight panel
//!   that follows the active card;
//! - a **focus rail**, a spring-damped 3D card rail whose continuous
//!   position animates towards an integer target;
//! - **smooth anchor scrolling** for in-page links;
//! - an **English/Arabic switch** that rewrites every `data-i18n` element and
//!   remembers the choice.
//!
//! All behaviour lives in host-independent components driven by explicit
//! events and an injectable [`Scheduler`](core::scheduler::Scheduler).
//! Painters write the computed layouts to a [`Surface`](wasm::Surface),
//! which is the live DOM in browser builds (feature `wasm`) and a
//! [`MockSurface`](wasm::MockSurface) in tests.
//!
//! # Example
//!
//! ```rust
//! use royal_site::prelude::*;
//!
//! let mut sched = ManualScheduler::new();
//! let mut rail = FocusRail::builtin(RailSettings::default()).unwrap();
//! let frame = rail.start(Viewport::default(), &mut sched);
//! assert_eq!(frame.content.unwrap().counter, "1 / 5");
//!
//! rail.handle(RailEvent::NextButton, &mut sched);
//! sched.run_for(2_000, |s, id| {
//!     rail.handle_timer(id, Viewport::default(), s);
//! });
//! assert_eq!(rail.active_index(), Some(1));
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod error;
pub mod i18n;
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
pub mod scroll;

/// Rendering layer - always available for testing
/// (the mock surface runs without browser bindings)
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{RailSettings, SiteConfig, SliderSettings};
    pub use crate::core::layout::{Rect, Viewport};
    pub use crate::core::rail::{FocusRail, RailEffects, RailEvent, RailFrame, RAIL_ITEMS};
    pub use crate::core::scheduler::{ManualScheduler, Scheduler, TimerId, TimerKind};
    pub use crate::core::slider::{NewsSlider, SliderEffects, SliderEvent, SliderLayout};
    pub use crate::core::wheel::WheelDelta;
    pub use crate::core::NavKey;
    pub use crate::error::{SiteError, SiteResult};
    pub use crate::i18n::{
        Language, LanguageSwitch, LanguageUpdate, MemoryStore, PreferenceStore, Translations,
    };
    pub use crate::scroll::anchor_target;
    pub use crate::wasm::{
        paint_language, paint_rail, paint_slider, MockSurface, PagePart, RailPart, SliderPart,
        Surface,
    };

    #[cfg(feature = "wasm")]
    pub use crate::wasm::{mount_site, mount_site_with_config, SiteHandle};
}
