//! Rendering layer
//!
//! Painters turn component layouts into surface writes. The live DOM
//! surface and the entry points exported to JavaScript sit behind the
//! `wasm` feature; [`MockSurface`] lets everything else run natively.

#[cfg(feature = "wasm")]
mod browser;
mod mock;
mod paint;
mod surface;

#[cfg(feature = "wasm")]
pub use browser::{mount_site, mount_site_with_config, BrowserScheduler, SiteHandle};
pub use mock::{MockNode, MockSurface};
pub use paint::{
    label_bullets, paint_active_content, paint_highlight, paint_language, paint_rail,
    paint_slider,
};
pub use surface::{PagePart, RailPart, SliderPart, Surface};
