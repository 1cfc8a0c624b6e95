//! Render target abstraction
//!
//! Painters never touch `web_sys` directly. They write to a [`Surface`] keyed
//! by a part enum, which is either the live DOM (feature `wasm`) or the
//! in-memory [`MockSurface`](super::MockSurface) used by tests.

use crate::core::layout::Rect;
use serde::{Deserialize, Serialize};

/// Addressable pieces of the news slider
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SliderPart {
    /// `#newsSliderRoot`
    Root,
    /// `.news-slider__item` by index
    Slide(usize),
    /// `.news__item` inside a slide
    Item(usize),
    /// `.item-bg` highlight panel
    Highlight,
    /// Pagination bullet by index
    Bullet(usize),
}

/// Addressable pieces of the focus rail
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RailPart {
    /// `.focus-rail-card` by index
    Card(usize),
    /// `#focusRailMeta`
    Meta,
    /// `#focusRailTitle`
    Title,
    /// `#focusRailDesc`
    Description,
    /// `#focusRailCounter`
    Counter,
    /// `#focusRailLink`
    Link,
    /// `.focus-rail-copy` wrapper
    Copy,
}

/// Addressable pieces of the page touched by the language switch
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PagePart {
    /// `document.title` (text only)
    Document,
    /// `<html>`
    Html,
    /// `#lang-toggle`
    Toggle,
    /// Every element carrying `data-i18n="key"`
    I18n(String),
}

/// Write access to rendered elements
///
/// Writes to parts that do not exist on the page are ignored.
pub trait Surface<P> {
    /// Set an inline style property
    fn set_style(&mut self, part: P, property: &str, value: &str);

    /// Add (`on`) or remove a class
    fn toggle_class(&mut self, part: P, class: &str, on: bool);

    /// Replace the text content
    fn set_text(&mut self, part: P, text: &str);

    /// Replace the inner markup
    fn set_html(&mut self, part: P, html: &str);

    /// Set an attribute
    fn set_attr(&mut self, part: P, name: &str, value: &str);

    /// Remove an attribute
    fn remove_attr(&mut self, part: P, name: &str);

    /// Bounding box in viewport coordinates
    fn rect(&self, part: P) -> Option<Rect>;

    /// Remove and re-add a class so its CSS animation replays
    fn restart_class(&mut self, part: P, class: &str);
}
