//! In-memory surface for testing painters without a browser
//!
//! Records the observable state of every part (styles, classes, text, markup
//! and attributes) so tests can assert on exactly what a browser would show.

use super::surface::Surface;
use crate::core::layout::Rect;
use std::collections::{BTreeMap, BTreeSet};

/// Recorded state of one element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockNode {
    /// Inline styles
    pub styles: BTreeMap<String, String>,
    /// CSS classes
    pub classes: BTreeSet<String>,
    /// Text content
    pub text: Option<String>,
    /// Inner markup
    pub html: Option<String>,
    /// Attributes
    pub attributes: BTreeMap<String, String>,
    /// How often each class was restarted
    pub restarts: BTreeMap<String, usize>,
}

impl MockNode {
    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Gets an inline style value
    #[must_use]
    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    /// Gets an attribute value
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Mock surface keyed by part
#[derive(Debug, Clone)]
pub struct MockSurface<P: Ord> {
    nodes: BTreeMap<P, MockNode>,
    rects: BTreeMap<P, Rect>,
    writes: usize,
}

impl<P: Ord> Default for MockSurface<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Ord> MockSurface<P> {
    /// Creates an empty surface
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            rects: BTreeMap::new(),
            writes: 0,
        }
    }

    /// Gives a part a bounding box
    #[must_use]
    pub fn with_rect(mut self, part: P, rect: Rect) -> Self {
        self.set_rect(part, rect);
        self
    }

    /// Moves or resizes a part
    pub fn set_rect(&mut self, part: P, rect: Rect) {
        self.rects.insert(part, rect);
    }

    /// Recorded state of a part
    #[must_use]
    pub fn node(&self, part: &P) -> Option<&MockNode> {
        self.nodes.get(part)
    }

    /// Inline style of a part
    #[must_use]
    pub fn style(&self, part: &P, property: &str) -> Option<&str> {
        self.node(part).and_then(|n| n.style(property))
    }

    /// Whether a part carries a class
    #[must_use]
    pub fn has_class(&self, part: &P, class: &str) -> bool {
        self.node(part).is_some_and(|n| n.has_class(class))
    }

    /// Text content of a part
    #[must_use]
    pub fn text(&self, part: &P) -> Option<&str> {
        self.node(part).and_then(|n| n.text.as_deref())
    }

    /// Inner markup of a part
    #[must_use]
    pub fn html(&self, part: &P) -> Option<&str> {
        self.node(part).and_then(|n| n.html.as_deref())
    }

    /// Attribute of a part
    #[must_use]
    pub fn attr(&self, part: &P, name: &str) -> Option<&str> {
        self.node(part).and_then(|n| n.attr(name))
    }

    /// How often `class` was restarted on a part
    #[must_use]
    pub fn restart_count(&self, part: &P, class: &str) -> usize {
        self.node(part)
            .and_then(|n| n.restarts.get(class).copied())
            .unwrap_or(0)
    }

    /// Total number of writes
    #[must_use]
    pub const fn writes(&self) -> usize {
        self.writes
    }

    fn node_mut(&mut self, part: P) -> &mut MockNode {
        self.writes += 1;
        self.nodes.entry(part).or_default()
    }
}

impl<P: Ord> Surface<P> for MockSurface<P> {
    fn set_style(&mut self, part: P, property: &str, value: &str) {
        self.node_mut(part)
            .styles
            .insert(property.to_string(), value.to_string());
    }

    fn toggle_class(&mut self, part: P, class: &str, on: bool) {
        let node = self.node_mut(part);
        if on {
            node.classes.insert(class.to_string());
        } else {
            node.classes.remove(class);
        }
    }

    fn set_text(&mut self, part: P, text: &str) {
        self.node_mut(part).text = Some(text.to_string());
    }

    fn set_html(&mut self, part: P, html: &str) {
        self.node_mut(part).html = Some(html.to_string());
    }

    fn set_attr(&mut self, part: P, name: &str, value: &str) {
        self.node_mut(part)
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn remove_attr(&mut self, part: P, name: &str) {
        self.node_mut(part).attributes.remove(name);
    }

    fn rect(&self, part: P) -> Option<Rect> {
        self.rects.get(&part).copied()
    }

    fn restart_class(&mut self, part: P, class: &str) {
        let node = self.node_mut(part);
        node.classes.insert(class.to_string());
        *node.restarts.entry(class.to_string()).or_insert(0) += 1;
    }
}
