//! Write computed layouts onto a surface.

use super::surface::{PagePart, RailPart, SliderPart, Surface};
use crate::core::layout::{css_number, HighlightBox};
use crate::core::rail::{ActiveContent, RailFrame};
use crate::core::slider::{bullet_label, SliderLayout};
use crate::i18n::LanguageUpdate;

/// Label every pagination bullet (done once, when the bullets are built)
pub fn label_bullets(surface: &mut impl Surface<SliderPart>, count: usize) {
    for index in 0..count {
        surface.set_attr(SliderPart::Bullet(index), "aria-label", &bullet_label(index));
    }
}

/// Paint every slide, item, bullet and the highlight panel
pub fn paint_slider(surface: &mut impl Surface<SliderPart>, layout: &SliderLayout) {
    for slide in &layout.slides {
        let part = SliderPart::Slide(slide.index);
        surface.set_style(part, "transform", &slide.transform_css());
        surface.set_style(part, "opacity", &css_number(slide.opacity));
        surface.set_style(part, "filter", &slide.filter_css());
        surface.set_style(part, "z-index", &slide.z_index.to_string());
        surface.toggle_class(part, "is-hidden", slide.hidden);
        surface.toggle_class(part, "swiper-slide-active", slide.active);
        surface.toggle_class(part, "swiper-slide-prev", slide.prev);
        surface.toggle_class(part, "swiper-slide-next", slide.next);

        surface.toggle_class(SliderPart::Item(slide.index), "active", slide.active);
        surface.toggle_class(
            SliderPart::Bullet(slide.index),
            "is-active",
            layout.bullet_active(slide.index),
        );
    }
    paint_highlight(surface, layout.active);
}

/// Cover the active item with the highlight panel
///
/// Reads rects, so it must run after the slide styles were written.
pub fn paint_highlight(surface: &mut impl Surface<SliderPart>, active: usize) {
    let (Some(root), Some(item)) = (
        surface.rect(SliderPart::Root),
        surface.rect(SliderPart::Item(active)),
    ) else {
        return;
    };
    let panel = HighlightBox::overlay(item, root);
    surface.set_style(SliderPart::Highlight, "width", &format!("{}px", css_number(panel.width)));
    surface.set_style(SliderPart::Highlight, "height", &format!("{}px", css_number(panel.height)));
    surface.set_style(SliderPart::Highlight, "transform", &panel.transform_css());
    surface.toggle_class(SliderPart::Highlight, "active", true);
}

/// Paint every card, and the copy when it changed
pub fn paint_rail(surface: &mut impl Surface<RailPart>, frame: &RailFrame) {
    for card in &frame.layout.cards {
        let part = RailPart::Card(card.index);
        surface.toggle_class(part, "is-active", card.active);
        surface.set_style(part, "transform", &card.transform_css());
        surface.set_style(part, "opacity", &css_number(card.opacity));
        surface.set_style(part, "filter", &card.filter_css());
        surface.set_style(part, "z-index", &card.z_index.to_string());
        surface.set_style(part, "pointer-events", card.pointer_events_css());
    }
    if let Some(content) = &frame.content {
        paint_active_content(surface, content);
    }
}

/// Replace the copy beside the rail
pub fn paint_active_content(surface: &mut impl Surface<RailPart>, content: &ActiveContent) {
    surface.restart_class(RailPart::Copy, "is-switching");
    surface.set_text(RailPart::Meta, content.meta);
    surface.set_text(RailPart::Title, content.title);
    surface.set_text(RailPart::Description, content.description);
    surface.set_text(RailPart::Counter, &content.counter);
    if let Some(href) = content.href {
        surface.set_attr(RailPart::Link, "href", href);
        surface.toggle_class(RailPart::Link, "is-hidden", false);
    } else {
        surface.toggle_class(RailPart::Link, "is-hidden", true);
        surface.remove_attr(RailPart::Link, "href");
    }
}

/// Apply a language switch to the page
pub fn paint_language(surface: &mut impl Surface<PagePart>, update: &LanguageUpdate) {
    for (key, markup) in &update.entries {
        surface.set_html(PagePart::I18n(key.clone()), markup);
    }
    if let Some(title) = &update.title {
        surface.set_text(PagePart::Document, title);
    }
    surface.set_attr(PagePart::Html, "lang", update.html_lang);
    surface.set_attr(PagePart::Html, "dir", update.dir);
    surface.set_text(PagePart::Toggle, update.toggle_label);
}
