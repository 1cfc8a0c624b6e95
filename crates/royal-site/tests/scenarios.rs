//! End-to-end scenarios through the public API
//!
//! Each test drives a component with the manual scheduler, paints the result
//! on a mock surface and asserts on what a visitor would see.

#![allow(clippy::unwrap_used)]

use royal_site::prelude::*;

const VIEWPORT: Viewport = Viewport::new(1280.0);

fn mounted_slider(len: usize) -> (NewsSlider, ManualScheduler, MockSurface<SliderPart>) {
    let mut sched = ManualScheduler::new();
    let mut slider = NewsSlider::new(len, SliderSettings::default()).unwrap();
    let effects = slider.mount(&mut sched);
    assert!(effects.repaint);
    let mut surface = MockSurface::new();
    paint_slider(&mut surface, &slider.layout(VIEWPORT));
    (slider, sched, surface)
}

fn repaint(slider: &NewsSlider, effects: SliderEffects, surface: &mut MockSurface<SliderPart>) {
    if effects.repaint {
        paint_slider(surface, &slider.layout(VIEWPORT));
    }
}

fn started_rail(settings: RailSettings) -> (FocusRail, ManualScheduler, MockSurface<RailPart>) {
    let mut sched = ManualScheduler::new();
    let mut rail = FocusRail::builtin(settings).unwrap();
    let mut surface = MockSurface::new();
    paint_rail(&mut surface, &rail.start(VIEWPORT, &mut sched));
    (rail, sched, surface)
}

fn run_rail(
    rail: &mut FocusRail,
    sched: &mut ManualScheduler,
    surface: &mut MockSurface<RailPart>,
    ms: u64,
) {
    sched.run_for(ms, |s, id| {
        if let Some(frame) = rail.handle_timer(id, VIEWPORT, s) {
            paint_rail(surface, &frame);
        }
    });
}

// ===== News slider =====

#[test]
fn test_slider_next_and_prev_wrap() {
    let (mut slider, mut sched, mut surface) = mounted_slider(5);

    let effects = slider.handle(SliderEvent::NextButton, &mut sched);
    repaint(&slider, effects, &mut surface);
    assert_eq!(slider.active(), 1);
    assert!(surface.has_class(&SliderPart::Slide(1), "swiper-slide-active"));
    assert!(surface.has_class(&SliderPart::Slide(0), "swiper-slide-prev"));

    let (mut slider, mut sched, mut surface) = mounted_slider(5);
    let effects = slider.handle(SliderEvent::PrevButton, &mut sched);
    repaint(&slider, effects, &mut surface);
    assert_eq!(slider.active(), 4);
    assert!(surface.has_class(&SliderPart::Bullet(4), "is-active"));
    assert!(!surface.has_class(&SliderPart::Bullet(0), "is-active"));
    assert!(surface.has_class(&SliderPart::Slide(0), "swiper-slide-next"));
}

#[test]
fn test_slider_wheel_steps_once_per_lock_window() {
    let (mut slider, mut sched, _) = mounted_slider(5);
    let wheel = SliderEvent::Wheel(WheelDelta::new(0.0, 25.0));

    let effects = slider.handle(wheel, &mut sched);
    assert!(effects.prevent_default);
    assert_eq!(slider.active(), 1);
    assert!(slider.is_wheel_locked());

    let effects = slider.handle(wheel, &mut sched);
    assert_eq!(effects, SliderEffects::default());
    assert_eq!(slider.active(), 1);

    sched.run_for(360, |s, id| {
        slider.handle_timer(id, s);
    });
    assert!(!slider.is_wheel_locked());
    slider.handle(wheel, &mut sched);
    assert_eq!(slider.active(), 2);
}

#[test]
fn test_slider_custom_wheel_lock_window() {
    let mut sched = ManualScheduler::new();
    let settings = SliderSettings::default().with_wheel_lock(100);
    let mut slider = NewsSlider::new(5, settings).unwrap();
    slider.mount(&mut sched);
    let wheel = SliderEvent::Wheel(WheelDelta::new(0.0, 25.0));

    slider.handle(wheel, &mut sched);
    assert_eq!(slider.active(), 1);
    sched.run_for(64, |s, id| {
        slider.handle_timer(id, s);
    });
    assert!(slider.is_wheel_locked());
    slider.handle(wheel, &mut sched);
    assert_eq!(slider.active(), 1);

    sched.run_for(48, |s, id| {
        slider.handle_timer(id, s);
    });
    assert!(!slider.is_wheel_locked());
    slider.handle(wheel, &mut sched);
    assert_eq!(slider.active(), 2);
}

#[test]
fn test_slider_short_press_clicks_long_drag_swipes() {
    let (mut slider, mut sched, _) = mounted_slider(5);

    slider.handle(SliderEvent::PointerDown { pointer_id: 1, x: 500.0 }, &mut sched);
    slider.handle(SliderEvent::PointerMove { x: 503.0 }, &mut sched);
    slider.handle(SliderEvent::PointerUp, &mut sched);
    slider.handle(SliderEvent::CardClick(2), &mut sched);
    assert_eq!(slider.active(), 2);

    slider.handle(SliderEvent::PointerDown { pointer_id: 1, x: 500.0 }, &mut sched);
    slider.handle(SliderEvent::PointerMove { x: 450.0 }, &mut sched);
    let effects = slider.handle(SliderEvent::PointerUp, &mut sched);
    assert!(effects.repaint);
    assert_eq!(effects.capture, Some(royal_site::core::drag::PointerCapture::Release(1)));
    assert_eq!(slider.active(), 3);

    // The click that ends a drag is swallowed
    slider.handle(SliderEvent::CardClick(0), &mut sched);
    assert_eq!(slider.active(), 3);
}

#[test]
fn test_slider_autoplay_cycles_and_highlight_follows() {
    let (mut slider, mut sched, _) = mounted_slider(3);
    let mut surface = MockSurface::new()
        .with_rect(SliderPart::Root, Rect::new(0.0, 0.0, 1280.0, 600.0))
        .with_rect(SliderPart::Item(0), Rect::new(480.0, 100.0, 320.0, 400.0))
        .with_rect(SliderPart::Item(1), Rect::new(800.0, 120.0, 300.0, 360.0))
        .with_rect(SliderPart::Item(2), Rect::new(160.0, 120.0, 300.0, 360.0));

    let mut actives = Vec::new();
    sched.run_for(4200 * 3, |s, id| {
        let effects = slider.handle_timer(id, s);
        if effects.repaint {
            paint_slider(&mut surface, &slider.layout(VIEWPORT));
            actives.push(slider.active());
        }
    });
    assert_eq!(actives, vec![1, 2, 0]);
    assert_eq!(
        surface.style(&SliderPart::Highlight, "transform"),
        Some("translate3d(480px, 100px, 0)")
    );
    assert_eq!(surface.style(&SliderPart::Highlight, "width"), Some("320px"));
}

// ===== Focus rail =====

#[test]
fn test_rail_targets_accumulate_and_take_short_way() {
    let (mut rail, mut sched, mut surface) = started_rail(RailSettings::default());

    rail.handle(RailEvent::NextButton, &mut sched);
    assert_eq!(rail.motion().target, 1.0);
    run_rail(&mut rail, &mut sched, &mut surface, 48);
    rail.handle(RailEvent::NextButton, &mut sched);
    assert_eq!(rail.motion().target, 2.0);
    assert!(rail.motion().current < 2.0);

    rail.handle(RailEvent::CardClick(4), &mut sched);
    assert_eq!(rail.motion().target, 4.0);

    run_rail(&mut rail, &mut sched, &mut surface, 2000);
    assert!(rail.motion().is_settled());
    assert_eq!(rail.active_index(), Some(4));
    assert_eq!(surface.text(&RailPart::Counter), Some("5 / 5"));
    assert_eq!(surface.text(&RailPart::Title), Some(RAIL_ITEMS[4].title));
    assert!(surface.has_class(&RailPart::Card(4), "is-active"));
    assert!(!surface.has_class(&RailPart::Card(0), "is-active"));
}

#[test]
fn test_rail_click_versus_drag() {
    let settings = RailSettings::default().with_autoplay(false);
    let (mut rail, mut sched, mut surface) = started_rail(settings);

    rail.handle(RailEvent::PointerDown { pointer_id: 7, x: 600.0 }, &mut sched);
    rail.handle(RailEvent::PointerMove { x: 603.0 }, &mut sched);
    rail.handle(RailEvent::PointerUp, &mut sched);
    rail.handle(RailEvent::CardClick(3), &mut sched);
    assert_eq!(rail.motion().target, -2.0);
    run_rail(&mut rail, &mut sched, &mut surface, 2000);
    assert_eq!(rail.active_index(), Some(3));

    let start = rail.motion().target;
    rail.handle(RailEvent::PointerDown { pointer_id: 7, x: 600.0 }, &mut sched);
    rail.handle(RailEvent::PointerMove { x: 550.0 }, &mut sched);
    rail.handle(RailEvent::PointerUp, &mut sched);
    rail.handle(RailEvent::CardClick(0), &mut sched);
    assert_eq!(rail.motion().target, start + 1.0);

    run_rail(&mut rail, &mut sched, &mut surface, 2000);
    assert_eq!(rail.active_index(), Some(4));
    assert_eq!(surface.attr(&RailPart::Link, "href"), RAIL_ITEMS[4].href);
}

#[test]
fn test_rail_wheel_prevents_scroll_only_when_it_navigates() {
    let (mut rail, mut sched, _) = started_rail(RailSettings::default());

    let small = rail.handle(RailEvent::Wheel(WheelDelta::new(4.0, 2.0)), &mut sched);
    assert!(!small.prevent_default);
    let big = rail.handle(RailEvent::Wheel(WheelDelta::new(0.0, -60.0)), &mut sched);
    assert!(big.prevent_default);
    assert_eq!(rail.motion().target, -1.0);
}

// ===== Language switch =====

#[test]
fn test_stored_language_applied_then_toggled() {
    let translations = Translations::builtin().unwrap();
    let mut store = MemoryStore::new().with("language", "ar");
    let mut switch = LanguageSwitch::load(&store);
    let mut surface: MockSurface<PagePart> = MockSurface::new();

    paint_language(&mut surface, &switch.apply(&translations));
    assert_eq!(surface.attr(&PagePart::Html, "lang"), Some("ar"));
    assert_eq!(surface.text(&PagePart::Toggle), Some("EN"));

    let update = switch.toggle(&mut store, &translations);
    paint_language(&mut surface, &update);
    assert_eq!(store.get("language").as_deref(), Some("en"));
    assert_eq!(surface.attr(&PagePart::Html, "lang"), Some("en"));
    assert_eq!(surface.text(&PagePart::Toggle), Some("ع"));
    assert_eq!(surface.html(&PagePart::I18n("nav-news".to_string())), Some("News"));
}

#[test]
fn test_unknown_stored_language_falls_back_to_english() {
    let store = MemoryStore::new().with("language", "fr");
    assert_eq!(LanguageSwitch::load(&store).current(), Language::En);
}

// ===== Anchors =====

#[test]
fn test_anchor_links() {
    assert_eq!(anchor_target(Some("#contact")), Some("contact"));
    assert_eq!(anchor_target(Some("#")), None);
}
