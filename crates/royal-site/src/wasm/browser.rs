//! Browser WASM bindings
//!
//! Locates the page elements, translates DOM events into component events,
//! executes the returned effects and backs the [`Scheduler`] with
//! `setInterval`/`setTimeout`/`requestAnimationFrame`.
//!
//! Every component is mounted independently: a missing element disables
//! only the component that needs it and is reported on the console.

use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::Hash;
use std::rc::{Rc, Weak};

use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    console, AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement,
    KeyboardEvent, NodeList, PointerEvent, ScrollBehavior, ScrollIntoViewOptions, Storage,
    WheelEvent, Window,
};

use crate::config::{RailSettings, SiteConfig, SliderSettings};
use crate::core::drag::PointerCapture;
use crate::core::layout::{Rect, Viewport};
use crate::core::rail::{FocusRail, RailEffects, RailEvent};
use crate::core::scheduler::{Scheduler, TimerId, TimerKind};
use crate::core::slider::{NewsSlider, SliderEffects, SliderEvent};
use crate::core::wheel::WheelDelta;
use crate::core::NavKey;
use crate::error::{SiteError, SiteResult};
use crate::i18n::{LanguageSwitch, PreferenceStore, Translations};
use crate::scroll::{anchor_target, ANCHOR_SELECTOR};
use crate::wasm::paint::{label_bullets, paint_language, paint_rail, paint_slider};
use crate::wasm::surface::{PagePart, RailPart, SliderPart, Surface};

// =============================================================================
// Scheduler
// =============================================================================

type TimerSink = Rc<dyn Fn(TimerId)>;

/// Components that receive fired timers
trait TimerTarget {
    fn on_timer(&mut self, id: TimerId);
}

fn timer_sink<H: TimerTarget + 'static>(host: Weak<RefCell<H>>) -> TimerSink {
    Rc::new(move |id| {
        let Some(host) = host.upgrade() else {
            return;
        };
        if let Ok(mut host) = host.try_borrow_mut() {
            host.on_timer(id);
        };
    })
}

/// A registered host timer; dropping it frees the JS callback
#[derive(Debug)]
struct HostTimer {
    kind: TimerKind,
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

/// [`Scheduler`] backed by the window's timer functions
pub struct BrowserScheduler {
    window: Window,
    sink: TimerSink,
    next_id: u64,
    timers: HashMap<TimerId, HostTimer>,
}

impl std::fmt::Debug for BrowserScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowserScheduler")
            .field("next_id", &self.next_id)
            .field("timers", &self.timers.len())
            .finish_non_exhaustive()
    }
}

impl BrowserScheduler {
    fn new(window: Window, sink: TimerSink) -> Self {
        Self {
            window,
            sink,
            next_id: 1,
            timers: HashMap::new(),
        }
    }

    /// Forget a one-shot handle once the host has run it
    fn fired(&mut self, id: TimerId) {
        if self
            .timers
            .get(&id)
            .is_some_and(|timer| timer.kind != TimerKind::Interval)
        {
            self.timers.remove(&id);
        }
    }

    /// Allocate an id and hand the host a callback that reports it
    fn register(
        &mut self,
        kind: TimerKind,
        arm: impl FnOnce(&Window, &js_sys::Function) -> Result<i32, JsValue>,
    ) -> TimerId {
        let id = TimerId::new(self.next_id);
        self.next_id += 1;

        let sink = Rc::clone(&self.sink);
        let callback = Closure::<dyn FnMut()>::new(move || sink(id));
        let handle = arm(&self.window, callback.as_ref().unchecked_ref());
        if let Some(handle) = ok_or_report(handle, kind.host_name()) {
            self.timers.insert(
                id,
                HostTimer {
                    kind,
                    handle,
                    _callback: callback,
                },
            );
        }
        id
    }
}

trait HostName {
    fn host_name(self) -> &'static str;
}

impl HostName for TimerKind {
    fn host_name(self) -> &'static str {
        match self {
            TimerKind::Interval => "setInterval",
            TimerKind::Timeout => "setTimeout",
            TimerKind::Frame => "requestAnimationFrame",
        }
    }
}

impl Scheduler for BrowserScheduler {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    fn set_interval(&mut self, period_ms: u32) -> TimerId {
        self.register(TimerKind::Interval, |window, callback| {
            window.set_interval_with_callback_and_timeout_and_arguments_0(
                callback,
                millis(period_ms),
            )
        })
    }

    fn set_timeout(&mut self, delay_ms: u32) -> TimerId {
        self.register(TimerKind::Timeout, |window, callback| {
            window.set_timeout_with_callback_and_timeout_and_arguments_0(
                callback,
                millis(delay_ms),
            )
        })
    }

    fn request_frame(&mut self) -> TimerId {
        self.register(TimerKind::Frame, |window, callback| {
            window.request_animation_frame(callback)
        })
    }

    fn clear(&mut self, id: TimerId) {
        let Some(timer) = self.timers.remove(&id) else {
            return;
        };
        match timer.kind {
            TimerKind::Interval => self.window.clear_interval_with_handle(timer.handle),
            TimerKind::Timeout => self.window.clear_timeout_with_handle(timer.handle),
            TimerKind::Frame => {
                ok_or_report(
                    self.window.cancel_animation_frame(timer.handle),
                    "cancelAnimationFrame",
                );
            }
        }
    }
}

fn millis(ms: u32) -> i32 {
    i32::try_from(ms).unwrap_or(i32::MAX)
}

// =============================================================================
// DOM surfaces
// =============================================================================

/// Surface over elements registered per part
#[derive(Debug)]
struct DomSurface<P> {
    parts: HashMap<P, Element>,
}

impl<P: Eq + Hash> DomSurface<P> {
    fn new() -> Self {
        Self {
            parts: HashMap::new(),
        }
    }

    fn insert(&mut self, part: P, element: Element) {
        self.parts.insert(part, element);
    }

    fn element(&self, part: &P) -> Option<&Element> {
        self.parts.get(part)
    }
}

impl<P: Eq + Hash> Surface<P> for DomSurface<P> {
    fn set_style(&mut self, part: P, property: &str, value: &str) {
        if let Some(element) = self.element(&part) {
            set_style(element, property, value);
        }
    }

    fn toggle_class(&mut self, part: P, class: &str, on: bool) {
        if let Some(element) = self.element(&part) {
            toggle_class(element, class, on);
        }
    }

    fn set_text(&mut self, part: P, text: &str) {
        if let Some(element) = self.element(&part) {
            element.set_text_content(Some(text));
        }
    }

    fn set_html(&mut self, part: P, html: &str) {
        if let Some(element) = self.element(&part) {
            element.set_inner_html(html);
        }
    }

    fn set_attr(&mut self, part: P, name: &str, value: &str) {
        if let Some(element) = self.element(&part) {
            ok_or_report(element.set_attribute(name, value), "setAttribute");
        }
    }

    fn remove_attr(&mut self, part: P, name: &str) {
        if let Some(element) = self.element(&part) {
            ok_or_report(element.remove_attribute(name), "removeAttribute");
        }
    }

    fn rect(&self, part: P) -> Option<Rect> {
        self.element(&part).map(client_rect)
    }

    fn restart_class(&mut self, part: P, class: &str) {
        if let Some(element) = self.element(&part) {
            restart_class(element, class);
        }
    }
}

/// Surface over the document for the language switch
#[derive(Debug)]
struct PageSurface {
    document: Document,
    toggle: Option<Element>,
}

impl PageSurface {
    fn elements(&self, part: &PagePart) -> Vec<Element> {
        match part {
            PagePart::Document => Vec::new(),
            PagePart::Html => self.document.document_element().into_iter().collect(),
            PagePart::Toggle => self.toggle.iter().cloned().collect(),
            PagePart::I18n(key) => self
                .document
                .query_selector_all(&format!("[data-i18n=\"{key}\"]"))
                .map(elements)
                .unwrap_or_default(),
        }
    }
}

impl Surface<PagePart> for PageSurface {
    fn set_style(&mut self, part: PagePart, property: &str, value: &str) {
        for element in self.elements(&part) {
            set_style(&element, property, value);
        }
    }

    fn toggle_class(&mut self, part: PagePart, class: &str, on: bool) {
        for element in self.elements(&part) {
            toggle_class(&element, class, on);
        }
    }

    fn set_text(&mut self, part: PagePart, text: &str) {
        if part == PagePart::Document {
            self.document.set_title(text);
            return;
        }
        for element in self.elements(&part) {
            element.set_text_content(Some(text));
        }
    }

    fn set_html(&mut self, part: PagePart, html: &str) {
        for element in self.elements(&part) {
            element.set_inner_html(html);
        }
    }

    fn set_attr(&mut self, part: PagePart, name: &str, value: &str) {
        for element in self.elements(&part) {
            ok_or_report(element.set_attribute(name, value), "setAttribute");
        }
    }

    fn remove_attr(&mut self, part: PagePart, name: &str) {
        for element in self.elements(&part) {
            ok_or_report(element.remove_attribute(name), "removeAttribute");
        }
    }

    fn rect(&self, part: PagePart) -> Option<Rect> {
        self.elements(&part).first().map(client_rect)
    }

    fn restart_class(&mut self, part: PagePart, class: &str) {
        for element in self.elements(&part) {
            restart_class(&element, class);
        }
    }
}

fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        ok_or_report(html.style().set_property(property, value), "style.setProperty");
    }
}

fn toggle_class(element: &Element, class: &str, on: bool) {
    ok_or_report(
        element.class_list().toggle_with_force(class, on),
        "classList.toggle",
    );
}

fn restart_class(element: &Element, class: &str) {
    let classes = element.class_list();
    ok_or_report(classes.remove_1(class), "classList.remove");
    // Reading layout flushes the removal so the animation replays
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        let _ = html.offset_width();
    }
    ok_or_report(classes.add_1(class), "classList.add");
}

fn client_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn query(scope: &Element, selector: &str) -> Option<Element> {
    scope.query_selector(selector).ok().flatten()
}

fn query_all(scope: &Element, selector: &str) -> Vec<Element> {
    scope
        .query_selector_all(selector)
        .map(elements)
        .unwrap_or_default()
}

fn required(scope: &Element, component: &'static str, selector: &str) -> SiteResult<Element> {
    query(scope, selector).ok_or_else(|| SiteError::missing_element(component, selector))
}

fn by_id(document: &Document, component: &'static str, id: &str) -> SiteResult<Element> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| SiteError::missing_element(component, format!("#{id}")))
}

fn create(document: &Document, tag: &str, class: Option<&str>) -> Option<Element> {
    let element = ok_or_report(document.create_element(tag), "createElement")?;
    if let Some(class) = class {
        element.set_class_name(class);
    }
    Some(element)
}

fn append(parent: &Element, child: &Element) {
    ok_or_report(parent.append_child(child), "appendChild");
}

fn inner_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|width| width.as_f64())
        .unwrap_or_else(|| Viewport::default().width)
}

fn apply_capture(target: &Element, capture: PointerCapture) {
    match capture {
        PointerCapture::Capture(id) => {
            ok_or_report(target.set_pointer_capture(id), "setPointerCapture");
        }
        PointerCapture::Release(id) => {
            if target.has_pointer_capture(id) {
                ok_or_report(target.release_pointer_capture(id), "releasePointerCapture");
            }
        }
    }
}

// =============================================================================
// Event plumbing
// =============================================================================

fn listen<H: 'static>(
    target: &EventTarget,
    kind: &str,
    host: &Rc<RefCell<H>>,
    handler: impl Fn(&mut H, &Event) + 'static,
) {
    attach(target, kind, host, None, handler);
}

/// Listener allowed to call `preventDefault` on scroll-blocking events
fn listen_active<H: 'static>(
    target: &EventTarget,
    kind: &str,
    host: &Rc<RefCell<H>>,
    handler: impl Fn(&mut H, &Event) + 'static,
) {
    let options = AddEventListenerOptions::new();
    options.set_passive(false);
    attach(target, kind, host, Some(&options), handler);
}

fn attach<H: 'static>(
    target: &EventTarget,
    kind: &str,
    host: &Rc<RefCell<H>>,
    options: Option<&AddEventListenerOptions>,
    handler: impl Fn(&mut H, &Event) + 'static,
) {
    let host = Rc::clone(host);
    let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if let Ok(mut host) = host.try_borrow_mut() {
            handler(&mut host, &event);
        }
    });
    let function = callback.as_ref().unchecked_ref();
    let result = match options {
        Some(options) => target.add_event_listener_with_callback_and_add_event_listener_options(
            kind, function, options,
        ),
        None => target.add_event_listener_with_callback(kind, function),
    };
    ok_or_report(result, "addEventListener");
    // Listeners stay attached for the lifetime of the page
    callback.forget();
}

fn pointer_down(event: &Event) -> Option<(i32, f64)> {
    let pointer = event.dyn_ref::<PointerEvent>()?;
    Some((pointer.pointer_id(), f64::from(pointer.client_x())))
}

fn pointer_x(event: &Event) -> Option<f64> {
    event
        .dyn_ref::<PointerEvent>()
        .map(|pointer| f64::from(pointer.client_x()))
}

fn wheel_delta(event: &Event) -> Option<WheelDelta> {
    event
        .dyn_ref::<WheelEvent>()
        .map(|wheel| WheelDelta::new(wheel.delta_x(), wheel.delta_y()))
}

fn nav_key(event: &Event) -> Option<NavKey> {
    event
        .dyn_ref::<KeyboardEvent>()
        .map(|key| NavKey::from_key(&key.key()))
}

fn target_closest(event: &Event, selector: &str) -> Option<Element> {
    event
        .target()?
        .dyn_into::<Element>()
        .ok()?
        .closest(selector)
        .ok()
        .flatten()
}

// =============================================================================
// News slider
// =============================================================================

const SLIDER: &str = "news-slider";

#[derive(Debug)]
struct SliderHost {
    slider: NewsSlider,
    scheduler: BrowserScheduler,
    surface: DomSurface<SliderPart>,
    window: Window,
    track: Element,
    slides: Vec<Element>,
    active: bool,
}

impl SliderHost {
    fn viewport(&self) -> Viewport {
        Viewport::new(inner_width(&self.window))
    }

    fn mount(&mut self) {
        let effects = self.slider.mount(&mut self.scheduler);
        self.apply(effects, None);
    }

    fn dispatch(&mut self, event: SliderEvent, dom_event: &Event) {
        if !self.active {
            return;
        }
        let effects = self.slider.handle(event, &mut self.scheduler);
        self.apply(effects, Some(dom_event));
    }

    fn apply(&mut self, effects: SliderEffects, dom_event: Option<&Event>) {
        if effects.prevent_default {
            if let Some(event) = dom_event {
                event.prevent_default();
            }
        }
        if let Some(capture) = effects.capture {
            apply_capture(&self.track, capture);
        }
        if effects.repaint {
            let layout = self.slider.layout(self.viewport());
            paint_slider(&mut self.surface, &layout);
        }
    }

    fn teardown(&mut self) {
        self.active = false;
        self.slider.teardown(&mut self.scheduler);
    }
}

impl TimerTarget for SliderHost {
    fn on_timer(&mut self, id: TimerId) {
        self.scheduler.fired(id);
        if !self.active {
            return;
        }
        let effects = self.slider.handle_timer(id, &mut self.scheduler);
        self.apply(effects, None);
    }
}

fn mount_slider(
    document: &Document,
    window: &Window,
    settings: SliderSettings,
) -> SiteResult<Rc<RefCell<SliderHost>>> {
    let root = by_id(document, SLIDER, "newsSliderRoot")?;
    let slider_el = required(&root, SLIDER, ".news-slider")?;
    let track = required(&root, SLIDER, ".news-slider__wrp")?;
    let pagination = required(&root, SLIDER, ".news-slider__pagination")?;
    let highlight = required(&root, SLIDER, ".item-bg")?;
    let slides = query_all(&root, ".news-slider__item");
    if slides.is_empty() {
        return Err(SiteError::missing_element(SLIDER, ".news-slider__item"));
    }
    let slider = NewsSlider::new(slides.len(), settings)?;

    let mut surface = DomSurface::new();
    surface.insert(SliderPart::Root, root.clone());
    surface.insert(SliderPart::Highlight, highlight);
    let mut items = Vec::new();
    for (index, slide) in slides.iter().enumerate() {
        surface.insert(SliderPart::Slide(index), slide.clone());
        if let Some(item) = query(slide, ".news__item") {
            surface.insert(SliderPart::Item(index), item.clone());
            items.push(item);
        }
    }

    pagination.set_inner_html("");
    let mut bullets = Vec::new();
    for index in 0..slides.len() {
        let Some(bullet) = create(document, "button", None) else {
            continue;
        };
        ok_or_report(bullet.set_attribute("type", "button"), "setAttribute");
        append(&pagination, &bullet);
        surface.insert(SliderPart::Bullet(index), bullet.clone());
        bullets.push((index, bullet));
    }
    label_bullets(&mut surface, slides.len());

    let host = Rc::new_cyclic(|weak| {
        RefCell::new(SliderHost {
            slider,
            scheduler: BrowserScheduler::new(window.clone(), timer_sink(weak.clone())),
            surface,
            window: window.clone(),
            track: track.clone(),
            slides,
            active: true,
        })
    });

    for item in &items {
        listen(item, "click", &host, |_, event| event.prevent_default());
    }
    for (index, bullet) in bullets {
        listen(&bullet, "click", &host, move |h, event| {
            h.dispatch(SliderEvent::BulletClick(index), event);
        });
    }
    listen_active(&slider_el, "wheel", &host, |h, event| {
        if let Some(delta) = wheel_delta(event) {
            h.dispatch(SliderEvent::Wheel(delta), event);
        }
    });
    listen(&slider_el, "keydown", &host, |h, event| {
        if let Some(key) = nav_key(event) {
            h.dispatch(SliderEvent::Key(key), event);
        }
    });
    listen(&track, "pointerdown", &host, |h, event| {
        if let Some((pointer_id, x)) = pointer_down(event) {
            h.dispatch(SliderEvent::PointerDown { pointer_id, x }, event);
        }
    });
    listen(&track, "pointermove", &host, |h, event| {
        if let Some(x) = pointer_x(event) {
            h.dispatch(SliderEvent::PointerMove { x }, event);
        }
    });
    listen(&track, "pointerup", &host, |h, event| {
        h.dispatch(SliderEvent::PointerUp, event);
    });
    listen(&track, "pointercancel", &host, |h, event| {
        h.dispatch(SliderEvent::PointerCancel, event);
    });
    listen(&track, "click", &host, |h, event| {
        let Some(card) = target_closest(event, ".news-slider__item") else {
            return;
        };
        if let Some(index) = h.slides.iter().position(|slide| *slide == card) {
            h.dispatch(SliderEvent::CardClick(index), event);
        }
    });
    if let Some(prev) = query(&root, ".news-slider-prev") {
        listen(&prev, "click", &host, |h, event| {
            h.dispatch(SliderEvent::PrevButton, event);
        });
    }
    if let Some(next) = query(&root, ".news-slider-next") {
        listen(&next, "click", &host, |h, event| {
            h.dispatch(SliderEvent::NextButton, event);
        });
    }
    listen(window, "resize", &host, |h, event| {
        h.dispatch(SliderEvent::Resize, event);
    });

    host.borrow_mut().mount();
    Ok(host)
}

// =============================================================================
// Focus rail
// =============================================================================

const RAIL: &str = "focus-rail";

#[derive(Debug)]
struct RailHost {
    rail: FocusRail,
    scheduler: BrowserScheduler,
    surface: DomSurface<RailPart>,
    window: Window,
    root: Element,
    stage: Element,
    active: bool,
}

impl RailHost {
    fn viewport(&self) -> Viewport {
        let stage = match self.stage.client_width() {
            0 => self.root.client_width(),
            width => width,
        };
        Viewport::new(inner_width(&self.window)).with_stage_width(f64::from(stage))
    }

    fn mount(&mut self) {
        let viewport = self.viewport();
        let frame = self.rail.start(viewport, &mut self.scheduler);
        paint_rail(&mut self.surface, &frame);
    }

    fn dispatch(&mut self, event: RailEvent, dom_event: &Event) {
        if !self.active {
            return;
        }
        let effects = self.rail.handle(event, &mut self.scheduler);
        self.apply(effects, dom_event);
    }

    fn apply(&mut self, effects: RailEffects, dom_event: &Event) {
        if effects.prevent_default {
            dom_event.prevent_default();
        }
        if let Some(capture) = effects.capture {
            apply_capture(&self.stage, capture);
        }
        if effects.repaint {
            let frame = self.rail.render(self.viewport());
            paint_rail(&mut self.surface, &frame);
        }
    }

    fn teardown(&mut self) {
        self.active = false;
        self.rail.teardown(&mut self.scheduler);
    }
}

impl TimerTarget for RailHost {
    fn on_timer(&mut self, id: TimerId) {
        self.scheduler.fired(id);
        if !self.active {
            return;
        }
        let viewport = self.viewport();
        if let Some(frame) = self.rail.handle_timer(id, viewport, &mut self.scheduler) {
            paint_rail(&mut self.surface, &frame);
        }
    }
}

fn build_cards(
    document: &Document,
    stage: &Element,
    rail: &FocusRail,
    surface: &mut DomSurface<RailPart>,
) {
    for (index, item) in rail.items().iter().enumerate() {
        let Some(card) = create(document, "button", Some("focus-rail-card")) else {
            continue;
        };
        ok_or_report(card.set_attribute("type", "button"), "setAttribute");
        ok_or_report(card.set_attribute("data-index", &index.to_string()), "setAttribute");
        ok_or_report(card.set_attribute("aria-label", item.title), "setAttribute");

        if let (Some(inner), Some(media), Some(image)) = (
            create(document, "div", Some("focus-rail-card-inner")),
            create(document, "div", Some("focus-rail-media")),
            create(document, "img", None),
        ) {
            ok_or_report(image.set_attribute("loading", "lazy"), "setAttribute");
            ok_or_report(image.set_attribute("alt", item.title), "setAttribute");
            ok_or_report(image.set_attribute("src", item.image_src), "setAttribute");
            append(&media, &image);
            append(&inner, &media);
            append(&card, &inner);
        }
        append(stage, &card);
        surface.insert(RailPart::Card(index), card);
    }
}

fn mount_rail(
    document: &Document,
    window: &Window,
    settings: RailSettings,
) -> SiteResult<Rc<RefCell<RailHost>>> {
    let root = by_id(document, RAIL, "focusRail")?;
    let stage = by_id(document, RAIL, "focusRailStage")?;
    let mut surface = DomSurface::new();
    surface.insert(RailPart::Meta, by_id(document, RAIL, "focusRailMeta")?);
    surface.insert(RailPart::Title, by_id(document, RAIL, "focusRailTitle")?);
    surface.insert(RailPart::Description, by_id(document, RAIL, "focusRailDesc")?);
    surface.insert(RailPart::Counter, by_id(document, RAIL, "focusRailCounter")?);
    surface.insert(RailPart::Link, by_id(document, RAIL, "focusRailLink")?);
    if let Some(copy) = document.query_selector(".focus-rail-copy").ok().flatten() {
        surface.insert(RailPart::Copy, copy);
    }

    let rail = FocusRail::builtin(settings)?;
    build_cards(document, &stage, &rail, &mut surface);

    let host = Rc::new_cyclic(|weak| {
        RefCell::new(RailHost {
            rail,
            scheduler: BrowserScheduler::new(window.clone(), timer_sink(weak.clone())),
            surface,
            window: window.clone(),
            root: root.clone(),
            stage: stage.clone(),
            active: true,
        })
    });

    listen(&stage, "pointerdown", &host, |h, event| {
        if let Some((pointer_id, x)) = pointer_down(event) {
            h.dispatch(RailEvent::PointerDown { pointer_id, x }, event);
        }
    });
    listen(&stage, "pointermove", &host, |h, event| {
        if let Some(x) = pointer_x(event) {
            h.dispatch(RailEvent::PointerMove { x }, event);
        }
    });
    listen(&stage, "pointerup", &host, |h, event| {
        h.dispatch(RailEvent::PointerUp, event);
    });
    listen(&stage, "pointercancel", &host, |h, event| {
        h.dispatch(RailEvent::PointerCancel, event);
    });
    listen(&stage, "click", &host, |h, event| {
        let index = target_closest(event, ".focus-rail-card")
            .and_then(|card| card.get_attribute("data-index"))
            .and_then(|value| value.parse::<usize>().ok());
        if let Some(index) = index {
            h.dispatch(RailEvent::CardClick(index), event);
        }
    });
    listen_active(&root, "wheel", &host, |h, event| {
        if let Some(delta) = wheel_delta(event) {
            h.dispatch(RailEvent::Wheel(delta), event);
        }
    });
    listen(&root, "keydown", &host, |h, event| {
        if let Some(key) = nav_key(event) {
            h.dispatch(RailEvent::Key(key), event);
        }
    });
    if let Some(prev) = document.get_element_by_id("focusRailPrev") {
        listen(&prev, "click", &host, |h, event| {
            h.dispatch(RailEvent::PrevButton, event);
        });
    }
    if let Some(next) = document.get_element_by_id("focusRailNext") {
        listen(&next, "click", &host, |h, event| {
            h.dispatch(RailEvent::NextButton, event);
        });
    }
    listen(window, "resize", &host, |h, event| {
        h.dispatch(RailEvent::Resize, event);
    });

    host.borrow_mut().mount();
    Ok(host)
}

// =============================================================================
// Language and anchors
// =============================================================================

/// `localStorage` as a [`PreferenceStore`]
#[derive(Debug)]
struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    fn new(window: &Window) -> Self {
        Self {
            storage: window.local_storage().ok().flatten(),
        }
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        self.storage
            .as_ref()
            .is_some_and(|storage| storage.set_item(key, value).is_ok())
    }
}

#[derive(Debug)]
struct LanguageHost {
    switch: LanguageSwitch,
    store: LocalStorage,
    surface: PageSurface,
    translations: Translations,
}

fn mount_language(document: &Document, window: &Window) -> SiteResult<()> {
    let translations = Translations::builtin()?;
    let store = LocalStorage::new(window);
    let switch = LanguageSwitch::load(&store);
    let toggle = document.get_element_by_id("lang-toggle");
    let mut surface = PageSurface {
        document: document.clone(),
        toggle: toggle.clone(),
    };
    paint_language(&mut surface, &switch.apply(&translations));

    let Some(toggle) = toggle else {
        return Ok(());
    };
    let host = Rc::new(RefCell::new(LanguageHost {
        switch,
        store,
        surface,
        translations,
    }));
    listen(&toggle, "click", &host, |h, _| {
        let update = h.switch.toggle(&mut h.store, &h.translations);
        paint_language(&mut h.surface, &update);
    });
    Ok(())
}

fn mount_smooth_scroll(document: &Document) {
    let Some(root) = document.document_element() else {
        return;
    };
    let host = Rc::new(RefCell::new(document.clone()));
    for anchor in query_all(&root, ANCHOR_SELECTOR) {
        listen(&anchor, "click", &host, |document, event| {
            let href = event
                .current_target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|anchor| anchor.get_attribute("href"));
            let Some(id) = anchor_target(href.as_deref()) else {
                return;
            };
            if let Some(target) = document.get_element_by_id(id) {
                event.prevent_default();
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                target.scroll_into_view_with_scroll_into_view_options(&options);
            }
        });
    }
}

// =============================================================================
// Entry points
// =============================================================================

/// Handle to the mounted components
#[wasm_bindgen]
#[derive(Debug)]
pub struct SiteHandle {
    slider: Option<Rc<RefCell<SliderHost>>>,
    rail: Option<Rc<RefCell<RailHost>>>,
}

#[wasm_bindgen]
impl SiteHandle {
    /// Whether the news slider is running
    #[wasm_bindgen(getter, js_name = sliderMounted)]
    pub fn slider_mounted(&self) -> bool {
        self.slider.is_some()
    }

    /// Whether the focus rail is running
    #[wasm_bindgen(getter, js_name = railMounted)]
    pub fn rail_mounted(&self) -> bool {
        self.rail.is_some()
    }

    /// Stop every timer and animation loop; later events are ignored
    pub fn teardown(&self) {
        if let Some(slider) = &self.slider {
            if let Ok(mut slider) = slider.try_borrow_mut() {
                slider.teardown();
            }
        }
        if let Some(rail) = &self.rail {
            if let Ok(mut rail) = rail.try_borrow_mut() {
                rail.teardown();
            }
        }
    }
}

/// Mount every component with the default settings
#[wasm_bindgen(js_name = mountSite)]
pub fn mount_site() -> Result<SiteHandle, JsValue> {
    mount_with(SiteConfig::default())
}

/// Mount every component with settings from a (partial) JSON document
#[wasm_bindgen(js_name = mountSiteWithConfig)]
pub fn mount_site_with_config(json: &str) -> Result<SiteHandle, JsValue> {
    let config = SiteConfig::from_json(json).map_err(|err| JsValue::from_str(&err.to_string()))?;
    mount_with(config)
}

fn mount_with(config: SiteConfig) -> Result<SiteHandle, JsValue> {
    console_error_panic_hook::set_once();
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    mount_smooth_scroll(&document);
    let slider = enabled(mount_slider(&document, &window, config.slider));
    let rail = enabled(mount_rail(&document, &window, config.rail));
    enabled(mount_language(&document, &window));

    Ok(SiteHandle { slider, rail })
}

fn enabled<T>(result: SiteResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(%err, "component disabled");
            if err.is_fail_soft() {
                console::log_1(&format!("royal-site: {err}; component disabled").into());
            } else {
                report(&err.to_string());
            }
            None
        }
    }
}

fn report(message: &str) {
    console::warn_1(&format!("royal-site: {message}").into());
}

fn ok_or_report<T>(result: Result<T, JsValue>, operation: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            report(&format!("{operation} failed: {err:?}"));
            None
        }
    }
}

/// Initialize the module in the browser
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console::log_1(&"royal-site WASM initialized".into());
}
