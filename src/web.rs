//! `web-sys` implementations of the platform capabilities.

use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Array, Reflect};
use web_sys::{
    window, Element, Event, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent, MediaQueryListEvent,
    ResizeObserver, ResizeObserverEntry, ScrollToOptions,
};
use yew::NodeRef;
use yew_router::history::{BrowserHistory, History};

use crate::platform::{
    IntersectionCallback, IntersectionEntry, IntersectionWatch, ObserverOptions, Rect,
    ScrollBehavior, ScrollContainer, Subscription, Viewport,
};

const SCROLL_ROOT_SELECTOR: &str = r#"[style*="overflow"], [class*="overflow"]"#;

fn listen(target: &EventTarget, event: &'static str, callback: Closure<dyn Fn(Event)>) -> Option<Subscription> {
    if let Err(err) = target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
        warn!("failed to add {} listener: {:?}", event, err);
        return None;
    }
    let target = target.clone();
    Some(Subscription::new(move || {
        let _ = target.remove_event_listener_with_callback(event, callback.as_ref().unchecked_ref());
    }))
}

fn rect_of(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect {
        top: rect.top(),
        bottom: rect.bottom(),
    }
}

fn window_scroll_y() -> f64 {
    window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

struct BrowserIntersectionWatch {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl IntersectionWatch<Element> for BrowserIntersectionWatch {
    fn observe(&mut self, target: &Element) {
        self.observer.observe(target);
    }

    fn unobserve(&mut self, target: &Element) {
        self.observer.unobserve(target);
    }

    fn disconnect(&mut self) {
        self.observer.disconnect();
    }
}

/// The real browser window.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BrowserViewport;

impl Viewport for BrowserViewport {
    type Element = Element;

    fn intersection_observer(
        &self,
        options: ObserverOptions,
        mut callback: IntersectionCallback,
    ) -> Option<Box<dyn IntersectionWatch<Element>>> {
        let window = window()?;
        let supported = Reflect::has(&window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false);
        if !supported {
            return None;
        }

        let closure = Closure::wrap(Box::new(move |entries: Array, _observer: IntersectionObserver| {
            let entries = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|entry| IntersectionEntry {
                    is_intersecting: entry.is_intersecting(),
                    intersection_ratio: entry.intersection_ratio(),
                })
                .collect();
            callback(entries);
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        let thresholds: Array = options
            .thresholds
            .iter()
            .map(|threshold| JsValue::from_f64(*threshold))
            .collect();
        init.set_threshold(&thresholds);
        if let Some(margin) = &options.root_margin {
            init.set_root_margin(margin);
        }

        match IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init) {
            Ok(observer) => Some(Box::new(BrowserIntersectionWatch {
                observer,
                _callback: closure,
            })),
            Err(err) => {
                warn!("failed to create IntersectionObserver: {:?}", err);
                None
            }
        }
    }

    fn scroll_y(&self) -> f64 {
        window_scroll_y()
    }

    fn inner_height(&self) -> f64 {
        window()
            .and_then(|w| w.inner_height().ok())
            .and_then(|height| height.as_f64())
            .unwrap_or(0.0)
    }

    fn bounding_rect(&self, element: &Element) -> Option<Rect> {
        Some(rect_of(element))
    }

    fn footer_rect(&self) -> Option<Rect> {
        let document = window()?.document()?;
        let footer = document.query_selector("footer").ok().flatten()?;
        Some(rect_of(&footer))
    }

    fn on_navigation(&self, handler: Box<dyn Fn()>) -> Option<Subscription> {
        window()?;
        let listener = BrowserHistory::new().listen(move || handler());
        Some(Subscription::new(move || drop(listener)))
    }

    fn on_key_down(&self, handler: Box<dyn Fn(&str)>) -> Option<Subscription> {
        let document = window()?.document()?;
        let callback = Closure::wrap(Box::new(move |event: Event| {
            if let Ok(event) = event.dyn_into::<KeyboardEvent>() {
                handler(&event.key());
            }
        }) as Box<dyn Fn(Event)>);
        listen(&document, "keydown", callback)
    }

    fn on_page_scroll(&self, handler: Box<dyn Fn(f64)>) -> Option<Subscription> {
        let window = window()?;
        let document = window.document()?;
        let root = document
            .query_selector(SCROLL_ROOT_SELECTOR)
            .ok()
            .flatten()
            .or_else(|| document.query_selector("main").ok().flatten());

        match root {
            Some(element) => {
                debug!("navbar listening to scroll on <{}>", element.tag_name().to_lowercase());
                let scrolled = element.clone();
                let callback = Closure::wrap(Box::new(move |_: Event| {
                    let top = f64::from(scrolled.scroll_top());
                    handler(if top > 0.0 { top } else { window_scroll_y() });
                }) as Box<dyn Fn(Event)>);
                listen(&element, "scroll", callback)
            }
            None => {
                let callback = Closure::wrap(Box::new(move |_: Event| {
                    handler(window_scroll_y());
                }) as Box<dyn Fn(Event)>);
                listen(&window, "scroll", callback)
            }
        }
    }

    fn match_media(&self, query: &str, handler: Box<dyn Fn(bool)>) -> Option<(bool, Subscription)> {
        let media = window()?.match_media(query).ok().flatten()?;
        let matches = media.matches();
        let callback = Closure::wrap(Box::new(move |event: Event| {
            if let Ok(event) = event.dyn_into::<MediaQueryListEvent>() {
                handler(event.matches());
            }
        }) as Box<dyn Fn(Event)>);
        let subscription = listen(&media, "change", callback)?;
        Some((matches, subscription))
    }
}

/// Carousel container backed by a Yew [`NodeRef`].
#[derive(Clone, Debug, PartialEq)]
pub struct NodeRefContainer(pub NodeRef);

impl ScrollContainer for NodeRefContainer {
    fn client_width(&self) -> Option<f64> {
        self.0
            .cast::<Element>()
            .map(|element| f64::from(element.client_width()))
    }

    fn scroll_to(&self, left: f64, behavior: ScrollBehavior) {
        let Some(element) = self.0.cast::<Element>() else {
            return;
        };
        let options = ScrollToOptions::new();
        options.set_left(left);
        options.set_behavior(match behavior {
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
        });
        element.scroll_to_with_scroll_to_options(&options);
    }

    fn focus(&self) {
        if let Some(element) = self.0.cast::<HtmlElement>() {
            let _ = element.focus();
        }
    }

    fn on_scroll(&self, handler: Box<dyn Fn(f64)>) -> Option<Subscription> {
        let element = self.0.cast::<Element>()?;
        let scrolled = element.clone();
        let callback = Closure::wrap(Box::new(move |_: Event| {
            handler(f64::from(scrolled.scroll_left()));
        }) as Box<dyn Fn(Event)>);
        listen(&element, "scroll", callback)
    }

    fn on_resize(&self, handler: Box<dyn Fn(f64)>) -> Option<Subscription> {
        let element = self.0.cast::<Element>()?;
        let callback = Closure::wrap(Box::new(move |entries: Array, _observer: ResizeObserver| {
            let width = entries
                .get(0)
                .dyn_into::<ResizeObserverEntry>()
                .ok()
                .map(|entry| f64::from(entry.target().client_width()));
            if let Some(width) = width {
                handler(width);
            }
        }) as Box<dyn FnMut(Array, ResizeObserver)>);

        let observer = match ResizeObserver::new(callback.as_ref().unchecked_ref()) {
            Ok(observer) => observer,
            Err(err) => {
                warn!("failed to create ResizeObserver: {:?}", err);
                return None;
            }
        };
        observer.observe(&element);
        Some(Subscription::new(move || {
            observer.disconnect();
            drop(callback);
        }))
    }
}
