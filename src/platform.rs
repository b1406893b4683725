//! Browser capabilities the hero, navbar and view-mode logic depend on.
//!
//! Everything callback-based is exposed as `subscribe(handler) -> Subscription`;
//! dropping the [`Subscription`] removes the listener. A capability that is
//! missing (no `window`, no `IntersectionObserver`) is reported as `None`.

/// Handle to a registered listener. Dropping it unsubscribes.
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub bottom: f64,
}

impl Rect {
    /// True when any part of the rect overlaps a viewport of the given height.
    pub fn is_on_screen(&self, viewport_height: f64) -> bool {
        self.top < viewport_height && self.bottom > 0.0
    }
}

/// One intersection change, as reported by the platform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionEntry {
    pub is_intersecting: bool,
    pub intersection_ratio: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObserverOptions {
    pub thresholds: Vec<f64>,
    pub root_margin: Option<String>,
}

/// A live intersection observer.
pub trait IntersectionWatch<E> {
    fn observe(&mut self, target: &E);
    fn unobserve(&mut self, target: &E);
    fn disconnect(&mut self);
}

pub type IntersectionCallback = Box<dyn FnMut(Vec<IntersectionEntry>)>;

/// Page-level capabilities: viewport geometry, observers and global events.
pub trait Viewport: 'static {
    type Element: Clone + 'static;

    fn intersection_observer(
        &self,
        options: ObserverOptions,
        callback: IntersectionCallback,
    ) -> Option<Box<dyn IntersectionWatch<Self::Element>>>;

    fn scroll_y(&self) -> f64;
    fn inner_height(&self) -> f64;
    fn bounding_rect(&self, element: &Self::Element) -> Option<Rect>;
    /// Bounding rect of the page `<footer>`, if there is one.
    fn footer_rect(&self) -> Option<Rect>;

    /// Fires after every completed router navigation.
    fn on_navigation(&self, handler: Box<dyn Fn()>) -> Option<Subscription>;
    /// Document-level `keydown`, handler receives the key name.
    fn on_key_down(&self, handler: Box<dyn Fn(&str)>) -> Option<Subscription>;
    /// Scroll events of the page's main scroll container, handler receives its scroll top.
    fn on_page_scroll(&self, handler: Box<dyn Fn(f64)>) -> Option<Subscription>;
    /// Evaluates a media query, returning the current match and a change subscription.
    fn match_media(&self, query: &str, handler: Box<dyn Fn(bool)>) -> Option<(bool, Subscription)>;
}

/// The horizontally scrolling element behind the carousel.
///
/// Methods degrade to no-ops when the element is not attached.
pub trait ScrollContainer: 'static {
    fn client_width(&self) -> Option<f64>;
    fn scroll_to(&self, left: f64, behavior: ScrollBehavior);
    fn focus(&self);
    /// Handler receives the horizontal scroll offset.
    fn on_scroll(&self, handler: Box<dyn Fn(f64)>) -> Option<Subscription>;
    /// Handler receives the new content width.
    fn on_resize(&self, handler: Box<dyn Fn(f64)>) -> Option<Subscription>;
}
