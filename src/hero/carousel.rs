use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::config::HeroTiming;
use crate::platform::{ScrollBehavior, ScrollContainer, Subscription, Viewport};
use crate::schedule::{Scheduled, Scheduler};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarouselState {
    pub current_slide: usize,
    /// Last observed container width, 0 until one is known.
    pub slide_width: f64,
}

#[derive(Default)]
struct Throttle {
    last_run: Option<f64>,
    pending: Option<f64>,
    trailing: Option<Scheduled>,
}

struct Inner<C> {
    container: C,
    scheduler: Rc<dyn Scheduler>,
    timing: HeroTiming,
    state: RefCell<CarouselState>,
    throttle: RefCell<Throttle>,
    on_change: Box<dyn Fn(usize)>,
}

/// Keeps the current slide index in sync with a horizontally scrolling container.
///
/// User scrolling moves the index (throttled), explicit navigation moves the
/// container. Arrow keys navigate while the tracker is alive; dropping it
/// removes every listener and cancels a pending throttled update.
pub struct CarouselTracker<C: ScrollContainer> {
    inner: Rc<Inner<C>>,
    _listeners: Vec<Subscription>,
}

impl<C: ScrollContainer> CarouselTracker<C> {
    pub fn mount<V: Viewport>(
        container: C,
        viewport: &V,
        scheduler: Rc<dyn Scheduler>,
        timing: HeroTiming,
        on_change: impl Fn(usize) + 'static,
    ) -> Self {
        let slide_width = container.client_width().unwrap_or(0.0);
        let inner = Rc::new(Inner {
            container,
            scheduler,
            timing,
            state: RefCell::new(CarouselState {
                current_slide: 0,
                slide_width,
            }),
            throttle: RefCell::new(Throttle::default()),
            on_change: Box::new(on_change),
        });

        let listeners = [
            inner.container.on_resize(Box::new({
                let inner = Rc::downgrade(&inner);
                move |width: f64| {
                    if let Some(inner) = inner.upgrade() {
                        inner.observe_width(width);
                    }
                }
            })),
            inner.container.on_scroll(Box::new({
                let inner = Rc::downgrade(&inner);
                move |offset: f64| {
                    if let Some(inner) = inner.upgrade() {
                        inner.on_scroll(offset);
                    }
                }
            })),
            viewport.on_key_down(Box::new({
                let inner = Rc::downgrade(&inner);
                move |key: &str| {
                    if let Some(inner) = inner.upgrade() {
                        inner.handle_key(key);
                    }
                }
            })),
        ];

        Self {
            inner,
            _listeners: listeners.into_iter().flatten().collect(),
        }
    }

    pub fn state(&self) -> CarouselState {
        *self.inner.state.borrow()
    }

    pub fn current_slide(&self) -> usize {
        self.state().current_slide
    }

    pub fn go_to_slide(&self, index: usize) {
        self.inner.go_to_slide(index);
    }

    pub fn next(&self) {
        self.inner.next();
    }

    pub fn previous(&self) {
        self.inner.previous();
    }

    /// Jumps back to the first slide without animation.
    pub fn reset(&self) {
        self.inner.reset();
    }
}

impl<C: ScrollContainer> Inner<C> {
    fn last_slide(&self) -> usize {
        self.timing.slide_count.saturating_sub(1)
    }

    fn set_slide(&self, index: usize) {
        let changed = {
            let mut state = self.state.borrow_mut();
            let changed = state.current_slide != index;
            state.current_slide = index;
            changed
        };
        if changed {
            debug!("carousel moved to slide {}", index);
            (self.on_change)(index);
        }
    }

    fn observe_width(&self, width: f64) {
        if width > 0.0 {
            self.state.borrow_mut().slide_width = width;
        }
    }

    fn on_scroll(self: &Rc<Self>, offset: f64) {
        let now = self.scheduler.now_ms();
        let interval = f64::from(self.timing.scroll_throttle_ms);
        let mut throttle = self.throttle.borrow_mut();

        match throttle.last_run.map(|last| now - last) {
            Some(elapsed) if elapsed < interval => {
                // Inside the window: keep the latest offset for the trailing run
                throttle.pending = Some(offset);
                let waiting = throttle.trailing.as_ref().map_or(false, Scheduled::is_pending);
                if !waiting {
                    let inner = Rc::downgrade(self);
                    let delay = (interval - elapsed).ceil() as u32;
                    throttle.trailing = Some(self.scheduler.schedule(
                        delay,
                        Box::new(move || {
                            if let Some(inner) = inner.upgrade() {
                                inner.flush_scroll();
                            }
                        }),
                    ));
                }
            }
            _ => {
                throttle.last_run = Some(now);
                throttle.pending = None;
                drop(throttle);
                self.sync_to_offset(offset);
            }
        }
    }

    fn flush_scroll(&self) {
        let pending = {
            let mut throttle = self.throttle.borrow_mut();
            throttle.last_run = Some(self.scheduler.now_ms());
            throttle.pending.take()
        };
        if let Some(offset) = pending {
            self.sync_to_offset(offset);
        }
    }

    fn sync_to_offset(&self, offset: f64) {
        let observed = self.state.borrow().slide_width;
        let width = if observed > 0.0 {
            observed
        } else {
            self.container
                .client_width()
                .filter(|width| *width > 0.0)
                .unwrap_or(1.0)
        };
        let slide = (offset / width).round().max(0.0) as usize;
        self.set_slide(slide.min(self.last_slide()));
    }

    fn go_to_slide(&self, index: usize) {
        let Some(width) = self.container.client_width() else {
            return;
        };
        let index = index.min(self.last_slide());
        self.observe_width(width);
        self.container
            .scroll_to(index as f64 * width, ScrollBehavior::Smooth);
        self.set_slide(index);
    }

    fn next(&self) {
        let current = self.state.borrow().current_slide;
        self.go_to_slide((current + 1).min(self.last_slide()));
        self.container.focus();
    }

    fn previous(&self) {
        let current = self.state.borrow().current_slide;
        self.go_to_slide(current.saturating_sub(1));
        self.container.focus();
    }

    fn reset(&self) {
        self.container.scroll_to(0.0, ScrollBehavior::Instant);
        self.set_slide(0);
    }

    fn handle_key(&self, key: &str) {
        match key {
            "ArrowLeft" => self.previous(),
            "ArrowRight" => self.next(),
            _ => {}
        }
    }
}
