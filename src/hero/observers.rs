use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};

use crate::config::HeroTiming;
use crate::platform::{IntersectionEntry, IntersectionWatch, ObserverOptions, Subscription, Viewport};
use crate::schedule::{Scheduled, Scheduler};

const CAROUSEL_THRESHOLDS: [f64; 3] = [0.0, 0.5, 1.0];
const CAROUSEL_ROOT_MARGIN: &str = "-5% 0px -5% 0px";

/// Signals the hero markup renders from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibilitySignals {
    pub is_carousel_visible: bool,
    /// Raised for a short window after the carousel scrolled out of view.
    pub is_resetting: bool,
    pub show_benefits: bool,
}

impl Default for VisibilitySignals {
    fn default() -> Self {
        Self {
            is_carousel_visible: true,
            is_resetting: false,
            show_benefits: false,
        }
    }
}

/// Elements observed by the coordinator. Missing ones are skipped.
pub struct HeroTargets<E> {
    pub section: Option<E>,
    pub benefits: Option<E>,
    pub benefits_mobile: Option<E>,
}

struct State {
    signals: VisibilitySignals,
    last_scroll_y: f64,
}

#[derive(Default)]
struct Timers {
    reset_clear: Option<Scheduled>,
    benefits_show: Vec<Scheduled>,
}

struct Watched<E> {
    watch: Box<dyn IntersectionWatch<E>>,
    targets: Vec<E>,
}

impl<E> Watched<E> {
    fn release(mut self) {
        for target in &self.targets {
            self.watch.unobserve(target);
        }
        self.watch.disconnect();
    }
}

struct Mounted<E> {
    carousel: Option<Watched<E>>,
    benefits: Option<Watched<E>>,
    navigation: Option<Subscription>,
}

impl<E> Default for Mounted<E> {
    fn default() -> Self {
        Self {
            carousel: None,
            benefits: None,
            navigation: None,
        }
    }
}

struct Shared<V: Viewport> {
    viewport: V,
    scheduler: Rc<dyn Scheduler>,
    timing: HeroTiming,
    state: RefCell<State>,
    timers: RefCell<Timers>,
    mounted: RefCell<Mounted<V::Element>>,
    reset_carousel: Box<dyn Fn()>,
    on_change: Box<dyn Fn(VisibilitySignals)>,
}

/// Derives the hero visibility signals from two intersection observers and
/// the router's navigation hook.
///
/// The section observer drives `is_carousel_visible`: losing visibility resets
/// the carousel once per edge and pulses `is_resetting`. The benefits observer
/// drives `show_benefits`, which turns on after a delay and only turns off
/// while scrolling up with the footer out of view.
///
/// Observers are created one tick after [`mount`](Self::mount) so the targets
/// are attached; dropping the coordinator unobserves, disconnects and cancels
/// everything it started.
pub struct VisibilityCoordinator<V: Viewport> {
    shared: Rc<Shared<V>>,
    setup: Option<Scheduled>,
}

impl<V: Viewport> VisibilityCoordinator<V> {
    pub fn mount(
        viewport: V,
        scheduler: Rc<dyn Scheduler>,
        timing: HeroTiming,
        resolve_targets: impl FnOnce() -> HeroTargets<V::Element> + 'static,
        reset_carousel: impl Fn() + 'static,
        on_change: impl Fn(VisibilitySignals) + 'static,
    ) -> Self {
        let last_scroll_y = viewport.scroll_y();
        let shared = Rc::new(Shared {
            viewport,
            scheduler,
            timing,
            state: RefCell::new(State {
                signals: VisibilitySignals::default(),
                last_scroll_y,
            }),
            timers: RefCell::new(Timers::default()),
            mounted: RefCell::new(Mounted::default()),
            reset_carousel: Box::new(reset_carousel),
            on_change: Box::new(on_change),
        });

        let weak = Rc::downgrade(&shared);
        let setup = shared.scheduler.schedule(
            0,
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.setup(resolve_targets());
                }
            }),
        );

        Self {
            shared,
            setup: Some(setup),
        }
    }

    pub fn signals(&self) -> VisibilitySignals {
        self.shared.state.borrow().signals
    }
}

impl<V: Viewport> Drop for VisibilityCoordinator<V> {
    fn drop(&mut self) {
        self.setup.take();
        self.shared.teardown();
    }
}

impl<V: Viewport> Shared<V> {
    fn setup(self: &Rc<Self>, targets: HeroTargets<V::Element>) {
        let carousel = targets
            .section
            .and_then(|section| self.watch_section(section));
        let benefits_targets: Vec<_> = targets
            .benefits
            .into_iter()
            .chain(targets.benefits_mobile)
            .collect();
        let benefits = self.watch_benefits(benefits_targets);

        let navigation = self.viewport.on_navigation(Box::new({
            let shared = Rc::downgrade(self);
            move || {
                if let Some(shared) = shared.upgrade() {
                    debug!("navigation finished, resetting carousel");
                    (shared.reset_carousel)();
                }
            }
        }));

        *self.mounted.borrow_mut() = Mounted {
            carousel,
            benefits,
            navigation,
        };
    }

    fn watch_section(self: &Rc<Self>, section: V::Element) -> Option<Watched<V::Element>> {
        let options = ObserverOptions {
            thresholds: CAROUSEL_THRESHOLDS.to_vec(),
            root_margin: Some(CAROUSEL_ROOT_MARGIN.to_string()),
        };
        let shared = Rc::downgrade(self);
        let Some(mut watch) = self.viewport.intersection_observer(
            options,
            Box::new(move |entries: Vec<IntersectionEntry>| {
                if let Some(shared) = shared.upgrade() {
                    shared.on_section_entries(&entries);
                }
            }),
        ) else {
            warn!("IntersectionObserver unavailable, hero carousel will not auto-reset");
            return None;
        };
        watch.observe(&section);
        Some(Watched {
            watch,
            targets: vec![section],
        })
    }

    fn watch_benefits(self: &Rc<Self>, targets: Vec<V::Element>) -> Option<Watched<V::Element>> {
        if targets.is_empty() {
            return None;
        }
        let options = ObserverOptions {
            thresholds: vec![self.timing.benefits_threshold],
            root_margin: None,
        };
        let shared = Rc::downgrade(self);
        let mut watch = self.viewport.intersection_observer(
            options,
            Box::new(move |entries: Vec<IntersectionEntry>| {
                if let Some(shared) = shared.upgrade() {
                    shared.on_benefits_entries(&entries);
                }
            }),
        )?;
        for target in &targets {
            watch.observe(target);
        }

        // The observer may not report before the first scroll
        let viewport_height = self.viewport.inner_height();
        for target in &targets {
            let on_screen = self
                .viewport
                .bounding_rect(target)
                .map_or(false, |rect| rect.is_on_screen(viewport_height));
            if on_screen {
                self.schedule_show_benefits();
            }
        }

        Some(Watched { watch, targets })
    }

    fn on_section_entries(self: &Rc<Self>, entries: &[IntersectionEntry]) {
        let before = self.state.borrow().signals;
        for entry in entries {
            let visible =
                entry.is_intersecting && entry.intersection_ratio > self.timing.intersection_threshold;
            let lost = {
                let mut state = self.state.borrow_mut();
                let was_visible = state.signals.is_carousel_visible;
                state.signals.is_carousel_visible = visible;
                if was_visible && !visible {
                    state.signals.is_resetting = true;
                }
                was_visible && !visible
            };

            if lost {
                debug!("hero carousel left the viewport, resetting");
                (self.reset_carousel)();
                let shared = Rc::downgrade(self);
                let clear = self.scheduler.schedule(
                    self.timing.reset_delay_ms,
                    Box::new(move || {
                        if let Some(shared) = shared.upgrade() {
                            shared.update(|signals| signals.is_resetting = false);
                        }
                    }),
                );
                self.timers.borrow_mut().reset_clear = Some(clear);
            }
        }
        self.notify_if_changed(before);
    }

    fn on_benefits_entries(self: &Rc<Self>, entries: &[IntersectionEntry]) {
        let before = self.state.borrow().signals;
        for entry in entries {
            let current_scroll_y = self.viewport.scroll_y();
            let scrolling_up = {
                let mut state = self.state.borrow_mut();
                let scrolling_up = current_scroll_y < state.last_scroll_y;
                state.last_scroll_y = current_scroll_y;
                scrolling_up
            };

            if entry.is_intersecting && entry.intersection_ratio > self.timing.benefits_threshold {
                self.schedule_show_benefits();
            } else if scrolling_up && !self.footer_visible() {
                // Scrolling down never hides the panel
                self.state.borrow_mut().signals.show_benefits = false;
            }
        }
        self.notify_if_changed(before);
    }

    fn footer_visible(&self) -> bool {
        let viewport_height = self.viewport.inner_height();
        self.viewport
            .footer_rect()
            .map_or(false, |rect| rect.top < viewport_height)
    }

    fn schedule_show_benefits(self: &Rc<Self>) {
        let shared = Rc::downgrade(self);
        let show = self.scheduler.schedule(
            self.timing.benefits_show_delay_ms,
            Box::new(move || {
                if let Some(shared) = shared.upgrade() {
                    shared.update(|signals| signals.show_benefits = true);
                }
            }),
        );
        let mut timers = self.timers.borrow_mut();
        timers.benefits_show.retain(Scheduled::is_pending);
        timers.benefits_show.push(show);
    }

    fn update(&self, apply: impl FnOnce(&mut VisibilitySignals)) {
        let before = self.state.borrow().signals;
        apply(&mut self.state.borrow_mut().signals);
        self.notify_if_changed(before);
    }

    fn notify_if_changed(&self, before: VisibilitySignals) {
        let after = self.state.borrow().signals;
        if after != before {
            (self.on_change)(after);
        }
    }

    fn teardown(&self) {
        let mounted = std::mem::take(&mut *self.mounted.borrow_mut());
        if let Some(carousel) = mounted.carousel {
            carousel.release();
        }
        if let Some(benefits) = mounted.benefits {
            benefits.release();
        }
        drop(mounted.navigation);

        let timers = std::mem::take(&mut *self.timers.borrow_mut());
        drop(timers);
    }
}
