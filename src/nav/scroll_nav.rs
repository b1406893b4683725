use std::cell::RefCell;

use yew::prelude::*;

use crate::config::NAV_HIDE_THRESHOLD_PX;
use crate::platform::{Subscription, Viewport};
use crate::web::BrowserViewport;

/// Hides the navbar while scrolling down past a threshold, shows it again on
/// any upward scroll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollNav {
    show_nav: bool,
    last_scroll: f64,
    threshold: f64,
}

impl Default for ScrollNav {
    fn default() -> Self {
        Self::new(NAV_HIDE_THRESHOLD_PX)
    }
}

impl ScrollNav {
    pub fn new(threshold: f64) -> Self {
        Self {
            show_nav: true,
            last_scroll: 0.0,
            threshold,
        }
    }

    pub fn show_nav(&self) -> bool {
        self.show_nav
    }

    /// Returns true when visibility changed.
    pub fn on_scroll(&mut self, current: f64) -> bool {
        let before = self.show_nav;
        if current > self.threshold && current > self.last_scroll {
            self.show_nav = false;
        } else if current < self.last_scroll {
            self.show_nav = true;
        }
        self.last_scroll = current;
        before != self.show_nav
    }
}

pub fn watch_scroll_nav<V: Viewport>(viewport: &V, on_change: impl Fn(bool) + 'static) -> Option<Subscription> {
    let nav = RefCell::new(ScrollNav::default());
    viewport.on_page_scroll(Box::new(move |position: f64| {
        let mut nav = nav.borrow_mut();
        if nav.on_scroll(position) {
            on_change(nav.show_nav());
        }
    }))
}

#[hook]
pub fn use_scroll_nav() -> bool {
    let show_nav = use_state(|| true);

    {
        let setter = show_nav.setter();
        use_effect_with_deps(
            move |_| {
                let subscription = watch_scroll_nav(&BrowserViewport, move |show| setter.set(show));
                move || drop(subscription)
            },
            (),
        );
    }

    *show_nav
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::testing::FakeViewport;

    #[test]
    fn starts_visible() {
        assert!(ScrollNav::default().show_nav());
    }

    #[test]
    fn hides_only_past_the_threshold_when_scrolling_down() {
        let mut nav = ScrollNav::default();

        assert!(!nav.on_scroll(60.0));
        assert!(!nav.on_scroll(100.0));
        assert!(nav.show_nav());

        assert!(nav.on_scroll(101.0));
        assert!(!nav.show_nav());
    }

    #[test]
    fn any_upward_scroll_shows_it_again() {
        let mut nav = ScrollNav::default();
        nav.on_scroll(500.0);
        assert!(!nav.show_nav());

        assert!(nav.on_scroll(499.0));
        assert!(nav.show_nav());
    }

    #[test]
    fn rapid_direction_changes_follow_the_last_move() {
        let mut nav = ScrollNav::default();
        for position in [200.0, 150.0, 300.0, 250.0, 400.0] {
            nav.on_scroll(position);
        }
        assert!(!nav.show_nav());

        nav.on_scroll(0.0);
        assert!(nav.show_nav());
        nav.on_scroll(0.0);
        assert!(nav.show_nav());
    }

    #[test]
    fn very_large_offsets_still_hide() {
        let mut nav = ScrollNav::default();
        nav.on_scroll(1.0e9);
        assert!(!nav.show_nav());
    }

    #[test]
    fn watcher_reports_changes_and_unsubscribes_on_drop() {
        let viewport = FakeViewport::new();
        let shown = Rc::new(Cell::new(true));
        let reported = shown.clone();
        let subscription = watch_scroll_nav(&viewport, move |show| reported.set(show));

        viewport.scroll_page(400.0);
        assert!(!shown.get());
        viewport.scroll_page(200.0);
        assert!(shown.get());

        drop(subscription);
        viewport.scroll_page(900.0);
        assert!(shown.get());
        assert_eq!(viewport.counts().subscribed, viewport.counts().unsubscribed);
    }
}
