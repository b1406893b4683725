use std::rc::Rc;

use web_sys::Element;
use yew::prelude::*;

use crate::config::HeroTiming;
use crate::hero::carousel::CarouselTracker;
use crate::hero::observers::{HeroTargets, VisibilityCoordinator, VisibilitySignals};
use crate::schedule::TimeoutScheduler;
use crate::web::{BrowserViewport, NodeRefContainer};

pub struct UseHeroCarouselHandle {
    pub current_slide: usize,
    pub go_to_slide: Callback<usize>,
    pub next: Callback<()>,
    pub previous: Callback<()>,
    pub reset: Callback<()>,
}

/// Tracks the slide shown by the scrolling element behind `container`.
#[hook]
pub fn use_hero_carousel(container: NodeRef) -> UseHeroCarouselHandle {
    let current_slide = use_state(|| 0usize);
    let tracker = use_mut_ref(|| None::<CarouselTracker<NodeRefContainer>>);

    {
        let tracker = tracker.clone();
        let setter = current_slide.setter();
        use_effect_with_deps(
            move |container: &NodeRef| {
                let changes = setter.clone();
                let mounted = CarouselTracker::mount(
                    NodeRefContainer(container.clone()),
                    &BrowserViewport,
                    Rc::new(TimeoutScheduler),
                    HeroTiming::default(),
                    move |slide| changes.set(slide),
                );
                setter.set(mounted.current_slide());
                *tracker.borrow_mut() = Some(mounted);
                move || {
                    tracker.borrow_mut().take();
                }
            },
            container,
        );
    }

    let go_to_slide = {
        let tracker = tracker.clone();
        Callback::from(move |index: usize| {
            if let Some(tracker) = tracker.borrow().as_ref() {
                tracker.go_to_slide(index);
            }
        })
    };
    let next = {
        let tracker = tracker.clone();
        Callback::from(move |_: ()| {
            if let Some(tracker) = tracker.borrow().as_ref() {
                tracker.next();
            }
        })
    };
    let previous = {
        let tracker = tracker.clone();
        Callback::from(move |_: ()| {
            if let Some(tracker) = tracker.borrow().as_ref() {
                tracker.previous();
            }
        })
    };
    let reset = Callback::from(move |_: ()| {
        if let Some(tracker) = tracker.borrow().as_ref() {
            tracker.reset();
        }
    });

    UseHeroCarouselHandle {
        current_slide: *current_slide,
        go_to_slide,
        next,
        previous,
        reset,
    }
}

/// Visibility signals for the hero section and its benefits panels.
///
/// `reset_carousel` may change between renders; the latest one is used.
#[hook]
pub fn use_hero_observers(
    section: NodeRef,
    benefits: NodeRef,
    benefits_mobile: NodeRef,
    reset_carousel: Callback<()>,
) -> VisibilitySignals {
    let signals = use_state(VisibilitySignals::default);
    let reset = use_mut_ref(|| reset_carousel.clone());
    *reset.borrow_mut() = reset_carousel;

    {
        let setter = signals.setter();
        use_effect_with_deps(
            move |(section, benefits, benefits_mobile): &(NodeRef, NodeRef, NodeRef)| {
                let (section, benefits, benefits_mobile) =
                    (section.clone(), benefits.clone(), benefits_mobile.clone());
                let coordinator = VisibilityCoordinator::mount(
                    BrowserViewport,
                    Rc::new(TimeoutScheduler),
                    HeroTiming::default(),
                    move || HeroTargets {
                        section: section.cast::<Element>(),
                        benefits: benefits.cast::<Element>(),
                        benefits_mobile: benefits_mobile.cast::<Element>(),
                    },
                    move || reset.borrow().emit(()),
                    {
                        let setter = setter.clone();
                        move |signals| setter.set(signals)
                    },
                );
                setter.set(coordinator.signals());
                move || drop(coordinator)
            },
            (section, benefits, benefits_mobile),
        );
    }

    *signals
}
