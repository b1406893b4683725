use yew::prelude::*;

use crate::config::DESKTOP_BREAKPOINT;
use crate::platform::{Subscription, Viewport};
use crate::web::BrowserViewport;

/// Desktop/mobile layout switch. Both flags stay false until mounted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewMode {
    mounted: bool,
    matches: bool,
}

impl ViewMode {
    pub fn mounted(matches: bool) -> Self {
        Self {
            mounted: true,
            matches,
        }
    }

    pub fn is_desktop(&self) -> bool {
        self.mounted && self.matches
    }

    pub fn is_mobile(&self) -> bool {
        self.mounted && !self.matches
    }
}

/// Returns the current mode plus a subscription delivering later changes.
pub fn watch_view_mode<V: Viewport>(
    viewport: &V,
    on_change: impl Fn(ViewMode) + 'static,
) -> Option<(ViewMode, Subscription)> {
    let (matches, subscription) = viewport.match_media(
        DESKTOP_BREAKPOINT,
        Box::new(move |matches| on_change(ViewMode::mounted(matches))),
    )?;
    Some((ViewMode::mounted(matches), subscription))
}

#[hook]
pub fn use_view_mode() -> ViewMode {
    let mode = use_state(ViewMode::default);

    {
        let setter = mode.setter();
        use_effect_with_deps(
            move |_| {
                let changes = setter.clone();
                let subscription = watch_view_mode(&BrowserViewport, move |mode| changes.set(mode))
                    .map(|(initial, subscription)| {
                        setter.set(initial);
                        subscription
                    });
                move || drop(subscription)
            },
            (),
        );
    }

    *mode
}
