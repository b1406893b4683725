use log::debug;
use yew::prelude::*;

use crate::contact::modal::{ContactModalContext, ModalAction};
use crate::nav::scroll_nav::use_scroll_nav;
use crate::nav::view_mode::use_view_mode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
}

pub fn nav_links() -> [NavLink; 4] {
    [
        NavLink { label: "Home", href: "#home" },
        NavLink { label: "About", href: "#about" },
        NavLink { label: "Approach", href: "#approach" },
        NavLink { label: "Contact", href: "#contact" },
    ]
}

#[function_component(Navbar)]
pub fn navbar() -> Html {
    let show_nav = use_scroll_nav();
    let view_mode = use_view_mode();
    let menu_open = use_state(|| false);
    let modal = use_context::<ContactModalContext>();

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };
    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(false))
    };
    let open_modal = Callback::from(move |_: MouseEvent| match modal.as_ref() {
        Some(modal) => modal.dispatch(ModalAction::Open),
        None => debug!("no contact modal mounted"),
    });

    let nav_style = if show_nav {
        "opacity: 1; transform: translateY(0);"
    } else {
        "opacity: 0; transform: translateY(-100%); pointer-events: none;"
    };

    html! {
        <>
            <style>
                {r#"
                    .top-nav {
                        position: fixed;
                        top: 0;
                        left: 0;
                        right: 0;
                        z-index: 40;
                        display: flex;
                        align-items: center;
                        justify-content: space-between;
                        padding: 1rem 2rem;
                        background: rgba(10, 10, 20, 0.85);
                        backdrop-filter: blur(8px);
                        transition: opacity 0.3s ease, transform 0.3s ease;
                    }
                    .top-nav .logo {
                        color: #fff;
                        font-weight: 700;
                        text-decoration: none;
                    }
                    .top-nav .links {
                        display: flex;
                        gap: 1.5rem;
                    }
                    .top-nav .links a,
                    .mobile-menu a {
                        color: #ddd;
                        text-decoration: none;
                    }
                    .menu-toggle {
                        display: none;
                        background: none;
                        border: none;
                        color: #fff;
                        font-size: 1.5rem;
                        cursor: pointer;
                    }
                    .mobile-menu {
                        position: fixed;
                        inset: 0;
                        z-index: 45;
                        display: flex;
                        flex-direction: column;
                        align-items: center;
                        justify-content: center;
                        gap: 2rem;
                        background: #0a0a14;
                        font-size: 1.5rem;
                    }
                    .floating-cta {
                        position: fixed;
                        right: 2rem;
                        bottom: 2rem;
                        z-index: 30;
                        padding: 0.9rem 1.6rem;
                        border: none;
                        border-radius: 999px;
                        background: #7c5cff;
                        color: #fff;
                        font-weight: 600;
                        cursor: pointer;
                    }
                    @media (max-width: 1023px) {
                        .top-nav .links { display: none; }
                        .menu-toggle { display: block; }
                    }
                "#}
            </style>
            <nav class="top-nav" style={nav_style} role="navigation" aria-label="Main navigation">
                <a href="#home" class="logo" aria-label="Back to the top of the page">{"Studio"}</a>
                <div class="links">
                    { for nav_links().into_iter().map(|link| html! {
                        <a href={link.href}>{link.label}</a>
                    }) }
                </div>
                <button
                    type="button"
                    class="menu-toggle"
                    aria-label={if *menu_open { "Close menu" } else { "Open menu" }}
                    aria-expanded={menu_open.to_string()}
                    aria-controls="mobile-menu"
                    onclick={toggle_menu.clone()}
                >
                    {if *menu_open { "×" } else { "☰" }}
                </button>
            </nav>
            if *menu_open {
                <div id="mobile-menu" class="mobile-menu" role="dialog" aria-modal="true" aria-label="Navigation menu">
                    <button type="button" class="menu-toggle" aria-label="Close menu" onclick={toggle_menu}>
                        {"×"}
                    </button>
                    { for nav_links().into_iter().map(|link| html! {
                        <a href={link.href} onclick={close_menu.clone()}>{link.label}</a>
                    }) }
                </div>
            }
            if view_mode.is_desktop() {
                <button type="button" class="floating-cta" onclick={open_modal}>
                    {"Let's work together"}
                </button>
            }
        </>
    }
}
