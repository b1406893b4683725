use yew::prelude::*;
use yew_router::prelude::*;

use crate::config::CONTACT_EMAIL;
use crate::nav::navbar::nav_links;
use crate::Route;

#[function_component(Footer)]
pub fn footer() -> Html {
    html! {
        <footer class="site-footer">
            <style>
                {r#"
                    .site-footer {
                        display: flex;
                        flex-wrap: wrap;
                        gap: 2rem;
                        justify-content: space-between;
                        padding: 3rem 2rem;
                        background: #07070d;
                        color: #999;
                    }
                    .site-footer a {
                        color: #ccc;
                        text-decoration: none;
                    }
                    .site-footer nav {
                        display: flex;
                        gap: 1rem;
                    }
                "#}
            </style>
            <nav aria-label="Footer navigation">
                { for nav_links().into_iter().map(|link| html! {
                    <a href={format!("/{}", link.href)}>{link.label}</a>
                }) }
            </nav>
            <a href={format!("mailto:{}", CONTACT_EMAIL)}>{CONTACT_EMAIL}</a>
            <Link<Route> to={Route::Legal}>{"Legal notice"}</Link<Route>>
        </footer>
    }
}
