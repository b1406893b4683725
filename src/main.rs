use log::info;
use yew::prelude::*;
use yew_router::prelude::*;

mod config;
mod platform;
mod schedule;
mod web;
#[cfg(test)]
mod testing;

mod hero {
    pub mod carousel;
    pub mod hooks;
    pub mod observers;
    pub mod section;
}
mod nav {
    pub mod navbar;
    pub mod scroll_nav;
    pub mod view_mode;
}
mod contact {
    pub mod contact_form;
    pub mod form;
    pub mod modal;
}
mod pages {
    pub mod home;
    pub mod legal;
}
mod components {
    pub mod footer;
}

use components::footer::Footer;
use contact::form::ContactFormData;
use contact::modal::{ContactModal, ContactModalContext, ContactModalState};
use nav::navbar::Navbar;
use pages::{home::send_request, home::Home, legal::Legal};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/legal")]
    Legal,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        }
        Route::Legal => {
            info!("Rendering Legal page");
            html! { <Legal /> }
        }
        Route::NotFound => {
            info!("Rendering NotFound page");
            html! {
                <main class="not-found">
                    <h1>{"Page not found"}</h1>
                    <Link<Route> to={Route::Home}>{"Back to the home page"}</Link<Route>>
                </main>
            }
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let modal = use_reducer(ContactModalState::default);
    let on_modal_submit = Callback::from(|data: ContactFormData| {
        info!("Sending contact request from the modal");
        send_request(&data);
    });

    html! {
        <ContextProvider<ContactModalContext> context={modal}>
            <BrowserRouter>
                <style>
                    {r#"
                        body {
                            margin: 0;
                            font-family: system-ui, sans-serif;
                            background: #0a0a14;
                            color: #f2f2f2;
                        }
                        .hidden {
                            display: none !important;
                        }
                        .not-found {
                            min-height: 70vh;
                            display: flex;
                            flex-direction: column;
                            align-items: center;
                            justify-content: center;
                        }
                    "#}
                </style>
                <Navbar />
                <Switch<Route> render={switch} />
                <Footer />
                <ContactModal on_submit={on_modal_submit} />
            </BrowserRouter>
        </ContextProvider<ContactModalContext>>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    // Initialize the logger before anything renders
    console_log::init_with_level(config::log_level()).expect("error initializing log");
    info!("Starting the site");
    yew::Renderer::<App>::new().render();
}
