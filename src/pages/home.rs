use log::{info, warn};
use web_sys::window;
use yew::prelude::*;

use crate::config::CONTACT_EMAIL;
use crate::contact::form::ContactFormData;
use crate::contact::modal::{ContactModalContext, ModalAction};
use crate::hero::section::Hero;

/// Hands an accepted request to the visitor's mail client.
pub fn send_request(data: &ContactFormData) {
    let href = data.mailto_href(CONTACT_EMAIL);
    let Some(window) = window() else {
        warn!("No window to open the mail client from");
        return;
    };
    if let Err(err) = window.location().set_href(&href) {
        warn!("Could not open the mail client: {:?}", err);
    }
}

#[function_component(Home)]
pub fn home() -> Html {
    let modal = use_context::<ContactModalContext>();
    let open_modal = Callback::from(move |_: MouseEvent| {
        if let Some(modal) = modal.as_ref() {
            modal.dispatch(ModalAction::Open);
        }
    });
    let on_submit = Callback::from(|data: ContactFormData| {
        info!("Sending contact request from the hero form");
        send_request(&data);
    });

    html! {
        <main class="home">
            <style>
                {r#"
                    .home section {
                        padding: 6rem 2rem;
                        max-width: 1100px;
                        margin: 0 auto;
                    }
                    .home .intro {
                        min-height: 80vh;
                        display: flex;
                        flex-direction: column;
                        justify-content: center;
                        gap: 1.5rem;
                    }
                    .home h1 { font-size: 3rem; margin: 0; }
                    .home h2 { font-size: 2rem; }
                    .steps {
                        display: grid;
                        grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
                        gap: 1.5rem;
                        padding: 0;
                        list-style: none;
                    }
                    .steps li {
                        padding: 1.5rem;
                        border-radius: 16px;
                        background: rgba(255, 255, 255, 0.04);
                    }
                    .home .open-modal {
                        align-self: flex-start;
                        padding: 0.9rem 1.6rem;
                        border: none;
                        border-radius: 999px;
                        background: #7c5cff;
                        color: #fff;
                        cursor: pointer;
                    }
                "#}
            </style>
            <section id="home" class="intro">
                <h1>{"Your business deserves a site that brings clients in"}</h1>
                <p>{"A small studio building fast, clear websites for independents and small teams."}</p>
                <button type="button" class="open-modal" onclick={open_modal}>{"Start a project"}</button>
            </section>
            <section id="about">
                <h2>{"About"}</h2>
                <p>
                    {"We are designers and developers who prefer a short list of clients we know well. "}
                    {"You talk to the people building your site, from the first call to launch day."}
                </p>
            </section>
            <section id="approach">
                <h2>{"Approach"}</h2>
                <ol class="steps">
                    <li><strong>{"Listen"}</strong><p>{"One call to understand your goals and your clients."}</p></li>
                    <li><strong>{"Design"}</strong><p>{"A clickable mockup you can comment on before any code."}</p></li>
                    <li><strong>{"Build"}</strong><p>{"Weekly previews so there are no surprises."}</p></li>
                    <li><strong>{"Launch"}</strong><p>{"We put it online and stay around for the fixes."}</p></li>
                </ol>
            </section>
            <Hero {on_submit} />
        </main>
    }
}
