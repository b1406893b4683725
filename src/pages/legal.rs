use yew::prelude::*;
use yew_router::prelude::*;

use crate::config::CONTACT_EMAIL;
use crate::Route;

#[function_component(Legal)]
pub fn legal() -> Html {
    html! {
        <main class="legal-page">
            <style>
                {r#"
                    .legal-page {
                        max-width: 760px;
                        margin: 0 auto;
                        padding: 7rem 2rem 4rem;
                        line-height: 1.6;
                    }
                "#}
            </style>
            <h1>{"Legal notice"}</h1>

            <h2>{"Publisher"}</h2>
            <p>{"This site is published by the studio. Contact: "}<a href={format!("mailto:{}", CONTACT_EMAIL)}>{CONTACT_EMAIL}</a></p>

            <h2>{"Personal data"}</h2>
            <p>
                {"Details sent through the contact form are only used to answer your request. "}
                {"They are not stored on this site: the form opens your own mail client with the message ready to send."}
            </p>
            <p>{"You can ask for any message you sent us to be deleted by writing to the address above."}</p>

            <h2>{"Cookies"}</h2>
            <p>{"This site sets no tracking cookies."}</p>

            <Link<Route> to={Route::Home} classes="back-link">{"Back to the home page"}</Link<Route>>
        </main>
    }
}
