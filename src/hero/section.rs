use yew::prelude::*;

use crate::config::CAROUSEL_SLIDES_COUNT;
use crate::contact::contact_form::{ContactForm, FormVariant};
use crate::contact::form::ContactFormData;
use crate::hero::hooks::{use_hero_carousel, use_hero_observers};
use crate::nav::view_mode::use_view_mode;

const BENEFITS: [(&str, &str); 3] = [
    ("Fast", "A first version online within weeks, not months."),
    ("Yours", "Clean code and content you own, hosted where you want."),
    ("Looked after", "Updates and small fixes included after launch."),
];

fn slide_label(index: usize) -> String {
    format!("Slide {} of {}", index + 1, CAROUSEL_SLIDES_COUNT)
}

#[derive(Properties, PartialEq)]
struct BenefitsProps {
    node_ref: NodeRef,
    visible: bool,
    #[prop_or_default]
    mobile: bool,
}

#[function_component(Benefits)]
fn benefits(props: &BenefitsProps) -> Html {
    html! {
        <aside
            ref={props.node_ref.clone()}
            class={classes!("benefits", props.mobile.then_some("mobile"), props.visible.then_some("visible"))}
            aria-label="Why work with us"
        >
            <ul>
                { for BENEFITS.iter().map(|(title, text)| html! {
                    <li>
                        <strong>{*title}</strong>
                        <span>{*text}</span>
                    </li>
                }) }
            </ul>
        </aside>
    }
}

#[derive(Properties, PartialEq)]
pub struct HeroProps {
    pub on_submit: Callback<ContactFormData>,
}

#[function_component(Hero)]
pub fn hero(props: &HeroProps) -> Html {
    let section_ref = use_node_ref();
    let carousel_ref = use_node_ref();
    let benefits_ref = use_node_ref();
    let benefits_mobile_ref = use_node_ref();

    let view_mode = use_view_mode();
    let carousel = use_hero_carousel(carousel_ref.clone());
    let signals = use_hero_observers(
        section_ref.clone(),
        benefits_ref.clone(),
        benefits_mobile_ref.clone(),
        carousel.reset.clone(),
    );

    let current = carousel.current_slide;
    let previous = carousel.previous.reform(|_: MouseEvent| ());
    let next = carousel.next.reform(|_: MouseEvent| ());
    let form_variant = if view_mode.is_desktop() {
        FormVariant::HeroDesktop
    } else {
        FormVariant::HeroMobile
    };

    html! {
        <section
            id="contact"
            class={classes!("hero", signals.is_carousel_visible.then_some("in-view"))}
            ref={section_ref}
        >
            <style>
                {r#"
                    .hero {
                        min-height: 100vh;
                        display: flex;
                        gap: 3rem;
                        align-items: center;
                        padding: 6rem 2rem 4rem;
                        background: linear-gradient(160deg, #0a0a14 0%, #1a1430 100%);
                        color: #f2f2f2;
                    }
                    .hero-carousel {
                        flex: 2;
                        min-width: 0;
                    }
                    .slides {
                        display: flex;
                        overflow-x: auto;
                        scroll-snap-type: x mandatory;
                        scrollbar-width: none;
                        outline: none;
                        transition: opacity 0.2s ease;
                    }
                    .slides.resetting {
                        opacity: 0;
                    }
                    .slide {
                        flex: 0 0 100%;
                        scroll-snap-align: start;
                        padding: 1rem;
                    }
                    .carousel-controls {
                        display: flex;
                        gap: 0.75rem;
                        align-items: center;
                        margin-top: 1rem;
                    }
                    .dot {
                        width: 10px;
                        height: 10px;
                        border-radius: 50%;
                        border: none;
                        background: rgba(255, 255, 255, 0.3);
                        cursor: pointer;
                    }
                    .dot.active {
                        background: #7c5cff;
                    }
                    .benefits {
                        flex: 1;
                        opacity: 0;
                        transform: translateY(24px);
                        transition: opacity 0.5s ease, transform 0.5s ease;
                    }
                    .benefits.visible {
                        opacity: 1;
                        transform: translateY(0);
                    }
                    .benefits ul {
                        list-style: none;
                        padding: 0;
                        display: grid;
                        gap: 1.25rem;
                    }
                    .benefits li {
                        display: flex;
                        flex-direction: column;
                        gap: 0.25rem;
                    }
                    .benefits.mobile {
                        display: none;
                    }
                    @media (max-width: 1023px) {
                        .hero {
                            flex-direction: column;
                            padding-top: 5rem;
                        }
                        .benefits {
                            display: none;
                        }
                        .benefits.mobile {
                            display: block;
                        }
                    }
                "#}
            </style>
            <div class="hero-carousel">
                <div
                    ref={carousel_ref}
                    class={classes!("slides", signals.is_resetting.then_some("resetting"))}
                    tabindex="0"
                    aria-roledescription="carousel"
                    aria-label="Introduction and contact"
                >
                    <div class="slide" role="group" aria-roledescription="slide" aria-label={slide_label(0)}>
                        <h1>{"Websites that work as hard as you do"}</h1>
                        <p>
                            {"We design and build showcase sites and custom web tools for small businesses. "}
                            {"Tell us where you want to go and we will map the shortest road there."}
                        </p>
                        <button type="button" class="cta" onclick={next.clone()}>{"Tell us about your project"}</button>
                    </div>
                    <div class="slide" role="group" aria-roledescription="slide" aria-label={slide_label(1)}>
                        <ContactForm variant={form_variant} on_submit={props.on_submit.clone()} />
                    </div>
                </div>
                <div class="carousel-controls">
                    <button type="button" aria-label="Previous slide" disabled={current == 0} onclick={previous}>
                        {"‹"}
                    </button>
                    { for (0..CAROUSEL_SLIDES_COUNT).map(|index| {
                        let go_to = carousel.go_to_slide.reform(move |_: MouseEvent| index);
                        html! {
                            <button
                                type="button"
                                class={classes!("dot", (index == current).then_some("active"))}
                                aria-label={format!("Go to slide {}", index + 1)}
                                aria-current={(index == current).then_some("true")}
                                onclick={go_to}
                            />
                        }
                    }) }
                    <button
                        type="button"
                        aria-label="Next slide"
                        disabled={current + 1 >= CAROUSEL_SLIDES_COUNT}
                        onclick={next}
                    >
                        {"›"}
                    </button>
                </div>
            </div>
            <Benefits node_ref={benefits_ref} visible={signals.show_benefits} />
            <Benefits node_ref={benefits_mobile_ref} visible={signals.show_benefits} mobile=true />
        </section>
    }
}
