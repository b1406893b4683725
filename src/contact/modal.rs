use std::rc::Rc;

use log::debug;
use web_sys::{window, KeyboardEvent};
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::contact::contact_form::{ContactForm, FormVariant};
use crate::contact::form::ContactFormData;

pub enum ModalAction {
    Open,
    Close,
    Toggle,
}

/// Whether the contact modal is open. Owned by the app root and handed down
/// through [`ContactModalContext`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContactModalState {
    pub is_open: bool,
}

impl Reducible for ContactModalState {
    type Action = ModalAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let is_open = match action {
            ModalAction::Open => true,
            ModalAction::Close => false,
            ModalAction::Toggle => !self.is_open,
        };
        if is_open == self.is_open {
            return self;
        }
        Rc::new(Self { is_open })
    }
}

pub type ContactModalContext = UseReducerHandle<ContactModalState>;

fn set_body_overflow(value: &str) {
    let body = window().and_then(|w| w.document()).and_then(|d| d.body());
    if let Some(body) = body {
        let _ = body.style().set_property("overflow", value);
    }
}

#[derive(Properties, PartialEq)]
pub struct ContactModalProps {
    pub on_submit: Callback<ContactFormData>,
}

#[function_component(ContactModal)]
pub fn contact_modal(props: &ContactModalProps) -> Html {
    let modal = use_context::<ContactModalContext>();
    let is_open = modal.as_ref().map_or(false, |modal| modal.is_open);

    // Lock page scroll behind the open modal
    use_effect_with_deps(
        move |is_open| {
            debug!("contact modal open: {}", is_open);
            set_body_overflow(if *is_open { "hidden" } else { "unset" });
            || ()
        },
        is_open,
    );

    {
        let modal = modal.clone();
        use_event_with_window("keydown", move |e: KeyboardEvent| {
            if let Some(modal) = modal.as_ref() {
                if e.key() == "Escape" && modal.is_open {
                    modal.dispatch(ModalAction::Close);
                }
            }
        });
    }

    let Some(modal) = modal.filter(|modal| modal.is_open) else {
        return html! {};
    };

    let close = {
        let modal = modal.clone();
        Callback::from(move |_: MouseEvent| modal.dispatch(ModalAction::Close))
    };
    let on_backdrop = {
        let modal = modal.clone();
        Callback::from(move |e: MouseEvent| {
            // Only clicks landing on the backdrop itself
            if e.target() == e.current_target() {
                modal.dispatch(ModalAction::Close);
            }
        })
    };
    let on_submit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |data: ContactFormData| {
            on_submit.emit(data);
            modal.dispatch(ModalAction::Close);
        })
    };

    html! {
        <div class="modal-backdrop" data-testid="modal-backdrop" onclick={on_backdrop}>
            <style>
                {r#"
                    .modal-backdrop {
                        position: fixed;
                        inset: 0;
                        z-index: 50;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        background: rgba(10, 10, 20, 0.7);
                        backdrop-filter: blur(6px);
                        padding: 1rem;
                    }
                    .modal-panel {
                        position: relative;
                        width: 100%;
                        max-width: 640px;
                        max-height: 90vh;
                        overflow-y: auto;
                        background: #14141c;
                        border: 1px solid rgba(255, 255, 255, 0.08);
                        border-radius: 24px;
                        padding: 2rem;
                        color: #f2f2f2;
                    }
                    .modal-close {
                        position: absolute;
                        top: 1rem;
                        right: 1rem;
                        background: none;
                        border: none;
                        color: #aaa;
                        font-size: 1.5rem;
                        cursor: pointer;
                    }
                "#}
            </style>
            <div class="modal-panel" role="dialog" aria-modal="true" aria-labelledby="contact-modal-title">
                <button type="button" class="modal-close" aria-label="Close the contact form" onclick={close}>
                    {"×"}
                </button>
                <h2 id="contact-modal-title">{"Tell us about your project"}</h2>
                <ContactForm variant={FormVariant::Modal} {on_submit} />
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reduce(state: ContactModalState, action: ModalAction) -> ContactModalState {
        *Rc::new(state).reduce(action)
    }

    #[test]
    fn starts_closed() {
        assert!(!ContactModalState::default().is_open);
    }

    #[test]
    fn open_and_close_set_the_flag() {
        let open = reduce(ContactModalState::default(), ModalAction::Open);
        assert!(open.is_open);
        assert!(reduce(open, ModalAction::Open).is_open);
        assert!(!reduce(open, ModalAction::Close).is_open);
    }

    #[test]
    fn toggle_flips_the_flag() {
        let closed = ContactModalState::default();
        let open = reduce(closed, ModalAction::Toggle);
        assert!(open.is_open);
        assert!(!reduce(open, ModalAction::Toggle).is_open);
    }

    #[test]
    fn unchanged_state_keeps_the_same_allocation() {
        let state = Rc::new(ContactModalState::default());
        let next = state.clone().reduce(ModalAction::Close);
        assert!(Rc::ptr_eq(&state, &next));
    }
}
