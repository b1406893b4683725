use log::{debug, info, warn};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::contact::form::{
    ContactField, ContactForm as FormState, ContactFormData, FieldError, FieldValue, FormAction, ProjectType,
    SentRequest,
};

/// Where a form is rendered. Several forms can share a page, so each variant
/// prefixes its element ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormVariant {
    Modal,
    HeroDesktop,
    HeroMobile,
}

impl FormVariant {
    fn id_prefix(&self) -> &'static str {
        match self {
            FormVariant::Modal => "modal",
            FormVariant::HeroDesktop => "hero-desktop",
            FormVariant::HeroMobile => "hero-mobile",
        }
    }

    fn field_id(&self, name: &str) -> String {
        format!("{}-{}", self.id_prefix(), name)
    }

    fn is_compact(&self) -> bool {
        matches!(self, FormVariant::HeroMobile)
    }
}

#[derive(Properties, PartialEq)]
struct FieldErrorProps {
    id: String,
    error: Option<FieldError>,
}

#[function_component(FieldErrorMessage)]
fn field_error_message(props: &FieldErrorProps) -> Html {
    match props.error {
        Some(error) => html! {
            <p id={props.id.clone()} class="field-error" role="alert" aria-live="polite">
                {error.to_string()}
            </p>
        },
        None => html! {},
    }
}

#[derive(Properties, PartialEq)]
struct FormInputProps {
    id: String,
    label: AttrValue,
    #[prop_or(AttrValue::Static("text"))]
    input_type: AttrValue,
    value: String,
    #[prop_or_default]
    required: bool,
    #[prop_or_default]
    error: Option<FieldError>,
    #[prop_or_default]
    autocomplete: Option<AttrValue>,
    oninput: Callback<String>,
}

#[function_component(FormInput)]
fn form_input(props: &FormInputProps) -> Html {
    let error_id = format!("{}-error", props.id);
    let oninput = {
        let oninput = props.oninput.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            oninput.emit(input.value());
        })
    };

    html! {
        <div class="form-field">
            <label for={props.id.clone()}>
                {props.label.clone()}
                if props.required {
                    <span class="required" aria-hidden="true">{" *"}</span>
                }
            </label>
            <input
                id={props.id.clone()}
                type={props.input_type.clone()}
                value={props.value.clone()}
                autocomplete={props.autocomplete.clone()}
                aria-required={props.required.to_string()}
                aria-invalid={props.error.is_some().to_string()}
                aria-describedby={props.error.map(|_| error_id.clone())}
                {oninput}
            />
            <FieldErrorMessage id={error_id} error={props.error} />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ContactFormProps {
    pub variant: FormVariant,
    pub on_submit: Callback<ContactFormData>,
}

#[function_component(ContactForm)]
pub fn contact_form(props: &ContactFormProps) -> Html {
    let form = use_reducer(FormState::default);
    let variant = props.variant;

    // Accepted requests leave the reducer through `sent`
    {
        let on_submit = props.on_submit.clone();
        use_effect_with_deps(
            move |sent: &Option<SentRequest>| {
                if let Some(sent) = sent {
                    info!("Contact form sent from {:?}", variant);
                    match serde_json::to_string(&sent.data) {
                        Ok(json) => debug!("Contact request: {}", json),
                        Err(err) => warn!("Could not render contact request: {}", err),
                    }
                    on_submit.emit(sent.data.clone());
                }
                || ()
            },
            form.sent.clone(),
        );
    }

    let update = {
        let form = form.clone();
        Callback::from(move |(field, value): (ContactField, FieldValue)| {
            form.dispatch(FormAction::Update(field, value));
        })
    };
    let text = |field: ContactField| update.reform(move |value: String| (field, FieldValue::Text(value)));
    let flag = |field: ContactField| {
        update.reform(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            (field, FieldValue::Flag(input.checked()))
        })
    };

    let on_project_type = update.reform(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        (ContactField::ProjectType, FieldValue::Text(select.value()))
    });
    let on_message = update.reform(|e: InputEvent| {
        let area: HtmlTextAreaElement = e.target_unchecked_into();
        (ContactField::Message, FieldValue::Text(area.value()))
    });
    let on_honeypot = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.dispatch(FormAction::SetHoneypot(input.value()));
        })
    };

    let onsubmit = {
        let form = form.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            form.dispatch(FormAction::Submit);
        })
    };
    let onreset = {
        let form = form.clone();
        Callback::from(move |_: Event| form.dispatch(FormAction::Reset))
    };

    let data = &form.data;
    let errors = &form.errors;
    let id = |name: &str| variant.field_id(name);
    let message_error_id = id("message-error");
    let consent_error_id = id("gdpr-error");
    let message_error = errors.get(ContactField::Message);
    let consent_error = errors.get(ContactField::GdprConsent);

    html! {
        <form
            class={classes!("contact-form", variant.is_compact().then_some("compact"))}
            novalidate=true
            {onsubmit}
            {onreset}
        >
            <div class="form-row">
                <FormInput
                    id={id("first-name")}
                    label="First name"
                    value={data.first_name.clone()}
                    required=true
                    error={errors.get(ContactField::FirstName)}
                    autocomplete={Some(AttrValue::Static("given-name"))}
                    oninput={text(ContactField::FirstName)}
                />
                <FormInput
                    id={id("last-name")}
                    label="Last name"
                    value={data.last_name.clone()}
                    autocomplete={Some(AttrValue::Static("family-name"))}
                    oninput={text(ContactField::LastName)}
                />
            </div>
            <div class="form-row">
                <FormInput
                    id={id("email")}
                    label="Email"
                    input_type="email"
                    value={data.email.clone()}
                    required=true
                    error={errors.get(ContactField::Email)}
                    autocomplete={Some(AttrValue::Static("email"))}
                    oninput={text(ContactField::Email)}
                />
                <FormInput
                    id={id("phone")}
                    label="Phone"
                    input_type="tel"
                    value={data.phone.clone()}
                    autocomplete={Some(AttrValue::Static("tel"))}
                    oninput={text(ContactField::Phone)}
                />
            </div>

            <div class="form-field">
                <label for={id("project-type")}>{"Project type"}</label>
                <select id={id("project-type")} onchange={on_project_type}>
                    <option value="" selected={data.project_type.is_none()}>{"Choose a project type"}</option>
                    { for ProjectType::ALL.iter().map(|kind| html! {
                        <option value={kind.value()} selected={data.project_type == Some(*kind)}>
                            {kind.label()}
                        </option>
                    }) }
                </select>
            </div>

            <div class="form-field checkbox">
                <input
                    id={id("has-business")}
                    type="checkbox"
                    checked={data.has_business}
                    onchange={flag(ContactField::HasBusiness)}
                />
                <label for={id("has-business")}>{"I already run a business"}</label>
            </div>
            if data.has_business {
                <FormInput
                    id={id("business")}
                    label="Business name"
                    value={data.business.clone()}
                    autocomplete={Some(AttrValue::Static("organization"))}
                    oninput={text(ContactField::Business)}
                />
            }

            <div class="form-field">
                <label for={id("message")}>
                    {"Your project"}
                    <span class="required" aria-hidden="true">{" *"}</span>
                </label>
                <textarea
                    id={id("message")}
                    rows={if variant.is_compact() { "3" } else { "5" }}
                    value={data.message.clone()}
                    aria-required="true"
                    aria-invalid={message_error.is_some().to_string()}
                    aria-describedby={message_error.map(|_| message_error_id.clone())}
                    oninput={on_message}
                />
                <FieldErrorMessage id={message_error_id.clone()} error={message_error} />
            </div>

            <div class="form-field checkbox">
                <input
                    id={id("callback")}
                    type="checkbox"
                    checked={data.callback_consent}
                    onchange={flag(ContactField::CallbackConsent)}
                />
                <label for={id("callback")}>{"I would like to be called back"}</label>
            </div>
            <div class="form-field checkbox">
                <input
                    id={id("gdpr")}
                    type="checkbox"
                    checked={data.gdpr_consent}
                    aria-required="true"
                    aria-invalid={consent_error.is_some().to_string()}
                    aria-describedby={consent_error.map(|_| consent_error_id.clone())}
                    onchange={flag(ContactField::GdprConsent)}
                />
                <label for={id("gdpr")}>
                    {"I agree that my details are used to answer this request. "}
                    <a href="/legal">{"Privacy policy"}</a>
                </label>
                <FieldErrorMessage id={consent_error_id.clone()} error={consent_error} />
            </div>

            // Bots fill every input, people never see this one
            <input
                type="text"
                name="website"
                class="hidden"
                aria-hidden="true"
                tabindex="-1"
                autocomplete="off"
                value={form.honeypot.clone()}
                oninput={on_honeypot}
            />

            if form.submitted && !errors.is_empty() {
                <p class="form-summary" role="alert">
                    {format!("{} field(s) need attention", errors.count())}
                </p>
            }

            <div class="form-actions">
                <button type="reset" class="reset-button">{"Clear"}</button>
                <button type="submit" class="submit-button">{"Send my request"}</button>
            </div>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_keep_element_ids_apart() {
        let ids: Vec<String> = [FormVariant::Modal, FormVariant::HeroDesktop, FormVariant::HeroMobile]
            .iter()
            .map(|variant| variant.field_id("email"))
            .collect();

        assert_eq!(ids, ["modal-email", "hero-desktop-email", "hero-mobile-email"]);
    }

    #[test]
    fn only_the_mobile_hero_form_is_compact() {
        assert!(FormVariant::HeroMobile.is_compact());
        assert!(!FormVariant::HeroDesktop.is_compact());
        assert!(!FormVariant::Modal.is_compact());
    }
}
