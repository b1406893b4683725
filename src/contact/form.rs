use std::fmt::Write as _;
use std::rc::Rc;

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use yew::functional::Reducible;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Information,
    Showcase,
    Custom,
    Redesign,
    Other,
}

impl ProjectType {
    pub const ALL: [ProjectType; 5] = [
        ProjectType::Information,
        ProjectType::Showcase,
        ProjectType::Custom,
        ProjectType::Redesign,
        ProjectType::Other,
    ];

    pub fn value(&self) -> &'static str {
        match self {
            ProjectType::Information => "information",
            ProjectType::Showcase => "showcase",
            ProjectType::Custom => "custom",
            ProjectType::Redesign => "redesign",
            ProjectType::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectType::Information => "Just asking for information",
            ProjectType::Showcase => "Showcase website",
            ProjectType::Custom => "Custom website",
            ProjectType::Redesign => "Website redesign",
            ProjectType::Other => "Something else",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.value() == value)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ContactFormData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub project_type: Option<ProjectType>,
    pub has_business: bool,
    pub business: String,
    pub message: String,
    pub callback_consent: bool,
    pub gdpr_consent: bool,
}

impl ContactFormData {
    /// `mailto:` link carrying the request, used in place of a backend.
    pub fn mailto_href(&self, recipient: &str) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let subject = format!("Project request from {}", name.trim());

        let mut body = String::new();
        let _ = writeln!(body, "Name: {}", name.trim());
        let _ = writeln!(body, "Email: {}", self.email.trim());
        if !self.phone.trim().is_empty() {
            let _ = writeln!(body, "Phone: {}", self.phone.trim());
        }
        if let Some(kind) = self.project_type {
            let _ = writeln!(body, "Project: {}", kind.label());
        }
        if self.has_business && !self.business.trim().is_empty() {
            let _ = writeln!(body, "Business: {}", self.business.trim());
        }
        let _ = writeln!(body, "Call back: {}", if self.callback_consent { "yes" } else { "no" });
        let _ = write!(body, "\n{}", self.message.trim());

        format!(
            "mailto:{}?subject={}&body={}",
            recipient,
            urlencoding::encode(&subject),
            urlencoding::encode(&body)
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactField {
    FirstName,
    LastName,
    Email,
    Phone,
    ProjectType,
    HasBusiness,
    Business,
    Message,
    CallbackConsent,
    GdprConsent,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("First name is required")]
    FirstNameRequired,
    #[error("Email is required")]
    EmailRequired,
    #[error("Email is not valid")]
    EmailInvalid,
    #[error("Message is required")]
    MessageRequired,
    #[error("You must accept the privacy policy")]
    ConsentRequired,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub first_name: Option<FieldError>,
    pub email: Option<FieldError>,
    pub message: Option<FieldError>,
    pub gdpr_consent: Option<FieldError>,
}

impl FormErrors {
    pub fn get(&self, field: ContactField) -> Option<FieldError> {
        match field {
            ContactField::FirstName => self.first_name,
            ContactField::Email => self.email,
            ContactField::Message => self.message,
            ContactField::GdprConsent => self.gdpr_consent,
            _ => None,
        }
    }

    pub fn count(&self) -> usize {
        [self.first_name, self.email, self.message, self.gdpr_consent]
            .iter()
            .filter(|error| error.is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("{0} field(s) need attention")]
    Invalid(usize),
    #[error("submission looks automated")]
    Spam,
}

/// An accepted submission waiting to be handed to the caller. `id` grows with
/// every accepted submission so identical requests are still told apart.
#[derive(Clone, Debug, PartialEq)]
pub struct SentRequest {
    pub id: u32,
    pub data: ContactFormData,
}

pub enum FormAction {
    Update(ContactField, FieldValue),
    SetHoneypot(String),
    Submit,
    Reset,
}

/// State of one contact form: field values, validation errors and the
/// hidden anti-spam field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactForm {
    pub data: ContactFormData,
    pub submitted: bool,
    pub errors: FormErrors,
    /// Bound to an input real users never see.
    pub honeypot: String,
    /// Last accepted submission, kept across resets.
    pub sent: Option<SentRequest>,
}

impl Reducible for ContactForm {
    type Action = FormAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            FormAction::Update(field, value) => next.update_field(field, value),
            FormAction::SetHoneypot(text) => next.honeypot = text,
            FormAction::Reset => next.reset(),
            FormAction::Submit => match next.submit() {
                Ok(data) => {
                    let id = next.sent.as_ref().map_or(1, |sent| sent.id.wrapping_add(1));
                    next.reset();
                    next.sent = Some(SentRequest { id, data });
                }
                Err(SubmitError::Spam) => debug!("Dropping contact form submission, honeypot filled"),
                Err(err) => debug!("Contact form not sent: {}", err),
            },
        }
        Rc::new(next)
    }
}

impl ContactForm {
    pub fn update_field(&mut self, field: ContactField, value: FieldValue) {
        let data = &mut self.data;
        match (field, value) {
            (ContactField::FirstName, FieldValue::Text(text)) => data.first_name = text,
            (ContactField::LastName, FieldValue::Text(text)) => data.last_name = text,
            (ContactField::Email, FieldValue::Text(text)) => data.email = text,
            (ContactField::Phone, FieldValue::Text(text)) => data.phone = text,
            (ContactField::ProjectType, FieldValue::Text(text)) => {
                data.project_type = ProjectType::from_value(&text)
            }
            (ContactField::HasBusiness, FieldValue::Flag(flag)) => data.has_business = flag,
            (ContactField::Business, FieldValue::Text(text)) => data.business = text,
            (ContactField::Message, FieldValue::Text(text)) => data.message = text,
            (ContactField::CallbackConsent, FieldValue::Flag(flag)) => data.callback_consent = flag,
            (ContactField::GdprConsent, FieldValue::Flag(flag)) => data.gdpr_consent = flag,
            (field, value) => warn!("ignoring {:?} for contact field {:?}", value, field),
        }
    }

    pub fn clear_errors(&mut self) {
        self.errors = FormErrors::default();
    }

    /// Empties fields and errors. The last accepted submission is kept.
    pub fn reset(&mut self) {
        *self = Self {
            sent: self.sent.take(),
            ..Self::default()
        };
    }

    /// Checks the required fields, recording an error per failing field.
    pub fn validate(&mut self) -> Result<&ContactFormData, SubmitError> {
        self.clear_errors();
        let data = &self.data;

        if data.first_name.trim().is_empty() {
            self.errors.first_name = Some(FieldError::FirstNameRequired);
        }

        if data.email.trim().is_empty() {
            self.errors.email = Some(FieldError::EmailRequired);
        } else if !EMAIL_PATTERN.is_match(&data.email) {
            self.errors.email = Some(FieldError::EmailInvalid);
        }

        if data.message.trim().is_empty() {
            self.errors.message = Some(FieldError::MessageRequired);
        }

        if !data.gdpr_consent {
            self.errors.gdpr_consent = Some(FieldError::ConsentRequired);
        }

        self.submitted = true;

        match self.errors.count() {
            0 => Ok(&self.data),
            invalid => Err(SubmitError::Invalid(invalid)),
        }
    }

    /// Validates and hands back the data to send. A filled honeypot rejects
    /// the submission before validation runs.
    pub fn submit(&mut self) -> Result<ContactFormData, SubmitError> {
        if !self.honeypot.trim().is_empty() {
            return Err(SubmitError::Spam);
        }
        self.validate().cloned()
    }
}
