//! Contact form: field state, the submission state machine, and the hosted
//! endpoint it posts to.
//!
//! ```text
//! Idle ──submit──▶ Submitting ──▶ Succeeded        (terminal until reset)
//!                       │
//!                       └──────▶ Failed(errors) ──submit──▶ Submitting
//! ```
//!
//! A submit with any empty field is refused before anything leaves the
//! client; the state stays where it was.

pub mod formspree;

pub use formspree::FormspreeEndpoint;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const GENERIC_ERROR_BANNER: &str = "Please check the form for errors and try again.";
pub const SUBMIT_LABEL: &str = "DISPATCH MESSAGE";
pub const SUBMITTING_LABEL: &str = "DISPATCHING...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    /// Wire name, also the `name` attribute of the input.
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Subject => "subject",
            Field::Message => "message",
        }
    }

    /// Prefix used for inline error messages.
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Subject => "Subject",
            Field::Message => "Message",
        }
    }

    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.key() == key)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl FormFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        };
        *slot = value.into();
    }

    /// Fields that are empty after trimming, in form order.
    pub fn missing(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|&f| self.get(f).trim().is_empty())
            .collect()
    }
}

/// One error reported by the endpoint. `field` is `None` for form-level
/// errors and for network failures.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldError {
    #[serde(default)]
    pub field: Option<String>,
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
}

impl FieldError {
    pub fn unmapped(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
            code: None,
        }
    }

    pub fn on(field: Field, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.key().to_string()),
            message: message.into(),
            code: None,
        }
    }

    /// The form field this error belongs to, if it names one we render.
    pub fn target(&self) -> Option<Field> {
        self.field.as_deref().and_then(Field::from_key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResponse {
    Accepted,
    Rejected(Vec<FieldError>),
}

#[derive(Error, Debug)]
pub enum EndpointError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("endpoint returned status {0}")]
    Status(u16),
    #[error("form endpoint is not configured")]
    NotConfigured,
}

/// Somewhere a filled-in form can be sent.
pub trait FormEndpoint {
    fn submit(&self, fields: &FormFields) -> Result<SubmitResponse, EndpointError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Submitting,
    Succeeded,
    Failed(Vec<FieldError>),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SubmitRefused {
    #[error("required fields are empty: {}", join_fields(.0))]
    MissingFields(Vec<Field>),
    #[error("a submission is already in progress")]
    InFlight,
    #[error("message already sent")]
    AlreadySent,
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.key())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    fields: FormFields,
    state: FormState,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    pub fn new() -> Self {
        Self::with_fields(FormFields::default())
    }

    pub fn with_fields(fields: FormFields) -> Self {
        Self {
            fields,
            state: FormState::Idle,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// Edit a field. Inputs are disabled while submitting and gone after
    /// success, so edits in those states are ignored.
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> bool {
        match self.state {
            FormState::Submitting | FormState::Succeeded => false,
            FormState::Idle | FormState::Failed(_) => {
                self.fields.set(field, value);
                true
            }
        }
    }

    /// Move to `Submitting` if the form may be sent.
    pub fn begin_submit(&mut self) -> Result<&FormFields, SubmitRefused> {
        match self.state {
            FormState::Submitting => return Err(SubmitRefused::InFlight),
            FormState::Succeeded => return Err(SubmitRefused::AlreadySent),
            FormState::Idle | FormState::Failed(_) => {}
        }
        let missing = self.fields.missing();
        if !missing.is_empty() {
            return Err(SubmitRefused::MissingFields(missing));
        }
        debug!("contact form submitting");
        self.state = FormState::Submitting;
        Ok(&self.fields)
    }

    /// Settle a submission started with [`begin_submit`](Self::begin_submit).
    pub fn finish(&mut self, outcome: Result<SubmitResponse, EndpointError>) -> &FormState {
        if self.state != FormState::Submitting {
            return &self.state;
        }
        self.state = match outcome {
            Ok(SubmitResponse::Accepted) => FormState::Succeeded,
            Ok(SubmitResponse::Rejected(errors)) if errors.is_empty() => {
                FormState::Failed(vec![FieldError::unmapped("Submission rejected")])
            }
            Ok(SubmitResponse::Rejected(errors)) => FormState::Failed(errors),
            Err(e) => {
                warn!("contact submission failed: {e}");
                FormState::Failed(vec![FieldError::unmapped(e.to_string())])
            }
        };
        debug!("contact form settled: {:?}", self.state);
        &self.state
    }

    /// Guarded submit against `endpoint`, blocking until it answers.
    pub fn submit(&mut self, endpoint: &impl FormEndpoint) -> Result<&FormState, SubmitRefused> {
        let fields = self.begin_submit()?.clone();
        let outcome = endpoint.submit(&fields);
        Ok(self.finish(outcome))
    }

    /// Back to an empty `Idle` form.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn errors(&self) -> &[FieldError] {
        match &self.state {
            FormState::Failed(errors) => errors,
            _ => &[],
        }
    }

    /// Inline messages shown under `field`, already prefixed with its label.
    pub fn inline_errors(&self, field: Field) -> Vec<String> {
        self.errors()
            .iter()
            .filter(|e| e.target() == Some(field))
            .map(|e| format!("{} {}", field.label(), e.message))
            .collect()
    }

    /// The generic banner, shown whenever there is any error.
    pub fn banner(&self) -> Option<&'static str> {
        (!self.errors().is_empty()).then_some(GENERIC_ERROR_BANNER)
    }

    pub fn inputs_disabled(&self) -> bool {
        self.state == FormState::Submitting
    }

    pub fn button_label(&self) -> &'static str {
        if self.inputs_disabled() {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Endpoint returning scripted responses and recording what it was sent.
    pub struct MockEndpoint {
        pub responses: RefCell<Vec<Result<SubmitResponse, EndpointError>>>,
        pub sent: RefCell<Vec<FormFields>>,
    }

    impl MockEndpoint {
        pub fn new(responses: Vec<Result<SubmitResponse, EndpointError>>) -> Self {
            Self {
                responses: RefCell::new(responses),
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    impl FormEndpoint for MockEndpoint {
        fn submit(&self, fields: &FormFields) -> Result<SubmitResponse, EndpointError> {
            self.sent.borrow_mut().push(fields.clone());
            let mut responses = self.responses.borrow_mut();
            if responses.is_empty() {
                Ok(SubmitResponse::Accepted)
            } else {
                responses.remove(0)
            }
        }
    }

    pub fn filled() -> FormFields {
        FormFields {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: "Hello".into(),
            message: "Let's talk.".into(),
        }
    }

    #[test]
    fn empty_field_blocks_submission() {
        let mut form = ContactForm::with_fields(FormFields {
            subject: "   ".into(),
            ..filled()
        });
        let endpoint = MockEndpoint::new(vec![]);

        let err = form.submit(&endpoint).unwrap_err();
        assert_eq!(err, SubmitRefused::MissingFields(vec![Field::Subject]));
        assert_eq!(form.state(), &FormState::Idle);
        assert!(endpoint.sent.borrow().is_empty());
    }

    #[test]
    fn accepted_submission_succeeds() {
        let mut form = ContactForm::with_fields(filled());
        let endpoint = MockEndpoint::new(vec![Ok(SubmitResponse::Accepted)]);
        assert_eq!(form.submit(&endpoint).unwrap(), &FormState::Succeeded);
        assert_eq!(endpoint.sent.borrow()[0], filled());
        assert_eq!(form.banner(), None);
    }

    #[test]
    fn field_errors_render_inline_at_their_fields() {
        let mut form = ContactForm::with_fields(filled());
        let endpoint = MockEndpoint::new(vec![Ok(SubmitResponse::Rejected(vec![
            FieldError::on(Field::Email, "should be an email"),
            FieldError::on(Field::Message, "is too short"),
        ]))]);
        form.submit(&endpoint).unwrap();

        assert_ne!(form.state(), &FormState::Succeeded);
        assert_eq!(form.inline_errors(Field::Email), vec!["Email should be an email"]);
        assert_eq!(form.inline_errors(Field::Message), vec!["Message is too short"]);
        assert!(form.inline_errors(Field::Name).is_empty());
        assert!(form.inline_errors(Field::Subject).is_empty());
        let inline: usize = Field::ALL.iter().map(|&f| form.inline_errors(f).len()).sum();
        assert_eq!(inline, 2);
        assert_eq!(form.banner(), Some(GENERIC_ERROR_BANNER));
    }

    #[test]
    fn network_failure_is_a_single_unmapped_error() {
        let mut form = ContactForm::with_fields(filled());
        let endpoint = MockEndpoint::new(vec![Err(EndpointError::Status(503))]);
        form.submit(&endpoint).unwrap();

        assert_eq!(form.errors().len(), 1);
        assert_eq!(form.errors()[0].target(), None);
        assert_eq!(form.banner(), Some(GENERIC_ERROR_BANNER));
    }

    #[test]
    fn failed_form_can_retry() {
        let mut form = ContactForm::with_fields(filled());
        let endpoint = MockEndpoint::new(vec![
            Err(EndpointError::Status(500)),
            Ok(SubmitResponse::Accepted),
        ]);
        form.submit(&endpoint).unwrap();
        assert!(matches!(form.state(), FormState::Failed(_)));
        form.submit(&endpoint).unwrap();
        assert_eq!(form.state(), &FormState::Succeeded);
    }

    #[test]
    fn succeeded_is_terminal_until_reset() {
        let mut form = ContactForm::with_fields(filled());
        let endpoint = MockEndpoint::new(vec![]);
        form.submit(&endpoint).unwrap();

        assert_eq!(form.submit(&endpoint).unwrap_err(), SubmitRefused::AlreadySent);
        assert!(!form.set(Field::Name, "Grace"));
        form.reset();
        assert_eq!(form.state(), &FormState::Idle);
        assert_eq!(form.fields(), &FormFields::default());
    }

    #[test]
    fn submitting_disables_inputs_and_relabels_button() {
        let mut form = ContactForm::with_fields(filled());
        assert_eq!(form.button_label(), SUBMIT_LABEL);
        form.begin_submit().unwrap();
        assert!(form.inputs_disabled());
        assert_eq!(form.button_label(), SUBMITTING_LABEL);
        assert!(!form.set(Field::Email, "x"));
        assert_eq!(form.begin_submit().unwrap_err(), SubmitRefused::InFlight);
    }

    #[test]
    fn unknown_field_names_only_reach_the_banner() {
        let mut form = ContactForm::with_fields(filled());
        form.begin_submit().unwrap();
        form.finish(Ok(SubmitResponse::Rejected(vec![FieldError {
            field: Some("_gotcha".into()),
            message: "spam".into(),
            code: None,
        }])));
        assert!(Field::ALL.iter().all(|&f| form.inline_errors(f).is_empty()));
        assert_eq!(form.banner(), Some(GENERIC_ERROR_BANNER));
    }
}
