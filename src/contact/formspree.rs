//! Formspree-hosted form endpoint.
//!
//! `POST https://formspree.io/f/{form_id}` with a JSON body and
//! `Accept: application/json`. A 2xx is acceptance; a 4xx carries
//! `{"errors": [{"field", "message", "code"}]}`.

use super::{EndpointError, FieldError, FormEndpoint, FormFields, SubmitResponse};
use log::debug;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://formspree.io/f";

#[derive(Debug, Deserialize)]
struct Rejection {
    #[serde(default)]
    errors: Vec<FieldError>,
}

pub struct FormspreeEndpoint {
    client: Client,
    url: String,
}

impl FormspreeEndpoint {
    pub fn new(form_id: &str, timeout: Duration) -> Result<Self, EndpointError> {
        Self::with_base_url(DEFAULT_BASE_URL, form_id, timeout)
    }

    pub fn with_base_url(
        base_url: &str,
        form_id: &str,
        timeout: Duration,
    ) -> Result<Self, EndpointError> {
        if form_id.trim().is_empty() {
            return Err(EndpointError::NotConfigured);
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: form_url(base_url, form_id),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

pub fn form_url(base_url: &str, form_id: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), form_id.trim())
}

/// Field errors from a rejection body, or `None` if it isn't one.
pub fn parse_rejection(body: &str) -> Option<Vec<FieldError>> {
    serde_json::from_str::<Rejection>(body)
        .ok()
        .map(|r| r.errors)
        .filter(|errors| !errors.is_empty())
}

impl FormEndpoint for FormspreeEndpoint {
    fn submit(&self, fields: &FormFields) -> Result<SubmitResponse, EndpointError> {
        debug!("POST {}", self.url);
        let response = self
            .client
            .post(&self.url)
            .header(ACCEPT, "application/json")
            .json(fields)
            .send()?;

        let status = response.status();
        if status.is_success() {
            return Ok(SubmitResponse::Accepted);
        }
        if status.is_client_error() {
            let body = response.text()?;
            if let Some(errors) = parse_rejection(&body) {
                return Ok(SubmitResponse::Rejected(errors));
            }
        }
        Err(EndpointError::Status(status.as_u16()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::Field;

    #[test]
    fn url_joins_base_and_id() {
        assert_eq!(
            form_url("https://formspree.io/f/", " abc123 "),
            "https://formspree.io/f/abc123"
        );
    }

    #[test]
    fn parses_field_errors() {
        let body = r#"{"errors":[
            {"field":"email","message":"should be an email","code":"TYPE_EMAIL"},
            {"message":"form not active","code":"INACTIVE"}
        ]}"#;
        let errors = parse_rejection(body).unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].target(), Some(Field::Email));
        assert_eq!(errors[0].code.as_deref(), Some("TYPE_EMAIL"));
        assert_eq!(errors[1].field, None);
    }

    #[test]
    fn non_rejection_bodies_are_ignored() {
        assert_eq!(parse_rejection("<html>bad gateway</html>"), None);
        assert_eq!(parse_rejection(r#"{"errors":[]}"#), None);
        assert_eq!(parse_rejection(r#"{"ok":true}"#), None);
    }

    #[test]
    fn blank_form_id_is_not_configured() {
        let err = FormspreeEndpoint::new("  ", Duration::from_secs(5)).err();
        assert!(matches!(err, Some(EndpointError::NotConfigured)));
    }
}
