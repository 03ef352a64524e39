//! Section G: contact details and the form.
//!
//! The form is rendered from a [`ContactForm`], so every state has a
//! server-side rendition: inline errors under their fields, the generic
//! banner, disabled inputs while submitting, and the confirmation panel once
//! sent. The page runtime moves between the same states in the browser
//! using the labels carried on the `<form>` element.

use super::{section_header, section_info};
use crate::animation::SectionMotion;
use crate::contact::{ContactForm, Field, FormState, GENERIC_ERROR_BANNER, SUBMIT_LABEL, SUBMITTING_LABEL};
use crate::content::Content;
use crate::theme::ThemeContext;
use maud::{Markup, html};

fn placeholder(field: Field) -> &'static str {
    match field {
        Field::Name => "Your full name",
        Field::Email => "your.email@example.com",
        Field::Subject => "What is this regarding?",
        Field::Message => "Tell me about your project or opportunity...",
    }
}

fn form_field(form: &ContactForm, field: Field) -> Markup {
    let id = format!("contact-{}", field.key());
    let value = form.fields().get(field);
    let disabled = form.inputs_disabled();
    let errors = form.inline_errors(field);
    html! {
        div.form-field.has-error[!errors.is_empty()] {
            label for=(id) { (field.label().to_uppercase()) " *" }
            @match field {
                Field::Message => {
                    textarea id=(id) name=(field.key()) rows="6" required
                        placeholder=(placeholder(field)) disabled[disabled] { (value) }
                }
                Field::Email => {
                    input id=(id) type="email" name=(field.key()) value=(value) required
                        placeholder=(placeholder(field)) disabled[disabled];
                }
                _ => {
                    input id=(id) type="text" name=(field.key()) value=(value) required
                        placeholder=(placeholder(field)) disabled[disabled];
                }
            }
            div.field-errors data-error-for=(field.key()) {
                @for message in &errors {
                    p.field-error { (message) }
                }
            }
        }
    }
}

/// The form, or the confirmation panel once sent. Both are always present so
/// the runtime can switch between them.
pub fn contact_form(form: &ContactForm, action_url: &str, content: &Content) -> Markup {
    let sent = *form.state() == FormState::Succeeded;
    let banner = form.banner();
    html! {
        form #contact-form
            action=(action_url)
            method="POST"
            novalidate
            hidden[sent]
            data-banner=(GENERIC_ERROR_BANNER)
            data-submit-label=(SUBMIT_LABEL)
            data-submitting-label=(SUBMITTING_LABEL) {
            h3.box-title { "SEND A TELEGRAM" }
            div.form-banner role="alert" hidden[banner.is_none()] {
                @if let Some(banner) = banner { (banner) }
            }
            div.form-row {
                (form_field(form, Field::Name))
                (form_field(form, Field::Email))
            }
            (form_field(form, Field::Subject))
            (form_field(form, Field::Message))
            button.dispatch type="submit" disabled[form.inputs_disabled()] {
                (form.button_label())
            }
        }
        div.success-panel role="status" hidden[!sent] {
            h3 { "MESSAGE DISPATCHED!" }
            p { (content.contact.confirmation) }
            p { (content.contact.follow_up) }
        }
    }
}

pub fn contact(
    content: &Content,
    form: &ContactForm,
    action_url: &str,
    theme: ThemeContext,
    motion: &SectionMotion,
) -> Markup {
    let Some(info) = section_info("contact") else {
        return html! {};
    };
    let person = &content.person;
    html! {
        section.paper-section id=(info.id) data-anim-loops=[motion.loops()] {
            (section_header(info, "GET IN TOUCH", theme, motion))
            p.section-tagline { (content.contact.tagline) }
            div.contact-layout data-anim-id="contact-section" data-anim=[motion.node("contact-section")] {
                aside.contact-info {
                    div.boxed {
                        h4.box-title { "CONTACT INFORMATION" }
                        dl {
                            dt { "Email" } dd { a href={ "mailto:" (person.email) } { (person.email) } }
                            dt { "Phone" } dd { a href={ "tel:" (person.phone) } { (person.phone) } }
                            dt { "Location" } dd { (person.location) }
                        }
                    }
                    div.boxed {
                        h4.box-title { "PROFESSIONAL NETWORKS" }
                        ul.telegraph {
                            @for link in &content.links {
                                li {
                                    a href=(link.url) target="_blank" rel="noopener" { (link.label) }
                                    span.blurb { (link.blurb) }
                                }
                            }
                        }
                    }
                    div.boxed.availability {
                        h4.box-title { "AVAILABILITY" }
                        p.bulletin-flag { (person.availability) }
                        p { (person.availability_detail) }
                    }
                }
                div.contact-form-column {
                    (contact_form(form, action_url, content))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::tests::{MockEndpoint, filled};
    use crate::contact::{FieldError, FormFields, SubmitResponse};

    const ACTION: &str = "https://formspree.io/f/mrblelvy";

    fn render(form: &ContactForm) -> String {
        contact_form(form, ACTION, &Content::stock().unwrap()).into_string()
    }

    #[test]
    fn idle_form_has_no_errors_and_hidden_success() {
        let html = render(&ContactForm::new());
        assert!(html.contains(r#"action="https://formspree.io/f/mrblelvy""#));
        assert!(!html.contains("field-error\""));
        assert!(html.contains(r#"role="status" hidden>"#));
        assert!(html.contains("DISPATCH MESSAGE</button>"));
    }

    #[test]
    fn failed_form_renders_errors_at_their_fields() {
        let mut form = ContactForm::with_fields(filled());
        let endpoint = MockEndpoint::new(vec![Ok(SubmitResponse::Rejected(vec![
            FieldError::on(Field::Email, "should be an email"),
            FieldError::on(Field::Message, "is too short"),
        ]))]);
        form.submit(&endpoint).unwrap();

        let html = render(&form);
        assert_eq!(html.matches(r#"<p class="field-error">"#).count(), 2);
        let (_, after_email) = html.split_once(r#"data-error-for="email""#).unwrap();
        assert!(after_email.starts_with("><p class=\"field-error\">Email should be an email</p>"));
        assert!(html.contains("Message is too short"));
        assert!(html.contains(&format!(r#"role="alert">{GENERIC_ERROR_BANNER}</div>"#)));
    }

    #[test]
    fn submitting_form_disables_inputs() {
        let mut form = ContactForm::with_fields(filled());
        form.begin_submit().unwrap();
        let html = render(&form);
        assert_eq!(html.matches(" disabled").count(), 5);
        assert!(html.contains("DISPATCHING...</button>"));
    }

    #[test]
    fn succeeded_form_shows_confirmation() {
        let mut form = ContactForm::with_fields(filled());
        form.submit(&MockEndpoint::new(vec![])).unwrap();
        let html = render(&form);
        assert!(html.contains(r#"role="status">"#));
        assert!(html.contains("MESSAGE DISPATCHED!"));
        assert!(html.contains(" hidden data-banner"));
    }

    #[test]
    fn field_values_survive_rerender() {
        let form = ContactForm::with_fields(FormFields {
            message: "<b>hi</b>".into(),
            ..filled()
        });
        let html = render(&form);
        assert!(html.contains(r#"value="ada@example.com""#));
        assert!(html.contains("&lt;b&gt;hi&lt;/b&gt;</textarea>"));
    }
}
