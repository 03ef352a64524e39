//! Section F: the printable résumé.
//!
//! `#resume-document` is what the export pipeline captures. Everything
//! tagged `data-export-exclude` is hidden for the duration of the capture.

use super::{section_header, section_info};
use crate::animation::SectionMotion;
use crate::content::Content;
use crate::theme::ThemeContext;
use maud::{Markup, html};

/// Element id the export pipeline captures.
pub const DOCUMENT_ID: &str = "resume-document";

/// Marker attribute for elements left out of the export.
pub const EXCLUDE_ATTR: &str = "data-export-exclude";

pub fn resume(
    content: &Content,
    pdf_filename: &str,
    theme: ThemeContext,
    motion: &SectionMotion,
) -> Markup {
    let Some(info) = section_info("resume") else {
        return html! {};
    };
    let person = &content.person;
    let resume = &content.resume;
    let job = content.experience.jobs.first();
    let education = &content.education;

    html! {
        section.paper-section id=(info.id) {
            div data-export-exclude {
                (section_header(info, "CURRICULUM VITAE", theme, motion))
                div.resume-actions {
                    a.download-button href=(pdf_filename) download=(pdf_filename) {
                        "DOWNLOAD PDF"
                    }
                    p.caption { "Print-ready A4 edition of the document below." }
                }
            }
            article.resume-document id=(DOCUMENT_ID) {
                header.resume-header {
                    h1 { (person.name) }
                    p.resume-tagline { (person.tagline) }
                    p.resume-contact {
                        (person.email) " • " (person.phone) " • " (person.location)
                    }
                    p.resume-contact {
                        @for (i, link) in content.links.iter().enumerate() {
                            @if i > 0 { " • " }
                            (link.display)
                        }
                    }
                }
                section.resume-block {
                    h2 { "PROFESSIONAL SUMMARY" }
                    p { (resume.summary) }
                }
                @if let Some(job) = job {
                    section.resume-block {
                        h2 { "PROFESSIONAL EXPERIENCE" }
                        div.resume-entry-head {
                            h3 { (job.title) }
                            span { (job.period) }
                        }
                        p.resume-entry-sub { (job.company) " • " (job.location) }
                        ul { @for item in &resume.experience { li { (item) } } }
                    }
                }
                section.resume-block {
                    h2 { "KEY PROJECTS" }
                    @for project in &resume.projects {
                        div.resume-entry {
                            div.resume-entry-head {
                                h3 { (project.title) }
                                span { (project.kind) }
                            }
                            p { (project.summary) }
                            p.resume-tech { "Technologies: " (project.technologies.join(", ")) }
                        }
                    }
                }
                section.resume-block {
                    h2 { "EDUCATION" }
                    div.resume-entry-head {
                        h3 { (education.degree) }
                        span { (education.period) }
                    }
                    p.resume-entry-sub {
                        (education.institution) " • CGPA: " (education.cgpa)
                    }
                    p { (resume.education_note) }
                }
                section.resume-block {
                    h2 { "TECHNICAL SKILLS" }
                    dl.resume-skills {
                        @for group in &resume.skills {
                            dt { (group.group) ":" }
                            dd { (group.items.join(", ")) }
                        }
                    }
                }
                section.resume-block {
                    h2 { "KEY ACHIEVEMENTS" }
                    ul { @for item in &resume.achievements { li { (item) } } }
                }
                section.resume-block {
                    h2 { "AVAILABILITY" }
                    p { strong { (person.availability) } " • " (resume.availability_detail) }
                }
                footer.resume-colophon { (resume.colophon) }
            }
        }
    }
}
