//! Document shell: head, top bar and sidebar, loading splash, footer, and
//! the assembly of every section into one page.

use super::{FRONT_PAGE, SECTIONS, contact, resume, sections, themed_text};
use crate::animation::SectionMotion;
use crate::config::SiteConfig;
use crate::contact::ContactForm;
use crate::content::Content;
use crate::loading::SplashTimeline;
use crate::theme::{DARK_ROOT_CLASS, THEME_KEY, ThemeContext};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use serde_json::json;
use std::collections::BTreeMap;

/// Applies the reader's stored theme before first paint. A missing or
/// unknown value means light, whatever the page was built with; unreadable
/// storage keeps the built class.
fn theme_boot_js() -> String {
    format!(
        "(function(){{try{{var t=localStorage.getItem('{THEME_KEY}');\
         document.documentElement.classList.toggle('{DARK_ROOT_CLASS}',t==='dark');}}catch(e){{}}}})();"
    )
}

/// Everything the page needs, already resolved.
pub struct PageInput<'a> {
    pub content: &'a Content,
    pub config: &'a SiteConfig,
    pub theme: ThemeContext,
    /// `None` when the splash is disabled.
    pub splash: Option<&'a SplashTimeline>,
    /// Motion per section id. Missing entries render without animation.
    pub motion: &'a BTreeMap<String, SectionMotion>,
    pub form: &'a ContactForm,
    pub css: &'a str,
    pub js: &'a str,
}

pub fn page_title(content: &Content) -> String {
    format!("{} - {}", content.masthead.title, content.person.name)
}

/// Renders the base HTML document structure
fn base_document(input: &PageInput<'_>, content: Markup) -> Markup {
    let site = &input.config.site;
    html! {
        (DOCTYPE)
        html lang=(site.lang) class=[input.theme.root_class()] {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                @if !site.description.is_empty() {
                    meta name="description" content=(site.description);
                }
                title { (page_title(input.content)) }
                script { (PreEscaped(theme_boot_js())) }
                style { (PreEscaped(input.css)) }
                noscript { style { "#splash { display: none; }" } }
            }
            body
                data-motion=(input.config.motion.enabled)
                data-motion-min=(input.config.motion.min_viewport_px) {
                (content)
                script { (PreEscaped(input.js)) }
            }
        }
    }
}

/// Top bar with the theme toggle, and the section sidebar.
pub fn site_header(content: &Content, theme: ThemeContext) -> Markup {
    html! {
        header.topbar {
            button.sidebar-toggle type="button" aria-controls="sidebar" aria-expanded="false" {
                "☰ SECTIONS"
            }
            a.topbar-title href={ "#" (FRONT_PAGE.id) } { (content.masthead.title) }
            span.topbar-edition { (content.masthead.edition) }
            button #theme-toggle .theme-toggle type="button" aria-pressed=(theme.is_dark()) {
                (themed_text(theme, "DARK MODE", "LIGHT MODE"))
            }
        }
        nav #sidebar .sidebar aria-label="Sections" {
            h2.sidebar-title { "SECTIONS" }
            ul.sidebar-sections {
                li {
                    a href={ "#" (FRONT_PAGE.id) } {
                        span.channel { (FRONT_PAGE.channel) }
                        span.topic { (FRONT_PAGE.topic) }
                    }
                }
                @for section in &SECTIONS {
                    li {
                        a href={ "#" (section.id) } {
                            span.channel { (section.channel) }
                            span.topic { (section.topic) " • Page " (section.page) }
                        }
                    }
                }
            }
            h2.sidebar-title { "QUICK LINKS" }
            ul.sidebar-links {
                @for link in &content.links {
                    li { a href=(link.url) target="_blank" rel="noopener" { (link.label) } }
                }
                li { a href={ "mailto:" (content.person.email) } { "Email" } }
            }
        }
    }
}

fn splash_data(content: &Content, timeline: &SplashTimeline) -> String {
    let ms = |d: std::time::Duration| d.as_millis() as u64;
    let progress: Vec<u64> = (0..timeline.stage_starts.len())
        .map(|i| timeline.progress_at_stage(i).round() as u64)
        .collect();
    json!({
        "stages": content.splash.stages,
        "revealAt": ms(timeline.reveal_at),
        "stageStarts": timeline.stage_starts.iter().copied().map(ms).collect::<Vec<_>>(),
        "completeAt": ms(timeline.complete_at),
        "typeInterval": ms(timeline.type_interval),
        "progress": progress,
    })
    .to_string()
}

/// The loading splash. The runtime replays `data-splash` and removes the
/// element when the timeline completes.
pub fn splash(content: &Content, timeline: &SplashTimeline) -> Markup {
    html! {
        div #splash .splash role="status" aria-live="polite" data-splash=(splash_data(content, timeline)) {
            div.splash-ticker {
                span.bulletin-flag { "BREAKING NEWS" }
                div.ticker-track {
                    @for item in &content.splash.ticker {
                        span.ticker-item { (item) }
                    }
                }
            }
            div.splash-masthead {
                h1 { (content.masthead.title) }
                p { "\"" (content.masthead.motto) "\"" }
            }
            div.splash-progress hidden {
                div.splash-bar { div.splash-fill {} }
                p.splash-percent { "0%" }
            }
            p.splash-stage { span.splash-typed {} span.cursor aria-hidden="true" { "|" } }
            @if !content.splash.status_line.is_empty() {
                p.splash-status { (content.splash.status_line) }
            }
        }
    }
}

pub fn site_footer(content: &Content) -> Markup {
    html! {
        footer.site-footer {
            div.footer-columns {
                div {
                    h3 { (content.masthead.title) }
                    p { (content.footer.blurb) }
                }
                div {
                    h4 { "SECTIONS" }
                    ul {
                        @for section in &SECTIONS {
                            li { a href={ "#" (section.id) } { (section.topic) } }
                        }
                    }
                }
                div {
                    h4 { "PRINTED WITH" }
                    ul.badges {
                        @for tech in &content.footer.technologies {
                            li.tech-badge { (tech) }
                        }
                    }
                }
            }
            div.rule-double {}
            p.copyright { (content.footer.copyright) }
            p.credit { (content.footer.credit) }
        }
    }
}

/// The whole page.
pub fn render_page(input: &PageInput<'_>) -> Markup {
    let none = SectionMotion::none();
    let motion = |id: &str| input.motion.get(id).unwrap_or(&none);
    let content = input.content;
    let theme = input.theme;
    let export = &input.config.export;

    let body = html! {
        @if let Some(timeline) = input.splash {
            (splash(content, timeline))
        }
        div #page .page {
            (site_header(content, theme))
            main {
                (sections::hero(content, theme, motion("home")))
                (sections::about(&content.about, theme, motion("about")))
                (sections::experience(&content.experience, theme, motion("experience")))
                (sections::projects(&content.projects, theme, motion("projects")))
                (sections::skills(&content.skills, theme, motion("skills")))
                (sections::education(&content.education, theme, motion("education")))
                (resume::resume(content, export.filename.trim(), theme, motion("resume")))
                (contact::contact(
                    content,
                    input.form,
                    &input.config.contact.action_url(),
                    theme,
                    motion("contact"),
                ))
            }
            (site_footer(content))
        }
    };
    base_document(input, body)
}
