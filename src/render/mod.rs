//! Section renderers.
//!
//! Every renderer is a pure function of its content, a [`ThemeContext`]
//! snapshot and the section's [`SectionMotion`]; none of them read global
//! state. [`page`] stitches them into the final document.
//!
//! | Module | Renders |
//! |--------|---------|
//! | [`page`] | Document shell, header and sidebar, loading splash, footer |
//! | [`sections`] | Hero, About, Experience, Projects, Skills, Education |
//! | [`resume`] | The résumé document and its download trigger |
//! | [`contact`] | Contact details and the form in each of its states |

pub mod contact;
pub mod page;
pub mod resume;
pub mod sections;

use crate::animation::SectionMotion;
use crate::theme::ThemeContext;
use maud::{Markup, PreEscaped, html};

pub use page::{PageInput, render_page};

/// A numbered section of the paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionInfo {
    /// Element id and animation scope.
    pub id: &'static str,
    pub letter: char,
    pub topic: &'static str,
    pub page: u32,
    /// Channel name shown in the sidebar.
    pub channel: &'static str,
}

impl SectionInfo {
    /// "Section A • About • Page 2"
    pub fn label(&self) -> String {
        format!(
            "Section {} • {} • Page {}",
            self.letter, self.topic, self.page
        )
    }
}

pub static FRONT_PAGE: SectionInfo = SectionInfo {
    id: "home",
    letter: '1',
    topic: "Front Page",
    page: 1,
    channel: "FRONT PAGE",
};

/// Sections after the front page, in print order.
pub static SECTIONS: [SectionInfo; 7] = [
    SectionInfo {
        id: "about",
        letter: 'A',
        topic: "About",
        page: 2,
        channel: "PROFILE",
    },
    SectionInfo {
        id: "experience",
        letter: 'B',
        topic: "Experience",
        page: 3,
        channel: "CAREER DESK",
    },
    SectionInfo {
        id: "projects",
        letter: 'C',
        topic: "Projects",
        page: 4,
        channel: "INNOVATIONS",
    },
    SectionInfo {
        id: "skills",
        letter: 'D',
        topic: "Skills",
        page: 5,
        channel: "EXPERTISE",
    },
    SectionInfo {
        id: "education",
        letter: 'E',
        topic: "Education",
        page: 6,
        channel: "ACADEMICS",
    },
    SectionInfo {
        id: "resume",
        letter: 'F',
        topic: "Resume",
        page: 7,
        channel: "CREDENTIALS",
    },
    SectionInfo {
        id: "contact",
        letter: 'G',
        topic: "Contact",
        page: 8,
        channel: "CORRESPONDENCE",
    },
];

pub fn section_info(id: &str) -> Option<&'static SectionInfo> {
    SECTIONS.iter().find(|s| s.id == id)
}

/// Text that differs between light and dark mode. The page runtime swaps it
/// on toggle.
pub fn themed_text(theme: ThemeContext, light: &str, dark: &str) -> Markup {
    html! {
        span data-theme-light=(light) data-theme-dark=(dark) { (theme.pick(light, dark)) }
    }
}

/// Section masthead: the "Section X • Topic • Page N" line over a headline.
pub fn section_header(
    info: &SectionInfo,
    headline: &str,
    theme: ThemeContext,
    motion: &SectionMotion,
) -> Markup {
    let anim_id = format!("{}-masthead", info.id);
    html! {
        header.section-masthead data-anim-id=(anim_id) data-anim=[motion.node(&anim_id)] {
            p.section-label {
                (info.label())
                " • "
                (themed_text(theme, "Day Edition", "Night Edition"))
            }
            h2.section-title { (headline) }
            div.rule-double {}
        }
    }
}

/// Content paragraphs written in markdown.
pub fn story(paragraphs: &[String]) -> Markup {
    html! {
        @for paragraph in paragraphs {
            (PreEscaped(crate::content::markdown(paragraph)))
        }
    }
}
