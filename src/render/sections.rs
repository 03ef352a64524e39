//! Front page and the content sections (About through Education).

use super::{FRONT_PAGE, section_header, section_info, story, themed_text};
use crate::animation::SectionMotion;
use crate::content::{
    About, Content, Education, Experience, Job, Project, Projects, SkillCategory, Skills,
};
use crate::theme::ThemeContext;
use maud::{Markup, html};

/// Wrap a section body in its `<section>` element with loop decorations.
fn section_shell(id: &str, motion: &SectionMotion, body: Markup) -> Markup {
    html! {
        section.paper-section id=(id) data-anim-loops=[motion.loops()] {
            (body)
        }
    }
}

fn badges(class: &str, items: &[String]) -> Markup {
    html! {
        ul.badges {
            @for item in items {
                li class=(class) { (item) }
            }
        }
    }
}

// ============================================================================
// Front page
// ============================================================================

pub fn hero(content: &Content, theme: ThemeContext, motion: &SectionMotion) -> Markup {
    let person = &content.person;
    let hero = &content.hero;
    let body = html! {
        header.masthead {
            p.edition { (content.masthead.edition) }
            h1.masthead-title { (content.masthead.title) }
            p.masthead-motto { "\"" (content.masthead.motto) "\"" }
            div.masthead-bar {
                span { (FRONT_PAGE.label()) }
                span { (themed_text(theme, "MORNING EDITION", "LATE NIGHT EDITION")) }
                span { "Weather: " (content.masthead.weather) }
            }
        }
        div.front-page {
            aside.front-column {
                div.bulletin {
                    p.bulletin-flag { (hero.bulletin) }
                    h3 { (hero.bulletin_headline) }
                    p { (hero.bulletin_body) }
                }
                div.boxed {
                    h4.box-title { "CONTACT BUREAU" }
                    dl.contact-bureau {
                        dt { "Telephone" } dd { a href={ "tel:" (person.phone) } { (person.phone) } }
                        dt { "Telegraph" } dd { a href={ "mailto:" (person.email) } { (person.email) } }
                        dt { "Address" }
                        dd {
                            @for line in &person.address { (line) br; }
                        }
                    }
                }
                div.boxed {
                    h4.box-title { "CURRENT ASSIGNMENTS" }
                    dl.assignments {
                        @for item in &hero.assignments {
                            dt { (item.label) }
                            dd { (item.value) }
                        }
                    }
                }
            }
            article.front-story {
                p.kicker { "EXCLUSIVE" }
                h2.headline { (hero.headline) }
                p.byline { "By Our Technology Correspondent • " (person.location) }
                div.columns { (story(&hero.story)) }
            }
            aside.front-column {
                div.boxed {
                    h4.box-title { "TELEGRAPH LINES" }
                    ul.telegraph {
                        @for link in &content.links {
                            li {
                                span.channel { (link.channel) }
                                a href=(link.url) target="_blank" rel="noopener" { (link.label) }
                                span.blurb { (link.blurb) }
                            }
                        }
                    }
                }
                div.boxed.weather {
                    h4.box-title { "WEATHER REPORT" }
                    @for line in &hero.weather { p { (line) } }
                }
                blockquote.wisdom {
                    h4.box-title { "DAILY WISDOM" }
                    p { "\"" (hero.wisdom.text) "\"" }
                    cite { "— " (hero.wisdom.author) }
                }
            }
        }
    };
    section_shell(FRONT_PAGE.id, motion, body)
}

// ============================================================================
// Section A: About
// ============================================================================

pub fn about(about: &About, theme: ThemeContext, motion: &SectionMotion) -> Markup {
    let Some(info) = section_info("about") else {
        return html! {};
    };
    let body = html! {
        (section_header(info, &about.headline, theme, motion))
        span.ornament aria-hidden="true" { "❦" }
        div.about-layout {
            article.about-article data-anim-id="about-article" data-anim=[motion.node("about-article")] {
                p.kicker { "PROFILE" }
                div.columns { (story(&about.story)) }
            }
            aside.about-sidebar data-anim-id="about-sidebar" data-anim=[motion.node("about-sidebar")] {
                div.boxed {
                    h4.box-title { "WHAT DRIVES HIM" }
                    ul { @for item in &about.drives { li { (item) } } }
                }
                div.boxed {
                    h4.box-title { "AREAS OF INTEREST" }
                    ul { @for item in &about.interests { li { (item) } } }
                }
                div.boxed {
                    h4.box-title { "BY THE NUMBERS" }
                    dl.numbers {
                        @for item in &about.numbers {
                            dt { (item.value) }
                            dd { (item.label) }
                        }
                    }
                }
            }
        }
        blockquote.philosophy data-anim-id="about-philosophy" data-anim=[motion.node("about-philosophy")] {
            p { "\"" (about.philosophy.text) "\"" }
            cite { "— " (about.philosophy.author) }
        }
    };
    section_shell(info.id, motion, body)
}

// ============================================================================
// Section B: Experience
// ============================================================================

fn job(job: &Job) -> Markup {
    html! {
        article.job {
            header {
                h3.job-title { (job.title) }
                p.job-meta {
                    span.vintage-badge { (job.company) }
                    " • " (job.period) " • " (job.location)
                }
            }
            h4 { "KEY RESPONSIBILITIES" }
            ul { @for item in &job.responsibilities { li { (item) } } }
            @if !job.achievements.is_empty() {
                h4 { "NOTABLE ACHIEVEMENTS" }
                ul.achievements { @for item in &job.achievements { li { (item) } } }
            }
            @if !job.technologies.is_empty() {
                (badges("tech-badge", &job.technologies))
            }
        }
    }
}

pub fn experience(experience: &Experience, theme: ThemeContext, motion: &SectionMotion) -> Markup {
    let Some(info) = section_info("experience") else {
        return html! {};
    };
    let body = html! {
        (section_header(info, "PROFESSIONAL EXPERIENCE", theme, motion))
        div.experience-current data-anim-id="experience-current" data-anim=[motion.node("experience-current")] {
            @for entry in &experience.jobs { (job(entry)) }
        }
        div.boxed.opportunities data-anim-id="experience-opportunities" data-anim=[motion.node("experience-opportunities")] {
            p.bulletin-flag { "CLASSIFIED" }
            h3 { (experience.seeking.headline) }
            p { (experience.seeking.body) }
            ul.badges {
                @for role in &experience.seeking.roles {
                    li.vintage-badge { (role) }
                }
            }
        }
    };
    section_shell(info.id, motion, body)
}

// ============================================================================
// Section C: Projects
// ============================================================================

fn project(project: &Project) -> Markup {
    html! {
        article.project-card {
            header {
                span.project-badge.in-development[project.in_development()] { (project.status) }
                p.project-kind { (project.kind) }
                h3 { (project.title) }
            }
            p { (project.description) }
            h4 { "FEATURES" }
            ul { @for feature in &project.features { li { (feature) } } }
            (badges("tech-badge", &project.technologies))
            p.impact { strong { "IMPACT: " } (project.impact) }
            @if let Some(url) = &project.url {
                a.read-more href=(url) target="_blank" rel="noopener" { "READ MORE →" }
            }
        }
    }
}

pub fn projects(projects: &Projects, theme: ThemeContext, motion: &SectionMotion) -> Markup {
    let Some(info) = section_info("projects") else {
        return html! {};
    };
    let body = html! {
        (section_header(info, "FEATURED PROJECTS", theme, motion))
        div.projects-grid data-anim-id="projects-grid" data-anim=[motion.node("projects-grid")] {
            @for item in &projects.items { (project(item)) }
        }
        div.boxed.projects-future data-anim-id="projects-future" data-anim=[motion.node("projects-future")] {
            h3 { "MORE PROJECTS COMING SOON" }
            p { (projects.future) }
            a href=(projects.archive_url) target="_blank" rel="noopener" { "VIEW THE FULL ARCHIVE →" }
        }
    };
    section_shell(info.id, motion, body)
}

// ============================================================================
// Section D: Skills
// ============================================================================

fn skill_category(category: &SkillCategory, motion: &SectionMotion) -> Markup {
    html! {
        div.skill-card {
            h3.box-title { (category.title) }
            ul.skill-levels data-anim-id="skills-levels" data-anim=[motion.node("skills-levels")] {
                @for skill in &category.skills {
                    li.skill {
                        div.skill-head {
                            span.skill-name { (skill.name) }
                            span.skill-badge { (skill.experience) }
                        }
                        div.skill-bar
                            role="progressbar"
                            aria-valuemin="0"
                            aria-valuemax="100"
                            aria-valuenow=(skill.level) {
                            div.skill-fill style={ "width: " (skill.level) "%" } {}
                        }
                    }
                }
            }
        }
    }
}

pub fn skills(skills: &Skills, theme: ThemeContext, motion: &SectionMotion) -> Markup {
    let Some(info) = section_info("skills") else {
        return html! {};
    };
    let body = html! {
        (section_header(info, "TECHNICAL EXPERTISE", theme, motion))
        div.skills-grid data-anim-id="skills-grid" data-anim=[motion.node("skills-grid")] {
            @for category in &skills.categories { (skill_category(category, motion)) }
        }
        div.skills-additional data-anim-id="skills-additional" data-anim=[motion.node("skills-additional")] {
            @if !skills.design_tools.is_empty() {
                div.boxed {
                    h4.box-title { "DESIGN TOOLS" }
                    (badges("skill-badge", &skills.design_tools))
                }
            }
            @if !skills.soft_skills.is_empty() {
                div.boxed {
                    h4.box-title { "SOFT SKILLS" }
                    (badges("skill-badge", &skills.soft_skills))
                }
            }
            @if !skills.learning.is_empty() {
                div.boxed {
                    h4.box-title { "CURRENTLY LEARNING" }
                    (badges("skill-badge", &skills.learning))
                }
            }
        }
    };
    section_shell(info.id, motion, body)
}

// ============================================================================
// Section E: Education
// ============================================================================

pub fn education(education: &Education, theme: ThemeContext, motion: &SectionMotion) -> Markup {
    let Some(info) = section_info("education") else {
        return html! {};
    };
    let body = html! {
        (section_header(info, "ACADEMIC RECORD", theme, motion))
        article.boxed.education-card data-anim-id="education-card" data-anim=[motion.node("education-card")] {
            h3 { (education.degree) }
            p.institution { (education.institution) " (" (education.short_institution) ")" }
            p.job-meta { (education.period) " • " (education.location) " • " (education.standing) }
            p.cgpa { "CGPA: " strong { (education.cgpa) } }
            div.education-columns {
                div {
                    h4 { "ACADEMIC HIGHLIGHTS" }
                    ul { @for item in &education.highlights { li { (item) } } }
                }
                div {
                    h4 { "EXTRACURRICULAR" }
                    ul { @for item in &education.extracurricular { li { (item) } } }
                }
            }
            div.final-project {
                h4 { "FINAL YEAR PROJECT" }
                p.project-title { (education.final_project.title) }
                p { (education.final_project.description) }
                (badges("tech-badge", &education.final_project.technologies))
            }
        }
        div.coursework data-anim-id="education-coursework" data-anim=[motion.node("education-coursework")] {
            h3.box-title { "RELEVANT COURSEWORK" }
            table.course-table {
                thead {
                    tr { th { "Course" } th { "Credits" } th { "Grade" } }
                }
                tbody data-anim-id="education-courses" data-anim=[motion.node("education-courses")] {
                    @for course in &education.courses {
                        tr {
                            td { (course.name) }
                            td { (course.credits) }
                            td class=(course.grade_class()) { (course.grade) }
                        }
                    }
                }
            }
        }
    };
    section_shell(info.id, motion, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{AnimationContext, MarkupBackend, MotionPolicy, plans};
    use crate::theme::ThemeMode;

    fn stock() -> Content {
        Content::stock().unwrap()
    }

    fn motion_for(scope: &str) -> SectionMotion {
        let mut backend = MarkupBackend::new();
        let mut ctx = AnimationContext::new(&mut backend, scope, &MotionPolicy::default(), None);
        plans::mount(&mut ctx);
        ctx.motion()
    }

    #[test]
    fn hero_renders_masthead_and_links() {
        let content = stock();
        let html = hero(&content, ThemeContext::default(), &SectionMotion::none()).into_string();
        assert!(html.contains(r#"id="home""#));
        assert!(html.contains("THE PORTFOLIO TIMES"));
        assert!(html.contains("CODE REPOSITORY"));
        assert!(html.contains("mailto:work.talharizwan@gmail.com"));
        assert!(html.contains("MORNING EDITION"));
    }

    #[test]
    fn hero_edition_follows_theme() {
        let content = stock();
        let html =
            hero(&content, ThemeContext::new(ThemeMode::Dark), &SectionMotion::none()).into_string();
        assert!(html.contains(">LATE NIGHT EDITION</span>"));
    }

    #[test]
    fn about_carries_motion_attributes() {
        let content = stock();
        let motion = motion_for("about");
        let html = about(&content.about, ThemeContext::default(), &motion).into_string();
        assert_eq!(html.matches("data-anim=").count(), motion.node_count());
        assert!(html.contains("data-anim-loops="));
        assert!(html.contains("Section A • About • Page 2"));
    }

    #[test]
    fn sections_render_without_motion() {
        let content = stock();
        let theme = ThemeContext::default();
        let none = SectionMotion::none();
        for html in [
            about(&content.about, theme, &none),
            experience(&content.experience, theme, &none),
            projects(&content.projects, theme, &none),
            skills(&content.skills, theme, &none),
            education(&content.education, theme, &none),
        ] {
            let html = html.into_string();
            assert!(!html.contains("data-anim="));
            assert!(!html.contains("data-anim-loops"));
        }
    }

    #[test]
    fn skill_levels_become_bar_widths() {
        let content = stock();
        let html = skills(&content.skills, ThemeContext::default(), &SectionMotion::none())
            .into_string();
        assert!(html.contains(r#"style="width: 95%""#));
        assert!(html.contains(r#"aria-valuenow="95""#));
        assert!(html.contains("CURRENTLY LEARNING"));
    }

    #[test]
    fn projects_flag_work_in_progress() {
        let content = stock();
        let html = projects(&content.projects, ThemeContext::default(), &SectionMotion::none())
            .into_string();
        assert_eq!(html.matches("in-development").count(), 1);
    }

    #[test]
    fn coursework_grades_are_classed() {
        let content = stock();
        let html = education(&content.education, ThemeContext::default(), &SectionMotion::none())
            .into_string();
        assert!(html.contains(r#"<td class="grade-a">A</td>"#));
        assert!(html.contains(r#"<td class="grade-b">B+</td>"#));
        assert_eq!(html.matches("<tr>").count(), content.education.courses.len() + 1);
    }
}
