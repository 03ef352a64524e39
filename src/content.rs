//! Section content: the static table every renderer reads from.
//!
//! Content lives in `content.toml` in the source directory. Without one, the
//! embedded default (`static/portfolio.toml`) is used. The table is parsed
//! once, validated, and never mutated afterwards.
//!
//! Story paragraphs are markdown; see [`markdown`].

use pulldown_cmark::{Parser, html as md_html};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const CONTENT_FILE: &str = "content.toml";
const DEFAULT_CONTENT: &str = include_str!("../static/portfolio.toml");

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Content error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Content {
    pub person: Person,
    #[serde(default)]
    pub links: Vec<Link>,
    pub masthead: Masthead,
    pub splash: SplashContent,
    pub hero: Hero,
    pub about: About,
    pub experience: Experience,
    pub projects: Projects,
    pub skills: Skills,
    pub education: Education,
    pub resume: Resume,
    pub contact: ContactContent,
    pub footer: Footer,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Person {
    pub name: String,
    pub initials: String,
    pub title: String,
    /// One-line role summary shown under the name on the résumé.
    pub tagline: String,
    pub phone: String,
    pub email: String,
    pub location: String,
    #[serde(default)]
    pub address: Vec<String>,
    pub availability: String,
    pub availability_detail: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Link {
    pub label: String,
    /// Newspaper-style channel name ("CODE REPOSITORY").
    pub channel: String,
    pub blurb: String,
    pub url: String,
    /// URL as printed on the résumé.
    pub display: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Masthead {
    pub title: String,
    pub motto: String,
    pub edition: String,
    pub weather: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SplashContent {
    pub stages: Vec<String>,
    #[serde(default)]
    pub ticker: Vec<String>,
    #[serde(default)]
    pub status_line: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LabeledValue {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Hero {
    pub bulletin: String,
    pub bulletin_headline: String,
    pub bulletin_body: String,
    pub assignments: Vec<LabeledValue>,
    pub headline: String,
    pub story: Vec<String>,
    pub weather: Vec<String>,
    pub wisdom: Quote,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct About {
    pub headline: String,
    pub story: Vec<String>,
    pub drives: Vec<String>,
    pub interests: Vec<String>,
    pub numbers: Vec<LabeledValue>,
    pub philosophy: Quote,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Job {
    pub title: String,
    pub company: String,
    pub period: String,
    pub location: String,
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Seeking {
    pub headline: String,
    pub body: String,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Experience {
    pub jobs: Vec<Job>,
    pub seeking: Seeking,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub title: String,
    pub status: String,
    pub kind: String,
    pub description: String,
    pub features: Vec<String>,
    pub technologies: Vec<String>,
    pub impact: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl Project {
    pub fn in_development(&self) -> bool {
        self.status.eq_ignore_ascii_case("in development")
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Projects {
    pub items: Vec<Project>,
    pub future: String,
    pub archive_url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Skill {
    pub name: String,
    pub experience: String,
    /// Proficiency, 0–100.
    pub level: u8,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkillCategory {
    pub title: String,
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Skills {
    pub categories: Vec<SkillCategory>,
    #[serde(default)]
    pub design_tools: Vec<String>,
    #[serde(default)]
    pub soft_skills: Vec<String>,
    #[serde(default)]
    pub learning: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Course {
    pub name: String,
    pub credits: u8,
    pub grade: String,
}

impl Course {
    /// CSS class for the grade cell: A-grades, B-grades, everything else.
    pub fn grade_class(&self) -> &'static str {
        match self.grade.chars().next() {
            Some('A') => "grade-a",
            Some('B') => "grade-b",
            _ => "grade-other",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FinalProject {
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub short_institution: String,
    pub location: String,
    pub period: String,
    pub standing: String,
    pub cgpa: String,
    pub highlights: Vec<String>,
    pub extracurricular: Vec<String>,
    pub final_project: FinalProject,
    pub courses: Vec<Course>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResumeProject {
    pub title: String,
    pub kind: String,
    pub summary: String,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkillGroup {
    pub group: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Resume {
    pub summary: String,
    pub experience: Vec<String>,
    pub projects: Vec<ResumeProject>,
    pub education_note: String,
    pub skills: Vec<SkillGroup>,
    pub achievements: Vec<String>,
    pub availability_detail: String,
    pub colophon: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactContent {
    pub tagline: String,
    pub confirmation: String,
    pub follow_up: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Footer {
    pub blurb: String,
    pub technologies: Vec<String>,
    pub copyright: String,
    pub credit: String,
}

impl Content {
    /// The embedded default content.
    pub fn stock() -> Result<Self, ContentError> {
        parse(DEFAULT_CONTENT)
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        if self.person.name.trim().is_empty() {
            return Err(ContentError::Validation("person.name must not be empty".into()));
        }
        if self.splash.stages.is_empty() {
            return Err(ContentError::Validation(
                "splash.stages must have at least one stage".into(),
            ));
        }
        for category in &self.skills.categories {
            for skill in &category.skills {
                if skill.level > 100 {
                    return Err(ContentError::Validation(format!(
                        "skill '{}' has level {}; levels are 0-100",
                        skill.name, skill.level
                    )));
                }
            }
        }
        Ok(())
    }
}

pub fn parse(source: &str) -> Result<Content, ContentError> {
    let content: Content = toml::from_str(source)?;
    content.validate()?;
    Ok(content)
}

/// Load `content.toml` from `source_dir`, or the embedded default when the
/// file does not exist.
pub fn load_content(source_dir: &Path) -> Result<Content, ContentError> {
    let path = source_dir.join(CONTENT_FILE);
    if path.exists() {
        parse(&fs::read_to_string(&path)?)
    } else {
        Content::stock()
    }
}

/// Render a markdown paragraph to HTML.
pub fn markdown(source: &str) -> String {
    let mut out = String::new();
    md_html::push_html(&mut out, Parser::new(source));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn stock_content_is_valid() {
        let content = Content::stock().unwrap();
        assert_eq!(content.person.name, "Talha Rizwan");
        assert_eq!(content.splash.stages.len(), 5);
        assert_eq!(content.skills.categories.len(), 4);
        assert_eq!(content.education.courses.len(), 10);
    }

    #[test]
    fn missing_file_falls_back_to_stock() {
        let tmp = TempDir::new().unwrap();
        let content = load_content(tmp.path()).unwrap();
        assert_eq!(content.masthead.title, "THE PORTFOLIO TIMES");
    }

    #[test]
    fn source_file_overrides_stock() {
        let tmp = TempDir::new().unwrap();
        let custom = DEFAULT_CONTENT.replace("name = \"Talha Rizwan\"", "name = \"Ada Lovelace\"");
        fs::write(tmp.path().join(CONTENT_FILE), custom).unwrap();
        assert_eq!(load_content(tmp.path()).unwrap().person.name, "Ada Lovelace");
    }

    #[test]
    fn rejects_unknown_fields() {
        let broken = format!("{DEFAULT_CONTENT}\n[extra]\nkey = 1\n");
        assert!(matches!(parse(&broken), Err(ContentError::Toml(_))));
    }

    #[test]
    fn rejects_out_of_range_skill_level() {
        let broken = DEFAULT_CONTENT.replacen("level = 90", "level = 120", 1);
        assert!(matches!(parse(&broken), Err(ContentError::Validation(_))));
    }

    #[test]
    fn rejects_empty_stage_list() {
        let mut content = Content::stock().unwrap();
        content.splash.stages.clear();
        assert!(content.validate().is_err());
    }

    #[test]
    fn grade_classes() {
        let course = |grade: &str| Course {
            name: "x".into(),
            credits: 3,
            grade: grade.into(),
        };
        assert_eq!(course("A-").grade_class(), "grade-a");
        assert_eq!(course("B+").grade_class(), "grade-b");
        assert_eq!(course("C").grade_class(), "grade-other");
    }

    #[test]
    fn markdown_renders_emphasis() {
        assert_eq!(markdown("a *b*"), "<p>a <em>b</em></p>\n");
    }
}
