//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Each entity (section,
//! splash stage, export page) leads with its positional index and title;
//! paths and details follow as indented context lines.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Sections
//! 001 Front Page → #home
//!     Headline: Local Software Engineer Revolutionizes Digital...
//! 002 About → #about
//!     Section A • About • Page 2
//!
//! Sources
//!     content.toml: embedded default
//!     config.toml: stock defaults
//! ```
//!
//! ## Build
//!
//! ```text
//! Front Page → index.html (84211 bytes)
//!     Theme: light
//!     Splash: 5 stages, page revealed at 4.70s
//! Motion
//!     about: 4 entrances, loops
//! Generated index.html, 0 assets
//! ```
//!
//! ## Export
//!
//! ```text
//! Capture 794 × 2000 px → 2 pages A4
//!     001 offset 0.0 mm
//!     002 offset 297.0 mm
//! Wrote dist/Resume.pdf (183211 bytes)
//!     SHA-256: 5e1c…
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::contact::{ContactForm, FormState, SubmitRefused};
use crate::content::Content;
use crate::export::{ExportError, ExportReport, Layout};
use crate::generate::BuildReport;
use crate::loading::SplashTimeline;
use crate::render::{FRONT_PAGE, SECTIONS};
use crate::theme::ThemeMode;
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending "..." if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn seconds(d: Duration) -> String {
    format!("{:.2}s", d.as_secs_f64())
}

fn plural(n: usize, one: &str, many: &str) -> String {
    format!("{} {}", n, if n == 1 { one } else { many })
}

// ============================================================================
// check
// ============================================================================

/// Section inventory and where content and config came from.
pub fn format_check_output(content: &Content, source_dir: &Path) -> Vec<String> {
    let mut lines = vec!["Sections".to_string()];
    lines.push(format!(
        "{} {} \u{2192} #{}",
        format_index(1),
        FRONT_PAGE.topic,
        FRONT_PAGE.id
    ));
    lines.push(format!(
        "{}Headline: {}",
        indent(1),
        truncate_desc(&content.hero.headline, 48)
    ));

    for (i, section) in SECTIONS.iter().enumerate() {
        lines.push(format!(
            "{} {} \u{2192} #{}",
            format_index(i + 2),
            section.topic,
            section.id
        ));
        lines.push(format!("{}{}", indent(1), section.label()));
        let detail = match section.id {
            "experience" => Some(plural(content.experience.jobs.len(), "position", "positions")),
            "projects" => Some(plural(content.projects.items.len(), "project", "projects")),
            "skills" => Some(format!(
                "{}, {}",
                plural(content.skills.categories.len(), "category", "categories"),
                plural(
                    content.skills.categories.iter().map(|c| c.skills.len()).sum(),
                    "skill",
                    "skills"
                )
            )),
            "education" => Some(plural(content.education.courses.len(), "course", "courses")),
            _ => None,
        };
        if let Some(detail) = detail {
            lines.push(format!("{}{}", indent(1), detail));
        }
    }

    lines.push(String::new());
    lines.push("Sources".to_string());
    let describe = |file: &str, fallback: &str| {
        if source_dir.join(file).exists() {
            format!("{}{}: {}", indent(1), file, source_dir.join(file).display())
        } else {
            format!("{}{}: {}", indent(1), file, fallback)
        }
    };
    lines.push(describe(crate::content::CONTENT_FILE, "embedded default"));
    lines.push(describe(crate::config::CONFIG_FILE, "stock defaults"));
    lines
}

pub fn print_check_output(content: &Content, source_dir: &Path) {
    for line in format_check_output(content, source_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// build
// ============================================================================

pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = vec![format!(
        "{} \u{2192} {} ({} bytes)",
        FRONT_PAGE.topic,
        report.index.display(),
        report.bytes
    )];
    lines.push(format!("{}Theme: {}", indent(1), report.theme.mode));
    match &report.splash {
        Some(timeline) => lines.push(format!(
            "{}Splash: {}, page revealed at {}",
            indent(1),
            plural(timeline.stage_starts.len(), "stage", "stages"),
            seconds(timeline.complete_at)
        )),
        None => lines.push(format!("{}Splash: off", indent(1))),
    }

    if report.motion.is_empty() {
        lines.push("Motion: off".to_string());
    } else {
        lines.push("Motion".to_string());
        for section in &report.motion {
            let loops = if section.loops { ", loops" } else { "" };
            lines.push(format!(
                "{}{}: {}{}",
                indent(1),
                section.id,
                plural(section.nodes, "entrance", "entrances"),
                loops
            ));
        }
    }

    lines.push(format!(
        "Generated {}, {}",
        crate::generate::INDEX_FILE,
        plural(report.assets_copied, "asset", "assets")
    ));
    lines
}

pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// theme
// ============================================================================

pub fn format_theme_output(mode: ThemeMode, stored_in: &Path) -> Vec<String> {
    vec![
        format!("Theme: {}", mode),
        format!("{}Stored in: {}", indent(1), stored_in.display()),
    ]
}

pub fn print_theme_output(mode: ThemeMode, stored_in: &Path) {
    for line in format_theme_output(mode, stored_in) {
        println!("{}", line);
    }
}

// ============================================================================
// splash
// ============================================================================

/// The splash as it will play: one line per stage, then the hand-over.
pub fn format_splash_output(timeline: &SplashTimeline, labels: &[String]) -> Vec<String> {
    let mut lines = vec![format!("Progress bar at {}", seconds(timeline.reveal_at))];
    for (i, start) in timeline.stage_starts.iter().enumerate() {
        let label = labels.get(i).map(String::as_str).unwrap_or("");
        lines.push(format!(
            "{} {} [{:>3.0}%] {}",
            format_index(i + 1),
            seconds(*start),
            timeline.progress_at_stage(i),
            label
        ));
    }
    lines.push(format!("Page revealed at {}", seconds(timeline.complete_at)));
    lines
}

pub fn print_splash_output(timeline: &SplashTimeline, labels: &[String]) {
    for line in format_splash_output(timeline, labels) {
        println!("{}", line);
    }
}

// ============================================================================
// contact
// ============================================================================

pub fn format_contact_output(form: &ContactForm) -> Vec<String> {
    match form.state() {
        FormState::Succeeded => vec!["Message dispatched".to_string()],
        FormState::Failed(errors) => {
            let mut lines = Vec::new();
            if let Some(banner) = form.banner() {
                lines.push(banner.to_string());
            }
            for field in crate::contact::Field::ALL {
                for message in form.inline_errors(field) {
                    lines.push(format!("{}{}", indent(1), message));
                }
            }
            for error in errors.iter().filter(|e| e.target().is_none()) {
                lines.push(format!("{}{}", indent(1), error.message));
            }
            lines
        }
        FormState::Idle | FormState::Submitting => vec![form.button_label().to_string()],
    }
}

pub fn format_contact_refused(refused: &SubmitRefused) -> Vec<String> {
    match refused {
        SubmitRefused::MissingFields(fields) => {
            let mut lines = vec!["Not sent: required fields are empty".to_string()];
            for field in fields {
                lines.push(format!("{}{}", indent(1), field.label()));
            }
            lines
        }
        other => vec![format!("Not sent: {}", other)],
    }
}

pub fn print_contact_output(form: &ContactForm) {
    for line in format_contact_output(form) {
        println!("{}", line);
    }
}

pub fn print_contact_refused(refused: &SubmitRefused) {
    for line in format_contact_refused(refused) {
        println!("{}", line);
    }
}

// ============================================================================
// export-resume
// ============================================================================

/// Page placement of an export. Offsets are how far down the image each page
/// starts.
pub fn format_layout(pixels: (u32, u32), layout: &Layout) -> Vec<String> {
    let mut lines = vec![format!(
        "Capture {} \u{00d7} {} px \u{2192} {} A4",
        pixels.0,
        pixels.1,
        plural(layout.page_count(), "page", "pages")
    )];
    for (i, offset) in layout.offsets_mm.iter().enumerate() {
        lines.push(format!(
            "{}{} offset {:.1} mm",
            indent(1),
            format_index(i + 1),
            offset.abs()
        ));
    }
    lines
}

pub fn format_export_output(report: &ExportReport) -> Vec<String> {
    let layout = crate::export::paginate(report.pixels, crate::export::PageSize::A4_PORTRAIT);
    let mut lines = format_layout(report.pixels, &layout);
    lines.push(format!(
        "Wrote {} ({} bytes)",
        report.path.display(),
        report.bytes
    ));
    lines.push(format!("{}SHA-256: {}", indent(1), report.sha256));
    lines
}

/// The user sees one generic notice; the cause goes on a detail line.
pub fn format_export_error(error: &ExportError) -> Vec<String> {
    vec![
        error.user_notice().to_string(),
        format!("{}{}", indent(1), error),
    ]
}

pub fn print_export_output(report: &ExportReport) {
    for line in format_export_output(report) {
        println!("{}", line);
    }
}

pub fn print_export_error(error: &ExportError) {
    for line in format_export_error(error) {
        eprintln!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::{Field, FieldError, FormFields, SubmitResponse};
    use crate::export::{CaptureError, PageSize, paginate};
    use crate::generate::SectionMotionSummary;
    use crate::loading::{GateTiming, plan_timeline};
    use crate::theme::ThemeContext;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn truncate_desc_long() {
        let text = "a".repeat(50);
        assert_eq!(truncate_desc(&text, 40), format!("{}...", "a".repeat(40)));
        assert_eq!(truncate_desc("short", 40), "short");
    }

    #[test]
    fn check_lists_every_section_and_sources() {
        let tmp = TempDir::new().unwrap();
        let content = Content::stock().unwrap();
        let lines = format_check_output(&content, tmp.path());

        assert_eq!(lines[0], "Sections");
        assert_eq!(lines[1], "001 Front Page \u{2192} #home");
        assert!(lines.contains(&"008 Contact \u{2192} #contact".to_string()));
        assert!(lines.contains(&"    Section D • Skills • Page 5".to_string()));
        assert!(lines.contains(&"    4 categories, 26 skills".to_string()));
        assert!(lines.contains(&"    content.toml: embedded default".to_string()));
        assert!(lines.contains(&"    config.toml: stock defaults".to_string()));
    }

    #[test]
    fn build_output_lists_motion_and_splash() {
        let report = BuildReport {
            index: PathBuf::from("dist/index.html"),
            bytes: 1234,
            theme: ThemeContext::default(),
            splash: Some(plan_timeline(5, GateTiming::default())),
            motion: vec![SectionMotionSummary {
                id: "about",
                nodes: 4,
                loops: true,
            }],
            assets_copied: 1,
        };
        let lines = format_build_output(&report);
        assert_eq!(lines[0], "Front Page \u{2192} dist/index.html (1234 bytes)");
        assert_eq!(lines[1], "    Theme: light");
        assert_eq!(lines[2], "    Splash: 5 stages, page revealed at 4.70s");
        assert_eq!(lines[4], "    about: 4 entrances, loops");
        assert_eq!(lines.last().unwrap(), "Generated index.html, 1 asset");
    }

    #[test]
    fn splash_output_shows_each_stage() {
        let timeline = plan_timeline(2, GateTiming::default());
        let labels = vec!["ONE".to_string(), "TWO".to_string()];
        let lines = format_splash_output(&timeline, &labels);
        assert_eq!(
            lines,
            vec![
                "Progress bar at 0.50s",
                "001 0.50s [ 50%] ONE",
                "002 1.30s [100%] TWO",
                "Page revealed at 2.30s",
            ]
        );
    }

    #[test]
    fn contact_output_for_field_errors() {
        let mut form = ContactForm::with_fields(FormFields {
            name: "Ada".into(),
            email: "ada".into(),
            subject: "Hi".into(),
            message: "x".into(),
        });
        form.begin_submit().unwrap();
        form.finish(Ok(SubmitResponse::Rejected(vec![
            FieldError::on(Field::Email, "should be an email"),
            FieldError::unmapped("Form is closed"),
        ])));
        let lines = format_contact_output(&form);
        assert_eq!(
            lines,
            vec![
                crate::contact::GENERIC_ERROR_BANNER,
                "    Email should be an email",
                "    Form is closed",
            ]
        );
    }

    #[test]
    fn contact_refusal_names_missing_fields() {
        let lines = format_contact_refused(&SubmitRefused::MissingFields(vec![
            Field::Subject,
            Field::Message,
        ]));
        assert_eq!(lines[1], "    Subject");
        assert_eq!(lines[2], "    Message");
    }

    #[test]
    fn layout_lines_show_page_offsets() {
        let layout = paginate((794, 2000), PageSize::A4_PORTRAIT);
        let lines = format_layout((794, 2000), &layout);
        assert_eq!(lines[0], "Capture 794 \u{00d7} 2000 px \u{2192} 2 pages A4");
        assert_eq!(lines[1], "    001 offset 0.0 mm");
        assert_eq!(lines[2], "    002 offset 297.0 mm");
    }

    #[test]
    fn export_error_leads_with_generic_notice() {
        let err = ExportError::Capture(CaptureError::ZeroSize);
        let lines = format_export_error(&err);
        assert_eq!(lines[0], crate::export::USER_NOTICE);
        assert!(lines[1].starts_with("    capture failed"));
    }
}
