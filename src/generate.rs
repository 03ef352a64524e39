//! HTML site generation.
//!
//! Runs the page's state machines at build time and writes the result:
//!
//! 1. Colors from `config.toml` become CSS custom properties for `:root` and
//!    `:root.dark`, prepended to `static/style.css`.
//! 2. The loading gate is run on a virtual clock; its timeline is written
//!    into the splash element.
//! 3. Every section's animation plan is mounted on a [`MarkupBackend`] and
//!    compiled into `data-anim` attributes.
//! 4. The renderers produce one `index.html` with CSS and the runtime
//!    (`static/site.js`) inlined.
//! 5. `assets/` from the source directory is copied next to it.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html          # The whole paper
//! ├── Resume.pdf          # After `broadsheet export-resume`
//! └── assets/             # Copied verbatim from the source directory
//! ```
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::animation::{AnimationContext, MarkupBackend, MotionPolicy, SectionMotion, plans};
use crate::config::{self, SiteConfig};
use crate::contact::ContactForm;
use crate::content::Content;
use crate::loading::{SplashTimeline, plan_timeline};
use crate::render::{self, FRONT_PAGE, PageInput, SECTIONS};
use crate::theme::ThemeContext;
use log::debug;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

pub const INDEX_FILE: &str = "index.html";
pub const ASSETS_DIR: &str = "assets";

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/site.js");

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to walk assets: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Motion compiled for one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionMotionSummary {
    pub id: &'static str,
    pub nodes: usize,
    pub loops: bool,
}

/// What a build wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    pub index: PathBuf,
    pub bytes: usize,
    pub theme: ThemeContext,
    pub splash: Option<SplashTimeline>,
    pub motion: Vec<SectionMotionSummary>,
    pub assets_copied: usize,
}

/// Full stylesheet: config colors followed by the static rules.
pub fn stylesheet(config: &SiteConfig) -> String {
    format!(
        "{}\n\n{}",
        config::generate_color_css(&config.colors),
        CSS_STATIC
    )
}

/// Mount every section's animation plan and snapshot the result.
///
/// Each section gets its own scope; the contexts revert when dropped, so the
/// backend holds nothing afterwards.
pub fn compile_motion(policy: &MotionPolicy) -> BTreeMap<String, SectionMotion> {
    let mut backend = MarkupBackend::new();
    let mut motion = BTreeMap::new();
    for id in std::iter::once(FRONT_PAGE.id).chain(SECTIONS.iter().map(|s| s.id)) {
        let mut ctx = AnimationContext::new(&mut backend, id, policy, None);
        plans::mount(&mut ctx);
        if !ctx.is_empty() {
            debug!("{id}: {} animation(s)", ctx.len());
            motion.insert(id.to_string(), ctx.motion());
        }
    }
    motion
}

/// Render `index.html` for `content` into `output_dir`.
pub fn generate(
    config: &SiteConfig,
    content: &Content,
    theme: ThemeContext,
    source_dir: &Path,
    output_dir: &Path,
) -> Result<BuildReport, GenerateError> {
    let css = stylesheet(config);
    let splash = config
        .splash
        .enabled
        .then(|| plan_timeline(content.splash.stages.len(), config.splash.timing()));
    let motion = compile_motion(&config.motion.policy());
    let form = ContactForm::new();

    let html = render::render_page(&PageInput {
        content,
        config,
        theme,
        splash: splash.as_ref(),
        motion: &motion,
        form: &form,
        css: &css,
        js: JS,
    })
    .into_string();

    fs::create_dir_all(output_dir)?;
    let index = output_dir.join(INDEX_FILE);
    fs::write(&index, &html)?;
    debug!("wrote {} ({} bytes)", index.display(), html.len());

    let assets = source_dir.join(ASSETS_DIR);
    let assets_copied = if assets.is_dir() {
        copy_dir_recursive(&assets, &output_dir.join(ASSETS_DIR))?
    } else {
        0
    };

    Ok(BuildReport {
        index,
        bytes: html.len(),
        theme,
        splash,
        motion: motion
            .iter()
            .filter_map(|(id, m)| {
                let info = std::iter::once(&FRONT_PAGE)
                    .chain(SECTIONS.iter())
                    .find(|s| s.id == id.as_str())?;
                Some(SectionMotionSummary {
                    id: info.id,
                    nodes: m.node_count(),
                    loops: m.loops().is_some(),
                })
            })
            .collect(),
        assets_copied,
    })
}

/// Copy a directory tree, returning the number of files copied.
fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}
