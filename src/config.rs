//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by the user's `config.toml` in the source directory.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! lang = "en"
//! description = ""
//!
//! [colors.light]
//! background = "#ffffff"
//! paper = "#f9fafb"         # Cards, sidebars, boxed stories
//! text = "#111111"
//! text_muted = "#4b5563"    # Bylines, datelines, captions
//! border = "#000000"
//! accent = "#b91c1c"        # Breaking-news banners
//!
//! [colors.dark]
//! background = "#111827"
//! paper = "#1f2937"
//! text = "#f3f4f6"
//! text_muted = "#9ca3af"
//! border = "#4b5563"
//! accent = "#dc2626"
//!
//! [splash]
//! enabled = true
//! initial_delay_ms = 500
//! tick_interval_ms = 800
//! finish_delay_ms = 1000
//! type_interval_ms = 50
//!
//! [motion]
//! enabled = true
//! min_viewport_px = 768
//!
//! [contact]
//! form_id = "mrblelvy"
//! endpoint = "https://formspree.io/f"
//! timeout_secs = 15
//!
//! [export]
//! filename = "Resume.pdf"
//! selector = "#resume-document"
//! width_px = 794
//! scale = 2.0
//! timeout_secs = 60
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [export]
//! filename = "Ada_Lovelace_Resume.pdf"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::animation::MotionPolicy;
use crate::export::{ExportSettings, PageSize};
use crate::loading::GateTiming;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Document-level settings.
    pub site: SiteSettings,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Loading splash timing.
    pub splash: SplashConfig,
    /// Scroll animation policy.
    pub motion: MotionConfig,
    /// Contact form endpoint.
    pub contact: ContactConfig,
    /// Résumé PDF export.
    pub export: ExportConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.splash.tick_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "splash.tick_interval_ms must be non-zero".into(),
            ));
        }
        if self.export.width_px == 0 {
            return Err(ConfigError::Validation(
                "export.width_px must be non-zero".into(),
            ));
        }
        if !(self.export.scale > 0.0 && self.export.scale <= 4.0) {
            return Err(ConfigError::Validation(
                "export.scale must be in (0, 4]".into(),
            ));
        }
        let filename = self.export.filename.trim();
        if filename.is_empty() || filename.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "export.filename must be a plain file name".into(),
            ));
        }
        if self.export.timeout_secs == 0 || self.contact.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "timeouts must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// Document-level settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSettings {
    /// `lang` attribute of the document.
    pub lang: String,
    /// `<meta name="description">`; omitted when empty.
    pub description: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            description: String::new(),
        }
    }
}

/// Loading splash timing, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SplashConfig {
    /// Show the splash at all.
    pub enabled: bool,
    /// Delay before the progress bar appears.
    pub initial_delay_ms: u64,
    /// Time each stage stays current.
    pub tick_interval_ms: u64,
    /// Delay between the last stage and the page.
    pub finish_delay_ms: u64,
    /// Typewriter speed, per character.
    pub type_interval_ms: u64,
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            initial_delay_ms: 500,
            tick_interval_ms: 800,
            finish_delay_ms: 1000,
            type_interval_ms: 50,
        }
    }
}

impl SplashConfig {
    pub fn timing(&self) -> GateTiming {
        GateTiming {
            initial_delay: Duration::from_millis(self.initial_delay_ms),
            tick_interval: Duration::from_millis(self.tick_interval_ms),
            finish_delay: Duration::from_millis(self.finish_delay_ms),
            type_interval: Duration::from_millis(self.type_interval_ms),
        }
    }
}

/// Scroll animation policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotionConfig {
    /// Register animations at all. `false` behaves like reduced motion.
    pub enabled: bool,
    /// Viewports this narrow or narrower get no motion.
    pub min_viewport_px: u32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_viewport_px: MotionPolicy::default().min_viewport_px,
        }
    }
}

impl MotionConfig {
    pub fn policy(&self) -> MotionPolicy {
        MotionPolicy {
            reduced_motion: !self.enabled,
            min_viewport_px: self.min_viewport_px,
        }
    }
}

/// Hosted form endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    /// Form id on the hosted endpoint.
    pub form_id: String,
    /// Base URL; the form id is appended.
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            form_id: "mrblelvy".to_string(),
            endpoint: crate::contact::formspree::DEFAULT_BASE_URL.to_string(),
            timeout_secs: 15,
        }
    }
}

impl ContactConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Full URL the form posts to.
    pub fn action_url(&self) -> String {
        crate::contact::formspree::form_url(&self.endpoint, &self.form_id)
    }
}

/// Résumé PDF export.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Name of the emitted document.
    pub filename: String,
    /// CSS selector of the element to capture.
    pub selector: String,
    /// Layout width of the capture, in CSS pixels (A4 at 96 DPI = 794).
    pub width_px: u32,
    /// Device pixel ratio of the capture.
    pub scale: f64,
    /// Abort the export after this long.
    pub timeout_secs: u64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        let settings = ExportSettings::default();
        Self {
            filename: settings.filename,
            selector: settings.selector,
            width_px: settings.width_px,
            scale: settings.scale,
            timeout_secs: settings.timeout.as_secs(),
        }
    }
}

impl ExportConfig {
    pub fn settings(&self) -> ExportSettings {
        ExportSettings {
            selector: self.selector.clone(),
            width_px: self.width_px,
            scale: self.scale,
            page: PageSize::A4_PORTRAIT,
            filename: self.filename.trim().to_string(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    pub light: ColorScheme,
    /// Dark mode color scheme.
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Page background.
    pub background: String,
    /// Background of cards, sidebars and boxed stories.
    pub paper: String,
    /// Primary text color.
    pub text: String,
    /// Muted text (bylines, datelines, captions).
    pub text_muted: String,
    /// Rules and borders.
    pub border: String,
    /// Breaking-news banners and alerts.
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            paper: "#f9fafb".to_string(),
            text: "#111111".to_string(),
            text_muted: "#4b5563".to_string(),
            border: "#000000".to_string(),
            accent: "#b91c1c".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#111827".to_string(),
            paper: "#1f2937".to_string(),
            text: "#f3f4f6".to_string(),
            text_muted: "#9ca3af".to_string(),
            border: "#4b5563".to_string(),
            accent: "#dc2626".to_string(),
        }
    }

    fn css_variables(&self) -> String {
        format!(
            "    --color-bg: {};\n    --color-paper: {};\n    --color-text: {};\n    --color-text-muted: {};\n    --color-border: {};\n    --color-accent: {};",
            self.background, self.paper, self.text, self.text_muted, self.border, self.accent
        )
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Broadsheet Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file as config.toml in the source directory (next to
# content.toml). Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Document
# ---------------------------------------------------------------------------
[site]
# lang attribute of the <html> element.
lang = "en"

# <meta name="description">. Left out of the page when empty.
description = ""

# ---------------------------------------------------------------------------
# Colors - Light mode
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
paper = "#f9fafb"         # Cards, sidebars, boxed stories
text = "#111111"
text_muted = "#4b5563"    # Bylines, datelines, captions
border = "#000000"
accent = "#b91c1c"        # Breaking-news banners

# ---------------------------------------------------------------------------
# Colors - Dark mode (applied when the reader toggles the theme)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#111827"
paper = "#1f2937"
text = "#f3f4f6"
text_muted = "#9ca3af"
border = "#4b5563"
accent = "#dc2626"

# ---------------------------------------------------------------------------
# Loading splash
# ---------------------------------------------------------------------------
[splash]
# Show the staged loading splash before the page.
enabled = true

# Delay before the progress bar appears (ms).
initial_delay_ms = 500

# How long each stage stays on screen (ms).
tick_interval_ms = 800

# Pause after the last stage before the page is shown (ms).
finish_delay_ms = 1000

# Typewriter speed per character (ms).
type_interval_ms = 50

# ---------------------------------------------------------------------------
# Scroll animations
# ---------------------------------------------------------------------------
[motion]
# Set to false to ship a page without entrance animations.
enabled = true

# No animations on viewports this narrow or narrower (px).
min_viewport_px = 768

# ---------------------------------------------------------------------------
# Contact form
# ---------------------------------------------------------------------------
[contact]
# Formspree form id.
form_id = "mrblelvy"

# Endpoint base URL; the form id is appended.
endpoint = "https://formspree.io/f"

# Request timeout for `broadsheet contact` (seconds).
timeout_secs = 15

# ---------------------------------------------------------------------------
# Resume export
# ---------------------------------------------------------------------------
[export]
# File name of the generated PDF.
filename = "Resume.pdf"

# Element captured into the PDF.
selector = "#resume-document"

# Layout width of the capture in CSS pixels (A4 at 96 DPI).
width_px = 794

# Device pixel ratio of the capture. Higher is sharper and larger.
scale = 2.0

# Give up after this many seconds.
timeout_secs = 60
"##
}

/// Generate CSS custom properties from color config.
///
/// Light colors apply to `:root`; dark colors apply once the theme store puts
/// the `dark` class on the root element.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        ":root {{\n{}\n}}\n\n:root.dark {{\n{}\n}}",
        colors.light.css_variables(),
        colors.dark.css_variables(),
    )
}
