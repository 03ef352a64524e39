//! # Broadsheet
//!
//! A single-page portfolio laid out like a newspaper, with a printable
//! résumé exported to a multi-page A4 PDF.
//!
//! # Architecture: Decide at Build Time, Replay in the Browser
//!
//! Everything stateful about the page is modeled as a plain Rust state
//! machine and run at build time:
//!
//! ```text
//! theme      preferences.json → ThemeContext   → root class on <html>
//! loading    stage labels      → SplashTimeline → #splash[data-splash]
//! animation  section plans     → SectionMotion  → [data-anim], [data-anim-loops]
//! contact    ContactForm state → form markup    (every state renders server-side)
//! ```
//!
//! The page runtime (`static/site.js`) only replays these decisions: it
//! schedules the recorded splash timeline, plays the compiled entrances when
//! their trigger line is crossed, and mirrors the contact form's states.
//! The résumé export runs after the build against the rendered page.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`theme`] | Light/dark preference: persisted store, context snapshots, subscribers |
//! | [`loading`] | Splash gate: staged progress, typewriter labels, virtual scheduler |
//! | [`animation`] | Scoped scroll entrances and loops with guaranteed teardown |
//! | [`contact`] | Contact form state machine and the hosted endpoint client |
//! | [`export`] | Résumé capture, pagination and PDF assembly |
//! | [`content`] | `content.toml`: everything the paper says |
//! | [`config`] | `config.toml` loading, validation, merging and CSS generation |
//! | [`render`] | Maud renderers for every section |
//! | [`generate`] | Ties the above together into `index.html` |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Owner per Piece of State
//!
//! The theme mode lives in exactly one [`theme::ThemeStore`]; renderers
//! receive an immutable [`theme::ThemeContext`]. Animation registrations
//! live in an [`animation::AnimationContext`] that reverts them on drop, so
//! nothing outlives the section that created it.
//!
//! ## Injected Clocks and Surfaces
//!
//! The loading gate schedules through a [`loading::Scheduler`] and the
//! export captures through an [`export::CaptureSurface`]. Tests drive both
//! with in-memory implementations; the CLI uses a virtual clock and either
//! headless Chrome or a screenshot on disk.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): malformed markup
//! is a compile error and every interpolation is escaped.

pub mod animation;
pub mod config;
pub mod contact;
pub mod content;
pub mod export;
pub mod generate;
pub mod loading;
pub mod output;
pub mod render;
pub mod theme;
