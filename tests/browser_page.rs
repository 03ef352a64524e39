//! Browser tests of the built page: splash hand-over, theme toggle, résumé
//! layout and the Chrome-backed résumé export.
//!
//! Run with: `cargo test --test browser_page -- --ignored`

use headless_chrome::{Browser, LaunchOptions, Tab};
use std::path::PathBuf;
use std::process::Command;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

// ===========================================================================
// Setup helpers
// ===========================================================================

fn generated_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/browser/generated")
}

fn state_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(".broadsheet-browser-state")
}

fn run_broadsheet(args: &[&str]) -> std::process::Output {
    // No content.toml here: the stock paper is built.
    let source = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/browser/content");
    Command::new(env!("CARGO_BIN_EXE_broadsheet"))
        .args(args)
        .arg("--source")
        .arg(source)
        .arg("--output")
        .arg(generated_dir())
        .arg("--state-dir")
        .arg(state_dir())
        .output()
        .expect("failed to run broadsheet")
}

fn ensure_page_built() {
    static BUILT: OnceLock<()> = OnceLock::new();
    BUILT.get_or_init(|| {
        let out = run_broadsheet(&["build"]);
        assert!(out.status.success(), "page generation failed");
    });
}

fn browser() -> &'static Browser {
    static B: OnceLock<Browser> = OnceLock::new();
    B.get_or_init(|| {
        Browser::new(LaunchOptions {
            window_size: Some((1280, 800)),
            ..Default::default()
        })
        .expect("failed to launch Chrome")
    })
}

fn open_page() -> Arc<Tab> {
    ensure_page_built();
    let url = format!("file://{}", generated_dir().join("index.html").display());
    let tab = browser().new_tab().unwrap();
    tab.navigate_to(&url).unwrap().wait_until_navigated().unwrap();
    tab
}

fn eval_bool(tab: &Tab, js: &str) -> bool {
    tab.evaluate(js, false)
        .unwrap()
        .value
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

fn eval_f64(tab: &Tab, js: &str) -> f64 {
    tab.evaluate(js, false)
        .unwrap()
        .value
        .and_then(|v| v.as_f64())
        .unwrap()
}

// ===========================================================================
// Splash
// ===========================================================================

#[test]
#[ignore]
fn splash_hands_over_after_timeline() {
    let tab = open_page();
    assert!(eval_bool(&tab, "document.getElementById('splash') !== null"));
    std::thread::sleep(Duration::from_millis(5200));
    assert!(eval_bool(&tab, "document.getElementById('splash') === null"));
    assert!(eval_bool(&tab, "document.body.classList.contains('ready')"));
}

#[test]
#[ignore]
fn skip_splash_is_idempotent() {
    let tab = open_page();
    assert!(eval_bool(
        &tab,
        r#"(() => {
            let fired = 0;
            document.addEventListener('broadsheet:ready', () => fired++);
            window.broadsheet.skipSplash();
            window.broadsheet.skipSplash();
            return fired === 1 && document.getElementById('splash') === null;
        })()"#
    ));
}

// ===========================================================================
// Theme
// ===========================================================================

#[test]
#[ignore]
fn theme_toggle_flips_root_class_and_labels() {
    let tab = open_page();
    tab.evaluate("window.broadsheet.skipSplash()", false).unwrap();
    let was_dark = eval_bool(&tab, "document.documentElement.classList.contains('dark')");

    tab.wait_for_element("#theme-toggle").unwrap().click().unwrap();

    assert_eq!(
        eval_bool(&tab, "document.documentElement.classList.contains('dark')"),
        !was_dark
    );
    let expected = if was_dark { "light" } else { "dark" };
    assert!(eval_bool(
        &tab,
        &format!("localStorage.getItem('theme') === '{expected}'")
    ));
    assert!(eval_bool(
        &tab,
        &format!(
            "document.getElementById('theme-toggle').getAttribute('aria-pressed') === '{}'",
            !was_dark
        )
    ));
}

// ===========================================================================
// Résumé
// ===========================================================================

#[test]
#[ignore]
fn resume_document_has_fixed_print_width() {
    let tab = open_page();
    let width = eval_f64(
        &tab,
        "document.getElementById('resume-document').getBoundingClientRect().width",
    );
    assert_eq!(width, 794.0);
}

#[test]
#[ignore]
fn export_resume_captures_built_page() {
    ensure_page_built();
    let out = run_broadsheet(&["export-resume"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let pdf = generated_dir().join("Resume.pdf");
    let doc = lopdf::Document::load(&pdf).unwrap();
    assert!(!doc.get_pages().is_empty());
}
