//! Headless Chrome capture of the built page.
//!
//! The page is opened from disk at the résumé's layout width, the splash is
//! dismissed, and the capture waits for web fonts before clipping a
//! screenshot to the résumé element.

use super::surface::{CaptureError, CaptureRequest, CaptureSurface};
use headless_chrome::browser::tab::Tab;
use headless_chrome::protocol::cdp::Page;
use headless_chrome::{Browser, LaunchOptions};
use image::RgbaImage;
use log::debug;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

/// Height of the browser window. The screenshot is clipped to the element
/// and captured beyond the viewport, so this only affects layout of
/// viewport-relative units.
const WINDOW_HEIGHT: u32 = 1200;

const HIDE_EXCLUDED_JS: &str = r#"
(() => {
  const nodes = document.querySelectorAll('[data-export-exclude]');
  nodes.forEach(el => {
    el.dataset.exportDisplay = el.style.display;
    el.style.display = 'none';
  });
  return nodes.length;
})()
"#;

const RESTORE_EXCLUDED_JS: &str = r#"
(() => {
  document.querySelectorAll('[data-export-exclude]').forEach(el => {
    if ('exportDisplay' in el.dataset) {
      el.style.display = el.dataset.exportDisplay;
      delete el.dataset.exportDisplay;
    }
  });
  return true;
})()
"#;

const PREPARE_JS: &str = r#"
(async () => {
  if (window.broadsheet) window.broadsheet.skipSplash();
  await document.fonts.ready;
  return true;
})()
"#;

#[derive(Debug, Deserialize)]
struct Rect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

fn browser_err(e: impl std::fmt::Display) -> CaptureError {
    CaptureError::Browser(e.to_string())
}

pub struct ChromeSurface {
    _browser: Browser,
    tab: Arc<Tab>,
}

impl ChromeSurface {
    /// Launch Chrome and open `page` (an `index.html` on disk).
    pub fn open(page: &Path, width_px: u32) -> Result<Self, CaptureError> {
        if !page.is_file() {
            return Err(CaptureError::NotMounted(page.display().to_string()));
        }
        let page = page.canonicalize().map_err(browser_err)?;

        let launch_options = LaunchOptions::default_builder()
            .headless(true)
            .window_size(Some((width_px, WINDOW_HEIGHT)))
            .build()
            .map_err(browser_err)?;
        let browser = Browser::new(launch_options).map_err(browser_err)?;
        let tab = browser.new_tab().map_err(browser_err)?;

        let url = format!("file://{}", page.display());
        debug!("opening {url}");
        tab.navigate_to(&url)
            .map_err(browser_err)?
            .wait_until_navigated()
            .map_err(browser_err)?;
        tab.evaluate(PREPARE_JS, true).map_err(browser_err)?;

        Ok(Self {
            _browser: browser,
            tab,
        })
    }

    fn element_rect(&self, selector: &str) -> Result<Rect, CaptureError> {
        let selector_js = serde_json::to_string(selector).map_err(browser_err)?;
        let js = format!(
            r#"(() => {{
  const el = document.querySelector({selector_js});
  if (!el) return null;
  const r = el.getBoundingClientRect();
  return JSON.stringify({{ x: r.left + window.scrollX, y: r.top + window.scrollY, width: el.scrollWidth, height: el.scrollHeight }});
}})()"#
        );
        let result = self.tab.evaluate(&js, false).map_err(browser_err)?;
        let json = result
            .value
            .as_ref()
            .and_then(|v| v.as_str())
            .ok_or_else(|| CaptureError::NotMounted(selector.to_string()))?;
        serde_json::from_str(json).map_err(browser_err)
    }
}

impl CaptureSurface for ChromeSurface {
    fn hide_excluded(&mut self) -> Result<usize, CaptureError> {
        let result = self
            .tab
            .evaluate(HIDE_EXCLUDED_JS, false)
            .map_err(browser_err)?;
        Ok(result.value.and_then(|v| v.as_u64()).unwrap_or(0) as usize)
    }

    fn restore_excluded(&mut self) {
        if let Err(e) = self.tab.evaluate(RESTORE_EXCLUDED_JS, false) {
            log::warn!("failed to restore excluded elements: {e}");
        }
    }

    fn capture(&mut self, request: &CaptureRequest) -> Result<RgbaImage, CaptureError> {
        let rect = self.element_rect(&request.selector)?;
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return Err(CaptureError::ZeroSize);
        }
        debug!(
            "capturing {} at {}x{} css px, scale {}",
            request.selector, rect.width, rect.height, request.scale
        );

        let png = self
            .tab
            .capture_screenshot(
                Page::CaptureScreenshotFormatOption::Png,
                None,
                Some(Page::Viewport {
                    x: rect.x,
                    y: rect.y,
                    width: rect.width,
                    height: rect.height,
                    scale: request.scale,
                }),
                true,
            )
            .map_err(browser_err)?;

        let bitmap = image::load_from_memory(&png)?.to_rgba8();
        super::surface::fit_width(bitmap, request.bitmap_width())
    }
}
