//! Chrome DevTools Protocol adapter implementation

use crate::{ElementBox, Engine, EngineConfig, Error, Result, Viewport};
use headless_chrome::browser::tab::Tab;
use headless_chrome::protocol::cdp::Page;
use headless_chrome::types::Bounds;
use headless_chrome::{Browser, LaunchOptions};
use log::debug;
use serde::Deserialize;
use std::ffi::OsStr;
use std::sync::Arc;
use std::time::Duration;

// Screenshots are cropped in CSS pixels, so pin the device pixel ratio.
const LAUNCH_ARGS: &[&str] = &[
    "--force-device-scale-factor=1",
    "--hide-scrollbars",
    "--allow-file-access-from-files",
    "--disable-gpu",
];

const DOCUMENT_SIZE_SCRIPT: &str = r#"
(function() {
    const root = document.documentElement;
    const body = document.body;
    return JSON.stringify({
        width: Math.max(root.scrollWidth, body ? body.scrollWidth : 0),
        height: Math.max(root.scrollHeight, body ? body.scrollHeight : 0)
    });
})()
"#;

const ELEMENT_BOXES_TEMPLATE: &str = r#"
(function() {
    const nodes = Array.from(document.getElementsByTagName({{TAG}}));
    return JSON.stringify(nodes.map(function(e) {
        const r = e.getBoundingClientRect();
        return { x: r.left + window.scrollX, y: r.top + window.scrollY, width: r.width, height: r.height };
    }));
})()
"#;

#[derive(Debug, Deserialize)]
struct DocumentSize {
    width: f64,
    height: f64,
}

/// CDP-based engine implementation (uses the `headless_chrome` crate)
///
/// Launches a Chrome instance and drives a single tab. The browser process is
/// terminated when the engine is dropped.
pub struct CdpEngine {
    browser: Browser,
    tab: Arc<Tab>,
    config: EngineConfig,
}

impl CdpEngine {
    fn settle(&self) {
        if self.config.settle_ms > 0 {
            std::thread::sleep(Duration::from_millis(self.config.settle_ms));
        }
    }

    /// Evaluate `script` (which must return a JSON string) and decode it.
    fn evaluate_json<T: for<'de> Deserialize<'de>>(&self, script: &str) -> Result<T> {
        let eval = self
            .tab
            .evaluate(script, false)
            .map_err(|e| Error::CaptureError(format!("Evaluation failed: {}", e)))?;

        let value = eval
            .value
            .ok_or_else(|| Error::CaptureError("No value returned from evaluation".into()))?;
        let text = value
            .as_str()
            .ok_or_else(|| Error::CaptureError(format!("Expected a JSON string, got {}", value)))?;

        serde_json::from_str(text)
            .map_err(|e| Error::CaptureError(format!("Malformed evaluation result: {}", e)))
    }

    fn resize_window(&self, width: f64, height: f64) -> Result<()> {
        self.tab
            .set_bounds(Bounds::Normal {
                left: Some(0),
                top: Some(0),
                width: Some(width),
                height: Some(height),
            })
            .map_err(|e| Error::RenderError(format!("Failed to resize window: {}", e)))?;
        Ok(())
    }

    // Size the window to the document so one screenshot covers every element.
    // The window starts from the configured viewport each time, otherwise a
    // tall earlier page would inflate the scroll height of every later one.
    fn fit_window_to_document(&self) -> Result<()> {
        let viewport = self.config.viewport;
        self.resize_window(viewport.width as f64, viewport.height as f64)?;
        self.settle();

        let size: DocumentSize = self.evaluate_json(DOCUMENT_SIZE_SCRIPT)?;
        let (width, height) = fitted_size(&size, viewport);
        debug!("Resizing window to document size {}x{}", width, height);
        self.resize_window(width, height)
    }
}

/// Window size that shows the whole document, never smaller than `viewport`.
fn fitted_size(document: &DocumentSize, viewport: Viewport) -> (f64, f64) {
    (
        document.width.max(viewport.width as f64),
        document.height.max(viewport.height as f64),
    )
}

impl Engine for CdpEngine {
    fn new(config: EngineConfig) -> Result<Self>
    where
        Self: Sized,
    {
        let timeout = Duration::from_millis(config.timeout_ms);
        let launch_options = LaunchOptions::default_builder()
            .headless(config.headless)
            .path(config.browser_path.clone())
            .window_size(Some((config.viewport.width, config.viewport.height)))
            .idle_browser_timeout(timeout.max(Duration::from_secs(30)))
            .args(LAUNCH_ARGS.iter().map(OsStr::new).collect())
            .build()
            .map_err(|e| Error::InitializationError(format!("Failed to build launch options: {}", e)))?;

        let browser = Browser::new(launch_options)
            .map_err(|e| Error::InitializationError(format!("Failed to launch browser: {}", e)))?;

        let tab = browser
            .new_tab()
            .map_err(|e| Error::InitializationError(format!("Failed to create tab: {}", e)))?;
        tab.set_default_timeout(timeout);

        Ok(Self {
            browser,
            tab,
            config,
        })
    }

    fn load_url(&mut self, url: &str) -> Result<()> {
        debug!("Loading {}", url);
        self.tab
            .navigate_to(url)
            .map_err(|e| Error::LoadError(format!("Navigation failed: {}", e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| Error::LoadError(format!("Wait for navigation failed: {}", e)))?;

        self.settle();
        self.fit_window_to_document()?;
        self.settle();
        Ok(())
    }

    fn element_boxes(&self, tag_name: &str) -> Result<Vec<ElementBox>> {
        let tag = serde_json::to_string(tag_name)
            .map_err(|e| Error::CaptureError(format!("Invalid tag name: {}", e)))?;
        let script = ELEMENT_BOXES_TEMPLATE.replace("{{TAG}}", &tag);
        self.evaluate_json(&script)
    }

    fn render_png(&self) -> Result<Vec<u8>> {
        self.tab
            .capture_screenshot(Page::CaptureScreenshotFormatOption::Png, None, None, true)
            .map_err(|e| Error::RenderError(format!("Screenshot failed: {}", e)))
    }

    fn close(self) -> Result<()> {
        // Drop the tab before the browser so the child process exits promptly.
        drop(self.tab);
        drop(self.browser);
        Ok(())
    }
}
