//! Stylesweep
//!
//! Renders every combination of a set of inline style values applied to one
//! HTML element and captures each rendered variant as its own cropped PNG.
//! Useful for building visual catalogs of a component across sizes, colours
//! and font settings.
//!
//! # Pipeline
//!
//! - [`style`]: each property descriptor enumerates its values
//! - [`element`]: the base element is expanded into the Cartesian product
//! - [`batch`]: the product is split into fixed-size batches
//! - [`html`]: each batch becomes one HTML document
//! - [`capture`]: a browser [`Engine`] loads it and each element is cropped out
//!   of the full-page screenshot
//!
//! # Example
//!
//! ```
//! use stylesweep::element::{expand, StyledElement};
//! use stylesweep::style::PropertyDescriptor;
//!
//! let base = StyledElement::new("button", "", "OK");
//! let variants = expand(
//!     &base,
//!     &[
//!         PropertyDescriptor::number("font-size", 10.0, 16.0, 2.0, "px"),
//!         PropertyDescriptor::strings("font-weight", ["normal", "bold"]),
//!     ],
//! );
//! assert_eq!(variants.len(), 6);
//! ```

use serde::Deserialize;
use std::path::PathBuf;

pub mod batch;
pub mod capture;
pub mod config;
pub mod element;
pub mod error;
pub mod html;
pub mod style;

pub use capture::{capture_all, write_html_only, CaptureReport};
pub use config::{Config, SessionMode};
pub use error::{Error, Result};

#[cfg(feature = "cdp")]
pub mod cdp;

/// Configuration for a browser engine
///
/// Defaults match a desktop viewport with a generous page-load timeout.
///
/// ```
/// let cfg = stylesweep::EngineConfig::default();
/// assert!(cfg.headless);
/// ```
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Initial viewport dimensions; the page may grow past them for capture
    pub viewport: Viewport,
    /// Timeout for browser operations in milliseconds
    pub timeout_ms: u64,
    /// Pause after navigation and resizing before measuring, in milliseconds
    pub settle_ms: u64,
    /// Browser executable; `None` lets the backend find one
    pub browser_path: Option<PathBuf>,
    /// Run without a visible window
    pub headless: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            timeout_ms: 30000,
            settle_ms: 250,
            browser_path: None,
            headless: true,
        }
    }
}

/// Viewport dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Position and size of a rendered element, in CSS pixels relative to the
/// top-left corner of the document.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ElementBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A browser backend able to load a page, locate elements and screenshot it.
pub trait Engine {
    /// Start a browser session
    fn new(config: EngineConfig) -> Result<Self>
    where
        Self: Sized;

    /// Load a URL and wait until it is ready to be captured
    fn load_url(&mut self, url: &str) -> Result<()>;

    /// Boxes of every element with `tag_name`, in document order
    fn element_boxes(&self, tag_name: &str) -> Result<Vec<ElementBox>>;

    /// Screenshot of the whole loaded page as PNG bytes
    fn render_png(&self) -> Result<Vec<u8>>;

    /// Close the session and release the browser
    fn close(self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.viewport.width, 1280);
        assert_eq!(config.viewport.height, 720);
        assert!(config.headless);
        assert!(config.browser_path.is_none());
    }

    #[test]
    fn element_box_deserializes_from_dom_rect() {
        let b: ElementBox =
            serde_json::from_str(r#"{"x": 8, "y": 8.5, "width": 100, "height": 20}"#).unwrap();
        assert_eq!(b, ElementBox { x: 8.0, y: 8.5, width: 100.0, height: 20.0 });
    }
}
