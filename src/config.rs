//! Run configuration, loaded once from a JSON file.

use crate::element::StyledElement;
use crate::style::PropertyDescriptor;
use crate::{EngineConfig, Error, Result, Viewport};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config.json";
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// How long a browser session lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    /// One browser for the whole run
    #[default]
    Run,
    /// A fresh browser for every batch
    Batch,
}

/// Everything a run needs: the base element, the style sweep and output paths.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub tag_name: String,
    #[serde(default)]
    pub attributes: String,
    #[serde(default)]
    pub content: String,
    pub styles: Vec<PropertyDescriptor>,

    /// Where the generated HTML is written (overwritten every batch)
    pub html_output: PathBuf,
    /// URL or file path the browser loads; defaults to `html_output`
    #[serde(default)]
    pub html_path: Option<String>,
    /// Chrome/Chromium binary; auto-detected when absent
    #[serde(default)]
    pub webdriver_path: Option<PathBuf>,

    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_screenshot_path")]
    pub screenshot_path: PathBuf,
    #[serde(default = "default_image_dir")]
    pub image_dir: PathBuf,
    #[serde(default)]
    pub session: SessionMode,

    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
    #[serde(default = "default_headless")]
    pub headless: bool,
}

/// Serde mirror of [`Viewport`]
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        let v = Viewport::default();
        Self {
            width: v.width,
            height: v.height,
        }
    }
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_screenshot_path() -> PathBuf {
    PathBuf::from("screenshot.png")
}

fn default_image_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_timeout_ms() -> u64 {
    EngineConfig::default().timeout_ms
}

fn default_settle_ms() -> u64 {
    EngineConfig::default().settle_ms
}

fn default_headless() -> bool {
    true
}

impl Config {
    /// Read and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&text)
    }

    /// Parse and validate a JSON config document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tag_name.trim().is_empty() {
            return Err(Error::ConfigError("tag_name must not be empty".into()));
        }
        if self.batch_size == 0 {
            return Err(Error::ConfigError("batch_size must be greater than zero".into()));
        }
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(Error::ConfigError("viewport dimensions must be non-zero".into()));
        }
        if let Some(d) = self.styles.iter().find(|d| d.name.trim().is_empty()) {
            return Err(Error::ConfigError(format!("style property with empty name: {:?}", d)));
        }
        Ok(())
    }

    /// The unstyled element every variant starts from
    pub fn base_element(&self) -> StyledElement {
        StyledElement::new(&self.tag_name, &self.attributes, &self.content)
    }

    /// The URL the browser should load for the generated HTML.
    ///
    /// `html_path` may be a URL or a filesystem path; paths, like the
    /// `html_output` fallback, become `file://` URLs.
    pub fn html_url(&self) -> Result<String> {
        match &self.html_path {
            Some(p) => match url::Url::parse(p) {
                Ok(u) => Ok(u.to_string()),
                Err(_) => file_url(Path::new(p)),
            },
            None => file_url(&self.html_output),
        }
    }

    /// Path of the cropped image for element `index` of batch `batch`
    pub fn image_path(&self, batch: usize, index: usize) -> PathBuf {
        self.image_dir.join(format!("image_{}_{}.png", batch, index))
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            viewport: Viewport {
                width: self.viewport.width,
                height: self.viewport.height,
            },
            timeout_ms: self.timeout_ms,
            settle_ms: self.settle_ms,
            browser_path: self.webdriver_path.clone(),
            headless: self.headless,
        }
    }
}

fn file_url(path: &Path) -> Result<String> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    url::Url::from_file_path(&absolute)
        .map(|u| u.to_string())
        .map_err(|_| {
            Error::ConfigError(format!(
                "Cannot build a file URL from {}",
                absolute.display()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "tag_name": "div",
        "attributes": "class=\"box\"",
        "content": "Hi",
        "styles": [
            {"name": "width", "type": "number", "min": 10, "max": 20, "increment": 5, "measure_unit": "px"}
        ],
        "html_output": "out.html",
        "html_path": "http://localhost:8000/out.html",
        "webdriver_path": "/usr/bin/chromium"
    }"#;

    #[test]
    fn parses_original_fields_and_fills_defaults() {
        let c = Config::from_json_str(MINIMAL).unwrap();
        assert_eq!(c.tag_name, "div");
        assert_eq!(c.styles.len(), 1);
        assert_eq!(c.html_output, PathBuf::from("out.html"));
        assert_eq!(c.webdriver_path, Some(PathBuf::from("/usr/bin/chromium")));
        assert_eq!(c.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(c.session, SessionMode::Run);
        assert_eq!(c.screenshot_path, PathBuf::from("screenshot.png"));
        assert_eq!(c.viewport.width, 1280);
        assert!(c.headless);
        assert_eq!(c.html_url().unwrap(), "http://localhost:8000/out.html");
    }

    #[test]
    fn missing_required_field_is_a_config_error() {
        let err = Config::from_json_str(r#"{"tag_name": "div", "html_output": "x.html"}"#)
            .unwrap_err();
        match err {
            Error::ConfigError(msg) => assert!(msg.contains("styles"), "{}", msg),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let text = MINIMAL.replacen("\"tag_name\"", "\"batch_size\": 0, \"tag_name\"", 1);
        assert!(matches!(Config::from_json_str(&text), Err(Error::ConfigError(_))));
    }

    #[test]
    #[cfg(unix)]
    fn html_url_defaults_to_file_url() {
        let text = r#"{"tag_name": "p", "styles": [], "html_output": "/tmp/sweep/out.html"}"#;
        let c = Config::from_json_str(text).unwrap();
        assert_eq!(c.html_url().unwrap(), "file:///tmp/sweep/out.html");
    }

    #[test]
    #[cfg(unix)]
    fn absolute_html_path_becomes_file_url() {
        let text = r#"{"tag_name": "p", "styles": [], "html_output": "o.html",
            "html_path": "/srv/sweep/page.html"}"#;
        let c = Config::from_json_str(text).unwrap();
        assert_eq!(c.html_url().unwrap(), "file:///srv/sweep/page.html");
    }

    #[test]
    fn relative_html_path_resolves_against_current_dir() {
        let text = r#"{"tag_name": "p", "styles": [], "html_output": "o.html",
            "html_path": "out/index.html"}"#;
        let c = Config::from_json_str(text).unwrap();
        let expected = url::Url::from_file_path(std::env::current_dir().unwrap().join("out/index.html"))
            .unwrap()
            .to_string();
        assert_eq!(c.html_url().unwrap(), expected);
        assert!(expected.starts_with("file://"));
    }

    #[test]
    fn image_path_names_batch_and_index() {
        let text = r#"{"tag_name": "p", "styles": [], "html_output": "o.html", "image_dir": "shots"}"#;
        let c = Config::from_json_str(text).unwrap();
        assert_eq!(c.image_path(2, 7), PathBuf::from("shots/image_2_7.png"));
    }

    #[test]
    fn engine_config_carries_browser_settings() {
        let text = r#"{"tag_name": "p", "styles": [], "html_output": "o.html",
            "viewport": {"width": 640, "height": 480}, "timeout_ms": 5000, "session": "batch"}"#;
        let c = Config::from_json_str(text).unwrap();
        assert_eq!(c.session, SessionMode::Batch);
        let e = c.engine_config();
        assert_eq!(e.viewport.width, 640);
        assert_eq!(e.viewport.height, 480);
        assert_eq!(e.timeout_ms, 5000);
        assert!(e.browser_path.is_none());
    }
}
