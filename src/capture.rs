//! The capture driver: render each batch, load it in a browser, and crop every
//! element out of the page screenshot into its own PNG.

use crate::batch::batches;
use crate::config::{Config, SessionMode};
use crate::element::{expand, StyledElement};
use crate::html::render_document;
use crate::{ElementBox, Engine, Result};
use image::DynamicImage;
use log::{debug, info, warn};
use std::fs;
use std::path::PathBuf;

/// Summary of a completed run
#[derive(Debug, Clone, Default)]
pub struct CaptureReport {
    /// Number of batches rendered
    pub batches: usize,
    /// Number of styled elements generated
    pub elements: usize,
    /// Every image written, in batch then DOM order
    pub images: Vec<PathBuf>,
}

/// Expand the configured element and capture every variant with engine `E`.
///
/// Any browser or filesystem failure aborts the run; images already written
/// are left on disk.
pub fn capture_all<E: Engine>(config: &Config) -> Result<CaptureReport> {
    let elements = expand(&config.base_element(), &config.styles);
    let url = config.html_url()?;
    let batch_iter = batches(&elements, config.batch_size)?;

    info!(
        "Generated {} <{}> variants from {} style properties; {} batch(es) of up to {}",
        elements.len(),
        config.tag_name,
        config.styles.len(),
        batch_iter.len(),
        config.batch_size
    );

    if let Some(parent) = non_empty_parent(&config.html_output) {
        fs::create_dir_all(parent)?;
    }
    fs::create_dir_all(&config.image_dir)?;

    let mut report = CaptureReport {
        elements: elements.len(),
        ..Default::default()
    };
    if elements.is_empty() {
        warn!("No variants to capture; every style property must yield at least one value");
        return Ok(report);
    }

    match config.session {
        SessionMode::Run => {
            let mut engine = E::new(config.engine_config())?;
            for (index, batch) in batch_iter.enumerate() {
                let images = capture_batch(&mut engine, config, &url, index, batch)?;
                report.images.extend(images);
                report.batches += 1;
            }
            engine.close()?;
        }
        SessionMode::Batch => {
            for (index, batch) in batch_iter.enumerate() {
                let mut engine = E::new(config.engine_config())?;
                let images = capture_batch(&mut engine, config, &url, index, batch)?;
                engine.close()?;
                report.images.extend(images);
                report.batches += 1;
            }
        }
    }

    info!(
        "Wrote {} image(s) across {} batch(es) to {}",
        report.images.len(),
        report.batches,
        config.image_dir.display()
    );
    Ok(report)
}

/// Render and capture a single batch, returning the image paths written.
pub fn capture_batch<E: Engine>(
    engine: &mut E,
    config: &Config,
    url: &str,
    batch_index: usize,
    batch: &[StyledElement],
) -> Result<Vec<PathBuf>> {
    debug!("Batch {}: rendering {} element(s)", batch_index, batch.len());
    fs::write(&config.html_output, render_document(batch))?;

    engine.load_url(url)?;
    let boxes = engine.element_boxes(&config.tag_name)?;
    if boxes.len() != batch.len() {
        warn!(
            "Batch {}: expected {} <{}> element(s) in the page, found {}",
            batch_index,
            batch.len(),
            config.tag_name,
            boxes.len()
        );
    }

    let png = engine.render_png()?;
    if let Some(parent) = non_empty_parent(&config.screenshot_path) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&config.screenshot_path, &png)?;
    let screenshot = image::load_from_memory(&png)?;

    let mut written = Vec::with_capacity(boxes.len());
    for (index, b) in boxes.iter().enumerate() {
        match crop_element(&screenshot, b) {
            Some(img) => {
                let path = config.image_path(batch_index, index);
                img.save(&path)?;
                written.push(path);
            }
            None => warn!(
                "Batch {}: element {} at {:?} lies outside the {}x{} screenshot; skipped",
                batch_index,
                index,
                b,
                screenshot.width(),
                screenshot.height()
            ),
        }
    }

    debug!("Batch {}: wrote {} image(s)", batch_index, written.len());
    Ok(written)
}

/// Cut `b` out of `screenshot`, clamped to its bounds.
///
/// Returns `None` when nothing of the box remains after clamping.
pub fn crop_element(screenshot: &DynamicImage, b: &ElementBox) -> Option<DynamicImage> {
    let (w, h) = (screenshot.width() as f64, screenshot.height() as f64);
    let left = b.x.round().clamp(0.0, w);
    let top = b.y.round().clamp(0.0, h);
    let right = (b.x + b.width).round().clamp(0.0, w);
    let bottom = (b.y + b.height).round().clamp(0.0, h);

    if right <= left || bottom <= top {
        return None;
    }

    Some(screenshot.crop_imm(
        left as u32,
        top as u32,
        (right - left) as u32,
        (bottom - top) as u32,
    ))
}

/// Write one HTML document holding every variant, without a browser.
pub fn write_html_only(config: &Config) -> Result<usize> {
    let elements = expand(&config.base_element(), &config.styles);
    if let Some(parent) = non_empty_parent(&config.html_output) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&config.html_output, render_document(&elements))?;
    info!(
        "Wrote {} variant(s) to {}",
        elements.len(),
        config.html_output.display()
    );
    Ok(elements.len())
}

fn non_empty_parent(path: &std::path::Path) -> Option<&std::path::Path> {
    path.parent().filter(|p| !p.as_os_str().is_empty())
}
