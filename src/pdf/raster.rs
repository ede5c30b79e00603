//! Client-equivalent backend: rasterize the page and assemble the captures
//! into a PDF.
//!
//! This mirrors the in-browser DOM-to-canvas flow: the document is laid out
//! at A4 width, captured as one PNG per page at a fixed device-scale
//! factor, and each capture is placed inside the page margins of a
//! `printpdf` document. Output is raster where the print backend's is
//! vector, but page count and geometry match.

use std::sync::Arc;

use async_trait::async_trait;
use headless_chrome::protocol::cdp::Page;
use printpdf::{Image, ImageTransform, Mm, PdfDocument};

use super::launcher::{ChromeLauncher, LoadedPage};
use super::{MaterializeError, PageOptions, PdfBackend};

const WORKER_GRACE_SECS: u64 = 5;

pub struct RasterPdfBackend {
    launcher: Arc<ChromeLauncher>,
}

impl RasterPdfBackend {
    pub fn new(launcher: Arc<ChromeLauncher>) -> Self {
        Self { launcher }
    }
}

#[async_trait]
impl PdfBackend for RasterPdfBackend {
    fn label(&self) -> &'static str {
        "raster-capture"
    }

    async fn materialize(
        &self,
        markup: &str,
        options: &PageOptions,
    ) -> Result<Vec<u8>, MaterializeError> {
        let launcher = Arc::clone(&self.launcher);
        let markup = markup.to_owned();
        let options = options.clone();
        let timeout_secs = launcher.timeout().as_secs();

        let work = tokio::task::spawn_blocking(move || {
            let _slot = launcher.acquire()?;
            let (page_w, page_h) = options.page_px();
            let page = launcher.load_markup(&markup, Some((page_w, page_h)))?;
            capture_and_assemble(&page, &options)
        });

        let deadline = std::time::Duration::from_secs(timeout_secs + WORKER_GRACE_SECS);
        match tokio::time::timeout(deadline, work).await {
            Err(_elapsed) => Err(MaterializeError::RenderTimeout(timeout_secs)),
            Ok(Err(join_err)) => Err(MaterializeError::Worker(join_err.to_string())),
            Ok(Ok(result)) => result,
        }
    }
}

fn capture_and_assemble(
    page: &LoadedPage,
    options: &PageOptions,
) -> Result<Vec<u8>, MaterializeError> {
    let (page_w, page_h) = options.page_px();

    let total_height = page
        .tab
        .evaluate("document.documentElement.scrollHeight", false)
        .map_err(|e| MaterializeError::Capture(e.to_string()))?
        .value
        .and_then(|v| v.as_f64())
        .ok_or_else(|| MaterializeError::Capture("page height unavailable".to_string()))?;
    let page_count = ((total_height / f64::from(page_h)).ceil() as usize).max(1);

    let content_width_mm = options.paper_width_mm - 2.0 * options.margin_mm;
    let (doc, first_page, first_layer) = PdfDocument::new(
        "Solar Quotation",
        Mm(options.paper_width_mm as f32),
        Mm(options.paper_height_mm as f32),
        "content",
    );

    for index in 0..page_count {
        let clip = Page::Viewport {
            x: 0.0,
            y: (index as f64) * f64::from(page_h),
            width: f64::from(page_w),
            height: f64::from(page_h),
            scale: options.device_scale,
        };
        let shot = page
            .tab
            .capture_screenshot(
                Page::CaptureScreenshotFormatOption::Png,
                None,
                Some(clip),
                true,
            )
            .map_err(|e| MaterializeError::Capture(e.to_string()))?;
        let decoded = image::load_from_memory(&shot)
            .map_err(|e| MaterializeError::Assembly(e.to_string()))?;

        // Scale the capture so its width spans the printable area.
        let dpi = f64::from(decoded.width()) * 25.4 / content_width_mm;
        let content_height_mm = f64::from(decoded.height()) * 25.4 / dpi;

        let (page_idx, layer_idx) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(
                Mm(options.paper_width_mm as f32),
                Mm(options.paper_height_mm as f32),
                "content",
            )
        };
        let layer = doc.get_page(page_idx).get_layer(layer_idx);

        Image::from_dynamic_image(&decoded).add_to_layer(
            layer,
            ImageTransform {
                translate_x: Some(Mm(options.margin_mm as f32)),
                translate_y: Some(Mm(
                    (options.paper_height_mm - options.margin_mm - content_height_mm) as f32
                )),
                dpi: Some(dpi as f32),
                ..Default::default()
            },
        );
    }

    doc.save_to_bytes()
        .map_err(|e| MaterializeError::Assembly(e.to_string()))
}
