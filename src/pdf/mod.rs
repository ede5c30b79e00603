//! PDF materialization: rendered markup → binary PDF.
//!
//! Two interchangeable backends implement [`PdfBackend`]:
//! - [`browser::PrintPdfBackend`] loads the markup into an isolated
//!   headless-Chrome page and prints it (vector output),
//! - [`raster::RasterPdfBackend`] captures the page as one PNG per A4 sheet
//!   and assembles the captures into a PDF (raster output).
//!
//! Both honor the same [`PageOptions`] so page count and geometry match
//! across backends. A failed backend surfaces [`MaterializeError`]; callers
//! never receive a partial binary.

pub mod browser;
pub mod launcher;
pub mod naming;
pub mod raster;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

pub use browser::PrintPdfBackend;
pub use launcher::ChromeLauncher;
pub use raster::RasterPdfBackend;

/// CSS reference pixels per inch, the unit browsers lay pages out in.
const CSS_PX_PER_IN: f64 = 96.0;
const MM_PER_IN: f64 = 25.4;

#[derive(Debug, Error)]
pub enum MaterializeError {
    #[error("failed to create temporary working directory: {0}")]
    TempDir(#[source] std::io::Error),
    #[error("failed to write markup document: {0}")]
    WriteMarkup(#[source] std::io::Error),
    #[error("browser launch failed: {0}")]
    LaunchFailed(String),
    #[error("all {limit} browser launch slots are busy")]
    CapacityExceeded { limit: usize },
    #[error("page navigation failed: {0}")]
    Navigation(String),
    #[error("render did not settle within {0} seconds")]
    RenderTimeout(u64),
    #[error("print-to-PDF failed: {0}")]
    Print(String),
    #[error("page capture failed: {0}")]
    Capture(String),
    #[error("PDF assembly failed: {0}")]
    Assembly(String),
    #[error("materializer worker failed: {0}")]
    Worker(String),
}

/// Which backend a request wants. Server deployments default to the
/// browser printer; the raster path mirrors the in-browser client flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    #[default]
    Browser,
    Raster,
}

/// Shared page geometry; both backends must produce equivalent layouts.
#[derive(Debug, Clone)]
pub struct PageOptions {
    pub paper_width_mm: f64,
    pub paper_height_mm: f64,
    /// Uniform margin on all four sides.
    pub margin_mm: f64,
    pub print_background: bool,
    /// Raster capture scale relative to CSS pixels.
    pub device_scale: f64,
}

impl Default for PageOptions {
    fn default() -> Self {
        // A4 portrait with 10 mm margins.
        Self {
            paper_width_mm: 210.0,
            paper_height_mm: 297.0,
            margin_mm: 10.0,
            print_background: true,
            device_scale: 2.0,
        }
    }
}

impl PageOptions {
    pub fn paper_width_in(&self) -> f64 {
        self.paper_width_mm / MM_PER_IN
    }

    pub fn paper_height_in(&self) -> f64 {
        self.paper_height_mm / MM_PER_IN
    }

    pub fn margin_in(&self) -> f64 {
        self.margin_mm / MM_PER_IN
    }

    /// Full paper size in CSS pixels, the pagination unit for captures.
    pub fn page_px(&self) -> (u32, u32) {
        (
            (self.paper_width_in() * CSS_PX_PER_IN).round() as u32,
            (self.paper_height_in() * CSS_PX_PER_IN).round() as u32,
        )
    }
}

/// Strategy seam over the two materialization paths.
#[async_trait]
pub trait PdfBackend: Send + Sync {
    /// Short name used in logs.
    fn label(&self) -> &'static str;

    /// Convert self-contained markup into PDF bytes.
    async fn materialize(
        &self,
        markup: &str,
        options: &PageOptions,
    ) -> Result<Vec<u8>, MaterializeError>;
}
