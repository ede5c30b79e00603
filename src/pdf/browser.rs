//! Server-side backend: headless-Chrome print-to-PDF (vector output).

use std::sync::Arc;

use async_trait::async_trait;
use headless_chrome::types::PrintToPdfOptions;

use super::launcher::ChromeLauncher;
use super::{MaterializeError, PageOptions, PdfBackend};

/// Extra wall-clock allowance over the in-browser timeout before the
/// request itself is abandoned.
const WORKER_GRACE_SECS: u64 = 5;

pub struct PrintPdfBackend {
    launcher: Arc<ChromeLauncher>,
}

impl PrintPdfBackend {
    pub fn new(launcher: Arc<ChromeLauncher>) -> Self {
        Self { launcher }
    }
}

#[async_trait]
impl PdfBackend for PrintPdfBackend {
    fn label(&self) -> &'static str {
        "browser-print"
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
            let page = launcher.load_markup(&markup, None)?;

            let pdf_options = PrintToPdfOptions {
                landscape: Some(false),
                display_header_footer: Some(false),
                print_background: Some(options.print_background),
                scale: Some(1.0),
                paper_width: Some(options.paper_width_in()),
                paper_height: Some(options.paper_height_in()),
                margin_top: Some(options.margin_in()),
                margin_bottom: Some(options.margin_in()),
                margin_left: Some(options.margin_in()),
                margin_right: Some(options.margin_in()),
                prefer_css_page_size: Some(false),
                ..Default::default()
            };

            page.tab
                .print_to_pdf(Some(pdf_options))
                .map_err(|e| MaterializeError::Print(e.to_string()))
        });

        let deadline = std::time::Duration::from_secs(timeout_secs + WORKER_GRACE_SECS);
        match tokio::time::timeout(deadline, work).await {
            Err(_elapsed) => Err(MaterializeError::RenderTimeout(timeout_secs)),
            Ok(Err(join_err)) => Err(MaterializeError::Worker(join_err.to_string())),
            Ok(Ok(result)) => result,
        }
    }
}
