//! Shared application state: immutable catalogs, configuration and the PDF
//! backends. Built once at startup and handed to actix via `web::Data`.

use std::sync::Arc;
use std::time::Duration;

use prometheus::{IntCounterVec, Opts};

use crate::catalog::Catalog;
use crate::config::{CompanyInfo, PricingConfig, ServerConfig};
use crate::pdf::{
    BackendKind, ChromeLauncher, PageOptions, PdfBackend, PrintPdfBackend, RasterPdfBackend,
};

pub struct AppState {
    pub catalog: Catalog,
    pub pricing: PricingConfig,
    pub company: CompanyInfo,
    pub page_options: PageOptions,
    pub webhook_forward_url: Option<String>,
    pub http_client: reqwest::Client,
    /// Labelled by backend and outcome; registered on the metrics endpoint
    /// at startup.
    pub quotation_counter: IntCounterVec,
    print_backend: Arc<PrintPdfBackend>,
    raster_backend: Arc<RasterPdfBackend>,
}

impl AppState {
    pub fn new(server: &ServerConfig) -> Self {
        // Both backends share one launcher so the launch-slot bound is
        // global, not per backend.
        let launcher = Arc::new(ChromeLauncher::new(
            server.chrome_path.clone(),
            Duration::from_secs(server.render_timeout_secs),
            server.max_browser_instances,
        ));

        let http_client = reqwest::Client::builder()
            .user_agent(concat!("solar-quote-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to create reqwest client");

        let quotation_counter = IntCounterVec::new(
            Opts::new(
                "quotations_generated_total",
                "Quotation PDFs materialized, by backend and outcome",
            ),
            &["backend", "outcome"],
        )
        .expect("failed to create quotation counter");

        Self {
            catalog: Catalog::bundled(),
            pricing: PricingConfig::from_env(),
            company: CompanyInfo::from_env(),
            page_options: PageOptions::default(),
            webhook_forward_url: server.webhook_forward_url.clone(),
            http_client,
            quotation_counter,
            print_backend: Arc::new(PrintPdfBackend::new(Arc::clone(&launcher))),
            raster_backend: Arc::new(RasterPdfBackend::new(launcher)),
        }
    }

    pub fn pdf_backend(&self, kind: BackendKind) -> Arc<dyn PdfBackend> {
        match kind {
            BackendKind::Browser => Arc::clone(&self.print_backend) as Arc<dyn PdfBackend>,
            BackendKind::Raster => Arc::clone(&self.raster_backend) as Arc<dyn PdfBackend>,
        }
    }
}
