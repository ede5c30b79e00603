//! Solar sizing and quotation generation service.
//!
//! Pipeline: request → sizing engine → cost engine → quotation record →
//! markup renderer → PDF materializer → binary download. The engines are
//! pure functions over immutable bundled catalogs; the only managed
//! resource is the per-request headless browser used for materialization.

use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{http::header, web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod catalog;
pub mod config;
pub mod costing;
pub mod pdf;
pub mod quotation;
pub mod render;
pub mod sizing;
pub mod state;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use crate::state::AppState;

/// JSON body carried by every non-200 response. `error` is the
/// machine-readable kind; `message` is for humans.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }
}

pub async fn run() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    #[derive(OpenApi)]
    #[openapi(
        paths(
            crate::quotation::handlers::generate_quotation_pdf,
            crate::quotation::handlers::compute_quotation,
            crate::quotation::handlers::get_catalog,
            crate::quotation::handlers::receive_webhook
        ),
        components(
            schemas(
                quotation::models::QuotationRequest,
                quotation::models::QuotationRecord,
                quotation::models::CustomerInfo,
                quotation::models::InputSnapshot,
                quotation::models::SelectionSnapshot,
                sizing::SizingResult,
                costing::CostBreakdown,
                catalog::Catalog,
                catalog::LocationEntry,
                catalog::SystemType,
                catalog::SystemTypeOption,
                catalog::ComponentOption,
                render::DocumentVariant,
                pdf::BackendKind,
                ErrorResponse,
            )
        ),
        tags(
            (name = "Quotation Service", description = "Sizing, costing and PDF generation."),
            (name = "Catalog", description = "Bundled reference data."),
            (name = "Webhook", description = "Downstream notification intake.")
        )
    )]
    struct ApiDoc;

    let server_config = config::ServerConfig::from_env();
    let app_state = web::Data::new(AppState::new(&server_config));

    let prometheus = PrometheusMetricsBuilder::new("solar_quote_server")
        .endpoint("/metrics")
        .build()
        .expect("Failed to create Prometheus metrics middleware");
    prometheus
        .registry
        .register(Box::new(app_state.quotation_counter.clone()))
        .expect("Failed to register quotation counter");

    log::info!(
        "starting server at http://{}:{}",
        server_config.bind_address,
        server_config.port
    );

    HttpServer::new(move || {
        let app_state = app_state.clone();
        let prometheus = prometheus.clone();
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus)
            .wrap(cors)
            .app_data(app_state)
            .service(
                web::scope("/api")
                    .service(
                        web::resource("/quotations/pdf")
                            .route(web::post().to(quotation::handlers::generate_quotation_pdf)),
                    )
                    .service(
                        web::resource("/quotations/compute")
                            .route(web::post().to(quotation::handlers::compute_quotation)),
                    )
                    .service(
                        web::resource("/catalog")
                            .route(web::get().to(quotation::handlers::get_catalog)),
                    )
                    .service(
                        web::resource("/webhook")
                            .route(web::post().to(quotation::handlers::receive_webhook)),
                    ),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((server_config.bind_address.as_str(), server_config.port))?
    .run()
    .await
}
