//! HTTP handlers for quotation generation and the webhook.

use actix_web::{web, HttpResponse, Responder};
use chrono::Local;

use crate::pdf::naming::attachment_filename;
use crate::quotation::{build_quotation, models::QuotationRequest, QuoteError};
use crate::render::render_quotation;
use crate::state::AppState;
use crate::ErrorResponse;

fn error_response(err: &QuoteError) -> HttpResponse {
    let body = ErrorResponse::new(err.kind(), &err.to_string());
    match err {
        QuoteError::UnknownLocation(_) | QuoteError::InvalidSelection { .. } => {
            HttpResponse::NotFound().json(body)
        }
        QuoteError::Materialization(_) => HttpResponse::InternalServerError().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Quotation Service",
    post,
    path = "/quotations/pdf",
    request_body = QuotationRequest,
    responses(
        (status = 200, description = "Quotation document", content_type = "application/pdf"),
        (status = 400, description = "Invalid input or infeasible sizing", body = ErrorResponse),
        (status = 404, description = "Unknown location or component selection", body = ErrorResponse),
        (status = 500, description = "Materialization failed", body = ErrorResponse)
    )
)]
pub async fn generate_quotation_pdf(
    data: web::Data<AppState>,
    req: web::Json<QuotationRequest>,
) -> impl Responder {
    let request = req.into_inner();
    log::info!(
        "computing quotation for location {:?}, {:?} system",
        request.location,
        request.system_type
    );

    let record = match build_quotation(&request, &data.catalog, &data.pricing, Local::now()) {
        Ok(record) => record,
        Err(err) => {
            log::warn!("quotation rejected before rendering: {err}");
            return error_response(&err);
        }
    };

    log::info!(
        "rendering quotation {} ({} kW, total Rs {})",
        record.quotation_number,
        record.sizing.recommended_size_kw,
        record.cost.total_cost
    );
    let markup = render_quotation(&record, &data.company, request.variant).into_string();

    let backend = data.pdf_backend(request.backend);
    log::info!(
        "materializing quotation {} via {} backend",
        record.quotation_number,
        backend.label()
    );
    match backend.materialize(&markup, &data.page_options).await {
        Ok(pdf) => {
            data.quotation_counter
                .with_label_values(&[backend.label(), "delivered"])
                .inc();
            let filename =
                attachment_filename(&record.customer.name, record.generated_at.date_naive());
            HttpResponse::Ok()
                .content_type("application/pdf")
                .insert_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{filename}\""),
                ))
                .body(pdf)
        }
        Err(err) => {
            data.quotation_counter
                .with_label_values(&[backend.label(), "failed"])
                .inc();
            log::error!(
                "materialization failed for {}: {err}",
                record.quotation_number
            );
            error_response(&QuoteError::Materialization(err))
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Quotation Service",
    post,
    path = "/quotations/compute",
    request_body = QuotationRequest,
    responses(
        (status = 200, description = "Computed quotation record", body = crate::quotation::models::QuotationRecord),
        (status = 400, description = "Invalid input or infeasible sizing", body = ErrorResponse),
        (status = 404, description = "Unknown location or component selection", body = ErrorResponse)
    )
)]
pub async fn compute_quotation(
    data: web::Data<AppState>,
    req: web::Json<QuotationRequest>,
) -> impl Responder {
    match build_quotation(&req, &data.catalog, &data.pricing, Local::now()) {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(err) => {
            log::warn!("quotation computation rejected: {err}");
            error_response(&err)
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Catalog",
    get,
    path = "/catalog",
    responses(
        (status = 200, description = "Bundled reference catalogs", body = crate::catalog::Catalog)
    )
)]
pub async fn get_catalog(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(&data.catalog)
}

#[utoipa::path(
    context_path = "/api",
    tag = "Webhook",
    post,
    path = "/webhook",
    responses(
        (status = 200, description = "Payload accepted")
    )
)]
pub async fn receive_webhook(
    data: web::Data<AppState>,
    payload: web::Json<serde_json::Value>,
) -> impl Responder {
    let payload = payload.into_inner();
    log::info!("webhook payload accepted");

    // Downstream notification is best-effort; the response never waits on it.
    if let Some(url) = data.webhook_forward_url.clone() {
        let client = data.http_client.clone();
        tokio::spawn(async move {
            if let Err(err) = client.post(&url).json(&payload).send().await {
                log::warn!("webhook forward to {url} failed: {err}");
            }
        });
    }

    HttpResponse::Ok().json(serde_json::json!({ "status": "accepted" }))
}
