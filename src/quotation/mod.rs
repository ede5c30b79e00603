//! Quotation pipeline: validate → resolve catalog references → size → cost
//! → assemble the immutable [`QuotationRecord`].
//!
//! Engine failures abort before any rendering is attempted; materialization
//! failures are handled separately at the PDF backend boundary.

pub mod handlers;
pub mod models;
pub mod validation;

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::catalog::{Catalog, ComponentSelection};
use crate::config::PricingConfig;
use crate::costing::{compute_cost, CostError};
use crate::pdf::MaterializeError;
use crate::sizing::{compute_sizing, SizingError, SizingInput};

pub use models::{CustomerInfo, QuotationRecord, QuotationRequest};

/// Failure taxonomy for quotation generation. `kind()` is the
/// machine-readable string carried in HTTP error bodies.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unknown location {0:?}")]
    UnknownLocation(String),
    #[error("unknown {kind} selection {id:?}")]
    InvalidSelection { kind: &'static str, id: String },
    #[error("insufficient roof area: {roof_area_sqft} sq ft cannot host a system")]
    InfeasibleSizing { roof_area_sqft: f64 },
    #[error(transparent)]
    Cost(#[from] CostError),
    #[error("could not produce the PDF document: {0}")]
    Materialization(#[from] MaterializeError),
}

impl From<SizingError> for QuoteError {
    fn from(err: SizingError) -> Self {
        match err {
            SizingError::InvalidInput(message) => Self::InvalidInput(message),
        }
    }
}

impl QuoteError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "InvalidInput",
            Self::UnknownLocation(_) => "UnknownLocation",
            Self::InvalidSelection { .. } => "InvalidSelection",
            Self::InfeasibleSizing { .. } => "InfeasibleSizing",
            Self::Cost(CostError::DivisionUndefined { .. }) => "DivisionUndefined",
            Self::Materialization(_) => "MaterializationFailed",
        }
    }
}

/// Run the computation half of the pipeline and assemble the record.
///
/// `generated_at` is injected so the handler stamps real time while tests
/// stay deterministic.
pub fn build_quotation(
    request: &QuotationRequest,
    catalog: &Catalog,
    pricing: &PricingConfig,
    generated_at: DateTime<Local>,
) -> Result<QuotationRecord, QuoteError> {
    validate_request(request)?;

    let location = catalog
        .location(&request.location)
        .ok_or_else(|| QuoteError::UnknownLocation(request.location.clone()))?;
    let system_type = catalog.system_type(request.system_type);
    let panel = catalog
        .panel(&request.panel_id)
        .ok_or_else(|| QuoteError::InvalidSelection {
            kind: "panel",
            id: request.panel_id.clone(),
        })?;
    let inverter = catalog
        .inverter(&request.inverter_id)
        .ok_or_else(|| QuoteError::InvalidSelection {
            kind: "inverter",
            id: request.inverter_id.clone(),
        })?;
    let wiring = catalog
        .wiring(&request.wiring_id)
        .ok_or_else(|| QuoteError::InvalidSelection {
            kind: "wiring",
            id: request.wiring_id.clone(),
        })?;

    let sizing = compute_sizing(
        &SizingInput {
            monthly_bill: request.monthly_bill,
            roof_area_sqft: request.roof_area_sqft,
            location,
            system_type,
        },
        pricing,
    )?;
    if sizing.recommended_size_kw == 0 {
        return Err(QuoteError::InfeasibleSizing {
            roof_area_sqft: request.roof_area_sqft,
        });
    }

    let selection = ComponentSelection {
        panel,
        inverter,
        wiring,
    };
    let cost = compute_cost(
        &sizing,
        &selection,
        system_type,
        pricing,
        request.monthly_bill,
        request.total_cost_override,
    )?;

    Ok(QuotationRecord::new(
        request.customer.clone(),
        models::InputSnapshot {
            monthly_bill: request.monthly_bill,
            roof_area_sqft: request.roof_area_sqft,
            location: location.clone(),
            system_type: request.system_type,
        },
        models::SelectionSnapshot {
            panel: panel.clone(),
            inverter: inverter.clone(),
            wiring: wiring.clone(),
        },
        sizing,
        cost,
        generated_at,
    ))
}

fn validate_request(request: &QuotationRequest) -> Result<(), QuoteError> {
    use validation::*;

    let mut errors = ValidationErrors::new();
    validate_required(
        &request.customer.name,
        "customer.name",
        "Customer name",
        &mut errors,
    );
    validate_required(
        &request.customer.phone,
        "customer.phone",
        "Customer phone",
        &mut errors,
    );
    validate_required(
        &request.customer.email,
        "customer.email",
        "Customer email",
        &mut errors,
    );
    validate_required(
        &request.customer.address,
        "customer.address",
        "Customer address",
        &mut errors,
    );
    validate_positive(
        request.monthly_bill,
        "monthly_bill",
        "Monthly bill",
        &mut errors,
    );
    validate_positive(
        request.roof_area_sqft,
        "roof_area_sqft",
        "Roof area",
        &mut errors,
    );
    validate_positive_override(
        request.total_cost_override,
        "total_cost_override",
        "Total cost override",
        &mut errors,
    );

    errors.into_result().map_err(QuoteError::InvalidInput)
}
