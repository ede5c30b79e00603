//! Wire and document models for quotation generation.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::catalog::{ComponentOption, LocationEntry, SystemType};
use crate::costing::CostBreakdown;
use crate::pdf::BackendKind;
use crate::render::DocumentVariant;
use crate::sizing::SizingResult;

/// Customer identity block. Free text; only non-empty is enforced.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CustomerInfo {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

/// Everything a caller submits to generate a quotation.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct QuotationRequest {
    pub customer: CustomerInfo,
    /// Monthly electricity bill in rupees.
    pub monthly_bill: f64,
    pub roof_area_sqft: f64,
    /// Display name of a catalog location, matched case-insensitively.
    pub location: String,
    pub system_type: SystemType,
    pub panel_id: String,
    pub inverter_id: String,
    pub wiring_id: String,
    /// Manual total-cost override; supersedes the computed sum when present.
    #[serde(default)]
    pub total_cost_override: Option<i64>,
    #[serde(default)]
    pub variant: DocumentVariant,
    #[serde(default)]
    pub backend: BackendKind,
}

/// Snapshot of the sizing inputs as resolved against the catalog.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InputSnapshot {
    pub monthly_bill: f64,
    pub roof_area_sqft: f64,
    pub location: LocationEntry,
    pub system_type: SystemType,
}

/// Snapshot of the selected component brands.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SelectionSnapshot {
    pub panel: ComponentOption,
    pub inverter: ComponentOption,
    pub wiring: ComponentOption,
}

/// The normalized record a quotation document is rendered from.
///
/// Constructed once per generation request, immutable afterwards, consumed
/// by the renderer and then discarded; nothing here is persisted.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct QuotationRecord {
    /// Derived from the generation timestamp, e.g. `QTN-20260807141503`.
    pub quotation_number: String,
    pub generated_at: DateTime<Local>,
    pub customer: CustomerInfo,
    pub input: InputSnapshot,
    pub selection: SelectionSnapshot,
    pub sizing: SizingResult,
    pub cost: CostBreakdown,
}

impl QuotationRecord {
    pub fn new(
        customer: CustomerInfo,
        input: InputSnapshot,
        selection: SelectionSnapshot,
        sizing: SizingResult,
        cost: CostBreakdown,
        generated_at: DateTime<Local>,
    ) -> Self {
        Self {
            quotation_number: format!("QTN-{}", generated_at.format("%Y%m%d%H%M%S")),
            generated_at,
            customer,
            input,
            selection,
            sizing,
            cost,
        }
    }
}
