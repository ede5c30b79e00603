//! Shared fixtures for unit tests.

use chrono::{DateTime, Local};

use crate::catalog::{Catalog, ComponentSelection, SystemType};
use crate::config::PricingConfig;
use crate::costing::compute_cost;
use crate::pdf::BackendKind;
use crate::quotation::models::{
    CustomerInfo, InputSnapshot, QuotationRecord, QuotationRequest, SelectionSnapshot,
};
use crate::render::DocumentVariant;
use crate::sizing::{compute_sizing, SizingInput};

pub(crate) fn fixture_customer() -> CustomerInfo {
    CustomerInfo {
        name: "Meera Krishnan".to_string(),
        phone: "+91 98400 12345".to_string(),
        email: "meera@example.in".to_string(),
        address: "12, Lake View Road, Chennai".to_string(),
    }
}

pub(crate) fn fixture_request() -> QuotationRequest {
    QuotationRequest {
        customer: fixture_customer(),
        monthly_bill: 3000.0,
        roof_area_sqft: 500.0,
        location: "Chennai".to_string(),
        system_type: SystemType::GridTie,
        panel_id: "waaree-545".to_string(),
        inverter_id: "growatt-5k".to_string(),
        wiring_id: "polycab".to_string(),
        total_cost_override: None,
        variant: DocumentVariant::Detailed,
        backend: BackendKind::Browser,
    }
}

/// A fully computed record for the standard 4 kW Chennai scenario.
pub(crate) fn fixture_record(generated_at: DateTime<Local>) -> QuotationRecord {
    let catalog = Catalog::bundled();
    let location = catalog.location("Chennai").unwrap();
    let system_type = catalog.system_type(SystemType::GridTie);
    let pricing = PricingConfig::default();
    let sizing = compute_sizing(
        &SizingInput {
            monthly_bill: 3000.0,
            roof_area_sqft: 500.0,
            location,
            system_type,
        },
        &pricing,
    )
    .unwrap();
    let selection = ComponentSelection {
        panel: catalog.panel("waaree-545").unwrap(),
        inverter: catalog.inverter("growatt-5k").unwrap(),
        wiring: catalog.wiring("polycab").unwrap(),
    };
    let cost = compute_cost(&sizing, &selection, system_type, &pricing, 3000.0, None).unwrap();
    QuotationRecord::new(
        fixture_customer(),
        InputSnapshot {
            monthly_bill: 3000.0,
            roof_area_sqft: 500.0,
            location: location.clone(),
            system_type: SystemType::GridTie,
        },
        SelectionSnapshot {
            panel: catalog.panel("waaree-545").unwrap().clone(),
            inverter: catalog.inverter("growatt-5k").unwrap().clone(),
            wiring: catalog.wiring("polycab").unwrap().clone(),
        },
        sizing,
        cost,
        generated_at,
    )
}
