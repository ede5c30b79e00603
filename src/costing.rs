//! Cost engine: sized system + component selection → financial breakdown.
//!
//! Pure like the sizing engine. All currency arithmetic rounds here; the
//! renderer only formats. A manual total-cost override supersedes the
//! computed sum when present, and subsidy/net-payable/payback derive from
//! whichever total is in effect; both paths stay independently testable.

use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::catalog::{ComponentSelection, SystemTypeOption};
use crate::config::PricingConfig;
use crate::sizing::SizingResult;

const WATTS_PER_KW: i64 = 1000;
const MONTHS_PER_YEAR: i64 = 12;

#[derive(Debug, Error)]
pub enum CostError {
    #[error("payback period is not computable: projected yearly savings are {yearly_savings}")]
    DivisionUndefined { yearly_savings: i64 },
}

/// Itemized cost, subsidy and savings projection for one quotation.
///
/// Currency fields are whole rupees.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CostBreakdown {
    pub panel_cost: i64,
    pub inverter_cost: i64,
    pub wiring_cost: i64,
    pub installation_cost: i64,
    pub other_cost: i64,
    pub total_cost: i64,
    /// True when `total_cost` is an operator-supplied override rather than
    /// the computed sum.
    pub total_cost_overridden: bool,
    pub subsidy_amount: i64,
    pub net_payable: i64,
    pub monthly_savings: i64,
    pub yearly_savings: i64,
    pub payback_years: f64,
    pub carbon_offset_tons_per_year: f64,
}

/// Compute the full financial breakdown.
///
/// `monthly_bill` re-enters here only to cap savings at 95% of the bill;
/// `total_cost_override`, when present, replaces the computed total without
/// reconciliation.
pub fn compute_cost(
    sizing: &SizingResult,
    selection: &ComponentSelection<'_>,
    system_type: &SystemTypeOption,
    pricing: &PricingConfig,
    monthly_bill: f64,
    total_cost_override: Option<i64>,
) -> Result<CostBreakdown, CostError> {
    let kw = i64::from(sizing.recommended_size_kw);

    let panel_cost = kw * WATTS_PER_KW * selection.panel.unit_price;
    // Inverters come in fixed increments; a 7 kW system still needs two
    // 5 kW units.
    let inverter_units = div_ceil(sizing.recommended_size_kw, pricing.inverter_step_kw);
    let inverter_cost = i64::from(inverter_units) * selection.inverter.unit_price;
    let wiring_cost = kw * selection.wiring.unit_price;
    let installation_cost = kw * pricing.installation_rate_per_kw;
    let other_cost = kw * (pricing.misc_rate_per_kw + system_type.cost_per_kw);

    let component_sum =
        panel_cost + inverter_cost + wiring_cost + installation_cost + other_cost;
    let computed_total = (component_sum as f64 * system_type.cost_multiplier).round() as i64;

    let (total_cost, total_cost_overridden) = match total_cost_override {
        Some(value) => (value, true),
        None => (computed_total, false),
    };

    let subsidy_amount =
        ((total_cost as f64 * pricing.subsidy_rate).round() as i64).min(pricing.subsidy_cap);
    let net_payable = total_cost - subsidy_amount;

    let uncapped_savings = sizing.monthly_generation_kwh * pricing.tariff_per_unit;
    let monthly_savings = uncapped_savings
        .min(monthly_bill * pricing.savings_cap_ratio)
        .round() as i64;
    let yearly_savings = monthly_savings * MONTHS_PER_YEAR;

    if yearly_savings <= 0 {
        return Err(CostError::DivisionUndefined { yearly_savings });
    }
    let payback_years = round1(total_cost as f64 / yearly_savings as f64);

    let carbon_offset_tons_per_year = round2(kw as f64 * pricing.carbon_offset_tons_per_kw);

    Ok(CostBreakdown {
        panel_cost,
        inverter_cost,
        wiring_cost,
        installation_cost,
        other_cost,
        total_cost,
        total_cost_overridden,
        subsidy_amount,
        net_payable,
        monthly_savings,
        yearly_savings,
        payback_years,
        carbon_offset_tons_per_year,
    })
}

fn div_ceil(value: u32, step: u32) -> u32 {
    value.div_ceil(step.max(1))
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
