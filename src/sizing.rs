//! Sizing engine: monthly bill + roof area + irradiance → system size.
//!
//! Pure and referentially transparent; identical inputs always produce
//! identical results. The demand-based size is an upper bound capped by the
//! roof area, never the other way around: a small roof undersizes the system
//! relative to the bill instead of failing.

use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::catalog::{LocationEntry, SystemTypeOption};
use crate::config::PricingConfig;

const DAYS_PER_MONTH: f64 = 30.0;

#[derive(Debug, Error)]
pub enum SizingError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// One sizing request. Catalog references are resolved by the caller before
/// the engine runs, so unknown-location/selection failures never reach here.
#[derive(Debug, Clone, Copy)]
pub struct SizingInput<'a> {
    /// Monthly electricity bill in rupees.
    pub monthly_bill: f64,
    pub roof_area_sqft: f64,
    pub location: &'a LocationEntry,
    pub system_type: &'a SystemTypeOption,
}

/// Recommended system size with its generation estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct SizingResult {
    /// Whole-kW recommendation. Zero means the roof cannot host a system at
    /// all; callers must treat that as infeasible, not as a free quotation.
    pub recommended_size_kw: u32,
    pub daily_generation_kwh: f64,
    pub monthly_generation_kwh: f64,
}

/// Compute the recommended system size.
///
/// The demand-based size converts the bill to daily consumption at the
/// configured tariff, divides by the location's sun hours and applies the
/// oversizing buffer. The roof caps the result at one kW per
/// `pricing.sqft_per_kw` square feet.
pub fn compute_sizing(
    input: &SizingInput<'_>,
    pricing: &PricingConfig,
) -> Result<SizingResult, SizingError> {
    if !(input.monthly_bill > 0.0) {
        return Err(SizingError::InvalidInput(format!(
            "monthly bill must be positive, got {}",
            input.monthly_bill
        )));
    }
    if !(input.roof_area_sqft > 0.0) {
        return Err(SizingError::InvalidInput(format!(
            "roof area must be positive, got {}",
            input.roof_area_sqft
        )));
    }

    let units_per_month = input.monthly_bill / pricing.tariff_per_unit;
    let daily_units = units_per_month / DAYS_PER_MONTH;
    let demand_kw =
        (daily_units / input.location.average_sun_hours * pricing.oversize_factor).ceil() as u32;
    let area_cap_kw = (input.roof_area_sqft / pricing.sqft_per_kw).floor() as u32;

    let recommended_size_kw = demand_kw.min(area_cap_kw);
    let daily_generation_kwh = f64::from(recommended_size_kw) * input.location.average_sun_hours;

    Ok(SizingResult {
        recommended_size_kw,
        daily_generation_kwh,
        monthly_generation_kwh: daily_generation_kwh * DAYS_PER_MONTH,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, SystemType};

    fn fixture_location(sun_hours: f64) -> LocationEntry {
        LocationEntry {
            name: "Testville".to_string(),
            latitude: 0.0,
            longitude: 0.0,
            average_sun_hours: sun_hours,
        }
    }

    fn sizing(bill: f64, roof: f64, location: &LocationEntry) -> Result<SizingResult, SizingError> {
        let catalog = Catalog::bundled();
        let input = SizingInput {
            monthly_bill: bill,
            roof_area_sqft: roof,
            location,
            system_type: catalog.system_type(SystemType::GridTie),
        };
        compute_sizing(&input, &PricingConfig::default())
    }

    #[test]
    fn demand_limited_sizing() {
        // bill=3000 at Rs 6/unit => 500 units/month => 16.67/day;
        // 16.67 / 5.2 sun hours * 1.2 buffer = 3.85 => 4 kW, roof allows 5.
        let location = fixture_location(5.2);
        let result = sizing(3000.0, 500.0, &location).unwrap();
        assert_eq!(result.recommended_size_kw, 4);
        assert!((result.daily_generation_kwh - 20.8).abs() < 1e-9);
        assert!((result.monthly_generation_kwh - 624.0).abs() < 1e-9);
    }

    #[test]
    fn area_limited_sizing() {
        // Same demand as above but a 300 sq ft roof caps at 3 kW.
        let location = fixture_location(5.2);
        let result = sizing(3000.0, 300.0, &location).unwrap();
        assert_eq!(result.recommended_size_kw, 3);
    }

    #[test]
    fn tiny_roof_yields_zero_not_an_error() {
        let location = fixture_location(5.2);
        let result = sizing(3000.0, 60.0, &location).unwrap();
        assert_eq!(result.recommended_size_kw, 0);
        assert_eq!(result.daily_generation_kwh, 0.0);
    }

    #[test]
    fn non_positive_inputs_are_rejected() {
        let location = fixture_location(5.2);
        assert!(matches!(
            sizing(0.0, 500.0, &location),
            Err(SizingError::InvalidInput(_))
        ));
        assert!(matches!(
            sizing(3000.0, -10.0, &location),
            Err(SizingError::InvalidInput(_))
        ));
        assert!(matches!(
            sizing(f64::NAN, 500.0, &location),
            Err(SizingError::InvalidInput(_))
        ));
    }

    #[test]
    fn sizing_is_idempotent() {
        let location = fixture_location(5.0);
        let first = sizing(4500.0, 800.0, &location).unwrap();
        let second = sizing(4500.0, 800.0, &location).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn size_never_exceeds_area_cap() {
        let location = fixture_location(4.5);
        for bill in [500.0, 3000.0, 25_000.0, 900_000.0] {
            for roof in [100.0, 350.0, 1200.0] {
                let result = sizing(bill, roof, &location).unwrap();
                let cap = (roof / 100.0).floor() as u32;
                assert!(result.recommended_size_kw <= cap);
            }
        }
    }
}
