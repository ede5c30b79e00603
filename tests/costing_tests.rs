#[cfg(test)]
mod costing_tests {
    use solar_quote_server::catalog::{Catalog, ComponentSelection, SystemType};
    use solar_quote_server::config::PricingConfig;
    use solar_quote_server::costing::{compute_cost, CostBreakdown, CostError};
    use solar_quote_server::sizing::SizingResult;

    fn sized(kw: u32) -> SizingResult {
        let daily = f64::from(kw) * 5.2;
        SizingResult {
            recommended_size_kw: kw,
            daily_generation_kwh: daily,
            monthly_generation_kwh: daily * 30.0,
        }
    }

    fn breakdown(
        kw: u32,
        bill: f64,
        system_type: SystemType,
        override_total: Option<i64>,
    ) -> Result<CostBreakdown, CostError> {
        let catalog = Catalog::bundled();
        compute_cost(
            &sized(kw),
            &ComponentSelection {
                panel: catalog.panel("tata-540").unwrap(),
                inverter: catalog.inverter("sungrow-5k").unwrap(),
                wiring: catalog.wiring("havells").unwrap(),
            },
            catalog.system_type(system_type),
            &PricingConfig::default(),
            bill,
            override_total,
        )
    }

    #[test]
    fn computed_path_sums_the_line_items() {
        let b = breakdown(4, 3000.0, SystemType::GridTie, None).unwrap();
        let sum = b.panel_cost + b.inverter_cost + b.wiring_cost + b.installation_cost + b.other_cost;
        assert_eq!(b.total_cost, sum);
        assert!(!b.total_cost_overridden);
    }

    #[test]
    fn override_path_supersedes_the_computed_sum() {
        // The override is taken as-is; subsidy and net payable derive from it.
        let b = breakdown(4, 3000.0, SystemType::GridTie, Some(200_000)).unwrap();
        assert!(b.total_cost_overridden);
        assert_eq!(b.total_cost, 200_000);
        assert_eq!(b.subsidy_amount, 60_000);
        assert_eq!(b.net_payable, 140_000);
        // Line items still reflect the computed costing for transparency.
        assert_eq!(b.panel_cost, 4 * 1000 * 31);
    }

    #[test]
    fn subsidy_invariants_hold_across_totals() {
        for total in [50_000, 200_000, 260_000, 500_000, 2_000_000] {
            let b = breakdown(4, 3000.0, SystemType::GridTie, Some(total)).unwrap();
            let thirty_percent = (total as f64 * 0.30).round() as i64;
            assert!(b.subsidy_amount >= 0);
            assert!(b.subsidy_amount <= thirty_percent.min(78_000));
            assert_eq!(b.net_payable, b.total_cost - b.subsidy_amount);
            assert!(b.net_payable >= 0);
            assert!(b.net_payable <= b.total_cost);
        }
    }

    #[test]
    fn savings_cap_follows_the_bill() {
        for bill in [1000.0, 3000.0, 10_000.0] {
            let b = breakdown(4, bill, SystemType::GridTie, None).unwrap();
            let cap = (bill * 0.95).round() as i64;
            assert!(
                b.monthly_savings <= cap,
                "savings {} exceed cap {}",
                b.monthly_savings,
                cap
            );
            assert_eq!(b.yearly_savings, b.monthly_savings * 12);
        }
    }

    #[test]
    fn zero_savings_surface_division_undefined() {
        let catalog = Catalog::bundled();
        let result = compute_cost(
            &SizingResult {
                recommended_size_kw: 0,
                daily_generation_kwh: 0.0,
                monthly_generation_kwh: 0.0,
            },
            &ComponentSelection {
                panel: catalog.panel("tata-540").unwrap(),
                inverter: catalog.inverter("sungrow-5k").unwrap(),
                wiring: catalog.wiring("havells").unwrap(),
            },
            catalog.system_type(SystemType::GridTie),
            &PricingConfig::default(),
            3000.0,
            Some(150_000),
        );
        match result {
            Err(CostError::DivisionUndefined { yearly_savings }) => {
                assert_eq!(yearly_savings, 0)
            }
            other => panic!("expected DivisionUndefined, got {other:?}"),
        }
    }

    #[test]
    fn payback_never_propagates_non_finite_values() {
        for override_total in [None, Some(10_000), Some(5_000_000)] {
            let b = breakdown(6, 4000.0, SystemType::Hybrid, override_total).unwrap();
            assert!(b.payback_years.is_finite());
            assert!(b.payback_years > 0.0);
        }
    }

    #[test]
    fn topology_ordering_grid_tie_cheapest() {
        let grid = breakdown(4, 3000.0, SystemType::GridTie, None).unwrap();
        let hybrid = breakdown(4, 3000.0, SystemType::Hybrid, None).unwrap();
        let off_grid = breakdown(4, 3000.0, SystemType::OffGrid, None).unwrap();
        assert!(grid.total_cost < hybrid.total_cost);
        assert!(hybrid.total_cost < off_grid.total_cost);
    }

    #[test]
    fn both_paths_are_idempotent() {
        let computed_a = breakdown(4, 3000.0, SystemType::GridTie, None).unwrap();
        let computed_b = breakdown(4, 3000.0, SystemType::GridTie, None).unwrap();
        assert_eq!(computed_a, computed_b);

        let overridden_a = breakdown(4, 3000.0, SystemType::GridTie, Some(200_000)).unwrap();
        let overridden_b = breakdown(4, 3000.0, SystemType::GridTie, Some(200_000)).unwrap();
        assert_eq!(overridden_a, overridden_b);
    }
}
