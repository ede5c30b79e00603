//! Bundled reference catalogs: locations, component brands, system types.
//!
//! These tables are configuration shipped with the deployment, loaded once
//! into [`Catalog`] at startup and never mutated. Updating them means
//! redeploying; there is deliberately no runtime edit path.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A serviceable location with its average daily solar irradiance.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LocationEntry {
    /// Unique display key, matched case-insensitively on lookup.
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Average equivalent full-sun hours per day; always > 0.
    pub average_sun_hours: f64,
}

/// Supported system topologies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SystemType {
    GridTie,
    Hybrid,
    OffGrid,
}

impl SystemType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::GridTie => "Grid-Tie",
            Self::Hybrid => "Hybrid",
            Self::OffGrid => "Off-Grid",
        }
    }
}

/// Pricing shape of one system topology.
///
/// `cost_multiplier` scales the full computed cost (1.0 for grid-tie);
/// `cost_per_kw` is the topology's per-kW equipment adder (battery bank,
/// charge controller) folded into the "other" cost line.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SystemTypeOption {
    pub system_type: SystemType,
    pub cost_multiplier: f64,
    pub cost_per_kw: i64,
}

/// One selectable component brand (panel, inverter or wiring).
///
/// `unit_price` is interpreted per category: rupees per watt for panels,
/// rupees per inverter unit, rupees per kW for wiring.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ComponentOption {
    pub id: String,
    pub display_label: String,
    pub unit_price: i64,
    pub warranty_years: u32,
}

/// The three component choices a quotation is priced against.
#[derive(Debug, Clone, Copy)]
pub struct ComponentSelection<'a> {
    pub panel: &'a ComponentOption,
    pub inverter: &'a ComponentOption,
    pub wiring: &'a ComponentOption,
}

/// All reference tables, loaded once and shared immutably.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Catalog {
    pub locations: Vec<LocationEntry>,
    pub panels: Vec<ComponentOption>,
    pub inverters: Vec<ComponentOption>,
    pub wiring: Vec<ComponentOption>,
    pub system_types: Vec<SystemTypeOption>,
}

impl Catalog {
    /// The catalog bundled with this deployment.
    pub fn bundled() -> Self {
        Self {
            locations: bundled_locations(),
            panels: bundled_panels(),
            inverters: bundled_inverters(),
            wiring: bundled_wiring(),
            system_types: bundled_system_types(),
        }
    }

    pub fn location(&self, name: &str) -> Option<&LocationEntry> {
        let needle = name.trim();
        self.locations
            .iter()
            .find(|l| l.name.eq_ignore_ascii_case(needle))
    }

    pub fn panel(&self, id: &str) -> Option<&ComponentOption> {
        self.panels.iter().find(|c| c.id == id)
    }

    pub fn inverter(&self, id: &str) -> Option<&ComponentOption> {
        self.inverters.iter().find(|c| c.id == id)
    }

    pub fn wiring(&self, id: &str) -> Option<&ComponentOption> {
        self.wiring.iter().find(|c| c.id == id)
    }

    /// System types are a closed enum, so this lookup cannot miss.
    pub fn system_type(&self, system_type: SystemType) -> &SystemTypeOption {
        self.system_types
            .iter()
            .find(|s| s.system_type == system_type)
            .unwrap_or(&self.system_types[0])
    }
}

fn location(name: &str, latitude: f64, longitude: f64, average_sun_hours: f64) -> LocationEntry {
    LocationEntry {
        name: name.to_string(),
        latitude,
        longitude,
        average_sun_hours,
    }
}

fn component(id: &str, display_label: &str, unit_price: i64, warranty_years: u32) -> ComponentOption {
    ComponentOption {
        id: id.to_string(),
        display_label: display_label.to_string(),
        unit_price,
        warranty_years,
    }
}

fn bundled_locations() -> Vec<LocationEntry> {
    vec![
        location("Chennai", 13.0827, 80.2707, 5.4),
        location("Coimbatore", 11.0168, 76.9558, 5.5),
        location("Madurai", 9.9252, 78.1198, 5.6),
        location("Bengaluru", 12.9716, 77.5946, 5.2),
        location("Hyderabad", 17.3850, 78.4867, 5.3),
        location("Mumbai", 19.0760, 72.8777, 5.0),
        location("Pune", 18.5204, 73.8567, 5.2),
        location("Delhi", 28.7041, 77.1025, 5.1),
        location("Ahmedabad", 23.0225, 72.5714, 5.7),
        location("Jaipur", 26.9124, 75.7873, 5.8),
        location("Kolkata", 22.5726, 88.3639, 4.7),
        location("Kochi", 9.9312, 76.2673, 4.9),
    ]
}

fn bundled_panels() -> Vec<ComponentOption> {
    // unit_price is rupees per watt
    vec![
        component("tata-540", "Tata Power Solar 540 Wp Mono PERC", 31, 25),
        component("adani-535", "Adani Solar 535 Wp Bifacial", 33, 27),
        component("waaree-545", "Waaree 545 Wp Mono PERC", 29, 25),
        component("vikram-550", "Vikram Solar 550 Wp TOPCon", 35, 30),
    ]
}

fn bundled_inverters() -> Vec<ComponentOption> {
    // unit_price is rupees per 5 kW unit
    vec![
        component("growatt-5k", "Growatt 5 kW Grid-Tie Inverter", 42_000, 5),
        component("sungrow-5k", "Sungrow 5 kW String Inverter", 52_000, 10),
        component("luminous-5k", "Luminous 5 kW Hybrid Inverter", 58_000, 5),
        component("microtek-5k", "Microtek 5 kW Grid-Tie Inverter", 38_000, 5),
    ]
}

fn bundled_wiring() -> Vec<ComponentOption> {
    // unit_price is rupees per kW
    vec![
        component("polycab", "Polycab copper DC/AC wiring set", 2_200, 10),
        component("havells", "Havells copper wiring set", 2_500, 12),
        component("finolex", "Finolex copper wiring set", 1_900, 8),
    ]
}

fn bundled_system_types() -> Vec<SystemTypeOption> {
    vec![
        SystemTypeOption {
            system_type: SystemType::GridTie,
            cost_multiplier: 1.0,
            cost_per_kw: 0,
        },
        SystemTypeOption {
            system_type: SystemType::Hybrid,
            cost_multiplier: 1.1,
            cost_per_kw: 12_000,
        },
        SystemTypeOption {
            system_type: SystemType::OffGrid,
            cost_multiplier: 1.2,
            cost_per_kw: 20_000,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_is_complete() {
        let catalog = Catalog::bundled();
        assert!(!catalog.locations.is_empty());
        assert!(!catalog.panels.is_empty());
        assert!(!catalog.inverters.is_empty());
        assert!(!catalog.wiring.is_empty());
        assert_eq!(catalog.system_types.len(), 3);
    }

    #[test]
    fn sun_hours_are_positive() {
        for entry in Catalog::bundled().locations {
            assert!(entry.average_sun_hours > 0.0, "{}", entry.name);
        }
    }

    #[test]
    fn location_lookup_is_case_insensitive() {
        let catalog = Catalog::bundled();
        assert!(catalog.location("chennai").is_some());
        assert!(catalog.location("  CHENNAI ").is_some());
        assert!(catalog.location("Atlantis").is_none());
    }

    #[test]
    fn component_lookup_by_id() {
        let catalog = Catalog::bundled();
        assert_eq!(
            catalog.panel("waaree-545").map(|p| p.unit_price),
            Some(29)
        );
        assert!(catalog.inverter("growatt-5k").is_some());
        assert!(catalog.wiring("polycab").is_some());
        assert!(catalog.panel("no-such-panel").is_none());
    }

    #[test]
    fn grid_tie_is_the_baseline_topology() {
        let catalog = Catalog::bundled();
        let grid_tie = catalog.system_type(SystemType::GridTie);
        assert_eq!(grid_tie.cost_multiplier, 1.0);
        assert_eq!(grid_tie.cost_per_kw, 0);
    }

    #[test]
    fn system_type_serde_uses_kebab_case() {
        let json = serde_json::to_string(&SystemType::GridTie).unwrap();
        assert_eq!(json, "\"grid-tie\"");
        let parsed: SystemType = serde_json::from_str("\"off-grid\"").unwrap();
        assert_eq!(parsed, SystemType::OffGrid);
    }
}
