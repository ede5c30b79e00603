//! Runtime configuration loaded once at startup.
//!
//! Every knob has a default so the server starts with no environment at all;
//! `.env` files are honored via dotenvy. Tariff and per-kW rates live here
//! rather than in the engines so tests can substitute fixtures.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Read an env var and parse it, falling back to `default` when the variable
/// is absent or unparseable (a warning is logged for the latter).
fn env_parse<T: FromStr + Copy>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                log::warn!("ignoring unparseable {key}={raw:?}, using default");
                default
            }
        },
        Err(_) => default,
    }
}

fn env_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Tariff and rate constants feeding the sizing and cost engines.
///
/// Currency values are whole rupees.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    /// Electricity tariff in rupees per kWh ("unit").
    pub tariff_per_unit: f64,
    /// Oversizing buffer applied to the demand-based size.
    pub oversize_factor: f64,
    /// Roof area consumed per installed kW.
    pub sqft_per_kw: f64,
    /// Inverters are sold in fixed increments of this many kW.
    pub inverter_step_kw: u32,
    /// Labor rate per installed kW.
    pub installation_rate_per_kw: i64,
    /// Mounting structure, earthing and consumables per installed kW.
    pub misc_rate_per_kw: i64,
    /// Subsidy fraction of total cost.
    pub subsidy_rate: f64,
    /// Fixed ceiling on the subsidy amount.
    pub subsidy_cap: i64,
    /// Monthly savings never exceed this fraction of the bill.
    pub savings_cap_ratio: f64,
    /// Tons of CO2 offset per installed kW per year.
    pub carbon_offset_tons_per_kw: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tariff_per_unit: 6.0,
            oversize_factor: 1.2,
            sqft_per_kw: 100.0,
            inverter_step_kw: 5,
            installation_rate_per_kw: 2500,
            misc_rate_per_kw: 1500,
            subsidy_rate: 0.30,
            subsidy_cap: 78_000,
            savings_cap_ratio: 0.95,
            carbon_offset_tons_per_kw: 1.4,
        }
    }
}

impl PricingConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            tariff_per_unit: env_parse("SOLAR_QUOTE_TARIFF", defaults.tariff_per_unit),
            oversize_factor: env_parse("SOLAR_QUOTE_OVERSIZE_FACTOR", defaults.oversize_factor),
            sqft_per_kw: env_parse("SOLAR_QUOTE_SQFT_PER_KW", defaults.sqft_per_kw),
            inverter_step_kw: env_parse("SOLAR_QUOTE_INVERTER_STEP_KW", defaults.inverter_step_kw),
            installation_rate_per_kw: env_parse(
                "SOLAR_QUOTE_INSTALLATION_RATE",
                defaults.installation_rate_per_kw,
            ),
            misc_rate_per_kw: env_parse("SOLAR_QUOTE_MISC_RATE", defaults.misc_rate_per_kw),
            subsidy_rate: env_parse("SOLAR_QUOTE_SUBSIDY_RATE", defaults.subsidy_rate),
            subsidy_cap: env_parse("SOLAR_QUOTE_SUBSIDY_CAP", defaults.subsidy_cap),
            savings_cap_ratio: env_parse("SOLAR_QUOTE_SAVINGS_CAP", defaults.savings_cap_ratio),
            carbon_offset_tons_per_kw: env_parse(
                "SOLAR_QUOTE_OFFSET_TONS_PER_KW",
                defaults.carbon_offset_tons_per_kw,
            ),
        }
    }
}

/// Company identity printed on every quotation.
#[derive(Debug, Clone)]
pub struct CompanyInfo {
    pub name: String,
    pub tagline: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

impl Default for CompanyInfo {
    fn default() -> Self {
        Self {
            name: "Suryashakti Solar Solutions".to_string(),
            tagline: "Rooftop solar, sized right".to_string(),
            address: "Plot 14, Industrial Estate, Guindy, Chennai 600032".to_string(),
            phone: "+91 44 4855 2200".to_string(),
            email: "quotes@suryashaktisolar.in".to_string(),
        }
    }
}

impl CompanyInfo {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            name: env_string("SOLAR_QUOTE_COMPANY_NAME", &defaults.name),
            tagline: env_string("SOLAR_QUOTE_COMPANY_TAGLINE", &defaults.tagline),
            address: env_string("SOLAR_QUOTE_COMPANY_ADDRESS", &defaults.address),
            phone: env_string("SOLAR_QUOTE_COMPANY_PHONE", &defaults.phone),
            email: env_string("SOLAR_QUOTE_COMPANY_EMAIL", &defaults.email),
        }
    }
}

/// Server- and materializer-level settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    /// Explicit Chrome/Chromium binary; autodetected when unset.
    pub chrome_path: Option<PathBuf>,
    /// Hard ceiling on a single render, documented as the materialization
    /// timeout. Expiry surfaces as MaterializationFailed, never as partial
    /// output.
    pub render_timeout_secs: u64,
    /// Concurrent browser launch slots; exceeding this fails fast.
    pub max_browser_instances: usize,
    /// Optional downstream URL that webhook payloads are forwarded to.
    pub webhook_forward_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            chrome_path: None,
            render_timeout_secs: 30,
            max_browser_instances: 4,
            webhook_forward_url: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_address: env_string("SOLAR_QUOTE_BIND", &defaults.bind_address),
            port: env_parse("SOLAR_QUOTE_PORT", defaults.port),
            chrome_path: env::var("SOLAR_QUOTE_CHROME_PATH").ok().map(PathBuf::from),
            render_timeout_secs: env_parse(
                "SOLAR_QUOTE_RENDER_TIMEOUT_SECS",
                defaults.render_timeout_secs,
            ),
            max_browser_instances: env_parse(
                "SOLAR_QUOTE_MAX_BROWSERS",
                defaults.max_browser_instances,
            ),
            webhook_forward_url: env::var("SOLAR_QUOTE_WEBHOOK_FORWARD_URL").ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pricing_defaults_match_published_rates() {
        let pricing = PricingConfig::default();
        assert_eq!(pricing.tariff_per_unit, 6.0);
        assert_eq!(pricing.subsidy_cap, 78_000);
        assert_eq!(pricing.subsidy_rate, 0.30);
        assert_eq!(pricing.inverter_step_kw, 5);
    }

    #[test]
    fn env_parse_falls_back_on_garbage() {
        std::env::set_var("SOLAR_QUOTE_TEST_GARBAGE", "not-a-number");
        let parsed: u16 = env_parse("SOLAR_QUOTE_TEST_GARBAGE", 42);
        assert_eq!(parsed, 42);
        std::env::remove_var("SOLAR_QUOTE_TEST_GARBAGE");
    }

    #[test]
    fn server_defaults_are_sane() {
        let server = ServerConfig::default();
        assert_eq!(server.port, 8080);
        assert!(server.render_timeout_secs > 0);
        assert!(server.max_browser_instances > 0);
    }
}
