//! Quotation document renderer.
//!
//! A pure function from [`QuotationRecord`] to a self-contained HTML
//! document: one inline stylesheet, no scripts, no external assets, so the
//! PDF backends never depend on the network being reachable. Rendering the
//! same record twice yields byte-identical markup.
//!
//! HTML is generated with [maud](https://maud.lambda.xyz/): templates are
//! type-checked Rust and interpolation is escaped by default.

pub mod format;

use maud::{html, Markup, PreEscaped, DOCTYPE};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::CompanyInfo;
use crate::quotation::models::QuotationRecord;
use format::{format_display_date, format_inr};

const STYLE: &str = include_str!("style.css");

/// Fixed marker substituted for personal fields in the sample variant.
const REDACTION_MARKER: &str = "********";

/// Which document variant to produce. Caller-selected, never inferred.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentVariant {
    /// Compact preview with customer personal fields masked.
    Sample,
    /// Full quotation with all customer fields populated.
    #[default]
    Detailed,
}

/// Render the quotation into a complete HTML document.
pub fn render_quotation(
    record: &QuotationRecord,
    company: &CompanyInfo,
    variant: DocumentVariant,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Solar Quotation " (record.quotation_number) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                (company_header(company))
                (document_meta(record))
                (customer_block(record, variant))
                (system_block(record))
                (cost_table(record))
                (savings_block(record))
                (terms_block())
                (signature_block(company))
                (footer_block(company, record))
            }
        }
    }
}

fn company_header(company: &CompanyInfo) -> Markup {
    html! {
        header.company {
            div {
                h1 { (company.name) }
                p.tagline { (company.tagline) }
            }
            div.contact {
                p { (company.address) }
                p { (company.phone) " · " (company.email) }
            }
        }
    }
}

fn document_meta(record: &QuotationRecord) -> Markup {
    html! {
        div.doc-meta {
            span { "Quotation No. " span.number { (record.quotation_number) } }
            span { "Date: " (format_display_date(&record.generated_at)) }
        }
    }
}

fn personal<'a>(value: &'a str, variant: DocumentVariant) -> &'a str {
    match variant {
        DocumentVariant::Sample => REDACTION_MARKER,
        DocumentVariant::Detailed => value,
    }
}

fn customer_block(record: &QuotationRecord, variant: DocumentVariant) -> Markup {
    let customer = &record.customer;
    html! {
        section {
            h2 { "Prepared For" }
            dl.pairs {
                dt { "Name" }
                dd { (personal(&customer.name, variant)) }
                dt { "Phone" }
                dd { (personal(&customer.phone, variant)) }
                dt { "Email" }
                dd { (personal(&customer.email, variant)) }
                dt { "Site Address" }
                dd { (personal(&customer.address, variant)) }
            }
        }
    }
}

fn system_block(record: &QuotationRecord) -> Markup {
    let input = &record.input;
    let sizing = &record.sizing;
    let selection = &record.selection;
    html! {
        section {
            h2 { "Recommended System" }
            dl.pairs {
                dt { "System capacity" }
                dd { (sizing.recommended_size_kw) " kW " (input.system_type.label()) }
                dt { "Location" }
                dd {
                    (input.location.name)
                    " (" (fmt1(input.location.average_sun_hours)) " sun hours/day)"
                }
                dt { "Roof area available" }
                dd { (fmt0(input.roof_area_sqft)) " sq ft" }
                dt { "Estimated generation" }
                dd {
                    (fmt1(sizing.daily_generation_kwh)) " kWh/day · "
                    (fmt1(sizing.monthly_generation_kwh)) " kWh/month"
                }
                dt { "Solar panels" }
                dd { (component_line(&selection.panel.display_label, selection.panel.warranty_years)) }
                dt { "Inverter" }
                dd { (component_line(&selection.inverter.display_label, selection.inverter.warranty_years)) }
                dt { "Wiring" }
                dd { (component_line(&selection.wiring.display_label, selection.wiring.warranty_years)) }
            }
        }
    }
}

fn component_line(label: &str, warranty_years: u32) -> String {
    format!("{label} ({warranty_years}-year warranty)")
}

fn cost_table(record: &QuotationRecord) -> Markup {
    let cost = &record.cost;
    let items = [
        ("Solar panels", cost.panel_cost),
        ("Inverter", cost.inverter_cost),
        ("Wiring and cabling", cost.wiring_cost),
        ("Installation and commissioning", cost.installation_cost),
        ("Mounting, earthing and other material", cost.other_cost),
    ];
    html! {
        section {
            h2 { "Cost Breakdown" }
            table.items {
                thead {
                    tr {
                        th { "Item" }
                        th.amount { "Amount" }
                    }
                }
                tbody {
                    @for (label, amount) in &items {
                        tr {
                            td { (label) }
                            td.amount { (rupees(*amount)) }
                        }
                    }
                    tr.total {
                        td { "Total system cost" }
                        td.amount { (rupees(cost.total_cost)) }
                    }
                    tr {
                        td { "Government subsidy" }
                        td.amount { "− " (rupees(cost.subsidy_amount)) }
                    }
                    tr.net {
                        td { "Net payable" }
                        td.amount { (rupees(cost.net_payable)) }
                    }
                }
            }
        }
    }
}

fn savings_block(record: &QuotationRecord) -> Markup {
    let cost = &record.cost;
    html! {
        section {
            h2 { "Projected Savings" }
            div.savings {
                div.cell {
                    div.value { (rupees(cost.monthly_savings)) }
                    div.label { "per month" }
                }
                div.cell {
                    div.value { (rupees(cost.yearly_savings)) }
                    div.label { "per year" }
                }
                div.cell {
                    div.value { (fmt1(cost.payback_years)) " years" }
                    div.label { "payback period" }
                }
                div.cell {
                    div.value { (fmt2(cost.carbon_offset_tons_per_year)) " t" }
                    div.label { "CO2 offset / year" }
                }
            }
        }
    }
}

fn terms_block() -> Markup {
    html! {
        section {
            h2 { "Terms" }
            ol.terms {
                li { "This quotation is valid for 30 days from the date above." }
                li { "Subsidy disbursal is subject to approval by the distribution company and the national portal." }
                li { "Prices include material, transport, installation and commissioning at the site address." }
                li { "Net metering application charges, if levied by the utility, are payable by the customer." }
                li { "Generation figures are estimates based on location averages and panel orientation; actual output varies with weather and shading." }
            }
        }
    }
}

fn signature_block(company: &CompanyInfo) -> Markup {
    html! {
        div.signatures {
            div.line { "Customer acceptance" }
            div.line { "For " (company.name) " · Authorised signatory" }
        }
    }
}

fn footer_block(company: &CompanyInfo, record: &QuotationRecord) -> Markup {
    html! {
        footer {
            (company.name) " · " (company.address) " · " (company.email)
            " · Quotation " (record.quotation_number)
        }
    }
}

fn rupees(amount: i64) -> String {
    format!("₹ {}", format_inr(amount))
}

fn fmt0(value: f64) -> String {
    format!("{value:.0}")
}

fn fmt1(value: f64) -> String {
    format!("{value:.1}")
}

fn fmt2(value: f64) -> String {
    format!("{value:.2}")
}
