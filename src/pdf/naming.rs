//! Attachment filename derivation.

use chrono::NaiveDate;

/// Slug a free-text name for use in a filename. Non-alphanumeric runs
/// collapse to single dashes; an empty result falls back to `fallback`.
pub fn sanitize_filename(name: &str, fallback: &str) -> String {
    let mut result = String::new();
    let mut last_dash = false;

    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            result.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            if !last_dash && !result.is_empty() {
                result.push('-');
                last_dash = true;
            }
        }
    }

    let trimmed = result.trim_matches('-');
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Download filename for a quotation PDF, derived from the customer name
/// and the generation date.
pub fn attachment_filename(customer_name: &str, date: NaiveDate) -> String {
    format!(
        "solar-quotation-{}-{}.pdf",
        sanitize_filename(customer_name, "customer"),
        date.format("%Y%m%d")
    )
}
