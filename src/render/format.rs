//! Display formatting for the quotation document.
//!
//! Currency uses Indian-system digit grouping (last three digits, then
//! pairs) with no fractional part. Rounding happened upstream in the cost
//! engine; these functions only format.

use chrono::{DateTime, Datelike, Local};

/// Format whole rupees with Indian grouping: 140000 → "1,40,000".
pub fn format_inr(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let n = digits.len();
    let mut out = String::with_capacity(n + n / 2 + 1);
    if amount < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 {
            let remaining = n - i;
            if remaining == 3 || (remaining > 3 && (remaining - 3) % 2 == 0) {
                out.push(',');
            }
        }
        out.push(ch);
    }
    out
}

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Human date for the document header, e.g. "7 August 2026".
pub fn format_display_date(date: &DateTime<Local>) -> String {
    let month = MONTHS[(date.month0() as usize).min(MONTHS.len() - 1)];
    format!("{} {} {}", date.day(), month, date.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn indian_grouping() {
        assert_eq!(format_inr(0), "0");
        assert_eq!(format_inr(100), "100");
        assert_eq!(format_inr(1_000), "1,000");
        assert_eq!(format_inr(78_000), "78,000");
        assert_eq!(format_inr(140_000), "1,40,000");
        assert_eq!(format_inr(1_234_567), "12,34,567");
        assert_eq!(format_inr(10_000_000), "1,00,00,000");
    }

    #[test]
    fn negative_amounts_keep_the_sign() {
        assert_eq!(format_inr(-140_000), "-1,40,000");
    }

    #[test]
    fn display_date() {
        let date = Local.with_ymd_and_hms(2026, 8, 7, 9, 30, 0).unwrap();
        assert_eq!(format_display_date(&date), "7 August 2026");
    }
}
