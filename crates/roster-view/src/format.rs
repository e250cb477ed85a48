//! Display formatting for dates and amounts

use chrono::NaiveDate;

/// Shown where a company has no founding date
pub const UNKNOWN: &str = "Unknown";

/// Day, short month, year: `15 May 2010`
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

/// Whole units with thousands separators: `2,500,000`
///
/// Fractions round half away from zero. Non-finite values render as `n/a`.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return "n/a".to_string();
    }
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
