//! # Display Formatting
//!
//! All rounding happens here. The engine carries full precision and the
//! composer turns numbers into text only through these functions.

use chrono::NaiveDate;

/// Fixed two-decimal rendering, e.g. `1234.5` → `"1234.50"`.
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

/// Weight cell text, e.g. `"12.00 kg"`.
pub fn format_weight(kg: f64) -> String {
    format!("{:.2} kg", kg)
}

/// Dimension cell text, e.g. `"120x80x100 cm"`. Whole numbers print without decimals.
pub fn format_dimensions(length_cm: f64, breadth_cm: f64, height_cm: f64) -> String {
    format!("{}x{}x{} cm", length_cm, breadth_cm, height_cm)
}

/// Quantity as entered; `2.0` prints as `2`.
pub fn format_quantity(quantity: f64) -> String {
    quantity.to_string()
}

/// Date as `DD/MM/YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Currency rendering used for every total on the document.
///
/// Rounds to two decimals, groups thousands and prefixes the currency code:
/// `format_currency(1234.5, "AED")` → `"AED 1,234.50"`.
pub fn format_currency(amount: f64, currency: &str) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // "-0.00" would read oddly, so only non-zero rounded values carry a sign
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{} {}.{}", sign, currency, grouped, fraction)
}
