//! # Quote Calculations
//!
//! The calculation engine: pure functions that turn a [`QuoteRequest`] into
//! a [`SavedQuote`]. Nothing here performs I/O or keeps state, so the same
//! request always yields the same quote.
//!
//! - [`item`] - Per-item weights and charges
//! - [`totals`] - Subtotal, adjustments and grand total
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use quote_core::calculations::finalize_quote;
//! use quote_core::quote::{FormData, GoodsType, QuoteRequest, ServiceMode, ShipmentItemInput};
//! use quote_core::settings::QuoteSettings;
//!
//! let request = QuoteRequest {
//!     quote_no: "Q-2024-001".to_string(),
//!     issue_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!     form: FormData::new(ServiceMode::AirFreight, GoodsType::Commercial),
//!     items: vec![ShipmentItemInput::new("Carton", (10.0, 10.0, 10.0), 5.0, 1.0, 20.0)],
//!     adjustments: vec![],
//! };
//!
//! let quote = finalize_quote(&request, &QuoteSettings::default()).unwrap();
//! assert_eq!(quote.valid_until, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
//! assert_eq!(quote.totals.grand_total, 100.0);
//! ```

pub mod item;
pub mod totals;

use chrono::{Days, NaiveDate};

use crate::errors::{QuoteError, QuoteResult};
use crate::quote::{QuoteRequest, SavedQuote, ShipmentItem, ShipmentItemInput};
use crate::settings::QuoteSettings;

// Re-export commonly used functions
pub use item::{billed_weight_kg, calculate_item, volumetric_weight_kg};
pub use totals::calculate_totals;

/// Calculate every item, numbering them 1, 2, 3... in input order.
///
/// Fails on the first invalid item; no partial list is returned.
pub fn calculate_items(inputs: &[ShipmentItemInput], divisor: f64) -> QuoteResult<Vec<ShipmentItem>> {
    inputs
        .iter()
        .enumerate()
        .map(|(i, input)| calculate_item(i + 1, input, divisor))
        .collect()
}

/// Last day the quote is valid: issue date plus the validity window.
pub fn validity_deadline(issue_date: NaiveDate, validity_days: u32) -> QuoteResult<NaiveDate> {
    issue_date
        .checked_add_days(Days::new(u64::from(validity_days)))
        .ok_or_else(|| {
            QuoteError::invalid_input(
                "issue_date",
                issue_date.to_string(),
                format!("Adding {} days overflows the calendar", validity_days),
            )
        })
}

/// Run the calculation engine over a request and freeze the result.
///
/// Applies the configured default country, computes the validity deadline,
/// derives every item and aggregates the totals.
pub fn finalize_quote(request: &QuoteRequest, settings: &QuoteSettings) -> QuoteResult<SavedQuote> {
    settings.validate("settings")?;

    let items = calculate_items(&request.items, settings.volumetric_divisor)?;
    let totals = calculate_totals(&items, &request.adjustments)?;
    let valid_until = validity_deadline(request.issue_date, settings.validity_days)?;

    tracing::debug!(
        quote_no = %request.quote_no,
        items = items.len(),
        subtotal = totals.subtotal,
        grand_total = totals.grand_total,
        "quote calculated"
    );

    Ok(SavedQuote {
        quote_no: request.quote_no.clone(),
        issue_date: request.issue_date,
        valid_until,
        form: request.form.clone().with_default_country(&settings.default_country),
        items,
        totals,
    })
}
