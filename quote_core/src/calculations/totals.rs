//! # Quote Totals
//!
//! Aggregates line totals into the subtotal and applies quote-level
//! adjustments to reach the grand total. Amounts keep full `f64`
//! precision; rounding is left to the formatter.

use crate::errors::{QuoteError, QuoteResult};
use crate::quote::{QuoteAdjustment, QuoteTotals, ShipmentItem};

/// Sum line totals and apply adjustments.
///
/// With no adjustments the grand total equals the subtotal.
///
/// # Example
///
/// ```rust
/// use quote_core::calculations::item::calculate_item;
/// use quote_core::calculations::totals::calculate_totals;
/// use quote_core::quote::ShipmentItemInput;
///
/// let a = calculate_item(1, &ShipmentItemInput::new("A", (1.0, 1.0, 1.0), 10.0, 1.0, 10.0), 5000.0).unwrap();
/// let b = calculate_item(2, &ShipmentItemInput::new("B", (1.0, 1.0, 1.0), 50.0, 1.0, 5.01), 5000.0).unwrap();
///
/// let totals = calculate_totals(&[a, b], &[]).unwrap();
/// assert!((totals.subtotal - 350.5).abs() < 1e-6);
/// assert_eq!(totals.grand_total, totals.subtotal);
/// ```
pub fn calculate_totals(items: &[ShipmentItem], adjustments: &[QuoteAdjustment]) -> QuoteResult<QuoteTotals> {
    for (i, adjustment) in adjustments.iter().enumerate() {
        if !adjustment.amount.is_finite() {
            return Err(QuoteError::invalid_input(
                format!("adjustments[{}].amount", i),
                adjustment.amount.to_string(),
                "Adjustment must be a finite number",
            ));
        }
    }

    let subtotal: f64 = items.iter().map(|item| item.line_total).sum();
    let adjustment_sum: f64 = adjustments.iter().map(|a| a.amount).sum();

    Ok(QuoteTotals {
        subtotal,
        adjustments: adjustments.to_vec(),
        grand_total: subtotal + adjustment_sum,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::item::calculate_item;
    use crate::quote::ShipmentItemInput;

    /// Item whose line total is exactly `total` (1 kg billed at `total` per kg).
    fn item_with_total(n: usize, total: f64) -> ShipmentItem {
        let input = ShipmentItemInput::new(format!("Item {}", n), (1.0, 1.0, 1.0), 1.0, 1.0, total);
        calculate_item(n, &input, 5000.0).unwrap()
    }

    #[test]
    fn test_subtotal_is_sum_of_line_totals() {
        let items = vec![item_with_total(1, 100.0), item_with_total(2, 250.5)];
        let totals = calculate_totals(&items, &[]).unwrap();
        assert!((totals.subtotal - 350.5).abs() < 1e-6);
        assert!((totals.grand_total - 350.5).abs() < 1e-6);
        assert!(totals.adjustments.is_empty());
    }

    #[test]
    fn test_empty_items_total_zero() {
        let totals = calculate_totals(&[], &[]).unwrap();
        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.grand_total, 0.0);
    }

    #[test]
    fn test_order_does_not_change_totals() {
        let forward = vec![item_with_total(1, 0.1), item_with_total(2, 0.2), item_with_total(3, 0.3)];
        let reversed: Vec<ShipmentItem> = forward.iter().rev().cloned().collect();

        let a = calculate_totals(&forward, &[]).unwrap();
        let b = calculate_totals(&reversed, &[]).unwrap();
        assert!((a.subtotal - b.subtotal).abs() < 1e-6);
        assert!((a.grand_total - b.grand_total).abs() < 1e-6);
    }

    #[test]
    fn test_adjustments_applied_to_grand_total() {
        let items = vec![item_with_total(1, 200.0)];
        let adjustments = vec![
            QuoteAdjustment { label: "VAT 5%".to_string(), amount: 10.0 },
            QuoteAdjustment { label: "Loyalty discount".to_string(), amount: -15.0 },
        ];
        let totals = calculate_totals(&items, &adjustments).unwrap();
        assert!((totals.subtotal - 200.0).abs() < 1e-9);
        assert!((totals.grand_total - 195.0).abs() < 1e-9);
        assert_eq!(totals.adjustments, adjustments);
    }

    #[test]
    fn test_non_negative_adjustments_keep_grand_total_above_subtotal() {
        let items = vec![item_with_total(1, 42.0)];
        let adjustments = vec![QuoteAdjustment { label: "Fuel surcharge".to_string(), amount: 3.0 }];
        let totals = calculate_totals(&items, &adjustments).unwrap();
        assert!(totals.grand_total >= totals.subtotal);
    }

    #[test]
    fn test_nan_adjustment_rejected() {
        let adjustments = vec![QuoteAdjustment { label: "Bad".to_string(), amount: f64::NAN }];
        let err = calculate_totals(&[], &adjustments).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
