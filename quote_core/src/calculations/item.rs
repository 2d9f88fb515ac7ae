//! # Line Item Calculation
//!
//! Derives weights and charges for a single shipment item.
//!
//! ## Formulas
//!
//! - Volumetric weight = L × B × H / divisor (cm in, kg out)
//! - Billed weight = max(actual, volumetric)
//! - Freight charge = billed weight × quantity × rate per kg
//! - Line total = freight charge + packing + handling + duty
//!
//! ## Example
//!
//! ```rust
//! use quote_core::calculations::item::calculate_item;
//! use quote_core::quote::ShipmentItemInput;
//!
//! let input = ShipmentItemInput::new("Carton", (10.0, 10.0, 10.0), 5.0, 1.0, 4.0);
//! let item = calculate_item(1, &input, 5000.0).unwrap();
//!
//! assert!((item.volumetric_weight_kg - 0.2).abs() < 1e-12);
//! assert_eq!(item.billed_weight_kg, 5.0);
//! assert_eq!(item.line_total, 20.0);
//! ```

use crate::errors::{QuoteError, QuoteResult};
use crate::quote::{ShipmentItem, ShipmentItemInput};

/// Volumetric (dimensional) weight in kg.
pub fn volumetric_weight_kg(length_cm: f64, breadth_cm: f64, height_cm: f64, divisor: f64) -> f64 {
    (length_cm * breadth_cm * height_cm) / divisor
}

/// Weight the carrier bills: whichever of mass and volume is larger.
pub fn billed_weight_kg(actual_weight_kg: f64, volumetric_weight_kg: f64) -> f64 {
    actual_weight_kg.max(volumetric_weight_kg)
}

impl ShipmentItemInput {
    /// Validate input values. `index` is the 0-based position, used in field paths.
    pub fn validate(&self, index: usize) -> QuoteResult<()> {
        let fields = [
            ("length_cm", self.length_cm),
            ("breadth_cm", self.breadth_cm),
            ("height_cm", self.height_cm),
            ("actual_weight_kg", self.actual_weight_kg),
            ("quantity", self.quantity),
            ("rate_per_kg", self.rate_per_kg),
            ("packing_charge", self.packing_charge),
            ("handling_charge", self.handling_charge),
            ("duty", self.duty),
        ];

        for (name, value) in fields {
            if !value.is_finite() {
                return Err(QuoteError::invalid_input(
                    format!("items[{}].{}", index, name),
                    value.to_string(),
                    "Value must be a finite number",
                ));
            }
            if value < 0.0 {
                return Err(QuoteError::invalid_input(
                    format!("items[{}].{}", index, name),
                    value.to_string(),
                    "Value must not be negative",
                ));
            }
        }
        Ok(())
    }
}

/// Calculate one line item.
///
/// # Arguments
///
/// * `item_number` - 1-based position of the item in the quote
/// * `input` - Raw item values
/// * `divisor` - Volumetric divisor (see [`crate::settings::QuoteSettings`])
///
/// # Returns
///
/// * `Ok(ShipmentItem)` - Item with derived fields populated
/// * `Err(QuoteError::InvalidInput)` - A value is negative or not finite
pub fn calculate_item(item_number: usize, input: &ShipmentItemInput, divisor: f64) -> QuoteResult<ShipmentItem> {
    input.validate(item_number.saturating_sub(1))?;

    let volumetric = volumetric_weight_kg(input.length_cm, input.breadth_cm, input.height_cm, divisor);
    let billed = billed_weight_kg(input.actual_weight_kg, volumetric);
    let freight_charge = billed * input.quantity * input.rate_per_kg;
    let line_total = freight_charge + input.packing_charge + input.handling_charge + input.duty;

    Ok(ShipmentItem {
        item_number,
        description: input.description.clone(),
        length_cm: input.length_cm,
        breadth_cm: input.breadth_cm,
        height_cm: input.height_cm,
        quantity: input.quantity,
        rate_per_kg: input.rate_per_kg,
        actual_weight_kg: input.actual_weight_kg,
        volumetric_weight_kg: volumetric,
        billed_weight_kg: billed,
        freight_charge,
        packing_charge: input.packing_charge,
        handling_charge: input.handling_charge,
        duty: input.duty,
        line_total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_input() -> ShipmentItemInput {
        ShipmentItemInput::new("Household goods", (120.0, 80.0, 100.0), 150.0, 2.0, 3.5)
            .with_charges(40.0, 25.0, 10.0)
    }

    #[test]
    fn test_volumetric_weight() {
        // 10 × 10 × 10 / 5000 = 0.2 kg
        assert_eq!(volumetric_weight_kg(10.0, 10.0, 10.0, 5000.0), 1000.0 / 5000.0);
        // 120 × 80 × 100 / 5000 = 192 kg
        assert!((volumetric_weight_kg(120.0, 80.0, 100.0, 5000.0) - 192.0).abs() < 1e-9);
    }

    #[test]
    fn test_actual_weight_governs() {
        let input = ShipmentItemInput::new("Dense", (10.0, 10.0, 10.0), 5.0, 1.0, 1.0);
        let item = calculate_item(1, &input, 5000.0).unwrap();
        assert!((item.volumetric_weight_kg - 0.2).abs() < 1e-12);
        assert_eq!(item.billed_weight_kg, 5.0);
    }

    #[test]
    fn test_volumetric_weight_governs() {
        let item = calculate_item(1, &test_input(), 5000.0).unwrap();
        // volumetric 192 > actual 150
        assert!((item.billed_weight_kg - 192.0).abs() < 1e-9);
        assert_eq!(item.billed_weight_kg, item.actual_weight_kg.max(item.volumetric_weight_kg));
    }

    #[test]
    fn test_line_total() {
        let item = calculate_item(1, &test_input(), 5000.0).unwrap();
        // 192 × 2 × 3.5 = 1344, + 40 + 25 + 10 = 1419
        assert!((item.freight_charge - 1344.0).abs() < 1e-9);
        assert!((item.line_total - 1419.0).abs() < 1e-9);
    }

    #[test]
    fn test_divisor_changes_volumetric_weight() {
        let item = calculate_item(1, &test_input(), 6000.0).unwrap();
        // 960000 / 6000 = 160 kg, still above actual 150
        assert!((item.volumetric_weight_kg - 160.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_quantity_keeps_flat_charges() {
        let mut input = test_input();
        input.quantity = 0.0;
        let item = calculate_item(1, &input, 5000.0).unwrap();
        assert_eq!(item.freight_charge, 0.0);
        assert!((item.line_total - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_dimension_rejected() {
        let mut input = test_input();
        input.breadth_cm = -1.0;
        let err = calculate_item(3, &input, 5000.0).unwrap_err();
        match err {
            QuoteError::InvalidInput { field, .. } => assert_eq!(field, "items[2].breadth_cm"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let mut input = test_input();
        input.rate_per_kg = f64::NAN;
        assert!(calculate_item(1, &input, 5000.0).is_err());

        let mut input = test_input();
        input.quantity = f64::INFINITY;
        assert!(calculate_item(1, &input, 5000.0).is_err());
    }

    #[test]
    fn test_negative_charge_rejected() {
        let input = test_input().with_charges(0.0, -5.0, 0.0);
        assert_eq!(
            calculate_item(1, &input, 5000.0).unwrap_err().error_code(),
            "INVALID_INPUT"
        );
    }
}
