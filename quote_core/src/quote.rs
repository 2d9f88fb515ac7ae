//! # Quote Data Structures
//!
//! Raw inputs, derived line items and the finalized quote snapshot.
//!
//! ## Structure
//!
//! ```text
//! QuoteRequest (caller input)
//! ├── quote_no, issue_date
//! ├── form: FormData (client, route, service, inclusions)
//! ├── items: Vec<ShipmentItemInput>
//! └── adjustments: Vec<QuoteAdjustment>
//!
//!          │ calculations::finalize_quote
//!          ▼
//!
//! SavedQuote (immutable)
//! ├── quote_no, issue_date, valid_until
//! ├── form: FormData (delivery country resolved)
//! ├── items: Vec<ShipmentItem> (derived fields populated)
//! └── totals: QuoteTotals
//! ```
//!
//! Optional form fields are `Option<String>`: `None` and blank strings are
//! both treated as absent when the document is composed.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Mode of service offered on a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceMode {
    #[serde(rename = "Sea Freight")]
    SeaFreight,
    #[serde(rename = "Air Freight")]
    AirFreight,
}

impl ServiceMode {
    pub const ALL: [ServiceMode; 2] = [ServiceMode::SeaFreight, ServiceMode::AirFreight];

    pub fn label(&self) -> &'static str {
        match self {
            ServiceMode::SeaFreight => "Sea Freight",
            ServiceMode::AirFreight => "Air Freight",
        }
    }
}

impl fmt::Display for ServiceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind of goods being shipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoodsType {
    #[serde(rename = "Personal Goods")]
    PersonalGoods,
    Commercial,
}

impl GoodsType {
    pub const ALL: [GoodsType; 2] = [GoodsType::PersonalGoods, GoodsType::Commercial];

    pub fn label(&self) -> &'static str {
        match self {
            GoodsType::PersonalGoods => "Personal Goods",
            GoodsType::Commercial => "Commercial",
        }
    }
}

impl fmt::Display for GoodsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Service add-ons a quote can include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Inclusion {
    #[serde(rename = "Door to door service")]
    DoorToDoor,
    Packing,
    #[serde(rename = "Customs clearance at Origin")]
    CustomsClearanceOrigin,
    #[serde(rename = "Customs clearance at Destination")]
    CustomsClearanceDestination,
    Insurance,
    Fumigation,
    #[serde(rename = "Certificate of Origin")]
    CertificateOfOrigin,
}

impl Inclusion {
    /// Every option, in the order they are offered.
    pub const ALL: [Inclusion; 7] = [
        Inclusion::DoorToDoor,
        Inclusion::Packing,
        Inclusion::CustomsClearanceOrigin,
        Inclusion::CustomsClearanceDestination,
        Inclusion::Insurance,
        Inclusion::Fumigation,
        Inclusion::CertificateOfOrigin,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Inclusion::DoorToDoor => "Door to door service",
            Inclusion::Packing => "Packing",
            Inclusion::CustomsClearanceOrigin => "Customs clearance at Origin",
            Inclusion::CustomsClearanceDestination => "Customs clearance at Destination",
            Inclusion::Insurance => "Insurance",
            Inclusion::Fumigation => "Fumigation",
            Inclusion::CertificateOfOrigin => "Certificate of Origin",
        }
    }
}

impl fmt::Display for Inclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shipment-level metadata collected from the quote form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub pickup_location: Option<String>,
    #[serde(default)]
    pub delivery_location: Option<String>,
    #[serde(default)]
    pub delivery_city: Option<String>,
    /// Filled from settings when the quote is finalized
    #[serde(default)]
    pub delivery_country: Option<String>,
    pub mode_of_service: ServiceMode,
    pub type_of_goods: GoodsType,
    /// Free text estimate, e.g. "25-30 days"
    #[serde(default)]
    pub transit_time: Option<String>,
    #[serde(default)]
    pub inclusions: Vec<Inclusion>,
}

impl FormData {
    /// Form with only the required enumerations set.
    pub fn new(mode_of_service: ServiceMode, type_of_goods: GoodsType) -> Self {
        FormData {
            name: None,
            contact_number: None,
            email: None,
            pickup_location: None,
            delivery_location: None,
            delivery_city: None,
            delivery_country: None,
            mode_of_service,
            type_of_goods,
            transit_time: None,
            inclusions: Vec::new(),
        }
    }

    /// Copy of this form with `country` filled in when no country was given.
    pub fn with_default_country(mut self, country: &str) -> Self {
        if present(&self.delivery_country).is_none() {
            self.delivery_country = Some(country.to_string());
        }
        self
    }
}

/// Returns the field's text if it is set and not blank.
pub fn present(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// One line item as entered, before any derived figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentItemInput {
    #[serde(default)]
    pub description: String,
    pub length_cm: f64,
    pub breadth_cm: f64,
    pub height_cm: f64,
    /// Scale weight of one piece
    pub actual_weight_kg: f64,
    pub quantity: f64,
    pub rate_per_kg: f64,
    #[serde(default)]
    pub packing_charge: f64,
    #[serde(default)]
    pub handling_charge: f64,
    #[serde(default)]
    pub duty: f64,
}

impl ShipmentItemInput {
    /// Item with the given dimensions and rate and no flat charges.
    pub fn new(
        description: impl Into<String>,
        (length_cm, breadth_cm, height_cm): (f64, f64, f64),
        actual_weight_kg: f64,
        quantity: f64,
        rate_per_kg: f64,
    ) -> Self {
        ShipmentItemInput {
            description: description.into(),
            length_cm,
            breadth_cm,
            height_cm,
            actual_weight_kg,
            quantity,
            rate_per_kg,
            packing_charge: 0.0,
            handling_charge: 0.0,
            duty: 0.0,
        }
    }

    /// Set the packing, handling and duty amounts.
    pub fn with_charges(mut self, packing: f64, handling: f64, duty: f64) -> Self {
        self.packing_charge = packing;
        self.handling_charge = handling;
        self.duty = duty;
        self
    }
}

/// A line item with every derived figure populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentItem {
    /// 1-based position in the quote
    pub item_number: usize,
    pub description: String,
    pub length_cm: f64,
    pub breadth_cm: f64,
    pub height_cm: f64,
    pub quantity: f64,
    pub rate_per_kg: f64,
    pub actual_weight_kg: f64,
    pub volumetric_weight_kg: f64,
    /// max(actual, volumetric)
    pub billed_weight_kg: f64,
    /// billed weight × quantity × rate
    pub freight_charge: f64,
    pub packing_charge: f64,
    pub handling_charge: f64,
    pub duty: f64,
    pub line_total: f64,
}

/// A labelled quote-level amount (tax, discount, surcharge).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteAdjustment {
    pub label: String,
    /// Added to the subtotal; negative for discounts
    pub amount: f64,
}

/// Aggregate figures for a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteTotals {
    pub subtotal: f64,
    #[serde(default)]
    pub adjustments: Vec<QuoteAdjustment>,
    pub grand_total: f64,
}

/// Everything needed to produce a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub quote_no: String,
    pub issue_date: NaiveDate,
    pub form: FormData,
    pub items: Vec<ShipmentItemInput>,
    #[serde(default)]
    pub adjustments: Vec<QuoteAdjustment>,
}

/// A finalized quote. Produced once by the calculation engine and only read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedQuote {
    pub quote_no: String,
    pub issue_date: NaiveDate,
    pub valid_until: NaiveDate,
    pub form: FormData,
    pub items: Vec<ShipmentItem>,
    pub totals: QuoteTotals,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_labels_match_serialized_names() {
        for mode in ServiceMode::ALL {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode.label()));
        }
        for goods in GoodsType::ALL {
            let json = serde_json::to_string(&goods).unwrap();
            assert_eq!(json, format!("\"{}\"", goods.label()));
        }
        for inclusion in Inclusion::ALL {
            let json = serde_json::to_string(&inclusion).unwrap();
            assert_eq!(json, format!("\"{}\"", inclusion.label()));
        }
    }

    #[test]
    fn test_form_data_optional_fields_default_to_none() {
        let json = r#"{ "mode_of_service": "Air Freight", "type_of_goods": "Commercial" }"#;
        let form: FormData = serde_json::from_str(json).unwrap();
        assert_eq!(form, FormData::new(ServiceMode::AirFreight, GoodsType::Commercial));
    }

    #[test]
    fn test_default_country_only_fills_blank() {
        let form = FormData::new(ServiceMode::SeaFreight, GoodsType::PersonalGoods)
            .with_default_country("India");
        assert_eq!(form.delivery_country.as_deref(), Some("India"));

        let mut form = FormData::new(ServiceMode::SeaFreight, GoodsType::PersonalGoods);
        form.delivery_country = Some("Canada".to_string());
        let form = form.with_default_country("India");
        assert_eq!(form.delivery_country.as_deref(), Some("Canada"));

        let mut form = FormData::new(ServiceMode::SeaFreight, GoodsType::PersonalGoods);
        form.delivery_country = Some("  ".to_string());
        let form = form.with_default_country("India");
        assert_eq!(form.delivery_country.as_deref(), Some("India"));
    }

    #[test]
    fn test_present_filters_blank() {
        assert_eq!(present(&None), None);
        assert_eq!(present(&Some(String::new())), None);
        assert_eq!(present(&Some(" Dubai ".to_string())), Some("Dubai"));
    }

    #[test]
    fn test_item_input_charges_default_to_zero() {
        let json = r#"{
            "description": "Boxes",
            "length_cm": 50, "breadth_cm": 40, "height_cm": 30,
            "actual_weight_kg": 12.5, "quantity": 2, "rate_per_kg": 8.0
        }"#;
        let item: ShipmentItemInput = serde_json::from_str(json).unwrap();
        assert_eq!(item.packing_charge, 0.0);
        assert_eq!(item.handling_charge, 0.0);
        assert_eq!(item.duty, 0.0);
    }
}
