//! # quote_core - Freight Quotation Engine
//!
//! `quote_core` turns a customer's shipment description into a priced
//! quotation document. All inputs and outputs are JSON-serializable, so the
//! engine can sit behind a form, a CLI or an API without adapters.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Calculation is a pure function of request and settings
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Canvas-agnostic**: Layout is computed once and drawn through a trait
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use quote_core::{compose_quote, finalize_quote, QuoteSettings, RecordingCanvas};
//! use quote_core::quote::{FormData, GoodsType, QuoteRequest, ServiceMode, ShipmentItemInput};
//!
//! let settings = QuoteSettings::default();
//! let request = QuoteRequest {
//!     quote_no: "Q-2024-001".to_string(),
//!     issue_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!     form: FormData::new(ServiceMode::AirFreight, GoodsType::Commercial),
//!     items: vec![ShipmentItemInput::new("Carton", (40.0, 30.0, 30.0), 6.0, 2.0, 12.0)],
//!     adjustments: vec![],
//! };
//!
//! let quote = finalize_quote(&request, &settings).unwrap();
//! let mut canvas = RecordingCanvas::default();
//! compose_quote(&quote, &settings, &mut canvas).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`quote`] - Form data, items, totals and the saved quote
//! - [`calculations`] - Weights, charges, totals and validity
//! - [`composer`] - Page layout and artifact export
//! - [`canvas`] - Drawing surface trait, PDF and recording canvases
//! - [`format`] - Number, date and currency display
//! - [`settings`] - Business constants and branding, loadable from TOML
//! - [`errors`] - Structured error types
//! - [`file_io`] - Request loading and atomic artifact writes

pub mod calculations;
pub mod canvas;
pub mod composer;
pub mod errors;
pub mod file_io;
pub mod format;
pub mod quote;
pub mod settings;

// Re-export commonly used types at crate root for convenience
pub use calculations::finalize_quote;
pub use canvas::{Canvas, RecordingCanvas, TypstCanvas};
pub use composer::{compose_quote, export_quote, QuoteLayout};
pub use errors::{QuoteError, QuoteResult};
pub use file_io::{load_request, write_artifact};
pub use quote::{QuoteRequest, SavedQuote};
pub use settings::QuoteSettings;
