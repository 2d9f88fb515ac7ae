//! # Quotation Document Composer
//!
//! Lays a [`SavedQuote`] out on a single page of a [`Canvas`] and exports the
//! result as `Quotation-<quote no>.<ext>`.
//!
//! ## Layout
//!
//! All positions are in millimetres from the top-left corner. Everything is
//! at a fixed position except the item table and the totals below it:
//!
//! ```text
//!  20  VOXAREL
//!  28  company contact lines                        QUOTATION   35
//!                                                  Quote #: …   45
//!                                                     Date: …   50
//!                                              Valid Until: …   55
//!  70  ────────────────────────────────────────────────────────
//!  80  BILL TO:                    SHIPMENT INFO:
//!  86  client lines                shipment lines
//! 105  INCLUSIONS:                 (only when inclusions exist)
//! 111  • …
//!      ┌ item table ┐  starts at 111 + inclusions height + 5, else 115
//!      └────────────┘  end reported by the canvas
//! +10                              Subtotal:   AED …
//! +10                           Grand Total:   AED …
//!
//! H-30 ────────────────────────────────────────────────────────  (footer)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use quote_core::calculations::finalize_quote;
//! use quote_core::canvas::RecordingCanvas;
//! use quote_core::composer::compose_quote;
//! use quote_core::quote::{FormData, GoodsType, QuoteRequest, ServiceMode, ShipmentItemInput};
//! use quote_core::settings::QuoteSettings;
//!
//! let settings = QuoteSettings::default();
//! let quote = finalize_quote(
//!     &QuoteRequest {
//!         quote_no: "Q-7".to_string(),
//!         issue_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
//!         form: FormData::new(ServiceMode::SeaFreight, GoodsType::PersonalGoods),
//!         items: vec![ShipmentItemInput::new("Crate", (100.0, 100.0, 100.0), 80.0, 1.0, 3.0)],
//!         adjustments: vec![],
//!     },
//!     &settings,
//! )
//! .unwrap();
//!
//! let mut canvas = RecordingCanvas::default();
//! let layout = compose_quote(&quote, &settings, &mut canvas).unwrap();
//! assert_eq!(layout.table.start_y, 115.0);
//! assert_eq!(layout.subtotal_y, layout.table.end_y + 10.0);
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::canvas::{Align, Canvas, LineStyle, Point, Rgb, TableColumn, TableExtent, TableSpec, TextStyle};
use crate::errors::{QuoteError, QuoteResult};
use crate::file_io::write_artifact;
use crate::format::{
    format_amount, format_currency, format_date, format_dimensions, format_quantity, format_weight,
};
use crate::quote::{present, FormData, Inclusion, SavedQuote, ShipmentItem};
use crate::settings::QuoteSettings;

// ============================================================================
// Layout constants (mm)
// ============================================================================

const MARGIN: f64 = 15.0;

const TITLE_Y: f64 = 20.0;
const CONTACT_Y: f64 = 28.0;
const DOCUMENT_LABEL_Y: f64 = 35.0;
const QUOTE_NO_Y: f64 = 45.0;
const ISSUE_DATE_Y: f64 = 50.0;
const VALID_UNTIL_Y: f64 = 55.0;
const HEADER_RULE_Y: f64 = 70.0;

const PARTY_TITLE_Y: f64 = 80.0;
const PARTY_BODY_Y: f64 = 86.0;

const INCLUSIONS_TITLE_Y: f64 = 105.0;
const INCLUSIONS_BODY_Y: f64 = 111.0;
/// Space between the inclusions list and the item table
const INCLUSIONS_GAP: f64 = 5.0;
/// Table start when there is no inclusions block
const DEFAULT_TABLE_Y: f64 = 115.0;

const TOTALS_ROW_STEP: f64 = 10.0;
/// Distance from the right margin to the right edge of the totals labels
const TOTALS_LABEL_INSET: f64 = 60.0;

const FOOTER_FROM_BOTTOM: f64 = 30.0;
const TERMS_TITLE_OFFSET: f64 = 5.0;
const TERMS_OFFSET: f64 = 9.0;
const THANK_YOU_OFFSET: f64 = 20.0;

/// Item table column widths on an A4 page (sum = page width − 2 × margin)
const ITEM_COLUMN_WIDTHS: [f64; 12] = [
    10.0, 28.0, 20.0, 15.0, 15.0, 15.0, 9.0, 13.0, 14.0, 15.0, 12.0, 14.0,
];
const LINE_TOTAL_COLUMN: usize = 11;

const BRAND: Rgb = Rgb(0x4f, 0x46, 0xe5);
const INK: Rgb = Rgb(0x1f, 0x29, 0x37);
const MUTED: Rgb = Rgb(0x6b, 0x72, 0x80);
const GRID: Rgb = Rgb(0xc8, 0xc8, 0xc8);

/// Vertical positions the composer chose for the content-dependent parts of the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteLayout {
    /// Measured height of the inclusions list, when one was drawn
    pub inclusions_height: Option<f64>,
    /// Where the item table starts and ends
    pub table: TableExtent,
    pub subtotal_y: f64,
    /// One entry per quote adjustment, in order
    pub adjustment_ys: Vec<f64>,
    pub grand_total_y: f64,
    pub footer_y: f64,
}

// ============================================================================
// Composition
// ============================================================================

/// Draw the complete quotation onto `canvas`.
///
/// Absent optional fields are omitted (or drawn as empty text); they never
/// cause an error.
///
/// # Returns
///
/// * `Ok(QuoteLayout)` - Positions of the content-dependent blocks
/// * `Err(QuoteError::EmptyQuote)` - The quote has no items; nothing is drawn
/// * `Err(_)` - The canvas rejected a draw call
pub fn compose_quote<C: Canvas + ?Sized>(
    quote: &SavedQuote,
    settings: &QuoteSettings,
    canvas: &mut C,
) -> QuoteResult<QuoteLayout> {
    if quote.items.is_empty() {
        return Err(QuoteError::empty_quote(&quote.quote_no));
    }

    draw_header(quote, settings, canvas)?;
    draw_parties(&quote.form, canvas)?;

    let inclusions_height = draw_inclusions(&quote.form.inclusions, canvas)?;
    let table_y = match inclusions_height {
        Some(height) => INCLUSIONS_BODY_Y + height + INCLUSIONS_GAP,
        None => DEFAULT_TABLE_Y,
    };

    let table = item_table(&quote.items, settings, canvas.page_size().width);
    let extent = canvas.table(&table, Point::new(MARGIN, table_y))?;

    let (subtotal_y, adjustment_ys, grand_total_y) = draw_totals(quote, settings, extent, canvas)?;
    let footer_y = draw_footer(settings, canvas)?;

    debug!(
        quote_no = %quote.quote_no,
        table_start_y = extent.start_y,
        table_end_y = extent.end_y,
        grand_total_y,
        "quote composed"
    );

    Ok(QuoteLayout {
        inclusions_height,
        table: extent,
        subtotal_y,
        adjustment_ys,
        grand_total_y,
        footer_y,
    })
}

/// Brand block, document label, quote metadata and the header rule.
fn draw_header<C: Canvas + ?Sized>(quote: &SavedQuote, settings: &QuoteSettings, canvas: &mut C) -> QuoteResult<()> {
    let right = canvas.page_size().width - MARGIN;
    let branding = &settings.branding;

    canvas.text(
        &branding.title,
        Point::new(MARGIN, TITLE_Y),
        &TextStyle::new(24.0).bold().color(BRAND),
    )?;
    canvas.text(
        &branding.contact_lines.join("\n"),
        Point::new(MARGIN, CONTACT_Y),
        &TextStyle::new(10.0).color(INK),
    )?;
    canvas.text(
        "QUOTATION",
        Point::new(right, DOCUMENT_LABEL_Y),
        &TextStyle::new(30.0).bold().color(INK).align(Align::Right),
    )?;

    let meta = TextStyle::new(10.0).color(INK).align(Align::Right);
    canvas.text(&format!("Quote #: {}", quote.quote_no), Point::new(right, QUOTE_NO_Y), &meta)?;
    canvas.text(
        &format!("Date: {}", format_date(quote.issue_date)),
        Point::new(right, ISSUE_DATE_Y),
        &meta,
    )?;
    canvas.text(
        &format!("Valid Until: {}", format_date(quote.valid_until)),
        Point::new(right, VALID_UNTIL_Y),
        &meta,
    )?;

    canvas.line(
        Point::new(MARGIN, HEADER_RULE_Y),
        Point::new(right, HEADER_RULE_Y),
        &LineStyle { width_mm: 0.5, color: INK },
    )
}

/// "BILL TO" and "SHIPMENT INFO" side by side.
fn draw_parties<C: Canvas + ?Sized>(form: &FormData, canvas: &mut C) -> QuoteResult<()> {
    let middle = canvas.page_size().width / 2.0;
    let title = TextStyle::new(12.0).bold().color(INK);
    let body = TextStyle::new(10.0).color(INK);

    canvas.text("BILL TO:", Point::new(MARGIN, PARTY_TITLE_Y), &title)?;
    canvas.text("SHIPMENT INFO:", Point::new(middle, PARTY_TITLE_Y), &title)?;

    canvas.text(&bill_to_lines(form).join("\n"), Point::new(MARGIN, PARTY_BODY_Y), &body)?;
    canvas.text(&shipment_lines(form).join("\n"), Point::new(middle, PARTY_BODY_Y), &body)
}

/// Client contact lines; absent fields are left out.
pub fn bill_to_lines(form: &FormData) -> Vec<String> {
    let mut lines = Vec::new();

    for (field, value) in [
        ("name", &form.name),
        ("contact_number", &form.contact_number),
        ("email", &form.email),
    ] {
        match present(value) {
            Some(text) => lines.push(text.to_string()),
            None => debug!(field, "optional field absent, omitted from BILL TO"),
        }
    }

    match present(&form.pickup_location) {
        Some(pickup) => lines.push(format!("Pickup: {}", pickup)),
        None => debug!(field = "pickup_location", "optional field absent, omitted from BILL TO"),
    }

    lines
}

/// Service, goods, destination and transit lines; absent fields are left out.
pub fn shipment_lines(form: &FormData) -> Vec<String> {
    let mut lines = vec![
        format!("Service: {}", form.mode_of_service),
        format!("Goods: {}", form.type_of_goods),
    ];

    let destination: Vec<&str> = [&form.delivery_location, &form.delivery_city, &form.delivery_country]
        .into_iter()
        .filter_map(present)
        .collect();
    if destination.is_empty() {
        debug!(field = "destination", "optional field absent, omitted from SHIPMENT INFO");
    } else {
        lines.push(format!("Destination: {}", destination.join(", ")));
    }

    if let Some(transit) = present(&form.transit_time) {
        lines.push(format!("Transit Time: {}", transit));
    }

    lines
}

/// Bulleted inclusions, one per line. `None` when there are none.
pub fn inclusions_text(inclusions: &[Inclusion]) -> Option<String> {
    if inclusions.is_empty() {
        return None;
    }
    Some(
        inclusions
            .iter()
            .map(|inclusion| format!("• {}", inclusion))
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

/// Draw the inclusions block and return its measured height.
fn draw_inclusions<C: Canvas + ?Sized>(inclusions: &[Inclusion], canvas: &mut C) -> QuoteResult<Option<f64>> {
    let Some(text) = inclusions_text(inclusions) else {
        return Ok(None);
    };

    let body = TextStyle::new(10.0).color(INK);
    canvas.text(
        "INCLUSIONS:",
        Point::new(MARGIN, INCLUSIONS_TITLE_Y),
        &TextStyle::new(12.0).bold().color(INK),
    )?;
    canvas.text(&text, Point::new(MARGIN, INCLUSIONS_BODY_Y), &body)?;

    Ok(Some(canvas.text_height(&text, &body)))
}

/// Cell text for one item row.
pub fn item_row(item: &ShipmentItem) -> Vec<String> {
    vec![
        item.item_number.to_string(),
        item.description.clone(),
        format_dimensions(item.length_cm, item.breadth_cm, item.height_cm),
        format_weight(item.actual_weight_kg),
        format_weight(item.volumetric_weight_kg),
        format_weight(item.billed_weight_kg),
        format_quantity(item.quantity),
        format_amount(item.rate_per_kg),
        format_amount(item.packing_charge),
        format_amount(item.handling_charge),
        format_amount(item.duty),
        format_amount(item.line_total),
    ]
}

/// The item table, with column widths scaled to the page's content width.
pub fn item_table(items: &[ShipmentItem], settings: &QuoteSettings, page_width: f64) -> TableSpec {
    let available = page_width - 2.0 * MARGIN;
    let scale = available / ITEM_COLUMN_WIDTHS.iter().sum::<f64>();

    let columns = ITEM_COLUMN_WIDTHS
        .iter()
        .enumerate()
        .map(|(i, width)| TableColumn {
            width_mm: width * scale,
            align: if i == LINE_TOTAL_COLUMN { Align::Right } else { Align::Left },
        })
        .collect();

    let header = [
        "Item #",
        "Description",
        "Dimensions",
        "Actual Wt",
        "Vol. Wt",
        "Billed Wt",
        "Qty",
        "Rate/kg",
        "Packing",
        "Handling",
        "Duty",
    ]
    .iter()
    .map(|s| s.to_string())
    .chain(std::iter::once(format!("Line Total ({})", settings.currency)))
    .collect();

    TableSpec {
        columns,
        header,
        rows: items.iter().map(item_row).collect(),
        font_size_pt: 8.0,
        cell_padding_mm: 2.0,
        header_fill: BRAND,
        header_text: Rgb::WHITE,
        body_text: INK,
        grid: LineStyle { width_mm: 0.1, color: GRID },
    }
}

/// Subtotal, adjustments and grand total below the table.
fn draw_totals<C: Canvas + ?Sized>(
    quote: &SavedQuote,
    settings: &QuoteSettings,
    table: TableExtent,
    canvas: &mut C,
) -> QuoteResult<(f64, Vec<f64>, f64)> {
    let value_x = canvas.page_size().width - MARGIN;
    let label_x = value_x - TOTALS_LABEL_INSET;
    let regular = TextStyle::new(10.0).color(INK).align(Align::Right);
    let emphasis = TextStyle::new(12.0).bold().color(INK).align(Align::Right);
    let totals = &quote.totals;

    let subtotal_y = table.end_y + TOTALS_ROW_STEP;
    canvas.text("Subtotal:", Point::new(label_x, subtotal_y), &regular)?;
    canvas.text(
        &format_currency(totals.subtotal, &settings.currency),
        Point::new(value_x, subtotal_y),
        &regular,
    )?;

    let mut y = subtotal_y;
    let mut adjustment_ys = Vec::with_capacity(totals.adjustments.len());
    for adjustment in &totals.adjustments {
        y += TOTALS_ROW_STEP;
        canvas.text(&format!("{}:", adjustment.label), Point::new(label_x, y), &regular)?;
        canvas.text(
            &format_currency(adjustment.amount, &settings.currency),
            Point::new(value_x, y),
            &regular,
        )?;
        adjustment_ys.push(y);
    }

    let grand_total_y = y + TOTALS_ROW_STEP;
    canvas.text("Grand Total:", Point::new(label_x, grand_total_y), &emphasis)?;
    canvas.text(
        &format_currency(totals.grand_total, &settings.currency),
        Point::new(value_x, grand_total_y),
        &emphasis,
    )?;

    Ok((subtotal_y, adjustment_ys, grand_total_y))
}

/// Footer anchored to the page bottom. Returns its y position.
fn draw_footer<C: Canvas + ?Sized>(settings: &QuoteSettings, canvas: &mut C) -> QuoteResult<f64> {
    let page = canvas.page_size();
    let footer_y = page.height - FOOTER_FROM_BOTTOM;
    let small = TextStyle::new(8.0).color(MUTED);

    canvas.line(
        Point::new(MARGIN, footer_y),
        Point::new(page.width - MARGIN, footer_y),
        &LineStyle { width_mm: 0.2, color: Rgb::BLACK },
    )?;
    canvas.text("Terms & Conditions:", Point::new(MARGIN, footer_y + TERMS_TITLE_OFFSET), &small)?;
    canvas.text(&settings.branding.terms, Point::new(MARGIN, footer_y + TERMS_OFFSET), &small)?;
    canvas.text(
        &settings.branding.thank_you,
        Point::new(page.width / 2.0, footer_y + THANK_YOU_OFFSET),
        &small.clone().align(Align::Center),
    )?;

    Ok(footer_y)
}

// ============================================================================
// Export
// ============================================================================

/// `Quotation-<quote no>.<extension>`
pub fn artifact_file_name(quote_no: &str, extension: &str) -> String {
    format!("Quotation-{}.{}", quote_no, extension)
}

/// Full artifact path inside `out_dir`.
///
/// Quote numbers are used verbatim, so one containing a path separator is
/// rejected instead of being allowed to leave `out_dir`.
pub fn artifact_path(out_dir: &Path, quote_no: &str, extension: &str) -> QuoteResult<PathBuf> {
    if quote_no.chars().any(|c| c == '/' || c == '\\' || c == '\0') {
        return Err(QuoteError::invalid_input(
            "quote_no",
            quote_no,
            "Quote number must not contain path separators",
        ));
    }
    Ok(out_dir.join(artifact_file_name(quote_no, extension)))
}

/// Compose the quote, encode it and write it to `out_dir`.
///
/// Nothing is written unless composition and encoding succeed. Write
/// failures are returned unchanged.
pub fn export_quote<C: Canvas + ?Sized>(
    quote: &SavedQuote,
    settings: &QuoteSettings,
    canvas: &mut C,
    out_dir: &Path,
) -> QuoteResult<PathBuf> {
    let path = artifact_path(out_dir, &quote.quote_no, canvas.extension())?;

    compose_quote(quote, settings, canvas)?;
    let bytes = canvas.finish()?;
    write_artifact(&path, &bytes)?;

    info!(
        quote_no = %quote.quote_no,
        path = %path.display(),
        bytes = bytes.len(),
        "quotation exported"
    );

    Ok(path)
}
