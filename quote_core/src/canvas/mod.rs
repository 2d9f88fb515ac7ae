//! # Canvas Capability
//!
//! The drawing surface the document composer drives. A canvas places text
//! at absolute positions, draws lines, renders tables and reports page and
//! text metrics. It knows nothing about quotes.
//!
//! Coordinates are millimetres measured from the top-left corner of the
//! page; a text position is the top of its first line. Every call takes its
//! style explicitly, so no call depends on what an earlier call set.
//!
//! ## Implementations
//!
//! - [`pdf::TypstCanvas`] - PDF output compiled with Typst
//! - [`recording::RecordingCanvas`] - Records draw operations as JSON

pub mod metrics;
pub mod pdf;
pub mod recording;

use serde::{Deserialize, Serialize};

use crate::errors::QuoteResult;

pub use self::recording::{DrawOp, RecordingCanvas};
pub use self::pdf::TypstCanvas;

/// A position on the page in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// Page dimensions in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    /// ISO A4 portrait
    pub const A4: PageSize = PageSize {
        width: 210.0,
        height: 297.0,
    };
}

/// Horizontal anchoring of text relative to its x coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// `#rrggbb` notation
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Complete style for one text placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub size_pt: f64,
    pub weight: FontWeight,
    pub color: Rgb,
    pub align: Align,
}

impl TextStyle {
    /// Regular, black, left-aligned text of the given size.
    pub fn new(size_pt: f64) -> Self {
        TextStyle {
            size_pt,
            weight: FontWeight::Regular,
            color: Rgb::BLACK,
            align: Align::Left,
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

/// Stroke for a line segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub width_mm: f64,
    pub color: Rgb,
}

/// One table column: its width and how its cells are aligned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableColumn {
    pub width_mm: f64,
    pub align: Align,
}

/// A grid table with a single header row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    pub columns: Vec<TableColumn>,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub font_size_pt: f64,
    pub cell_padding_mm: f64,
    pub header_fill: Rgb,
    pub header_text: Rgb,
    pub body_text: Rgb,
    pub grid: LineStyle,
}

impl TableSpec {
    /// Total width of all columns.
    pub fn width_mm(&self) -> f64 {
        self.columns.iter().map(|c| c.width_mm).sum()
    }
}

/// Vertical span a rendered table occupies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableExtent {
    pub start_y: f64,
    pub end_y: f64,
}

impl TableExtent {
    pub fn height(&self) -> f64 {
        self.end_y - self.start_y
    }
}

/// Drawing surface driven by the document composer.
///
/// A canvas is used for one document: draw everything, then call
/// [`Canvas::finish`] once to obtain the encoded artifact.
pub trait Canvas {
    /// Page width and height in millimetres.
    fn page_size(&self) -> PageSize;

    /// Height the text would occupy if placed with `style`. Newlines start new lines.
    fn text_height(&self, text: &str, style: &TextStyle) -> f64;

    /// Place (possibly multi-line) text with its anchor at `at`.
    fn text(&mut self, text: &str, at: Point, style: &TextStyle) -> QuoteResult<()>;

    /// Draw a straight line.
    fn line(&mut self, from: Point, to: Point, style: &LineStyle) -> QuoteResult<()>;

    /// Render a table with its top-left corner at `at` and report where it ends.
    fn table(&mut self, table: &TableSpec, at: Point) -> QuoteResult<TableExtent>;

    /// Encode everything drawn so far.
    fn finish(&mut self) -> QuoteResult<Vec<u8>>;

    /// File extension of the encoded artifact, without the dot.
    fn extension(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_hex() {
        assert_eq!(Rgb(79, 70, 229).hex(), "#4f46e5");
        assert_eq!(Rgb::WHITE.hex(), "#ffffff");
    }

    #[test]
    fn test_text_style_builder() {
        let style = TextStyle::new(12.0).bold().align(Align::Right).color(Rgb::WHITE);
        assert_eq!(style.size_pt, 12.0);
        assert_eq!(style.weight, FontWeight::Bold);
        assert_eq!(style.align, Align::Right);
        assert_eq!(style.color, Rgb::WHITE);
    }
}
