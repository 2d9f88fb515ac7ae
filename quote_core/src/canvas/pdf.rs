//! # Typst PDF Canvas
//!
//! Renders draw calls to PDF using Typst.
//!
//! ## Architecture
//!
//! - Each draw call appends one absolutely `#place`d element to a Typst source
//! - User text is embedded as escaped string literals, never as markup
//! - Table rows get explicit heights from [`super::metrics`], so the extent
//!   returned by [`Canvas::table`] is exactly what ends up on the page
//! - [`Canvas::finish`] compiles the source and returns raw PDF bytes
//!
//! ## Example
//!
//! ```rust,no_run
//! use quote_core::canvas::{Canvas, Point, TextStyle, TypstCanvas};
//!
//! let mut canvas = TypstCanvas::a4();
//! canvas.text("Hello", Point::new(15.0, 20.0), &TextStyle::new(12.0)).unwrap();
//! let pdf = canvas.finish().unwrap();
//! std::fs::write("hello.pdf", pdf).unwrap();
//! ```

use std::fmt::Write as _;

use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use super::metrics::{layout_table, text_height_mm};
use super::{Align, Canvas, FontWeight, LineStyle, PageSize, Point, TableExtent, TableSpec, TextStyle};
use crate::errors::{QuoteError, QuoteResult};

/// Font family used for all text. Bundled with typst-assets.
pub const DEFAULT_FONT: &str = "Libertinus Serif";

// ============================================================================
// Typst World Implementation
// ============================================================================

/// Fonts bundled with typst-assets, parsed once per process.
static FONTS: Lazy<Vec<Font>> = Lazy::new(|| {
    typst_assets::fonts()
        .flat_map(|data| Font::iter(Bytes::new(data.to_vec())))
        .collect()
});

/// A minimal Typst world for compiling a single in-memory document.
struct QuoteWorld {
    /// The main source document
    main: Source,
    /// Font book
    book: LazyHash<FontBook>,
    /// Library (standard functions)
    library: LazyHash<Library>,
}

impl QuoteWorld {
    fn new(source: String) -> Self {
        QuoteWorld {
            main: Source::detached(source),
            book: LazyHash::new(FontBook::from_fonts(FONTS.iter())),
            library: LazyHash::new(Library::default()),
        }
    }
}

impl World for QuoteWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        FONTS.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(
            now.year(),
            u8::try_from(now.month()).ok()?,
            u8::try_from(now.day()).ok()?,
        )
    }
}

// ============================================================================
// Canvas
// ============================================================================

/// Canvas that builds a Typst document and compiles it to PDF.
pub struct TypstCanvas {
    page: PageSize,
    font: String,
    body: String,
}

impl TypstCanvas {
    /// Blank A4 page.
    pub fn a4() -> Self {
        Self::new(PageSize::A4, DEFAULT_FONT)
    }

    pub fn new(page: PageSize, font: impl Into<String>) -> Self {
        TypstCanvas {
            page,
            font: font.into(),
            body: String::new(),
        }
    }

    /// Full Typst source for what has been drawn so far.
    pub fn source(&self) -> String {
        format!(
            "#set page(width: {}, height: {}, margin: 0mm)\n\
             #set text(font: {}, top-edge: 1em, bottom-edge: 0em)\n\
             {}",
            mm(self.page.width),
            mm(self.page.height),
            typst_string(&self.font),
            self.body
        )
    }

    /// `place` alignment and x offset that put the anchor of `align` at `x`.
    fn anchor(&self, align: Align, x: f64) -> (&'static str, f64) {
        match align {
            Align::Left => ("top + left", x),
            Align::Center => ("top + center", x - self.page.width / 2.0),
            Align::Right => ("top + right", x - self.page.width),
        }
    }
}

impl Canvas for TypstCanvas {
    fn page_size(&self) -> PageSize {
        self.page
    }

    fn text_height(&self, text: &str, style: &TextStyle) -> f64 {
        text_height_mm(text, style.size_pt)
    }

    fn text(&mut self, text: &str, at: Point, style: &TextStyle) -> QuoteResult<()> {
        let (placement, dx) = self.anchor(style.align, at.x);
        let _ = writeln!(
            self.body,
            "#place({}, dx: {}, dy: {}, align({}, {{ {}; set par(leading: 0.15em); {} }}))",
            placement,
            mm(dx),
            mm(at.y),
            align_name(style.align),
            text_set_rule(style.size_pt, style.weight, &style.color.hex()),
            typst_content(text),
        );
        Ok(())
    }

    fn line(&mut self, from: Point, to: Point, style: &LineStyle) -> QuoteResult<()> {
        let _ = writeln!(
            self.body,
            "#place(top + left, line(start: ({}, {}), end: ({}, {}), stroke: {} + rgb(\"{}\")))",
            mm(from.x),
            mm(from.y),
            mm(to.x),
            mm(to.y),
            mm(style.width_mm),
            style.color.hex(),
        );
        Ok(())
    }

    fn table(&mut self, table: &TableSpec, at: Point) -> QuoteResult<TableExtent> {
        if table.header.len() != table.columns.len() {
            return Err(QuoteError::render_failed(
                "table",
                format!(
                    "{} header cells for {} columns",
                    table.header.len(),
                    table.columns.len()
                ),
            ));
        }

        let (heights, extent) = layout_table(table, at.y);

        let columns = join(table.columns.iter().map(|c| mm(c.width_mm)));
        let rows = join(heights.iter().map(|h| mm(*h)));
        let aligns = join(table.columns.iter().map(|c| align_name(c.align).to_string()));

        let header = join(table.header.iter().map(|cell| {
            format!(
                "text(fill: rgb(\"{}\"), weight: \"bold\", {})",
                table.header_text.hex(),
                typst_content(cell)
            )
        }));

        let mut body = Vec::with_capacity(table.rows.len() * table.columns.len());
        for row in &table.rows {
            for i in 0..table.columns.len() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                body.push(typst_content(cell));
            }
        }

        let _ = writeln!(
            self.body,
            "#place(top + left, dx: {dx}, dy: {dy}, {{ {set}; set par(leading: 0.15em); table(\n  \
             columns: ({columns},),\n  \
             rows: ({rows},),\n  \
             inset: {inset},\n  \
             stroke: {stroke} + rgb(\"{grid}\"),\n  \
             fill: (x, y) => if y == 0 {{ rgb(\"{fill}\") }},\n  \
             align: ({aligns},),\n  \
             table.header({header}),\n  \
             {body}\n) }})",
            dx = mm(at.x),
            dy = mm(at.y),
            set = text_set_rule(table.font_size_pt, FontWeight::Regular, &table.body_text.hex()),
            columns = columns,
            rows = rows,
            inset = mm(table.cell_padding_mm),
            stroke = mm(table.grid.width_mm),
            grid = table.grid.color.hex(),
            fill = table.header_fill.hex(),
            aligns = aligns,
            header = header,
            body = body.join(", "),
        );

        Ok(extent)
    }

    fn finish(&mut self) -> QuoteResult<Vec<u8>> {
        let world = QuoteWorld::new(self.source());

        let warned = typst::compile(&world);

        let document = warned.output.map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
            QuoteError::render_failed("typst compile", error_msgs.join("; "))
        })?;

        let pdf_bytes = typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
            QuoteError::render_failed("pdf export", error_msgs.join("; "))
        })?;

        Ok(pdf_bytes)
    }

    fn extension(&self) -> &'static str {
        "pdf"
    }
}

// ============================================================================
// Source helpers
// ============================================================================

/// Millimetre length literal
fn mm(value: f64) -> String {
    format!("{:.3}mm", value)
}

fn align_name(align: Align) -> &'static str {
    match align {
        Align::Left => "left",
        Align::Center => "center",
        Align::Right => "right",
    }
}

fn text_set_rule(size_pt: f64, weight: FontWeight, color_hex: &str) -> String {
    let weight = match weight {
        FontWeight::Regular => "regular",
        FontWeight::Bold => "bold",
    };
    format!(
        "set text(size: {:.2}pt, weight: \"{}\", fill: rgb(\"{}\"))",
        size_pt, weight, color_hex
    )
}

fn join(parts: impl Iterator<Item = String>) -> String {
    parts.collect::<Vec<_>>().join(", ")
}

/// Quote `s` as a Typst string literal.
fn typst_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\r' => {}
            '\t' => out.push(' '),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Content block showing `text` verbatim, one line per `\n`.
fn typst_content(text: &str) -> String {
    let lines: Vec<String> = text
        .split('\n')
        .map(|line| format!("#{}", typst_string(line)))
        .collect();
    format!("[{}]", lines.join("#linebreak()"))
}
