//! Canvas that records draw operations instead of rendering them.
//!
//! Uses the same metrics as the PDF canvas, so the recorded positions match
//! what [`super::TypstCanvas`] would draw. `finish` emits the operations as
//! pretty-printed JSON.

use serde::{Deserialize, Serialize};

use super::metrics::{layout_table, text_height_mm};
use super::{Canvas, LineStyle, PageSize, Point, TableExtent, TableSpec, TextStyle};
use crate::errors::QuoteResult;

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Text {
        text: String,
        at: Point,
        style: TextStyle,
    },
    Line {
        from: Point,
        to: Point,
        style: LineStyle,
    },
    Table {
        at: Point,
        table: TableSpec,
        row_heights: Vec<f64>,
        extent: TableExtent,
    },
}

#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    page: PageSize,
    ops: Vec<DrawOp>,
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self::new(PageSize::A4)
    }
}

impl RecordingCanvas {
    pub fn new(page: PageSize) -> Self {
        RecordingCanvas {
            page,
            ops: Vec::new(),
        }
    }

    /// Everything drawn so far, in call order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// First text placement whose content equals `text`.
    pub fn find_text(&self, text: &str) -> Option<(Point, &TextStyle)> {
        self.ops.iter().find_map(|op| match op {
            DrawOp::Text { text: t, at, style } if t == text => Some((*at, style)),
            _ => None,
        })
    }

    /// First text placement whose content starts with `prefix`.
    pub fn find_text_starting_with(&self, prefix: &str) -> Option<(&str, Point, &TextStyle)> {
        self.ops.iter().find_map(|op| match op {
            DrawOp::Text { text, at, style } if text.starts_with(prefix) => {
                Some((text.as_str(), *at, style))
            }
            _ => None,
        })
    }

    /// The first recorded table, if any.
    pub fn recorded_table(&self) -> Option<(&TableSpec, TableExtent)> {
        self.ops.iter().find_map(|op| match op {
            DrawOp::Table { table, extent, .. } => Some((table, *extent)),
            _ => None,
        })
    }
}

impl Canvas for RecordingCanvas {
    fn page_size(&self) -> PageSize {
        self.page
    }

    fn text_height(&self, text: &str, style: &TextStyle) -> f64 {
        text_height_mm(text, style.size_pt)
    }

    fn text(&mut self, text: &str, at: Point, style: &TextStyle) -> QuoteResult<()> {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            at,
            style: style.clone(),
        });
        Ok(())
    }

    fn line(&mut self, from: Point, to: Point, style: &LineStyle) -> QuoteResult<()> {
        self.ops.push(DrawOp::Line {
            from,
            to,
            style: *style,
        });
        Ok(())
    }

    fn table(&mut self, table: &TableSpec, at: Point) -> QuoteResult<TableExtent> {
        let (row_heights, extent) = layout_table(table, at.y);
        self.ops.push(DrawOp::Table {
            at,
            table: table.clone(),
            row_heights,
            extent,
        });
        Ok(extent)
    }

    fn finish(&mut self) -> QuoteResult<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(&self.ops)?)
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Align, Rgb};

    #[test]
    fn test_records_in_order() {
        let mut canvas = RecordingCanvas::default();
        canvas.text("A", Point::new(1.0, 2.0), &TextStyle::new(10.0)).unwrap();
        canvas
            .line(
                Point::new(0.0, 5.0),
                Point::new(10.0, 5.0),
                &LineStyle { width_mm: 0.5, color: Rgb::BLACK },
            )
            .unwrap();
        assert_eq!(canvas.ops().len(), 2);
        assert!(matches!(canvas.ops()[0], DrawOp::Text { .. }));
        assert!(matches!(canvas.ops()[1], DrawOp::Line { .. }));
    }

    #[test]
    fn test_find_text() {
        let mut canvas = RecordingCanvas::default();
        let style = TextStyle::new(10.0).align(Align::Right);
        canvas.text("Quote #: Q-1", Point::new(195.0, 45.0), &style).unwrap();

        let (at, found) = canvas.find_text("Quote #: Q-1").unwrap();
        assert_eq!(at, Point::new(195.0, 45.0));
        assert_eq!(found.align, Align::Right);
        assert!(canvas.find_text("Quote #:").is_none());
        assert!(canvas.find_text_starting_with("Quote #:").is_some());
    }

    #[test]
    fn test_finish_emits_json() {
        let mut canvas = RecordingCanvas::default();
        canvas.text("Hi", Point::new(0.0, 0.0), &TextStyle::new(8.0)).unwrap();
        let bytes = canvas.finish().unwrap();
        let ops: Vec<DrawOp> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(ops, canvas.ops());
        assert!(String::from_utf8(bytes).unwrap().contains("\"op\": \"text\""));
    }
}
