//! Approximate text metrics shared by the canvases.
//!
//! Widths use a single average glyph width per em rather than per-glyph
//! tables. Heights are exact for the line pitch the canvases render with
//! (1.15 × font size), so vertical layout derived from them is consistent
//! with the output.

use super::{TableExtent, TableSpec};

/// Millimetres per typographic point
pub const PT_TO_MM: f64 = 25.4 / 72.0;

/// Line pitch as a multiple of the font size
pub const LINE_HEIGHT_FACTOR: f64 = 1.15;

/// Average advance width of a glyph, in em
pub const AVERAGE_CHAR_WIDTH_EM: f64 = 0.55;

/// Distance between consecutive baselines.
pub fn line_height_mm(size_pt: f64) -> f64 {
    size_pt * LINE_HEIGHT_FACTOR * PT_TO_MM
}

/// Number of explicit lines in `text`. Empty text has none.
pub fn line_count(text: &str) -> usize {
    if text.is_empty() {
        0
    } else {
        text.split('\n').count()
    }
}

/// Height of `text` without wrapping.
pub fn text_height_mm(text: &str, size_pt: f64) -> f64 {
    line_count(text) as f64 * line_height_mm(size_pt)
}

/// Estimated width of a single line.
pub fn text_width_mm(text: &str, size_pt: f64) -> f64 {
    text.chars().count() as f64 * AVERAGE_CHAR_WIDTH_EM * size_pt * PT_TO_MM
}

/// Lines `text` occupies when greedily word-wrapped to `max_width_mm`.
///
/// Words wider than the line are split across as many lines as they need.
pub fn wrapped_line_count(text: &str, size_pt: f64, max_width_mm: f64) -> usize {
    let space = text_width_mm(" ", size_pt);
    let mut total = 0;

    for line in text.split('\n') {
        let mut lines = 1;
        let mut current = 0.0_f64;
        let mut first = true;

        for word in line.split_whitespace() {
            let word_w = text_width_mm(word, size_pt);

            if word_w > max_width_mm && max_width_mm > 0.0 {
                let extra = (word_w / max_width_mm).ceil() as usize;
                if !first {
                    lines += 1;
                }
                lines += extra - 1;
                current = word_w - (extra - 1) as f64 * max_width_mm;
                first = false;
                continue;
            }

            if !first && current + space + word_w > max_width_mm {
                lines += 1;
                current = word_w;
            } else {
                current += if first { word_w } else { space + word_w };
                first = false;
            }
        }
        total += lines;
    }
    total
}

/// Height of each row (header first) and the resulting extent for a table at `start_y`.
pub fn layout_table(table: &TableSpec, start_y: f64) -> (Vec<f64>, TableExtent) {
    let line_h = line_height_mm(table.font_size_pt);
    let padding = table.cell_padding_mm;

    let row_height = |cells: &[String]| -> f64 {
        let tallest = cells
            .iter()
            .zip(&table.columns)
            .map(|(cell, column)| {
                let inner = (column.width_mm - 2.0 * padding).max(0.0);
                wrapped_line_count(cell, table.font_size_pt, inner)
            })
            .max()
            .unwrap_or(1)
            .max(1);
        tallest as f64 * line_h + 2.0 * padding
    };

    let heights: Vec<f64> = std::iter::once(&table.header)
        .chain(table.rows.iter())
        .map(|cells| row_height(cells))
        .collect();

    let end_y = start_y + heights.iter().sum::<f64>();
    (heights, TableExtent { start_y, end_y })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Align, LineStyle, Rgb, TableColumn};

    fn table(rows: Vec<Vec<String>>) -> TableSpec {
        TableSpec {
            columns: vec![
                TableColumn { width_mm: 20.0, align: Align::Left },
                TableColumn { width_mm: 30.0, align: Align::Right },
            ],
            header: vec!["A".to_string(), "B".to_string()],
            rows,
            font_size_pt: 8.0,
            cell_padding_mm: 2.0,
            header_fill: Rgb::BLACK,
            header_text: Rgb::WHITE,
            body_text: Rgb::BLACK,
            grid: LineStyle { width_mm: 0.1, color: Rgb::BLACK },
        }
    }

    #[test]
    fn test_text_height_counts_lines() {
        let one = line_height_mm(10.0);
        assert_eq!(text_height_mm("", 10.0), 0.0);
        assert!((text_height_mm("a", 10.0) - one).abs() < 1e-12);
        assert!((text_height_mm("a\nb\nc", 10.0) - 3.0 * one).abs() < 1e-12);
    }

    #[test]
    fn test_wrapping() {
        // 8pt: one char ≈ 1.55 mm
        assert_eq!(wrapped_line_count("short", 8.0, 50.0), 1);
        assert_eq!(wrapped_line_count("one two three four five six seven", 8.0, 20.0), 4);
        assert_eq!(wrapped_line_count("a\nb", 8.0, 50.0), 2);
    }

    #[test]
    fn test_long_word_splits() {
        let word = "x".repeat(30); // ≈ 46.6 mm
        assert_eq!(wrapped_line_count(&word, 8.0, 20.0), 3);
    }

    #[test]
    fn test_table_extent_sums_rows() {
        let spec = table(vec![vec!["1".into(), "2".into()], vec!["3".into(), "4".into()]]);
        let (heights, extent) = layout_table(&spec, 100.0);
        assert_eq!(heights.len(), 3);
        let row = line_height_mm(8.0) + 4.0;
        assert!((extent.end_y - (100.0 + 3.0 * row)).abs() < 1e-9);
        assert!((extent.height() - heights.iter().sum::<f64>()).abs() < 1e-12);
    }

    #[test]
    fn test_tall_cell_grows_row() {
        let spec = table(vec![vec!["one two three four five".into(), "x".into()]]);
        let (heights, _) = layout_table(&spec, 0.0);
        assert!(heights[1] > heights[0]);
    }
}
