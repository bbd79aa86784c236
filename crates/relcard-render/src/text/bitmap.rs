//! Built-in 5x7 typeface used when no outline font can be loaded.
//!
//! Covers printable ASCII from space through underscore; lowercase letters
//! render as their uppercase forms. Each glyph is seven rows of five bits,
//! most significant bit on the left.

use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Rect, Transform};

use super::font::{TextMetrics, TextRaster};

const COLUMNS: u32 = 5;
const ROWS: u32 = 7;
/// Horizontal advance in cells, including one blank column.
const ADVANCE_CELLS: f32 = 6.0;
/// One cell is this fraction of the requested pixel size.
const CELL_PER_PX: f32 = 0.1;

const FIRST: u32 = 32;

#[rustfmt::skip]
const GLYPHS: [[u8; 7]; 64] = [
    [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000], // ' '
    [0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100, 0b00000], // '!'
    [0b01010, 0b01010, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000], // '"'
    [0b01010, 0b11111, 0b01010, 0b11111, 0b01010, 0b00000, 0b00000], // '#'
    [0b00100, 0b01110, 0b10100, 0b01110, 0b00101, 0b01110, 0b00100], // '$'
    [0b11001, 0b11010, 0b00100, 0b01011, 0b10011, 0b00000, 0b00000], // '%'
    [0b01100, 0b10010, 0b01100, 0b10010, 0b10011, 0b01101, 0b00000], // '&'
    [0b00100, 0b00100, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000], // '\''
    [0b00100, 0b01000, 0b01000, 0b01000, 0b01000, 0b00100, 0b00000], // '('
    [0b00100, 0b00010, 0b00010, 0b00010, 0b00010, 0b00100, 0b00000], // ')'
    [0b00000, 0b10101, 0b01110, 0b10101, 0b00000, 0b00000, 0b00000], // '*'
    [0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000], // '+'
    [0b00000, 0b00000, 0b00000, 0b00000, 0b00100, 0b00100, 0b01000], // ','
    [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000], // '-'
    [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00100, 0b00000], // '.'
    [0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b00000, 0b00000], // '/'
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110], // '0'
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // '1'
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111], // '2'
    [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110], // '3'
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010], // '4'
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110], // '5'
    [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110], // '6'
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000], // '7'
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110], // '8'
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100], // '9'
    [0b00000, 0b00100, 0b00000, 0b00000, 0b00100, 0b00000, 0b00000], // ':'
    [0b00000, 0b00100, 0b00000, 0b00000, 0b00100, 0b00100, 0b01000], // ';'
    [0b00010, 0b00100, 0b01000, 0b10000, 0b01000, 0b00100, 0b00010], // '<'
    [0b00000, 0b00000, 0b11111, 0b00000, 0b11111, 0b00000, 0b00000], // '='
    [0b01000, 0b00100, 0b00010, 0b00001, 0b00010, 0b00100, 0b01000], // '>'
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100], // '?'
    [0b01110, 0b10001, 0b10111, 0b10101, 0b10111, 0b10000, 0b01110], // '@'
    [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001], // 'A'
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110], // 'B'
    [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110], // 'C'
    [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110], // 'D'
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111], // 'E'
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000], // 'F'
    [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111], // 'G'
    [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001], // 'H'
    [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // 'I'
    [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100], // 'J'
    [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001], // 'K'
    [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111], // 'L'
    [0b10001, 0b11011, 0b10101, 0b10001, 0b10001, 0b10001, 0b10001], // 'M'
    [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001], // 'N'
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // 'O'
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000], // 'P'
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101], // 'Q'
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001], // 'R'
    [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110], // 'S'
    [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100], // 'T'
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // 'U'
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100], // 'V'
    [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b11011, 0b10001], // 'W'
    [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001], // 'X'
    [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100], // 'Y'
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111], // 'Z'
    [0b01110, 0b01000, 0b01000, 0b01000, 0b01000, 0b01000, 0b01110], // '['
    [0b10000, 0b01000, 0b00100, 0b00010, 0b00001, 0b00000, 0b00000], // '\\'
    [0b01110, 0b00010, 0b00010, 0b00010, 0b00010, 0b00010, 0b01110], // ']'
    [0b00100, 0b01010, 0b10001, 0b00000, 0b00000, 0b00000, 0b00000], // '^'
    [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b11111], // '_'
];

fn glyph(ch: char) -> Option<&'static [u8; 7]> {
    let code = u32::from(ch.to_ascii_uppercase());
    let index = code.checked_sub(FIRST)? as usize;
    GLYPHS.get(index)
}

fn cell_size(px: f32) -> f32 {
    (px * CELL_PER_PX).max(0.0)
}

/// Ink extent of `text`, baseline at the bottom of row seven.
pub(super) fn measure(text: &str, px: f32) -> TextMetrics {
    let cell = cell_size(px);
    let count = text.chars().count() as f32;

    let top_row = text
        .chars()
        .filter_map(glyph)
        .filter_map(|rows| rows.iter().position(|&row| row != 0))
        .min();

    TextMetrics {
        width: count * ADVANCE_CELLS * cell,
        ascent: top_row.map_or(0.0, |row| (ROWS as usize - row) as f32 * cell),
        descent: 0.0,
    }
}

/// Coverage bitmap of `text`, one filled square per lit cell.
pub(super) fn rasterize(text: &str, px: f32) -> Option<TextRaster> {
    let metrics = measure(text, px);
    let cell = cell_size(px);
    let width = metrics.width.ceil().max(1.0) as u32;
    let height = (ROWS as f32 * cell).ceil().max(1.0) as u32;

    let mut pb = PathBuilder::new();
    for (i, ch) in text.chars().enumerate() {
        let Some(rows) = glyph(ch) else { continue };
        let left = i as f32 * ADVANCE_CELLS * cell;
        for (row, bits) in rows.iter().enumerate() {
            for column in 0..COLUMNS {
                if bits & (1 << (COLUMNS - 1 - column)) == 0 {
                    continue;
                }
                if let Some(rect) = Rect::from_xywh(
                    left + column as f32 * cell,
                    row as f32 * cell,
                    cell,
                    cell,
                ) {
                    pb.push_rect(rect);
                }
            }
        }
    }

    let mut coverage = Pixmap::new(width, height)?;
    if let Some(path) = pb.finish() {
        let mut paint = Paint::default();
        paint.set_color_rgba8(255, 255, 255, 255);
        paint.anti_alias = true;
        coverage.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    Some(TextRaster {
        coverage,
        origin_x: 0.0,
        baseline: ROWS as f32 * cell,
        metrics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_space_to_underscore() {
        assert!(glyph(' ').is_some());
        assert!(glyph('_').is_some());
        assert!(glyph('`').is_none());
        assert!(glyph('\u{e9}').is_none());
    }

    #[test]
    fn test_lowercase_uses_uppercase_forms() {
        assert_eq!(glyph('a'), glyph('A'));
        assert_eq!(glyph('z'), glyph('Z'));
    }

    #[test]
    fn test_measure_scales_linearly() {
        let small = measure("V1.2", 50.0);
        let large = measure("V1.2", 100.0);
        assert!((large.width - small.width * 2.0).abs() < 1e-3);
        assert!((small.width - 4.0 * 6.0 * 5.0).abs() < 1e-3);
        // 'V' and digits reach the top row.
        assert!((small.ascent - 35.0).abs() < 1e-3);
        assert_eq!(small.descent, 0.0);
    }

    #[test]
    fn test_blank_text_has_no_ink() {
        let metrics = measure("   ", 40.0);
        assert_eq!(metrics.ascent, 0.0);
        assert!(metrics.width > 0.0);
    }

    #[test]
    fn test_rasterize_lights_cells() {
        let raster = rasterize("I", 100.0).unwrap();
        // 'I' has a full top bar: row 0 columns 1..=3 -> x 10..40.
        assert_eq!(raster.coverage.width(), 60);
        assert_eq!(raster.coverage.height(), 70);
        let alpha = |x: u32, y: u32| raster.coverage.pixel(x, y).unwrap().alpha();
        assert_eq!(alpha(25, 5), 255);
        assert_eq!(alpha(2, 5), 0);
    }
}
