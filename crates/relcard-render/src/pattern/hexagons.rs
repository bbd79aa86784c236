//! Hexagon tessellations.
//!
//! `triangles` packs small hexagons on a plain offset grid so neighbours
//! overlap into a triangular mesh; `honeycomb` spaces them edge to edge.

use std::f64::consts::PI;

use super::{hexagon, PatternCanvas};

pub(super) fn draw_triangles(canvas: &mut PatternCanvas) {
    let color = canvas.white(3, 11.0, 8.0);

    let area = canvas.area(100.0);
    let size = canvas.roll(area / 3.0, area / 2.0).max(10.0);
    let row_height = size * 3f64.sqrt() / 2.0;

    let rows = canvas.height / row_height + 1.0;
    let cols = canvas.width / size + 1.0;

    let mut row = -1i64;
    while (row as f64) < rows {
        let shift = if row % 2 == 0 { 0.0 } else { size / 2.0 };
        let mut col = -1i64;
        while (col as f64) < cols {
            let cx = col as f64 * size + shift;
            let cy = row as f64 * row_height;
            canvas.stroke(hexagon(cx, cy, size / 2.0, 0.0), &color, 1.0);
            col += 1;
        }
        row += 1;
    }
}

pub(super) fn draw_honeycomb(canvas: &mut PatternCanvas) {
    let color = canvas.white(3, 11.0, 8.0);

    let area = canvas.area(80.0);
    let size = canvas.roll(area / 4.0, area / 2.0).max(15.0);
    let factor = canvas.next() / 5.0 + 0.9;
    let vertical = size * 3f64.sqrt() * factor;
    let horizontal = size * 2.0 * factor;

    let last_row = (canvas.height / vertical).ceil() as i64 + 1;
    let last_col = (canvas.width / horizontal).ceil() as i64 + 1;

    for row in -1..=last_row {
        let shift = if row % 2 == 0 { 0.0 } else { horizontal / 2.0 };
        for col in -1..=last_col {
            let cx = col as f64 * horizontal + shift;
            let cy = row as f64 * vertical;
            canvas.stroke(hexagon(cx, cy, size, -PI / 6.0), &color, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceRng;
    use crate::surface::Surface;

    #[test]
    fn test_triangles_use_two_draws() {
        let mut surface = Surface::new(150, 150).unwrap();
        let mut rng = SequenceRng::constant(0.3);
        let mut canvas = PatternCanvas::new(&mut surface, &mut rng, 0.4);
        draw_triangles(&mut canvas);
        assert_eq!(rng.draws(), 2);
    }

    #[test]
    fn test_honeycomb_covers_corners() {
        let mut surface = Surface::new(240, 160).unwrap();
        let mut rng = SequenceRng::constant(0.5);
        let mut canvas = PatternCanvas::new(&mut surface, &mut rng, 1.0);
        draw_honeycomb(&mut canvas);
        assert_eq!(rng.draws(), 3);

        let painted = surface
            .into_rgba8()
            .chunks_exact(4)
            .filter(|pixel| pixel[3] > 0)
            .count();
        assert!(painted > 240 * 160 / 20, "only {painted} pixels painted");
    }
}
