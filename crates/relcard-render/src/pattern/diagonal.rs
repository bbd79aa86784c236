//! Checkerboard corner motifs walked along anti-diagonals.
//!
//! Only cells with `(x + y)` even are drawn. Each drawn cell gets an "up"
//! corner (top edge then right edge) or a "down" corner (bottom edge then
//! right edge). `maze` chooses per cell, `steps` once for the whole image.

use super::{polyline, PatternCanvas};
use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Corner {
    Up,
    Down,
}

impl Corner {
    fn random(canvas: &mut PatternCanvas) -> Self {
        if canvas.rng.below(2) == 0 {
            Corner::Up
        } else {
            Corner::Down
        }
    }
}

pub(super) fn draw_maze(canvas: &mut PatternCanvas) {
    let color = canvas.white(3, 11.0, 11.0);
    let area = canvas.area(100.0);
    let grid = canvas.roll(area / 6.0, area / 3.0).max(10.0);

    walk(canvas, grid, Corner::random, &color);
}

pub(super) fn draw_steps(canvas: &mut PatternCanvas) {
    let color = canvas.white(3, 7.0, 9.0);
    let area = canvas.area(100.0);
    let grid = canvas.roll(area / 8.0, area / 3.0).max(10.0);
    let corner = Corner::random(canvas);

    walk(canvas, grid, |_| corner, &color);
}

fn walk<F>(canvas: &mut PatternCanvas, grid: f64, mut pick: F, color: &Color)
where
    F: FnMut(&mut PatternCanvas) -> Corner,
{
    let columns = (canvas.width / grid).floor() as usize + 1;
    let rows = (canvas.height / grid).floor() as usize + 1;

    for diagonal in 0..columns + rows - 1 {
        for x in 0..=diagonal {
            let y = diagonal - x;
            if x >= columns || y >= rows || (x + y) % 2 != 0 {
                continue;
            }

            let x1 = x as f64 * grid;
            let y1 = y as f64 * grid;
            let x2 = x1 + grid;
            let y2 = y1 + grid;

            let path = match pick(canvas) {
                Corner::Up => polyline([(x1, y1), (x2, y1), (x2, y2)]),
                Corner::Down => polyline([(x1, y2), (x2, y2), (x2, y1)]),
            };
            canvas.stroke(path, color, 2.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceRng;
    use crate::surface::Surface;

    fn even_cells(columns: usize, rows: usize) -> usize {
        (0..columns)
            .flat_map(|x| (0..rows).map(move |y| (x, y)))
            .filter(|(x, y)| (x + y) % 2 == 0)
            .count()
    }

    #[test]
    fn test_maze_draws_once_per_even_cell() {
        // 100x100 -> grid 10 -> 11 x 11 cells.
        let mut surface = Surface::new(100, 100).unwrap();
        let mut rng = SequenceRng::constant(0.4);
        let mut canvas = PatternCanvas::new(&mut surface, &mut rng, 0.0);
        draw_maze(&mut canvas);
        assert_eq!(rng.draws(), 2 + even_cells(11, 11));
    }

    #[test]
    fn test_steps_choose_direction_once() {
        let mut surface = Surface::new(100, 100).unwrap();
        let mut rng = SequenceRng::constant(0.4);
        let mut canvas = PatternCanvas::new(&mut surface, &mut rng, 0.0);
        draw_steps(&mut canvas);
        assert_eq!(rng.draws(), 3);
    }

    #[test]
    fn test_up_corner_geometry() {
        // Up corners draw the top edge of cell (0, 0): y = 0 row is lit at x = 5.
        let mut surface = Surface::new(100, 100).unwrap();
        let mut rng = SequenceRng::constant(0.0);
        let mut canvas = PatternCanvas::new(&mut surface, &mut rng, 1.0);
        draw_steps(&mut canvas);
        assert!(surface.pixel(5, 0).unwrap()[3] > 0);
        // Cell (1, 0) is odd and skipped, so its top edge stays dark.
        assert_eq!(surface.pixel(15, 0).unwrap()[3], 0);
    }
}
