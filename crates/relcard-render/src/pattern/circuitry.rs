//! Circuit-board traces: nodes on a lattice joined by straight or jogged wires.

use super::{circle, polyline, PatternCanvas};
use crate::color::Color;

/// Chance that a lattice point carries a node.
const NODE_PERCENT: f64 = 60.0;
/// Chance that a drawn connection is straight rather than jogged.
const STRAIGHT_PERCENT: f64 = 80.0;

pub(super) fn draw(canvas: &mut PatternCanvas) {
    let color = canvas.white(5, 14.0, 12.0);

    let area = canvas.area(100.0);
    let grid = canvas.roll(area / 5.0, area).max(10.0);
    let line_percent = (canvas.next() * 40.0).floor() + 50.0;
    let node_area = canvas.area(140.0);

    // Start outside the canvas so traces run off the edges.
    let margin = grid * 3.5;

    let mut x = -margin;
    while x < canvas.width + margin {
        let mut y = -margin;
        while y < canvas.height + margin {
            if canvas.rng.percent_chance(NODE_PERCENT) {
                let node_size = canvas.roll(node_area / 50.0, node_area / 20.0).max(1.0);
                canvas.fill(circle(x, y, node_size), &color);

                if x + grid < canvas.width && canvas.rng.percent_chance(line_percent) {
                    connect_right(canvas, &color, x, y, grid);
                }
                if y + grid < canvas.height && canvas.rng.percent_chance(line_percent) {
                    connect_down(canvas, &color, x, y, grid);
                }
            }
            y += grid;
        }
        x += grid;
    }
}

fn jog(canvas: &mut PatternCanvas, grid: f64) -> f64 {
    if canvas.rng.below(2) == 0 {
        grid / 2.0
    } else {
        -grid / 2.0
    }
}

fn connect_right(canvas: &mut PatternCanvas, color: &Color, x: f64, y: f64, grid: f64) {
    let path = if canvas.rng.percent_chance(STRAIGHT_PERCENT) {
        polyline([(x, y), (x + grid, y)])
    } else {
        let mid_x = x + grid / 2.0;
        let mid_y = y + jog(canvas, grid);
        polyline([
            (x, y),
            (mid_x, y),
            (mid_x, mid_y),
            (x + grid, mid_y),
            (x + grid, y),
        ])
    };
    canvas.stroke(path, color, 1.0);
}

fn connect_down(canvas: &mut PatternCanvas, color: &Color, x: f64, y: f64, grid: f64) {
    let path = if canvas.rng.percent_chance(STRAIGHT_PERCENT) {
        polyline([(x, y), (x, y + grid)])
    } else {
        let mid_y = y + grid / 2.0;
        let mid_x = x + jog(canvas, grid);
        polyline([
            (x, y),
            (x, mid_y),
            (mid_x, mid_y),
            (mid_x, y + grid),
            (x, y + grid),
        ])
    };
    canvas.stroke(path, color, 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceRng;
    use crate::surface::Surface;

    #[test]
    fn test_no_nodes_when_chance_fails() {
        // 0.99 * 100 is never below 60: only the three setup draws plus one
        // node roll per lattice point.
        let mut surface = Surface::new(100, 100).unwrap();
        let mut rng = SequenceRng::constant(0.99);
        let mut canvas = PatternCanvas::new(&mut surface, &mut rng, 0.0);
        draw(&mut canvas);

        // Grid is 10 (floor), margin 35: x and y each span -35..135 -> 17 points.
        assert_eq!(rng.draws(), 3 + 17 * 17);
        assert!(surface.into_rgba8().chunks_exact(4).all(|pixel| pixel[3] == 0));
    }

    #[test]
    fn test_jogged_connection_draw_order() {
        let mut surface = Surface::new(50, 50).unwrap();
        // straight? no (0.9), jog direction: below(2) of 0.9 -> 1 -> up.
        let mut rng = SequenceRng::new(vec![0.9, 0.9]);
        let mut canvas = PatternCanvas::new(&mut surface, &mut rng, 0.0);
        connect_right(&mut canvas, &Color::white(), 10.0, 30.0, 20.0);
        assert_eq!(rng.draws(), 2);
        // The jog rises to y = 20 between x = 20 and x = 30.
        assert!(surface.pixel(25, 20).unwrap()[3] > 0);
        assert_eq!(surface.pixel(25, 40).unwrap()[3], 0);
    }
}
