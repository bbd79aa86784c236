//! Scattered outline squares, circles and triangles, one per lattice cell.

use tiny_skia::{PathBuilder, Rect};

use super::{circle, polygon, PatternCanvas};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Square,
    Circle,
    Triangle,
}

impl Shape {
    fn from_index(index: usize) -> Self {
        match index {
            0 => Shape::Square,
            1 => Shape::Circle,
            _ => Shape::Triangle,
        }
    }
}

pub(super) fn draw(canvas: &mut PatternCanvas) {
    let color = canvas.white(4, 17.0, 18.0);

    let area = canvas.area(140.0);
    let shape_count = canvas.roll(area / 100.0, area / 50.0).max(10.0);
    let spacing = canvas.width / shape_count;
    let longest = canvas.width.max(canvas.height);

    let mut x = spacing / 4.0;
    while x < canvas.width {
        let mut y = spacing / 4.0;
        while y < canvas.height {
            let shape = Shape::from_index(canvas.rng.below(3));
            let size = canvas.roll(longest / 100.0, longest / 40.0).max(10.0);
            let jitter = canvas.roll(longest / 100.0, longest / 50.0).max(0.0);
            let cx = x + canvas.next() * jitter * 2.0 - jitter;
            let cy = y + canvas.next() * jitter * 2.0 - jitter;
            let half = size / 2.0;

            let path = match shape {
                Shape::Square => Rect::from_xywh(
                    (cx - half) as f32,
                    (cy - half) as f32,
                    size as f32,
                    size as f32,
                )
                .map(PathBuilder::from_rect),
                Shape::Circle => circle(cx, cy, half),
                Shape::Triangle => polygon([
                    (cx, cy - half),
                    (cx - half, cy + half),
                    (cx + half, cy + half),
                ]),
            };
            canvas.stroke(path, &color, 1.0);
            y += spacing;
        }
        x += spacing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceRng;
    use crate::surface::Surface;

    #[test]
    fn test_shape_index_mapping() {
        assert_eq!(Shape::from_index(0), Shape::Square);
        assert_eq!(Shape::from_index(1), Shape::Circle);
        assert_eq!(Shape::from_index(2), Shape::Triangle);
    }

    #[test]
    fn test_at_least_ten_columns() {
        // Tiny area forces shape_count to its floor of 10: cells start at
        // spacing / 4 and step by spacing, so 10 x 10 cells of 5 draws each.
        let mut surface = Surface::new(200, 200).unwrap();
        let mut rng = SequenceRng::constant(0.0);
        let mut canvas = PatternCanvas::new(&mut surface, &mut rng, 0.0);
        draw(&mut canvas);
        assert_eq!(rng.draws(), 2 + 10 * 10 * 5);
    }
}
