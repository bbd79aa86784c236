//! Rings around one or two random centers.

use super::{circle, PatternCanvas};

pub(super) fn draw(canvas: &mut PatternCanvas) {
    let color = canvas.white(3, 8.0, 10.0);

    let centers = canvas.rng.below(2) + 1;
    let max_radius = canvas.width.max(canvas.height);
    let area = canvas.area(100.0);

    for _ in 0..centers {
        let cx = canvas.next() * canvas.width;
        let cy = canvas.next() * canvas.height;

        // May be fractional; rings stop at the last whole step.
        let rings = canvas.roll(area / 30.0, area / 8.0).max(2.0);
        let step = max_radius / rings;

        let mut ring = 1.0;
        while ring <= rings {
            canvas.stroke(circle(cx, cy, ring * step), &color, 1.0);
            ring += 1.0;
        }
    }
}
