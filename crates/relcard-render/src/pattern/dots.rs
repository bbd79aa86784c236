//! A jittered lattice of small filled circles.

use super::{circle, PatternCanvas};

pub(super) fn draw(canvas: &mut PatternCanvas) {
    let color = canvas.white(3, 11.0, 12.0);

    let area = canvas.area(100.0);
    let spacing = canvas.roll(area / 8.0, area / 5.0).max(10.0);
    let small_area = canvas.area(140.0);
    let dot_size = canvas.roll(small_area / 100.0, small_area / 40.0).max(1.0);
    let jitter_area = canvas.area(150.0);

    let mut x = 0.0;
    while x < canvas.width {
        let mut y = 0.0;
        while y < canvas.height {
            let jitter = canvas.roll(jitter_area / 50.0, jitter_area / 25.0).max(0.0);
            let offset_x = canvas.next() * jitter * 2.0 - jitter;
            let offset_y = canvas.next() * jitter * 2.0 - jitter;

            canvas.fill(circle(x + offset_x, y + offset_y, dot_size), &color);
            y += spacing;
        }
        x += spacing;
    }
}
