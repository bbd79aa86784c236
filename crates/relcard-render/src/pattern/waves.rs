//! Sine-perturbed horizontal and vertical polylines.

use std::f64::consts::TAU;

use super::{polyline, PatternCanvas};

/// Horizontal distance between polyline vertices.
const STEP: f64 = 2.0;

pub(super) fn draw(canvas: &mut PatternCanvas) {
    let color = canvas.white(3, 9.0, 8.0);

    let area = canvas.area(100.0);
    let spacing = canvas.roll(area / 7.0, area / 3.0).max(10.0);
    let amplitude = canvas.roll(area / 14.0, area / 8.0).max(5.0);
    let frequency = canvas.roll(area / 30.0, area / 15.0).max(2.0);

    let (width, height) = (canvas.width, canvas.height);

    let mut y = 0.0;
    while y < height {
        let wave = std::iter::once((0.0, y)).chain(samples(width).map(|x| {
            (x, y + (x * frequency / width * TAU).sin() * amplitude)
        }));
        canvas.stroke(polyline(wave), &color, 1.0);
        y += spacing;
    }

    // The vertical pass gets its own, much lower frequency.
    let frequency = (canvas.next() * 3.0).floor() + 2.0;
    let mut x = 0.0;
    while x < width {
        let wave = std::iter::once((x, 0.0)).chain(samples(height).map(|y| {
            (x + (y * frequency / height * TAU).sin() * amplitude, y)
        }));
        canvas.stroke(polyline(wave), &color, 1.0);
        x += spacing;
    }
}

fn samples(length: f64) -> impl Iterator<Item = f64> {
    (0..).map(|i| f64::from(i) * STEP).take_while(move |&t| t < length)
}
