//! Evenly spaced horizontal and vertical hairlines.

use tiny_skia::PathBuilder;

use super::PatternCanvas;

pub(super) fn draw(canvas: &mut PatternCanvas) {
    let color = canvas.white(3, 10.0, 7.0);
    let area = canvas.area(100.0);
    let spacing = canvas.roll(area / 7.0, area / 3.0).max(10.0);

    let (width, height) = (canvas.width, canvas.height);
    let mut pb = PathBuilder::new();

    let mut x = 0.0;
    while x < width {
        pb.move_to(x as f32, 0.0);
        pb.line_to(x as f32, height as f32);
        x += spacing;
    }

    let mut y = 0.0;
    while y < height {
        pb.move_to(0.0, y as f32);
        pb.line_to(width as f32, y as f32);
        y += spacing;
    }

    canvas.stroke(pb.finish(), &color, 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceRng;
    use crate::surface::Surface;

    #[test]
    fn test_lines_fall_on_spacing() {
        // 200x200: area 4, spacing clamps to 10.
        let mut surface = Surface::new(200, 200).unwrap();
        let mut rng = SequenceRng::constant(0.0);
        let mut canvas = PatternCanvas::new(&mut surface, &mut rng, 1.0);
        draw(&mut canvas);

        assert!(surface.pixel(10, 5).unwrap()[3] > 0);
        assert!(surface.pixel(5, 20).unwrap()[3] > 0);
        assert_eq!(surface.pixel(5, 5).unwrap()[3], 0);
    }
}
