//! Layered corner-to-corner gradient background.

use tiny_skia::Point;

use crate::color::{random_color, random_palette, Color};
use crate::rng::RandomSource;
use crate::surface::Surface;

/// Colors in the opaque base gradient.
const BASE_COLORS: usize = 8;

/// Gradient direction: one of the four canvas diagonals.
fn random_diagonal(rng: &mut dyn RandomSource, width: f32, height: f32) -> (Point, Point) {
    let diagonals = [
        ((0.0, 0.0), (width, height)),
        ((width, 0.0), (0.0, height)),
        ((0.0, height), (width, 0.0)),
        ((width, height), (0.0, 0.0)),
    ];
    let ((x1, y1), (x2, y2)) = diagonals[rng.below(diagonals.len())];
    (Point::from_xy(x1, y1), Point::from_xy(x2, y2))
}

/// Paint three stacked diagonal gradients over the whole surface.
///
/// The base layer uses eight unconstrained random colors and fully covers the
/// canvas. Two translucent layers derived from `primary` (7 colors at 30°
/// spacing with alpha 0.3, then 3 colors at 40° with alpha 0.2) tint it
/// towards the primary hue.
pub fn generate_background(surface: &mut Surface, rng: &mut dyn RandomSource, primary: &Color) {
    let width = surface.width() as f32;
    let height = surface.height() as f32;

    let base: Vec<Color> = (0..BASE_COLORS).map(|_| random_color(rng, &[])).collect();
    let (start, end) = random_diagonal(rng, width, height);
    surface.fill_linear_gradient(start, end, &base);

    let harmonic = random_palette(primary, 6, 30.0, 0.3);
    let (start, end) = random_diagonal(rng, width, height);
    surface.fill_linear_gradient(start, end, &harmonic);

    let accent = random_palette(primary, 3, 40.0, 0.2);
    let (start, end) = random_diagonal(rng, width, height);
    surface.fill_linear_gradient(start, end, &accent);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{DeterministicRng, SequenceRng};

    #[test]
    fn test_background_is_opaque_everywhere() {
        let mut surface = Surface::new(64, 48).unwrap();
        let mut rng = DeterministicRng::new(1);
        let primary = Color::new(0.6, 0.15, 40.0, 1.0);
        generate_background(&mut surface, &mut rng, &primary);

        for (x, y) in [(0, 0), (63, 0), (0, 47), (63, 47), (32, 24)] {
            assert_eq!(surface.pixel(x, y).unwrap()[3], 255, "({x}, {y})");
        }
    }

    #[test]
    fn test_background_draw_count() {
        // 8 colors x 3 draws + 3 diagonal picks.
        let mut rng = SequenceRng::new(vec![0.3, 0.7, 0.1]);
        let mut surface = Surface::new(8, 8).unwrap();
        generate_background(&mut surface, &mut rng, &Color::white());
        assert_eq!(rng.draws(), 27);
    }

    #[test]
    fn test_same_seed_same_pixels() {
        let render = |seed| {
            let mut surface = Surface::new(32, 16).unwrap();
            let mut rng = DeterministicRng::new(seed);
            generate_background(&mut surface, &mut rng, &Color::new(0.5, 0.1, 200.0, 1.0));
            surface.into_rgba8()
        };
        assert_eq!(render(5), render(5));
        assert_ne!(render(5), render(6));
    }
}
