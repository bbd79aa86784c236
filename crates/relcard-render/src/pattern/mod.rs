//! Translucent line and shape patterns drawn over the background.
//!
//! Every pattern strokes or fills white at a low, partly random alpha. Sizes
//! and spacings scale with canvas area rather than fixed pixel counts, so a
//! 4K card and a thumbnail look alike.

mod circuitry;
mod concentric;
mod diagonal;
mod dots;
mod geometry;
mod grid;
mod hexagons;
mod waves;

use relcard_spec::PatternType;
use tiny_skia::{Path, PathBuilder};

use crate::color::Color;
use crate::rng::RandomSource;
use crate::surface::Surface;

/// Draw one pattern and return which one was drawn.
///
/// `requested` is honored as-is; otherwise a pattern is picked uniformly from
/// [`PatternType::random_candidates`], which never yields `Geometry`.
pub fn generate_pattern(
    surface: &mut Surface,
    rng: &mut dyn RandomSource,
    primary: &Color,
    requested: Option<PatternType>,
) -> PatternType {
    let lightness = primary.oklch().l + rng.next_f64() * 2.5;

    let pattern = requested.unwrap_or_else(|| {
        let candidates = PatternType::random_candidates();
        candidates[rng.below(candidates.len())]
    });
    log::debug!("drawing {pattern} pattern (lightness {lightness:.3})");

    let mut canvas = PatternCanvas::new(surface, rng, lightness);
    match pattern {
        PatternType::Grid => grid::draw(&mut canvas),
        PatternType::Dots => dots::draw(&mut canvas),
        PatternType::Waves => waves::draw(&mut canvas),
        PatternType::Geometry => geometry::draw(&mut canvas),
        PatternType::Triangles => hexagons::draw_triangles(&mut canvas),
        PatternType::Hexagons => hexagons::draw_honeycomb(&mut canvas),
        PatternType::Concentric => concentric::draw(&mut canvas),
        PatternType::Circuitry => circuitry::draw(&mut canvas),
        PatternType::Maze => diagonal::draw_maze(&mut canvas),
        PatternType::Steps => diagonal::draw_steps(&mut canvas),
    }

    pattern
}

/// Surface, random stream and tuning input shared by every pattern.
pub(crate) struct PatternCanvas<'a> {
    surface: &'a mut Surface,
    rng: &'a mut dyn RandomSource,
    lightness: f64,
    width: f64,
    height: f64,
}

impl<'a> PatternCanvas<'a> {
    fn new(surface: &'a mut Surface, rng: &'a mut dyn RandomSource, lightness: f64) -> Self {
        let width = f64::from(surface.width());
        let height = f64::from(surface.height());
        Self {
            surface,
            rng,
            lightness,
            width,
            height,
        }
    }

    fn next(&mut self) -> f64 {
        self.rng.next_f64()
    }

    /// `(width / unit) * (height / unit)`.
    fn area(&self, unit: f64) -> f64 {
        (self.width / unit) * (self.height / unit)
    }

    /// `floor(r * (high - low)) + low`: an integer step above `low`, below `high`.
    fn roll(&mut self, low: f64, high: f64) -> f64 {
        (self.next() * (high - low)).floor() + low
    }

    /// White with alpha `(floor(r * spread) + lightness * weight + base) / 255`.
    fn white(&mut self, spread: usize, weight: f64, base: f64) -> Color {
        let jitter = self.rng.below(spread) as f64;
        let alpha = (jitter + self.lightness * weight + base) / 255.0;
        Color::white().with_alpha(alpha)
    }

    fn stroke(&mut self, path: Option<Path>, color: &Color, width: f32) {
        if let Some(path) = path {
            self.surface.stroke_path(&path, color, width);
        }
    }

    fn fill(&mut self, path: Option<Path>, color: &Color) {
        if let Some(path) = path {
            self.surface.fill_path(&path, color);
        }
    }
}

/// An open path through `points`.
fn polyline<I>(points: I) -> Option<Path>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut pb = PathBuilder::new();
    for (i, (x, y)) in points.into_iter().enumerate() {
        if i == 0 {
            pb.move_to(x as f32, y as f32);
        } else {
            pb.line_to(x as f32, y as f32);
        }
    }
    pb.finish()
}

/// A closed polygon through `points`.
fn polygon<I>(points: I) -> Option<Path>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut pb = PathBuilder::new();
    for (i, (x, y)) in points.into_iter().enumerate() {
        if i == 0 {
            pb.move_to(x as f32, y as f32);
        } else {
            pb.line_to(x as f32, y as f32);
        }
    }
    pb.close();
    pb.finish()
}

fn circle(cx: f64, cy: f64, radius: f64) -> Option<Path> {
    PathBuilder::from_circle(cx as f32, cy as f32, radius as f32)
}

/// Vertices of a regular hexagon, the first at `start_angle` radians.
fn hexagon(cx: f64, cy: f64, radius: f64, start_angle: f64) -> Option<Path> {
    polygon((0..6).map(|i| {
        let angle = std::f64::consts::PI / 3.0 * f64::from(i) + start_angle;
        (cx + radius * angle.cos(), cy + radius * angle.sin())
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{DeterministicRng, SequenceRng};

    fn blank(width: u32, height: u32) -> Surface {
        Surface::new(width, height).unwrap()
    }

    fn painted_pixels(surface: Surface) -> usize {
        surface
            .into_rgba8()
            .chunks_exact(4)
            .filter(|pixel| pixel[3] > 0)
            .count()
    }

    #[test]
    fn test_random_selection_never_picks_geometry() {
        let primary = Color::new(0.5, 0.1, 0.0, 1.0);
        for seed in 0..200 {
            let mut surface = blank(100, 100);
            let mut rng = DeterministicRng::new(seed);
            let pattern = generate_pattern(&mut surface, &mut rng, &primary, None);
            assert_ne!(pattern, PatternType::Geometry, "seed {seed}");
        }
    }

    #[test]
    fn test_selection_uses_second_draw() {
        // First draw feeds lightness, second picks index floor(0.99 * 9) = 8.
        let mut rng = SequenceRng::new(vec![0.0, 0.99, 0.5]);
        let mut surface = blank(100, 100);
        let pattern = generate_pattern(&mut surface, &mut rng, &Color::white(), None);
        assert_eq!(pattern, PatternType::Steps);
    }

    #[test]
    fn test_every_pattern_draws_something() {
        let primary = Color::new(0.6, 0.12, 220.0, 1.0);
        for &requested in PatternType::all() {
            let mut surface = blank(400, 300);
            let mut rng = DeterministicRng::new(11);
            let drawn = generate_pattern(&mut surface, &mut rng, &primary, Some(requested));
            assert_eq!(drawn, requested);
            assert!(painted_pixels(surface) > 0, "{requested} left the canvas empty");
        }
    }

    #[test]
    fn test_patterns_are_translucent() {
        let primary = Color::new(0.9, 0.1, 100.0, 1.0);
        for &requested in PatternType::all() {
            let mut surface = blank(300, 300);
            let mut rng = DeterministicRng::new(3);
            generate_pattern(&mut surface, &mut rng, &primary, Some(requested));
            let max_alpha = surface
                .into_rgba8()
                .chunks_exact(4)
                .map(|pixel| pixel[3])
                .max()
                .unwrap_or(0);
            assert!(max_alpha < 240, "{requested} reached alpha {max_alpha}");
        }
    }

    #[test]
    fn test_explicit_geometry_is_deterministic() {
        let render = || {
            let mut surface = blank(500, 250);
            let mut rng = DeterministicRng::new(99);
            generate_pattern(&mut surface, &mut rng, &Color::white(), Some(PatternType::Geometry));
            surface.into_rgba8()
        };
        assert_eq!(render(), render());
    }

    #[test]
    fn test_roll_stays_in_range() {
        let mut surface = blank(10, 10);
        let mut rng = SequenceRng::new(vec![0.0, 0.999]);
        let mut canvas = PatternCanvas::new(&mut surface, &mut rng, 0.5);
        assert_eq!(canvas.roll(4.0, 10.0), 4.0);
        assert_eq!(canvas.roll(4.0, 10.0), 9.0);
    }
}
