//! Drawing surface shared by every render stage.
//!
//! Wraps a premultiplied RGBA `tiny_skia::Pixmap`. Stages only see the
//! operations exposed here; the encoder takes the surface by value at the end.

mod blur;

use thiserror::Error;
use tiny_skia::{
    FillRule, FilterQuality, GradientStop, LinearGradient, Mask, MaskType, Paint, Path,
    PathBuilder, Pattern, Pixmap, PixmapPaint, Point, Rect, Shader, SpreadMode, Stroke,
    Transform,
};

use crate::color::Color;

pub use blur::{box_blur_rgba, box_radius_for_sigma};

/// Errors from surface allocation.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Invalid surface dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// A blurred, offset copy of a shape drawn underneath it.
#[derive(Debug, Clone, Copy)]
pub struct Shadow {
    pub color: Color,
    /// Canvas-style blur amount; the gaussian sigma is half of it.
    pub blur: f32,
    /// Applied to both axes.
    pub offset: f32,
}

/// An RGBA canvas.
pub struct Surface {
    pixmap: Pixmap,
}

impl Surface {
    /// Allocate a transparent surface.
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let pixmap =
            Pixmap::new(width, height).ok_or(SurfaceError::InvalidDimensions { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn bounds(&self) -> Option<Rect> {
        Rect::from_xywh(0.0, 0.0, self.width() as f32, self.height() as f32)
    }

    /// Cover the whole canvas with a linear gradient through `colors`,
    /// stops evenly spaced from `start` to `end`.
    pub fn fill_linear_gradient(&mut self, start: Point, end: Point, colors: &[Color]) {
        let Some(rect) = self.bounds() else { return };
        let Some(shader) = linear_gradient(start, end, colors) else { return };

        let paint = Paint {
            shader,
            anti_alias: false,
            ..Paint::default()
        };
        self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    /// Stroke `path` with a solid color.
    pub fn stroke_path(&mut self, path: &Path, color: &Color, width: f32) {
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(path, &solid_paint(color), &stroke, Transform::identity(), None);
    }

    /// Fill `path` with a solid color.
    pub fn fill_path(&mut self, path: &Path, color: &Color) {
        self.pixmap.fill_path(
            path,
            &solid_paint(color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    /// Fill `path` after drawing its shadow.
    pub fn fill_path_with_shadow(&mut self, path: &Path, color: &Color, shadow: &Shadow) {
        self.draw_shadow(path.bounds(), shadow, |layer, transform| {
            layer.fill_path(path, &opaque_paint(), FillRule::Winding, transform, None);
        });
        self.fill_path(path, color);
    }

    /// Repeat `tile` over the whole canvas, source-over.
    pub fn fill_tiled(&mut self, tile: &Pixmap) {
        let Some(rect) = self.bounds() else { return };
        let paint = Paint {
            shader: Pattern::new(
                tile.as_ref(),
                SpreadMode::Repeat,
                FilterQuality::Nearest,
                1.0,
                Transform::identity(),
            ),
            anti_alias: false,
            ..Paint::default()
        };
        self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    /// Paint `shader` through the alpha channel of `coverage` placed with `transform`.
    pub fn fill_coverage(&mut self, coverage: &Pixmap, transform: Transform, shader: Shader) {
        let Some(rect) = self.bounds() else { return };
        let Some(mut layer) = Pixmap::new(self.width(), self.height()) else {
            return;
        };
        layer.draw_pixmap(0, 0, coverage.as_ref(), &smooth_pixmap_paint(), transform, None);
        let mask = Mask::from_pixmap(layer.as_ref(), MaskType::Alpha);

        let paint = Paint {
            shader,
            anti_alias: false,
            ..Paint::default()
        };
        self.pixmap
            .fill_rect(rect, &paint, Transform::identity(), Some(&mask));
    }

    /// Draw the shadow of whatever `draw` paints, without the shape itself.
    ///
    /// `draw` receives a scratch layer and the transform mapping canvas
    /// coordinates into it; only the alpha it leaves behind matters. `bounds`
    /// is the shape's extent in canvas coordinates.
    pub fn draw_shadow<F>(&mut self, bounds: Rect, shadow: &Shadow, draw: F)
    where
        F: FnOnce(&mut Pixmap, Transform),
    {
        let radius = box_radius_for_sigma(shadow.blur / 2.0);
        let margin = (radius * 3 + 2) as f32;

        let left = (bounds.left() - margin).floor();
        let top = (bounds.top() - margin).floor();
        let width = (bounds.width() + margin * 2.0).ceil() as u32 + 1;
        let height = (bounds.height() + margin * 2.0).ceil() as u32 + 1;
        let Some(mut layer) = Pixmap::new(width, height) else {
            return;
        };

        draw(&mut layer, Transform::from_translate(-left, -top));
        tint_by_alpha(&mut layer, &shadow.color);
        box_blur_rgba(layer.data_mut(), width as usize, height as usize, radius);

        self.pixmap.draw_pixmap(
            0,
            0,
            layer.as_ref(),
            &smooth_pixmap_paint(),
            Transform::from_translate(left + shadow.offset, top + shadow.offset),
            None,
        );
    }

    /// Demultiplied RGBA at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let color = self.pixmap.pixel(x, y)?.demultiply();
        Some([color.red(), color.green(), color.blue(), color.alpha()])
    }

    /// Consume the surface, yielding demultiplied RGBA rows.
    pub fn into_rgba8(self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.pixmap.data().len());
        for pixel in self.pixmap.pixels() {
            let color = pixel.demultiply();
            data.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
        }
        data
    }
}

/// Convert to a tiny-skia color, clamping every channel.
pub fn skia_color(color: &Color) -> tiny_skia::Color {
    let rgb = color.rgb();
    let alpha = if color.alpha().is_nan() {
        0.0
    } else {
        color.alpha().clamp(0.0, 1.0)
    };
    tiny_skia::Color::from_rgba(rgb.r as f32, rgb.g as f32, rgb.b as f32, alpha as f32)
        .unwrap_or(tiny_skia::Color::TRANSPARENT)
}

/// A linear gradient with `colors` spread evenly over `[0, 1]`.
///
/// Returns `None` when `colors` is empty.
pub fn linear_gradient(start: Point, end: Point, colors: &[Color]) -> Option<Shader<'static>> {
    let last = colors.last()?;
    if colors.len() == 1 {
        return Some(Shader::SolidColor(skia_color(last)));
    }

    let denominator = (colors.len() - 1) as f32;
    let stops = colors
        .iter()
        .enumerate()
        .map(|(i, color)| GradientStop::new(i as f32 / denominator, skia_color(color)))
        .collect();

    LinearGradient::new(start, end, stops, SpreadMode::Pad, Transform::identity())
        .or(Some(Shader::SolidColor(skia_color(last))))
}

/// A closed rounded rectangle; `radius` is clamped to half the shorter side.
pub fn rounded_rect_path(x: f32, y: f32, width: f32, height: f32, radius: f32) -> Option<Path> {
    let r = radius.max(0.0).min(width / 2.0).min(height / 2.0);
    // Cubic control distance for a quarter circle.
    let k = r * 0.552_284_8;
    let (right, bottom) = (x + width, y + height);

    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(right - r, y);
    pb.cubic_to(right - r + k, y, right, y + r - k, right, y + r);
    pb.line_to(right, bottom - r);
    pb.cubic_to(right, bottom - r + k, right - r + k, bottom, right - r, bottom);
    pb.line_to(x + r, bottom);
    pb.cubic_to(x + r - k, bottom, x, bottom - r + k, x, bottom - r);
    pb.line_to(x, y + r);
    pb.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    pb.close();
    pb.finish()
}

fn solid_paint(color: &Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(skia_color(color));
    paint.anti_alias = true;
    paint
}

fn opaque_paint() -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(0, 0, 0, 255);
    paint.anti_alias = true;
    paint
}

fn smooth_pixmap_paint() -> PixmapPaint {
    PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    }
}

/// Replace every pixel's color with `color`, scaling its alpha by the
/// pixel's existing coverage. Output stays premultiplied.
fn tint_by_alpha(layer: &mut Pixmap, color: &Color) {
    let [r, g, b, a] = color.to_rgba8();
    for pixel in layer.data_mut().chunks_exact_mut(4) {
        let coverage = u32::from(pixel[3]) * u32::from(a) / 255;
        pixel[0] = (u32::from(r) * coverage / 255) as u8;
        pixel[1] = (u32::from(g) * coverage / 255) as u8;
        pixel[2] = (u32::from(b) * coverage / 255) as u8;
        pixel[3] = coverage as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_sized_surface_is_rejected() {
        assert!(matches!(
            Surface::new(0, 10),
            Err(SurfaceError::InvalidDimensions { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_new_surface_is_transparent() {
        let surface = Surface::new(4, 3).unwrap();
        assert_eq!(surface.pixel(2, 1), Some([0, 0, 0, 0]));
        assert_eq!(surface.into_rgba8().len(), 4 * 3 * 4);
    }

    #[test]
    fn test_gradient_runs_between_end_colors() {
        let mut surface = Surface::new(100, 1).unwrap();
        let black = Color::new(0.0, 0.0, 0.0, 1.0);
        surface.fill_linear_gradient(
            Point::from_xy(0.0, 0.0),
            Point::from_xy(100.0, 0.0),
            &[black, Color::white()],
        );
        let left = surface.pixel(0, 0).unwrap();
        let right = surface.pixel(99, 0).unwrap();
        assert!(left[0] < 10, "{left:?}");
        assert!(right[0] > 245, "{right:?}");
        assert_eq!(left[3], 255);
    }

    #[test]
    fn test_fill_path_paints_inside_only() {
        let mut surface = Surface::new(20, 20).unwrap();
        let path = PathBuilder::from_rect(Rect::from_xywh(5.0, 5.0, 10.0, 10.0).unwrap());
        surface.fill_path(&path, &Color::white());
        assert_eq!(surface.pixel(10, 10), Some([255, 255, 255, 255]));
        assert_eq!(surface.pixel(1, 1), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_shadow_is_offset_and_soft() {
        let mut surface = Surface::new(60, 60).unwrap();
        let path = PathBuilder::from_rect(Rect::from_xywh(20.0, 20.0, 10.0, 10.0).unwrap());
        let shadow = Shadow {
            color: Color::new(0.0, 0.0, 0.0, 1.0),
            blur: 6.0,
            offset: 5.0,
        };
        surface.fill_path_with_shadow(&path, &Color::white(), &shadow);

        // Shape on top of its shadow.
        assert_eq!(surface.pixel(25, 25), Some([255, 255, 255, 255]));
        // Shadow visible below-right of the shape, fading outwards.
        let near = surface.pixel(32, 32).unwrap()[3];
        let far = surface.pixel(45, 45).unwrap()[3];
        assert!(near > 0);
        assert!(far < near);
        // Nothing up-left of the shape.
        assert_eq!(surface.pixel(10, 10).unwrap()[3], 0);
    }

    #[test]
    fn test_tiled_fill_repeats() {
        let mut tile = Pixmap::new(2, 1).unwrap();
        tile.data_mut().copy_from_slice(&[255, 0, 0, 255, 0, 0, 255, 255]);
        let mut surface = Surface::new(6, 2).unwrap();
        surface.fill_tiled(&tile);
        for x in 0..6 {
            let expected = if x % 2 == 0 { [255, 0, 0, 255] } else { [0, 0, 255, 255] };
            assert_eq!(surface.pixel(x, 1), Some(expected));
        }
    }

    #[test]
    fn test_fill_coverage_uses_mask_alpha() {
        let mut coverage = Pixmap::new(2, 2).unwrap();
        coverage.data_mut()[..4].copy_from_slice(&[255, 255, 255, 255]);
        let mut surface = Surface::new(4, 4).unwrap();
        surface.fill_coverage(
            &coverage,
            Transform::from_translate(1.0, 1.0),
            Shader::SolidColor(tiny_skia::Color::WHITE),
        );
        assert!(surface.pixel(1, 1).unwrap()[3] > 200);
        assert!(surface.pixel(2, 2).unwrap()[3] < 30);
        assert_eq!(surface.pixel(0, 0).unwrap()[3], 0);
    }

    #[test]
    fn test_rounded_rect_radius_is_clamped() {
        let path = rounded_rect_path(0.0, 0.0, 10.0, 4.0, 50.0).unwrap();
        let bounds = path.bounds();
        assert!((bounds.width() - 10.0).abs() < 1e-3);
        assert!((bounds.height() - 4.0).abs() < 1e-3);
    }
}
