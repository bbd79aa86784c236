//! Centered headline on a frosted-glass panel, with an optional label pill.
//!
//! Layout is computed first ([`layout_text`]) and drawn second
//! ([`render_text`]). Text consumes no randomness.

mod bitmap;
mod fit;
mod font;
mod label;

use tiny_skia::{Pixmap, PixmapPaint, Point, Rect, Shader, Transform};

use crate::color::{create_color, Color};
use crate::surface::{linear_gradient, rounded_rect_path, Shadow, Surface};

pub use fit::{max_font_size, MIN_FONT_SIZE, TEXT_SCALE_X};
pub use font::{
    font_file_name, DirectorySource, FileSource, FontSource, FontStack, PreloadedSource,
    TextMetrics, TextRaster, Typeface, FALLBACK_FONT_FILE,
};
pub use label::{label_font_size, label_gap};

/// What to draw and with which faces.
#[derive(Debug, Clone, Copy)]
pub struct TextRequest<'a> {
    pub text: Option<&'a str>,
    pub label: Option<&'a str>,
    pub face: &'a Typeface,
    pub label_face: &'a Typeface,
}

/// One line of text placed on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunLayout<'a> {
    pub text: &'a str,
    pub font_size: f32,
    pub metrics: TextMetrics,
    /// Canvas x of the pen start.
    pub left: f32,
    /// Canvas y of the baseline.
    pub baseline: f32,
}

impl<'a> RunLayout<'a> {
    /// Center horizontally with the top of the ink at `ink_top`.
    fn place(text: &'a str, font_size: f32, metrics: TextMetrics, canvas_width: f32, ink_top: f32) -> Self {
        Self {
            text,
            font_size,
            metrics,
            left: (canvas_width - metrics.width * TEXT_SCALE_X) / 2.0,
            baseline: ink_top + metrics.ascent,
        }
    }

    /// Rendered width after horizontal scaling.
    pub fn width(&self) -> f32 {
        self.metrics.width * TEXT_SCALE_X
    }

    pub fn ink_top(&self) -> f32 {
        self.baseline - self.metrics.ascent
    }

    /// Advance-width by ink-height box.
    pub fn ink_rect(&self) -> Option<Rect> {
        Rect::from_xywh(
            self.left,
            self.ink_top(),
            self.width().max(f32::EPSILON),
            self.metrics.ink_height().max(f32::EPSILON),
        )
    }

    /// Maps raster coordinates onto the canvas.
    fn transform(&self, raster: &TextRaster) -> Transform {
        Transform::from_row(
            TEXT_SCALE_X,
            0.0,
            0.0,
            1.0,
            self.left - raster.origin_x * TEXT_SCALE_X,
            self.baseline - raster.baseline,
        )
    }

    fn raster_bounds(&self, raster: &TextRaster) -> Option<Rect> {
        Rect::from_xywh(
            self.left - raster.origin_x * TEXT_SCALE_X,
            self.baseline - raster.baseline,
            raster.coverage.width() as f32 * TEXT_SCALE_X,
            raster.coverage.height() as f32,
        )
    }
}

/// Where the headline and label land.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextLayout<'a> {
    pub main: Option<RunLayout<'a>>,
    pub label: Option<RunLayout<'a>>,
}

impl TextLayout<'_> {
    /// The glass panel behind the headline.
    pub fn panel_rect(&self) -> Option<Rect> {
        let main = self.main.as_ref()?;
        let size = main.font_size;
        let (pad_x, pad_y) = (size / 2.0, size / 3.0);
        Rect::from_xywh(
            main.left - pad_x,
            main.ink_top() - pad_y,
            main.width() + pad_x * 2.0,
            main.metrics.ink_height() + pad_y * 2.0,
        )
    }

    pub fn pill_rect(&self) -> Option<Rect> {
        self.label.as_ref().and_then(label::pill_rect)
    }
}

/// Size and place the headline and label for a `width` x `height` canvas.
///
/// The headline is as large as fits two thirds of the width and a third of
/// the short side (a quarter when a label is present). The label sits above
/// the headline and the pair is vertically centered.
pub fn layout_text<'a>(width: u32, height: u32, request: &TextRequest<'a>) -> TextLayout<'a> {
    let (w, h) = (width as f32, height as f32);
    let text = request.text.filter(|text| !text.is_empty());
    let label = request.label.filter(|label| !label.trim().is_empty());

    let short_side = if w > h { h } else { w };
    let height_cap = if label.is_some() {
        short_side / 4.0
    } else {
        short_side / 3.0
    };

    let main = text.map(|text| {
        let face = request.face;
        let size = max_font_size(|px| face.measure(text, px).width, w - w / 3.0, height_cap);
        (text, size, face.measure(text, size))
    });

    let label = label.map(|label| {
        let main_size = main.map_or(0.0, |(_, size, _)| size);
        let size = label_font_size(w, h, label.chars().count(), main_size);
        (label, size, request.label_face.measure(label, size))
    });

    let gap = match (&main, &label) {
        (Some((text, _, _)), Some((_, label_size, _))) => label_gap(*label_size, text.chars().count()),
        _ => 0.0,
    };
    let total = main.map_or(0.0, |(_, _, m)| m.ink_height())
        + label.map_or(0.0, |(_, _, m)| m.ink_height())
        + gap;

    let mut top = h / 2.0 - total / 2.0;
    let label = label.map(|(label, size, metrics)| {
        let run = RunLayout::place(label, size, metrics, w, top);
        top += metrics.ink_height() + gap;
        run
    });
    let main = main.map(|(text, size, metrics)| RunLayout::place(text, size, metrics, w, top));

    TextLayout { main, label }
}

/// Draw the headline panel and label pill onto `surface`.
pub fn render_text<'a>(surface: &mut Surface, request: &TextRequest<'a>, primary: &Color) -> TextLayout<'a> {
    let layout = layout_text(surface.width(), surface.height(), request);

    if let Some(main) = &layout.main {
        log::debug!("headline at {:.0}px: {:?}", main.font_size, main.text);
        draw_headline(surface, request.face, main, layout.panel_rect(), primary);
    }
    if let Some(run) = &layout.label {
        log::debug!("label at {:.0}px: {:?}", run.font_size, run.text);
        label::draw_label(surface, request.label_face, run, primary);
    }

    layout
}

/// Lightness of the gradient's far end: near white, brighter for light primaries.
pub fn tint_lightness(primary: &Color) -> f64 {
    (0.8 + ((primary.oklch().l - 0.8) * 0.5).max(0.0)).min(1.0)
}

fn draw_headline(surface: &mut Surface, face: &Typeface, run: &RunLayout, panel: Option<Rect>, primary: &Color) {
    let Some(raster) = face.rasterize(run.text, run.font_size) else {
        log::debug!("headline too small to rasterize");
        return;
    };
    let size = run.font_size;

    draw_run_shadow(
        surface,
        run,
        &raster,
        &Shadow {
            color: Color::black(0.31),
            blur: 5.0,
            offset: size / 100.0,
        },
    );

    let Some(panel) = panel else { return };
    if let Some(path) = rounded_rect_path(panel.x(), panel.y(), panel.width(), panel.height(), size / 4.0) {
        let glass = Color::white().with_alpha(0.16);
        let shadow = Shadow {
            color: Color::black(0.2),
            blur: 10.0,
            offset: size / 50.0,
        };
        // The panel is painted twice: once carrying its shadow, once plain.
        surface.fill_path_with_shadow(&path, &glass, &shadow);
        surface.fill_path(&path, &glass);
        surface.stroke_path(&path, &Color::white().with_alpha(0.31), 4.0);
    }

    let tint = create_color(tint_lightness(primary), 0.0, 0.0, 1.0);
    if let Some(shader) = linear_gradient(
        Point::from_xy(panel.left(), panel.top()),
        Point::from_xy(panel.right(), panel.bottom()),
        &[Color::white(), tint],
    ) {
        fill_run(surface, run, &raster, shader);
    }
}

pub(crate) fn draw_run_shadow(surface: &mut Surface, run: &RunLayout, raster: &TextRaster, shadow: &Shadow) {
    let Some(bounds) = run.raster_bounds(raster) else { return };
    let placement = run.transform(raster);
    let coverage: &Pixmap = &raster.coverage;

    surface.draw_shadow(bounds, shadow, |layer, to_layer| {
        layer.draw_pixmap(
            0,
            0,
            coverage.as_ref(),
            &PixmapPaint::default(),
            to_layer.pre_concat(placement),
            None,
        );
    });
}

pub(crate) fn fill_run(surface: &mut Surface, run: &RunLayout, raster: &TextRaster, shader: Shader) {
    surface.fill_coverage(&raster.coverage, run.transform(raster), shader);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request<'a>(text: Option<&'a str>, label: Option<&'a str>) -> TextRequest<'a> {
        TextRequest {
            text,
            label,
            face: &Typeface::Builtin,
            label_face: &Typeface::Builtin,
        }
    }

    fn center(rect: Rect) -> (f32, f32) {
        (rect.x() + rect.width() / 2.0, rect.y() + rect.height() / 2.0)
    }

    #[test]
    fn test_headline_is_centered_and_fits() {
        let layout = layout_text(1200, 600, &request(Some("v1.2.3"), None));
        let main = layout.main.unwrap();
        let (cx, cy) = center(main.ink_rect().unwrap());
        assert!((cx - 600.0).abs() < 1.0, "cx = {cx}");
        assert!((cy - 300.0).abs() < 1.0, "cy = {cy}");
        assert!(main.width() <= 800.0);
        assert!(main.font_size <= 200.0);
        assert!(layout.label.is_none());
    }

    #[test]
    fn test_long_headline_shrinks_to_width() {
        let short = layout_text(1200, 600, &request(Some("v1"), None)).main.unwrap();
        let long = layout_text(1200, 600, &request(Some("release candidate 12"), None))
            .main
            .unwrap();
        assert!(long.font_size < short.font_size);
        assert!(long.width() <= 800.0);
    }

    #[test]
    fn test_portrait_uses_width_cap() {
        let main = layout_text(600, 1200, &request(Some("1"), None)).main.unwrap();
        assert!(main.font_size <= 200.0);
    }

    #[test]
    fn test_panel_pads_the_ink() {
        let layout = layout_text(1200, 600, &request(Some("v2"), None));
        let main = layout.main.unwrap();
        let ink = main.ink_rect().unwrap();
        let panel = layout.panel_rect().unwrap();
        assert!((ink.left() - panel.left() - main.font_size / 2.0).abs() < 1e-3);
        assert!((ink.top() - panel.top() - main.font_size / 3.0).abs() < 1e-3);
        let (ix, iy) = center(ink);
        let (px, py) = center(panel);
        assert!((ix - px).abs() < 1e-3 && (iy - py).abs() < 1e-3);
    }

    #[test]
    fn test_label_sits_above_headline() {
        let layout = layout_text(1200, 600, &request(Some("v3.0.0"), Some("BETA")));
        let main = layout.main.unwrap();
        let label = layout.label.unwrap();
        assert!(label.baseline < main.ink_top());
        assert!(main.font_size <= 150.0, "label shrinks the headline cap");

        // The pair is centered as a block.
        let top = label.ink_top();
        let bottom = main.baseline + main.metrics.descent;
        assert!(((top + bottom) / 2.0 - 300.0).abs() < 1.0);
    }

    #[test]
    fn test_blank_inputs_produce_nothing() {
        let layout = layout_text(800, 400, &request(Some(""), Some("   ")));
        assert_eq!(layout, TextLayout::default());
        assert!(layout.panel_rect().is_none());
    }

    #[test]
    fn test_label_alone_is_centered() {
        let layout = layout_text(800, 400, &request(None, Some("NEW")));
        let label = layout.label.unwrap();
        let (cx, cy) = center(label.ink_rect().unwrap());
        assert!((cx - 400.0).abs() < 1.0 && (cy - 200.0).abs() < 1.0);
    }

    #[test]
    fn test_tint_lightness() {
        assert_eq!(tint_lightness(&Color::new(0.5, 0.1, 0.0, 1.0)), 0.8);
        assert!((tint_lightness(&Color::new(1.0, 0.0, 0.0, 1.0)) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_render_touches_only_the_middle() {
        let mut surface = Surface::new(600, 300).unwrap();
        let layout = render_text(&mut surface, &request(Some("V1"), None), &Color::white());
        let panel = layout.panel_rect().unwrap();
        assert!(panel.left() > 50.0 && panel.right() < 550.0);

        assert_eq!(surface.pixel(0, 0).unwrap()[3], 0);
        assert_eq!(surface.pixel(599, 299).unwrap()[3], 0);
        assert!(surface.pixel(300, 150).unwrap()[3] > 0);
    }
}
