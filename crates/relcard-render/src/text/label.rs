//! Label pill drawn above the headline.

use tiny_skia::{Point, Rect};

use super::{draw_run_shadow, fill_run, RunLayout, Typeface};
use crate::color::Color;
use crate::surface::{linear_gradient, rounded_rect_path, Shadow, Surface};

fn clamp(value: f32, low: f32, high: f32) -> f32 {
    value.max(low).min(high)
}

/// Label size from the canvas shape and label length, never below a quarter
/// of the headline size.
pub fn label_font_size(width: f32, height: f32, label_len: usize, main_size: f32) -> f32 {
    let min_dim = width.min(height);
    let aspect = width / height.max(1.0);
    let aspect_factor = clamp(aspect * 0.8, 0.8, 1.3);
    let length_factor = clamp(12.0 / label_len.max(1) as f32, 0.7, 1.2);

    let size = clamp(
        min_dim * 0.08 * aspect_factor * length_factor,
        min_dim * 0.06,
        min_dim * 0.12,
    );
    size.max(main_size * 0.25)
}

/// Vertical gap between label and headline; shorter headlines get more room.
pub fn label_gap(label_size: f32, text_len: usize) -> f32 {
    label_size * clamp(8.0 / text_len.max(1) as f32, 0.1, 0.5)
}

pub(super) fn pill_rect(run: &RunLayout) -> Option<Rect> {
    let pad = run.font_size / 3.5;
    Rect::from_xywh(
        run.left - pad,
        run.ink_top() - pad,
        run.width() + pad * 2.0,
        run.metrics.ink_height() + pad * 2.0,
    )
}

pub(super) fn draw_label(surface: &mut Surface, face: &Typeface, run: &RunLayout, primary: &Color) {
    let Some(raster) = face.rasterize(run.text, run.font_size) else {
        return;
    };
    let size = run.font_size;

    if let Some(pill) = pill_rect(run) {
        if let Some(path) = rounded_rect_path(pill.x(), pill.y(), pill.width(), pill.height(), size / 5.0) {
            let shadow = Shadow {
                color: Color::black(70.0 / 255.0),
                blur: (size / 15.0).max(4.0),
                offset: size / 60.0,
            };
            surface.fill_path_with_shadow(&path, &primary.with_alpha(230.0 / 255.0), &shadow);
            surface.stroke_path(&path, primary, (size / 20.0).max(2.0));
        }
    }

    draw_run_shadow(
        surface,
        run,
        &raster,
        &Shadow {
            color: Color::black(80.0 / 255.0),
            blur: (size / 30.0).max(2.0),
            offset: size / 100.0,
        },
    );

    let Some(ink) = run.ink_rect() else { return };
    if let Some(shader) = linear_gradient(
        Point::from_xy(ink.left(), ink.top()),
        Point::from_xy(ink.right(), ink.bottom()),
        &[Color::white(), Color::white().with_alpha(250.0 / 255.0)],
    ) {
        fill_run(surface, run, &raster, shader);
    }
}
