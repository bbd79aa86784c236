//! Largest font size that fits a box.

/// Smallest size ever returned.
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Horizontal squeeze applied to rendered text.
pub const TEXT_SCALE_X: f32 = 0.95;

/// Bisection steps before giving up on convergence.
const MAX_ITERATIONS: usize = 64;

/// Binary-search the largest size whose scaled width fits `max_width`,
/// starting from `max_height` as the upper bound.
///
/// `measure` returns the unscaled advance width at a size; it is multiplied
/// by [`TEXT_SCALE_X`] here. The search stops once consecutive candidates
/// are within one pixel. The result is floored and never below
/// [`MIN_FONT_SIZE`], even when nothing fits.
pub fn max_font_size<F>(mut measure: F, max_width: f32, max_height: f32) -> f32
where
    F: FnMut(f32) -> f32,
{
    let mut low = 0.0f32;
    let mut high = max_height;
    let mut current = high;
    let mut best = -1.0f32;

    for _ in 0..MAX_ITERATIONS {
        if (best - current).abs() <= 1.0 {
            break;
        }

        if measure(current) * TEXT_SCALE_X > max_width {
            high = current;
        } else {
            low = current;
            best = current;
        }
        current = (low + high) / 2.0;
    }

    best.max(MIN_FONT_SIZE).floor()
}
