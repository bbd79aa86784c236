//! Gaussian blur approximated by three box-blur passes.

/// Box radius whose triple application approximates a gaussian of `sigma`.
pub fn box_radius_for_sigma(sigma: f32) -> usize {
    if sigma.is_nan() || sigma <= 0.0 {
        return 0;
    }
    // Ideal box width for n = 3 passes: sqrt(12 * sigma^2 / n + 1).
    let width = (4.0 * sigma * sigma + 1.0).sqrt();
    ((width - 1.0) / 2.0).round().max(0.0) as usize
}

/// Blur interleaved RGBA in place. Edges clamp to the border pixel.
///
/// Works on premultiplied data, so color never bleeds out of transparent areas.
pub fn box_blur_rgba(data: &mut [u8], width: usize, height: usize, radius: usize) {
    if radius == 0 || width == 0 || height == 0 || data.len() < width * height * 4 {
        return;
    }

    let mut buf1: Vec<f32> = data.iter().map(|&v| f32::from(v)).collect();
    let mut buf2 = vec![0.0f32; buf1.len()];

    for _ in 0..3 {
        blur_pass(&buf1, &mut buf2, width, height, radius, Axis::Horizontal);
        blur_pass(&buf2, &mut buf1, width, height, radius, Axis::Vertical);
    }

    for (out, value) in data.iter_mut().zip(&buf1) {
        *out = value.round().clamp(0.0, 255.0) as u8;
    }
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

fn blur_pass(src: &[f32], dst: &mut [f32], w: usize, h: usize, r: usize, axis: Axis) {
    let (lines, len) = match axis {
        Axis::Horizontal => (h, w),
        Axis::Vertical => (w, h),
    };
    let index = |line: usize, pos: usize| match axis {
        Axis::Horizontal => (line * w + pos) * 4,
        Axis::Vertical => (pos * w + line) * 4,
    };
    let d = (2 * r + 1) as f32;
    let last = len - 1;

    for line in 0..lines {
        for channel in 0..4 {
            let sample = |pos: usize| src[index(line, pos.min(last)) + channel];

            // Window centered on 0; positions left of the edge clamp to 0.
            let mut sum = sample(0) * r as f32;
            for pos in 0..=r {
                sum += sample(pos);
            }
            dst[index(line, 0) + channel] = sum / d;

            for pos in 1..len {
                let outgoing = pos.saturating_sub(r + 1);
                sum += sample(pos + r) - sample(outgoing);
                dst[index(line, pos) + channel] = sum / d;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_grows_with_sigma() {
        assert_eq!(box_radius_for_sigma(0.0), 0);
        assert_eq!(box_radius_for_sigma(f32::NAN), 0);
        assert_eq!(box_radius_for_sigma(2.5), 2);
        assert!(box_radius_for_sigma(5.0) > box_radius_for_sigma(2.5));
    }

    #[test]
    fn test_uniform_image_is_unchanged() {
        let mut data = vec![120u8; 8 * 5 * 4];
        box_blur_rgba(&mut data, 8, 5, 2);
        assert!(data.iter().all(|&v| v == 120));
    }

    #[test]
    fn test_blur_spreads_a_single_pixel() {
        let (w, h) = (11, 11);
        let mut data = vec![0u8; w * h * 4];
        let center = (5 * w + 5) * 4;
        data[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

        box_blur_rgba(&mut data, w, h, 1);

        let alpha = |x: usize, y: usize| data[(y * w + x) * 4 + 3];
        assert!(alpha(5, 5) < 255);
        assert!(alpha(6, 5) > 0);
        assert!(alpha(5, 5) >= alpha(6, 5));
        assert!(alpha(6, 5) >= alpha(8, 5));
        assert_eq!(alpha(0, 0), 0);
    }

    #[test]
    fn test_zero_radius_is_a_no_op() {
        let mut data = vec![1, 2, 3, 4];
        box_blur_rgba(&mut data, 1, 1, 0);
        assert_eq!(data, vec![1, 2, 3, 4]);
    }
}
