//! Perceptual colors and palette derivation.
//!
//! Colors are sampled and rotated in OKLCH, where shifting the hue at fixed
//! lightness and chroma yields harmonious gradients. The sRGB form is derived
//! once at construction and clamped into gamut.

mod parse;

use palette::{FromColor, Oklch, Srgb};

use crate::rng::RandomSource;

pub use parse::{parse_css_color, CssColor};

/// A color in OKLCH coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OklchColor {
    /// Lightness, nominally [0, 1].
    pub l: f64,
    /// Chroma, nominally [0, ~0.4].
    pub c: f64,
    /// Hue in degrees, [0, 360).
    pub h: f64,
}

/// Gamma-encoded sRGB with channels clamped to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// An immutable color carrying both its OKLCH definition and its sRGB rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    oklch: OklchColor,
    rgb: RgbColor,
    alpha: f64,
}

impl Color {
    /// Create a color from OKLCH coordinates. The sRGB form is computed here.
    pub fn new(l: f64, c: f64, h: f64, alpha: f64) -> Self {
        let oklch = OklchColor { l, c, h };
        Self {
            oklch,
            rgb: oklch_to_rgb(oklch),
            alpha,
        }
    }

    /// Opaque white.
    pub fn white() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0)
    }

    /// Black at `alpha`, used for shadows.
    pub fn black(alpha: f64) -> Self {
        Self::new(0.0, 0.0, 0.0, alpha)
    }

    pub fn oklch(&self) -> OklchColor {
        self.oklch
    }

    pub fn rgb(&self) -> RgbColor {
        self.rgb
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Same color with a different alpha.
    pub fn with_alpha(&self, alpha: f64) -> Self {
        Self { alpha, ..*self }
    }

    /// 8-bit RGBA, channels rounded.
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            unit_to_byte(self.rgb.r),
            unit_to_byte(self.rgb.g),
            unit_to_byte(self.rgb.b),
            unit_to_byte(self.alpha),
        ]
    }
}

/// Build a color from OKLCH coordinates and an alpha.
pub fn create_color(l: f64, c: f64, h: f64, alpha: f64) -> Color {
    Color::new(l, c, h, alpha)
}

fn unit_to_byte(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Tags that narrow the lightness or chroma range of [`random_color`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorLimitation {
    /// No narrowing.
    All,
    /// Lightness in [0.5, 1].
    Lighter,
    /// Lightness in [0.25, 0.75].
    NeutralLightness,
    /// Lightness in [0, 0.5].
    Darker,
    /// Chroma in [0.2, 0.4].
    Saturated,
    /// Chroma in [0.1, 0.3].
    NeutralSaturation,
    /// Chroma in [0, 0.2].
    Desaturated,
}

/// Sample a random color, optionally narrowed by limitations.
///
/// Limitations are applied in order; when two target the same axis the later
/// one replaces the earlier range. Hue is always drawn from the full circle.
/// Draws lightness, then chroma, then hue.
pub fn random_color(rng: &mut dyn RandomSource, limitations: &[ColorLimitation]) -> Color {
    let mut lightness = (0.0, 1.0);
    let mut chroma = (0.0, 0.4);

    for limitation in limitations {
        match limitation {
            ColorLimitation::All => {}
            ColorLimitation::NeutralSaturation => chroma = (0.1, 0.3),
            ColorLimitation::Saturated => chroma = (0.2, 0.4),
            ColorLimitation::Desaturated => chroma = (0.0, 0.2),
            ColorLimitation::NeutralLightness => lightness = (0.25, 0.75),
            ColorLimitation::Lighter => lightness = (0.5, 1.0),
            ColorLimitation::Darker => lightness = (0.0, 0.5),
        }
    }

    let l = rng.between(lightness.0, lightness.1);
    let c = rng.between(chroma.0, chroma.1);
    let h = rng.next_f64() * 360.0;

    Color::new(l, c, h, 1.0)
}

/// The limitations used whenever a primary color has to be invented.
pub const NEUTRAL: [ColorLimitation; 2] = [
    ColorLimitation::NeutralLightness,
    ColorLimitation::NeutralSaturation,
];

/// Parse a CSS-like color string into a [`Color`].
///
/// Never fails: an unparsable string yields a random neutral color drawn from
/// `rng`. The random sequence is only advanced on that fallback path.
pub fn parse_color(rng: &mut dyn RandomSource, input: &str) -> Color {
    let Some(parsed) = parse_css_color(input) else {
        log::warn!("could not parse color {input:?}, using a random neutral color");
        return random_color(rng, &NEUTRAL);
    };

    let CssColor { r, g, b, alpha } = parsed;
    let converted = Oklch::<f64>::from_color(Srgb::new(r, g, b));
    let hue = converted.hue.into_positive_degrees();

    // Zero or undefined lightness/chroma fall back to mid values.
    let l = if converted.l == 0.0 || converted.l.is_nan() { 0.5 } else { converted.l };
    let c = if converted.chroma == 0.0 || converted.chroma.is_nan() { 0.1 } else { converted.chroma };
    let h = if hue.is_nan() { 0.0 } else { hue };

    Color::new(l, c, h, alpha)
}

/// Build a palette by rotating the primary hue in `spread`-degree steps.
///
/// Produces `2 * floor(n / 2) + 1` colors ordered from the most negative
/// rotation to the most positive, so an even request yields one extra color.
/// Lightness and chroma are copied from the primary; every color gets `alpha`.
pub fn random_palette(primary: &Color, number_of_colors: usize, spread: f64, alpha: f64) -> Vec<Color> {
    let half = (number_of_colors / 2) as i64;
    let base = primary.oklch();

    (-half..=half)
        .map(|step| {
            let hue = (base.h + step as f64 * spread).rem_euclid(360.0);
            Color::new(base.l, base.c, hue, alpha)
        })
        .collect()
}

/// Convert OKLCH to gamma-encoded sRGB, clamping into [0, 1].
///
/// Out-of-gamut and non-finite results never escape: NaN maps to 0.
pub fn oklch_to_rgb(color: OklchColor) -> RgbColor {
    let srgb: Srgb<f64> = Srgb::from_color(Oklch::new(color.l, color.c, color.h));
    RgbColor {
        r: clamp_channel(srgb.red),
        g: clamp_channel(srgb.green),
        b: clamp_channel(srgb.blue),
    }
}

fn clamp_channel(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
