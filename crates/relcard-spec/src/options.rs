//! Request options for a single image generation.

use serde::{Deserialize, Serialize};

use crate::types::{FontFamily, FontWeight, ImageFormat, NoiseLevel, PatternType};

/// Default canvas width when a request does not name one.
pub const DEFAULT_WIDTH: u32 = 1920;

/// Default canvas height when a request does not name one.
pub const DEFAULT_HEIGHT: u32 = 1080;

/// Everything the generator needs to produce one image.
///
/// Optional fields are resolved by the generator: a missing `primary_color`
/// is derived from the random sequence, a missing `pattern_type` is picked at
/// random, and a missing `seed` is taken from the wall clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ImageGeneratorOptions {
    /// Headline drawn inside the glass panel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Short tag drawn in a solid pill above the headline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Canvas width in pixels.
    pub width: u32,

    /// Canvas height in pixels.
    pub height: u32,

    #[serde(default)]
    pub font_family: FontFamily,

    #[serde(default)]
    pub font_weight: FontWeight,

    /// Label typeface; falls back to `font_family`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_font_family: Option<FontFamily>,

    /// Label weight; falls back to `font_weight`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_font_weight: Option<FontWeight>,

    /// CSS-like color string the palette is built around.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,

    #[serde(default)]
    pub image_format: ImageFormat,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_type: Option<PatternType>,

    #[serde(default)]
    pub noise_level: NoiseLevel,

    /// Seed for the deterministic random sequence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl ImageGeneratorOptions {
    /// Creates options for a canvas of the given size with every other field defaulted.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            text: None,
            label: None,
            width,
            height,
            font_family: FontFamily::default(),
            font_weight: FontWeight::default(),
            label_font_family: None,
            label_font_weight: None,
            primary_color: None,
            image_format: ImageFormat::default(),
            pattern_type: None,
            noise_level: NoiseLevel::default(),
            seed: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_pattern(mut self, pattern: PatternType) -> Self {
        self.pattern_type = Some(pattern);
        self
    }

    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.image_format = format;
        self
    }

    pub fn with_primary_color(mut self, color: impl Into<String>) -> Self {
        self.primary_color = Some(color.into());
        self
    }

    pub fn with_noise_level(mut self, level: NoiseLevel) -> Self {
        self.noise_level = level;
        self
    }

    pub fn with_font(mut self, family: FontFamily, weight: FontWeight) -> Self {
        self.font_family = family;
        self.font_weight = weight;
        self
    }

    /// Label family after falling back to the headline's.
    pub fn resolved_label_font_family(&self) -> FontFamily {
        self.label_font_family.unwrap_or(self.font_family)
    }

    /// Label weight after falling back to the headline's.
    pub fn resolved_label_font_weight(&self) -> FontWeight {
        self.label_font_weight.unwrap_or(self.font_weight)
    }
}

impl Default for ImageGeneratorOptions {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}
