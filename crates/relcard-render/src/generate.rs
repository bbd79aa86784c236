//! Main entry point for image generation.
//!
//! Runs the fixed stage order (primary color, background, pattern, noise,
//! text, encode) against one surface and one random sequence.

use relcard_spec::{validate_options, ImageFormat, ImageGeneratorOptions, PatternType, ValidationError};
use thiserror::Error;

use crate::background::generate_background;
use crate::color::{parse_color, random_color, Color, NEUTRAL};
use crate::encode::{encode, EncodeConfig, EncodeError};
use crate::noise::generate_noise;
use crate::pattern::generate_pattern;
use crate::rng::{seed_from_clock, DeterministicRng};
use crate::surface::{Surface, SurfaceError};
use crate::text::{render_text, FontStack, TextRequest};

/// Errors from image generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Invalid options: {0}")]
    InvalidOptions(#[from] ValidationError),

    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),

    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),
}

impl GenerateError {
    pub fn code(&self) -> &'static str {
        match self {
            GenerateError::InvalidOptions(_) => "RENDER_001",
            GenerateError::Surface(_) => "RENDER_002",
            GenerateError::Encode(_) => "RENDER_003",
        }
    }
}

/// An encoded image and how it was made.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
    /// Seed actually used; replaying it reproduces `bytes`.
    pub seed: u64,
    pub pattern: PatternType,
    /// BLAKE3 hex digest of `bytes`.
    pub hash: String,
}

impl GeneratedImage {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// One generation: options, fonts and a private random sequence.
pub struct ImageGenerator<'a> {
    options: &'a ImageGeneratorOptions,
    fonts: &'a FontStack,
    encode: EncodeConfig,
    seed: u64,
    rng: DeterministicRng,
}

impl<'a> ImageGenerator<'a> {
    /// Resolve the seed (explicit, else the clock) and seed the sequence.
    pub fn new(options: &'a ImageGeneratorOptions, fonts: &'a FontStack) -> Self {
        let seed = options.seed.unwrap_or_else(seed_from_clock);
        Self {
            options,
            fonts,
            encode: EncodeConfig::default(),
            seed,
            rng: DeterministicRng::new(seed),
        }
    }

    pub fn with_encode_config(mut self, config: EncodeConfig) -> Self {
        self.encode = config;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw every stage and return the surface before encoding.
    ///
    /// Consumes the generator, so a sequence is never reused for a second image.
    pub fn render(mut self) -> Result<(Surface, PatternType), GenerateError> {
        self.draw()
    }

    fn draw(&mut self) -> Result<(Surface, PatternType), GenerateError> {
        let options = self.options;
        validate_options(options)?;
        log::debug!(
            "generating {}x{} {} with seed {}",
            options.width,
            options.height,
            options.image_format,
            self.seed
        );

        let mut surface = Surface::new(options.width, options.height)?;
        let rng = &mut self.rng;

        let primary = match options.primary_color.as_deref() {
            Some(input) => parse_color(rng, input),
            None => random_color(rng, &NEUTRAL),
        };

        generate_background(&mut surface, rng, &primary);
        let pattern = generate_pattern(&mut surface, rng, &primary, options.pattern_type);
        generate_noise(&mut surface, rng, options.noise_level)?;
        self.draw_text(&mut surface, &primary);

        Ok((surface, pattern))
    }

    fn draw_text(&self, surface: &mut Surface, primary: &Color) {
        let options = self.options;
        let text = options.text.as_deref().filter(|text| !text.is_empty());
        let label = options.label.as_deref().filter(|label| !label.trim().is_empty());
        if text.is_none() && label.is_none() {
            return;
        }

        let face = self.fonts.resolve(options.font_family, options.font_weight);
        let label_face = if label.is_some() {
            self.fonts.resolve(
                options.resolved_label_font_family(),
                options.resolved_label_font_weight(),
            )
        } else {
            face.clone()
        };

        let request = TextRequest {
            text,
            label,
            face: &face,
            label_face: &label_face,
        };
        render_text(surface, &request, primary);
    }

    /// Render and encode. Consumes the generator: one sequence, one image.
    pub fn generate_image(mut self) -> Result<GeneratedImage, GenerateError> {
        let (surface, pattern) = self.draw()?;
        let format = self.options.image_format;
        let bytes = encode(surface, format, &self.encode)?;
        let hash = blake3::hash(&bytes).to_hex().to_string();

        log::debug!("encoded {} bytes ({format}, pattern {pattern})", bytes.len());
        Ok(GeneratedImage {
            bytes,
            format,
            seed: self.seed,
            pattern,
            hash,
        })
    }
}

/// Generate one image with default encoder settings.
pub fn generate_image(options: &ImageGeneratorOptions, fonts: &FontStack) -> Result<GeneratedImage, GenerateError> {
    ImageGenerator::new(options, fonts).generate_image()
}

#[cfg(test)]
mod tests {
    use super::*;
    use relcard_spec::NoiseLevel;

    fn options() -> ImageGeneratorOptions {
        ImageGeneratorOptions::new(200, 120)
            .with_format(ImageFormat::Png)
            .with_seed(7)
    }

    #[test]
    fn test_explicit_seed_is_kept() {
        let fonts = FontStack::builtin_only();
        let opts = options();
        let image = generate_image(&opts, &fonts).unwrap();
        assert_eq!(image.seed, 7);
        assert_eq!(image.hash, blake3::hash(&image.bytes).to_hex().to_string());
        assert_eq!(image.mime_type(), "image/png");
    }

    #[test]
    fn test_missing_seed_uses_clock() {
        let fonts = FontStack::builtin_only();
        let opts = ImageGeneratorOptions::new(100, 100);
        let generator = ImageGenerator::new(&opts, &fonts);
        assert!(generator.seed() > 0);
    }

    #[test]
    fn test_empty_canvas_is_invalid() {
        let fonts = FontStack::builtin_only();
        let opts = ImageGeneratorOptions::new(0, 100).with_seed(1);
        let err = generate_image(&opts, &fonts).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidOptions(_)));
        assert_eq!(err.code(), "RENDER_001");
    }

    #[test]
    fn test_render_fills_canvas() {
        let fonts = FontStack::builtin_only();
        let opts = options().with_noise_level(NoiseLevel::Low);
        let (surface, _) = ImageGenerator::new(&opts, &fonts).render().unwrap();
        assert_eq!((surface.width(), surface.height()), (200, 120));
        for (x, y) in [(0, 0), (199, 0), (0, 119), (199, 119)] {
            assert_eq!(surface.pixel(x, y).unwrap()[3], 255);
        }
    }

    #[test]
    fn test_render_matches_generate_image() {
        let fonts = FontStack::builtin_only();
        let opts = options().with_text("v2");
        let (surface, _) = ImageGenerator::new(&opts, &fonts).render().unwrap();
        let rendered = encode(surface, ImageFormat::Png, &EncodeConfig::default()).unwrap();
        let generated = ImageGenerator::new(&opts, &fonts).generate_image().unwrap();
        assert_eq!(rendered, generated.bytes);
    }

    #[test]
    fn test_bad_color_still_renders() {
        let fonts = FontStack::builtin_only();
        let opts = options().with_primary_color("definitely not a color");
        assert!(generate_image(&opts, &fonts).is_ok());
    }

    #[test]
    fn test_requested_pattern_is_reported() {
        let fonts = FontStack::builtin_only();
        let opts = options().with_pattern(PatternType::Circuitry);
        let image = generate_image(&opts, &fonts).unwrap();
        assert_eq!(image.pattern, PatternType::Circuitry);
    }
}
