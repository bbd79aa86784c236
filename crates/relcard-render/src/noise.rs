//! Film-grain overlay built from one small random tile.

use relcard_spec::NoiseLevel;
use tiny_skia::Pixmap;

use crate::rng::RandomSource;
use crate::surface::{Surface, SurfaceError};

/// Per-level grain settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrainSettings {
    /// Scales the intensity ceiling.
    pub multiplier: f64,
    /// Tile alpha on a 0-255 scale.
    pub alpha: u8,
}

impl GrainSettings {
    pub fn for_level(level: NoiseLevel) -> Self {
        match level {
            NoiseLevel::Low => Self {
                multiplier: 0.5,
                alpha: 15,
            },
            NoiseLevel::Medium => Self {
                multiplier: 1.0,
                alpha: 30,
            },
            NoiseLevel::High => Self {
                multiplier: 2.0,
                alpha: 40,
            },
        }
    }
}

/// Tile dimensions: each axis divided by a random 7..=11, never below 1.
pub fn noise_tile_size(rng: &mut dyn RandomSource, width: u32, height: u32) -> (u32, u32) {
    let mut axis = |length: u32| {
        let divisor = rng.below(5) as u32 + 7;
        (length / divisor).max(1)
    };
    let tile_width = axis(width);
    let tile_height = axis(height);
    (tile_width, tile_height)
}

/// Build a grayscale tile and repeat it over the whole surface.
///
/// Cost is proportional to the tile, not the canvas.
pub fn generate_noise(
    surface: &mut Surface,
    rng: &mut dyn RandomSource,
    level: NoiseLevel,
) -> Result<(), SurfaceError> {
    let (width, height) = (surface.width(), surface.height());
    let (tile_width, tile_height) = noise_tile_size(rng, width, height);
    let settings = GrainSettings::for_level(level);
    let area = (f64::from(width) / 100.0) * (f64::from(height) / 100.0);

    let mut tile = Pixmap::new(tile_width, tile_height).ok_or(SurfaceError::InvalidDimensions {
        width: tile_width,
        height: tile_height,
    })?;

    let alpha = u32::from(settings.alpha);
    for pixel in tile.data_mut().chunks_exact_mut(4) {
        let sample = rng.next_f64();
        let band = (rng.next_f64() * 3.0 + 1.0).floor();
        let ceiling = (area * band * settings.multiplier).min(256.0);
        let intensity = (sample * ceiling).floor() as u32;

        // Stored premultiplied.
        let value = (intensity.min(255) * alpha / 255) as u8;
        pixel.copy_from_slice(&[value, value, value, settings.alpha]);
    }

    log::debug!("noise tile {tile_width}x{tile_height} at level {level}");
    surface.fill_tiled(&tile);
    Ok(())
}
