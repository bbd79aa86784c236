//! Surface to file bytes.
//!
//! PNG goes through the `png` crate with fixed settings so identical pixels
//! always produce identical bytes. JPEG and WEBP go through `image`.

use std::io::Write;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder};
use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use relcard_spec::ImageFormat;
use thiserror::Error;

use crate::surface::Surface;

/// Highest JPEG quality, used unless configured otherwise.
pub const DEFAULT_JPEG_QUALITY: u8 = 100;

/// Errors from encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("PNG encoding error: {0}")]
    Png(#[from] png::EncodingError),

    #[error("{format} encoding error: {source}")]
    Image {
        format: ImageFormat,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid JPEG quality {0}: expected 1-100")]
    InvalidQuality(u8),
}

/// PNG settings. Fixed values keep output byte-identical.
#[derive(Debug, Clone)]
pub struct PngConfig {
    pub compression: Compression,
    pub filter: FilterType,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            filter: FilterType::NoFilter,
        }
    }
}

impl PngConfig {
    /// Smaller files, slower encode.
    pub fn best_compression() -> Self {
        Self {
            compression: Compression::Best,
            filter: FilterType::Paeth,
        }
    }
}

/// Per-format encoder settings.
#[derive(Debug, Clone)]
pub struct EncodeConfig {
    /// 1-100.
    pub jpeg_quality: u8,
    pub png: PngConfig,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            png: PngConfig::default(),
        }
    }
}

/// Encode `surface` as `format`. `Jpg` is the same encoder as `Jpeg`.
pub fn encode(surface: Surface, format: ImageFormat, config: &EncodeConfig) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (surface.width(), surface.height());
    let rgba = surface.into_rgba8();
    let mut out = Vec::new();

    match format {
        ImageFormat::Png => write_png(&rgba, width, height, &mut out, &config.png)?,
        ImageFormat::Jpeg | ImageFormat::Jpg => {
            if !(1..=100).contains(&config.jpeg_quality) {
                return Err(EncodeError::InvalidQuality(config.jpeg_quality));
            }
            let rgb = flatten_onto_black(&rgba);
            JpegEncoder::new_with_quality(&mut out, config.jpeg_quality)
                .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
                .map_err(|source| EncodeError::Image { format, source })?;
        }
        ImageFormat::Webp => {
            WebPEncoder::new_lossless(&mut out)
                .write_image(&rgba, width, height, ExtendedColorType::Rgba8)
                .map_err(|source| EncodeError::Image { format, source })?;
        }
    }

    Ok(out)
}

/// Write demultiplied RGBA rows as an 8-bit PNG.
pub fn write_png<W: Write>(
    rgba: &[u8],
    width: u32,
    height: u32,
    writer: W,
    config: &PngConfig,
) -> Result<(), EncodeError> {
    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(config.compression);
    encoder.set_filter(config.filter);

    // No timestamps or other variable chunks are written.
    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(rgba)?;
    Ok(())
}

/// JPEG has no alpha channel; translucent pixels are composited over black.
fn flatten_onto_black(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for pixel in rgba.chunks_exact(4) {
        let alpha = u16::from(pixel[3]);
        for &channel in &pixel[..3] {
            rgb.push(((u16::from(channel) * alpha + 127) / 255) as u8);
        }
    }
    rgb
}
