//! relcard image synthesis
//!
//! Turns an [`ImageGeneratorOptions`] into an encoded release card: a layered
//! OKLCH gradient background, one translucent line pattern, film grain, and a
//! headline on a frosted-glass panel with an optional label pill.
//!
//! # Stages
//!
//! - **Color**: primary color parsed from a CSS-like string or drawn at random
//! - **Background**: three stacked diagonal gradients around the primary hue
//! - **Pattern**: grid, dots, waves, triangles, hexagons, concentric, circuitry,
//!   maze, steps, or geometry (explicit requests only)
//! - **Noise**: a small random tile repeated over the canvas
//! - **Text**: largest headline that fits, glass panel, label pill
//! - **Encode**: PNG, JPEG or lossless WEBP
//!
//! # Example
//!
//! ```no_run
//! use relcard_render::{generate_image, FontStack};
//! use relcard_spec::{ImageFormat, ImageGeneratorOptions};
//!
//! let options = ImageGeneratorOptions::new(1200, 600)
//!     .with_text("v1.2.3")
//!     .with_format(ImageFormat::Png)
//!     .with_seed(42);
//! let fonts = FontStack::for_directory("fonts");
//! let image = generate_image(&options, &fonts).unwrap();
//! std::fs::write("card.png", &image.bytes).unwrap();
//! ```
//!
//! # Determinism
//!
//! - Same options + same seed = byte-identical output
//! - Each generation owns one PCG32 sequence; nothing is shared across calls
//! - PNG encoding uses fixed compression settings
//! - [`GeneratedImage::hash`] is the BLAKE3 digest of the encoded bytes

pub mod background;
pub mod color;
pub mod encode;
pub mod generate;
pub mod noise;
pub mod pattern;
pub mod rng;
pub mod surface;
pub mod text;

pub use relcard_spec::ImageGeneratorOptions;

pub use color::{parse_color, random_color, random_palette, Color, ColorLimitation};
pub use encode::{encode, EncodeConfig, EncodeError, PngConfig};
pub use generate::{generate_image, GenerateError, GeneratedImage, ImageGenerator};
pub use rng::{DeterministicRng, RandomSource};
pub use surface::{Surface, SurfaceError};
pub use text::{FontSource, FontStack, PreloadedSource, Typeface};
