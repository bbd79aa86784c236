//! relcard request model.
//!
//! This crate defines what a caller may ask the generator for: the closed
//! parameter sets (font families, weights, formats, patterns, noise levels),
//! the [`ImageGeneratorOptions`] bundle, and the boundary-layer parsing that
//! turns raw query parameters into options or a 4xx-style [`ParamError`].
//!
//! # Example
//!
//! ```
//! use relcard_spec::{options_from_params, parse_query, PatternType};
//!
//! let pairs = parse_query("text=v1.2.3&width=1200&height=600&patternType=hexagons&seed=42");
//! let options = options_from_params(&pairs).unwrap();
//! assert_eq!(options.pattern_type, Some(PatternType::Hexagons));
//! assert_eq!(options.seed, Some(42));
//! ```

pub mod error;
pub mod options;
pub mod params;
pub mod types;
pub mod validation;

pub use error::{ParamError, ValidationError};
pub use options::{ImageGeneratorOptions, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use params::{options_from_params, parse_query, percent_decode};
pub use types::{FontFamily, FontWeight, ImageFormat, NoiseLevel, PatternType, UnknownVariant};
pub use validation::{validate_options, validate_resolution};
