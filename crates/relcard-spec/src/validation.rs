//! Validation applied by the generator before any pixel buffer is allocated.

use crate::error::ValidationError;
use crate::options::ImageGeneratorOptions;

/// Largest accepted canvas edge in pixels.
pub const MAX_DIMENSION: u32 = 4096;

/// Validate that the canvas is non-empty and bounded.
///
/// # Example
/// ```
/// use relcard_spec::validation::validate_resolution;
///
/// assert!(validate_resolution(1200, 600).is_ok());
/// assert!(validate_resolution(0, 600).is_err());
/// ```
pub fn validate_resolution(width: u32, height: u32) -> Result<(), ValidationError> {
    if width == 0 || height == 0 {
        return Err(ValidationError::EmptyCanvas { width, height });
    }

    // Each stage allocates at most a few canvas-sized buffers.
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(ValidationError::CanvasTooLarge {
            width,
            height,
            max: MAX_DIMENSION,
        });
    }

    Ok(())
}

/// Validates a full set of options.
pub fn validate_options(options: &ImageGeneratorOptions) -> Result<(), ValidationError> {
    validate_resolution(options.width, options.height)
}
