//! Errors raised while turning request parameters into options.

use thiserror::Error;

/// A request parameter was rejected before generation started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    /// A closed-set parameter named a value outside the set.
    #[error("Invalid {param}")]
    InvalidValue { param: &'static str, value: String },

    /// A numeric parameter could not be parsed.
    #[error("Invalid {param}")]
    InvalidNumber { param: &'static str, value: String },
}

impl ParamError {
    /// Stable error code for logs and JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            ParamError::InvalidValue { .. } => "P001",
            ParamError::InvalidNumber { .. } => "P002",
        }
    }

    /// Name of the offending request parameter.
    pub fn param(&self) -> &'static str {
        match self {
            ParamError::InvalidValue { param, .. } | ParamError::InvalidNumber { param, .. } => {
                param
            }
        }
    }

    /// The rejected raw value.
    pub fn value(&self) -> &str {
        match self {
            ParamError::InvalidValue { value, .. } | ParamError::InvalidNumber { value, .. } => {
                value
            }
        }
    }
}

/// Options that are well-formed but cannot be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("canvas must be at least 1x1, got {width}x{height}")]
    EmptyCanvas { width: u32, height: u32 },

    #[error("canvas is too large: max is {max}x{max}, got {width}x{height}")]
    CanvasTooLarge { width: u32, height: u32, max: u32 },
}
