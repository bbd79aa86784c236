//! Machine-readable output for `--json`.

use serde::{Deserialize, Serialize};

/// Stable error codes emitted by the CLI itself.
pub mod error_codes {
    /// Output file could not be written
    pub const FILE_WRITE: &str = "CLI_001";
    /// Output could not be serialized
    pub const JSON_SERIALIZE: &str = "CLI_002";
}

/// One error in a JSON report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonError {
    /// Stable code, e.g. "P001" or "RENDER_003".
    pub code: String,
    pub message: String,
    /// Request parameter at fault, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

impl JsonError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            param: None,
        }
    }

    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.param = Some(param.into());
        self
    }
}

/// What `generate` produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResult {
    pub path: String,
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub seed: u64,
    pub pattern: String,
    pub hash: String,
    pub bytes: usize,
}

/// Top-level `generate --json` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateOutput {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<GenerateResult>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonError>,
}

impl GenerateOutput {
    pub fn success(result: GenerateResult) -> Self {
        Self {
            success: true,
            result: Some(result),
            errors: Vec::new(),
        }
    }

    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            result: None,
            errors,
        }
    }
}
