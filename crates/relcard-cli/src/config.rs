//! Server configuration: defaults, JSON file, then command-line overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use relcard_render::encode::DEFAULT_JPEG_QUALITY;
use serde::{Deserialize, Serialize};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 4321;
pub const DEFAULT_FONTS_DIR: &str = "./fonts";

/// Settings for `relcard serve`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub fonts_dir: PathBuf,
    /// Renders allowed to run at once; further requests wait.
    pub max_concurrent_renders: usize,
    /// Per-request render limit; 0 disables it.
    pub request_timeout_secs: u64,
    pub jpeg_quality: u8,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            fonts_dir: PathBuf::from(DEFAULT_FONTS_DIR),
            max_concurrent_renders: 4,
            request_timeout_secs: 30,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Values given on the command line; each replaces the file value when set.
#[derive(Debug, Clone, Default)]
pub struct ServerOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub fonts_dir: Option<PathBuf>,
    pub max_concurrent_renders: Option<usize>,
    pub request_timeout_secs: Option<u64>,
    pub jpeg_quality: Option<u8>,
}

impl ServerConfig {
    /// Read a JSON config file. Missing fields take defaults; unknown ones are errors.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Defaults, then `path` if given, then `overrides`; validated.
    pub fn load(path: Option<&Path>, overrides: ServerOverrides) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&mut self, overrides: ServerOverrides) {
        if let Some(host) = overrides.host {
            self.host = host;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(dir) = overrides.fonts_dir {
            self.fonts_dir = dir;
        }
        if let Some(limit) = overrides.max_concurrent_renders {
            self.max_concurrent_renders = limit;
        }
        if let Some(secs) = overrides.request_timeout_secs {
            self.request_timeout_secs = secs;
        }
        if let Some(quality) = overrides.jpeg_quality {
            self.jpeg_quality = quality;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_concurrent_renders == 0 {
            bail!("max_concurrent_renders must be at least 1");
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            bail!("jpeg_quality must be between 1 and 100, got {}", self.jpeg_quality);
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
