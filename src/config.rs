use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, Result};

/// Environment variable naming the TOML config file when no path is given explicitly.
pub const CONFIG_PATH_ENV: &str = "COURT_LISTS_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub pdf: PdfConfig,
    pub locales: LocalesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Fallback filter directive when RUST_LOG is unset
    pub filter: String,
    pub directory: PathBuf,
    pub json_file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "court_lists=info".to_string(),
            directory: PathBuf::from("logs"),
            json_file: false,
        }
    }
}

/// Page geometry and font for generated PDF artifacts. Sizes are in PDF points.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    pub font: String,
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub font_size: f32,
    pub line_height: f32,
    /// Fail instead of substituting characters the font encoding cannot carry
    pub strict_encoding: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        // A4 portrait
        Self {
            font: "Helvetica".to_string(),
            page_width: 595.0,
            page_height: 842.0,
            margin: 40.0,
            font_size: 9.0,
            line_height: 12.0,
            strict_encoding: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocalesConfig {
    pub directory: PathBuf,
}

impl Default for LocalesConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("locales"),
        }
    }
}

impl Config {
    /// Load from an explicit path, the `COURT_LISTS_CONFIG` path, or fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
        match path.map(Path::to_path_buf).or(env_path) {
            Some(config_path) => Self::from_file(&config_path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(config_path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            PipelineError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;
        Self::from_toml(&config_content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.pdf.check()?;
        Ok(config)
    }
}

impl PdfConfig {
    fn check(&self) -> Result<()> {
        let sizes = [
            ("page_width", self.page_width),
            ("page_height", self.page_height),
            ("font_size", self.font_size),
            ("line_height", self.line_height),
        ];
        for (name, value) in sizes {
            if !(value > 0.0) {
                return Err(PipelineError::Config(format!(
                    "pdf.{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if self.margin < 0.0 {
            return Err(PipelineError::Config(format!(
                "pdf.margin must not be negative, got {}",
                self.margin
            )));
        }
        Ok(())
    }
}
