//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tunelog_extractor::ExtractorConfig;
use tunelog_llm::GeminiConfig;

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Gemini connection settings
    #[serde(default)]
    pub gemini: GeminiSettings,

    /// Classification pipeline settings
    #[serde(default)]
    pub pipeline: ExtractorConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// The `[gemini]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiSettings {
    /// Endpoint, model and HTTP timeout
    #[serde(flatten)]
    pub provider: GeminiConfig,

    /// API key, used when neither `--api-key` nor `GEMINI_API_KEY` is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (one line per song) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".tunelog").join("config.toml"))
    }

    /// Load configuration from `path`, writing the defaults there if the file is missing.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            config.pipeline.validate().map_err(CliError::Config)?;
            config.gemini.provider.validate().map_err(CliError::Config)?;
            Ok(config)
        } else {
            let config = Self::default();
            // Best effort: defaults still apply when the file cannot be written
            config.save_to(path).ok();
            Ok(config)
        }
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Pick the API key: command line or environment first, then the config file.
    pub fn api_key(&self, from_cli: Option<&str>) -> Result<String> {
        from_cli
            .or(self.gemini.api_key.as_deref())
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .ok_or(CliError::MissingApiKey)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
