//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Classification, recap or ingestion error
    #[error("{0}")]
    Extractor(#[from] tunelog_extractor::ExtractorError),

    /// Provider setup error
    #[error("LLM error: {0}")]
    Llm(#[from] tunelog_llm::LlmError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No API key from flag, environment or config file
    #[error("No API key configured. Pass --api-key, set GEMINI_API_KEY, or add api_key under [gemini] in the config file.")]
    MissingApiKey,
}
