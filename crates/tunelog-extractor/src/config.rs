//! Configuration for the classification pipeline

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the classification pipeline and recap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Maximum history entries per classification request
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Maximum time for a single provider call (seconds)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Language the recap is written in
    #[serde(default = "default_recap_language")]
    pub recap_language: String,

    /// Upper bound on recap length (words)
    #[serde(default = "default_recap_max_words")]
    pub recap_max_words: usize,
}

impl ExtractorConfig {
    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("chunk_size must be greater than 0".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        if self.recap_language.trim().is_empty() {
            return Err("recap_language must not be empty".to_string());
        }
        if self.recap_max_words == 0 {
            return Err("recap_max_words must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            request_timeout_secs: default_request_timeout_secs(),
            recap_language: default_recap_language(),
            recap_max_words: default_recap_max_words(),
        }
    }
}

fn default_chunk_size() -> usize {
    1500
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_recap_language() -> String {
    "Traditional Chinese".to_string()
}

fn default_recap_max_words() -> usize {
    200
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chunk_size, 1500);
    }

    #[test]
    fn test_invalid_chunk_size() {
        let mut config = ExtractorConfig::default();
        config.chunk_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_timeout() {
        let mut config = ExtractorConfig::default();
        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_recap_language() {
        let mut config = ExtractorConfig::default();
        config.recap_language = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_recap_words() {
        let mut config = ExtractorConfig::default();
        config.recap_max_words = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: ExtractorConfig = serde_json::from_str(r#"{"chunk_size": 200}"#).unwrap();
        assert_eq!(config.chunk_size, 200);
        assert_eq!(config.request_timeout_secs, 120);
        assert_eq!(config.recap_language, "Traditional Chinese");
    }
}
