//! Error types for the Extractor

use thiserror::Error;
use tunelog_llm::LlmError;

/// Errors that can occur while ingesting, classifying or summarizing history
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractorError {
    /// Uploaded history is not a JSON array of entries
    #[error("Invalid history format: {0}")]
    InputFormat(String),

    /// The service answered with a non-success HTTP status
    #[error("Request failed with status {status}: {body}")]
    Transport {
        /// HTTP status code
        status: u16,
        /// Full response body
        body: String,
    },

    /// The request could not be sent or received
    #[error("Network error: {0}")]
    Network(String),

    /// The request did not finish within the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// The service answered with a body that is not JSON
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Any other provider failure
    #[error("LLM error: {0}")]
    Llm(String),

    /// The service reply lacked the expected content field
    #[error("Unexpected response shape: reply carried no text content")]
    UnexpectedResponseShape,

    /// A recap was requested before any classification exists
    #[error("No classification results to summarize")]
    EmptyDataset,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error while building a request
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<LlmError> for ExtractorError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::Transport { status, body } => ExtractorError::Transport { status, body },
            LlmError::Network(msg) => ExtractorError::Network(msg),
            LlmError::InvalidResponse(msg) => ExtractorError::InvalidResponse(msg),
            LlmError::InvalidRequest(msg) | LlmError::Other(msg) => ExtractorError::Llm(msg),
        }
    }
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::Serialization(e.to_string())
    }
}
