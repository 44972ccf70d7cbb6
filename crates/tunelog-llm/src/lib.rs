//! Tunelog LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `tunelog-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Scripted mock for testing
//! - `GeminiProvider`: Google Gemini `generateContent` API integration
//!
//! Providers never retry. A failed call is reported once and the caller
//! decides what to do with it.
//!
//! # Examples
//!
//! ```
//! use tunelog_llm::MockProvider;
//! use tunelog_domain::traits::LlmProvider;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate("test prompt").await.unwrap();
//! assert_eq!(result.as_deref(), Some("Hello from LLM!"));
//! # });
//! ```

#![warn(missing_docs)]

pub mod gemini;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tunelog_domain::traits::LlmProvider as LlmProviderTrait;

pub use gemini::{GeminiConfig, GeminiProvider};

/// Errors that can occur during LLM operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// The service answered with a non-success HTTP status
    #[error("HTTP {status}: {body}")]
    Transport {
        /// HTTP status code
        status: u16,
        /// Full response body
        body: String,
    },

    /// The request could not be sent or the response could not be received
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with a body that is not valid JSON
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// One scripted reply of a [`MockProvider`]
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Reply with generated text
    Text(String),
    /// Reply successfully but without any generated text
    NoContent,
    /// Fail the call
    Fail(LlmError),
}

/// Mock LLM provider for deterministic testing
///
/// Replies are consumed in call order from a script. Once the script runs
/// dry every call gets the default reply. No network calls are made.
///
/// # Examples
///
/// ```
/// use tunelog_llm::{LlmError, MockProvider};
/// use tunelog_domain::traits::LlmProvider;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let provider = MockProvider::new("default");
/// provider.push_response("first");
/// provider.push_error(LlmError::Network("down".to_string()));
///
/// assert_eq!(provider.generate("a").await.unwrap().as_deref(), Some("first"));
/// assert!(provider.generate("b").await.is_err());
/// assert_eq!(provider.generate("c").await.unwrap().as_deref(), Some("default"));
/// assert_eq!(provider.call_count(), 3);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_reply: MockReply,
    script: Arc<Mutex<VecDeque<MockReply>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed default response
    pub fn new(response: impl Into<String>) -> Self {
        Self::with_default(MockReply::Text(response.into()))
    }

    /// Create a new MockProvider with an arbitrary default reply
    pub fn with_default(reply: MockReply) -> Self {
        Self {
            default_reply: reply,
            script: Arc::new(Mutex::new(VecDeque::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a text reply
    pub fn push_response(&self, response: impl Into<String>) {
        self.push_reply(MockReply::Text(response.into()));
    }

    /// Queue a reply without generated content
    pub fn push_no_content(&self) {
        self.push_reply(MockReply::NoContent);
    }

    /// Queue a failure
    pub fn push_error(&self, error: LlmError) {
        self.push_reply(MockReply::Fail(error));
    }

    /// Queue any reply
    pub fn push_reply(&self, reply: MockReply) {
        self.script.lock().unwrap().push_back(reply);
    }

    /// Get the number of calls made so far
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Get every prompt received, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn next_reply(&self, prompt: &str) -> Result<Option<String>, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        let reply = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.default_reply.clone());

        match reply {
            MockReply::Text(text) => Ok(Some(text)),
            MockReply::NoContent => Ok(None),
            MockReply::Fail(error) => Err(error),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str) -> Result<Option<String>, Self::Error> {
        self.next_reply(prompt)
    }

    async fn generate_structured(
        &self,
        prompt: &str,
        _schema: &str,
    ) -> Result<Option<String>, Self::Error> {
        // The mock does not enforce the schema; scripted text is returned as-is
        self.next_reply(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate("any prompt").await;
        assert_eq!(result.unwrap().as_deref(), Some("Test response"));
    }

    #[tokio::test]
    async fn test_mock_provider_scripted_order() {
        let provider = MockProvider::default();
        provider.push_response("one");
        provider.push_response("two");

        assert_eq!(provider.generate("a").await.unwrap().as_deref(), Some("one"));
        assert_eq!(provider.generate("b").await.unwrap().as_deref(), Some("two"));
        assert_eq!(
            provider.generate("c").await.unwrap().as_deref(),
            Some("Default mock response")
        );
    }

    #[tokio::test]
    async fn test_mock_provider_call_count_and_prompts() {
        let provider = MockProvider::new("test");
        assert_eq!(provider.call_count(), 0);

        provider.generate("prompt1").await.unwrap();
        provider.generate_structured("prompt2", "{}").await.unwrap();
        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.prompts(), vec!["prompt1", "prompt2"]);
    }

    #[tokio::test]
    async fn test_mock_provider_error() {
        let provider = MockProvider::default();
        provider.push_error(LlmError::Transport {
            status: 500,
            body: "boom".to_string(),
        });

        let result = provider.generate("bad prompt").await;
        assert!(matches!(result, Err(LlmError::Transport { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_mock_provider_no_content() {
        let provider = MockProvider::with_default(MockReply::NoContent);
        assert_eq!(provider.generate("p").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_state() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();
        provider2.push_response("scripted");

        assert_eq!(provider1.generate("x").await.unwrap().as_deref(), Some("scripted"));

        // Both share the same script and call log due to Arc
        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }

    #[test]
    fn test_transport_error_display_includes_body() {
        let error = LlmError::Transport {
            status: 429,
            body: "quota exceeded".to_string(),
        };
        assert_eq!(error.to_string(), "HTTP 429: quota exceeded");
    }
}
