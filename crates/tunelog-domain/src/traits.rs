//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

/// Trait for text-generation provider operations
///
/// Implemented by the infrastructure layer (tunelog-llm).
///
/// Both methods perform exactly one outbound request and never retry.
/// `Ok(None)` means the service answered successfully but the reply carried
/// no generated text.
#[allow(async_fn_in_trait)]
pub trait LlmProvider {
    /// Error type for provider operations
    type Error;

    /// Generate free-text completion
    async fn generate(&self, prompt: &str) -> Result<Option<String>, Self::Error>;

    /// Generate JSON output constrained by a response schema
    ///
    /// `schema` is the JSON text of the schema in the provider's dialect.
    async fn generate_structured(
        &self,
        prompt: &str,
        schema: &str,
    ) -> Result<Option<String>, Self::Error>;
}
