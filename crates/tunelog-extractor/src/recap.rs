//! Free-text listening recap

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::prompt::RecapPrompt;
use tokio::time::timeout;
use tracing::{debug, info};
use tunelog_domain::traits::LlmProvider;
use tunelog_domain::ClassificationRecord;

/// Asks the provider for a short summary of classified listening history
pub struct Recapper<L> {
    provider: L,
    language: String,
    max_words: usize,
    request_timeout: std::time::Duration,
}

impl<L> Recapper<L>
where
    L: LlmProvider,
    ExtractorError: From<L::Error>,
{
    /// Create a recapper using the language, length and timeout from `config`
    pub fn new(provider: L, config: &ExtractorConfig) -> Self {
        Self {
            provider,
            language: config.recap_language.clone(),
            max_words: config.recap_max_words,
            request_timeout: config.request_timeout(),
        }
    }

    /// Summarize the given records with a single provider call
    ///
    /// # Errors
    ///
    /// - `EmptyDataset` when `records` is empty; no call is made.
    /// - `UnexpectedResponseShape` when the reply carries no text.
    /// - Transport, network and timeout errors from the call itself.
    pub async fn summarize(
        &self,
        records: &[ClassificationRecord],
    ) -> Result<String, ExtractorError> {
        if records.is_empty() {
            return Err(ExtractorError::EmptyDataset);
        }

        info!("Requesting recap of {} records in {}", records.len(), self.language);

        let prompt = RecapPrompt::new(records, &self.language, self.max_words).build()?;
        debug!("Recap prompt length: {} chars", prompt.len());

        let reply = timeout(self.request_timeout, self.provider.generate(&prompt))
            .await
            .map_err(|_| ExtractorError::Timeout)??;

        reply.ok_or(ExtractorError::UnexpectedResponseShape)
    }
}
