//! Sequential classification pipeline
//!
//! History is split into chunks and each chunk is classified with one
//! provider call. Chunks are processed strictly one after another; the only
//! suspension point of a step is the awaited provider call.

use crate::chunking::{Batcher, Chunk};
use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::{extract_records, Extraction};
use crate::prompt::{ClassificationPrompt, CLASSIFICATION_SCHEMA};
use crate::types::{
    ChunkProgress, ProcessingState, SkipReason, SkippedChunk, PARTIAL_RECOVERY_WARNING,
    UNRECOVERABLE_CHUNK_WARNING,
};
use std::iter::Enumerate;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use tunelog_domain::traits::LlmProvider;
use tunelog_domain::HistoryEntry;

/// Result of classifying a single chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkOutcome {
    /// The service replied with text, parsed with the given outcome
    Processed(Extraction),
    /// The service replied successfully but without generated text
    NoContent,
    /// The call failed; the run must stop
    Fatal(ExtractorError),
}

/// Drives classification of watch history through an `LlmProvider`
pub struct Pipeline<L> {
    provider: L,
    config: ExtractorConfig,
    batcher: Batcher,
}

impl<L> Pipeline<L>
where
    L: LlmProvider,
    ExtractorError: From<L::Error>,
{
    /// Create a new pipeline
    ///
    /// # Errors
    ///
    /// Returns `ExtractorError::Config` if the configuration is invalid.
    pub fn new(provider: L, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        let batcher = Batcher::new(config.chunk_size)?;

        Ok(Self {
            provider,
            config,
            batcher,
        })
    }

    /// The provider used for classification
    pub fn provider(&self) -> &L {
        &self.provider
    }

    /// The active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Split the entries and prepare a fresh run
    pub fn start(&self, entries: Vec<HistoryEntry>) -> PipelineRun<'_, L> {
        let chunks = self.batcher.split(entries);
        info!(
            "Starting classification: {} chunks of up to {} entries",
            chunks.len(),
            self.batcher.chunk_size()
        );

        PipelineRun {
            pipeline: self,
            state: ProcessingState::new(chunks.len()),
            chunks: chunks.into_iter().enumerate(),
        }
    }

    /// Classify all entries and return the final state
    pub async fn run(&self, entries: Vec<HistoryEntry>) -> ProcessingState {
        self.run_with_progress(entries, |_| {}).await
    }

    /// Classify all entries, reporting the state after every handled chunk
    pub async fn run_with_progress<F>(
        &self,
        entries: Vec<HistoryEntry>,
        mut on_progress: F,
    ) -> ProcessingState
    where
        F: FnMut(&ProcessingState),
    {
        let mut run = self.start(entries);
        while run.step().await.is_some() {
            on_progress(run.state());
        }
        run.into_state()
    }

    /// Classify one chunk with a single provider call
    pub async fn process_chunk(&self, chunk: &[HistoryEntry]) -> ChunkOutcome {
        let prompt = match ClassificationPrompt::new(chunk).build() {
            Ok(prompt) => prompt,
            Err(e) => return ChunkOutcome::Fatal(e),
        };

        debug!("Prompt length: {} chars", prompt.len());

        let reply = timeout(
            self.config.request_timeout(),
            self.provider.generate_structured(&prompt, CLASSIFICATION_SCHEMA),
        )
        .await;

        match reply {
            Err(_) => ChunkOutcome::Fatal(ExtractorError::Timeout),
            Ok(Err(e)) => ChunkOutcome::Fatal(e.into()),
            Ok(Ok(None)) => ChunkOutcome::NoContent,
            Ok(Ok(Some(text))) => {
                debug!("Response length: {} chars", text.len());
                ChunkOutcome::Processed(extract_records(&text))
            }
        }
    }
}

/// An in-progress classification run
///
/// Call [`PipelineRun::step`] until it returns `None`, then inspect the
/// state. Dropping a run between steps abandons it.
pub struct PipelineRun<'a, L> {
    pipeline: &'a Pipeline<L>,
    chunks: Enumerate<std::vec::IntoIter<Chunk>>,
    state: ProcessingState,
}

impl<L> PipelineRun<'_, L>
where
    L: LlmProvider,
    ExtractorError: From<L::Error>,
{
    /// Process the next chunk
    ///
    /// Returns `None` once every chunk is handled or after a fatal error;
    /// check `state().fatal_error` to tell the two apart.
    pub async fn step(&mut self) -> Option<ChunkProgress> {
        if self.state.fatal_error.is_some() {
            return None;
        }
        let (index, chunk) = self.chunks.next()?;
        let total = self.state.total_chunks;

        debug!("Processing chunk {}/{} ({} entries)", index + 1, total, chunk.len());
        let started = Instant::now();

        let records_added = match self.pipeline.process_chunk(&chunk).await {
            ChunkOutcome::Fatal(error) => {
                warn!(
                    "Chunk {}/{} failed, aborting run with {} records kept: {}",
                    index + 1,
                    total,
                    self.state.results.len(),
                    error
                );
                self.state.fatal_error = Some(error);
                return None;
            }
            ChunkOutcome::Processed(Extraction::Complete(records)) => {
                let count = records.len();
                self.state.results.extend(records);
                count
            }
            ChunkOutcome::Processed(Extraction::Partial(records)) => {
                let count = records.len();
                warn!("Chunk {} recovered {} records from a malformed response", index + 1, count);
                self.state.results.extend(records);
                self.state.add_warning(PARTIAL_RECOVERY_WARNING);
                count
            }
            ChunkOutcome::Processed(Extraction::Unrecoverable) => {
                self.skip(index, SkipReason::Unrecoverable);
                self.state.add_warning(UNRECOVERABLE_CHUNK_WARNING);
                0
            }
            ChunkOutcome::NoContent => {
                self.skip(index, SkipReason::NoContent);
                0
            }
        };

        self.state.completed_chunks += 1;
        let percent = self.state.progress_percent();

        info!(
            "Chunk {}/{} done: {} records in {} ms ({}%)",
            index + 1,
            total,
            records_added,
            started.elapsed().as_millis(),
            percent
        );

        Some(ChunkProgress {
            chunk_index: index,
            records_added,
            percent,
        })
    }

    /// Current state of the run
    pub fn state(&self) -> &ProcessingState {
        &self.state
    }

    /// Finish the run, yielding its state
    pub fn into_state(self) -> ProcessingState {
        self.state
    }

    fn skip(&mut self, index: usize, reason: SkipReason) {
        warn!("Skipping chunk {}: {}", index + 1, reason);
        self.state.skipped_chunks.push(SkippedChunk { index, reason });
    }
}
