//! Tunelog Extractor
//!
//! Turns a YouTube watch-history export into a list of identified songs.
//!
//! # Overview
//!
//! History entries are normalized, split into bounded chunks, and each chunk
//! is sent to a text-generation service with a response schema describing
//! song records. Responses that are not valid JSON are salvaged object by
//! object, so a single malformed record never discards a whole chunk.
//!
//! # Architecture
//!
//! ```text
//! export.json → normalize → Batcher → LlmProvider → extract_records → ProcessingState
//!                                                                         ↓
//!                                                              Recapper → recap text
//! ```
//!
//! # Key Features
//!
//! - **Normalization**: strips "Watched " prefixes and drops unattributed entries
//! - **Batching**: order-preserving chunks of a configurable size (default 1500)
//! - **Resilient Parsing**: strict parse first, brace-scan salvage second
//! - **Progress Tracking**: per-chunk progress, deduplicated warnings, skipped chunks
//! - **Fail Fast on Transport Errors**: results gathered so far are kept
//!
//! # Example Usage
//!
//! ```no_run
//! use tunelog_extractor::{normalize_history, ExtractorConfig, Pipeline, Recapper};
//! use tunelog_llm::GeminiProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ExtractorConfig::default();
//! let provider = GeminiProvider::new(
//!     "https://generativelanguage.googleapis.com",
//!     "gemini-2.0-flash",
//!     "api-key",
//!     config.request_timeout(),
//! )?;
//!
//! let entries = normalize_history(&std::fs::read_to_string("watch-history.json")?)?;
//! let pipeline = Pipeline::new(provider, config.clone())?;
//!
//! let state = pipeline
//!     .run_with_progress(entries, |state| println!("{}%", state.progress_percent()))
//!     .await;
//!
//! println!("Found {} songs", state.results.len());
//! for warning in &state.warnings {
//!     println!("warning: {}", warning);
//! }
//!
//! let recapper = Recapper::new(pipeline.provider().clone(), &config);
//! println!("{}", recapper.summarize(&state.results).await?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod chunking;
mod config;
mod error;
mod ingest;
mod parser;
mod pipeline;
mod prompt;
mod recap;
mod types;


pub use chunking::{Batcher, Chunk};
pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use ingest::{load_history, normalize_history};
pub use parser::{extract_records, Extraction};
pub use pipeline::{ChunkOutcome, Pipeline, PipelineRun};
pub use prompt::{ClassificationPrompt, RecapPrompt, CLASSIFICATION_SCHEMA};
pub use recap::Recapper;
pub use types::{
    ChunkProgress, ProcessingState, SkipReason, SkippedChunk, PARTIAL_RECOVERY_WARNING,
    UNRECOVERABLE_CHUNK_WARNING,
};
