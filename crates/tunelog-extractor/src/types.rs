//! Run state for the classification pipeline

use crate::error::ExtractorError;
use serde::Serialize;
use tunelog_domain::ClassificationRecord;

/// Warning recorded (once per run) when a chunk's response had to be salvaged
pub const PARTIAL_RECOVERY_WARNING: &str =
    "Some responses were malformed and were repaired automatically.";

/// Warning recorded (once per run) when a chunk's response could not be salvaged at all
pub const UNRECOVERABLE_CHUNK_WARNING: &str =
    "Some responses had severe format problems and could not be repaired; results may be incomplete.";

/// Why a chunk contributed no records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The response text yielded zero salvageable records
    Unrecoverable,
    /// The service reply carried no generated text
    NoContent,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Unrecoverable => write!(f, "response could not be parsed"),
            SkipReason::NoContent => write!(f, "response carried no content"),
        }
    }
}

/// A non-fatal note about a chunk that produced nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkippedChunk {
    /// Zero-based chunk index
    pub index: usize,
    /// What went wrong
    pub reason: SkipReason,
}

/// Accumulated state of one classification run
///
/// Records are appended in chunk order and never removed. A fresh state is
/// built for every run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessingState {
    /// Number of chunks the input was split into
    pub total_chunks: usize,

    /// Chunks handled without a fatal error
    pub completed_chunks: usize,

    /// Every record extracted so far
    pub results: Vec<ClassificationRecord>,

    /// Distinct warnings in the order first raised
    pub warnings: Vec<String>,

    /// Chunks that contributed no records
    pub skipped_chunks: Vec<SkippedChunk>,

    /// Error that aborted the run, if any
    pub fatal_error: Option<ExtractorError>,
}

impl ProcessingState {
    /// Create the state for a run over `total_chunks` chunks
    pub fn new(total_chunks: usize) -> Self {
        Self {
            total_chunks,
            ..Self::default()
        }
    }

    /// Completion as a whole percentage, rounded half up
    ///
    /// A run with no chunks reports 0.
    pub fn progress_percent(&self) -> u8 {
        if self.total_chunks == 0 {
            return 0;
        }
        let done = self.completed_chunks.min(self.total_chunks);
        ((200 * done + self.total_chunks) / (2 * self.total_chunks)) as u8
    }

    /// Record a warning unless an identical one is already present
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        let warning = warning.into();
        if !self.warnings.contains(&warning) {
            self.warnings.push(warning);
        }
    }

    /// Whether every chunk was handled without a fatal error
    pub fn succeeded(&self) -> bool {
        self.fatal_error.is_none() && self.completed_chunks == self.total_chunks
    }
}

/// Report emitted after each processed chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkProgress {
    /// Zero-based index of the chunk just handled
    pub chunk_index: usize,
    /// Records contributed by that chunk
    pub records_added: usize,
    /// Overall completion after that chunk
    pub percent: u8,
}
