//! Tunelog Domain Layer
//!
//! Core value types and trait interfaces shared by every other Tunelog crate.
//!
//! ## Key Concepts
//!
//! - **HistoryEntry**: one normalized line of a watch-history export
//! - **ClassificationRecord**: a history entry identified as a song
//! - **Queries**: search and sort over classification records
//! - **Stats**: count aggregations over classification records
//!
//! ## Architecture
//!
//! - Pure data and logic only, no I/O
//! - Provider implementations live in `tunelog-llm`
//! - The pipeline that produces records lives in `tunelog-extractor`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod history;
pub mod query;
pub mod record;
pub mod stats;
pub mod traits;

// Re-exports for convenience
pub use history::HistoryEntry;
pub use query::{RecordQuery, SortDirection, SortKey};
pub use record::ClassificationRecord;
pub use stats::ListeningStats;
