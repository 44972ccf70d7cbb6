//! Order-preserving batching of history entries

use crate::error::ExtractorError;
use tunelog_domain::HistoryEntry;

/// A bounded, order-preserving batch submitted as one classification request
pub type Chunk = Vec<HistoryEntry>;

/// Splits a sequence into fixed-size chunks
#[derive(Debug, Clone, Copy)]
pub struct Batcher {
    chunk_size: usize,
}

impl Batcher {
    /// Create a new batcher
    ///
    /// # Errors
    ///
    /// Returns `ExtractorError::Config` if `chunk_size` is zero.
    pub fn new(chunk_size: usize) -> Result<Self, ExtractorError> {
        if chunk_size == 0 {
            return Err(ExtractorError::Config(
                "chunk_size must be greater than 0".to_string(),
            ));
        }
        Ok(Self { chunk_size })
    }

    /// Maximum items per chunk
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Number of chunks `split` would produce for `len` items
    pub fn chunk_count(&self, len: usize) -> usize {
        len.div_ceil(self.chunk_size)
    }

    /// Split items into consecutive chunks of at most `chunk_size`
    ///
    /// Concatenating the result reproduces the input; empty input yields no chunks.
    pub fn split<T>(&self, items: Vec<T>) -> Vec<Vec<T>> {
        let mut chunks = Vec::with_capacity(self.chunk_count(items.len()));
        let mut iter = items.into_iter().peekable();

        while iter.peek().is_some() {
            chunks.push(iter.by_ref().take(self.chunk_size).collect());
        }

        chunks
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: chunk count is ceil(L/C) and concatenation reproduces the input
        #[test]
        fn test_split_partitions_input(len in 0usize..500, chunk_size in 1usize..64) {
            let items: Vec<usize> = (0..len).collect();
            let batcher = Batcher::new(chunk_size).unwrap();
            let chunks = batcher.split(items.clone());

            prop_assert_eq!(chunks.len(), len.div_ceil(chunk_size));
            prop_assert!(chunks.iter().all(|c| !c.is_empty() && c.len() <= chunk_size));

            let rejoined: Vec<usize> = chunks.into_iter().flatten().collect();
            prop_assert_eq!(rejoined, items);
        }
    }
}
