//! Count aggregations over classification records

use crate::record::ClassificationRecord;
use std::collections::HashSet;

/// Summary counts for a set of classification records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListeningStats {
    /// Number of records (plays identified as songs)
    pub total_songs: usize,

    /// Number of distinct performing artists
    pub unique_artists: usize,

    /// Number of distinct song/artist pairs
    pub unique_songs: usize,

    /// Number of records flagged as covers
    pub cover_songs: usize,
}

impl ListeningStats {
    /// Compute statistics for a record set
    pub fn compute(records: &[ClassificationRecord]) -> Self {
        let unique_artists: HashSet<&str> = records.iter().map(|r| r.artist.as_str()).collect();
        let unique_songs: HashSet<String> = records.iter().map(|r| r.song_key()).collect();

        Self {
            total_songs: records.len(),
            unique_artists: unique_artists.len(),
            unique_songs: unique_songs.len(),
            cover_songs: records.iter().filter(|r| r.is_cover).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_records() {
        assert_eq!(ListeningStats::compute(&[]), ListeningStats::default());
    }

    #[test]
    fn test_counts() {
        let records = vec![
            ClassificationRecord::original("Lemon", "Kenshi Yonezu"),
            ClassificationRecord::original("Lemon", "Kenshi Yonezu"),
            ClassificationRecord::cover("Lemon", "Uru", "Kenshi Yonezu"),
            ClassificationRecord::original("Idol", "YOASOBI"),
        ];

        let stats = ListeningStats::compute(&records);
        assert_eq!(stats.total_songs, 4);
        assert_eq!(stats.unique_artists, 3);
        assert_eq!(stats.unique_songs, 3);
        assert_eq!(stats.cover_songs, 1);
    }
}
