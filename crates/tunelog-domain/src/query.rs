//! Query module - search and sort over classification records

use crate::record::ClassificationRecord;
use std::cmp::Ordering;

/// Column a record listing can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Sort by song name
    SongName,
    /// Sort by performing artist
    Artist,
    /// Sort by cover flag (originals first when ascending)
    IsCover,
    /// Sort by original artist, missing values as empty
    OriginalArtist,
}

impl SortKey {
    /// Get the key name as it appears in the record wire format
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::SongName => "songName",
            SortKey::Artist => "artist",
            SortKey::IsCover => "isCover",
            SortKey::OriginalArtist => "originalArtist",
        }
    }

    /// Parse a key from its wire name or snake_case form
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('_', "").as_str() {
            "songname" | "song" => Some(SortKey::SongName),
            "artist" => Some(SortKey::Artist),
            "iscover" | "cover" => Some(SortKey::IsCover),
            "originalartist" => Some(SortKey::OriginalArtist),
            _ => None,
        }
    }

    fn compare(&self, a: &ClassificationRecord, b: &ClassificationRecord) -> Ordering {
        match self {
            SortKey::SongName => a.song_name.cmp(&b.song_name),
            SortKey::Artist => a.artist.cmp(&b.artist),
            SortKey::IsCover => a.is_cover.cmp(&b.is_cover),
            SortKey::OriginalArtist => {
                let left = a.original_artist.as_deref().unwrap_or("");
                let right = b.original_artist.as_deref().unwrap_or("");
                left.cmp(right)
            }
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    /// Smallest first
    #[default]
    Ascending,
    /// Largest first
    Descending,
}

/// Search and sort criteria for a record listing
///
/// # Examples
///
/// ```
/// use tunelog_domain::{ClassificationRecord, RecordQuery, SortDirection, SortKey};
///
/// let records = vec![
///     ClassificationRecord::original("Lemon", "Kenshi Yonezu"),
///     ClassificationRecord::original("Idol", "YOASOBI"),
/// ];
///
/// let query = RecordQuery::default().with_sort(SortKey::SongName, SortDirection::Ascending);
/// let sorted = query.apply(&records);
/// assert_eq!(sorted[0].song_name, "Idol");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordQuery {
    /// Case-insensitive substring matched against song, artist and original artist
    pub search: Option<String>,

    /// Sort column and direction; `None` keeps classification order
    pub sort: Option<(SortKey, SortDirection)>,
}

impl RecordQuery {
    /// Restrict to records matching a search term
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Order results by a column
    pub fn with_sort(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.sort = Some((key, direction));
        self
    }

    /// Whether a record matches the search term
    pub fn matches(&self, record: &ClassificationRecord) -> bool {
        let term = match &self.search {
            Some(term) if !term.is_empty() => term.to_lowercase(),
            _ => return true,
        };

        record.song_name.to_lowercase().contains(&term)
            || record.artist.to_lowercase().contains(&term)
            || record
                .original_artist
                .as_ref()
                .is_some_and(|a| a.to_lowercase().contains(&term))
    }

    /// Filter then sort; the input is left untouched
    pub fn apply(&self, records: &[ClassificationRecord]) -> Vec<ClassificationRecord> {
        let mut selected: Vec<ClassificationRecord> = records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect();

        if let Some((key, direction)) = self.sort {
            // Stable sort keeps classification order among equal keys
            selected.sort_by(|a, b| {
                let ordering = key.compare(a, b);
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }

        selected
    }
}
