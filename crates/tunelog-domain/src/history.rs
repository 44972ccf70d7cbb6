//! History module - normalized watch-history entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One normalized entry of a user's watch history
///
/// Entries are created once during ingestion and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Video title with any "Watched " prefix removed
    pub title: String,

    /// Uploading channel name
    pub channel: String,

    /// When the video was watched, if the export carried a parseable time
    pub watched_at: Option<DateTime<Utc>>,
}

impl HistoryEntry {
    /// Create a new history entry
    pub fn new(
        title: impl Into<String>,
        channel: impl Into<String>,
        watched_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            title: title.into(),
            channel: channel.into(),
            watched_at,
        }
    }

    /// Watch date formatted as `YYYY/MM/DD`, or `N/A` when unknown
    pub fn display_date(&self) -> String {
        match self.watched_at {
            Some(at) => at.format("%Y/%m/%d").to_string(),
            None => "N/A".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_display_date_known() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 18, 30, 0).unwrap();
        let entry = HistoryEntry::new("Song", "Channel", Some(at));
        assert_eq!(entry.display_date(), "2024/03/09");
    }

    #[test]
    fn test_display_date_unknown() {
        let entry = HistoryEntry::new("Song", "Channel", None);
        assert_eq!(entry.display_date(), "N/A");
    }
}
