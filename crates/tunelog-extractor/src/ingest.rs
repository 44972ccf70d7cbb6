//! Normalization of raw watch-history exports

use crate::error::ExtractorError;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};
use tunelog_domain::HistoryEntry;

/// Prefix the export puts in front of every watched title
const WATCHED_PREFIX: &str = "Watched ";

/// One item of a watch-history export; every field may be missing
#[derive(Debug, Deserialize)]
struct RawHistoryItem {
    title: Option<String>,
    subtitles: Option<Vec<RawSubtitle>>,
    time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSubtitle {
    name: Option<String>,
}

impl RawHistoryItem {
    /// Elements that are not objects, or carry mistyped fields, yield `None`
    fn from_value(value: Value) -> Option<Self> {
        serde_json::from_value(value).ok()
    }

    fn into_entry(self) -> Option<HistoryEntry> {
        let title = self.title?;
        let title = title.strip_prefix(WATCHED_PREFIX).unwrap_or(&title);
        if title.is_empty() {
            return None;
        }

        let channel = self.subtitles?.into_iter().next()?.name?;
        if channel.is_empty() {
            return None;
        }

        let watched_at = self.time.as_deref().and_then(parse_time);

        Some(HistoryEntry::new(title, channel, watched_at))
    }
}

fn parse_time(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .ok()
}

/// Normalize a watch-history JSON document
///
/// Entries without a derivable title or channel are dropped silently, as are
/// array elements of the wrong shape.
///
/// # Errors
///
/// Returns `ExtractorError::InputFormat` if the document is not a JSON array.
pub fn normalize_history(json: &str) -> Result<Vec<HistoryEntry>, ExtractorError> {
    let items: Vec<Value> = serde_json::from_str(json)
        .map_err(|e| ExtractorError::InputFormat(e.to_string()))?;

    let total = items.len();
    let entries: Vec<HistoryEntry> = items
        .into_iter()
        .filter_map(RawHistoryItem::from_value)
        .filter_map(RawHistoryItem::into_entry)
        .collect();

    debug!("Dropped {} history items without title or channel", total - entries.len());
    info!("Normalized {} of {} history items", entries.len(), total);

    Ok(entries)
}

/// Read and normalize a watch-history file
pub fn load_history(path: impl AsRef<Path>) -> Result<Vec<HistoryEntry>, ExtractorError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| {
        ExtractorError::InputFormat(format!("Failed to read {}: {}", path.display(), e))
    })?;
    normalize_history(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;

    #[test]
    fn test_normalizes_complete_item() {
        let json = r#"[
            {
                "header": "YouTube",
                "title": "Watched YOASOBI - Idol",
                "titleUrl": "https://www.youtube.com/watch?v=ZRtdQ81jPUQ",
                "subtitles": [{"name": "Ayase / YOASOBI", "url": "https://www.youtube.com/channel/x"}],
                "time": "2024-03-09T18:30:00.000Z"
            }
        ]"#;

        let entries = normalize_history(json).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "YOASOBI - Idol");
        assert_eq!(entries[0].channel, "Ayase / YOASOBI");
        assert_eq!(
            entries[0].watched_at,
            Some(Utc.with_ymd_and_hms(2024, 3, 9, 18, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_title_without_prefix_kept_as_is() {
        let json = r#"[{"title": "Lemon", "subtitles": [{"name": "Kenshi Yonezu"}]}]"#;
        let entries = normalize_history(json).unwrap();
        assert_eq!(entries[0].title, "Lemon");
        assert_eq!(entries[0].watched_at, None);
    }

    #[test]
    fn test_drops_items_missing_title_or_channel() {
        let json = r#"[
            {"title": "Watched a video that has been removed", "time": "2024-01-01T00:00:00Z"},
            {"subtitles": [{"name": "Orphan channel"}]},
            {"title": "Watched ", "subtitles": [{"name": "Empty title"}]},
            {"title": "Watched Song", "subtitles": [{}]},
            {"title": "Watched Song", "subtitles": []},
            {"title": "Watched Song", "subtitles": null},
            {"title": "Watched Kept", "subtitles": [{"name": "Channel"}]}
        ]"#;

        let entries = normalize_history(json).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Kept");
    }

    #[test]
    fn test_drops_elements_of_wrong_shape() {
        let json = r#"[
            "stray",
            42,
            null,
            {"title": "Watched Typed", "subtitles": [{"name": 5}]},
            {"title": 7, "subtitles": [{"name": "Channel"}]},
            {"title": "Watched Kept", "subtitles": [{"name": "Channel"}]}
        ]"#;

        let entries = normalize_history(json).unwrap();
        assert_eq!(entries, vec![HistoryEntry::new("Kept", "Channel", None)]);
    }

    #[test]
    fn test_unparseable_time_becomes_none() {
        let json = r#"[{"title": "A", "subtitles": [{"name": "B"}], "time": "yesterday"}]"#;
        let entries = normalize_history(json).unwrap();
        assert_eq!(entries[0].watched_at, None);
    }

    #[test]
    fn test_preserves_order() {
        let json = r#"[
            {"title": "Watched 1", "subtitles": [{"name": "c"}]},
            {"title": "Watched 2", "subtitles": [{"name": "c"}]},
            {"title": "Watched 3", "subtitles": [{"name": "c"}]}
        ]"#;
        let titles: Vec<String> = normalize_history(json)
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_non_array_is_input_format_error() {
        let result = normalize_history(r#"{"title": "not a list"}"#);
        assert!(matches!(result, Err(ExtractorError::InputFormat(_))));
    }

    #[test]
    fn test_malformed_json_is_input_format_error() {
        let result = normalize_history("[{\"title\": ");
        assert!(matches!(result, Err(ExtractorError::InputFormat(_))));
    }

    #[test]
    fn test_load_history_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"title": "Watched X", "subtitles": [{{"name": "Y"}}]}}]"#).unwrap();

        let entries = load_history(file.path()).unwrap();
        assert_eq!(entries, vec![HistoryEntry::new("X", "Y", None)]);
    }

    #[test]
    fn test_load_history_missing_file() {
        let result = load_history("/nonexistent/watch-history.json");
        assert!(matches!(result, Err(ExtractorError::InputFormat(_))));
    }
}
