//! Record module - songs identified by the classification service

use serde::{Deserialize, Serialize};

/// A history entry identified as a specific song
///
/// The wire format is camelCase JSON (`songName`, `artist`, `isCover`,
/// `originalArtist`). `originalArtist` may be absent or `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationRecord {
    /// Name of the song
    pub song_name: String,

    /// Performing artist
    pub artist: String,

    /// Whether this performance is a cover
    pub is_cover: bool,

    /// Original artist when the performance is a cover
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_artist: Option<String>,
}

impl ClassificationRecord {
    /// Create a record for an original performance
    pub fn original(song_name: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            song_name: song_name.into(),
            artist: artist.into(),
            is_cover: false,
            original_artist: None,
        }
    }

    /// Create a record for a cover performance
    pub fn cover(
        song_name: impl Into<String>,
        artist: impl Into<String>,
        original_artist: impl Into<String>,
    ) -> Self {
        Self {
            song_name: song_name.into(),
            artist: artist.into(),
            is_cover: true,
            original_artist: Some(original_artist.into()),
        }
    }

    /// Key identifying a distinct song, `"<song> - <artist>"`
    pub fn song_key(&self) -> String {
        format!("{} - {}", self.song_name, self.artist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{"songName": "Lemon", "artist": "Kenshi Yonezu", "isCover": false}"#;
        let record: ClassificationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record, ClassificationRecord::original("Lemon", "Kenshi Yonezu"));
    }

    #[test]
    fn test_deserialize_null_original_artist() {
        let json = r#"{"songName": "Lemon", "artist": "Kenshi Yonezu", "isCover": false, "originalArtist": null}"#;
        let record: ClassificationRecord = serde_json::from_str(json).unwrap();
        assert!(record.original_artist.is_none());
    }

    #[test]
    fn test_deserialize_missing_required_field() {
        let json = r#"{"songName": "Lemon", "artist": "Kenshi Yonezu"}"#;
        assert!(serde_json::from_str::<ClassificationRecord>(json).is_err());
    }

    #[test]
    fn test_serialize_skips_absent_original_artist() {
        let record = ClassificationRecord::original("Lemon", "Kenshi Yonezu");
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"songName\""));
        assert!(json.contains("\"isCover\":false"));
        assert!(!json.contains("originalArtist"));
    }

    #[test]
    fn test_song_key() {
        let record = ClassificationRecord::cover("Lemon", "Someone", "Kenshi Yonezu");
        assert_eq!(record.song_key(), "Lemon - Someone");
    }
}
