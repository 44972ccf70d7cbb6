//! Prompt construction for classification and recap requests

use crate::error::ExtractorError;
use serde::Serialize;
use tunelog_domain::{ClassificationRecord, HistoryEntry};

/// Response schema declared with every classification request
///
/// Non-music entries are omitted by the service rather than returned with
/// null fields, so only `originalArtist` is optional.
pub const CLASSIFICATION_SCHEMA: &str = r#"{
  "type": "ARRAY",
  "items": {
    "type": "OBJECT",
    "properties": {
      "songName": { "type": "STRING", "description": "The name of the song." },
      "artist": { "type": "STRING", "description": "The artist of the song." },
      "isCover": { "type": "BOOLEAN", "description": "True if this is a cover song." },
      "originalArtist": { "type": "STRING", "description": "The original artist if it's a cover. Can be null.", "nullable": true }
    },
    "required": ["songName", "artist", "isCover"]
  }
}"#;

/// The only fields of an entry the service gets to see
#[derive(Serialize)]
struct PromptItem<'a> {
    title: &'a str,
    channel: &'a str,
}

/// Builds the classification prompt for one chunk
pub struct ClassificationPrompt<'a> {
    entries: &'a [HistoryEntry],
}

impl<'a> ClassificationPrompt<'a> {
    /// Create a prompt builder over a chunk
    pub fn new(entries: &'a [HistoryEntry]) -> Self {
        Self { entries }
    }

    /// Build the complete classification prompt
    pub fn build(&self) -> Result<String, ExtractorError> {
        let items: Vec<PromptItem<'_>> = self
            .entries
            .iter()
            .map(|e| PromptItem {
                title: &e.title,
                channel: &e.channel,
            })
            .collect();

        let mut prompt = String::new();
        prompt.push_str(CLASSIFICATION_INSTRUCTIONS);
        prompt.push_str("\n\nHere is the data chunk:\n");
        prompt.push_str(&serde_json::to_string(&items)?);
        Ok(prompt)
    }
}

/// Builds the free-text recap prompt over all results
pub struct RecapPrompt<'a> {
    records: &'a [ClassificationRecord],
    language: &'a str,
    max_words: usize,
}

impl<'a> RecapPrompt<'a> {
    /// Create a recap prompt builder
    pub fn new(records: &'a [ClassificationRecord], language: &'a str, max_words: usize) -> Self {
        Self {
            records,
            language,
            max_words,
        }
    }

    /// Build the complete recap prompt
    pub fn build(&self) -> Result<String, ExtractorError> {
        let mut prompt = String::new();
        prompt.push_str(RECAP_INSTRUCTIONS);
        prompt.push_str(&format!(
            "\nThe summary should be written in {}, be friendly, and highlight 2-3 key insights.\n",
            self.language
        ));
        prompt.push_str(&format!("Keep it under {} words.\n\n", self.max_words));
        prompt.push_str("My listening data:\n");
        prompt.push_str(&serde_json::to_string(self.records)?);
        Ok(prompt)
    }
}

const CLASSIFICATION_INSTRUCTIONS: &str = r#"You are a music analysis expert. Your task is to process a list of YouTube viewing history items and identify which ones are music tracks.
For each item, analyze the 'title' and 'channel'.
- If it is a song, extract the exact song name and artist.
- If it's a cover song, identify it as such, list the cover artist, and find the original artist.
- If it's not a song (e.g., a vlog, tech review, podcast, clip), ignore it completely.
- The output must be a perfectly valid and complete JSON array of objects.
- CRITICAL: Ensure all string values within the JSON are properly escaped. Newlines must be escaped as \n, and double quotes must be escaped as \". Failure to escape these characters will result in an invalid JSON string. For example, a title like "My "Cool" Song" must be represented as "songName": "My \"Cool\" Song"."#;

const RECAP_INSTRUCTIONS: &str = r#"Based on the following list of songs I've listened to, provide a concise and engaging summary of my listening habits.
Analyze the data to identify my top artists, top songs, and potential favorite genres."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_is_valid_json() {
        let schema: serde_json::Value = serde_json::from_str(CLASSIFICATION_SCHEMA).unwrap();
        assert_eq!(schema["type"], "ARRAY");
        assert_eq!(schema["items"]["properties"]["isCover"]["type"], "BOOLEAN");

        let required: Vec<&str> = schema["items"]["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert_eq!(required, vec!["songName", "artist", "isCover"]);
    }

    #[test]
    fn test_classification_prompt_embeds_title_channel_pairs() {
        let entries = vec![
            HistoryEntry::new("YOASOBI - Idol", "Ayase / YOASOBI", None),
            HistoryEntry::new("My \"Cool\" Vlog", "Someone", None),
        ];

        let prompt = ClassificationPrompt::new(&entries).build().unwrap();
        assert!(prompt.contains("music analysis expert"));
        assert!(prompt.contains(r#"{"title":"YOASOBI - Idol","channel":"Ayase / YOASOBI"}"#));
        // Quotes in titles are escaped in the embedded JSON
        assert!(prompt.contains(r#"My \"Cool\" Vlog"#));
    }

    #[test]
    fn test_classification_prompt_omits_watch_time() {
        let at = chrono::Utc::now();
        let entries = vec![HistoryEntry::new("t", "c", Some(at))];
        let prompt = ClassificationPrompt::new(&entries).build().unwrap();
        assert!(!prompt.contains("watched_at"));
    }

    #[test]
    fn test_recap_prompt_includes_settings_and_data() {
        let records = vec![ClassificationRecord::original("Lemon", "Kenshi Yonezu")];
        let prompt = RecapPrompt::new(&records, "English", 150).build().unwrap();

        assert!(prompt.contains("written in English"));
        assert!(prompt.contains("under 150 words"));
        assert!(prompt.contains(r#""songName":"Lemon""#));
    }
}
