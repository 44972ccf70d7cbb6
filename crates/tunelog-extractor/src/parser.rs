//! Resilient parsing of classification responses
//!
//! The service is asked for a JSON array but occasionally returns text that
//! is truncated, wrapped in prose, or contains badly escaped strings. Parsing
//! first tries the whole text strictly; when that fails, a single brace scan
//! re-discovers top-level objects and validates each one on its own, so one
//! broken object never costs the rest of the batch.

use serde_json::Value;
use tracing::{debug, warn};
use tunelog_domain::ClassificationRecord;

/// Outcome of parsing one classification response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// The whole text parsed strictly as a JSON array
    Complete(Vec<ClassificationRecord>),
    /// Strict parsing failed; these records were salvaged individually
    Partial(Vec<ClassificationRecord>),
    /// Strict parsing failed and no object could be salvaged
    Unrecoverable,
}

impl Extraction {
    /// Records carried by this outcome (empty when unrecoverable)
    pub fn records(&self) -> &[ClassificationRecord] {
        match self {
            Extraction::Complete(records) | Extraction::Partial(records) => records,
            Extraction::Unrecoverable => &[],
        }
    }

    /// Consume the outcome, yielding its records
    pub fn into_records(self) -> Vec<ClassificationRecord> {
        match self {
            Extraction::Complete(records) | Extraction::Partial(records) => records,
            Extraction::Unrecoverable => Vec::new(),
        }
    }
}

/// Parse a classification response into records
pub fn extract_records(raw: &str) -> Extraction {
    let body = strip_code_fence(raw);

    match serde_json::from_str::<Vec<Value>>(body) {
        Ok(values) => return Extraction::Complete(conforming_records(values)),
        Err(e) => warn!("Strict parse of classification response failed, attempting salvage: {}", e),
    }

    debug!("Problematic response text: {}", raw);

    let records = salvage_records(raw);
    if records.is_empty() {
        warn!("No records could be salvaged from response");
        Extraction::Unrecoverable
    } else {
        debug!("Salvaged {} records from malformed response", records.len());
        Extraction::Partial(records)
    }
}

/// Convert array members to records, dropping members of the wrong shape
fn conforming_records(values: Vec<Value>) -> Vec<ClassificationRecord> {
    let total = values.len();
    let records: Vec<ClassificationRecord> = values
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value.clone()) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Dropping non-conforming array member {}: {}", value, e);
                None
            }
        })
        .collect();

    if records.len() < total {
        debug!("Kept {} of {} array members", records.len(), total);
    }
    records
}

/// Strip a surrounding markdown code block, if any
fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Skip the opening fence line (```json or ```) and the closing fence
    let Some(newline) = rest.find('\n') else {
        return trimmed;
    };
    let inner = &rest[newline + 1..];
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

/// Scan for top-level `{...}` spans and keep every span that parses as a record
///
/// A quote toggles the in-string state unless the byte before it is a
/// backslash. A literal backslash right before a closing quote is therefore
/// read as an escape. Closing braces at depth zero are ignored.
fn salvage_records(text: &str) -> Vec<ClassificationRecord> {
    let bytes = text.as_bytes();
    let mut records = Vec::new();
    let mut depth: usize = 0;
    let mut in_string = false;
    let mut start: Option<usize> = None;

    for (i, &byte) in bytes.iter().enumerate() {
        if byte == b'"' && (i == 0 || bytes[i - 1] != b'\\') {
            in_string = !in_string;
            continue;
        }
        if in_string {
            continue;
        }

        match byte {
            b'{' => {
                if depth == 0 {
                    start = Some(i);
                }
                depth += 1;
            }
            b'}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    if let Some(begin) = start.take() {
                        let candidate = &text[begin..=i];
                        match parse_candidate(candidate) {
                            Some(record) => records.push(record),
                            None => warn!("Discarding unparseable object: {}", candidate),
                        }
                    }
                }
            }
            _ => {}
        }
    }

    if depth > 0 {
        debug!("Response ended inside an unterminated object");
    }

    records
}

fn parse_candidate(candidate: &str) -> Option<ClassificationRecord> {
    // Valid JSON of the wrong shape is discarded like invalid JSON
    let value: Value = serde_json::from_str(candidate).ok()?;
    serde_json::from_value(value).ok()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn record_strategy() -> impl Strategy<Value = ClassificationRecord> {
        (
            "[a-zA-Z0-9 {}\"']{0,12}",
            "[a-zA-Z0-9 {}\"']{0,12}",
            any::<bool>(),
            proptest::option::of("[a-zA-Z0-9 {}\"']{0,12}"),
        )
            .prop_map(|(song_name, artist, is_cover, original_artist)| ClassificationRecord {
                song_name,
                artist,
                is_cover,
                original_artist,
            })
    }

    /// Text free of braces, brackets, quotes and backslashes
    fn noise_strategy() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 ,.:;!?\n-]{0,16}"
    }

    proptest! {
        /// Property: any serialized array of records parses strictly and exactly
        #[test]
        fn test_valid_arrays_are_complete(records in proptest::collection::vec(record_strategy(), 0..10)) {
            let text = serde_json::to_string_pretty(&records).unwrap();
            prop_assert_eq!(extract_records(&text), Extraction::Complete(records));
        }

        /// Property: N objects separated by non-brace noise are all recovered
        #[test]
        fn test_objects_in_noise_are_recovered(
            pairs in proptest::collection::vec((record_strategy(), noise_strategy()), 1..8),
            lead in noise_strategy(),
        ) {
            let mut text = lead;
            for (record, noise) in &pairs {
                text.push_str(&serde_json::to_string(record).unwrap());
                text.push_str(noise);
            }

            let expected: Vec<ClassificationRecord> = pairs.into_iter().map(|(r, _)| r).collect();
            prop_assert_eq!(extract_records(&text), Extraction::Partial(expected));
        }
    }
}
