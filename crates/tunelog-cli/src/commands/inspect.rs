//! Inspect command implementation.

use crate::cli::InspectArgs;
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::Formatter;
use serde::Serialize;
use std::collections::HashSet;
use tabled::{builder::Builder, settings::Style};
use tunelog_domain::HistoryEntry;
use tunelog_extractor::{load_history, Batcher};

/// Execute the inspect command.
pub async fn execute_inspect(args: InspectArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let entries = load_history(&args.file)?;
    let summary = HistorySummary::from_entries(&entries, config.pipeline.chunk_size)?;

    let output = match formatter.format() {
        OutputFormat::Json => serde_json::to_string_pretty(&summary)?,
        OutputFormat::Quiet => summary.entries.to_string(),
        OutputFormat::Table => summary.to_table(),
    };
    println!("{}", output);
    Ok(())
}

/// Counts describing a normalized watch-history export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct HistorySummary {
    entries: usize,
    dated_entries: usize,
    channels: usize,
    earliest: Option<String>,
    latest: Option<String>,
    batches: usize,
    batch_size: usize,
}

impl HistorySummary {
    fn from_entries(entries: &[HistoryEntry], batch_size: usize) -> Result<Self> {
        let batcher = Batcher::new(batch_size)?;
        let channels: HashSet<&str> = entries.iter().map(|e| e.channel.as_str()).collect();
        let dated: Vec<&HistoryEntry> = entries.iter().filter(|e| e.watched_at.is_some()).collect();

        let earliest = dated.iter().min_by_key(|e| e.watched_at).map(|e| e.display_date());
        let latest = dated.iter().max_by_key(|e| e.watched_at).map(|e| e.display_date());

        Ok(Self {
            entries: entries.len(),
            dated_entries: dated.len(),
            channels: channels.len(),
            earliest,
            latest,
            batches: batcher.chunk_count(entries.len()),
            batch_size,
        })
    }

    fn to_table(&self) -> String {
        let rows = [
            ("Entries", self.entries.to_string()),
            ("With watch time", self.dated_entries.to_string()),
            ("Channels", self.channels.to_string()),
            ("Earliest", self.earliest.clone().unwrap_or_else(|| "N/A".to_string())),
            ("Latest", self.latest.clone().unwrap_or_else(|| "N/A".to_string())),
            (
                "Batches",
                format!("{} (up to {} entries each)", self.batches, self.batch_size),
            ),
        ];

        let mut builder = Builder::default();
        for (label, value) in rows {
            builder.push_record([label.to_string(), value]);
        }

        let mut table = builder.build();
        table.with(Style::rounded());
        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tunelog_extractor::normalize_history;

    fn sample_entries() -> Vec<HistoryEntry> {
        let export = r#"[
            {"title": "Watched Lemon", "subtitles": [{"name": "Kenshi Yonezu"}], "time": "2024-05-02T08:00:00Z"},
            {"title": "Watched Idol", "subtitles": [{"name": "YOASOBI"}], "time": "2023-12-31T23:00:00Z"},
            {"title": "Watched Lemon live", "subtitles": [{"name": "Kenshi Yonezu"}]}
        ]"#;
        normalize_history(export).unwrap()
    }

    #[test]
    fn test_summary_counts() {
        let summary = HistorySummary::from_entries(&sample_entries(), 2).unwrap();
        assert_eq!(
            summary,
            HistorySummary {
                entries: 3,
                dated_entries: 2,
                channels: 2,
                earliest: Some("2023/12/31".to_string()),
                latest: Some("2024/05/02".to_string()),
                batches: 2,
                batch_size: 2,
            }
        );
    }

    #[test]
    fn test_empty_history() {
        let summary = HistorySummary::from_entries(&[], 1500).unwrap();
        assert_eq!(summary.entries, 0);
        assert_eq!(summary.batches, 0);
        assert!(summary.to_table().contains("N/A"));
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        assert!(HistorySummary::from_entries(&sample_entries(), 0).is_err());
    }
}
