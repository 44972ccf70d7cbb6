//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use tunelog_domain::{ClassificationRecord, ListeningStats};
use tunelog_extractor::SkippedChunk;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format classified songs.
    pub fn format_records(&self, records: &[ClassificationRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
            OutputFormat::Table => Ok(self.format_records_table(records)),
            OutputFormat::Quiet => Ok(self.format_records_quiet(records)),
        }
    }

    /// Format songs as a table.
    fn format_records_table(&self, records: &[ClassificationRecord]) -> String {
        if records.is_empty() {
            return self.colorize("No songs found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Song", "Artist", "Cover", "Original Artist"]);

        for (index, record) in records.iter().enumerate() {
            let cover = if record.is_cover { "Yes" } else { "No" };
            builder.push_record([
                (index + 1).to_string(),
                record.song_name.clone(),
                record.artist.clone(),
                cover.to_string(),
                record.original_artist.clone().unwrap_or_else(|| "-".to_string()),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format songs in quiet mode (`song - artist` per line).
    fn format_records_quiet(&self, records: &[ClassificationRecord]) -> String {
        let lines: Vec<String> = records.iter().map(|r| r.song_key()).collect();
        lines.join("\n")
    }

    /// Format listening statistics.
    pub fn format_stats(&self, stats: &ListeningStats) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Total songs", "Unique artists", "Unique songs", "Covers"]);
        builder.push_record([
            stats.total_songs.to_string(),
            stats.unique_artists.to_string(),
            stats.unique_songs.to_string(),
            stats.cover_songs.to_string(),
        ]);

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format notes about chunks that produced no songs.
    pub fn skipped_chunks(&self, skipped: &[SkippedChunk], total_chunks: usize) -> Vec<String> {
        skipped
            .iter()
            .map(|chunk| {
                self.warning(&format!(
                    "Batch {}/{} skipped: {}",
                    chunk.index + 1,
                    total_chunks,
                    chunk.reason
                ))
            })
            .collect()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format a section heading.
    pub fn heading(&self, text: &str) -> String {
        if self.color_enabled {
            text.bold().cyan().to_string()
        } else {
            text.to_string()
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
