//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tunelog_domain::{RecordQuery, SortDirection, SortKey};

/// Tunelog - find the music in your YouTube watch history.
#[derive(Debug, Parser)]
#[command(name = "tunelog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (defaults to ~/.tunelog/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log progress details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format ("song - artist" per line)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify a watch-history export
    Analyze(AnalyzeArgs),

    /// Display previously saved results
    Show(ShowArgs),

    /// Summarize previously saved results
    Recap(RecapArgs),

    /// Count the usable entries in a watch-history export
    Inspect(InspectArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Search and sort options shared by listing commands.
#[derive(Debug, Clone, Default, Args)]
pub struct ViewArgs {
    /// Only show songs whose name, artist or original artist contains this text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort by column
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,
}

impl ViewArgs {
    /// Build the record query described by these options.
    pub fn query(&self) -> RecordQuery {
        let mut query = RecordQuery::default();
        if let Some(term) = &self.search {
            query = query.with_search(term.clone());
        }
        if let Some(sort) = self.sort {
            let direction = if self.desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            query = query.with_sort(sort.into(), direction);
        }
        query
    }
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Watch-history export (watch-history.json)
    pub file: PathBuf,

    /// Save the classified songs to a JSON file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also print a recap of the results
    #[arg(long)]
    pub recap: bool,

    /// Entries per classification request
    #[arg(long)]
    pub chunk_size: Option<usize>,

    #[command(flatten)]
    pub view: ViewArgs,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Results file written by `analyze --output`
    pub file: PathBuf,

    #[command(flatten)]
    pub view: ViewArgs,
}

/// Arguments for the recap command.
#[derive(Debug, Parser)]
pub struct RecapArgs {
    /// Results file written by `analyze --output`
    pub file: PathBuf,

    /// Language of the recap (overrides the config file)
    #[arg(short, long)]
    pub language: Option<String>,
}

/// Arguments for the inspect command.
#[derive(Debug, Parser)]
pub struct InspectArgs {
    /// Watch-history export (watch-history.json)
    pub file: PathBuf,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the active configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration file path
    Path,
}

/// Sort column argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SortArg {
    /// Song name
    Song,
    /// Performing artist
    Artist,
    /// Cover flag
    Cover,
    /// Original artist
    OriginalArtist,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<SortArg> for SortKey {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Song => SortKey::SongName,
            SortArg::Artist => SortKey::Artist,
            SortArg::Cover => SortKey::IsCover,
            SortArg::OriginalArtist => SortKey::OriginalArtist,
        }
    }
}
