//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::commands::show::{render_listing, save_results};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tunelog_domain::traits::LlmProvider;
use tunelog_domain::HistoryEntry;
use tunelog_extractor::{
    load_history, Batcher, ExtractorError, Pipeline, ProcessingState, Recapper,
};
use tunelog_llm::GeminiProvider;

/// Execute the analyze command.
pub async fn execute_analyze(
    args: AnalyzeArgs,
    config: &Config,
    api_key: Option<&str>,
    formatter: &Formatter,
) -> Result<()> {
    let api_key = config.api_key(api_key)?;

    let mut pipeline_config = config.pipeline.clone();
    if let Some(chunk_size) = args.chunk_size {
        pipeline_config.chunk_size = chunk_size;
    }

    let entries = load_history(&args.file)?;
    if entries.is_empty() {
        return Err(CliError::InvalidInput(format!(
            "{} contains no usable watch-history entries",
            args.file.display()
        )));
    }
    eprintln!(
        "{}",
        formatter.info(&format!("Loaded {} history entries", entries.len()))
    );

    let provider = GeminiProvider::from_config(&config.gemini.provider, api_key)?;
    let pipeline = Pipeline::new(provider, pipeline_config)?;

    analyze(&pipeline, entries, &args, formatter).await
}

/// Classify entries, report the results, and optionally print a recap.
async fn analyze<L>(
    pipeline: &Pipeline<L>,
    entries: Vec<HistoryEntry>,
    args: &AnalyzeArgs,
    formatter: &Formatter,
) -> Result<()>
where
    L: LlmProvider + Clone,
    ExtractorError: From<L::Error>,
{
    let state = classify(pipeline, entries).await?;

    for warning in &state.warnings {
        eprintln!("{}", formatter.warning(warning));
    }
    for line in formatter.skipped_chunks(&state.skipped_chunks, state.total_chunks) {
        eprintln!("{}", line);
    }

    println!("{}", render_listing(&state.results, &args.view, formatter)?);

    if let Some(path) = &args.output {
        save_results(path, &state.results)?;
        eprintln!(
            "{}",
            formatter.success(&format!(
                "Saved {} songs to {}",
                state.results.len(),
                path.display()
            ))
        );
    }

    if let Some(error) = state.fatal_error {
        eprintln!(
            "{}",
            formatter.error(&format!(
                "Stopped after {}/{} batches; partial results are shown above",
                state.completed_chunks, state.total_chunks
            ))
        );
        return Err(error.into());
    }

    if args.recap {
        if state.results.is_empty() {
            eprintln!("{}", formatter.warning("No songs found, skipping recap"));
        } else {
            let recapper = Recapper::new(pipeline.provider().clone(), pipeline.config());
            let recap = recapper.summarize(&state.results).await?;
            println!("\n{}\n{}", formatter.heading("Recap"), recap);
        }
    }

    Ok(())
}

/// Run the pipeline behind a progress bar.
async fn classify<L>(pipeline: &Pipeline<L>, entries: Vec<HistoryEntry>) -> Result<ProcessingState>
where
    L: LlmProvider,
    ExtractorError: From<L::Error>,
{
    let total = Batcher::new(pipeline.config().chunk_size)?.chunk_count(entries.len());
    let bar = progress_bar(total);

    let state = pipeline
        .run_with_progress(entries, |state| {
            bar.set_position(state.completed_chunks as u64);
            bar.set_message(format!(
                "{} songs ({}%)",
                state.results.len(),
                state.progress_percent()
            ));
        })
        .await;

    bar.finish_and_clear();
    Ok(state)
}

fn progress_bar(total: usize) -> ProgressBar {
    let bar = ProgressBar::new(total as u64);
    bar.set_style(
        ProgressStyle::with_template(
            "{spinner:.cyan} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} batches {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-"),
    );
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ViewArgs;
    use crate::commands::show::load_results;
    use crate::config::OutputFormat;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use tunelog_extractor::ExtractorConfig;
    use tunelog_llm::{LlmError, MockProvider};

    fn entries(count: usize) -> Vec<HistoryEntry> {
        (0..count)
            .map(|i| HistoryEntry::new(format!("Video {}", i), "Channel", None))
            .collect()
    }

    fn args(output: Option<PathBuf>, recap: bool) -> AnalyzeArgs {
        AnalyzeArgs {
            file: PathBuf::from("unused.json"),
            output,
            recap,
            chunk_size: None,
            view: ViewArgs::default(),
        }
    }

    fn pipeline(provider: MockProvider, chunk_size: usize) -> Pipeline<MockProvider> {
        let config = ExtractorConfig {
            chunk_size,
            ..ExtractorConfig::default()
        };
        Pipeline::new(provider, config).unwrap()
    }

    #[tokio::test]
    async fn test_analyze_saves_results_and_recaps() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("songs.json");

        let provider = MockProvider::default();
        provider.push_response(r#"[{"songName": "Lemon", "artist": "Kenshi Yonezu", "isCover": false}]"#);
        provider.push_response("Mostly J-pop.");

        let formatter = Formatter::new(OutputFormat::Quiet, false);
        analyze(
            &pipeline(provider.clone(), 1500),
            entries(3),
            &args(Some(output.clone()), true),
            &formatter,
        )
        .await
        .unwrap();

        let saved = load_results(&output).unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].song_name, "Lemon");
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_fatal_error_still_saves_partial_results() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("songs.json");

        let provider = MockProvider::default();
        provider.push_response(r#"[{"songName": "Idol", "artist": "YOASOBI", "isCover": false}]"#);
        provider.push_error(LlmError::Transport {
            status: 500,
            body: "oops".into(),
        });

        let formatter = Formatter::new(OutputFormat::Json, false);
        let result = analyze(
            &pipeline(provider.clone(), 2),
            entries(4),
            &args(Some(output.clone()), true),
            &formatter,
        )
        .await;

        assert!(matches!(
            result,
            Err(CliError::Extractor(ExtractorError::Transport { status: 500, .. }))
        ));
        assert_eq!(load_results(&output).unwrap().len(), 1);
        // No recap after an aborted run
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_recap_skipped_without_songs() {
        let provider = MockProvider::new("[]");
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        analyze(&pipeline(provider.clone(), 1500), entries(2), &args(None, true), &formatter)
            .await
            .unwrap();

        assert_eq!(provider.call_count(), 1);
    }
}
