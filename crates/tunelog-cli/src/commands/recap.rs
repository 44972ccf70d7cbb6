//! Recap command implementation.

use crate::cli::RecapArgs;
use crate::commands::show::load_results;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use tunelog_extractor::Recapper;
use tunelog_llm::GeminiProvider;

/// Execute the recap command.
pub async fn execute_recap(
    args: RecapArgs,
    config: &Config,
    api_key: Option<&str>,
    formatter: &Formatter,
) -> Result<()> {
    let records = load_results(&args.file)?;
    let api_key = config.api_key(api_key)?;

    let mut recap_config = config.pipeline.clone();
    if let Some(language) = args.language {
        recap_config.recap_language = language;
    }

    let provider = GeminiProvider::from_config(&config.gemini.provider, api_key)?;
    let recap = Recapper::new(provider, &recap_config)
        .summarize(&records)
        .await?;

    println!("{}\n{}", formatter.heading("Recap"), recap);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::show::save_results;
    use crate::config::OutputFormat;
    use crate::error::CliError;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use tunelog_extractor::ExtractorError;

    #[tokio::test]
    async fn test_empty_results_fail_before_network() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("songs.json");
        save_results(&path, &[]).unwrap();

        let mut config = Config::default();
        // Unroutable endpoint: the test fails loudly if a request is attempted
        config.gemini.provider.endpoint = "http://127.0.0.1:9".to_string();

        let formatter = Formatter::new(OutputFormat::Table, false);
        let args = RecapArgs {
            file: path,
            language: None,
        };

        let result = execute_recap(args, &config, Some("key"), &formatter).await;
        assert!(matches!(
            result,
            Err(CliError::Extractor(ExtractorError::EmptyDataset))
        ));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let args = RecapArgs {
            file: PathBuf::from("/nonexistent/songs.json"),
            language: None,
        };

        let result = execute_recap(args, &Config::default(), Some("key"), &formatter).await;
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
