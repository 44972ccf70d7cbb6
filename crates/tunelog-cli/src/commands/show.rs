//! Show command implementation.

use crate::cli::{ShowArgs, ViewArgs};
use crate::config::OutputFormat;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::fs;
use std::path::Path;
use tunelog_domain::{ClassificationRecord, ListeningStats};

/// Execute the show command.
pub async fn execute_show(args: ShowArgs, formatter: &Formatter) -> Result<()> {
    let records = load_results(&args.file)?;
    println!("{}", render_listing(&records, &args.view, formatter)?);
    Ok(())
}

/// Read a results file written by `analyze --output`.
pub fn load_results(path: &Path) -> Result<Vec<ClassificationRecord>> {
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| {
        CliError::InvalidInput(format!(
            "{} is not a saved results file: {}",
            path.display(),
            e
        ))
    })
}

/// Write classified songs as pretty JSON.
pub fn save_results(path: &Path, records: &[ClassificationRecord]) -> Result<()> {
    fs::write(path, serde_json::to_string_pretty(records)?)?;
    Ok(())
}

/// Apply search and sort, then render the listing and, for tables, statistics.
pub fn render_listing(
    records: &[ClassificationRecord],
    view: &ViewArgs,
    formatter: &Formatter,
) -> Result<String> {
    let selected = view.query().apply(records);
    let listing = formatter.format_records(&selected)?;

    if formatter.format() != OutputFormat::Table {
        return Ok(listing);
    }

    // Statistics always describe the full result set
    let stats = ListeningStats::compute(records);
    let mut output = String::new();
    output.push_str(&formatter.heading("Songs"));
    output.push('\n');
    output.push_str(&listing);
    if view.search.is_some() {
        output.push('\n');
        output.push_str(&formatter.info(&format!(
            "{} of {} songs match",
            selected.len(),
            records.len()
        )));
    }
    output.push_str("\n\n");
    output.push_str(&formatter.heading("Statistics"));
    output.push('\n');
    output.push_str(&formatter.format_stats(&stats));
    Ok(output)
}
