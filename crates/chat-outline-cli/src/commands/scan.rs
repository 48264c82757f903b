use anyhow::{Context, Result};
use chat_outline_core::{CalloutScanner, Config};
use std::path::Path;
use tracing::debug;

use crate::output::{self, OutputFormat};

/// Print the synthetic headings for the callouts in `file`.
pub async fn execute(file: &Path, format: OutputFormat, config: &Config) -> Result<()> {
    let content = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let headings = CalloutScanner::from_config(&config.scanner).scan(&content);
    debug!(file = %file.display(), count = headings.len(), "scanned callouts");

    match format {
        OutputFormat::Json => println!("{}", output::to_json(&headings)?),
        OutputFormat::Pretty => print!("{}", output::render_pretty(&headings, &headings)),
    }
    Ok(())
}
