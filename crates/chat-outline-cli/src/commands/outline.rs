use anyhow::{Context, Result, anyhow};
use chat_outline_core::{ChatOutline, Config, DocumentId, FsWorkspace, HeadingIndexSource};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::output::{self, OutputFormat};

/// Install the overlay over the directory holding `file`, make `file` the
/// active document, print its merged heading index and remove the overlay.
pub async fn execute(file: &Path, format: OutputFormat, config: &Config) -> Result<()> {
    let name = file
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("Not a file path: {}", file.display()))?;
    let root = file
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let id = DocumentId::new(name);

    let host = Arc::new(FsWorkspace::new(root));
    host.set_active(Some(id.clone()));

    let outline = ChatOutline::new(
        Arc::clone(&host),
        Arc::clone(&host),
        Arc::clone(&host),
        Arc::clone(&host),
        config,
    );
    let outcome = outline.start().await;
    debug!(?outcome, "overlay started");

    let index = outline
        .heading_index(&id)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let callouts = outline
        .index()
        .store()
        .get(&id)
        .map(|records| records.to_vec())
        .unwrap_or_default();
    outline.teardown();

    match format {
        OutputFormat::Json => println!("{}", output::to_json(&index)?),
        OutputFormat::Pretty => print!("{}", output::render_index(&index, &callouts)),
    }
    Ok(())
}
