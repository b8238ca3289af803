//! Extract comment documents from a single file

use anyhow::{Context, Result};
use comment_docs_core::extract;

/// Run the extract command
pub async fn run(file: &str, compact: bool) -> Result<()> {
    tracing::debug!("Reading {}", file);

    let contents = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file))?;
    let documents =
        extract(&contents).with_context(|| format!("Failed to extract documents from {}", file))?;

    tracing::info!("Found {} documents in {}", documents.len(), file);

    let json = if compact {
        serde_json::to_string(&documents)?
    } else {
        serde_json::to_string_pretty(&documents)?
    };
    println!("{}", json);
    Ok(())
}
