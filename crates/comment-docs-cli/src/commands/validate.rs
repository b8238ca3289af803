//! Validate configuration command

use anyhow::{Context, Result};
use comment_docs_core::{BuildContext, CommentDocs, Config};

/// Run the validate command
pub async fn run(config_path: &str) -> Result<()> {
    tracing::info!("Validating configuration: {}", config_path);

    let config = Config::load(config_path).context("Failed to load configuration")?;

    if let Some(name) = &config.project.name {
        tracing::info!("✓ Project: {}", name);
    }
    tracing::info!("✓ On error: {:?}", config.project.on_error);

    // Same reads and extraction as `build`, without writing metadata
    let plugin = CommentDocs::from_config(&config.project);
    let ctx = BuildContext::new(config.base_path.clone());

    let mut failures = 0;
    for (key, result) in plugin.extract_all(&ctx).await {
        match result {
            Ok(documents) => {
                tracing::info!(
                    "✓ {}: {} documents in {}",
                    key,
                    documents.len(),
                    plugin.entries()[key]
                );
            }
            Err(err) => {
                tracing::error!("✗ {}", err);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!(
            "{} of {} docs entries failed",
            failures,
            plugin.entries().len()
        );
    }

    tracing::info!("✓ Configuration is valid");
    Ok(())
}
