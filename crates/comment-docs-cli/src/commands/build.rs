//! Build metadata from the configured source files

use anyhow::{Context, Result};
use comment_docs_core::{Config, Pipeline};
use std::path::PathBuf;

/// Run the build command
pub async fn run(config_path: &str, output: Option<&str>) -> Result<()> {
    tracing::info!("Loading configuration from {}", config_path);

    let config = Config::load(config_path).context("Failed to load configuration")?;
    tracing::info!("Extracting {} docs entries", config.project.docs.len());

    let metadata = Pipeline::from_config(&config)
        .build()
        .await
        .context("Build failed")?;

    let json = serde_json::to_string_pretty(&metadata.to_json()?)?;

    let target = output.map(PathBuf::from).or_else(|| config.output_path());
    match target {
        Some(path) => {
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&path, format!("{}\n", json))
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("✓ Wrote {} metadata keys to {}", metadata.len(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
