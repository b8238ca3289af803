//! Initialize a new comment-docs project

use anyhow::Result;
use comment_docs_core::config::CONFIG_FILE;
use std::fs;
use std::path::Path;

/// Run the init command
pub async fn run(path: &str, name: Option<&str>) -> Result<()> {
    let project_dir = Path::new(path);

    // Create directory if it doesn't exist
    if !project_dir.exists() {
        fs::create_dir_all(project_dir)?;
    }

    // Get absolute path for deriving name
    let abs_path = project_dir.canonicalize()?;

    // Derive project name from directory name if not provided
    let project_name = match name {
        Some(n) => n.to_string(),
        None => abs_path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("Could not determine project name from path"))?,
    };

    // Check if already initialized
    if project_dir.join(CONFIG_FILE).exists() {
        anyhow::bail!(
            "Directory '{}' already contains a {}",
            project_dir.display(),
            CONFIG_FILE
        );
    }

    tracing::info!("Creating new comment-docs project: {}", project_name);

    fs::create_dir_all(project_dir.join("src"))?;

    let config = format!(
        r#"# comment-docs configuration
name: {project_name}

# Metadata key -> source file, relative to this file
docs:
  examples: src/example.js

# Metadata available before extraction runs
metadata:
  site_title: {project_name}

# fail | log_and_skip
on_error: fail

output: build/metadata.json
"#
    );
    fs::write(project_dir.join(CONFIG_FILE), config)?;

    // Example source with a documented block comment
    let example = r#"/* ---
title: Play / pause
description: Click the canvas to start or stop the animation.
tags:
  - canvas
  - controls
*/
gifler('assets/gif/run.gif')
  .animate('canvas.play-pause')
  .then(function (animator) {
    // Line comments are never extracted
    $('canvas.play-pause').click(function () {
      if (animator.running()) {
        animator.stop();
      } else {
        animator.start();
      }
    });
  });
"#;
    fs::write(project_dir.join("src/example.js"), example)?;

    let gitignore = r#"# Build output
build/
"#;
    fs::write(project_dir.join(".gitignore"), gitignore)?;

    tracing::info!(
        "✓ Created project '{}' at {}",
        project_name,
        abs_path.display()
    );
    tracing::info!("");
    tracing::info!("Next steps:");
    if path != "." {
        tracing::info!("  cd {}", project_dir.display());
    }
    tracing::info!("  comment-docs validate    # Check configuration and sources");
    tracing::info!("  comment-docs build       # Write build/metadata.json");

    Ok(())
}
