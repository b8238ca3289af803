//! The comment-docs build plugin
//!
//! For every configured `key: path` entry the plugin reads the file, extracts
//! its YAML comment documents and stores them as a sequence under `key`.

use async_trait::async_trait;
use futures::future::join_all;
use serde_yaml::Value;
use std::collections::BTreeMap;

use crate::config::{OnErrorBehavior, ProjectConfig};
use crate::error::{Error, Result};
use crate::extract::{Document, extract};
use crate::pipeline::{BuildContext, Plugin};

/// Attaches comment documents from source files to build metadata
#[derive(Debug, Clone, Default)]
pub struct CommentDocs {
    docs: BTreeMap<String, String>,
    on_error: OnErrorBehavior,
}

impl CommentDocs {
    /// Plugin for the given `key -> path` entries
    pub fn new(docs: BTreeMap<String, String>) -> Self {
        Self {
            docs,
            on_error: OnErrorBehavior::default(),
        }
    }

    /// Plugin configured from a project file
    pub fn from_config(project: &ProjectConfig) -> Self {
        Self::new(project.docs.clone()).on_error(project.on_error)
    }

    /// Set the per-file failure policy
    pub fn on_error(mut self, on_error: OnErrorBehavior) -> Self {
        self.on_error = on_error;
        self
    }

    /// Configured entries
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.docs
    }

    /// Read and extract every entry concurrently, without touching metadata.
    ///
    /// Results come back in key order. Failures are
    /// [`Error::Extraction`] values naming the key and resolved file.
    pub async fn extract_all<'p>(
        &'p self,
        ctx: &BuildContext,
    ) -> Vec<(&'p String, Result<Vec<Document>>)> {
        join_all(self.docs.iter().map(|(key, path)| async move {
            (key, extract_entry(ctx, key, path).await)
        }))
        .await
    }
}

/// Read and extract one configured file
async fn extract_entry(ctx: &BuildContext, key: &str, path: &str) -> Result<Vec<Document>> {
    let resolved = ctx.path(path);
    let wrap = |source: Error| Error::Extraction {
        key: key.to_string(),
        path: resolved.clone(),
        source: Box::new(source),
    };

    let contents = ctx.reader().read_to_string(&resolved).await.map_err(wrap)?;
    let documents = extract(&contents).map_err(wrap)?;
    tracing::debug!(
        "{}: {} documents from {}",
        key,
        documents.len(),
        resolved.display()
    );
    Ok(documents)
}

#[async_trait]
impl Plugin for CommentDocs {
    fn name(&self) -> &str {
        "comment-docs"
    }

    async fn run(&self, ctx: &mut BuildContext) -> Result<()> {
        let results = self.extract_all(ctx).await;

        let extracted: Vec<(&String, Vec<Document>)> = match self.on_error {
            OnErrorBehavior::Fail => results
                .into_iter()
                .map(|(key, result)| result.map(|documents| (key, documents)))
                .collect::<Result<_>>()?,
            OnErrorBehavior::LogAndSkip => results
                .into_iter()
                .filter_map(|(key, result)| match result {
                    Ok(documents) => Some((key, documents)),
                    Err(err) => {
                        tracing::warn!("Skipping '{}': {}", key, err);
                        None
                    }
                })
                .collect(),
        };

        for (key, documents) in extracted {
            if ctx
                .metadata
                .insert(key.clone(), Value::Sequence(documents))
                .is_some()
            {
                tracing::warn!("Replaced existing metadata key '{}'", key);
            }
        }
        Ok(())
    }
}
