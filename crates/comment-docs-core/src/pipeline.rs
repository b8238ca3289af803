//! Build pipeline orchestration
//!
//! A [`Pipeline`] owns one [`BuildContext`] and runs its plugins in
//! registration order. The value returned by [`Pipeline::build`] is the
//! completion signal: the final metadata, or the first plugin failure.
//!
//! # Example
//!
//! ```rust,ignore
//! use comment_docs_core::{CommentDocs, Pipeline};
//!
//! let metadata = Pipeline::new("./site")
//!     .use_plugin(CommentDocs::new(docs))
//!     .build()
//!     .await?;
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::metadata::Metadata;
use crate::plugin::CommentDocs;

/// Supplies file contents to plugins
#[async_trait]
pub trait SourceReader: Send + Sync {
    /// Read the full contents of a resolved path as UTF-8
    async fn read_to_string(&self, path: &Path) -> Result<String>;
}

/// Reads sources from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsReader;

#[async_trait]
impl SourceReader for FsReader {
    async fn read_to_string(&self, path: &Path) -> Result<String> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| Error::FileRead {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Serves sources from memory, keyed by resolved path
#[derive(Debug, Clone, Default)]
pub struct MemoryReader {
    files: HashMap<PathBuf, String>,
}

impl MemoryReader {
    /// Create an empty reader
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }
}

#[async_trait]
impl SourceReader for MemoryReader {
    async fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::FileRead {
                path: path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
    }
}

/// State shared by every plugin in one build
pub struct BuildContext {
    base_path: PathBuf,
    reader: Arc<dyn SourceReader>,
    /// Build-wide metadata
    pub metadata: Metadata,
}

impl BuildContext {
    /// Create a context rooted at `base_path`, reading from disk
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            reader: Arc::new(FsReader),
            metadata: Metadata::new(),
        }
    }

    /// Read sources through `reader` instead of the filesystem
    pub fn with_reader(mut self, reader: impl SourceReader + 'static) -> Self {
        self.reader = Arc::new(reader);
        self
    }

    /// Project directory
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Resolve a path relative to the project directory
    ///
    /// Absolute paths are returned unchanged.
    pub fn path(&self, path: impl AsRef<Path>) -> PathBuf {
        self.base_path.join(path)
    }

    /// The file reader plugins should use
    pub fn reader(&self) -> &dyn SourceReader {
        self.reader.as_ref()
    }
}

/// A build stage
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Run against the shared context
    async fn run(&self, ctx: &mut BuildContext) -> Result<()>;
}

/// Runs plugins in order over one [`BuildContext`]
pub struct Pipeline {
    context: BuildContext,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    /// Create an empty pipeline rooted at `base_path`
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            context: BuildContext::new(base_path),
            plugins: Vec::new(),
        }
    }

    /// Pipeline for a loaded project: its initial metadata plus the
    /// comment-docs plugin for the configured entries
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.base_path.clone())
            .metadata(Metadata::from(config.project.metadata.clone()))
            .use_plugin(CommentDocs::from_config(&config.project))
    }

    /// Replace the initial metadata
    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.context.metadata = metadata;
        self
    }

    /// Replace the file reader
    pub fn reader(mut self, reader: impl SourceReader + 'static) -> Self {
        self.context = self.context.with_reader(reader);
        self
    }

    /// Append a plugin
    pub fn use_plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Run every plugin and hand back the final metadata
    pub async fn build(mut self) -> Result<Metadata> {
        for plugin in &self.plugins {
            tracing::debug!(plugin = plugin.name(), "running plugin");
            plugin.run(&mut self.context).await?;
        }
        tracing::debug!("build finished with {} metadata keys", self.context.metadata.len());
        Ok(self.context.metadata)
    }
}
