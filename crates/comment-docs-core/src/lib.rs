//! comment-docs Core Library
//!
//! This crate provides the core functionality for comment-docs:
//! - Parsing JavaScript-family source into a syntax tree
//! - Extracting YAML documents from `/* --- ... */` block comments
//! - A build pipeline that stores extracted documents as shared metadata
//! - Configuration parsing and validation
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Config    │────▶│  Extractor  │────▶│  Metadata   │
//! │   (YAML)    │     │ (per file)  │     │   Store     │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use comment_docs_core::{Config, Pipeline};
//!
//! let config = Config::load("./site")?;
//! let metadata = Pipeline::from_config(&config).build().await?;
//! println!("{}", serde_json::to_string_pretty(&metadata)?);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod extract;
pub mod metadata;
pub mod pipeline;
pub mod plugin;
pub mod syntax;

pub use config::{Config, OnErrorBehavior, ProjectConfig};
pub use error::{Error, Result};
pub use extract::{Document, extract};
pub use metadata::Metadata;
pub use pipeline::{BuildContext, FsReader, MemoryReader, Pipeline, Plugin, SourceReader};
pub use plugin::CommentDocs;
