//! Error types for comment-docs-core

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for comment-docs-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in comment-docs-core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file could not be found
    #[error("configuration file not found: {path}")]
    ConfigNotFound {
        /// Path that was searched
        path: String,
    },

    /// Failed to parse YAML configuration
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[source] serde_yaml::Error),

    /// Invalid configuration value
    #[error("invalid configuration: {message}")]
    ConfigInvalid {
        /// Description of what's invalid
        message: String,
    },

    /// The source grammar could not be loaded into the parser
    #[error("failed to load source grammar: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),

    /// Source text is not valid in the expected grammar
    #[error("source syntax error at line {line}, column {column}")]
    SourceParse {
        /// 1-based line of the first offending node
        line: usize,
        /// 1-based column of the first offending node
        column: usize,
    },

    /// A block comment starting with `---` is not valid YAML
    #[error("invalid YAML in comment at line {line}, column {column}: {source}")]
    YamlParse {
        /// 1-based line where the comment starts
        line: usize,
        /// 1-based column where the comment starts
        column: usize,
        /// Underlying YAML error
        #[source]
        source: serde_yaml::Error,
    },

    /// A comment document uses a YAML tag outside the core schema
    #[error("unsupported YAML tag '{tag}' in comment at line {line}, column {column}")]
    UnsupportedTag {
        /// The rejected tag
        tag: String,
        /// 1-based line where the comment starts
        line: usize,
        /// 1-based column where the comment starts
        column: usize,
    },

    /// A configured source file could not be read
    #[error("failed to read {}: {source}", path.display())]
    FileRead {
        /// Resolved file path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Extraction failed for a configured metadata key
    #[error("failed to extract '{key}' from {}: {source}", path.display())]
    Extraction {
        /// Metadata key the file was configured under
        key: String,
        /// Resolved file path
        path: PathBuf,
        /// The underlying failure
        #[source]
        source: Box<Error>,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
