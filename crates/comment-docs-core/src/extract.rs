//! YAML front-matter extraction from block comments
//!
//! A block comment whose trimmed body starts with the YAML document marker
//! `---` is parsed as a YAML document:
//!
//! ```js
//! /* ---
//! title: Play / pause
//! tags: [canvas, controls]
//! */
//! gifler('run.gif').animate('canvas');
//! ```
//!
//! Line comments never qualify, and neither do block comments that merely
//! contain `---` somewhere after their first characters.

use std::borrow::Cow;

use serde::Deserialize;
use serde_yaml::Value;

use crate::error::{Error, Result};
use crate::syntax::{Position, SourceTree};

/// A parsed comment document
pub type Document = Value;

/// YAML document start marker
pub const DOCUMENT_START: &str = "---";

/// Extract every YAML document embedded in block comments, in source order.
///
/// Source syntax errors and invalid YAML in any qualifying comment fail the
/// whole call; documents collected before the failure are discarded.
///
/// # Example
///
/// ```rust,ignore
/// let docs = extract("/* --- title: Hello */\nvar x = 1;")?;
/// assert_eq!(docs[0]["title"], "Hello");
/// ```
pub fn extract(source: &str) -> Result<Vec<Document>> {
    let tree = SourceTree::parse(source)?;

    let mut documents = Vec::new();
    for comment in tree.comments() {
        if !comment.is_block() {
            continue;
        }
        let content = comment.body().trim();
        if !is_yaml_document(content) {
            continue;
        }
        tracing::debug!(
            line = comment.position.line,
            column = comment.position.column,
            "parsing YAML comment"
        );
        documents.push(parse_document(content, comment.position)?);
    }

    tracing::debug!("extracted {} comment documents", documents.len());
    Ok(documents)
}

/// Whether trimmed comment text opens a YAML document
pub fn is_yaml_document(content: &str) -> bool {
    content.starts_with(DOCUMENT_START)
}

/// Parse the first YAML document of a comment body.
///
/// Only core-schema values are produced. Any explicit tag outside the core
/// schema is rejected rather than constructed.
fn parse_document(content: &str, at: Position) -> Result<Document> {
    let content = inline_to_block(content);
    let yaml_error = |source: serde_yaml::Error| Error::YamlParse {
        line: at.line,
        column: at.column,
        source,
    };

    let mut document = match serde_yaml::Deserializer::from_str(&content).next() {
        Some(deserializer) => Value::deserialize(deserializer).map_err(yaml_error)?,
        None => Value::Null,
    };

    // `<<: *anchor` keys are folded into their mapping
    document.apply_merge().map_err(yaml_error)?;
    reject_tags(&document, at)?;
    Ok(document)
}

/// Move content written on the marker line (`--- title: Hello`) onto its
/// own line, where a block mapping is allowed to start.
fn inline_to_block(content: &str) -> Cow<'_, str> {
    let rest = &content[DOCUMENT_START.len()..];
    if !rest.starts_with([' ', '\t']) {
        return Cow::Borrowed(content);
    }
    let inline = rest.trim_start_matches([' ', '\t']);
    // Block scalar headers already belong on the marker line
    if inline.is_empty() || inline.starts_with(['\n', '\r', '|', '>']) {
        return Cow::Borrowed(content);
    }
    Cow::Owned(format!("{DOCUMENT_START}\n{inline}"))
}

fn reject_tags(value: &Value, at: Position) -> Result<()> {
    match value {
        Value::Tagged(tagged) => Err(Error::UnsupportedTag {
            tag: tagged.tag.to_string(),
            line: at.line,
            column: at.column,
        }),
        Value::Sequence(items) => items.iter().try_for_each(|item| reject_tags(item, at)),
        Value::Mapping(mapping) => mapping.iter().try_for_each(|(key, value)| {
            reject_tags(key, at)?;
            reject_tags(value, at)
        }),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Ok(()),
    }
}
