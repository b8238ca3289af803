//! Build-scoped metadata store
//!
//! Plugins exchange build-wide data through a single [`Metadata`] owned by the
//! pipeline's [`BuildContext`](crate::pipeline::BuildContext).

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;

use crate::error::Result;

/// Key-value metadata shared by every stage of one build
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata {
    entries: BTreeMap<String, Value>,
}

impl Metadata {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value, returning the one it replaced
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    /// Look up a value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Whether a key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the store as JSON
    ///
    /// Fails when a document uses a mapping key JSON cannot represent.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl From<BTreeMap<String, Value>> for Metadata {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_insert_and_replace() {
        let mut metadata = Metadata::new();
        assert!(metadata.insert("docs", Value::Bool(true)).is_none());
        let previous = metadata.insert("docs", Value::Bool(false));
        assert_eq!(previous, Some(Value::Bool(true)));
        assert_eq!(metadata.get("docs"), Some(&Value::Bool(false)));
        assert_eq!(metadata.len(), 1);
    }

    #[test]
    fn test_to_json() {
        let mut metadata = Metadata::new();
        let docs: Value = serde_yaml::from_str("- title: Hello\n- tags: [a, b]").unwrap();
        metadata.insert("examples", docs);

        let json = metadata.to_json().unwrap();
        assert_eq!(json["examples"][0]["title"], "Hello");
        assert_eq!(json["examples"][1]["tags"][1], "b");
    }

    #[test]
    fn test_to_json_rejects_non_string_keys() {
        let mut metadata = Metadata::new();
        metadata.insert("odd", serde_yaml::from_str("? [1, 2]\n: pair").unwrap());
        assert!(matches!(metadata.to_json(), Err(Error::Json(_))));
    }
}
