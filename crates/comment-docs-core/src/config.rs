//! Configuration parsing and validation
//!
//! This module handles loading and validating `comment-docs.yaml`.
//!
//! ```yaml
//! name: gifler-site
//! docs:
//!   examples: site/_examples/control.js
//! on_error: fail
//! output: build/metadata.json
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default configuration file name
pub const CONFIG_FILE: &str = "comment-docs.yaml";

/// Project configuration from `comment-docs.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Project name
    #[serde(default)]
    pub name: Option<String>,

    /// Metadata key -> source file path, relative to the project directory
    #[serde(default)]
    pub docs: BTreeMap<String, String>,

    /// Metadata present before any plugin runs
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_yaml::Value>,

    /// What to do when a single file fails
    #[serde(default)]
    pub on_error: OnErrorBehavior,

    /// Where `build` writes the metadata JSON
    #[serde(default)]
    pub output: Option<String>,
}

/// Per-file failure policy
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OnErrorBehavior {
    /// Abort the build on the first failing file
    #[default]
    Fail,
    /// Log the failure and leave the key unset
    LogAndSkip,
}

impl ProjectConfig {
    /// Check values serde cannot
    pub fn validate(&self) -> Result<()> {
        for (key, path) in &self.docs {
            if key.trim().is_empty() {
                return Err(Error::ConfigInvalid {
                    message: "docs keys must not be empty".to_string(),
                });
            }
            if path.trim().is_empty() {
                return Err(Error::ConfigInvalid {
                    message: format!("docs entry '{}' has an empty path", key),
                });
            }
        }
        Ok(())
    }
}

/// Main configuration container
#[derive(Debug, Clone)]
pub struct Config {
    /// Project configuration
    pub project: ProjectConfig,

    /// Directory configured paths are resolved against
    pub base_path: PathBuf,
}

impl Config {
    /// Load configuration from a directory or a config file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the project directory or comment-docs.yaml file
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let config = Config::load("./site")?;
    /// for (key, path) in &config.project.docs {
    ///     println!("{key} <- {path}");
    /// }
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let (config_path, base_path) = if path.is_dir() {
            (path.join(CONFIG_FILE), path.to_path_buf())
        } else {
            (
                path.to_path_buf(),
                path.parent().unwrap_or(Path::new(".")).to_path_buf(),
            )
        };

        if !config_path.exists() {
            return Err(Error::ConfigNotFound {
                path: config_path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(&config_path)?;
        let config = Self::from_yaml(&contents, base_path)?;
        tracing::debug!(
            "loaded {} with {} docs entries",
            config_path.display(),
            config.project.docs.len()
        );
        Ok(config)
    }

    /// Parse configuration text with an explicit base path
    pub fn from_yaml(contents: &str, base_path: impl Into<PathBuf>) -> Result<Self> {
        // An empty file is a valid, empty configuration
        let project: ProjectConfig = if contents.trim().is_empty() {
            ProjectConfig::default()
        } else {
            // Going through Value rejects duplicate keys
            let raw: serde_yaml::Value =
                serde_yaml::from_str(contents).map_err(Error::ConfigParse)?;
            serde_yaml::from_value(raw).map_err(Error::ConfigParse)?
        };
        project.validate()?;

        Ok(Self {
            project,
            base_path: base_path.into(),
        })
    }

    /// Resolve a configured path against the project directory
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }

    /// Resolved output path, if one is configured
    pub fn output_path(&self) -> Option<PathBuf> {
        self.project.output.as_deref().map(|p| self.resolve(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_on_error() {
        assert_eq!(OnErrorBehavior::default(), OnErrorBehavior::Fail);
    }

    #[test]
    fn test_parse_minimal_config() {
        let yaml = r#"
docs:
  examples: site/_examples/control.js
"#;
        let config: ProjectConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.name, None);
        assert_eq!(config.docs["examples"], "site/_examples/control.js");
        assert_eq!(config.on_error, OnErrorBehavior::Fail);
        assert!(config.metadata.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
name: gifler-site
docs:
  controls: site/_examples/control.js
  rainbow: site/_examples/rainbow.js
metadata:
  site_title: Gifler
on_error: log_and_skip
output: build/metadata.json
"#;
        let config: ProjectConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.name.as_deref(), Some("gifler-site"));
        assert_eq!(config.docs.len(), 2);
        assert_eq!(config.on_error, OnErrorBehavior::LogAndSkip);
        assert_eq!(config.output.as_deref(), Some("build/metadata.json"));
        assert_eq!(
            config.metadata.get("site_title"),
            Some(&serde_yaml::Value::String("Gifler".to_string()))
        );
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result: std::result::Result<ProjectConfig, _> = serde_yaml::from_str("doc: {}\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_docs_key_is_rejected() {
        let yaml = "docs:\n  a: one.js\n  a: two.js\n";
        assert!(matches!(
            Config::from_yaml(yaml, "."),
            Err(Error::ConfigParse(_))
        ));
    }

    #[test]
    fn test_empty_path_is_invalid() {
        let yaml = "docs:\n  examples: \"\"\n";
        assert!(matches!(
            Config::from_yaml(yaml, "."),
            Err(Error::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn test_empty_file_is_empty_config() {
        let config = Config::from_yaml("", "/project").unwrap();
        assert!(config.project.docs.is_empty());
        assert_eq!(config.base_path, PathBuf::from("/project"));
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "docs:\n  examples: src/example.js\n",
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.base_path, dir.path());
        assert_eq!(
            config.resolve("src/example.js"),
            dir.path().join("src/example.js")
        );
    }

    #[test]
    fn test_load_from_file_uses_parent_as_base() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.yaml");
        std::fs::write(&path, "output: out/meta.json\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.base_path, dir.path());
        assert_eq!(config.output_path(), Some(dir.path().join("out/meta.json")));
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(Error::ConfigNotFound { .. })
        ));
    }
}
