//! Site configuration management.
//!
//! Handles loading and parsing the `config.toml` configuration file. The
//! parser is a pure data-loading step with a fixed schema; anything wrong
//! here aborts before rendering starts.

use anyhow::Result;
use serde::Deserialize;
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),
}

/// One comparison group: a display name plus the folder (relative to
/// `versus_folder`) scanned recursively for descriptors.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersusGroup {
    pub name: String,
    pub folder: PathBuf,
}

/// The site's `config.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Content files rendered as plain pages, relative to the site root.
    pub files: Vec<PathBuf>,

    /// Site-wide template variables.
    #[serde(default)]
    pub variables: HashMap<String, String>,

    /// Content file rendered once per discovered comparison unit.
    pub versus_file: PathBuf,

    /// Base directory for comparison groups, relative to the site's parent.
    pub versus_folder: PathBuf,

    /// Comparison groups, in configured order.
    #[serde(default)]
    pub versus: Vec<VersusGroup>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_CONFIG: &str = r#"
        files = ["index.tpl.html", "about.tpl.html"]
        versus_file = "versus.tpl.html"
        versus_folder = "comparisons"

        [variables]
        site_name = "Demo"

        [[versus]]
        name = "Strings"
        folder = "strings"

        [[versus]]
        name = "Sorting"
        folder = "sorting"
    "#;

    #[test]
    fn test_parse_full_config() {
        let config = SiteConfig::from_str(FULL_CONFIG).unwrap();
        assert_eq!(config.files.len(), 2);
        assert_eq!(config.variables["site_name"], "Demo");
        assert_eq!(config.versus_file, PathBuf::from("versus.tpl.html"));
        assert_eq!(config.versus_folder, PathBuf::from("comparisons"));
        assert_eq!(config.versus.len(), 2);
    }

    #[test]
    fn test_versus_groups_keep_configured_order() {
        let config = SiteConfig::from_str(FULL_CONFIG).unwrap();
        let names: Vec<_> = config.versus.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["Strings", "Sorting"]);
    }

    #[test]
    fn test_variables_and_versus_default_to_empty() {
        let config = SiteConfig::from_str(
            r#"
            files = []
            versus_file = "versus.tpl.html"
            versus_folder = "comparisons"
            "#,
        )
        .unwrap();
        assert!(config.variables.is_empty());
        assert!(config.versus.is_empty());
    }

    #[test]
    fn test_missing_required_key_fails() {
        // No `files` key.
        let result = SiteConfig::from_str(
            r#"
            versus_file = "versus.tpl.html"
            versus_folder = "comparisons"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_key_fails() {
        let result = SiteConfig::from_str(
            r#"
            files = []
            versus_file = "v"
            versus_folder = "c"
            unknown_key = true
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SiteConfig::from_path(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }
}
