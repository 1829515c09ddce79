//! Batch annotation configuration.
//!
//! Stored as TOML. Every field has a default matching the column names the
//! corpus files use, so an empty file is a valid config:
//!
//! ```toml
//! content_column = "Content"
//! count_column = "InstancesCountPerLine"
//! feature_column = "FeatureCountPerLine"
//! parallel = true
//! # column_order = ["File", "Line", "InstancesCountPerLine", "FeatureCountPerLine", "Content"]
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Column holding the utterance text.
pub const DEFAULT_CONTENT_COLUMN: &str = "Content";
/// Column holding the literal "be" count.
pub const DEFAULT_COUNT_COLUMN: &str = "InstancesCountPerLine";
/// Column the annotation is written to.
pub const DEFAULT_FEATURE_COLUMN: &str = "FeatureCountPerLine";

/// Settings for reading, annotating and writing a corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnnotateConfig {
    /// Input column with the utterance text.
    pub content_column: String,
    /// Input column with the literal "be" count.
    pub count_column: String,
    /// Output column for the feature count.
    pub feature_column: String,
    /// Explicit output column order. Columns not listed are dropped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_order: Option<Vec<String>>,
    /// Annotate rows on the rayon thread pool.
    pub parallel: bool,
}

impl Default for AnnotateConfig {
    fn default() -> Self {
        Self {
            content_column: DEFAULT_CONTENT_COLUMN.to_string(),
            count_column: DEFAULT_COUNT_COLUMN.to_string(),
            feature_column: DEFAULT_FEATURE_COLUMN.to_string(),
            column_order: None,
            parallel: true,
        }
    }
}

impl AnnotateConfig {
    /// Parse and validate a TOML config.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// Load `explicit` if given, else the user config file if it exists,
    /// else the defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match default_path() {
            Some(path) if path.exists() => {
                log::info!("Using config {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Write to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Check column names are non-empty and distinct.
    pub fn validate(&self) -> Result<()> {
        let columns = [
            ("content_column", &self.content_column),
            ("count_column", &self.count_column),
            ("feature_column", &self.feature_column),
        ];
        for (field, value) in columns {
            if value.trim().is_empty() {
                return Err(Error::config(format!("{field} must not be empty")));
            }
        }
        let distinct: HashSet<&str> = columns.iter().map(|(_, v)| v.as_str()).collect();
        if distinct.len() != columns.len() {
            return Err(Error::config(
                "content, count and feature columns must be distinct",
            ));
        }
        if let Some(order) = &self.column_order {
            let mut seen = HashSet::new();
            for name in order {
                if !seen.insert(name.as_str()) {
                    return Err(Error::config(format!("column {name:?} listed twice")));
                }
            }
        }
        Ok(())
    }
}

/// Per-user config file: `<config dir>/habitual-be/config.toml`.
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("habitual-be").join("config.toml"))
}
