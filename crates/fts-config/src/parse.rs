//! Configuration file parsing.
//!
//! Parses individual `.fts.toml` files into `RawConfig` structures whose fields are all
//! optional, ready for merging.

use std::{fs, path::Path};

use serde::Deserialize;
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::{ConfigError, EngineKind};

/// Raw configuration as parsed directly from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// When true, stop discovery here and ignore parent and global configs.
    pub root: Option<bool>,
    /// Engine connection section.
    pub engine: Option<RawEngineSettings>,
    /// Phrase search section.
    pub search: Option<RawSearchSettings>,
    /// Extraction section.
    pub extract: Option<RawExtractSettings>,
}

/// Raw engine settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawEngineSettings {
    /// Which engine to use.
    pub kind: Option<EngineKind>,
    /// Base URL of the Elasticsearch cluster.
    pub url: Option<String>,
    /// Collection scratch documents are indexed into.
    pub collection: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Basic-auth user name.
    pub username: Option<String>,
    /// Basic-auth password.
    pub password: Option<String>,
}

/// A fuzziness value as written in TOML: `"auto"`, or a number of edits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawFuzziness {
    /// A keyword such as `"auto"`, or a number written as a string.
    Text(String),
    /// A number of edits.
    Edits(u8),
}

impl RawFuzziness {
    /// Returns the value in the form stored by the resolved settings.
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Edits(n) => n.to_string(),
        }
    }
}

/// Raw phrase search settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawSearchSettings {
    /// Minimum percentage of a phrase's words that must be found.
    pub min_score: Option<u8>,
    /// Slop per gap between consecutive searched words.
    pub max_distance_between_words: Option<f64>,
    /// Edit distance for fuzzy words.
    pub fuzziness: Option<RawFuzziness>,
    /// Leading characters fuzzy variants must share.
    pub fuzzy_prefix_length: Option<usize>,
    /// Maximum fuzzy variants per word.
    pub fuzzy_max_expansions: Option<usize>,
    /// Words longer than this are matched fuzzily.
    pub fuzzy_min_symbols: Option<usize>,
    /// Stop at the first attempt that finds anything.
    pub stop_at_first_best_match: Option<bool>,
}

/// Raw extraction settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawExtractSettings {
    /// Delimiter placed between extracted segments.
    pub join_delimiter: Option<String>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string. `path` is only used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
