//! Configuration system for fts.
//!
//! fts uses TOML configuration files named `.fts.toml`. Configuration is resolved by walking
//! up the directory tree from the current working directory, collecting any `.fts.toml` files
//! found, then loading `~/.fts.toml` as the global config with lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
use fts_engine::ElasticsearchOptions;
use fts_locate::{DEFAULT_COLLECTION, DEFAULT_JOIN_DELIMITER, SearchOptions};
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawEngineSettings, RawExtractSettings, RawFuzziness, RawSearchSettings,
    parse_config_file, parse_config_str,
};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};

/// Placeholder printed instead of a configured password.
const REDACTED: &str = "<redacted>";

/// Top-level merged configuration.
///
/// This is the result of merging every discovered `.fts.toml` according to precedence
/// rules. Values are checked when they are turned into engine or search options.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Engine connection settings.
    pub engine: EngineSettings,
    /// Phrase search settings.
    pub search: SearchSettings,
    /// Extraction settings.
    pub extract: ExtractSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.fts.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from config file paths given highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed = files
            .iter()
            .map(|path| {
                Ok(ParsedConfig {
                    path: path.clone(),
                    config: parse_config_file(path)?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Resolves the search and extract sections into validated locator options.
    pub fn search_options(&self) -> Result<SearchOptions, ConfigError> {
        resolve::search_options(&self.search, &self.extract)
    }

    /// Resolves the engine section into Elasticsearch connection options.
    pub fn elasticsearch_options(&self) -> Result<ElasticsearchOptions, ConfigError> {
        resolve::elasticsearch_options(&self.engine)
    }

    /// Returns the collection scratch documents go into. Fails if it is blank.
    pub fn collection(&self) -> Result<&str, ConfigError> {
        resolve::collection(&self.engine)
    }

    /// Serializes the effective settings to TOML, with any password redacted.
    pub fn settings_to_toml(&self) -> Result<String, toml::ser::Error> {
        let mut engine = self.engine.clone();
        if engine.password.is_some() {
            engine.password = Some(REDACTED.to_string());
        }
        let serializable = SerializableSettings {
            engine,
            search: self.search.clone(),
            extract: self.extract.clone(),
        };
        toml::to_string_pretty(&serializable)
    }
}

/// Which search engine backs the locator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// A remote Elasticsearch cluster.
    #[default]
    Elasticsearch,
    /// The in-process engine.
    Memory,
}

/// Engine connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Which engine to use.
    pub kind: EngineKind,
    /// Base URL of the Elasticsearch cluster.
    pub url: String,
    /// Collection scratch documents are indexed into.
    pub collection: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Basic-auth user name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Basic-auth password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            kind: EngineKind::default(),
            url: String::from("http://localhost:9200"),
            collection: String::from(DEFAULT_COLLECTION),
            timeout_secs: 60,
            username: None,
            password: None,
        }
    }
}

/// Phrase search settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Minimum percentage of a phrase's words that must be found.
    pub min_score: u8,
    /// Slop per gap between consecutive searched words.
    pub max_distance_between_words: f64,
    /// Edit distance for fuzzy words: `auto`, 0, 1 or 2.
    pub fuzziness: String,
    /// Leading characters fuzzy variants must share.
    pub fuzzy_prefix_length: usize,
    /// Maximum fuzzy variants per word.
    pub fuzzy_max_expansions: usize,
    /// Words longer than this are matched fuzzily.
    pub fuzzy_min_symbols: usize,
    /// Stop at the first attempt that finds anything.
    pub stop_at_first_best_match: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        let options = SearchOptions::default();
        Self {
            min_score: options.min_score,
            max_distance_between_words: options.max_distance_between_words,
            fuzziness: String::from("auto"),
            fuzzy_prefix_length: options.fuzzy_prefix_length,
            fuzzy_max_expansions: options.fuzzy_max_expansions,
            fuzzy_min_symbols: options.fuzzy_min_symbols,
            stop_at_first_best_match: options.stop_at_first_best_match,
        }
    }
}

/// Extraction settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractSettings {
    /// Delimiter placed between extracted segments.
    pub join_delimiter: String,
}

impl Default for ExtractSettings {
    fn default() -> Self {
        Self {
            join_delimiter: String::from(DEFAULT_JOIN_DELIMITER),
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings {
    /// Engine settings, password redacted.
    engine: EngineSettings,
    /// Search settings.
    search: SearchSettings,
    /// Extraction settings.
    extract: ExtractSettings,
}
