//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single `Config`. The first defined value of each
//! setting wins, so files must be given highest precedence first.

use std::path::{Path, PathBuf};

use crate::{
    Config, EngineSettings, ExtractSettings, SearchSettings,
    parse::{RawConfig, RawEngineSettings, RawExtractSettings, RawSearchSettings},
};

/// A parsed config file with its source path.
#[derive(Debug, Clone)]
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges configuration files given highest precedence first.
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    let mut config = Config::default();

    // Lowest precedence first, so later (higher) files overwrite.
    for parsed in configs.iter().rev() {
        let raw = &parsed.config;
        if let Some(engine) = &raw.engine {
            apply_raw_engine(&mut config.engine, engine);
        }
        if let Some(search) = &raw.search {
            apply_raw_search(&mut config.search, search);
        }
        if let Some(extract) = &raw.extract {
            apply_raw_extract(&mut config.extract, extract);
        }
    }

    config.config_root = configs
        .first()
        .and_then(|c| c.path.parent())
        .map(Path::to_path_buf);
    config
}

/// Applies raw engine settings to result, overwriting any present values.
fn apply_raw_engine(result: &mut EngineSettings, raw: &RawEngineSettings) {
    if let Some(v) = raw.kind {
        result.kind = v;
    }
    if let Some(v) = &raw.url {
        result.url.clone_from(v);
    }
    if let Some(v) = &raw.collection {
        result.collection.clone_from(v);
    }
    if let Some(v) = raw.timeout_secs {
        result.timeout_secs = v;
    }
    if let Some(v) = &raw.username {
        result.username = Some(v.clone());
    }
    if let Some(v) = &raw.password {
        result.password = Some(v.clone());
    }
}

/// Applies raw search settings to result.
fn apply_raw_search(result: &mut SearchSettings, raw: &RawSearchSettings) {
    if let Some(v) = raw.min_score {
        result.min_score = v;
    }
    if let Some(v) = raw.max_distance_between_words {
        result.max_distance_between_words = v;
    }
    if let Some(v) = &raw.fuzziness {
        result.fuzziness = v.clone().into_text();
    }
    if let Some(v) = raw.fuzzy_prefix_length {
        result.fuzzy_prefix_length = v;
    }
    if let Some(v) = raw.fuzzy_max_expansions {
        result.fuzzy_max_expansions = v;
    }
    if let Some(v) = raw.fuzzy_min_symbols {
        result.fuzzy_min_symbols = v;
    }
    if let Some(v) = raw.stop_at_first_best_match {
        result.stop_at_first_best_match = v;
    }
}

/// Applies raw extraction settings to result.
fn apply_raw_extract(result: &mut ExtractSettings, raw: &RawExtractSettings) {
    if let Some(v) = &raw.join_delimiter {
        result.join_delimiter.clone_from(v);
    }
}
