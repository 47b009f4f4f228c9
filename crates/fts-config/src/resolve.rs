//! Turns merged settings into the options the engine and locator consume.

use std::time::Duration;

use fts_engine::{ElasticsearchOptions, Fuzziness};
use fts_locate::SearchOptions;

use crate::{ConfigError, EngineSettings, ExtractSettings, SearchSettings};

/// Builds validated search options.
pub fn search_options(
    search: &SearchSettings,
    extract: &ExtractSettings,
) -> Result<SearchOptions, ConfigError> {
    let fuzziness = search
        .fuzziness
        .parse::<Fuzziness>()
        .map_err(|message| ConfigError::InvalidValue {
            key: "search.fuzziness",
            message,
        })?;

    let options = SearchOptions {
        min_score: search.min_score,
        max_distance_between_words: search.max_distance_between_words,
        fuzziness,
        fuzzy_prefix_length: search.fuzzy_prefix_length,
        fuzzy_max_expansions: search.fuzzy_max_expansions,
        fuzzy_min_symbols: search.fuzzy_min_symbols,
        stop_at_first_best_match: search.stop_at_first_best_match,
        join_delimiter: extract.join_delimiter.clone(),
    };
    options
        .validate()
        .map_err(|e| ConfigError::InvalidValue {
            key: "search",
            message: e.to_string(),
        })?;
    Ok(options)
}

/// Builds Elasticsearch connection options.
pub fn elasticsearch_options(engine: &EngineSettings) -> Result<ElasticsearchOptions, ConfigError> {
    let url = engine.url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::InvalidValue {
            key: "engine.url",
            message: format!("expected an http(s) URL, got '{}'", engine.url),
        });
    }
    if engine.timeout_secs == 0 {
        return Err(ConfigError::InvalidValue {
            key: "engine.timeout_secs",
            message: "must be at least 1".to_string(),
        });
    }

    Ok(ElasticsearchOptions {
        url: url.to_string(),
        timeout: Duration::from_secs(engine.timeout_secs),
        username: engine.username.clone(),
        password: engine.password.clone(),
    })
}

/// Checks the collection name is usable.
pub fn collection(engine: &EngineSettings) -> Result<&str, ConfigError> {
    let name = engine.collection.trim();
    if name.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: "engine.collection",
            message: "must not be empty".to_string(),
        });
    }
    Ok(name)
}
