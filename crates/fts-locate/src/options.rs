//! Search options.

use fts_engine::Fuzziness;

use crate::error::LocateError;

/// Default minimum share of a phrase's words (in percent) that must be found.
pub const DEFAULT_MIN_SCORE: u8 = 60;
/// Default average number of extra words allowed between consecutive searched words.
pub const DEFAULT_MAX_DISTANCE_BETWEEN_WORDS: f64 = 1.2;
/// Default number of leading characters a fuzzy variant must share with the word.
pub const DEFAULT_FUZZY_PREFIX_LENGTH: usize = 0;
/// Default maximum number of fuzzy variants per word.
pub const DEFAULT_FUZZY_MAX_EXPANSIONS: usize = 100;
/// Words of at most this many characters are matched literally.
pub const DEFAULT_FUZZY_MIN_SYMBOLS: usize = 3;
/// Default delimiter between extracted segments.
pub const DEFAULT_JOIN_DELIMITER: &str = ";";

/// Options controlling how phrases are searched and segments joined.
///
/// The value is resolved once, validated by [`SearchOptions::validate`] (the locator does
/// this on construction), and never changed per call.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    /// Minimum percentage (1..=100) of a phrase's words that must be found. Default: 60.
    pub min_score: u8,
    /// Slop per gap between consecutive searched words. Default: 1.2.
    pub max_distance_between_words: f64,
    /// Edit distance for fuzzy words. Default: AUTO.
    pub fuzziness: Fuzziness,
    /// Leading characters fuzzy variants must share. Default: 0.
    pub fuzzy_prefix_length: usize,
    /// Maximum fuzzy variants per word. Default: 100.
    pub fuzzy_max_expansions: usize,
    /// Words longer than this are matched fuzzily. Default: 3.
    pub fuzzy_min_symbols: usize,
    /// Stop a phrase's search at the first attempt that finds anything. Default: false.
    pub stop_at_first_best_match: bool,
    /// Delimiter placed between extracted segments. Default: `;`.
    pub join_delimiter: String,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
            max_distance_between_words: DEFAULT_MAX_DISTANCE_BETWEEN_WORDS,
            fuzziness: Fuzziness::Auto,
            fuzzy_prefix_length: DEFAULT_FUZZY_PREFIX_LENGTH,
            fuzzy_max_expansions: DEFAULT_FUZZY_MAX_EXPANSIONS,
            fuzzy_min_symbols: DEFAULT_FUZZY_MIN_SYMBOLS,
            stop_at_first_best_match: false,
            join_delimiter: DEFAULT_JOIN_DELIMITER.to_string(),
        }
    }
}

impl SearchOptions {
    /// Checks every option is in range.
    pub fn validate(&self) -> Result<(), LocateError> {
        if !(1..=100).contains(&self.min_score) {
            return Err(LocateError::Config(format!(
                "min score must be from 1 to 100, got {}",
                self.min_score
            )));
        }
        if !self.max_distance_between_words.is_finite() || self.max_distance_between_words < 0.0 {
            return Err(LocateError::Config(format!(
                "max distance between words must be a non-negative number, got {}",
                self.max_distance_between_words
            )));
        }
        if let Fuzziness::Edits(n) = self.fuzziness
            && n > 2
        {
            return Err(LocateError::Config(format!(
                "fuzziness must be AUTO, 0, 1 or 2, got {n}"
            )));
        }
        if self.fuzzy_max_expansions == 0 {
            return Err(LocateError::Config(
                "fuzzy max expansions must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Sets the minimum score.
    pub fn with_min_score(mut self, min_score: u8) -> Self {
        self.min_score = min_score;
        self
    }

    /// Sets the slop per gap between searched words.
    pub fn with_max_distance_between_words(mut self, distance: f64) -> Self {
        self.max_distance_between_words = distance;
        self
    }

    /// Sets the fuzziness of fuzzy words.
    pub fn with_fuzziness(mut self, fuzziness: Fuzziness) -> Self {
        self.fuzziness = fuzziness;
        self
    }

    /// Sets whether a phrase's search stops at the first successful attempt.
    pub fn with_stop_at_first_best_match(mut self, stop: bool) -> Self {
        self.stop_at_first_best_match = stop;
        self
    }

    /// Sets the delimiter between extracted segments.
    pub fn with_join_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.join_delimiter = delimiter.into();
        self
    }
}
