//! Clap argument definitions for the `fts` CLI.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use fts_config::{Config, EngineKind};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "fts")]
#[command(about = "Fuzzy phrase location and extraction")]
pub struct Cli {
    /// Verbosity (-v for debug logs, -vv for trace logs)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Where the text to search comes from.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Read the text from this file instead of stdin
    #[arg(short = 'f', long)]
    pub file: Option<PathBuf>,
}

/// Flags overriding configured search and engine settings.
#[derive(Args, Debug, Clone, Default)]
pub struct SearchParamsArgs {
    /// Minimum percentage of a phrase's words that must be found, 1-100 [default: 60]
    #[arg(long)]
    pub min_score: Option<u8>,

    /// Extra words allowed, on average, between consecutive phrase words [default: 1.2]
    #[arg(long)]
    pub max_distance: Option<f64>,

    /// Fuzzy edit distance: auto, 0, 1 or 2 [default: auto]
    #[arg(long)]
    pub fuzziness: Option<String>,

    /// Stop searching a phrase at the first attempt that finds it
    #[arg(long)]
    pub stop_at_first: bool,

    /// Use the in-process engine instead of Elasticsearch
    #[arg(long)]
    pub memory: bool,

    /// Comma-separated synonym group for the in-process engine (repeatable)
    #[arg(long = "synonyms", value_name = "WORDS")]
    pub synonyms: Vec<String>,

    /// Collection scratch documents are indexed into [default: text-search]
    #[arg(long)]
    pub collection: Option<String>,
}

impl SearchParamsArgs {
    /// Overrides configured values with the flags that were given.
    pub fn apply(&self, config: &mut Config) {
        if let Some(v) = self.min_score {
            config.search.min_score = v;
        }
        if let Some(v) = self.max_distance {
            config.search.max_distance_between_words = v;
        }
        if let Some(v) = &self.fuzziness {
            config.search.fuzziness.clone_from(v);
        }
        if self.stop_at_first {
            config.search.stop_at_first_best_match = true;
        }
        if self.memory {
            config.engine.kind = EngineKind::Memory;
        }
        if let Some(v) = &self.collection {
            config.engine.collection.clone_from(v);
        }
    }

    /// Returns the synonym groups, one word list per `--synonyms` flag.
    pub fn synonym_groups(&self) -> Vec<Vec<&str>> {
        self.synonyms
            .iter()
            .map(|group| {
                group
                    .split(',')
                    .map(str::trim)
                    .filter(|w| !w.is_empty())
                    .collect()
            })
            .collect()
    }
}

/// Shared output mode flags.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `fts find`.
#[derive(Args, Debug, Clone)]
pub struct FindCommand {
    /// Phrases to find
    #[arg(required = true)]
    pub phrases: Vec<String>,

    #[command(flatten)]
    /// Text source.
    pub input: InputArgs,

    #[command(flatten)]
    /// Search parameter overrides.
    pub params: SearchParamsArgs,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `fts exists`.
#[derive(Args, Debug, Clone)]
pub struct ExistsCommand {
    /// Phrases to look for
    #[arg(required = true)]
    pub phrases: Vec<String>,

    #[command(flatten)]
    /// Text source.
    pub input: InputArgs,

    #[command(flatten)]
    /// Search parameter overrides.
    pub params: SearchParamsArgs,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `fts extract`.
#[derive(Args, Debug, Clone)]
pub struct ExtractCommand {
    /// Phrase marking the start of a segment (repeatable)
    #[arg(long = "pre", value_name = "PHRASE", required = true)]
    pub pre_phrases: Vec<String>,

    /// Phrase marking the end of a segment (repeatable)
    #[arg(long = "post", value_name = "PHRASE", required = true)]
    pub post_phrases: Vec<String>,

    /// Delimiter placed between extracted segments [default: ;]
    #[arg(long)]
    pub delimiter: Option<String>,

    /// Also list the marker phrases that were found
    #[arg(long)]
    pub markers: bool,

    #[command(flatten)]
    /// Text source.
    pub input: InputArgs,

    #[command(flatten)]
    /// Search parameter overrides.
    pub params: SearchParamsArgs,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `fts init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.fts.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `fts` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Find every occurrence of one or more phrases
    Find(FindCommand),

    /// Check whether any of the phrases occurs
    Exists(ExistsCommand),

    /// Extract the text between pre- and post-marker phrases
    Extract(ExtractCommand),

    /// Show the effective configuration
    Config,

    /// Initialize fts configuration in the current directory
    Init(InitCommand),
}
