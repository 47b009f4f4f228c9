//! Shared context for running CLI commands.

use std::{
    env,
    error::Error,
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
    process::ExitCode,
};

use fts_config::{Config, EngineKind};
use fts_engine::{ElasticsearchEngine, MemoryEngine, SearchEngine};
use fts_locate::Locator;
use tracing::debug;

use crate::cli::args::{InputArgs, SearchParamsArgs};

/// Locator over whichever engine the configuration selects.
pub type DynLocator = Locator<Box<dyn SearchEngine>>;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self { cwd, config })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used by `init`, which must work even when an existing config file is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }

    /// Builds a locator from the configuration with `params` applied on top.
    pub fn locator(
        &self,
        params: &SearchParamsArgs,
        delimiter: Option<&str>,
    ) -> Result<DynLocator, ExitCode> {
        let mut config = self.config.clone();
        params.apply(&mut config);
        if let Some(delimiter) = delimiter {
            config.extract.join_delimiter = delimiter.to_string();
        }

        let options = config.search_options().map_err(|e| fail(&e))?;
        let collection = config.collection().map_err(|e| fail(&e))?.to_string();

        let engine: Box<dyn SearchEngine> = match config.engine.kind {
            EngineKind::Memory => {
                let engine = params
                    .synonym_groups()
                    .into_iter()
                    .fold(MemoryEngine::new(), MemoryEngine::with_synonyms);
                debug!("using in-process engine");
                Box::new(engine)
            }
            EngineKind::Elasticsearch => {
                let es = config.elasticsearch_options().map_err(|e| fail(&e))?;
                debug!(url = %es.url, "using elasticsearch engine");
                Box::new(ElasticsearchEngine::new(es).map_err(|e| fail(&e))?)
            }
        };

        Locator::new(engine, collection, options).map_err(|e| fail(&e))
    }
}

/// Reads the text to search from `--file` or stdin.
pub fn read_content(input: &InputArgs) -> Result<String, ExitCode> {
    match &input.file {
        Some(path) => read_file(path),
        None => {
            let mut content = String::new();
            io::stdin().read_to_string(&mut content).map_err(|e| {
                eprintln!("error: failed to read stdin: {e}");
                ExitCode::FAILURE
            })?;
            Ok(content)
        }
    }
}

/// Reads a file or exits with an error.
fn read_file(path: &Path) -> Result<String, ExitCode> {
    fs::read_to_string(path).map_err(|e| {
        eprintln!("error: failed to read {}: {e}", path.display());
        ExitCode::FAILURE
    })
}

/// Prints an error and returns the failure exit code.
pub fn fail(error: &dyn Error) -> ExitCode {
    eprintln!("error: {error}");
    ExitCode::FAILURE
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
