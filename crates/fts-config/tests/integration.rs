//! Integration tests for fts-config: discovery, parsing, merging and resolution together.

#![allow(clippy::tests_outside_test_module)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use fts_config::{Config, ConfigError, EngineKind};
use fts_engine::Fuzziness;

/// A temporary directory tree.
struct TestEnv {
    root: tempfile::TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    fn create_dir(&self, rel_path: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(&path).unwrap();
        path
    }

    fn create_file(&self, rel_path: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }
}

#[test]
fn root_config_alone_resolves() {
    let env = TestEnv::new();
    env.create_file(
        ".fts.toml",
        r#"
root = true

[engine]
kind = "memory"
collection = "scratch"

[search]
min_score = 75
fuzziness = 1

[extract]
join_delimiter = "|"
"#,
    );

    let config = Config::load(env.path()).unwrap();
    assert_eq!(config.engine.kind, EngineKind::Memory);
    assert_eq!(config.collection().unwrap(), "scratch");
    assert_eq!(config.config_root.as_deref(), Some(env.path()));

    let options = config.search_options().unwrap();
    assert_eq!(options.min_score, 75);
    assert_eq!(options.fuzziness, Fuzziness::Edits(1));
    assert_eq!(options.join_delimiter, "|");
}

#[test]
fn nested_configs_merge_closest_first() {
    let env = TestEnv::new();
    env.create_file(
        ".fts.toml",
        "root = true\n[engine]\nurl = \"http://es:9200\"\ntimeout_secs = 10\n\
         [search]\nmin_score = 50\nstop_at_first_best_match = true\n",
    );
    env.create_file("project/.fts.toml", "[search]\nmin_score = 90\n");
    let cwd = env.create_dir("project/src");

    let config = Config::load(&cwd).unwrap();
    assert_eq!(config.search.min_score, 90);
    assert!(config.search.stop_at_first_best_match);
    assert_eq!(config.config_root, Some(env.path().join("project")));

    let es = config.elasticsearch_options().unwrap();
    assert_eq!(es.url, "http://es:9200");
    assert_eq!(es.timeout.as_secs(), 10);
}

#[test]
fn invalid_toml_is_reported_with_path() {
    let env = TestEnv::new();
    let path = env.create_file(".fts.toml", "root = true\n[search\n");

    let err = Config::load(env.path()).unwrap_err();
    match err {
        ConfigError::ParseToml { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn out_of_range_values_fail_on_resolution() {
    let env = TestEnv::new();
    env.create_file(".fts.toml", "root = true\n[search]\nmin_score = 101\n");

    let config = Config::load(env.path()).unwrap();
    assert!(matches!(
        config.search_options(),
        Err(ConfigError::InvalidValue { .. })
    ));
}

#[test]
fn load_from_no_files_is_default() {
    let config = Config::load_from_files(&[]).unwrap();
    assert_eq!(config.search_options().unwrap().min_score, 60);
    assert!(config.config_root.is_none());
}

#[test]
fn missing_file_is_a_read_error() {
    let env = TestEnv::new();
    let err = Config::load_from_files(&[env.path().join("absent.toml")]).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
}
