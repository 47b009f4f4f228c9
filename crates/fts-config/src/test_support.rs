//! Temporary directory trees of `.fts.toml` files for discovery tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// A throwaway directory tree that config files are written into.
pub struct ConfigTree {
    /// Owned temporary root.
    root: TempDir,
}

impl ConfigTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    /// Root of the tree.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Ensures `rel_path` exists as a directory and returns it.
    pub fn dir(&self, rel_path: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes `.fts.toml` with `content` into `rel_path`, returning the file path.
    pub fn config(&self, rel_path: &str, content: &str) -> PathBuf {
        let file = self.dir(rel_path).join(CONFIG_FILENAME);
        fs::write(&file, content).unwrap();
        file
    }

    /// Writes a config that only holds a comment.
    pub fn plain_config(&self, rel_path: &str) -> PathBuf {
        self.config(rel_path, "# fts test config\n")
    }

    /// Writes a config that stops upward discovery.
    pub fn root_config(&self, rel_path: &str) -> PathBuf {
        self.config(rel_path, "root = true\n")
    }
}
