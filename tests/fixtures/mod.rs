//! Test fixtures: an on-disk benchmark corpus and measurement files.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A benchmark corpus in a temporary directory.
///
/// The directory name carries every group and kind marker, so nothing
/// outside the relative benchmark paths may influence classification.
pub struct Corpus {
    dir: TempDir,
}

impl Corpus {
    pub fn new() -> Self {
        let dir = tempfile::Builder::new()
            .prefix("corpus-fig10-inc-flip-nondet-naive-reachability-")
            .tempdir()
            .unwrap();
        Self { dir }
    }

    /// Root the measurement paths are relative to.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write a benchmark file at `relative` and return its absolute path.
    pub fn file(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    /// Write a measurements file built from `(system, relative path, time)`.
    pub fn measurements(&self, rows: &[(&str, &str, &str)]) -> PathBuf {
        let text: String = rows
            .iter()
            .map(|(system, relative, time)| format!("{},{},{}\n", system, relative, time))
            .collect();
        self.file("results/comparison.csv", &text)
    }
}

/// Owned system list.
pub fn systems(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
