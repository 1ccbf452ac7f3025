//! Complexity scorer for benchmark instances
//!
//! The score of an instance is the number of marker symbols (`=`, `≠`, `δ`,
//! `←`) in its text. Only incremental, flip and nondeterministic instances
//! count their own text; every instance adds the count of each file it
//! imports with `import "<relative path>"`. Imports are followed one level
//! deep only.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex_lite::Regex;
use serde::Serialize;

/// Symbols counted as atoms: assignment, inequality and the two transition
/// operators.
pub const MARKER_SYMBOLS: [char; 4] = ['=', '≠', 'δ', '←'];

/// Path substrings of instance kinds whose own text is counted.
pub const COUNTED_KINDS: [&str; 3] = ["inc", "flip", "nondet"];

fn import_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"^import "(.+?)""#).expect("import pattern compiles"))
}

/// Count marker symbols in `text`.
pub fn count_markers(text: &str) -> u64 {
    text.chars().filter(|c| MARKER_SYMBOLS.contains(c)).count() as u64
}

/// Whether the instance kind encoded in `path` counts its own text.
pub fn counts_own_text(path: &Path) -> bool {
    let path = path.to_string_lossy();
    COUNTED_KINDS.iter().any(|kind| path.contains(kind))
}

/// Relative import targets named in `text`, in order of appearance.
pub fn import_targets(text: &str) -> Vec<&str> {
    text.split('\n')
        .filter_map(|line| import_pattern().captures(line))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// Score contribution of one imported file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportScore {
    pub path: PathBuf,
    pub markers: u64,
    /// False when the file could not be read and contributed 0.
    pub readable: bool,
}

/// Full breakdown of a complexity score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub path: PathBuf,
    pub readable: bool,
    /// Markers in the file itself; 0 unless its kind is counted.
    pub base: u64,
    pub imports: Vec<ImportScore>,
}

impl ScoreBreakdown {
    /// Total score: base plus every import.
    pub fn total(&self) -> u64 {
        self.base + self.imports.iter().map(|i| i.markers).sum::<u64>()
    }
}

/// Compute the complexity score of the benchmark at `path`, relative to
/// the corpus `root`.
///
/// Kind gating sees only `path`; the directory holding the corpus never
/// affects the score. An unreadable file scores 0 and logs a warning.
pub fn score(root: &Path, path: impl AsRef<Path>) -> u64 {
    score_breakdown(root, path).total()
}

/// Compute the complexity score of `path` along with its components.
///
/// Import targets are resolved next to `path` and reported relative to
/// `root`, like `path` itself.
pub fn score_breakdown(root: &Path, path: impl AsRef<Path>) -> ScoreBreakdown {
    let path = path.as_ref();
    let on_disk = root.join(path);
    let contents = match fs::read_to_string(&on_disk) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::warn!(path = %on_disk.display(), error = %e, "cannot read benchmark file, scoring 0");
            return ScoreBreakdown {
                path: path.to_path_buf(),
                readable: false,
                base: 0,
                imports: Vec::new(),
            };
        }
    };

    let base = if counts_own_text(path) {
        count_markers(&contents)
    } else {
        0
    };

    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    let imports = import_targets(&contents)
        .into_iter()
        .map(|target| score_import(root, dir.join(target)))
        .collect();

    ScoreBreakdown {
        path: path.to_path_buf(),
        readable: true,
        base,
        imports,
    }
}

/// Imported files count unconditionally and their own imports are ignored.
fn score_import(root: &Path, path: PathBuf) -> ImportScore {
    match fs::read_to_string(root.join(&path)) {
        Ok(contents) => ImportScore {
            markers: count_markers(&contents),
            path,
            readable: true,
        },
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read imported file, counting 0");
            ImportScore {
                path,
                markers: 0,
                readable: false,
            }
        }
    }
}
