//! @acp:module "Configuration"
//! @acp:summary "Immutable exclusion rules and archiver defaults"
//! @acp:domain cli
//! @acp:layer config
//!
//! There is no configuration file. Everything the walker needs to decide what
//! to skip is built once by [`Config::default`] and passed around by reference.

use std::collections::BTreeSet;

use serde::Serialize;

/// Default archive file name, written at the project root
pub const DEFAULT_OUTPUT_FILENAME: &str = "full_project_source.txt";

/// Archive name used by older releases; never archived either
pub const LEGACY_OUTPUT_FILENAME: &str = "full_code_text.txt";

/// Bytes inspected when sniffing for binary content
pub const SNIFF_LEN: usize = 1024;

/// Directory the shipped binary is expected to live in, one level below the project
pub const TOOLS_DIR_NAME: &str = "tools";

/// @acp:summary "Top-level archiver configuration"
#[derive(Debug, Clone, Default, Serialize)]
pub struct Config {
    /// Directory and file exclusion rules
    pub rules: ExclusionRuleSet,
}

/// @acp:summary "Name-based exclusion rules applied during traversal"
/// @acp:lock normal
#[derive(Debug, Clone, Serialize)]
pub struct ExclusionRuleSet {
    /// Directory names excluded at any depth
    pub anywhere: BTreeSet<String>,

    /// Directory names excluded only as direct children of the project root
    pub root_only: BTreeSet<String>,

    /// Directory name suffixes excluded at any depth, checked in order
    pub suffix_patterns: Vec<String>,

    /// Lower-case file extensions (no dot) skipped without being opened
    pub binary_extensions: BTreeSet<String>,

    /// Exact file names never archived
    pub excluded_files: BTreeSet<String>,
}

impl Default for ExclusionRuleSet {
    fn default() -> Self {
        Self {
            anywhere: default_anywhere(),
            root_only: to_set(&["data"]),
            suffix_patterns: vec![".egg-info".to_string(), ".dist-info".to_string()],
            binary_extensions: default_binary_extensions(),
            excluded_files: to_set(&[
                DEFAULT_OUTPUT_FILENAME,
                LEGACY_OUTPUT_FILENAME,
                ".DS_Store",
                "Thumbs.db",
                ".env",
                "notebook.html",
            ]),
        }
    }
}

impl ExclusionRuleSet {
    /// @acp:summary "Decide whether a directory is pruned from the walk"
    ///
    /// `depth` is the walker depth of the directory: 1 for direct children of
    /// the project root. The root itself (depth 0) is never excluded.
    pub fn excludes_dir(&self, name: &str, depth: usize) -> bool {
        if depth == 0 {
            return false;
        }
        if self.anywhere.contains(name) {
            return true;
        }
        if depth == 1 && self.root_only.contains(name) {
            return true;
        }
        self.suffix_patterns.iter().any(|s| name.ends_with(s.as_str()))
    }

    /// Whether the file name is on the exact-name deny list
    pub fn excludes_file_name(&self, name: &str) -> bool {
        self.excluded_files.contains(name)
    }

    /// Whether the extension marks a known binary type (case-insensitive)
    pub fn is_binary_extension(&self, ext: &str) -> bool {
        self.binary_extensions.contains(&ext.to_ascii_lowercase())
    }
}

fn to_set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_anywhere() -> BTreeSet<String> {
    to_set(&[
        // VCS
        ".git",
        ".hg",
        ".svn",
        // Caches
        "__pycache__",
        ".mypy_cache",
        ".pytest_cache",
        ".tox",
        "cache",
        // Dependencies / virtual environments
        "node_modules",
        "venv",
        ".venv",
        "env",
        "renv",
        // Build outputs
        "build",
        "dist",
        "output",
        "logs",
        // IDE
        ".vscode",
        ".idea",
        // Notebooks
        ".ipynb_checkpoints",
    ])
}

fn default_binary_extensions() -> BTreeSet<String> {
    to_set(&[
        // Compiled
        "pyc", "pyo", "so", "dll", "exe",
        // Images
        "png", "jpg", "jpeg", "gif", "ico", "svg",
        // Columnar / tabular data
        "parquet", "arrow", "feather", "csv",
        // Archives
        "zip", "gz", "tar", "rar", "7z",
        // Databases
        "db", "sqlite3",
        // Documents
        "pdf", "docx", "xlsx",
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anywhere_excluded_at_any_depth() {
        let rules = ExclusionRuleSet::default();
        assert!(rules.excludes_dir(".git", 1));
        assert!(rules.excludes_dir(".git", 4));
        assert!(rules.excludes_dir(".ipynb_checkpoints", 2));
    }

    #[test]
    fn test_root_only_excluded_only_at_top() {
        let rules = ExclusionRuleSet::default();
        assert!(rules.excludes_dir("data", 1));
        assert!(!rules.excludes_dir("data", 2));
        assert!(!rules.excludes_dir("data", 3));
    }

    #[test]
    fn test_suffix_patterns() {
        let rules = ExclusionRuleSet::default();
        assert!(rules.excludes_dir("foo.egg-info", 1));
        assert!(rules.excludes_dir("foo.egg-info", 5));
        assert!(!rules.excludes_dir("egg-info-notes", 1));
    }

    #[test]
    fn test_root_never_excluded() {
        let rules = ExclusionRuleSet::default();
        assert!(!rules.excludes_dir("build", 0));
    }

    #[test]
    fn test_binary_extension_case_insensitive() {
        let rules = ExclusionRuleSet::default();
        assert!(rules.is_binary_extension("png"));
        assert!(rules.is_binary_extension("PNG"));
        assert!(!rules.is_binary_extension("py"));
    }

    #[test]
    fn test_excluded_file_names() {
        let rules = ExclusionRuleSet::default();
        assert!(rules.excludes_file_name(DEFAULT_OUTPUT_FILENAME));
        assert!(rules.excludes_file_name(".DS_Store"));
        assert!(!rules.excludes_file_name("main.py"));
    }
}
