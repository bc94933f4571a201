//! @acp:module "Walker"
//! @acp:summary "Deterministic project traversal with directory pruning and binary detection"
//! @acp:domain cli
//! @acp:layer service
//!
//! Walks the project root top-down. Within each directory the files are
//! yielded first in name order, then each subdirectory is descended in name
//! order. Excluded directories are pruned before descent so nothing below
//! them is ever read.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::config::{ExclusionRuleSet, SNIFF_LEN};
use crate::error::{ArchiveError, Result};
use crate::extract::FileKind;

/// @acp:summary "A file accepted as text and ready for extraction"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Absolute path on disk
    pub path: PathBuf,
    /// Path relative to the project root, `/`-separated
    pub relative_path: String,
    /// Extraction variant
    pub kind: FileKind,
}

/// Why a file was left out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Name on the exact-name deny list
    ExcludedName,
    /// The archive being written
    OutputFile,
    /// Known binary extension, never opened
    BinaryExtension,
    /// Null byte within the first [`SNIFF_LEN`] bytes
    NullByte,
}

impl SkipReason {
    /// Binary content as opposed to a name-based exclusion
    pub fn is_binary(self) -> bool {
        matches!(self, Self::BinaryExtension | Self::NullByte)
    }
}

/// One step of the walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkEvent {
    File(Candidate),
    Skipped {
        relative_path: String,
        reason: SkipReason,
    },
}

/// @acp:summary "Project walker bound to a rule set"
pub struct Walker<'a> {
    rules: &'a ExclusionRuleSet,
    root: PathBuf,
    exclude_path: Option<PathBuf>,
}

impl<'a> Walker<'a> {
    pub fn new<P: AsRef<Path>>(rules: &'a ExclusionRuleSet, root: P) -> Self {
        Self {
            rules,
            root: root.as_ref().to_path_buf(),
            exclude_path: None,
        }
    }

    /// Never yield this exact path (the archive itself)
    pub fn excluding(mut self, path: PathBuf) -> Self {
        self.exclude_path = Some(path);
        self
    }

    /// @acp:summary "Lazily walk the tree"
    /// @acp:ai-careful "Each call starts a fresh walk; the iterator is not restartable"
    pub fn walk(&self) -> Box<dyn Iterator<Item = Result<WalkEvent>> + '_> {
        let rules = self.rules;
        let entries = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by(|a, b| {
                a.file_type()
                    .is_dir()
                    .cmp(&b.file_type().is_dir())
                    .then_with(|| a.file_name().cmp(b.file_name()))
            })
            .into_iter()
            .filter_entry(move |entry| !is_pruned(rules, entry));

        Box::new(entries.filter_map(move |entry| match entry {
            Ok(entry) if entry.file_type().is_file() => Some(self.classify(entry)),
            Ok(_) => None,
            Err(e) => Some(Err(ArchiveError::from(e))),
        }))
    }

    /// Collect the accepted candidates, dropping skips and errors
    #[cfg(test)]
    pub fn candidates(&self) -> Vec<Candidate> {
        self.walk()
            .filter_map(|event| match event {
                Ok(WalkEvent::File(candidate)) => Some(candidate),
                _ => None,
            })
            .collect()
    }

    fn classify(&self, entry: DirEntry) -> Result<WalkEvent> {
        let path = entry.into_path();
        let relative_path = relative_path(&self.root, &path);

        let skip = |reason: SkipReason| -> Result<WalkEvent> {
            debug!(path = %relative_path, ?reason, "Skipping file");
            Ok(WalkEvent::Skipped {
                relative_path: relative_path.clone(),
                reason,
            })
        };

        let excluded_name = path
            .file_name()
            .map(|n| self.rules.excludes_file_name(&n.to_string_lossy()))
            .unwrap_or(false);
        if excluded_name {
            return skip(SkipReason::ExcludedName);
        }
        if self.exclude_path.as_deref() == Some(path.as_path()) {
            return skip(SkipReason::OutputFile);
        }
        let binary_ext = path
            .extension()
            .map(|e| self.rules.is_binary_extension(&e.to_string_lossy()))
            .unwrap_or(false);
        if binary_ext {
            return skip(SkipReason::BinaryExtension);
        }
        if sniff_binary(&path)? {
            return skip(SkipReason::NullByte);
        }

        let kind = FileKind::from_path(&path);
        Ok(WalkEvent::File(Candidate {
            path,
            relative_path,
            kind,
        }))
    }
}

fn is_pruned(rules: &ExclusionRuleSet, entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    let pruned = rules.excludes_dir(&name, entry.depth());
    if pruned {
        debug!(path = %entry.path().display(), "Pruning directory");
    }
    pruned
}

/// @acp:summary "True when the first SNIFF_LEN bytes contain a null byte"
pub fn sniff_binary(path: &Path) -> Result<bool> {
    let read_err = |source| ArchiveError::Read {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(read_err)?;
    let mut head = Vec::with_capacity(SNIFF_LEN);
    file.take(SNIFF_LEN as u64)
        .read_to_end(&mut head)
        .map_err(read_err)?;
    Ok(head.contains(&0))
}

/// `/`-joined path of `path` below `root`
pub fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
