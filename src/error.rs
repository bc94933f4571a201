//! @acp:module "Errors"
//! @acp:summary "Error taxonomy for archive runs"
//! @acp:domain cli
//! @acp:layer model
//!
//! `Path` and `Write` abort a run. `Read`, `NotebookParse` and `Walk` are
//! recovered per file by the archiver and only ever surface as warnings.

use std::path::PathBuf;

use thiserror::Error;

/// Library result type
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// @acp:summary "Errors raised while building an archive"
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Project root missing or not a directory
    #[error("project root {path:?} {reason}")]
    Path { path: PathBuf, reason: String },

    /// Output file could not be created or written
    #[error("cannot write archive {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A single input file could not be read
    #[error("cannot read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A `.ipynb` file is not valid notebook JSON
    #[error("cannot parse notebook {path:?}: {source}")]
    NotebookParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Directory entry the walker could not visit
    #[error("cannot traverse entry: {0}")]
    Walk(#[from] walkdir::Error),
}

impl ArchiveError {
    pub(crate) fn path(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Path {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether the archiver skips the file and keeps going
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Read { .. } | Self::NotebookParse { .. } | Self::Walk(_)
        )
    }
}
