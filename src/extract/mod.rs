//! @acp:module "Extractor"
//! @acp:summary "Turn an accepted file into its archived text"
//! @acp:domain cli
//! @acp:layer service
//!
//! Two variants, chosen from the file extension:
//! - plain files are decoded as UTF-8 with U+FFFD substitution and returned as-is
//! - `.ipynb` notebooks are reduced to their code and markdown cell sources

pub mod notebook;

pub use notebook::{parse_notebook, render_cells, CellKind, NotebookCell};

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{ArchiveError, Result};

/// @acp:summary "Extraction variant of an accepted file"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Plain,
    Notebook,
}

impl FileKind {
    /// `.ipynb` (any case) is a notebook, everything else is plain text
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("ipynb") => Self::Notebook,
            _ => Self::Plain,
        }
    }
}

/// @acp:summary "Extract the archived content of one file"
pub fn extract(path: &Path, kind: FileKind) -> Result<String> {
    let text = read_lossy(path)?;
    match kind {
        FileKind::Plain => Ok(text),
        FileKind::Notebook => {
            let cells = parse_notebook(&text).map_err(|source| ArchiveError::NotebookParse {
                path: path.to_path_buf(),
                source,
            })?;
            debug!(path = %path.display(), cells = cells.len(), "Parsed notebook");
            Ok(render_cells(&cells))
        }
    }
}

/// Read a whole file, replacing malformed UTF-8 with U+FFFD
pub fn read_lossy(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| ArchiveError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}
