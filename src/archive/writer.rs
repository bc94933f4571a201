//! @acp:module "Archive Writer"
//! @acp:summary "Serialize file records into the archive text format"
//! @acp:domain cli
//! @acp:layer io
//!
//! Format, one block per file:
//!
//! ```text
//! === relative/path.ext ===
//! <content>
//!
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{ArchiveError, Result};

/// @acp:summary "One file's archived text"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub relative_path: String,
    pub content: String,
}

/// Header line preceding each record
pub fn header(relative_path: &str) -> String {
    format!("=== {relative_path} ===")
}

/// @acp:summary "Sequential writer over the archive output"
pub struct ArchiveWriter<W: Write> {
    inner: W,
    path: PathBuf,
    records: usize,
}

impl ArchiveWriter<BufWriter<File>> {
    /// Create (or truncate) the archive file, creating parent directories
    pub fn create(path: &Path) -> Result<Self> {
        let write_err = |source| ArchiveError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }
        let file = File::create(path).map_err(write_err)?;
        Ok(Self::new(BufWriter::new(file), path))
    }
}

impl<W: Write> ArchiveWriter<W> {
    pub fn new(inner: W, path: &Path) -> Self {
        Self {
            inner,
            path: path.to_path_buf(),
            records: 0,
        }
    }

    /// Append one record: header, content, newline if missing, blank line
    pub fn write_record(&mut self, record: &FileRecord) -> Result<()> {
        self.write_record_inner(record).map_err(|source| ArchiveError::Write {
            path: self.path.clone(),
            source,
        })?;
        self.records += 1;
        Ok(())
    }

    fn write_record_inner(&mut self, record: &FileRecord) -> std::io::Result<()> {
        writeln!(self.inner, "{}", header(&record.relative_path))?;
        self.inner.write_all(record.content.as_bytes())?;
        if !record.content.ends_with('\n') {
            self.inner.write_all(b"\n")?;
        }
        self.inner.write_all(b"\n")
    }

    /// Records written so far
    pub fn records(&self) -> usize {
        self.records
    }

    /// Flush and hand back the sink
    pub fn finish(mut self) -> Result<W> {
        self.inner.flush().map_err(|source| ArchiveError::Write {
            path: self.path.clone(),
            source,
        })?;
        Ok(self.inner)
    }
}
