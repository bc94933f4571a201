//! @acp:module "Request"
//! @acp:summary "Resolve project root and output path for one run"
//! @acp:domain cli
//! @acp:layer service

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{DEFAULT_OUTPUT_FILENAME, TOOLS_DIR_NAME};
use crate::error::{ArchiveError, Result};

/// @acp:summary "Resolved, immutable inputs of one archive run"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveRequest {
    /// Canonical project root
    pub project_root: PathBuf,
    /// Absolute archive path
    pub output_path: PathBuf,
}

impl ArchiveRequest {
    /// @acp:summary "Build a request from optional overrides"
    ///
    /// Root: explicit, else the parent of a `tools/` directory holding the
    /// running binary, else the current directory. Output: explicit (relative
    /// paths resolve against the current directory), else
    /// [`DEFAULT_OUTPUT_FILENAME`] at the project root.
    pub fn resolve(root: Option<PathBuf>, output: Option<PathBuf>) -> Result<Self> {
        let root = match root {
            Some(root) => root,
            None => default_project_root()?,
        };
        let project_root = validate_root(&root)?;

        let output_path = match output {
            Some(path) if path.is_absolute() => path,
            Some(path) => current_dir()?.join(path),
            None => project_root.join(DEFAULT_OUTPUT_FILENAME),
        };

        debug!(
            root = %project_root.display(),
            output = %output_path.display(),
            "Resolved archive request"
        );
        Ok(Self {
            project_root,
            output_path,
        })
    }
}

/// Tool location first, then the working directory
fn default_project_root() -> Result<PathBuf> {
    if let Some(root) = env::current_exe().ok().as_deref().and_then(root_from_exe) {
        return Ok(root);
    }
    current_dir()
}

/// Project root implied by a binary living at `<project>/tools/<exe>`
pub fn root_from_exe(exe: &Path) -> Option<PathBuf> {
    let tools_dir = exe.parent()?;
    if tools_dir.file_name()? != TOOLS_DIR_NAME {
        return None;
    }
    tools_dir.parent().map(Path::to_path_buf)
}

fn current_dir() -> Result<PathBuf> {
    env::current_dir().map_err(|e| ArchiveError::path(".", format!("is unavailable: {e}")))
}

fn validate_root(root: &Path) -> Result<PathBuf> {
    let canonical =
        fs::canonicalize(root).map_err(|_| ArchiveError::path(root, "does not exist"))?;
    if !canonical.is_dir() {
        return Err(ArchiveError::path(root, "is not a directory"));
    }
    Ok(canonical)
}
