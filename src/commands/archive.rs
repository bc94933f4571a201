//! @acp:module "Archive Command"
//! @acp:summary "Resolve paths, run the archiver, report the outcome"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Implements the `combine-code` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;

use crate::archive::{ArchiveSummary, Archiver};
use crate::config::Config;
use crate::request::ArchiveRequest;

/// Options for the archive command
#[derive(Debug, Clone, Default)]
pub struct ArchiveOptions {
    /// Project root override
    pub root: Option<PathBuf>,
    /// Archive path override
    pub output: Option<PathBuf>,
}

/// Execute the archive command
pub fn execute_archive(options: ArchiveOptions, config: Config) -> Result<ArchiveSummary> {
    let request = ArchiveRequest::resolve(options.root, options.output)
        .context("Cannot resolve project root")?;

    println!(
        "{} Project root: {}",
        style("→").cyan(),
        request.project_root.display()
    );
    println!(
        "{} Output: {}",
        style("→").cyan(),
        request.output_path.display()
    );

    let summary = Archiver::new(config)
        .run(&request)
        .context("Archive failed")?;

    println!(
        "{} Archived {} files",
        style("✓").green(),
        summary.archived
    );
    println!(
        "  Skipped: {} binary, {} excluded, {} empty, {} unreadable",
        summary.skipped_binary, summary.skipped_excluded, summary.skipped_empty, summary.failed
    );
    if summary.failed > 0 {
        println!(
            "{} {} files could not be read; see warnings above",
            style("!").yellow(),
            summary.failed
        );
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_execute_archive_writes_default_output() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("a.py"), "print(1)\n").unwrap();

        let options = ArchiveOptions {
            root: Some(tmp.path().to_path_buf()),
            output: None,
        };
        let summary = execute_archive(options, Config::default()).unwrap();

        assert_eq!(summary.archived, 1);
        assert!(summary.output_path.exists());
    }

    #[test]
    fn test_execute_archive_missing_root_fails() {
        let tmp = TempDir::new().unwrap();
        let options = ArchiveOptions {
            root: Some(tmp.path().join("missing")),
            output: Some(tmp.path().join("out.txt")),
        };

        let err = execute_archive(options, Config::default()).unwrap_err();
        assert!(format!("{err:#}").contains("does not exist"));
        assert!(!tmp.path().join("out.txt").exists());
    }
}
