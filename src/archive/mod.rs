//! @acp:module "Archiver"
//! @acp:summary "Walk, extract and write one project archive"
//! @acp:domain cli
//! @acp:layer service
//!
//! Drives the pipeline for a resolved [`ArchiveRequest`]. The output file is
//! opened once up front and excluded from its own walk. Per-file read and
//! notebook failures are logged and counted; only output failures abort.

pub mod writer;

pub use writer::{header, ArchiveWriter, FileRecord};

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::extract::extract;
use crate::request::ArchiveRequest;
use crate::walk::{WalkEvent, Walker};

/// @acp:summary "Counters for one archive run"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArchiveSummary {
    /// Archive that was written
    pub output_path: PathBuf,
    /// Files written to the archive
    pub archived: usize,
    /// Binary by extension or content
    pub skipped_binary: usize,
    /// Excluded by name, including the archive itself
    pub skipped_excluded: usize,
    /// Extracted to empty or whitespace-only text
    pub skipped_empty: usize,
    /// Unreadable files, malformed notebooks, untraversable entries
    pub failed: usize,
}

impl ArchiveSummary {
    /// Everything that was seen but not archived
    pub fn skipped(&self) -> usize {
        self.skipped_binary + self.skipped_excluded + self.skipped_empty + self.failed
    }
}

/// @acp:summary "Project archiver"
pub struct Archiver {
    config: Config,
}

impl Archiver {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// @acp:summary "Archive the request's project root into its output path"
    /// @acp:ai-careful "Truncates the output file before walking"
    pub fn run(&self, request: &ArchiveRequest) -> Result<ArchiveSummary> {
        info!(
            root = %request.project_root.display(),
            output = %request.output_path.display(),
            "Starting archive"
        );
        if let Ok(rules) = serde_json::to_string(&self.config.rules) {
            debug!(%rules, "Effective exclusion rules");
        }

        let mut writer = ArchiveWriter::create(&request.output_path)?;
        let output = fs::canonicalize(&request.output_path)
            .unwrap_or_else(|_| request.output_path.clone());
        let walker = Walker::new(&self.config.rules, &request.project_root).excluding(output);

        let mut summary = ArchiveSummary {
            output_path: request.output_path.clone(),
            ..Default::default()
        };
        self.archive_events(walker.walk(), &mut writer, &mut summary)?;

        debug!(records = writer.records(), "Flushing archive");
        writer.finish()?;
        info!(
            archived = summary.archived,
            skipped = summary.skipped(),
            "Archive complete"
        );
        Ok(summary)
    }

    /// @acp:summary "Extract and write every walk event, recovering per file"
    fn archive_events<I, W>(
        &self,
        events: I,
        writer: &mut ArchiveWriter<W>,
        summary: &mut ArchiveSummary,
    ) -> Result<()>
    where
        I: IntoIterator<Item = Result<WalkEvent>>,
        W: Write,
    {
        for event in events {
            let candidate = match event {
                Ok(WalkEvent::File(candidate)) => candidate,
                Ok(WalkEvent::Skipped { reason, .. }) => {
                    if reason.is_binary() {
                        summary.skipped_binary += 1;
                    } else {
                        summary.skipped_excluded += 1;
                    }
                    continue;
                }
                Err(e) if e.is_recoverable() => {
                    warn!(error = %e, "Skipping entry");
                    summary.failed += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            let content = match extract(&candidate.path, candidate.kind) {
                Ok(content) => content,
                Err(e) if e.is_recoverable() => {
                    warn!(path = %candidate.relative_path, error = %e, "Skipping file");
                    summary.failed += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            if content.trim().is_empty() {
                info!(path = %candidate.relative_path, "No content extracted");
                summary.skipped_empty += 1;
                continue;
            }

            info!(path = %candidate.relative_path, kind = ?candidate.kind, "Archiving file");
            writer.write_record(&FileRecord {
                relative_path: candidate.relative_path,
                content,
            })?;
            summary.archived += 1;
        }
        Ok(())
    }
}
