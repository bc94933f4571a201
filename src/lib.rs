#![forbid(unsafe_code)]

//! @acp:module "combine Library"
//! @acp:summary "Concatenate a project's text sources into one annotated archive"
//! @acp:domain cli
//! @acp:layer api
//! @acp:stability stable
//!
//! # combine-code
//!
//! Walks a project, skips noise directories and binary files, and writes every
//! remaining text file into a single archive preceded by a `=== path ===`
//! header. Jupyter notebooks are reduced to their code and markdown cells.
//!
//! ## Example
//!
//! ```rust,no_run
//! use combine::{ArchiveRequest, Archiver, Config};
//!
//! fn main() -> combine::Result<()> {
//!     let request = ArchiveRequest::resolve(Some(".".into()), None)?;
//!     let summary = Archiver::new(Config::default()).run(&request)?;
//!     println!("archived {} files", summary.archived);
//!     Ok(())
//! }
//! ```

pub mod archive;
pub mod commands;
pub mod config;
pub mod error;
pub mod extract;
pub mod request;
pub mod walk;

// Re-exports
pub use archive::{ArchiveSummary, ArchiveWriter, Archiver, FileRecord};
pub use config::{Config, ExclusionRuleSet, DEFAULT_OUTPUT_FILENAME};
pub use error::{ArchiveError, Result};
pub use extract::{extract, CellKind, FileKind, NotebookCell};
pub use request::ArchiveRequest;
pub use walk::{Candidate, SkipReason, WalkEvent, Walker};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
