//! @acp:module "Commands"
//! @acp:summary "CLI command implementations"
//! @acp:domain cli
//! @acp:layer handler

pub mod archive;

pub use archive::{execute_archive, ArchiveOptions};
