//! Swift source generation between marker comments

pub mod blocks;
pub mod patcher;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub use blocks::{case_block, dictionary_block, identifier};
pub use patcher::{
    PatchOutcome, patch_template, patch_template_with, patch_text, replace_marker_blocks,
};

/// Errors from template patching
///
/// These never abort a run; the caller reports them and carries on.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Couldn't read template file '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Error writing to file '{}': {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}
