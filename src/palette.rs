//! Color parsing, palette building and `.clr` serialization

pub mod builder;
pub mod clr;
pub mod color;
pub mod line;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub use builder::{DEFAULT_PALETTE_PATH, Palette, palette_name_for};
pub use clr::{decode_palette, encode_palette, read_palette, write_palette};
pub use color::Color;
pub use line::{LineParser, PaletteEntry};

/// Errors that can occur while building, writing or reading a palette
#[derive(Debug, Error)]
pub enum PaletteError {
    /// The input list could not be read or is not UTF-8
    #[error("Couldn't understand the colors from the given hex file '{}': {source}", path.display())]
    ReadInput { path: PathBuf, source: io::Error },

    /// The palette file could not be written
    #[error("Couldn't save palette file '{}': {source}", path.display())]
    WritePalette { path: PathBuf, source: io::Error },

    #[error("Failed to encode palette archive: {0}")]
    Encode(#[source] plist::Error),

    #[error("Failed to decode palette archive: {0}")]
    Decode(#[source] plist::Error),

    /// The property list decoded but is not a color list archive
    #[error("Malformed palette archive: {0}")]
    MalformedArchive(String),
}
