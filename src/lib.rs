#![forbid(unsafe_code)]

//! sync-palette: keep macOS color palettes and Swift color code in sync
//!
//! Reads a text file of `#RRGGBB Name` lines, writes a `.clr` color list for
//! the macOS color picker, and optionally regenerates the enum cases and
//! color dictionary of a Swift file between marker comments.

pub mod cli;
pub mod output;
pub mod palette;
pub mod template;
