#![forbid(unsafe_code)]

//! Palette aggregation
//!
//! A palette is an ordered map from color name to color. Re-inserting a name
//! replaces its color but keeps the position of its first occurrence, so the
//! palette lists colors in input-file order with later definitions winning.

use crate::palette::PaletteError;
use crate::palette::color::Color;
use crate::palette::line::{LineParser, PaletteEntry};
use indexmap::IndexMap;
use log::{debug, info};
use std::path::Path;

/// Default output path when no `--out` is given
pub const DEFAULT_PALETTE_PATH: &str = "./Generated Colors.clr";

const PALETTE_EXTENSION: &str = ".clr";

/// A named, ordered collection of uniquely named colors
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    name: String,
    colors: IndexMap<String, Color>,
}

impl Palette {
    /// Creates an empty palette
    pub fn new(name: impl Into<String>) -> Self {
        Palette {
            name: name.into(),
            colors: IndexMap::new(),
        }
    }

    /// Builds a palette from the lines of `text`
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        let mut palette = Palette::new(name);
        for entry in LineParser::new().parse_lines(text) {
            palette.insert_entry(entry);
        }
        palette
    }

    /// Reads `path` as UTF-8 and builds a palette from its lines
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::ReadInput`] if the file cannot be read or is
    /// not valid UTF-8. A readable file without any color lines produces an
    /// empty palette.
    pub fn from_file(name: impl Into<String>, path: &Path) -> Result<Self, PaletteError> {
        let text = std::fs::read_to_string(path).map_err(|source| PaletteError::ReadInput {
            path: path.to_path_buf(),
            source,
        })?;

        let palette = Palette::from_text(name, &text);
        info!(
            "parsed {} colors from {}",
            palette.len(),
            path.display()
        );
        Ok(palette)
    }

    /// Inserts a color, replacing any existing color with the same name in place
    pub fn insert(&mut self, name: impl Into<String>, color: Color) {
        let name = name.into();
        if let Some(previous) = self.colors.insert(name.clone(), color) {
            debug!(
                "color {:?} redefined: {} -> {}",
                name,
                previous.to_hex(),
                color.to_hex()
            );
        }
    }

    pub fn insert_entry(&mut self, entry: PaletteEntry) {
        self.insert(entry.name, entry.color);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, name: &str) -> Option<&Color> {
        self.colors.get(name)
    }

    /// Color names in palette order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.colors.keys().map(String::as_str)
    }

    /// `(name, color)` pairs in palette order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Color)> {
        self.colors.iter().map(|(name, color)| (name.as_str(), color))
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Derives a palette name from its output path
///
/// The name is the file name with a trailing `.clr` removed, so
/// `./Generated Colors.clr` becomes `Generated Colors`.
pub fn palette_name_for(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());

    match file_name.strip_suffix(PALETTE_EXTENSION) {
        Some(stem) => stem.to_string(),
        None => file_name,
    }
}
