//! Palette documents as delivered by the content source
//!
//! Three shapes are accepted:
//! - a bare array: `["#fff", "#000"]`
//! - an object with a color list: `{"colors": [...]}`
//! - the CMS response: `{"data": {"terrazzo": {"colors": [...]}}}`
//!
//! List entries are either color strings or objects with a `color` field.

use crate::io::error::{PatternError, Result};
use crate::render::Palette;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ColorEntry {
    Plain(String),
    Object { color: String },
}

impl ColorEntry {
    fn into_string(self) -> String {
        match self {
            Self::Plain(color) | Self::Object { color } => color,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TerrazzoField {
    colors: Vec<ColorEntry>,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    terrazzo: TerrazzoField,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PaletteDocument {
    List(Vec<ColorEntry>),
    Colors { colors: Vec<ColorEntry> },
    Response { data: ResponseData },
}

impl PaletteDocument {
    fn into_colors(self) -> Vec<String> {
        let entries = match self {
            Self::List(entries) | Self::Colors { colors: entries } => entries,
            Self::Response { data } => data.terrazzo.colors,
        };
        entries.into_iter().map(ColorEntry::into_string).collect()
    }
}

/// Extract the ordered color strings from a palette document
///
/// # Errors
///
/// Returns an error if the JSON matches none of the accepted shapes
pub fn colors_from_json(json: &str) -> serde_json::Result<Vec<String>> {
    serde_json::from_str::<PaletteDocument>(json).map(PaletteDocument::into_colors)
}

/// Read a palette document from disk and build a palette from it
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a palette document,
/// contains an unparseable color or lists no colors
pub fn load_palette(path: &Path) -> Result<Palette> {
    let json = std::fs::read_to_string(path).map_err(|e| PatternError::FileSystem {
        path: path.to_path_buf(),
        operation: "read palette",
        source: e,
    })?;

    let colors = colors_from_json(&json).map_err(|e| PatternError::PaletteLoad {
        path: path.to_path_buf(),
        source: e,
    })?;

    Palette::parse(colors.as_slice())
}
