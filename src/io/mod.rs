//! Input/output: command line, configuration, palettes, export and errors

/// Command-line parsing and variant orchestration
pub mod cli;
/// Generation constants and defaults
pub mod configuration;
/// Palette documents from the content source
pub mod content;
/// Error types
pub mod error;
/// PNG export
pub mod image;
/// Terminal progress bars
pub mod progress;
/// Build-up capture and GIF export
pub mod visualization;
