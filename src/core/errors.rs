//! Error types for font loading, glyph editing, and saving
//!
//! Everything below the application boundary returns [`EditError`]; the
//! runner wraps these in `anyhow` with extra context.

use std::path::PathBuf;
use thiserror::Error;
use write_fonts::read::ReadError;
use write_fonts::types::Tag;

/// Errors produced while editing a font
#[derive(Debug, Error)]
pub enum EditError {
    #[error("glyph '{0}' not found in the font")]
    MissingGlyph(String),
    #[error("glyph '{0}' has no outline points")]
    EmptyOutline(String),
    #[error("malformed outline: {0}")]
    MalformedOutline(String),
    #[error("composite glyph '{glyph}' nests components deeper than {limit} levels")]
    CompositeTooDeep { glyph: String, limit: u8 },
    #[error("component of '{glyph}' refers to point {index}, which does not exist")]
    ComponentPointOutOfRange { glyph: String, index: usize },
    #[error("glyph id {0} is out of range")]
    GlyphIdOutOfRange(u32),
    #[error("codepoint U+{0:04X} is not a valid Unicode scalar value")]
    InvalidCodepoint(u32),
    #[error("stored glyph count {stored} does not match the glyph order length {actual}")]
    GlyphCountMismatch { stored: usize, actual: usize },
    #[error("coordinate {0} does not fit in a 16-bit font unit")]
    CoordinateOverflow(f64),
    #[error("too many glyphs for a TrueType font: {0}")]
    TooManyGlyphs(usize),
    #[error("unsupported font: {0}")]
    Unsupported(String),
    #[error("error reading font data: {0}")]
    Read(#[from] ReadError),
    #[error("malformed '{tag}' table: {message}")]
    MalformedTable { tag: Tag, message: String },
    #[error("failed to compile the '{tag}' table: {message}")]
    Compile { tag: Tag, message: String },
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EditError {
    pub(crate) fn compile(tag: Tag, error: impl std::fmt::Display) -> Self {
        EditError::Compile {
            tag,
            message: error.to_string(),
        }
    }
}
