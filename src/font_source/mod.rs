//! Font source data structures
//!
//! This module contains everything related to the font file being edited:
//! the decoded glyph table, metrics, character maps, and the code that reads
//! and writes the binary TrueType file.

pub mod binary;
pub mod charmap;
pub mod cmap_table;
pub mod data;
pub mod glyph_names;
pub mod metrics;
pub mod outline;

#[cfg(test)]
pub(crate) mod tests;

// Explicit re-exports for public API
// Binary font files
pub use binary::FontFile;
// Data structures
pub use charmap::CharacterMap;
pub use data::{ComponentAnchor, ComponentRef, CompositeData, FontData, GlyphData};
// Metrics
pub use metrics::{FontMetrics, HorizontalMetric};
// Outlines
pub use outline::{Outline, PointFlags};
