//! Glyph editing operations
//!
//! Every operation works on a [`FontData`](crate::font_source::FontData)
//! passed by `&mut` reference:
//! - Accent compositing (base letter + transformed accent shape)
//! - In-place uniform scaling
//! - Unicode character map updates

pub mod compositor;
pub mod mapping;
pub mod scaler;

use std::fmt;

// Re-export commonly used items
pub use compositor::{build_accented, compose_outlines, AccentRecipe, AccentTransform};
pub use mapping::add_unicode_mapping;
pub use scaler::{scale_about_center, scale_glyph};

/// What an edit did to the glyph table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphChange {
    Added,
    Replaced,
}

impl fmt::Display for GlyphChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlyphChange::Added => write!(f, "Added"),
            GlyphChange::Replaced => write!(f, "Replaced"),
        }
    }
}
