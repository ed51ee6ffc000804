//! selectric-accents
pub mod core;
pub mod editing;
pub mod font_source;
pub mod geometry;
pub mod logging;
