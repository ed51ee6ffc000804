//! Application configuration management
//!
//! This module handles all configuration aspects:
//! - CLI arguments parsing
//! - Edit plans (built-in or loaded from JSON)

pub mod edit_plan;

/// Font edited when no path is given on the command line
pub const DEFAULT_FONT_PATH: &str = "static/fonts/IBM_Selectric_Light_Italic.ttf";

// Simple, clear re-exports
pub use crate::core::cli::CliArgs;
pub use edit_plan::{EditPlan, MappingSpec, ScaleSpec};
