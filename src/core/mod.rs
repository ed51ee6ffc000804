//! Core application functionality
//!
//! This module contains the core application logic, including:
//! - CLI handling and edit plan configuration
//! - Error types
//! - The runner that drives a complete edit

pub mod cli;
pub mod config;
pub mod errors;
pub mod platform;
pub mod runner;

// Re-export commonly used items
pub use cli::CliArgs;
pub use config::EditPlan;
pub use errors::EditError;
pub use runner::{apply_plan, run_app, EditSummary};
