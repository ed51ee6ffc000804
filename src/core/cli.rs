//! Command line interface for selectric-accents
//!
//! Handles parsing command line arguments and provides validation for user
//! inputs. Running with no arguments performs the standard Selectric build
//! on the font in `static/fonts/`.

use crate::core::config::{EditPlan, DEFAULT_FONT_PATH};
use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::debug;

/// selectric-accents CLI arguments
///
/// Examples:
///   selectric-accents                                  # Standard build, in place
///   selectric-accents MyFont.ttf -o MyFont-accents.ttf # Write to a new file
///   selectric-accents MyFont.ttf --plan plan.json      # Use a custom edit plan
///   selectric-accents --dry-run -vv                    # Show what would happen
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "selectric-accents",
    version,
    about = "Adds accented glyphs to the IBM Selectric TrueType font",
    long_about = "Synthesizes accented glyphs (é, É, à, À) from existing letters and quote marks, slims the number sign, maps the new glyphs to their Unicode codepoints, and writes the font back."
)]
pub struct CliArgs {
    /// Path to the TrueType font to edit
    #[clap(
        default_value = DEFAULT_FONT_PATH,
        help = "TrueType font to edit",
        long_help = "Path to the TrueType (.ttf) font to edit. Defaults to the Selectric font in static/fonts/."
    )]
    pub font: PathBuf,

    /// Where to write the result
    #[clap(
        long = "output",
        short = 'o',
        help = "Output path (default: overwrite the input)",
        long_help = "Path to write the edited font to. If not specified, the input font is overwritten in place."
    )]
    pub output: Option<PathBuf>,

    /// Edit plan replacing the built-in one
    #[clap(
        long = "plan",
        short = 'p',
        help = "JSON edit plan to apply instead of the built-in plan",
        long_help = "Path to a JSON file listing the accents to build, glyphs to scale, and codepoints to map. Replaces the built-in Selectric plan entirely."
    )]
    pub plan: Option<PathBuf>,

    /// Run every edit but skip writing the font
    #[clap(long = "dry-run", help = "Apply the edits without writing the font")]
    pub dry_run: bool,

    /// Log verbosity
    #[clap(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase log output (-v info, -vv debug)"
    )]
    pub verbose: u8,
}

impl CliArgs {
    /// Validate the CLI arguments after parsing
    ///
    /// This ensures that all paths exist and are valid before any font is
    /// read, providing clear error messages for common mistakes.
    pub fn validate(&self) -> Result<(), String> {
        if !self.font.exists() {
            return Err(format!(
                "Font does not exist: {}\nMake sure the path is correct and the file exists.",
                self.font.display()
            ));
        }
        if !self.font.is_file() {
            return Err(format!(
                "Font path is not a file: {}",
                self.font.display()
            ));
        }
        match self.font.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("ttf") || ext.eq_ignore_ascii_case("otf") => {}
            Some(_) => {
                return Err(format!(
                    "Unsupported file type: {}\nOnly .ttf and .otf fonts are supported.",
                    self.font.display()
                ));
            }
            None => {
                return Err(format!(
                    "File has no extension: {}\nExpected a .ttf font.",
                    self.font.display()
                ));
            }
        }

        if let Some(plan) = &self.plan {
            if !plan.is_file() {
                return Err(format!("Edit plan does not exist: {}", plan.display()));
            }
        }
        Ok(())
    }

    /// Path the edited font is written to
    pub fn output_path(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.font)
    }

    /// The edit plan from `--plan`, or the built-in Selectric plan
    pub fn edit_plan(&self) -> Result<EditPlan> {
        match &self.plan {
            Some(path) => EditPlan::load(path),
            None => {
                debug!("Using the built-in Selectric edit plan");
                Ok(EditPlan::selectric())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_the_selectric_font() {
        let args = CliArgs::parse_from(["selectric-accents"]);
        assert_eq!(args.font, PathBuf::from(DEFAULT_FONT_PATH));
        assert_eq!(args.output_path(), Path::new(DEFAULT_FONT_PATH));
        assert!(args.plan.is_none());
        assert!(!args.dry_run);
        assert_eq!(args.verbose, 0);
        assert_eq!(args.edit_plan().unwrap(), EditPlan::selectric());
    }

    #[test]
    fn parses_all_options() {
        let args = CliArgs::parse_from([
            "selectric-accents",
            "in.ttf",
            "-o",
            "out.ttf",
            "--plan",
            "plan.json",
            "--dry-run",
            "-vv",
        ]);
        assert_eq!(args.font, PathBuf::from("in.ttf"));
        assert_eq!(args.output_path(), Path::new("out.ttf"));
        assert_eq!(args.plan, Some(PathBuf::from("plan.json")));
        assert!(args.dry_run);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn validation_checks_paths() {
        let dir = tempfile::tempdir().unwrap();
        let font = dir.path().join("font.ttf");
        let text = dir.path().join("font.txt");
        std::fs::write(&font, b"").unwrap();
        std::fs::write(&text, b"").unwrap();

        let args = |font: &Path, plan: Option<&Path>| CliArgs {
            font: font.to_path_buf(),
            output: None,
            plan: plan.map(Path::to_path_buf),
            dry_run: false,
            verbose: 0,
        };

        assert!(args(&font, None).validate().is_ok());
        assert!(args(&dir.path().join("missing.ttf"), None).validate().is_err());
        assert!(args(&text, None).validate().is_err());
        assert!(args(dir.path(), None).validate().is_err());
        assert!(args(&font, Some(&dir.path().join("plan.json")))
            .validate()
            .is_err());
    }
}
