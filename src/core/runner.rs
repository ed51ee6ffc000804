//! Application runner logic
//!
//! Loads the font, applies the edit plan (accent builds, then scales, then
//! mappings), fixes the glyph count, and writes the result.

use crate::core::cli::CliArgs;
use crate::core::config::EditPlan;
use crate::core::errors::EditError;
use crate::editing::{add_unicode_mapping, build_accented, scale_glyph, GlyphChange};
use crate::font_source::{FontData, FontFile};
use anyhow::{Context, Result};
use std::fmt;
use tracing::info;

/// What a run changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSummary {
    pub added: Vec<String>,
    pub replaced: Vec<String>,
    pub scaled: Vec<String>,
    /// Mappings written to at least one Unicode character map
    pub mapped: usize,
    /// Mappings skipped because the glyph or a Unicode map was missing
    pub skipped_mappings: usize,
    pub glyph_count: usize,
}

impl fmt::Display for EditSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} glyphs added, {} replaced, {} scaled, {} mappings ({} skipped), {} glyphs total",
            self.added.len(),
            self.replaced.len(),
            self.scaled.len(),
            self.mapped,
            self.skipped_mappings,
            self.glyph_count
        )
    }
}

/// Apply every step of `plan` to `font`
///
/// Stops at the first failing step; the font may then be partly edited and
/// should not be saved.
pub fn apply_plan(font: &mut FontData, plan: &EditPlan) -> Result<EditSummary, EditError> {
    let mut summary = EditSummary::default();

    for recipe in &plan.accents {
        match build_accented(font, recipe)? {
            GlyphChange::Added => summary.added.push(recipe.target.clone()),
            GlyphChange::Replaced => summary.replaced.push(recipe.target.clone()),
        }
    }

    for scale in &plan.scales {
        scale_glyph(font, &scale.glyph, scale.factor)?;
        summary.scaled.push(scale.glyph.clone());
    }

    for mapping in &plan.mappings {
        if add_unicode_mapping(font, mapping.codepoint, &mapping.glyph)? {
            summary.mapped += 1;
        } else {
            summary.skipped_mappings += 1;
        }
    }

    summary.glyph_count = font.update_glyph_count();
    Ok(summary)
}

/// Run the whole edit and return the line to report on stdout
pub fn run(cli_args: &CliArgs) -> Result<String> {
    cli_args.validate().map_err(anyhow::Error::msg)?;
    let plan = cli_args.edit_plan()?;

    let mut font = FontFile::open(&cli_args.font)
        .with_context(|| format!("Failed to load font {}", cli_args.font.display()))?;
    let summary = apply_plan(font.data_mut(), &plan).context("Failed to apply the edit plan")?;
    info!("{}", summary);

    let output = cli_args.output_path();
    if cli_args.dry_run {
        // compile without writing
        font.to_bytes().context("Failed to compile the edited font")?;
        return Ok(format!("Dry run: {} not written", output.display()));
    }

    font.save(output)
        .with_context(|| format!("Failed to save font {}", output.display()))?;
    Ok(format!("Updated font saved to {}", output.display()))
}

/// Create and run the application with the given CLI arguments.
pub fn run_app(cli_args: CliArgs) -> Result<()> {
    let message = run(&cli_args)?;
    println!("{message}");
    Ok(())
}
