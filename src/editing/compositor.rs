//! Accented glyph synthesis
//!
//! Builds a new glyph from a base letter and an accent-shaped source glyph
//! (usually a quote mark). The accent is optionally mirrored, scaled and
//! rotated, then centered over the base at a fixed gap above it, and the two
//! outlines are merged into one simple glyph.

use crate::core::errors::EditError;
use crate::editing::GlyphChange;
use crate::font_source::{FontData, GlyphData, Outline};
use crate::geometry::utilities::{integral_offset, round_offset};
use crate::geometry::{about_origin, flip_x_about, scale_then_rotate, RotateOrigin};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// How the accent shape is transformed before placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccentTransform {
    /// Mirror horizontally about the accent's own center
    pub flip_x: bool,
    /// Counter-clockwise rotation in degrees
    pub rotate_deg: f64,
    /// Uniform scale, applied before rotation
    pub scale: f64,
    /// Extra horizontal shift after centering, in font units
    pub x_shift: i32,
    /// Extra vertical shift after placement, in font units
    pub y_shift: i32,
    /// Pivot for scale and rotation
    pub rotate_origin: RotateOrigin,
}

impl Default for AccentTransform {
    fn default() -> Self {
        Self {
            flip_x: false,
            rotate_deg: 0.0,
            scale: 1.0,
            x_shift: 0,
            y_shift: 0,
            rotate_origin: RotateOrigin::default(),
        }
    }
}

impl AccentTransform {
    /// Whether the scale/rotate step does anything
    pub fn rotates_or_scales(&self) -> bool {
        self.rotate_deg != 0.0 || self.scale != 1.0
    }
}

/// One accented glyph to build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccentRecipe {
    /// Name of the glyph to create or replace
    pub target: String,
    pub base: String,
    /// Glyph whose outline becomes the accent
    pub accent: String,
    /// Distance between the top of the base and the bottom of the accent
    pub gap: i32,
    #[serde(default)]
    pub transform: AccentTransform,
}

impl AccentRecipe {
    pub fn new(
        target: impl Into<String>,
        base: impl Into<String>,
        accent: impl Into<String>,
        gap: i32,
    ) -> Self {
        Self {
            target: target.into(),
            base: base.into(),
            accent: accent.into(),
            gap,
            transform: AccentTransform::default(),
        }
    }

    pub fn with_transform(mut self, transform: AccentTransform) -> Self {
        self.transform = transform;
        self
    }
}

/// Merge `base` and a transformed, positioned copy of `accent`
///
/// Neither input is modified. The result has the base contours first, then
/// the accent contours, fresh bounds, and no hinting program.
pub fn compose_outlines(
    base: &Outline,
    accent: &Outline,
    recipe: &AccentRecipe,
) -> Result<Outline, EditError> {
    let base_bounds = base
        .calc_bounds()
        .ok_or_else(|| EditError::EmptyOutline(recipe.base.clone()))?;
    let empty_accent = || EditError::EmptyOutline(recipe.accent.clone());

    let transform = &recipe.transform;
    let mut accent = accent.clone();
    let mut accent_bounds = accent.calc_bounds().ok_or_else(empty_accent)?;

    if transform.flip_x {
        accent.transform(flip_x_about(accent_bounds.center().x));
        accent_bounds = accent.calc_bounds().ok_or_else(empty_accent)?;
    }

    if transform.rotates_or_scales() {
        let origin = transform.rotate_origin.resolve(accent_bounds);
        accent.transform(about_origin(
            origin,
            scale_then_rotate(transform.scale, transform.rotate_deg),
        ));
        accent_bounds = accent.calc_bounds().ok_or_else(empty_accent)?;
    }

    let dx = round_offset(base_bounds.center().x - accent_bounds.center().x)
        + transform.x_shift as f64;
    let dy = round_offset(base_bounds.max_y() + recipe.gap as f64 - accent_bounds.min_y())
        + transform.y_shift as f64;
    debug!(
        "Placing '{}' over '{}' at offset ({}, {})",
        recipe.accent, recipe.base, dx, dy
    );
    accent.transform(integral_offset(dx, dy));

    let mut merged = base.clone();
    merged.append(&accent);
    merged.recalc_bounds();
    merged.clear_instructions();
    Ok(merged)
}

/// Build `recipe.target` in `font`
///
/// The target takes the base glyph's horizontal metrics and is appended to
/// the glyph order if it is new. Running the same recipe again replaces the
/// glyph without touching the order.
pub fn build_accented(
    font: &mut FontData,
    recipe: &AccentRecipe,
) -> Result<GlyphChange, EditError> {
    let base = font.flattened_outline(&recipe.base)?;
    let accent = font.flattened_outline(&recipe.accent)?;
    let merged = compose_outlines(&base, &accent, recipe)?;
    let point_count = merged.len();

    let metric = font.metric(&recipe.base).unwrap_or_default();
    font.set_metric(&recipe.target, metric);
    let previous = font.set_glyph(&recipe.target, GlyphData::Simple(merged));
    font.ensure_glyph(&recipe.target);

    let change = if previous.is_some() {
        GlyphChange::Replaced
    } else {
        GlyphChange::Added
    };
    info!(
        "{} '{}' from '{}' + '{}' ({} points)",
        change, recipe.target, recipe.base, recipe.accent, point_count
    );
    Ok(change)
}
