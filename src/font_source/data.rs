//! The in-memory font that every edit operates on
//!
//! [`FontData`] is the editing context: it owns the glyph order, the glyph
//! table, the horizontal metrics, and the character maps. Operations take it
//! by `&mut` reference; nothing is shared or global.

use crate::core::errors::EditError;
use crate::font_source::charmap::CharacterMap;
use crate::font_source::metrics::HorizontalMetric;
use crate::font_source::outline::Outline;
use crate::geometry::utilities::ot_round;
use kurbo::{Affine, Point, Vec2};
use std::collections::HashMap;
use tracing::debug;
use write_fonts::tables::glyf::{Bbox, CompositeGlyph};

/// Components may nest this deep before we give up
pub const MAX_NESTING_LEVEL: u8 = 64;

/// How a component is positioned inside its composite
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComponentAnchor {
    /// Move the component by a fixed offset
    Offset(Vec2),
    /// Move the component so its point `child` lands on point `parent` of
    /// the composite built so far
    Points { parent: usize, child: usize },
}

/// One component of a composite glyph
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentRef {
    pub base: String,
    /// The 2×2 part of the component transform; translation lives in `anchor`
    pub transform: Affine,
    pub anchor: ComponentAnchor,
    /// Offsets are run through `transform` as well (`SCALED_COMPONENT_OFFSET`)
    pub scaled_offset: bool,
}

/// A composite glyph
///
/// The compiled form is what gets written back; composites are never edited
/// in place, only read through [`FontData::flattened_outline`].
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeData {
    pub components: Vec<ComponentRef>,
    compiled: CompositeGlyph,
}

impl CompositeData {
    pub fn new(components: Vec<ComponentRef>, compiled: CompositeGlyph) -> Self {
        Self {
            components,
            compiled,
        }
    }

    pub fn compiled(&self) -> &CompositeGlyph {
        &self.compiled
    }

    pub fn bbox(&self) -> Bbox {
        self.compiled.bbox
    }
}

/// Everything the glyph table can hold for one glyph
#[derive(Debug, Clone, PartialEq)]
pub enum GlyphData {
    Empty,
    Simple(Outline),
    Composite(CompositeData),
}

/// The editable font
#[derive(Debug, Clone, Default)]
pub struct FontData {
    glyph_order: Vec<String>,
    glyphs: HashMap<String, GlyphData>,
    metrics: HashMap<String, HorizontalMetric>,
    charmaps: Vec<CharacterMap>,
    num_glyphs: usize,
}

impl FontData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn glyph_order(&self) -> &[String] {
        &self.glyph_order
    }

    pub fn contains_glyph(&self, name: &str) -> bool {
        self.glyphs.contains_key(name)
    }

    pub fn glyph(&self, name: &str) -> Option<&GlyphData> {
        self.glyphs.get(name)
    }

    /// Index of `name` in the glyph order
    pub fn glyph_id(&self, name: &str) -> Option<usize> {
        self.glyph_order.iter().position(|n| n == name)
    }

    pub fn metric(&self, name: &str) -> Option<HorizontalMetric> {
        self.metrics.get(name).copied()
    }

    pub fn set_metric(&mut self, name: &str, metric: HorizontalMetric) {
        self.metrics.insert(name.to_string(), metric);
    }

    /// Add a glyph as it was read from a font, appending it to the order
    pub fn insert_glyph(&mut self, name: &str, glyph: GlyphData, metric: HorizontalMetric) {
        self.glyphs.insert(name.to_string(), glyph);
        self.metrics.insert(name.to_string(), metric);
        self.ensure_glyph(name);
    }

    /// Replace the glyph table entry for `name`
    ///
    /// For outlines with points, the left side bearing follows the new
    /// x-min. Returns the previous entry.
    pub fn set_glyph(&mut self, name: &str, glyph: GlyphData) -> Option<GlyphData> {
        if let GlyphData::Simple(outline) = &glyph {
            if let (Some(bounds), Some(metric)) = (outline.bounds(), self.metrics.get_mut(name)) {
                metric.lsb = ot_round(bounds.min_x()) as i16;
            }
        }
        self.glyphs.insert(name.to_string(), glyph)
    }

    /// Append `name` to the glyph order unless it is already there
    ///
    /// Returns `true` if the order changed.
    pub fn ensure_glyph(&mut self, name: &str) -> bool {
        if self.glyph_order.iter().any(|n| n == name) {
            return false;
        }
        debug!("Appending '{}' to the glyph order", name);
        self.glyph_order.push(name.to_string());
        true
    }

    pub fn charmaps(&self) -> &[CharacterMap] {
        &self.charmaps
    }

    pub fn charmaps_mut(&mut self) -> &mut [CharacterMap] {
        &mut self.charmaps
    }

    pub fn add_charmap(&mut self, charmap: CharacterMap) {
        self.charmaps.push(charmap);
    }

    /// The stored total glyph count (the `maxp` value)
    pub fn num_glyphs(&self) -> usize {
        self.num_glyphs
    }

    /// Store the glyph order length as the total glyph count
    pub fn update_glyph_count(&mut self) -> usize {
        self.num_glyphs = self.glyph_order.len();
        self.num_glyphs
    }

    /// An owned, component-free copy of a glyph's outline
    ///
    /// Composite glyphs are decomposed recursively; the stored glyph is left
    /// untouched.
    pub fn flattened_outline(&self, name: &str) -> Result<Outline, EditError> {
        self.flatten(name, 0)
    }

    fn flatten(&self, name: &str, depth: u8) -> Result<Outline, EditError> {
        let glyph = self
            .glyphs
            .get(name)
            .ok_or_else(|| EditError::MissingGlyph(name.to_string()))?;

        let composite = match glyph {
            GlyphData::Empty => return Ok(Outline::default()),
            GlyphData::Simple(outline) => return Ok(outline.clone()),
            GlyphData::Composite(composite) => composite,
        };
        if depth >= MAX_NESTING_LEVEL {
            return Err(EditError::CompositeTooDeep {
                glyph: name.to_string(),
                limit: MAX_NESTING_LEVEL,
            });
        }

        let mut flat = Outline::default();
        for component in &composite.components {
            let mut child = self.flatten(&component.base, depth + 1)?;
            child.transform(component.transform);

            let offset = match component.anchor {
                ComponentAnchor::Offset(offset) if component.scaled_offset => {
                    linear_part(component.transform, offset)
                }
                ComponentAnchor::Offset(offset) => offset,
                ComponentAnchor::Points { parent, child: child_point } => {
                    let parent_pt = point_at(&flat, parent, name)?;
                    let child_pt = point_at(&child, child_point, name)?;
                    parent_pt - child_pt
                }
            };
            child.transform(Affine::translate(offset));
            flat.append(&child);
        }
        flat.recalc_bounds();
        Ok(flat)
    }
}

fn linear_part(affine: Affine, v: Vec2) -> Vec2 {
    let [a, b, c, d, _, _] = affine.as_coeffs();
    Vec2::new(a * v.x + c * v.y, b * v.x + d * v.y)
}

fn point_at(outline: &Outline, index: usize, glyph: &str) -> Result<Point, EditError> {
    outline
        .points()
        .get(index)
        .copied()
        .ok_or_else(|| EditError::ComponentPointOutOfRange {
            glyph: glyph.to_string(),
            index,
        })
}
