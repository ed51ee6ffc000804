//! In-place uniform scaling of existing glyphs

use crate::core::errors::EditError;
use crate::font_source::{FontData, GlyphData, Outline};
use crate::geometry::about_origin;
use kurbo::Affine;
use tracing::info;

/// Scale a copy of `outline` by `factor` about its own bounding-box center
///
/// Returns `None` for an outline without points.
pub fn scale_about_center(outline: &Outline, factor: f64) -> Option<Outline> {
    let center = outline.calc_bounds()?.center();
    let mut scaled = outline.clone();
    scaled.transform(about_origin(center, Affine::scale(factor)));
    scaled.recalc_bounds();
    scaled.clear_instructions();
    Some(scaled)
}

/// Replace glyph `name` with a copy scaled about its center
///
/// Composite glyphs are flattened first. Advance width, mappings, and glyph
/// order are left alone.
pub fn scale_glyph(font: &mut FontData, name: &str, factor: f64) -> Result<(), EditError> {
    let outline = font.flattened_outline(name)?;
    let scaled = scale_about_center(&outline, factor)
        .ok_or_else(|| EditError::EmptyOutline(name.to_string()))?;

    font.set_glyph(name, GlyphData::Simple(scaled));
    font.ensure_glyph(name);
    info!("Scaled '{}' by {}", name, factor);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_source::outline::rect_outline;
    use crate::font_source::{HorizontalMetric, PointFlags};
    use kurbo::Rect;

    fn font_with_numbersign() -> FontData {
        let mut font = FontData::new();
        let outline = Outline::new(
            rect_outline(100.0, 0.0, 500.0, 700.0).points().to_vec(),
            vec![3],
            vec![PointFlags::on_curve(); 4],
            vec![0xB0, 0x00],
        )
        .unwrap();
        font.insert_glyph(
            "numbersign",
            GlyphData::Simple(outline),
            HorizontalMetric::new(600, 100),
        );
        font.insert_glyph("space", GlyphData::Empty, HorizontalMetric::new(250, 0));
        font.update_glyph_count();
        font
    }

    #[test]
    fn scales_about_center() {
        let mut font = font_with_numbersign();
        scale_glyph(&mut font, "numbersign", 0.5).unwrap();

        let Some(GlyphData::Simple(outline)) = font.glyph("numbersign") else {
            panic!("numbersign should stay a simple glyph");
        };
        assert_eq!(outline.bounds(), Some(Rect::new(200.0, 175.0, 400.0, 525.0)));
        assert!(outline.instructions().is_empty());
        assert_eq!(outline.len(), 4);

        let metric = font.metric("numbersign").unwrap();
        assert_eq!(metric.advance, 600);
        assert_eq!(metric.lsb, 200);
        assert_eq!(font.glyph_order(), &["numbersign", "space"]);
    }

    #[test]
    fn scaling_compounds() {
        let mut font = font_with_numbersign();
        scale_glyph(&mut font, "numbersign", 0.92).unwrap();
        scale_glyph(&mut font, "numbersign", 0.92).unwrap();
        let Some(GlyphData::Simple(outline)) = font.glyph("numbersign") else {
            panic!("numbersign should stay a simple glyph");
        };
        let height = outline.bounds().unwrap().height();
        assert!((height - 700.0 * 0.92 * 0.92).abs() < 1e-9);
    }

    #[test]
    fn missing_or_empty_glyphs_fail() {
        let mut font = font_with_numbersign();
        assert!(matches!(
            scale_glyph(&mut font, "sterling", 0.9),
            Err(EditError::MissingGlyph(_))
        ));
        assert!(matches!(
            scale_glyph(&mut font, "space", 0.9),
            Err(EditError::EmptyOutline(_))
        ));
    }
}
