//! Geometry utility functions
//!
//! Shared helpers for bounds, rounding, and building the affine transforms
//! that the glyph editing operations apply.

use kurbo::{Affine, Point, Rect, Vec2};

/// The bounding box of a set of points, or `None` if there are no points
///
/// This is the box of the control points, which is what TrueType stores in
/// each glyph header.
pub fn points_bounds(points: &[Point]) -> Option<Rect> {
    let (first, rest) = points.split_first()?;
    Some(
        rest.iter()
            .fold(Rect::from_points(*first, *first), |rect, pt| rect.union_pt(*pt)),
    )
}

/// Round to the nearest integer, ties to even. Used for placement offsets.
pub fn round_offset(value: f64) -> f64 {
    value.round_ties_even()
}

/// OpenType rounding: ties go toward positive infinity
pub fn ot_round(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Wrap `affine` so that it acts around `origin` instead of (0, 0)
///
/// The result translates `origin` to zero, applies `affine`, and translates
/// back.
pub fn about_origin(origin: Point, affine: Affine) -> Affine {
    let offset = origin.to_vec2();
    Affine::translate(offset) * affine * Affine::translate(-offset)
}

/// Horizontal mirror around the vertical line `x = center_x`
pub fn flip_x_about(center_x: f64) -> Affine {
    about_origin(
        Point::new(center_x, 0.0),
        Affine::new([-1.0, 0.0, 0.0, 1.0, 0.0, 0.0]),
    )
}

/// Uniform scale followed by a counter-clockwise rotation in degrees
///
/// Scale is applied first; kurbo composes right to left.
pub fn scale_then_rotate(scale: f64, rotate_deg: f64) -> Affine {
    Affine::rotate(rotate_deg.to_radians()) * Affine::scale(scale)
}

/// Translation by whole font units
pub fn integral_offset(dx: f64, dy: f64) -> Affine {
    Affine::translate(Vec2::new(dx, dy))
}
