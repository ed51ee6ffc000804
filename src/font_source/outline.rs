//! Flat TrueType outlines
//!
//! An [`Outline`] is the editable form of a simple glyph: every point of
//! every contour in one list, the indices where contours end, one flag per
//! point, and the glyph's hinting program. Points are kept as `f64` while
//! editing and only rounded to font units when the font is written.

use crate::core::errors::EditError;
use crate::geometry::points_bounds;
use kurbo::{Affine, Point, Rect};

/// Per-point flags of a simple glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PointFlags(u8);

impl PointFlags {
    pub const ON_CURVE: u8 = 0x01;

    pub fn on_curve() -> Self {
        PointFlags(Self::ON_CURVE)
    }

    pub fn off_curve() -> Self {
        PointFlags(0)
    }

    pub fn from_on_curve(on_curve: bool) -> Self {
        if on_curve {
            Self::on_curve()
        } else {
            Self::off_curve()
        }
    }

    pub fn is_on_curve(self) -> bool {
        self.0 & Self::ON_CURVE != 0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

/// A simple glyph outline
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outline {
    points: Vec<Point>,
    end_points: Vec<usize>,
    flags: Vec<PointFlags>,
    instructions: Vec<u8>,
    bounds: Option<Rect>,
}

impl Outline {
    /// Build an outline from its raw parts, checking the structural invariants
    pub fn new(
        points: Vec<Point>,
        end_points: Vec<usize>,
        flags: Vec<PointFlags>,
        instructions: Vec<u8>,
    ) -> Result<Self, EditError> {
        if flags.len() != points.len() {
            return Err(EditError::MalformedOutline(format!(
                "{} flags for {} points",
                flags.len(),
                points.len()
            )));
        }
        if !end_points.windows(2).all(|pair| pair[0] < pair[1]) {
            return Err(EditError::MalformedOutline(
                "contour end indices are not strictly increasing".to_string(),
            ));
        }
        match end_points.last() {
            Some(last) if *last + 1 != points.len() => {
                return Err(EditError::MalformedOutline(format!(
                    "last contour ends at {last} but there are {} points",
                    points.len()
                )));
            }
            None if !points.is_empty() => {
                return Err(EditError::MalformedOutline(
                    "points without any contour".to_string(),
                ));
            }
            _ => {}
        }

        let bounds = points_bounds(&points);
        Ok(Self {
            points,
            end_points,
            flags,
            instructions,
            bounds,
        })
    }

    /// Build an outline from contours of `(point, on_curve)` pairs
    pub fn from_contours<I, C>(contours: I) -> Result<Self, EditError>
    where
        I: IntoIterator<Item = C>,
        C: IntoIterator<Item = (Point, bool)>,
    {
        let mut points = Vec::new();
        let mut flags = Vec::new();
        let mut end_points = Vec::new();
        for contour in contours {
            let start = points.len();
            for (point, on_curve) in contour {
                points.push(point);
                flags.push(PointFlags::from_on_curve(on_curve));
            }
            if points.len() == start {
                return Err(EditError::MalformedOutline("empty contour".to_string()));
            }
            end_points.push(points.len() - 1);
        }
        Self::new(points, end_points, flags, Vec::new())
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn end_points(&self) -> &[usize] {
        &self.end_points
    }

    pub fn flags(&self) -> &[PointFlags] {
        &self.flags
    }

    pub fn instructions(&self) -> &[u8] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn number_of_contours(&self) -> usize {
        self.end_points.len()
    }

    /// Bounding box as of the last [`recalc_bounds`](Self::recalc_bounds)
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Bounding box of the current points
    pub fn calc_bounds(&self) -> Option<Rect> {
        points_bounds(&self.points)
    }

    pub fn recalc_bounds(&mut self) {
        self.bounds = self.calc_bounds();
    }

    /// Iterate contours as `(points, flags)` slices
    pub fn contours(&self) -> impl Iterator<Item = (&[Point], &[PointFlags])> + '_ {
        let starts = std::iter::once(0).chain(self.end_points.iter().map(|end| end + 1));
        starts
            .zip(self.end_points.iter())
            .map(move |(start, end)| (&self.points[start..=*end], &self.flags[start..=*end]))
    }

    /// Apply `affine` to every point
    ///
    /// Bounds are left alone; callers recompute them once they are done.
    pub fn transform(&mut self, affine: Affine) {
        for point in &mut self.points {
            *point = affine * *point;
        }
    }

    /// Append `other`'s contours after this outline's contours
    pub fn append(&mut self, other: &Outline) {
        let offset = self.points.len();
        self.points.extend_from_slice(&other.points);
        self.flags.extend_from_slice(&other.flags);
        self.end_points
            .extend(other.end_points.iter().map(|end| end + offset));
    }

    /// Drop the hinting program
    pub fn clear_instructions(&mut self) {
        self.instructions.clear();
    }
}

#[cfg(test)]
pub(crate) fn rect_outline(x0: f64, y0: f64, x1: f64, y1: f64) -> Outline {
    Outline::from_contours([[
        (Point::new(x0, y0), true),
        (Point::new(x0, y1), true),
        (Point::new(x1, y1), true),
        (Point::new(x1, y0), true),
    ]])
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_flags() {
        let result = Outline::new(
            vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
            vec![1],
            vec![PointFlags::on_curve()],
            Vec::new(),
        );
        assert!(matches!(result, Err(EditError::MalformedOutline(_))));
    }

    #[test]
    fn rejects_bad_end_points() {
        let points = vec![Point::ORIGIN; 4];
        let flags = vec![PointFlags::on_curve(); 4];
        assert!(Outline::new(points.clone(), vec![2, 1, 3], flags.clone(), vec![]).is_err());
        assert!(Outline::new(points.clone(), vec![1, 2], flags.clone(), vec![]).is_err());
        assert!(Outline::new(points, vec![1, 3], flags, vec![]).is_ok());
    }

    #[test]
    fn append_offsets_contour_ends() {
        let mut base = rect_outline(0.0, 0.0, 10.0, 10.0);
        let mut other = rect_outline(20.0, 20.0, 30.0, 30.0);
        other.append(&rect_outline(40.0, 40.0, 50.0, 50.0));

        base.append(&other);
        assert_eq!(base.len(), 12);
        assert_eq!(base.number_of_contours(), 3);
        assert_eq!(base.end_points(), &[3, 7, 11]);
        assert_eq!(base.flags().len(), 12);

        let contours: Vec<_> = base.contours().collect();
        assert_eq!(contours.len(), 3);
        assert_eq!(contours[2].0[0], Point::new(40.0, 40.0));
    }

    #[test]
    fn bounds_follow_recalc() {
        let mut outline = rect_outline(0.0, 0.0, 10.0, 20.0);
        assert_eq!(outline.bounds(), Some(Rect::new(0.0, 0.0, 10.0, 20.0)));

        outline.transform(Affine::translate((5.0, -5.0)));
        assert_eq!(outline.bounds(), Some(Rect::new(0.0, 0.0, 10.0, 20.0)));
        outline.recalc_bounds();
        assert_eq!(outline.bounds(), Some(Rect::new(5.0, -5.0, 15.0, 15.0)));
    }

    #[test]
    fn mixed_flags_survive() {
        let outline = Outline::from_contours([[
            (Point::new(0.0, 0.0), true),
            (Point::new(5.0, 10.0), false),
            (Point::new(10.0, 0.0), true),
        ]])
        .unwrap();
        let on_curve: Vec<_> = outline.flags().iter().map(|f| f.is_on_curve()).collect();
        assert_eq!(on_curve, vec![true, false, true]);
    }
}
