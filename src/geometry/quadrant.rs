//! Quadrant system for picking anchor positions on a bounding box
//!
//! This module provides a 9-point grid (like a tic-tac-toe board) over a
//! glyph's bounding box. Accent transforms use it to choose the origin that
//! rotation and scaling pivot around.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Nine positions on a bounding box
///
/// ```text
/// TopLeft     Top     TopRight
/// Left        Center  Right
/// BottomLeft  Bottom  BottomRight
/// ```
///
/// Font coordinates grow upward, so "top" is the box's maximum y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    #[default]
    Center,
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl Quadrant {
    /// The point of `rect` this quadrant refers to
    pub fn point_in_rect(self, rect: Rect) -> Point {
        let center = rect.center();
        let (x0, y0, x1, y1) = (rect.min_x(), rect.min_y(), rect.max_x(), rect.max_y());
        match self {
            Quadrant::Center => center,
            Quadrant::TopLeft => Point::new(x0, y1),
            Quadrant::Top => Point::new(center.x, y1),
            Quadrant::TopRight => Point::new(x1, y1),
            Quadrant::Right => Point::new(x1, center.y),
            Quadrant::BottomRight => Point::new(x1, y0),
            Quadrant::Bottom => Point::new(center.x, y0),
            Quadrant::BottomLeft => Point::new(x0, y0),
            Quadrant::Left => Point::new(x0, center.y),
        }
    }
}

/// The pivot used when rotating or scaling an accent
///
/// In an edit plan this is written either as a quadrant name
/// (`"bottom_right"`) or as an explicit point (`{"x": 10.0, "y": 400.0}`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RotateOrigin {
    Quadrant(Quadrant),
    Point(Point),
}

impl Default for RotateOrigin {
    fn default() -> Self {
        RotateOrigin::Quadrant(Quadrant::Center)
    }
}

impl RotateOrigin {
    /// Resolve the pivot against the bounding box of the shape being transformed
    pub fn resolve(self, bounds: Rect) -> Point {
        match self {
            RotateOrigin::Quadrant(quadrant) => quadrant.point_in_rect(bounds),
            RotateOrigin::Point(point) => point,
        }
    }
}

impl From<Quadrant> for RotateOrigin {
    fn from(quadrant: Quadrant) -> Self {
        RotateOrigin::Quadrant(quadrant)
    }
}
