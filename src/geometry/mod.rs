//! Geometric Primitives and Operations

pub mod quadrant;
pub mod utilities;

// Re-export commonly used items
pub use quadrant::{Quadrant, RotateOrigin};
pub use utilities::{about_origin, flip_x_about, points_bounds, scale_then_rotate};
