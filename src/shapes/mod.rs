pub mod circle;
pub mod collider;

pub use circle::Circle;
pub use collider::Collider;

use std::fmt;

/// The kind of shape a collider represents.
///
/// For vertex colliders this is derived purely from the vertex count;
/// circle colliders always report `Circle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Invalid,
    Point,
    Line,
    Polygon,
    Circle,
}

impl ShapeKind {
    pub fn from_vertex_count(count: usize) -> Self {
        match count {
            0 => ShapeKind::Invalid,
            1 => ShapeKind::Point,
            2 => ShapeKind::Line,
            _ => ShapeKind::Polygon,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Invalid => "invalid",
            ShapeKind::Point => "point",
            ShapeKind::Line => "line",
            ShapeKind::Polygon => "polygon",
            ShapeKind::Circle => "circle",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geometry variant carried by a collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    /// Ordered vertex loop (or a degenerate point/line).
    Polygon,
    /// Circle around the collider's single local point.
    Circle(Circle),
}
