//! Line intersection helpers used for contact point estimation.

use super::vec2::Vec2;

/// Determinant of the 2x2 matrix with rows `v1` and `v2`.
pub fn determinant(v1: Vec2, v2: Vec2) -> f64 {
    v1.cross(v2)
}

/// Where two infinite lines cross.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineIntersection {
    pub point: Vec2,
    /// Signed determinant of the two direction vectors. Larger means the
    /// lines cross at a steeper angle; contact estimation keeps the largest.
    pub overlap: f64,
}

/// Intersects the line through `s1`/`e1` with the line through `s2`/`e2`.
///
/// Returns `None` when the lines are parallel (zero determinant).
pub fn line_intersection(s1: Vec2, e1: Vec2, s2: Vec2, e2: Vec2) -> Option<LineIntersection> {
    let x_difference = Vec2::new(s1.x - e1.x, s2.x - e2.x);
    let y_difference = Vec2::new(s1.y - e1.y, s2.y - e2.y);
    let divisor = determinant(x_difference, y_difference);

    if divisor == 0.0 {
        return None;
    }

    let d = Vec2::new(determinant(s1, e1), determinant(s2, e2));
    let point = Vec2::new(
        determinant(d, x_difference) / divisor,
        determinant(d, y_difference) / divisor,
    );

    Some(LineIntersection { point, overlap: divisor })
}
