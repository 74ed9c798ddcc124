use super::{Circle, ColliderShape, ShapeKind};
use crate::math::{Transform, Vec2};

/// A shape attached to a body, described in body-local space.
///
/// `position` and `rotation` (degrees) place the collider inside its body.
/// Vertices are stored relative to the collider itself; [`Collider::get_point`]
/// resolves them into body space.
#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    pub position: Vec2,
    pub rotation: f64,
    vertices: Vec<Vec2>,
    shape: ColliderShape,
}

impl Collider {
    /// Creates an empty vertex collider. Add points with [`Collider::add_point`].
    pub fn new(x: f64, y: f64, rotation: f64) -> Self {
        Self {
            position: Vec2::new(x, y),
            rotation,
            vertices: Vec::new(),
            shape: ColliderShape::Polygon,
        }
    }

    /// Creates a circle collider centred at `(x, y)` in body space.
    ///
    /// The circle keeps a single local point at its origin so it goes through
    /// the same transform path as vertex colliders.
    pub fn new_circle(x: f64, y: f64, radius: f64) -> Self {
        let mut collider = Self {
            position: Vec2::new(x, y),
            rotation: 0.0,
            vertices: Vec::with_capacity(1),
            shape: ColliderShape::Circle(Circle::new(radius)),
        };
        collider.add_point(0.0, 0.0);
        collider
    }

    /// Axis-aligned box of `width` x `height` centred at `(x, y)`, wound so
    /// that every edge normal faces outward.
    pub fn new_box(x: f64, y: f64, width: f64, height: f64, rotation: f64) -> Self {
        let half_width = width / 2.0;
        let half_height = height / 2.0;

        let mut collider = Self::new(x, y, rotation);
        collider.add_point(-half_width, -half_height);
        collider.add_point(half_width, -half_height);
        collider.add_point(half_width, half_height);
        collider.add_point(-half_width, half_height);
        collider
    }

    /// Regular polygon with `vertex_count` corners, each placed by rotating
    /// `(radius, radius)` in equal angular steps.
    pub fn new_regular_polygon(x: f64, y: f64, radius: f64, vertex_count: usize) -> Self {
        let mut collider = Self::new(x, y, 0.0);
        for v in 0..vertex_count {
            let angle = (v as f64 / vertex_count as f64 * 360.0).to_radians();
            let (sin_r, cos_r) = angle.sin_cos();
            collider.add_point(
                cos_r * radius - sin_r * radius,
                sin_r * radius + cos_r * radius,
            );
        }
        collider
    }

    /// Appends a local vertex and returns its index.
    pub fn add_point(&mut self, x: f64, y: f64) -> usize {
        self.vertices.push(Vec2::new(x, y));
        self.vertices.len() - 1
    }

    /// Removes the vertex at `index` and returns it.
    ///
    /// A circle's centre point is fixed, so this returns `None` for circle
    /// colliders and leaves them untouched. Panics if `index` is out of range.
    pub fn remove_point(&mut self, index: usize) -> Option<Vec2> {
        if self.is_circle() {
            return None;
        }
        Some(self.vertices.remove(index))
    }

    /// Returns vertex `index` in body space: rotated by the collider's own
    /// rotation, then offset by its position.
    ///
    /// Panics if `index` is out of range.
    pub fn get_point(&self, index: usize) -> Vec2 {
        self.transform().apply(self.vertices[index])
    }

    pub fn get_type(&self) -> ShapeKind {
        match self.shape {
            ColliderShape::Circle(_) => ShapeKind::Circle,
            ColliderShape::Polygon => ShapeKind::from_vertex_count(self.vertices.len()),
        }
    }

    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.rotation)
    }

    pub fn shape(&self) -> ColliderShape {
        self.shape
    }

    /// The circle geometry, if this is a circle collider.
    pub fn circle(&self) -> Option<Circle> {
        match self.shape {
            ColliderShape::Circle(circle) => Some(circle),
            ColliderShape::Polygon => None,
        }
    }

    pub fn radius(&self) -> Option<f64> {
        self.circle().map(|c| c.radius)
    }

    pub fn is_circle(&self) -> bool {
        matches!(self.shape, ColliderShape::Circle(_))
    }

    /// Local vertices, before the collider transform is applied.
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_add_and_remove_points() {
        let mut c = Collider::new(0.0, 0.0, 0.0);
        assert_eq!(c.get_type(), ShapeKind::Invalid);

        assert_eq!(c.add_point(1.0, 0.0), 0);
        assert_eq!(c.get_type(), ShapeKind::Point);
        assert_eq!(c.add_point(0.0, 1.0), 1);
        assert_eq!(c.get_type(), ShapeKind::Line);
        assert_eq!(c.add_point(-1.0, 0.0), 2);
        assert_eq!(c.get_type(), ShapeKind::Polygon);

        let removed = c.remove_point(1);
        assert_eq!(removed, Some(Vec2::new(0.0, 1.0)));
        assert_eq!(c.vertices(), &[Vec2::new(1.0, 0.0), Vec2::new(-1.0, 0.0)]);
        assert_eq!(c.get_type(), ShapeKind::Line);
    }

    #[test]
    #[should_panic]
    fn test_remove_point_out_of_range() {
        let mut c = Collider::new(0.0, 0.0, 0.0);
        c.remove_point(0);
    }

    #[test]
    fn test_get_point_applies_offset_and_rotation() {
        let mut c = Collider::new(10.0, -5.0, 90.0);
        c.add_point(1.0, 0.0);
        let p = c.get_point(0);
        assert_abs_diff_eq!(p.x, 10.0, epsilon = EPSILON);
        assert_abs_diff_eq!(p.y, -4.0, epsilon = EPSILON);
    }

    #[test]
    fn test_circle_collider() {
        let c = Collider::new_circle(3.0, 4.0, 6.0);
        assert_eq!(c.get_type(), ShapeKind::Circle);
        assert_eq!(c.radius(), Some(6.0));
        assert_eq!(c.vertex_count(), 1);
        assert_eq!(c.get_point(0), Vec2::new(3.0, 4.0));
        assert!(c.is_circle());
    }

    #[test]
    fn test_circle_stays_circle_regardless_of_points() {
        let mut c = Collider::new_circle(0.0, 0.0, 1.0);
        c.add_point(1.0, 1.0);
        c.add_point(2.0, 2.0);
        assert_eq!(c.get_type(), ShapeKind::Circle);
    }

    #[test]
    fn test_circle_centre_point_cannot_be_removed() {
        let mut c = Collider::new_circle(3.0, 4.0, 6.0);
        assert_eq!(c.remove_point(0), None);
        assert_eq!(c.vertex_count(), 1);
        assert_eq!(c.get_point(0), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_box_collider_winding_gives_outward_normals() {
        let c = Collider::new_box(0.0, 0.0, 10.0, 4.0, 0.0);
        assert_eq!(c.get_type(), ShapeKind::Polygon);
        assert_eq!(c.radius(), None);

        let n = c.vertex_count();
        for i in 0..n {
            let start = c.get_point(i);
            let end = c.get_point((i + 1) % n);
            let normal = (end - start).perpendicular_cw().normalize();
            let edge_mid = start.midpoint(end);
            // Outward: the normal points away from the centre.
            assert!(normal.dot(edge_mid) > 0.0, "edge {} normal {:?} faces inward", i, normal);
        }
    }

    #[test]
    fn test_regular_polygon_vertices_lie_on_circle() {
        let c = Collider::new_regular_polygon(0.0, 0.0, 10.0, 5);
        assert_eq!(c.vertex_count(), 5);
        // Each vertex is (radius, radius) rotated, so sits at radius * sqrt(2).
        for v in c.vertices() {
            assert_abs_diff_eq!(v.magnitude(), 10.0 * 2f64.sqrt(), epsilon = EPSILON);
        }
        assert_abs_diff_eq!(c.vertices()[0].x, 10.0, epsilon = EPSILON);
        assert_abs_diff_eq!(c.vertices()[0].y, 10.0, epsilon = EPSILON);
    }
}
