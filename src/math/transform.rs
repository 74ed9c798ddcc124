use super::vec2::Vec2;

/// A rotation followed by a translation. Rotation is in degrees.
///
/// Colliders use one of these for their offset inside the body, bodies use
/// one for their placement in the world. A world-space vertex is produced by
/// applying the collider transform and then the body transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub rotation: f64,
}

impl Transform {
    pub fn new(position: Vec2, rotation: f64) -> Self {
        Self { position, rotation }
    }

    pub fn identity() -> Self {
        Self::new(Vec2::ZERO, 0.0)
    }

    /// Rotates `point` about the origin, then translates it by `position`.
    pub fn apply(self, point: Vec2) -> Vec2 {
        point.rotate_degrees(self.rotation) + self.position
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
