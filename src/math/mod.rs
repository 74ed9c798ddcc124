pub mod intersection;
pub mod transform;
pub mod vec2;

pub use intersection::{determinant, line_intersection, LineIntersection};
pub use transform::Transform;
pub use vec2::Vec2;
