pub mod detection;
pub mod manifold;

// Re-export key types
pub use detection::{check_circle_circle, intersect_bodies};
pub use manifold::Manifold;
