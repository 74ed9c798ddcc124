//! Tick-based 2D rigid-body simulation.
//!
//! Bodies carry one or more colliders (vertex polygons or circles). Each
//! [`World::update`] detects overlapping pairs with a separating axis test,
//! resolves them with positional correction and a linear impulse, then
//! integrates every body with semi-implicit Euler. Rotations are in degrees.

pub mod collision;
pub mod config;
pub mod integration;
pub mod math;
pub mod objects;
pub mod shapes;
pub mod world;

// Re-export key types for easier use
pub use collision::Manifold;
pub use config::{BodyDefaults, ConfigError, WorldConfig};
pub use math::{Transform, Vec2};
pub use objects::{Body, CollisionCallback};
pub use shapes::{Circle, Collider, ShapeKind};
pub use world::{FixedStepper, World, WorldError};
