pub mod physics_world;
pub mod stepper;

pub use physics_world::{World, WorldError};
pub use stepper::FixedStepper;
