use std::fmt;

use crate::collision::{self, Manifold};
use crate::config::BodyDefaults;
use crate::math::{Transform, Vec2};
use crate::shapes::Collider;

/// Called once per colliding pair per tick as `callback(self, other)`.
pub type CollisionCallback = Box<dyn FnMut(&mut Body, &mut Body)>;

/// A rigid body: transform, motion state, mass properties and colliders.
///
/// Rotation is in degrees and angular velocity in degrees per unit time.
/// A mass of `f64::INFINITY` makes the body immovable by impulses.
pub struct Body {
    /// Index in the owning world's body list, [`Body::UNREGISTERED`] until registered.
    pub id: usize,

    // Linear state (world space)
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,

    // Angular state. Tracked and integrated, never touched by collision response.
    pub rotation: f64,
    pub angular_velocity: f64,
    pub torque: f64,

    pub mass: f64,
    pub inertia: f64,
    /// Restitution, combined with the other body's via `min`.
    pub elasticity: f64,

    /// Collision response never moves a static body.
    pub is_static: bool,
    /// Triggers are detected and get callbacks but are never resolved.
    pub is_trigger: bool,
    /// Non-collidable bodies are skipped by detection entirely.
    pub collidable: bool,

    pub on_collision: Option<CollisionCallback>,

    colliders: Vec<Collider>,
}

impl Body {
    pub const UNREGISTERED: usize = usize::MAX;

    /// Creates a body with no colliders. Attach them with [`Body::add_collider`].
    pub fn new(x: f64, y: f64, rotation: f64, mass: f64) -> Self {
        Self::with_defaults(x, y, rotation, mass, &BodyDefaults::default())
    }

    pub fn with_defaults(x: f64, y: f64, rotation: f64, mass: f64, defaults: &BodyDefaults) -> Self {
        Self {
            id: Self::UNREGISTERED,
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            rotation,
            angular_velocity: 0.0,
            torque: 0.0,
            mass,
            inertia: defaults.inertia,
            elasticity: defaults.elasticity,
            is_static: false,
            is_trigger: false,
            collidable: true,
            on_collision: None,
            colliders: Vec::new(),
        }
    }

    /// Body with a single box collider centred on its origin.
    pub fn new_box(x: f64, y: f64, width: f64, height: f64, rotation: f64, mass: f64) -> Self {
        let mut body = Self::new(x, y, rotation, mass);
        body.add_collider(Collider::new_box(0.0, 0.0, width, height, 0.0));
        body
    }

    /// Body with a single circle collider centred on its origin.
    pub fn new_circle(x: f64, y: f64, radius: f64, mass: f64) -> Self {
        let mut body = Self::new(x, y, 0.0, mass);
        body.add_collider(Collider::new_circle(0.0, 0.0, radius));
        body
    }

    /// Static, infinite-mass enclosure: four 50-unit-thick walls at
    /// `±width` / `±height` from the centre, overlapping at the corners.
    pub fn new_world_boundary(x: f64, y: f64, width: f64, height: f64, rotation: f64) -> Self {
        let mut body = Self::new(x, y, rotation, f64::INFINITY);
        body.is_static = true;

        body.add_collider(Collider::new_box(0.0, height, width + 200.0, 50.0, 0.0));
        body.add_collider(Collider::new_box(0.0, -height, width + 200.0, 50.0, 0.0));
        body.add_collider(Collider::new_box(width, 0.0, 50.0, height + 200.0, 0.0));
        body.add_collider(Collider::new_box(-width, 0.0, 50.0, height + 200.0, 0.0));
        body
    }

    /// Static regular polygon, used for fixed obstacles.
    pub fn new_obstacle(x: f64, y: f64, radius: f64, vertex_count: usize, mass: f64) -> Self {
        let mut body = Self::new(x, y, 0.0, mass);
        body.add_collider(Collider::new_regular_polygon(0.0, 0.0, radius, vertex_count));
        body.is_static = true;
        body
    }

    /// Attaches a collider and returns it for further setup.
    pub fn add_collider(&mut self, collider: Collider) -> &mut Collider {
        self.colliders.push(collider);
        let last = self.colliders.len() - 1;
        &mut self.colliders[last]
    }

    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.rotation)
    }

    /// World-space position of vertex `point` of collider `collider`.
    ///
    /// The collider transform is applied first, then the body transform.
    /// Panics if either index is out of range.
    pub fn get_point(&self, collider: usize, point: usize) -> Vec2 {
        let local = self.colliders[collider].get_point(point);
        self.transform().apply(local)
    }

    /// Every vertex of one collider in world space, in loop order.
    pub fn world_vertices(&self, collider: usize) -> Vec<Vec2> {
        (0..self.colliders[collider].vertex_count())
            .map(|point| self.get_point(collider, point))
            .collect()
    }

    /// Tests every collider of this body against every collider of `other`.
    ///
    /// Not symmetric: this body's edges supply the candidate separating axes.
    pub fn intersects(&self, other: &Body) -> Vec<Manifold> {
        collision::intersect_bodies(self, other)
    }

    /// Adds to the acceleration consumed by the next integration step.
    pub fn accelerate(&mut self, delta: Vec2) {
        self.acceleration += delta;
    }

    /// `1 / mass`, or zero for infinite mass.
    pub fn inverse_mass(&self) -> f64 {
        if self.mass.is_infinite() {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    /// `1 / inertia`, or zero for infinite inertia.
    pub fn inverse_inertia(&self) -> f64 {
        if self.inertia.is_infinite() {
            0.0
        } else {
            1.0 / self.inertia
        }
    }

    pub fn is_registered(&self) -> bool {
        self.id != Self::UNREGISTERED
    }

    pub fn set_collision_callback(&mut self, callback: impl FnMut(&mut Body, &mut Body) + 'static) {
        self.on_collision = Some(Box::new(callback));
    }

    /// Runs `this`'s callback as `callback(this, other)`.
    ///
    /// The callback is taken out for the call so it can borrow the body
    /// mutably; if it installed a replacement, the replacement wins.
    pub(crate) fn notify_collision(this: &mut Body, other: &mut Body) {
        if let Some(mut callback) = this.on_collision.take() {
            callback(this, other);
            if this.on_collision.is_none() {
                this.on_collision = Some(callback);
            }
        }
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body")
            .field("id", &self.id)
            .field("position", &self.position)
            .field("velocity", &self.velocity)
            .field("acceleration", &self.acceleration)
            .field("rotation", &self.rotation)
            .field("angular_velocity", &self.angular_velocity)
            .field("torque", &self.torque)
            .field("mass", &self.mass)
            .field("inertia", &self.inertia)
            .field("elasticity", &self.elasticity)
            .field("is_static", &self.is_static)
            .field("is_trigger", &self.is_trigger)
            .field("collidable", &self.collidable)
            .field("on_collision", &self.on_collision.is_some())
            .field("colliders", &self.colliders)
            .finish()
    }
}
