use crate::{
    collision::Manifold,
    config::{ConfigError, WorldConfig},
    integration::integrator,
    objects::Body,
};

use super::stepper::FixedStepper;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    #[error("no body with id {id} (world holds {len} bodies)")]
    UnknownBody { id: usize, len: usize },
}

/// Owns every body and drives the per-tick pipeline:
/// detection, then resolution, then integration.
///
/// A body's `id` always equals its index in the body list.
pub struct World {
    bodies: Vec<Body>,
    // Manifolds found by the current tick's detection; empty between ticks.
    collisions: Vec<Manifold>,
    config: WorldConfig,
    stepper: Option<FixedStepper>,
}

impl World {
    /// Creates an empty world with the default configuration.
    pub fn new() -> Self {
        Self {
            bodies: Vec::new(),
            collisions: Vec::new(),
            config: WorldConfig::default(),
            stepper: None,
        }
    }

    pub fn with_config(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let stepper = config
            .fixed_timestep
            .map(|step| FixedStepper::new(step, config.max_substeps));
        Ok(Self {
            bodies: Vec::new(),
            collisions: Vec::new(),
            config,
            stepper,
        })
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Adds a body, assigning it the next sequential id, and returns it.
    pub fn register_body(&mut self, mut body: Body) -> &mut Body {
        let id = self.bodies.len();
        body.id = id;
        log::debug!("registered body {} with {} collider(s)", id, body.collider_count());
        self.bodies.push(body);
        &mut self.bodies[id]
    }

    /// Builds a collider-less body from the configured defaults and registers it.
    pub fn create_body(&mut self, x: f64, y: f64, rotation: f64, mass: f64) -> &mut Body {
        let body = Body::with_defaults(x, y, rotation, mass, &self.config.body_defaults);
        self.register_body(body)
    }

    /// Removes the body with `id` and shifts every later id down by one.
    ///
    /// Panics if `id` is out of range.
    pub fn delete_body(&mut self, id: usize) -> Body {
        let mut removed = self.bodies.remove(id);
        removed.id = Body::UNREGISTERED;

        for body in &mut self.bodies[id..] {
            body.id -= 1;
        }

        log::debug!("deleted body {}, {} remain", id, self.bodies.len());
        removed
    }

    pub fn try_delete_body(&mut self, id: usize) -> Result<Body, WorldError> {
        if id >= self.bodies.len() {
            return Err(WorldError::UnknownBody { id, len: self.bodies.len() });
        }
        Ok(self.delete_body(id))
    }

    pub fn body(&self, id: usize) -> Option<&Body> {
        self.bodies.get(id)
    }

    pub fn body_mut(&mut self, id: usize) -> Option<&mut Body> {
        self.bodies.get_mut(id)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Mutable access to the bodies. A slice, so ids cannot be invalidated.
    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Manifolds awaiting resolution. Only non-empty between
    /// [`World::detect_collisions`] and [`World::resolve_collisions`].
    pub fn collisions(&self) -> &[Manifold] {
        &self.collisions
    }

    /// Tests every pair `i < k`, fires callbacks and queues manifolds.
    ///
    /// A non-collidable first body ends its row of pairs; a non-collidable
    /// second body skips just that pair. For each manifold combination of
    /// the two test directions the shallower one is queued.
    pub fn detect_collisions(&mut self) {
        let count = self.bodies.len();

        for i in 0..count {
            for k in (i + 1)..count {
                if !self.bodies[i].collidable {
                    break;
                }
                if !self.bodies[k].collidable {
                    continue;
                }

                let manifolds_a = self.bodies[i].intersects(&self.bodies[k]);
                let manifolds_b = self.bodies[k].intersects(&self.bodies[i]);
                log::trace!(
                    "pair {}/{}: {} and {} manifold(s)",
                    i,
                    k,
                    manifolds_a.len(),
                    manifolds_b.len()
                );

                if manifolds_a.is_empty() || manifolds_b.is_empty() {
                    continue;
                }

                {
                    let (body_i, body_k) = get_mutable_body_pair(&mut self.bodies, i, k);
                    Body::notify_collision(body_i, body_k);
                    Body::notify_collision(body_k, body_i);
                }

                for m1 in &manifolds_a {
                    for m2 in &manifolds_b {
                        let shallower = if m1.intersection < m2.intersection {
                            Manifold { body1: i, body2: k, ..*m1 }
                        } else {
                            Manifold { body1: k, body2: i, ..*m2 }
                        };
                        self.collisions.push(shallower);
                    }
                }

                log::debug!(
                    "bodies {} and {} collide, {} manifold(s) queued",
                    i,
                    k,
                    manifolds_a.len() * manifolds_b.len()
                );
            }
        }
    }

    /// Solves queued manifolds in insertion order, single pass, then clears the queue.
    pub fn resolve_collisions(&mut self) {
        let collisions = std::mem::take(&mut self.collisions);

        for manifold in &collisions {
            let (body1, body2) = get_mutable_body_pair(&mut self.bodies, manifold.body1, manifold.body2);
            log::trace!(
                "solving {}/{}: normal={:?} depth={:.4}",
                manifold.body1,
                manifold.body2,
                manifold.normal,
                manifold.intersection
            );
            manifold.solve(body1, body2);
        }
    }

    /// Integrates every body by `dt`.
    pub fn integrate(&mut self, dt: f64) {
        for body in self.bodies.iter_mut() {
            integrator::integrate(body, dt);
        }
    }

    /// Advances the simulation by one tick of `dt`.
    ///
    /// `dt` is used as given, negative values included. A zero `dt` does nothing.
    pub fn update(&mut self, dt: f64) {
        if dt == 0.0 {
            log::trace!("update skipped for dt={}", dt);
            return;
        }

        self.detect_collisions();
        self.resolve_collisions();
        self.integrate(dt);
    }

    /// Advances by a frame's worth of time and returns the number of ticks run.
    ///
    /// With a configured `fixed_timestep` the frame time is accumulated and
    /// spent in fixed ticks; otherwise this is a single `update(frame_dt)`.
    pub fn advance(&mut self, frame_dt: f64) -> usize {
        let (ticks, dt) = match self.stepper.as_mut() {
            Some(stepper) => (stepper.accumulate(frame_dt), stepper.timestep()),
            None if frame_dt != 0.0 => (1, frame_dt),
            None => (0, frame_dt),
        };

        for _ in 0..ticks {
            self.update(dt);
        }
        ticks
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Mutable references to two different bodies of the slice, in argument order.
///
/// Panics if the indices are equal or out of bounds.
fn get_mutable_body_pair(bodies: &mut [Body], idx_a: usize, idx_b: usize) -> (&mut Body, &mut Body) {
    assert_ne!(idx_a, idx_b, "a body cannot collide with itself");

    if idx_a < idx_b {
        let (slice_a, slice_b) = bodies.split_at_mut(idx_b);
        (&mut slice_a[idx_a], &mut slice_b[0])
    } else {
        let (slice_b, slice_a) = bodies.split_at_mut(idx_a);
        (&mut slice_a[0], &mut slice_b[idx_b])
    }
}
