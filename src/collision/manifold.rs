use crate::math::Vec2;
use crate::objects::Body;

/// One detected contact between two bodies, created during detection and
/// consumed once by resolution within the same tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Manifold {
    pub collides: bool,
    /// Unit axis of minimum penetration, pointing from body 2 towards body 1.
    /// Zero when no separating axis was tested.
    pub normal: Vec2,
    /// Penetration depth along `normal`.
    pub intersection: f64,
    /// Approximate world-space contact point.
    pub contact_point: Vec2,
    /// World index of the body whose colliders supplied the axes.
    pub body1: usize,
    pub body2: usize,
}

impl Manifold {
    pub fn new(normal: Vec2, intersection: f64, contact_point: Vec2, body1: usize, body2: usize) -> Self {
        Self {
            collides: true,
            normal,
            intersection,
            contact_point,
            body1,
            body2,
        }
    }

    /// Placeholder reported when a circle collider is the axis source: it has
    /// no edges, so it claims a collision with infinite depth and no normal.
    /// The opposite test direction always wins the smaller-depth selection.
    pub fn unresolved(body1: usize, body2: usize) -> Self {
        Self::new(Vec2::ZERO, f64::INFINITY, Vec2::ZERO, body1, body2)
    }

    /// True when there is no usable normal; solving such a manifold does nothing.
    pub fn is_degenerate(&self) -> bool {
        self.normal.is_zero()
    }

    /// Impulse magnitude along `normal` for the bodies' current velocities.
    ///
    /// Uses `min` of the elasticities as restitution and only the linear
    /// inverse masses in the denominator.
    pub fn impulse_scale(&self, body1: &Body, body2: &Body) -> f64 {
        let relative_velocity = body2.velocity - body1.velocity;
        let restitution = body1.elasticity.min(body2.elasticity);

        let numerator = self.normal.dot(relative_velocity * -(1.0 + restitution));
        let denominator = body1.inverse_mass() + body2.inverse_mass();

        let (angular1, angular2) = self.angular_terms(body1, body2);
        log::trace!(
            "impulse bodies {}/{}: restitution={:.3} inv_mass_sum={:.6} angular terms {:.6}/{:.6} (not applied)",
            self.body1,
            self.body2,
            restitution,
            denominator,
            angular1,
            angular2
        );

        if denominator == 0.0 {
            log::warn!(
                "bodies {} and {} both have infinite mass, skipping impulse",
                self.body1,
                self.body2
            );
            return 0.0;
        }

        numerator / denominator
    }

    // (r x n)^2 / I for each body. Rotational response is not applied, so
    // these only feed diagnostics.
    fn angular_terms(&self, body1: &Body, body2: &Body) -> (f64, f64) {
        let contact1 = self.contact_point - body1.position;
        let contact2 = self.contact_point - body2.position;
        let arm1 = contact1.cross(self.normal);
        let arm2 = contact2.cross(self.normal);
        (
            arm1 * arm1 * body1.inverse_inertia(),
            arm2 * arm2 * body2.inverse_inertia(),
        )
    }

    /// Pushes each non-static body half the penetration depth apart along the normal.
    pub fn position_correction(&self, body1: &mut Body, body2: &mut Body) {
        let half = self.normal * (self.intersection * 0.5);
        if !body1.is_static {
            body1.position += half;
        }
        if !body2.is_static {
            body2.position -= half;
        }
    }

    /// Applies the impulse to the linear velocity of each non-static body.
    /// Angular velocity is left alone.
    pub fn impulse_correction(&self, body1: &mut Body, body2: &mut Body) {
        let impulse = self.impulse_scale(body1, body2);
        if !body1.is_static {
            body1.velocity -= self.normal * (impulse / body1.mass);
        }
        if !body2.is_static {
            body2.velocity += self.normal * (impulse / body2.mass);
        }
    }

    /// Positional correction followed by impulse correction.
    ///
    /// No-op for a degenerate manifold or when either body is a trigger.
    pub fn solve(&self, body1: &mut Body, body2: &mut Body) {
        if self.is_degenerate() {
            return;
        }
        if body1.is_trigger || body2.is_trigger {
            return;
        }

        self.position_correction(body1, body2);
        self.impulse_correction(body1, body2);
    }
}
