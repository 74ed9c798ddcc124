use crate::math::Vec2;
use crate::objects::Body;

/// Advances one body by `dt` using semi-implicit Euler.
///
/// Velocity is updated from acceleration first and position from the new
/// velocity; the angular state follows the same pattern with torque. Both
/// accumulators are cleared afterwards. Static bodies are integrated too,
/// the flag only shields them from collision response.
pub fn integrate(body: &mut Body, dt: f64) {
    // --- Linear Motion --- //
    body.velocity += body.acceleration * dt;
    body.position += body.velocity * dt;
    body.acceleration = Vec2::ZERO;

    // --- Angular Motion --- //
    body.angular_velocity += body.torque * dt;
    body.rotation += body.angular_velocity * dt;
    body.torque = 0.0;
}
