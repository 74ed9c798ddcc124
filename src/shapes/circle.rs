use crate::math::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub radius: f64,
}

impl Circle {
    pub fn new(radius: f64) -> Self {
        assert!(radius >= 0.0, "Circle radius cannot be negative");
        Self { radius }
    }

    /// Projects a circle centred at `center` onto `axis`, returning `(min, max)`.
    pub fn project(&self, center: Vec2, axis: Vec2) -> (f64, f64) {
        let center_proj = axis.dot(center);
        (center_proj - self.radius, center_proj + self.radius)
    }
}
