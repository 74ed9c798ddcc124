use crate::math::{line_intersection, Vec2};
use crate::objects::Body;
use crate::shapes::Circle;

use super::manifold::Manifold;

/// Narrow phase for one direction of a body pair.
///
/// Every collider of `body_a` is tested against every collider of `body_b`.
/// Only `body_a`'s edges are used as candidate separating axes, so callers
/// wanting a full test run it both ways and keep the shallower result.
///
/// Two circle colliders end the whole test immediately with their result.
/// A circle collider on `body_a` against anything else also ends the test,
/// returning [`Manifold::unresolved`].
pub fn intersect_bodies(body_a: &Body, body_b: &Body) -> Vec<Manifold> {
    let mut manifolds = Vec::new();

    for (collider_a, a) in body_a.colliders().iter().enumerate() {
        for (collider_b, b) in body_b.colliders().iter().enumerate() {
            match (a.circle(), b.circle()) {
                (Some(circle_a), Some(circle_b)) => {
                    return check_circle_circle(body_a, collider_a, &circle_a, body_b, collider_b, &circle_b)
                        .into_iter()
                        .collect();
                }
                (Some(_), None) => {
                    return vec![Manifold::unresolved(body_a.id, body_b.id)];
                }
                (None, circle_b) => {
                    if let Some(manifold) = check_polygon(body_a, collider_a, body_b, collider_b, circle_b) {
                        manifolds.push(manifold);
                    }
                }
            }
        }
    }

    manifolds
}

/// Circle against circle by centre distance.
///
/// The normal points from B's centre to A's centre and the contact point is
/// the midpoint between the centres.
pub fn check_circle_circle(
    body_a: &Body,
    collider_a: usize,
    circle_a: &Circle,
    body_b: &Body,
    collider_b: usize,
    circle_b: &Circle,
) -> Option<Manifold> {
    let center_a = body_a.get_point(collider_a, 0);
    let center_b = body_b.get_point(collider_b, 0);

    let relative = center_a - center_b;
    let radii_sum = circle_a.radius + circle_b.radius;

    if relative.magnitude_squared() >= radii_sum * radii_sum {
        return None;
    }

    Some(Manifold::new(
        relative.normalize(),
        radii_sum - relative.magnitude(),
        center_b.midpoint(center_a),
        body_a.id,
        body_b.id,
    ))
}

fn project_points(points: &[Vec2], axis: Vec2) -> (f64, f64) {
    points.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), p| {
        let projection = axis.dot(*p);
        (min.min(projection), max.max(projection))
    })
}

/// Separating axis test using only the edges of `body_a`'s vertex collider.
///
/// `circle_b` selects how B is projected: vertices for a vertex collider,
/// centre plus/minus radius for a circle. Returns `None` as soon as any axis
/// separates the shapes.
fn check_polygon(
    body_a: &Body,
    collider_a: usize,
    body_b: &Body,
    collider_b: usize,
    circle_b: Option<Circle>,
) -> Option<Manifold> {
    let vertices_a = body_a.world_vertices(collider_a);
    let vertices_b = body_b.world_vertices(collider_b);
    let count = vertices_a.len();

    let mut minimum_overlap = f64::INFINITY;
    let mut minimum_axis = Vec2::ZERO;
    let mut maximum_overlap = f64::NEG_INFINITY;
    let mut contact = Vec2::ZERO;

    for i in 0..count {
        let start = vertices_a[i];
        let end = vertices_a[(i + 1) % count];
        let axis = (end - start).perpendicular_cw().normalize();

        let (min1, max1) = project_points(&vertices_a, axis);

        let (min2, max2) = match circle_b {
            Some(circle) => circle.project(vertices_b[0], axis),
            None => {
                // Contact estimate: where B's centre-to-vertex rays cross this edge's line.
                for &vertex in &vertices_b {
                    if let Some(hit) = line_intersection(start, end, body_b.position, vertex) {
                        if hit.overlap > maximum_overlap {
                            maximum_overlap = hit.overlap;
                            contact = hit.point;
                        }
                    }
                }
                project_points(&vertices_b, axis)
            }
        };

        if !(max2 >= min1 && max1 >= min2) {
            log::trace!(
                "bodies {}/{} colliders {}/{} separated on edge {}",
                body_a.id,
                body_b.id,
                collider_a,
                collider_b,
                i
            );
            return None;
        }

        // Reach of B past A's near side along this axis.
        let overlap = max2.max(min2) - max1.min(min1);
        if overlap < minimum_overlap {
            minimum_overlap = overlap;
            minimum_axis = axis;

            if circle_b.is_some() {
                maximum_overlap = overlap;
                contact = vertices_b[0].midpoint(vertices_a[0]);
            }
        }
    }

    Some(Manifold::new(minimum_axis, minimum_overlap, contact, body_a.id, body_b.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Collider;
    use approx::assert_abs_diff_eq;

    const EPSILON: f64 = 1e-9;

    fn registered(mut body: Body, id: usize) -> Body {
        body.id = id;
        body
    }

    #[test]
    fn test_circles_overlapping() {
        let a = registered(Body::new_circle(0.0, 0.0, 6.0, 1.0), 0);
        let b = registered(Body::new_circle(10.0, 0.0, 6.0, 1.0), 1);

        let manifolds = a.intersects(&b);
        assert_eq!(manifolds.len(), 1);
        let m = manifolds[0];
        assert!(m.collides);
        assert_abs_diff_eq!(m.intersection, 2.0, epsilon = EPSILON);
        assert_abs_diff_eq!(m.normal.x, -1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(m.normal.y, 0.0, epsilon = EPSILON);
        assert_eq!(m.contact_point, Vec2::new(5.0, 0.0));
        assert_eq!((m.body1, m.body2), (0, 1));

        let reverse = b.intersects(&a);
        assert_abs_diff_eq!(reverse[0].normal.x, 1.0, epsilon = EPSILON);
        assert_eq!((reverse[0].body1, reverse[0].body2), (1, 0));
    }

    #[test]
    fn test_circles_apart() {
        let a = Body::new_circle(0.0, 0.0, 6.0, 1.0);
        let b = Body::new_circle(20.0, 0.0, 6.0, 1.0);
        assert!(a.intersects(&b).is_empty());
        assert!(b.intersects(&a).is_empty());
    }

    #[test]
    fn test_circles_touching_do_not_collide() {
        let a = Body::new_circle(0.0, 0.0, 6.0, 1.0);
        let b = Body::new_circle(12.0, 0.0, 6.0, 1.0);
        assert!(a.intersects(&b).is_empty());
    }

    #[test]
    fn test_circle_penetration_matches_distance() {
        let radii = [(1.0, 2.0), (3.0, 3.0), (0.5, 4.5)];
        let offsets = [Vec2::new(1.0, 1.0), Vec2::new(-2.0, 0.5), Vec2::new(0.0, -4.9)];
        for &(r1, r2) in &radii {
            for &offset in &offsets {
                let a = Body::new_circle(0.0, 0.0, r1, 1.0);
                let b = Body::new_circle(offset.x, offset.y, r2, 1.0);
                let d = offset.magnitude();
                let manifolds = a.intersects(&b);
                assert_eq!(!manifolds.is_empty(), d < r1 + r2, "r1={} r2={} d={}", r1, r2, d);
                if let Some(m) = manifolds.first() {
                    assert_abs_diff_eq!(m.intersection, r1 + r2 - d, epsilon = EPSILON);
                }
            }
        }
    }

    #[test]
    fn test_circle_pair_short_circuits_other_colliders() {
        let mut a = Body::new_circle(0.0, 0.0, 1.0, 1.0);
        a.add_collider(Collider::new_box(0.0, 0.0, 100.0, 100.0, 0.0));
        let b = Body::new_circle(50.0, 0.0, 1.0, 1.0);

        // The first collider pair is circle/circle and misses; the big box is never examined.
        assert!(a.intersects(&b).is_empty());
    }

    #[test]
    fn test_boxes_apart() {
        let a = Body::new_box(0.0, 0.0, 10.0, 10.0, 0.0, 1.0);
        let b = Body::new_box(20.0, 0.0, 10.0, 10.0, 0.0, 1.0);
        assert!(a.intersects(&b).is_empty());
        assert!(b.intersects(&a).is_empty());
    }

    #[test]
    fn test_boxes_overlapping() {
        let a = registered(Body::new_box(0.0, 0.0, 10.0, 10.0, 0.0, 1.0), 0);
        let b = registered(Body::new_box(8.0, 0.0, 10.0, 10.0, 0.0, 1.0), 1);

        let manifolds = a.intersects(&b);
        assert_eq!(manifolds.len(), 1);
        let m = manifolds[0];
        assert_abs_diff_eq!(m.intersection, 2.0, epsilon = EPSILON);
        assert_abs_diff_eq!(m.normal.x, -1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(m.normal.y, 0.0, epsilon = EPSILON);

        let reverse = b.intersects(&a);
        assert_eq!(reverse.len(), 1);
        assert_abs_diff_eq!(reverse[0].intersection, 2.0, epsilon = EPSILON);
        assert_abs_diff_eq!(reverse[0].normal.x, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_box_against_circle() {
        let a = registered(Body::new_box(0.0, 0.0, 10.0, 10.0, 0.0, 1.0), 0);
        let b = registered(Body::new_circle(8.0, 0.0, 4.0, 1.0), 1);

        let manifolds = a.intersects(&b);
        assert_eq!(manifolds.len(), 1);
        let m = manifolds[0];
        assert_abs_diff_eq!(m.intersection, 1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(m.normal.x, -1.0, epsilon = EPSILON);
        // Midpoint of the circle centre and the box's first corner.
        assert_abs_diff_eq!(m.contact_point.x, 1.5, epsilon = EPSILON);
        assert_abs_diff_eq!(m.contact_point.y, -2.5, epsilon = EPSILON);
    }

    #[test]
    fn test_circle_as_axis_source_is_unresolved() {
        let circle = registered(Body::new_circle(8.0, 0.0, 4.0, 1.0), 1);
        let far_box = registered(Body::new_box(500.0, 0.0, 10.0, 10.0, 0.0, 1.0), 0);

        // Reported regardless of distance; the box-side test decides the pair.
        let manifolds = circle.intersects(&far_box);
        assert_eq!(manifolds.len(), 1);
        assert!(manifolds[0].is_degenerate());
        assert!(manifolds[0].intersection.is_infinite());
        assert!(far_box.intersects(&circle).is_empty());
    }

    #[test]
    fn test_rotated_box_overlap() {
        // A diamond whose right tip pokes one unit into an axis-aligned box.
        let diamond = Body::new_box(0.0, 0.0, 10.0, 10.0, 45.0, 1.0);
        let tip = 5.0 * 2f64.sqrt();
        let b = Body::new_box(tip + 4.0, 0.0, 10.0, 10.0, 0.0, 1.0);

        assert!(!diamond.intersects(&b).is_empty());
        let from_box = b.intersects(&diamond);
        assert_eq!(from_box.len(), 1);
        assert_abs_diff_eq!(from_box[0].intersection, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(from_box[0].normal.x, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_multiple_colliders_produce_multiple_manifolds() {
        let mut a = Body::new(0.0, 0.0, 0.0, 1.0);
        a.add_collider(Collider::new_box(-5.0, 0.0, 4.0, 4.0, 0.0));
        a.add_collider(Collider::new_box(5.0, 0.0, 4.0, 4.0, 0.0));
        let b = Body::new_box(0.0, 0.0, 14.0, 2.0, 0.0, 1.0);

        assert_eq!(a.intersects(&b).len(), 2);
        assert_eq!(b.intersects(&a).len(), 2);
    }

    #[test]
    fn test_polygon_contact_point_lies_on_edge_line() {
        let a = Body::new_box(0.0, 0.0, 10.0, 10.0, 0.0, 1.0);
        let b = Body::new_box(8.0, 0.0, 10.0, 10.0, 0.0, 1.0);
        let m = a.intersects(&b)[0];
        // Every candidate lies on one of A's edge lines, x = ±5 or y = ±5.
        let on_edge = (m.contact_point.x.abs() - 5.0).abs() < EPSILON
            || (m.contact_point.y.abs() - 5.0).abs() < EPSILON;
        assert!(on_edge, "contact {:?}", m.contact_point);
    }
}
