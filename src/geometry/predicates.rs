//! Geometric predicates used by mesh relaxation.
//!
//! These are floating-point predicates with a relative tolerance, not exact
//! ones; callers only use them to choose between two valid configurations.

use super::vector::{Point3, add, cross, dot, scale, squared_distance, sub};

const REL_EPS: f64 = 1e-12;

/// Position of a point relative to a closed bounded region.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BoundedSide {
    OnBoundedSide,
    OnBoundary,
    OnUnboundedSide,
}

/// Center of the circle through `p`, `q`, `r`, or `None` when they are collinear.
pub fn circumcenter(p: Point3, q: Point3, r: Point3) -> Option<Point3> {
    let a = sub(p, r);
    let b = sub(q, r);
    let axb = cross(a, b);
    let denom = 2.0 * dot(axb, axb);
    let scale_ref = dot(a, a) * dot(b, b);
    if denom <= REL_EPS * scale_ref || denom == 0.0 {
        return None;
    }
    let num = cross(sub(scale(b, dot(a, a)), scale(a, dot(b, b))), axb);
    Some(add(r, scale(num, 1.0 / denom)))
}

/// Side of `t` with respect to the smallest sphere through `p`, `q`, `r`
/// (the sphere whose equator is the circumcircle of the triangle).
///
/// Collinear `p`, `q`, `r` span no bounded sphere; every `t` is then reported
/// on the unbounded side.
pub fn side_of_bounded_sphere(p: Point3, q: Point3, r: Point3, t: Point3) -> BoundedSide {
    let Some(center) = circumcenter(p, q, r) else {
        return BoundedSide::OnUnboundedSide;
    };
    let radius2 = squared_distance(p, center);
    let d2 = squared_distance(t, center);
    let tol = REL_EPS * radius2.max(f64::MIN_POSITIVE);
    if d2 < radius2 - tol {
        BoundedSide::OnBoundedSide
    } else if d2 <= radius2 + tol {
        BoundedSide::OnBoundary
    } else {
        BoundedSide::OnUnboundedSide
    }
}
