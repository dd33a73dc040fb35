//! Small `[f64; 3]` vector helpers.

/// Point or vector in 3D.
pub type Point3 = [f64; 3];

#[inline]
pub fn sub(a: Point3, b: Point3) -> Point3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
pub fn add(a: Point3, b: Point3) -> Point3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

#[inline]
pub fn scale(a: Point3, s: f64) -> Point3 {
    [a[0] * s, a[1] * s, a[2] * s]
}

#[inline]
pub fn dot(a: Point3, b: Point3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
pub fn cross(a: Point3, b: Point3) -> Point3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
pub fn norm(a: Point3) -> f64 {
    dot(a, a).sqrt()
}

#[inline]
pub fn squared_distance(a: Point3, b: Point3) -> f64 {
    let d = sub(a, b);
    dot(d, d)
}

#[inline]
pub fn distance(a: Point3, b: Point3) -> f64 {
    squared_distance(a, b).sqrt()
}

/// Arithmetic mean of the points; the origin for an empty slice.
pub fn centroid(points: &[Point3]) -> Point3 {
    if points.is_empty() {
        return [0.0; 3];
    }
    let sum = points.iter().fold([0.0; 3], |acc, p| add(acc, *p));
    scale(sum, 1.0 / points.len() as f64)
}

/// Squared area of the triangle `abc`.
pub fn squared_area(a: Point3, b: Point3, c: Point3) -> f64 {
    let n = cross(sub(b, a), sub(c, a));
    0.25 * dot(n, n)
}
