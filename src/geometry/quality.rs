//! Triangle quality metrics.
//!
//! # Examples
//! ```rust
//! use mesh_kinetic::geometry::quality::{triangle_quality, validate_triangle};
//!
//! let q = triangle_quality([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0])?;
//! assert!((q.min_angle_deg - 45.0).abs() < 1e-9);
//! assert!((q.area - 0.5).abs() < 1e-12);
//!
//! // Use the validator to error on degenerate triangles.
//! assert!(validate_triangle([0.0; 3], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]).is_err());
//! # Ok::<(), mesh_kinetic::mesh_error::MeshKineticError>(())
//! ```

use super::vector::{Point3, cross, dot, norm, sub};
use crate::mesh_error::MeshKineticError;
use std::f64::consts::PI;

const EPS: f64 = 1e-12;

/// Basic quality metrics for a single triangle.
#[derive(Clone, Copy, Debug)]
pub struct TriangleQuality {
    /// Ratio of the longest edge length to the shortest edge length.
    pub aspect_ratio: f64,
    /// Minimum corner angle (degrees).
    pub min_angle_deg: f64,
    /// Unsigned area.
    pub area: f64,
}

/// Compute quality metrics for the triangle `abc`.
///
/// Returns an error when an edge has zero length.
pub fn triangle_quality(
    a: Point3,
    b: Point3,
    c: Point3,
) -> Result<TriangleQuality, MeshKineticError> {
    let vertices = [a, b, c];
    let mut min_len = f64::INFINITY;
    let mut max_len: f64 = 0.0;
    let mut min_angle = f64::INFINITY;
    for i in 0..3 {
        let p = vertices[i];
        let next = vertices[(i + 1) % 3];
        let prev = vertices[(i + 2) % 3];
        let len = norm(sub(next, p));
        min_len = min_len.min(len);
        max_len = max_len.max(len);
        min_angle = min_angle.min(angle_deg(sub(next, p), sub(prev, p))?);
    }
    let area = 0.5 * norm(cross(sub(b, a), sub(c, a)));
    Ok(TriangleQuality {
        aspect_ratio: max_len / min_len,
        min_angle_deg: min_angle,
        area,
    })
}

/// Validate that a triangle is not degenerate.
///
/// Returns the computed quality metrics on success.
pub fn validate_triangle(
    a: Point3,
    b: Point3,
    c: Point3,
) -> Result<TriangleQuality, MeshKineticError> {
    let quality = triangle_quality(a, b, c)?;
    if !quality.area.is_finite() || quality.area <= EPS {
        return Err(MeshKineticError::InvalidGeometry(format!(
            "degenerate triangle: area = {}",
            quality.area
        )));
    }
    if !quality.min_angle_deg.is_finite() || quality.min_angle_deg <= 0.0 {
        return Err(MeshKineticError::InvalidGeometry(format!(
            "invalid triangle: min angle = {}",
            quality.min_angle_deg
        )));
    }
    Ok(quality)
}

fn angle_deg(a: Point3, b: Point3) -> Result<f64, MeshKineticError> {
    let na = norm(a);
    let nb = norm(b);
    if na <= EPS || nb <= EPS {
        return Err(MeshKineticError::InvalidGeometry(
            "zero-length edge detected".into(),
        ));
    }
    let cos = (dot(a, b) / (na * nb)).clamp(-1.0, 1.0);
    Ok(cos.acos() * 180.0 / PI)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equilateral_triangle() {
        let h = 3f64.sqrt() / 2.0;
        let q = triangle_quality([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.5, h, 0.0]).unwrap();
        assert!((q.min_angle_deg - 60.0).abs() < 1e-9);
        assert!((q.aspect_ratio - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_length_edge_is_an_error() {
        let err = triangle_quality([0.0; 3], [0.0; 3], [1.0, 0.0, 0.0]).unwrap_err();
        assert!(matches!(err, MeshKineticError::InvalidGeometry(_)));
    }

    #[test]
    fn sliver_is_rejected() {
        assert!(validate_triangle([0.0; 3], [1.0, 0.0, 0.0], [0.5, 0.0, 0.0]).is_err());
        assert!(validate_triangle([0.0; 3], [1.0, 0.0, 0.0], [0.5, 0.5, 0.0]).is_ok());
    }
}
