//! Length and area measurements on a [`HalfedgeMesh`].
//!
//! ```rust
//! use mesh_kinetic::measure::{border_length, surface_area};
//! use mesh_kinetic::mesh::HalfedgeMesh;
//!
//! let points = [[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [2.0, 2.0, 0.0], [0.0, 2.0, 0.0]];
//! let mesh = HalfedgeMesh::from_polygons(&points, &[vec![0, 1, 2], vec![0, 2, 3]])?;
//! assert!((surface_area(&mesh)? - 4.0).abs() < 1e-12);
//! let border = mesh.halfedges().find(|&h| mesh.is_border(h)).unwrap();
//! assert!((border_length(&mesh, border)? - 8.0).abs() < 1e-12);
//! # Ok::<(), mesh_kinetic::mesh_error::MeshKineticError>(())
//! ```

use crate::geometry::vector::{distance, squared_area};
use crate::mesh::{FaceId, HalfedgeId, HalfedgeMesh};
use crate::mesh_error::MeshKineticError;

/// Length of the edge of `h`.
pub fn edge_length(mesh: &HalfedgeMesh, h: HalfedgeId) -> Result<f64, MeshKineticError> {
    if !mesh.contains_halfedge(h) {
        return Err(MeshKineticError::UnknownHalfedge(h));
    }
    Ok(distance(
        mesh.point(mesh.source(h)),
        mesh.point(mesh.target(h)),
    ))
}

/// Total length of the border cycle containing the border halfedge `h`.
pub fn border_length(mesh: &HalfedgeMesh, h: HalfedgeId) -> Result<f64, MeshKineticError> {
    if !mesh.contains_halfedge(h) {
        return Err(MeshKineticError::UnknownHalfedge(h));
    }
    if !mesh.is_border(h) {
        return Err(MeshKineticError::NotABorderHalfedge(h));
    }
    mesh.halfedges_around_face(h)
        .map(|b| edge_length(mesh, b))
        .sum()
}

/// Area of a triangular face.
pub fn face_area(mesh: &HalfedgeMesh, f: FaceId) -> Result<f64, MeshKineticError> {
    let [a, b, c] = mesh.triangle(f)?;
    Ok(squared_area(a, b, c).sqrt())
}

/// Summed area of a range of triangular faces.
pub fn area<I>(mesh: &HalfedgeMesh, faces: I) -> Result<f64, MeshKineticError>
where
    I: IntoIterator<Item = FaceId>,
{
    faces.into_iter().map(|f| face_area(mesh, f)).sum()
}

/// Area of every face of the mesh.
pub fn surface_area(mesh: &HalfedgeMesh) -> Result<f64, MeshKineticError> {
    area(mesh, mesh.faces())
}
